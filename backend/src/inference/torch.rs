use std::path::Path;
use std::sync::{Arc, Mutex};

use log::info;
use tch::{CModule, Device, Kind, Tensor, nn::ModuleT};

use super::model::{Classifier, InferenceError};
use super::preprocess::InputTensor;

/// TorchScript export of the classification network.
#[derive(Clone)]
pub struct TorchModel {
    model: Arc<Mutex<CModule>>,
    device: Device,
}

impl TorchModel {
    pub fn load(model_path: &Path) -> Result<Self, InferenceError> {
        let device = Device::cuda_if_available();
        let module = CModule::load_on_device(model_path, device).map_err(|e| {
            InferenceError::ModelUnavailable(format!(
                "failed to load TorchScript module {}: {}",
                model_path.display(),
                e
            ))
        })?;
        info!("TorchScript model ready on {:?}", device);
        Ok(Self {
            model: Arc::new(Mutex::new(module)),
            device,
        })
    }
}

impl Classifier for TorchModel {
    fn predict(&self, input: &InputTensor) -> Result<Vec<f32>, InferenceError> {
        let shape: Vec<i64> = InputTensor::SHAPE.iter().map(|&d| d as i64).collect();
        let tensor = Tensor::from_slice(input.as_slice())
            .view(shape.as_slice())
            .to_device(self.device);

        let output = {
            let model = self
                .model
                .lock()
                .map_err(|_| InferenceError::Model("model lock poisoned".into()))?;
            model.forward_t(&tensor, false)
        };

        let output_flat = output.to_kind(Kind::Float).to_device(Device::Cpu).view([-1]);
        let num_elements = output_flat.size()[0] as usize;
        let mut output_vec = vec![0.0f32; num_elements];
        output_flat.copy_data(&mut output_vec, num_elements);
        Ok(output_vec)
    }
}
