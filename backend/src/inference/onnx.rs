use std::path::Path;

use log::info;
use tract_onnx::prelude::*;

use super::model::{Classifier, InferenceError};
use super::preprocess::InputTensor;

/// ONNX export of the classification network, run with tract.
pub struct OnnxModel {
    plan: TypedRunnableModel<TypedModel>,
}

impl OnnxModel {
    pub fn load(model_path: &Path) -> Result<Self, InferenceError> {
        let [n, h, w, c] = InputTensor::SHAPE;
        let plan = tract_onnx::onnx()
            .model_for_path(model_path)
            .and_then(|model| {
                model.with_input_fact(
                    0,
                    InferenceFact::dt_shape(f32::datum_type(), tvec!(n, h, w, c)),
                )
            })
            .and_then(|model| model.into_optimized())
            .and_then(|model| model.into_runnable())
            .map_err(|e| {
                InferenceError::ModelUnavailable(format!(
                    "failed to load ONNX model {}: {}",
                    model_path.display(),
                    e
                ))
            })?;

        info!("ONNX model ready, input shape {:?}", InputTensor::SHAPE);
        Ok(Self { plan })
    }
}

impl Classifier for OnnxModel {
    fn predict(&self, input: &InputTensor) -> Result<Vec<f32>, InferenceError> {
        let tensor = Tensor::from_shape(&InputTensor::SHAPE, input.as_slice())
            .map_err(|e| InferenceError::Model(e.to_string()))?;

        let outputs = self
            .plan
            .run(tvec!(tensor.into()))
            .map_err(|e| InferenceError::Model(e.to_string()))?;

        let output = outputs
            .first()
            .ok_or_else(|| InferenceError::Model("model produced no outputs".into()))?;
        let view = output
            .to_array_view::<f32>()
            .map_err(|e| InferenceError::Model(e.to_string()))?;

        Ok(view.iter().copied().collect())
    }
}
