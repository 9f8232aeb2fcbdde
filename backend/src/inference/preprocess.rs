use image::imageops::FilterType;
use image::{DynamicImage, RgbImage};

use super::model::InferenceError;

pub const INPUT_SIZE: u32 = 299;
pub const INPUT_CHANNELS: usize = 3;

/// A single-image batch in NHWC layout, values scaled to [0, 1].
#[derive(Debug, Clone, PartialEq)]
pub struct InputTensor {
    data: Vec<f32>,
}

impl InputTensor {
    pub const SHAPE: [usize; 4] = [1, INPUT_SIZE as usize, INPUT_SIZE as usize, INPUT_CHANNELS];

    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

pub fn decode_image(image: &[u8]) -> Result<DynamicImage, InferenceError> {
    if image.is_empty() {
        return Err(InferenceError::InvalidImage("empty upload".into()));
    }
    image::load_from_memory(image).map_err(|e| InferenceError::InvalidImage(e.to_string()))
}

/// Resize to 299x299 with a bicubic filter and scale to [0, 1].
pub fn preprocess_image(image: &DynamicImage) -> Result<InputTensor, InferenceError> {
    if image.width() == 0 || image.height() == 0 {
        return Err(InferenceError::InvalidImage(format!(
            "image has no pixels ({}x{})",
            image.width(),
            image.height()
        )));
    }

    let resized: RgbImage = image
        .resize_exact(INPUT_SIZE, INPUT_SIZE, FilterType::CatmullRom)
        .to_rgb8();

    let data = resized
        .into_raw()
        .into_iter()
        .map(|v| v as f32 / 255.0)
        .collect::<Vec<f32>>();

    let expected: usize = InputTensor::SHAPE.iter().product();
    if data.len() != expected {
        return Err(InferenceError::InvalidImage(format!(
            "resized image has {} values, expected {}",
            data.len(),
            expected
        )));
    }

    Ok(InputTensor { data })
}
