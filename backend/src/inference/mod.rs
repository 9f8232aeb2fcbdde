pub mod model;
pub mod onnx;
pub mod preprocess;
#[cfg(feature = "torch")]
pub mod torch;

pub use model::{Classification, Classifier, InferenceError, Model};
