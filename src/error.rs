use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClassifyError {
    #[error("could not open image {path}: {source}")]
    ImageOpen {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("could not load model {path}: {reason}")]
    ModelLoad { path: PathBuf, reason: String },
    #[error("inference failed: {0}")]
    Inference(String),
    #[error("model produced no output scores")]
    EmptyOutput,
    #[error("model has {outputs} outputs but {labels} class labels are known")]
    LabelMismatch { outputs: usize, labels: usize },
}

pub type Result<T> = std::result::Result<T, ClassifyError>;
