mod config;
mod error;
mod labels;
mod models;
mod predictor;
mod preprocess;

use std::path::PathBuf;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::{
    Normalization, PreprocessConfig, ResizeMode, TensorLayout, DEFAULT_MODEL_PATH,
};
use crate::predictor::Predictor;

/// Classify a photo of a fruit or vegetable and print the result as JSON.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Image to classify.
    image: PathBuf,

    /// ONNX model artifact.
    #[arg(long, default_value = DEFAULT_MODEL_PATH)]
    model: PathBuf,

    #[arg(long, value_enum, default_value_t = ResizeMode::Stretch)]
    resize: ResizeMode,

    #[arg(long, value_enum, default_value_t = TensorLayout::Nhwc)]
    layout: TensorLayout,

    #[arg(long, value_enum, default_value_t = Normalization::Unit)]
    normalize: Normalization,

    /// Number of candidates to report; extra ones appear under `alternatives`.
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u16).range(1..))]
    top_k: u16,

    #[arg(long)]
    pretty: bool,

    /// More log output on stderr (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Args {
    fn preprocess_config(&self) -> PreprocessConfig {
        PreprocessConfig {
            resize: self.resize,
            layout: self.layout,
            normalize: self.normalize,
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let config = args.preprocess_config();
    let predictor = Predictor::load(&args.model, &config)?;

    info!(image = %args.image.display(), "classifying");
    let input = preprocess::preprocess_image(&args.image, &config)?;
    let response = predictor.predict(input, usize::from(args.top_k))?;

    println!("{}", response.to_json(args.pretty)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["predict_ingredient", "carrot.jpg"]).unwrap();
        assert_eq!(args.image, PathBuf::from("carrot.jpg"));
        assert_eq!(args.model, PathBuf::from(DEFAULT_MODEL_PATH));
        assert_eq!(args.top_k, 1);
        assert!(!args.pretty);
        assert_eq!(args.preprocess_config(), PreprocessConfig::default());
    }

    #[test]
    fn test_flags() {
        let args = Args::try_parse_from([
            "predict_ingredient",
            "--model",
            "other.onnx",
            "--resize",
            "letterbox",
            "--layout",
            "nchw",
            "--normalize",
            "imagenet",
            "--top-k",
            "3",
            "-vv",
            "kiwi.png",
        ])
        .unwrap();
        assert_eq!(args.model, PathBuf::from("other.onnx"));
        assert_eq!(args.top_k, 3);
        assert_eq!(args.verbose, 2);
        let config = args.preprocess_config();
        assert_eq!(config.resize, ResizeMode::Letterbox);
        assert_eq!(config.input_shape(), [1, 3, 224, 224]);
        assert_eq!(config.normalize, Normalization::Imagenet);
    }

    #[test]
    fn test_image_is_required() {
        assert!(Args::try_parse_from(["predict_ingredient"]).is_err());
    }

    #[test]
    fn test_zero_top_k_rejected() {
        assert!(Args::try_parse_from(["predict_ingredient", "--top-k", "0", "a.jpg"]).is_err());
    }
}
