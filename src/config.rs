use clap::ValueEnum;

pub const DEFAULT_MODEL_PATH: &str = "fruit_vegetable_classifier_improved.onnx";
pub const INPUT_SIZE: u32 = 224;

pub const IMAGENET_MEAN: [f32; 3] = [0.485, 0.456, 0.406];
pub const IMAGENET_STD: [f32; 3] = [0.229, 0.224, 0.225];

/// How the source image is brought to `INPUT_SIZE` x `INPUT_SIZE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ResizeMode {
    /// Exact resize with nearest-neighbour sampling, aspect ratio ignored.
    #[default]
    Stretch,
    /// Keep aspect ratio and pad the short side with black.
    Letterbox,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum TensorLayout {
    /// `[1, H, W, C]`
    #[default]
    Nhwc,
    /// `[1, C, H, W]`
    Nchw,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Normalization {
    /// Scale to `[0, 1]`.
    #[default]
    Unit,
    /// Scale to `[0, 1]` then standardise per channel with ImageNet statistics.
    Imagenet,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PreprocessConfig {
    pub resize: ResizeMode,
    pub layout: TensorLayout,
    pub normalize: Normalization,
}

impl PreprocessConfig {
    /// Shape of the tensor fed to the model.
    pub fn input_shape(&self) -> [usize; 4] {
        let side = INPUT_SIZE as usize;
        match self.layout {
            TensorLayout::Nhwc => [1, side, side, 3],
            TensorLayout::Nchw => [1, 3, side, side],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = PreprocessConfig::default();
        assert_eq!(config.resize, ResizeMode::Stretch);
        assert_eq!(config.normalize, Normalization::Unit);
        assert_eq!(config.input_shape(), [1, 224, 224, 3]);
    }

    #[test]
    fn test_nchw_shape() {
        let config = PreprocessConfig {
            layout: TensorLayout::Nchw,
            ..Default::default()
        };
        assert_eq!(config.input_shape(), [1, 3, 224, 224]);
    }
}
