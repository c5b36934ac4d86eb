use std::path::Path;

use image::imageops::{self, FilterType};
use image::{Rgb, RgbImage};
use ndarray::Array4;
use tracing::{debug, error};

use crate::config::{
    Normalization, PreprocessConfig, ResizeMode, TensorLayout, IMAGENET_MEAN, IMAGENET_STD,
    INPUT_SIZE,
};
use crate::error::{ClassifyError, Result};

/// Decode an image file and force it to 8-bit RGB.
pub fn load_rgb(path: &Path) -> Result<RgbImage> {
    let img = image::open(path).map_err(|source| {
        error!("Failed to open image {}: {}", path.display(), source);
        ClassifyError::ImageOpen {
            path: path.to_path_buf(),
            source,
        }
    })?;
    debug!(width = img.width(), height = img.height(), "decoded image");
    Ok(img.to_rgb8())
}

pub fn resize(img: &RgbImage, mode: ResizeMode) -> RgbImage {
    match mode {
        ResizeMode::Stretch => imageops::resize(img, INPUT_SIZE, INPUT_SIZE, FilterType::Nearest),
        ResizeMode::Letterbox => letterbox(img),
    }
}

fn letterbox(img: &RgbImage) -> RgbImage {
    let (width, height) = img.dimensions();

    // longer side becomes INPUT_SIZE, the other keeps the ratio
    let (new_width, new_height) = if width > height {
        (INPUT_SIZE, ((INPUT_SIZE * height) / width).max(1))
    } else {
        (((INPUT_SIZE * width) / height).max(1), INPUT_SIZE)
    };

    let resized = imageops::resize(img, new_width, new_height, FilterType::Triangle);

    let mut canvas = RgbImage::from_pixel(INPUT_SIZE, INPUT_SIZE, Rgb([0, 0, 0]));
    let pad_x = (INPUT_SIZE - new_width) / 2;
    let pad_y = (INPUT_SIZE - new_height) / 2;

    for (x, y, pixel) in resized.enumerate_pixels() {
        canvas.put_pixel(x + pad_x, y + pad_y, *pixel);
    }

    canvas
}

/// Pack a `INPUT_SIZE` square RGB image into a batch of one.
pub fn to_tensor(img: &RgbImage, layout: TensorLayout, normalize: Normalization) -> Array4<f32> {
    let side = INPUT_SIZE as usize;
    let value = |x: usize, y: usize, c: usize| {
        let v = img.get_pixel(x as u32, y as u32)[c] as f32 / 255.0;
        match normalize {
            Normalization::Unit => v,
            Normalization::Imagenet => (v - IMAGENET_MEAN[c]) / IMAGENET_STD[c],
        }
    };

    match layout {
        TensorLayout::Nhwc => {
            Array4::from_shape_fn((1, side, side, 3), |(_, y, x, c)| value(x, y, c))
        }
        TensorLayout::Nchw => {
            Array4::from_shape_fn((1, 3, side, side), |(_, c, y, x)| value(x, y, c))
        }
    }
}

pub fn preprocess_image(path: &Path, config: &PreprocessConfig) -> Result<Array4<f32>> {
    let img = load_rgb(path)?;
    let resized = resize(&img, config.resize);
    debug!(
        mode = ?config.resize,
        width = resized.width(),
        height = resized.height(),
        "resized image"
    );
    Ok(to_tensor(&resized, config.layout, config.normalize))
}
