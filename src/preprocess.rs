//! Image preprocessing for model inference
//!
//! Turns raw uploaded bytes into a single-item batch tensor the classifier
//! accepts: decode, convert to RGB, resize to 224x224, scale pixel values
//! from [0, 255] to [0.0, 1.0]. Layout is CHW, batch shape [1, 3, 224, 224].

use burn::tensor::{backend::Backend, Tensor};
use image::{imageops::FilterType, DynamicImage, RgbImage};

use crate::error::{LeafScanError, Result};

/// Model input size (square)
pub const IMAGE_SIZE: u32 = 224;

/// Decode raw bytes as an image.
///
/// Reports a decode error instead of panicking when the bytes are not a
/// valid image in any supported format.
pub fn decode_image(bytes: &[u8]) -> Result<DynamicImage> {
    image::load_from_memory(bytes).map_err(|e| LeafScanError::ImageDecode(e.to_string()))
}

/// Resize an image to the model input dimensions
pub fn resize_image(image: &DynamicImage) -> RgbImage {
    image
        .resize_exact(IMAGE_SIZE, IMAGE_SIZE, FilterType::Triangle)
        .to_rgb8()
}

/// Scale an RGB image to a flat [0, 1] vector in CHW layout
pub fn image_to_chw(rgb: &RgbImage) -> Vec<f32> {
    let (width, height) = rgb.dimensions();
    let num_pixels = (width * height) as usize;

    let mut scaled = vec![0.0f32; 3 * num_pixels];

    for (i, pixel) in rgb.pixels().enumerate() {
        // CHW layout: all R values, then all G values, then all B values
        scaled[i] = pixel[0] as f32 / 255.0;
        scaled[num_pixels + i] = pixel[1] as f32 / 255.0;
        scaled[2 * num_pixels + i] = pixel[2] as f32 / 255.0;
    }

    scaled
}

/// Convert a decoded image into a single-item batch tensor [1, 3, 224, 224]
pub fn to_batch<B: Backend>(image: &DynamicImage, device: &B::Device) -> Tensor<B, 4> {
    let rgb = resize_image(image);
    let pixels = image_to_chw(&rgb);
    let size = IMAGE_SIZE as usize;

    Tensor::<B, 1>::from_floats(pixels.as_slice(), device).reshape([1, 3, size, size])
}

/// Full preprocessing pipeline: raw bytes to a batch tensor
pub fn preprocess<B: Backend>(bytes: &[u8], device: &B::Device) -> Result<Tensor<B, 4>> {
    let image = decode_image(bytes)?;
    Ok(to_batch::<B>(&image, device))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    type TestBackend = burn_ndarray::NdArray;

    fn sample_image(width: u32, height: u32) -> DynamicImage {
        let mut img = RgbImage::new(width, height);
        for (x, y, pixel) in img.enumerate_pixels_mut() {
            *pixel = Rgb([(x % 256) as u8, (y % 256) as u8, 128]);
        }
        DynamicImage::ImageRgb8(img)
    }

    #[test]
    fn test_batch_shape() {
        let device = Default::default();
        let img = sample_image(IMAGE_SIZE, IMAGE_SIZE);
        let batch = to_batch::<TestBackend>(&img, &device);
        assert_eq!(batch.dims(), [1, 3, 224, 224]);
    }

    #[test]
    fn test_non_square_input_is_resized() {
        let device = Default::default();
        let img = sample_image(640, 480);
        let batch = to_batch::<TestBackend>(&img, &device);
        assert_eq!(batch.dims(), [1, 3, 224, 224]);
    }

    #[test]
    fn test_values_scaled_to_unit_range() {
        let img = sample_image(IMAGE_SIZE, IMAGE_SIZE);
        let pixels = image_to_chw(&resize_image(&img));
        assert_eq!(pixels.len(), 3 * 224 * 224);
        assert!(pixels.iter().all(|&v| (0.0..=1.0).contains(&v)));
    }

    #[test]
    fn test_grayscale_converts_to_three_channels() {
        let gray = DynamicImage::ImageLuma8(image::GrayImage::new(64, 64));
        let pixels = image_to_chw(&resize_image(&gray));
        assert_eq!(pixels.len(), 3 * 224 * 224);
    }

    #[test]
    fn test_decode_rejects_garbage() {
        let result = decode_image(b"definitely not an image");
        assert!(matches!(result, Err(LeafScanError::ImageDecode(_))));
    }

    #[test]
    fn test_decode_roundtrip_png() {
        let img = sample_image(32, 32);
        let mut bytes = Vec::new();
        img.write_to(
            &mut std::io::Cursor::new(&mut bytes),
            image::ImageFormat::Png,
        )
        .unwrap();

        let decoded = decode_image(&bytes).unwrap();
        assert_eq!(decoded.width(), 32);
        assert_eq!(decoded.height(), 32);
    }
}
