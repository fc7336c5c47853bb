use crate::VisionError;
use image::imageops::{self, FilterType};
use ndarray::Array4;

/// Decode raw upload bytes into a batched, normalized NHWC tensor ready for
/// the model: shape `[1, size, size, 3]`, f32 values in `[0, 1]`.
///
/// Any source format is converted to 3-channel RGB (alpha dropped, grayscale
/// expanded) and resized to exactly `size`×`size` with CatmullRom resampling.
/// Pure function of its inputs.
pub fn preprocess(bytes: &[u8], size: u32) -> Result<Array4<f32>, VisionError> {
    let decoded = image::load_from_memory(bytes)?;
    let rgb = decoded.to_rgb8();
    let resized = imageops::resize(&rgb, size, size, FilterType::CatmullRom);

    let tensor = Array4::from_shape_fn((1, size as usize, size as usize, 3), |(_, y, x, c)| {
        resized.get_pixel(x as u32, y as u32)[c] as f32 / 255.0
    });

    Ok(tensor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, GrayImage, Rgb, RgbImage, Rgba, RgbaImage};
    use std::io::Cursor;

    fn encode_png(img: DynamicImage) -> Vec<u8> {
        let mut buf = Cursor::new(Vec::new());
        img.write_to(&mut buf, image::ImageFormat::Png).unwrap();
        buf.into_inner()
    }

    #[test]
    fn produces_exact_batched_shape() {
        let img = RgbImage::from_pixel(320, 240, Rgb([200, 120, 40]));
        let tensor = preprocess(&encode_png(DynamicImage::ImageRgb8(img)), 180).unwrap();
        assert_eq!(tensor.shape(), &[1, 180, 180, 3]);
    }

    #[test]
    fn values_are_normalized_to_unit_range() {
        let img = RgbImage::from_fn(64, 64, |x, y| Rgb([(x * 4) as u8, (y * 4) as u8, 255]));
        let tensor = preprocess(&encode_png(DynamicImage::ImageRgb8(img)), 180).unwrap();
        assert!(tensor.iter().all(|&v| (0.0..=1.0).contains(&v)));
    }

    #[test]
    fn uniform_image_keeps_channel_values() {
        let img = RgbImage::from_pixel(10, 10, Rgb([255, 0, 127]));
        let tensor = preprocess(&encode_png(DynamicImage::ImageRgb8(img)), 180).unwrap();
        let eps = 1e-6;
        assert!((tensor[[0, 0, 0, 0]] - 1.0).abs() < eps);
        assert!(tensor[[0, 0, 0, 1]].abs() < eps);
        assert!((tensor[[0, 90, 90, 2]] - 127.0 / 255.0).abs() < eps);
    }

    #[test]
    fn grayscale_expands_to_three_channels() {
        let img = GrayImage::from_pixel(50, 50, image::Luma([128]));
        let tensor = preprocess(&encode_png(DynamicImage::ImageLuma8(img)), 180).unwrap();
        assert_eq!(tensor.shape(), &[1, 180, 180, 3]);
        let px = 128.0 / 255.0;
        for c in 0..3 {
            assert!((tensor[[0, 10, 10, c]] - px).abs() < 1e-6);
        }
    }

    #[test]
    fn alpha_channel_is_discarded() {
        let img = RgbaImage::from_pixel(30, 30, Rgba([10, 20, 30, 0]));
        let tensor = preprocess(&encode_png(DynamicImage::ImageRgba8(img)), 180).unwrap();
        assert_eq!(tensor.shape(), &[1, 180, 180, 3]);
    }

    #[test]
    fn non_square_input_is_resized_exactly() {
        let img = RgbImage::from_pixel(640, 111, Rgb([1, 2, 3]));
        let tensor = preprocess(&encode_png(DynamicImage::ImageRgb8(img)), 180).unwrap();
        assert_eq!(tensor.shape(), &[1, 180, 180, 3]);
    }

    #[test]
    fn garbage_bytes_fail_with_decode_error() {
        let err = preprocess(b"definitely not an image", 180).unwrap_err();
        assert!(matches!(err, VisionError::Decode(_)));
    }

    #[test]
    fn empty_bytes_fail_with_decode_error() {
        let err = preprocess(&[], 180).unwrap_err();
        assert!(matches!(err, VisionError::Decode(_)));
    }
}
