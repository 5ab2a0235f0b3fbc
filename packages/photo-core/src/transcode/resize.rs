use crate::constants::MAX_PIXELS;
use crate::errors::TranscodeError;
use fast_image_resize::{FilterType, PixelType, ResizeOptions, Resizer, images::Image};
use image::DynamicImage;

/// 画像をリサイズする
///
/// fast_image_resize を使用して高品質なリサイズを行う（Lanczos3）。
/// アルファチャンネルは維持する。後段で白背景への平坦化を行う場合、
/// ここで透過情報を落とすわけにはいかない。
pub fn resize_image(
    img: &DynamicImage,
    target_w: u32,
    target_h: u32,
) -> Result<DynamicImage, TranscodeError> {
    // ピクセル数チェック（force 指定の拡大でも適用）
    let total_pixels = target_w as u64 * target_h as u64;
    if total_pixels > MAX_PIXELS {
        return Err(TranscodeError::TooLarge {
            width: target_w,
            height: target_h,
        });
    }

    let options =
        ResizeOptions::new().resize_alg(fast_image_resize::ResizeAlg::Convolution(
            FilterType::Lanczos3,
        ));
    let mut resizer = Resizer::new();

    if img.color().has_alpha() {
        let rgba = img.to_rgba8();
        let (width, height) = (rgba.width(), rgba.height());
        let src_image = Image::from_vec_u8(width, height, rgba.into_raw(), PixelType::U8x4)
            .map_err(|e| {
                TranscodeError::ProcessingFailed(format!("failed to create source image: {e}"))
            })?;
        let mut dst_image = Image::new(target_w, target_h, PixelType::U8x4);
        resizer
            .resize(&src_image, &mut dst_image, &options)
            .map_err(|e| TranscodeError::ProcessingFailed(format!("resize failed: {e}")))?;
        let resized = image::RgbaImage::from_raw(target_w, target_h, dst_image.into_vec())
            .ok_or_else(|| {
                TranscodeError::ProcessingFailed("failed to convert resized image".to_string())
            })?;
        Ok(DynamicImage::ImageRgba8(resized))
    } else {
        let rgb = img.to_rgb8();
        let (width, height) = (rgb.width(), rgb.height());
        let src_image = Image::from_vec_u8(width, height, rgb.into_raw(), PixelType::U8x3)
            .map_err(|e| {
                TranscodeError::ProcessingFailed(format!("failed to create source image: {e}"))
            })?;
        let mut dst_image = Image::new(target_w, target_h, PixelType::U8x3);
        resizer
            .resize(&src_image, &mut dst_image, &options)
            .map_err(|e| TranscodeError::ProcessingFailed(format!("resize failed: {e}")))?;
        let resized = image::RgbImage::from_raw(target_w, target_h, dst_image.into_vec())
            .ok_or_else(|| {
                TranscodeError::ProcessingFailed("failed to convert resized image".to_string())
            })?;
        Ok(DynamicImage::ImageRgb8(resized))
    }
}
