use crate::errors::TranscodeError;
use crate::transcode::params::OutputFormat;
use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, ImageFormat};
use std::io::Cursor;

/// 画像をエンコードする
///
/// quality は JPEG のみに適用。PNG/GIF はエンジンの既定圧縮を使う。
pub fn encode_image(
    img: &DynamicImage,
    format: OutputFormat,
    quality: u8,
) -> Result<Vec<u8>, TranscodeError> {
    let mut buf = Cursor::new(Vec::new());

    match format {
        OutputFormat::Jpeg => {
            let encoder = JpegEncoder::new_with_quality(&mut buf, quality);
            img.to_rgb8()
                .write_with_encoder(encoder)
                .map_err(|e| TranscodeError::ProcessingFailed(format!("JPEG encode failed: {e}")))?;
        }
        OutputFormat::Png => {
            img.write_to(&mut buf, ImageFormat::Png)
                .map_err(|e| TranscodeError::ProcessingFailed(format!("PNG encode failed: {e}")))?;
        }
        OutputFormat::Gif => {
            img.write_to(&mut buf, ImageFormat::Gif)
                .map_err(|e| TranscodeError::ProcessingFailed(format!("GIF encode failed: {e}")))?;
        }
    }

    Ok(buf.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_jpeg() {
        let img = DynamicImage::new_rgb8(10, 10);
        let data = encode_image(&img, OutputFormat::Jpeg, 85).unwrap();

        assert!(!data.is_empty());
        // JPEG マジックナンバー確認
        assert_eq!(&data[0..2], &[0xFF, 0xD8]);
    }

    #[test]
    fn test_encode_png() {
        let img = DynamicImage::new_rgb8(10, 10);
        let data = encode_image(&img, OutputFormat::Png, 85).unwrap();

        assert!(!data.is_empty());
        // PNG マジックナンバー確認
        assert_eq!(&data[0..8], &[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A]);
    }

    #[test]
    fn test_encode_gif() {
        let img = DynamicImage::new_rgba8(10, 10);
        let data = encode_image(&img, OutputFormat::Gif, 85).unwrap();

        assert!(!data.is_empty());
        assert_eq!(&data[0..3], b"GIF");
    }
}
