use crate::constants::DEFAULT_QUALITY;
use image::ImageFormat;

/// 出力フォーマット
///
/// リサイズ後は常に JPEG。リサイズ不要の場合のみ元フォーマットを
/// 維持するが、許可リスト（JPEG/PNG/GIF）外は JPEG へ変換する。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Jpeg,
    Png,
    Gif,
}

impl OutputFormat {
    /// デコード時に推測したフォーマットから作成（許可リスト外は None）
    pub fn from_image_format(format: ImageFormat) -> Option<Self> {
        match format {
            ImageFormat::Jpeg => Some(Self::Jpeg),
            ImageFormat::Png => Some(Self::Png),
            ImageFormat::Gif => Some(Self::Gif),
            _ => None,
        }
    }

    /// Content-Type を取得
    pub fn content_type(&self) -> &'static str {
        match self {
            Self::Jpeg => "image/jpeg",
            Self::Png => "image/png",
            Self::Gif => "image/gif",
        }
    }
}

/// 変換パラメータ（値のみ、同一性なし）
#[derive(Debug, Clone)]
pub struct TranscodeSpec {
    pub max_width: u32,
    pub max_height: u32,
    /// JPEG 品質（1-100）。PNG/GIF では無視される
    pub quality: u8,
    /// true なら対象領域を覆うように縮小し、中央を切り抜く
    pub crop: bool,
    /// true なら縮小不要（拡大になる）でも必ずリサイズする
    pub force: bool,
}

impl TranscodeSpec {
    pub fn new(max_width: u32, max_height: u32) -> Self {
        Self {
            max_width,
            max_height,
            quality: DEFAULT_QUALITY,
            crop: false,
            force: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_image_format_allow_list() {
        assert_eq!(
            OutputFormat::from_image_format(ImageFormat::Jpeg),
            Some(OutputFormat::Jpeg)
        );
        assert_eq!(
            OutputFormat::from_image_format(ImageFormat::Png),
            Some(OutputFormat::Png)
        );
        assert_eq!(
            OutputFormat::from_image_format(ImageFormat::Gif),
            Some(OutputFormat::Gif)
        );
        // 許可リスト外
        assert_eq!(OutputFormat::from_image_format(ImageFormat::Bmp), None);
        assert_eq!(OutputFormat::from_image_format(ImageFormat::Tiff), None);
    }

    #[test]
    fn test_content_type() {
        assert_eq!(OutputFormat::Jpeg.content_type(), "image/jpeg");
        assert_eq!(OutputFormat::Png.content_type(), "image/png");
        assert_eq!(OutputFormat::Gif.content_type(), "image/gif");
    }

    #[test]
    fn test_spec_defaults() {
        let spec = TranscodeSpec::new(800, 600);
        assert_eq!(spec.quality, DEFAULT_QUALITY);
        assert!(!spec.crop);
        assert!(!spec.force);
    }
}
