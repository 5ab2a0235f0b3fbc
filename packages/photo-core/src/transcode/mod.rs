pub mod crop;
pub mod decode;
pub mod encode;
pub mod flatten;
pub mod params;
pub mod resize;
pub mod scale;

pub use decode::decode_image;
pub use encode::encode_image;
pub use params::{OutputFormat, TranscodeSpec};

use crate::constants::MAX_PIXELS;
use crate::errors::TranscodeError;
use bytes::Bytes;

/// 変換結果。生成後は不変
#[derive(Debug, Clone)]
pub struct TranscodeResult {
    pub data: Bytes,
    pub mime_type: String,
    pub width: u32,
    pub height: u32,
}

/// get_info の戻り値
#[derive(Debug, Clone)]
pub struct ImageInfo {
    pub mime_type: String,
    pub width: u32,
    pub height: u32,
}

/// 画像の MIME タイプと寸法を返す
pub fn get_info(data: &[u8]) -> Result<ImageInfo, TranscodeError> {
    let (img, format) = decode_image(data)?;
    Ok(ImageInfo {
        mime_type: format.to_mime_type().to_string(),
        width: img.width(),
        height: img.height(),
    })
}

/// 指定されたパラメータに従って画像を変換する
///
/// 縮小が必要な画像（または force 指定）は JPEG に正規化し、
/// 縮小不要ならフォーマットを維持する（許可リスト外は JPEG へ変換）。
/// フォーマットが変わる場合は切り抜きの前に白背景へ平坦化する。
/// 拡大は force 指定時のみ。メタデータは再エンコードで除去される。
pub fn transcode(data: &[u8], spec: &TranscodeSpec) -> Result<TranscodeResult, TranscodeError> {
    if spec.quality == 0 || spec.quality > 100 {
        return Err(TranscodeError::InvalidParams(format!(
            "quality must be 1-100, got {}",
            spec.quality
        )));
    }

    let (img, source_format) = decode_image(data)?;
    let (src_w, src_h) = (img.width(), img.height());

    let total_pixels = src_w as u64 * src_h as u64;
    if total_pixels > MAX_PIXELS {
        return Err(TranscodeError::TooLarge {
            width: src_w,
            height: src_h,
        });
    }

    let ratio = scale::scale_ratio(src_w, src_h, spec.max_width, spec.max_height, spec.crop);
    let source_output = OutputFormat::from_image_format(source_format);

    // リサイズしたら常に JPEG、しない場合は許可リスト内なら元のまま
    let (mut img, format) = if ratio < 1.0 || spec.force {
        let (dst_w, dst_h) = scale::scaled_dimensions(src_w, src_h, ratio);
        (resize::resize_image(&img, dst_w, dst_h)?, OutputFormat::Jpeg)
    } else {
        (img, source_output.unwrap_or(OutputFormat::Jpeg))
    };

    // 平坦化は切り抜きの前に行うこと
    if source_output != Some(format) {
        img = flatten::flatten_onto_white(img);
    }

    if spec.crop {
        img = crop::crop_center(&img, spec.max_width, spec.max_height);
    }

    let encoded = encode_image(&img, format, spec.quality)?;

    Ok(TranscodeResult {
        data: Bytes::from(encoded),
        mime_type: format.content_type().to_string(),
        width: img.width(),
        height: img.height(),
    })
}
