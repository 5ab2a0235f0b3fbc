use crate::errors::TranscodeError;
use image::{DynamicImage, ImageFormat, ImageReader};
use std::io::Cursor;

/// エラー診断用に先頭バイトの 16 進ダンプを作る（全体は載せない）
fn hex_excerpt(data: &[u8]) -> String {
    hex::encode(&data[..data.len().min(32)])
}

/// 画像バイト列をデコードし、DynamicImage と元フォーマットを返す
///
/// フォーマットはマジックナンバーから推測する。デコードできない
/// 入力は Decode エラー（先頭 32 バイトの抜粋つき）になる。
pub fn decode_image(data: &[u8]) -> Result<(DynamicImage, ImageFormat), TranscodeError> {
    let reader = ImageReader::new(Cursor::new(data))
        .with_guessed_format()
        .map_err(|_| TranscodeError::Decode {
            excerpt: hex_excerpt(data),
        })?;

    let Some(format) = reader.format() else {
        return Err(TranscodeError::Decode {
            excerpt: hex_excerpt(data),
        });
    };

    let img = reader.decode().map_err(|_| TranscodeError::Decode {
        excerpt: hex_excerpt(data),
    })?;

    Ok((img, format))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_png() {
        let img = DynamicImage::new_rgb8(4, 6);
        let mut buf = Cursor::new(Vec::new());
        img.write_to(&mut buf, ImageFormat::Png).unwrap();

        let (decoded, format) = decode_image(buf.get_ref()).unwrap();
        assert_eq!(format, ImageFormat::Png);
        assert_eq!(decoded.width(), 4);
        assert_eq!(decoded.height(), 6);
    }

    #[test]
    fn test_decode_garbage_fails_with_excerpt() {
        let result = decode_image(b"this is not an image at all");
        match result {
            Err(TranscodeError::Decode { excerpt }) => {
                // "this" の 16 進数
                assert!(excerpt.starts_with("74686973"));
            }
            other => panic!("expected Decode error, got {other:?}"),
        }
    }

    #[test]
    fn test_decode_empty_input() {
        let result = decode_image(b"");
        assert!(matches!(result, Err(TranscodeError::Decode { .. })));
    }
}
