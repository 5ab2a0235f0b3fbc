use crate::constants::MAX_FILE_NAME_LEN;
use crate::errors::MediaError;

/// Content-Disposition 用にファイル名を無害化する
///
/// 制御文字 (U+0000..U+001F) を含む名前は改変せずに拒否する。
/// それ以外は最大長に切り詰め、パス区切り（/ と \ の両方）より
/// 前を落とし、引用符を除去して前後の空白を取り除く。
pub fn sanitize_file_name(name: &str) -> Result<String, MediaError> {
    if name.chars().any(|c| (c as u32) < 0x20) {
        return Err(MediaError::UnsafeFileName(name.to_string()));
    }

    let truncated: String = name.chars().take(MAX_FILE_NAME_LEN).collect();
    let base = truncated.rsplit('/').next().unwrap_or(&truncated);
    let base = base.rsplit('\\').next().unwrap_or(base);

    Ok(base.replace('"', "").trim().to_string())
}
