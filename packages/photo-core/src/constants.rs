/// 画像の最大ピクセル数（1GP = 実質無制限、極端な攻撃のみ防止）
pub const MAX_PIXELS: u64 = 1_000_000_000;

/// デフォルトJPEG品質（1-100）
pub const DEFAULT_QUALITY: u8 = 85;

/// Content-Disposition に使うファイル名の最大長（文字数）
pub const MAX_FILE_NAME_LEN: usize = 4000;
