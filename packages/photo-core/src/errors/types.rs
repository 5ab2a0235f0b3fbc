use thiserror::Error;

/// メディア処理の統合エラー型
#[derive(Debug, Error)]
pub enum MediaError {
    /// 制御文字を含むファイル名は改変せずに拒否する
    #[error("unsafe file name: {0:?}")]
    UnsafeFileName(String),

    #[error("transcode error: {0}")]
    Transcode(#[from] TranscodeError),
}

/// 画像変換エラー
#[derive(Debug, Error)]
pub enum TranscodeError {
    #[error("invalid parameters: {0}")]
    InvalidParams(String),

    /// excerpt は入力先頭 32 バイトの 16 進ダンプ（全体は載せない）
    #[error("unsupported image data (starts with {excerpt}...)")]
    Decode { excerpt: String },

    #[error("image resolution exceeds maximum ({width}x{height})")]
    TooLarge { width: u32, height: u32 },

    #[error("processing failed: {0}")]
    ProcessingFailed(String),
}
