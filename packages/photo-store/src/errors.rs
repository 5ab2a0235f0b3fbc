use photo_core::{ContentHash, MediaError};
use thiserror::Error;

/// オブジェクトストアアクセスエラー
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("unexpected status: {status}")]
    Status { status: reqwest::StatusCode },

    #[error("put timed out after {secs}s")]
    Timeout { secs: u64 },

    #[error("signing failed: {0}")]
    Sign(String),

    #[error(transparent)]
    Media(#[from] MediaError),
}

/// マルチレッグアップロードのエラー
#[derive(Debug, Error)]
pub enum UploadError {
    #[error("upload job has no variants")]
    NoVariants,

    /// いずれかのレッグが失敗した場合、確定処理は実行されない。
    /// 先に成功したレッグのオブジェクトは削除されずストレージに残る
    /// （orphaned に記録される）。自動リトライや補償は行わない。
    #[error("upload leg {label:?} failed: {source}")]
    LegFailed {
        label: String,
        source: StoreError,
        orphaned: Vec<ContentHash>,
    },
}
