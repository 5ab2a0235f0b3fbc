use crate::client::S3Client;
use crate::errors::{StoreError, UploadError};
use async_trait::async_trait;
use bytes::Bytes;
use photo_core::{ContentHash, TranscodeResult};
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

/// レッグごとの既定の締め切り。超過はレッグ失敗として扱う
const DEFAULT_LEG_TIMEOUT: Duration = Duration::from_secs(30);

/// コンテンツアドレスで PUT できるストアの抽象
#[async_trait]
pub trait CdnStore: Send + Sync {
    async fn put_cdn_content(
        &self,
        data: Bytes,
        mime_type: Option<&str>,
        file_name: Option<&str>,
    ) -> Result<ContentHash, StoreError>;
}

#[async_trait]
impl CdnStore for S3Client {
    async fn put_cdn_content(
        &self,
        data: Bytes,
        mime_type: Option<&str>,
        file_name: Option<&str>,
    ) -> Result<ContentHash, StoreError> {
        S3Client::put_cdn_content(self, data, mime_type, file_name).await
    }
}

/// 全レッグ成功時に一度だけ呼ばれる確定処理（データ層への引き渡し）
#[async_trait]
pub trait Finalizer<T>: Send + Sync {
    async fn finalize(&self, target: T, variants: Vec<UploadedVariant>);
}

/// アップロードが完了したバリアント
#[derive(Debug, Clone)]
pub struct UploadedVariant {
    pub label: String,
    pub hash: ContentHash,
    pub mime_type: String,
    pub width: u32,
    pub height: u32,
}

/// ジョブの状態遷移: Pending → Uploading → Complete | Failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum JobState {
    Pending,
    Uploading,
    Complete,
    Failed,
}

/// 1バリアント分の状態。所有者はジョブのみで、更新するのは
/// 対応するレッグの完了通知だけ
struct VariantSlot {
    image: TranscodeResult,
    uploaded: bool,
    hash: Option<ContentHash>,
}

/// 1枚の論理画像に対するマルチバリアントアップロード
///
/// target は確定処理へそのまま渡す不透明な参照（レシピ等）。
pub struct UploadJob<T> {
    target: T,
    variants: BTreeMap<String, VariantSlot>,
    state: JobState,
}

impl<T> UploadJob<T> {
    pub fn new(target: T) -> Self {
        Self {
            target,
            variants: BTreeMap::new(),
            state: JobState::Pending,
        }
    }

    /// バリアントを追加する（例: "thumb", "full"）
    pub fn add_variant(&mut self, label: impl Into<String>, image: TranscodeResult) {
        self.variants.insert(
            label.into(),
            VariantSlot {
                image,
                uploaded: false,
                hash: None,
            },
        );
    }

    pub fn variant_count(&self) -> usize {
        self.variants.len()
    }
}

/// マルチレッグアップロードの調整役
///
/// 全レッグを同時に開始し（レッグ間の順序は仮定しない）、完了を
/// 到着順に join する。確定処理は最後のバリアントが uploaded に
/// 遷移した瞬間に一度だけ実行される。
pub struct UploadCoordinator<S> {
    store: Arc<S>,
    leg_timeout: Duration,
}

impl<S> UploadCoordinator<S>
where
    S: CdnStore + 'static,
{
    pub fn new(store: Arc<S>) -> Self {
        Self {
            store,
            leg_timeout: DEFAULT_LEG_TIMEOUT,
        }
    }

    pub fn with_leg_timeout(mut self, leg_timeout: Duration) -> Self {
        self.leg_timeout = leg_timeout;
        self
    }

    /// ジョブを実行し、成功時は全バリアントの結果を返す
    ///
    /// いずれかのレッグが失敗するとジョブは終了状態になり、確定処理は
    /// 実行されない。成功済みレッグのオブジェクトはロールバックしない
    /// （orphaned としてエラーに記録される）。レッグ単位のリトライも
    /// 行わない。呼び出し側はジョブ全体をやり直すこと。
    pub async fn run<T, F>(
        &self,
        mut job: UploadJob<T>,
        finalizer: &F,
    ) -> Result<Vec<UploadedVariant>, UploadError>
    where
        T: Send,
        F: Finalizer<T> + ?Sized,
    {
        if job.variants.is_empty() {
            return Err(UploadError::NoVariants);
        }

        job.state = JobState::Uploading;
        let (tx, mut rx) = mpsc::channel(job.variants.len());

        for (label, slot) in &job.variants {
            let store = Arc::clone(&self.store);
            let data = slot.image.data.clone();
            let mime_type = slot.image.mime_type.clone();
            let label = label.clone();
            let leg_timeout = self.leg_timeout;
            let tx = tx.clone();

            tokio::spawn(async move {
                let put = store.put_cdn_content(data, Some(&mime_type), None);
                let result = match tokio::time::timeout(leg_timeout, put).await {
                    Ok(result) => result,
                    Err(_) => Err(StoreError::Timeout {
                        secs: leg_timeout.as_secs(),
                    }),
                };
                // ジョブが先に失敗して受信側が閉じても無視してよい
                let _ = tx.send((label, result)).await;
            });
        }
        drop(tx);

        // 受信は単一消費者なので完了処理は直列化される。target の
        // take が二重確定に対する最終ガード
        let mut target = Some(job.target);
        let mut first_failure: Option<(String, StoreError)> = None;

        while let Some((label, result)) = rx.recv().await {
            match result {
                Ok(hash) => {
                    if let Some(slot) = job.variants.get_mut(&label) {
                        slot.uploaded = true;
                        slot.hash = Some(hash);
                    }
                    let all_uploaded = job.variants.values().all(|slot| slot.uploaded);
                    if job.state == JobState::Uploading && all_uploaded {
                        job.state = JobState::Complete;
                        if let Some(target) = target.take() {
                            let variants = collect_variants(&job.variants);
                            finalizer.finalize(target, variants).await;
                        }
                    }
                }
                Err(err) => {
                    tracing::error!(label = %label, error = %err, "upload leg failed");
                    job.state = JobState::Failed;
                    if first_failure.is_none() {
                        first_failure = Some((label, err));
                    }
                }
            }
        }

        match first_failure {
            None => Ok(collect_variants(&job.variants)),
            Some((label, source)) => {
                let orphaned: Vec<ContentHash> = job
                    .variants
                    .values()
                    .filter_map(|slot| slot.hash.clone())
                    .collect();
                if !orphaned.is_empty() {
                    tracing::warn!(
                        label = %label,
                        orphan_count = orphaned.len(),
                        "sibling variants were already stored and will not be rolled back"
                    );
                }
                Err(UploadError::LegFailed {
                    label,
                    source,
                    orphaned,
                })
            }
        }
    }
}

fn collect_variants(variants: &BTreeMap<String, VariantSlot>) -> Vec<UploadedVariant> {
    variants
        .iter()
        .filter_map(|(label, slot)| {
            slot.hash.as_ref().map(|hash| UploadedVariant {
                label: label.clone(),
                hash: hash.clone(),
                mime_type: slot.image.mime_type.clone(),
                width: slot.image.width,
                height: slot.image.height,
            })
        })
        .collect()
}
