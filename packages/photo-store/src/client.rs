use crate::errors::StoreError;
use crate::sign;
use bytes::Bytes;
use chrono::Utc;
use photo_core::{ContentHash, content_hash, sanitize_file_name};
use std::collections::BTreeMap;

/// CDN 配信オブジェクトのキャッシュ期間（約10年）
///
/// キーが内容から導出されるため中身が変わることはなく、事実上の
/// 無期限キャッシュが正しい挙動になる。
const CDN_TTL_SECS: u64 = 86400 * 365 * 10;

/// リクエストヘッダの集合。署名の正規化で名前順に走査する
pub type Headers = BTreeMap<String, String>;

/// オブジェクトストアの認証情報
#[derive(Debug, Clone)]
pub struct Credentials {
    pub access_key_id: String,
    pub secret_access_key: String,
}

/// S3 互換オブジェクトストアのクライアント
///
/// 明示的に構築して参照で渡す。グローバルなインスタンスは持たない。
#[derive(Clone)]
pub struct S3Client {
    client: reqwest::Client,
    bucket: String,
    endpoint: String,
    credentials: Option<Credentials>,
}

impl S3Client {
    /// 新しい S3Client を作成する
    ///
    /// credentials が None の場合、Authorization ヘッダを付けずに
    /// PUT する（匿名書き込みを受けるバケット向けの運用モード）。
    pub fn new(bucket: impl Into<String>, credentials: Option<Credentials>) -> Self {
        let bucket = bucket.into();
        let endpoint = format!("https://{bucket}.s3.amazonaws.com");
        Self {
            client: reqwest::Client::new(),
            bucket,
            endpoint,
            credentials,
        }
    }

    /// エンドポイントを差し替える（テストやS3互換ストア向け）
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into().trim_end_matches('/').to_string();
        self
    }

    /// 環境変数から S3Client を作成する
    ///
    /// 必須の環境変数:
    /// - AWS_S3_BUCKET
    ///
    /// AWS_ACCESS_KEY_ID が未設定の場合は非認証モードになる。
    pub fn from_env() -> Result<Self, String> {
        let bucket =
            std::env::var("AWS_S3_BUCKET").map_err(|_| "AWS_S3_BUCKET is not set".to_string())?;
        let credentials = match std::env::var("AWS_ACCESS_KEY_ID") {
            Ok(access_key_id) => {
                let secret_access_key = std::env::var("AWS_SECRET_ACCESS_KEY")
                    .map_err(|_| "AWS_SECRET_ACCESS_KEY is not set".to_string())?;
                Some(Credentials {
                    access_key_id,
                    secret_access_key,
                })
            }
            Err(_) => None,
        };

        Ok(Self::new(bucket, credentials))
    }

    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    /// オブジェクトを PUT する
    ///
    /// Date ヘッダが無ければ現在時刻を補い、認証情報があれば署名する。
    /// 2xx 以外のステータスと転送エラーは区別せず StoreError で返す。
    pub async fn put_object(
        &self,
        key: &str,
        body: Bytes,
        mut headers: Headers,
    ) -> Result<(), StoreError> {
        headers
            .entry("Date".to_string())
            .or_insert_with(|| Utc::now().to_rfc2822());

        let url = format!("{}/{}", self.endpoint, sign::quote_plus(key));
        let mut request = self.client.put(&url);

        if let Some(credentials) = &self.credentials {
            let auth = sign::authorization(
                &credentials.access_key_id,
                &credentials.secret_access_key,
                "PUT",
                &self.bucket,
                key,
                &headers,
            )?;
            request = request.header("Authorization", auth);
        }
        for (name, value) in &headers {
            request = request.header(name.as_str(), value);
        }

        let response = request.body(body).send().await?;
        let status = response.status();
        if !status.is_success() {
            tracing::error!(key = %key, status = %status, "object store rejected PUT");
            return Err(StoreError::Status { status });
        }

        tracing::info!(key = %key, "object stored");
        Ok(())
    }

    /// CDN 配信向けにコンテンツアドレスで PUT する
    ///
    /// オブジェクト名は (MIME タイプ, 内容) のハッシュ。同一内容は
    /// CDN 上で常に一意になるため、期限をほぼ無限に設定し、公開 ACL
    /// を付与する。file_name があれば無害化して Content-Disposition
    /// に載せる（ダウンロード時のファイル名が読みやすくなる）。
    /// 成功時は使用したハッシュを返す。
    pub async fn put_cdn_content(
        &self,
        data: Bytes,
        mime_type: Option<&str>,
        file_name: Option<&str>,
    ) -> Result<ContentHash, StoreError> {
        let mime_type = mime_type
            .map(str::to_string)
            .or_else(|| file_name.and_then(mime_from_file_name))
            .unwrap_or_else(|| "application/unknown".to_string());

        // ネットワークに触れる前にファイル名を検証する
        let disposition = match file_name {
            Some(name) => {
                let safe = sanitize_file_name(name).map_err(StoreError::Media)?;
                (!safe.is_empty()).then(|| format!("inline; filename=\"{safe}\""))
            }
            None => None,
        };

        let hash = content_hash(&mime_type, &data);

        let mut headers = Headers::new();
        headers.insert("Content-Type".to_string(), mime_type);
        headers.insert(
            "Expires".to_string(),
            (Utc::now() + chrono::Duration::seconds(CDN_TTL_SECS as i64)).to_rfc2822(),
        );
        headers.insert(
            "Cache-Control".to_string(),
            format!("public, max-age={CDN_TTL_SECS}"),
        );
        headers.insert("Vary".to_string(), "Accept-Encoding".to_string());
        headers.insert("x-amz-acl".to_string(), "public-read".to_string());
        if let Some(disposition) = disposition {
            headers.insert("Content-Disposition".to_string(), disposition);
        }

        if let Err(err) = self.put_object(hash.as_str(), data, headers).await {
            tracing::error!(hash = %hash, error = %err, "CDN content upload failed");
            return Err(err);
        }

        Ok(hash)
    }
}

/// 拡張子から画像系 MIME タイプを推測する
fn mime_from_file_name(file_name: &str) -> Option<String> {
    let extension = file_name.rsplit('.').next()?.to_ascii_lowercase();
    let mime = match extension.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "bmp" => "image/bmp",
        "webp" => "image/webp",
        _ => return None,
    };
    Some(mime.to_string())
}
