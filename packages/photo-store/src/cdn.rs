use photo_core::ContentHash;

/// CDN の公開 URL を組み立てる
///
/// キーはコンテンツハッシュそのものなので、ホスト名との連結だけでよい。
pub fn cdn_url(host: &str, hash: &ContentHash) -> String {
    format!("https://{}/{hash}", host.trim_end_matches('/'))
}
