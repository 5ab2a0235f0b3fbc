use sha1::{Digest, Sha1};
use std::fmt;

/// コンテンツアドレス（SHA-1 の 16 進数 40 文字）
///
/// (MIME タイプ, バイト列) から決定的に導出され、ストレージの
/// オブジェクトキーと CDN パスの両方に使う。内容が同じなら必ず
/// 同じキーになるため、再アップロードは同一バイトの上書きで冪等。
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContentHash(String);

impl ContentHash {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// (MIME タイプ, データ) のコンテンツハッシュを計算する
///
/// Content-Type ヘッダはブラウザの描画に影響するため、MIME タイプも
/// ハッシュ入力に含める。区切りは "|" 1 バイト。
pub fn content_hash(mime_type: &str, data: &[u8]) -> ContentHash {
    let mut hasher = Sha1::new();
    hasher.update(mime_type.as_bytes());
    hasher.update(b"|");
    hasher.update(data);
    ContentHash(hex::encode(hasher.finalize()))
}
