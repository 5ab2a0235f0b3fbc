use crate::errors::StoreError;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use hmac::{Hmac, Mac};
use sha1::Sha1;
use std::collections::BTreeMap;

type HmacSha1 = Hmac<Sha1>;

/// 署名対象に含めるメタデータヘッダのプレフィックス
pub const AMZ_HEADER_PREFIX: &str = "x-amz-";

/// 値のみを署名対象文字列に載せる固定ヘッダ（欠落時は空文字列）
const SPECIAL_HEADERS: [&str; 3] = ["content-md5", "content-type", "date"];

/// キーを URL エンコードする（空白は + に変換）
pub fn quote_plus(key: &str) -> String {
    urlencoding::encode(key).replace("%20", "+")
}

/// リモート側の検証器と1バイトも違わない正規化文字列を構築する
///
/// METHOD 行、名前を小文字化してソートしたヘッダ行（x-amz-* は
/// name:value、固定3ヘッダは value のみ）、最後に /bucket/key。
fn string_to_sign(
    method: &str,
    bucket: &str,
    key: &str,
    headers: &BTreeMap<String, String>,
) -> String {
    let mut signed: BTreeMap<String, String> = SPECIAL_HEADERS
        .iter()
        .map(|name| (name.to_string(), String::new()))
        .collect();
    for (name, value) in headers {
        let lower = name.to_ascii_lowercase();
        if lower.starts_with(AMZ_HEADER_PREFIX) || SPECIAL_HEADERS.contains(&lower.as_str()) {
            signed.insert(lower, value.clone());
        }
    }

    // BTreeMap なので名前の辞書順で並ぶ
    let mut buffer = format!("{method}\n");
    for (name, value) in &signed {
        if name.starts_with(AMZ_HEADER_PREFIX) {
            buffer.push_str(name);
            buffer.push(':');
            buffer.push_str(value);
        } else {
            buffer.push_str(value);
        }
        buffer.push('\n');
    }
    buffer.push('/');
    buffer.push_str(bucket);
    buffer.push('/');
    buffer.push_str(&quote_plus(key));
    buffer
}

/// Authorization ヘッダの値を構築する
pub fn authorization(
    access_key_id: &str,
    secret_access_key: &str,
    method: &str,
    bucket: &str,
    key: &str,
    headers: &BTreeMap<String, String>,
) -> Result<String, StoreError> {
    let mut mac = HmacSha1::new_from_slice(secret_access_key.as_bytes())
        .map_err(|e| StoreError::Sign(e.to_string()))?;
    mac.update(string_to_sign(method, bucket, key, headers).as_bytes());
    let signature = BASE64.encode(mac.finalize().into_bytes());

    Ok(format!("AWS {access_key_id}:{}", signature.trim_end()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_string_to_sign_layout() {
        let headers = headers(&[
            ("Content-Type", "image/jpeg"),
            ("Date", "Tue, 27 Mar 2007 21:15:45 +0000"),
            ("x-amz-acl", "public-read"),
        ]);
        let buffer = string_to_sign("PUT", "recipes", "abc def", &headers);

        // content-md5 は欠落しているので空行になる
        assert_eq!(
            buffer,
            "PUT\n\nimage/jpeg\nTue, 27 Mar 2007 21:15:45 +0000\nx-amz-acl:public-read\n/recipes/abc+def"
        );
    }

    #[test]
    fn test_header_names_are_lowercased_and_sorted() {
        let a = string_to_sign(
            "PUT",
            "b",
            "k",
            &headers(&[("X-Amz-Meta-B", "2"), ("x-amz-meta-a", "1")]),
        );
        assert!(a.contains("x-amz-meta-a:1\nx-amz-meta-b:2\n"));
    }

    #[test]
    fn test_authorization_is_deterministic() {
        let h = headers(&[("Date", "Tue, 27 Mar 2007 21:15:45 +0000")]);
        let a = authorization("AKID", "secret", "PUT", "bucket", "key", &h).unwrap();
        let b = authorization("AKID", "secret", "PUT", "bucket", "key", &h).unwrap();
        assert_eq!(a, b);
        assert!(a.starts_with("AWS AKID:"));
    }

    #[test]
    fn test_amz_header_changes_signature() {
        let date = ("Date", "Tue, 27 Mar 2007 21:15:45 +0000");
        let a = authorization(
            "AKID",
            "secret",
            "PUT",
            "bucket",
            "key",
            &headers(&[date, ("x-amz-acl", "public-read")]),
        )
        .unwrap();
        let b = authorization(
            "AKID",
            "secret",
            "PUT",
            "bucket",
            "key",
            &headers(&[date, ("x-amz-acl", "private")]),
        )
        .unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_unrelated_header_does_not_change_signature() {
        let date = ("Date", "Tue, 27 Mar 2007 21:15:45 +0000");
        let a = authorization(
            "AKID",
            "secret",
            "PUT",
            "bucket",
            "key",
            &headers(&[date, ("Cache-Control", "public")]),
        )
        .unwrap();
        let b = authorization(
            "AKID",
            "secret",
            "PUT",
            "bucket",
            "key",
            &headers(&[date, ("Cache-Control", "no-store")]),
        )
        .unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_secret_changes_signature() {
        let h = headers(&[("Date", "D")]);
        let a = authorization("AKID", "secret1", "PUT", "bucket", "key", &h).unwrap();
        let b = authorization("AKID", "secret2", "PUT", "bucket", "key", &h).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_quote_plus() {
        assert_eq!(quote_plus("abc def"), "abc+def");
        assert_eq!(quote_plus("a/b"), "a%2Fb");
        assert_eq!(quote_plus("0123abcdef"), "0123abcdef");
    }
}
