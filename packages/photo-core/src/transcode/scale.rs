/// 縮小倍率を計算する
///
/// crop の場合は対象領域を覆う倍率（cover: 大きい方）、それ以外は
/// 領域に収まる倍率（fit: 小さい方）を返す。1.0 以上なら縮小不要。
pub fn scale_ratio(src_w: u32, src_h: u32, max_w: u32, max_h: u32, crop: bool) -> f64 {
    let ratio_w = max_w as f64 / src_w as f64;
    let ratio_h = max_h as f64 / src_h as f64;

    if crop {
        ratio_w.max(ratio_h)
    } else {
        ratio_w.min(ratio_h)
    }
}

/// 倍率を適用して新しい寸法を計算する
///
/// 丸めは floor(x + 0.5)（0.5 は常に切り上げ。銀行丸めではない）。
pub fn scaled_dimensions(src_w: u32, src_h: u32, ratio: f64) -> (u32, u32) {
    let new_w = (ratio * src_w as f64 + 0.5).floor() as u32;
    let new_h = (ratio * src_h as f64 + 0.5).floor() as u32;

    // 最小1pxを保証
    (new_w.max(1), new_h.max(1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fit_ratio_uses_smaller_scale() {
        // 横長画像を正方形領域に収める
        let ratio = scale_ratio(1000, 500, 800, 800, false);
        assert_eq!(ratio, 0.8);

        // 縦長画像
        let ratio = scale_ratio(500, 1000, 800, 800, false);
        assert_eq!(ratio, 0.8);
    }

    #[test]
    fn test_cover_ratio_uses_larger_scale() {
        let ratio = scale_ratio(1000, 500, 300, 300, true);
        assert_eq!(ratio, 0.6); // 高さ基準

        let ratio = scale_ratio(500, 1000, 300, 300, true);
        assert_eq!(ratio, 0.6); // 幅基準
    }

    #[test]
    fn test_small_image_ratio_exceeds_one() {
        let ratio = scale_ratio(150, 150, 800, 800, false);
        assert!(ratio > 1.0);
    }

    #[test]
    fn test_scaled_dimensions_round_half_up() {
        let (w, h) = scaled_dimensions(1000, 500, 0.8);
        assert_eq!((w, h), (800, 400));

        // 0.5 ちょうどは切り上げ: 0.125 * 500 = 62.5 -> 63
        let (w, h) = scaled_dimensions(500, 500, 0.125);
        assert_eq!((w, h), (63, 63));

        // 0.5 未満は切り捨て: 0.333 * 100 = 33.3 -> 33
        let (w, _) = scaled_dimensions(100, 100, 0.333);
        assert_eq!(w, 33);
    }

    #[test]
    fn test_scaled_dimensions_minimum_one_pixel() {
        let (w, h) = scaled_dimensions(10, 10, 0.01);
        assert_eq!((w, h), (1, 1));
    }
}
