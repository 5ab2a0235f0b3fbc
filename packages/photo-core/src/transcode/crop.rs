use image::DynamicImage;

/// 中央を基準に max_w × max_h で切り抜く
///
/// オフセットは (現在値 - 目標値) / 2 の整数切り捨て。画像が目標より
/// 小さい次元は画像側の寸法に丸める。
pub fn crop_center(img: &DynamicImage, max_w: u32, max_h: u32) -> DynamicImage {
    let (width, height) = (img.width(), img.height());
    let crop_w = max_w.min(width);
    let crop_h = max_h.min(height);
    let x = (width - crop_w) / 2;
    let y = (height - crop_h) / 2;

    img.crop_imm(x, y, crop_w, crop_h)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_crop_to_exact_dimensions() {
        let img = DynamicImage::new_rgb8(800, 400);
        let cropped = crop_center(&img, 300, 300);
        assert_eq!(cropped.width(), 300);
        assert_eq!(cropped.height(), 300);
    }

    #[test]
    fn test_crop_offsets_truncate() {
        // (801 - 300) / 2 = 250（切り捨て）でも寸法は正確に 300
        let img = DynamicImage::new_rgb8(801, 401);
        let cropped = crop_center(&img, 300, 300);
        assert_eq!(cropped.width(), 300);
        assert_eq!(cropped.height(), 300);
    }

    #[test]
    fn test_crop_larger_than_image_clamps() {
        let img = DynamicImage::new_rgb8(100, 50);
        let cropped = crop_center(&img, 300, 300);
        assert_eq!(cropped.width(), 100);
        assert_eq!(cropped.height(), 50);
    }
}
