use image::{DynamicImage, Rgb, RgbImage};

/// 透過画像を不透明な白背景に合成する
///
/// 可逆フォーマットから JPEG へ変換する際、透過部分が黒く潰れない
/// ようにする。切り抜きより前に呼ぶこと。
pub fn flatten_onto_white(img: DynamicImage) -> DynamicImage {
    if !img.color().has_alpha() {
        return img;
    }

    let rgba = img.to_rgba8();
    let (width, height) = (rgba.width(), rgba.height());
    let mut out = RgbImage::new(width, height);

    for (x, y, pixel) in rgba.enumerate_pixels() {
        let alpha = pixel[3] as u32;
        // out = src * a + white * (1 - a)
        let blend = |c: u8| ((c as u32 * alpha + 255 * (255 - alpha)) / 255) as u8;
        out.put_pixel(x, y, Rgb([blend(pixel[0]), blend(pixel[1]), blend(pixel[2])]));
    }

    DynamicImage::ImageRgb8(out)
}
