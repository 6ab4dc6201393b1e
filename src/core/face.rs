use crate::common::{FaceError, Result};
use crate::core::detector::FaceRegion;
use image::{ColorType, GrayImage, imageops::{self, FilterType}};
use image::codecs::jpeg::JpegEncoder;

/// Side length of the canvas every extracted face is resized to.
pub const FACE_SIZE: u32 = 100;

const JPEG_QUALITY: u8 = 95;

/// Crop `region` out of `gray` (clamped to the image) and resize it to `FACE_SIZE` square.
pub fn extract_face(gray: &GrayImage, region: &FaceRegion) -> Result<GrayImage> {
    let (img_w, img_h) = gray.dimensions();

    let x1 = region.x.clamp(0, img_w as i32) as u32;
    let y1 = region.y.clamp(0, img_h as i32) as u32;
    let x2 = (region.x as i64 + region.width as i64).clamp(0, img_w as i64) as u32;
    let y2 = (region.y as i64 + region.height as i64).clamp(0, img_h as i64) as u32;

    if x2 <= x1 || y2 <= y1 {
        return Err(FaceError::Other(anyhow::anyhow!(
            "Face region {:?} lies outside the {}x{} image", region, img_w, img_h
        )));
    }

    let crop = imageops::crop_imm(gray, x1, y1, x2 - x1, y2 - y1).to_image();
    Ok(imageops::resize(&crop, FACE_SIZE, FACE_SIZE, FilterType::Triangle))
}

pub fn encode_face(face: &GrayImage) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    JpegEncoder::new_with_quality(&mut buf, JPEG_QUALITY)
        .encode(face.as_raw(), face.width(), face.height(), ColorType::L8)?;
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Luma;

    fn gradient(width: u32, height: u32) -> GrayImage {
        GrayImage::from_fn(width, height, |x, y| Luma([((x + y) % 256) as u8]))
    }

    #[test]
    fn extracted_face_is_fixed_size() {
        let gray = gradient(320, 240);
        let face = extract_face(&gray, &FaceRegion::new(40, 30, 64, 80)).unwrap();
        assert_eq!(face.dimensions(), (FACE_SIZE, FACE_SIZE));
    }

    #[test]
    fn region_crossing_the_edge_is_clamped() {
        let gray = gradient(120, 90);
        let face = extract_face(&gray, &FaceRegion::new(-10, 60, 50, 50)).unwrap();
        assert_eq!(face.dimensions(), (FACE_SIZE, FACE_SIZE));
    }

    #[test]
    fn region_outside_image_is_rejected() {
        let gray = gradient(50, 50);
        assert!(extract_face(&gray, &FaceRegion::new(60, 60, 20, 20)).is_err());
        assert!(extract_face(&gray, &FaceRegion::new(-40, 0, 30, 30)).is_err());
    }

    #[test]
    fn encoding_produces_a_jpeg() {
        let face = extract_face(&gradient(200, 200), &FaceRegion::new(0, 0, 200, 200)).unwrap();
        let bytes = encode_face(&face).unwrap();
        assert!(bytes.len() > 2);
        assert_eq!(&bytes[..2], &[0xFF, 0xD8]);
    }
}
