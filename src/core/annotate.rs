use crate::core::detector::FaceRegion;
use image::{DynamicImage, Rgb, RgbImage};
use imageproc::drawing::draw_hollow_rect_mut;
use imageproc::rect::Rect;

const BOX_COLOR: Rgb<u8> = Rgb([0, 255, 0]);

/// Copy of `image` with every face region outlined.
pub fn draw_regions(image: &DynamicImage, regions: &[FaceRegion]) -> RgbImage {
    let mut img = image.to_rgb8();

    for region in regions {
        if region.width == 0 || region.height == 0 {
            continue;
        }
        let rect = Rect::at(region.x, region.y).of_size(region.width, region.height);
        draw_hollow_rect_mut(&mut img, rect, BOX_COLOR);

        // Second pass for a 2px border
        if region.width > 2 && region.height > 2 {
            let inner = Rect::at(region.x + 1, region.y + 1)
                .of_size(region.width - 2, region.height - 2);
            draw_hollow_rect_mut(&mut img, inner, BOX_COLOR);
        }
    }

    img
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::GrayImage;

    #[test]
    fn outlines_region_edges_only() {
        let image = DynamicImage::ImageLuma8(GrayImage::new(64, 64));
        let out = draw_regions(&image, &[FaceRegion::new(10, 10, 20, 20)]);

        assert_eq!(out.dimensions(), (64, 64));
        assert_eq!(*out.get_pixel(10, 10), BOX_COLOR);
        assert_eq!(*out.get_pixel(11, 15), BOX_COLOR);
        assert_eq!(*out.get_pixel(20, 20), Rgb([0, 0, 0]));
    }

    #[test]
    fn regions_past_the_border_do_not_panic() {
        let image = DynamicImage::ImageLuma8(GrayImage::new(32, 32));
        let out = draw_regions(&image, &[FaceRegion::new(-5, 20, 50, 50), FaceRegion::new(0, 0, 0, 4)]);
        assert_eq!(out.dimensions(), (32, 32));
    }
}
