use image::RgbaImage;

/// Copy the `sw x sh` sub-rectangle of `src` at (sx, sy) into `canvas` at (dx, dy).
///
/// Pixels that fall outside `src` are skipped (the canvas keeps whatever it had,
/// transparent for a fresh canvas); pixels that fall outside `canvas` are dropped.
/// Source alpha replaces destination alpha; nothing is blended.
#[allow(clippy::too_many_arguments)]
pub fn blit_rgba(
    src: &RgbaImage,
    canvas: &mut RgbaImage,
    dx: u32,
    dy: u32,
    sx: u32,
    sy: u32,
    sw: u32,
    sh: u32,
) {
    let (src_w, src_h) = src.dimensions();
    let (cw, ch) = canvas.dimensions();
    for yy in 0..sh {
        let (Some(iy), Some(oy)) = (sy.checked_add(yy), dy.checked_add(yy)) else {
            break;
        };
        if iy >= src_h || oy >= ch {
            break;
        }
        for xx in 0..sw {
            let (Some(ix), Some(ox)) = (sx.checked_add(xx), dx.checked_add(xx)) else {
                break;
            };
            if ix >= src_w || ox >= cw {
                break;
            }
            canvas.put_pixel(ox, oy, *src.get_pixel(ix, iy));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn blit_past_source_edge_leaves_canvas_untouched() {
        let src = RgbaImage::from_pixel(4, 4, Rgba([9, 9, 9, 255]));
        let mut canvas = RgbaImage::new(4, 4);
        blit_rgba(&src, &mut canvas, 0, 0, 2, 2, 4, 4);
        assert_eq!(*canvas.get_pixel(0, 0), Rgba([9, 9, 9, 255]));
        assert_eq!(*canvas.get_pixel(1, 1), Rgba([9, 9, 9, 255]));
        assert_eq!(*canvas.get_pixel(2, 0), Rgba([0, 0, 0, 0]));
        assert_eq!(*canvas.get_pixel(0, 2), Rgba([0, 0, 0, 0]));
    }

    #[test]
    fn blit_clips_to_canvas() {
        let src = RgbaImage::from_pixel(8, 8, Rgba([1, 2, 3, 4]));
        let mut canvas = RgbaImage::new(3, 3);
        blit_rgba(&src, &mut canvas, 2, 2, 0, 0, 8, 8);
        assert_eq!(*canvas.get_pixel(2, 2), Rgba([1, 2, 3, 4]));
        assert_eq!(*canvas.get_pixel(1, 1), Rgba([0, 0, 0, 0]));
    }
}
