use image::{Rgba, RgbaImage};
use lpc_atlas_core::prelude::*;
use rand::Rng;

fn disjoint(rects: &[Rect]) -> bool {
    for i in 0..rects.len() {
        for j in (i + 1)..rects.len() {
            if rects[i].overlaps(&rects[j]) {
                return false;
            }
        }
    }
    true
}

fn blank_frames(n: usize, w: u32, h: u32) -> Vec<RgbaImage> {
    (0..n).map(|_| RgbaImage::new(w, h)).collect()
}

#[test]
fn random_grids_never_overlap_and_fit_exactly() {
    let mut rng = rand::thread_rng();
    for _ in 0..50 {
        let n = rng.gen_range(0..60usize);
        let columns = rng.gen_range(1..=12u32);
        let w = rng.gen_range(1..=9u32);
        let h = rng.gen_range(1..=9u32);
        let frames = blank_frames(n, w, h);
        let (atlas, rects) = pack(&frames, w, h, columns);

        assert_eq!(rects.len(), n);
        assert!(disjoint(&rects), "overlap for n={n} columns={columns}");
        assert_eq!(atlas.width(), columns * w);
        assert_eq!(atlas.height(), (n as u32).div_ceil(columns) * h);
        for r in &rects {
            assert_eq!((r.w, r.h), (w, h));
            assert!(r.x2() <= atlas.width() && r.y2() <= atlas.height());
        }
    }
}

#[test]
fn cells_are_row_major() {
    let frames = blank_frames(7, 3, 2);
    let (_, rects) = pack(&frames, 3, 2, 3);
    let origins: Vec<(u32, u32)> = rects.iter().map(|r| (r.x, r.y)).collect();
    assert_eq!(
        origins,
        vec![(0, 0), (3, 0), (6, 0), (0, 2), (3, 2), (6, 2), (0, 4)]
    );
}

#[test]
fn unused_cells_stay_transparent() {
    let frames: Vec<RgbaImage> = (0..3)
        .map(|_| RgbaImage::from_pixel(2, 2, Rgba([200, 100, 50, 255])))
        .collect();
    let (atlas, _) = pack(&frames, 2, 2, 2);
    assert_eq!(atlas.dimensions(), (4, 4));
    for y in 2..4 {
        for x in 2..4 {
            assert_eq!(*atlas.get_pixel(x, y), Rgba([0, 0, 0, 0]));
        }
    }
}

#[test]
fn semi_transparent_pixels_are_copied_not_blended() {
    let frames = vec![RgbaImage::from_pixel(2, 2, Rgba([10, 20, 30, 40]))];
    let (atlas, _) = pack(&frames, 2, 2, 1);
    assert_eq!(*atlas.get_pixel(1, 1), Rgba([10, 20, 30, 40]));
}

#[test]
fn empty_input_gives_zero_height_atlas() {
    let frames: Vec<RgbaImage> = Vec::new();
    let (atlas, rects) = pack(&frames, 16, 16, 10);
    assert_eq!(atlas.dimensions(), (160, 0));
    assert!(rects.is_empty());

    let packed = pack_named(&[], 16, 16, 10);
    assert!(packed.placements.is_empty());
    assert_eq!(packed.layout.rows, 0);
}

#[test]
fn layout_cell_rects_match_packer() {
    let layout = AtlasLayout::for_count(23, 5, 7, 6);
    assert_eq!(layout.rows, 4);
    assert_eq!(layout.capacity(), 24);
    assert_eq!((layout.width(), layout.height()), (30, 28));
    let frames = blank_frames(23, 5, 7);
    let (_, rects) = pack(&frames, 5, 7, 6);
    for (i, r) in rects.iter().enumerate() {
        assert_eq!(*r, layout.cell_rect(i));
    }
}
