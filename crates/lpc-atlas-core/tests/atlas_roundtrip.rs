use image::{DynamicImage, Rgba, RgbaImage};
use lpc_atlas_core::prelude::*;
use std::collections::HashMap;

const F: u32 = 8;

/// Every pixel unique enough that a misplaced frame is caught.
fn noisy_sheet(cols: u32, rows: u32) -> RgbaImage {
    RgbaImage::from_fn(cols * F, rows * F, |x, y| {
        Rgba([
            (x % 251) as u8,
            (y % 251) as u8,
            ((x * 7 + y * 13) % 256) as u8,
            ((x + y) % 256) as u8,
        ])
    })
}

fn crop(img: &RgbaImage, r: &Rect) -> RgbaImage {
    image::imageops::crop_imm(img, r.x, r.y, r.w, r.h).to_image()
}

#[test]
fn manifest_rects_point_at_the_extracted_pixels() {
    let sheet = noisy_sheet(13, 21);
    let cfg = SheetConfig::builder()
        .id("hero")
        .with_frame_size(F, F)
        .build();

    let frames = extract_named_frames(&sheet, &cfg);
    let by_name: HashMap<String, RgbaImage> = frames
        .iter()
        .map(|f| (f.name.clone(), f.image.clone()))
        .collect();

    let out = build_atlas(&DynamicImage::ImageRgba8(sheet), &cfg, "atlas.png").expect("build");
    assert_eq!(out.manifest.frames.len(), frames.len());
    for entry in &out.manifest.frames {
        let expected = by_name.get(&entry.name).expect("known name");
        assert_eq!(&crop(&out.rgba, &entry.frame), expected, "pixels differ for {}", entry.name);
    }
}

#[test]
fn hero_scenario_forty_frames_on_ten_columns() {
    let sheet = noisy_sheet(13, 21);
    let cfg = SheetConfig::builder()
        .id("hero")
        .with_frame_size(F, F)
        .atlas_columns(10)
        .build();
    let out = build_atlas(&DynamicImage::ImageRgba8(sheet), &cfg, "atlas.png").expect("build");

    assert_eq!(out.rgba.dimensions(), (10 * F, 4 * F));
    assert_eq!(out.layout.columns, 10);
    assert_eq!(out.layout.rows, 4);
    assert_eq!(out.manifest.frames.len(), 40);
    assert_eq!(out.manifest.meta.image, "atlas.png");
    assert_eq!((out.manifest.meta.size.w, out.manifest.meta.size.h), (10 * F, 4 * F));

    let names: Vec<&str> = out.manifest.names().collect();
    assert_eq!(&names[..4], &["hero-front", "hero-back", "hero-left", "hero-right"]);
    assert_eq!(names[4], "hero-front-walk-0000");
    assert_eq!(names[12], "hero-front-walk-0008");
    assert_eq!(names[13], "hero-back-walk-0000");
    assert_eq!(names[39], "hero-right-walk-0008");
    for e in &out.manifest.frames {
        assert_eq!((e.frame.w, e.frame.h), (F, F));
    }
    assert!((out.stats().occupancy - 1.0).abs() < 1e-9);
}

#[test]
fn invalid_config_is_rejected_before_extraction() {
    let sheet = DynamicImage::ImageRgba8(RgbaImage::new(64, 64));
    let cfg = SheetConfig::builder().id("").build();
    assert!(build_atlas(&sheet, &cfg, "atlas.png").is_err());
}

#[test]
fn oversized_atlas_is_an_error_not_a_panic() {
    let sheet = DynamicImage::ImageRgba8(noisy_sheet(13, 21));
    let cfg = SheetConfig::builder()
        .id("hero")
        .with_frame_size(F, F)
        .atlas_columns(u32::MAX / F + 1)
        .build();
    assert!(build_atlas(&sheet, &cfg, "atlas.png").is_err());
}
