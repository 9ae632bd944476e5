use image::RgbaImage;
use lpc_atlas_core::prelude::*;
use lpc_atlas_core::{manifest_for_atlas, to_json_array};

fn rects(n: u32) -> Vec<Rect> {
    (0..n).map(|i| Rect::new(i * 16, 0, 16, 32)).collect()
}

#[test]
fn entries_are_untrimmed_full_cells() {
    let m = build_manifest(&["a", "b"], &rects(2), "atlas.png");
    let b = m.get("b").expect("b");
    assert_eq!(b.frame, Rect::new(16, 0, 16, 32));
    assert!(!b.rotated && !b.trimmed);
    assert_eq!(b.sprite_source_size, Rect::new(0, 0, 16, 32));
    assert_eq!((b.source_size.w, b.source_size.h), (16, 32));
    assert_eq!((m.meta.size.w, m.meta.size.h), (32, 32));
}

#[test]
#[should_panic(expected = "every frame name needs exactly one atlas rect")]
fn length_mismatch_is_a_contract_violation() {
    let _ = build_manifest(&["a", "b", "c"], &rects(2), "atlas.png");
}

#[test]
fn json_hash_shape_and_key_order() {
    let names = ["z-front", "a-back", "m-left"];
    let m = build_manifest(&names, &rects(3), "atlas.png");
    let v = to_json_hash(&m);

    let frames = v["frames"].as_object().expect("frames object");
    let keys: Vec<&String> = frames.keys().collect();
    assert_eq!(keys, vec!["z-front", "a-back", "m-left"]);

    let a = &frames["a-back"];
    assert_eq!(a["frame"]["x"], 16);
    assert_eq!(a["frame"]["w"], 16);
    assert_eq!(a["frame"]["h"], 32);
    assert_eq!(a["rotated"], false);
    assert_eq!(a["trimmed"], false);
    assert_eq!(a["spriteSourceSize"]["x"], 0);
    assert_eq!(a["spriteSourceSize"]["h"], 32);
    assert_eq!(a["sourceSize"]["w"], 16);
    assert_eq!(v["meta"]["image"], "atlas.png");

    // serialized text keeps the same order
    let text = serde_json::to_string_pretty(&v).expect("serialize");
    let z = text.find("\"z-front\"").expect("z");
    let a = text.find("\"a-back\"").expect("a");
    let m = text.find("\"m-left\"").expect("m");
    assert!(z < a && a < m);
}

#[test]
fn json_array_carries_filenames_in_order() {
    let m = build_manifest(&["x", "y"], &rects(2), "sheet.png");
    let v = to_json_array(&m);
    let arr = v["frames"].as_array().expect("array");
    assert_eq!(arr.len(), 2);
    assert_eq!(arr[0]["filename"], "x");
    assert_eq!(arr[1]["filename"], "y");
    assert_eq!(arr[1]["frame"]["x"], 16);
    assert_eq!(v["meta"]["image"], "sheet.png");
}

#[test]
fn empty_manifest_has_empty_frames_object() {
    let packed = pack_named(&[], 64, 64, 10);
    let m = manifest_for_atlas(&packed, "atlas.png");
    assert!(m.frames.is_empty());
    assert_eq!((m.meta.size.w, m.meta.size.h), (640, 0));
    let v = to_json_hash(&m);
    assert!(v["frames"].as_object().expect("object").is_empty());
}

#[test]
fn atlas_manifest_uses_full_bitmap_size() {
    let frames: Vec<NamedFrame> = (0..3)
        .map(|i| NamedFrame::new(format!("f{i}"), RgbaImage::new(4, 4)))
        .collect();
    let packed = pack_named(&frames, 4, 4, 5);
    let m = manifest_for_atlas(&packed, "atlas.png");
    // three frames only cover 12px but the grid is five cells wide
    assert_eq!((m.meta.size.w, m.meta.size.h), (20, 4));
    assert_eq!(m.names().collect::<Vec<_>>(), vec!["f0", "f1", "f2"]);
    assert!(m.stats().summary().starts_with("Frames: 3"));
}
