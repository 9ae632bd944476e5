use crate::model::{Manifest, ManifestFrame};
use serde_json::{Value, json};

fn frame_fields(fr: &ManifestFrame) -> serde_json::Map<String, Value> {
    let mut m = serde_json::Map::new();
    m.insert(
        "frame".into(),
        json!({"x": fr.frame.x, "y": fr.frame.y, "w": fr.frame.w, "h": fr.frame.h}),
    );
    m.insert("rotated".into(), Value::Bool(fr.rotated));
    m.insert("trimmed".into(), Value::Bool(fr.trimmed));
    m.insert(
        "spriteSourceSize".into(),
        json!({
            "x": fr.sprite_source_size.x,
            "y": fr.sprite_source_size.y,
            "w": fr.sprite_source_size.w,
            "h": fr.sprite_source_size.h,
        }),
    );
    m.insert(
        "sourceSize".into(),
        json!({"w": fr.source_size.w, "h": fr.source_size.h}),
    );
    m
}

fn meta_value(manifest: &Manifest) -> Value {
    json!({
        "image": manifest.meta.image,
        "app": manifest.meta.app,
        "version": manifest.meta.version,
        "size": {"w": manifest.meta.size.w, "h": manifest.meta.size.h},
    })
}

/// Frames keyed by name, TexturePacker JSON-hash style.
/// Shape: `{ frames: { name: { frame, rotated, trimmed, spriteSourceSize, sourceSize } }, meta }`.
/// Keys keep extraction order so output diffs cleanly between runs.
pub fn to_json_hash(manifest: &Manifest) -> Value {
    let mut frames = serde_json::Map::new();
    for fr in &manifest.frames {
        frames.insert(fr.name.clone(), Value::Object(frame_fields(fr)));
    }
    json!({ "frames": frames, "meta": meta_value(manifest) })
}

/// Frames as an ordered array, each entry carrying its name under `filename`.
pub fn to_json_array(manifest: &Manifest) -> Value {
    let frames: Vec<Value> = manifest
        .frames
        .iter()
        .map(|fr| {
            let mut m = serde_json::Map::new();
            m.insert("filename".into(), Value::String(fr.name.clone()));
            m.extend(frame_fields(fr));
            Value::Object(m)
        })
        .collect();
    json!({ "frames": frames, "meta": meta_value(manifest) })
}
