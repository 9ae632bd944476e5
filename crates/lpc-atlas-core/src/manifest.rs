use crate::model::{Manifest, ManifestFrame, ManifestMeta, Rect, Size};
use crate::packer::PackedAtlas;

const APP_NAME: &str = "lpc-atlas";

/// Zip `names` and `rects` positionally into a manifest whose `meta.image` is `image`.
///
/// `meta.size` is the extent covered by `rects`. Use [`manifest_for_atlas`] to record
/// the full atlas bitmap size instead.
///
/// # Panics
///
/// Panics if `names` and `rects` differ in length; that means the caller lost track
/// of which frame is which.
pub fn build_manifest<S: AsRef<str>>(names: &[S], rects: &[Rect], image: &str) -> Manifest {
    assert_eq!(
        names.len(),
        rects.len(),
        "every frame name needs exactly one atlas rect"
    );
    let frames = names
        .iter()
        .zip(rects)
        .map(|(name, rect)| manifest_frame(name.as_ref(), *rect))
        .collect();
    let size = Size {
        w: rects.iter().map(Rect::x2).max().unwrap_or(0),
        h: rects.iter().map(Rect::y2).max().unwrap_or(0),
    };
    Manifest {
        frames,
        meta: meta(image, size),
    }
}

/// Manifest for a packed atlas; `meta.size` is the atlas bitmap size.
pub fn manifest_for_atlas(packed: &PackedAtlas, image: &str) -> Manifest {
    let frames = packed
        .placements
        .iter()
        .map(|p| manifest_frame(&p.name, p.rect))
        .collect();
    let size = Size {
        w: packed.layout.width(),
        h: packed.layout.height(),
    };
    Manifest {
        frames,
        meta: meta(image, size),
    }
}

fn manifest_frame(name: &str, rect: Rect) -> ManifestFrame {
    ManifestFrame {
        name: name.to_string(),
        frame: rect,
        rotated: false,
        trimmed: false,
        sprite_source_size: Rect::new(0, 0, rect.w, rect.h),
        source_size: Size {
            w: rect.w,
            h: rect.h,
        },
    }
}

fn meta(image: &str, size: Size) -> ManifestMeta {
    ManifestMeta {
        image: image.to_string(),
        app: APP_NAME.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        size,
    }
}
