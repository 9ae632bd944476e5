use crate::compositing::blit_rgba;
use crate::model::{AtlasLayout, NamedFrame, Rect};
use image::RgbaImage;

/// A named frame's final position in the atlas.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placement {
    pub name: String,
    pub rect: Rect,
}

/// Packed atlas bitmap plus where each input frame went.
#[derive(Debug, Clone)]
pub struct PackedAtlas {
    pub rgba: RgbaImage,
    pub layout: AtlasLayout,
    /// One entry per input frame, in input order.
    pub placements: Vec<Placement>,
}

/// Lay `frames` out left-to-right, top-to-bottom on a grid `columns` cells wide.
///
/// Frame `i` goes to cell `(i % columns, i / columns)`. The returned bitmap is the
/// smallest whole number of rows that fits every frame, starts fully transparent, and
/// receives each frame's pixels verbatim (alpha included). The returned rects are in
/// input order and are always `frame_w x frame_h`.
///
/// An empty input yields a `columns * frame_w` wide, zero-height bitmap and no rects.
pub fn pack<'a, I>(frames: I, frame_w: u32, frame_h: u32, columns: u32) -> (RgbaImage, Vec<Rect>)
where
    I: IntoIterator<Item = &'a RgbaImage>,
    I::IntoIter: ExactSizeIterator,
{
    let frames = frames.into_iter();
    let layout = AtlasLayout::for_count(frames.len(), frame_w, frame_h, columns);
    let mut canvas = RgbaImage::new(layout.width(), layout.height());
    let mut rects = Vec::with_capacity(frames.len());
    for (idx, frame) in frames.enumerate() {
        let rect = layout.cell_rect(idx);
        blit_rgba(frame, &mut canvas, rect.x, rect.y, 0, 0, frame_w, frame_h);
        rects.push(rect);
    }
    (canvas, rects)
}

/// [`pack`] for named frames; placements carry the frame names along.
pub fn pack_named(frames: &[NamedFrame], frame_w: u32, frame_h: u32, columns: u32) -> PackedAtlas {
    let (rgba, rects) = pack(frames.iter().map(|f| &f.image), frame_w, frame_h, columns);
    let layout = AtlasLayout::for_count(frames.len(), frame_w, frame_h, columns);
    let placements = frames
        .iter()
        .zip(rects)
        .map(|(f, rect)| Placement {
            name: f.name.clone(),
            rect,
        })
        .collect();
    PackedAtlas {
        rgba,
        layout,
        placements,
    }
}
