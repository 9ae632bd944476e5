//! Cell extraction and frame naming.
//!
//! Cells are addressed purely by arithmetic: cell `(row, col)` starts at
//! `(col * frame_w, row * frame_h)`. Nothing checks that the sheet actually has
//! that cell; anything past the sheet edge comes out transparent.

use crate::compositing::blit_rgba;
use crate::config::{Direction, SheetConfig, WalkPadding};
use crate::model::{FrameDescriptor, NamedFrame};
use image::RgbaImage;
use tracing::{debug, warn};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Walk length that gets padded from 8 under [`WalkPadding::Legacy`].
const LEGACY_WALK_FRAMES: u32 = 9;

/// Name of the static pose for `dir`: `{id}-{direction}`.
pub fn static_frame_name(id: &str, dir: Direction) -> String {
    format!("{}-{}", id, dir.as_str())
}

/// Name of walk frame `index` for `dir`: `{id}-{direction}-walk-{index:04}`.
pub fn walk_frame_name(id: &str, dir: Direction, index: usize) -> String {
    format!("{}-{}-walk-{:04}", id, dir.as_str(), index)
}

/// Copy one `frame_w x frame_h` cell out of `sheet`.
///
/// The result is always full size and owns its pixels. Parts of the cell that lie
/// beyond the sheet are transparent.
pub fn extract_cell(
    sheet: &RgbaImage,
    frame_w: u32,
    frame_h: u32,
    row: u32,
    col: u32,
) -> RgbaImage {
    let mut cell = RgbaImage::new(frame_w, frame_h);
    let sx = col.saturating_mul(frame_w);
    let sy = row.saturating_mul(frame_h);
    blit_rgba(sheet, &mut cell, 0, 0, sx, sy, frame_w, frame_h);
    cell
}

/// Extract `count` consecutive cells of `row`, starting at `start_col`, left to right.
pub fn extract_run(
    sheet: &RgbaImage,
    frame_w: u32,
    frame_h: u32,
    row: u32,
    start_col: u32,
    count: u32,
) -> Vec<RgbaImage> {
    #[cfg(feature = "parallel")]
    let frames: Vec<RgbaImage> = (0..count)
        .into_par_iter()
        .map(|i| extract_cell(sheet, frame_w, frame_h, row, start_col.saturating_add(i)))
        .collect();
    #[cfg(not(feature = "parallel"))]
    let frames: Vec<RgbaImage> = (0..count)
        .map(|i| extract_cell(sheet, frame_w, frame_h, row, start_col.saturating_add(i)))
        .collect();
    frames
}

/// [`extract_run`] for a [`FrameDescriptor`].
pub fn extract_descriptor(
    sheet: &RgbaImage,
    frame_w: u32,
    frame_h: u32,
    desc: &FrameDescriptor,
) -> Vec<RgbaImage> {
    extract_run(sheet, frame_w, frame_h, desc.row, desc.start_column, desc.count)
}

/// Whole cells the sheet has in each row from `start_col` onward.
pub fn available_columns(sheet: &RgbaImage, frame_w: u32, start_col: u32) -> u32 {
    if frame_w == 0 {
        return 0;
    }
    (sheet.width() / frame_w).saturating_sub(start_col)
}

/// Extract one direction's walk cycle, applying the configured padding policy.
fn extract_walk(sheet: &RgbaImage, cfg: &SheetConfig, row: u32) -> Vec<RgbaImage> {
    let requested = cfg.walk_frames;
    let available = available_columns(sheet, cfg.frame_width, cfg.start_column);
    let take = match cfg.walk_padding {
        WalkPadding::Legacy if requested == LEGACY_WALK_FRAMES && available == 8 => available,
        WalkPadding::RepeatLast if available > 0 => requested.min(available),
        _ => requested,
    };
    let mut frames = extract_run(
        sheet,
        cfg.frame_width,
        cfg.frame_height,
        row,
        cfg.start_column,
        take,
    );
    if take < requested {
        if let Some(last) = frames.last().cloned() {
            debug!(row, extracted = take, requested, "padding walk cycle with last frame");
            frames.resize(requested as usize, last);
        }
    } else if requested > available {
        warn!(
            row,
            requested,
            available,
            "walk cycle reads past the sheet edge; extra frames are transparent"
        );
    }
    frames
}

/// Extract every static pose and walk frame with its name, in emission order:
/// the four static poses (front, back, left, right), then the four walk cycles
/// in the same direction order.
pub fn extract_named_frames(sheet: &RgbaImage, cfg: &SheetConfig) -> Vec<NamedFrame> {
    let mut out = Vec::with_capacity(cfg.requested_frames());

    for dir in Direction::ALL {
        let image = extract_cell(
            sheet,
            cfg.frame_width,
            cfg.frame_height,
            cfg.row_for(dir),
            cfg.static_column,
        );
        out.push(NamedFrame::new(static_frame_name(&cfg.id, dir), image));
    }

    for dir in Direction::ALL {
        let frames = extract_walk(sheet, cfg, cfg.row_for(dir));
        out.extend(
            frames
                .into_iter()
                .enumerate()
                .map(|(i, image)| NamedFrame::new(walk_frame_name(&cfg.id, dir, i), image)),
        );
    }

    debug!(frames = out.len(), id = %cfg.id, "extracted frames");
    out
}

/// Split named frames into parallel name and image lists (same order).
pub fn split_named_frames(frames: Vec<NamedFrame>) -> (Vec<String>, Vec<RgbaImage>) {
    frames.into_iter().map(|f| (f.name, f.image)).unzip()
}
