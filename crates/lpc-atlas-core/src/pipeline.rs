use crate::config::SheetConfig;
use crate::error::Result;
use crate::extract::{available_columns, extract_named_frames};
use crate::manifest::manifest_for_atlas;
use crate::model::{AtlasLayout, Manifest};
use crate::packer::pack_named;
use image::{DynamicImage, RgbaImage};
use tracing::{info, instrument, warn};

/// Output of a build: the atlas bitmap, its grid geometry and the frame manifest.
pub struct AtlasOutput {
    pub rgba: RgbaImage,
    pub layout: AtlasLayout,
    pub manifest: Manifest,
}

#[instrument(skip_all, fields(id = %cfg.id))]
/// Slice `sheet` according to `cfg`, pack the frames and build the manifest.
///
/// `image_name` is recorded as `meta.image`; pass the atlas file name, not a path,
/// so the manifest stays valid next to the image wherever both are copied.
pub fn build_atlas(
    sheet: &DynamicImage,
    cfg: &SheetConfig,
    image_name: &str,
) -> Result<AtlasOutput> {
    cfg.validate()?;

    let rgba = sheet.to_rgba8();
    let columns_in_sheet = available_columns(&rgba, cfg.frame_width, 0);
    if columns_in_sheet != cfg.sheet_columns {
        warn!(
            configured = cfg.sheet_columns,
            actual = columns_in_sheet,
            "sheet column count differs from configuration"
        );
    }

    let frames = extract_named_frames(&rgba, cfg);
    drop(rgba);

    let packed = pack_named(&frames, cfg.frame_width, cfg.frame_height, cfg.atlas_columns);
    let manifest = manifest_for_atlas(&packed, image_name);
    info!(
        frames = frames.len(),
        width = packed.layout.width(),
        height = packed.layout.height(),
        "atlas packed"
    );

    Ok(AtlasOutput {
        rgba: packed.rgba,
        layout: packed.layout,
        manifest,
    })
}

impl AtlasOutput {
    /// Computes summary statistics for this output.
    pub fn stats(&self) -> crate::model::ManifestStats {
        self.manifest.stats()
    }
}
