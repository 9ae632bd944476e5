//! Core library for turning an LPC-style character sheet into a texture atlas.
//!
//! - Extraction: static poses and walk cycles for four directions, named
//!   `{id}-{direction}` and `{id}-{direction}-walk-{nnnn}`
//! - Packing: fixed-size cells laid out row-major on a grid of configurable width
//! - Manifest: TexturePacker-style JSON hash (or array) keyed by frame name
//!
//! Quick example:
//! ```ignore
//! use image::ImageReader;
//! use lpc_atlas_core::{SheetConfig, build_atlas, to_json_hash};
//! # fn main() -> anyhow::Result<()> {
//! let sheet = ImageReader::open("hero.png")?.decode()?;
//! let cfg = SheetConfig::builder().id("hero").build();
//! let out = build_atlas(&sheet, &cfg, "atlas.png")?;
//! out.rgba.save("atlas.png")?;
//! std::fs::write("atlas.json", serde_json::to_string_pretty(&to_json_hash(&out.manifest))?)?;
//! # Ok(()) }
//! ```

pub mod compositing;
pub mod config;
pub mod error;
pub mod export;
pub mod extract;
pub mod manifest;
pub mod model;
pub mod packer;
pub mod pipeline;

pub use config::*;
pub use error::*;
pub use export::*;
pub use extract::*;
pub use manifest::*;
pub use model::*;
pub use packer::*;
pub use pipeline::*;

/// Convenience prelude for common types and functions.
/// Importing `lpc_atlas_core::prelude::*` brings the primary APIs into scope.
pub mod prelude {
    pub use crate::config::{Direction, SheetConfig, SheetConfigBuilder, WalkPadding};
    pub use crate::model::{
        AtlasLayout, FrameDescriptor, Manifest, ManifestFrame, NamedFrame, Rect,
    };
    pub use crate::packer::{PackedAtlas, Placement};
    pub use crate::{
        AtlasOutput, build_atlas, build_manifest, extract_named_frames, extract_run, pack,
        pack_named, to_json_hash,
    };
}
