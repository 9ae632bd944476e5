use image::RgbaImage;
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle (pixels). `x,y` is top-left; `w,h` are sizes.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
}

impl Rect {
    pub fn new(x: u32, y: u32, w: u32, h: u32) -> Self {
        Self { x, y, w, h }
    }
    /// Exclusive right edge (`x + w`).
    pub fn x2(&self) -> u32 {
        self.x + self.w
    }
    /// Exclusive bottom edge (`y + h`).
    pub fn y2(&self) -> u32 {
        self.y + self.h
    }
    /// True if the two rectangles share at least one pixel.
    pub fn overlaps(&self, other: &Rect) -> bool {
        !(self.x >= other.x2()
            || other.x >= self.x2()
            || self.y >= other.y2()
            || other.y >= self.y2())
    }
}

/// A contiguous horizontal run of `count` cells starting at `start_column` in `row`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameDescriptor {
    pub row: u32,
    pub start_column: u32,
    pub count: u32,
}

impl FrameDescriptor {
    pub fn new(row: u32, start_column: u32, count: u32) -> Self {
        Self {
            row,
            start_column,
            count,
        }
    }

    /// A single-cell descriptor (static pose).
    pub fn cell(row: u32, column: u32) -> Self {
        Self::new(row, column, 1)
    }
}

/// An extracted cell together with the name it is published under.
///
/// Carrying both in one record keeps names and pixels from drifting apart
/// between extraction, packing and manifest assembly.
#[derive(Debug, Clone, PartialEq)]
pub struct NamedFrame {
    pub name: String,
    pub image: RgbaImage,
}

impl NamedFrame {
    pub fn new(name: impl Into<String>, image: RgbaImage) -> Self {
        Self {
            name: name.into(),
            image,
        }
    }
}

/// Grid geometry of a packed atlas.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct AtlasLayout {
    pub columns: u32,
    pub rows: u32,
    pub cell_width: u32,
    pub cell_height: u32,
}

impl AtlasLayout {
    /// Smallest grid of `columns` width that holds `count` cells.
    pub fn for_count(count: usize, cell_width: u32, cell_height: u32, columns: u32) -> Self {
        assert!(columns > 0, "atlas needs at least one column");
        let rows = (count as u32).div_ceil(columns);
        Self {
            columns,
            rows,
            cell_width,
            cell_height,
        }
    }
    pub fn width(&self) -> u32 {
        self.columns * self.cell_width
    }
    pub fn height(&self) -> u32 {
        self.rows * self.cell_height
    }
    /// Number of cells in the grid, used or not.
    pub fn capacity(&self) -> usize {
        (self.columns as usize) * (self.rows as usize)
    }
    /// Destination rectangle of cell `index` (row-major).
    pub fn cell_rect(&self, index: usize) -> Rect {
        let col = (index as u32) % self.columns;
        let row = (index as u32) / self.columns;
        Rect::new(
            col * self.cell_width,
            row * self.cell_height,
            self.cell_width,
            self.cell_height,
        )
    }
}

/// Width/height pair as written to the manifest (`sourceSize`, `meta.size`).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Size {
    pub w: u32,
    pub h: u32,
}

/// One manifest entry: where a named frame lives in the atlas.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ManifestFrame {
    pub name: String,
    /// Placed rectangle within the atlas.
    pub frame: Rect,
    /// Always false; frames are never rotated.
    pub rotated: bool,
    /// Always false; frames are emitted at full cell size.
    pub trimmed: bool,
    /// Visible sub-rect within the source cell (the whole cell).
    pub sprite_source_size: Rect,
    /// Source cell size.
    pub source_size: Size,
}

/// Atlas-level metadata.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ManifestMeta {
    /// Atlas image file name, relative to the manifest.
    pub image: String,
    pub app: String,
    pub version: String,
    /// Atlas pixel size.
    pub size: Size,
}

/// Frame manifest, in extraction order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Manifest {
    pub frames: Vec<ManifestFrame>,
    pub meta: ManifestMeta,
}

/// Summary numbers for a built manifest.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ManifestStats {
    pub num_frames: usize,
    pub atlas_width: u32,
    pub atlas_height: u32,
    /// Area covered by frames / atlas area (0.0 to 1.0).
    pub occupancy: f64,
}

impl Manifest {
    pub fn get(&self, name: &str) -> Option<&ManifestFrame> {
        self.frames.iter().find(|f| f.name == name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.frames.iter().map(|f| f.name.as_str())
    }

    pub fn stats(&self) -> ManifestStats {
        let total = (self.meta.size.w as u64) * (self.meta.size.h as u64);
        let used: u64 = self
            .frames
            .iter()
            .map(|f| (f.frame.w as u64) * (f.frame.h as u64))
            .sum();
        let occupancy = if total > 0 {
            used as f64 / total as f64
        } else {
            0.0
        };
        ManifestStats {
            num_frames: self.frames.len(),
            atlas_width: self.meta.size.w,
            atlas_height: self.meta.size.h,
            occupancy,
        }
    }
}

impl ManifestStats {
    /// Returns a human-readable summary of the statistics.
    pub fn summary(&self) -> String {
        format!(
            "Frames: {}, Atlas: {}x{}, Occupancy: {:.2}%",
            self.num_frames,
            self.atlas_width,
            self.atlas_height,
            self.occupancy * 100.0,
        )
    }
}
