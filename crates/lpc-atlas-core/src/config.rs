use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Facing direction of a pose. Each direction is sourced from its own sheet row.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Front,
    Back,
    Left,
    Right,
}

impl Direction {
    /// Emission order for both the static poses and the walk cycles.
    pub const ALL: [Direction; 4] = [
        Direction::Front,
        Direction::Back,
        Direction::Left,
        Direction::Right,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Front => "front",
            Direction::Back => "back",
            Direction::Left => "left",
            Direction::Right => "right",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Direction {
    type Err = ();
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "front" => Ok(Self::Front),
            "back" => Ok(Self::Back),
            "left" => Ok(Self::Left),
            "right" => Ok(Self::Right),
            _ => Err(()),
        }
    }
}

/// What to do when a sheet row has fewer walk cells than requested.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum WalkPadding {
    /// Only the 8-available / 9-requested case is padded, by repeating the 8th frame.
    /// Every other run is extracted as requested, reading past the sheet edge if needed.
    #[default]
    Legacy,
    /// Extract what the row has and repeat the last frame up to `walk_frames`.
    RepeatLast,
    /// Always extract `walk_frames` cells; cells past the sheet edge come out transparent.
    Off,
}

impl FromStr for WalkPadding {
    type Err = ();
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "legacy" => Ok(Self::Legacy),
            "repeat_last" | "repeat-last" => Ok(Self::RepeatLast),
            "off" | "none" => Ok(Self::Off),
            _ => Err(()),
        }
    }
}

/// Geometry of the source sheet and the output atlas.
///
/// Defaults follow the common LPC layout: 64x64 cells, 13 columns per row,
/// walk cycles on rows 8 (back), 9 (left), 10 (front) and 11 (right).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SheetConfig {
    /// Prefix for every emitted frame name.
    pub id: String,
    /// Cell width in pixels (source and atlas).
    #[serde(default = "default_frame_size")]
    pub frame_width: u32,
    /// Cell height in pixels (source and atlas).
    #[serde(default = "default_frame_size")]
    pub frame_height: u32,
    /// Columns in the source sheet. Informational; extraction addresses cells directly.
    #[serde(default = "default_sheet_columns")]
    pub sheet_columns: u32,
    /// First column of each walk cycle.
    #[serde(default)]
    pub start_column: u32,
    /// Walk frames per direction.
    #[serde(default = "default_walk_frames")]
    pub walk_frames: u32,
    #[serde(default = "default_front_row")]
    pub front_row: u32,
    #[serde(default = "default_back_row")]
    pub back_row: u32,
    #[serde(default = "default_left_row")]
    pub left_row: u32,
    #[serde(default = "default_right_row")]
    pub right_row: u32,
    /// Column holding the static pose of every direction.
    #[serde(default)]
    pub static_column: u32,
    /// Grid width of the output atlas, in cells.
    #[serde(default = "default_atlas_columns")]
    pub atlas_columns: u32,
    #[serde(default)]
    pub walk_padding: WalkPadding,
}

impl Default for SheetConfig {
    fn default() -> Self {
        Self {
            id: String::new(),
            frame_width: default_frame_size(),
            frame_height: default_frame_size(),
            sheet_columns: default_sheet_columns(),
            start_column: 0,
            walk_frames: default_walk_frames(),
            front_row: default_front_row(),
            back_row: default_back_row(),
            left_row: default_left_row(),
            right_row: default_right_row(),
            static_column: 0,
            atlas_columns: default_atlas_columns(),
            walk_padding: WalkPadding::default(),
        }
    }
}

impl SheetConfig {
    /// Validates the configuration.
    ///
    /// Returns an error if:
    /// - Frame width or height is zero
    /// - The id is empty or contains whitespace
    /// - The atlas has zero columns
    /// - The packed atlas would be wider or taller than `u32::MAX` pixels
    pub fn validate(&self) -> crate::error::Result<()> {
        use crate::error::AtlasError;

        if self.frame_width == 0 || self.frame_height == 0 {
            return Err(AtlasError::InvalidDimensions {
                width: self.frame_width,
                height: self.frame_height,
            });
        }
        if self.id.is_empty() {
            return Err(AtlasError::InvalidConfig("id must not be empty".into()));
        }
        if self.id.chars().any(char::is_whitespace) {
            return Err(AtlasError::InvalidConfig(format!(
                "id {:?} must not contain whitespace",
                self.id
            )));
        }
        if self.atlas_columns == 0 {
            return Err(AtlasError::InvalidConfig(
                "atlas_columns must be at least 1".into(),
            ));
        }
        let atlas_rows = u32::try_from(self.requested_frames())
            .ok()
            .map(|n| n.div_ceil(self.atlas_columns));
        let atlas_width = self.atlas_columns.checked_mul(self.frame_width);
        let atlas_height = atlas_rows.and_then(|rows| rows.checked_mul(self.frame_height));
        if atlas_width.is_none() || atlas_height.is_none() {
            return Err(AtlasError::InvalidConfig(format!(
                "atlas of {} frames on {} columns of {}x{} cells exceeds u32 pixel dimensions",
                self.requested_frames(),
                self.atlas_columns,
                self.frame_width,
                self.frame_height
            )));
        }
        Ok(())
    }

    /// Source row for `dir`.
    pub fn row_for(&self, dir: Direction) -> u32 {
        match dir {
            Direction::Front => self.front_row,
            Direction::Back => self.back_row,
            Direction::Left => self.left_row,
            Direction::Right => self.right_row,
        }
    }

    /// Total frames this configuration emits (4 static poses plus 4 walk cycles),
    /// before any walk padding is applied.
    pub fn requested_frames(&self) -> usize {
        Direction::ALL.len().saturating_mul(1 + self.walk_frames as usize)
    }

    /// Create a fluent builder for `SheetConfig`.
    pub fn builder() -> SheetConfigBuilder {
        SheetConfigBuilder::new()
    }
}

fn default_frame_size() -> u32 {
    64
}
fn default_sheet_columns() -> u32 {
    13
}
fn default_walk_frames() -> u32 {
    9
}
fn default_front_row() -> u32 {
    10
}
fn default_back_row() -> u32 {
    8
}
fn default_left_row() -> u32 {
    9
}
fn default_right_row() -> u32 {
    11
}
fn default_atlas_columns() -> u32 {
    10
}

/// Builder for `SheetConfig` for ergonomic construction.
#[derive(Debug, Default, Clone)]
pub struct SheetConfigBuilder {
    cfg: SheetConfig,
}

impl SheetConfigBuilder {
    pub fn new() -> Self {
        Self {
            cfg: SheetConfig::default(),
        }
    }
    pub fn id(mut self, v: impl Into<String>) -> Self {
        self.cfg.id = v.into();
        self
    }
    pub fn with_frame_size(mut self, w: u32, h: u32) -> Self {
        self.cfg.frame_width = w;
        self.cfg.frame_height = h;
        self
    }
    pub fn sheet_columns(mut self, v: u32) -> Self {
        self.cfg.sheet_columns = v;
        self
    }
    pub fn start_column(mut self, v: u32) -> Self {
        self.cfg.start_column = v;
        self
    }
    pub fn walk_frames(mut self, v: u32) -> Self {
        self.cfg.walk_frames = v;
        self
    }
    /// Sets the source rows in `front, back, left, right` order.
    pub fn rows(mut self, front: u32, back: u32, left: u32, right: u32) -> Self {
        self.cfg.front_row = front;
        self.cfg.back_row = back;
        self.cfg.left_row = left;
        self.cfg.right_row = right;
        self
    }
    pub fn static_column(mut self, v: u32) -> Self {
        self.cfg.static_column = v;
        self
    }
    pub fn atlas_columns(mut self, v: u32) -> Self {
        self.cfg.atlas_columns = v;
        self
    }
    pub fn walk_padding(mut self, v: WalkPadding) -> Self {
        self.cfg.walk_padding = v;
        self
    }
    pub fn build(self) -> SheetConfig {
        self.cfg
    }
}
