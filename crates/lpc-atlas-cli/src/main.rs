use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{ArgAction, Parser};
use image::{DynamicImage, ImageFormat, ImageReader, RgbaImage};
use lpc_atlas_core::{SheetConfig, WalkPadding, build_atlas, to_json_array, to_json_hash};
use serde::Deserialize;
use tempfile::NamedTempFile;
use tracing::info;

#[derive(Parser, Debug, Clone)]
#[command(
    name = "lpc-atlas",
    about = "Slice an LPC character sheet into a packed atlas image and JSON frame manifest",
    version,
    author
)]
struct Cli {
    // Input/Output
    /// Path to the LPC spritesheet (PNG or any decodable format)
    #[arg(long, help_heading = "Input/Output")]
    image: PathBuf,
    /// Output directory for the atlas image and manifest
    #[arg(long, help_heading = "Input/Output")]
    out: PathBuf,
    /// Atlas base name (files will be name.png/.json)
    #[arg(short, long, default_value = "atlas", help_heading = "Input/Output")]
    name: String,
    /// YAML config file path (overrides sheet options)
    #[arg(long, help_heading = "Input/Output")]
    config: Option<PathBuf>,

    // Sheet
    /// Frame name prefix (e.g. ada_lovelace)
    #[arg(long, help_heading = "Sheet")]
    id: Option<String>,
    /// Cell width in pixels
    #[arg(long, default_value_t = 64, help_heading = "Sheet")]
    frame_width: u32,
    /// Cell height in pixels
    #[arg(long, default_value_t = 64, help_heading = "Sheet")]
    frame_height: u32,
    /// Columns in the LPC sheet (informational)
    #[arg(long, default_value_t = 13, help_heading = "Sheet")]
    cols: u32,
    /// Start column for walk cycles
    #[arg(long, default_value_t = 0, help_heading = "Sheet")]
    start_col: u32,
    /// Walk frames per direction
    #[arg(long, default_value_t = 9, help_heading = "Sheet")]
    walk_frames: u32,
    /// Row holding the front-facing walk cycle
    #[arg(long, default_value_t = 10, help_heading = "Sheet")]
    front_row: u32,
    /// Row holding the left-facing walk cycle
    #[arg(long, default_value_t = 9, help_heading = "Sheet")]
    left_row: u32,
    /// Row holding the right-facing walk cycle
    #[arg(long, default_value_t = 11, help_heading = "Sheet")]
    right_row: u32,
    /// Row holding the back-facing walk cycle
    #[arg(long, default_value_t = 8, help_heading = "Sheet")]
    back_row: u32,
    /// Column used as the static pose of every direction
    #[arg(long, default_value_t = 0, help_heading = "Sheet")]
    static_col: u32,
    /// Short walk cycles: legacy | repeat_last | off
    #[arg(
        long,
        default_value = "legacy",
        value_parser = ["legacy", "repeat_last", "repeat-last", "off", "none"],
        help_heading = "Sheet"
    )]
    walk_padding: String,

    // Layout
    /// Columns to arrange in the output atlas
    #[arg(long, default_value_t = 10, help_heading = "Layout")]
    atlas_cols: u32,

    // Export
    /// Metadata format: json-hash | json (alias) | json-array
    #[arg(
        long,
        default_value = "json-hash",
        value_parser = ["json-hash", "json", "json-array"],
        help_heading = "Export"
    )]
    metadata: String,
    /// Print the merged configuration (after CLI/YAML) and exit
    #[arg(long, default_value_t = false, help_heading = "Export")]
    print_config: bool,
    /// Output format for --print-config: json|yaml
    #[arg(long, default_value = "json", value_parser = ["json", "yaml"], help_heading = "Export")]
    print_config_format: String,
    /// Dry run: build the atlas and report stats but do not write files
    #[arg(long, default_value_t = false, help_heading = "Export")]
    dry_run: bool,

    /// Increase verbosity (-v, -vv)
    #[arg(short, long, action=ArgAction::Count, help_heading = "Logging/UX")]
    verbose: u8,
    /// Quiet mode (overrides verbose)
    #[arg(short, long, default_value_t = false, help_heading = "Logging/UX")]
    quiet: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing_with_level(cli.quiet, cli.verbose);
    run(&cli)
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let cfg = resolve_config(cli)?;

    if cli.print_config {
        match cli.print_config_format.as_str() {
            "yaml" => println!("{}", serde_yaml::to_string(&cfg)?),
            _ => println!("{}", serde_json::to_string_pretty(&cfg)?),
        }
        return Ok(());
    }
    cfg.validate()?;

    let sheet = load_image(&cli.image)
        .with_context(|| format!("load sheet {}", cli.image.display()))?;
    info!(
        path = ?cli.image,
        width = sheet.width(),
        height = sheet.height(),
        "loaded sheet"
    );

    let image_name = format!("{}.png", cli.name);
    let out = build_atlas(&sheet, &cfg, &image_name)?;
    info!("{}", out.stats().summary());

    let manifest_value = match cli.metadata.as_str() {
        "json-hash" | "json" => to_json_hash(&out.manifest),
        "json-array" => to_json_array(&out.manifest),
        other => anyhow::bail!("unknown metadata format: {}", other),
    };
    let manifest_json = serde_json::to_string_pretty(&manifest_value)?;

    if cli.dry_run {
        println!(
            "frames={} atlas={}x{}",
            out.manifest.frames.len(),
            out.rgba.width(),
            out.rgba.height()
        );
        return Ok(());
    }

    fs::create_dir_all(&cli.out).with_context(|| format!("create out dir {}", cli.out.display()))?;
    let png_path = cli.out.join(&image_name);
    let json_path = cli.out.join(format!("{}.json", cli.name));
    write_outputs(&out.rgba, &png_path, manifest_json.as_bytes(), &json_path)?;
    info!(?png_path, "wrote atlas");
    info!(?json_path, "wrote manifest");
    Ok(())
}

/// Merge CLI flags with the optional YAML file into one `SheetConfig`.
fn resolve_config(cli: &Cli) -> anyhow::Result<SheetConfig> {
    let walk_padding: WalkPadding = cli
        .walk_padding
        .parse()
        .map_err(|_| anyhow::anyhow!("unknown walk padding: {}", cli.walk_padding))?;
    let base = SheetConfig {
        id: cli.id.clone().unwrap_or_default(),
        frame_width: cli.frame_width,
        frame_height: cli.frame_height,
        sheet_columns: cli.cols,
        start_column: cli.start_col,
        walk_frames: cli.walk_frames,
        front_row: cli.front_row,
        back_row: cli.back_row,
        left_row: cli.left_row,
        right_row: cli.right_row,
        static_column: cli.static_col,
        atlas_columns: cli.atlas_cols,
        walk_padding,
    };
    let cfg = if let Some(path) = &cli.config {
        let file = fs::read_to_string(path)
            .with_context(|| format!("read config {}", path.display()))?;
        let y: YamlConfig = serde_yaml::from_str(&file)
            .with_context(|| format!("parse config {}", path.display()))?;
        y.into_sheet_config(base)?
    } else {
        base
    };
    if cfg.id.is_empty() {
        anyhow::bail!("missing frame id: pass --id or set `id` in the config file");
    }
    Ok(cfg)
}

fn load_image(p: &Path) -> anyhow::Result<DynamicImage> {
    let img = ImageReader::open(p)?.with_guessed_format()?.decode()?;
    Ok(img)
}

/// Encode both outputs into temp files inside their target directories, then rename
/// them into place. A failure before the renames leaves no output behind.
fn write_outputs(
    atlas: &RgbaImage,
    png_path: &Path,
    manifest: &[u8],
    json_path: &Path,
) -> anyhow::Result<()> {
    let png_tmp = encode_png_temp(atlas, png_path)?;
    let json_tmp = write_temp(manifest, json_path)?;
    png_tmp
        .persist(png_path)
        .with_context(|| format!("write {}", png_path.display()))?;
    json_tmp
        .persist(json_path)
        .with_context(|| format!("write {}", json_path.display()))?;
    Ok(())
}

fn temp_beside(path: &Path) -> anyhow::Result<NamedTempFile> {
    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    NamedTempFile::new_in(dir).with_context(|| format!("create temp file in {}", dir.display()))
}

fn encode_png_temp(atlas: &RgbaImage, path: &Path) -> anyhow::Result<NamedTempFile> {
    let mut tmp = temp_beside(path)?;
    {
        let mut w = BufWriter::new(tmp.as_file_mut());
        atlas
            .write_to(&mut w, ImageFormat::Png)
            .with_context(|| format!("encode {}", path.display()))?;
        w.flush()?;
    }
    Ok(tmp)
}

fn write_temp(bytes: &[u8], path: &Path) -> anyhow::Result<NamedTempFile> {
    let mut tmp = temp_beside(path)?;
    tmp.write_all(bytes)
        .with_context(|| format!("write {}", path.display()))?;
    tmp.flush()?;
    Ok(tmp)
}

fn init_tracing_with_level(quiet: bool, verbose: u8) {
    let level = if quiet {
        "error".to_string()
    } else {
        match verbose {
            0 => "info".into(),
            1 => "debug".into(),
            _ => "trace".into(),
        }
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(level)
        .with_target(false)
        .try_init();
}

#[derive(Debug, Deserialize, Default)]
struct YamlConfig {
    id: Option<String>,
    frame_width: Option<u32>,
    frame_height: Option<u32>,
    sheet_columns: Option<u32>,
    start_column: Option<u32>,
    walk_frames: Option<u32>,
    front_row: Option<u32>,
    back_row: Option<u32>,
    left_row: Option<u32>,
    right_row: Option<u32>,
    static_column: Option<u32>,
    atlas_columns: Option<u32>,
    walk_padding: Option<String>,
}

impl YamlConfig {
    fn into_sheet_config(self, mut cfg: SheetConfig) -> anyhow::Result<SheetConfig> {
        if let Some(v) = self.id {
            cfg.id = v;
        }
        if let Some(v) = self.frame_width {
            cfg.frame_width = v;
        }
        if let Some(v) = self.frame_height {
            cfg.frame_height = v;
        }
        if let Some(v) = self.sheet_columns {
            cfg.sheet_columns = v;
        }
        if let Some(v) = self.start_column {
            cfg.start_column = v;
        }
        if let Some(v) = self.walk_frames {
            cfg.walk_frames = v;
        }
        if let Some(v) = self.front_row {
            cfg.front_row = v;
        }
        if let Some(v) = self.back_row {
            cfg.back_row = v;
        }
        if let Some(v) = self.left_row {
            cfg.left_row = v;
        }
        if let Some(v) = self.right_row {
            cfg.right_row = v;
        }
        if let Some(v) = self.static_column {
            cfg.static_column = v;
        }
        if let Some(v) = self.atlas_columns {
            cfg.atlas_columns = v;
        }
        if let Some(v) = self.walk_padding {
            cfg.walk_padding = v
                .parse()
                .map_err(|_| anyhow::anyhow!("unknown walk padding: {}", v))?;
        }
        Ok(cfg)
    }
}
