//! TOML configuration. Every key is optional; the defaults draw the classic world COVID-19
//! infections animation from `covid_world.csv` and `world_map/world_borders.shp`.

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use serde::{Deserialize, Serialize};

use crate::encode::ffmpeg::{DEFAULT_BITRATE_KBPS, FfmpegSinkOpts};
use crate::foundation::core::{Canvas, Fps};
use crate::foundation::error::{ChoroError, ChoroResult};
use crate::map::projection::LonLatWindow;
use crate::render::frame::RenderOpts;
use crate::render::style::MapStyle;
use crate::render::surface::OverlayPolicy;
use crate::scale::breakpoints::BreakpointScale;
use crate::scale::color::ColorDef;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub input: InputConfig,
    pub output: OutputConfig,
    pub map: LonLatWindow,
    pub scale: ScaleConfig,
    pub style: MapStyle,
    /// TTF/OTF file for all text. Unset: a system sans-serif face.
    pub font: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct InputConfig {
    pub cases: PathBuf,
    pub code_column: String,
    /// `.shp` shapefile or `.json`/`.geojson` FeatureCollection.
    pub boundaries: PathBuf,
    pub id_field: String,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            cases: PathBuf::from("covid_world.csv"),
            code_column: "codes".to_string(),
            boundaries: PathBuf::from("world_map/world_borders.shp"),
            id_field: "ISO3".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    pub path: PathBuf,
    pub width: u32,
    pub height: u32,
    pub fps: u32,
    pub bitrate_kbps: u32,
    pub overwrite: bool,
    pub artist: Option<String>,
    pub overlay_policy: OverlayPolicy,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("covid_animation.mp4"),
            width: 1300,
            height: 900,
            fps: 10,
            bitrate_kbps: DEFAULT_BITRATE_KBPS,
            overwrite: true,
            artist: Some("Me".to_string()),
            overlay_policy: OverlayPolicy::Replace,
        }
    }
}

/// One threshold of the scale. Without `label` the threshold is abbreviated ("5 K");
/// without `color` it is sampled from the palette.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScaleEntryConfig {
    pub threshold: f64,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub color: Option<ColorDef>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScaleConfig {
    pub palette: Vec<ColorDef>,
    pub entries: Vec<ScaleEntryConfig>,
}

const DEFAULT_PALETTE: [(u8, u8, u8); 15] = [
    (0xFF, 0xE5, 0xE5),
    (0xFF, 0xCC, 0xCC),
    (0xFF, 0xC1, 0xC1),
    (0xFF, 0x6A, 0x6A),
    (0xFF, 0x66, 0x66),
    (0xFF, 0x40, 0x40),
    (0xFF, 0x33, 0x33),
    (0xFF, 0x30, 0x30),
    (0xFF, 0x00, 0x00),
    (0xEE, 0x00, 0x00),
    (0xCD, 0x00, 0x00),
    (0x8B, 0x00, 0x00),
    (0x80, 0x00, 0x00),
    (0x66, 0x00, 0x00),
    (0x33, 0x00, 0x00),
];

const DEFAULT_ENTRIES: [(f64, &str); 16] = [
    (1.0, "1"),
    (20.0, "20"),
    (100.0, "100"),
    (500.0, "500"),
    (1_000.0, "1 K"),
    (5_000.0, "5 K"),
    (10_000.0, "10 K"),
    (30_000.0, "30 K"),
    (50_000.0, "50 K"),
    (75_000.0, "75 K"),
    (100_000.0, "1 L"),
    (2_500_000.0, "2.5 M"),
    (5_000_000.0, "5 M"),
    (7_500_000.0, "7.5 M"),
    (10_000_000.0, "10 M"),
    (30_000_000.0, "30 M"),
];

impl Default for ScaleConfig {
    fn default() -> Self {
        Self {
            palette: DEFAULT_PALETTE
                .iter()
                .map(|&(r, g, b)| ColorDef::rgb8(r, g, b))
                .collect(),
            entries: DEFAULT_ENTRIES
                .iter()
                .map(|&(threshold, label)| ScaleEntryConfig {
                    threshold,
                    label: Some(label.to_string()),
                    color: None,
                })
                .collect(),
        }
    }
}

impl ScaleConfig {
    /// Validated breakpoint scale; per-entry colors override the palette sample.
    pub fn build(&self) -> ChoroResult<BreakpointScale> {
        let thresholds: Vec<f64> = self.entries.iter().map(|e| e.threshold).collect();
        let labels: Vec<Option<String>> = self.entries.iter().map(|e| e.label.clone()).collect();
        let sampled = BreakpointScale::from_palette(&thresholds, &labels, self.palette.clone())?;

        let mut entries = sampled.entries().to_vec();
        for (entry, cfg) in entries.iter_mut().zip(&self.entries) {
            if let Some(c) = cfg.color {
                entry.color = c.to_rgba8_premul();
            }
        }
        BreakpointScale::new(entries)
    }
}

impl AppConfig {
    /// Read, parse and validate a TOML file.
    pub fn load_from_file(path: &Path) -> ChoroResult<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file '{}'", path.display()))?;
        let cfg = Self::from_toml_str(&content)?;
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(cfg)
    }

    pub fn from_toml_str(s: &str) -> ChoroResult<Self> {
        let cfg: Self =
            toml::from_str(s).map_err(|e| ChoroError::validation(format!("invalid config: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// `path` when given, otherwise the built-in defaults.
    pub fn load_or_default(path: Option<&Path>) -> ChoroResult<Self> {
        match path {
            Some(p) => Self::load_from_file(p),
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> ChoroResult<()> {
        let out = &self.output;
        if out.width == 0 || out.height == 0 {
            return Err(ChoroError::validation("output width/height must be non-zero"));
        }
        if out.fps == 0 {
            return Err(ChoroError::validation("output fps must be non-zero"));
        }
        if out.bitrate_kbps == 0 {
            return Err(ChoroError::validation("output bitrate_kbps must be non-zero"));
        }
        if self.input.code_column.is_empty() || self.input.id_field.is_empty() {
            return Err(ChoroError::validation(
                "input code_column and id_field must be non-empty",
            ));
        }
        self.map.validate()?;
        self.scale.build()?;
        Ok(())
    }

    pub fn canvas(&self) -> Canvas {
        Canvas {
            width: self.output.width,
            height: self.output.height,
        }
    }

    pub fn fps(&self) -> ChoroResult<Fps> {
        Fps::new(self.output.fps, 1)
    }

    pub fn render_opts(&self) -> RenderOpts {
        RenderOpts {
            canvas: self.canvas(),
            window: self.map,
            style: self.style.clone(),
            overlay_policy: self.output.overlay_policy,
        }
    }

    pub fn ffmpeg_opts(&self) -> FfmpegSinkOpts {
        let mut opts = FfmpegSinkOpts::new(&self.output.path);
        opts.overwrite = self.output.overwrite;
        opts.bg_rgba = self.style.background.to_rgba8_straight();
        opts.bitrate_kbps = self.output.bitrate_kbps;
        opts.artist = self.output.artist.clone();
        opts
    }
}
