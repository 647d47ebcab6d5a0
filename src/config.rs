use anyhow::{anyhow, Context, Result};
use clap::Parser;
use std::path::PathBuf;

use crate::assistant::GeminiConfig;
use crate::scene::GlobeConfig;

#[derive(Parser, Debug)]
#[command(author, version, about = "Summarize and translate academic texts, with a globe preview")]
pub struct Args {
    /// Plain-text or Markdown document to open
    pub document: Option<PathBuf>,

    /// GeoJSON land polygons (e.g. Natural Earth ne_50m_land)
    #[arg(long, env = "AURA_LAND", default_value = "data/ne_50m_land.json")]
    pub land: PathBuf,

    /// Ocean sphere radius in scene units
    #[arg(long, default_value_t = 1.0)]
    pub radius: f64,

    /// Continent color
    #[arg(long, default_value = "rgb(100, 180, 100)")]
    pub land_color: String,

    /// Grid samples per axis for the ocean sphere
    #[arg(long, default_value_t = 50)]
    pub sphere_resolution: usize,

    /// Marker position as LON,LAT (repeatable)
    #[arg(long = "marker", value_parser = parse_lonlat, allow_hyphen_values = true)]
    pub markers: Vec<(f64, f64)>,

    /// Generative model name
    #[arg(long, env = "AURA_MODEL", default_value = "gemini-2.5-flash")]
    pub model: String,

    /// API key for the hosted model
    #[arg(long, env = "GOOGLE_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Directory downloads are written to
    #[arg(long, default_value = ".")]
    pub out_dir: PathBuf,

    /// Write the globe scene as Plotly figure JSON and exit
    #[arg(long)]
    pub export_scene: Option<PathBuf>,

    /// Log file used while the terminal UI is running
    #[arg(long, default_value = "aura.log")]
    pub log_file: PathBuf,
}

/// Parse `LON,LAT` in degrees.
pub fn parse_lonlat(s: &str) -> Result<(f64, f64)> {
    let (lon, lat) = s
        .split_once(',')
        .ok_or_else(|| anyhow!("expected LON,LAT, got {s:?}"))?;
    let lon: f64 = lon.trim().parse().with_context(|| format!("bad longitude in {s:?}"))?;
    let lat: f64 = lat.trim().parse().with_context(|| format!("bad latitude in {s:?}"))?;
    if !(-180.0..=180.0).contains(&lon) || !(-90.0..=90.0).contains(&lat) {
        return Err(anyhow!("{s:?} is outside lon [-180, 180] / lat [-90, 90]"));
    }
    Ok((lon, lat))
}

impl Args {
    pub fn globe_config(&self) -> GlobeConfig {
        GlobeConfig {
            land_path: self.land.clone(),
            radius: self.radius,
            land_color: self.land_color.clone(),
            sphere_resolution: self.sphere_resolution,
        }
    }

    /// Model settings, if an API key is configured.
    pub fn gemini_config(&self) -> Option<GeminiConfig> {
        let key = self.api_key.as_deref()?.trim();
        (!key.is_empty()).then(|| GeminiConfig::new(key, self.model.clone()))
    }

    /// Marker longitudes and latitudes as parallel columns.
    pub fn marker_columns(&self) -> (Vec<f64>, Vec<f64>) {
        self.markers.iter().copied().unzip()
    }
}
