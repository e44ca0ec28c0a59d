use serde::{Deserialize, Serialize};

use crate::scale::color::ColorDef;

/// Colors, stroke widths and text sizes of the map and its chrome.
///
/// Defaults reproduce the classic world-infections look: white figure, light-blue ocean,
/// white land with thin dark coastlines, white borders around filled countries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapStyle {
    pub background: ColorDef,
    pub ocean: ColorDef,
    pub land: ColorDef,
    pub coastline: ColorDef,
    pub coastline_width_px: f64,
    pub region_border: ColorDef,
    pub region_border_width_px: f64,
    pub text_color: ColorDef,
    pub title: String,
    pub title_size_px: f32,
    pub caption_size_px: f32,
    /// Caption anchor as a fraction of the map rect, from its bottom-left corner.
    pub caption_at: [f64; 2],
    pub legend_label_size_px: f32,
    /// Empty border around the map viewport.
    pub margin_px: f64,
}

impl Default for MapStyle {
    fn default() -> Self {
        let white = ColorDef::rgba(1.0, 1.0, 1.0, 1.0);
        let black = ColorDef::rgba(0.0, 0.0, 0.0, 1.0);
        Self {
            background: white,
            ocean: ColorDef::rgba(135.0 / 255.0, 206.0 / 255.0, 250.0 / 255.0, 1.0),
            land: white,
            coastline: black,
            coastline_width_px: 0.5,
            region_border: white,
            region_border_width_px: 0.5,
            text_color: black,
            title: "COVID-19 INFECTIONS WORLDWIDE".to_string(),
            title_size_px: 18.0,
            caption_size_px: 20.0,
            caption_at: [0.4, 0.1],
            legend_label_size_px: 10.0,
            margin_px: 20.0,
        }
    }
}
