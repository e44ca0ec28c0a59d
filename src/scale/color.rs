use crate::foundation::core::Rgba8Premul;
use crate::foundation::error::{ChoroError, ChoroResult};
use crate::foundation::math::lerp;
use serde::{Deserialize, Serialize};

/// Straight-alpha color with channels in `0.0..=1.0`.
///
/// Deserializes from `"#RRGGBB"`, `"#RRGGBBAA"`, `{r,g,b[,a]}` or `[r,g,b(,a)]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ColorDef {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

impl ColorDef {
    pub fn rgba(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }

    pub fn rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::rgba(
            f64::from(r) / 255.0,
            f64::from(g) / 255.0,
            f64::from(b) / 255.0,
            1.0,
        )
    }

    /// Straight-alpha RGBA8, rounded.
    pub fn to_rgba8_straight(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a].map(|c| (c.clamp(0.0, 1.0) * 255.0).round() as u8)
    }

    /// Parse a `#RRGGBB` / `#RRGGBBAA` hex string.
    pub fn hex(s: &str) -> ChoroResult<Self> {
        parse_hex(s).map_err(ChoroError::validation)
    }

    pub fn to_rgba8_premul(self) -> Rgba8Premul {
        fn to_u8(x: f64) -> u8 {
            (x.clamp(0.0, 1.0) * 255.0).round() as u8
        }

        let a = self.a.clamp(0.0, 1.0);
        let r = (self.r.clamp(0.0, 1.0) * a).clamp(0.0, 1.0);
        let g = (self.g.clamp(0.0, 1.0) * a).clamp(0.0, 1.0);
        let b = (self.b.clamp(0.0, 1.0) * a).clamp(0.0, 1.0);

        Rgba8Premul {
            r: to_u8(r),
            g: to_u8(g),
            b: to_u8(b),
            a: to_u8(a),
        }
    }

    fn mix(self, other: Self, t: f64) -> Self {
        Self {
            r: lerp(self.r, other.r, t),
            g: lerp(self.g, other.g, t),
            b: lerp(self.b, other.b, t),
            a: lerp(self.a, other.a, t),
        }
    }
}

impl<'de> Deserialize<'de> for ColorDef {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Hex(String),
            RgbaObj {
                r: f64,
                g: f64,
                b: f64,
                #[serde(default = "one")]
                a: f64,
            },
            Arr(Vec<f64>),
        }

        fn one() -> f64 {
            1.0
        }

        match Repr::deserialize(deserializer)? {
            Repr::Hex(s) => parse_hex(&s).map_err(serde::de::Error::custom),
            Repr::RgbaObj { r, g, b, a } => Ok(Self::rgba(r, g, b, a)),
            Repr::Arr(v) => {
                if v.len() == 3 {
                    Ok(Self::rgba(v[0], v[1], v[2], 1.0))
                } else if v.len() == 4 {
                    Ok(Self::rgba(v[0], v[1], v[2], v[3]))
                } else {
                    Err(serde::de::Error::custom(
                        "rgba array must have len 3 ([r,g,b]) or 4 ([r,g,b,a])",
                    ))
                }
            }
        }
    }
}

fn parse_hex(s: &str) -> Result<ColorDef, String> {
    let s = s.trim();
    let s = s.strip_prefix('#').unwrap_or(s);
    if !s.is_ascii() {
        return Err("hex color must be #RRGGBB or #RRGGBBAA (case-insensitive)".to_owned());
    }

    fn hex_byte(pair: &str) -> Result<u8, String> {
        u8::from_str_radix(pair, 16).map_err(|_| format!("invalid hex byte \"{pair}\""))
    }

    let (r, g, b, a) = match s.len() {
        6 => (
            hex_byte(&s[0..2])?,
            hex_byte(&s[2..4])?,
            hex_byte(&s[4..6])?,
            255,
        ),
        8 => (
            hex_byte(&s[0..2])?,
            hex_byte(&s[2..4])?,
            hex_byte(&s[4..6])?,
            hex_byte(&s[6..8])?,
        ),
        _ => {
            return Err("hex color must be #RRGGBB or #RRGGBBAA (case-insensitive)".to_owned());
        }
    };

    Ok(ColorDef::rgba(
        (r as f64) / 255.0,
        (g as f64) / 255.0,
        (b as f64) / 255.0,
        (a as f64) / 255.0,
    ))
}

/// Maps bucket indices to colors by sampling a palette at evenly spaced anchors.
///
/// Bucket `i` of `n` is normalized to `t = i / (n - 1)` and the palette is treated as a
/// piecewise-linear gradient over `[0, 1]`. A palette with exactly `n - 1` colors is read as one
/// color per interval between thresholds: bucket `i` gets color `i` and the open-ended top
/// bucket repeats the last color. The mapping holds no state beyond its construction inputs, so
/// the same bucket always yields the same color.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorScale {
    palette: Vec<ColorDef>,
    buckets: usize,
}

impl ColorScale {
    pub fn new(palette: Vec<ColorDef>, buckets: usize) -> ChoroResult<Self> {
        if palette.is_empty() {
            return Err(ChoroError::validation("color palette must not be empty"));
        }
        if buckets == 0 {
            return Err(ChoroError::validation("color scale needs at least one bucket"));
        }
        Ok(Self { palette, buckets })
    }

    pub fn buckets(&self) -> usize {
        self.buckets
    }

    pub fn palette(&self) -> &[ColorDef] {
        &self.palette
    }

    /// Normalized position of a bucket in `[0, 1]`. Out-of-range indices clamp to the last bucket.
    pub fn normalize(&self, bucket: usize) -> f64 {
        if self.buckets == 1 {
            return 0.0;
        }
        // one color per interval; the last bucket has no upper bound
        let intervals = self.buckets - 1;
        if self.palette.len() == intervals {
            if intervals == 1 {
                return 0.0;
            }
            let i = bucket.min(intervals - 1);
            return (i as f64) / ((intervals - 1) as f64);
        }
        let i = bucket.min(self.buckets - 1);
        (i as f64) / ((self.buckets - 1) as f64)
    }

    /// Straight-alpha color at normalized position `t` (clamped to `[0, 1]`).
    pub fn sample(&self, t: f64) -> ColorDef {
        let last = self.palette.len() - 1;
        if last == 0 {
            return self.palette[0];
        }
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        let pos = t * (last as f64);
        let lo = (pos.floor() as usize).min(last);
        let hi = (lo + 1).min(last);
        self.palette[lo].mix(self.palette[hi], pos - lo as f64)
    }

    pub fn color_for_bucket(&self, bucket: usize) -> Rgba8Premul {
        self.sample(self.normalize(bucket)).to_rgba8_premul()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scale/color.rs"]
mod tests;
