use crate::foundation::core::Rgba8Premul;
use crate::foundation::error::{ChoroError, ChoroResult};
use crate::scale::color::{ColorDef, ColorScale};
use crate::scale::label::abbreviate;

/// One recognized scale entry: the bucket opened by `threshold`.
#[derive(Debug, Clone, PartialEq)]
pub struct ScaleEntry {
    /// Inclusive lower bound of the bucket.
    pub threshold: f64,
    /// Fill color for values in the bucket.
    pub color: Rgba8Premul,
    /// Legend label for the threshold.
    pub label: String,
}

/// Ordered breakpoints with their colors and labels.
///
/// Invariants (checked at construction): at least one entry, finite thresholds, strictly
/// increasing thresholds.
#[derive(Debug, Clone, PartialEq)]
pub struct BreakpointScale {
    entries: Vec<ScaleEntry>,
}

impl BreakpointScale {
    /// Build from explicit `(threshold, color, label)` triples.
    pub fn new(entries: Vec<ScaleEntry>) -> ChoroResult<Self> {
        if entries.is_empty() {
            return Err(ChoroError::validation(
                "breakpoint scale needs at least one entry",
            ));
        }
        for (i, e) in entries.iter().enumerate() {
            if !e.threshold.is_finite() {
                return Err(ChoroError::validation(format!(
                    "breakpoint {i} threshold must be finite"
                )));
            }
            if i > 0 && e.threshold <= entries[i - 1].threshold {
                return Err(ChoroError::validation(format!(
                    "breakpoint thresholds must be strictly increasing ({} after {})",
                    e.threshold,
                    entries[i - 1].threshold
                )));
            }
        }
        Ok(Self { entries })
    }

    /// Build from thresholds and labels, coloring buckets through [`ColorScale`].
    ///
    /// Missing labels (`None`) are generated with [`abbreviate`].
    pub fn from_palette(
        thresholds: &[f64],
        labels: &[Option<String>],
        palette: Vec<ColorDef>,
    ) -> ChoroResult<Self> {
        if thresholds.len() != labels.len() {
            return Err(ChoroError::validation(format!(
                "thresholds ({}) and labels ({}) must have equal length",
                thresholds.len(),
                labels.len()
            )));
        }
        let colors = ColorScale::new(palette, thresholds.len())?;
        let entries = thresholds
            .iter()
            .zip(labels)
            .enumerate()
            .map(|(i, (&threshold, label))| ScaleEntry {
                threshold,
                color: colors.color_for_bucket(i),
                label: label.clone().unwrap_or_else(|| abbreviate(threshold)),
            })
            .collect();
        Self::new(entries)
    }

    pub fn entries(&self) -> &[ScaleEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn thresholds(&self) -> impl Iterator<Item = f64> + '_ {
        self.entries.iter().map(|e| e.threshold)
    }

    /// Bucket index for `value`: the last threshold `<= value`, or 0 below the first threshold.
    ///
    /// NaN sorts below every threshold here; use [`BreakpointScale::classify_count`] to skip it.
    pub fn classify(&self, value: f64) -> usize {
        let above = self.entries.partition_point(|e| e.threshold <= value);
        above.saturating_sub(1)
    }

    /// Classify an optional count. Missing and NaN counts are not classified.
    pub fn classify_count(&self, value: Option<f64>) -> Option<usize> {
        value.filter(|v| !v.is_nan()).map(|v| self.classify(v))
    }

    /// Color of a bucket; indices past the end clamp to the last bucket.
    pub fn color(&self, bucket: usize) -> Rgba8Premul {
        let i = bucket.min(self.entries.len() - 1);
        self.entries[i].color
    }

    pub fn color_for_value(&self, value: f64) -> Rgba8Premul {
        self.color(self.classify(value))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scale/breakpoints.rs"]
mod tests;
