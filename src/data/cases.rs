use std::collections::{HashMap, HashSet};
use std::fs::File;
use std::io::Read;
use std::path::Path;

use anyhow::Context as _;

use crate::foundation::error::{ChoroError, ChoroResult};

/// Cumulative counts per region code and date.
///
/// Dates keep their column order from the source table; that order drives the animation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CaseTable {
    dates: Vec<String>,
    rows: HashMap<String, Vec<Option<f64>>>,
}

impl CaseTable {
    /// Load a CSV table with one `code_column` and one column per date.
    #[tracing::instrument]
    pub fn from_path(path: &Path, code_column: &str) -> ChoroResult<Self> {
        let file = File::open(path)
            .with_context(|| format!("failed to open case table '{}'", path.display()))?;
        let table = Self::from_reader(file, code_column)?;
        tracing::info!(
            regions = table.rows.len(),
            dates = table.dates.len(),
            "loaded case table"
        );
        Ok(table)
    }

    pub fn from_reader<R: Read>(reader: R, code_column: &str) -> ChoroResult<Self> {
        let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
        let headers = rdr
            .headers()
            .map_err(|e| ChoroError::input(format!("failed to read case table header: {e}")))?
            .clone();

        let code_idx = headers
            .iter()
            .position(|h| h == code_column)
            .ok_or_else(|| {
                ChoroError::input(format!("code column '{code_column}' not found in case table"))
            })?;

        let date_cols: Vec<usize> = (0..headers.len()).filter(|&i| i != code_idx).collect();
        let dates: Vec<String> = date_cols.iter().map(|&i| headers[i].to_string()).collect();
        let mut seen = HashSet::with_capacity(dates.len());
        if let Some(date) = dates.iter().find(|d| !seen.insert(d.as_str())) {
            return Err(ChoroError::input(format!(
                "duplicate date column '{date}' in case table"
            )));
        }

        let mut rows = HashMap::new();
        for (row_no, result) in rdr.records().enumerate() {
            let record = result.map_err(|e| {
                ChoroError::input(format!("malformed case table row {}: {e}", row_no + 1))
            })?;

            let code = record.get(code_idx).unwrap_or("").to_string();
            if code.is_empty() {
                continue;
            }

            let mut counts = Vec::with_capacity(date_cols.len());
            for (&col, date) in date_cols.iter().zip(&dates) {
                let cell = record.get(col).unwrap_or("");
                counts.push(parse_count(cell).map_err(|_| {
                    ChoroError::input(format!(
                        "invalid count '{cell}' for region '{code}' on '{date}'"
                    ))
                })?);
            }

            if rows.insert(code.clone(), counts).is_some() {
                return Err(ChoroError::input(format!(
                    "duplicate region code '{code}' in case table"
                )));
            }
        }

        Ok(Self { dates, rows })
    }

    /// Build a table from in-memory series: `(code, [(date, count)])`.
    ///
    /// Dates are ordered by first appearance; a region without an entry for a date has no count.
    pub fn from_series<I, S, D>(series: I) -> Self
    where
        I: IntoIterator<Item = (S, Vec<(D, f64)>)>,
        S: Into<String>,
        D: Into<String>,
    {
        let mut dates: Vec<String> = Vec::new();
        let mut by_region: Vec<(String, Vec<(usize, f64)>)> = Vec::new();
        for (code, points) in series {
            let mut idxs = Vec::with_capacity(points.len());
            for (date, count) in points {
                let date = date.into();
                let idx = match dates.iter().position(|d| *d == date) {
                    Some(i) => i,
                    None => {
                        dates.push(date);
                        dates.len() - 1
                    }
                };
                idxs.push((idx, count));
            }
            by_region.push((code.into(), idxs));
        }

        let rows = by_region
            .into_iter()
            .map(|(code, points)| {
                let mut counts = vec![None; dates.len()];
                for (i, c) in points {
                    counts[i] = Some(c);
                }
                (code, counts)
            })
            .collect();
        Self { dates, rows }
    }

    pub fn dates(&self) -> &[String] {
        &self.dates
    }

    pub fn date_index(&self, date: &str) -> Option<usize> {
        self.dates.iter().position(|d| d == date)
    }

    pub fn contains(&self, code: &str) -> bool {
        self.rows.contains_key(code)
    }

    pub fn region_count(&self) -> usize {
        self.rows.len()
    }

    /// Count for `code` at date column `date_idx`; `None` when the region or the value is missing.
    pub fn count(&self, code: &str, date_idx: usize) -> Option<f64> {
        self.rows.get(code)?.get(date_idx).copied().flatten()
    }

    pub fn count_on(&self, code: &str, date: &str) -> Option<f64> {
        self.count(code, self.date_index(date)?)
    }
}

fn parse_count(cell: &str) -> Result<Option<f64>, std::num::ParseFloatError> {
    if cell.is_empty() || cell.eq_ignore_ascii_case("nan") {
        return Ok(None);
    }
    let v: f64 = cell.parse()?;
    Ok((!v.is_nan()).then_some(v))
}

#[cfg(test)]
#[path = "../../tests/unit/data/cases.rs"]
mod tests;
