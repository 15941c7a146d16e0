//! The pair table: one row per annotation task.
//!
//! Pairs are loaded once at startup from a CSV file with the header
//! `index,A,B,ground_truth,celeb_id`. File order is the annotation order
//! and is preserved exactly, so traversals are reproducible across runs.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// The two possible identity judgments (and ground truth labels).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Decision {
    Same,
    Different,
}

impl Decision {
    /// Return the decision as the lowercase string stored in the sheet.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Same => "same",
            Self::Different => "different",
        }
    }

    /// Parse a decision from user or table input, case-insensitively.
    pub fn parse(s: &str) -> Result<Self, CoreError> {
        match s.trim().to_ascii_lowercase().as_str() {
            "same" => Ok(Self::Same),
            "different" => Ok(Self::Different),
            other => Err(CoreError::Validation(format!(
                "Invalid decision '{other}'. Must be one of: same, different"
            ))),
        }
    }
}

/// One unit of annotation work: two image identifiers plus the known label.
///
/// Immutable once loaded; the session layer only ever reads these.
#[derive(Debug, Clone, Serialize)]
pub struct Pair {
    pub index: i64,
    pub image_a: String,
    pub image_b: String,
    pub ground_truth: Decision,
    pub celeb_id: String,
}

/// Load the pair table from a CSV file.
///
/// Fails with [`CoreError::DataFormat`] when the file is unreadable, the
/// header misses a required column, a row is short, or a value does not
/// parse. Intended to run once at startup, where any of these is fatal.
pub fn load_pairs(path: impl AsRef<Path>) -> Result<Vec<Pair>, CoreError> {
    let path = path.as_ref();
    let contents = std::fs::read_to_string(path).map_err(|e| {
        CoreError::DataFormat(format!("Could not read {}: {e}", path.display()))
    })?;
    parse_pairs(&contents)
}

/// Parse the pair table from CSV text. See [`load_pairs`].
pub fn parse_pairs(contents: &str) -> Result<Vec<Pair>, CoreError> {
    let mut lines = contents.lines().enumerate();

    let (_, header) = lines
        .next()
        .ok_or_else(|| CoreError::DataFormat("pair table is empty".to_string()))?;
    let columns: Vec<&str> = header.split(',').map(str::trim).collect();

    // Column positions, so reordered tables still load. Extra columns are
    // ignored.
    let find = |name: &str| {
        columns.iter().position(|c| *c == name).ok_or_else(|| {
            CoreError::DataFormat(format!("missing required column '{name}' (header: {header})"))
        })
    };
    let (idx_col, a_col, b_col) = (find("index")?, find("A")?, find("B")?);
    let (truth_col, celeb_col) = (find("ground_truth")?, find("celeb_id")?);

    let mut pairs = Vec::new();
    for (line_no, line) in lines {
        if line.trim().is_empty() {
            continue;
        }
        let fields: Vec<&str> = line.split(',').map(str::trim).collect();
        if fields.len() < columns.len() {
            return Err(CoreError::DataFormat(format!(
                "row {} has {} fields, expected {}",
                line_no + 1,
                fields.len(),
                columns.len()
            )));
        }

        let index: i64 = fields[idx_col].parse().map_err(|_| {
            CoreError::DataFormat(format!(
                "row {}: index '{}' is not an integer",
                line_no + 1,
                fields[idx_col]
            ))
        })?;

        let ground_truth = Decision::parse(fields[truth_col]).map_err(|_| {
            CoreError::DataFormat(format!(
                "row {}: ground_truth '{}' must be 'same' or 'different'",
                line_no + 1,
                fields[truth_col]
            ))
        })?;

        pairs.push(Pair {
            index,
            image_a: fields[a_col].to_string(),
            image_b: fields[b_col].to_string(),
            ground_truth,
            celeb_id: fields[celeb_col].to_string(),
        });
    }

    Ok(pairs)
}
