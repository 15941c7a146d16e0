//! The single accessor handlers use to reach the annotation store.
//!
//! Backends are one enum so the API layer, tests, and dry runs all go
//! through the same surface. No batching and no retry in any backend: one
//! append call is one row, and a failure is the caller's to surface.

use std::collections::HashSet;
use std::sync::Mutex;

use serde_json::Value;

use facepair_core::record::AnnotationRecord;

use crate::client::SheetsClient;
use crate::error::SheetsError;

/// Where finished annotation records go.
pub enum SheetWriter {
    /// The shared Google spreadsheet (production).
    Google(SheetsClient),
    /// An in-process row buffer, for tests and local dry runs.
    Memory(MemorySheet),
    /// No spreadsheet configured: appends fail, resume finds nothing.
    Disabled,
}

impl SheetWriter {
    /// Append one finished record as a new row. Exactly one round trip; on
    /// failure the caller must not advance the session.
    pub async fn append(&self, record: &AnnotationRecord) -> Result<(), SheetsError> {
        match self {
            Self::Google(client) => client.append_row(record.to_row()).await,
            Self::Memory(sheet) => {
                sheet.push(record.to_row());
                Ok(())
            }
            Self::Disabled => Err(SheetsError::NotConfigured),
        }
    }

    /// Pair indices already submitted by `annotator_id`, for session
    /// resume. Rows with missing or malformed fields are skipped.
    pub async fn completed_pairs(&self, annotator_id: &str) -> Result<Vec<i64>, SheetsError> {
        let rows = match self {
            Self::Google(client) => client.data_rows().await?,
            Self::Memory(sheet) => sheet.rows(),
            Self::Disabled => return Ok(Vec::new()),
        };
        Ok(completed_from_rows(&rows, annotator_id))
    }
}

/// Extract completed pair indices from raw sheet rows.
///
/// Column 1 is `annotator_id`, column 2 is `pair_index` (see
/// `facepair_core::record::SHEET_HEADER`). The Sheets API returns numbers
/// as strings under some formats, so both forms are accepted.
fn completed_from_rows(rows: &[Vec<Value>], annotator_id: &str) -> Vec<i64> {
    let mut seen = HashSet::new();
    let mut completed = Vec::new();
    for row in rows {
        let matches_annotator = row.get(1).and_then(Value::as_str) == Some(annotator_id);
        if !matches_annotator {
            continue;
        }
        let index = row.get(2).and_then(|v| match v {
            Value::Number(n) => n.as_i64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        });
        if let Some(index) = index {
            if seen.insert(index) {
                completed.push(index);
            }
        }
    }
    completed
}

/// In-process sheet: a thread-safe buffer of appended rows.
#[derive(Default)]
pub struct MemorySheet {
    rows: Mutex<Vec<Vec<Value>>>,
}

impl MemorySheet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, row: Vec<Value>) {
        self.rows.lock().unwrap().push(row);
    }

    pub fn rows(&self) -> Vec<Vec<Value>> {
        self.rows.lock().unwrap().clone()
    }

    pub fn len(&self) -> usize {
        self.rows.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
