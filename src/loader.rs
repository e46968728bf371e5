use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::SystemTime;

use log::{debug, info, warn};

use crate::error::{DashboardError, Result};
use crate::models::VideoRecord;

pub const REQUIRED_COLUMNS: [&str; 5] = [
    "video_id",
    "title",
    "views",
    "engajamento_por_1000_views",
    "short_score",
];

pub fn load_table(path: &Path) -> Result<Vec<VideoRecord>> {
    let mut reader = csv::Reader::from_path(path)
        .map_err(|err| DashboardError::data_load(path, err.to_string()))?;

    let headers = reader
        .headers()
        .map_err(|err| DashboardError::data_load(path, err.to_string()))?
        .clone();
    let missing: Vec<&str> = REQUIRED_COLUMNS
        .iter()
        .copied()
        .filter(|column| !headers.iter().any(|header| header == *column))
        .collect();

    if !missing.is_empty() {
        return Err(DashboardError::data_load(
            path,
            format!("missing required column(s): {}", missing.join(", ")),
        ));
    }

    let mut records = Vec::new();
    for (index, result) in reader.deserialize::<VideoRecord>().enumerate() {
        let record = result.map_err(|err| DashboardError::data_load(path, err.to_string()))?;
        validate_record(&record).map_err(|reason| {
            DashboardError::data_load(
                path,
                format!("row {} ({}): {reason}", index + 1, record.video_id),
            )
        })?;
        records.push(record);
    }

    info!("Loaded {} videos from {}", records.len(), path.display());

    if let Some(position) = find_order_violation(&records) {
        warn!(
            "{} is not sorted by short_score descending: row {} ({:.2}) exceeds row {} ({:.2}); top rows are shown as-is",
            path.display(),
            position + 1,
            records[position].short_score,
            position,
            records[position - 1].short_score
        );
    }

    Ok(records)
}

fn validate_record(record: &VideoRecord) -> std::result::Result<(), String> {
    let engagement = record.engagement_per_1000_views;
    if !engagement.is_finite() || engagement < 0.0 {
        return Err(format!(
            "engajamento_por_1000_views must be a non-negative number, got {engagement}"
        ));
    }
    if !record.short_score.is_finite() {
        return Err(format!(
            "short_score must be a finite number, got {}",
            record.short_score
        ));
    }
    Ok(())
}

/// Index of the first record whose score is higher than the one before it.
pub fn find_order_violation(records: &[VideoRecord]) -> Option<usize> {
    records
        .windows(2)
        .position(|pair| pair[1].short_score > pair[0].short_score)
        .map(|position| position + 1)
}

struct CachedTable {
    path: PathBuf,
    modified: SystemTime,
    records: Arc<Vec<VideoRecord>>,
}

/// Single-entry cache of the loaded table, keyed on path and modification time.
#[derive(Default)]
pub struct TableCache {
    entry: Mutex<Option<CachedTable>>,
}

impl TableCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, path: &Path) -> Result<Arc<Vec<VideoRecord>>> {
        let modified = std::fs::metadata(path)
            .and_then(|metadata| metadata.modified())
            .map_err(|err| DashboardError::data_load(path, err.to_string()))?;

        if let Some(records) = self.lookup(path, modified) {
            debug!("Serving cached table for {}", path.display());
            return Ok(records);
        }

        // The lock is not held while the file is parsed.
        info!("Loading {} into the table cache", path.display());
        let records = Arc::new(load_table(path)?);

        let mut entry = self.entry.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        if let Some(cached) = entry.as_ref() {
            if cached.path == path && cached.modified == modified {
                return Ok(Arc::clone(&cached.records));
            }
        }
        *entry = Some(CachedTable {
            path: path.to_path_buf(),
            modified,
            records: Arc::clone(&records),
        });

        Ok(records)
    }

    fn lookup(&self, path: &Path, modified: SystemTime) -> Option<Arc<Vec<VideoRecord>>> {
        let entry = self.entry.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        entry
            .as_ref()
            .filter(|cached| cached.path == path && cached.modified == modified)
            .map(|cached| Arc::clone(&cached.records))
    }

    pub fn invalidate(&self) {
        let mut entry = self.entry.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        *entry = None;
    }
}
