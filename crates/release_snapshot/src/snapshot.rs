use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::SnapshotError;
use crate::record::NormalizedRecord;

/// Release-date key to records, keys ascending.
pub type GroupedOutput = BTreeMap<String, Vec<NormalizedRecord>>;

#[derive(Debug, Clone, Default)]
pub struct WriteSummary {
    pub files: Vec<PathBuf>,
    pub records: usize,
}

/// Stable partition of `records` by their own `release_date`.
pub fn group_by_release_date(records: Vec<NormalizedRecord>) -> GroupedOutput {
    let mut groups = GroupedOutput::new();
    for record in records {
        groups
            .entry(record.release_date.clone())
            .or_default()
            .push(record);
    }
    groups
}

/// Write one pretty-printed JSON array per date into `output_dir`, overwriting existing files.
///
/// Each file is replaced atomically, but the set is not: a failure leaves earlier dates written.
pub fn write_groups(
    output_dir: &Path,
    groups: &GroupedOutput,
) -> Result<WriteSummary, SnapshotError> {
    fs::create_dir_all(output_dir).map_err(|err| SnapshotError::write(output_dir, err))?;

    let mut summary = WriteSummary::default();
    for (date, records) in groups {
        let path = output_dir.join(format!("{date}.json"));
        info!(date = %date, records = records.len(), "Writing release file");
        write_json_file(&path, records)?;
        summary.records += records.len();
        summary.files.push(path);
    }
    Ok(summary)
}

fn write_json_file(path: &Path, records: &[NormalizedRecord]) -> Result<(), SnapshotError> {
    let serialized = serde_json::to_string_pretty(records)?;
    let temp_path = build_temp_path(path);
    fs::write(&temp_path, format!("{serialized}\n"))
        .map_err(|err| SnapshotError::write(&temp_path, err))?;
    fs::rename(&temp_path, path).map_err(|err| SnapshotError::write(path, err))?;
    Ok(())
}

fn build_temp_path(path: &Path) -> PathBuf {
    let mut temp_path = path.to_path_buf();
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) if !ext.is_empty() => {
            temp_path.set_extension(format!("{ext}.tmp"));
        }
        _ => {
            temp_path.set_extension("tmp");
        }
    }
    temp_path
}
