use serde::Deserialize;
use tracing::{info, warn};

use crate::domain::NewRecycler;
use crate::error::{AppError, AppResult};
use crate::infrastructure::repositories::RecyclerRepository;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ImportSummary {
    pub inserted: usize,
    pub skipped: usize,
}

/// Accepts either a bare JSON array of facilities or `{"recyclers": [...]}`.
#[derive(Deserialize)]
#[serde(untagged)]
enum ImportDocument {
    List(Vec<NewRecycler>),
    Wrapped { recyclers: Vec<NewRecycler> },
}

pub fn parse_import_document(raw: &str) -> AppResult<Vec<NewRecycler>> {
    let document: ImportDocument = serde_json::from_str(raw)
        .map_err(|e| AppError::BadRequest(format!("invalid recycler import file: {e}")))?;

    Ok(match document {
        ImportDocument::List(records) | ImportDocument::Wrapped { recyclers: records } => records,
    })
}

/// Keeps the records that pass validation; the rest are logged and counted.
fn valid_records(records: Vec<NewRecycler>) -> (Vec<NewRecycler>, usize) {
    let mut skipped = 0;
    let valid = records
        .into_iter()
        .enumerate()
        .filter_map(|(index, record)| match record.validate() {
            Ok(()) => Some(record),
            Err(error) => {
                warn!(index, name = %record.name, error = %error, "skipping invalid recycler record");
                skipped += 1;
                None
            }
        })
        .collect();
    (valid, skipped)
}

/// Validation-only pass for `--dry-run`; touches no storage.
pub fn check_import(records: Vec<NewRecycler>) -> ImportSummary {
    let (valid, skipped) = valid_records(records);
    for record in &valid {
        info!(name = %record.name, "record is valid (dry run)");
    }
    ImportSummary {
        inserted: valid.len(),
        skipped,
    }
}

/// Inserts every valid record. Invalid records are logged and skipped;
/// storage failures abort the run.
pub async fn import_recyclers(
    repo: &dyn RecyclerRepository,
    records: Vec<NewRecycler>,
) -> AppResult<ImportSummary> {
    let (valid, skipped) = valid_records(records);
    let mut summary = ImportSummary {
        inserted: 0,
        skipped,
    };

    for record in valid {
        let created = repo.create(&record).await?;
        info!(
            recycler_id = created.id,
            name = %created.name,
            accepted_items = created.accepted_items.len(),
            "recycler imported"
        );
        summary.inserted += 1;
    }

    Ok(summary)
}
