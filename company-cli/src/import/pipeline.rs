//! Hours import: read, validate, check references, upsert, aggregate
//!
//! Rows are processed strictly in sheet order, one store call at a time. A
//! failing row is recorded and skipped; it never stops the rows after it.

use crate::store::HoursStore;

use super::outcome::{ImportOutcome, RowError, RowErrorKind};
use super::reader::{FormatError, ImportRow, WorkbookRows};
use super::validate::validate_row;

/// Import hours for `project_id` from the bytes of an `.xlsx` upload
///
/// The caller has already checked that the project exists and that the
/// actor may import. A [`FormatError`] means no row was touched.
pub async fn import_hours<S>(store: &S, project_id: i64, bytes: &[u8]) -> Result<ImportOutcome, FormatError>
where
    S: HoursStore + ?Sized,
{
    let rows = WorkbookRows::from_bytes(bytes).map_err(|err| {
        log::warn!("Rejected hours upload for project {}: {:?}", project_id, err);
        err
    })?;

    Ok(import_rows(store, project_id, rows).await)
}

/// Run every row through validation and the store
pub async fn import_rows<S, I>(store: &S, project_id: i64, rows: I) -> ImportOutcome
where
    S: HoursStore + ?Sized,
    I: IntoIterator<Item = ImportRow>,
{
    log::info!("Importing hours into project {}", project_id);

    let mut success_count = 0;
    let mut errors = Vec::new();

    for row in rows {
        match import_row(store, project_id, &row).await {
            Ok(()) => success_count += 1,
            Err(kind) => {
                log::debug!("Row {} skipped: {}", row.row_index, kind);
                errors.push(RowError::new(row.row_index, kind));
            }
        }
    }

    log::info!(
        "Project {} import finished: {} imported, {} skipped",
        project_id,
        success_count,
        errors.len()
    );

    ImportOutcome::new(success_count, errors)
}

async fn import_row<S>(store: &S, project_id: i64, row: &ImportRow) -> Result<(), RowErrorKind>
where
    S: HoursStore + ?Sized,
{
    let assignment = validate_row(row, project_id)?;
    let ssn = assignment.employee_ssn.as_str();

    let known = store.employee_exists(ssn).await.map_err(|err| {
        log::warn!("Row {}: employee lookup failed: {:#}", row.row_index, err);
        store_error(&err)
    })?;
    if !known {
        return Err(RowErrorKind::UnknownEmployee { ssn: ssn.to_string() });
    }

    store
        .upsert_hours(ssn, assignment.project_id, assignment.hours)
        .await
        .map_err(|err| {
            log::warn!("Row {}: upsert failed: {:#}", row.row_index, err);
            store_error(&err)
        })
}

fn store_error(err: &anyhow::Error) -> RowErrorKind {
    RowErrorKind::StoreError {
        detail: format!("{:#}", err),
    }
}
