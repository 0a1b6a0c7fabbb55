//! Hours recording, by spreadsheet or one entry at a time

use crate::auth::{Actor, Forbidden, Role};
use crate::import::validate::positive_hours;
use crate::import::{CellValue, FormatError, ImportOutcome, import_hours};
use crate::store::HoursStore;

/// An uploaded file
#[derive(Debug, Clone)]
pub struct Upload {
    pub filename: String,
    pub bytes: Vec<u8>,
}

impl Upload {
    pub fn new(filename: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            filename: filename.into(),
            bytes,
        }
    }
}

/// Why an import did not run at all
#[derive(Debug)]
pub enum ImportError {
    Forbidden(Forbidden),
    ProjectNotFound,
    Format(FormatError),
    Store(anyhow::Error),
}

impl std::fmt::Display for ImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ImportError::Forbidden(err) => write!(f, "{}", err),
            ImportError::ProjectNotFound => write!(f, "Project not found."),
            ImportError::Format(err) => write!(f, "{}", err),
            ImportError::Store(err) => write!(f, "Could not check project: {:#}", err),
        }
    }
}

impl std::error::Error for ImportError {}

impl From<Forbidden> for ImportError {
    fn from(err: Forbidden) -> Self {
        ImportError::Forbidden(err)
    }
}

impl From<FormatError> for ImportError {
    fn from(err: FormatError) -> Self {
        ImportError::Format(err)
    }
}

/// Import an hours spreadsheet into a project on behalf of `actor`
///
/// Checks, in order: admin role, an upload with a file name, the project.
pub async fn import_project_hours<S>(
    store: &S,
    actor: &Actor,
    project_id: i64,
    upload: Option<Upload>,
) -> Result<ImportOutcome, ImportError>
where
    S: HoursStore + ?Sized,
{
    actor.require(Role::Admin)?;

    let upload = match upload {
        Some(upload) if !upload.filename.trim().is_empty() => upload,
        _ => return Err(FormatError::MissingFile.into()),
    };

    if !store
        .project_exists(project_id)
        .await
        .map_err(ImportError::Store)?
    {
        log::warn!("Hours import rejected: project {} does not exist", project_id);
        return Err(ImportError::ProjectNotFound);
    }

    log::info!(
        "User '{}' importing '{}' ({} bytes) into project {}",
        actor.username,
        upload.filename,
        upload.bytes.len(),
        project_id
    );

    Ok(import_hours(store, project_id, &upload.bytes).await?)
}

/// Why a single hours entry was refused
#[derive(Debug)]
pub enum RecordHoursError {
    Forbidden(Forbidden),
    InvalidHours,
    ProjectNotFound,
    UnknownEmployee,
    Store(anyhow::Error),
}

impl std::fmt::Display for RecordHoursError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecordHoursError::Forbidden(err) => write!(f, "{}", err),
            RecordHoursError::InvalidHours => write!(f, "Hours must be a positive number."),
            RecordHoursError::ProjectNotFound => write!(f, "Project not found."),
            RecordHoursError::UnknownEmployee => write!(f, "No such employee SSN."),
            RecordHoursError::Store(err) => write!(f, "Could not record hours: {:#}", err),
        }
    }
}

impl std::error::Error for RecordHoursError {}

impl From<Forbidden> for RecordHoursError {
    fn from(err: Forbidden) -> Self {
        RecordHoursError::Forbidden(err)
    }
}

pub const HOURS_RECORDED: &str = "Hours recorded.";

/// Add hours for one employee on one project, as typed into a form
pub async fn record_hours<S>(
    store: &S,
    actor: &Actor,
    project_id: i64,
    ssn: &str,
    raw_hours: &str,
) -> Result<f64, RecordHoursError>
where
    S: HoursStore + ?Sized,
{
    actor.require(Role::Admin)?;

    let hours = positive_hours(&CellValue::Text(raw_hours.to_string()))
        .ok_or(RecordHoursError::InvalidHours)?;
    let ssn = ssn.trim();

    if !store
        .project_exists(project_id)
        .await
        .map_err(RecordHoursError::Store)?
    {
        log::warn!("Hours entry rejected: project {} does not exist", project_id);
        return Err(RecordHoursError::ProjectNotFound);
    }

    if !store
        .employee_exists(ssn)
        .await
        .map_err(RecordHoursError::Store)?
    {
        log::warn!("Hours entry rejected: no employee with SSN {}", ssn);
        return Err(RecordHoursError::UnknownEmployee);
    }

    store
        .upsert_hours(ssn, project_id, hours)
        .await
        .map_err(RecordHoursError::Store)?;

    log::info!(
        "User '{}' recorded {} hours for {} on project {}",
        actor.username,
        hours,
        ssn,
        project_id
    );

    Ok(hours)
}
