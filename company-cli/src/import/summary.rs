//! User-facing messages for a finished import

use super::outcome::ImportOutcome;

/// How many row errors are listed before the rest are counted
pub const DEFAULT_ERROR_PREVIEW: usize = 5;

/// Messages shown after an import
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportSummary {
    /// "Imported N row(s) into project P.", when anything was imported
    pub imported: Option<String>,
    /// "Some rows were skipped: ...", when any row failed
    pub skipped: Option<String>,
}

impl ImportSummary {
    pub fn render(outcome: &ImportOutcome, project_id: i64, preview_limit: usize) -> Self {
        let imported = (outcome.success_count() > 0).then(|| {
            format!(
                "Imported {} row(s) into project {}.",
                outcome.success_count(),
                project_id
            )
        });

        let skipped = (!outcome.errors().is_empty())
            .then(|| format!("Some rows were skipped: {}", error_preview(outcome, preview_limit)));

        Self { imported, skipped }
    }
}

/// First `limit` row errors joined with "; ", plus "(+N more)" for the rest
pub fn error_preview(outcome: &ImportOutcome, limit: usize) -> String {
    let errors = outcome.errors();
    let shown: Vec<String> = errors.iter().take(limit).map(|e| e.to_string()).collect();
    let mut preview = shown.join("; ");

    if errors.len() > limit {
        preview.push_str(&format!(" (+{} more)", errors.len() - limit));
    }

    preview
}
