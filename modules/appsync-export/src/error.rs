use std::path::PathBuf;

use appsync_client::AppSyncError;

use crate::writer::TemplateKind;

/// Result type alias for export operations.
pub type Result<T> = std::result::Result<T, ExportError>;

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error(transparent)]
    AppSync(#[from] AppSyncError),

    #[error("Error creating {} for {type_name} -> {field_name}: {source}", path.display())]
    CreateDir {
        type_name: String,
        field_name: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Error writing {kind} mapping for {type_name} -> {field_name}: {source}")]
    WriteTemplate {
        type_name: String,
        field_name: String,
        kind: TemplateKind,
        #[source]
        source: std::io::Error,
    },
}
