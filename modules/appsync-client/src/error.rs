use thiserror::Error;

pub type Result<T> = std::result::Result<T, AppSyncError>;

#[derive(Debug, Error)]
pub enum AppSyncError {
    #[error("ListTypes failed for API {api_id}: {message}")]
    ListTypes { api_id: String, message: String },

    #[error("ListResolvers failed for API {api_id}, type {type_name}: {message}")]
    ListResolvers {
        api_id: String,
        type_name: String,
        message: String,
    },
}
