#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Malformed pair table: {0}")]
    DataFormat(String),

    #[error("{entity} not found: {name}")]
    NotFound { entity: &'static str, name: String },

    #[error("Validation failed: {0}")]
    Validation(String),
}
