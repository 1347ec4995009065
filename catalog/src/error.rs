use crate::validate::FieldError;

pub type Result<T> = std::result::Result<T, CatalogError>;

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("validation failed: {}", join_errors(.0))]
    Validation(Vec<FieldError>),

    #[error("project not found: {0}")]
    NotFound(String),

    /// The id source produced an id that is already taken. Not retried.
    #[error("project id already exists: {0}")]
    DuplicateId(String),

    #[error(transparent)]
    Store(#[from] anyhow::Error),
}

impl CatalogError {
    /// Field errors carried by a validation failure, empty otherwise.
    pub fn field_errors(&self) -> &[FieldError] {
        match self {
            CatalogError::Validation(errors) => errors,
            _ => &[],
        }
    }
}

fn join_errors(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
