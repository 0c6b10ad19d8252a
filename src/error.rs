use thiserror::Error;

/// The two ways a translation run can fail. Both abort the run.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TranslationError {
    #[error("type name `{name}` is produced by both `{first}` and `{second}`")]
    DuplicateClassName { name: String, first: String, second: String },
    #[error("translating inner class types is not supported: {description}")]
    UnsupportedType { description: String },
}

pub type Result<T, E = TranslationError> = std::result::Result<T, E>;
