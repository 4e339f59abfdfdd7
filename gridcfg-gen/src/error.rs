#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    #[error("Unknown {family} kind: {kind}")]
    UnknownKind { family: &'static str, kind: String },

    #[error("Unknown output format: {0}")]
    UnknownFormat(String),

    #[error("Cluster name '{0}' cannot be used as a file name")]
    InvalidClusterName(String),
}

impl GenerateError {
    pub(crate) fn unknown_kind(family: &'static str, kind: &str) -> Self {
        GenerateError::UnknownKind {
            family,
            kind: kind.to_string(),
        }
    }
}
