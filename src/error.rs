use thiserror::Error;

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Attach the name of the type whose member produced this error.
    pub fn in_type(self, owner: impl Into<String>) -> Self {
        Error::InType { owner: owner.into(), source: Box::new(self) }
    }
}

/// Everything that can go wrong while building or loading a schema.
///
/// Construction problems surface here immediately; computing a closure over a
/// well-formed schema never fails.
#[derive(Debug, Error)]
pub enum Error {
    #[error("required value missing: {0}")]
    MissingValue(&'static str),

    #[error("invalid type name `{name}`")]
    InvalidName { name: String },

    #[error("`{kind}` expects {expected} type parameter(s), got {actual}")]
    ContainerArity {
        kind: &'static str,
        expected: &'static str,
        actual: usize,
    },

    #[error("duplicate field `{field}` in `{owner}`")]
    DuplicateField { owner: String, field: String },

    #[error("type `{0}` is registered more than once")]
    DuplicateType(String),

    #[error("unknown type `{0}`")]
    UnknownType(String),

    #[error("type expression `{expr}`: {message} (at offset {offset})")]
    Parse {
        expr: String,
        offset: usize,
        message: String,
    },

    #[error("type signature nests deeper than {limit} levels")]
    TooDeep { limit: usize },

    /// A member of `owner` (field or enum value) failed to build.
    #[error("in `{owner}`: {source}")]
    InType {
        owner: String,
        #[source]
        source: Box<Error>,
    },

    #[error("{source_name}: at JSON path {path} → {message}")]
    Decode {
        source_name: String,
        path: String,
        message: String,
    },

    #[error("failed to read {path}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
