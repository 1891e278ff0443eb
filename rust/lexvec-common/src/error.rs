use thiserror::Error;

#[derive(Debug, Error)]
#[error(transparent)]
pub struct Error(Box<ErrorKind>);

impl Error {
    pub fn kind(&self) -> &ErrorKind {
        self.0.as_ref()
    }

    pub fn into_kind(self) -> ErrorKind {
        *self.0
    }

    pub fn invalid_format(element: impl Into<String>, message: impl Into<String>) -> Error {
        Error(
            ErrorKind::InvalidFormat {
                element: element.into(),
                message: message.into(),
            }
            .into(),
        )
    }

    pub fn invalid_arg(name: impl Into<String>, message: impl Into<String>) -> Error {
        Error(
            ErrorKind::InvalidArgument {
                name: name.into(),
                message: message.into(),
            }
            .into(),
        )
    }

    pub fn invalid_operation(name: impl Into<String>) -> Error {
        Error(ErrorKind::InvalidOperation { name: name.into() }.into())
    }

    pub fn resource_limit(what: impl Into<String>, size: usize, limit: usize) -> Error {
        Error(
            ErrorKind::ResourceLimitExceeded {
                what: what.into(),
                size,
                limit,
            }
            .into(),
        )
    }

    pub fn recursion_limit(depth: usize, limit: usize) -> Error {
        Error(ErrorKind::RecursionLimitExceeded { depth, limit }.into())
    }

    /// Returns `true` for structural decode failures of an encoded vector.
    pub fn is_malformed(&self) -> bool {
        matches!(self.kind(), ErrorKind::InvalidFormat { .. })
    }

    pub fn is_invalid_arg(&self) -> bool {
        matches!(self.kind(), ErrorKind::InvalidArgument { .. })
    }

    pub fn is_resource_limit(&self) -> bool {
        matches!(self.kind(), ErrorKind::ResourceLimitExceeded { .. })
    }

    pub fn is_recursion_limit(&self) -> bool {
        matches!(self.kind(), ErrorKind::RecursionLimitExceeded { .. })
    }
}

#[derive(Debug, Error)]
pub enum ErrorKind {
    #[error("invalid argument {name}: {message}")]
    InvalidArgument { name: String, message: String },

    #[error("invalid operation {name}")]
    InvalidOperation { name: String },

    #[error("malformed lexeme vector, '{element}': {message}")]
    InvalidFormat { element: String, message: String },

    #[error("{what} is too large ({size} bytes, max {limit} bytes)")]
    ResourceLimitExceeded {
        what: String,
        size: usize,
        limit: usize,
    },

    #[error("query tree is nested too deeply (depth {depth}, limit {limit})")]
    RecursionLimitExceeded { depth: usize, limit: usize },
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Self {
        Error(kind.into())
    }
}
