use thiserror::Error;

#[derive(Debug, Error)]
#[error(transparent)]
pub struct Error(Box<ErrorKind>);

pub type StdErrorBoxed = Box<dyn std::error::Error + Send + Sync + 'static>;

impl Error {
    pub fn kind(&self) -> &ErrorKind {
        self.0.as_ref()
    }

    pub fn into_kind(self) -> ErrorKind {
        *self.0
    }

    /// Returns `true` if the error means the index as a whole cannot be read.
    ///
    /// Everything else (a missing statistic, a field that failed to produce
    /// a value) is something callers may degrade around.
    pub fn is_index_unavailable(&self) -> bool {
        matches!(self.kind(), ErrorKind::IndexUnavailable { .. })
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

    pub fn index_unavailable(reason: impl Into<String>) -> Error {
        Error(
            ErrorKind::IndexUnavailable {
                reason: reason.into(),
            }
            .into(),
        )
    }

    pub fn stat_unavailable(field: impl Into<String>, message: impl Into<String>) -> Error {
        Error(
            ErrorKind::StatUnavailable {
                field: field.into(),
                message: message.into(),
            }
            .into(),
        )
    }

    pub fn field_read<E>(field: impl Into<String>, source: E) -> Error
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Error(
            ErrorKind::FieldRead {
                field: field.into(),
                source: Box::new(source),
            }
            .into(),
        )
    }

    pub fn io(context: impl Into<String>, source: std::io::Error) -> Error {
        Error(
            ErrorKind::Io {
                context: context.into(),
                source,
            }
            .into(),
        )
    }
}

#[derive(Debug, Error)]
pub enum ErrorKind {
    #[error("invalid argument {name}: {message}")]
    InvalidArgument { name: String, message: String },

    #[error("index unavailable: {reason}")]
    IndexUnavailable { reason: String },

    #[error("statistic unavailable for field '{field}': {message}")]
    StatUnavailable { field: String, message: String },

    #[error("failed to read term dictionary of field '{field}': {source}")]
    FieldRead { field: String, source: StdErrorBoxed },

    #[error("invalid index format for '{element}': {message}")]
    InvalidFormat { element: String, message: String },

    #[error("IO error for '{context}': {source}'")]
    Io {
        context: String,
        source: std::io::Error,
    },
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Self {
        Error(kind.into())
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::io("", e)
    }
}
