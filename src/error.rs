use thiserror::Error;

/// An error built by [`Printer::errorf`](crate::Printer::errorf). Its text is
/// the header-prefixed message and nothing else.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct FormattedError {
    message: String,
}

impl FormattedError {
    pub(crate) fn new(message: String) -> Self {
        Self { message }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn into_message(self) -> String {
        self.message
    }
}

/// Header stack contract violation. These signal mismatched push/pop
/// pairing in the calling code, not a runtime condition.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HeaderStackError {
    #[error("header stack contract violation: cannot pop protected header '{header}'")]
    ProtectedHeader { header: String },
    #[error("header stack contract violation: asked to pop '{requested}' but innermost header is '{current}'")]
    Mismatch { requested: String, current: String },
    #[error("header stack contract violation: scope '{header}' expected depth {expected}, found {actual}")]
    Unbalanced {
        header: String,
        expected: usize,
        actual: usize,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("invalid noise level '{value}'")]
    InvalidNoise { value: String },
}
