//! Purpose: Single error type for decoding, linking, and CLI failures.
//! Exports: `Error`, `ErrorKind`, `to_exit_code`.
//! Role: Every fallible path in the crate returns this type; callers see exactly one error.
//! Invariants: Domain errors carry the offending field, dimension id, or role name.
//! Invariants: Exit code mapping is stable once published.
use std::error::Error as StdError;
use std::fmt;
use std::path::PathBuf;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorKind {
    Internal,
    Usage,
    Io,
    MalformedInput,
    UnknownDimension,
    DimensionMismatch,
    InvalidRole,
}

#[derive(Debug)]
pub struct Error {
    kind: ErrorKind,
    message: Option<String>,
    hint: Option<String>,
    field: Option<String>,
    dimension: Option<String>,
    role: Option<String>,
    path: Option<PathBuf>,
    source: Option<Box<dyn StdError + Send + Sync>>,
}

impl Error {
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            message: None,
            hint: None,
            field: None,
            dimension: None,
            role: None,
            path: None,
            source: None,
        }
    }

    /// A recognized top-level field whose value has the wrong shape.
    pub fn malformed(field: impl Into<String>) -> Self {
        let field = field.into();
        Self::new(ErrorKind::MalformedInput)
            .with_message(format!("field `{field}` is malformed"))
            .with_field(field)
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn hint(&self) -> Option<&str> {
        self.hint.as_deref()
    }

    pub fn field(&self) -> Option<&str> {
        self.field.as_deref()
    }

    pub fn dimension(&self) -> Option<&str> {
        self.dimension.as_deref()
    }

    pub fn role(&self) -> Option<&str> {
        self.role.as_deref()
    }

    pub fn path(&self) -> Option<&std::path::Path> {
        self.path.as_deref()
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }

    pub fn with_dimension(mut self, dimension: impl Into<String>) -> Self {
        self.dimension = Some(dimension.into());
        self
    }

    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = Some(role.into());
        self
    }

    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn with_source(mut self, source: impl StdError + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.kind)?;
        if let Some(message) = &self.message {
            write!(f, ": {message}")?;
        }
        if let Some(field) = &self.field {
            write!(f, " (field: {field})")?;
        }
        if let Some(dimension) = &self.dimension {
            write!(f, " (dimension: {dimension})")?;
        }
        if let Some(role) = &self.role {
            write!(f, " (role: {role})")?;
        }
        if let Some(path) = &self.path {
            write!(f, " (path: {})", path.display())?;
        }
        Ok(())
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source
            .as_ref()
            .map(|source| source.as_ref() as &(dyn StdError + 'static))
    }
}

pub fn to_exit_code(kind: ErrorKind) -> i32 {
    match kind {
        ErrorKind::Internal => 1,
        ErrorKind::Usage => 2,
        ErrorKind::Io => 3,
        ErrorKind::MalformedInput => 4,
        ErrorKind::UnknownDimension => 5,
        ErrorKind::DimensionMismatch => 6,
        ErrorKind::InvalidRole => 7,
    }
}

#[cfg(test)]
mod tests {
    use super::{Error, ErrorKind, to_exit_code};

    #[test]
    fn exit_code_mapping_is_stable() {
        let cases = [
            (ErrorKind::Internal, 1),
            (ErrorKind::Usage, 2),
            (ErrorKind::Io, 3),
            (ErrorKind::MalformedInput, 4),
            (ErrorKind::UnknownDimension, 5),
            (ErrorKind::DimensionMismatch, 6),
            (ErrorKind::InvalidRole, 7),
        ];

        for (kind, code) in cases {
            assert_eq!(to_exit_code(kind), code);
        }
    }

    #[test]
    fn display_includes_context() {
        let err = Error::new(ErrorKind::UnknownDimension)
            .with_message("role `geo` references a missing dimension")
            .with_dimension("area")
            .with_role("geo");
        let text = err.to_string();
        assert!(text.starts_with("UnknownDimension: role `geo`"));
        assert!(text.contains("(dimension: area)"));
        assert!(text.contains("(role: geo)"));
    }

    #[test]
    fn malformed_names_the_field() {
        let err = Error::malformed("size");
        assert_eq!(err.kind(), ErrorKind::MalformedInput);
        assert_eq!(err.field(), Some("size"));
        assert_eq!(err.message(), Some("field `size` is malformed"));
    }
}
