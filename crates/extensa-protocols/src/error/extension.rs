//! Extension-related errors.

use std::sync::Arc;

use thiserror::Error;

/// Boxed error returned by extension constructors.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Coarse classification of an [`ExtensionError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The caller passed something the registry cannot accept.
    InvalidArgument,
    /// Capability metadata or configuration resources are malformed.
    Configuration,
    /// A valid implementation failed to construct.
    Instantiation,
    /// A configuration resource could not be read.
    ResourceIo,
}

#[derive(Debug, Clone, Error)]
pub enum ExtensionError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Capability {capability} is not marked extensible")]
    NotExtensible { capability: String },

    #[error("Unknown extension '{name}' for capability {capability}")]
    UnknownExtension { capability: String, name: String },

    #[error("Multiple default extensions declared on {capability}: {names:?}")]
    MultipleDefaults {
        capability: String,
        names: Vec<String>,
    },

    #[error(
        "Implementation {implementation} could not be resolved (capability: {capability}, line {line}: '{text}') in {origin}"
    )]
    UnresolvedImplementation {
        capability: String,
        implementation: String,
        origin: String,
        line: usize,
        text: String,
    },

    #[error(
        "Implementation {implementation} does not provide capability {capability} (line {line}: '{text}') in {origin}"
    )]
    IncompatibleImplementation {
        capability: String,
        implementation: String,
        origin: String,
        line: usize,
        text: String,
    },

    #[error(
        "Extension instance (name: {name}, implementation: {implementation}) of {capability} could not be instantiated: {source}"
    )]
    Instantiation {
        capability: String,
        name: String,
        implementation: String,
        #[source]
        source: Arc<dyn std::error::Error + Send + Sync>,
    },

    #[error("Failed to read extension resource {origin}: {source}")]
    ResourceIo {
        origin: String,
        #[source]
        source: Arc<std::io::Error>,
    },
}

impl ExtensionError {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            ExtensionError::InvalidArgument(_)
            | ExtensionError::NotExtensible { .. }
            | ExtensionError::UnknownExtension { .. } => ErrorKind::InvalidArgument,
            ExtensionError::MultipleDefaults { .. }
            | ExtensionError::UnresolvedImplementation { .. }
            | ExtensionError::IncompatibleImplementation { .. } => ErrorKind::Configuration,
            ExtensionError::Instantiation { .. } => ErrorKind::Instantiation,
            ExtensionError::ResourceIo { .. } => ErrorKind::ResourceIo,
        }
    }

    pub fn io(origin: impl Into<String>, source: std::io::Error) -> Self {
        ExtensionError::ResourceIo {
            origin: origin.into(),
            source: Arc::new(source),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_argument_error() {
        let err = ExtensionError::InvalidArgument("extension name must not be blank".to_string());
        let display = err.to_string();
        assert!(display.contains("Invalid argument"));
        assert!(display.contains("must not be blank"));
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    }

    #[test]
    fn test_unknown_extension_error() {
        let err = ExtensionError::UnknownExtension {
            capability: "com.example.UserService".to_string(),
            name: "admin".to_string(),
        };
        let display = err.to_string();
        assert!(display.contains("admin"));
        assert!(display.contains("com.example.UserService"));
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    }

    #[test]
    fn test_not_extensible_error() {
        let err = ExtensionError::NotExtensible {
            capability: "com.example.Plain".to_string(),
        };
        assert!(err.to_string().contains("not marked extensible"));
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    }

    #[test]
    fn test_multiple_defaults_error() {
        let err = ExtensionError::MultipleDefaults {
            capability: "com.example.UserService".to_string(),
            names: vec!["a".to_string(), "b".to_string()],
        };
        let display = err.to_string();
        assert!(display.contains("Multiple default"));
        assert!(display.contains("\"a\""));
        assert!(display.contains("\"b\""));
        assert_eq!(err.kind(), ErrorKind::Configuration);
    }

    #[test]
    fn test_incompatible_implementation_error() {
        let err = ExtensionError::IncompatibleImplementation {
            capability: "com.example.UserService".to_string(),
            implementation: "com.example.NotAUserService".to_string(),
            origin: "resources/META-INF/extensa/com.example.UserService".to_string(),
            line: 3,
            text: "bad = com.example.NotAUserService".to_string(),
        };
        let display = err.to_string();
        assert!(display.contains("com.example.NotAUserService"));
        assert!(display.contains("line 3"));
        assert!(display.contains("resources/META-INF"));
        assert_eq!(err.kind(), ErrorKind::Configuration);
    }

    #[test]
    fn test_instantiation_error_keeps_source() {
        let cause: BoxError = "connection refused".into();
        let err = ExtensionError::Instantiation {
            capability: "com.example.UserService".to_string(),
            name: "teacher".to_string(),
            implementation: "com.example.TeacherUserService".to_string(),
            source: Arc::from(cause),
        };
        assert!(err.to_string().contains("connection refused"));
        assert!(std::error::Error::source(&err).is_some());
        assert_eq!(err.kind(), ErrorKind::Instantiation);
    }

    #[test]
    fn test_resource_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = ExtensionError::io("/etc/extensa/x", io_err);
        assert!(err.to_string().contains("/etc/extensa/x"));
        assert!(err.to_string().contains("denied"));
        assert_eq!(err.kind(), ErrorKind::ResourceIo);
    }

    #[test]
    fn test_clone_preserves_message() {
        let err = ExtensionError::MultipleDefaults {
            capability: "c".to_string(),
            names: vec!["x".to_string(), "y".to_string()],
        };
        let cloned = err.clone();
        assert_eq!(err.to_string(), cloned.to_string());
    }

    #[test]
    fn test_error_debug() {
        let err = ExtensionError::InvalidArgument("test".to_string());
        let debug = format!("{:?}", err);
        assert!(debug.contains("InvalidArgument"));
    }
}
