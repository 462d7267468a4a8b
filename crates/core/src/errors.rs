/// Boxed error as produced by fallible deleters
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Result type alias for ownhandle operations
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for ownhandle operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A deleter reported a failure or panicked while releasing a resource
    #[error("cleanup of resource '{resource}' failed: {message}")]
    Cleanup {
        resource: String,
        message: String,
        #[source]
        source: Option<BoxError>,
    },

    /// Configuration errors
    #[error("configuration error: {message}")]
    Configuration { message: String },
}

// Helper methods for creating errors with context
impl Error {
    /// Create a cleanup error without an underlying cause
    #[must_use]
    pub fn cleanup(resource: impl Into<String>, message: impl Into<String>) -> Self {
        Error::Cleanup {
            resource: resource.into(),
            message: message.into(),
            source: None,
        }
    }

    /// Create a cleanup error wrapping the deleter's own error
    #[must_use]
    pub fn cleanup_with_source(resource: impl Into<String>, source: impl Into<BoxError>) -> Self {
        let source = source.into();
        Error::Cleanup {
            resource: resource.into(),
            message: source.to_string(),
            source: Some(source),
        }
    }

    /// Create a configuration error
    #[must_use]
    pub fn configuration(message: impl Into<String>) -> Self {
        Error::Configuration {
            message: message.into(),
        }
    }

    /// Returns true if this error came from a deleter
    pub fn is_cleanup(&self) -> bool {
        matches!(self, Error::Cleanup { .. })
    }
}
