//! Error types for configuration loading and payload decoding.
//!
//! The aggregation components themselves never fail: malformed records degrade
//! to defaults. Only the edges that touch files or parse documents surface an
//! [`AnalyticsError`].

use std::fmt;

/// Result type for fallible analytics operations.
pub type AnalyticsResult<T> = Result<T, AnalyticsError>;

/// Structured context for analytics errors.
///
/// Records where and on what an error occurred.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorContext {
    /// The operation being performed (e.g., "load_config", "parse_payload")
    pub operation: Option<String>,
    /// The entity involved (e.g., "storage_map", "projection.low_color")
    pub entity: Option<String>,
    /// Additional details about the error
    pub details: Option<String>,
}

impl ErrorContext {
    /// Create a new error context with an operation name.
    pub fn new(operation: impl Into<String>) -> Self {
        Self {
            operation: Some(operation.into()),
            ..Default::default()
        }
    }

    /// Set the entity.
    pub fn with_entity(mut self, entity: impl Into<String>) -> Self {
        self.entity = Some(entity.into());
        self
    }

    /// Set additional details.
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();
        if let Some(ref op) = self.operation {
            parts.push(format!("operation={}", op));
        }
        if let Some(ref entity) = self.entity {
            parts.push(format!("entity={}", entity));
        }
        if let Some(ref details) = self.details {
            parts.push(format!("details={}", details));
        }
        write!(f, "[{}]", parts.join(", "))
    }
}

/// Error type for the fallible edges of the analytics layer.
#[derive(Debug, thiserror::Error)]
pub enum AnalyticsError {
    /// Configuration file missing, unparsable, or holding invalid values.
    #[error("Configuration error: {message} {context}")]
    Configuration {
        message: String,
        context: ErrorContext,
    },

    /// API payload that is not valid JSON or not shaped like a response object.
    #[error("Payload error: {message} {context}")]
    Payload {
        message: String,
        context: ErrorContext,
    },

    /// Filesystem error while reading a configuration or payload file.
    #[error("I/O error: {message} {context}")]
    Io {
        message: String,
        context: ErrorContext,
        #[source]
        source: std::io::Error,
    },
}

impl AnalyticsError {
    /// Create a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
            context: ErrorContext::default(),
        }
    }

    /// Create a configuration error with context.
    pub fn configuration_with_context(message: impl Into<String>, context: ErrorContext) -> Self {
        Self::Configuration {
            message: message.into(),
            context,
        }
    }

    /// Create a payload error with context.
    pub fn payload_with_context(message: impl Into<String>, context: ErrorContext) -> Self {
        Self::Payload {
            message: message.into(),
            context,
        }
    }

    /// Wrap an I/O error.
    pub fn io(source: std::io::Error, context: ErrorContext) -> Self {
        Self::Io {
            message: source.to_string(),
            context,
            source,
        }
    }

    /// Get the error context.
    pub fn context(&self) -> &ErrorContext {
        match self {
            Self::Configuration { context, .. } => context,
            Self::Payload { context, .. } => context,
            Self::Io { context, .. } => context,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_display_lists_set_fields_only() {
        let ctx = ErrorContext::new("load_config").with_details("line 3");
        assert_eq!(ctx.to_string(), "[operation=load_config, details=line 3]");
        assert_eq!(ErrorContext::default().to_string(), "[]");
    }

    #[test]
    fn test_error_message_includes_context() {
        let err = AnalyticsError::payload_with_context(
            "root is not an object",
            ErrorContext::new("parse_payload").with_entity("storage_map"),
        );
        let msg = err.to_string();
        assert!(msg.starts_with("Payload error: root is not an object"));
        assert!(msg.contains("entity=storage_map"));
    }

    #[test]
    fn test_io_error_keeps_source() {
        use std::error::Error as _;
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err = AnalyticsError::io(io, ErrorContext::new("read_payload"));
        assert!(err.source().is_some());
        assert!(err.to_string().contains("missing"));
    }
}
