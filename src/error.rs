//! Error type shared by every tool.

use thiserror::Error;

use crate::color::ColorError;

/// Boxed underlying cause of an external failure
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// A tool invocation failure. Terminal for that invocation.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ToolError {
    /// A required input field was missing or malformed
    #[error("{tool}: invalid input: {message}")]
    Validation { tool: &'static str, message: String },

    /// The color string matched none of the recognized syntaxes
    #[error("color_convert: {0}")]
    Color(#[from] ColorError),

    /// An OS, filesystem, or network call failed
    #[error("{tool}: {context}: {source}")]
    ExternalResource {
        tool: &'static str,
        context: String,
        #[source]
        source: BoxError,
    },

    /// The requested item does not exist
    #[error("{tool}: {what} not found")]
    NotFound { tool: &'static str, what: String },

    /// The operation succeeded but found nothing to report
    #[error("{tool}: {message}")]
    EmptyResult { tool: &'static str, message: String },

    /// The caller cancelled the request
    #[error("{tool}: request cancelled")]
    Cancelled { tool: &'static str },
}

impl ToolError {
    pub fn validation(tool: &'static str, message: impl Into<String>) -> Self {
        ToolError::Validation { tool, message: message.into() }
    }

    pub fn external(
        tool: &'static str,
        context: impl Into<String>,
        source: impl Into<BoxError>,
    ) -> Self {
        ToolError::ExternalResource { tool, context: context.into(), source: source.into() }
    }

    pub fn not_found(tool: &'static str, what: impl Into<String>) -> Self {
        ToolError::NotFound { tool, what: what.into() }
    }

    /// Stable snake_case tag for telemetry.
    pub fn kind(&self) -> &'static str {
        match self {
            ToolError::Validation { .. } => "validation_error",
            ToolError::Color(_) => "unparseable_color",
            ToolError::ExternalResource { .. } => "external_resource_error",
            ToolError::NotFound { .. } => "not_found",
            ToolError::EmptyResult { .. } => "empty_result",
            ToolError::Cancelled { .. } => "cancelled",
        }
    }
}
