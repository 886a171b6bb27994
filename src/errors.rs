// SPDX-License-Identifier: GPL-3.0-only

//! Error types for capability negotiation and program generation
//!
//! Nothing in this crate aborts on a GPU-side failure. Every operation reports
//! one of these variants and leaves the decision to retry (usually with a
//! lesser conversion method) to the caller.

use std::fmt;

/// Result type alias using GlError
pub type GlResult<T> = Result<T, GlError>;

/// Main error type
#[derive(Debug, Clone, PartialEq)]
pub enum GlError {
    /// A required optional entry point or extension is absent
    CapabilityMissing {
        /// What was being set up (e.g. "NV register combiners")
        what: String,
        /// Logical names of the missing entries
        missing: Vec<String>,
    },
    /// The driver rejected an assembled program
    Compile {
        /// Byte offset reported by the driver
        position: i32,
        /// Driver diagnostic text
        message: String,
        /// Up to 10 characters of source at the offending position
        context: String,
    },
    /// Bad dimensions, unknown enum values, short buffers and the like
    InvalidParameter(String),
    /// A core entry point could not be resolved while loading the dispatch
    EntryPointMissing(String),
    /// Context creation/binding failures
    Context(String),
    /// Image-file texture loading errors
    Image(String),
    /// Configuration load/save errors
    Config(String),
}

impl GlError {
    /// Shorthand for a capability error with a single missing entry
    pub fn capability(what: impl Into<String>, missing: impl Into<String>) -> Self {
        GlError::CapabilityMissing {
            what: what.into(),
            missing: vec![missing.into()],
        }
    }

    /// Whether the caller may retry with a lesser conversion method
    pub fn is_capability_error(&self) -> bool {
        matches!(self, GlError::CapabilityMissing { .. })
    }
}

impl fmt::Display for GlError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GlError::CapabilityMissing { what, missing } => {
                write!(f, "{} unavailable, missing: {}", what, missing.join(", "))
            }
            GlError::Compile {
                position,
                message,
                context,
            } => write!(
                f,
                "Error compiling fragment program at {}: {} at {:?}",
                position, message, context
            ),
            GlError::InvalidParameter(msg) => write!(f, "Invalid parameter: {}", msg),
            GlError::EntryPointMissing(name) => write!(f, "Missing GL entry point: {}", name),
            GlError::Context(msg) => write!(f, "Context error: {}", msg),
            GlError::Image(msg) => write!(f, "Image error: {}", msg),
            GlError::Config(msg) => write!(f, "Configuration error: {}", msg),
        }
    }
}

impl std::error::Error for GlError {}

impl From<image::ImageError> for GlError {
    fn from(err: image::ImageError) -> Self {
        GlError::Image(err.to_string())
    }
}

impl From<serde_json::Error> for GlError {
    fn from(err: serde_json::Error) -> Self {
        GlError::Config(err.to_string())
    }
}

impl From<std::io::Error> for GlError {
    fn from(err: std::io::Error) -> Self {
        GlError::Config(err.to_string())
    }
}
