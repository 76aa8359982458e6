//! Error types for the Nebula2D engine
//!
//! This module defines the error types used throughout the engine,
//! including device, initialization, and resource failures.
//!
//! Precondition violations (detaching an object that is not attached,
//! reparenting into a cycle, grouping mismatched primitives) are reported
//! through `bool`/`Option` returns, never through these types.

use std::fmt;

/// Result type for Nebula2D engine operations
pub type Result<T> = std::result::Result<T, Nebula2dError>;

/// Nebula2D engine errors
#[derive(Debug, Clone)]
pub enum Nebula2dError {
    /// Backend-specific error reported by the graphics device
    BackendError(String),

    /// Out of GPU memory
    OutOfMemory,

    /// Invalid resource (texture, buffer, material, etc.)
    InvalidResource(String),

    /// Initialization failed (engine, device, subsystems)
    InitializationFailed(String),
}

impl fmt::Display for Nebula2dError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Nebula2dError::BackendError(msg) => write!(f, "Backend error: {}", msg),
            Nebula2dError::OutOfMemory => write!(f, "Out of GPU memory"),
            Nebula2dError::InvalidResource(msg) => write!(f, "Invalid resource: {}", msg),
            Nebula2dError::InitializationFailed(msg) => write!(f, "Initialization failed: {}", msg),
        }
    }
}

impl std::error::Error for Nebula2dError {}

/// Build an [`Nebula2dError::InvalidResource`] carrying its source context.
///
/// # Example
///
/// ```ignore
/// let err = engine_err!("nebula2d::Material", "unknown map slot '{}'", name);
/// ```
#[macro_export]
macro_rules! engine_err {
    ($source:expr, $($arg:tt)*) => {
        $crate::error::Nebula2dError::InvalidResource(
            format!("[{}] {}", $source, format!($($arg)*))
        )
    };
}

/// Early-return an [`Nebula2dError::InvalidResource`] from the current function.
#[macro_export]
macro_rules! engine_bail {
    ($source:expr, $($arg:tt)*) => {
        return Err($crate::engine_err!($source, $($arg)*))
    };
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
