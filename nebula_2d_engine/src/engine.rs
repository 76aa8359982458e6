/// Nebula2D Engine - singleton manager for engine-wide services
///
/// This module provides global singleton management for the logger.
/// It uses thread-safe static storage with RwLock for safe concurrent access.

use std::sync::{Arc, OnceLock, RwLock};
use std::time::SystemTime;

use crate::error::{Nebula2dError, Result};
use crate::log::{DefaultLogger, LogEntry, Logger, LogSeverity};

// ===== INTERNAL STATE =====

/// Global engine state storage
static ENGINE_STATE: OnceLock<EngineState> = OnceLock::new();

/// Internal state structure holding all engine singletons
struct EngineState {
    /// Active logger (None until the engine is initialized)
    logger: RwLock<Option<Arc<dyn Logger>>>,
}

impl EngineState {
    /// Create a new empty engine state
    fn new() -> Self {
        Self {
            logger: RwLock::new(None),
        }
    }
}

// ===== PUBLIC API =====

/// Main engine singleton manager
///
/// Manages engine-wide services (currently the logger) using a singleton
/// pattern with thread-safe access.
///
/// # Example
///
/// ```
/// use nebula_2d_engine::Nebula2dEngine;
///
/// Nebula2dEngine::initialize().unwrap();
/// // ... run the engine ...
/// Nebula2dEngine::shutdown();
/// ```
pub struct Nebula2dEngine;

impl Nebula2dEngine {
    /// Initialize the engine with the default colored console logger
    ///
    /// This must be called once at application startup. Calling it again
    /// after `shutdown()` re-installs the default logger.
    pub fn initialize() -> Result<()> {
        let state = ENGINE_STATE.get_or_init(EngineState::new);

        let mut logger = state
            .logger
            .write()
            .map_err(|_| Nebula2dError::InitializationFailed("Logger lock poisoned".to_string()))?;

        if logger.is_none() {
            *logger = Some(Arc::new(DefaultLogger));
        }

        Ok(())
    }

    /// Shutdown the engine and drop all singletons
    ///
    /// After calling this, `initialize()` must be called again before the
    /// logging macros produce any output.
    pub fn shutdown() {
        if let Some(state) = ENGINE_STATE.get() {
            if let Ok(mut logger) = state.logger.write() {
                *logger = None;
            }
        }
    }

    /// Replace the active logger
    ///
    /// # Errors
    ///
    /// Returns an error if the engine has not been initialized.
    pub fn set_logger(logger: Arc<dyn Logger>) -> Result<()> {
        let state = ENGINE_STATE.get().ok_or_else(|| {
            Nebula2dError::InitializationFailed(
                "Engine not initialized. Call Nebula2dEngine::initialize() first.".to_string(),
            )
        })?;

        let mut lock = state
            .logger
            .write()
            .map_err(|_| Nebula2dError::BackendError("Logger lock poisoned".to_string()))?;

        *lock = Some(logger);
        Ok(())
    }

    /// Log a message through the active logger
    ///
    /// Silently does nothing if the engine is not initialized; logging
    /// must never panic or fail.
    pub fn log(severity: LogSeverity, source: &str, message: String) {
        Self::dispatch(LogEntry {
            severity,
            timestamp: SystemTime::now(),
            source: source.to_string(),
            message,
            file: None,
            line: None,
        });
    }

    /// Log a message with file:line details (used by `engine_error!`)
    pub fn log_detailed(
        severity: LogSeverity,
        source: &str,
        message: String,
        file: &'static str,
        line: u32,
    ) {
        Self::dispatch(LogEntry {
            severity,
            timestamp: SystemTime::now(),
            source: source.to_string(),
            message,
            file: Some(file),
            line: Some(line),
        });
    }

    fn dispatch(entry: LogEntry) {
        if let Some(state) = ENGINE_STATE.get() {
            if let Ok(logger) = state.logger.read() {
                if let Some(logger) = logger.as_ref() {
                    logger.log(&entry);
                }
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[path = "engine_tests.rs"]
mod tests;
