use std::time::Duration;
use thiserror::Error;

/// Errors surfaced by the runtime bridge.
///
/// Validation failures inside a script (a malformed guess, an empty input)
/// are *not* represented here: scripts report those as ordinary result
/// strings. Only interpreter-level failures become a `BridgeError`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BridgeError {
    /// The interpreter could not be brought up. Terminal for the session.
    #[error("Python runtime failed to initialize: {0}")]
    Initialization(String),

    /// A call was attempted before initialization finished successfully.
    #[error("Python runtime is not loaded yet")]
    NotInitialized,

    /// The script raised while being evaluated or while `run` executed.
    #[error("{message}")]
    Script { message: String },

    /// The interpreter did not answer within the configured call timeout.
    #[error("Script did not finish within {}s", .0.as_secs_f32())]
    Timeout(Duration),

    /// Spawning or talking to the interpreter process failed.
    #[error("Failed to communicate with the Python runtime: {0}")]
    Io(String),
}

impl BridgeError {
    pub(crate) fn script(message: impl Into<String>) -> Self {
        Self::Script {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_script_error_displays_message_only() {
        let err = BridgeError::script("ValueError: invalid literal for int()");
        assert_eq!(err.to_string(), "ValueError: invalid literal for int()");
    }

    #[test]
    fn test_timeout_display() {
        let err = BridgeError::Timeout(Duration::from_secs(10));
        assert_eq!(err.to_string(), "Script did not finish within 10s");
    }

    #[test]
    fn test_not_initialized_display() {
        assert!(BridgeError::NotInitialized
            .to_string()
            .contains("not loaded yet"));
    }
}
