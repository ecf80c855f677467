//! Capture session state machine

use std::fmt;

use thiserror::Error;

/// Capture session states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CaptureState {
    #[default]
    Idle,
    RequestingDevice,
    Ready,
    Recording,
    Stopped,
    Cancelled,
}

impl CaptureState {
    /// Get the string representation
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::RequestingDevice => "requesting-device",
            Self::Ready => "ready",
            Self::Recording => "recording",
            Self::Stopped => "stopped",
            Self::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for CaptureState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Error when an invalid state transition is attempted
#[derive(Debug, Clone, Error)]
#[error("invalid session transition: cannot {action} while in {current_state} state")]
pub struct InvalidTransition {
    pub current_state: CaptureState,
    pub action: String,
}

/// Capture session lifecycle entity.
/// Guards state transitions for one recording attempt.
///
/// State machine:
///   IDLE -> REQUESTING-DEVICE (request_device)
///   REQUESTING-DEVICE -> READY (device_ready)
///   REQUESTING-DEVICE -> IDLE (device_denied)
///   READY -> RECORDING (begin_recording)
///   RECORDING -> STOPPED (stop)
///   any non-IDLE -> CANCELLED (cancel)
#[derive(Debug, Default)]
pub struct SessionLifecycle {
    state: CaptureState,
}

impl SessionLifecycle {
    /// Create a new lifecycle in idle state
    pub fn new() -> Self {
        Self {
            state: CaptureState::Idle,
        }
    }

    /// Get the current state
    pub fn state(&self) -> CaptureState {
        self.state
    }

    /// Check if currently idle
    pub fn is_idle(&self) -> bool {
        self.state == CaptureState::Idle
    }

    /// Check if currently recording
    pub fn is_recording(&self) -> bool {
        self.state == CaptureState::Recording
    }

    /// Whether chunk delivery events are appended in this state.
    /// Chunks may still arrive between the stop event and assembly.
    pub fn accepts_chunks(&self) -> bool {
        matches!(self.state, CaptureState::Recording | CaptureState::Stopped)
    }

    /// Transition from IDLE to REQUESTING-DEVICE
    pub fn request_device(&mut self) -> Result<(), InvalidTransition> {
        if self.state != CaptureState::Idle {
            return Err(InvalidTransition {
                current_state: self.state,
                action: "request the device".to_string(),
            });
        }
        self.state = CaptureState::RequestingDevice;
        Ok(())
    }

    /// Transition from REQUESTING-DEVICE to READY (device grant succeeded)
    pub fn device_ready(&mut self) -> Result<(), InvalidTransition> {
        if self.state != CaptureState::RequestingDevice {
            return Err(InvalidTransition {
                current_state: self.state,
                action: "attach the device stream".to_string(),
            });
        }
        self.state = CaptureState::Ready;
        Ok(())
    }

    /// Transition from REQUESTING-DEVICE back to IDLE (device grant failed)
    pub fn device_denied(&mut self) -> Result<(), InvalidTransition> {
        if self.state != CaptureState::RequestingDevice {
            return Err(InvalidTransition {
                current_state: self.state,
                action: "report a device failure".to_string(),
            });
        }
        self.state = CaptureState::Idle;
        Ok(())
    }

    /// Transition from READY to RECORDING
    pub fn begin_recording(&mut self) -> Result<(), InvalidTransition> {
        if self.state != CaptureState::Ready {
            return Err(InvalidTransition {
                current_state: self.state,
                action: "begin recording".to_string(),
            });
        }
        self.state = CaptureState::Recording;
        Ok(())
    }

    /// Transition from RECORDING to STOPPED
    pub fn stop(&mut self) -> Result<(), InvalidTransition> {
        if self.state != CaptureState::Recording {
            return Err(InvalidTransition {
                current_state: self.state,
                action: "stop recording".to_string(),
            });
        }
        self.state = CaptureState::Stopped;
        Ok(())
    }

    /// Transition from any non-IDLE state to CANCELLED
    pub fn cancel(&mut self) -> Result<(), InvalidTransition> {
        if self.state == CaptureState::Idle {
            return Err(InvalidTransition {
                current_state: self.state,
                action: "cancel the session".to_string(),
            });
        }
        self.state = CaptureState::Cancelled;
        Ok(())
    }
}
