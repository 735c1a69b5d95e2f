/// Signals for the UI layer, drained from the client's event channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    /// Transient, non-blocking message.
    Toast { level: ToastLevel, message: String },

    /// Blocking message the user must dismiss (permission denials).
    Alert { message: String },

    /// Return to the map screen.
    NavigateToMap,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Success,
    Info,
    Error,
}

impl UiEvent {
    pub fn success(message: impl Into<String>) -> Self {
        Self::Toast {
            level: ToastLevel::Success,
            message: message.into(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::Toast {
            level: ToastLevel::Info,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::Toast {
            level: ToastLevel::Error,
            message: message.into(),
        }
    }

    pub fn alert(message: impl Into<String>) -> Self {
        Self::Alert {
            message: message.into(),
        }
    }
}
