use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum SensorError {
    /// The climate sensor returned NaN, usually a wiring fault or a missed handshake.
    ReadFailed { temperature: f32, humidity: f32 },
}

impl fmt::Display for SensorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SensorError::ReadFailed {
                temperature,
                humidity,
            } => write!(
                f,
                "Failed to read climate sensor (temperature: {temperature}, humidity: {humidity})"
            ),
        }
    }
}

impl std::error::Error for SensorError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportError {
    pub code: i32,
    pub reason: String,
}

impl TransportError {
    pub fn new(code: i32, reason: impl Into<String>) -> Self {
        Self {
            code,
            reason: reason.into(),
        }
    }
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (code {})", self.reason, self.code)
    }
}

impl std::error::Error for TransportError {}

/// Why no prediction could be obtained for a cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PredictError {
    NetworkUnavailable,
    Transport(TransportError),
    ServerStatus(u16),
    MalformedResponse(String),
}

impl fmt::Display for PredictError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PredictError::NetworkUnavailable => write!(f, "Wifi is not connected"),
            PredictError::Transport(e) => write!(f, "Request failed: {e}"),
            PredictError::ServerStatus(status) => write!(f, "Server answered HTTP {status}"),
            PredictError::MalformedResponse(reason) => {
                write!(f, "Unreadable server response: {reason}")
            }
        }
    }
}

impl std::error::Error for PredictError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PredictError::Transport(e) => Some(e),
            _ => None,
        }
    }
}

impl From<TransportError> for PredictError {
    fn from(e: TransportError) -> Self {
        PredictError::Transport(e)
    }
}
