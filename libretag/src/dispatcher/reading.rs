use crate::dispatcher::SessionState;
use crate::sensor::SensorReading;

/// Result envelope emitted exactly once per performed action.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Reading {
    /// Session log, one entry per line
    pub log: Vec<String>,
    /// Decoded telemetry, present after a successful history read
    pub sensor_reading: Option<SensorReading>,
    /// Raw bytes obtained from the tag (dump, block or command response)
    pub data: Vec<u8>,
    /// Error description when the action failed
    pub failure: Option<String>,
    /// `Completed` or `Failed`
    pub state: SessionState,
}

impl Reading {
    /// True unless the action failed
    pub fn is_success(&self) -> bool {
        self.state == SessionState::Completed
    }

    /// Session log joined with newlines.
    pub fn log_text(&self) -> String {
        let mut text = self.log.join("\n");
        if !text.is_empty() {
            text.push('\n');
        }
        text
    }
}
