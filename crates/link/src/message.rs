use serde::{Deserialize, Serialize};
use sysmatrix_core::{MatrixError, Result, SystemStats};

/// JSON shape of one stats line, e.g.
/// `{"cpu":12.3,"memory":45.6,"disk":78.9,"network_rx":0.0}`.
///
/// Missing fields read as 0.0 and unknown fields are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StatsMessage {
    pub cpu: f32,
    pub memory: f32,
    pub disk: f32,
    pub network_rx: f32,
}

impl From<SystemStats> for StatsMessage {
    fn from(s: SystemStats) -> Self {
        Self {
            cpu: s.cpu,
            memory: s.memory,
            disk: s.disk,
            network_rx: s.network_rx,
        }
    }
}

impl From<StatsMessage> for SystemStats {
    fn from(m: StatsMessage) -> Self {
        Self {
            cpu: m.cpu,
            memory: m.memory,
            disk: m.disk,
            network_rx: m.network_rx,
        }
    }
}

/// Parse one received line into [`SystemStats`].
///
/// Anything other than a JSON object is rejected.
pub fn parse_line(line: &str) -> Result<SystemStats> {
    let line = line.trim();
    if line.is_empty() {
        return Err(MatrixError::Link("empty stats line".into()));
    }

    let value: serde_json::Value = serde_json::from_str(line)
        .map_err(|e| MatrixError::Link(format!("malformed stats line: {e}")))?;
    if !value.is_object() {
        return Err(MatrixError::Link(format!("stats line is not an object: {line}")));
    }

    serde_json::from_value::<StatsMessage>(value)
        .map(Into::into)
        .map_err(|e| MatrixError::Link(format!("bad stats fields: {e}")))
}

/// Serialize stats as one newline-terminated line.
pub fn encode_line(stats: SystemStats) -> Result<String> {
    let mut line = serde_json::to_string(&StatsMessage::from(stats))
        .map_err(|e| MatrixError::Link(format!("encode stats: {e}")))?;
    line.push('\n');
    Ok(line)
}
