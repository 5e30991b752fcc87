use chrono::Utc;
use serde::Serialize;
use serde_json::Value;

/// Insertion-ordered key/value record, the shape telemetry arrives in and
/// the shape the accumulator holds per device.
pub type ValueMap = serde_json::Map<String, Value>;

/// One timestamped snapshot captured during a watch session.
///
/// `values` is either a single device record or an array of them when
/// multiple devices were polled in the same tick.
#[derive(Debug, Clone, Serialize)]
pub struct WatchSample {
    pub timestamp: i64,
    pub values: Value,
}

impl WatchSample {
    /// Capture `values` against the current wall clock (epoch seconds).
    pub fn now(values: Value) -> Self {
        WatchSample {
            timestamp: Utc::now().timestamp(),
            values,
        }
    }
}
