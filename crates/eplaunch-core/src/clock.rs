use crate::types::RunStamp;

/// Source of the run timestamp and host identity.
pub trait RunClock: Send + Sync {
    /// Current time as a nanosecond Unix timestamp.
    fn now(&self) -> RunStamp;

    /// Name of the machine the recording runs on.
    fn hostname(&self) -> String;
}
