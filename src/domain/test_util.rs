use crate::domain::DrivenPortError;
use anyhow::anyhow;

/// Whether an in-memory storage port should behave as reachable. Flip to
/// [Connectivity::Disconnected] to exercise storage failure paths.
pub enum Connectivity {
    Connected,
    Disconnected,
}

impl Connectivity {
    /// Fails with [DrivenPortError::CommsFailure] when disconnected
    pub fn blow_up_if_disconnected(&self) -> Result<(), DrivenPortError> {
        match self {
            Self::Connected => Ok(()),
            Self::Disconnected => Err(DrivenPortError::CommsFailure(anyhow!(
                "could not reach storage!"
            ))),
        }
    }
}
