//! Robot link health, shared by `wheelly-link` and `wheelly-sim`.
//!
//! All variants are always compiled in (no per-variant feature flags).

/// The health of the serial connection to the robot firmware.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[non_exhaustive]
pub enum LinkStatus {
    /// No telemetry received yet since the link was opened.
    #[default]
    Connecting,
    /// Telemetry is arriving within the expected cadence.
    Connected,
    /// One or two consecutive telemetry polls have missed their deadline.
    /// Motors are not yet halted, but a goal state should treat this as a
    /// reason to back off.
    Degraded,
    /// Three or more consecutive telemetry polls have missed their deadline.
    /// The controller has halted motors and will not send further motion
    /// commands until telemetry resumes.
    Failed,
}

impl LinkStatus {
    /// `true` for any status in which the controller may issue motion
    /// commands.
    #[inline]
    pub fn can_move(self) -> bool {
        matches!(self, LinkStatus::Connected | LinkStatus::Degraded)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            LinkStatus::Connecting => "connecting",
            LinkStatus::Connected  => "connected",
            LinkStatus::Degraded   => "degraded",
            LinkStatus::Failed     => "failed",
        }
    }
}

impl std::fmt::Display for LinkStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
