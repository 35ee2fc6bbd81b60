//! Applied / not-applied signal returned by every mutator.

/// Why a command left the state untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Ignored {
    /// The bout already has a result.
    Concluded,
    /// The side already holds two ippons.
    SideFull,
    /// The opponent already holds the forfeit pair.
    ForfeitTaken,
    /// Nothing left to undo.
    HistoryEmpty,
    /// The requested target is already active.
    SameTarget,
    /// The requested target does not exist.
    NoSuchTarget,
    /// The clock reads 0:00.
    ClockExpired,
    ClockRunning,
    ClockStopped,
    OvertimeActive,
    /// A destructive command arrived without confirmation.
    NotConfirmed,
    /// The session format has no representative bout.
    RepresentativeUnavailable,
}

impl std::fmt::Display for Ignored {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let msg = match self {
            Ignored::Concluded => "bout already concluded",
            Ignored::SideFull => "side already has two points",
            Ignored::ForfeitTaken => "opponent already won by forfeit",
            Ignored::HistoryEmpty => "nothing to undo",
            Ignored::SameTarget => "already active",
            Ignored::NoSuchTarget => "no such bout",
            Ignored::ClockExpired => "clock has run out",
            Ignored::ClockRunning => "clock already running",
            Ignored::ClockStopped => "clock already stopped",
            Ignored::OvertimeActive => "overtime already running",
            Ignored::NotConfirmed => "confirmation required",
            Ignored::RepresentativeUnavailable => "format has no representative bout",
        };
        f.write_str(msg)
    }
}

/// Result of a state-changing command.
///
/// No-ops are not errors, but hosts still need to tell them apart from real
/// mutations, so every mutator reports one of these.
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Applied {
    Yes,
    No(Ignored),
}

impl Applied {
    pub fn is_applied(self) -> bool {
        matches!(self, Applied::Yes)
    }

    /// The reason for a no-op, if any.
    pub fn ignored(self) -> Option<Ignored> {
        match self {
            Applied::Yes => None,
            Applied::No(reason) => Some(reason),
        }
    }
}

impl std::fmt::Display for Applied {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Applied::Yes => f.write_str("applied"),
            Applied::No(reason) => write!(f, "ignored: {}", reason),
        }
    }
}
