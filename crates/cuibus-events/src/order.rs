//! Dispatch priorities.
//!
//! [`Order`] is a fixed, totally ordered set of slots. Listeners registered in
//! a lower slot always run before listeners in a higher one, regardless of
//! when they were registered. `Monitor` is reserved for observers that only
//! watch the outcome and should not be relied upon to change it.

use strum::{Display, EnumString};

/// Priority slot controlling the sequence in which listeners are invoked.
///
/// Comparison follows declaration order, so `Order::Earliest < Order::Monitor`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, EnumString)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Order {
    /// Runs before every other slot.
    Earliest,
    /// Runs early, after `Earliest`.
    Early,
    /// The slot most listeners should use.
    Default,
    /// Runs late, after `Default`.
    Late,
    /// Last slot allowed to react to the event.
    Latest,
    /// Observation only. Runs after everything else.
    Monitor,
}

impl Order {
    /// Every slot in ascending rank.
    pub const ALL: [Self; 6] = [
        Self::Earliest,
        Self::Early,
        Self::Default,
        Self::Late,
        Self::Latest,
        Self::Monitor,
    ];

    /// Returns the zero-based rank of the slot.
    #[must_use]
    pub const fn rank(self) -> usize {
        match self {
            Self::Earliest => 0,
            Self::Early => 1,
            Self::Default => 2,
            Self::Late => 3,
            Self::Latest => 4,
            Self::Monitor => 5,
        }
    }
}
