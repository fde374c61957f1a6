//! Access categories and per-category storage.

use std::fmt;
use std::ops::{Index, IndexMut};

use serde::{Deserialize, Serialize};

/// Number of access categories the scheduler services.
pub const NUM_CLASSES: usize = 4;

/// Traffic class (802.11 access category).
///
/// The derived ordering follows priority: `Voice > Video > BestEffort > Background`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrafficClass {
    /// AC_BK, lowest priority.
    Background,
    /// AC_BE.
    BestEffort,
    /// AC_VI.
    Video,
    /// AC_VO, highest priority.
    Voice,
}

impl TrafficClass {
    /// All classes in service order, highest priority first.
    pub const PRIORITY_ORDER: [Self; NUM_CLASSES] =
        [Self::Voice, Self::Video, Self::BestEffort, Self::Background];

    /// Hardware queue index (AC0 = BK .. AC3 = VO).
    #[must_use]
    pub const fn hw_queue(self) -> usize {
        match self {
            Self::Background => 0,
            Self::BestEffort => 1,
            Self::Video => 2,
            Self::Voice => 3,
        }
    }

    /// Inverse of [`TrafficClass::hw_queue`].
    #[must_use]
    pub const fn from_hw_queue(index: usize) -> Option<Self> {
        match index {
            0 => Some(Self::Background),
            1 => Some(Self::BestEffort),
            2 => Some(Self::Video),
            3 => Some(Self::Voice),
            _ => None,
        }
    }

    /// Two-letter label used in reports.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Background => "BK",
            Self::BestEffort => "BE",
            Self::Video => "VI",
            Self::Voice => "VO",
        }
    }
}

impl fmt::Display for TrafficClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AC{} ({})", self.hw_queue(), self.label())
    }
}

/// Fixed-size map holding one value per traffic class.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassMap<T>([T; NUM_CLASSES]);

impl<T> ClassMap<T> {
    /// Build a map by evaluating `f` for every class.
    pub fn from_fn(mut f: impl FnMut(TrafficClass) -> T) -> Self {
        Self(std::array::from_fn(|i| {
            // from_fn only yields 0..NUM_CLASSES
            let class = TrafficClass::from_hw_queue(i).unwrap_or(TrafficClass::Background);
            f(class)
        }))
    }

    /// Iterate `(class, value)` pairs in priority order.
    pub fn iter(&self) -> impl Iterator<Item = (TrafficClass, &T)> + '_ {
        TrafficClass::PRIORITY_ORDER
            .into_iter()
            .map(move |class| (class, &self[class]))
    }
}

impl<T> Index<TrafficClass> for ClassMap<T> {
    type Output = T;

    fn index(&self, class: TrafficClass) -> &T {
        &self.0[class.hw_queue()]
    }
}

impl<T> IndexMut<TrafficClass> for ClassMap<T> {
    fn index_mut(&mut self, class: TrafficClass) -> &mut T {
        &mut self.0[class.hw_queue()]
    }
}
