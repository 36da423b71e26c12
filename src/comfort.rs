//! ASHRAE comfort-zone check.
//!
//! A pure predicate over a resolved state's dry bulb and relative humidity
//! against static seasonal bands. The bands are fixed configuration, not
//! something callers tune per invocation.

use uom::si::ratio::percent;

use crate::state::MoistAirState;
use crate::support::units::in_fahrenheit;

/// Season selecting which comfort band applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Season {
    Summer,
    Winter,
}

/// A seasonal comfort band: inclusive dry-bulb and relative-humidity ranges.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ComfortZone {
    pub dry_bulb_min_f: f64,
    pub dry_bulb_max_f: f64,
    pub relative_humidity_min_pct: f64,
    pub relative_humidity_max_pct: f64,
}

/// Summer comfort band per ASHRAE Standard 55.
pub const SUMMER: ComfortZone = ComfortZone {
    dry_bulb_min_f: 73.0,
    dry_bulb_max_f: 79.0,
    relative_humidity_min_pct: 30.0,
    relative_humidity_max_pct: 60.0,
};

/// Winter comfort band per ASHRAE Standard 55.
pub const WINTER: ComfortZone = ComfortZone {
    dry_bulb_min_f: 68.0,
    dry_bulb_max_f: 74.0,
    relative_humidity_min_pct: 30.0,
    relative_humidity_max_pct: 60.0,
};

impl ComfortZone {
    /// The band for a season.
    #[must_use]
    pub fn for_season(season: Season) -> Self {
        match season {
            Season::Summer => SUMMER,
            Season::Winter => WINTER,
        }
    }

    /// Whether a state falls inside this band.
    #[must_use]
    pub fn contains(&self, state: &MoistAirState) -> bool {
        let t = in_fahrenheit(state.dry_bulb);
        let rh = state.relative_humidity.get::<percent>();

        (self.dry_bulb_min_f..=self.dry_bulb_max_f).contains(&t)
            && (self.relative_humidity_min_pct..=self.relative_humidity_max_pct).contains(&rh)
    }
}

/// Whether a state is inside the comfort band for the given season.
#[must_use]
pub fn is_in_comfort_zone(state: &MoistAirState, season: Season) -> bool {
    ComfortZone::for_season(season).contains(state)
}
