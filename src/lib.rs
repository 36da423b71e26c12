//! # Psychro Models
//!
//! Psychrometric models of moist air: state reconstruction from partial
//! measurements, air-handling process models, and ventilation cooling
//! loads, built on the ASHRAE reference correlations.
//!
//! The crate is a pure, stateless computation library. Every function takes
//! explicit inputs and returns a new value; there is no shared mutable
//! state, no I/O, and no blocking, so it is safe to call concurrently from
//! any number of threads. Iterative solves are bounded and always report
//! whether they converged.
//!
//! ## Crate layout
//!
//! - [`state`]: [`MoistAirState`] and its five reconstruction paths.
//! - [`process`]: sensible, cooling-coil, evaporative, and mixing models.
//! - [`load`]: ventilation cooling-load calculation.
//! - [`comfort`]: seasonal comfort-zone predicate.
//! - [`correlations`]: the underlying ASHRAE formulas on their IP unit basis.
//! - [`solver`]: bounded iterative solvers with convergence reporting.
//! - [`support`]: numeric-constraint and unit utilities used by the models.
//!
//! ## Units
//!
//! The public API carries [`uom`] quantities; the correlation layer
//! underneath is fitted in IP units (°F, psia, Btu/lb) and documents that
//! basis. Callers relying on published ASHRAE chart comparisons get the
//! original constants, not re-fitted SI ones.
//!
//! ## Example
//!
//! ```
//! use psychro_models::{KnownProperty, MoistAirState};
//! use uom::si::{f64::Ratio, ratio::percent, thermodynamic_temperature::degree_fahrenheit};
//! use uom::si::f64::ThermodynamicTemperature;
//!
//! let state = MoistAirState::resolve_standard(
//!     ThermodynamicTemperature::new::<degree_fahrenheit>(75.0),
//!     KnownProperty::RelativeHumidity(Ratio::new::<percent>(50.0)),
//! )?;
//!
//! let humidity_ratio = state.humidity_ratio.get::<uom::si::ratio::ratio>();
//! assert!((humidity_ratio - 0.0093).abs() < 0.0005);
//! # Ok::<(), psychro_models::PsychroError>(())
//! ```

pub mod comfort;
pub mod correlations;
pub mod error;
pub mod load;
pub mod process;
pub mod solver;
pub mod state;
pub mod support;

pub use comfort::{ComfortZone, Season, is_in_comfort_zone};
pub use error::PsychroError;
pub use load::{CoolingLoad, cooling_load};
pub use process::{
    AirStream, BypassFactor, Effectiveness, Process, ProcessKind, cooling_coil, evaporative, mix,
    sensible,
};
pub use state::{KnownProperty, MoistAirState};
