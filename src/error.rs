//! Errors reported by psychrometric state and process calculations.

use thiserror::Error;

use crate::solver::NotConverged;
use crate::support::constraint::ConstraintError;

/// Errors that may occur when resolving a moist-air state or modeling a
/// process between states.
///
/// Every computation is pure and deterministic, so none of these are
/// retryable; they describe inputs the physical model cannot accept or a
/// solve that could not close.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PsychroError {
    /// The supplied wet bulb implies a negative humidity ratio or exceeds
    /// the dry bulb; no air at this dry bulb can produce that reading.
    #[error("wet bulb {wet_bulb_f} °F is inconsistent with dry bulb {dry_bulb_f} °F")]
    InconsistentWetBulb { wet_bulb_f: f64, dry_bulb_f: f64 },

    /// The supplied dew point is above the dry bulb.
    #[error("dew point {dew_point_f} °F is above dry bulb {dry_bulb_f} °F")]
    DewPointAboveDryBulb { dew_point_f: f64, dry_bulb_f: f64 },

    /// Relative humidity must lie within 0 to 100 percent.
    #[error("relative humidity {value_pct} % is outside 0 to 100 %")]
    RelativeHumidityOutOfRange { value_pct: f64 },

    /// Humidity ratio must be non-negative.
    #[error("humidity ratio {value} lb/lb is negative")]
    NegativeHumidityRatio { value: f64 },

    /// The input describes air holding more water than saturation allows.
    ///
    /// Flagged instead of clamped: a derived relative humidity above 100 %
    /// means the input is supersaturated or inconsistent, and silently
    /// pulling it back to the saturation curve would hide that.
    #[error("supersaturated state: derived relative humidity {relative_humidity_pct} %")]
    Supersaturated { relative_humidity_pct: f64 },

    /// The enthalpy target is below the dry-air enthalpy at this dry bulb,
    /// so no non-negative humidity ratio can reach it.
    #[error(
        "enthalpy {enthalpy} Btu/lb is below the dry-air enthalpy \
         {dry_air_enthalpy} Btu/lb at {dry_bulb_f} °F"
    )]
    EnthalpyBelowDryAir {
        enthalpy: f64,
        dry_air_enthalpy: f64,
        dry_bulb_f: f64,
    },

    /// A cooling coil must be colder than the air entering it.
    #[error("coil temperature {coil_f} °F is not below inlet dry bulb {dry_bulb_f} °F")]
    CoilNotBelowInlet { coil_f: f64, dry_bulb_f: f64 },

    /// A load calculation needs a positive airflow to move heat and to
    /// back-solve a supply condition.
    #[error("airflow {cfm} cfm is not positive")]
    NonPositiveAirflow { cfm: f64 },

    /// Mixed air streams must share a total pressure.
    #[error("mixed streams are at different pressures: {left_psia} psia and {right_psia} psia")]
    PressureMismatch { left_psia: f64, right_psia: f64 },

    /// An iterative solve hit its iteration cap above tolerance.
    #[error(transparent)]
    NotConverged(#[from] NotConverged),

    /// A process parameter violated its numeric constraint.
    #[error(transparent)]
    Constraint(#[from] ConstraintError),
}
