//! Bounded iterative solvers for properties with no closed-form inverse.
//!
//! Two psychrometric quantities must be recovered numerically: the wet-bulb
//! temperature for a known humidity ratio, and the humidity ratio for a
//! known enthalpy. Both solvers run a bounded loop and always report whether
//! the stopping tolerance was met. There is no silent "return the last
//! estimate" path: a capped loop is a [`NotConverged`] error carrying that
//! estimate, its residual, and the iteration count, so the caller decides
//! whether an approximate answer is acceptable.
//!
//! Like [`crate::correlations`], this module works on plain `f64` values in
//! the IP unit basis.

use thiserror::Error;

use crate::correlations::{enthalpy, humidity_ratio_from_wet_bulb};

/// Humidity-ratio tolerance for the wet-bulb solve, lb/lb.
pub const WET_BULB_TOLERANCE: f64 = 1e-5;

/// Iteration cap for the wet-bulb solve.
pub const WET_BULB_MAX_ITERATIONS: u32 = 100;

/// Seed gain for the wet-bulb iteration, °F per unit humidity-ratio error.
///
/// Used for the first step and as a fallback when the secant denominator
/// degenerates; see [`wet_bulb_temperature`].
pub const WET_BULB_ADJUSTMENT_FACTOR: f64 = 50.0;

/// Enthalpy tolerance for the humidity-ratio solve, Btu/lb.
pub const ENTHALPY_TOLERANCE: f64 = 0.01;

/// Iteration cap for the humidity-ratio solve.
pub const ENTHALPY_MAX_ITERATIONS: u32 = 50;

/// A successfully converged iterative solve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Iteration {
    /// The converged value, in the unit of the solved-for quantity.
    pub value: f64,
    /// Iterations consumed before the tolerance was met.
    pub iterations: u32,
}

/// An iterative solve that hit its iteration cap above tolerance.
///
/// Carries the last estimate so a caller may still use it knowingly.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
#[error(
    "solver hit its cap of {iterations} iterations \
     (last estimate {last_estimate}, residual {residual})"
)]
pub struct NotConverged {
    pub last_estimate: f64,
    pub residual: f64,
    pub iterations: u32,
}

/// Solves for the thermodynamic wet-bulb temperature, °F.
///
/// Finds the root of `humidity_ratio_from_wet_bulb(t, twb, p) - w`, the
/// ASHRAE psychrometric relation evaluated at a trial wet bulb. A plain
/// fixed-gain update (nudging the trial by the humidity-ratio error times
/// 50) contracts so slowly over the -100..200 °F, 0..100 % RH range that it
/// regularly needs several hundred iterations to reach the 1e-5 lb/lb
/// tolerance, so after seeding with one gain-50 step the update here is a
/// secant step, which converges in a handful of iterations.
///
/// At saturation the initial trial (the dry bulb itself) is already the
/// root and the solve returns immediately.
///
/// # Errors
///
/// Returns [`NotConverged`] if the tolerance is not met within
/// [`WET_BULB_MAX_ITERATIONS`].
pub fn wet_bulb_temperature(
    dry_bulb_f: f64,
    humidity_ratio: f64,
    total_pressure_psia: f64,
) -> Result<Iteration, NotConverged> {
    let residual =
        |twb: f64| humidity_ratio_from_wet_bulb(dry_bulb_f, twb, total_pressure_psia) - humidity_ratio;

    let mut previous = dry_bulb_f;
    let mut previous_residual = residual(previous);
    if previous_residual.abs() < WET_BULB_TOLERANCE {
        return Ok(Iteration {
            value: previous,
            iterations: 0,
        });
    }

    // Seed the secant with the original fixed-gain step.
    let mut current = previous - previous_residual * WET_BULB_ADJUSTMENT_FACTOR;
    let mut current_residual = residual(current);

    for iterations in 1..=WET_BULB_MAX_ITERATIONS {
        if current_residual.abs() < WET_BULB_TOLERANCE {
            return Ok(Iteration {
                value: current,
                iterations,
            });
        }

        let denominator = current_residual - previous_residual;
        let next = if denominator.abs() < f64::EPSILON {
            // Flat residual; fall back to the fixed-gain update.
            current - current_residual * WET_BULB_ADJUSTMENT_FACTOR
        } else {
            current - current_residual * (current - previous) / denominator
        };

        previous = current;
        previous_residual = current_residual;
        current = next;
        current_residual = residual(current);
    }

    Err(NotConverged {
        last_estimate: current,
        residual: current_residual,
        iterations: WET_BULB_MAX_ITERATIONS,
    })
}

/// Solves for the humidity ratio that reproduces a target enthalpy, lb/lb.
///
/// Scales a humidity-ratio guess by the ratio of target to computed enthalpy
/// until the computed enthalpy is within [`ENTHALPY_TOLERANCE`] of the
/// target. Enthalpy targets at or below the dry-air enthalpy `0.240·t` drive
/// the guess toward zero; the state layer screens those out before calling.
///
/// # Errors
///
/// Returns [`NotConverged`] if the tolerance is not met within
/// [`ENTHALPY_MAX_ITERATIONS`]. Very dry targets (humidity ratio near zero)
/// converge sublinearly and can land here; the carried estimate is then
/// accurate in temperature terms even though the enthalpy residual is not
/// yet inside tolerance.
pub fn humidity_ratio_from_enthalpy(
    dry_bulb_f: f64,
    target_enthalpy: f64,
) -> Result<Iteration, NotConverged> {
    let mut guess = 0.01;
    let mut computed = enthalpy(dry_bulb_f, guess);

    for iterations in 1..=ENTHALPY_MAX_ITERATIONS {
        if (computed - target_enthalpy).abs() < ENTHALPY_TOLERANCE {
            return Ok(Iteration {
                value: guess,
                iterations,
            });
        }

        guess *= target_enthalpy / computed;
        computed = enthalpy(dry_bulb_f, guess);
    }

    Err(NotConverged {
        last_estimate: guess,
        residual: computed - target_enthalpy,
        iterations: ENTHALPY_MAX_ITERATIONS,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_abs_diff_eq;

    use crate::correlations::{
        STANDARD_ATMOSPHERE_PSIA, humidity_ratio_from_partial_pressure, saturation_pressure,
    };

    #[test]
    fn saturated_air_converges_immediately() {
        let w = humidity_ratio_from_partial_pressure(
            saturation_pressure(75.0),
            STANDARD_ATMOSPHERE_PSIA,
        );
        let solved = wet_bulb_temperature(75.0, w, STANDARD_ATMOSPHERE_PSIA).unwrap();
        assert_eq!(solved.iterations, 0);
        assert_abs_diff_eq!(solved.value, 75.0, epsilon = 0.1);
    }

    #[test]
    fn wet_bulb_inverts_the_psychrometric_relation() {
        // 95 °F at wet bulb 75 °F has W near 0.0141; solving the inverse
        // problem must recover the wet bulb.
        let w = crate::correlations::humidity_ratio_from_wet_bulb(
            95.0,
            75.0,
            STANDARD_ATMOSPHERE_PSIA,
        );
        let solved = wet_bulb_temperature(95.0, w, STANDARD_ATMOSPHERE_PSIA).unwrap();
        assert_abs_diff_eq!(solved.value, 75.0, epsilon = 0.05);
        assert!(solved.iterations < WET_BULB_MAX_ITERATIONS);
    }

    #[test]
    fn wet_bulb_converges_across_the_operating_range() {
        for dry_bulb in [20.0, 40.0, 60.0, 80.0, 100.0, 140.0, 180.0] {
            for fraction in [0.1, 0.5, 0.9] {
                let pv = fraction * saturation_pressure(dry_bulb);
                let w = humidity_ratio_from_partial_pressure(pv, STANDARD_ATMOSPHERE_PSIA);
                let solved = wet_bulb_temperature(dry_bulb, w, STANDARD_ATMOSPHERE_PSIA)
                    .unwrap_or_else(|e| {
                        panic!("no convergence at {dry_bulb} °F, {fraction}: {e}")
                    });
                assert!(solved.value <= dry_bulb + 0.01);
            }
        }
    }

    #[test]
    fn enthalpy_solve_recovers_a_known_humidity_ratio() {
        let w = 0.0141;
        let h = crate::correlations::enthalpy(95.0, w);
        let solved = humidity_ratio_from_enthalpy(95.0, h).unwrap();
        assert_abs_diff_eq!(solved.value, w, epsilon = 1e-4);
    }

    #[test]
    fn enthalpy_solve_reports_an_unreachable_target() {
        // Target below the dry-air enthalpy at 75 °F (18 Btu/lb): the guess
        // decays toward zero but the residual can never close.
        let result = humidity_ratio_from_enthalpy(75.0, 10.0);
        let err = result.unwrap_err();
        assert_eq!(err.iterations, ENTHALPY_MAX_ITERATIONS);
        assert!(err.last_estimate >= 0.0);
    }
}
