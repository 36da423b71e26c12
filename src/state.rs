//! Moist-air state representation and reconstruction.
//!
//! A [`MoistAirState`] is one equilibrium condition of moist air: dry bulb,
//! wet bulb, dew point, relative humidity, humidity ratio, enthalpy,
//! specific volume, and total pressure, all mutually consistent. States are
//! immutable value objects; every computation builds a fresh one.
//!
//! Reconstruction starts from a dry-bulb temperature plus exactly one
//! alternate property, expressed as the [`KnownProperty`] sum type. Making
//! the alternate property a sum type (rather than an optional-field bag)
//! turns "exactly one was supplied" into a structural guarantee, so the
//! dispatcher in [`MoistAirState::resolve`] only deals with physics, not
//! input-shape policing.
//!
//! # Consistency
//!
//! A resolved state re-derives its relative humidity from the humidity
//! ratio and dry bulb to within ±0.5 % of any supplied value, and the five
//! entry points agree with one another for physically identical conditions.
//! Supersaturated inputs (derived relative humidity above 100 %) are
//! rejected with [`PsychroError::Supersaturated`], never clamped.

use uom::si::{
    available_energy::btu_it_per_pound,
    f64::{AvailableEnergy, Pressure, Ratio, SpecificVolume, ThermodynamicTemperature},
    ratio::{percent, ratio},
};

use crate::correlations;
use crate::error::PsychroError;
use crate::solver;
use crate::support::constraint::NonNegative;
use crate::support::units::{cubic_feet_per_pound, fahrenheit, in_fahrenheit, in_psia, psia};

/// Slack allowed on a derived relative humidity before the state is
/// declared supersaturated, in percentage points.
///
/// Matches the crate-wide ±0.5 % consistency tolerance; blend processes that
/// ride along the saturation curve can overshoot 100 % by numerical noise
/// without being physically wrong.
const SUPERSATURATION_TOLERANCE_PCT: f64 = 0.5;

/// The one alternate property supplied alongside the dry-bulb temperature.
///
/// Each variant carries exactly the quantity its reconstruction path needs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum KnownProperty {
    /// Thermodynamic wet-bulb temperature.
    WetBulb(ThermodynamicTemperature),
    /// Relative humidity, 0 to 100 %.
    RelativeHumidity(Ratio),
    /// Dew-point temperature.
    DewPoint(ThermodynamicTemperature),
    /// Humidity ratio, lb water per lb dry air.
    HumidityRatio(Ratio),
    /// Specific enthalpy per lb dry air.
    Enthalpy(AvailableEnergy),
}

/// One fully resolved equilibrium condition of moist air.
///
/// All intensive properties are reported per pound of dry air, the
/// conventional psychrometric basis. `dew_point` is `None` when it was not
/// the supplied property and the vapor pressure is below the dew-point
/// correlation's valid range (about 0.18 psia; see
/// [`correlations::dew_point_temperature`]) -- the air still has a physical
/// dew point, the correlation just cannot produce it. A caller-supplied dew
/// point is always carried through.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoistAirState {
    pub dry_bulb: ThermodynamicTemperature,
    pub wet_bulb: ThermodynamicTemperature,
    pub dew_point: Option<ThermodynamicTemperature>,
    pub relative_humidity: Ratio,
    pub humidity_ratio: Ratio,
    pub enthalpy: AvailableEnergy,
    pub specific_volume: SpecificVolume,
    pub pressure: Pressure,
}

impl MoistAirState {
    /// Resolves a complete state from a dry bulb and one alternate property.
    ///
    /// Dispatches to one of five reconstruction paths depending on the
    /// [`KnownProperty`] variant. Paths that need the wet bulb derive it
    /// with the bounded solver in [`crate::solver`]; the enthalpy path also
    /// inverts enthalpy to a humidity ratio iteratively.
    ///
    /// # Errors
    ///
    /// Returns a [`PsychroError`] for physically inconsistent inputs (wet
    /// bulb or dew point above the dry bulb, relative humidity outside 0 to
    /// 100 %, negative humidity ratio, enthalpy below the dry-air enthalpy,
    /// supersaturated combinations) or if an iterative solve fails to
    /// converge.
    pub fn resolve(
        dry_bulb: ThermodynamicTemperature,
        known: KnownProperty,
        pressure: Pressure,
    ) -> Result<Self, PsychroError> {
        let t = in_fahrenheit(dry_bulb);
        let p = in_psia(pressure);

        match known {
            KnownProperty::WetBulb(wet_bulb) => Self::from_wet_bulb(t, in_fahrenheit(wet_bulb), p),
            KnownProperty::RelativeHumidity(rh) => {
                Self::from_relative_humidity(t, rh.get::<percent>(), p)
            }
            KnownProperty::DewPoint(dew_point) => {
                Self::from_dew_point(t, in_fahrenheit(dew_point), p)
            }
            KnownProperty::HumidityRatio(w) => Self::from_parts(t, w.get::<ratio>(), p, None, None),
            KnownProperty::Enthalpy(h) => Self::from_enthalpy(t, h.get::<btu_it_per_pound>(), p),
        }
    }

    /// Resolves a state at the standard atmosphere, 14.696 psia.
    ///
    /// # Errors
    ///
    /// Same as [`MoistAirState::resolve`].
    pub fn resolve_standard(
        dry_bulb: ThermodynamicTemperature,
        known: KnownProperty,
    ) -> Result<Self, PsychroError> {
        Self::resolve(
            dry_bulb,
            known,
            psia(correlations::STANDARD_ATMOSPHERE_PSIA),
        )
    }

    fn from_wet_bulb(t: f64, wet_bulb_f: f64, p: f64) -> Result<Self, PsychroError> {
        if wet_bulb_f > t {
            return Err(PsychroError::InconsistentWetBulb {
                wet_bulb_f,
                dry_bulb_f: t,
            });
        }

        let w = correlations::humidity_ratio_from_wet_bulb(t, wet_bulb_f, p);
        if w < 0.0 {
            // A wet bulb this far below the dry bulb would require air drier
            // than dry.
            return Err(PsychroError::InconsistentWetBulb {
                wet_bulb_f,
                dry_bulb_f: t,
            });
        }

        Self::from_parts(t, w, p, Some(wet_bulb_f), None)
    }

    fn from_relative_humidity(t: f64, rh_pct: f64, p: f64) -> Result<Self, PsychroError> {
        if !(0.0..=100.0).contains(&rh_pct) {
            return Err(PsychroError::RelativeHumidityOutOfRange { value_pct: rh_pct });
        }

        let pv = (rh_pct / 100.0) * correlations::saturation_pressure(t);
        let w = correlations::humidity_ratio_from_partial_pressure(pv, p);
        Self::from_parts(t, w, p, None, None)
    }

    fn from_dew_point(t: f64, dew_point_f: f64, p: f64) -> Result<Self, PsychroError> {
        if dew_point_f > t {
            return Err(PsychroError::DewPointAboveDryBulb {
                dew_point_f,
                dry_bulb_f: t,
            });
        }

        // At its dew point the air is saturated, so the actual vapor
        // pressure equals the saturation pressure there. The supplied dew
        // point is carried into the state directly; re-deriving it from the
        // vapor pressure would lose it below the correlation floor.
        let pv = correlations::saturation_pressure(dew_point_f);
        let w = correlations::humidity_ratio_from_partial_pressure(pv, p);
        Self::from_parts(t, w, p, None, Some(dew_point_f))
    }

    fn from_enthalpy(t: f64, enthalpy: f64, p: f64) -> Result<Self, PsychroError> {
        // The rejection carries the solver tolerance as slack so a target at
        // exactly the dry-air enthalpy survives unit-conversion rounding.
        let dry_air_enthalpy = correlations::DRY_AIR_SPECIFIC_HEAT * t;
        if dry_air_enthalpy - enthalpy > solver::ENTHALPY_TOLERANCE {
            return Err(PsychroError::EnthalpyBelowDryAir {
                enthalpy,
                dry_air_enthalpy,
                dry_bulb_f: t,
            });
        }

        // Targets within tolerance of dry air converge sublinearly in the
        // solver; the answer is simply dry air.
        let w = if enthalpy - dry_air_enthalpy < solver::ENTHALPY_TOLERANCE {
            0.0
        } else {
            solver::humidity_ratio_from_enthalpy(t, enthalpy)?.value
        };

        Self::from_parts(t, w, p, None, None)
    }

    /// Completes a state from dry bulb, humidity ratio, and pressure.
    ///
    /// Every reconstruction path funnels through here once it has the
    /// humidity ratio, which keeps the entry points mutually consistent by
    /// construction. `wet_bulb_f` short-circuits the solver when the wet
    /// bulb was the supplied property, and `dew_point_f` carries a supplied
    /// dew point through instead of re-deriving it.
    fn from_parts(
        t: f64,
        w: f64,
        p: f64,
        wet_bulb_f: Option<f64>,
        dew_point_f: Option<f64>,
    ) -> Result<Self, PsychroError> {
        let w = NonNegative::new(w)
            .map_err(|_| PsychroError::NegativeHumidityRatio { value: w })?
            .into_inner();

        let pv = correlations::partial_pressure_from_humidity_ratio(w, p);
        let pws = correlations::saturation_pressure(t);
        let rh_pct = correlations::relative_humidity(pv, pws);
        if rh_pct > 100.0 + SUPERSATURATION_TOLERANCE_PCT {
            return Err(PsychroError::Supersaturated {
                relative_humidity_pct: rh_pct,
            });
        }

        let wet_bulb_f = match wet_bulb_f {
            Some(value) => value,
            None => solver::wet_bulb_temperature(t, w, p)?.value,
        };

        let dew_point = match dew_point_f {
            Some(value) => Some(fahrenheit(value)),
            None => correlations::dew_point_temperature(pv).ok().map(fahrenheit),
        };

        Ok(Self {
            dry_bulb: fahrenheit(t),
            wet_bulb: fahrenheit(wet_bulb_f),
            dew_point,
            relative_humidity: Ratio::new::<percent>(rh_pct),
            humidity_ratio: Ratio::new::<ratio>(w),
            enthalpy: AvailableEnergy::new::<btu_it_per_pound>(correlations::enthalpy(t, w)),
            specific_volume: cubic_feet_per_pound(correlations::specific_volume(t, w, p)),
            pressure: psia(p),
        })
    }

    /// Water-vapor partial pressure of this state.
    #[must_use]
    pub fn vapor_pressure(&self) -> Pressure {
        psia(correlations::partial_pressure_from_humidity_ratio(
            self.humidity_ratio.get::<ratio>(),
            in_psia(self.pressure),
        ))
    }

    /// Degree of saturation: the humidity ratio relative to the saturation
    /// humidity ratio at the same dry bulb and pressure.
    #[must_use]
    pub fn degree_of_saturation(&self) -> Ratio {
        let ws = correlations::saturation_humidity_ratio(
            in_fahrenheit(self.dry_bulb),
            in_psia(self.pressure),
        );
        Ratio::new::<ratio>(self.humidity_ratio.get::<ratio>() / ws)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::{assert_abs_diff_eq, assert_relative_eq};

    fn resolve_standard(dry_bulb_f: f64, known: KnownProperty) -> MoistAirState {
        MoistAirState::resolve_standard(fahrenheit(dry_bulb_f), known).unwrap()
    }

    fn rh_percent(value: f64) -> KnownProperty {
        KnownProperty::RelativeHumidity(Ratio::new::<percent>(value))
    }

    #[test]
    fn chart_point_75_f_at_50_percent() {
        let state = resolve_standard(75.0, rh_percent(50.0));

        assert_abs_diff_eq!(
            state.humidity_ratio.get::<ratio>(),
            0.00929,
            epsilon = 2e-4
        );
        assert_abs_diff_eq!(
            state.enthalpy.get::<btu_it_per_pound>(),
            28.1,
            epsilon = 0.2
        );
        assert_abs_diff_eq!(
            in_fahrenheit(state.dew_point.unwrap()),
            55.1,
            epsilon = 1.0
        );
        assert_relative_eq!(
            crate::support::units::in_cubic_feet_per_pound(state.specific_volume),
            13.68,
            max_relative = 5e-3
        );
    }

    #[test]
    fn chart_point_95_f_at_wet_bulb_75() {
        let state = resolve_standard(95.0, KnownProperty::WetBulb(fahrenheit(75.0)));

        assert_abs_diff_eq!(
            state.humidity_ratio.get::<ratio>(),
            0.0141,
            epsilon = 0.001
        );
        assert_abs_diff_eq!(state.relative_humidity.get::<percent>(), 39.0, epsilon = 2.0);
        assert_abs_diff_eq!(in_fahrenheit(state.wet_bulb), 75.0, epsilon = 1e-9);
    }

    #[test]
    fn relative_humidity_round_trips_within_half_a_percent() {
        for dry_bulb in [40.0, 60.0, 75.0, 90.0, 110.0] {
            for rh in [10.0, 35.0, 50.0, 75.0, 100.0] {
                let state = resolve_standard(dry_bulb, rh_percent(rh));
                assert_abs_diff_eq!(
                    state.relative_humidity.get::<percent>(),
                    rh,
                    epsilon = 0.5
                );

                // Re-derive from the humidity ratio alone.
                let again = resolve_standard(
                    dry_bulb,
                    KnownProperty::HumidityRatio(state.humidity_ratio),
                );
                assert_abs_diff_eq!(
                    again.relative_humidity.get::<percent>(),
                    rh,
                    epsilon = 0.5
                );
            }
        }
    }

    #[test]
    fn every_entry_point_agrees_on_the_same_air() {
        let reference = resolve_standard(80.0, rh_percent(60.0));

        let from_w = resolve_standard(
            80.0,
            KnownProperty::HumidityRatio(reference.humidity_ratio),
        );
        let from_h = resolve_standard(80.0, KnownProperty::Enthalpy(reference.enthalpy));
        let from_wb = resolve_standard(80.0, KnownProperty::WetBulb(reference.wet_bulb));
        let from_dp = resolve_standard(
            80.0,
            KnownProperty::DewPoint(reference.dew_point.unwrap()),
        );

        for other in [from_w, from_h, from_wb, from_dp] {
            assert_abs_diff_eq!(
                other.humidity_ratio.get::<ratio>(),
                reference.humidity_ratio.get::<ratio>(),
                epsilon = 2e-4
            );
            assert_abs_diff_eq!(
                other.relative_humidity.get::<percent>(),
                reference.relative_humidity.get::<percent>(),
                epsilon = 1.0
            );
        }
    }

    #[test]
    fn saturated_air_collapses_wet_bulb_and_dew_point_onto_the_dry_bulb() {
        let state = resolve_standard(75.0, rh_percent(100.0));
        assert_abs_diff_eq!(in_fahrenheit(state.wet_bulb), 75.0, epsilon = 0.1);
        assert_abs_diff_eq!(in_fahrenheit(state.dew_point.unwrap()), 75.0, epsilon = 0.1);
        assert_abs_diff_eq!(
            state.degree_of_saturation().get::<ratio>(),
            1.0,
            epsilon = 1e-6
        );
    }

    #[test]
    fn dew_point_is_absent_below_the_correlation_range() {
        // 70 °F at 30 % RH has a vapor pressure near 0.11 psia, under the
        // 0.18 psia floor of the dew-point polynomial.
        let state = resolve_standard(70.0, rh_percent(30.0));
        assert!(state.dew_point.is_none());
    }

    #[test]
    fn supplied_dew_point_is_kept_below_the_correlation_range() {
        // A 30 °F dew point sits well under the 0.18 psia floor, but the
        // caller handed it in, so the state must report it back.
        let state = resolve_standard(70.0, KnownProperty::DewPoint(fahrenheit(30.0)));
        assert_abs_diff_eq!(
            in_fahrenheit(state.dew_point.unwrap()),
            30.0,
            epsilon = 1e-9
        );
    }

    #[test]
    fn inconsistent_inputs_are_rejected() {
        let at = |t: f64, known| MoistAirState::resolve_standard(fahrenheit(t), known);

        assert!(matches!(
            at(75.0, KnownProperty::WetBulb(fahrenheit(80.0))),
            Err(PsychroError::InconsistentWetBulb { .. })
        ));
        assert!(matches!(
            at(75.0, KnownProperty::DewPoint(fahrenheit(80.0))),
            Err(PsychroError::DewPointAboveDryBulb { .. })
        ));
        assert!(matches!(
            at(75.0, rh_percent(120.0)),
            Err(PsychroError::RelativeHumidityOutOfRange { .. })
        ));
        assert!(matches!(
            at(75.0, rh_percent(-5.0)),
            Err(PsychroError::RelativeHumidityOutOfRange { .. })
        ));
        assert!(matches!(
            at(
                75.0,
                KnownProperty::HumidityRatio(Ratio::new::<ratio>(-0.001))
            ),
            Err(PsychroError::NegativeHumidityRatio { .. })
        ));
        assert!(matches!(
            at(
                75.0,
                KnownProperty::Enthalpy(AvailableEnergy::new::<btu_it_per_pound>(10.0))
            ),
            Err(PsychroError::EnthalpyBelowDryAir { .. })
        ));
    }

    #[test]
    fn supersaturated_input_is_flagged_not_clamped() {
        let ws = crate::correlations::saturation_humidity_ratio(
            75.0,
            crate::correlations::STANDARD_ATMOSPHERE_PSIA,
        );
        let result = MoistAirState::resolve_standard(
            fahrenheit(75.0),
            KnownProperty::HumidityRatio(Ratio::new::<ratio>(1.2 * ws)),
        );
        assert!(matches!(
            result,
            Err(PsychroError::Supersaturated { .. })
        ));
    }

    #[test]
    fn very_dry_enthalpy_target_resolves_as_dry_air() {
        let state = resolve_standard(
            75.0,
            KnownProperty::Enthalpy(AvailableEnergy::new::<btu_it_per_pound>(
                crate::correlations::DRY_AIR_SPECIFIC_HEAT * 75.0,
            )),
        );
        assert_abs_diff_eq!(state.humidity_ratio.get::<ratio>(), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn dry_air_enthalpy_boundary_tolerates_conversion_noise() {
        // A target a hair under 0.240 · t still resolves as dry air; only
        // targets below the boundary by more than the solver tolerance are
        // rejected.
        let dry_air = crate::correlations::DRY_AIR_SPECIFIC_HEAT * 75.0;
        let state = resolve_standard(
            75.0,
            KnownProperty::Enthalpy(AvailableEnergy::new::<btu_it_per_pound>(dry_air - 1e-9)),
        );
        assert_abs_diff_eq!(state.humidity_ratio.get::<ratio>(), 0.0, epsilon = 1e-12);

        let rejected = MoistAirState::resolve_standard(
            fahrenheit(75.0),
            KnownProperty::Enthalpy(AvailableEnergy::new::<btu_it_per_pound>(dry_air - 1.0)),
        );
        assert!(matches!(
            rejected,
            Err(PsychroError::EnthalpyBelowDryAir { .. })
        ));
    }
}
