//! Ventilation-driven cooling-load calculation.
//!
//! Combines an indoor and an outdoor state with an airflow and internal
//! gains into sensible, latent, and total loads, then back-solves the
//! supply-air condition required to offset those loads at that airflow.
//!
//! The ventilation portion uses the actual dry-air mass flow (airflow over
//! the indoor specific volume); the supply-air back-solve uses the standard
//! airflow factors `1.08 · cfm · Δt` and `4840 · cfm · ΔW`, which bake in
//! standard-density air and are how supply conditions are quoted in
//! practice.

use uom::si::{
    available_energy::btu_it_per_pound,
    f64::{Power, Ratio, ThermodynamicTemperature, VolumeRate},
    ratio::ratio,
    volume_rate::cubic_foot_per_minute,
};

use crate::correlations::DRY_AIR_SPECIFIC_HEAT;
use crate::error::PsychroError;
use crate::state::MoistAirState;
use crate::support::units::{
    TemperatureDifference, btu_per_hour, fahrenheit, in_btu_per_hour, in_cubic_feet_per_pound,
    in_fahrenheit, in_fahrenheit_degrees,
};

/// Sensible airflow factor, Btu/(hr·cfm·°F): 60 min/hr times standard
/// density 0.075 lb/ft³ times 0.240 Btu/(lb·°F).
const SENSIBLE_AIRFLOW_FACTOR: f64 = 1.08;

/// Latent airflow factor, Btu/(hr·cfm) per unit humidity-ratio difference:
/// 60 min/hr times 0.075 lb/ft³ times roughly 1076 Btu/lb of vaporization.
const LATENT_AIRFLOW_FACTOR: f64 = 4840.0;

/// The load on a space and the supply air required to offset it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoolingLoad {
    /// Ventilation sensible load plus internal sensible gains, Btu/hr.
    pub sensible_load: Power,
    /// Ventilation latent load plus internal latent gains, Btu/hr.
    pub latent_load: Power,
    /// Sum of sensible and latent loads, Btu/hr.
    pub total_load: Power,
    /// Supply dry bulb that absorbs the sensible load at the given airflow.
    pub required_supply_temperature: ThermodynamicTemperature,
    /// Supply humidity ratio that absorbs the latent load, lb/lb.
    pub required_supply_humidity_ratio: Ratio,
}

/// Computes the cooling load for a space held at `indoor` against `outdoor`
/// ventilation air, with internal gains added on top.
///
/// The ventilation air mass flow comes from the indoor specific volume; its
/// total load is the enthalpy difference between outdoor and indoor air,
/// split into a `0.240 · Δt` sensible part and a latent remainder. Loads
/// are positive when heat enters the space.
///
/// # Errors
///
/// Returns [`PsychroError::NonPositiveAirflow`] when the airflow is zero or
/// negative; the supply back-solve divides by the airflow.
pub fn cooling_load(
    indoor: &MoistAirState,
    outdoor: &MoistAirState,
    airflow: VolumeRate,
    sensible_gain: Power,
    latent_gain: Power,
) -> Result<CoolingLoad, PsychroError> {
    let cfm = airflow.get::<cubic_foot_per_minute>();
    if cfm <= 0.0 {
        return Err(PsychroError::NonPositiveAirflow { cfm });
    }

    let mass_flow_lb_per_hr = 60.0 * cfm / in_cubic_feet_per_pound(indoor.specific_volume);

    let t_indoor = in_fahrenheit(indoor.dry_bulb);
    let delta_t = in_fahrenheit_degrees(outdoor.dry_bulb.minus(indoor.dry_bulb));
    let delta_h = outdoor.enthalpy.get::<btu_it_per_pound>()
        - indoor.enthalpy.get::<btu_it_per_pound>();

    let ventilation_total = mass_flow_lb_per_hr * delta_h;
    let ventilation_sensible = mass_flow_lb_per_hr * DRY_AIR_SPECIFIC_HEAT * delta_t;
    let ventilation_latent = ventilation_total - ventilation_sensible;

    let sensible_load = ventilation_sensible + in_btu_per_hour(sensible_gain);
    let latent_load = ventilation_latent + in_btu_per_hour(latent_gain);

    let supply_temperature_f = t_indoor - sensible_load / (SENSIBLE_AIRFLOW_FACTOR * cfm);
    let supply_humidity_ratio = indoor.humidity_ratio.get::<ratio>()
        - latent_load / (LATENT_AIRFLOW_FACTOR * cfm);

    Ok(CoolingLoad {
        sensible_load: btu_per_hour(sensible_load),
        latent_load: btu_per_hour(latent_load),
        total_load: btu_per_hour(sensible_load + latent_load),
        required_supply_temperature: fahrenheit(supply_temperature_f),
        required_supply_humidity_ratio: Ratio::new::<ratio>(supply_humidity_ratio),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use uom::si::ratio::percent;

    use crate::state::KnownProperty;

    fn state(dry_bulb_f: f64, rh_pct: f64) -> MoistAirState {
        MoistAirState::resolve_standard(
            fahrenheit(dry_bulb_f),
            KnownProperty::RelativeHumidity(Ratio::new::<percent>(rh_pct)),
        )
        .unwrap()
    }

    #[test]
    fn ventilation_sensible_load_tracks_the_airflow_factor() {
        // With no internal gains, 1000 cfm across a 20 °F delta should land
        // near 1.08 · 1000 · 20; the mass-flow form differs only through
        // the indoor specific volume versus standard density.
        let indoor = state(75.0, 50.0);
        let outdoor = state(95.0, 40.0);
        let load = cooling_load(
            &indoor,
            &outdoor,
            VolumeRate::new::<cubic_foot_per_minute>(1000.0),
            btu_per_hour(0.0),
            btu_per_hour(0.0),
        )
        .unwrap();

        assert_relative_eq!(
            in_btu_per_hour(load.sensible_load),
            1.08 * 1000.0 * 20.0,
            max_relative = 0.05
        );
        assert!(in_btu_per_hour(load.latent_load) > 0.0);
        assert_abs_diff_eq!(
            in_btu_per_hour(load.total_load),
            in_btu_per_hour(load.sensible_load) + in_btu_per_hour(load.latent_load),
            epsilon = 1e-6
        );
    }

    #[test]
    fn internal_gains_add_directly() {
        let indoor = state(75.0, 50.0);
        let outdoor = state(95.0, 40.0);
        let cfm = VolumeRate::new::<cubic_foot_per_minute>(1000.0);

        let without =
            cooling_load(&indoor, &outdoor, cfm, btu_per_hour(0.0), btu_per_hour(0.0)).unwrap();
        let with = cooling_load(
            &indoor,
            &outdoor,
            cfm,
            btu_per_hour(12_000.0),
            btu_per_hour(3_000.0),
        )
        .unwrap();

        assert_abs_diff_eq!(
            in_btu_per_hour(with.sensible_load) - in_btu_per_hour(without.sensible_load),
            12_000.0,
            epsilon = 1e-6
        );
        assert_abs_diff_eq!(
            in_btu_per_hour(with.latent_load) - in_btu_per_hour(without.latent_load),
            3_000.0,
            epsilon = 1e-6
        );
    }

    #[test]
    fn supply_air_offsets_the_load_at_the_given_airflow() {
        let indoor = state(75.0, 50.0);
        let outdoor = state(95.0, 40.0);
        let cfm = 1200.0;
        let load = cooling_load(
            &indoor,
            &outdoor,
            VolumeRate::new::<cubic_foot_per_minute>(cfm),
            btu_per_hour(9_000.0),
            btu_per_hour(2_000.0),
        )
        .unwrap();

        // Supplying at the computed condition absorbs exactly the loads by
        // the same airflow factors.
        let supply_t = in_fahrenheit(load.required_supply_temperature);
        let absorbed_sensible = 1.08 * cfm * (75.0 - supply_t);
        assert_abs_diff_eq!(
            absorbed_sensible,
            in_btu_per_hour(load.sensible_load),
            epsilon = 1e-6
        );
        assert!(supply_t < 75.0);

        let supply_w = load.required_supply_humidity_ratio.get::<ratio>();
        let absorbed_latent =
            4840.0 * cfm * (indoor.humidity_ratio.get::<ratio>() - supply_w);
        assert_abs_diff_eq!(
            absorbed_latent,
            in_btu_per_hour(load.latent_load),
            epsilon = 1e-6
        );
        assert!(supply_w < indoor.humidity_ratio.get::<ratio>());
    }

    #[test]
    fn zero_airflow_is_rejected() {
        // The supply back-solve divides by the airflow, so nothing sensible
        // can come back from zero cfm.
        let indoor = state(75.0, 50.0);
        let outdoor = state(95.0, 40.0);
        let result = cooling_load(
            &indoor,
            &outdoor,
            VolumeRate::new::<cubic_foot_per_minute>(0.0),
            btu_per_hour(12_000.0),
            btu_per_hour(3_000.0),
        );
        assert!(matches!(
            result,
            Err(PsychroError::NonPositiveAirflow { .. })
        ));
    }
}
