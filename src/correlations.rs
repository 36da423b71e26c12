//! ASHRAE moist-air property correlations.
//!
//! These are the closed-form building blocks of the crate: the Hyland-Wexler
//! saturation pressure curves and the direct conversions between vapor
//! pressure, humidity ratio, enthalpy, and specific volume.
//!
//! # Unit basis
//!
//! Every function in this module works on plain `f64` values in the IP unit
//! basis of the published ASHRAE formulas:
//!
//! - temperature in °F,
//! - pressure in psia,
//! - humidity ratio in lb water per lb dry air,
//! - enthalpy in Btu per lb dry air,
//! - specific volume in ft³ per lb dry air.
//!
//! The correlation constants are tied to this basis and must not be reused
//! with SI inputs. Callers working in [`uom`] quantities (see
//! [`crate::state`]) convert at the boundary.
//!
//! # Reference
//!
//! ASHRAE Handbook -- Fundamentals, "Psychrometrics" chapter, IP edition.

use thiserror::Error;

/// Standard atmospheric pressure, psia.
pub const STANDARD_ATMOSPHERE_PSIA: f64 = 14.696;

/// Ratio of the molecular mass of water vapor to that of dry air.
pub const MOLECULAR_MASS_RATIO: f64 = 0.621_945;

/// Specific heat of dry air, Btu/(lb·°F).
pub const DRY_AIR_SPECIFIC_HEAT: f64 = 0.240;

/// Lowest vapor pressure the dew-point correlation covers, psia.
///
/// Below this the polynomial in [`dew_point_temperature`] is outside its
/// fitted range and the function reports [`BelowValidRange`] instead of
/// extrapolating.
pub const DEW_POINT_MIN_VAPOR_PRESSURE_PSIA: f64 = 0.18;

/// The requested vapor pressure is below the dew-point correlation's range.
///
/// This is a domain-limit marker, not a physical result. It is an explicit
/// error rather than an in-band sentinel value so callers cannot mistake it
/// for a real dew point.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
#[error(
    "vapor pressure {vapor_pressure_psia} psia is below the dew-point \
     correlation range ({DEW_POINT_MIN_VAPOR_PRESSURE_PSIA} psia)"
)]
pub struct BelowValidRange {
    pub vapor_pressure_psia: f64,
}

/// Saturation pressure of water vapor, psia.
///
/// Uses the ASHRAE correlation over ice for `temperature_f < 32.0` and over
/// liquid water for `temperature_f >= 32.0`. Exactly 32 °F evaluates on the
/// liquid branch; the two ASHRAE fits meet there to within a few hundredths
/// of a percent, so either assignment is defensible at the triple point.
///
/// Valid from -100 °F to 200 °F, where it reproduces published values to
/// four significant figures and is strictly increasing.
#[must_use]
pub fn saturation_pressure(temperature_f: f64) -> f64 {
    let t_rankine = rankine(temperature_f);

    let ln_pws = if temperature_f < 32.0 {
        saturation_ln_over_ice(t_rankine)
    } else {
        saturation_ln_over_water(t_rankine)
    };

    ln_pws.exp()
}

// Hyland-Wexler over ice, -148 °F to 32 °F, T in °R, result ln(psia).
fn saturation_ln_over_ice(t: f64) -> f64 {
    const C1: f64 = -1.021_416_5e4;
    const C2: f64 = -4.893_242_8;
    const C3: f64 = -5.376_579_4e-3;
    const C4: f64 = 1.920_237_7e-7;
    const C5: f64 = 3.557_583_2e-10;
    const C6: f64 = -9.034_468_8e-14;
    const C7: f64 = 4.163_501_9;

    C1 / t + C2 + C3 * t + C4 * t * t + C5 * t.powi(3) + C6 * t.powi(4) + C7 * t.ln()
}

// Hyland-Wexler over liquid water, 32 °F to 392 °F, T in °R, result ln(psia).
fn saturation_ln_over_water(t: f64) -> f64 {
    const C8: f64 = -1.044_039_7e4;
    const C9: f64 = -1.129_465_0e1;
    const C10: f64 = -2.702_235_5e-2;
    const C11: f64 = 1.289_036_0e-5;
    const C12: f64 = -2.478_068_1e-9;
    const C13: f64 = 6.545_967_3;

    C8 / t + C9 + C10 * t + C11 * t * t + C12 * t.powi(3) + C13 * t.ln()
}

/// Humidity ratio from water-vapor partial pressure, lb water per lb dry air.
///
/// `W = 0.621945 · pv / (p − pv)`.
#[must_use]
pub fn humidity_ratio_from_partial_pressure(
    vapor_pressure_psia: f64,
    total_pressure_psia: f64,
) -> f64 {
    MOLECULAR_MASS_RATIO * vapor_pressure_psia / (total_pressure_psia - vapor_pressure_psia)
}

/// Water-vapor partial pressure from humidity ratio, psia.
///
/// Exact inverse of [`humidity_ratio_from_partial_pressure`].
#[must_use]
pub fn partial_pressure_from_humidity_ratio(
    humidity_ratio: f64,
    total_pressure_psia: f64,
) -> f64 {
    total_pressure_psia * humidity_ratio / (MOLECULAR_MASS_RATIO + humidity_ratio)
}

/// Relative humidity as a percentage of saturation, 0-100 for unsaturated air.
///
/// The ratio of actual to saturation vapor pressure at the same dry-bulb
/// temperature. Values above 100 indicate a supersaturated input; callers
/// decide how to treat them (the state layer rejects them).
#[must_use]
pub fn relative_humidity(vapor_pressure_psia: f64, saturation_pressure_psia: f64) -> f64 {
    100.0 * vapor_pressure_psia / saturation_pressure_psia
}

/// Saturation humidity ratio at a dry-bulb temperature, lb/lb.
#[must_use]
pub fn saturation_humidity_ratio(temperature_f: f64, total_pressure_psia: f64) -> f64 {
    humidity_ratio_from_partial_pressure(saturation_pressure(temperature_f), total_pressure_psia)
}

/// Dew-point temperature from water-vapor partial pressure, °F.
///
/// ASHRAE polynomial in `ln(pv)` for dew points above freezing.
///
/// # Errors
///
/// Returns [`BelowValidRange`] when the vapor pressure is below
/// [`DEW_POINT_MIN_VAPOR_PRESSURE_PSIA`], the lower edge of the fitted
/// range. That limit corresponds to a dew point near 50 °F; drier air has a
/// real dew point, just not one this correlation can produce.
pub fn dew_point_temperature(vapor_pressure_psia: f64) -> Result<f64, BelowValidRange> {
    if vapor_pressure_psia < DEW_POINT_MIN_VAPOR_PRESSURE_PSIA {
        return Err(BelowValidRange {
            vapor_pressure_psia,
        });
    }

    let alpha = vapor_pressure_psia.ln();
    Ok(100.45
        + 33.193 * alpha
        + 2.319 * alpha * alpha
        + 0.170_74 * alpha.powi(3)
        + 1.2063 * vapor_pressure_psia.powf(0.1984))
}

/// Specific enthalpy of moist air, Btu per lb dry air.
///
/// `h = 0.240·t + W·(1061 + 0.444·t)`, with enthalpy zero at 0 °F dry air.
/// Strictly increasing in both temperature and humidity ratio for `W >= 0`.
#[must_use]
pub fn enthalpy(temperature_f: f64, humidity_ratio: f64) -> f64 {
    DRY_AIR_SPECIFIC_HEAT * temperature_f + humidity_ratio * (1061.0 + 0.444 * temperature_f)
}

/// Specific volume of moist air, ft³ per lb dry air.
///
/// Ideal-gas form `v = Rda·T / p` with the vapor correction
/// `(1 + 1.607858·W)`; `0.370486 = 53.350 ft·lbf/(lb·°R) / 144 in²/ft²`.
#[must_use]
pub fn specific_volume(temperature_f: f64, humidity_ratio: f64, total_pressure_psia: f64) -> f64 {
    0.370_486 * rankine(temperature_f) * (1.0 + 1.607_858 * humidity_ratio) / total_pressure_psia
}

/// Humidity ratio from the ASHRAE psychrometric wet-bulb relation, lb/lb.
///
/// Given dry bulb, a trial wet bulb, and total pressure, returns the
/// humidity ratio the air must have for that wet-bulb reading. Uses the
/// liquid-water form of the relation (wick above freezing). The result is
/// negative when the wet bulb is colder than any air at this dry bulb can
/// produce; [`crate::solver::wet_bulb_temperature`] inverts this function.
#[must_use]
pub fn humidity_ratio_from_wet_bulb(
    dry_bulb_f: f64,
    wet_bulb_f: f64,
    total_pressure_psia: f64,
) -> f64 {
    let ws = saturation_humidity_ratio(wet_bulb_f, total_pressure_psia);
    ((1093.0 - 0.556 * wet_bulb_f) * ws
        - DRY_AIR_SPECIFIC_HEAT * (dry_bulb_f - wet_bulb_f))
        / (1093.0 + 0.444 * dry_bulb_f - wet_bulb_f)
}

#[inline]
fn rankine(temperature_f: f64) -> f64 {
    temperature_f + 459.67
}
