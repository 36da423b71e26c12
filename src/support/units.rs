//! Extensions to [`uom`] for IP-basis psychrometrics.
//!
//! The public API of this crate carries [`uom`] quantities, while the ASHRAE
//! correlations underneath are fitted in the IP basis (°F, psia, ft³/lb,
//! Btu/hr). This module holds the pieces that bridge the two: constructors
//! and accessors for the IP units used throughout the crate, and a
//! [`TemperatureDifference`] trait for subtracting absolute temperatures
//! into an interval, which [`uom`] does not allow directly.
//!
//! [`uom`] ships no specific-volume or power units on the pound/Btu basis,
//! so those quantities are stored in `m³/kg` and watts and converted here
//! with exact definitional factors. Every IP read and write goes through
//! this module, keeping the factors in one place.

use uom::si::{
    f64::{Power, Pressure, SpecificVolume, TemperatureInterval, ThermodynamicTemperature},
    power::watt,
    pressure::pound_force_per_square_inch,
    specific_volume::cubic_meter_per_kilogram,
    temperature_interval,
    thermodynamic_temperature::{degree_fahrenheit, degree_rankine},
};

/// Cubic meters per kilogram in one cubic foot per pound, exactly
/// (0.3048 m/ft)³ over 0.453 592 37 kg/lb.
const CUBIC_METERS_PER_KILOGRAM_PER_CUBIC_FOOT_PER_POUND: f64 =
    0.028_316_846_592 / 0.453_592_37;

/// Watts in one Btu (IT) per hour, exactly 1055.055 852 62 J over 3600 s.
const WATTS_PER_BTU_PER_HOUR: f64 = 1_055.055_852_62 / 3_600.0;

/// Builds an absolute temperature from a value in °F.
#[must_use]
pub fn fahrenheit(value: f64) -> ThermodynamicTemperature {
    ThermodynamicTemperature::new::<degree_fahrenheit>(value)
}

/// Reads an absolute temperature in °F.
#[must_use]
pub fn in_fahrenheit(temperature: ThermodynamicTemperature) -> f64 {
    temperature.get::<degree_fahrenheit>()
}

/// Reads a temperature interval in Fahrenheit-sized degrees.
#[must_use]
pub fn in_fahrenheit_degrees(interval: TemperatureInterval) -> f64 {
    // Rankine and Fahrenheit degrees are the same size.
    interval.get::<temperature_interval::degree_rankine>()
}

/// Builds a pressure from a value in psia.
#[must_use]
pub fn psia(value: f64) -> Pressure {
    Pressure::new::<pound_force_per_square_inch>(value)
}

/// Reads a pressure in psia.
#[must_use]
pub fn in_psia(pressure: Pressure) -> f64 {
    pressure.get::<pound_force_per_square_inch>()
}

/// Builds a specific volume from a value in ft³/lb.
#[must_use]
pub fn cubic_feet_per_pound(value: f64) -> SpecificVolume {
    SpecificVolume::new::<cubic_meter_per_kilogram>(
        value * CUBIC_METERS_PER_KILOGRAM_PER_CUBIC_FOOT_PER_POUND,
    )
}

/// Reads a specific volume in ft³/lb.
#[must_use]
pub fn in_cubic_feet_per_pound(specific_volume: SpecificVolume) -> f64 {
    specific_volume.get::<cubic_meter_per_kilogram>()
        / CUBIC_METERS_PER_KILOGRAM_PER_CUBIC_FOOT_PER_POUND
}

/// Builds a power from a value in Btu/hr.
#[must_use]
pub fn btu_per_hour(value: f64) -> Power {
    Power::new::<watt>(value * WATTS_PER_BTU_PER_HOUR)
}

/// Reads a power in Btu/hr.
#[must_use]
pub fn in_btu_per_hour(power: Power) -> f64 {
    power.get::<watt>() / WATTS_PER_BTU_PER_HOUR
}

/// Subtracting one absolute temperature from another.
///
/// In [`uom`], `ThermodynamicTemperature - ThermodynamicTemperature` is not
/// a `ThermodynamicTemperature`, and the crate does not define the
/// subtraction at all; the physically meaningful result is a
/// [`TemperatureInterval`]. This trait provides that subtraction.
pub trait TemperatureDifference {
    /// Returns `self - other` as a temperature interval.
    #[must_use]
    fn minus(self, other: ThermodynamicTemperature) -> TemperatureInterval;
}

impl TemperatureDifference for ThermodynamicTemperature {
    fn minus(self, other: ThermodynamicTemperature) -> TemperatureInterval {
        TemperatureInterval::new::<temperature_interval::degree_rankine>(
            self.get::<degree_rankine>() - other.get::<degree_rankine>(),
        )
    }
}
