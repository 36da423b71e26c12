//! Air-handling process models.
//!
//! Each model takes a resolved inlet [`MoistAirState`] plus one parameter
//! (a target temperature, a coil temperature with bypass factor, an
//! effectiveness, or a second stream) and produces a [`Process`]: the
//! resolved outlet state together with the heat and moisture balance of the
//! transition.
//!
//! # Units contract
//!
//! Heat terms are specific quantities, Btu per lb of dry air
//! ([`AvailableEnergy`]), not rates. Multiply by a dry-air mass flow to get
//! Btu/hr; the cooling-load calculator in [`crate::load`] does exactly that
//! for ventilation air. `moisture_change` is the outlet minus inlet humidity
//! ratio, lb/lb.

use std::fmt;

use uom::si::{
    available_energy::btu_it_per_pound,
    f64::{AvailableEnergy, Ratio, ThermodynamicTemperature, VolumeRate},
    ratio::ratio,
    volume_rate::cubic_foot_per_minute,
};

use crate::correlations::{self, DRY_AIR_SPECIFIC_HEAT};
use crate::error::PsychroError;
use crate::state::{KnownProperty, MoistAirState};
use crate::support::constraint::{Constrained, UnitInterval};
use crate::support::units::{
    TemperatureDifference, fahrenheit, in_cubic_feet_per_pound, in_fahrenheit,
    in_fahrenheit_degrees, in_psia,
};

/// The kind of air-handling process a [`Process`] describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessKind {
    SensibleHeating,
    SensibleCooling,
    CoolingDehumidification,
    EvaporativeCooling,
    Mixing,
}

impl fmt::Display for ProcessKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::SensibleHeating => "Sensible Heating",
            Self::SensibleCooling => "Sensible Cooling",
            Self::CoolingDehumidification => "Cooling and Dehumidification",
            Self::EvaporativeCooling => "Evaporative Cooling",
            Self::Mixing => "Mixing",
        };
        f.write_str(name)
    }
}

/// A transition between two moist-air states with its energy and moisture
/// balance.
///
/// Value object; created per invocation and never mutated. For
/// [`ProcessKind::Mixing`] the `inlet` holds the first stream and the heat
/// and moisture terms are zero, since mixing exchanges nothing with the
/// surroundings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Process {
    pub kind: ProcessKind,
    pub inlet: MoistAirState,
    pub outlet: MoistAirState,
    /// Sensible heat added to the air, Btu per lb dry air; negative when
    /// cooling.
    pub sensible_heat: AvailableEnergy,
    /// Latent heat added to the air, Btu per lb dry air; negative when
    /// dehumidifying.
    pub latent_heat: AvailableEnergy,
    /// Total heat added to the air, Btu per lb dry air.
    pub total_heat: AvailableEnergy,
    /// Outlet minus inlet humidity ratio, lb/lb.
    pub moisture_change: Ratio,
}

impl Process {
    /// Sensible heat ratio: the sensible share of the total heat.
    ///
    /// Returns `None` for a process with no net heat transfer (evaporative
    /// cooling, mixing), where the ratio is undefined.
    #[must_use]
    pub fn sensible_heat_ratio(&self) -> Option<Ratio> {
        let total = self.total_heat.get::<btu_it_per_pound>();
        if total == 0.0 {
            return None;
        }
        Some(Ratio::new::<ratio>(
            self.sensible_heat.get::<btu_it_per_pound>() / total,
        ))
    }
}

/// Fraction of coil airflow that bypasses the coil surface unchanged.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BypassFactor(Constrained<f64, UnitInterval>);

impl BypassFactor {
    /// Creates a bypass factor in `[0, 1]`.
    ///
    /// # Errors
    ///
    /// Returns a constraint error for values outside the unit interval.
    pub fn new(value: f64) -> Result<Self, PsychroError> {
        Ok(Self(UnitInterval::new(value)?))
    }

    #[must_use]
    pub fn value(self) -> f64 {
        self.0.into_inner()
    }
}

impl Default for BypassFactor {
    /// The customary 0.1 coil bypass factor.
    fn default() -> Self {
        Self::new(0.1).expect("0.1 lies inside the unit interval")
    }
}

/// Wet-bulb approach effectiveness of an evaporative cooler.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Effectiveness(Constrained<f64, UnitInterval>);

impl Effectiveness {
    /// Creates an effectiveness in `[0, 1]`.
    ///
    /// # Errors
    ///
    /// Returns a constraint error for values outside the unit interval.
    pub fn new(value: f64) -> Result<Self, PsychroError> {
        Ok(Self(UnitInterval::new(value)?))
    }

    #[must_use]
    pub fn value(self) -> f64 {
        self.0.into_inner()
    }
}

impl Default for Effectiveness {
    /// The customary 0.85 direct-evaporative effectiveness.
    fn default() -> Self {
        Self::new(0.85).expect("0.85 lies inside the unit interval")
    }
}

/// A moist-air stream: a state together with its volumetric flow.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AirStream {
    pub state: MoistAirState,
    pub flow: VolumeRate,
}

impl AirStream {
    /// Dry-air mass flow of the stream, lb/min, from the volumetric flow
    /// and the state's specific volume.
    #[must_use]
    pub fn mass_flow_lb_per_min(&self) -> f64 {
        self.flow.get::<cubic_foot_per_minute>()
            / in_cubic_feet_per_pound(self.state.specific_volume)
    }
}

/// Sensible heating or cooling at constant humidity ratio.
///
/// The heat term is `0.240 · Δt` Btu per lb dry air, by the dry-air
/// specific heat; the process is named by the sign of the temperature
/// change.
///
/// # Errors
///
/// Returns a [`PsychroError`] if the outlet state cannot be resolved (for
/// example, a target cold enough to supersaturate the constant humidity
/// ratio).
pub fn sensible(
    inlet: &MoistAirState,
    target: ThermodynamicTemperature,
) -> Result<Process, PsychroError> {
    let outlet = MoistAirState::resolve(
        target,
        KnownProperty::HumidityRatio(inlet.humidity_ratio),
        inlet.pressure,
    )?;

    let delta_t = in_fahrenheit_degrees(target.minus(inlet.dry_bulb));
    let heat = AvailableEnergy::new::<btu_it_per_pound>(DRY_AIR_SPECIFIC_HEAT * delta_t);
    let kind = if delta_t >= 0.0 {
        ProcessKind::SensibleHeating
    } else {
        ProcessKind::SensibleCooling
    };

    Ok(Process {
        kind,
        inlet: *inlet,
        outlet,
        sensible_heat: heat,
        latent_heat: AvailableEnergy::new::<btu_it_per_pound>(0.0),
        total_heat: heat,
        moisture_change: Ratio::new::<ratio>(0.0),
    })
}

/// Cooling and dehumidification across a coil at `coil_temp`.
///
/// The outlet is a blend of saturated-at-coil-temperature air with unchanged
/// inlet air, weighted by the bypass factor: with bypass `b`, the outlet dry
/// bulb is `t_coil + b·(t_in − t_coil)` and likewise for the humidity
/// ratio. A coil warmer than the inlet dew point cannot condense anything,
/// so the blend never raises the humidity ratio above the inlet's.
///
/// Total heat is the enthalpy difference, sensible is `0.240 · Δt`, and
/// latent is the remainder.
///
/// # Errors
///
/// Returns [`PsychroError::CoilNotBelowInlet`] when the coil is not colder
/// than the inlet air, or any error from resolving the outlet state.
pub fn cooling_coil(
    inlet: &MoistAirState,
    coil_temp: ThermodynamicTemperature,
    bypass: BypassFactor,
) -> Result<Process, PsychroError> {
    let t_in = in_fahrenheit(inlet.dry_bulb);
    let t_coil = in_fahrenheit(coil_temp);
    if t_coil >= t_in {
        return Err(PsychroError::CoilNotBelowInlet {
            coil_f: t_coil,
            dry_bulb_f: t_in,
        });
    }

    let b = bypass.value();
    let w_in = inlet.humidity_ratio.get::<ratio>();
    let w_saturated = correlations::saturation_humidity_ratio(t_coil, in_psia(inlet.pressure));

    let t_out = t_coil + b * (t_in - t_coil);
    let w_out = (w_saturated + b * (w_in - w_saturated)).min(w_in);

    let outlet = MoistAirState::resolve(
        fahrenheit(t_out),
        KnownProperty::HumidityRatio(Ratio::new::<ratio>(w_out)),
        inlet.pressure,
    )?;

    let total = outlet.enthalpy.get::<btu_it_per_pound>()
        - inlet.enthalpy.get::<btu_it_per_pound>();
    let sensible = DRY_AIR_SPECIFIC_HEAT * (t_out - t_in);

    Ok(Process {
        kind: ProcessKind::CoolingDehumidification,
        inlet: *inlet,
        outlet,
        sensible_heat: AvailableEnergy::new::<btu_it_per_pound>(sensible),
        latent_heat: AvailableEnergy::new::<btu_it_per_pound>(total - sensible),
        total_heat: AvailableEnergy::new::<btu_it_per_pound>(total),
        moisture_change: Ratio::new::<ratio>(w_out - w_in),
    })
}

/// Adiabatic evaporative cooling toward the inlet wet bulb.
///
/// The outlet dry bulb closes the gap to the inlet wet-bulb temperature by
/// the given effectiveness; the outlet state is resolved from the inlet
/// enthalpy at that temperature, so the process is isenthalpic by
/// construction. Total heat is zero; the sensible and latent components are
/// equal and opposite.
///
/// # Errors
///
/// Returns any error from resolving the outlet state, including a failed
/// enthalpy inversion.
pub fn evaporative(
    inlet: &MoistAirState,
    effectiveness: Effectiveness,
) -> Result<Process, PsychroError> {
    let t_in = in_fahrenheit(inlet.dry_bulb);
    let t_wb = in_fahrenheit(inlet.wet_bulb);
    let t_out = t_in - effectiveness.value() * (t_in - t_wb);

    let outlet = MoistAirState::resolve(
        fahrenheit(t_out),
        KnownProperty::Enthalpy(inlet.enthalpy),
        inlet.pressure,
    )?;

    let sensible = DRY_AIR_SPECIFIC_HEAT * (t_out - t_in);
    let w_change = outlet.humidity_ratio.get::<ratio>() - inlet.humidity_ratio.get::<ratio>();

    Ok(Process {
        kind: ProcessKind::EvaporativeCooling,
        inlet: *inlet,
        outlet,
        sensible_heat: AvailableEnergy::new::<btu_it_per_pound>(sensible),
        latent_heat: AvailableEnergy::new::<btu_it_per_pound>(-sensible),
        total_heat: AvailableEnergy::new::<btu_it_per_pound>(0.0),
        moisture_change: Ratio::new::<ratio>(w_change),
    })
}

/// Iteration cap for recovering the mixed dry bulb from enthalpy.
const MIXING_MAX_ITERATIONS: u32 = 50;

/// Adiabatic mixing of two air streams.
///
/// Mass flows come from each stream's volumetric flow and specific volume;
/// the mixed humidity ratio and enthalpy are their mass-weighted averages.
/// The mixed dry bulb is then recovered by a small fixed-point loop on the
/// enthalpy residual (the same inversion idea as the enthalpy solver, but
/// solving for temperature at known humidity ratio), and the outlet state
/// is resolved from that temperature and the mixed humidity ratio.
///
/// Mixing two identical streams returns the same state regardless of the
/// flow split.
///
/// # Errors
///
/// Returns [`PsychroError::PressureMismatch`] when the streams are at
/// different total pressures, [`PsychroError::NotConverged`] if the
/// temperature recovery loop fails to close, or any error from resolving
/// the mixed state.
pub fn mix(a: &AirStream, b: &AirStream) -> Result<Process, PsychroError> {
    let p_a = in_psia(a.state.pressure);
    let p_b = in_psia(b.state.pressure);
    if (p_a - p_b).abs() > 1e-6 {
        return Err(PsychroError::PressureMismatch {
            left_psia: p_a,
            right_psia: p_b,
        });
    }

    let m_a = a.mass_flow_lb_per_min();
    let m_b = b.mass_flow_lb_per_min();
    let m_total = m_a + m_b;

    let w_mixed = (m_a * a.state.humidity_ratio.get::<ratio>()
        + m_b * b.state.humidity_ratio.get::<ratio>())
        / m_total;
    let h_mixed = (m_a * a.state.enthalpy.get::<btu_it_per_pound>()
        + m_b * b.state.enthalpy.get::<btu_it_per_pound>())
        / m_total;

    // Mass-weighted dry bulb is already close; Newton steps on the affine
    // enthalpy relation close the remainder immediately.
    let mut t = (m_a * in_fahrenheit(a.state.dry_bulb) + m_b * in_fahrenheit(b.state.dry_bulb))
        / m_total;
    let mut converged = false;
    for _ in 0..MIXING_MAX_ITERATIONS {
        let residual = correlations::enthalpy(t, w_mixed) - h_mixed;
        if residual.abs() < crate::solver::ENTHALPY_TOLERANCE {
            converged = true;
            break;
        }
        t -= residual / (DRY_AIR_SPECIFIC_HEAT + 0.444 * w_mixed);
    }
    if !converged {
        return Err(PsychroError::NotConverged(crate::solver::NotConverged {
            last_estimate: t,
            residual: correlations::enthalpy(t, w_mixed) - h_mixed,
            iterations: MIXING_MAX_ITERATIONS,
        }));
    }

    let outlet = MoistAirState::resolve(
        fahrenheit(t),
        KnownProperty::HumidityRatio(Ratio::new::<ratio>(w_mixed)),
        a.state.pressure,
    )?;

    let zero = AvailableEnergy::new::<btu_it_per_pound>(0.0);
    Ok(Process {
        kind: ProcessKind::Mixing,
        inlet: a.state,
        outlet,
        sensible_heat: zero,
        latent_heat: zero,
        total_heat: zero,
        moisture_change: Ratio::new::<ratio>(0.0),
    })
}
