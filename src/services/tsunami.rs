//! Demonstration-grade tsunami estimate for an impact into water.
//!
//! The scalings are rough approximations chosen to give plausible numbers;
//! they are not a substitute for a hydrodynamic model.

use crate::domain::{
    DamageLevel, TsunamiAssumptions, TsunamiInput, TsunamiResult, DEFAULT_COUPLING_EFFICIENCY,
    JOULES_PER_MEGATON,
};

/// Sea water density, kg/m^3
const RHO_WATER: f64 = 1025.0;
const G: f64 = 9.80665;
/// Calibration constant for the near-source amplitude
const K_AMPLITUDE: f64 = 0.12;
const NEARSHORE_DEPTH_M: f64 = 50.0;
const MIN_SHOALING_FACTOR: f64 = 0.5;
const INUNDATION_PER_METER: f64 = 100.0;

/// Near-source amplitude: cube root of coupled energy over the square root of depth.
///
/// Coupled energy is expressed relative to the reference coupling so that the
/// default efficiency reproduces the `K * E_mt^(1/3) / sqrt(d)` calibration.
fn initial_wave_height(energy_megatons: f64, coupling_efficiency: f64, depth_m: f64) -> f64 {
    let effective_mt = energy_megatons * coupling_efficiency / DEFAULT_COUPLING_EFFICIENCY;
    K_AMPLITUDE * effective_mt.max(0.0).cbrt() / depth_m.sqrt()
}

/// Green's law style growth from source depth to the nearshore reference depth
fn shoaling_factor(depth_m: f64) -> f64 {
    (depth_m / NEARSHORE_DEPTH_M).powf(0.25).max(MIN_SHOALING_FACTOR)
}

/// Energy implied by the amplitude over an area back-derived from the coupled energy
fn retained_wave_energy_joules(coupled_energy_j: f64, height_m: f64) -> f64 {
    let h = height_m.max(0.001);
    let area = (coupled_energy_j / (RHO_WATER * G * h)).max(0.0);
    0.5 * RHO_WATER * G * h * h * area
}

pub fn estimate_tsunami(input: TsunamiInput) -> TsunamiResult {
    let energy_mt = input.energy_megatons.max(0.0);
    let coupling = input.coupling_efficiency.max(0.0);
    let coupled_energy_joules = energy_mt * JOULES_PER_MEGATON * coupling;
    let depth = input.water_depth_m.max(1.0);

    let initial_wave_height_m = initial_wave_height(energy_mt, coupling, depth);
    let shore_wave_height_m = initial_wave_height_m * shoaling_factor(depth);

    let wave_energy_joules =
        retained_wave_energy_joules(coupled_energy_joules, initial_wave_height_m);
    let wave_energy_megatons = if wave_energy_joules > 0.0 {
        wave_energy_joules / JOULES_PER_MEGATON
    } else {
        0.0
    };

    TsunamiResult {
        initial_wave_height_m,
        shore_wave_height_m,
        wave_energy_megatons,
        inundation_m: shore_wave_height_m * INUNDATION_PER_METER,
        damage_level: DamageLevel::from_shore_height(shore_wave_height_m),
        coupled_energy_joules,
        assumptions: TsunamiAssumptions {
            coupling_efficiency: coupling,
            nearshore_depth_m: NEARSHORE_DEPTH_M,
            water_depth_m: depth,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64, tol: f64) -> bool {
        (a - b).abs() < tol
    }

    #[test]
    fn test_regression_gigaton_deep_ocean() {
        let res = estimate_tsunami(TsunamiInput::new(1000.0, 4000.0));

        let h0 = 0.12 * 10.0 / 4000.0_f64.sqrt();
        assert!(close(res.initial_wave_height_m, h0, 1e-12));
        assert!(close(res.initial_wave_height_m, 0.018_974, 1e-6));
        assert!(close(res.shore_wave_height_m, h0 * 80.0_f64.powf(0.25), 1e-12));
        assert!(close(res.shore_wave_height_m, 0.056_744, 1e-5));
        assert!(close(res.inundation_m, 5.6744, 1e-3));
        assert_eq!(res.damage_level, DamageLevel::Negligible);
        assert!(close(res.coupled_energy_joules / 4.184e16, 1.0, 1e-12));
        assert!(close(res.wave_energy_megatons, 0.5 * h0 * 10.0, 1e-9));
        assert_eq!(res.assumptions.nearshore_depth_m, 50.0);
    }

    #[test]
    fn test_zero_energy_is_negligible() {
        for depth in [0.0, 1.0, 50.0, 4000.0] {
            let res = estimate_tsunami(TsunamiInput::new(0.0, depth));
            assert_eq!(res.damage_level, DamageLevel::Negligible);
            assert!(res.shore_wave_height_m.abs() < 1e-12);
            assert_eq!(res.wave_energy_megatons, 0.0);
        }
    }

    #[test]
    fn test_negative_energy_is_clamped() {
        let res = estimate_tsunami(TsunamiInput::new(-50.0, 100.0));
        assert_eq!(res.shore_wave_height_m, 0.0);
        assert_eq!(res.coupled_energy_joules, 0.0);
        assert_eq!(res.damage_level, DamageLevel::Negligible);
    }

    #[test]
    fn test_shallow_source_uses_shoaling_floor() {
        // (1 / 50)^0.25 < 0.5, so the floor applies
        let res = estimate_tsunami(TsunamiInput::new(1.0, 1.0));
        assert!(close(res.shore_wave_height_m, res.initial_wave_height_m * 0.5, 1e-12));
    }

    #[test]
    fn test_non_positive_depth_is_floored() {
        let a = estimate_tsunami(TsunamiInput::new(100.0, -20.0));
        let b = estimate_tsunami(TsunamiInput::new(100.0, 1.0));
        assert_eq!(a, b);
        assert_eq!(a.assumptions.water_depth_m, 1.0);
    }

    #[test]
    fn test_damage_monotonic_in_energy() {
        let mut last_height = 0.0;
        let mut last_level = DamageLevel::Negligible;
        for exp in 0..12 {
            let res = estimate_tsunami(TsunamiInput::new(10f64.powi(exp), 200.0));
            assert!(res.shore_wave_height_m >= 0.0);
            assert!(res.shore_wave_height_m >= last_height);
            assert!(res.damage_level >= last_level);
            last_height = res.shore_wave_height_m;
            last_level = res.damage_level;
        }
        assert_eq!(last_level, DamageLevel::Catastrophic);
    }

    #[test]
    fn test_higher_coupling_raises_wave() {
        let low = estimate_tsunami(TsunamiInput::new(500.0, 1000.0));
        let high = estimate_tsunami(TsunamiInput::new(500.0, 1000.0).with_coupling(0.05));
        assert!(high.initial_wave_height_m > low.initial_wave_height_m);
        assert!(close(high.coupled_energy_joules / low.coupled_energy_joules, 5.0, 1e-9));
    }

    #[test]
    fn test_tsunami_is_deterministic() {
        let input = TsunamiInput::new(1000.0, 4000.0);
        assert_eq!(estimate_tsunami(input.clone()), estimate_tsunami(input));
    }
}
