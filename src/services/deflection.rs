/// Kinetic impactor deflection estimates
use crate::domain::{DeflectionInput, DeflectionResult, SingleImpactorInput, SingleImpactorResult};
use std::f64::consts::PI;

const SECONDS_PER_DAY: f64 = 86_400.0;

/// Mass of a uniform sphere
pub fn sphere_mass_kg(diameter_m: f64, density_kg_m3: f64) -> f64 {
    let r = diameter_m / 2.0;
    density_kg_m3 * (4.0 / 3.0) * PI * r.powi(3)
}

/// Lead time in seconds, floored at one second
fn lead_time_seconds(lead_time_days: f64) -> f64 {
    (lead_time_days * SECONDS_PER_DAY).max(1.0)
}

/// Lateral velocity change needed to move the arrival point by `distance_shift_m`
/// when applied `lead_time_s` before the encounter.
pub fn required_delta_v(distance_shift_m: f64, lead_time_s: f64) -> f64 {
    if lead_time_s <= 0.0 {
        return f64::INFINITY;
    }
    distance_shift_m / lead_time_s
}

/// Impactor mass from momentum conservation, `m_a * dv = beta * m_i * v_i`
pub fn required_impactor_mass(
    asteroid_mass_kg: f64,
    delta_v_m_s: f64,
    impactor_velocity_m_s: f64,
    beta: f64,
) -> f64 {
    if impactor_velocity_m_s <= 0.0 || beta <= 0.0 {
        return f64::INFINITY;
    }
    ((asteroid_mass_kg * delta_v_m_s) / (impactor_velocity_m_s * beta)).max(0.0)
}

pub fn launches_required(impactor_mass_kg: f64, payload_per_launch_kg: f64) -> f64 {
    if payload_per_launch_kg <= 0.0 {
        return f64::INFINITY;
    }
    (impactor_mass_kg / payload_per_launch_kg).ceil()
}

pub fn estimate_deflection(input: DeflectionInput) -> DeflectionResult {
    let asteroid_mass_kg = sphere_mass_kg(input.diameter_m, input.density_kg_m3);
    let lead_time_s = lead_time_seconds(input.lead_time_days);
    let required_delta_v_m_s = required_delta_v(input.distance_shift_m, lead_time_s);
    let impactor_mass_kg = required_impactor_mass(
        asteroid_mass_kg,
        required_delta_v_m_s,
        input.impactor_velocity_m_s,
        input.beta,
    );
    let launches = launches_required(impactor_mass_kg, input.payload_per_launch_kg);
    // inf * 0 would be NaN
    let estimated_cost_usd = if launches.is_infinite() {
        f64::INFINITY
    } else {
        launches * input.cost_per_launch_usd
    };

    DeflectionResult {
        asteroid_mass_kg,
        required_delta_v_m_s,
        impactor_mass_kg,
        launches_required: launches,
        estimated_cost_usd,
        assumptions: input,
    }
}

/// Delta-v and arrival shift delivered by one impactor of known mass
pub fn estimate_single_impactor(input: SingleImpactorInput) -> SingleImpactorResult {
    let asteroid_mass_kg = sphere_mass_kg(input.diameter_m, input.density_kg_m3);
    let achieved_delta_v_m_s = if asteroid_mass_kg > 0.0 {
        (input.beta * input.impactor_mass_kg * input.impactor_velocity_m_s / asteroid_mass_kg)
            .max(0.0)
    } else {
        0.0
    };
    let lateral_shift_m = achieved_delta_v_m_s * lead_time_seconds(input.lead_time_days);

    SingleImpactorResult {
        asteroid_mass_kg,
        achieved_delta_v_m_s,
        lateral_shift_m,
        assumptions: input,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::LaunchVehicle;

    fn regression_input() -> DeflectionInput {
        DeflectionInput {
            impactor_velocity_m_s: 11_000.0,
            beta: 2.0,
            cost_per_launch_usd: 50_000_000.0,
            ..DeflectionInput::new(100.0, 20_000.0, 3650.0)
        }
    }

    fn rel_close(a: f64, b: f64) -> bool {
        ((a - b) / b).abs() < 1e-9
    }

    #[test]
    fn test_regression_hundred_meter_ten_years() {
        let res = estimate_deflection(regression_input());

        let mass = 2700.0 * (4.0 / 3.0) * PI * 50.0_f64.powi(3);
        let dv = 6_400_000.0 / (3650.0 * 86_400.0);
        let m_imp = mass * dv / (11_000.0 * 2.0);

        assert!(rel_close(res.asteroid_mass_kg, mass));
        assert!((res.asteroid_mass_kg - 1.413_716_694e9).abs() < 1.0);
        assert!(rel_close(res.required_delta_v_m_s, dv));
        assert!((res.required_delta_v_m_s - 0.020_294_266).abs() < 1e-8);
        assert!(rel_close(res.impactor_mass_kg, m_imp));
        assert!((res.impactor_mass_kg - 1304.1).abs() < 0.5);
        assert_eq!(res.launches_required, 1.0);
        assert_eq!(res.estimated_cost_usd, 50_000_000.0);
    }

    #[test]
    fn test_mass_scales_with_diameter_cubed() {
        let small = sphere_mass_kg(150.0, 2700.0);
        let large = sphere_mass_kg(300.0, 2700.0);
        assert!(small > 0.0);
        assert!(rel_close(large / small, 8.0));
    }

    #[test]
    fn test_launches_is_ceiling_and_cost_exact() {
        let input = DeflectionInput {
            payload_per_launch_kg: 100.0,
            cost_per_launch_usd: 75_000_000.0,
            ..regression_input()
        };
        let res = estimate_deflection(input);
        let ratio = res.impactor_mass_kg / 100.0;
        assert!(res.launches_required >= ratio);
        assert!(res.launches_required - 1.0 < ratio);
        assert_eq!(res.launches_required, 14.0);
        assert_eq!(res.estimated_cost_usd, res.launches_required * 75_000_000.0);
    }

    #[test]
    fn test_zero_impactor_velocity_is_infinite() {
        let res = estimate_deflection(DeflectionInput {
            impactor_velocity_m_s: 0.0,
            ..regression_input()
        });
        assert!(res.impactor_mass_kg.is_infinite());
        assert!(res.launches_required.is_infinite());
        assert!(res.estimated_cost_usd.is_infinite());
    }

    #[test]
    fn test_zero_beta_is_infinite() {
        let res = estimate_deflection(DeflectionInput {
            beta: 0.0,
            ..regression_input()
        });
        assert!(res.impactor_mass_kg.is_infinite());
        assert!(res.launches_required.is_infinite());
    }

    #[test]
    fn test_zero_payload_is_infinite_launches() {
        let res = estimate_deflection(DeflectionInput {
            payload_per_launch_kg: 0.0,
            cost_per_launch_usd: 0.0,
            ..regression_input()
        });
        assert!(res.impactor_mass_kg.is_finite());
        assert!(res.launches_required.is_infinite());
        assert!(!res.estimated_cost_usd.is_nan());
    }

    #[test]
    fn test_zero_lead_time_floors_to_one_second() {
        let res = estimate_deflection(DeflectionInput::new(10.0, 1.0, 0.0));
        assert_eq!(res.required_delta_v_m_s, 6_400_000.0);
    }

    #[test]
    fn test_required_delta_v_non_positive_time() {
        assert!(required_delta_v(1.0, 0.0).is_infinite());
    }

    #[test]
    fn test_zero_shift_needs_no_launches() {
        let res = estimate_deflection(DeflectionInput {
            distance_shift_m: 0.0,
            ..regression_input()
        });
        assert_eq!(res.impactor_mass_kg, 0.0);
        assert_eq!(res.launches_required, 0.0);
        assert_eq!(res.estimated_cost_usd, 0.0);
    }

    #[test]
    fn test_heavier_vehicle_needs_fewer_launches() {
        let base = DeflectionInput::new(500.0, 20_000.0, 365.0);
        let f9 = estimate_deflection(base.clone().with_vehicle(LaunchVehicle::Falcon9));
        let fh = estimate_deflection(base.with_vehicle(LaunchVehicle::FalconHeavy));
        assert!(fh.launches_required <= f9.launches_required);
        assert_eq!(fh.assumptions.payload_per_launch_kg, 63_800.0);
    }

    #[test]
    fn test_deflection_is_deterministic() {
        assert_eq!(
            estimate_deflection(regression_input()),
            estimate_deflection(regression_input())
        );
    }

    #[test]
    fn test_single_impactor_dart_like() {
        let input = SingleImpactorInput::new(160.0, 365.0);
        let res = estimate_single_impactor(input);
        let expected_dv = 610.0 * 11_000.0 / res.asteroid_mass_kg;
        assert!(rel_close(res.achieved_delta_v_m_s, expected_dv));
        assert!(rel_close(res.lateral_shift_m, expected_dv * 365.0 * 86_400.0));
    }

    #[test]
    fn test_single_impactor_massless_body() {
        let res = estimate_single_impactor(SingleImpactorInput::new(0.0, 10.0));
        assert_eq!(res.asteroid_mass_kg, 0.0);
        assert_eq!(res.achieved_delta_v_m_s, 0.0);
        assert_eq!(res.lateral_shift_m, 0.0);
    }
}
