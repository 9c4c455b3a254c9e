//! Burn-cruise-burn flight planning.
//!
//! Trapezoidal velocity profile: equal acceleration and deceleration burns at
//! constant thrust around a constant-velocity cruise. Burn distance uses the
//! discrete sum `t(t+1)/2 * a` because the integrator advances in whole steps.

use deepspace_core::constants::{CRUISE_SPEED_DECAY, EPSILON, PLAN_TOLERANCE};
use deepspace_core::error::{SimError, SimResult};
use deepspace_core::types::{FlightPlan, Tick};

/// Distance covered by a burn of `burn_time` ticks at `thrust`.
pub fn burn_distance(burn_time: f64, thrust: f64) -> f64 {
    burn_time * (burn_time + 1.0) / 2.0 * thrust
}

/// Compute a flight plan starting at `tick_offset`.
///
/// If the two burns would cover at least the whole trip, the cruise speed is
/// lowered by 5% until they fit.
pub fn plan(
    travel_distance: f64,
    cruise_speed: f64,
    thrust: f64,
    tick_offset: Tick,
) -> SimResult<FlightPlan> {
    if thrust == 0.0 {
        return Err(SimError::DivisionByZero("flight plan with zero thrust"));
    }
    if !thrust.is_finite() || thrust < 0.0 {
        return Err(SimError::InvalidArgument(format!(
            "thrust must be positive, got {thrust}"
        )));
    }
    if !cruise_speed.is_finite() || cruise_speed <= 0.0 {
        return Err(SimError::InvalidArgument(format!(
            "cruise speed must be positive, got {cruise_speed}"
        )));
    }
    if !travel_distance.is_finite() || travel_distance < 0.0 {
        return Err(SimError::InvalidArgument(format!(
            "travel distance must be non-negative, got {travel_distance}"
        )));
    }
    if !tick_offset.is_finite() {
        return Err(SimError::InvalidArgument(format!(
            "tick offset must be finite, got {tick_offset}"
        )));
    }

    if travel_distance <= EPSILON {
        return Ok(FlightPlan {
            cutoff: tick_offset,
            break_burn: tick_offset,
            arrival: tick_offset,
            total: 0.0,
            cruise_speed: 0.0,
        });
    }

    let mut cruise_speed = cruise_speed;
    let mut burn_time = cruise_speed / thrust;
    let mut burn_dist = burn_distance(burn_time, thrust);
    while burn_dist >= travel_distance / 2.0 {
        cruise_speed *= CRUISE_SPEED_DECAY;
        burn_time = cruise_speed / thrust;
        burn_dist = burn_distance(burn_time, thrust);
    }

    let cruise_distance = travel_distance - burn_dist * 2.0;
    let cruise_time = cruise_distance / cruise_speed;
    let total = burn_time * 2.0 + cruise_time;

    let cutoff = tick_offset + burn_time;
    let break_burn = cutoff + cruise_time;
    let arrival = break_burn + burn_time;

    let plan = FlightPlan {
        cutoff,
        break_burn,
        arrival,
        total,
        cruise_speed,
    };
    check_arrival(&plan, tick_offset)?;
    Ok(plan)
}

/// Arrival must equal the start tick plus the total duration.
pub fn check_arrival(plan: &FlightPlan, tick_offset: Tick) -> SimResult<()> {
    let expected = tick_offset + plan.total;
    if (plan.arrival - expected).abs() <= PLAN_TOLERANCE * (1.0 + plan.arrival.abs()) {
        return Ok(());
    }
    log::error!(
        "flight plan arrival {} disagrees with offset {tick_offset} + total {}",
        plan.arrival,
        plan.total
    );
    Err(SimError::InvalidArgument(format!(
        "inconsistent flight plan: arrival {} != {expected}",
        plan.arrival
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_plan() {
        let fp = plan(1000.0, 10.0, 1.0, 0.0).unwrap();
        assert!((fp.arrival - fp.total).abs() < 1e-6);
        assert!(fp.cutoff < fp.break_burn);
        assert!(fp.break_burn < fp.arrival);
        // 10 ticks of burn cover 55 units each way; 890 units at 10/tick.
        assert!((fp.cutoff - 10.0).abs() < 1e-9);
        assert!((fp.cruise_time() - 89.0).abs() < 1e-9);
        assert!((fp.total - 109.0).abs() < 1e-9);
        assert_eq!(fp.cruise_speed, 10.0);
    }

    #[test]
    fn test_tick_offset_shifts_timestamps() {
        let base = plan(1000.0, 10.0, 1.0, 0.0).unwrap();
        let shifted = plan(1000.0, 10.0, 1.0, 250.0).unwrap();
        assert!((shifted.cutoff - base.cutoff - 250.0).abs() < 1e-9);
        assert!((shifted.arrival - (250.0 + shifted.total)).abs() < 1e-6);
        assert_eq!(base.total, shifted.total);
    }

    #[test]
    fn test_short_trip_reduces_cruise_speed() {
        let fp = plan(1.0, 100.0, 1.0, 0.0).unwrap();
        assert!(fp.cruise_speed < 100.0);
        let burn = burn_distance(fp.burn_time(), 1.0);
        assert!(burn * 2.0 < 1.0, "burns cover {} of 1.0", burn * 2.0);
        assert!(fp.cutoff <= fp.break_burn && fp.break_burn <= fp.arrival);
        assert!((fp.arrival - fp.total).abs() < 1e-6);
    }

    #[test]
    fn test_zero_distance_is_degenerate() {
        let fp = plan(0.0, 10.0, 1.0, 42.0).unwrap();
        assert_eq!(fp.cutoff, 42.0);
        assert_eq!(fp.arrival, 42.0);
        assert_eq!(fp.total, 0.0);
    }

    #[test]
    fn test_check_arrival() {
        let fp = plan(1000.0, 10.0, 1.0, 1e9).unwrap();
        assert!(check_arrival(&fp, 1e9).is_ok());
        let skewed = FlightPlan {
            arrival: fp.arrival + 5.0,
            ..fp
        };
        assert!(matches!(
            check_arrival(&skewed, 1e9),
            Err(SimError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_rejects_bad_thrust_and_speed() {
        assert!(matches!(
            plan(100.0, 10.0, 0.0, 0.0),
            Err(SimError::DivisionByZero(_))
        ));
        assert!(matches!(
            plan(100.0, 10.0, -1.0, 0.0),
            Err(SimError::InvalidArgument(_))
        ));
        assert!(matches!(
            plan(100.0, 0.0, 1.0, 0.0),
            Err(SimError::InvalidArgument(_))
        ));
        assert!(matches!(
            plan(f64::NAN, 10.0, 1.0, 0.0),
            Err(SimError::InvalidArgument(_))
        ));
    }
}
