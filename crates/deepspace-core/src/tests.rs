#[cfg(test)]
mod tests {
    use glam::DVec3;

    use crate::commands::{CommandArg, PlayerCommand, ShipCommand};
    use crate::enums::*;
    use crate::error::SimError;
    use crate::profiles::get_profile;
    use crate::quaternion::Quaternion;
    use crate::types::FlightPlan;

    const TOL: f64 = 1e-9;

    fn sample_rotations() -> Vec<Quaternion> {
        vec![
            Quaternion::IDENTITY,
            Quaternion::from_axis_angle(DVec3::Z, 90.0).unwrap(),
            Quaternion::from_axis_angle(DVec3::new(1.0, 2.0, 3.0), 37.5).unwrap(),
            Quaternion::from_axis_angle(DVec3::new(-0.3, 0.1, 0.9), -160.0).unwrap(),
            Quaternion::from_axis_angle(DVec3::X, 179.0).unwrap(),
        ]
    }

    fn sample_vectors() -> Vec<DVec3> {
        vec![
            DVec3::X,
            DVec3::new(3.0, -4.0, 12.0),
            DVec3::new(-0.001, 250.0, 7.5),
            DVec3::ZERO,
        ]
    }

    fn assert_vec_close(a: DVec3, b: DVec3, tol: f64) {
        assert!(
            (a - b).length() <= tol,
            "expected {b:?}, got {a:?} (diff {})",
            (a - b).length()
        );
    }

    // ---- Quaternion algebra ----

    #[test]
    fn test_hamilton_product_basis() {
        let i = Quaternion::new(0.0, 1.0, 0.0, 0.0);
        let j = Quaternion::new(0.0, 0.0, 1.0, 0.0);
        let k = Quaternion::new(0.0, 0.0, 0.0, 1.0);
        assert_eq!(i * j, k);
        assert_eq!(j * i, k * -1.0);
        assert_eq!(i * i, Quaternion::new(-1.0, 0.0, 0.0, 0.0));
    }

    #[test]
    fn test_multiply_is_associative() {
        let qs = sample_rotations();
        let (a, b, c) = (qs[1], qs[2], qs[3]);
        assert!(((a * b) * c).approx_eq(a * (b * c), TOL));
    }

    #[test]
    fn test_rotate_vector_round_trip() {
        for q in sample_rotations() {
            for v in sample_vectors() {
                let rotated = q.rotate_vector(v);
                let back = q.inverse().rotate_vector(rotated);
                assert_vec_close(back, v, 1e-9 * (1.0 + v.length()));
            }
        }
    }

    #[test]
    fn test_rotate_vector_preserves_norm() {
        for q in sample_rotations() {
            for v in sample_vectors() {
                let rotated = q.rotate_vector(v);
                assert!((rotated.length() - v.length()).abs() < 1e-9 * (1.0 + v.length()));
            }
        }
    }

    #[test]
    fn test_rotate_quarter_turn_about_z() {
        let q = Quaternion::from_axis_angle(DVec3::Z, 90.0).unwrap();
        assert_vec_close(q.rotate_vector(DVec3::X), DVec3::Y, TOL);
        assert_vec_close(q.rotate_vector(DVec3::Y), -DVec3::X, TOL);
    }

    #[test]
    fn test_rotate_vectors_matches_elementwise() {
        let vectors = sample_vectors();
        for q in sample_rotations() {
            let batched = q.rotate_vectors(&vectors);
            assert_eq!(batched.len(), vectors.len());
            for (b, v) in batched.iter().zip(&vectors) {
                assert_eq!(*b, q.rotate_vector(*v));
            }
        }
    }

    #[test]
    fn test_from_axis_angle_normalizes_axis() {
        let a = Quaternion::from_axis_angle(DVec3::new(0.0, 0.0, 10.0), 60.0).unwrap();
        let b = Quaternion::from_axis_angle(DVec3::Z, 60.0).unwrap();
        assert!(a.approx_eq(b, TOL));
        assert!((a.norm() - 1.0).abs() < TOL);
    }

    #[test]
    fn test_zero_norm_failures() {
        let zero = Quaternion::new(0.0, 0.0, 0.0, 0.0);
        assert!(matches!(zero.normalize(), Err(SimError::DivisionByZero(_))));
        assert!(matches!(zero.reciprocal(), Err(SimError::DivisionByZero(_))));
        assert!(matches!(
            Quaternion::from_axis_angle(DVec3::ZERO, 45.0),
            Err(SimError::DivisionByZero(_))
        ));
    }

    #[test]
    fn test_normalize_and_reciprocal() {
        let q = Quaternion::new(2.0, 0.0, 0.0, 0.0);
        assert!(q.normalize().unwrap().approx_eq(Quaternion::IDENTITY, TOL));
        let r = q.reciprocal().unwrap();
        assert!((q * r).approx_eq(Quaternion::IDENTITY, TOL));
    }

    #[test]
    fn test_rotated_axes_identity_and_yaw() {
        let [x, y, z] = Quaternion::IDENTITY.rotated_axes();
        assert_vec_close(x, DVec3::X, TOL);
        assert_vec_close(y, DVec3::Y, TOL);
        assert_vec_close(z, DVec3::Z, TOL);

        // Axes come from the inverse rotation.
        let q = Quaternion::from_axis_angle(DVec3::Z, 90.0).unwrap();
        let [forward, _, up] = q.rotated_axes();
        assert_vec_close(forward, -DVec3::Y, TOL);
        assert_vec_close(up, DVec3::Z, TOL);
    }

    #[test]
    fn test_power_one_and_zero() {
        for q in sample_rotations() {
            assert!(q.powf(1.0).approx_eq(q, 1e-9), "q^1 != q for {q:?}");
            assert!(q.powf(0.0).approx_eq(Quaternion::IDENTITY, 1e-9));
        }
    }

    #[test]
    fn test_power_half_is_half_angle() {
        let q = Quaternion::from_axis_angle(DVec3::Y, 120.0).unwrap();
        let half = Quaternion::from_axis_angle(DVec3::Y, 60.0).unwrap();
        assert!(q.powf(0.5).approx_eq(half, 1e-9));
    }

    #[test]
    fn test_ln_exp_near_identity_has_no_nan() {
        let q = Quaternion::new(1.0, 1e-12, 0.0, 0.0);
        let l = q.ln();
        let e = q.exp();
        for c in [l.w, l.x, l.y, l.z, e.w, e.x, e.y, e.z] {
            assert!(c.is_finite());
        }
        assert_eq!(l.vector(), DVec3::ZERO);
    }

    #[test]
    fn test_rotation_between() {
        let cases = [
            (DVec3::X, DVec3::Y),
            (DVec3::X, DVec3::new(1.0, 1.0, 1.0)),
            (DVec3::new(0.0, 2.0, 0.0), DVec3::new(0.0, -5.0, 0.0)),
            (DVec3::Z, DVec3::Z * 3.0),
        ];
        for (from, to) in cases {
            let q = Quaternion::rotation_between(from, to).unwrap();
            assert_vec_close(q.rotate_vector(from.normalize()), to.normalize(), 1e-9);
        }
        assert!(Quaternion::rotation_between(DVec3::ZERO, DVec3::X).is_err());
    }

    #[test]
    fn test_slerp_toward_endpoints() {
        let a = Quaternion::IDENTITY;
        let b = Quaternion::from_axis_angle(DVec3::Z, 90.0).unwrap();
        assert!(a.slerp_toward(b, 0.0).approx_eq(a, 1e-9));
        assert!(a.slerp_toward(b, 1.0).approx_eq(b, 1e-9));
        let mid = a.slerp_toward(b, 0.5);
        let expected = Quaternion::from_axis_angle(DVec3::Z, 45.0).unwrap();
        assert!(mid.approx_eq(expected, 1e-9));
    }

    // ---- Command arguments ----

    #[test]
    fn test_command_arg_coercion() {
        assert_eq!(CommandArg::coerce("12"), CommandArg::Int(12));
        assert_eq!(CommandArg::coerce("-3"), CommandArg::Int(-3));
        assert_eq!(CommandArg::coerce("4.0"), CommandArg::Int(4));
        assert_eq!(CommandArg::coerce("2.5"), CommandArg::Float(2.5));
        assert_eq!(CommandArg::coerce("fly"), CommandArg::Text("fly".to_string()));
    }

    #[test]
    fn test_tokenize() {
        let (name, args) = CommandArg::tokenize("  order fly 12  5.5 ").unwrap();
        assert_eq!(name, "order");
        assert_eq!(
            args,
            vec![
                CommandArg::Text("fly".into()),
                CommandArg::Int(12),
                CommandArg::Float(5.5)
            ]
        );
        assert!(CommandArg::tokenize("   ").is_none());
    }

    #[test]
    fn test_player_command_serde() {
        let commands = vec![
            PlayerCommand::Flagship {
                command: ShipCommand::Fly {
                    target: 4,
                    cruise_speed: 10.0,
                },
            },
            PlayerCommand::OrderShip {
                ship: 7,
                command: ShipCommand::Burn {
                    direction: Some(DVec3::new(1.0, 0.0, 0.0)),
                    throttle: 0.5,
                },
            },
            PlayerCommand::PrintFleet,
            PlayerCommand::Simulate { ticks: 10.0 },
        ];
        for cmd in &commands {
            let json = serde_json::to_string(cmd).unwrap();
            let back: PlayerCommand = serde_json::from_str(&json).unwrap();
            assert_eq!(*cmd, back);
        }
    }

    // ---- Profiles ----

    #[test]
    fn test_kind_profiles() {
        assert_eq!(get_profile(ObjectKind::Tug).thrust, 0.01);
        assert_eq!(get_profile(ObjectKind::Fighter).thrust, 3.0);
        assert_eq!(get_profile(ObjectKind::Escort).glyph, '≡');
        assert_eq!(get_profile(ObjectKind::Port).thrust, 0.0);
        assert!(ObjectKind::Celestial.is_celestial());
        assert!(ObjectKind::Port.is_ship());
    }

    #[test]
    fn test_flight_plan_phases() {
        let plan = FlightPlan {
            cutoff: 10.0,
            break_burn: 30.0,
            arrival: 40.0,
            total: 40.0,
            cruise_speed: 10.0,
        };
        assert_eq!(plan.burn_time(), 10.0);
        assert_eq!(plan.cruise_time(), 20.0);
    }
}
