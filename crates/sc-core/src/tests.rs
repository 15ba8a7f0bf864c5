//! Unit tests for sc-core primitives.

#[cfg(test)]
mod ids {
    use crate::CraftId;

    #[test]
    fn ordering_and_next() {
        assert!(CraftId(0) < CraftId(1));
        assert_eq!(CraftId(4).next(), CraftId(5));
    }

    #[test]
    fn default_is_unassigned() {
        assert_eq!(CraftId::default(), CraftId::UNASSIGNED);
        assert!(!CraftId::default().is_assigned());
        assert!(CraftId(0).is_assigned());
    }

    #[test]
    fn display() {
        assert_eq!(CraftId(7).to_string(), "CraftId(7)");
    }
}

#[cfg(test)]
mod geo {
    use std::f64::consts::{PI, TAU};

    use proptest::prelude::*;

    use crate::{EPSILON, Vec2, not_zero, wrap_to_pi};

    #[test]
    fn not_zero_passes_large_values() {
        assert_eq!(not_zero(3.0), 3.0);
        assert_eq!(not_zero(-0.5), -0.5);
    }

    #[test]
    fn not_zero_floors_small_values() {
        assert_eq!(not_zero(0.05), EPSILON);
        assert_eq!(not_zero(-0.05), -EPSILON);
        assert_eq!(not_zero(EPSILON), EPSILON);
        assert_eq!(not_zero(-EPSILON), -EPSILON);
    }

    #[test]
    fn not_zero_maps_zero_to_negative_epsilon() {
        assert_eq!(not_zero(0.0), -EPSILON);
    }

    #[test]
    fn wrap_to_pi_known_values() {
        assert!((wrap_to_pi(0.0)).abs() < 1e-12);
        assert!((wrap_to_pi(3.0 * PI / 2.0) + PI / 2.0).abs() < 1e-12);
        assert!((wrap_to_pi(-3.0 * PI / 2.0) - PI / 2.0).abs() < 1e-12);
        assert!((wrap_to_pi(-0.5) + 0.5).abs() < 1e-12);
    }

    #[test]
    fn wrap_to_pi_boundary_folds_to_plus_pi() {
        assert_eq!(wrap_to_pi(PI), PI);
        assert_eq!(wrap_to_pi(-PI), PI);
    }

    #[test]
    fn vec2_arithmetic() {
        let a = Vec2::new(1.0, 2.0);
        let b = Vec2::new(3.0, -1.0);
        assert_eq!(a + b, Vec2::new(4.0, 1.0));
        assert_eq!(a - b, Vec2::new(-2.0, 3.0));
        assert_eq!(a * 2.0, Vec2::new(2.0, 4.0));
        assert_eq!(a.dot(b), 1.0);
        assert_eq!(a.cross(b), -7.0);
        assert!((Vec2::new(3.0, 4.0).length() - 5.0).abs() < 1e-12);
    }

    #[test]
    fn from_angle_is_unit() {
        let v = Vec2::from_angle(PI / 2.0);
        assert!(v.x.abs() < 1e-12);
        assert!((v.y - 1.0).abs() < 1e-12);
    }

    proptest! {
        #[test]
        fn wrap_to_pi_in_range(x in -1.0e4f64..1.0e4) {
            let w = wrap_to_pi(x);
            prop_assert!(w > -PI && w <= PI, "wrap_to_pi({x}) = {w}");
        }

        #[test]
        fn wrap_to_pi_is_periodic(x in -100.0f64..100.0, k in -20i32..20) {
            let a = wrap_to_pi(x);
            let b = wrap_to_pi(x + TAU * k as f64);
            // Compare on the circle so ±π are the same angle.
            let diff = wrap_to_pi(a - b).abs();
            prop_assert!(diff < 1e-9, "x={x} k={k}: {a} vs {b}");
        }

        #[test]
        fn not_zero_identity_outside_epsilon(x in prop_oneof![-1.0e6f64..-0.1001, 0.1001f64..1.0e6]) {
            prop_assert_eq!(not_zero(x), x);
        }

        #[test]
        fn not_zero_magnitude_inside_epsilon(x in -EPSILON..=EPSILON) {
            let y = not_zero(x);
            prop_assert_eq!(y.abs(), EPSILON);
            if x > 0.0 {
                prop_assert!(y > 0.0);
            } else {
                prop_assert!(y < 0.0);
            }
        }
    }
}

#[cfg(test)]
mod triangle {
    use std::f64::consts::PI;

    use proptest::prelude::*;

    use crate::{
        Footprint, GeometryError, IntersectOptions, Triangle, Vec2, tri_tri_2d,
        triangles_intersect,
    };

    fn ccw() -> Triangle {
        Triangle::new(Vec2::new(0.0, 0.0), Vec2::new(1.0, 0.0), Vec2::new(0.0, 1.0))
    }

    fn cw() -> Triangle {
        Triangle::new(Vec2::new(0.0, 0.0), Vec2::new(0.0, 1.0), Vec2::new(1.0, 0.0))
    }

    #[test]
    fn footprint_triangle_vertices() {
        let fp = Footprint::new(Vec2::ZERO, 9.0, 4.0, 0.0);
        let Triangle([apex, left, right]) = fp.triangle();
        assert!((apex.x - 6.0).abs() < 1e-12 && apex.y.abs() < 1e-12);
        assert!((left.x + 3.0).abs() < 1e-12 && (left.y - 2.0).abs() < 1e-12);
        assert!((right.x + 3.0).abs() < 1e-12 && (right.y + 2.0).abs() < 1e-12);
        assert!(fp.triangle().signed_area2() > 0.0);
    }

    #[test]
    fn footprint_rotates_with_heading() {
        let fp = Footprint::new(Vec2::new(1.0, 1.0), 3.0, 2.0, PI / 2.0);
        let Triangle([apex, _, _]) = fp.triangle();
        assert!((apex.x - 1.0).abs() < 1e-12);
        assert!((apex.y - 3.0).abs() < 1e-12);
    }

    #[test]
    fn reversed_winding_rejected_by_default() {
        let err = tri_tri_2d(&cw(), &ccw(), IntersectOptions::default()).unwrap_err();
        assert!(matches!(err, GeometryError::ReversedWinding(_)));
    }

    #[test]
    fn reversed_winding_repaired_when_allowed() {
        let opts = IntersectOptions { allow_reversed: true, ..Default::default() };
        assert!(tri_tri_2d(&cw(), &ccw(), opts).unwrap());
        assert_eq!(cw().normalized(true).unwrap().signed_area2(), ccw().signed_area2());
    }

    #[test]
    fn degenerate_triangle_rejected() {
        let flat = Triangle::new(Vec2::ZERO, Vec2::new(1.0, 0.0), Vec2::new(2.0, 0.0));
        let opts = IntersectOptions { allow_reversed: true, ..Default::default() };
        assert_eq!(tri_tri_2d(&flat, &ccw(), opts), Err(GeometryError::DegenerateTriangle));
    }

    #[test]
    fn non_finite_vertex_rejected() {
        let bad = Triangle::new(Vec2::new(f64::NAN, 0.0), Vec2::new(1.0, 0.0), Vec2::new(0.0, 1.0));
        assert_eq!(bad.normalized(true), Err(GeometryError::NonFiniteVertex));
    }

    #[test]
    fn shared_edge_counts_only_on_boundary() {
        let a = ccw();
        // Mirror across the hypotenuse: touches `a` along the edge (1,0)-(0,1).
        let b = Triangle::new(Vec2::new(1.0, 0.0), Vec2::new(1.0, 1.0), Vec2::new(0.0, 1.0));
        let touching = IntersectOptions::default();
        let strict = IntersectOptions { on_boundary: false, ..Default::default() };
        assert!(tri_tri_2d(&a, &b, touching).unwrap());
        assert!(!tri_tri_2d(&a, &b, strict).unwrap());
    }

    #[test]
    fn coincident_footprints_intersect() {
        let fp = Footprint::new(Vec2::new(3.0, -2.0), 9.0, 4.0, 0.7);
        assert!(triangles_intersect(&fp, &fp).unwrap());
    }

    #[test]
    fn overlapping_scenario_footprints_intersect() {
        let a = Footprint::new(Vec2::ZERO, 9.0, 4.0, 0.0).scaled(0.9);
        let b = Footprint::new(Vec2::new(5.0, 0.0), 9.0, 4.0, 0.0).scaled(0.9);
        assert!(triangles_intersect(&a, &b).unwrap());
    }

    #[test]
    fn side_by_side_clear_footprints_do_not_intersect() {
        let a = Footprint::new(Vec2::ZERO, 9.0, 4.0, 0.0);
        let b = Footprint::new(Vec2::new(0.0, 4.5), 9.0, 4.0, 0.0);
        assert!(!triangles_intersect(&a, &b).unwrap());
    }

    fn footprint() -> impl Strategy<Value = Footprint> {
        (-50.0f64..50.0, -50.0f64..50.0, 1.0f64..12.0, 1.0f64..6.0, -PI..PI)
            .prop_map(|(x, y, l, w, h)| Footprint::new(Vec2::new(x, y), l, w, h))
    }

    proptest! {
        #[test]
        fn intersection_is_symmetric(a in footprint(), b in footprint()) {
            prop_assert_eq!(
                triangles_intersect(&a, &b).unwrap(),
                triangles_intersect(&b, &a).unwrap()
            );
        }

        #[test]
        fn distant_footprints_never_intersect(a in footprint(), b in footprint(), angle in -PI..PI) {
            let gap = a.bounding_radius() + b.bounding_radius() + 0.01;
            let moved = Footprint { center: a.center + Vec2::from_angle(angle) * gap, ..b };
            prop_assert!(!triangles_intersect(&a, &moved).unwrap());
        }

        #[test]
        fn coincident_always_intersect(a in footprint()) {
            prop_assert!(triangles_intersect(&a, &a).unwrap());
        }
    }
}

#[cfg(test)]
mod time {
    use crate::{SimConfig, Tick};

    #[test]
    fn tick_advances_and_displays() {
        assert_eq!(Tick(10) + 5, Tick(15));
        assert_eq!(Tick::ZERO + 1, Tick(1));
        assert_eq!(Tick(7).to_string(), "T7");
    }

    #[test]
    fn default_config_is_valid() {
        let config = SimConfig::default();
        config.validate().unwrap();
        assert_eq!(config.steps_per_decision(), 15);
        assert!((config.dt() - 1.0 / 15.0).abs() < 1e-15);
    }

    #[test]
    fn config_rejects_non_dividing_policy_frequency() {
        let config = SimConfig { policy_frequency: 4, ..SimConfig::default() };
        assert!(config.validate().is_err());
    }

    #[test]
    fn config_rejects_zero_frequency() {
        let config = SimConfig { simulation_frequency: 0, ..SimConfig::default() };
        assert!(config.validate().is_err());
    }
}

#[cfg(test)]
mod rng {
    use crate::SimRng;

    #[test]
    fn same_seed_same_stream() {
        let mut a = SimRng::new(9);
        let mut b = SimRng::new(9);
        for _ in 0..16 {
            assert_eq!(a.gen_range(0..u64::MAX), b.gen_range(0..u64::MAX));
        }
    }

    #[test]
    fn clone_continues_stream() {
        let mut a = SimRng::new(3);
        let _ = a.gen_range(0.0..1.0f64);
        let mut b = a.clone();
        assert_eq!(a.gen_range(0.0..1.0f64), b.gen_range(0.0..1.0f64));
    }

    #[test]
    fn child_is_reproducible() {
        let mut a = SimRng::new(11);
        let mut b = SimRng::new(11);
        let mut ca = a.child(2);
        let mut cb = b.child(2);
        assert_eq!(ca.gen_range(0..u64::MAX), cb.gen_range(0..u64::MAX));
        assert_eq!(a.gen_range(0..u64::MAX), b.gen_range(0..u64::MAX));
    }
}
