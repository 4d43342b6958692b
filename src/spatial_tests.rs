use std::f64::consts::PI;

use float_cmp::{ApproxEq, F64Margin};
use nalgebra::{Isometry3, Translation3, UnitQuaternion, Vector3, Vector6};

use crate::spatial::*;

fn margin() -> F64Margin {
    F64Margin {
        epsilon: 1e-12,
        ulps: 4,
    }
}

fn create_frame() -> Frame {
    Isometry3::from_parts(
        Translation3::new(0.3, -1.2, 0.7),
        UnitQuaternion::from_euler_angles(0.2, -0.4, 1.1),
    )
}

fn create_twist() -> Twist {
    Twist::new(Vector3::new(1.0, -2.0, 0.5), Vector3::new(0.3, 0.1, -0.7))
}

fn create_wrench() -> Wrench {
    Wrench::new(Vector3::new(-4.0, 1.5, 2.0), Vector3::new(0.2, -0.6, 0.9))
}

// Twist

#[test]
fn when_crossing_a_twist_with_itself_it_should_be_zero() {
    let twist = create_twist();

    let result = twist.cross(&twist);

    assert!(result.approx_eq(Twist::zero(), margin()));
}

#[test]
fn when_crossing_twists_it_should_be_anti_symmetric() {
    let first = create_twist();
    let second = Twist::new(Vector3::new(0.4, 0.4, -1.0), Vector3::new(-0.2, 0.9, 0.1));

    let forward = first.cross(&second);
    let backward = second.cross(&first);

    assert!(forward.approx_eq(-backward, margin()));
}

#[test]
fn when_crossing_a_twist_with_a_wrench_it_should_be_the_dual_of_the_motion_cross_product() {
    // Duality: (v × m) · f == -m · (v ×* f)
    let v = create_twist();
    let m = Twist::new(Vector3::new(0.4, 0.4, -1.0), Vector3::new(-0.2, 0.9, 0.1));
    let f = create_wrench();

    let lhs = v.cross(&m).dot(&f);
    let rhs = -m.dot(&v.cross_wrench(&f));

    assert!(lhs.approx_eq(rhs, margin()));
}

#[test]
fn when_moving_the_reference_point_of_a_pure_rotation_it_should_add_linear_velocity() {
    let twist = Twist::new(Vector3::zeros(), Vector3::new(0.0, 0.0, 2.0));

    let result = twist.ref_point(&Vector3::new(1.5, 0.0, 0.0));

    assert!(result.approx_eq(
        Twist::new(Vector3::new(0.0, 3.0, 0.0), Vector3::new(0.0, 0.0, 2.0)),
        margin()
    ));
}

#[test]
fn when_scaling_a_twist_it_should_scale_both_parts() {
    let twist = create_twist();

    let result = twist * 2.0;

    assert_eq!(result.vel, twist.vel * 2.0);
    assert_eq!(result.rot, twist.rot * 2.0);
}

#[test]
fn when_converting_a_twist_to_a_vector_it_should_put_the_linear_part_first() {
    let twist = create_twist();

    let vector = twist.to_vector();

    assert_eq!(vector, Vector6::new(1.0, -2.0, 0.5, 0.3, 0.1, -0.7));
}

// Wrench

#[test]
fn when_moving_the_reference_point_of_a_wrench_the_power_should_not_change() {
    let twist = create_twist();
    let wrench = create_wrench();
    let offset = Vector3::new(0.5, -0.25, 2.0);

    let power = twist.dot(&wrench);
    let moved_power = twist.ref_point(&offset).dot(&wrench.ref_point(&offset));

    assert!(power.approx_eq(moved_power, margin()));
}

#[test]
fn when_accumulating_wrenches_it_should_add_and_subtract_component_wise() {
    let mut wrench = create_wrench();
    let other = Wrench::new(Vector3::new(1.0, 1.0, 1.0), Vector3::new(2.0, 2.0, 2.0));

    wrench += other;
    assert!(wrench.approx_eq(create_wrench() + other, margin()));

    wrench -= other;
    assert!(wrench.approx_eq(create_wrench(), margin()));
}

// SpatialTransform

#[test]
fn when_transforming_a_twist_and_back_it_should_be_unchanged() {
    let frame = create_frame();
    let twist = create_twist();

    let result = frame.inverse_transform_twist(&frame.transform_twist(&twist));

    assert!(result.approx_eq(twist, margin()));
}

#[test]
fn when_transforming_a_wrench_and_back_it_should_be_unchanged() {
    let frame = create_frame();
    let wrench = create_wrench();

    let result = frame.inverse_transform_wrench(&frame.transform_wrench(&wrench));

    assert!(result.approx_eq(wrench, margin()));
}

#[test]
fn when_transforming_twists_and_wrenches_the_power_should_not_change() {
    let frame = create_frame();
    let twist = create_twist();
    let wrench = create_wrench();

    let power = twist.dot(&wrench);
    let transformed = frame
        .transform_twist(&twist)
        .dot(&frame.transform_wrench(&wrench));

    assert!(power.approx_eq(transformed, margin()));
}

#[test]
fn when_transforming_with_a_composed_frame_it_should_match_transforming_twice() {
    let first = create_frame();
    let second = Isometry3::from_parts(
        Translation3::new(-0.5, 0.0, 2.0),
        UnitQuaternion::from_euler_angles(-1.0, 0.3, 0.0),
    );
    let twist = create_twist();

    let composed = (first * second).transform_twist(&twist);
    let sequential = first.transform_twist(&second.transform_twist(&twist));

    assert!(composed.approx_eq(sequential, margin()));
}

#[test]
fn when_transforming_with_a_pure_translation_it_should_move_the_reference_point() {
    let frame = Isometry3::translation(1.0, 2.0, 3.0);
    let twist = create_twist();

    // The origin of the parent frame sits at -p relative to the child frame origin
    let result = frame.transform_twist(&twist);
    let expected = twist.ref_point(&Vector3::new(-1.0, -2.0, -3.0));

    assert!(result.approx_eq(expected, margin()));
}

#[test]
fn when_only_rotating_a_twist_it_should_ignore_the_translation() {
    let frame = Isometry3::from_parts(
        Translation3::new(10.0, 20.0, 30.0),
        UnitQuaternion::from_axis_angle(&Vector3::z_axis(), PI / 2.0),
    );
    let twist = Twist::new(Vector3::new(1.0, 0.0, 0.0), Vector3::new(0.0, 1.0, 0.0));

    let result = frame.orientation_inverse_twist(&twist);

    assert!(result.approx_eq(
        Twist::new(Vector3::new(0.0, -1.0, 0.0), Vector3::new(1.0, 0.0, 0.0)),
        margin()
    ));

    let wrench = Wrench::new(twist.vel, twist.rot);
    let rotated = frame.orientation_inverse_wrench(&wrench);
    assert!(rotated.approx_eq(Wrench::new(result.vel, result.rot), margin()));
}

// RotationalInertia

#[test]
fn when_creating_rotational_inertia_it_should_be_symmetric() {
    let inertia = RotationalInertia::new(1.0, 2.0, 3.0, 0.1, 0.2, 0.3);

    let matrix = inertia.matrix();

    assert_eq!(matrix, &matrix.transpose());
    assert_eq!(1.0, matrix[(0, 0)]);
    assert_eq!(2.0, matrix[(1, 1)]);
    assert_eq!(3.0, matrix[(2, 2)]);
    assert_eq!(0.1, matrix[(0, 1)]);
    assert_eq!(0.2, matrix[(0, 2)]);
    assert_eq!(0.3, matrix[(1, 2)]);
}

// RigidBodyInertia

#[test]
fn when_creating_rigid_body_inertia_it_should_shift_the_inertia_to_the_reference_point() {
    let mass = 2.0;
    let com = Vector3::new(0.0, 0.5, 0.0);
    let inertia = RigidBodyInertia::new(mass, com, RotationalInertia::new(0.1, 0.1, 0.1, 0.0, 0.0, 0.0));

    assert_eq!(mass, inertia.mass());
    assert!(vector_approx_eq(&inertia.center_of_mass(), &com));

    let matrix = inertia.rotational_inertia();
    assert!(matrix[(0, 0)].approx_eq(0.1 + mass * 0.25, margin()));
    assert!(matrix[(1, 1)].approx_eq(0.1, margin()));
    assert!(matrix[(2, 2)].approx_eq(0.1 + mass * 0.25, margin()));
}

#[test]
fn when_a_body_has_no_mass_the_center_of_mass_should_be_the_reference_point() {
    let inertia = RigidBodyInertia::zero();

    assert_eq!(0.0, inertia.mass());
    assert_eq!(Vector3::zeros(), inertia.center_of_mass());
    assert_eq!(Wrench::zero(), inertia * create_twist());
}

#[test]
fn when_applying_rigid_body_inertia_it_should_match_the_spatial_inertia_matrix() {
    let inertia = RigidBodyInertia::new(
        3.0,
        Vector3::new(0.1, -0.2, 0.3),
        RotationalInertia::new(0.5, 0.4, 0.3, 0.01, 0.02, 0.03),
    );
    let twist = create_twist();

    let wrench = inertia * twist;
    let expected = inertia.matrix() * twist.to_vector();

    for i in 0..6 {
        assert!(wrench.to_vector()[i].approx_eq(expected[i], margin()));
    }
}

#[test]
fn when_applying_rigid_body_inertia_to_a_translation_it_should_give_the_momentum_of_a_point_mass() {
    let mass = 4.0;
    let com = Vector3::new(1.0, 0.0, 0.0);
    let inertia = RigidBodyInertia::new(mass, com, RotationalInertia::zero());
    let twist = Twist::new(Vector3::new(0.0, 2.0, 0.0), Vector3::zeros());

    let wrench = inertia * twist;

    // p = m v, L = c × p
    assert!(wrench.approx_eq(
        Wrench::new(Vector3::new(0.0, 8.0, 0.0), Vector3::new(0.0, 0.0, 8.0)),
        margin()
    ));
}

#[test]
fn when_adding_rigid_body_inertias_it_should_lump_the_bodies() {
    let first = RigidBodyInertia::new(1.0, Vector3::new(1.0, 0.0, 0.0), RotationalInertia::zero());
    let second = RigidBodyInertia::new(1.0, Vector3::new(-1.0, 0.0, 0.0), RotationalInertia::zero());

    let lumped = first + second;

    assert_eq!(2.0, lumped.mass());
    assert!(vector_approx_eq(&lumped.center_of_mass(), &Vector3::zeros()));
    assert!(lumped.rotational_inertia()[(2, 2)].approx_eq(2.0, margin()));
    assert!(lumped.rotational_inertia()[(0, 0)].approx_eq(0.0, margin()));
}

fn vector_approx_eq(lhs: &Vector3<f64>, rhs: &Vector3<f64>) -> bool {
    lhs.iter()
        .zip(rhs.iter())
        .all(|(l, r)| (*l).approx_eq(*r, margin()))
}
