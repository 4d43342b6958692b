use std::f64::consts::PI;

use float_cmp::{ApproxEq, F64Margin};
use nalgebra::{Point3, Vector3};

use super::*;

fn margin() -> F64Margin {
    F64Margin {
        epsilon: 1e-12,
        ulps: 4,
    }
}

fn vector_approx_eq(lhs: &Vector3<f64>, rhs: &Vector3<f64>) -> bool {
    lhs.iter()
        .zip(rhs.iter())
        .all(|(l, r)| (*l).approx_eq(*r, margin()))
}

#[test]
fn when_creating_a_fixed_joint_it_should_not_move() {
    let joint = Joint::fixed("a");

    assert!(joint.is_fixed());
    assert_eq!("a", joint.name());
    assert_eq!(Isometry3::identity(), joint.pose(1.3));
    assert_eq!(Twist::zero(), joint.twist(2.0));
}

#[test]
fn when_creating_a_joint_with_an_axis_type_without_axis_it_should_error() {
    let result = Joint::new("a", JointType::RevoluteAxis);
    assert_eq!(
        Err(Error::InvalidJointAxis {
            name: "a".to_string()
        }),
        result
    );

    let result = Joint::new("b", JointType::PrismaticAxis);
    assert!(result.is_err());
}

#[test]
fn when_creating_a_joint_with_a_zero_axis_it_should_error() {
    let result = Joint::new_with_axis(
        "a",
        Vector3::zeros(),
        Vector3::zeros(),
        JointType::RevoluteAxis,
    );

    assert_eq!(
        Err(Error::InvalidJointAxis {
            name: "a".to_string()
        }),
        result
    );
}

#[test]
fn when_creating_an_axis_joint_with_a_frame_axis_type_it_should_error() {
    let result = Joint::new_with_axis(
        "a",
        Vector3::zeros(),
        Vector3::x(),
        JointType::RevoluteX,
    );

    assert!(result.is_err());
}

#[test]
fn when_creating_an_axis_joint_it_should_normalize_the_axis() {
    let joint = Joint::new_with_axis(
        "a",
        Vector3::new(1.0, 2.0, 3.0),
        Vector3::new(0.0, 0.0, 4.0),
        JointType::PrismaticAxis,
    )
    .unwrap();

    assert_eq!(JointType::PrismaticAxis, joint.kind());
    assert!(vector_approx_eq(&joint.axis(), &Vector3::z()));
    assert_eq!(&Vector3::new(1.0, 2.0, 3.0), joint.origin());
}

#[test]
fn when_creating_a_joint_it_should_have_default_parameters() {
    let joint = Joint::new("a", JointType::RevoluteZ).unwrap();

    assert_eq!(1.0, joint.scale());
    assert_eq!(0.0, joint.offset());
    assert_eq!(0.0, joint.inertia());
    assert_eq!(0.0, joint.damping());
    assert_eq!(0.0, joint.stiffness());
}

#[test]
fn when_setting_the_joint_parameters_it_should_store_them() {
    let joint = Joint::new("a", JointType::PrismaticY)
        .unwrap()
        .with_parameters(2.0, 0.5, 0.1, 0.2, 0.3);

    assert_eq!(2.0, joint.scale());
    assert_eq!(0.5, joint.offset());
    assert_eq!(0.1, joint.inertia());
    assert_eq!(0.2, joint.damping());
    assert_eq!(0.3, joint.stiffness());
}

#[test]
fn when_rotating_a_revolute_z_joint_it_should_rotate_around_z() {
    let joint = Joint::new("a", JointType::RevoluteZ).unwrap();

    let pose = joint.pose(0.5 * PI);
    let result = pose * Point3::new(1.0, 0.0, 0.0);

    assert!(vector_approx_eq(&result.coords, &Vector3::y()));
    assert!(vector_approx_eq(&pose.translation.vector, &Vector3::zeros()));
}

#[test]
fn when_rotating_a_revolute_x_joint_it_should_rotate_around_x() {
    let joint = Joint::new("a", JointType::RevoluteX).unwrap();

    let result = joint.pose(0.5 * PI) * Point3::new(0.0, 1.0, 0.0);

    assert!(vector_approx_eq(&result.coords, &Vector3::z()));
}

#[test]
fn when_rotating_a_revolute_y_joint_it_should_rotate_around_y() {
    let joint = Joint::new("a", JointType::RevoluteY).unwrap();

    let result = joint.pose(0.5 * PI) * Point3::new(0.0, 0.0, 1.0);

    assert!(vector_approx_eq(&result.coords, &Vector3::x()));
}

#[test]
fn when_rotating_a_joint_with_scale_and_offset_it_should_map_the_position() {
    let joint = Joint::new("a", JointType::RevoluteZ)
        .unwrap()
        .with_parameters(2.0, 0.25 * PI, 0.0, 0.0, 0.0);

    // 2 * pi/8 + pi/4 = pi/2
    let result = joint.pose(0.125 * PI) * Point3::new(1.0, 0.0, 0.0);

    assert!(vector_approx_eq(&result.coords, &Vector3::y()));
}

#[test]
fn when_rotating_an_axis_joint_it_should_rotate_around_the_line_through_the_origin() {
    let joint = Joint::new_with_axis(
        "a",
        Vector3::new(1.0, 0.0, 0.0),
        Vector3::z(),
        JointType::RevoluteAxis,
    )
    .unwrap();

    let pose = joint.pose(PI);

    // The origin stays put, the frame origin swings around it
    let origin = pose * Point3::new(1.0, 0.0, 0.0);
    let frame_origin = pose * Point3::origin();

    assert!(vector_approx_eq(&origin.coords, &Vector3::new(1.0, 0.0, 0.0)));
    assert!(vector_approx_eq(
        &frame_origin.coords,
        &Vector3::new(2.0, 0.0, 0.0)
    ));
}

#[test]
fn when_moving_a_prismatic_joint_it_should_translate_along_the_axis() {
    let joint = Joint::new("a", JointType::PrismaticX).unwrap();

    let pose = joint.pose(0.75);

    assert!(vector_approx_eq(
        &pose.translation.vector,
        &Vector3::new(0.75, 0.0, 0.0)
    ));
    assert_eq!(UnitQuaternion::identity(), pose.rotation);
}

#[test]
fn when_moving_a_prismatic_axis_joint_it_should_start_at_the_origin() {
    let joint = Joint::new_with_axis(
        "a",
        Vector3::new(0.0, 1.0, 0.0),
        Vector3::new(0.0, 0.0, 2.0),
        JointType::PrismaticAxis,
    )
    .unwrap();

    let pose = joint.pose(0.5);

    assert!(vector_approx_eq(
        &pose.translation.vector,
        &Vector3::new(0.0, 1.0, 0.5)
    ));
}

#[test]
fn when_getting_the_twist_of_a_revolute_joint_it_should_only_rotate() {
    let joint = Joint::new("a", JointType::RevoluteY)
        .unwrap()
        .with_parameters(3.0, 1.0, 0.0, 0.0, 0.0);

    let twist = joint.twist(2.0);

    assert_eq!(Vector3::zeros(), twist.vel);
    assert!(vector_approx_eq(&twist.rot, &Vector3::new(0.0, 6.0, 0.0)));
}

#[test]
fn when_getting_the_twist_of_a_revolute_axis_joint_it_should_include_the_origin_offset() {
    let joint = Joint::new_with_axis(
        "a",
        Vector3::new(1.0, 0.0, 0.0),
        Vector3::z(),
        JointType::RevoluteAxis,
    )
    .unwrap();

    let twist = joint.twist(2.0);

    // The frame origin sits at -x from the rotation axis, so it moves in -y
    assert!(vector_approx_eq(&twist.rot, &Vector3::new(0.0, 0.0, 2.0)));
    assert!(vector_approx_eq(&twist.vel, &Vector3::new(0.0, -2.0, 0.0)));
}

#[test]
fn when_getting_the_twist_of_a_prismatic_joint_it_should_only_translate() {
    let joint = Joint::new("a", JointType::PrismaticZ).unwrap();

    let twist = joint.twist(-1.5);

    assert!(vector_approx_eq(&twist.vel, &Vector3::new(0.0, 0.0, -1.5)));
    assert_eq!(Vector3::zeros(), twist.rot);
}

#[test]
fn when_checking_the_joint_type_it_should_report_rotations() {
    assert!(JointType::RevoluteX.is_revolute());
    assert!(JointType::RevoluteAxis.is_revolute());
    assert!(!JointType::PrismaticY.is_revolute());
    assert!(!JointType::Fixed.is_revolute());
    assert!(JointType::Fixed.is_fixed());
    assert!(!JointType::PrismaticAxis.is_fixed());
}
