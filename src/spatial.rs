//! Defines the spatial algebra types that are used to describe the motion of, and the forces
//! acting on, the segments of a kinematic model.
//!
//! All spatial quantities are expressed in a specific reference frame and relative to a
//! specific reference point, normally the origin of that frame.
//!
//! * A [Twist] is a spatial velocity (or acceleration): a linear part and an angular part.
//! * A [Wrench] is a spatial force: a force and a torque.
//! * A [RigidBodyInertia] maps a twist to the wrench needed to produce it.
//! * A [Frame] is a rigid transform. The [SpatialTransform] trait moves twists and wrenches
//!   between frames.
//!
//! ## References
//!
//! * Rigid Body Dynamics Algorithms
//!   Roy Featherstone
//!   Springer, 2008

extern crate nalgebra as na;

use std::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};

use float_cmp::{ApproxEq, F64Margin};
use na::{Isometry3, Matrix3, Matrix6, Vector3, Vector6};

#[cfg(test)]
#[path = "spatial_tests.rs"]
mod spatial_tests;

/// A rigid transform, i.e. a rotation followed by a translation.
///
/// When a frame describes the pose of frame B relative to frame A, applying it to a quantity
/// expressed in B returns the same quantity expressed in A.
pub type Frame = Isometry3<f64>;

/// A spatial velocity, made up of the linear velocity of the reference point and the angular
/// velocity of the body.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Twist {
    /// The linear velocity of the reference point.
    pub vel: Vector3<f64>,

    /// The angular velocity.
    pub rot: Vector3<f64>,
}

impl Twist {
    /// Computes the spatial cross product of two motion vectors, i.e. `self × other`.
    ///
    /// This is the derivative of `other` when it is carried along with a frame moving with
    /// `self`. It provides the velocity product (Coriolis and centripetal) terms in the
    /// acceleration recursion.
    pub fn cross(&self, other: &Twist) -> Twist {
        Twist::new(
            self.rot.cross(&other.vel) + self.vel.cross(&other.rot),
            self.rot.cross(&other.rot),
        )
    }

    /// Computes the spatial cross product of a motion vector with a force vector.
    pub fn cross_wrench(&self, wrench: &Wrench) -> Wrench {
        Wrench::new(
            self.rot.cross(&wrench.force),
            self.rot.cross(&wrench.torque) + self.vel.cross(&wrench.force),
        )
    }

    /// Returns the power delivered by the given wrench when moving with the current twist.
    ///
    /// Both quantities must be expressed in the same frame and relative to the same
    /// reference point.
    pub fn dot(&self, wrench: &Wrench) -> f64 {
        self.vel.dot(&wrench.force) + self.rot.dot(&wrench.torque)
    }

    /// Creates a new [Twist] from a linear and an angular velocity.
    pub fn new(vel: Vector3<f64>, rot: Vector3<f64>) -> Self {
        Self { vel, rot }
    }

    /// Returns the same twist with its reference point moved by the given vector.
    ///
    /// ## Parameters
    ///
    /// * 'offset' - The vector from the current reference point to the new reference point,
    ///   expressed in the same frame as the twist.
    pub fn ref_point(&self, offset: &Vector3<f64>) -> Twist {
        Twist::new(self.vel + self.rot.cross(offset), self.rot)
    }

    /// Returns the twist as a 6D vector, linear part first.
    pub fn to_vector(&self) -> Vector6<f64> {
        Vector6::new(
            self.vel.x, self.vel.y, self.vel.z, self.rot.x, self.rot.y, self.rot.z,
        )
    }

    /// Returns a twist with no motion.
    pub fn zero() -> Self {
        Self::new(Vector3::zeros(), Vector3::zeros())
    }
}

impl Add for Twist {
    type Output = Twist;

    #[inline]
    fn add(self, rhs: Twist) -> Twist {
        Twist::new(self.vel + rhs.vel, self.rot + rhs.rot)
    }
}

impl Sub for Twist {
    type Output = Twist;

    #[inline]
    fn sub(self, rhs: Twist) -> Twist {
        Twist::new(self.vel - rhs.vel, self.rot - rhs.rot)
    }
}

impl Neg for Twist {
    type Output = Twist;

    #[inline]
    fn neg(self) -> Twist {
        Twist::new(-self.vel, -self.rot)
    }
}

impl Mul<f64> for Twist {
    type Output = Twist;

    #[inline]
    fn mul(self, rhs: f64) -> Twist {
        Twist::new(self.vel * rhs, self.rot * rhs)
    }
}

impl ApproxEq for Twist {
    type Margin = F64Margin;

    fn approx_eq<M: Into<Self::Margin>>(self, other: Self, margin: M) -> bool {
        let margin = margin.into();
        vectors_approx_eq(&self.vel, &other.vel, margin)
            && vectors_approx_eq(&self.rot, &other.rot, margin)
    }
}

/// A spatial force, made up of a force and the torque around the reference point.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Wrench {
    /// The force.
    pub force: Vector3<f64>,

    /// The torque around the reference point.
    pub torque: Vector3<f64>,
}

impl Wrench {
    /// Creates a new [Wrench] from a force and a torque.
    pub fn new(force: Vector3<f64>, torque: Vector3<f64>) -> Self {
        Self { force, torque }
    }

    /// Returns the same wrench with its reference point moved by the given vector.
    ///
    /// ## Parameters
    ///
    /// * 'offset' - The vector from the current reference point to the new reference point,
    ///   expressed in the same frame as the wrench.
    pub fn ref_point(&self, offset: &Vector3<f64>) -> Wrench {
        Wrench::new(self.force, self.torque + self.force.cross(offset))
    }

    /// Returns the wrench as a 6D vector, force first.
    pub fn to_vector(&self) -> Vector6<f64> {
        Vector6::new(
            self.force.x,
            self.force.y,
            self.force.z,
            self.torque.x,
            self.torque.y,
            self.torque.z,
        )
    }

    /// Returns a wrench with no force and no torque.
    pub fn zero() -> Self {
        Self::new(Vector3::zeros(), Vector3::zeros())
    }
}

impl Add for Wrench {
    type Output = Wrench;

    #[inline]
    fn add(self, rhs: Wrench) -> Wrench {
        Wrench::new(self.force + rhs.force, self.torque + rhs.torque)
    }
}

impl AddAssign for Wrench {
    #[inline]
    fn add_assign(&mut self, rhs: Wrench) {
        self.force += rhs.force;
        self.torque += rhs.torque;
    }
}

impl Sub for Wrench {
    type Output = Wrench;

    #[inline]
    fn sub(self, rhs: Wrench) -> Wrench {
        Wrench::new(self.force - rhs.force, self.torque - rhs.torque)
    }
}

impl SubAssign for Wrench {
    #[inline]
    fn sub_assign(&mut self, rhs: Wrench) {
        self.force -= rhs.force;
        self.torque -= rhs.torque;
    }
}

impl Neg for Wrench {
    type Output = Wrench;

    #[inline]
    fn neg(self) -> Wrench {
        Wrench::new(-self.force, -self.torque)
    }
}

impl Mul<f64> for Wrench {
    type Output = Wrench;

    #[inline]
    fn mul(self, rhs: f64) -> Wrench {
        Wrench::new(self.force * rhs, self.torque * rhs)
    }
}

impl ApproxEq for Wrench {
    type Margin = F64Margin;

    fn approx_eq<M: Into<Self::Margin>>(self, other: Self, margin: M) -> bool {
        let margin = margin.into();
        vectors_approx_eq(&self.force, &other.force, margin)
            && vectors_approx_eq(&self.torque, &other.torque, margin)
    }
}

fn vectors_approx_eq(lhs: &Vector3<f64>, rhs: &Vector3<f64>, margin: F64Margin) -> bool {
    lhs.iter()
        .zip(rhs.iter())
        .all(|(l, r)| (*l).approx_eq(*r, margin))
}

/// Moves twists and wrenches between reference frames.
///
/// For a frame `X` that describes the pose of frame B relative to frame A:
///
/// * the `transform_*` methods take a quantity expressed in B (relative to the origin of B)
///   and return it expressed in A (relative to the origin of A).
/// * the `inverse_transform_*` methods do the opposite.
/// * the `orientation_inverse_*` methods only change the orientation in which the quantity
///   is expressed, the reference point stays where it is.
pub trait SpatialTransform {
    /// Expresses a twist given in the child frame in the parent frame.
    fn transform_twist(&self, twist: &Twist) -> Twist;

    /// Expresses a twist given in the parent frame in the child frame.
    fn inverse_transform_twist(&self, twist: &Twist) -> Twist;

    /// Rotates a twist given in the parent orientation into the child orientation.
    fn orientation_inverse_twist(&self, twist: &Twist) -> Twist;

    /// Expresses a wrench given in the child frame in the parent frame.
    fn transform_wrench(&self, wrench: &Wrench) -> Wrench;

    /// Expresses a wrench given in the parent frame in the child frame.
    fn inverse_transform_wrench(&self, wrench: &Wrench) -> Wrench;

    /// Rotates a wrench given in the parent orientation into the child orientation.
    fn orientation_inverse_wrench(&self, wrench: &Wrench) -> Wrench;
}

impl SpatialTransform for Frame {
    fn transform_twist(&self, twist: &Twist) -> Twist {
        let rot = self.rotation * twist.rot;
        let vel = self.rotation * twist.vel + self.translation.vector.cross(&rot);
        Twist::new(vel, rot)
    }

    fn inverse_transform_twist(&self, twist: &Twist) -> Twist {
        let p = &self.translation.vector;
        Twist::new(
            self.rotation
                .inverse_transform_vector(&(twist.vel - p.cross(&twist.rot))),
            self.rotation.inverse_transform_vector(&twist.rot),
        )
    }

    fn orientation_inverse_twist(&self, twist: &Twist) -> Twist {
        Twist::new(
            self.rotation.inverse_transform_vector(&twist.vel),
            self.rotation.inverse_transform_vector(&twist.rot),
        )
    }

    fn transform_wrench(&self, wrench: &Wrench) -> Wrench {
        let force = self.rotation * wrench.force;
        let torque = self.rotation * wrench.torque + self.translation.vector.cross(&force);
        Wrench::new(force, torque)
    }

    fn inverse_transform_wrench(&self, wrench: &Wrench) -> Wrench {
        let p = &self.translation.vector;
        Wrench::new(
            self.rotation.inverse_transform_vector(&wrench.force),
            self.rotation
                .inverse_transform_vector(&(wrench.torque - p.cross(&wrench.force))),
        )
    }

    fn orientation_inverse_wrench(&self, wrench: &Wrench) -> Wrench {
        Wrench::new(
            self.rotation.inverse_transform_vector(&wrench.force),
            self.rotation.inverse_transform_vector(&wrench.torque),
        )
    }
}

/// The rotational inertia tensor of a body around its center of mass.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RotationalInertia {
    tensor: Matrix3<f64>,
}

impl RotationalInertia {
    /// Returns the inertia tensor as a symmetric 3x3 matrix.
    pub fn matrix(&self) -> &Matrix3<f64> {
        &self.tensor
    }

    /// Creates a new [RotationalInertia] from the moments and products of inertia.
    ///
    /// ## Parameters
    ///
    /// * 'ixx', 'iyy', 'izz' - The moments of inertia around the x, y and z axes
    /// * 'ixy', 'ixz', 'iyz' - The products of inertia
    pub fn new(ixx: f64, iyy: f64, izz: f64, ixy: f64, ixz: f64, iyz: f64) -> Self {
        #[rustfmt::skip]
        let tensor = Matrix3::new(
            ixx, ixy, ixz,
            ixy, iyy, iyz,
            ixz, iyz, izz);

        Self { tensor }
    }

    /// Returns a rotational inertia with all moments and products equal to zero.
    pub fn zero() -> Self {
        Self {
            tensor: Matrix3::zeros(),
        }
    }
}

/// The inertia of a rigid body relative to a reference point, normally the origin of the
/// frame of the segment that owns the body.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RigidBodyInertia {
    /// The mass of the body.
    mass: f64,

    /// The first moment of mass, i.e. the mass times the location of the center of mass.
    first_moment: Vector3<f64>,

    /// The rotational inertia around the reference point.
    rotational_inertia: Matrix3<f64>,
}

impl RigidBodyInertia {
    /// Returns the location of the center of mass relative to the reference point.
    ///
    /// Returns the reference point when the body has no mass.
    pub fn center_of_mass(&self) -> Vector3<f64> {
        if self.mass == 0.0 {
            return Vector3::zeros();
        }

        self.first_moment / self.mass
    }

    /// Returns the mass of the body.
    pub fn mass(&self) -> f64 {
        self.mass
    }

    /// Returns the 6x6 spatial inertia matrix. The matrix maps a twist written as
    /// `[vel; rot]` onto a wrench written as `[force; torque]`.
    pub fn matrix(&self) -> Matrix6<f64> {
        let h = self.first_moment.cross_matrix();

        let mut result = Matrix6::zeros();
        result
            .fixed_view_mut::<3, 3>(0, 0)
            .copy_from(&(Matrix3::identity() * self.mass));
        result.fixed_view_mut::<3, 3>(0, 3).copy_from(&(-h));
        result.fixed_view_mut::<3, 3>(3, 0).copy_from(&h);
        result
            .fixed_view_mut::<3, 3>(3, 3)
            .copy_from(&self.rotational_inertia);
        result
    }

    /// Creates a new [RigidBodyInertia].
    ///
    /// ## Parameters
    ///
    /// * 'mass' - The mass of the body
    /// * 'center_of_mass' - The location of the center of mass relative to the reference point
    /// * 'inertia' - The rotational inertia of the body around its center of mass
    pub fn new(mass: f64, center_of_mass: Vector3<f64>, inertia: RotationalInertia) -> Self {
        let parallel_axis = (Matrix3::identity() * center_of_mass.dot(&center_of_mass)
            - center_of_mass * center_of_mass.transpose())
            * mass;

        Self {
            mass,
            first_moment: center_of_mass * mass,
            rotational_inertia: inertia.matrix() + parallel_axis,
        }
    }

    /// Returns the rotational inertia around the reference point.
    pub fn rotational_inertia(&self) -> &Matrix3<f64> {
        &self.rotational_inertia
    }

    /// Returns an inertia for a body without mass.
    pub fn zero() -> Self {
        Self {
            mass: 0.0,
            first_moment: Vector3::zeros(),
            rotational_inertia: Matrix3::zeros(),
        }
    }
}

impl Default for RigidBodyInertia {
    fn default() -> Self {
        Self::zero()
    }
}

impl Add for RigidBodyInertia {
    type Output = RigidBodyInertia;

    /// Lumps two bodies that share the same reference point into one body.
    fn add(self, rhs: RigidBodyInertia) -> RigidBodyInertia {
        RigidBodyInertia {
            mass: self.mass + rhs.mass,
            first_moment: self.first_moment + rhs.first_moment,
            rotational_inertia: self.rotational_inertia + rhs.rotational_inertia,
        }
    }
}

impl Mul<Twist> for RigidBodyInertia {
    type Output = Wrench;

    fn mul(self, twist: Twist) -> Wrench {
        Wrench::new(
            twist.vel * self.mass - self.first_moment.cross(&twist.rot),
            self.rotational_inertia * twist.rot + self.first_moment.cross(&twist.vel),
        )
    }
}
