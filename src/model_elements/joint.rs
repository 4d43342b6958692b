//! Defines the joints that connect a segment to its parent.

extern crate nalgebra as na;

use na::{Isometry3, Translation3, Unit, UnitQuaternion, Vector3};

use crate::{
    spatial::{Frame, Twist},
    Error,
};

#[cfg(test)]
#[path = "joint_tests.rs"]
mod joint_tests;

/// The smallest axis length that is accepted for joints with an arbitrary axis.
const MINIMUM_AXIS_LENGTH: f64 = 1e-9;

/// Defines the degree-of-freedom for a joint, i.e. how the segment moves relative to its parent.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum JointType {
    /// The segment is static relative to the parent. Fixed joints have no degree-of-freedom
    /// and do not take up an entry in the joint arrays.
    Fixed,
    /// The segment rotates around the X-axis of the joint frame.
    RevoluteX,
    /// The segment rotates around the Y-axis of the joint frame.
    RevoluteY,
    /// The segment rotates around the Z-axis of the joint frame.
    RevoluteZ,
    /// The segment rotates around an arbitrary axis that runs through the joint origin.
    RevoluteAxis,
    /// The segment translates along the X-axis of the joint frame.
    PrismaticX,
    /// The segment translates along the Y-axis of the joint frame.
    PrismaticY,
    /// The segment translates along the Z-axis of the joint frame.
    PrismaticZ,
    /// The segment translates along an arbitrary axis, starting at the joint origin.
    PrismaticAxis,
}

impl JointType {
    /// Returns a value indicating whether the joint type has a degree-of-freedom.
    pub fn is_fixed(&self) -> bool {
        *self == JointType::Fixed
    }

    /// Returns a value indicating whether the joint type is a rotation.
    pub fn is_revolute(&self) -> bool {
        matches!(
            self,
            JointType::RevoluteX
                | JointType::RevoluteY
                | JointType::RevoluteZ
                | JointType::RevoluteAxis
        )
    }
}

/// Defines a joint with at most one degree-of-freedom.
///
/// The joint position `q` is mapped onto the physical displacement as `scale * q + offset`.
/// Revolute displacements are in radians, prismatic displacements in the length unit of the
/// model.
#[derive(Clone, Debug, PartialEq)]
pub struct Joint {
    /// The human readable name for the joint.
    name: String,

    /// The degree-of-freedom of the joint.
    kind: JointType,

    /// The point, in the parent frame, through which the axis of the joint runs.
    origin: Vector3<f64>,

    /// The direction of the motion, in the parent frame.
    axis: Unit<Vector3<f64>>,

    scale: f64,
    offset: f64,

    /// The reflected inertia of the actuator, e.g. the rotor inertia of the motor as seen
    /// from the joint.
    inertia: f64,

    damping: f64,
    stiffness: f64,
}

impl Joint {
    /// Returns the direction of motion of the joint, expressed in the parent frame.
    pub fn axis(&self) -> Vector3<f64> {
        self.axis.into_inner()
    }

    /// Returns the damping coefficient of the joint.
    pub fn damping(&self) -> f64 {
        self.damping
    }

    /// Creates a new fixed joint, i.e. a joint without a degree-of-freedom.
    pub fn fixed(name: &str) -> Self {
        Self::with_kind(name, JointType::Fixed, Vector3::zeros(), Vector3::z_axis())
    }

    /// Returns the reflected actuator inertia of the joint.
    pub fn inertia(&self) -> f64 {
        self.inertia
    }

    /// Returns a value indicating whether the joint has no degree-of-freedom.
    pub fn is_fixed(&self) -> bool {
        self.kind.is_fixed()
    }

    /// Returns the degree-of-freedom of the joint.
    pub fn kind(&self) -> JointType {
        self.kind
    }

    /// Returns the name of the joint.
    pub fn name(&self) -> &str {
        self.name.as_ref()
    }

    /// Creates a new joint that moves along, or rotates around, one of the axes of the
    /// joint frame.
    ///
    /// ## Parameters
    ///
    /// * 'name' - The name of the joint
    /// * 'kind' - The degree-of-freedom of the joint
    ///
    /// ## Errors
    ///
    /// * [Error::InvalidJointAxis] - Returned when 'kind' is [JointType::RevoluteAxis] or
    ///   [JointType::PrismaticAxis]. Those joints need an axis, use [Joint::new_with_axis].
    pub fn new(name: &str, kind: JointType) -> Result<Self, Error> {
        let axis = match kind {
            JointType::Fixed => Vector3::z_axis(),
            JointType::RevoluteX | JointType::PrismaticX => Vector3::x_axis(),
            JointType::RevoluteY | JointType::PrismaticY => Vector3::y_axis(),
            JointType::RevoluteZ | JointType::PrismaticZ => Vector3::z_axis(),
            JointType::RevoluteAxis | JointType::PrismaticAxis => {
                return Err(Error::InvalidJointAxis {
                    name: name.to_string(),
                })
            }
        };

        Ok(Self::with_kind(name, kind, Vector3::zeros(), axis))
    }

    /// Creates a new joint that moves along, or rotates around, an arbitrary axis.
    ///
    /// ## Parameters
    ///
    /// * 'name' - The name of the joint
    /// * 'origin' - The point, in the parent frame, through which the axis runs
    /// * 'axis' - The direction of the axis in the parent frame. Does not need to be normalized.
    /// * 'kind' - Either [JointType::RevoluteAxis] or [JointType::PrismaticAxis]
    ///
    /// ## Errors
    ///
    /// * [Error::InvalidJointAxis] - Returned when the axis has no length or when 'kind' is not
    ///   one of the arbitrary axis joint types.
    pub fn new_with_axis(
        name: &str,
        origin: Vector3<f64>,
        axis: Vector3<f64>,
        kind: JointType,
    ) -> Result<Self, Error> {
        if kind != JointType::RevoluteAxis && kind != JointType::PrismaticAxis {
            return Err(Error::InvalidJointAxis {
                name: name.to_string(),
            });
        }

        let unit_axis = match Unit::try_new(axis, MINIMUM_AXIS_LENGTH) {
            Some(a) => a,
            None => {
                return Err(Error::InvalidJointAxis {
                    name: name.to_string(),
                })
            }
        };

        Ok(Self::with_kind(name, kind, origin, unit_axis))
    }

    /// Returns the offset that is added to the scaled joint position.
    pub fn offset(&self) -> f64 {
        self.offset
    }

    /// Returns the point, in the parent frame, through which the joint axis runs.
    pub fn origin(&self) -> &Vector3<f64> {
        &self.origin
    }

    /// Returns the pose of the joint frame after the displacement relative to the joint frame
    /// before the displacement.
    ///
    /// ## Parameters
    ///
    /// * 'q' - The joint position
    pub fn pose(&self, q: f64) -> Frame {
        let displacement = self.scale * q + self.offset;
        match self.kind {
            JointType::Fixed => Isometry3::identity(),
            JointType::RevoluteX | JointType::RevoluteY | JointType::RevoluteZ => {
                Isometry3::from_parts(
                    Translation3::identity(),
                    UnitQuaternion::from_axis_angle(&self.axis, displacement),
                )
            }
            JointType::RevoluteAxis => {
                // Rotation around the line through 'origin', not around the frame origin
                let rotation = UnitQuaternion::from_axis_angle(&self.axis, displacement);
                let translation = self.origin - rotation * self.origin;
                Isometry3::from_parts(Translation3::from(translation), rotation)
            }
            JointType::PrismaticX | JointType::PrismaticY | JointType::PrismaticZ => {
                Isometry3::from_parts(
                    Translation3::from(self.axis.into_inner() * displacement),
                    UnitQuaternion::identity(),
                )
            }
            JointType::PrismaticAxis => Isometry3::from_parts(
                Translation3::from(self.origin + self.axis.into_inner() * displacement),
                UnitQuaternion::identity(),
            ),
        }
    }

    /// Returns the scale that is applied to the joint position.
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Returns the stiffness of the joint.
    pub fn stiffness(&self) -> f64 {
        self.stiffness
    }

    /// Returns the twist of the joint for the given joint velocity.
    ///
    /// The twist is expressed in the joint frame, with the origin of the joint frame as the
    /// reference point.
    ///
    /// ## Parameters
    ///
    /// * 'qdot' - The joint velocity
    pub fn twist(&self, qdot: f64) -> Twist {
        let rate = self.axis.into_inner() * (self.scale * qdot);
        match self.kind {
            JointType::Fixed => Twist::zero(),
            JointType::RevoluteX | JointType::RevoluteY | JointType::RevoluteZ => {
                Twist::new(Vector3::zeros(), rate)
            }
            JointType::RevoluteAxis => Twist::new(self.origin.cross(&rate), rate),
            JointType::PrismaticX
            | JointType::PrismaticY
            | JointType::PrismaticZ
            | JointType::PrismaticAxis => Twist::new(rate, Vector3::zeros()),
        }
    }

    /// Returns a copy of the joint with the given mapping and dynamic parameters.
    ///
    /// ## Parameters
    ///
    /// * 'scale' - The scale applied to the joint position
    /// * 'offset' - The offset added to the scaled joint position
    /// * 'inertia' - The reflected actuator inertia
    /// * 'damping' - The damping coefficient
    /// * 'stiffness' - The stiffness coefficient
    pub fn with_parameters(
        mut self,
        scale: f64,
        offset: f64,
        inertia: f64,
        damping: f64,
        stiffness: f64,
    ) -> Self {
        self.scale = scale;
        self.offset = offset;
        self.inertia = inertia;
        self.damping = damping;
        self.stiffness = stiffness;
        self
    }

    fn with_kind(
        name: &str,
        kind: JointType,
        origin: Vector3<f64>,
        axis: Unit<Vector3<f64>>,
    ) -> Self {
        Self {
            name: name.to_string(),
            kind,
            origin,
            axis,
            scale: 1.0,
            offset: 0.0,
            inertia: 0.0,
            damping: 0.0,
            stiffness: 0.0,
        }
    }
}
