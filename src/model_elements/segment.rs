//! Defines the rigid bodies, and their joints, that make up a kinematic model.

use crate::spatial::{Frame, RigidBodyInertia, Twist};

use super::joint::Joint;

#[cfg(test)]
#[path = "segment_tests.rs"]
mod segment_tests;

/// A rigid body that is connected to its parent through a single [Joint].
///
/// The segment frame sits at the tip of the segment. The joint frame coincides with the tip
/// frame of the parent segment.
#[derive(Clone, Debug, PartialEq)]
pub struct Segment {
    /// The name of the segment. Unique within a tree.
    name: String,

    joint: Joint,

    /// The pose of the tip frame relative to the joint frame after the joint displacement.
    f_tip: Frame,

    /// The inertia of the body, relative to the origin of the tip frame.
    inertia: RigidBodyInertia,
}

impl Segment {
    /// Returns the pose of the tip frame relative to the displaced joint frame.
    pub fn frame_to_tip(&self) -> &Frame {
        &self.f_tip
    }

    /// Returns the rigid body inertia of the segment, expressed in the tip frame.
    pub fn inertia(&self) -> &RigidBodyInertia {
        &self.inertia
    }

    /// Returns the joint that connects the segment to its parent.
    pub fn joint(&self) -> &Joint {
        &self.joint
    }

    /// Returns the name of the segment.
    pub fn name(&self) -> &str {
        self.name.as_ref()
    }

    /// Creates a new segment.
    ///
    /// ## Parameters
    ///
    /// * 'name' - The name of the segment
    /// * 'joint' - The joint that connects the segment to its parent
    /// * 'tip' - The pose of the tip frame relative to the joint frame when the joint is
    ///   at position zero
    /// * 'inertia' - The rigid body inertia of the segment, expressed in the tip frame
    pub fn new(name: &str, joint: Joint, tip: Frame, inertia: RigidBodyInertia) -> Self {
        let f_tip = joint.pose(0.0).inverse() * tip;
        Self {
            name: name.to_string(),
            joint,
            f_tip,
            inertia,
        }
    }

    /// Returns the pose of the tip frame relative to the joint frame for the given joint
    /// position.
    pub fn pose(&self, q: f64) -> Frame {
        self.joint.pose(q) * self.f_tip
    }

    /// Returns the twist of the tip frame relative to the joint frame for the given joint
    /// position and velocity.
    ///
    /// The twist has the origin of the tip frame as reference point, but is expressed in the
    /// orientation of the joint frame.
    pub fn twist(&self, q: f64, qdot: f64) -> Twist {
        let joint_pose = self.joint.pose(q);
        let tip_origin =
            joint_pose.translation.vector + joint_pose.rotation * self.f_tip.translation.vector;
        self.joint.twist(qdot).ref_point(&tip_origin)
    }
}
