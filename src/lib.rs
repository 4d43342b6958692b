#![warn(missing_docs)]

//! Inverse dynamics for branching (tree shaped) rigid multibody mechanisms.
//!
//! Provides a kinematic model made up of segments and joints, the spatial algebra needed
//! to move velocities and forces between the segment frames, and recursive Newton-Euler
//! solvers that compute the joint torques required to produce a prescribed motion.

use thiserror::Error;

/// Defines the spatial algebra types, i.e. twists, wrenches and rigid body inertias.
pub mod spatial;

/// Defines the joint space arrays used to pass joint positions, velocities, accelerations
/// and torques to the solvers.
pub mod jnt_array;

/// Defines the elements that are used to describe a kinematic model.
pub mod model_elements;

/// Defines the inverse dynamics solvers.
pub mod solvers;

/// Defines the different errors for the tree dynamics crate.
#[derive(Clone, Debug, Error, PartialEq)]
#[non_exhaustive]
pub enum Error {
    /// Indicates that a segment with the given name is already part of the tree.
    #[error("A segment with name {name} already exists.")]
    SegmentAlreadyExists {
        /// The name of the segment
        name: String,
    },

    /// Indicates that the segment with the given name could not be found.
    #[error("Unable to find a segment with name {name}.")]
    MissingSegment {
        /// The name of the segment
        name: String,
    },

    /// Indicates that the given segment ID does not point to a segment in the tree.
    #[error("The segment ID {id} is not valid.")]
    InvalidSegmentID {
        /// The invalid ID
        id: model_elements::tree::SegmentID,
    },

    /// Indicates that the given index is outside the range of segments in a chain.
    #[error("The segment index {index} is out of range. The chain has {count} segments.")]
    InvalidSegmentIndex {
        /// The requested index
        index: usize,
        /// The number of segments in the chain
        count: usize,
    },

    /// Indicates that a joint was given an axis that can not be normalized.
    #[error("The axis for joint {name} has no direction.")]
    InvalidJointAxis {
        /// The name of the joint
        name: String,
    },

    /// Indicates that a chain was requested between two segments where the first segment
    /// is not an ancestor of the second one.
    #[error("Segment {root} is not an ancestor of segment {tip}.")]
    NotAnAncestor {
        /// The name of the requested chain root
        root: String,
        /// The name of the requested chain tip
        tip: String,
    },

    /// Indicates that one of the arrays passed to a solver does not have the expected size.
    #[error("The size of {name} is {actual} but {expected} was expected.")]
    SizeMismatch {
        /// The name of the argument that has the wrong size
        name: &'static str,
        /// The expected size
        expected: usize,
        /// The actual size
        actual: usize,
    },

    /// Indicates that the model was changed after the solver was created or last updated.
    #[error("The solver is not up to date with the model. Solver has {expected_joints} joints and {expected_segments} segments, model has {actual_joints} joints and {actual_segments} segments.")]
    NotUpToDate {
        /// The number of joints the solver was prepared for
        expected_joints: usize,
        /// The number of joints in the model
        actual_joints: usize,
        /// The number of segments the solver was prepared for
        expected_segments: usize,
        /// The number of segments in the model
        actual_segments: usize,
    },
}

impl Error {
    /// Returns the solver status code that matches the error.
    ///
    /// Errors that are not raised by a solver map to [solvers::E_UNDEFINED].
    pub fn code(&self) -> i32 {
        match self {
            Error::SizeMismatch { .. } => solvers::E_SIZE_MISMATCH,
            Error::NotUpToDate { .. } => solvers::E_NOT_UP_TO_DATE,
            _ => solvers::E_UNDEFINED,
        }
    }
}
