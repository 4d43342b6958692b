/// Defines the joints that connect segments.
pub mod joint;

/// Defines the rigid bodies that make up a kinematic model.
pub mod segment;

/// Defines a serial chain of segments.
pub mod chain;

/// Defines the branching kinematic tree.
pub mod tree;
