use crate::{
    jnt_array::{JntArray, WrenchMap},
    model_elements::{chain::Chain, tree::Tree},
    spatial::Wrench,
    Error,
};

/// Defines the recursive Newton-Euler inverse dynamics solver for chains.
pub mod chain_id_solver_rne;

/// Defines the recursive Newton-Euler inverse dynamics solver for trees.
pub mod tree_id_solver_rne;

#[cfg(test)]
#[path = "solvers_tests.rs"]
mod solvers_tests;

/// The status code for a solver call that completed without errors.
pub const E_NOERROR: i32 = 0;

/// The status code for a failure that is not one of the other solver failures.
pub const E_UNDEFINED: i32 = -2;

/// The status code for a solver call on a model that changed since the solver was last updated.
pub const E_NOT_UP_TO_DATE: i32 = -3;

/// The status code for a solver call with joint arrays of the wrong size.
pub const E_SIZE_MISMATCH: i32 = -4;

/// Returns a human readable description of a solver status code.
pub fn status_description(code: i32) -> &'static str {
    match code {
        E_NOERROR => "No error",
        E_UNDEFINED => "Undefined value",
        E_NOT_UP_TO_DATE => "Internal data structures not up to date with the model",
        E_SIZE_MISMATCH => "The size of the input does not match the internal state",
        _ => "Unknown error code",
    }
}

/// Defines the status reporting that is shared by all solvers.
pub trait Solver {
    /// Returns the error of the last solver call, or [None] if the last call succeeded.
    fn last_error(&self) -> Option<&Error>;

    /// Returns the status code of the last solver call.
    fn last_error_code(&self) -> i32 {
        self.last_error().map_or(E_NOERROR, Error::code)
    }
}

/// Computes the joint torques that produce a given motion of a [Chain].
pub trait ChainIdSolver: Solver {
    /// Computes the joint torques for the given joint positions, velocities and accelerations.
    ///
    /// ## Parameters
    ///
    /// * 'chain' - The chain the solver was created for
    /// * 'q' - The joint positions
    /// * 'q_dot' - The joint velocities
    /// * 'q_dotdot' - The joint accelerations
    /// * 'f_ext' - The external wrench on each segment, expressed in the segment frame
    /// * 'torques' - Receives the joint torques
    ///
    /// ## Errors
    ///
    /// * [Error::NotUpToDate] - Returned when the chain changed since the solver was last updated.
    /// * [Error::SizeMismatch] - Returned when one of the arrays does not have the expected size.
    fn cart_to_jnt(
        &mut self,
        chain: &Chain,
        q: &JntArray,
        q_dot: &JntArray,
        q_dotdot: &JntArray,
        f_ext: &[Wrench],
        torques: &mut JntArray,
    ) -> Result<(), Error>;

    /// Resizes the internal state of the solver to match the given chain.
    fn update_internal_data_structures(&mut self, chain: &Chain);
}

/// Computes the joint torques that produce a given motion of a [Tree].
pub trait TreeIdSolver: Solver {
    /// Computes the joint torques for the given joint positions, velocities and accelerations.
    ///
    /// ## Parameters
    ///
    /// * 'tree' - The tree the solver was created for
    /// * 'q' - The joint positions
    /// * 'q_dot' - The joint velocities
    /// * 'q_dotdot' - The joint accelerations
    /// * 'f_ext' - The external wrenches, keyed by segment name and expressed in the segment frame
    /// * 'torques' - Receives the joint torques
    ///
    /// ## Errors
    ///
    /// * [Error::NotUpToDate] - Returned when the tree changed since the solver was last updated.
    /// * [Error::SizeMismatch] - Returned when one of the arrays does not have the expected size.
    fn cart_to_jnt(
        &mut self,
        tree: &Tree,
        q: &JntArray,
        q_dot: &JntArray,
        q_dotdot: &JntArray,
        f_ext: &WrenchMap,
        torques: &mut JntArray,
    ) -> Result<(), Error>;

    /// Resizes the internal state of the solver to match the given tree.
    fn update_internal_data_structures(&mut self, tree: &Tree);
}

/// Checks that all joint arrays have the expected size.
pub(crate) fn check_sizes(
    expected: usize,
    q: &JntArray,
    q_dot: &JntArray,
    q_dotdot: &JntArray,
    torques: &JntArray,
) -> Result<(), Error> {
    for (name, array) in [
        ("q", q),
        ("q_dot", q_dot),
        ("q_dotdot", q_dotdot),
        ("torques", torques),
    ] {
        if array.len() != expected {
            return Err(Error::SizeMismatch {
                name,
                expected,
                actual: array.len(),
            });
        }
    }

    Ok(())
}
