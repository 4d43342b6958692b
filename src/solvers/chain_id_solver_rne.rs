//! Recursive Newton-Euler inverse dynamics for serial chains.

extern crate nalgebra as na;

use na::Vector3;
use tracing::{debug, warn};

use crate::{
    jnt_array::JntArray,
    model_elements::chain::Chain,
    spatial::{Frame, SpatialTransform, Twist, Wrench},
    Error,
};

use super::{check_sizes, ChainIdSolver, Solver};

#[cfg(test)]
#[path = "chain_id_solver_rne_tests.rs"]
mod chain_id_solver_rne_tests;

/// Computes the joint torques of a [Chain] with the recursive Newton-Euler algorithm.
///
/// The chain is passed in on every call. When segments are added to the chain the solver
/// has to be updated with [ChainIdSolver::update_internal_data_structures] before it can be
/// used again.
///
/// ## References
///
/// * Rigid Body Dynamics Algorithms
///   Roy Featherstone
///   Springer, 2008
pub struct ChainIdSolverRne {
    /// The pose of each segment relative to its parent.
    x: Vec<Frame>,

    /// The unit twist of each joint, expressed in the segment frame.
    s: Vec<Twist>,

    /// The velocity of each segment, expressed in the segment frame.
    v: Vec<Twist>,

    /// The acceleration of each segment, expressed in the segment frame.
    a: Vec<Twist>,

    /// The wrench transmitted by each joint, expressed in the segment frame.
    f: Vec<Wrench>,

    /// The acceleration of the base. Gravity is modelled as an upward acceleration of the base.
    ag: Twist,

    nj: usize,
    ns: usize,

    last_error: Option<Error>,
}

impl ChainIdSolverRne {
    /// Creates a new solver for the given chain.
    ///
    /// ## Parameters
    ///
    /// * 'chain' - The chain
    /// * 'gravity' - The gravity vector, expressed in the base frame of the chain
    pub fn new(chain: &Chain, gravity: Vector3<f64>) -> Self {
        let mut result = Self {
            x: Vec::new(),
            s: Vec::new(),
            v: Vec::new(),
            a: Vec::new(),
            f: Vec::new(),
            ag: Twist::new(-gravity, Vector3::zeros()),
            nj: 0,
            ns: 0,
            last_error: None,
        };

        result.update_internal_data_structures(chain);
        result
    }

    fn solve(
        &mut self,
        chain: &Chain,
        q: &JntArray,
        q_dot: &JntArray,
        q_dotdot: &JntArray,
        f_ext: &[Wrench],
        torques: &mut JntArray,
    ) -> Result<(), Error> {
        if self.nj != chain.number_of_joints() || self.ns != chain.number_of_segments() {
            warn!(
                expected_joints = self.nj,
                actual_joints = chain.number_of_joints(),
                expected_segments = self.ns,
                actual_segments = chain.number_of_segments(),
                "Chain changed since the solver was last updated"
            );
            return Err(Error::NotUpToDate {
                expected_joints: self.nj,
                actual_joints: chain.number_of_joints(),
                expected_segments: self.ns,
                actual_segments: chain.number_of_segments(),
            });
        }

        check_sizes(self.nj, q, q_dot, q_dotdot, torques)
            .and_then(|_| {
                if f_ext.len() != self.ns {
                    return Err(Error::SizeMismatch {
                        name: "f_ext",
                        expected: self.ns,
                        actual: f_ext.len(),
                    });
                }

                Ok(())
            })
            .map_err(|e| {
                debug!(error = %e, "Rejected joint arrays");
                e
            })?;

        // Sweep from the base to the tip
        let mut j = 0;
        for (i, segment) in chain.segments().iter().enumerate() {
            let (q_, qdot_, qdotdot_) = if segment.joint().is_fixed() {
                (0.0, 0.0, 0.0)
            } else {
                j += 1;
                (q[j - 1], q_dot[j - 1], q_dotdot[j - 1])
            };

            let x = segment.pose(q_);
            let s = x.orientation_inverse_twist(&segment.twist(q_, 1.0));
            let vj = x.orientation_inverse_twist(&segment.twist(q_, qdot_));

            let (v_parent, a_parent) = if i == 0 {
                (Twist::zero(), self.ag)
            } else {
                (self.v[i - 1], self.a[i - 1])
            };

            let v = x.inverse_transform_twist(&v_parent) + vj;
            let a = x.inverse_transform_twist(&a_parent) + s * qdotdot_ + v.cross(&vj);

            let inertia = *segment.inertia();
            self.f[i] = inertia * a + v.cross_wrench(&(inertia * v)) - f_ext[i];

            self.x[i] = x;
            self.s[i] = s;
            self.v[i] = v;
            self.a[i] = a;
        }

        // Sweep from the tip back to the base
        for (i, segment) in chain.segments().iter().enumerate().rev() {
            if !segment.joint().is_fixed() {
                j -= 1;
                torques[j] =
                    self.s[i].dot(&self.f[i]) + segment.joint().inertia() * q_dotdot[j];
            }

            if i > 0 {
                let transmitted = self.x[i].transform_wrench(&self.f[i]);
                self.f[i - 1] += transmitted;
            }
        }

        Ok(())
    }
}

impl Solver for ChainIdSolverRne {
    fn last_error(&self) -> Option<&Error> {
        self.last_error.as_ref()
    }
}

impl ChainIdSolver for ChainIdSolverRne {
    fn cart_to_jnt(
        &mut self,
        chain: &Chain,
        q: &JntArray,
        q_dot: &JntArray,
        q_dotdot: &JntArray,
        f_ext: &[Wrench],
        torques: &mut JntArray,
    ) -> Result<(), Error> {
        let result = self.solve(chain, q, q_dot, q_dotdot, f_ext, torques);
        self.last_error = result.as_ref().err().cloned();
        result
    }

    fn update_internal_data_structures(&mut self, chain: &Chain) {
        self.nj = chain.number_of_joints();
        self.ns = chain.number_of_segments();

        self.x = vec![Frame::identity(); self.ns];
        self.s = vec![Twist::zero(); self.ns];
        self.v = vec![Twist::zero(); self.ns];
        self.a = vec![Twist::zero(); self.ns];
        self.f = vec![Wrench::zero(); self.ns];

        debug!(
            joints = self.nj,
            segments = self.ns,
            "Allocated chain solver state"
        );
    }
}
