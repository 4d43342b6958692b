//! Recursive Newton-Euler inverse dynamics for kinematic trees.

extern crate nalgebra as na;

use na::Vector3;
use tracing::{debug, warn};

use crate::{
    jnt_array::{JntArray, WrenchMap},
    model_elements::tree::Tree,
    spatial::{Frame, SpatialTransform, Twist, Wrench},
    Error,
};

use super::{check_sizes, Solver, TreeIdSolver};

#[cfg(test)]
#[path = "tree_id_solver_rne_tests.rs"]
mod tree_id_solver_rne_tests;

/// Computes the joint torques of a [Tree] with the recursive Newton-Euler algorithm.
///
/// The algorithm makes two passes over the tree. The first pass runs from the root to the
/// leaves and computes the velocity, the acceleration and the wrench needed to move each
/// segment. The second pass runs from the leaves back to the root, projects each wrench onto
/// the joint axis and adds it to the wrench of the parent segment.
///
/// Gravity is modelled as an acceleration of the root segment in the opposite direction.
///
/// The solver does not keep a reference to the tree. The tree is passed in on each call so that
/// it can be extended between calls. After adding segments the solver has to be updated with
/// [TreeIdSolver::update_internal_data_structures] before it can be used again. Calls on a tree
/// that changed fail with [Error::NotUpToDate].
///
/// All the state of the solver is scratch space that is overwritten on each call. Concurrent
/// use of one solver is prevented by the `&mut self` receiver. Separate solvers can share a tree.
///
/// ## References
///
/// * Rigid Body Dynamics Algorithms
///   Roy Featherstone
///   Springer, 2008
pub struct TreeIdSolverRne {
    // All vectors are indexed by the SegmentID of the segment.
    x: Vec<Frame>,
    s: Vec<Twist>,
    v: Vec<Twist>,
    a: Vec<Twist>,
    f: Vec<Wrench>,

    /// The acceleration of the root, i.e. the negated gravity.
    ag: Twist,

    /// The number of joints and segments of the tree at the last update.
    nj: usize,
    ns: usize,

    last_error: Option<Error>,
}

impl TreeIdSolverRne {
    /// Creates a new solver for the given tree.
    ///
    /// ## Parameters
    ///
    /// * 'tree' - The tree
    /// * 'gravity' - The gravity vector, expressed in the frame of the root segment
    pub fn new(tree: &Tree, gravity: Vector3<f64>) -> Self {
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

        result.update_internal_data_structures(tree);
        result
    }

    fn check_up_to_date(&self, tree: &Tree) -> Result<(), Error> {
        if self.nj == tree.number_of_joints() && self.ns == tree.number_of_segments() {
            return Ok(());
        }

        warn!(
            expected_joints = self.nj,
            actual_joints = tree.number_of_joints(),
            expected_segments = self.ns,
            actual_segments = tree.number_of_segments(),
            "Tree changed since the solver was last updated"
        );

        Err(Error::NotUpToDate {
            expected_joints: self.nj,
            actual_joints: tree.number_of_joints(),
            expected_segments: self.ns,
            actual_segments: tree.number_of_segments(),
        })
    }

    fn solve(
        &mut self,
        tree: &Tree,
        q: &JntArray,
        q_dot: &JntArray,
        q_dotdot: &JntArray,
        f_ext: &WrenchMap,
        torques: &mut JntArray,
    ) -> Result<(), Error> {
        self.check_up_to_date(tree)?;
        check_sizes(self.nj, q, q_dot, q_dotdot, torques).map_err(|e| {
            debug!(error = %e, "Rejected joint arrays");
            e
        })?;

        let elements = tree.elements();

        // Parents are stored before their children, so walking forward visits each parent
        // before any of its children.
        for (i, element) in elements.iter().enumerate() {
            let segment = element.segment();
            let (q_, qdot_, qdotdot_) = match element.q_nr() {
                Some(j) => (q[j], q_dot[j], q_dotdot[j]),
                None => (0.0, 0.0, 0.0),
            };

            let x = segment.pose(q_);
            let s = x.orientation_inverse_twist(&segment.twist(q_, 1.0));
            let vj = x.orientation_inverse_twist(&segment.twist(q_, qdot_));

            let (v, a) = match element.parent() {
                None => (
                    vj,
                    x.inverse_transform_twist(&self.ag) + s * qdotdot_ + vj.cross(&vj),
                ),
                Some(parent) => {
                    let v = x.inverse_transform_twist(&self.v[parent.index()]) + vj;
                    let a = x.inverse_transform_twist(&self.a[parent.index()])
                        + s * qdotdot_
                        + v.cross(&vj);
                    (v, a)
                }
            };

            let inertia = *segment.inertia();
            let mut f = inertia * a + v.cross_wrench(&(inertia * v));
            if let Some(external) = f_ext.get(segment.name()) {
                f -= *external;
            }

            self.x[i] = x;
            self.s[i] = s;
            self.v[i] = v;
            self.a[i] = a;
            self.f[i] = f;
        }

        // Walking backward visits all children before their parent, so a wrench is complete
        // by the time it is projected onto the joint.
        for (i, element) in elements.iter().enumerate().rev() {
            if let Some(j) = element.q_nr() {
                torques[j] = self.s[i].dot(&self.f[i])
                    + element.segment().joint().inertia() * q_dotdot[j];
            }

            if let Some(parent) = element.parent() {
                let transmitted = self.x[i].transform_wrench(&self.f[i]);
                self.f[parent.index()] += transmitted;
            }
        }

        Ok(())
    }
}

impl Solver for TreeIdSolverRne {
    fn last_error(&self) -> Option<&Error> {
        self.last_error.as_ref()
    }
}

impl TreeIdSolver for TreeIdSolverRne {
    fn cart_to_jnt(
        &mut self,
        tree: &Tree,
        q: &JntArray,
        q_dot: &JntArray,
        q_dotdot: &JntArray,
        f_ext: &WrenchMap,
        torques: &mut JntArray,
    ) -> Result<(), Error> {
        let result = self.solve(tree, q, q_dot, q_dotdot, f_ext, torques);
        self.last_error = result.as_ref().err().cloned();
        result
    }

    fn update_internal_data_structures(&mut self, tree: &Tree) {
        self.nj = tree.number_of_joints();
        self.ns = tree.number_of_segments();

        // One entry for every segment, including the root
        let count = tree.elements().len();
        self.x = vec![Frame::identity(); count];
        self.s = vec![Twist::zero(); count];
        self.v = vec![Twist::zero(); count];
        self.a = vec![Twist::zero(); count];
        self.f = vec![Wrench::zero(); count];

        debug!(
            joints = self.nj,
            segments = self.ns,
            "Allocated tree solver state"
        );
    }
}
