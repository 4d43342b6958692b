extern crate nalgebra as na;

use std::{
    collections::HashMap,
    ops::{Index, IndexMut},
};

use float_cmp::{ApproxEq, F64Margin};
use na::DVector;

use crate::spatial::Wrench;

#[cfg(test)]
#[path = "jnt_array_tests.rs"]
mod jnt_array_tests;

/// The collection of external wrenches that act on the segments of a tree, keyed by segment name.
///
/// Each wrench is expressed in the frame of the segment it acts on. Segments that are not in the
/// map have no external wrench acting on them.
pub type WrenchMap = HashMap<String, Wrench>;

/// Stores one value for each joint degree-of-freedom of a kinematic model.
///
/// The values are indexed by the degree-of-freedom index of the joint. Depending on the context
/// the values are joint positions, velocities, accelerations or torques. A [JntArray] never
/// changes size unless [JntArray::resize] is called.
#[derive(Clone, Debug, PartialEq)]
pub struct JntArray {
    data: DVector<f64>,
}

impl JntArray {
    /// Returns the values as a slice.
    pub fn as_slice(&self) -> &[f64] {
        self.data.as_slice()
    }

    /// Creates a new [JntArray] from the given values.
    pub fn from_vec(values: Vec<f64>) -> Self {
        Self {
            data: DVector::from_vec(values),
        }
    }

    /// Returns a value indicating whether the array has no values.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns an iterator over the values.
    pub fn iter(&self) -> impl Iterator<Item = &f64> {
        self.data.iter()
    }

    /// Returns the number of values.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Creates a new [JntArray] with the given number of values, all set to zero.
    pub fn new(size: usize) -> Self {
        Self {
            data: DVector::zeros(size),
        }
    }

    /// Changes the number of values. All values are reset to zero.
    pub fn resize(&mut self, size: usize) {
        self.data = DVector::zeros(size);
    }

    /// Sets all values to zero.
    pub fn set_to_zero(&mut self) {
        self.data.fill(0.0);
    }
}

impl Index<usize> for JntArray {
    type Output = f64;

    #[inline]
    fn index(&self, index: usize) -> &f64 {
        &self.data[index]
    }
}

impl IndexMut<usize> for JntArray {
    #[inline]
    fn index_mut(&mut self, index: usize) -> &mut f64 {
        &mut self.data[index]
    }
}

impl ApproxEq for &JntArray {
    type Margin = F64Margin;

    fn approx_eq<M: Into<Self::Margin>>(self, other: Self, margin: M) -> bool {
        let margin = margin.into();
        self.len() == other.len()
            && self
                .iter()
                .zip(other.iter())
                .all(|(l, r)| (*l).approx_eq(*r, margin))
    }
}
