//! Defines a serial chain of segments.

use crate::Error;

use super::segment::Segment;

#[cfg(test)]
#[path = "chain_tests.rs"]
mod chain_tests;

/// An ordered, non-branching list of [Segment] instances. Each segment is attached to the tip of
/// the previous one, the first segment is attached to the base of the chain.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Chain {
    segments: Vec<Segment>,

    /// The number of segments with a joint that has a degree-of-freedom.
    nr_of_joints: usize,
}

impl Chain {
    /// Appends all the segments of the given chain to the end of the current chain.
    pub fn add_chain(&mut self, chain: &Chain) {
        for segment in chain.segments() {
            self.add_segment(segment.clone());
        }
    }

    /// Appends a segment to the end of the chain.
    pub fn add_segment(&mut self, segment: Segment) {
        if !segment.joint().is_fixed() {
            self.nr_of_joints += 1;
        }

        self.segments.push(segment);
    }

    /// Returns the segment at the given position in the chain.
    ///
    /// ## Parameters
    ///
    /// * 'index' - The position of the segment, starting at the base of the chain
    ///
    /// ## Errors
    ///
    /// * [Error::InvalidSegmentIndex] - Returned when 'index' is past the end of the chain.
    pub fn get_segment(&self, index: usize) -> Result<&Segment, Error> {
        self.segments.get(index).ok_or(Error::InvalidSegmentIndex {
            index,
            count: self.segments.len(),
        })
    }

    /// Creates a new empty [Chain].
    pub fn new() -> Self {
        Self {
            segments: Vec::new(),
            nr_of_joints: 0,
        }
    }

    /// Returns the number of joints with a degree-of-freedom.
    pub fn number_of_joints(&self) -> usize {
        self.nr_of_joints
    }

    /// Returns the number of segments.
    pub fn number_of_segments(&self) -> usize {
        self.segments.len()
    }

    /// Returns the segments, starting at the base of the chain.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }
}
