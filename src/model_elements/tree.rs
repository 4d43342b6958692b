//! Defines a branching kinematic model made up of segments.

use std::{collections::HashMap, fmt::Display};

use tracing::debug;

use crate::{
    spatial::{Frame, RigidBodyInertia},
    Error,
};

use super::{chain::Chain, joint::Joint, segment::Segment};

#[cfg(test)]
#[path = "tree_tests.rs"]
mod tree_tests;

/// Defines the ID of a segment in a [Tree].
///
/// IDs are handed out in the order in which the segments are added to the tree, starting with
/// the root segment. A parent segment therefore always has a smaller ID than its children.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct SegmentID {
    index: usize,
}

impl SegmentID {
    /// Returns the position of the segment in the storage of the tree.
    pub fn index(&self) -> usize {
        self.index
    }

    fn new(index: usize) -> Self {
        Self { index }
    }
}

impl Display for SegmentID {
    #[cfg_attr(test, mutants::skip)] // Formatting only
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SegmentID [{}]", self.index)
    }
}

/// Stores a [Segment] together with its place in a [Tree].
#[derive(Clone, Debug, PartialEq)]
pub struct TreeElement {
    segment: Segment,

    /// The degree-of-freedom index of the joint of the segment. Fixed joints have no index.
    q_nr: Option<usize>,

    parent: Option<SegmentID>,
    children: Vec<SegmentID>,
}

impl TreeElement {
    /// Returns the IDs of the direct children of the segment, in the order in which they
    /// were added.
    pub fn children(&self) -> &[SegmentID] {
        &self.children
    }

    /// Returns the ID of the parent segment, or [None] for the root segment.
    pub fn parent(&self) -> Option<SegmentID> {
        self.parent
    }

    /// Returns the degree-of-freedom index of the joint, or [None] when the joint is fixed.
    pub fn q_nr(&self) -> Option<usize> {
        self.q_nr
    }

    /// Returns the segment.
    pub fn segment(&self) -> &Segment {
        &self.segment
    }
}

/// A rooted tree of [Segment] instances.
///
/// The tree starts with a root segment that has a fixed joint, no length and no mass. All other
/// segments are hooked onto a segment that is already part of the tree. Segment names are
/// unique. Segments can be added but never removed.
///
/// Each segment with a moving joint gets a degree-of-freedom index. The indices are handed out
/// densely, starting at zero, in the order in which the moving joints are added.
///
/// ## References
///
/// * Rigid Body Dynamics Algorithms
///   Roy Featherstone
///   Springer, 2008
#[derive(Clone, Debug, PartialEq)]
pub struct Tree {
    /// The elements, ordered by [SegmentID]. Parents are always stored before their children.
    elements: Vec<TreeElement>,

    /// The mapping from segment name to the ID of the segment.
    ids_by_name: HashMap<String, SegmentID>,

    nr_of_joints: usize,
}

impl Tree {
    /// Adds all the segments of the given chain to the tree.
    ///
    /// The first segment of the chain is hooked onto the segment with name 'hook_name', every
    /// following segment is hooked onto the segment before it.
    ///
    /// ## Errors
    ///
    /// * [Error::MissingSegment] - Returned when there is no segment with name 'hook_name'.
    /// * [Error::SegmentAlreadyExists] - Returned when one of the segments in the chain has the
    ///   same name as a segment in the tree, or as another segment in the chain.
    ///
    /// The tree is not changed when an error is returned.
    pub fn add_chain(&mut self, chain: &Chain, hook_name: &str) -> Result<(), Error> {
        self.check_hook(hook_name)?;
        self.check_new_names(chain.segments().iter().map(|s| s.name()))?;

        let mut hook = hook_name.to_string();
        for segment in chain.segments() {
            self.add_segment(segment.clone(), &hook)?;
            hook = segment.name().to_string();
        }

        Ok(())
    }

    /// Adds a new segment to the tree.
    ///
    /// ## Parameters
    ///
    /// * 'segment' - The segment that should be added
    /// * 'hook_name' - The name of the segment to which the new segment is attached
    ///
    /// ## Errors
    ///
    /// * [Error::SegmentAlreadyExists] - Returned when the tree already has a segment with the
    ///   same name as 'segment'.
    /// * [Error::MissingSegment] - Returned when there is no segment with name 'hook_name'.
    pub fn add_segment(&mut self, segment: Segment, hook_name: &str) -> Result<SegmentID, Error> {
        if self.ids_by_name.contains_key(segment.name()) {
            debug!(
                segment = segment.name(),
                "Rejected segment. A segment with the same name already exists."
            );
            return Err(Error::SegmentAlreadyExists {
                name: segment.name().to_string(),
            });
        }

        let parent_id = self.check_hook(hook_name)?;

        let q_nr = if segment.joint().is_fixed() {
            None
        } else {
            self.nr_of_joints += 1;
            Some(self.nr_of_joints - 1)
        };

        let id = SegmentID::new(self.elements.len());
        self.ids_by_name.insert(segment.name().to_string(), id);
        self.elements.push(TreeElement {
            segment,
            q_nr,
            parent: Some(parent_id),
            children: Vec::new(),
        });
        self.elements[parent_id.index].children.push(id);

        Ok(id)
    }

    /// Adds all the segments of the given tree, except its root, to the current tree.
    ///
    /// The children of the root of 'tree' are hooked onto the segment with name 'hook_name'.
    /// All other segments keep their parent.
    ///
    /// ## Errors
    ///
    /// * [Error::MissingSegment] - Returned when there is no segment with name 'hook_name'.
    /// * [Error::SegmentAlreadyExists] - Returned when one of the segments in 'tree' has the
    ///   same name as a segment in the current tree.
    ///
    /// The tree is not changed when an error is returned.
    pub fn add_tree(&mut self, tree: &Tree, hook_name: &str) -> Result<(), Error> {
        self.check_hook(hook_name)?;
        self.check_new_names(tree.elements().iter().skip(1).map(|e| e.segment.name()))?;

        let root_name = tree.get_root_segment().segment.name();
        for element in tree.elements().iter().skip(1) {
            let hook = match element.parent {
                Some(id) if id.index != 0 => tree.elements[id.index].segment.name(),
                _ => hook_name,
            };

            self.add_segment(element.segment.clone(), hook)?;
        }

        debug!(
            root = root_name,
            hook = hook_name,
            segments = tree.number_of_segments(),
            "Added tree"
        );

        Ok(())
    }

    /// Returns the elements of the tree, ordered by [SegmentID].
    ///
    /// Parents are always stored before their children. Iterating forward visits each
    /// segment after its parent, iterating backward visits each segment before its parent.
    pub fn elements(&self) -> &[TreeElement] {
        &self.elements
    }

    /// Returns the chain of segments that runs from the segment with name 'root_name' to
    /// the segment with name 'tip_name'.
    ///
    /// The chain starts with the child of 'root_name' and ends with 'tip_name'. When both names
    /// are the same an empty chain is returned.
    ///
    /// ## Errors
    ///
    /// * [Error::MissingSegment] - Returned when either of the segments is not in the tree.
    /// * [Error::NotAnAncestor] - Returned when 'root_name' is not an ancestor of 'tip_name'.
    pub fn get_chain(&self, root_name: &str, tip_name: &str) -> Result<Chain, Error> {
        let root_id = self.get_id(root_name)?;
        let tip_id = self.get_id(tip_name)?;

        let mut segments: Vec<&Segment> = Vec::new();
        let mut current = tip_id;
        while current != root_id {
            let element = &self.elements[current.index];
            segments.push(&element.segment);

            current = match element.parent {
                Some(p) => p,
                None => {
                    return Err(Error::NotAnAncestor {
                        root: root_name.to_string(),
                        tip: tip_name.to_string(),
                    })
                }
            };
        }

        let mut chain = Chain::new();
        for segment in segments.into_iter().rev() {
            chain.add_segment(segment.clone());
        }

        Ok(chain)
    }

    /// Returns an iterator over the direct children of the given segment.
    ///
    /// ## Errors
    ///
    /// * [Error::InvalidSegmentID] - Returned when there is no segment with ID 'id'
    pub fn get_children(
        &self,
        id: SegmentID,
    ) -> Result<impl Iterator<Item = &TreeElement>, Error> {
        let element = self.get_element(id)?;
        Ok(element
            .children
            .iter()
            .map(move |child| &self.elements[child.index]))
    }

    /// Returns the element with the given ID.
    ///
    /// ## Errors
    ///
    /// * [Error::InvalidSegmentID] - Returned when there is no segment with ID 'id'
    pub fn get_element(&self, id: SegmentID) -> Result<&TreeElement, Error> {
        self.elements
            .get(id.index)
            .ok_or(Error::InvalidSegmentID { id })
    }

    /// Returns the ID of the segment with the given name.
    ///
    /// ## Errors
    ///
    /// * [Error::MissingSegment] - Returned when there is no segment with the given name.
    pub fn get_id(&self, name: &str) -> Result<SegmentID, Error> {
        self.ids_by_name
            .get(name)
            .copied()
            .ok_or_else(|| Error::MissingSegment {
                name: name.to_string(),
            })
    }

    /// Returns the parent of the given segment.
    ///
    /// ## Errors
    ///
    /// * [Error::InvalidSegmentID] - Returned when there is no segment with ID 'id'
    /// * [Error::MissingSegment] - Returned when the segment is the root, which has no parent.
    ///   The error carries the name of the root segment.
    pub fn get_parent(&self, id: SegmentID) -> Result<&TreeElement, Error> {
        let element = self.get_element(id)?;
        match element.parent {
            Some(p) => Ok(&self.elements[p.index]),
            None => Err(Error::MissingSegment {
                name: element.segment.name().to_string(),
            }),
        }
    }

    /// Returns the root element of the tree.
    pub fn get_root_segment(&self) -> &TreeElement {
        &self.elements[0]
    }

    /// Returns the element for the segment with the given name.
    ///
    /// ## Errors
    ///
    /// * [Error::MissingSegment] - Returned when there is no segment with the given name.
    pub fn get_segment(&self, name: &str) -> Result<&TreeElement, Error> {
        let id = self.get_id(name)?;
        Ok(&self.elements[id.index])
    }

    /// Creates a new [Tree] that only contains a root segment with the given name.
    ///
    /// The root segment has a fixed joint, an identity tip frame and no mass.
    pub fn new(root_name: &str) -> Self {
        let root = Segment::new(
            root_name,
            Joint::fixed(root_name),
            Frame::identity(),
            RigidBodyInertia::zero(),
        );

        let mut ids_by_name = HashMap::new();
        ids_by_name.insert(root_name.to_string(), SegmentID::new(0));

        Self {
            elements: vec![TreeElement {
                segment: root,
                q_nr: None,
                parent: None,
                children: Vec::new(),
            }],
            ids_by_name,
            nr_of_joints: 0,
        }
    }

    /// Returns the number of joints with a degree-of-freedom.
    pub fn number_of_joints(&self) -> usize {
        self.nr_of_joints
    }

    /// Returns the number of segments, not counting the root segment.
    pub fn number_of_segments(&self) -> usize {
        self.elements.len() - 1
    }

    fn check_hook(&self, hook_name: &str) -> Result<SegmentID, Error> {
        self.get_id(hook_name).map_err(|e| {
            debug!(hook = hook_name, "Rejected segment. The hook segment does not exist.");
            e
        })
    }

    fn check_new_names<'a, I>(&self, names: I) -> Result<(), Error>
    where
        I: Iterator<Item = &'a str>,
    {
        let mut seen: Vec<&str> = Vec::new();
        for name in names {
            if self.ids_by_name.contains_key(name) || seen.contains(&name) {
                debug!(
                    segment = name,
                    "Rejected segments. A segment with the same name already exists."
                );
                return Err(Error::SegmentAlreadyExists {
                    name: name.to_string(),
                });
            }

            seen.push(name);
        }

        Ok(())
    }
}
