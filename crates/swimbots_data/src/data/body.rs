use super::entity::Vec2;
use rkyv::{Archive, Deserialize as RkyvDeserialize, Serialize as RkyvSerialize};
use serde::{Deserialize, Serialize};

/// One rigid body part.
///
/// Children are stored as indices into the owning [`Body`] arena, so a segment
/// never points at memory it does not own.
#[derive(
    Debug, Clone, PartialEq, Default, Serialize, Deserialize, Archive, RkyvSerialize, RkyvDeserialize,
)]
#[archive(check_bytes)]
pub struct Segment {
    /// Center of the segment.
    pub position: Vec2,
    /// Absolute heading, in radians.
    pub angle: f64,
    /// Slot in the owning swimbot's segment genes.
    pub gene_index: usize,
    /// Arena indices of attached segments, in attachment order.
    pub children: Vec<usize>,
}

impl Segment {
    #[must_use]
    pub fn new(position: Vec2, angle: f64, gene_index: usize) -> Self {
        Self {
            position,
            angle,
            gene_index,
            children: Vec::new(),
        }
    }

    #[must_use]
    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }
}

/// Segment tree of a swimbot stored as a flat arena.
///
/// `segments[0]` is the root ("main segment"). Parents are always pushed
/// before their children, so arena order is a valid top-down order.
#[derive(
    Debug, Clone, PartialEq, Default, Serialize, Deserialize, Archive, RkyvSerialize, RkyvDeserialize,
)]
#[archive(check_bytes)]
pub struct Body {
    pub segments: Vec<Segment>,
}

impl Body {
    /// Creates a body holding only its root segment.
    #[must_use]
    pub fn with_root(root: Segment) -> Self {
        Self {
            segments: vec![root],
        }
    }

    #[must_use]
    pub fn root(&self) -> Option<&Segment> {
        self.segments.first()
    }

    pub fn root_mut(&mut self) -> Option<&mut Segment> {
        self.segments.first_mut()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Segment> {
        self.segments.get(index)
    }

    /// Arena indices of the children of `index`; empty for unknown indices.
    #[must_use]
    pub fn children_of(&self, index: usize) -> &[usize] {
        self.segments
            .get(index)
            .map(|s| s.children.as_slice())
            .unwrap_or(&[])
    }

    /// Appends `segment` as the last child of `parent` and returns its arena index.
    ///
    /// # Panics
    /// Panics if `parent` is not a segment of this body.
    pub fn attach(&mut self, parent: usize, segment: Segment) -> usize {
        let index = self.segments.len();
        self.segments.push(segment);
        self.segments[parent].children.push(index);
        index
    }

    /// Depth-first pre-order traversal from the root, children in attachment order.
    #[must_use]
    pub fn preorder(&self) -> Vec<usize> {
        let mut order = Vec::with_capacity(self.segments.len());
        if self.segments.is_empty() {
            return order;
        }
        let mut stack = vec![0usize];
        while let Some(index) = stack.pop() {
            order.push(index);
            for &child in self.children_of(index).iter().rev() {
                stack.push(child);
            }
        }
        order
    }

    /// Gene indices of every segment, in arena order.
    #[must_use]
    pub fn gene_indices(&self) -> Vec<usize> {
        self.segments.iter().map(|s| s.gene_index).collect()
    }
}
