use std::fmt::Debug;
use std::hash::Hash;
use std::ops::Deref;

use crate::{Quad, Quadrant, Quadtree, QuadtreeError, Region};

/// Index of a node inside the arena of the [`Quadtree`] that built it
///
/// # implementation details
/// tagged with the tree it came from so ids of one tree are rejected by every other
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct NodeId {
    tree: u32,
    index: u32,
}
impl NodeId {
    #[allow(clippy::cast_possible_truncation)] // a grid side of 2^15 has fewer than 2^31 nodes
    pub(crate) fn new(tree: u32, index: usize) -> Self {
        Self {
            tree,
            index: index as u32,
        }
    }
    pub(crate) fn tree(self) -> u32 {
        self.tree
    }
    pub(crate) fn index(self) -> usize {
        self.index as usize
    }
}

/// A square region of the grid summarized by a single color
///
/// Either has all four children or none, a partially populated node can't be represented.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct SpatialNode<C> {
    region: Region,
    color: C,
    children: Option<Quad<NodeId>>,
    parent: Option<NodeId>,
}
impl<C> SpatialNode<C> {
    pub(crate) fn new_leaf(region: Region, color: C) -> Self {
        Self {
            region,
            color,
            children: None,
            parent: None,
        }
    }
    pub(crate) fn new_inner(region: Region, color: C, children: Quad<NodeId>) -> Self {
        Self {
            region,
            color,
            children: Some(children),
            parent: None,
        }
    }

    pub fn x(&self) -> u32 {
        self.region.x
    }
    pub fn y(&self) -> u32 {
        self.region.y
    }
    pub fn size(&self) -> u32 {
        self.region.size
    }
    pub fn region(&self) -> Region {
        self.region
    }
    pub fn color(&self) -> &C {
        &self.color
    }
    pub fn parent_id(&self) -> Option<NodeId> {
        self.parent
    }
    pub fn child_ids(&self) -> Option<&Quad<NodeId>> {
        self.children.as_ref()
    }
    pub fn is_leaf(&self) -> bool {
        self.children.is_none()
    }
    /// inclusive on both ends, see [`Region::contains`]
    pub fn contains(&self, px: i64, py: i64) -> bool {
        self.region.contains(px, py)
    }
    pub fn child_id(&self, index: i64) -> Result<NodeId, QuadtreeError> {
        match (&self.children, Quadrant::from_index(index)) {
            (Some(children), Some(q)) => Ok(children[q]),
            _ => Err(QuadtreeError::InvalidIndex { index }),
        }
    }

    pub(crate) fn set_color(&mut self, color: C) {
        self.color = color;
    }
    /// only called by the builder when adopting this node
    pub(crate) fn set_parent(&mut self, parent: NodeId) {
        debug_assert!(self.parent.is_none(), "parent is set exactly once");
        self.parent = Some(parent);
    }
}

/// Borrowed handle to a node and the tree it lives in
///
/// Dereferences to the [`SpatialNode`] for coordinates and color.
pub struct NodeRef<'t, C> {
    tree: &'t Quadtree<C>,
    id: NodeId,
}
impl<'t, C> NodeRef<'t, C> {
    pub(crate) fn new(tree: &'t Quadtree<C>, id: NodeId) -> Self {
        Self { tree, id }
    }
    pub fn id(self) -> NodeId {
        self.id
    }
    pub fn node(self) -> &'t SpatialNode<C> {
        self.tree.node(self.id)
    }

    /// fails with [`QuadtreeError::InvalidIndex`] for indices outside `0..=3` or on a leaf
    pub fn child_at(self, index: i64) -> Result<Self, QuadtreeError> {
        self.node().child_id(index).map(|id| Self::new(self.tree, id))
    }
    pub fn child(self, q: Quadrant) -> Option<Self> {
        self.children().map(|children| children[q])
    }
    pub fn children(self) -> Option<Quad<Self>> {
        let tree = self.tree;
        self.node()
            .child_ids()
            .map(|ids| ids.map(|id| Self::new(tree, id)))
    }
    pub fn parent(self) -> Option<Self> {
        let tree = self.tree;
        self.node().parent_id().map(|id| Self::new(tree, id))
    }
    /// parent, grandparent, ... up to and including the root
    pub fn ancestors(self) -> impl Iterator<Item = Self> {
        std::iter::successors(self.parent(), |node| node.parent())
    }
    /// distance from the root, the root is at level 0
    pub fn level(self) -> usize {
        self.ancestors().count()
    }
    /// which child slot of its parent this node occupies, `None` for the root
    pub fn quadrant(self) -> Option<Quadrant> {
        let parent = self.parent()?;
        let siblings = parent.node().child_ids()?;
        siblings
            .iter_quadrants()
            .find_map(|(q, id)| (*id == self.id).then_some(q))
    }
}
impl<'t, C> Deref for NodeRef<'t, C> {
    type Target = SpatialNode<C>;
    fn deref(&self) -> &Self::Target {
        self.tree.node(self.id)
    }
}
impl<'t, C> Clone for NodeRef<'t, C> {
    fn clone(&self) -> Self {
        *self
    }
}
impl<'t, C> Copy for NodeRef<'t, C> {}
impl<'t, C> PartialEq for NodeRef<'t, C> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.tree, other.tree) && self.id == other.id
    }
}
impl<'t, C> Eq for NodeRef<'t, C> {}
impl<'t, C> Hash for NodeRef<'t, C> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        std::ptr::hash(self.tree, state);
        self.id.hash(state);
    }
}
impl<'t, C: Debug> Debug for NodeRef<'t, C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let Region { x, y, size } = self.region();
        write!(f, "NodeRef({x}, {y}, {size}, {:?})", self.color())
    }
}
