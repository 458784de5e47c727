use std::sync::atomic::{AtomicU32, Ordering};

use tracing::{debug_span, trace};

use crate::{Grid, GridError, NodeId, NodeRef, QuadtreeError, Region, SpatialNode};

/// Quadtree over a square grid, built once and then queried read-only
///
/// # implementation details
/// nodes live in a single arena, children are built before their parent
/// so the root is always the last node
pub struct Quadtree<C> {
    id: u32,
    nodes: Vec<SpatialNode<C>>,
    root: NodeId,
}

/// source of the tag every [`NodeId`] carries
static NEXT_TREE_ID: AtomicU32 = AtomicU32::new(0);

impl<C> Quadtree<C> {
    /// builds a tree covering the whole grid
    ///
    /// `average` is called exactly once per node with the region that node covers.
    pub fn build<G, F>(grid: &Grid<G>, average: F) -> Self
    where
        F: FnMut(&Grid<G>, Region) -> C,
    {
        Self::build_checked(grid, grid.region(), average)
    }
    /// builds a tree covering only `region` of the grid
    ///
    /// `region` must be a power-of-two square inside the grid.
    pub fn build_region<G, F>(
        grid: &Grid<G>,
        region: Region,
        average: F,
    ) -> Result<Self, QuadtreeError>
    where
        F: FnMut(&Grid<G>, Region) -> C,
    {
        if !region.size.is_power_of_two() || !grid.region().covers(&region) {
            return Err(GridError::RegionOutOfBounds {
                region,
                side: grid.side(),
            }
            .into());
        }
        Ok(Self::build_checked(grid, region, average))
    }
    fn build_checked<G, F>(grid: &Grid<G>, region: Region, mut average: F) -> Self
    where
        F: FnMut(&Grid<G>, Region) -> C,
    {
        let _span = debug_span!("build", x = region.x, y = region.y, size = region.size).entered();

        let depth = region.size.trailing_zeros();
        let id = NEXT_TREE_ID.fetch_add(1, Ordering::Relaxed);
        let mut tree = Self {
            id,
            nodes: Vec::with_capacity(node_count(depth)),
            root: NodeId::new(id, 0),
        };
        tree.root = tree.build_node(grid, region, &mut average);

        trace!(tree = id, nodes = tree.nodes.len(), depth, "built");
        tree
    }
    fn build_node<G, F>(&mut self, grid: &Grid<G>, region: Region, average: &mut F) -> NodeId
    where
        F: FnMut(&Grid<G>, Region) -> C,
    {
        let color = average(grid, region);
        if region.is_unit() {
            return self.push(SpatialNode::new_leaf(region, color));
        }
        let children = region
            .split()
            .map(|quadrant| self.build_node(grid, quadrant, average));
        let id = self.push(SpatialNode::new_inner(region, color, children));
        for child in children {
            self.nodes[child.index()].set_parent(id);
        }
        id
    }
    fn push(&mut self, node: SpatialNode<C>) -> NodeId {
        let id = NodeId::new(self.id, self.nodes.len());
        self.nodes.push(node);
        id
    }

    pub(crate) fn node(&self, id: NodeId) -> &SpatialNode<C> {
        &self.nodes[id.index()]
    }
    pub fn root(&self) -> NodeRef<'_, C> {
        NodeRef::new(self, self.root)
    }
    /// `None` if `id` was not handed out by this tree
    pub fn get(&self, id: NodeId) -> Option<NodeRef<'_, C>> {
        self.owns(id).then(|| NodeRef::new(self, id))
    }
    fn owns(&self, id: NodeId) -> bool {
        id.tree() == self.id && id.index() < self.nodes.len()
    }
    /// every node, children before their parents
    pub fn nodes(&self) -> impl Iterator<Item = NodeRef<'_, C>> {
        (0..self.nodes.len()).map(|index| NodeRef::new(self, NodeId::new(self.id, index)))
    }
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }
    pub fn region(&self) -> Region {
        self.root().region()
    }
    pub fn side(&self) -> u32 {
        self.region().size
    }
    /// number of levels below the root, `log2(side)`
    #[allow(clippy::cast_possible_truncation)] // side <= 2^15
    pub fn depth(&self) -> u8 {
        self.side().trailing_zeros() as u8
    }

    /// replaces the color of a node, the shape of the tree never changes after `build`
    pub fn recolor(&mut self, id: NodeId, color: C) -> Result<(), QuadtreeError> {
        if !self.owns(id) {
            return Err(QuadtreeError::InvalidNode { id });
        }
        self.nodes[id.index()].set_color(color);
        Ok(())
    }

    /// every unit cell in quadrant order
    pub fn leaves(&self) -> Vec<NodeRef<'_, C>> {
        self.root().collect_at_level(i32::from(self.depth()))
    }
    /// see [`NodeRef::collect_at_level`]
    pub fn collect_at_level(&self, level: i32) -> Vec<NodeRef<'_, C>> {
        self.root().collect_at_level(level)
    }
    /// see [`NodeRef::find_matching`]
    pub fn find_matching(
        &self,
        target: &C,
        level: i32,
        similar: impl Fn(&C, &C) -> bool,
    ) -> crate::Matches<'_, C> {
        self.root().find_matching(target, level, similar)
    }
    /// see [`NodeRef::locate`]
    pub fn locate(&self, level: i32, px: i64, py: i64) -> Option<NodeRef<'_, C>> {
        self.root().locate(level, px, py)
    }
}

/// nodes in a complete quadtree of the given depth, `(4^(depth+1) - 1) / 3`
fn node_count(depth: u32) -> usize {
    ((1_usize << (2 * (depth + 1))) - 1) / 3
}
