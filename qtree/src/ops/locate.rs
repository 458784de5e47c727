use crate::NodeRef;

impl<'t, C> NodeRef<'t, C> {
    /// the node `level` steps below this one whose region holds `(px, py)`
    ///
    /// Regions are half-open here (`x <= px < x + size`), unlike
    /// [`SpatialNode::contains`](crate::SpatialNode::contains).
    /// `None` when `level` is negative, the point is outside this node,
    /// or a leaf is reached before `level` runs out.
    pub fn locate(self, level: i32, px: i64, py: i64) -> Option<NodeRef<'t, C>> {
        if level < 0 {
            return None;
        }
        if level == 0 {
            return self.region().contains_half_open(px, py).then_some(self);
        }
        // children never overlap so at most one can hold the point
        self.children()?
            .into_iter()
            .filter(|child| child.region().contains_half_open(px, py))
            .find_map(|child| child.locate(level - 1, px, py))
    }
}
