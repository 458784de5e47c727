use tracing::trace;

use crate::NodeRef;

impl<'t, C> NodeRef<'t, C> {
    /// every node `level` steps below this one, depth first in quadrant order
    ///
    /// Leaves above `level` stand in for the part of the tree they cover,
    /// and `level <= 0` returns just this node.
    pub fn collect_at_level(self, level: i32) -> Vec<NodeRef<'t, C>> {
        let mut nodes = Vec::new();
        self.collect_into(level, &mut nodes);
        trace!(level, len = nodes.len(), "collect_at_level");
        nodes
    }
    fn collect_into(self, level: i32, nodes: &mut Vec<NodeRef<'t, C>>) {
        match self.children() {
            Some(children) if level > 0 => {
                for child in children {
                    child.collect_into(level - 1, nodes);
                }
            }
            _ => nodes.push(self),
        }
    }
}
