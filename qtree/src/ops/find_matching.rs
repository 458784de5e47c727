use std::fmt::Debug;

use tracing::trace;

use crate::NodeRef;

/// Nodes whose color matched a search, in depth first quadrant order
pub struct Matches<'t, C> {
    nodes: Vec<NodeRef<'t, C>>,
}
impl<'t, C> Matches<'t, C> {
    pub fn nodes(&self) -> &[NodeRef<'t, C>] {
        &self.nodes
    }
    pub fn into_nodes(self) -> Vec<NodeRef<'t, C>> {
        self.nodes
    }
    /// always the length of [`Matches::nodes`]
    pub fn count(&self) -> usize {
        self.nodes.len()
    }
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
impl<'t, C> Default for Matches<'t, C> {
    fn default() -> Self {
        Self { nodes: Vec::new() }
    }
}
impl<'t, C> IntoIterator for Matches<'t, C> {
    type Item = NodeRef<'t, C>;
    type IntoIter = std::vec::IntoIter<NodeRef<'t, C>>;
    fn into_iter(self) -> Self::IntoIter {
        self.nodes.into_iter()
    }
}
impl<'t, C: Debug> Debug for Matches<'t, C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Matches")
            .field("count", &self.count())
            .field("nodes", &self.nodes)
            .finish()
    }
}

impl<'t, C> NodeRef<'t, C> {
    /// nodes `level` steps below this one whose color is `similar` to `target`
    ///
    /// Same traversal as [`NodeRef::collect_at_level`], but only nodes passing
    /// `similar(node_color, target)` are kept.
    pub fn find_matching(
        self,
        target: &C,
        level: i32,
        similar: impl Fn(&C, &C) -> bool,
    ) -> Matches<'t, C> {
        let mut matches = Matches::default();
        self.match_into(target, level, &similar, &mut matches.nodes);
        trace!(level, count = matches.count(), "find_matching");
        matches
    }
    fn match_into(
        self,
        target: &C,
        level: i32,
        similar: &impl Fn(&C, &C) -> bool,
        nodes: &mut Vec<NodeRef<'t, C>>,
    ) {
        match self.children() {
            Some(children) if level > 0 => {
                for child in children {
                    child.match_into(target, level - 1, similar, nodes);
                }
            }
            _ => {
                if similar(self.node().color(), target) {
                    nodes.push(self);
                }
            }
        }
    }
}

#[cfg(test)]
mod test {
    use proptest::prelude::*;

    use crate::{test_grid, Grid, Quadtree, Region, Rgb, Tolerance};

    fn first_cell(grid: &Grid<u32>, region: Region) -> u32 {
        *grid.get(region.x, region.y).unwrap()
    }

    #[test]
    fn uniform() {
        let grid = Grid::new(4, vec![5_u32; 16]).unwrap();
        let tree = Quadtree::build(&grid, first_cell);
        let matches = tree.find_matching(&5, 2, |a, b| a == b);
        assert_eq!(16, matches.count());
        assert_eq!(tree.leaves(), matches.nodes());

        let none = tree.find_matching(&4, 2, |a, b| a == b);
        assert!(none.is_empty());
        assert_eq!(0, none.count());

        let root = tree.find_matching(&5, 0, |a, b| a == b);
        assert_eq!(vec![tree.root()], root.into_nodes());
    }

    #[test]
    fn similar_rgb() {
        let grid: Grid<Rgb> = test_grid! {"
            #101010 #121212 #808080 #808080
            #0e0e0e #101010 #808080 #808080
            #ffffff #ffffff #000000 #202020
            #ffffff #ffffff #202020 #000000
        "};
        let tree = Quadtree::build(&grid, Rgb::average);
        let near = |a: &Rgb, b: &Rgb| a.similar(*b, Tolerance(4));

        let quadrants = tree.find_matching(&Rgb::from_bits(0x10_10_10), 1, near);
        let found: Vec<_> = quadrants.into_iter().map(|n| (n.x(), n.y())).collect();
        assert_eq!(vec![(0, 0), (2, 2)], found);

        let cells = tree.find_matching(&Rgb::from_bits(0x10_10_10), 2, near);
        let found: Vec<_> = cells.nodes().iter().map(|n| (n.x(), n.y())).collect();
        assert_eq!(vec![(0, 0), (1, 0), (0, 1), (1, 1)], found);

        let white = tree.find_matching(&Rgb::WHITE, 2, |a, b| a.similar(*b, Tolerance::EXACT));
        assert_eq!(4, white.count());
        assert!(white.nodes().iter().all(|n| n.x() < 2 && n.y() >= 2));
    }

    #[test]
    fn stops_at_leaves() {
        let grid: Grid<u32> = test_grid! {"
            1 2
            3 1
        "};
        let tree = Quadtree::build(&grid, first_cell);
        let matches = tree.find_matching(&1, 9, |a, b| a == b);
        let found: Vec<_> = matches.nodes().iter().map(|n| (n.x(), n.y())).collect();
        assert_eq!(vec![(0, 0), (1, 1)], found);
    }

    #[test]
    fn from_inner_node() {
        let grid = Grid::from_fn(4, |x, _| x % 2).unwrap();
        let tree = Quadtree::build(&grid, first_cell);
        let ne = tree.root().child_at(1).unwrap();
        let matches = ne.find_matching(&1, 1, |a, b| a == b);
        assert_eq!(2, matches.count());
        assert!(matches.nodes().iter().all(|n| n.x() == 3));
    }

    #[test]
    fn missing_node_matches_nothing() {
        let tree = Quadtree::build(&Grid::new(2, vec![5_u32; 4]).unwrap(), first_cell);
        let other = Quadtree::build(&Grid::new(2, vec![5_u32; 4]).unwrap(), first_cell);
        for node in other.nodes() {
            let matches = tree
                .get(node.id())
                .map(|node| node.find_matching(&5, 1, |a, b| a == b))
                .unwrap_or_default();
            assert_eq!(0, matches.count());
            assert!(matches.nodes().is_empty());
        }
    }

    proptest! {
        #[test]
        fn count_is_len(cells in prop::collection::vec(0_u32..4, 64), target in 0_u32..4, level in -1_i32..5) {
            let grid = Grid::new(8, cells).unwrap();
            let tree = Quadtree::build(&grid, first_cell);
            let matches = tree.find_matching(&target, level, |a, b| a == b);
            prop_assert_eq!(matches.count(), matches.nodes().len());
            prop_assert!(matches.nodes().iter().all(|n| *n.color() == target));
            let listed = tree.collect_at_level(level);
            let expected = listed.iter().filter(|n| *n.color() == target).count();
            prop_assert_eq!(expected, matches.count());
        }
    }
}
