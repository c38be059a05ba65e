//! Data sources feeding a [`CascadeGroup`](super::CascadeGroup).

/// Supplies the items of every column of a cascading group.
///
/// Column `i` may depend only on the selections of columns `0..i`, so a
/// change can always be propagated by refreshing everything to its right.
pub trait CascadeSource {
    /// Number of columns (wheels) this source drives.
    fn depth(&self) -> usize;

    /// Items of `column`, given the selected positions of every column to
    /// its left (`path.len() == column`).
    fn items(&self, column: usize, path: &[usize]) -> Vec<String>;

    /// Whether a change in one column regenerates the columns to its right.
    fn cascades(&self) -> bool {
        true
    }
}

/// A node of a parent-to-children option tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionNode {
    /// Text shown on the wheel.
    pub text: String,
    /// Options offered one column to the right when this node is selected.
    pub children: Vec<OptionNode>,
}

impl OptionNode {
    /// Create a node with children.
    pub fn new(text: impl Into<String>, children: Vec<Self>) -> Self {
        Self {
            text: text.into(),
            children,
        }
    }

    /// Create a node without children.
    pub fn leaf(text: impl Into<String>) -> Self {
        Self::new(text, Vec::new())
    }
}

/// Tree-shaped data: each column lists the children of the node selected in
/// the column to its left.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OptionTree {
    roots: Vec<OptionNode>,
}

impl OptionTree {
    /// Create a tree from its root options.
    pub const fn new(roots: Vec<OptionNode>) -> Self {
        Self { roots }
    }

    /// Root options.
    pub fn roots(&self) -> &[OptionNode] {
        &self.roots
    }
}

impl CascadeSource for OptionTree {
    /// Length of the chain of first children; zero for an empty tree.
    fn depth(&self) -> usize {
        std::iter::successors(self.roots.first(), |node| node.children.first()).count()
    }

    fn items(&self, column: usize, path: &[usize]) -> Vec<String> {
        let mut level = self.roots.as_slice();
        for &position in path.iter().take(column) {
            match level.get(position) {
                Some(node) => level = &node.children,
                None => return Vec::new(),
            }
        }
        level.iter().map(|node| node.text.clone()).collect()
    }
}

/// Independent columns; selecting in one never touches the others.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StaticColumns {
    columns: Vec<Vec<String>>,
}

impl StaticColumns {
    /// Create from one item list per column.
    pub const fn new(columns: Vec<Vec<String>>) -> Self {
        Self { columns }
    }
}

impl CascadeSource for StaticColumns {
    fn depth(&self) -> usize {
        self.columns.len()
    }

    fn items(&self, column: usize, _path: &[usize]) -> Vec<String> {
        self.columns.get(column).cloned().unwrap_or_default()
    }

    fn cascades(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> OptionTree {
        OptionTree::new(vec![
            OptionNode::new("A", vec![OptionNode::leaf("1"), OptionNode::leaf("2")]),
            OptionNode::new("B", vec![OptionNode::leaf("3")]),
        ])
    }

    #[test]
    fn test_tree_depth_follows_first_children() {
        assert_eq!(sample().depth(), 2);
        assert_eq!(OptionTree::default().depth(), 0);

        let uneven = OptionTree::new(vec![
            OptionNode::leaf("shallow"),
            OptionNode::new("deep", vec![OptionNode::leaf("x")]),
        ]);
        assert_eq!(uneven.depth(), 1);
    }

    #[test]
    fn test_tree_items_walk_the_path() {
        let tree = sample();
        assert_eq!(tree.items(0, &[]), vec!["A", "B"]);
        assert_eq!(tree.items(1, &[0]), vec!["1", "2"]);
        assert_eq!(tree.items(1, &[1]), vec!["3"]);
        assert!(tree.items(1, &[5]).is_empty());
    }

    #[test]
    fn test_static_columns_ignore_path() {
        let cols = StaticColumns::new(vec![vec!["a".into()], vec!["x".into(), "y".into()]]);
        assert_eq!(cols.depth(), 2);
        assert_eq!(cols.items(1, &[0]), vec!["x", "y"]);
        assert!(cols.items(2, &[]).is_empty());
        assert!(!cols.cascades());
    }
}
