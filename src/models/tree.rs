/// Index path from the root to a node; the root itself is the empty path.
pub type NodePath = Vec<usize>;

#[derive(Debug, Clone)]
pub struct TreeNode<T> {
    pub label: String,
    pub data: T,
    pub allow_expand: bool,
    pub expanded: bool,
    pub children: Vec<TreeNode<T>>,
}

impl<T> TreeNode<T> {
    pub fn branch(label: impl Into<String>, data: T) -> Self {
        Self {
            label: label.into(),
            data,
            allow_expand: true,
            expanded: false,
            children: Vec::new(),
        }
    }

    pub fn leaf(label: impl Into<String>, data: T) -> Self {
        Self {
            label: label.into(),
            data,
            allow_expand: false,
            expanded: false,
            children: Vec::new(),
        }
    }
}

/// One rendered line of the tree
#[derive(Debug, Clone, PartialEq)]
pub struct VisibleRow {
    pub path: NodePath,
    pub depth: usize,
}

/// Tree with a cursor over its visible (expanded) rows
pub struct TreeModel<T> {
    root: TreeNode<T>,
    rows: Vec<VisibleRow>,
    cursor: usize,
    pub scroll_offset: usize,
    pub visible_height: usize,
}

impl<T> TreeModel<T> {
    pub fn new(mut root: TreeNode<T>) -> Self {
        root.expanded = true;
        let mut model = Self {
            root,
            rows: Vec::new(),
            cursor: 0,
            scroll_offset: 0,
            visible_height: 10,
        };
        model.rebuild_rows();
        model
    }

    /// Recomputes the visible rows. The cursor stays on the node it was on, or on its
    /// nearest visible ancestor when that node got hidden.
    fn rebuild_rows(&mut self) {
        let previous = self.rows.get(self.cursor).map(|row| row.path.clone());
        let mut rows = Vec::new();
        let mut stack: Vec<(NodePath, &TreeNode<T>)> = vec![(Vec::new(), &self.root)];

        while let Some((path, node)) = stack.pop() {
            rows.push(VisibleRow {
                depth: path.len(),
                path: path.clone(),
            });
            if node.expanded {
                // reversed so the first child is popped first
                for (i, child) in node.children.iter().enumerate().rev() {
                    let mut child_path = path.clone();
                    child_path.push(i);
                    stack.push((child_path, child));
                }
            }
        }

        self.rows = rows;
        if let Some(path) = previous {
            if let Some(index) = (0..=path.len())
                .rev()
                .find_map(|len| self.rows.iter().position(|row| row.path == path[..len]))
            {
                self.cursor = index;
            }
        }
        if self.cursor >= self.rows.len() {
            self.cursor = self.rows.len().saturating_sub(1);
        }
    }

    pub fn root(&self) -> &TreeNode<T> {
        &self.root
    }

    pub fn rows(&self) -> &[VisibleRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn node(&self, path: &[usize]) -> Option<&TreeNode<T>> {
        let mut node = &self.root;
        for &i in path {
            node = node.children.get(i)?;
        }
        Some(node)
    }

    fn node_mut(&mut self, path: &[usize]) -> Option<&mut TreeNode<T>> {
        let mut node = &mut self.root;
        for &i in path {
            node = node.children.get_mut(i)?;
        }
        Some(node)
    }

    /// Mutates node data without touching the tree shape.
    pub fn data_mut(&mut self, path: &[usize]) -> Option<&mut T> {
        self.node_mut(path).map(|n| &mut n.data)
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn cursor_path(&self) -> NodePath {
        self.rows
            .get(self.cursor)
            .map(|row| row.path.clone())
            .unwrap_or_default()
    }

    pub fn cursor_node(&self) -> &TreeNode<T> {
        self.node(&self.cursor_path()).unwrap_or(&self.root)
    }

    /// Moves the cursor to `path` if that node is currently visible.
    pub fn select_path(&mut self, path: &[usize]) -> bool {
        match self.rows.iter().position(|row| row.path == path) {
            Some(index) => {
                self.cursor = index;
                true
            }
            None => false,
        }
    }

    /// Depth-first search over every loaded node.
    pub fn find(&self, pred: impl Fn(&T) -> bool) -> Option<NodePath> {
        let mut stack: Vec<(NodePath, &TreeNode<T>)> = vec![(Vec::new(), &self.root)];
        while let Some((path, node)) = stack.pop() {
            if pred(&node.data) {
                return Some(path);
            }
            for (i, child) in node.children.iter().enumerate() {
                let mut child_path = path.clone();
                child_path.push(i);
                stack.push((child_path, child));
            }
        }
        None
    }

    pub fn set_children(&mut self, path: &[usize], children: Vec<TreeNode<T>>) {
        if let Some(node) = self.node_mut(path) {
            node.children = children;
        }
        self.rebuild_rows();
    }

    /// Like [`Self::set_children`], but node paths shift, so the cursor is put back on
    /// the node with the same `key` when it is still visible.
    pub fn replace_children<K: PartialEq>(
        &mut self,
        path: &[usize],
        children: Vec<TreeNode<T>>,
        key: impl Fn(&T) -> K,
    ) {
        let selected = key(&self.cursor_node().data);
        self.set_children(path, children);
        if let Some(found) = self.find(|data| key(data) == selected) {
            self.select_path(&found);
        }
    }

    pub fn set_expanded(&mut self, path: &[usize], expanded: bool) {
        if let Some(node) = self.node_mut(path) {
            if node.allow_expand {
                node.expanded = expanded;
            }
        }
        self.rebuild_rows();
    }

    pub fn toggle(&mut self, path: &[usize]) {
        let expanded = self.node(path).map(|n| n.expanded).unwrap_or(false);
        self.set_expanded(path, !expanded);
    }

    pub fn move_up(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            if self.cursor < self.scroll_offset {
                self.scroll_offset = self.cursor;
            }
        }
    }

    pub fn move_down(&mut self) {
        if self.cursor < self.rows.len().saturating_sub(1) {
            self.cursor += 1;
        }
    }

    pub fn page_up(&mut self) {
        let page_size = self.visible_height;
        if self.cursor >= page_size {
            self.cursor -= page_size;
            self.scroll_offset = self.scroll_offset.saturating_sub(page_size);
        } else {
            self.cursor = 0;
            self.scroll_offset = 0;
        }
    }

    pub fn page_down(&mut self) {
        let max = self.rows.len();
        let page_size = self.visible_height;
        if self.cursor + page_size < max {
            self.cursor += page_size;
            self.scroll_offset =
                (self.scroll_offset + page_size).min(max.saturating_sub(self.visible_height));
        } else if max > 0 {
            self.cursor = max - 1;
            self.scroll_offset = max.saturating_sub(self.visible_height);
        }
    }

    pub fn home(&mut self) {
        self.cursor = 0;
        self.scroll_offset = 0;
    }

    pub fn end(&mut self) {
        let max = self.rows.len();
        if max > 0 {
            self.cursor = max - 1;
            self.scroll_offset = max.saturating_sub(self.visible_height);
        }
    }
}

pub fn parent_path(path: &[usize]) -> NodePath {
    path[..path.len().saturating_sub(1)].to_vec()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> TreeModel<&'static str> {
        let mut tree = TreeModel::new(TreeNode::branch("root", "root"));
        tree.set_children(
            &[],
            vec![
                TreeNode::branch("dir", "dir"),
                TreeNode::leaf("a.txt", "a.txt"),
            ],
        );
        tree.set_children(&[0], vec![TreeNode::leaf("inner.txt", "inner.txt")]);
        tree
    }

    #[test]
    fn collapsed_children_are_hidden() {
        let tree = sample();
        let labels: Vec<_> = tree
            .rows()
            .iter()
            .filter_map(|row| tree.node(&row.path).map(|n| n.label.as_str()))
            .collect();
        assert_eq!(labels, vec!["root", "dir", "a.txt"]);
    }

    #[test]
    fn toggle_expands_in_place() {
        let mut tree = sample();
        tree.toggle(&[0]);
        let rows = tree.rows();
        assert_eq!(rows.len(), 4);
        assert_eq!(rows[2].path, vec![0, 0]);
        assert_eq!(rows[2].depth, 2);
        assert_eq!(tree.node(&rows[3].path).map(|n| n.data), Some("a.txt"));

        tree.toggle(&[0]);
        assert_eq!(tree.len(), 3);
    }

    #[test]
    fn leaves_do_not_expand() {
        let mut tree = sample();
        tree.set_expanded(&[1], true);
        assert!(!tree.node(&[1]).map(|n| n.expanded).unwrap_or(true));
    }

    #[test]
    fn cursor_is_clamped_when_rows_disappear() {
        let mut tree = sample();
        tree.toggle(&[0]);
        tree.end();
        assert_eq!(tree.cursor(), 3);
        tree.set_children(&[], Vec::new());
        assert_eq!(tree.cursor(), 0);
        assert_eq!(tree.cursor_path(), Vec::<usize>::new());
    }

    #[test]
    fn navigation_and_selection() {
        let mut tree = sample();
        tree.move_up();
        assert_eq!(tree.cursor(), 0);
        tree.move_down();
        tree.move_down();
        tree.move_down();
        assert_eq!(tree.cursor_node().data, "a.txt");
        tree.home();
        assert!(tree.select_path(&[1]));
        assert_eq!(tree.cursor(), 2);
        assert!(!tree.select_path(&[0, 0]));
    }

    #[test]
    fn find_searches_hidden_nodes() {
        let tree = sample();
        assert_eq!(tree.find(|d| *d == "inner.txt"), Some(vec![0, 0]));
        assert_eq!(tree.find(|d| *d == "missing"), None);
        assert_eq!(parent_path(&[0, 0]), vec![0]);
        assert_eq!(parent_path(&[]), Vec::<usize>::new());
    }

    #[test]
    fn cursor_stays_on_its_node_when_rows_shift() {
        let mut tree = sample();
        tree.end();
        assert_eq!(tree.cursor_node().data, "a.txt");

        tree.toggle(&[0]);
        assert_eq!(tree.cursor(), 3);
        assert_eq!(tree.cursor_node().data, "a.txt");

        tree.replace_children(
            &[],
            vec![
                TreeNode::leaf("0.txt", "0.txt"),
                TreeNode::branch("dir", "dir"),
                TreeNode::leaf("a.txt", "a.txt"),
            ],
            |d| *d,
        );
        assert_eq!(tree.cursor_node().data, "a.txt");
    }

    #[test]
    fn collapsing_moves_the_cursor_to_the_folder() {
        let mut tree = sample();
        tree.toggle(&[0]);
        assert!(tree.select_path(&[0, 0]));

        tree.toggle(&[0]);
        assert_eq!(tree.cursor_path(), vec![0]);
    }
}
