use smallvec::SmallVec;
use sumac_ir::Arena;

sumac_ir::identifier! {
    /// Canonical identity of a projection path. Two handles from the same
    /// trie are equal exactly when they were interned from equal index
    /// sequences.
    pub struct PathNode
}

#[derive(Debug, Clone)]
struct PathTrieNode {
    parent: Option<PathNode>,
    /// The projection index on the edge from `parent`.
    index: Option<usize>,
    /// Children sorted by projection index.
    children: SmallVec<[(usize, PathNode); 4]>,
}

/// A trie of projection indices that gives every access path a unique,
/// comparable identity.
///
/// Nodes are never removed; the trie only grows until it is dropped or
/// replaced wholesale.
#[derive(Debug, Clone)]
pub struct PathTrie {
    nodes: Arena<PathNode, PathTrieNode>,
    root: PathNode,
}

impl Default for PathTrie {
    fn default() -> Self {
        Self::new()
    }
}

impl PathTrie {
    pub fn new() -> Self {
        let mut nodes = Arena::default();
        let root = nodes.alloc(PathTrieNode {
            parent: None,
            index: None,
            children: SmallVec::new(),
        });
        Self { nodes, root }
    }

    /// The node for the empty path.
    pub fn root(&self) -> PathNode {
        self.root
    }

    /// Number of nodes, including the root.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    /// Walk `indices` from `from`, creating missing children, and return the
    /// final node.
    pub fn intern(&mut self, from: PathNode, indices: &[usize]) -> PathNode {
        indices
            .iter()
            .fold(from, |node, &index| self.get_or_insert_child(node, index))
    }

    /// Shorthand for interning `indices` from the root.
    pub fn intern_path(&mut self, indices: &[usize]) -> PathNode {
        self.intern(self.root, indices)
    }

    /// The child of `node` along `index`, if it has been interned.
    pub fn child(&self, node: PathNode, index: usize) -> Option<PathNode> {
        let children = &self.nodes[node].children;
        children
            .binary_search_by_key(&index, |(i, _)| *i)
            .ok()
            .map(|pos| children[pos].1)
    }

    pub fn parent(&self, node: PathNode) -> Option<PathNode> {
        self.nodes[node].parent
    }

    /// The projection index on the edge into `node`; `None` for the root.
    pub fn index(&self, node: PathNode) -> Option<usize> {
        self.nodes[node].index
    }

    pub fn is_root(&self, node: PathNode) -> bool {
        node == self.root
    }

    /// Reconstruct the index sequence leading from the root to `node`.
    pub fn path(&self, node: PathNode) -> Vec<usize> {
        let mut path = Vec::new();
        let mut current = node;
        while let Some(index) = self.index(current) {
            path.push(index);
            current = self.nodes[current]
                .parent
                .expect("non-root trie node without a parent");
        }
        path.reverse();
        path
    }

    fn get_or_insert_child(&mut self, node: PathNode, index: usize) -> PathNode {
        let pos = match self.nodes[node]
            .children
            .binary_search_by_key(&index, |(i, _)| *i)
        {
            Ok(pos) => return self.nodes[node].children[pos].1,
            Err(pos) => pos,
        };
        let child = self.nodes.alloc(PathTrieNode {
            parent: Some(node),
            index: Some(index),
            children: SmallVec::new(),
        });
        self.nodes[node].children.insert(pos, (index, child));
        child
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_sequence_same_node() {
        let mut trie = PathTrie::new();
        let a = trie.intern_path(&[0, 1]);
        let b = trie.intern_path(&[0, 1]);
        assert_eq!(a, b);
        assert_eq!(trie.len(), 3);
    }

    #[test]
    fn test_different_sequences_differ() {
        let mut trie = PathTrie::new();
        let a = trie.intern_path(&[0, 1]);
        let b = trie.intern_path(&[1, 0]);
        let c = trie.intern_path(&[0]);
        assert_ne!(a, b);
        assert_ne!(a, c);
        assert_ne!(b, c);
    }

    #[test]
    fn test_prefix_is_shared() {
        let mut trie = PathTrie::new();
        let prefix = trie.intern_path(&[2]);
        let extended = trie.intern(prefix, &[3, 4]);
        assert_eq!(trie.intern_path(&[2, 3, 4]), extended);
        let middle = trie.parent(extended).unwrap();
        assert_eq!(trie.parent(middle), Some(prefix));
        assert_eq!(trie.child(prefix, 3), Some(middle));
        assert_eq!(trie.child(prefix, 4), None);
    }

    #[test]
    fn test_empty_path_is_root() {
        let mut trie = PathTrie::new();
        let root = trie.root();
        assert_eq!(trie.intern_path(&[]), root);
        assert!(trie.is_root(root));
        assert_eq!(trie.index(root), None);
        assert_eq!(trie.parent(root), None);
        assert!(trie.path(root).is_empty());
    }

    #[test]
    fn test_path_round_trips_through_node() {
        let mut trie = PathTrie::new();
        trie.intern_path(&[5, 1]);
        trie.intern_path(&[5, 0]);
        let node = trie.intern_path(&[5, 0, 7]);
        assert_eq!(trie.path(node), vec![5, 0, 7]);
        assert_eq!(trie.index(node), Some(7));
    }
}
