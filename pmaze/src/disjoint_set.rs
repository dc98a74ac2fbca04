//! Union-find over the indices `0..n`, with union by rank and path compression.

#[derive(Debug, Clone)]
pub struct DisjointSet {
    parent: Vec<usize>,
    // upper bound of the tree depth, before any compression
    rank: Vec<u8>,
    // only meaningful for roots
    size: Vec<usize>,
    classes: usize,
}

impl DisjointSet {
    pub fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
            rank: vec![0; n],
            size: vec![1; n],
            classes: n,
        }
    }

    pub fn len(&self) -> usize {
        self.parent.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parent.is_empty()
    }

    /// Returns the representative of the class of `node`.
    ///
    /// Every node visited on the way ends up pointing directly at the representative.
    pub fn find(&mut self, mut node: usize) -> usize {
        let mut root = node;
        while self.parent[root] != root {
            root = self.parent[root];
        }

        while self.parent[node] != root {
            let parent = self.parent[node];
            self.parent[node] = root;
            node = parent;
        }

        root
    }

    /// Merges the classes of `left` and `right`.
    ///
    /// Returns `false` if they already were in the same class.
    pub fn union(&mut self, left: usize, right: usize) -> bool {
        let mut left = self.find(left);
        let mut right = self.find(right);
        if left == right {
            return false;
        }

        if self.rank[left] < self.rank[right] {
            std::mem::swap(&mut left, &mut right);
        }

        self.parent[right] = left;
        self.size[left] += self.size[right];
        if self.rank[left] == self.rank[right] {
            self.rank[left] = self.rank[left].saturating_add(1);
        }
        self.classes -= 1;

        true
    }

    pub fn same_class(&mut self, left: usize, right: usize) -> bool {
        self.find(left) == self.find(right)
    }

    /// Number of elements in the class containing `node`.
    pub fn class_size(&mut self, node: usize) -> usize {
        let root = self.find(node);
        self.size[root]
    }

    pub fn class_count(&self) -> usize {
        self.classes
    }
}
