// THEORY:
// The `DisjointSet` is the leaf of the clustering stack. It knows nothing about
// points, colors or zoom; it only tracks which indices in `0..n` have been
// declared connected, and answers "which group does index `i` belong to?".
//
// Key architectural principles:
// 1.  **Index Space, Not Object Graph**: `parent` is a flat array of indices into
//     whatever slice the caller is grouping for this pass. No references survive
//     the pass, so entities can be freely rebuilt between passes.
// 2.  **Path Compression**: `find` rewrites every visited parent pointer to the
//     root on the way back up, flattening the tree for later lookups.
// 3.  **Naive Union**: `union` always hangs the second root under the first. There
//     is no rank or size heuristic; interactive point counts keep trees shallow
//     enough and compression repairs the rest.

/// Union-find over the index space `0..n`.
#[derive(Debug, Clone)]
pub struct DisjointSet {
    parent: Vec<usize>,
}

impl DisjointSet {
    /// Creates `n` singleton sets, each index its own root.
    pub fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
        }
    }

    /// Returns the root of `i`, compressing the path behind it.
    pub fn find(&mut self, i: usize) -> usize {
        if self.parent[i] != i {
            self.parent[i] = self.find(self.parent[i]);
        }
        self.parent[i]
    }

    /// Merges the sets holding `i` and `j`. The root of `j` is attached under the root of `i`.
    pub fn union(&mut self, i: usize, j: usize) {
        let root_i = self.find(i);
        let root_j = self.find(j);
        if root_i != root_j {
            self.parent[root_j] = root_i;
        }
    }

    pub fn len(&self) -> usize {
        self.parent.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parent.is_empty()
    }

    /// Collects the member indices of every set. Groups are ordered by their
    /// lowest member, and members within a group are ascending.
    pub fn groups(&mut self) -> Vec<Vec<usize>> {
        let n = self.parent.len();
        // Maps a root to its position in `groups`.
        let mut slot_of_root: Vec<Option<usize>> = vec![None; n];
        let mut groups: Vec<Vec<usize>> = Vec::new();

        for i in 0..n {
            let root = self.find(i);
            match slot_of_root[root] {
                Some(slot) => groups[slot].push(i),
                None => {
                    slot_of_root[root] = Some(groups.len());
                    groups.push(vec![i]);
                }
            }
        }

        groups
    }
}
