use crate::union_find::UnionFind;

////////////////////////////////////////////////////////////////////////////////

/// Remembers, for every component root, one open bottom-row column that
/// belongs to the component.
///
/// Slots are only meaningful for live roots. Any union of two tracked ids must
/// go through [`BottomTracker::union`] so the surviving root inherits the
/// column of whichever side had one.
#[derive(Debug, Clone)]
pub struct BottomTracker {
    columns: Vec<Option<usize>>,
}

impl BottomTracker {
    pub fn new(len: usize) -> Self {
        Self {
            columns: vec![None; len],
        }
    }

    /// Column recorded for the component rooted at `root`.
    pub fn get(&self, root: usize) -> Option<usize> {
        self.columns[root]
    }

    /// Records `col` for the component of `id`, unless it already has one.
    pub fn mark(&mut self, forest: &mut UnionFind, id: usize, col: usize) {
        let root = forest.find_mut(id);
        self.columns[root].get_or_insert(col);
    }

    /// Unions `p` and `q` in `forest`, carrying the bottom column over to the
    /// new root. Both slots are read before the forest changes.
    pub fn union(&mut self, forest: &mut UnionFind, p: usize, q: usize) -> usize {
        let p_root = forest.find_mut(p);
        let q_root = forest.find_mut(q);
        if p_root == q_root {
            return p_root;
        }

        let column = self.columns[p_root].or(self.columns[q_root]);
        let root = forest.union(p_root, q_root);
        self.columns[root] = column;
        root
    }
}

////////////////////////////////////////////////////////////////////////////////
