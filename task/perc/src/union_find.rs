//! Weighted quick-union forest over a fixed universe of ids.

#[derive(Debug, Clone)]
pub struct UnionFind {
    parent: Vec<usize>,
    sizes: Vec<usize>,
}

impl UnionFind {
    /// Creates a forest of `len` singleton components, ids `0..len`.
    pub fn new(len: usize) -> Self {
        Self {
            parent: (0..len).collect(),
            sizes: vec![1; len],
        }
    }

    /// Returns the root of `x`'s component without touching the forest.
    /// Union by size keeps every path within `log2(len)` hops.
    ///
    /// # Panics
    ///
    /// If `x` is outside of the universe the forest was created with.
    pub fn find(&self, mut x: usize) -> usize {
        while self.parent[x] != x {
            x = self.parent[x];
        }
        x
    }

    /// Same as [`find`](Self::find), but halves the walked path on the way.
    pub fn find_mut(&mut self, mut x: usize) -> usize {
        while self.parent[x] != x {
            let grandparent = self.parent[self.parent[x]];
            self.parent[x] = grandparent;
            x = grandparent;
        }
        x
    }

    pub fn connected(&self, x: usize, y: usize) -> bool {
        self.find(x) == self.find(y)
    }

    /// Merges the components of `x` and `y`, hanging the smaller tree under
    /// the larger one. Returns the root of the merged component.
    pub fn union(&mut self, x: usize, y: usize) -> usize {
        let x = self.find_mut(x);
        let y = self.find_mut(y);
        if x == y {
            return x;
        }

        let (small, large) = if self.sizes[x] < self.sizes[y] {
            (x, y)
        } else {
            (y, x)
        };
        self.parent[small] = large;
        self.sizes[large] += self.sizes[small];
        large
    }
}

////////////////////////////////////////////////////////////////////////////////
