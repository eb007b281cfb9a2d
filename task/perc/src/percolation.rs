use std::fmt::Display;

use crate::{tracker::BottomTracker, union_find::UnionFind, Error, Result};

////////////////////////////////////////////////////////////////////////////////

/// Number of forest ids (sites plus the two virtual ones) for a grid of
/// `size`, or `None` if the forest could not be addressed.
pub(crate) fn forest_len(size: usize) -> Option<usize> {
    let len = size.checked_mul(size)?.checked_add(2)?;
    let bytes = len.checked_mul(std::mem::size_of::<usize>())?;
    (bytes <= isize::MAX as usize).then_some(len)
}

////////////////////////////////////////////////////////////////////////////////

/// An `n`-by-`n` grid of sites, all blocked at first, that can be opened one
/// by one. Rows and columns are numbered from 1.
///
/// Two extra ids live in the forest after the `n * n` sites: a virtual top,
/// joined to the whole first row up front, and a virtual bottom, which is
/// joined to a component only once that component is known to reach both the
/// top and the bottom row. Joining the bottom row eagerly would let a full
/// site leak fullness to unrelated bottom-row sites through the virtual
/// bottom.
#[derive(Debug, Clone)]
pub struct Percolation {
    size: usize,
    open: Vec<bool>,
    open_count: usize,
    forest: UnionFind,
    bottom: BottomTracker,
}

impl Percolation {
    /// Creates an `n`-by-`n` grid with every site blocked.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidArgument`] if `size` is zero or too large to index.
    pub fn new(size: usize) -> Result<Self> {
        if size == 0 {
            return Err(Error::InvalidArgument("grid size must be positive"));
        }
        let len = forest_len(size).ok_or(Error::InvalidArgument("grid size too large"))?;

        let sites = len - 2;
        let mut forest = UnionFind::new(len);
        for id in 0..size {
            forest.union(sites, id);
        }

        Ok(Self {
            size,
            open: vec![false; sites],
            open_count: 0,
            forest,
            bottom: BottomTracker::new(len),
        })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    fn virtual_top(&self) -> usize {
        self.size * self.size
    }

    fn virtual_bottom(&self) -> usize {
        self.size * self.size + 1
    }

    fn index(&self, row: usize, col: usize) -> Result<usize> {
        if row == 0 || col == 0 || row > self.size || col > self.size {
            return Err(Error::OutOfRange {
                row,
                col,
                size: self.size,
            });
        }
        Ok((row - 1) * self.size + (col - 1))
    }

    /// Opens the site at (`row`, `col`). Opening an open site does nothing.
    pub fn open(&mut self, row: usize, col: usize) -> Result<()> {
        let id = self.index(row, col)?;
        if self.open[id] {
            return Ok(());
        }
        self.open[id] = true;
        self.open_count += 1;

        let virtual_bottom = self.virtual_bottom();
        if self.size == 1 {
            self.bottom.union(&mut self.forest, id, virtual_bottom);
            log::trace!("1x1 grid percolates");
            return Ok(());
        }

        if row == self.size {
            self.bottom.mark(&mut self.forest, id, col);
        }

        let neighbours = [
            (row - 1, col),
            (row + 1, col),
            (row, col - 1),
            (row, col + 1),
        ];
        for (r, c) in neighbours {
            if let Ok(other) = self.index(r, c) {
                if self.open[other] {
                    self.bottom.union(&mut self.forest, id, other);
                }
            }
        }

        let root = self.forest.find_mut(id);
        if let Some(bottom_col) = self.bottom.get(root) {
            let bottom_site = self.index(self.size, bottom_col)?;
            if self.forest.connected(bottom_site, self.virtual_top()) {
                let was_percolating = self.percolates();
                self.bottom.union(&mut self.forest, root, virtual_bottom);
                if !was_percolating {
                    log::trace!(
                        "grid percolates after {} open sites, last opened ({row}, {col})",
                        self.open_count
                    );
                }
            }
        }

        Ok(())
    }

    pub fn is_open(&self, row: usize, col: usize) -> Result<bool> {
        let id = self.index(row, col)?;
        Ok(self.open[id])
    }

    /// Whether the site is open and connected to the top row through open
    /// sites.
    pub fn is_full(&self, row: usize, col: usize) -> Result<bool> {
        let id = self.index(row, col)?;
        Ok(self.open[id] && self.forest.connected(id, self.virtual_top()))
    }

    pub fn number_of_open_sites(&self) -> usize {
        self.open_count
    }

    pub fn percolates(&self) -> bool {
        self.forest.connected(self.virtual_top(), self.virtual_bottom())
    }
}

impl Display for Percolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in 0..self.size {
            for col in 0..self.size {
                let id = row * self.size + col;
                let symbol = if !self.open[id] {
                    '#'
                } else if self.forest.connected(id, self.virtual_top()) {
                    '*'
                } else {
                    '.'
                };
                write!(f, "{symbol}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

////////////////////////////////////////////////////////////////////////////////
