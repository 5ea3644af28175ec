//! Static grid geometry: interior bounds, border classification and adjacency.

use pick_up_sticks_core::{CellCoord, Direction};

/// Fixed layout of an `N`×`N` grid whose outermost ring is a permanent border.
///
/// Interior cells satisfy `1 <= column <= N - 2` and `1 <= row <= N - 2`. The
/// interior list and the neighbour table are computed once at construction and
/// never change afterwards.
#[derive(Clone, Debug)]
pub struct GridGeometry {
    size: u32,
    interior: Vec<CellCoord>,
    neighbors: Vec<Neighbors>,
}

#[derive(Clone, Copy, Debug)]
struct Neighbors {
    cells: [CellCoord; 4],
    len: u8,
}

impl Default for Neighbors {
    fn default() -> Self {
        Self {
            cells: [CellCoord::new(0, 0); 4],
            len: 0,
        }
    }
}

impl Neighbors {
    fn push(&mut self, cell: CellCoord) {
        let len = usize::from(self.len);
        if len < self.cells.len() {
            self.cells[len] = cell;
            self.len += 1;
        }
    }

    fn as_slice(&self) -> &[CellCoord] {
        &self.cells[..usize::from(self.len)]
    }
}

impl GridGeometry {
    /// Derives the geometry of an `size`×`size` grid.
    ///
    /// Grids smaller than 3×3 have no interior; every query then reports
    /// border or out-of-range cells only.
    #[must_use]
    pub fn new(size: u32) -> Self {
        let interior_span = size.saturating_sub(2);
        let mut interior = Vec::with_capacity(cell_count(interior_span));
        for column in 1..=interior_span {
            for row in 1..=interior_span {
                interior.push(CellCoord::new(column, row));
            }
        }

        let mut geometry = Self {
            size,
            interior,
            neighbors: vec![Neighbors::default(); cell_count(size)],
        };

        for index in 0..geometry.interior.len() {
            let cell = geometry.interior[index];
            let mut entry = Neighbors::default();
            for direction in Direction::ALL {
                if let Some(neighbor) = cell.step(direction) {
                    if geometry.is_interior(neighbor) {
                        entry.push(neighbor);
                    }
                }
            }
            if let Some(slot) = geometry
                .index(cell)
                .and_then(|offset| geometry.neighbors.get_mut(offset))
            {
                *slot = entry;
            }
        }

        geometry
    }

    /// Edge length of the grid measured in cells, border included.
    #[must_use]
    pub const fn size(&self) -> u32 {
        self.size
    }

    /// Interior cells in ascending `(column, row)` order.
    #[must_use]
    pub fn interior_cells(&self) -> &[CellCoord] {
        &self.interior
    }

    /// Reports whether the cell lies inside the grid bounds.
    #[must_use]
    pub const fn contains(&self, cell: CellCoord) -> bool {
        cell.column() < self.size && cell.row() < self.size
    }

    /// Reports whether the cell is eligible to be open or host an entity.
    #[must_use]
    pub const fn is_interior(&self, cell: CellCoord) -> bool {
        let last = self.size.saturating_sub(2);
        cell.column() >= 1 && cell.column() <= last && cell.row() >= 1 && cell.row() <= last
    }

    /// Reports whether the cell belongs to the permanent border ring.
    #[must_use]
    pub const fn is_border(&self, cell: CellCoord) -> bool {
        self.contains(cell) && !self.is_interior(cell)
    }

    /// Enumerates every border cell in ascending `(column, row)` order.
    pub fn border_cells(&self) -> impl Iterator<Item = CellCoord> + '_ {
        (0..self.size)
            .flat_map(move |column| (0..self.size).map(move |row| CellCoord::new(column, row)))
            .filter(|cell| self.is_border(*cell))
    }

    /// Interior cells orthogonally adjacent to `cell`.
    ///
    /// Returns an empty slice for border and out-of-range cells.
    #[must_use]
    pub fn neighbors(&self, cell: CellCoord) -> &[CellCoord] {
        match self.index(cell).and_then(|offset| self.neighbors.get(offset)) {
            Some(entry) => entry.as_slice(),
            None => &[],
        }
    }

    /// Dense row-major offset of the cell, if it lies inside the grid.
    #[must_use]
    pub fn index(&self, cell: CellCoord) -> Option<usize> {
        if !self.contains(cell) {
            return None;
        }
        let width = usize::try_from(self.size).ok()?;
        let column = usize::try_from(cell.column()).ok()?;
        let row = usize::try_from(cell.row()).ok()?;
        row.checked_mul(width)?.checked_add(column)
    }

    /// Number of dense slots required to index every cell of the grid.
    #[must_use]
    pub fn cell_capacity(&self) -> usize {
        cell_count(self.size)
    }
}

fn cell_count(span: u32) -> usize {
    let span = usize::try_from(span).unwrap_or(0);
    span.checked_mul(span).unwrap_or(0)
}
