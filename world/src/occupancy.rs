//! Dense cell-to-occupant index for the live world.

use pick_up_sticks_core::{BlockingSet, CellCoord, OccupancyError, Occupant, OccupiedCellError};

/// Row-major map from cell to at most one occupant.
///
/// A cell absent from the index is open. Each slot holds either nothing or
/// exactly one occupant; double-booking is refused with [`OccupiedCellError`].
#[derive(Clone, Debug)]
pub struct OccupancyIndex {
    columns: u32,
    rows: u32,
    cells: Vec<Option<Occupant>>,
}

impl OccupancyIndex {
    /// Creates an empty index covering `columns`×`rows` cells.
    #[must_use]
    pub fn new(columns: u32, rows: u32) -> Self {
        let capacity_u64 = u64::from(columns) * u64::from(rows);
        let capacity = usize::try_from(capacity_u64).unwrap_or(0);
        Self {
            columns,
            rows,
            cells: vec![None; capacity],
        }
    }

    /// Records `occupant` in `cell`.
    ///
    /// # Errors
    ///
    /// Returns [`OccupancyError::Occupied`] when the cell already holds an
    /// occupant and [`OccupancyError::OutOfRange`] when it lies outside the grid.
    pub fn place(&mut self, cell: CellCoord, occupant: Occupant) -> Result<(), OccupancyError> {
        let index = self
            .index(cell)
            .ok_or(OccupancyError::OutOfRange { cell })?;
        let slot = self
            .cells
            .get_mut(index)
            .ok_or(OccupancyError::OutOfRange { cell })?;
        if let Some(existing) = *slot {
            return Err(OccupiedCellError {
                cell,
                occupant: existing,
            }
            .into());
        }
        *slot = Some(occupant);
        Ok(())
    }

    /// Clears `cell`, returning the occupant that was removed.
    ///
    /// Removing an open or out-of-range cell is a no-op.
    pub fn remove(&mut self, cell: CellCoord) -> Option<Occupant> {
        let index = self.index(cell)?;
        self.cells.get_mut(index).and_then(Option::take)
    }

    /// Returns the occupant stored in `cell`, if any.
    #[must_use]
    pub fn occupant_at(&self, cell: CellCoord) -> Option<Occupant> {
        self.index(cell)
            .and_then(|index| self.cells.get(index).copied().flatten())
    }

    /// Reports whether the cell holds no occupant.
    #[must_use]
    pub fn is_open(&self, cell: CellCoord) -> bool {
        self.occupant_at(cell).is_none()
    }

    /// Reports whether the cell's occupant prevents movement into it.
    #[must_use]
    pub fn is_blocking_for_movement(&self, cell: CellCoord) -> bool {
        self.occupant_at(cell)
            .is_some_and(|occupant| occupant.blocks_movement())
    }

    /// Extracts exactly the cells whose occupant is an obstacle.
    ///
    /// Items never appear in the result.
    #[must_use]
    pub fn current_obstacle_blocking_set(&self) -> BlockingSet {
        self.iter()
            .filter(|(_, occupant)| occupant.blocks_reachability())
            .map(|(cell, _)| cell)
            .collect()
    }

    /// Iterates every occupied cell in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (CellCoord, Occupant)> + '_ {
        let columns = self.columns.max(1);
        self.cells.iter().enumerate().filter_map(move |(index, slot)| {
            let occupant = (*slot)?;
            let index = u32::try_from(index).ok()?;
            Some((CellCoord::new(index % columns, index / columns), occupant))
        })
    }

    fn index(&self, cell: CellCoord) -> Option<usize> {
        if cell.column() < self.columns && cell.row() < self.rows {
            let row = usize::try_from(cell.row()).ok()?;
            let column = usize::try_from(cell.column()).ok()?;
            let width = usize::try_from(self.columns).ok()?;
            Some(row * width + column)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pick_up_sticks_core::{ItemKind, ObstacleKind};

    const ROCK: Occupant = Occupant::Obstacle(ObstacleKind::Rock);
    const STICK: Occupant = Occupant::Item(ItemKind::Stick);

    #[test]
    fn place_then_query_round_trip() {
        let mut index = OccupancyIndex::new(5, 5);
        let cell = CellCoord::new(2, 3);

        assert!(index.is_open(cell));
        index.place(cell, ROCK).expect("open cell accepts a rock");
        assert_eq!(index.occupant_at(cell), Some(ROCK));
        assert!(index.is_blocking_for_movement(cell));
    }

    #[test]
    fn double_booking_is_refused() {
        let mut index = OccupancyIndex::new(5, 5);
        let cell = CellCoord::new(1, 1);
        index.place(cell, STICK).expect("first placement succeeds");

        let error = index.place(cell, ROCK).expect_err("second placement fails");
        assert_eq!(
            error,
            OccupancyError::Occupied(OccupiedCellError {
                cell,
                occupant: STICK,
            })
        );
        assert_eq!(index.occupant_at(cell), Some(STICK), "original occupant kept");
    }

    #[test]
    fn out_of_range_placement_is_refused() {
        let mut index = OccupancyIndex::new(4, 4);
        let cell = CellCoord::new(4, 0);

        assert_eq!(
            index.place(cell, ROCK),
            Err(OccupancyError::OutOfRange { cell })
        );
        assert_eq!(index.occupant_at(cell), None);
    }

    #[test]
    fn remove_is_a_no_op_for_open_cells() {
        let mut index = OccupancyIndex::new(4, 4);
        assert_eq!(index.remove(CellCoord::new(1, 1)), None);
        assert_eq!(index.remove(CellCoord::new(9, 9)), None);

        index
            .place(CellCoord::new(1, 1), ROCK)
            .expect("open cell accepts a rock");
        assert_eq!(index.remove(CellCoord::new(1, 1)), Some(ROCK));
        assert!(index.is_open(CellCoord::new(1, 1)));
    }

    #[test]
    fn blocking_set_contains_only_obstacles() {
        let mut index = OccupancyIndex::new(6, 6);
        index
            .place(CellCoord::new(0, 0), Occupant::Obstacle(ObstacleKind::Border))
            .expect("border placement");
        index.place(CellCoord::new(2, 2), ROCK).expect("rock placement");
        index.place(CellCoord::new(3, 4), STICK).expect("stick placement");

        let blocking = index.current_obstacle_blocking_set();
        assert_eq!(blocking.len(), 2);
        assert!(blocking.contains(CellCoord::new(0, 0)));
        assert!(blocking.contains(CellCoord::new(2, 2)));
        assert!(!blocking.contains(CellCoord::new(3, 4)));
    }

    #[test]
    fn iter_reports_coordinates_in_row_major_order() {
        let mut index = OccupancyIndex::new(3, 2);
        index.place(CellCoord::new(2, 0), ROCK).expect("rock");
        index.place(CellCoord::new(0, 1), STICK).expect("stick");

        let occupied: Vec<_> = index.iter().collect();
        assert_eq!(
            occupied,
            vec![(CellCoord::new(2, 0), ROCK), (CellCoord::new(0, 1), STICK)]
        );
    }
}
