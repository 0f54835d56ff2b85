use ndarray::Array2;

/// Single coordinate axis, used for row/column positions and board dimensions.
pub type Coord = u16;

/// Count type for cell and mine totals (`Coord::MAX^2` fits).
pub type CellCount = u32;

/// Board position as `(row, col)`.
pub type Coord2 = (Coord, Coord);

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.0.into(), self.1.into()]
    }
}

pub const fn mult(a: Coord, b: Coord) -> CellCount {
    let a = a as CellCount;
    let b = b as CellCount;
    a.saturating_mul(b)
}

/// Iteration over the up-to-8 in-bounds neighbors of a grid position.
pub trait GridNeighbors {
    fn neighbors(&self, center: Coord2) -> NeighborIter;
}

impl<T> GridNeighbors for Array2<T> {
    fn neighbors(&self, center: Coord2) -> NeighborIter {
        let dim = self.dim();
        let bounds = (dim.0.try_into().unwrap(), dim.1.try_into().unwrap());
        NeighborIter::new(center, bounds)
    }
}

const DISPLACEMENTS: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Applies `delta` to `center`, returning a value only when it stays in bounds.
fn step(center: Coord2, delta: (i8, i8), bounds: Coord2) -> Option<Coord2> {
    let row = center.0.checked_add_signed(delta.0 as i16)?;
    let col = center.1.checked_add_signed(delta.1 as i16)?;
    (row < bounds.0 && col < bounds.1).then_some((row, col))
}

#[derive(Debug)]
pub struct NeighborIter {
    center: Coord2,
    bounds: Coord2,
    next: u8,
}

impl NeighborIter {
    fn new(center: Coord2, bounds: Coord2) -> Self {
        Self {
            center,
            bounds,
            next: 0,
        }
    }
}

impl Iterator for NeighborIter {
    type Item = Coord2;

    fn next(&mut self) -> Option<Self::Item> {
        while usize::from(self.next) < DISPLACEMENTS.len() {
            let delta = DISPLACEMENTS[usize::from(self.next)];
            self.next += 1;

            if let Some(coords) = step(self.center, delta, self.bounds) {
                return Some(coords);
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    fn neighbors_of(center: Coord2, bounds: Coord2) -> Vec<Coord2> {
        Array2::<u8>::default(bounds.to_nd_index())
            .neighbors(center)
            .collect()
    }

    #[test]
    fn interior_cell_has_eight_neighbors() {
        let found = neighbors_of((1, 1), (3, 3));
        assert_eq!(found.len(), 8);
        assert!(!found.contains(&(1, 1)));
    }

    #[test]
    fn corner_and_edge_cells_are_clipped() {
        assert_eq!(neighbors_of((0, 0), (3, 3)).len(), 3);
        assert_eq!(neighbors_of((0, 1), (3, 3)).len(), 5);
        assert_eq!(neighbors_of((2, 2), (3, 3)).len(), 3);
    }

    #[test]
    fn single_cell_board_has_no_neighbors() {
        assert!(neighbors_of((0, 0), (1, 1)).is_empty());
    }

    #[test]
    fn neighbors_stay_in_bounds() {
        for coords in neighbors_of((0, 4), (5, 5)) {
            assert!(coords.0 < 5 && coords.1 < 5);
        }
    }
}
