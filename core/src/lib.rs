#![no_std]

extern crate alloc;

use core::ops::Index;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

pub use board::*;
pub use cell::*;
pub use error::*;
pub use generator::*;
pub use outcome::*;
pub use types::*;

mod board;
mod cell;
mod error;
mod generator;
mod outcome;
mod types;

/// Requested board shape: `size` is `(height, width)` in cells.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    pub size: Coord2,
    pub mines: CellCount,
}

impl GameConfig {
    pub const fn new(size: Coord2, mines: CellCount) -> Self {
        Self { size, mines }
    }

    /// Both dimensions must be positive and the mine count strictly between
    /// zero and the cell total, so at least one safe cell always exists.
    pub fn validate(self) -> Result<Self> {
        let (height, width) = self.size;
        if height == 0 || width == 0 {
            return Err(GameError::InvalidConfig);
        }
        if self.mines == 0 || self.mines >= self.total_cells() {
            return Err(GameError::InvalidConfig);
        }
        Ok(self)
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.size.0, self.size.1)
    }
}

/// Mine placement for one game plus the adjacency cache derived from it.
/// Built once at game start and immutable afterwards.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Minefield {
    mine_mask: Array2<bool>,
    adjacency: Array2<u8>,
    mine_count: CellCount,
}

impl Minefield {
    pub fn from_mine_mask(mine_mask: Array2<bool>) -> Self {
        let mine_count = mine_mask
            .iter()
            .filter(|&&is_mine| is_mine)
            .count()
            .try_into()
            .unwrap();
        let adjacency = derive_adjacency(&mine_mask);
        Self {
            mine_mask,
            adjacency,
            mine_count,
        }
    }

    /// Deterministic layout from explicit mine positions, mainly for tests
    /// and replayed games.
    pub fn from_mine_coords(size: Coord2, mine_coords: &[Coord2]) -> Result<Self> {
        let mut mine_mask: Array2<bool> = Array2::default(size.to_nd_index());

        for &coords in mine_coords {
            if coords.0 >= size.0 || coords.1 >= size.1 {
                return Err(GameError::OutOfBounds);
            }
            mine_mask[coords.to_nd_index()] = true;
        }

        Ok(Self::from_mine_mask(mine_mask))
    }

    pub fn game_config(&self) -> GameConfig {
        GameConfig {
            size: self.size(),
            mines: self.mine_count,
        }
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        let (height, width) = self.size();
        if coords.0 < height && coords.1 < width {
            Ok(coords)
        } else {
            Err(GameError::OutOfBounds)
        }
    }

    pub fn size(&self) -> Coord2 {
        let dim = self.mine_mask.dim();
        (dim.0.try_into().unwrap(), dim.1.try_into().unwrap())
    }

    pub fn total_cells(&self) -> CellCount {
        self.mine_mask.len().try_into().unwrap()
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn safe_cell_count(&self) -> CellCount {
        self.total_cells() - self.mine_count
    }

    pub fn contains_mine(&self, coords: Coord2) -> bool {
        self[coords]
    }

    pub fn adjacent_mine_count(&self, coords: Coord2) -> u8 {
        self.adjacency[coords.to_nd_index()]
    }

    pub(crate) fn neighbors(&self, coords: Coord2) -> NeighborIter {
        self.mine_mask.neighbors(coords)
    }
}

impl Index<Coord2> for Minefield {
    type Output = bool;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.mine_mask[coords.to_nd_index()]
    }
}

/// For every mine, bump the count of each in-bounds neighbor.
fn derive_adjacency(mine_mask: &Array2<bool>) -> Array2<u8> {
    let mut adjacency = Array2::default(mine_mask.raw_dim());

    for ((row, col), &is_mine) in mine_mask.indexed_iter() {
        if !is_mine {
            continue;
        }
        let coords = (row as Coord, col as Coord);
        for pos in mine_mask.neighbors(coords) {
            adjacency[pos.to_nd_index()] += 1;
        }
    }

    adjacency
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    #[test]
    fn config_rejects_degenerate_shapes() {
        assert_eq!(
            GameConfig::new((0, 5), 3).validate(),
            Err(GameError::InvalidConfig)
        );
        assert_eq!(
            GameConfig::new((5, 0), 3).validate(),
            Err(GameError::InvalidConfig)
        );
        assert_eq!(
            GameConfig::new((5, 5), 0).validate(),
            Err(GameError::InvalidConfig)
        );
        assert_eq!(
            GameConfig::new((5, 5), 25).validate(),
            Err(GameError::InvalidConfig)
        );
        assert!(GameConfig::new((5, 5), 24).validate().is_ok());
    }

    #[test]
    fn from_mine_coords_rejects_out_of_bounds() {
        assert_eq!(
            Minefield::from_mine_coords((3, 3), &[(3, 0)]),
            Err(GameError::OutOfBounds)
        );
    }

    #[test]
    fn duplicate_mine_coords_collapse_to_one_mine() {
        let minefield = Minefield::from_mine_coords((3, 3), &[(1, 1), (1, 1)]).unwrap();
        assert_eq!(minefield.mine_count(), 1);
    }

    #[test]
    fn adjacency_matches_brute_force_count() {
        let mines = [(0, 0), (1, 2), (3, 3), (4, 0)];
        let minefield = Minefield::from_mine_coords((5, 4), &mines).unwrap();

        for row in 0..5 {
            for col in 0..4 {
                let expected: Vec<Coord2> = minefield
                    .neighbors((row, col))
                    .filter(|&pos| minefield.contains_mine(pos))
                    .collect();
                assert_eq!(
                    minefield.adjacent_mine_count((row, col)),
                    expected.len() as u8,
                    "mismatch at ({row}, {col})"
                );
            }
        }
    }

    #[test]
    fn adjacency_ignores_reveal_state() {
        let minefield = Minefield::from_mine_coords((2, 1), &[(0, 0)]).unwrap();
        assert_eq!(minefield.adjacent_mine_count((1, 0)), 1);
        assert_eq!(minefield.safe_cell_count(), 1);
    }
}
