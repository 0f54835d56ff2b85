use alloc::collections::{BTreeSet, VecDeque};
use alloc::vec::Vec;
use ndarray::Array2;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    InProgress,
    Won,
    Lost,
}

impl GameStatus {
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

impl Default for GameStatus {
    fn default() -> Self {
        Self::InProgress
    }
}

/// One game in flight: the fixed minefield plus all mutable player state.
/// Created fresh per game and replaced wholesale, never reset in place.
///
/// Terminal states are absorbing: once `status` leaves `InProgress`, every
/// mutating operation becomes a no-op with an empty change-set. Queries stay
/// legal, so callers may keep issuing speculative calls without pre-checks.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Board {
    minefield: Minefield,
    cells: Array2<CellState>,
    revealed_count: CellCount,
    flagged_count: CellCount,
    status: GameStatus,
    exploded: Option<Coord2>,
}

impl Board {
    pub fn new(minefield: Minefield) -> Self {
        let size = minefield.size();
        Self {
            minefield,
            cells: Array2::default(size.to_nd_index()),
            revealed_count: 0,
            flagged_count: 0,
            status: GameStatus::default(),
            exploded: None,
        }
    }

    /// Fresh board with a random uniform mine layout.
    pub fn new_game(config: GameConfig, seed: u64) -> Result<Self> {
        RandomGenerator::new(seed).generate(config).map(Self::new)
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_finished(&self) -> bool {
        self.status.is_finished()
    }

    /// Dimensions as `(height, width)`.
    pub fn size(&self) -> Coord2 {
        self.minefield.size()
    }

    pub fn total_mines(&self) -> CellCount {
        self.minefield.mine_count()
    }

    /// Mine count minus placed flags; negative when the player over-flags.
    pub fn mines_left(&self) -> i64 {
        i64::from(self.minefield.mine_count()) - i64::from(self.flagged_count)
    }

    pub fn revealed_count(&self) -> CellCount {
        self.revealed_count
    }

    pub fn flagged_count(&self) -> CellCount {
        self.flagged_count
    }

    pub fn cell_at(&self, coords: Coord2) -> CellState {
        self.cells[coords.to_nd_index()]
    }

    /// The mine that ended the game, if it ended in a loss.
    pub fn exploded_cell(&self) -> Option<Coord2> {
        self.exploded
    }

    /// Flagged cells that turn out not to be mines, for end-of-game "wrong
    /// flag" marking. Empty unless the game was lost.
    pub fn wrongly_flagged_cells(&self) -> Vec<Coord2> {
        if self.status != GameStatus::Lost {
            return Vec::new();
        }

        self.cells
            .indexed_iter()
            .filter(|(_, cell)| cell.is_flagged())
            .map(|((row, col), _)| (row as Coord, col as Coord))
            .filter(|&coords| !self.minefield.contains_mine(coords))
            .collect()
    }

    /// Opens a hidden cell. A flag protects its cell from a direct reveal;
    /// revealed cells, flagged cells, and finished games are no-ops.
    pub fn reveal(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        let coords = self.minefield.validate_coords(coords)?;
        let mut outcome = RevealOutcome::unchanged(self.status);

        if self.status == GameStatus::InProgress && self.cell_at(coords).is_hidden() {
            self.reveal_cell(coords, &mut outcome.changed);
            outcome.status = self.status;
        }

        Ok(outcome)
    }

    /// Hidden <-> Flagged. Never touches revealed cells, the revealed count,
    /// or the game status.
    pub fn toggle_flag(&mut self, coords: Coord2) -> Result<FlagOutcome> {
        use CellState::*;

        let coords = self.minefield.validate_coords(coords)?;

        if self.status == GameStatus::InProgress {
            match self.cell_at(coords) {
                Hidden => {
                    self.cells[coords.to_nd_index()] = Flagged;
                    self.flagged_count += 1;
                }
                Flagged => {
                    self.cells[coords.to_nd_index()] = Hidden;
                    self.flagged_count -= 1;
                }
                Revealed(_) => {}
            }
        }

        Ok(FlagOutcome {
            coords,
            state: self.cell_at(coords),
            flagged_count: self.flagged_count,
        })
    }

    /// Quick-open on a revealed cell: when the player has placed at least one
    /// flag around it and the flag count equals the cell's true mine-neighbor
    /// count, every hidden neighbor is opened as if revealed directly. Flags
    /// are trusted, not checked, so a misplaced flag can expose a mine and
    /// lose the game. Any mismatch is a no-op.
    pub fn chord_reveal(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        let coords = self.minefield.validate_coords(coords)?;
        let mut outcome = RevealOutcome::unchanged(self.status);

        if self.status != GameStatus::InProgress {
            return Ok(outcome);
        }
        let CellState::Revealed(mine_neighbors) = self.cell_at(coords) else {
            return Ok(outcome);
        };
        let flagged = self.count_flagged_neighbors(coords);
        if flagged == 0 || flagged != mine_neighbors {
            return Ok(outcome);
        }

        let hidden: SmallVec<[Coord2; 8]> = self
            .minefield
            .neighbors(coords)
            .filter(|&pos| self.cell_at(pos).is_hidden())
            .collect();

        for pos in hidden {
            // an exploded neighbor ends the game mid-chord
            if self.status != GameStatus::InProgress {
                break;
            }
            // a cascade from an earlier neighbor may have opened this one
            if self.cell_at(pos).is_hidden() {
                self.reveal_cell(pos, &mut outcome.changed);
            }
        }

        outcome.status = self.status;
        Ok(outcome)
    }

    /// Reveal of one hidden, in-bounds cell, cascading through the connected
    /// zero-adjacency region with an explicit work-list. The nonzero border
    /// of the region is opened but does not propagate; flagged cells block
    /// the cascade.
    fn reveal_cell(&mut self, coords: Coord2, changed: &mut ChangeSet) {
        if self.minefield.contains_mine(coords) {
            self.exploded = Some(coords);
            self.status = GameStatus::Lost;
            changed.push(ChangedCell {
                coords,
                change: CellChange::Exploded,
            });
            return;
        }

        let adjacent_mines = self.minefield.adjacent_mine_count(coords);
        self.open_cell(coords, adjacent_mines, changed);

        if adjacent_mines == 0 {
            let mut visited = BTreeSet::from([coords]);
            let mut pending: VecDeque<Coord2> = self
                .minefield
                .neighbors(coords)
                .filter(|&pos| self.cell_at(pos).is_hidden())
                .collect();

            while let Some(pos) = pending.pop_front() {
                if !visited.insert(pos) {
                    continue;
                }
                if !self.cell_at(pos).is_hidden() {
                    continue;
                }

                let count = self.minefield.adjacent_mine_count(pos);
                self.open_cell(pos, count, changed);

                if count == 0 {
                    pending.extend(
                        self.minefield
                            .neighbors(pos)
                            .filter(|&next| self.cell_at(next).is_hidden())
                            .filter(|next| !visited.contains(next)),
                    );
                }
            }
        }

        if self.revealed_count == self.minefield.safe_cell_count() {
            self.status = GameStatus::Won;
        }
    }

    fn open_cell(&mut self, coords: Coord2, adjacent_mines: u8, changed: &mut ChangeSet) {
        self.cells[coords.to_nd_index()] = CellState::Revealed(adjacent_mines);
        self.revealed_count += 1;
        changed.push(ChangedCell {
            coords,
            change: CellChange::Revealed(adjacent_mines),
        });
    }

    fn count_flagged_neighbors(&self, coords: Coord2) -> u8 {
        self.cells
            .neighbors(coords)
            .filter(|&pos| self.cell_at(pos).is_flagged())
            .count() as u8
    }
}
