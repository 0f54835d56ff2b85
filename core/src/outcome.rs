use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::*;

/// What happened to one cell during a reveal or chord.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellChange {
    /// The cell was opened; carries its adjacent-mine count.
    Revealed(u8),
    /// The cell was a mine and ended the game.
    Exploded,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangedCell {
    pub coords: Coord2,
    pub change: CellChange,
}

/// Inline capacity covers a full chord without a cascade.
pub type ChangeSet = SmallVec<[ChangedCell; 8]>;

/// Result of `reveal` or `chord_reveal`: exactly the cells that changed
/// state during the call, so a caller can repaint only those.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RevealOutcome {
    pub changed: ChangeSet,
    pub status: GameStatus,
}

impl RevealOutcome {
    pub(crate) fn unchanged(status: GameStatus) -> Self {
        Self {
            changed: ChangeSet::new(),
            status,
        }
    }

    pub fn has_update(&self) -> bool {
        !self.changed.is_empty()
    }
}

/// Result of `toggle_flag`: the cell's state after the call plus the
/// running flag count. A no-op returns the state unchanged.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlagOutcome {
    pub coords: Coord2,
    pub state: CellState,
    pub flagged_count: CellCount,
}
