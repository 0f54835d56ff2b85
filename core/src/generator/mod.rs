use crate::*;
pub use random::*;

mod random;

/// Seam for mine-placement strategies; tests inject fixed layouts through
/// `Minefield::from_mine_coords` instead.
pub trait MinefieldGenerator {
    fn generate(self, config: GameConfig) -> Result<Minefield>;
}
