use ndarray::Array2;

use super::*;

/// Uniform mine placement without replacement, seeded by the caller so a
/// layout can be reproduced.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RandomGenerator {
    seed: u64,
}

impl RandomGenerator {
    pub const fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl MinefieldGenerator for RandomGenerator {
    fn generate(self, config: GameConfig) -> Result<Minefield> {
        use rand::prelude::*;

        let config = config.validate()?;
        let mut mine_mask: Array2<bool> = Array2::default(config.size.to_nd_index());
        let mut rng = SmallRng::seed_from_u64(self.seed);

        // Pick the k-th free cell each round. Always terminates and never
        // re-picks an occupied cell, unlike rejection sampling.
        let mut free_cells = config.total_cells();
        {
            let cells = mine_mask.as_slice_mut().expect("fresh array is contiguous");
            for _ in 0..config.mines {
                let mut pick = rng.random_range(0..free_cells);
                for cell in cells.iter_mut() {
                    if *cell {
                        continue;
                    }
                    if pick == 0 {
                        *cell = true;
                        free_cells -= 1;
                        break;
                    }
                    pick -= 1;
                }
            }
        }

        let placed: CellCount = mine_mask
            .iter()
            .filter(|&&is_mine| is_mine)
            .count()
            .try_into()
            .unwrap();
        if placed != config.mines {
            log::warn!("mine placement mismatch, placed {placed}, requested {}", config.mines);
        }

        Ok(Minefield::from_mine_mask(mine_mask))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn places_exactly_the_requested_mines() {
        let config = GameConfig::new((9, 9), 10);
        let minefield = RandomGenerator::new(7).generate(config).unwrap();

        assert_eq!(minefield.mine_count(), 10);
        assert_eq!(minefield.size(), (9, 9));

        let mut seen = 0;
        for row in 0..9 {
            for col in 0..9 {
                if minefield.contains_mine((row, col)) {
                    seen += 1;
                }
            }
        }
        assert_eq!(seen, 10);
    }

    #[test]
    fn same_seed_reproduces_the_layout() {
        let config = GameConfig::new((16, 16), 40);
        let first = RandomGenerator::new(99).generate(config).unwrap();
        let second = RandomGenerator::new(99).generate(config).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn dense_board_leaves_the_single_safe_cell() {
        let config = GameConfig::new((4, 4), 15);
        let minefield = RandomGenerator::new(3).generate(config).unwrap();
        assert_eq!(minefield.safe_cell_count(), 1);
    }

    #[test]
    fn invalid_config_is_rejected() {
        let err = RandomGenerator::new(0)
            .generate(GameConfig::new((4, 4), 16))
            .unwrap_err();
        assert_eq!(err, GameError::InvalidConfig);
    }
}
