use super::*;

/// Places hazards uniformly at random without replacement, driven by an explicit seed so the same
/// seed always produces the same board.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomLayoutGenerator {
    seed: u64,
}

impl RandomLayoutGenerator {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl LayoutGenerator for RandomLayoutGenerator {
    fn generate(self, hazard_count: TileCount) -> Result<HazardLayout> {
        use rand::prelude::*;

        let hazard_count = validate_hazard_count(hazard_count).inspect_err(|_| {
            log::warn!("Refusing to generate layout with {} hazards", hazard_count);
        })?;

        let mut hazard_mask = [false; GRID_SIZE];
        let mut free_tiles = GRID_SIZE;
        let mut rng = SmallRng::seed_from_u64(self.seed);

        for _ in 0..hazard_count {
            // pick the n-th still free tile, so every draw succeeds
            let mut place = rng.random_range(0..free_tiles);
            for (i, is_hazard) in hazard_mask.iter_mut().enumerate() {
                if *is_hazard {
                    place += 1;
                }
                if i == place {
                    *is_hazard = true;
                    free_tiles -= 1;
                    break;
                }
            }
        }

        log::trace!("generated layout, seed: {}, hazards: {}", self.seed, hazard_count);
        HazardLayout::from_hazard_mask(hazard_mask)
    }
}
