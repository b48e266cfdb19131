use crate::*;
pub use random::*;

mod random;

pub trait LayoutGenerator {
    fn generate(self, hazard_count: TileCount) -> Result<HazardLayout>;
}

/// Replays a known layout, mostly useful for tests and for replaying recorded games.
#[derive(Clone, Debug, PartialEq)]
pub struct FixedLayoutGenerator {
    layout: HazardLayout,
}

impl FixedLayoutGenerator {
    pub fn new(layout: HazardLayout) -> Self {
        Self { layout }
    }
}

impl LayoutGenerator for FixedLayoutGenerator {
    fn generate(self, hazard_count: TileCount) -> Result<HazardLayout> {
        validate_hazard_count(hazard_count)?;
        if self.layout.hazard_count() != hazard_count {
            log::warn!(
                "Fixed layout has {} hazards, requested {}",
                self.layout.hazard_count(),
                hazard_count
            );
            return Err(GameError::InvalidLayout);
        }
        Ok(self.layout)
    }
}
