use ansi_term::Colour;

/// Discrete growth tiers for the companion. Ordered by the cumulative contribution total
/// needed to reach them; thresholds strictly increase with the ordinal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum GrowthStage {
    #[default]
    Egg,
    Hatchling,
    Chick,
    Fledgling,
    Adult,
    Elder,
}

impl GrowthStage {
    pub const ALL: [GrowthStage; 6] = [
        GrowthStage::Egg,
        GrowthStage::Hatchling,
        GrowthStage::Chick,
        GrowthStage::Fledgling,
        GrowthStage::Adult,
        GrowthStage::Elder,
    ];

    pub fn ordinal(self) -> u8 {
        self as u8
    }

    pub fn from_ordinal(value: u8) -> Option<GrowthStage> {
        Self::ALL.get(value as usize).copied()
    }

    /// Cumulative contribution total needed to qualify for this stage.
    pub fn required_total(self) -> u32 {
        match self {
            GrowthStage::Egg => 0,
            GrowthStage::Hatchling => 10,
            GrowthStage::Chick => 50,
            GrowthStage::Fledgling => 100,
            GrowthStage::Adult => 200,
            GrowthStage::Elder => 500,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            GrowthStage::Egg => "Egg",
            GrowthStage::Hatchling => "Hatchling",
            GrowthStage::Chick => "Chick",
            GrowthStage::Fledgling => "Fledgling",
            GrowthStage::Adult => "Adult",
            GrowthStage::Elder => "Elder",
        }
    }

    pub fn glyph(self) -> &'static str {
        match self {
            GrowthStage::Egg => "🥚",
            GrowthStage::Hatchling => "🐣",
            GrowthStage::Chick => "🐤",
            GrowthStage::Fledgling => "🐔",
            GrowthStage::Adult => "🦅",
            GrowthStage::Elder => "🦉",
        }
    }

    pub fn colour(self) -> Colour {
        match self {
            GrowthStage::Egg => Colour::Fixed(245),
            GrowthStage::Hatchling => Colour::Yellow,
            GrowthStage::Chick => Colour::Fixed(220),
            GrowthStage::Fledgling => Colour::Fixed(130),
            GrowthStage::Adult => Colour::Blue,
            GrowthStage::Elder => Colour::Purple,
        }
    }

    /// One stage down, floored at [GrowthStage::Egg].
    pub fn demoted(self) -> GrowthStage {
        Self::from_ordinal(self.ordinal().saturating_sub(1)).unwrap_or_default()
    }

    /// The stage after this one, [None] at the top.
    pub fn next(self) -> Option<GrowthStage> {
        Self::from_ordinal(self.ordinal() + 1)
    }
}

/// The highest stage whose threshold is covered by `total`. Never used to demote on its own;
/// losing a stage is the decay rule's job.
pub fn resolve_stage(total: u32) -> GrowthStage {
    GrowthStage::ALL
        .iter()
        .rev()
        .copied()
        .find(|stage| total >= stage.required_total())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::{resolve_stage, GrowthStage};

    #[test]
    fn thresholds_strictly_increase() {
        for pair in GrowthStage::ALL.windows(2) {
            assert!(pair[0].required_total() < pair[1].required_total());
        }
    }

    #[test]
    fn total_55_resolves_to_third_stage() {
        let stage = resolve_stage(55);
        assert_eq!(stage, GrowthStage::Chick);
        assert_eq!(stage.ordinal(), 2);
    }

    #[test]
    fn boundary_totals_resolve_to_their_own_stage() {
        for stage in GrowthStage::ALL {
            assert_eq!(resolve_stage(stage.required_total()), stage);
        }
        assert_eq!(resolve_stage(9), GrowthStage::Egg);
        assert_eq!(resolve_stage(499), GrowthStage::Adult);
        assert_eq!(resolve_stage(100_000), GrowthStage::Elder);
    }

    #[test]
    fn resolution_is_monotone_in_total() {
        let mut previous = resolve_stage(0);
        for total in 0..600 {
            let stage = resolve_stage(total);
            assert!(stage >= previous, "stage regressed at total {total}");
            previous = stage;
        }
    }

    #[test]
    fn demotion_steps_down_one_and_floors_at_egg() {
        assert_eq!(GrowthStage::Elder.demoted(), GrowthStage::Adult);
        assert_eq!(GrowthStage::Hatchling.demoted(), GrowthStage::Egg);
        assert_eq!(GrowthStage::Egg.demoted(), GrowthStage::Egg);
    }

    #[test]
    fn ordinals_round_trip() {
        for stage in GrowthStage::ALL {
            assert_eq!(GrowthStage::from_ordinal(stage.ordinal()), Some(stage));
        }
        assert_eq!(GrowthStage::from_ordinal(6), None);
    }
}
