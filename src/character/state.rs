use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::stage::GrowthStage;

/// Days-without-activity value recorded when the account has never contributed at all.
pub const DAYS_NEVER_ACTIVE: i64 = 999;

/// The companion's complete condition. Rebuilt from scratch whenever a fresh calendar arrives
/// and persisted as one flat record, stage stored by ordinal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterState {
    #[serde(with = "stage_ordinal")]
    pub stage: GrowthStage,
    pub total_contributions: u32,
    pub current_streak: u32,
    pub max_streak: u32,
    pub last_activity_date: Option<NaiveDate>,
    pub days_since_last_activity: i64,
}

impl Default for CharacterState {
    fn default() -> Self {
        Self {
            stage: GrowthStage::Egg,
            total_contributions: 0,
            current_streak: 0,
            max_streak: 0,
            last_activity_date: None,
            days_since_last_activity: DAYS_NEVER_ACTIVE,
        }
    }
}

mod stage_ordinal {
    use serde::{self, Deserialize, Deserializer, Serializer};

    use crate::character::stage::GrowthStage;

    pub fn serialize<S>(stage: &GrowthStage, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u8(stage.ordinal())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<GrowthStage, D::Error>
    where
        D: Deserializer<'de>,
    {
        // An ordinal outside the known range loads as a fresh egg rather than an error.
        let ordinal = u8::deserialize(deserializer)?;
        Ok(GrowthStage::from_ordinal(ordinal).unwrap_or_default())
    }
}
