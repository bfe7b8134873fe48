//! The companion itself: streak arithmetic, growth stages and the tracker that keeps the
//! persisted state in sync with fetched contribution activity.

pub mod stage;
pub mod state;
pub mod streak;

use anyhow::Result;
use tracing::{debug, warn};

use crate::{
    github::calendar::ContributionCalendar,
    storage::state_store::StateStore,
    utils::{clock::Clock, time::days_between},
};

use self::{
    stage::resolve_stage,
    state::{CharacterState, DAYS_NEVER_ACTIVE},
    streak::compute_streaks,
};

/// Owns the companion state for the lifetime of the process. There is exactly one logical
/// owner per state file; a concurrent writer would simply lose with last-write-wins.
pub struct CharacterTracker<S: StateStore> {
    store: S,
    clock: Box<dyn Clock>,
    inactivity_threshold_days: i64,
    state: CharacterState,
}

impl<S: StateStore> CharacterTracker<S> {
    /// Loads the persisted companion, falling back to a fresh egg when nothing was saved yet.
    pub async fn load(
        store: S,
        clock: Box<dyn Clock>,
        inactivity_threshold_days: i64,
    ) -> Result<Self> {
        let state = store.load().await?.unwrap_or_default();
        debug!("Loaded companion state {:?}", state);
        Ok(Self {
            store,
            clock,
            inactivity_threshold_days,
            state,
        })
    }

    pub fn current_state(&self) -> &CharacterState {
        &self.state
    }

    /// Rebuilds the whole state from a fresh calendar and persists the result.
    ///
    /// The resolver may only raise the stage above what was persisted; inactivity decay runs
    /// after it and subtracts at most one stage per recomputation. Rebuilding the candidate
    /// from the total on every cycle keeps this idempotent at a fixed point in time: the
    /// stage settles one below the resolved stage instead of sliding to the bottom.
    pub async fn recompute(&mut self, calendar: &ContributionCalendar) -> Result<CharacterState> {
        let today = self.clock.today();
        let total = calendar.counted_total();
        let active_dates = calendar.active_dates();
        let streaks = compute_streaks(&active_dates, today);

        let last_activity = active_dates
            .iter()
            .max()
            .copied()
            .or(self.state.last_activity_date);
        let days_since = last_activity
            .map(|date| days_between(date, today))
            .unwrap_or(DAYS_NEVER_ACTIVE);

        let grown = resolve_stage(total).max(self.state.stage);
        let stage = if days_since >= self.inactivity_threshold_days {
            grown.demoted()
        } else {
            grown
        };

        self.state = CharacterState {
            stage,
            total_contributions: total,
            current_streak: streaks.current,
            max_streak: streaks.max,
            last_activity_date: last_activity,
            days_since_last_activity: days_since,
        };
        debug!("Recomputed companion state {:?}", self.state);

        if let Err(e) = self.store.save(&self.state).await {
            // The in-memory state stays authoritative for the rest of the process.
            warn!("Couldn't persist companion state: {e:?}");
        }

        Ok(self.state.clone())
    }
}

#[cfg(test)]
mod tests {
    use anyhow::{anyhow, Result};
    use async_trait::async_trait;
    use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
    use tokio::time::Instant;

    use crate::{
        character::{
            stage::GrowthStage,
            state::{CharacterState, DAYS_NEVER_ACTIVE},
        },
        github::calendar::test_support::calendar_of,
        storage::state_store::MockStateStore,
        utils::clock::Clock,
    };

    use super::CharacterTracker;

    const TEST_NOW: NaiveDateTime = NaiveDateTime::new(
        match NaiveDate::from_ymd_opt(2024, 1, 3) {
            Some(v) => v,
            None => panic!(),
        },
        NaiveTime::MIN,
    );

    struct FixedClock(DateTime<Utc>);

    #[async_trait]
    impl Clock for FixedClock {
        fn time(&self) -> DateTime<Utc> {
            self.0
        }

        fn instant(&self) -> Instant {
            Instant::now()
        }

        async fn sleep_until(&self, instant: tokio::time::Instant) {
            tokio::time::sleep_until(instant).await;
        }
    }

    fn test_clock() -> Box<FixedClock> {
        Box::new(FixedClock(Utc.from_utc_datetime(&TEST_NOW)))
    }

    fn accepting_store(initial: Option<CharacterState>) -> MockStateStore {
        let mut store = MockStateStore::new();
        store.expect_load().return_once(move || Ok(initial));
        store.expect_save().returning(|_| Ok(()));
        store
    }

    async fn tracker_with(
        initial: Option<CharacterState>,
    ) -> Result<CharacterTracker<MockStateStore>> {
        CharacterTracker::load(accepting_store(initial), test_clock(), 7).await
    }

    #[tokio::test]
    async fn fresh_tracker_starts_as_egg() -> Result<()> {
        let tracker = tracker_with(None).await?;
        assert_eq!(tracker.current_state(), &CharacterState::default());
        Ok(())
    }

    #[tokio::test]
    async fn recompute_counts_streaks_and_totals() -> Result<()> {
        let mut tracker = tracker_with(None).await?;
        let calendar = calendar_of(&[
            ("2024-01-01", 1),
            ("2024-01-02", 1),
            ("2024-01-03", 1),
        ]);

        let state = tracker.recompute(&calendar).await?;

        assert_eq!(state.total_contributions, 3);
        assert_eq!(state.current_streak, 3);
        assert_eq!(state.max_streak, 3);
        assert_eq!(state.last_activity_date, NaiveDate::from_ymd_opt(2024, 1, 3));
        assert_eq!(state.days_since_last_activity, 0);
        assert_eq!(state.stage, GrowthStage::Egg);
        Ok(())
    }

    #[tokio::test]
    async fn recompute_is_idempotent_under_a_frozen_clock() -> Result<()> {
        let mut tracker = tracker_with(None).await?;
        let calendar = calendar_of(&[("2024-01-02", 30), ("2024-01-03", 30)]);

        let first = tracker.recompute(&calendar).await?;
        let second = tracker.recompute(&calendar).await?;

        assert_eq!(first, second);
        assert_eq!(first.stage, GrowthStage::Chick);
        Ok(())
    }

    #[tokio::test]
    async fn empty_calendar_leaves_a_never_active_egg() -> Result<()> {
        let mut tracker = tracker_with(None).await?;
        let state = tracker.recompute(&calendar_of(&[])).await?;

        assert_eq!(state.stage, GrowthStage::Egg);
        assert_eq!(state.days_since_last_activity, DAYS_NEVER_ACTIVE);
        assert_eq!(state.last_activity_date, None);
        Ok(())
    }

    #[tokio::test]
    async fn inactivity_at_threshold_demotes_exactly_one_stage() -> Result<()> {
        // 150 contributions a week ago resolve to Fledgling; seven idle days pull it back one.
        let mut tracker = tracker_with(None).await?;
        let calendar = calendar_of(&[("2023-12-27", 150)]);

        let state = tracker.recompute(&calendar).await?;

        assert_eq!(state.days_since_last_activity, 7);
        assert_eq!(state.stage, GrowthStage::Chick);
        assert_eq!(
            state.stage.ordinal(),
            GrowthStage::Fledgling.ordinal() - 1
        );
        Ok(())
    }

    #[tokio::test]
    async fn decay_does_not_slide_below_one_under_the_resolved_stage() -> Result<()> {
        let mut tracker = tracker_with(None).await?;
        let calendar = calendar_of(&[("2023-12-20", 150)]);

        let first = tracker.recompute(&calendar).await?;
        let second = tracker.recompute(&calendar).await?;

        assert_eq!(first.stage, GrowthStage::Chick);
        assert_eq!(second.stage, GrowthStage::Chick);
        Ok(())
    }

    #[tokio::test]
    async fn shrinking_total_never_demotes_by_itself() -> Result<()> {
        // The rolling calendar window can lose old days; stage only ever falls via decay.
        let persisted = CharacterState {
            stage: GrowthStage::Adult,
            total_contributions: 250,
            current_streak: 0,
            max_streak: 12,
            last_activity_date: NaiveDate::from_ymd_opt(2024, 1, 2),
            days_since_last_activity: 1,
        };
        let mut tracker = tracker_with(Some(persisted)).await?;
        let calendar = calendar_of(&[("2024-01-03", 4)]);

        let state = tracker.recompute(&calendar).await?;

        assert_eq!(state.total_contributions, 4);
        assert_eq!(state.stage, GrowthStage::Adult);
        Ok(())
    }

    #[tokio::test]
    async fn failed_save_keeps_the_recomputed_state_in_memory() -> Result<()> {
        let mut store = MockStateStore::new();
        store.expect_load().return_once(|| Ok(None));
        store
            .expect_save()
            .returning(|_| Err(anyhow!("disk went away")));

        let mut tracker = CharacterTracker::load(store, test_clock(), 7).await?;
        let state = tracker.recompute(&calendar_of(&[("2024-01-03", 2)])).await?;

        assert_eq!(state.total_contributions, 2);
        assert_eq!(tracker.current_state(), &state);
        Ok(())
    }

    #[tokio::test]
    async fn persisted_last_activity_survives_an_empty_window() -> Result<()> {
        let persisted = CharacterState {
            stage: GrowthStage::Hatchling,
            total_contributions: 12,
            current_streak: 0,
            max_streak: 3,
            last_activity_date: NaiveDate::from_ymd_opt(2023, 12, 30),
            days_since_last_activity: 2,
        };
        let mut tracker = tracker_with(Some(persisted)).await?;

        let state = tracker.recompute(&calendar_of(&[])).await?;

        assert_eq!(state.last_activity_date, NaiveDate::from_ymd_opt(2023, 12, 30));
        assert_eq!(state.days_since_last_activity, 4);
        Ok(())
    }
}
