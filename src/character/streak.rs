use chrono::NaiveDate;

/// Result of one streak walk over a set of active days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StreakSummary {
    /// Length of the run ending at the most recent active day, but only while that run is
    /// still alive: the most recent day has to be today or yesterday, otherwise it lapsed
    /// and the current streak is 0.
    pub current: u32,
    /// Longest run of consecutive days anywhere in the set.
    pub max: u32,
}

/// Computes current and max consecutive-day streaks. Input order doesn't matter; same-day
/// duplicates are collapsed before the walk.
pub fn compute_streaks(dates: &[NaiveDate], today: NaiveDate) -> StreakSummary {
    let mut sorted = dates.to_vec();
    sorted.sort_unstable();
    sorted.dedup();

    let Some((&first, rest)) = sorted.split_first() else {
        return StreakSummary::default();
    };

    let mut run = 1u32;
    let mut max = 1u32;
    let mut previous = first;
    for &date in rest {
        if (date - previous).num_days() == 1 {
            run += 1;
            max = max.max(run);
        } else {
            // A gap wider than a day breaks the run. Gaps of 0 can't occur after dedup.
            run = 1;
        }
        previous = date;
    }

    let current = match (today - previous).num_days() {
        0 | 1 => run,
        _ => 0,
    };

    StreakSummary { current, max }
}
