use ansi_term::{Colour, Style};
use chrono::{Datelike, NaiveDate};

use crate::{
    character::state::CharacterState,
    github::calendar::ContributionCalendar,
    utils::{percentage::span_percentage, time::format_calendar_date},
};

const WEEKDAY_LABELS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

const PROGRESS_BAR_CELLS: usize = 10;

/// One-line view of the companion, used after sync and on every watch refresh.
pub fn state_summary(state: &CharacterState) -> String {
    format!(
        "{} {} · {} contributions · streak {} (best {})",
        state.stage.glyph(),
        state.stage.colour().bold().paint(state.stage.name()),
        state.total_contributions,
        state.current_streak,
        state.max_streak
    )
}

/// Full status card: stage, counters, growth progress and decay warnings.
pub fn state_details(state: &CharacterState, inactivity_threshold_days: i64) -> String {
    let mut lines = vec![
        format!(
            "{} {}",
            state.stage.glyph(),
            state.stage.colour().bold().paint(state.stage.name())
        ),
        format!("Contributions   {}", state.total_contributions),
        format!(
            "Streak          {} days (best {})",
            state.current_streak, state.max_streak
        ),
    ];

    match state.last_activity_date {
        Some(date) => lines.push(format!(
            "Last activity   {} ({} days ago)",
            format_calendar_date(date),
            state.days_since_last_activity
        )),
        None => lines.push("Last activity   never".to_string()),
    }

    match state.stage.next() {
        Some(next) => {
            let progress = span_percentage(
                state.total_contributions,
                state.stage.required_total(),
                next.required_total(),
            );
            lines.push(format!(
                "Growth          {} {}% to {} ({})",
                progress_bar(*progress),
                *progress as i32,
                next.name(),
                next.required_total()
            ));
        }
        None => lines.push("Growth          fully grown".to_string()),
    }

    if state.last_activity_date.is_some() {
        let idle = state.days_since_last_activity;
        if idle >= inactivity_threshold_days {
            lines.push(
                Colour::Red
                    .paint(format!("No contributions for {idle} days, stage is decaying!"))
                    .to_string(),
            );
        } else if idle >= inactivity_threshold_days - 2 && idle > 0 {
            lines.push(
                Colour::Red
                    .paint(format!(
                        "Stage drops in {} days without a contribution!",
                        inactivity_threshold_days - idle
                    ))
                    .to_string(),
            );
        }
    }

    lines.join("\n")
}

fn progress_bar(percentage: f64) -> String {
    let filled = ((percentage / 100.) * PROGRESS_BAR_CELLS as f64).round() as usize;
    let filled = filled.min(PROGRESS_BAR_CELLS);
    format!(
        "[{}{}]",
        Colour::Green.paint("█".repeat(filled)),
        "░".repeat(PROGRESS_BAR_CELLS - filled)
    )
}

/// Maps a day count to the green intensity ramp used for calendar cells.
pub fn intensity_style(count: u32) -> Style {
    let colour = match count {
        0 => Colour::Fixed(238),
        1..=3 => Colour::Fixed(22),
        4..=6 => Colour::Fixed(28),
        7..=9 => Colour::Fixed(34),
        10..=19 => Colour::Fixed(40),
        _ => Colour::Fixed(46),
    };
    colour.normal()
}

/// Renders weeks as columns and weekdays as rows, one coloured cell per day inside the range.
pub fn calendar_grid(calendar: &ContributionCalendar, start: NaiveDate, end: NaiveDate) -> String {
    let mut columns: Vec<[Option<u32>; 7]> = vec![];
    for week in &calendar.weeks {
        let mut column = [None; 7];
        let mut occupied = false;
        for day in &week.contribution_days {
            let Some(date) = day.parsed_date() else {
                continue;
            };
            if date < start || date > end {
                continue;
            }
            column[date.weekday().num_days_from_sunday() as usize] = Some(day.contribution_count);
            occupied = true;
        }
        if occupied {
            columns.push(column);
        }
    }

    let mut grid = String::new();
    for (row, label) in WEEKDAY_LABELS.iter().enumerate() {
        grid.push_str(label);
        grid.push(' ');
        for column in &columns {
            match column[row] {
                Some(count) => grid.push_str(&intensity_style(count).paint("■ ").to_string()),
                None => grid.push_str("  "),
            }
        }
        grid.push('\n');
    }
    grid
}

/// Contribution count over the rendered range.
pub fn range_summary(calendar: &ContributionCalendar, start: NaiveDate, end: NaiveDate) -> String {
    let total: u32 = calendar
        .days()
        .filter_map(|day| day.parsed_date().map(|date| (date, day.contribution_count)))
        .filter(|(date, _)| *date >= start && *date <= end)
        .map(|(_, count)| count)
        .sum();
    format!(
        "{total} contributions between {} and {}",
        format_calendar_date(start),
        format_calendar_date(end)
    )
}
