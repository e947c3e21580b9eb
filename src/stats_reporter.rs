// stats_reporter.rs
use crate::trip_stats::{popular_stations, popular_times, trip_duration, user_info, ValueCounts};
use crate::trip_table::TripTable;
use crate::user_interaction::{BOLD, GREEN, RED, RESET};
use log::warn;
use std::fmt::Write;

fn red_header(out: &mut String, title: &str) {
    let _ = writeln!(out, "\n{}{}{}{}", BOLD, RED, title, RESET);
}

fn section_header(out: &mut String, title: &str) {
    let _ = writeln!(out, "\n{}{}{}:{}", BOLD, GREEN, title, RESET);
}

fn not_available(out: &mut String, section: &str, err: &dyn std::fmt::Display) {
    warn!("Computing {} failed: {}", section, err);
    let _ = writeln!(out, "Not available: {}", err);
}

/// Whole seconds print without a fractional part.
pub fn format_seconds(seconds: f64) -> String {
    if seconds.fract() == 0.0 {
        format!("{:.0}", seconds)
    } else {
        format!("{:.3}", seconds)
    }
}

/// "3d 4h 5m 6s", dropping leading zero units.
pub fn humanize_seconds(seconds: f64) -> String {
    let total = seconds.round().max(0.0) as u64;
    let (days, rest) = (total / 86_400, total % 86_400);
    let (hours, rest) = (rest / 3_600, rest % 3_600);
    let (minutes, secs) = (rest / 60, rest % 60);

    if days > 0 {
        format!("{}d {}h {}m {}s", days, hours, minutes, secs)
    } else if hours > 0 {
        format!("{}h {}m {}s", hours, minutes, secs)
    } else if minutes > 0 {
        format!("{}m {}s", minutes, secs)
    } else {
        format!("{}s", secs)
    }
}

fn write_counts(out: &mut String, counts: &ValueCounts) {
    if counts.is_empty() {
        let _ = writeln!(out, "  (none recorded)");
        return;
    }
    let width = counts.0.iter().map(|(v, _)| v.len()).max().unwrap_or(0);
    for (value, count) in &counts.0 {
        let _ = writeln!(out, "  {:<width$}  {}", value, count, width = width);
    }
}

/// Runs all four statistic groups against the table, in report order, and renders them.
pub fn render_report(table: &TripTable) -> String {
    let mut out = String::new();

    red_header(&mut out, "Statistics Computed");
    red_header(&mut out, &format!("This is the information of {}:", table.city));

    section_header(&mut out, "Popular Times of Travel");
    match popular_times(table) {
        Ok(times) => {
            let _ = writeln!(out, "Most common month: {} ({})", times.month, times.month_name());
            let _ = writeln!(
                out,
                "Most common day of week: {} ({})",
                times.day_of_week,
                times.day_name()
            );
            let _ = writeln!(out, "Most common hour of day: {}", times.hour);
        }
        Err(e) => not_available(&mut out, "popular times", &e),
    }

    section_header(&mut out, "Popular Stations and Trips");
    match popular_stations(table) {
        Ok(stations) => {
            let _ = writeln!(out, "Most common start station: {}", stations.start_station);
            let _ = writeln!(out, "Most common end station: {}", stations.end_station);
            let _ = writeln!(out, "Most common trip from start to end: {}", stations.trip);
        }
        Err(e) => not_available(&mut out, "popular stations", &e),
    }

    section_header(&mut out, "Trip Duration");
    match trip_duration(table) {
        Ok(duration) => {
            let _ = writeln!(
                out,
                "Total travel time: {} ({})",
                format_seconds(duration.total),
                humanize_seconds(duration.total)
            );
            let _ = writeln!(
                out,
                "Average travel time: {} ({})",
                format_seconds(duration.mean),
                humanize_seconds(duration.mean)
            );
        }
        Err(e) => not_available(&mut out, "trip duration", &e),
    }

    section_header(&mut out, "User Info");
    match user_info(table) {
        Ok(info) => {
            let _ = writeln!(out, "Counts of each user type:");
            write_counts(&mut out, &info.user_types);
            if let Some(genders) = &info.genders {
                let _ = writeln!(out, "Counts of each gender:");
                write_counts(&mut out, genders);
            }
            if let Some(years) = &info.birth_years {
                let _ = writeln!(out, "Earliest birth year: {}", years.earliest);
                let _ = writeln!(out, "Most recent birth year: {}", years.recent);
                let _ = writeln!(out, "Most common birth year: {}", years.common);
            }
        }
        Err(e) => not_available(&mut out, "user info", &e),
    }

    out
}

pub fn display_statistics(table: &TripTable) {
    print!("{}", render_report(table));
}
