// trip_stats.rs
//
// The four statistic groups. Each one reads the table independently and reports
// its own failure, so one bad column never takes the whole report down.

use crate::errors::{BikeshareError, Result};
use crate::trip_table::TripTable;
use chrono::{Datelike, Timelike};
use std::collections::{BTreeMap, HashMap};

/// Most frequent value, skipping nothing but what the caller filtered out.
/// Ties go to the smallest value.
pub fn mode<T, I>(values: I) -> Option<T>
where
    T: Ord,
    I: IntoIterator<Item = T>,
{
    let mut counts: BTreeMap<T, usize> = BTreeMap::new();
    for value in values {
        *counts.entry(value).or_insert(0) += 1;
    }

    let mut best: Option<(T, usize)> = None;
    for (value, count) in counts {
        match best {
            Some((_, best_count)) if best_count >= count => {}
            _ => best = Some((value, count)),
        }
    }
    best.map(|(value, _)| value)
}

/// Distinct values with how often they occur, most frequent first.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ValueCounts(pub Vec<(String, usize)>);

impl ValueCounts {
    /// Ties keep the order in which values were first seen.
    pub fn from_values<'a, I>(values: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut order: Vec<(String, usize)> = Vec::new();
        let mut slots: HashMap<&'a str, usize> = HashMap::new();
        for value in values {
            match slots.get(value) {
                Some(&slot) => order[slot].1 += 1,
                None => {
                    slots.insert(value, order.len());
                    order.push((value.to_string(), 1));
                }
            }
        }
        order.sort_by(|a, b| b.1.cmp(&a.1));
        ValueCounts(order)
    }

    #[cfg(test)]
    pub fn get(&self, value: &str) -> Option<usize> {
        self.0.iter().find(|(v, _)| v == value).map(|(_, c)| *c)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

const WEEKDAY_NAMES: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PopularTimes {
    /// 1 = January.
    pub month: u32,
    /// 0 = Monday.
    pub day_of_week: u32,
    pub hour: u32,
}

impl PopularTimes {
    pub fn month_name(&self) -> &'static str {
        MONTH_NAMES
            .get(self.month.wrapping_sub(1) as usize)
            .copied()
            .unwrap_or("?")
    }

    pub fn day_name(&self) -> &'static str {
        WEEKDAY_NAMES
            .get(self.day_of_week as usize)
            .copied()
            .unwrap_or("?")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PopularStations {
    pub start_station: String,
    pub end_station: String,
    pub trip: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TripDuration {
    /// Seconds, as recorded in the dataset.
    pub total: f64,
    pub mean: f64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BirthYears {
    pub earliest: i64,
    pub recent: i64,
    pub common: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserInfo {
    pub user_types: ValueCounts,
    /// `None` when the dataset has no gender column at all.
    pub genders: Option<ValueCounts>,
    /// `None` when the dataset has no birth year column at all.
    pub birth_years: Option<BirthYears>,
}

pub fn popular_times(table: &TripTable) -> Result<PopularTimes> {
    let starts = || table.records.iter().map(|r| r.start_time);
    let no_data = || BikeshareError::NoData("Start Time".to_string());

    Ok(PopularTimes {
        month: mode(starts().map(|t| t.month())).ok_or_else(no_data)?,
        day_of_week: mode(starts().map(|t| t.weekday().num_days_from_monday()))
            .ok_or_else(no_data)?,
        hour: mode(starts().map(|t| t.hour())).ok_or_else(no_data)?,
    })
}

pub fn popular_stations(table: &TripTable) -> Result<PopularStations> {
    let records = &table.records;
    let start_station = mode(records.iter().filter_map(|r| r.start_station.as_deref()))
        .ok_or_else(|| BikeshareError::NoData("Start Station".to_string()))?;
    let end_station = mode(records.iter().filter_map(|r| r.end_station.as_deref()))
        .ok_or_else(|| BikeshareError::NoData("End Station".to_string()))?;
    let trip = mode(records.iter().filter_map(|r| r.trip_label()))
        .ok_or_else(|| BikeshareError::NoData("Trip".to_string()))?;

    Ok(PopularStations {
        start_station: start_station.to_string(),
        end_station: end_station.to_string(),
        trip,
    })
}

pub fn trip_duration(table: &TripTable) -> Result<TripDuration> {
    let (total, count) = table
        .records
        .iter()
        .filter_map(|r| r.trip_duration)
        .fold((0.0, 0usize), |(sum, n), d| (sum + d, n + 1));

    if count == 0 {
        return Err(BikeshareError::NoData("Trip Duration".to_string()));
    }

    Ok(TripDuration {
        total,
        mean: total / count as f64,
    })
}

pub fn user_info(table: &TripTable) -> Result<UserInfo> {
    let records = &table.records;
    let user_types =
        ValueCounts::from_values(records.iter().filter_map(|r| r.user_type.as_deref()));

    let genders = table.has_gender.then(|| {
        ValueCounts::from_values(records.iter().filter_map(|r| r.gender.as_deref()))
    });

    let birth_years = if table.has_birth_year {
        let years: Vec<i64> = records
            .iter()
            .filter_map(|r| r.birth_year)
            .map(|y| y as i64)
            .collect();
        let no_data = || BikeshareError::NoData("Birth Year".to_string());

        Some(BirthYears {
            earliest: years.iter().copied().min().ok_or_else(no_data)?,
            recent: years.iter().copied().max().ok_or_else(no_data)?,
            common: mode(years.iter().copied()).ok_or_else(no_data)?,
        })
    } else {
        None
    };

    Ok(UserInfo {
        user_types,
        genders,
        birth_years,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trip_table::fixtures::{at, table, trip};
    use crate::trip_table::TripRecord;
    use pretty_assertions::assert_eq;

    #[test]
    fn mode_breaks_ties_toward_smallest() {
        assert_eq!(mode(vec![3, 1, 3, 1, 2]), Some(1));
        assert_eq!(mode(vec!["b", "a", "b"]), Some("b"));
        assert_eq!(mode(Vec::<u32>::new()), None);
    }

    #[test]
    fn value_counts_descending_with_stable_ties() {
        let counts =
            ValueCounts::from_values(vec!["Customer", "Subscriber", "Dependent", "Subscriber"]);
        assert_eq!(
            counts.0,
            vec![
                ("Subscriber".to_string(), 2),
                ("Customer".to_string(), 1),
                ("Dependent".to_string(), 1),
            ]
        );
        assert_eq!(counts.get("Dependent"), Some(1));
        assert_eq!(counts.get("Alien"), None);
    }

    #[test]
    fn popular_times_picks_the_dominant_values() {
        // 2017-06-06 is a Tuesday.
        let t = table(vec![
            trip(at(2017, 6, 6, 17), "A", "B", 60.0),
            trip(at(2017, 6, 6, 17), "A", "B", 60.0),
            trip(at(2017, 6, 13, 17), "A", "B", 60.0),
            trip(at(2017, 1, 1, 8), "A", "B", 60.0),
        ]);

        let times = popular_times(&t).unwrap();
        assert_eq!(
            times,
            PopularTimes {
                month: 6,
                day_of_week: 1,
                hour: 17
            }
        );
        assert_eq!(times.month_name(), "June");
        assert_eq!(times.day_name(), "Tuesday");
    }

    #[test]
    fn popular_times_on_empty_table_is_no_data() {
        let err = popular_times(&table(vec![])).unwrap_err();
        assert!(matches!(err, BikeshareError::NoData(_)));
    }

    #[test]
    fn popular_stations_and_trip() {
        let t = table(vec![
            trip(at(2017, 1, 1, 8), "Canal St", "Clark St", 60.0),
            trip(at(2017, 1, 1, 8), "Canal St", "Lake Shore", 60.0),
            trip(at(2017, 1, 1, 8), "Wells St", "Lake Shore", 60.0),
            trip(at(2017, 1, 1, 8), "Wells St", "Lake Shore", 60.0),
            trip(at(2017, 1, 1, 8), "Canal St", "Clark St", 60.0),
        ]);

        let stations = popular_stations(&t).unwrap();
        assert_eq!(stations.start_station, "Canal St");
        assert_eq!(stations.end_station, "Lake Shore");
        // Both trips appear twice; the alphabetically first wins.
        assert_eq!(stations.trip, "Canal St to Clark St");
    }

    #[test]
    fn trip_is_built_per_row_before_counting() {
        let mut lonely = trip(at(2017, 1, 1, 8), "X", "Y", 60.0);
        lonely.end_station = None;
        let t = table(vec![
            lonely.clone(),
            lonely,
            trip(at(2017, 1, 1, 8), "A", "B", 60.0),
        ]);

        let stations = popular_stations(&t).unwrap();
        assert_eq!(stations.start_station, "X");
        assert_eq!(stations.trip, "A to B");
    }

    #[test]
    fn trip_duration_sum_and_mean() {
        let t = table(vec![
            trip(at(2017, 1, 1, 8), "A", "B", 10.0),
            trip(at(2017, 1, 1, 8), "A", "B", 20.0),
            trip(at(2017, 1, 1, 8), "A", "B", 30.0),
        ]);

        let duration = trip_duration(&t).unwrap();
        assert_eq!(duration.total, 60.0);
        assert_eq!(duration.mean, 20.0);
    }

    #[test]
    fn trip_duration_skips_missing_values() {
        let mut blank = trip(at(2017, 1, 1, 8), "A", "B", 0.0);
        blank.trip_duration = None;
        let t = table(vec![blank, trip(at(2017, 1, 1, 8), "A", "B", 40.0)]);

        let duration = trip_duration(&t).unwrap();
        assert_eq!(duration.total, 40.0);
        assert_eq!(duration.mean, 40.0);
    }

    fn with_demographics(gender: Option<&str>, birth_year: Option<f64>) -> TripRecord {
        let mut record = trip(at(2017, 1, 1, 8), "A", "B", 60.0);
        record.gender = gender.map(str::to_string);
        record.birth_year = birth_year;
        record
    }

    #[test]
    fn user_info_without_gender_column_is_absent_not_empty() {
        let t = table(vec![
            trip(at(2017, 1, 1, 8), "A", "B", 60.0),
            trip(at(2017, 1, 1, 8), "A", "B", 60.0),
        ]);

        let info = user_info(&t).unwrap();
        assert_eq!(info.genders, None);
        assert_eq!(info.birth_years, None);
        assert_eq!(info.user_types.get("Subscriber"), Some(2));
    }

    #[test]
    fn user_info_birth_years_ignore_missing() {
        let mut t = table(vec![
            with_demographics(Some("Male"), Some(1980.0)),
            with_demographics(Some("Female"), Some(1980.0)),
            with_demographics(Some("Male"), Some(1990.0)),
            with_demographics(None, None),
        ]);
        t.has_gender = true;
        t.has_birth_year = true;

        let info = user_info(&t).unwrap();
        assert_eq!(
            info.birth_years,
            Some(BirthYears {
                earliest: 1980,
                recent: 1990,
                common: 1980
            })
        );
        let genders = info.genders.unwrap();
        assert_eq!(genders.get("Male"), Some(2));
        assert_eq!(genders.get("Female"), Some(1));
    }

    #[test]
    fn user_info_fails_when_birth_years_are_all_missing() {
        let mut t = table(vec![with_demographics(Some("Male"), None)]);
        t.has_birth_year = true;

        let err = user_info(&t).unwrap_err();
        assert!(matches!(err, BikeshareError::NoData(ref c) if c == "Birth Year"));
    }
}
