// trip_table.rs
use crate::city::City;
use chrono::NaiveDateTime;

/// One row of a city's dataset. Blank text fields come through as `None`.
#[derive(Debug, Clone, PartialEq)]
pub struct TripRecord {
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
    pub start_station: Option<String>,
    pub end_station: Option<String>,
    pub trip_duration: Option<f64>,
    pub user_type: Option<String>,
    pub gender: Option<String>,
    pub birth_year: Option<f64>,
}

impl TripRecord {
    /// "<start> to <end>", or `None` when either end is unknown.
    pub fn trip_label(&self) -> Option<String> {
        match (&self.start_station, &self.end_station) {
            (Some(start), Some(end)) => Some(format!("{} to {}", start, end)),
            _ => None,
        }
    }
}

/// All trips for one city. Lives until the user picks another city or quits.
#[derive(Debug, Clone)]
pub struct TripTable {
    pub city: City,
    pub records: Vec<TripRecord>,
    pub has_gender: bool,
    pub has_birth_year: bool,
}

impl TripTable {
    pub fn new(city: City, has_gender: bool, has_birth_year: bool) -> Self {
        TripTable {
            city,
            records: Vec::new(),
            has_gender,
            has_birth_year,
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
