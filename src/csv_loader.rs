// csv_loader.rs
use crate::city::City;
use crate::config::{ColumnNames, DataSettings};
use crate::errors::{BikeshareError, Result};
use crate::trip_table::{TripRecord, TripTable};
use crate::user_experience::TripSource;
use crate::user_interaction::print_insight;
use chrono::NaiveDateTime;
use csv::StringRecord;
use log::{debug, info, warn};
use std::fs::File;
use std::io::{self, Read};

const TIMESTAMP_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

pub fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    TIMESTAMP_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
}

/// Opens the city's dataset and parses it into a table.
pub fn load_data(city: City, settings: &DataSettings) -> Result<TripTable> {
    let path = settings.dataset_path(city);
    debug!("Loading {} from {}", city, path.display());

    let file = File::open(&path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => BikeshareError::DatasetNotFound {
            city: city.title().to_string(),
            path: path.clone(),
        },
        _ => BikeshareError::Io(e),
    })?;

    let table = read_trip_table(city, file, &settings.config.columns)?;
    if table.is_empty() {
        warn!("{} has a header but no trips", path.display());
    }
    info!("Loaded {} trips for {}", table.len(), city);
    Ok(table)
}

/// Column positions, found by header name.
struct ColumnIndex {
    start_time: usize,
    end_time: usize,
    start_station: usize,
    end_station: usize,
    trip_duration: usize,
    user_type: usize,
    gender: Option<usize>,
    birth_year: Option<usize>,
}

impl ColumnIndex {
    fn from_headers(headers: &StringRecord, columns: &ColumnNames) -> Result<Self> {
        let find = |name: &str| headers.iter().position(|h| h.trim() == name);
        let require = |name: &str| {
            find(name).ok_or_else(|| BikeshareError::MissingColumn(name.to_string()))
        };

        Ok(ColumnIndex {
            start_time: require(&columns.start_time)?,
            end_time: require(&columns.end_time)?,
            start_station: require(&columns.start_station)?,
            end_station: require(&columns.end_station)?,
            trip_duration: require(&columns.trip_duration)?,
            user_type: require(&columns.user_type)?,
            gender: find(&columns.gender),
            birth_year: find(&columns.birth_year),
        })
    }
}

pub fn read_trip_table<R: Read>(
    city: City,
    reader: R,
    columns: &ColumnNames,
) -> Result<TripTable> {
    let mut rdr = csv::Reader::from_reader(reader);
    let headers = rdr.headers()?.clone();
    let index = ColumnIndex::from_headers(&headers, columns)?;

    if index.gender.is_none() {
        debug!("{} has no '{}' column", city, columns.gender);
    }
    if index.birth_year.is_none() {
        debug!("{} has no '{}' column", city, columns.birth_year);
    }

    let mut table = TripTable::new(city, index.gender.is_some(), index.birth_year.is_some());

    for (i, result) in rdr.records().enumerate() {
        let record = result?;
        let row = i + 1;

        let field = |pos: usize| record.get(pos).unwrap_or("");
        let timestamp = |pos: usize| {
            let value = field(pos);
            parse_timestamp(value).ok_or_else(|| BikeshareError::InvalidTimestamp {
                row,
                value: value.to_string(),
            })
        };

        let trip_duration = match field(index.trip_duration).trim() {
            "" => None,
            raw => match raw.parse::<f64>() {
                Ok(v) if v.is_finite() => Some(v),
                Ok(_) => None,
                Err(_) => {
                    return Err(BikeshareError::InvalidNumber {
                        row,
                        column: columns.trip_duration.clone(),
                        value: raw.to_string(),
                    })
                }
            },
        };

        table.records.push(TripRecord {
            start_time: timestamp(index.start_time)?,
            end_time: timestamp(index.end_time)?,
            start_station: text(field(index.start_station)),
            end_station: text(field(index.end_station)),
            trip_duration,
            user_type: text(field(index.user_type)),
            gender: index.gender.and_then(|pos| text(field(pos))),
            birth_year: index.birth_year.and_then(|pos| coerce_number(field(pos))),
        });
    }

    Ok(table)
}

fn text(value: &str) -> Option<String> {
    let value = value.trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// Non-numeric values count as missing.
fn coerce_number(value: &str) -> Option<f64> {
    value.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Production loader. Reports failures on the console and hands back nothing.
pub struct CsvTripSource {
    pub settings: DataSettings,
}

/// What the user is told when a city's dataset can't be loaded.
pub fn load_failure_message(city: City, err: &BikeshareError) -> String {
    match err {
        BikeshareError::DatasetNotFound { .. } => format!("Error: File for {} not found.", city),
        _ => format!("An error occurred while loading data for {}: {}", city, err),
    }
}

impl TripSource for CsvTripSource {
    fn load(&mut self, city: City) -> Option<TripTable> {
        match load_data(city, &self.settings) {
            Ok(table) => Some(table),
            Err(e) => {
                warn!("Loading {} failed: {}", city, e);
                print_insight(&load_failure_message(city, &e));
                None
            }
        }
    }
}
