// city.rs
use fuzzywuzzy::fuzz;
use regex::Regex;
use std::fmt;
use std::sync::OnceLock;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum City {
    Chicago,
    NewYorkCity,
    Washington,
}

impl City {
    pub const ALL: [City; 3] = [City::Chicago, City::NewYorkCity, City::Washington];

    /// Lower-case name the user types, with single spaces between words.
    pub fn key(&self) -> &'static str {
        match self {
            City::Chicago => "chicago",
            City::NewYorkCity => "new york city",
            City::Washington => "washington",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            City::Chicago => "Chicago",
            City::NewYorkCity => "New York City",
            City::Washington => "Washington",
        }
    }

    pub fn default_file(&self) -> &'static str {
        match self {
            City::Chicago => "chicago.csv",
            City::NewYorkCity => "new_york_city.csv",
            City::Washington => "washington.csv",
        }
    }

    /// Case-insensitive match; spaces, dashes and underscores are interchangeable.
    pub fn from_input(input: &str) -> Option<City> {
        let normalized = normalize(input);
        City::ALL
            .iter()
            .copied()
            .find(|city| city.key() == normalized)
    }
}

impl fmt::Display for City {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

fn normalize(input: &str) -> String {
    static SEPARATORS: OnceLock<Regex> = OnceLock::new();
    let separators = SEPARATORS.get_or_init(|| Regex::new(r"[\s_-]+").unwrap());
    separators
        .replace_all(input.trim().to_lowercase().as_str(), " ")
        .trim()
        .to_string()
}

/// Best fuzzy match for a mistyped city, if it's close enough to be worth suggesting.
pub fn closest_city(input: &str) -> Option<City> {
    let normalized = normalize(input);
    if normalized.is_empty() {
        return None;
    }

    City::ALL
        .iter()
        .map(|city| (*city, fuzz::ratio(&normalized, city.key())))
        .max_by_key(|&(_, score)| score)
        .filter(|&(_, score)| score > 60)
        .map(|(city, _)| city)
}
