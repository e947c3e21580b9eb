// user_experience.rs
use crate::city::{closest_city, City};
use crate::stats_reporter::display_statistics;
use crate::trip_table::TripTable;
use crate::user_interaction::{print_insight, print_insight_level_2, InputSource};
use log::debug;

pub const CITY_PROMPT: &str = "Enter city name (Chicago, New York City, Washington): ";
pub const CONTINUE_PROMPT: &str = "Do you want to Continue? (yes/no): ";

/// Hands the driver a freshly loaded table, or nothing if loading failed.
/// Failures are reported by the source itself.
pub trait TripSource {
    fn load(&mut self, city: City) -> Option<TripTable>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverState {
    SelectingCity,
    ConfirmingContinue,
    Exited,
}

/// The prompt loop: pick a city, see its stats, decide whether to go again.
pub struct Driver<I: InputSource, S: TripSource> {
    input: I,
    source: S,
    state: DriverState,
    report: fn(&TripTable),
}

impl<I: InputSource, S: TripSource> Driver<I, S> {
    pub fn new(input: I, source: S) -> Self {
        Driver {
            input,
            source,
            state: DriverState::SelectingCity,
            report: display_statistics,
        }
    }

    pub fn state(&self) -> DriverState {
        self.state
    }

    /// Handles one answer for the current state and returns the state it leads to.
    pub fn handle(&mut self, answer: &str) -> DriverState {
        self.state = match self.state {
            DriverState::SelectingCity => match City::from_input(answer) {
                Some(city) => {
                    debug!("Selected {}", city);
                    if let Some(table) = self.source.load(city) {
                        (self.report)(&table);
                    }
                    DriverState::ConfirmingContinue
                }
                None => {
                    print_insight("Invalid city name. Please try again.");
                    if let Some(city) = closest_city(answer) {
                        print_insight_level_2(&format!("Did you mean {}?", city));
                    }
                    DriverState::SelectingCity
                }
            },
            DriverState::ConfirmingContinue => match answer.trim().to_lowercase().as_str() {
                "yes" => DriverState::SelectingCity,
                "no" => {
                    print_insight("Thank you for using the program. Goodbye!");
                    DriverState::Exited
                }
                _ => {
                    print_insight("Invalid choice. Please enter 'yes' or 'no'.");
                    DriverState::ConfirmingContinue
                }
            },
            DriverState::Exited => DriverState::Exited,
        };
        self.state
    }

    /// Keeps prompting until the user says "no" or input runs out.
    pub fn run(&mut self) {
        while self.state() != DriverState::Exited {
            let prompt = match self.state {
                DriverState::SelectingCity => CITY_PROMPT,
                _ => {
                    println!();
                    CONTINUE_PROMPT
                }
            };

            match self.input.read_line(prompt) {
                Some(answer) => {
                    self.handle(&answer);
                }
                None => {
                    debug!("Input closed, leaving");
                    self.state = DriverState::Exited;
                }
            }
        }
    }
}
