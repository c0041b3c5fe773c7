pub mod day;
pub mod workout;

pub use day::Day;
pub use workout::{SaveCommand, SaveDay, WorkoutRecord};
