mod reader;
mod types;

pub use reader::TimecardReader;
pub use types::{TimecardRow, NUM_IDENTIFYING_FIELDS, NUM_TIME_SLOTS};
