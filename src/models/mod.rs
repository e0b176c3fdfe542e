pub mod day_record;
pub mod profile;
pub mod report;
pub mod workout;
