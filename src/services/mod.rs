pub mod day_store;
pub mod food;
pub mod registry;
pub mod targets;
pub mod weather;

#[cfg(test)]
pub mod testing;
