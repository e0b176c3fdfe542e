pub mod days;
pub mod food;
pub mod health;
pub mod logs;
pub mod profile;
