pub mod activities;
pub mod config;
pub mod day;
pub mod events;
pub mod expand;
pub mod export;
pub mod month;
