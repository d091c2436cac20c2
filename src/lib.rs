pub mod activity;
pub mod config;
pub mod display;
pub mod form;
pub mod utils;
