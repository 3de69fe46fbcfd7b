pub mod app;
pub mod autocomplete;
pub mod config;
pub mod navigator;
pub mod source;
pub mod ui;
