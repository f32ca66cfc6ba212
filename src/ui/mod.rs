pub mod app;
pub mod calendar;
pub mod components;
pub mod market;
pub mod state;
