pub mod api;
pub mod cache;
pub mod format;
pub mod models;
pub mod refresh;
pub mod ui;
