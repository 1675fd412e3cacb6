pub mod backend;
pub mod config;
pub mod http_client;
pub mod loader;
pub mod locale;
pub mod logging;
pub mod records;
pub mod state;
pub mod ui;
pub mod views;
