pub mod app_index;
pub mod config;
pub mod contract;
pub mod core_service;
pub mod discovery;
pub mod entry_file;
pub mod logging;
pub mod model;
pub mod runtime;
pub mod search;
pub mod session;
pub mod transport;
