pub mod config;
pub mod logging;

pub mod asset;
pub mod capture;
pub mod error;
pub mod fetch;
pub mod registry;
pub mod retry;
pub mod scan;
pub mod task;
pub mod url_model;
