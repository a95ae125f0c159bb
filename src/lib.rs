pub mod config;
pub mod logging;
pub mod names;
pub mod server;
pub mod version;
