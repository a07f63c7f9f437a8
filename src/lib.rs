pub mod config;
pub mod enrich;
pub mod platform;
pub mod url_parser;
pub mod utils;
