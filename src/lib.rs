pub mod common_scraper;
pub mod config;
pub mod locator;
pub mod models;
pub mod parser;
pub mod scraper;
pub mod utils;
pub mod verbose;
