pub mod cli;
pub mod config;
pub mod db;
pub mod models;

pub use db::Database;
