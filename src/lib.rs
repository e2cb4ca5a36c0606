pub mod app;
pub mod config;
pub mod error;
pub mod extractors;
pub mod products;
pub mod state;
pub mod storage;
pub mod text;
pub mod users;
