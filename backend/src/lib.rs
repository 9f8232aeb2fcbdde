pub mod config;
pub mod context;
pub mod error;
pub mod history;
pub mod inference;
pub mod knowledge;
pub mod routes;
