//! Storage layer for the `ALX_prodev` database.
//!
//! [`database::Database`] owns the connection to MySQL and exposes typed
//! operations over the `user_data` table. Connection parameters live in
//! [`config::DbConfig`] and are always passed explicitly.

pub mod config;
pub mod database;
pub mod errors;
pub mod models;
