//! Energy monitoring backend: users, sessions, devices and consumption
//! readings stored in Postgres and served over a JSON REST API.
//!
//! Requests flow `api` (HTTP) -> `bo` (validation and rules) -> `dao` (SQL).

pub mod api;
pub mod bo;
pub mod config;
pub mod dao;
pub mod db;
pub mod error;
