//! studylog-core — Grade engine, record store, and study statistics.
//!
//! This crate defines the grade computation rules, the data model of a
//! study plan, and the JSON store and statistics the CLI builds on.

pub mod catalog;
pub mod config;
pub mod error;
pub mod grade;
pub mod model;
pub mod statistics;
pub mod store;
