//! Statistics engine for a childminder's ("assistante maternelle") schedule.
//!
//! This crate turns per-day drop-off / pick-up entries and a set of pay
//! parameters into daily, monthly and annual hour and salary statistics,
//! and wraps that engine with JSON flat-file persistence and an HTTP API.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
pub mod storage;
