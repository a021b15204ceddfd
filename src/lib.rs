//! Timesheet Engine for employee time tracking
//!
//! This crate turns clock-in/clock-out sessions into regular and overtime
//! hours, aggregates them over days and weeks, and provides the services
//! around that calculator: clocking in and out with breaks, signed-in user
//! context, administration, reports with CSV export, and an HTTP API.

#![warn(missing_docs)]

pub mod admin;
pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
pub mod report;
pub mod session;
pub mod store;
pub mod tracking;

#[cfg(test)]
pub(crate) mod test_support;
