//! Earnings Engine for ACA enrollment agents
//!
//! This crate projects what an agent earns over an Open Enrollment Period
//! under two compensation models (hourly plus commission, or commission
//! only) and the residual income that follows over five years as enrolled
//! customers renew.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod format;
pub mod models;
