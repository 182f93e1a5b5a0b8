//! Workflow engine for an HR management backend.
//!
//! This crate provides the core behavior behind an HR system: a role-scoped
//! access policy, lifecycle state machines for attendance, leave, payroll and
//! performance records, and the pure calculators those lifecycles depend on
//! (work hours, overtime, leave duration, net salary, weighted scores).

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
pub mod notify;
pub mod policy;
pub mod store;
pub mod workflow;
