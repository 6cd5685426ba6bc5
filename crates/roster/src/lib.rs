//! Roster - organization structure and reporting for an HR workspace.
//!
//! The library holds the logic-bearing core of the HR tooling: building the
//! reporting forest from flat employee and position snapshots, guarding
//! manager reassignments against cycles, tracking org chart view state, and
//! filtering/exporting tabular reports. The `roster` binary wraps it in a CLI
//! over a local JSONL-backed entity store.

#![forbid(unsafe_code)]

pub mod access;
pub mod app;
pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod export;
pub mod hierarchy;
pub mod id_generation;
pub mod output;
pub mod report;
pub mod session;
pub mod store;
pub mod view;
