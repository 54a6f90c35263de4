//! AWS-oriented adapters and handlers for the pagination-chain
//! controller.
//!
//! This crate owns runtime integration details (the Lambda handler,
//! worker dispatch, and webhook notification) on top of the
//! deterministic logic in `exec_chain_core`.

pub mod adapters;
pub mod handlers;
