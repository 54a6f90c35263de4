//! Shared pagination-chain domain primitives.
//!
//! This crate owns deterministic controller behavior: trigger decoding,
//! the termination predicate, and range computation. It intentionally
//! excludes AWS SDK and Lambda runtime concerns.

pub mod contract;
pub mod decode;
pub mod pagination;
