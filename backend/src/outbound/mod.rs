//! Outbound adapters implementing domain ports.
//!
//! - **memory**: process-local registry; state is lost on restart.
//!
//! Adapters translate between domain types and their storage representation.
//! They contain no business rules.

pub mod memory;
