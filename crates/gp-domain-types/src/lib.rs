// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Domain types for gitpulse
//!
//! This crate contains the value types produced by parsing Git provider
//! responses and consumed by the report generator and the tool layer.
//!
//! Every type serializes with the provider's field names (`lastActivityAt`,
//! `authoredDate`, ...). Consumers match on these names, so renaming a field
//! here is a breaking change for them.

pub mod branch;
pub mod commit;
pub mod repository;
pub mod team;

// Re-export commonly used types
pub use branch::*;
pub use commit::*;
pub use repository::*;
pub use team::*;
