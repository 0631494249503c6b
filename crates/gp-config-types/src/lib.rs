// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Strongly-typed configuration sections for gitpulse.
//!
//! Each section is extracted from the merged configuration JSON at its
//! top-level key (`general`, `provider`, `team`, `reports`). All keys are
//! kebab-case; missing keys fall back to the defaults documented on each
//! field.

pub mod general;
pub mod provider;
pub mod reports;
pub mod team;

pub use general::GeneralConfig;
pub use provider::{OrderPolicy, ProviderConfig};
pub use reports::{ReportFormat, ReportsConfig};
pub use team::TeamSection;
