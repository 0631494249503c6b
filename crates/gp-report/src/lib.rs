// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Activity reports for a configured team.
//!
//! The flow is: collect an [`ActivitySnapshot`] (active repositories with
//! their commits) from the provider, [`classify`] its commits by team
//! member, compute [`MemberStats`] and [`RepositoryStats`], then let the
//! [`ReportGenerator`] render markdown and write JSON/markdown files.

pub mod classify;
pub mod error;
pub mod generator;
pub mod render;
pub mod report;
pub mod snapshot;
pub mod stats;

pub use classify::{classify, Classification, MemberCommits, UNATTRIBUTED};
pub use error::ReportError;
pub use generator::{GeneratedReports, ReportGenerator, ReportSettings};
pub use render::ReportTemplates;
pub use report::{CommitLine, MemberReport, Reports, TeamReport};
pub use snapshot::ActivitySnapshot;
pub use stats::{repository_stats, MemberStats, RepositoryStats};
