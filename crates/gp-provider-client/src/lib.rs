// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Activity fetching from a Codeup-style Git provider.
//!
//! The provider lists repositories, branches and commits in pages of 20,
//! newest first. The fetchers here walk those pages inside an activity
//! window (the last N days) and stop as soon as the listing leaves it:
//!
//! - [`RepositoryFetcher`] keeps repositories active in the window and
//!   attaches their commits
//! - [`CommitFetcher`] merges the commits of every active branch, deduplicated
//!   by id
//! - [`BranchFetcher`] lists branches by last update
//!
//! All of them talk to the provider through the [`ApiGateway`] trait;
//! [`HttpGateway`] is the `reqwest` implementation. [`ProviderClient`] bundles
//! a gateway, a [`Clock`] and [`FetchOptions`] behind one facade.

pub mod auth;
pub mod branches;
pub mod client;
pub mod commits;
pub mod context;
pub mod error;
pub mod gateway;
pub mod pagination;
pub mod repositories;
pub mod window;

pub use auth::TokenAuth;
pub use branches::BranchFetcher;
pub use client::{ProviderClient, ProviderSettings};
pub use commits::CommitFetcher;
pub use context::{FetchContext, FetchOptions};
pub use error::{ProviderError, ProviderResult};
pub use gateway::{ApiGateway, HttpGateway};
pub use pagination::DEFAULT_PAGE_SIZE;
pub use repositories::RepositoryFetcher;
pub use reqwest::Method;
pub use window::{ActivityWindow, Clock, FixedClock, SystemClock, WindowError};
