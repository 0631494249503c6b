// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Per-call dependencies shared by the fetchers

use gp_config_types::OrderPolicy;

use crate::gateway::ApiGateway;
use crate::pagination::DEFAULT_PAGE_SIZE;
use crate::window::{ActivityWindow, Clock, WindowError};

/// Listing behavior that does not depend on the transport
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchOptions {
    pub page_size: u32,
    pub order_policy: OrderPolicy,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            order_policy: OrderPolicy::TrustServer,
        }
    }
}

/// Borrowed view of everything a fetcher needs
#[derive(Clone, Copy)]
pub struct FetchContext<'a> {
    pub gateway: &'a dyn ApiGateway,
    pub clock: &'a dyn Clock,
    pub options: FetchOptions,
}

impl<'a> FetchContext<'a> {
    pub fn new(gateway: &'a dyn ApiGateway, clock: &'a dyn Clock, options: FetchOptions) -> Self {
        Self {
            gateway,
            clock,
            options,
        }
    }

    pub fn window(&self, days: Option<u32>) -> Result<Option<ActivityWindow>, WindowError> {
        days.map(|days| ActivityWindow::last_days(days, self.clock)).transpose()
    }
}

/// Escape a value for use as one path segment (`group/repo` ids included)
pub(crate) fn path_segment(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '%' => out.push_str("%25"),
            '/' => out.push_str("%2F"),
            '?' => out.push_str("%3F"),
            '#' => out.push_str("%23"),
            ' ' => out.push_str("%20"),
            _ => out.push(c),
        }
    }
    out
}
