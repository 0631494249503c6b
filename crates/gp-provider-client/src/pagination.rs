// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Page loop and sort-order tracking shared by the listing fetchers.
//!
//! Listings are requested newest first. While that holds, the first item
//! older than the window proves every later item is older too, so the loop
//! stops without fetching further pages. The order is checked rather than
//! assumed: the first inversion switches the call to a full scan.

use chrono::{DateTime, Utc};
use gp_config_types::OrderPolicy;
use serde_json::Value;

use crate::error::{ProviderError, ProviderResult};
use crate::gateway::ApiGateway;
use crate::window::ActivityWindow;

pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// What the page handler wants the loop to do next
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageControl {
    Continue,
    Stop,
}

/// One paginated listing request
pub(crate) struct PagedQuery<'a> {
    pub gateway: &'a dyn ApiGateway,
    pub path: String,
    pub params: Vec<(String, String)>,
    pub page_size: u32,
    /// Entity name used in log events
    pub entity: &'static str,
}

impl PagedQuery<'_> {
    /// Fetch pages until the handler stops, a page is short or empty, or a
    /// later page fails.
    ///
    /// Only a failure of the first page is returned as an error; a later
    /// failure is logged and ends the loop with what was gathered so far.
    pub async fn run<F>(self, mut on_page: F) -> ProviderResult<()>
    where
        F: FnMut(Vec<Value>) -> PageControl,
    {
        let mut page: u32 = 1;
        loop {
            let mut query = self.params.clone();
            query.push(("page".to_string(), page.to_string()));
            query.push(("perPage".to_string(), self.page_size.to_string()));

            let items = match self.fetch_page(&query).await {
                Ok(items) => items,
                Err(err) if page == 1 => return Err(err),
                Err(err) => {
                    tracing::warn!(
                        entity = self.entity,
                        path = %self.path,
                        page,
                        error = %err,
                        "page fetch failed; keeping results gathered so far"
                    );
                    return Ok(());
                }
            };

            let count = items.len();
            tracing::debug!(entity = self.entity, path = %self.path, page, count, "fetched page");
            if count == 0 {
                return Ok(());
            }
            if on_page(items) == PageControl::Stop {
                return Ok(());
            }
            if count < self.page_size as usize {
                return Ok(());
            }
            page += 1;
        }
    }

    async fn fetch_page(&self, query: &[(String, String)]) -> ProviderResult<Vec<Value>> {
        match self.gateway.get(&self.path, query).await? {
            Value::Array(items) => Ok(items),
            Value::Null => Ok(Vec::new()),
            other => Err(ProviderError::Shape {
                path: self.path.clone(),
                message: format!("expected a JSON array, got {}", json_kind(&other)),
            }),
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Verdict for one listing item
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum WindowVerdict {
    Keep,
    /// Out of window; skip it and keep scanning
    Skip,
    /// Out of window while the order holds; nothing after it can qualify
    StopHere,
}

/// Tracks the observed order of one call and applies the window to items
pub(crate) struct WindowScan {
    window: Option<ActivityWindow>,
    trust_order: bool,
    last_seen: Option<DateTime<Utc>>,
    entity: &'static str,
}

impl WindowScan {
    pub fn new(window: Option<ActivityWindow>, policy: OrderPolicy, entity: &'static str) -> Self {
        Self {
            window,
            trust_order: policy == OrderPolicy::TrustServer,
            last_seen: None,
            entity,
        }
    }

    pub fn is_full_scan(&self) -> bool {
        !self.trust_order
    }

    /// Classify an item by its timestamp. `label` names it in log events.
    pub fn classify(&mut self, timestamp: DateTime<Utc>, label: &str) -> WindowVerdict {
        if let Some(previous) = self.last_seen {
            if timestamp > previous && self.trust_order {
                tracing::warn!(
                    entity = self.entity,
                    item = label,
                    previous = %previous,
                    current = %timestamp,
                    "listing is not in descending order; switching to full scan"
                );
                self.trust_order = false;
            }
        }
        self.last_seen = Some(timestamp);

        match self.window {
            None => WindowVerdict::Keep,
            Some(window) if window.contains(timestamp) => WindowVerdict::Keep,
            Some(_) if self.trust_order => WindowVerdict::StopHere,
            Some(_) => WindowVerdict::Skip,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, day, 12, 0, 0).unwrap()
    }

    #[gp_test_utils::logged_test]
    fn descending_items_stop_at_the_window_edge() {
        let window = ActivityWindow::starting_at(at(10));
        let mut scan = WindowScan::new(Some(window), OrderPolicy::TrustServer, "commit");
        assert_eq!(scan.classify(at(20), "a"), WindowVerdict::Keep);
        assert_eq!(scan.classify(at(10), "b"), WindowVerdict::Keep);
        assert_eq!(scan.classify(at(9), "c"), WindowVerdict::StopHere);
    }

    #[gp_test_utils::logged_test]
    fn inversion_switches_to_full_scan() {
        let window = ActivityWindow::starting_at(at(10));
        let mut scan = WindowScan::new(Some(window), OrderPolicy::TrustServer, "branch");
        assert_eq!(scan.classify(at(12), "a"), WindowVerdict::Keep);
        assert_eq!(scan.classify(at(15), "b"), WindowVerdict::Keep);
        assert!(scan.is_full_scan());
        assert_eq!(scan.classify(at(1), "c"), WindowVerdict::Skip);
        assert_eq!(scan.classify(at(11), "d"), WindowVerdict::Keep);
    }

    #[gp_test_utils::logged_test]
    fn forced_full_scan_never_stops() {
        let window = ActivityWindow::starting_at(at(10));
        let mut scan = WindowScan::new(Some(window), OrderPolicy::FullScan, "repository");
        assert_eq!(scan.classify(at(5), "a"), WindowVerdict::Skip);
        assert_eq!(scan.classify(at(11), "b"), WindowVerdict::Keep);
    }

    #[gp_test_utils::logged_test]
    fn no_window_keeps_everything() {
        let mut scan = WindowScan::new(None, OrderPolicy::TrustServer, "branch");
        assert_eq!(scan.classify(at(1), "a"), WindowVerdict::Keep);
        assert_eq!(scan.classify(at(30), "b"), WindowVerdict::Keep);
    }
}
