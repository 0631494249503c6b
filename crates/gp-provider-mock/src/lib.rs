// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! In-memory Git provider implementing [`ApiGateway`].
//!
//! Serves the same routes as the real API (`/repositories`,
//! `/repositories/{id}/branches`, `/repositories/{id}/commits`, ...) from
//! JSON fixtures, honoring `page`/`perPage` and optionally `since`. Every
//! request is recorded so tests can assert which pages were fetched.
//! Listings are returned in insertion order; the mock does not sort.

pub mod fixtures;

use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use gp_provider_client::window::parse_timestamp;
use gp_provider_client::{ApiGateway, Method, ProviderError, ProviderResult};
use serde_json::Value;

/// One request seen by the mock
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub query: Vec<(String, String)>,
}

impl RecordedRequest {
    pub fn param(&self, key: &str) -> Option<&str> {
        self.query.iter().find(|(k, _)| k == key).map(|(_, v)| v.as_str())
    }

    pub fn page(&self) -> u32 {
        self.param("page").and_then(|p| p.parse().ok()).unwrap_or(1)
    }
}

#[derive(Default)]
struct RepoData {
    detail: Value,
    branches: Vec<Value>,
    commits: HashMap<String, Vec<Value>>,
    commit_details: HashMap<String, Value>,
    compares: HashMap<(String, String), Value>,
}

#[derive(Default)]
struct MockState {
    repo_order: Vec<String>,
    repos: HashMap<String, RepoData>,
    /// (path, page) -> status; page `None` fails every page
    failures: HashMap<(String, Option<u32>), u16>,
    /// (repository id, branch) -> status for commit listings
    branch_failures: HashMap<(String, String), u16>,
    requests: Vec<RecordedRequest>,
    honor_since: bool,
}

/// Shared, clonable fake provider
#[derive(Clone, Default)]
pub struct MockProvider {
    state: Arc<RwLock<MockState>>,
}

impl MockProvider {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> RwLockReadGuard<'_, MockState> {
        self.state.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, MockState> {
        self.state.write().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Register a repository; its `id` becomes the path key
    pub fn add_repository(&self, repo: Value) -> &Self {
        let key = id_of(&repo);
        let mut state = self.write();
        if !state.repos.contains_key(&key) {
            state.repo_order.push(key.clone());
        }
        state.repos.entry(key).or_default().detail = repo;
        self
    }

    pub fn add_branch(&self, repo_id: &str, branch: Value) -> &Self {
        self.write().repos.entry(repo_id.to_string()).or_default().branches.push(branch);
        self
    }

    /// Append commits to a branch listing, newest first as the provider would
    pub fn add_commits(&self, repo_id: &str, branch: &str, commits: Vec<Value>) -> &Self {
        self.write()
            .repos
            .entry(repo_id.to_string())
            .or_default()
            .commits
            .entry(branch.to_string())
            .or_default()
            .extend(commits);
        self
    }

    /// Detail response for `/commits/{sha}`; listings are searched otherwise
    pub fn add_commit_detail(&self, repo_id: &str, commit: Value) -> &Self {
        let sha = id_of(&commit);
        self.write()
            .repos
            .entry(repo_id.to_string())
            .or_default()
            .commit_details
            .insert(sha, commit);
        self
    }

    pub fn set_compare(&self, repo_id: &str, from: &str, to: &str, response: Value) -> &Self {
        self.write()
            .repos
            .entry(repo_id.to_string())
            .or_default()
            .compares
            .insert((from.to_string(), to.to_string()), response);
        self
    }

    /// Answer every request to `path` with `status`
    pub fn fail_path(&self, path: &str, status: u16) -> &Self {
        self.write().failures.insert((path.to_string(), None), status);
        self
    }

    /// Answer one page of `path` with `status`
    pub fn fail_page(&self, path: &str, page: u32, status: u16) -> &Self {
        self.write().failures.insert((path.to_string(), Some(page)), status);
        self
    }

    /// Fail the commit listing of one branch only
    pub fn fail_branch(&self, repo_id: &str, branch: &str, status: u16) -> &Self {
        self.write()
            .branch_failures
            .insert((repo_id.to_string(), branch.to_string()), status);
        self
    }

    /// Filter commit listings by the `since` parameter like the real server
    pub fn honor_since(&self, on: bool) -> &Self {
        self.write().honor_since = on;
        self
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.read().requests.clone()
    }

    pub fn requests_to(&self, path: &str) -> Vec<RecordedRequest> {
        self.read()
            .requests
            .iter()
            .filter(|r| r.path == path)
            .cloned()
            .collect()
    }

    /// Pages requested from `path`, in request order
    pub fn pages_requested(&self, path: &str) -> Vec<u32> {
        self.requests_to(path).iter().map(RecordedRequest::page).collect()
    }

    pub fn clear_requests(&self) {
        self.write().requests.clear();
    }

    fn route(&self, path: &str, query: &[(String, String)]) -> ProviderResult<Value> {
        let state = self.read();
        let page: u32 = param(query, "page").and_then(|p| p.parse().ok()).unwrap_or(1);
        for key in [(path.to_string(), Some(page)), (path.to_string(), None)] {
            if let Some(status) = state.failures.get(&key) {
                return Err(error(*status, path));
            }
        }

        let segments: Vec<String> = path
            .trim_start_matches('/')
            .split('/')
            .map(decode_segment)
            .collect();
        let segments: Vec<&str> = segments.iter().map(String::as_str).collect();

        match segments.as_slice() {
            ["repositories"] => {
                let repos: Vec<Value> = state
                    .repo_order
                    .iter()
                    .filter_map(|key| state.repos.get(key))
                    .map(|data| data.detail.clone())
                    .collect();
                Ok(paginate(&repos, query))
            }
            ["repositories", id] => state
                .repos
                .get(*id)
                .filter(|data| !data.detail.is_null())
                .map(|data| data.detail.clone())
                .ok_or_else(|| error(404, path)),
            ["repositories", id, "branches"] => {
                let data = state.repos.get(*id).ok_or_else(|| error(404, path))?;
                Ok(paginate(&data.branches, query))
            }
            ["repositories", id, "commits"] => {
                let data = state.repos.get(*id).ok_or_else(|| error(404, path))?;
                let branch = param(query, "refName").unwrap_or("master");
                if let Some(status) = state.branch_failures.get(&(id.to_string(), branch.to_string())) {
                    return Err(error(*status, path));
                }
                let mut commits = data.commits.get(branch).cloned().unwrap_or_default();
                if state.honor_since {
                    if let Some(since) = param(query, "since").and_then(|s| parse_timestamp(s).ok()) {
                        commits.retain(|c| {
                            c.get("authoredDate")
                                .and_then(Value::as_str)
                                .and_then(|d| parse_timestamp(d).ok())
                                .map_or(true, |d| d >= since)
                        });
                    }
                }
                Ok(paginate(&commits, query))
            }
            ["repositories", id, "commits", sha] => {
                let data = state.repos.get(*id).ok_or_else(|| error(404, path))?;
                if let Some(detail) = data.commit_details.get(*sha) {
                    return Ok(detail.clone());
                }
                data.commits
                    .values()
                    .flatten()
                    .find(|c| c.get("id").and_then(Value::as_str) == Some(*sha))
                    .cloned()
                    .ok_or_else(|| error(404, path))
            }
            ["repositories", id, "compares"] => {
                let data = state.repos.get(*id).ok_or_else(|| error(404, path))?;
                let from = param(query, "from").unwrap_or_default().to_string();
                let to = param(query, "to").unwrap_or_default().to_string();
                data.compares.get(&(from, to)).cloned().ok_or_else(|| error(404, path))
            }
            _ => Err(error(404, path)),
        }
    }
}

#[async_trait]
impl ApiGateway for MockProvider {
    async fn request(&self, method: Method, path: &str, query: &[(String, String)]) -> ProviderResult<Value> {
        self.write().requests.push(RecordedRequest {
            method: method.to_string(),
            path: path.to_string(),
            query: query.to_vec(),
        });
        if method != Method::GET {
            return Err(error(405, path));
        }
        let result = self.route(path, query);
        tracing::trace!(path, ok = result.is_ok(), "mock provider request");
        result
    }
}

fn param<'q>(query: &'q [(String, String)], key: &str) -> Option<&'q str> {
    query.iter().find(|(k, _)| k == key).map(|(_, v)| v.as_str())
}

fn paginate(items: &[Value], query: &[(String, String)]) -> Value {
    let page: usize = param(query, "page").and_then(|p| p.parse().ok()).unwrap_or(1).max(1);
    let per_page: usize = param(query, "perPage").and_then(|p| p.parse().ok()).unwrap_or(20).max(1);
    let page_items: Vec<Value> = items
        .iter()
        .skip((page - 1) * per_page)
        .take(per_page)
        .cloned()
        .collect();
    Value::Array(page_items)
}

fn error(status: u16, path: &str) -> ProviderError {
    let body = serde_json::json!({"errorCode": status, "errorMessage": "mock failure"}).to_string();
    if status == 404 {
        ProviderError::NotFound {
            path: path.to_string(),
            body,
        }
    } else {
        ProviderError::Api {
            status,
            path: path.to_string(),
            body,
        }
    }
}

fn id_of(value: &Value) -> String {
    match value.get("id") {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => value
            .get("pathWithNamespace")
            .or_else(|| value.get("path"))
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
    }
}

fn decode_segment(raw: &str) -> String {
    raw.replace("%2F", "/")
        .replace("%20", " ")
        .replace("%3F", "?")
        .replace("%23", "#")
        .replace("%25", "%")
}
