// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Tool catalog and dispatch

use gp_provider_client::ProviderClient;
use schemars::{schema_for, JsonSchema};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::args::{
    CommitArgs, CommitChangesArgs, ListBranchesArgs, ListRepositoriesArgs, RepositoryArgs, RepositoryCommitsArgs,
};
use crate::error::ToolError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tool {
    ListRepositories,
    GetRepositoryInfo,
    GetRepositoryCommits,
    GetCommitDetails,
    GetCommitChanges,
    ListBranches,
}

impl Tool {
    pub const ALL: [Tool; 6] = [
        Tool::ListRepositories,
        Tool::GetRepositoryInfo,
        Tool::GetRepositoryCommits,
        Tool::GetCommitDetails,
        Tool::GetCommitChanges,
        Tool::ListBranches,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Tool::ListRepositories => "list_repositories",
            Tool::GetRepositoryInfo => "get_repository_info",
            Tool::GetRepositoryCommits => "get_repository_commits",
            Tool::GetCommitDetails => "get_commit_details",
            Tool::GetCommitChanges => "get_commit_changes",
            Tool::ListBranches => "list_branches",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Tool::ListRepositories => {
                "List repositories with commits in the last N days, each with those commits"
            }
            Tool::GetRepositoryInfo => "Get details of one repository",
            Tool::GetRepositoryCommits => "List commits of one branch in the last N days, newest first",
            Tool::GetCommitDetails => "Get one commit with its line statistics",
            Tool::GetCommitChanges => "List file changes between two commits",
            Tool::ListBranches => "List branches updated in the last N days",
        }
    }

    pub fn from_name(name: &str) -> Option<Tool> {
        Tool::ALL.into_iter().find(|t| t.name() == name)
    }

    fn argument_schema(self) -> Value {
        fn schema<T: JsonSchema>() -> Value {
            serde_json::to_value(schema_for!(T)).unwrap_or(Value::Null)
        }
        match self {
            Tool::ListRepositories => schema::<ListRepositoriesArgs>(),
            Tool::GetRepositoryInfo => schema::<RepositoryArgs>(),
            Tool::GetRepositoryCommits => schema::<RepositoryCommitsArgs>(),
            Tool::GetCommitDetails => schema::<CommitArgs>(),
            Tool::GetCommitChanges => schema::<CommitChangesArgs>(),
            Tool::ListBranches => schema::<ListBranchesArgs>(),
        }
    }

    pub fn descriptor(self) -> ToolDescriptor {
        ToolDescriptor {
            name: self.name(),
            description: self.description(),
            input_schema: self.argument_schema(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToolDescriptor {
    pub name: &'static str,
    pub description: &'static str,
    pub input_schema: Value,
}

#[derive(Clone)]
pub struct ToolRegistry {
    client: ProviderClient,
}

impl ToolRegistry {
    pub fn new(client: ProviderClient) -> Self {
        Self { client }
    }

    pub fn descriptors(&self) -> Vec<ToolDescriptor> {
        Tool::ALL.into_iter().map(Tool::descriptor).collect()
    }

    /// Run `name` with `arguments` and return its JSON output as a string
    pub async fn call(&self, name: &str, arguments: Value) -> Result<String, ToolError> {
        let value = self.call_value(name, arguments).await?;
        serde_json::to_string_pretty(&value).map_err(ToolError::Output)
    }

    pub async fn call_value(&self, name: &str, arguments: Value) -> Result<Value, ToolError> {
        let tool = Tool::from_name(name).ok_or_else(|| ToolError::UnknownTool(name.to_string()))?;
        tracing::debug!(tool = name, "tool call");

        match tool {
            Tool::ListRepositories => {
                let args: ListRepositoriesArgs = parse(tool, arguments)?;
                output(self.client.list_active_repositories(args.days).await?)
            }
            Tool::GetRepositoryInfo => {
                let args: RepositoryArgs = parse(tool, arguments)?;
                output(self.client.get_repository(&args.repository_id).await?)
            }
            Tool::GetRepositoryCommits => {
                let args: RepositoryCommitsArgs = parse(tool, arguments)?;
                let commits = self
                    .client
                    .list_commits(&args.repository_id, Some(&args.ref_name), Some(args.days))
                    .await?;
                output(commits)
            }
            Tool::GetCommitDetails => {
                let args: CommitArgs = parse(tool, arguments)?;
                output(self.client.get_commit(&args.repository_id, &args.commit_id).await?)
            }
            Tool::GetCommitChanges => {
                let args: CommitChangesArgs = parse(tool, arguments)?;
                let diffs = self
                    .client
                    .get_commit_diff(&args.repository_id, &args.from_commit, &args.to_commit)
                    .await?;
                output(diffs)
            }
            Tool::ListBranches => {
                let args: ListBranchesArgs = parse(tool, arguments)?;
                output(self.client.list_branches(&args.repository_id, Some(args.days)).await?)
            }
        }
    }
}

fn parse<T: DeserializeOwned>(tool: Tool, arguments: Value) -> Result<T, ToolError> {
    // a missing argument object means "all defaults"
    let arguments = if arguments.is_null() {
        Value::Object(Default::default())
    } else {
        arguments
    };
    serde_json::from_value(arguments).map_err(|source| ToolError::InvalidArguments {
        tool: tool.name(),
        source,
    })
}

fn output<T: Serialize>(value: T) -> Result<Value, ToolError> {
    serde_json::to_value(value).map_err(ToolError::Output)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[gp_test_utils::logged_test]
    fn every_tool_has_an_object_schema() {
        for tool in Tool::ALL {
            let descriptor = tool.descriptor();
            assert_eq!(Tool::from_name(descriptor.name), Some(tool));
            assert_eq!(descriptor.input_schema["type"], "object", "{}", descriptor.name);
        }
        let commits = Tool::GetRepositoryCommits.descriptor().input_schema;
        assert_eq!(commits["required"], serde_json::json!(["repository_id"]));
        assert_eq!(commits["properties"]["ref_name"]["default"], "master");
        assert!(Tool::from_name("delete_repository").is_none());
    }
}
