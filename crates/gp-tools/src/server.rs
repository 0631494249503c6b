// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Line-delimited JSON request/response loop.
//!
//! Each input line is `{"id": .., "tool": "..", "arguments": {..}}`; each
//! output line is `{"id": .., "result": ..}` or
//! `{"id": .., "error": {"code": "..", "message": ".."}}`. The reserved tool
//! name [`LIST_TOOLS`] returns the tool descriptors. Requests are handled
//! one at a time, in order.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

use crate::error::ToolError;
use crate::registry::ToolRegistry;

pub const LIST_TOOLS: &str = "tools/list";

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ToolRequest {
    #[serde(default)]
    pub id: Value,
    pub tool: String,
    #[serde(default)]
    pub arguments: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToolResponse {
    pub id: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<Value>,
}

impl ToolResponse {
    fn ok(id: Value, result: Value) -> Self {
        Self {
            id,
            result: Some(result),
            error: None,
        }
    }

    fn err(id: Value, code: &str, message: String) -> Self {
        Self {
            id,
            result: None,
            error: Some(json!({ "code": code, "message": message })),
        }
    }
}

/// Serve requests from `reader` until end of input
pub async fn serve<R, W>(registry: &ToolRegistry, reader: R, mut writer: W) -> std::io::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    tracing::info!("tool loop started");
    let mut handled = 0usize;

    let mut lines = reader.lines();
    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        let response = handle_line(registry, &line).await;
        let mut buf = serde_json::to_vec(&response)?;
        buf.push(b'\n');
        writer.write_all(&buf).await?;
        writer.flush().await?;
        handled += 1;
    }

    tracing::info!(handled, "tool loop finished");
    Ok(())
}

async fn handle_line(registry: &ToolRegistry, line: &str) -> ToolResponse {
    let request: ToolRequest = match serde_json::from_str(line) {
        Ok(request) => request,
        Err(err) => {
            tracing::warn!(error = %err, "unreadable tool request");
            return ToolResponse::err(Value::Null, "invalid_request", err.to_string());
        }
    };

    if request.tool == LIST_TOOLS {
        return match serde_json::to_value(registry.descriptors()) {
            Ok(tools) => ToolResponse::ok(request.id, tools),
            Err(err) => ToolResponse::err(request.id, "internal_error", err.to_string()),
        };
    }

    match registry.call_value(&request.tool, request.arguments).await {
        Ok(result) => ToolResponse::ok(request.id, result),
        Err(err) => {
            log_failure(&request.tool, &err);
            ToolResponse::err(request.id, err.code(), err.to_string())
        }
    }
}

fn log_failure(tool: &str, err: &ToolError) {
    match err {
        ToolError::Provider(inner) if !inner.is_not_found() => {
            tracing::warn!(tool, error = %err, "tool call failed")
        }
        _ => tracing::debug!(tool, error = %err, "tool call rejected"),
    }
}
