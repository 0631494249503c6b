// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Provider reads exposed as JSON tools for agent pipelines.
//!
//! Each tool takes a JSON argument object and returns a JSON string. The
//! [`ToolRegistry`] describes the tools (name, description, argument
//! schema) and dispatches calls; [`serve`] runs the line-delimited
//! request/response loop used over stdio.

pub mod args;
pub mod error;
pub mod registry;
pub mod server;

pub use error::ToolError;
pub use registry::{Tool, ToolDescriptor, ToolRegistry};
pub use server::{serve, ToolRequest, ToolResponse, LIST_TOOLS};
