// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

use gp_domain_types::TeamMember;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, schemars::JsonSchema, Default, PartialEq)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct TeamSection {
    /// Members whose commits are attributed in reports
    #[serde(default)]
    pub members: Vec<TeamMember>,
}

impl TeamSection {
    pub fn find(&self, username: &str) -> Option<&TeamMember> {
        self.members.iter().find(|m| m.username == username)
    }
}
