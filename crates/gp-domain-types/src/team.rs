// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Team member identities used to attribute commits

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::commit::Commit;

/// A configured team member
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub struct TeamMember {
    /// Stable key used for report file names
    pub username: String,
    /// Display name, also matched against commit author names
    pub name: String,
    /// Primary author email
    pub email: String,
    /// Additional author emails or names this member commits under
    #[serde(default)]
    pub aliases: Vec<String>,
}

impl TeamMember {
    pub fn matches_email(&self, email: &str) -> bool {
        email.trim().eq_ignore_ascii_case(self.email.trim())
    }

    pub fn matches_name(&self, name: &str) -> bool {
        name.trim().eq_ignore_ascii_case(self.name.trim())
    }

    /// Whether any alias equals the author email or name
    pub fn matches_alias(&self, email: &str, name: &str) -> bool {
        let (email, name) = (email.trim(), name.trim());
        self.aliases.iter().any(|alias| {
            let alias = alias.trim();
            alias.eq_ignore_ascii_case(email) || alias.eq_ignore_ascii_case(name)
        })
    }

    /// Whether this member authored the commit.
    ///
    /// Emails and names are compared case-insensitively; aliases may match
    /// either.
    pub fn authored(&self, commit: &Commit) -> bool {
        self.matches_email(&commit.author_email)
            || self.matches_name(&commit.author_name)
            || self.matches_alias(&commit.author_email, &commit.author_name)
    }
}
