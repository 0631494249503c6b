// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Markdown rendering.
//!
//! Built-in templates are compiled in. A template directory may replace
//! either of them with `member_report.md.hbs` or `team_report.md.hbs`.

use std::path::Path;

use handlebars::{handlebars_helper, no_escape, Handlebars};

use crate::error::ReportError;
use crate::report::{MemberReport, TeamReport};

pub const MEMBER_TEMPLATE: &str = "member_report";
pub const TEAM_TEMPLATE: &str = "team_report";

const TEMPLATE_EXTENSION: &str = ".md.hbs";

const BUILTIN: [(&str, &str); 2] = [
    (MEMBER_TEMPLATE, include_str!("../templates/member_report.md.hbs")),
    (TEAM_TEMPLATE, include_str!("../templates/team_report.md.hbs")),
];

handlebars_helper!(format_number: |value: f64| format!("{:.1}", value));
handlebars_helper!(join: |items: array, separator: str| {
    items
        .iter()
        .map(|item| item.as_str().map(str::to_string).unwrap_or_else(|| item.to_string()))
        .collect::<Vec<_>>()
        .join(separator)
});

pub struct ReportTemplates {
    registry: Handlebars<'static>,
}

impl ReportTemplates {
    pub fn builtin() -> Result<Self, ReportError> {
        Self::load(None)
    }

    /// Built-in templates, overridden by files found in `dir`
    pub fn load(dir: Option<&Path>) -> Result<Self, ReportError> {
        let mut registry = Handlebars::new();
        registry.register_escape_fn(no_escape);
        registry.register_helper("format_number", Box::new(format_number));
        registry.register_helper("join", Box::new(join));

        for (name, source) in BUILTIN {
            let override_path = dir.map(|d| d.join(format!("{}{}", name, TEMPLATE_EXTENSION)));
            match override_path.filter(|p| p.is_file()) {
                Some(path) => {
                    let text = std::fs::read_to_string(&path).map_err(|e| ReportError::io(&path, e))?;
                    registry.register_template_string(name, text)?;
                    tracing::info!(template = name, path = %path.display(), "using custom report template");
                }
                None => registry.register_template_string(name, source)?,
            }
        }

        Ok(Self { registry })
    }

    pub fn render_member(&self, report: &MemberReport) -> Result<String, ReportError> {
        Ok(self.registry.render(MEMBER_TEMPLATE, report)?)
    }

    pub fn render_team(&self, report: &TeamReport) -> Result<String, ReportError> {
        Ok(self.registry.render(TEAM_TEMPLATE, report)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::CommitLine;
    use crate::stats::MemberStats;
    use gp_domain_types::TeamMember;
    use std::collections::BTreeMap;

    fn member_report() -> MemberReport {
        MemberReport {
            member: TeamMember {
                username: "alice".into(),
                name: "Alice <Ops>".into(),
                email: "alice@example.com".into(),
                aliases: vec![],
            },
            time_period: "2024-01-24 to 2024-01-31".into(),
            days: 7,
            stats: MemberStats {
                username: "alice".into(),
                name: "Alice <Ops>".into(),
                email: "alice@example.com".into(),
                total_commits: 1,
                additions: 12,
                deletions: 3,
                repositories: vec!["team/api".into(), "team/web".into()],
                active_days: 1,
                commit_frequency: 1.0 / 7.0,
            },
            commits: vec![CommitLine {
                id: "abcdef123456".into(),
                short_id: "abcdef12".into(),
                authored_date: "2024-01-30T10:00:00Z".into(),
                repository: "team/api".into(),
                branch: Some("master".into()),
                title: "Fix login redirect".into(),
                additions: 12,
                deletions: 3,
            }],
            generated_at: "2024-01-31 12:00:00 UTC".into(),
        }
    }

    #[gp_test_utils::logged_test]
    fn builtin_member_template_renders_stats_and_rows() {
        let templates = ReportTemplates::builtin().unwrap();
        let text = templates.render_member(&member_report()).unwrap();

        assert!(text.contains("# Activity report: Alice <Ops>"));
        assert!(text.contains("**Commit frequency:** 0.1 per day"));
        assert!(text.contains("team/api, team/web"));
        assert!(text.contains("`abcdef12` | Fix login redirect | +12 / -3"));
    }

    #[gp_test_utils::logged_test]
    fn builtin_team_template_handles_no_activity() {
        let templates = ReportTemplates::builtin().unwrap();
        let report = TeamReport {
            project_name: "demo".into(),
            time_period: "2024-01-24 to 2024-01-31".into(),
            days: 7,
            team_size: 0,
            total_commits: 0,
            unattributed_commits: 0,
            commit_distribution: BTreeMap::new(),
            top_active_repositories: vec![],
            members: vec![],
            generated_at: "now".into(),
        };
        let text = templates.render_team(&report).unwrap();
        assert!(text.contains("# Team activity report: demo"));
        assert!(text.contains("No repository activity in this period."));
    }

    #[gp_test_utils::logged_test]
    fn directory_overrides_one_template() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("member_report.md.hbs"),
            "{{member.username}}: {{stats.total_commits}} commits",
        )
        .unwrap();

        let templates = ReportTemplates::load(Some(dir.path())).unwrap();
        assert_eq!(templates.render_member(&member_report()).unwrap(), "alice: 1 commits");
    }

    #[gp_test_utils::logged_test]
    fn broken_override_is_a_template_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("team_report.md.hbs"), "{{#each members}}").unwrap();

        assert!(matches!(
            ReportTemplates::load(Some(dir.path())),
            Err(ReportError::Template(_))
        ));
    }
}
