// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Report assembly and output files

use std::path::{Path, PathBuf};

use gp_config_types::{GeneralConfig, ReportFormat, ReportsConfig};
use gp_domain_types::TeamMember;

use crate::classify::{classify, Classification};
use crate::error::ReportError;
use crate::render::ReportTemplates;
use crate::report::{CommitLine, MemberReport, Reports, TeamReport};
use crate::snapshot::ActivitySnapshot;
use crate::stats::{repository_stats, MemberStats};

pub const TEAM_REPORT_STEM: &str = "team_report";

#[derive(Debug, Clone, PartialEq)]
pub struct ReportSettings {
    pub project_name: String,
    pub output_dir: PathBuf,
    pub format: ReportFormat,
    pub individual_reports: bool,
    pub template_dir: Option<PathBuf>,
}

impl ReportSettings {
    pub fn from_config(general: &GeneralConfig, reports: &ReportsConfig) -> Self {
        Self {
            project_name: general.project_name().to_string(),
            output_dir: PathBuf::from(general.output_dir()),
            format: reports.format(),
            individual_reports: reports.individual_reports(),
            template_dir: reports.template_dir.as_ref().map(PathBuf::from),
        }
    }
}

#[derive(Debug, Clone)]
pub struct GeneratedReports {
    pub reports: Reports,
    pub files: Vec<PathBuf>,
}

pub struct ReportGenerator {
    settings: ReportSettings,
    templates: ReportTemplates,
}

impl ReportGenerator {
    pub fn new(settings: ReportSettings) -> Result<Self, ReportError> {
        let templates = ReportTemplates::load(settings.template_dir.as_deref())?;
        Ok(Self { settings, templates })
    }

    pub fn settings(&self) -> &ReportSettings {
        &self.settings
    }

    /// Member and team reports for `snapshot`, without touching the disk
    pub fn build(&self, snapshot: &ActivitySnapshot, members: &[TeamMember]) -> Reports {
        let classification = classify(members, &snapshot.repositories);
        let generated_at = snapshot.until.format("%Y-%m-%d %H:%M:%S UTC").to_string();

        let member_reports: Vec<MemberReport> = classification
            .members
            .iter()
            .map(|entry| MemberReport {
                member: entry.member.clone(),
                time_period: snapshot.time_period(),
                days: snapshot.days,
                stats: MemberStats::compute(&entry.member, &entry.commits, snapshot.days),
                commits: entry.commits.iter().map(CommitLine::from).collect(),
                generated_at: generated_at.clone(),
            })
            .collect();

        let team = self.team_report(snapshot, &classification, &member_reports, generated_at);
        Reports {
            members: member_reports,
            team,
        }
    }

    fn team_report(
        &self,
        snapshot: &ActivitySnapshot,
        classification: &Classification,
        members: &[MemberReport],
        generated_at: String,
    ) -> TeamReport {
        TeamReport {
            project_name: self.settings.project_name.clone(),
            time_period: snapshot.time_period(),
            days: snapshot.days,
            team_size: members.len(),
            total_commits: classification.total_commits(),
            unattributed_commits: classification.unattributed.len(),
            commit_distribution: members
                .iter()
                .map(|m| (m.member.username.clone(), m.stats.total_commits))
                .collect(),
            top_active_repositories: repository_stats(classification),
            members: members.iter().map(|m| m.stats.clone()).collect(),
            generated_at,
        }
    }

    /// Report of one member, or `UnknownMember`
    pub fn member_report(
        &self,
        snapshot: &ActivitySnapshot,
        members: &[TeamMember],
        username: &str,
    ) -> Result<MemberReport, ReportError> {
        self.build(snapshot, members)
            .members
            .into_iter()
            .find(|r| r.member.username == username)
            .ok_or_else(|| ReportError::UnknownMember(username.to_string()))
    }

    /// Write JSON data, plus markdown when the format is markdown.
    ///
    /// Member files are skipped when individual reports are disabled.
    pub fn write(&self, reports: &Reports) -> Result<Vec<PathBuf>, ReportError> {
        let dir = &self.settings.output_dir;
        std::fs::create_dir_all(dir).map_err(|e| ReportError::io(dir, e))?;
        let markdown = self.settings.format == ReportFormat::Markdown;

        let mut files = Vec::new();
        if self.settings.individual_reports {
            for report in &reports.members {
                let stem = format!("{}_report", file_stem(&report.member.username));
                files.push(write_json(dir, &stem, report)?);
                if markdown {
                    files.push(write_text(dir, &stem, &self.templates.render_member(report)?)?);
                }
            }
        }

        files.push(write_json(dir, TEAM_REPORT_STEM, &reports.team)?);
        if markdown {
            files.push(write_text(dir, TEAM_REPORT_STEM, &self.templates.render_team(&reports.team)?)?);
        }

        tracing::info!(dir = %dir.display(), files = files.len(), "reports written");
        Ok(files)
    }

    pub fn generate(&self, snapshot: &ActivitySnapshot, members: &[TeamMember]) -> Result<GeneratedReports, ReportError> {
        let reports = self.build(snapshot, members);
        let files = self.write(&reports)?;
        Ok(GeneratedReports { reports, files })
    }

    pub fn render_member(&self, report: &MemberReport) -> Result<String, ReportError> {
        self.templates.render_member(report)
    }

    pub fn render_team(&self, report: &TeamReport) -> Result<String, ReportError> {
        self.templates.render_team(report)
    }
}

fn write_json<T: serde::Serialize>(dir: &Path, stem: &str, value: &T) -> Result<PathBuf, ReportError> {
    let path = dir.join(format!("{}.json", stem));
    let text = serde_json::to_string_pretty(value)?;
    std::fs::write(&path, text).map_err(|e| ReportError::io(&path, e))?;
    Ok(path)
}

fn write_text(dir: &Path, stem: &str, text: &str) -> Result<PathBuf, ReportError> {
    let path = dir.join(format!("{}.md", stem));
    std::fs::write(&path, text).map_err(|e| ReportError::io(&path, e))?;
    Ok(path)
}

/// Usernames come from config; keep them from escaping the output directory
fn file_stem(username: &str) -> String {
    username
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.' { c } else { '_' })
        .collect::<String>()
        .trim_start_matches('.')
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[gp_test_utils::logged_test]
    fn file_stems_stay_inside_the_directory() {
        assert_eq!(file_stem("zhang.san"), "zhang.san");
        assert_eq!(file_stem("../etc/passwd"), "_etc_passwd");
        assert_eq!(file_stem("li si"), "li_si");
    }

    #[gp_test_utils::logged_test]
    fn settings_follow_config_defaults() {
        let settings = ReportSettings::from_config(&GeneralConfig::default(), &ReportsConfig::default());
        assert_eq!(settings.project_name, "gitpulse");
        assert_eq!(settings.output_dir, PathBuf::from("./reports"));
        assert_eq!(settings.format, ReportFormat::Markdown);
        assert!(settings.individual_reports);
        assert!(settings.template_dir.is_none());
    }
}
