use crate::domain::schedule::{
    CompanyComplianceStats, ComplianceRecord, ComplianceStats, ComplianceStatus, DateAssignment,
    ItemSnapshot, ProjectComplianceStats, WorkItemRef,
};
use serde::Deserialize;
use std::collections::BTreeMap;
use time::Date;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct ComplianceThresholds {
    #[serde(default = "default_threshold_days")]
    pub critical_threshold_days: u32,
    #[serde(default = "default_threshold_days")]
    pub upcoming_threshold_days: u32,
}

fn default_threshold_days() -> u32 {
    7
}

impl Default for ComplianceThresholds {
    fn default() -> Self {
        Self {
            critical_threshold_days: default_threshold_days(),
            upcoming_threshold_days: default_threshold_days(),
        }
    }
}

/// Classifies one (item, company) pair. Flexibility plays no part here.
pub fn compute_status(
    item: WorkItemRef,
    company_id: Uuid,
    assignment: Option<&DateAssignment>,
    snapshot: Option<&ItemSnapshot>,
    today: Date,
    thresholds: &ComplianceThresholds,
) -> ComplianceRecord {
    let mut record = ComplianceRecord {
        level: item.level,
        item_id: item.id,
        company_id,
        project_id: snapshot.map(|s| s.project_id),
        window: assignment.map(|a| a.window),
        status: ComplianceStatus::NoDate,
        delay_days: 0,
        progress: snapshot.map(|s| s.progress.min(100)).unwrap_or(0),
    };

    let Some(assignment) = assignment else {
        return record;
    };
    let end = assignment.window.end;

    if let Some(snapshot) = snapshot
        && snapshot.completed
    {
        record.status = ComplianceStatus::Completed;
        record.delay_days = snapshot
            .completed_on
            .map(|completed_on| days_between(end, completed_on))
            .unwrap_or(0);

        return record;
    }

    if today > end {
        let late = days_between(end, today);
        record.status = if late <= i64::from(thresholds.critical_threshold_days) {
            ComplianceStatus::Overdue
        } else {
            ComplianceStatus::Critical
        };
        record.delay_days = late;
    } else if days_between(today, end) <= i64::from(thresholds.upcoming_threshold_days) {
        record.status = ComplianceStatus::Upcoming;
    } else {
        record.status = ComplianceStatus::OnTime;
    }

    record
}

fn days_between(from: Date, to: Date) -> i64 {
    (to - from).whole_days()
}

/// Overall statistics for a set of records. Empty input yields all zeros.
pub fn summarize(records: &[ComplianceRecord]) -> ComplianceStats {
    summarize_iter(records.iter())
}

fn summarize_iter<'a>(records: impl Iterator<Item = &'a ComplianceRecord>) -> ComplianceStats {
    let mut stats = ComplianceStats::default();
    let mut delay_sum = 0i64;
    let mut delayed_records = 0i64;

    for record in records {
        stats.total += 1;
        match record.status {
            ComplianceStatus::Overdue => stats.delayed_count += 1,
            ComplianceStatus::Critical => stats.critical_count += 1,
            status if status.is_compliant() => stats.compliant_count += 1,
            _ => {}
        }
        if record.delay_days > 0 {
            delay_sum += record.delay_days;
            delayed_records += 1;
        }
    }

    if stats.total > 0 {
        stats.compliance_rate =
            (stats.compliant_count as f64 / stats.total as f64 * 100.0).round() as u32;
    }
    if delayed_records > 0 {
        stats.average_delay = delay_sum as f64 / delayed_records as f64;
    }

    stats
}

/// Per-project statistics, one entry for every project present in `records`.
/// Records whose project is unknown are left out.
pub fn aggregate_by_project(records: &[ComplianceRecord]) -> Vec<ProjectComplianceStats> {
    let mut groups: BTreeMap<Uuid, Vec<&ComplianceRecord>> = BTreeMap::new();
    for record in records {
        if let Some(project_id) = record.project_id {
            groups.entry(project_id).or_default().push(record);
        }
    }

    groups
        .into_iter()
        .map(|(project_id, group)| ProjectComplianceStats {
            project_id,
            stats: summarize_iter(group.into_iter()),
        })
        .collect()
}

/// Per-company statistics. Every id in `companies` gets an entry even when it
/// has no records.
pub fn aggregate_by_company(
    records: &[ComplianceRecord],
    companies: &[Uuid],
) -> Vec<CompanyComplianceStats> {
    let mut groups: BTreeMap<Uuid, Vec<&ComplianceRecord>> = companies
        .iter()
        .map(|company_id| (*company_id, Vec::new()))
        .collect();
    for record in records {
        groups.entry(record.company_id).or_default().push(record);
    }

    groups
        .into_iter()
        .map(|(company_id, group)| CompanyComplianceStats {
            company_id,
            stats: summarize_iter(group.into_iter()),
        })
        .collect()
}
