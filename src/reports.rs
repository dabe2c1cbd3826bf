//! Aggregate views over the loaded incidents.
//!
//! Each view is an independent single pass over the same read-only slice.
//! Grouped views keep the first-seen order of their keys; the severity view
//! always reports `SEVERITY_LEVELS` in fixed order.

use crate::types::{IncidentRecord, SiteSummaryRow, SEVERITY_LEVELS};
use crate::util::average;
use std::cmp::Ordering;
use std::collections::{BTreeSet, HashMap};

#[derive(Debug, Clone, PartialEq)]
pub struct SeverityStats {
    pub severity: &'static str,
    pub count: usize,
    pub resolution_minutes: Vec<f64>,
}

impl SeverityStats {
    pub fn avg_resolution(&self) -> f64 {
        average(&self.resolution_minutes)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SiteStats {
    pub site: String,
    pub count: usize,
    pub total_cost: f64,
    pub resolution_minutes: Vec<f64>,
}

impl SiteStats {
    pub fn avg_resolution(&self) -> f64 {
        average(&self.resolution_minutes)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CategoryStats {
    pub category: String,
    pub count: usize,
    pub impact_scores: Vec<f64>,
}

impl CategoryStats {
    pub fn avg_impact(&self) -> f64 {
        average(&self.impact_scores)
    }
}

/// Per-site figures persisted to the export table.
#[derive(Debug, Clone, PartialEq)]
pub struct SiteSummary {
    pub site: String,
    pub incidents: usize,
    pub total_cost: f64,
    pub total_resolution: f64,
}

impl SiteSummary {
    pub fn avg_resolution(&self) -> f64 {
        if self.incidents == 0 {
            return 0.0;
        }
        self.total_resolution / self.incidents as f64
    }

    pub fn to_row(&self) -> SiteSummaryRow {
        SiteSummaryRow {
            site: self.site.clone(),
            incidents: self.incidents,
            total_cost_sek: format!("{:.2}", self.total_cost),
            avg_resolution_minutes: format!("{:.2}", self.avg_resolution()),
        }
    }
}

/// Group records by `key`, keeping groups in the order their key first
/// appears.
fn group_first_seen<'a, A>(
    data: &'a [IncidentRecord],
    key: impl Fn(&'a IncidentRecord) -> &'a str,
    mut init: impl FnMut(&'a str) -> A,
    mut fold: impl FnMut(&mut A, &'a IncidentRecord),
) -> Vec<A> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut groups: Vec<A> = Vec::new();
    for r in data {
        let k = key(r);
        let slot = *index.entry(k).or_insert_with(|| {
            groups.push(init(k));
            groups.len() - 1
        });
        fold(&mut groups[slot], r);
    }
    groups
}

/// Distinct sites, sorted.
pub fn offices(data: &[IncidentRecord]) -> Vec<&str> {
    let sites: BTreeSet<&str> = data.iter().map(|r| r.site.as_str()).collect();
    sites.into_iter().collect()
}

/// Lowest and highest week number present, if any record has one.
pub fn week_range(data: &[IncidentRecord]) -> Option<(i64, i64)> {
    let mut weeks = data.iter().filter_map(|r| r.week_number);
    let first = weeks.next()?;
    Some(weeks.fold((first, first), |(lo, hi), w| (lo.min(w), hi.max(w))))
}

/// Counts and resolution samples per severity level. Records whose
/// severity is outside `SEVERITY_LEVELS` appear in no bucket.
pub fn severity_stats(data: &[IncidentRecord]) -> Vec<SeverityStats> {
    SEVERITY_LEVELS
        .iter()
        .map(|&level| {
            let resolution_minutes: Vec<f64> = data
                .iter()
                .filter(|r| r.has_severity(level))
                .map(|r| r.resolution_minutes)
                .collect();
            SeverityStats {
                severity: level,
                count: resolution_minutes.len(),
                resolution_minutes,
            }
        })
        .collect()
}

pub fn site_stats(data: &[IncidentRecord]) -> Vec<SiteStats> {
    group_first_seen(
        data,
        |r| r.site.as_str(),
        |site| SiteStats {
            site: site.to_string(),
            count: 0,
            total_cost: 0.0,
            resolution_minutes: Vec::new(),
        },
        |acc, r| {
            acc.count += 1;
            acc.total_cost += r.cost_sek;
            acc.resolution_minutes.push(r.resolution_minutes);
        },
    )
}

pub fn category_stats(data: &[IncidentRecord]) -> Vec<CategoryStats> {
    group_first_seen(
        data,
        |r| r.category.as_str(),
        |category| CategoryStats {
            category: category.to_string(),
            count: 0,
            impact_scores: Vec::new(),
        },
        |acc, r| {
            acc.count += 1;
            acc.impact_scores.push(r.impact_score);
        },
    )
}

pub fn site_summary(data: &[IncidentRecord]) -> Vec<SiteSummary> {
    group_first_seen(
        data,
        |r| r.site.as_str(),
        |site| SiteSummary {
            site: site.to_string(),
            incidents: 0,
            total_cost: 0.0,
            total_resolution: 0.0,
        },
        |acc, r| {
            acc.incidents += 1;
            acc.total_cost += r.cost_sek;
            acc.total_resolution += r.resolution_minutes;
        },
    )
}

/// Records affecting strictly more than `threshold` users, in source order.
pub fn above_user_threshold(data: &[IncidentRecord], threshold: u64) -> Vec<&IncidentRecord> {
    data.iter().filter(|r| r.affected_users > threshold).collect()
}

/// The `n` costliest records. The sort is stable so equal costs keep their
/// source order.
pub fn top_by_cost(data: &[IncidentRecord], n: usize) -> Vec<&IncidentRecord> {
    let mut ranked: Vec<&IncidentRecord> = data.iter().collect();
    ranked.sort_by(|a, b| b.cost_sek.partial_cmp(&a.cost_sek).unwrap_or(Ordering::Equal));
    ranked.truncate(n);
    ranked
}

pub fn total_cost(data: &[IncidentRecord]) -> f64 {
    data.iter().map(|r| r.cost_sek).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn incident(id: &str, site: &str, severity: &str, cost: f64) -> IncidentRecord {
        IncidentRecord {
            ticket_id: id.to_string(),
            site: site.to_string(),
            severity: severity.to_string(),
            category: "network".to_string(),
            affected_users: 10,
            cost_sek: cost,
            resolution_minutes: 30.0,
            impact_score: 5.0,
            week_number: Some(10),
        }
    }

    fn fixture() -> Vec<IncidentRecord> {
        let mut data = vec![
            incident("T1", "HQ", "Critical", 1500.0),
            incident("T2", "Branch", "high", 300.0),
            incident("T3", "HQ", "LOW", 800.0),
            incident("T4", "Lab", "medium", 800.0),
            incident("T5", "Branch", "critical", 50.0),
            incident("T6", "HQ", "low", 2000.0),
            incident("T7", "Lab", "medium", 800.0),
        ];
        data[0].affected_users = 150;
        data[1].affected_users = 100;
        data[3].affected_users = 101;
        data[1].resolution_minutes = 90.0;
        data[4].resolution_minutes = 0.0;
        data[2].category = "wifi".to_string();
        data[2].impact_score = 8.5;
        data[5].week_number = Some(14);
        data[6].week_number = None;
        data
    }

    #[test]
    fn offices_are_sorted_and_distinct() {
        assert_eq!(offices(&fixture()), vec!["Branch", "HQ", "Lab"]);
    }

    #[test]
    fn week_range_ignores_missing_weeks() {
        assert_eq!(week_range(&fixture()), Some((10, 14)));
        assert_eq!(week_range(&[]), None);
    }

    #[test]
    fn severity_counts_match_case_insensitively() {
        let stats = severity_stats(&fixture());
        let counts: Vec<(&str, usize)> = stats.iter().map(|s| (s.severity, s.count)).collect();
        assert_eq!(
            counts,
            vec![("critical", 2), ("high", 1), ("medium", 2), ("low", 2)]
        );
        let total: usize = stats.iter().map(|s| s.count).sum();
        assert_eq!(total, fixture().len());
        assert_eq!(stats[0].avg_resolution(), 15.0);
        assert_eq!(stats[1].avg_resolution(), 90.0);
    }

    #[test]
    fn unknown_severity_is_invisible_to_severity_view() {
        let mut data = fixture();
        data.push(incident("T8", "HQ", "urgent", 10.0));
        let total: usize = severity_stats(&data).iter().map(|s| s.count).sum();
        assert_eq!(total, data.len() - 1);
    }

    #[test]
    fn empty_severity_bucket_averages_to_zero() {
        let data = vec![incident("T1", "HQ", "low", 1.0)];
        let stats = severity_stats(&data);
        assert_eq!(stats[0].count, 0);
        assert_eq!(stats[0].avg_resolution(), 0.0);
    }

    #[test]
    fn site_stats_keep_first_seen_order() {
        let stats = site_stats(&fixture());
        let sites: Vec<&str> = stats.iter().map(|s| s.site.as_str()).collect();
        assert_eq!(sites, vec!["HQ", "Branch", "Lab"]);
        assert_eq!(stats[0].count, 3);
        assert_eq!(stats[0].total_cost, 4300.0);
        assert_eq!(stats[1].avg_resolution(), 45.0);
    }

    #[test]
    fn total_cost_equals_sum_of_site_totals() {
        let data = fixture();
        let by_site: f64 = site_stats(&data).iter().map(|s| s.total_cost).sum();
        assert_eq!(total_cost(&data), by_site);
        assert_eq!(total_cost(&data), 6250.0);
    }

    #[test]
    fn category_averages_impact() {
        let stats = category_stats(&fixture());
        assert_eq!(stats.len(), 2);
        assert_eq!(stats[0].category, "network");
        assert_eq!(stats[0].count, 6);
        assert_eq!(stats[1].category, "wifi");
        assert_eq!(stats[1].avg_impact(), 8.5);
    }

    #[test]
    fn threshold_is_strict() {
        let data = fixture();
        let ids: Vec<&str> = above_user_threshold(&data, 100)
            .iter()
            .map(|r| r.ticket_id.as_str())
            .collect();
        assert_eq!(ids, vec!["T1", "T4"]);
    }

    #[test]
    fn top_by_cost_is_stable_on_ties() {
        let data = fixture();
        let ids: Vec<&str> = top_by_cost(&data, 5)
            .iter()
            .map(|r| r.ticket_id.as_str())
            .collect();
        assert_eq!(ids, vec!["T6", "T1", "T3", "T4", "T7"]);
    }

    #[test]
    fn top_by_cost_treats_signed_zero_as_a_tie() {
        let data = vec![
            incident("A", "HQ", "low", -0.0),
            incident("B", "HQ", "low", 0.0),
        ];
        let ids: Vec<&str> = top_by_cost(&data, 5)
            .iter()
            .map(|r| r.ticket_id.as_str())
            .collect();
        assert_eq!(ids, vec!["A", "B"]);
    }

    #[test]
    fn top_by_cost_handles_short_input() {
        let data = vec![incident("T1", "HQ", "low", 1.0)];
        assert_eq!(top_by_cost(&data, 5).len(), 1);
    }

    #[test]
    fn site_summary_formats_export_row() {
        let summary = site_summary(&fixture());
        assert_eq!(summary.len(), 3);
        let incidents: usize = summary.iter().map(|s| s.incidents).sum();
        assert_eq!(incidents, 7);
        assert_eq!(
            summary[1].to_row(),
            SiteSummaryRow {
                site: "Branch".to_string(),
                incidents: 2,
                total_cost_sek: "350.00".to_string(),
                avg_resolution_minutes: "45.00".to_string(),
            }
        );
    }
}
