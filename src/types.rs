use serde::{Deserialize, Serialize};
use tabled::Tabled;

/// Severity levels in the order every severity view reports them.
pub const SEVERITY_LEVELS: [&str; 4] = ["critical", "high", "medium", "low"];

#[derive(Debug, Deserialize)]
pub struct RawIncidentRow {
    pub ticket_id: Option<String>,
    pub site: Option<String>,
    pub severity: Option<String>,
    pub category: Option<String>,
    pub affected_users: Option<String>,
    pub cost_sek: Option<String>,
    pub resolution_minutes: Option<String>,
    pub impact_score: Option<String>,
    pub week_number: Option<String>,
}

/// One incident after coercion. Never mutated after loading.
#[derive(Debug, Clone, PartialEq)]
pub struct IncidentRecord {
    pub ticket_id: String,
    pub site: String,
    /// Kept as written in the source; compared case-insensitively.
    pub severity: String,
    pub category: String,
    pub affected_users: u64,
    pub cost_sek: f64,
    pub resolution_minutes: f64,
    pub impact_score: f64,
    pub week_number: Option<i64>,
}

impl IncidentRecord {
    pub fn has_severity(&self, level: &str) -> bool {
        self.severity.eq_ignore_ascii_case(level)
    }
}

#[derive(Debug, Serialize, Tabled, Clone, PartialEq)]
pub struct SiteSummaryRow {
    pub site: String,
    pub incidents: usize,
    #[serde(rename = "total_cost_SEK")]
    #[tabled(rename = "total_cost_SEK")]
    pub total_cost_sek: String,
    pub avg_resolution_minutes: String,
}

impl SiteSummaryRow {
    pub const HEADER: [&'static str; 4] =
        ["site", "incidents", "total_cost_SEK", "avg_resolution_minutes"];
}
