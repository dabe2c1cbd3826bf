use crate::error::{ReportError, Result};
use crate::types::{IncidentRecord, RawIncidentRow};
use crate::util::{parse_i64_safe, parse_integer, parse_locale_decimal, Coerced, CoercionOutcome};
use csv::ReaderBuilder;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, warn};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub total_rows: usize,
    /// Rows the csv decoder could not turn into a record at all.
    pub skipped_rows: usize,
    /// Numeric fields that were empty and defaulted to zero.
    pub blank_fields: usize,
    /// Numeric fields with unparseable text that defaulted to zero.
    pub malformed_fields: usize,
}

impl LoadReport {
    fn tally<T>(&mut self, ticket: &str, field: &str, raw: Option<&str>, coerced: &Coerced<T>) {
        match coerced.outcome {
            CoercionOutcome::Parsed => {}
            CoercionOutcome::Blank => self.blank_fields += 1,
            CoercionOutcome::Malformed => {
                self.malformed_fields += 1;
                warn!(
                    ticket,
                    field,
                    value = raw.unwrap_or_default(),
                    "unparseable number, using 0"
                );
            }
        }
    }
}

pub fn load_incidents(path: &Path) -> Result<(Vec<IncidentRecord>, LoadReport)> {
    let file = File::open(path).map_err(|source| ReportError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    load_from_reader(file, path)
}

/// Read incident rows in source order. The first row names the columns;
/// absent columns simply coerce to their defaults.
pub fn load_from_reader<R: Read>(reader: R, source: &Path) -> Result<(Vec<IncidentRecord>, LoadReport)> {
    let mut rdr = ReaderBuilder::new().flexible(true).from_reader(reader);
    let mut report = LoadReport::default();
    let mut records: Vec<IncidentRecord> = Vec::new();

    for result in rdr.deserialize::<RawIncidentRow>() {
        report.total_rows += 1;
        let row = match result {
            Ok(r) => r,
            Err(e) if matches!(e.kind(), csv::ErrorKind::Io(_)) => {
                return Err(ReportError::Csv {
                    path: source.to_path_buf(),
                    source: e,
                });
            }
            Err(e) => {
                warn!(row = report.total_rows, error = %e, "skipping undecodable row");
                report.skipped_rows += 1;
                continue;
            }
        };
        records.push(coerce_row(row, &mut report));
    }

    debug!(
        rows = report.total_rows,
        records = records.len(),
        "loaded incidents from {}",
        source.display()
    );
    Ok((records, report))
}

fn coerce_row(row: RawIncidentRow, report: &mut LoadReport) -> IncidentRecord {
    let ticket_id = text_or(row.ticket_id, "");
    let site = key_or(row.site, "Unknown", &ticket_id, "site");
    let severity = key_or(row.severity, "unknown", &ticket_id, "severity");
    let category = key_or(row.category, "Uncategorized", &ticket_id, "category");

    let affected_users = parse_integer(row.affected_users.as_deref());
    report.tally(&ticket_id, "affected_users", row.affected_users.as_deref(), &affected_users);
    let cost_sek = parse_locale_decimal(row.cost_sek.as_deref());
    report.tally(&ticket_id, "cost_sek", row.cost_sek.as_deref(), &cost_sek);
    let resolution_minutes = parse_locale_decimal(row.resolution_minutes.as_deref());
    report.tally(
        &ticket_id,
        "resolution_minutes",
        row.resolution_minutes.as_deref(),
        &resolution_minutes,
    );
    let impact_score = parse_locale_decimal(row.impact_score.as_deref());
    report.tally(&ticket_id, "impact_score", row.impact_score.as_deref(), &impact_score);

    IncidentRecord {
        week_number: parse_i64_safe(row.week_number.as_deref()),
        ticket_id,
        site,
        severity,
        category,
        affected_users: affected_users.value,
        cost_sek: cost_sek.value,
        resolution_minutes: resolution_minutes.value,
        impact_score: impact_score.value,
    }
}

fn text_or(value: Option<String>, fallback: &str) -> String {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| fallback.to_string())
}

// Grouping keys must be populated; fill the gap but say so.
fn key_or(value: Option<String>, fallback: &str, ticket: &str, field: &str) -> String {
    let key = text_or(value, "");
    if key.is_empty() {
        warn!(ticket, field, fallback, "missing group key");
        return fallback.to_string();
    }
    key
}
