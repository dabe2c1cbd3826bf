// Line-oriented console report. Every section renders into any `Write` so
// the same text goes to stdout in a run and into a buffer in tests.
use crate::config::ReportConfig;
use crate::loader::LoadReport;
use crate::reports;
use crate::types::IncidentRecord;
use crate::util::{format_int, format_number};
use std::io::{self, Write};

const RULE: &str = "-------------------------------------------------------------------------------------------------";

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn incident_line(r: &IncidentRecord) -> String {
    format!(
        "- Ticket: {}, Site: {}, Severity: {}",
        r.ticket_id, r.site, r.severity
    )
}

pub fn write_load_note<W: Write>(out: &mut W, report: &LoadReport, records: usize) -> io::Result<()> {
    writeln!(
        out,
        "Processing dataset... ({} rows read, {} incidents loaded)",
        format_int(report.total_rows),
        format_int(records)
    )?;
    if report.skipped_rows > 0 {
        writeln!(
            out,
            "Note: {} rows skipped due to decode errors.",
            format_int(report.skipped_rows)
        )?;
    }
    let defaulted = report.blank_fields + report.malformed_fields;
    if defaulted > 0 {
        writeln!(
            out,
            "Note: {} numeric fields defaulted to 0 ({} blank, {} unparseable).",
            format_int(defaulted),
            format_int(report.blank_fields),
            format_int(report.malformed_fields)
        )?;
    }
    writeln!(out)
}

pub fn write_overview<W: Write>(out: &mut W, data: &[IncidentRecord]) -> io::Result<()> {
    writeln!(out, "Offices:")?;
    for site in reports::offices(data) {
        writeln!(out, "- {}", site)?;
    }
    writeln!(out, "{}", RULE)?;
    match reports::week_range(data) {
        Some((first, last)) => writeln!(out, "Analysis period: Week {} - {}", first, last),
        None => writeln!(out, "Analysis period: no week numbers recorded"),
    }
}

pub fn write_severity_totals<W: Write>(out: &mut W, data: &[IncidentRecord]) -> io::Result<()> {
    writeln!(out, "{}", RULE)?;
    writeln!(out, "Total incidents per severity level:")?;
    for s in reports::severity_stats(data) {
        writeln!(out, "- {}: {}", capitalize(s.severity), s.count)?;
    }
    Ok(())
}

pub fn write_high_impact<W: Write>(
    out: &mut W,
    data: &[IncidentRecord],
    threshold: u64,
) -> io::Result<()> {
    writeln!(out, "{}", RULE)?;
    writeln!(out, "Incidents that affected more than {} users:\n", threshold)?;
    for r in reports::above_user_threshold(data, threshold) {
        writeln!(out, "{}, Affected users: {}", incident_line(r), r.affected_users)?;
    }
    Ok(())
}

pub fn write_costliest<W: Write>(out: &mut W, data: &[IncidentRecord], n: usize) -> io::Result<()> {
    writeln!(out, "{}", RULE)?;
    writeln!(out, "The {} most expensive incidents:\n", n)?;
    for r in reports::top_by_cost(data, n) {
        writeln!(out, "{}, Cost: {} SEK", incident_line(r), format_number(r.cost_sek, 2))?;
    }
    writeln!(out, "{}", RULE)?;
    writeln!(
        out,
        "Total cost for all incidents: {} SEK",
        format_number(reports::total_cost(data), 2)
    )
}

pub fn write_resolution_by_severity<W: Write>(out: &mut W, data: &[IncidentRecord]) -> io::Result<()> {
    writeln!(out, "{}", RULE)?;
    writeln!(out, "Average resolution time per severity level:")?;
    for s in reports::severity_stats(data) {
        writeln!(
            out,
            "- {}: {:.1} minutes",
            capitalize(s.severity),
            s.avg_resolution()
        )?;
    }
    Ok(())
}

pub fn write_site_overview<W: Write>(out: &mut W, data: &[IncidentRecord]) -> io::Result<()> {
    writeln!(out, "{}", RULE)?;
    writeln!(out, "Overview per site:")?;
    for s in reports::site_stats(data) {
        writeln!(out, "- Site: {}", s.site)?;
        writeln!(out, "  Number of incidents: {}", s.count)?;
        writeln!(out, "  Total cost: {} SEK", format_number(s.total_cost, 2))?;
        writeln!(out, "  Average resolution time: {:.1} minutes\n", s.avg_resolution())?;
    }
    Ok(())
}

pub fn write_category_impact<W: Write>(out: &mut W, data: &[IncidentRecord]) -> io::Result<()> {
    writeln!(out, "{}", RULE)?;
    writeln!(out, "Average impact score per category:")?;
    for c in reports::category_stats(data) {
        writeln!(
            out,
            "- {}: {:.2} (number of incidents: {})",
            c.category,
            c.avg_impact(),
            c.count
        )?;
    }
    Ok(())
}

/// Every analysis section, in report order.
pub fn write_report<W: Write>(
    out: &mut W,
    data: &[IncidentRecord],
    config: &ReportConfig,
) -> io::Result<()> {
    write_overview(out, data)?;
    write_severity_totals(out, data)?;
    write_high_impact(out, data, config.affected_users_threshold)?;
    write_costliest(out, data, config.top_n)?;
    write_resolution_by_severity(out, data)?;
    write_site_overview(out, data)?;
    write_category_impact(out, data)
}

pub fn write_export_note<W: Write>(out: &mut W, file_name: &str) -> io::Result<()> {
    writeln!(out, "{}", RULE)?;
    writeln!(
        out,
        "The file '{}' has been created with summary per site.",
        file_name
    )
}
