// Run settings. There are no flags or config files: the report always
// reads and writes the conventional file names in the working directory.
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct ReportConfig {
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    /// How many of the costliest incidents to list.
    pub top_n: usize,
    /// Incidents must affect strictly more users than this to be listed.
    pub affected_users_threshold: u64,
    pub preview_rows: usize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            input_path: PathBuf::from("network_incidents.csv"),
            output_path: PathBuf::from("incidents_by_site.csv"),
            top_n: 5,
            affected_users_threshold: 100,
            preview_rows: 5,
        }
    }
}
