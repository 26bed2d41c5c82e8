use crate::report::summary::RosterSummary;
use serde::{Deserialize, Serialize};

/// 主頁面上擷取到的初步資料
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterEntry {
    pub name: String,
    pub town: Option<String>,
    pub id: u64,
    pub category: String,
}

/// 個人資料頁解析結果
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileDetails {
    pub name: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
    pub instrument: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MusicianRecord {
    pub category: String,
    pub name: String,
    pub town: Option<String>,
    pub country: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EventSettings {
    pub host_country: String,
    pub capacity: usize,
    /// Share of the capacity reserved for local musicians; the rest is international.
    pub local_share: f64,
}

impl Default for EventSettings {
    fn default() -> Self {
        Self {
            host_country: "United Kingdom".to_string(),
            capacity: 400,
            local_share: 0.75,
        }
    }
}

impl std::fmt::Display for MusicianRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} | {} | {} | {}",
            self.category,
            self.name,
            self.town.as_deref().unwrap_or("unknown"),
            self.country.as_deref().unwrap_or("unknown")
        )
    }
}

/// Outcome of a full run.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub roster: Vec<MusicianRecord>,
    pub summary: RosterSummary,
    /// Where the roster CSV was written, when an export was requested.
    pub export_path: Option<String>,
}
