use crate::domain::model::{EventSettings, MusicianRecord};
use crate::report::flags::flag_for;
use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;

/// Counts derived from the final roster.
#[derive(Debug, Clone, PartialEq)]
pub struct RosterSummary {
    /// Category counts in first-seen order.
    pub categories: Vec<(String, usize)>,
    /// Country counts in first-seen order; `None` is an unknown country.
    pub countries: Vec<(Option<String>, usize)>,
    pub local: usize,
    pub international: usize,
    pub total: usize,
    pub settings: EventSettings,
}

impl RosterSummary {
    pub fn from_roster(roster: &[MusicianRecord], settings: &EventSettings) -> Self {
        let categories = tally(roster.iter().map(|m| m.category.clone()));
        let countries = tally(roster.iter().map(|m| m.country.clone()));

        let local = countries
            .iter()
            .filter(|(country, _)| country.as_deref() == Some(settings.host_country.as_str()))
            .map(|(_, count)| count)
            .sum();
        let total = roster.len();

        Self {
            categories,
            countries,
            local,
            international: total - local,
            total,
            settings: settings.clone(),
        }
    }

    pub fn local_percent(&self) -> u32 {
        percent(self.local, self.total)
    }

    pub fn international_percent(&self) -> u32 {
        percent(self.international, self.total)
    }

    /// Local musicians as a share of the local places (`capacity * local_share`).
    pub fn local_quota_fill(&self) -> u32 {
        quota_fill(
            self.local,
            self.settings.capacity as f64 * self.settings.local_share,
        )
    }

    pub fn international_quota_fill(&self) -> u32 {
        quota_fill(
            self.international,
            self.settings.capacity as f64 * (1.0 - self.settings.local_share),
        )
    }
}

fn tally<K: Eq + Hash + Clone>(keys: impl Iterator<Item = K>) -> Vec<(K, usize)> {
    let mut counts: Vec<(K, usize)> = Vec::new();
    let mut index: HashMap<K, usize> = HashMap::new();
    for key in keys {
        match index.get(&key) {
            Some(&i) => counts[i].1 += 1,
            None => {
                index.insert(key.clone(), counts.len());
                counts.push((key, 1));
            }
        }
    }
    counts
}

/// Truncated percentage; an empty whole is 0%.
fn percent(part: usize, whole: usize) -> u32 {
    if whole == 0 {
        return 0;
    }
    (part * 100 / whole) as u32
}

fn quota_fill(count: usize, places: f64) -> u32 {
    if places <= 0.0 {
        return 0;
    }
    (count as f64 * 100.0 / places) as u32
}

pub fn category_icon(category: &str) -> Option<&'static str> {
    match category {
        "Guitar" | "Bass" => Some("\u{1F3B8}"),
        "Drums" => Some("\u{1F941}"),
        "Voice" => Some("\u{1F3A4}"),
        "Keyboards" => Some("\u{1F3B9}"),
        _ => None,
    }
}

impl fmt::Display for RosterSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "\nInstrument Categories")?;
        for (category, count) in &self.categories {
            match category_icon(category) {
                Some(icon) => writeln!(f, "{} {}: {}", icon, category, count)?,
                None => writeln!(f, "{}: {}", category, count)?,
            }
        }

        writeln!(f, "\nCountries")?;
        for (country, count) in &self.countries {
            let name = country.as_deref().unwrap_or("Unknown");
            match country.as_deref().and_then(flag_for) {
                Some(flag) => writeln!(f, "{} {}: {}", flag, name, count)?,
                None => writeln!(f, "{}: {}", name, count)?,
            }
        }

        writeln!(f, "\nTotals:")?;
        writeln!(
            f,
            "Local: {} ({}%) International: {} ({}%)",
            self.local,
            self.local_percent(),
            self.international,
            self.international_percent()
        )?;
        writeln!(
            f,
            "{}/{} Confirmed Musicians.",
            self.total, self.settings.capacity
        )?;
        write!(
            f,
            "Local quota {}% filled; International quota {}% filled (assumes {}% locals)",
            self.local_quota_fill(),
            self.international_quota_fill(),
            (self.settings.local_share * 100.0).round() as u32
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn musician(category: &str, country: Option<&str>) -> MusicianRecord {
        MusicianRecord {
            category: category.to_string(),
            name: "Someone".to_string(),
            town: None,
            country: country.map(str::to_string),
        }
    }

    fn sample_roster() -> Vec<MusicianRecord> {
        let mut roster = Vec::new();
        for i in 0..250 {
            let category = ["Guitar", "Drums", "Voice", "Bass", "Keyboards"][i % 5];
            roster.push(musician(category, Some("United Kingdom")));
        }
        for i in 0..30 {
            roster.push(musician(if i % 2 == 0 { "Guitar" } else { "Brass" }, Some("Italy")));
        }
        for _ in 0..20 {
            roster.push(musician("Voice", None));
        }
        roster
    }

    #[test]
    fn test_quota_percentages_for_sample_roster() {
        let summary = RosterSummary::from_roster(&sample_roster(), &EventSettings::default());

        assert_eq!(summary.total, 300);
        assert_eq!(summary.local, 250);
        assert_eq!(summary.international, 50);
        assert_eq!(summary.local_percent(), 83);
        assert_eq!(summary.international_percent(), 16);
        assert_eq!(summary.local_quota_fill(), 83);
        assert_eq!(summary.international_quota_fill(), 50);
    }

    #[test]
    fn test_totals_match_breakdowns() {
        let roster = sample_roster();
        let summary = RosterSummary::from_roster(&roster, &EventSettings::default());

        let by_country: usize = summary.countries.iter().map(|(_, n)| n).sum();
        let by_category: usize = summary.categories.iter().map(|(_, n)| n).sum();
        assert_eq!(by_country, summary.total);
        assert_eq!(by_category, summary.total);
        assert_eq!(summary.local + summary.international, roster.len());
    }

    #[test]
    fn test_counts_keep_first_seen_order() {
        let summary = RosterSummary::from_roster(&sample_roster(), &EventSettings::default());

        let categories: Vec<&str> = summary.categories.iter().map(|(c, _)| c.as_str()).collect();
        assert_eq!(categories, vec!["Guitar", "Drums", "Voice", "Bass", "Keyboards", "Brass"]);
        assert_eq!(
            summary.countries,
            vec![
                (Some("United Kingdom".to_string()), 250),
                (Some("Italy".to_string()), 30),
                (None, 20),
            ]
        );
    }

    #[test]
    fn test_unknown_country_counts_as_international() {
        let roster = vec![musician("Voice", None), musician("Voice", Some("United Kingdom"))];
        let summary = RosterSummary::from_roster(&roster, &EventSettings::default());

        assert_eq!(summary.local, 1);
        assert_eq!(summary.international, 1);
    }

    #[test]
    fn test_host_country_is_configurable() {
        let settings = EventSettings {
            host_country: "Italy".to_string(),
            capacity: 1000,
            local_share: 0.5,
        };
        let summary = RosterSummary::from_roster(&sample_roster(), &settings);

        assert_eq!(summary.local, 30);
        assert_eq!(summary.international, 270);
        assert_eq!(summary.local_quota_fill(), 6);
        assert_eq!(summary.international_quota_fill(), 54);
    }

    #[test]
    fn test_empty_roster_reports_zero() {
        let summary = RosterSummary::from_roster(&[], &EventSettings::default());

        assert_eq!(summary.total, 0);
        assert_eq!(summary.local_percent(), 0);
        assert_eq!(summary.international_percent(), 0);
        assert_eq!(summary.local_quota_fill(), 0);
        assert!(summary.to_string().contains("0/400 Confirmed Musicians."));
    }

    #[test]
    fn test_display() {
        let roster = vec![
            musician("Guitar", Some("United Kingdom")),
            musician("Guitar", Some("Italy")),
            musician("Brass", None),
            musician("Drums", Some("United Kingdom")),
        ];
        let text = RosterSummary::from_roster(&roster, &EventSettings::default()).to_string();

        assert!(text.contains("\nInstrument Categories\n🎸 Guitar: 2\nBrass: 1\n🥁 Drums: 1\n"));
        assert!(text.contains("\nCountries\n🇬🇧 United Kingdom: 2\n🇮🇹 Italy: 1\nUnknown: 1\n"));
        assert!(text.contains("Local: 2 (50%) International: 2 (50%)"));
        assert!(text.contains("4/400 Confirmed Musicians."));
        assert!(text.ends_with(
            "Local quota 0% filled; International quota 2% filled (assumes 75% locals)"
        ));
    }
}
