//! Static station directory with id lookup and free-text search.

mod table;

use std::collections::{HashMap, HashSet};

/// A railway station as shown to users.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Station {
    pub id: String,
    /// Primary display name (Hebrew).
    pub name_local: String,
    /// Secondary display name (English).
    pub name_alt: String,
}

/// Immutable lookup table of all known stations.
#[derive(Debug, Clone)]
pub struct StationDirectory {
    stations: Vec<Station>,
    by_id: HashMap<String, usize>,
}

impl StationDirectory {
    /// Builds the directory from the bundled station table.
    pub fn load() -> Self {
        Self::from_stations(
            table::STATIONS
                .iter()
                .map(|(id, local, alt)| Station {
                    id: (*id).to_string(),
                    name_local: (*local).to_string(),
                    name_alt: (*alt).to_string(),
                })
                .collect(),
        )
    }

    pub fn from_stations(stations: Vec<Station>) -> Self {
        let by_id = stations
            .iter()
            .enumerate()
            .map(|(idx, station)| (station.id.clone(), idx))
            .collect();
        Self { stations, by_id }
    }

    pub fn find_by_id(&self, id: &str) -> Option<&Station> {
        self.by_id.get(id).map(|&idx| &self.stations[idx])
    }

    /// Display name for `id`, or the id itself when the station is unknown.
    pub fn display_name<'a>(&'a self, id: &'a str) -> &'a str {
        self.find_by_id(id)
            .map(|station| station.name_local.as_str())
            .unwrap_or(id)
    }

    /// Case-insensitive substring search over both display names.
    ///
    /// Results are deduplicated by primary display name and ordered by it, so
    /// the same query always produces the same list. A blank query matches
    /// nothing.
    pub fn search(&self, query: &str, limit: Option<usize>) -> Vec<&Station> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }

        let mut matches: Vec<&Station> = self
            .stations
            .iter()
            .filter(|station| {
                station.name_local.to_lowercase().contains(&needle)
                    || station.name_alt.to_lowercase().contains(&needle)
            })
            .collect();
        matches.sort_by(|a, b| a.name_local.cmp(&b.name_local));

        let mut seen = HashSet::new();
        matches.retain(|station| seen.insert(station.name_local.clone()));

        if let Some(limit) = limit {
            matches.truncate(limit);
        }
        matches
    }

    pub fn len(&self) -> usize {
        self.stations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }
}

impl Default for StationDirectory {
    fn default() -> Self {
        Self::load()
    }
}
