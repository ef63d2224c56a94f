//! Team and stadium catalogs.
//!
//! Both lists ship as JSON data files compiled into the crate and can be
//! replaced from disk. Lookups go through [`normalize::lookup_key`], so user
//! input is matched regardless of case, width or spacing.

mod error;
pub mod normalize;

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

pub use error::CatalogError;
use normalize::lookup_key;

pub const TEAM_COUNT: usize = 30;

const BUNDLED_TEAMS: &str = include_str!("../data/teams.json");
const BUNDLED_STADIUMS: &str = include_str!("../data/stadiums.json");

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    pub name: String,
    pub abbr: String,
}

#[derive(Debug, Clone)]
pub struct Catalog {
    teams: Vec<Team>,
    stadiums: Vec<String>,
    team_index: HashMap<String, usize>,
    stadium_index: HashMap<String, usize>,
}

impl Catalog {
    /// Catalog compiled into the binary
    pub fn bundled() -> Result<Self, CatalogError> {
        Self::from_json(BUNDLED_TEAMS, BUNDLED_STADIUMS)
    }

    /// Load catalogs, falling back to the bundled data for any path not given
    pub fn load(
        teams_file: Option<&Path>,
        stadiums_file: Option<&Path>,
    ) -> Result<Self, CatalogError> {
        let teams = match teams_file {
            Some(path) => read_file(path)?,
            None => BUNDLED_TEAMS.to_string(),
        };
        let stadiums = match stadiums_file {
            Some(path) => read_file(path)?,
            None => BUNDLED_STADIUMS.to_string(),
        };

        Self::from_json(&teams, &stadiums)
    }

    pub fn from_json(teams: &str, stadiums: &str) -> Result<Self, CatalogError> {
        let teams: Vec<Team> = serde_json::from_str(teams)?;
        let stadiums: Vec<String> = serde_json::from_str(stadiums)?;
        Self::new(teams, stadiums)
    }

    /// Build a catalog, rejecting empty names and entries that collide after normalization
    pub fn new(teams: Vec<Team>, stadiums: Vec<String>) -> Result<Self, CatalogError> {
        if teams.len() != TEAM_COUNT {
            return Err(CatalogError::TeamCount {
                expected: TEAM_COUNT,
                found: teams.len(),
            });
        }

        let mut team_index = HashMap::new();
        for (idx, team) in teams.iter().enumerate() {
            for key in [&team.name, &team.abbr] {
                insert_unique(&mut team_index, key, idx)?;
            }
        }

        let mut stadium_index = HashMap::new();
        for (idx, stadium) in stadiums.iter().enumerate() {
            insert_unique(&mut stadium_index, stadium, idx)?;
        }

        tracing::debug!(
            "Catalog loaded: {} teams, {} stadiums",
            teams.len(),
            stadiums.len()
        );

        Ok(Self {
            teams,
            stadiums,
            team_index,
            stadium_index,
        })
    }

    /// Find a team by full name or abbreviation
    pub fn team(&self, input: &str) -> Option<&Team> {
        self.team_index
            .get(&lookup_key(input))
            .map(|&idx| &self.teams[idx])
    }

    /// Canonical spelling of a stadium name
    pub fn stadium(&self, input: &str) -> Option<&str> {
        self.stadium_index
            .get(&lookup_key(input))
            .map(|&idx| self.stadiums[idx].as_str())
    }

    pub fn teams(&self) -> &[Team] {
        &self.teams
    }

    pub fn stadiums(&self) -> &[String] {
        &self.stadiums
    }
}

fn read_file(path: &Path) -> Result<String, CatalogError> {
    tracing::info!("Loading catalog from {}", path.display());
    fs::read_to_string(path).map_err(|source| CatalogError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn insert_unique(
    index: &mut HashMap<String, usize>,
    name: &str,
    idx: usize,
) -> Result<(), CatalogError> {
    let key = lookup_key(name);
    if key.is_empty() {
        return Err(CatalogError::EmptyEntry);
    }

    match index.insert(key, idx) {
        // A team's abbreviation may not shadow another entry, but the same
        // entry registering twice is harmless
        Some(prev) if prev != idx => Err(CatalogError::Duplicate(name.to_string())),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn bundled_catalog_has_thirty_teams() {
        let catalog = Catalog::bundled().unwrap();
        assert_eq!(catalog.teams().len(), TEAM_COUNT);
        assert_eq!(catalog.stadiums().len(), 30);
    }

    #[test]
    fn team_lookup_by_name_and_abbreviation() {
        let catalog = Catalog::bundled().unwrap();

        let yankees = catalog.team("new york yankees").unwrap();
        assert_eq!(yankees.name, "New York Yankees");
        assert_eq!(yankees.abbr, "NYY");

        assert_eq!(catalog.team("bos").unwrap().name, "Boston Red Sox");
        assert!(catalog.team("Springfield Isotopes").is_none());
    }

    #[test]
    fn stadium_lookup_is_case_insensitive() {
        let catalog = Catalog::bundled().unwrap();

        assert_eq!(catalog.stadium("LoanDepot Park"), Some("loanDepot Park"));
        assert_eq!(catalog.stadium("loandepot park"), Some("loanDepot Park"));
        assert_eq!(catalog.stadium("FENWAY PARK"), Some("Fenway Park"));
        assert_eq!(catalog.stadium("legacy stadium used in demo"), None);
    }

    #[test]
    fn variant_cased_duplicates_are_rejected() {
        let teams = serde_json::from_str::<Vec<Team>>(BUNDLED_TEAMS).unwrap();
        let stadiums = vec!["LoanDepot Park".to_string(), "loanDepot Park".to_string()];

        let err = Catalog::new(teams, stadiums).unwrap_err();
        assert!(matches!(err, CatalogError::Duplicate(name) if name == "loanDepot Park"));
    }

    #[test]
    fn abbreviation_colliding_with_other_team_is_rejected() {
        let mut teams = serde_json::from_str::<Vec<Team>>(BUNDLED_TEAMS).unwrap();
        teams[1].abbr = "ARI".to_string();

        let err = Catalog::new(teams, vec![]).unwrap_err();
        assert!(matches!(err, CatalogError::Duplicate(_)));
    }

    #[test]
    fn wrong_team_count_is_rejected() {
        let err = Catalog::from_json(
            r#"[{ "name": "Boston Red Sox", "abbr": "BOS" }]"#,
            r#"["Fenway Park"]"#,
        )
        .unwrap_err();

        assert!(matches!(
            err,
            CatalogError::TeamCount {
                expected: 30,
                found: 1
            }
        ));
    }

    #[test]
    fn stadiums_can_be_loaded_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"["Fenway Park", "Yankee Stadium"]"#).unwrap();

        let catalog = Catalog::load(None, Some(file.path())).unwrap();
        assert_eq!(catalog.stadiums().len(), 2);
        assert_eq!(catalog.teams().len(), TEAM_COUNT);
    }

    #[test]
    fn missing_file_reports_path() {
        let err = Catalog::load(Some(Path::new("/nonexistent/teams.json")), None).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/teams.json"));
    }
}
