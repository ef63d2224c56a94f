use std::fmt;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub enum AppEvent {
    UiEvent(UiEvent),
    /// Raw user choice for one form field, resolved against the catalog by the backend
    SelectionChanged {
        field: SelectionField,
        value: String,
    },
    ClearField(SelectionField),
    ResetForm,
    Submit,
    Cancel,
    ListCatalog(CatalogKind),
    ShowCatalog {
        kind: CatalogKind,
        entries: Vec<String>,
    },
    ShowSelection(SelectionView),
    SubmissionStarted {
        busy_label: String,
    },
    ShowImage(ImageView),
    ShowError(String),
    StatusUpdate(String),
    BackendReady,
}

#[derive(Debug, Clone)]
pub enum UiEvent {
    Help,
    Show,
    Close,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SelectionField {
    Team1,
    Team2,
    Venue,
}

impl SelectionField {
    pub const ALL: [SelectionField; 3] = [Self::Team1, Self::Team2, Self::Venue];

    /// Form field name used on the wire
    pub fn as_str(&self) -> &'static str {
        match self {
            SelectionField::Team1 => "team1",
            SelectionField::Team2 => "team2",
            SelectionField::Venue => "venue",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "team1" => Some(Self::Team1),
            "team2" => Some(Self::Team2),
            "venue" | "stadium" => Some(Self::Venue),
            _ => None,
        }
    }
}

impl fmt::Display for SelectionField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogKind {
    Teams,
    Venues,
}

/// Snapshot of the form as rendered by the front end
#[derive(Debug, Clone, Default)]
pub struct SelectionView {
    pub team1: Option<String>,
    pub team2: Option<String>,
    pub venue: Option<String>,
    pub submit_label: String,
    pub submit_enabled: bool,
}

#[derive(Debug, Clone)]
pub struct ImageView {
    pub path: PathBuf,
    pub format: String,
    pub size: usize,
}

/// A validated selection, ready to be sent to the prediction endpoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub team1: String,
    pub team2: String,
    pub venue: String,
}

impl Selection {
    /// Form fields in wire order
    pub fn fields(&self) -> [(&'static str, &str); 3] {
        [
            (SelectionField::Team1.as_str(), self.team1.as_str()),
            (SelectionField::Team2.as_str(), self.team2.as_str()),
            (SelectionField::Venue.as_str(), self.venue.as_str()),
        ]
    }
}
