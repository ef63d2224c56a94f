//! Selection form state machine.
//!
//! `Idle -> Loading -> {Success | Failure}`; the next submit clears the
//! previous outcome before re-entering `Loading`. While `Loading`, the submit
//! control is disabled and further submits are rejected without side effects.

use bestseat_types::{Selection, SelectionField, SelectionView};

use crate::error::{SubmitRejected, ValidationError};

pub const SUBMIT_LABEL: &str = "Find best seat";
pub const BUSY_LABEL: &str = "Predicting...";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionState {
    pub team1: Option<String>,
    pub team2: Option<String>,
    pub venue: Option<String>,
}

impl SelectionState {
    pub fn get(&self, field: SelectionField) -> Option<&str> {
        match field {
            SelectionField::Team1 => self.team1.as_deref(),
            SelectionField::Team2 => self.team2.as_deref(),
            SelectionField::Venue => self.venue.as_deref(),
        }
    }

    fn slot(&mut self, field: SelectionField) -> &mut Option<String> {
        match field {
            SelectionField::Team1 => &mut self.team1,
            SelectionField::Team2 => &mut self.team2,
            SelectionField::Venue => &mut self.venue,
        }
    }

    /// Missing fields first, then the team conflict
    pub fn validate(&self) -> Result<Selection, ValidationError> {
        let (Some(team1), Some(team2), Some(venue)) = (&self.team1, &self.team2, &self.venue)
        else {
            let field = SelectionField::ALL
                .into_iter()
                .find(|&field| self.get(field).is_none())
                .unwrap_or(SelectionField::Team1);
            return Err(ValidationError::MissingField(field));
        };

        if team1 == team2 {
            return Err(ValidationError::TeamConflict);
        }

        Ok(Selection {
            team1: team1.clone(),
            team2: team2.clone(),
            venue: venue.clone(),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SubmissionResult {
    #[default]
    Idle,
    Loading,
    Success(Vec<u8>),
    Failure(String),
}

#[derive(Debug, Default)]
pub struct SelectionForm {
    state: SelectionState,
    result: SubmissionResult,
}

impl SelectionForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a field; an empty value clears it
    pub fn select(&mut self, field: SelectionField, value: impl Into<String>) {
        let value = value.into();
        let value = value.trim();
        *self.state.slot(field) = (!value.is_empty()).then(|| value.to_string());
        tracing::debug!("Selection {} = {:?}", field, self.state.get(field));
    }

    pub fn clear(&mut self, field: SelectionField) {
        *self.state.slot(field) = None;
    }

    /// Clear selections and any finished outcome; an in-flight submission is left alone
    pub fn reset(&mut self) {
        self.state = SelectionState::default();
        if !self.is_busy() {
            self.result = SubmissionResult::Idle;
        }
    }

    pub fn state(&self) -> &SelectionState {
        &self.state
    }

    pub fn result(&self) -> &SubmissionResult {
        &self.result
    }

    pub fn validate(&self) -> Result<Selection, ValidationError> {
        self.state.validate()
    }

    /// Start a submission.
    ///
    /// Any prior image or error is cleared first. On validation failure the
    /// form moves to `Failure` with the validation message and nothing is
    /// sent; on success it enters `Loading` and the caller owns the request.
    pub fn begin_submit(&mut self) -> Result<Selection, SubmitRejected> {
        if self.is_busy() {
            return Err(SubmitRejected::InFlight);
        }

        self.result = SubmissionResult::Idle;

        match self.state.validate() {
            Ok(selection) => {
                self.result = SubmissionResult::Loading;
                Ok(selection)
            }
            Err(e) => {
                self.result = SubmissionResult::Failure(e.to_string());
                Err(e.into())
            }
        }
    }

    /// Settle the in-flight submission. Returns false if nothing was in flight.
    pub fn finish(&mut self, outcome: Result<Vec<u8>, String>) -> bool {
        if !self.is_busy() {
            tracing::warn!("Submission finished while form was not loading");
            return false;
        }

        self.result = match outcome {
            Ok(bytes) => SubmissionResult::Success(bytes),
            Err(message) => SubmissionResult::Failure(message),
        };
        true
    }

    pub fn is_busy(&self) -> bool {
        matches!(self.result, SubmissionResult::Loading)
    }

    pub fn submit_label(&self) -> &'static str {
        if self.is_busy() { BUSY_LABEL } else { SUBMIT_LABEL }
    }

    pub fn error(&self) -> Option<&str> {
        match &self.result {
            SubmissionResult::Failure(message) => Some(message),
            _ => None,
        }
    }

    pub fn view(&self) -> SelectionView {
        SelectionView {
            team1: self.state.team1.clone(),
            team2: self.state.team2.clone(),
            venue: self.state.venue.clone(),
            submit_label: self.submit_label().to_string(),
            submit_enabled: !self.is_busy(),
        }
    }
}
