use bestseat_types::SelectionField;

/// Local, pre-network rejection of a selection
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Please select all fields")]
    MissingField(SelectionField),

    #[error("Teams must be different")]
    TeamConflict,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubmitRejected {
    #[error(transparent)]
    Invalid(#[from] ValidationError),

    /// A submission is already in flight, the submit control is disabled
    #[error("A prediction is already in progress")]
    InFlight,
}
