pub mod error;
pub mod form;

pub use error::{SubmitRejected, ValidationError};
pub use form::{SelectionForm, SelectionState, SubmissionResult};
