//! Pure domain logic: the form record, its validation rules and password
//! strength presentation. Nothing in here touches the terminal or the network.
pub mod record;
pub mod strength;
pub mod validation;

pub use record::FormRecord;
pub use strength::{
    StrengthAssessment, StrengthEstimator, StrengthIndicator, StrengthLabel, ZxcvbnEstimator,
};
pub use validation::{Field, FieldError, FieldErrors};
