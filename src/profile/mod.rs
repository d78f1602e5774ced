//! Profile draft store — the fields a user fills in before the first
//! server call, and the one-shot coercion into the submission payload.

pub mod model;
pub mod submission;

pub use model::{
    GOAL_OPTIONS, InvestmentExperience, InvestmentTimeline, ProfileDraft, ProfileField,
    RiskTolerance,
};
pub use submission::ProfileSubmission;
