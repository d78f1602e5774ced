//! Onboarding wizard — a linear, gated flow over five screens.
//!
//! Each forward step after the profile form waits on a backend call and only
//! advances once that call succeeds. Failures stay on the current screen as a
//! dismissible error.

pub mod controller;
pub mod session;
pub mod step;

pub use controller::{Outcome, WizardController, WizardView};
pub use session::WizardSession;
pub use step::{Action, StepKind, StepStatus, WizardStep};
