//! Wizard steps — which screen is shown and whether its call is outstanding.

use serde::{Deserialize, Serialize};

/// The five screens, in order.
///
/// Progresses linearly: Welcome → Profile → Assessment → Recommendations →
/// Dashboard, and back to Welcome on restart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepKind {
    Welcome,
    Profile,
    Assessment,
    Recommendations,
    Dashboard,
}

impl StepKind {
    /// Check if a transition from `self` to `target` is valid.
    pub fn can_transition_to(&self, target: StepKind) -> bool {
        use StepKind::*;
        matches!(
            (self, target),
            (Welcome, Profile)
                | (Profile, Assessment)
                | (Assessment, Recommendations)
                | (Recommendations, Dashboard)
                | (Dashboard, Welcome)
        )
    }

    /// The step reached on success from this one.
    pub fn next(&self) -> StepKind {
        use StepKind::*;
        match self {
            Welcome => Profile,
            Profile => Assessment,
            Assessment => Recommendations,
            Recommendations => Dashboard,
            Dashboard => Welcome,
        }
    }

    /// Heading shown in the navigation bar.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Welcome => "Welcome",
            Self::Profile => "Profile Setup",
            Self::Assessment => "Risk Assessment",
            Self::Recommendations => "Recommendations",
            Self::Dashboard => "Your Dashboard",
        }
    }

    /// The control that moves this step forward.
    pub fn forward_action(&self) -> Action {
        match self {
            Self::Welcome => Action::Start,
            Self::Profile => Action::SubmitProfile,
            Self::Assessment => Action::StartAssessment,
            Self::Recommendations => Action::RequestPlan,
            Self::Dashboard => Action::Restart,
        }
    }
}

impl std::fmt::Display for StepKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Welcome => "welcome",
            Self::Profile => "profile",
            Self::Assessment => "assessment",
            Self::Recommendations => "recommendations",
            Self::Dashboard => "dashboard",
        };
        write!(f, "{s}")
    }
}

/// State of the remote call on a step that issues one.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "status", content = "message", rename_all = "snake_case")]
pub enum StepStatus {
    #[default]
    Ready,
    Loading,
    /// The last attempt failed; the message is shown until dismissed or retried.
    Failed(String),
}

/// Current screen together with its call status.
///
/// Only the three steps that call the backend carry a status, so "loading on
/// the welcome screen" cannot be expressed.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "step", content = "state", rename_all = "snake_case")]
pub enum WizardStep {
    #[default]
    Welcome,
    Profile(StepStatus),
    Assessment(StepStatus),
    Recommendations(StepStatus),
    Dashboard,
}

impl WizardStep {
    /// A fresh, idle step of the given kind.
    pub fn ready(kind: StepKind) -> Self {
        Self::with_status(kind, StepStatus::Ready)
    }

    fn with_status(kind: StepKind, status: StepStatus) -> Self {
        match kind {
            StepKind::Welcome => Self::Welcome,
            StepKind::Profile => Self::Profile(status),
            StepKind::Assessment => Self::Assessment(status),
            StepKind::Recommendations => Self::Recommendations(status),
            StepKind::Dashboard => Self::Dashboard,
        }
    }

    pub fn kind(&self) -> StepKind {
        match self {
            Self::Welcome => StepKind::Welcome,
            Self::Profile(_) => StepKind::Profile,
            Self::Assessment(_) => StepKind::Assessment,
            Self::Recommendations(_) => StepKind::Recommendations,
            Self::Dashboard => StepKind::Dashboard,
        }
    }

    pub fn status(&self) -> Option<&StepStatus> {
        match self {
            Self::Profile(s) | Self::Assessment(s) | Self::Recommendations(s) => Some(s),
            Self::Welcome | Self::Dashboard => None,
        }
    }

    fn status_mut(&mut self) -> Option<&mut StepStatus> {
        match self {
            Self::Profile(s) | Self::Assessment(s) | Self::Recommendations(s) => Some(s),
            Self::Welcome | Self::Dashboard => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.status(), Some(StepStatus::Loading))
    }

    /// Error message from the last failed call on this step, if any.
    pub fn error(&self) -> Option<&str> {
        match self.status() {
            Some(StepStatus::Failed(msg)) => Some(msg),
            _ => None,
        }
    }

    /// Set the call status. No-op on steps that make no calls.
    pub(crate) fn set_status(&mut self, status: StepStatus) {
        if let Some(s) = self.status_mut() {
            *s = status;
        }
    }
}

/// User-triggered controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    Start,
    EditProfile,
    SubmitProfile,
    StartAssessment,
    RequestPlan,
    Restart,
    DismissError,
}

impl Action {
    /// The step this control lives on.
    pub fn step(&self) -> Option<StepKind> {
        match self {
            Self::Start => Some(StepKind::Welcome),
            Self::EditProfile | Self::SubmitProfile => Some(StepKind::Profile),
            Self::StartAssessment => Some(StepKind::Assessment),
            Self::RequestPlan => Some(StepKind::Recommendations),
            Self::Restart => Some(StepKind::Dashboard),
            Self::DismissError => None,
        }
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Start => "start",
            Self::EditProfile => "edit profile",
            Self::SubmitProfile => "submit profile",
            Self::StartAssessment => "start assessment",
            Self::RequestPlan => "request plan",
            Self::Restart => "restart",
            Self::DismissError => "dismiss error",
        };
        write!(f, "{s}")
    }
}
