//! WizardController — owns the draft, the session and the current step, and
//! gates every transition on the data the next screen needs.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::{info, warn};

use crate::error::{Error, GatewayError, WizardError};
use crate::gateway::{DashboardSnapshot, RemoteGateway};
use crate::profile::{ProfileDraft, ProfileField, ProfileSubmission};

use super::session::WizardSession;
use super::step::{Action, StepKind, StepStatus, WizardStep};

/// What a remote action did to the wizard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The call succeeded and the wizard moved on.
    Advanced(StepKind),
    /// The call failed; the step is unchanged and shows `error`.
    Stayed { error: String },
}

/// Snapshot published to observers on every step or status change.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct WizardView {
    pub step: WizardStep,
    /// Name and age are filled in.
    pub profile_submittable: bool,
    pub has_session: bool,
}

impl WizardView {
    /// Whether a control should be enabled.
    ///
    /// Every control is disabled while its step's call is outstanding.
    pub fn is_enabled(&self, action: Action) -> bool {
        if self.step.is_loading() {
            return false;
        }
        match action {
            Action::DismissError => self.step.error().is_some(),
            _ if action.step() != Some(self.step.kind()) => false,
            Action::SubmitProfile => self.profile_submittable,
            Action::StartAssessment | Action::RequestPlan => self.has_session,
            _ => true,
        }
    }
}

/// The wizard's state machine.
///
/// Holds at most one outstanding call: every remote action takes `&mut self`
/// and refuses to start while the current step is loading.
pub struct WizardController {
    gateway: Arc<dyn RemoteGateway>,
    step: WizardStep,
    draft: ProfileDraft,
    session: Option<WizardSession>,
    tx: watch::Sender<WizardView>,
}

impl WizardController {
    pub fn new(gateway: Arc<dyn RemoteGateway>) -> Self {
        let (tx, _rx) = watch::channel(WizardView::default());
        Self {
            gateway,
            step: WizardStep::Welcome,
            draft: ProfileDraft::default(),
            session: None,
            tx,
        }
    }

    pub fn step(&self) -> &WizardStep {
        &self.step
    }

    pub fn draft(&self) -> &ProfileDraft {
        &self.draft
    }

    pub fn session(&self) -> Option<&WizardSession> {
        self.session.as_ref()
    }

    pub fn session_id(&self) -> Option<&str> {
        self.session.as_ref().map(WizardSession::session_id)
    }

    /// Message from the last failed call, shown alongside the current step.
    pub fn error(&self) -> Option<&str> {
        self.step.error()
    }

    pub fn is_loading(&self) -> bool {
        self.step.is_loading()
    }

    pub fn view(&self) -> WizardView {
        WizardView {
            step: self.step.clone(),
            profile_submittable: self.draft.is_submittable(),
            has_session: self.session.is_some(),
        }
    }

    pub fn is_enabled(&self, action: Action) -> bool {
        self.view().is_enabled(action)
    }

    /// Watch step and status changes, including `Loading` while a call runs.
    pub fn subscribe(&self) -> watch::Receiver<WizardView> {
        self.tx.subscribe()
    }

    // ── Local transitions ───────────────────────────────────────────

    /// Welcome → Profile.
    pub fn start(&mut self) -> Result<StepKind, WizardError> {
        self.ensure_on(StepKind::Welcome, Action::Start)?;
        Ok(self.advance())
    }

    /// Replace one draft field. Only while the profile form is shown and idle.
    pub fn set_field(&mut self, field: ProfileField, value: &str) -> Result<(), WizardError> {
        self.ensure_on(StepKind::Profile, Action::EditProfile)
            .map_err(|e| editable(e, self.step.kind()))?;
        self.draft.set(field, value)?;
        self.publish();
        Ok(())
    }

    /// Flip a goal's membership. Returns whether it is now selected.
    pub fn toggle_goal(&mut self, goal: &str) -> Result<bool, WizardError> {
        self.ensure_on(StepKind::Profile, Action::EditProfile)
            .map_err(|e| editable(e, self.step.kind()))?;
        Ok(self.draft.toggle_goal(goal))
    }

    /// Dashboard → Welcome, discarding the session and resetting the draft.
    pub fn restart(&mut self) -> Result<StepKind, WizardError> {
        self.ensure_on(StepKind::Dashboard, Action::Restart)?;
        let discarded = self.session.take();
        self.draft = ProfileDraft::default();
        info!(
            session_id = discarded.as_ref().map(WizardSession::session_id).unwrap_or(""),
            "Wizard restarted"
        );
        Ok(self.advance())
    }

    /// Clear a shown error. Returns whether there was one.
    pub fn dismiss_error(&mut self) -> bool {
        if self.step.error().is_none() {
            return false;
        }
        self.step.set_status(StepStatus::Ready);
        self.publish();
        true
    }

    // ── Remote transitions ──────────────────────────────────────────

    /// Profile → Assessment. Coerces the draft and creates the profile.
    pub async fn submit_profile(&mut self) -> Result<Outcome, WizardError> {
        self.ensure_on(StepKind::Profile, Action::SubmitProfile)?;
        if let Some(field) = self.draft.missing_required() {
            warn!(%field, "Profile submitted with a required field empty");
            return Err(WizardError::MissingField {
                field: field.to_string(),
            });
        }

        let submission = ProfileSubmission::from_draft(&self.draft);
        self.begin();
        let gateway = Arc::clone(&self.gateway);
        match gateway.create_profile(&submission).await {
            Ok(session_id) => {
                info!(%session_id, "Session started");
                self.session = Some(WizardSession::new(session_id));
                Ok(Outcome::Advanced(self.advance()))
            }
            Err(e) => Ok(self.fail(Action::SubmitProfile, e)),
        }
    }

    /// Assessment → Recommendations.
    pub async fn start_assessment(&mut self) -> Result<Outcome, WizardError> {
        self.ensure_on(StepKind::Assessment, Action::StartAssessment)?;
        let session_id = self.require_session()?;

        self.begin();
        let gateway = Arc::clone(&self.gateway);
        match gateway.assess_risk(&session_id).await {
            Ok(result) => {
                if let Some(session) = self.session.as_mut() {
                    session.assessment = Some(result);
                }
                Ok(Outcome::Advanced(self.advance()))
            }
            Err(e) => Ok(self.fail(Action::StartAssessment, e)),
        }
    }

    /// Recommendations → Dashboard.
    pub async fn request_plan(&mut self) -> Result<Outcome, WizardError> {
        self.ensure_on(StepKind::Recommendations, Action::RequestPlan)?;
        let session_id = self.require_session()?;

        self.begin();
        let gateway = Arc::clone(&self.gateway);
        match gateway.recommend(&session_id).await {
            Ok(result) => {
                if let Some(session) = self.session.as_mut() {
                    session.recommendation = Some(result);
                }
                Ok(Outcome::Advanced(self.advance()))
            }
            Err(e) => Ok(self.fail(Action::RequestPlan, e)),
        }
    }

    /// What the server has stored for this session. Does not change the step.
    pub async fn server_snapshot(&self) -> Result<DashboardSnapshot, Error> {
        let session_id = self.session_id().ok_or(WizardError::MissingSession)?;
        Ok(self.gateway.dashboard(session_id).await?)
    }

    // ── Internals ───────────────────────────────────────────────────

    fn ensure_on(&self, kind: StepKind, action: Action) -> Result<(), WizardError> {
        if self.step.is_loading() {
            warn!(step = %self.step.kind(), %action, "Action refused: request in flight");
            return Err(WizardError::Busy {
                step: self.step.kind(),
            });
        }
        if self.step.kind() != kind {
            warn!(step = %self.step.kind(), %action, "Action refused: wrong step");
            return Err(WizardError::InvalidTransition {
                from: self.step.kind(),
                action,
            });
        }
        Ok(())
    }

    fn require_session(&self) -> Result<String, WizardError> {
        self.session_id()
            .map(str::to_string)
            .ok_or(WizardError::MissingSession)
    }

    fn begin(&mut self) {
        self.step.set_status(StepStatus::Loading);
        self.publish();
    }

    fn advance(&mut self) -> StepKind {
        let from = self.step.kind();
        let to = from.next();
        debug_assert!(from.can_transition_to(to));
        self.step = WizardStep::ready(to);
        self.publish();
        info!(%from, %to, "Wizard step changed");
        to
    }

    fn fail(&mut self, action: Action, err: GatewayError) -> Outcome {
        let error = err.to_string();
        warn!(step = %self.step.kind(), %action, %error, "Remote call failed");
        self.step.set_status(StepStatus::Failed(error.clone()));
        self.publish();
        Outcome::Stayed { error }
    }

    fn publish(&self) {
        self.tx.send_replace(self.view());
    }
}

/// Report draft edits off the profile form as `NotEditable` rather than as a
/// generic wrong-step transition.
fn editable(err: WizardError, step: StepKind) -> WizardError {
    match err {
        WizardError::InvalidTransition { .. } => WizardError::NotEditable { step },
        other => other,
    }
}
