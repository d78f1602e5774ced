//! Plain-text screen renderer driven entirely by controller state.

use crate::gateway::{AssessmentResult, DashboardSnapshot, RecommendationResult};
use crate::profile::{
    GOAL_OPTIONS, InvestmentExperience, InvestmentTimeline, ProfileField, RiskTolerance,
};
use crate::wizard::{Action, StepKind, WizardController, WizardView};

const RULE: &str = "────────────────────────────────────────────────────────";

/// Render the current screen.
pub fn render(wizard: &WizardController) -> String {
    let view = wizard.view();
    let step = view.step.kind();
    let mut out = header(&view);

    match step {
        StepKind::Welcome => out.push_str(&render_welcome()),
        StepKind::Profile => out.push_str(&render_profile(wizard)),
        StepKind::Assessment => out.push_str(&render_assessment_intro()),
        StepKind::Recommendations => {
            if let Some(a) = wizard.session().and_then(|s| s.assessment()) {
                out.push_str(&render_assessment(a));
            }
        }
        StepKind::Dashboard => {
            if let Some(r) = wizard.session().and_then(|s| s.recommendation()) {
                out.push_str(&render_recommendation(r));
            }
        }
    }

    out.push('\n');
    out.push_str(&button(&view, step.forward_action()));
    out.push('\n');
    out
}

/// Render while a call is outstanding, from the published view alone.
///
/// Shows the header and the step's control with its in-progress label.
pub fn render_view(view: &WizardView) -> String {
    let mut out = header(view);
    out.push_str(&button(view, view.step.kind().forward_action()));
    out.push('\n');
    out
}

fn header(view: &WizardView) -> String {
    let mut out = format!("{RULE}\nInvestWise AI · {}\n{RULE}\n", view.step.kind().label());
    if let Some(error) = view.step.error() {
        out.push_str(&format!("[!] {error}  (type 'dismiss' to clear)\n\n"));
    }
    out
}

fn button(view: &WizardView, action: Action) -> String {
    let loading = view.step.is_loading();
    let label = match action {
        Action::Start => "Start Your Investment Journey",
        Action::SubmitProfile if loading => "Creating Profile...",
        Action::SubmitProfile => "Continue to Assessment",
        Action::StartAssessment if loading => "Analyzing...",
        Action::StartAssessment => "Start Assessment",
        Action::RequestPlan if loading => "Generating Recommendations...",
        Action::RequestPlan => "Get My Investment Plan",
        Action::Restart => "Start New Assessment",
        Action::EditProfile | Action::DismissError => "",
    };
    if view.is_enabled(action) {
        format!("[ {label} ]  ('next')")
    } else {
        format!("[ {label} ]  (disabled)")
    }
}

fn render_welcome() -> String {
    [
        "Your Personal Investment Psychology Coach\n",
        "  • Behavioral Analysis: identify and overcome investment biases",
        "  • Personalized Recommendations based on your psychology",
        "  • Goal-Based Planning aligned with your timeline",
    ]
    .iter()
    .map(|line| format!("{line}\n"))
    .collect()
}

fn render_profile(wizard: &WizardController) -> String {
    let draft = wizard.draft();
    let mut out = String::from("Tell us about yourself ('set <field> <value>'):\n\n");
    for field in ProfileField::ALL {
        let value = draft.get(field);
        let shown = if value.is_empty() { "—" } else { value };
        out.push_str(&format!("  {:<22} {}\n", field.as_str(), shown));
    }
    out.push_str(&format!(
        "\n  choices: experience {} · risk {} · timeline {}\n",
        join(InvestmentExperience::ALL.iter().map(|v| v.as_str())),
        join(RiskTolerance::ALL.iter().map(|v| v.as_str())),
        join(InvestmentTimeline::ALL.iter().map(|v| v.as_str())),
    ));
    out.push_str("\nFinancial goals ('goal <number>'):\n");
    for (i, goal) in GOAL_OPTIONS.iter().enumerate() {
        let mark = if draft.has_goal(goal) { "x" } else { " " };
        out.push_str(&format!("  {}. [{mark}] {goal}\n", i + 1));
    }
    for goal in draft
        .financial_goals
        .iter()
        .filter(|g| !GOAL_OPTIONS.contains(&g.as_str()))
    {
        out.push_str(&format!("     [x] {goal}\n"));
    }
    if let Some(field) = draft.missing_required() {
        out.push_str(&format!("\n  {field} is required\n"));
    }
    out
}

fn render_assessment_intro() -> String {
    [
        "Behavioral Risk Assessment\n",
        "We'll analyze:",
        "  • your risk tolerance vs. risk capacity",
        "  • behavioral patterns and potential biases",
        "  • confidence level and a personalized risk score",
    ]
    .iter()
    .map(|line| format!("{line}\n"))
    .collect()
}

fn render_assessment(a: &AssessmentResult) -> String {
    let mut out = format!(
        "Your Profile\n  Risk Score:        {}/10\n  Investor Type:     {}\n  Confidence Level:  {}\n",
        a.risk_score, a.behavioral_profile, a.confidence_level
    );
    if !a.behavioral_biases.is_empty() {
        out.push_str(&format!(
            "  Behavioral Considerations: {}\n",
            a.behavioral_biases.join(", ")
        ));
    }
    out
}

fn render_recommendation(r: &RecommendationResult) -> String {
    let mut out = String::from("Recommended Portfolio Allocation\n");
    for (category, pct) in r.allocation_labels() {
        let bar = "█".repeat((pct.clamp(0.0, 100.0) / 5.0).round() as usize);
        out.push_str(&format!("  {category:<22} {pct:>5}% {bar}\n"));
    }

    out.push_str("\nRecommended Mutual Funds\n");
    for fund in &r.mutual_funds {
        out.push_str(&format!(
            "  {} ({})\n    {}% allocation · Risk: {}\n    {}\n",
            fund.fund_name,
            fund.category,
            fund.allocation_percentage,
            fund.risk_level,
            fund.rationale
        ));
    }

    out.push_str("\nWhy This Strategy Works for You\n");
    out.push_str(&indented(r.rationale_lines()));
    out.push_str("\nRisk Management Strategy\n");
    out.push_str(&indented(r.risk_mitigation_lines()));
    out.push_str(&format!("\nExpected Returns\n  {}\n", r.expected_returns));
    out
}

/// Render what the backend stored for the session.
pub fn render_snapshot(snap: &DashboardSnapshot) -> String {
    let p = &snap.user_profile;
    let mut out = format!(
        "Server record for {} ({})\n  age {} · {} · income {} · savings {}\n",
        p.name, p.user_id, p.age, p.occupation, p.income, p.current_savings
    );
    if let Some(created) = p.created_at {
        out.push_str(&format!("  created {}\n", created.format("%Y-%m-%d %H:%M")));
    }
    match &snap.risk_assessment {
        Some(a) => out.push_str(&render_assessment(a)),
        None => out.push_str("  no assessment yet\n"),
    }
    if snap.recommendations.is_some() {
        out.push_str("  recommendations stored\n");
    }
    out.trim_end().to_string()
}

fn indented(lines: Vec<&str>) -> String {
    lines.iter().map(|line| format!("  {line}\n")).collect()
}

fn join<'a>(items: impl Iterator<Item = &'a str>) -> String {
    items.collect::<Vec<_>>().join("|")
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::gateway::{MutualFund, StoredProfile};

    #[test]
    fn assessment_values_shown_unmodified() {
        let out = render_assessment(&AssessmentResult {
            risk_score: 7.0,
            behavioral_profile: "Cautious Optimist".into(),
            confidence_level: "Medium".into(),
            behavioral_biases: vec!["loss_aversion".into()],
        });
        assert!(out.contains("7/10"));
        assert!(out.contains("Cautious Optimist"));
        assert!(out.contains("Medium"));
        assert!(out.contains("loss_aversion"));
    }

    #[test]
    fn empty_biases_are_omitted() {
        let out = render_assessment(&AssessmentResult {
            risk_score: 2.0,
            behavioral_profile: "Conservative Investor".into(),
            confidence_level: "low".into(),
            behavioral_biases: vec![],
        });
        assert!(!out.contains("Behavioral Considerations"));
    }

    #[test]
    fn recommendation_splits_narrative_and_labels() {
        let out = render_recommendation(&RecommendationResult {
            portfolio_allocation: BTreeMap::from([("mid_cap_funds".into(), 25.0)]),
            mutual_funds: vec![MutualFund {
                fund_name: "Kotak Emerging Equity Fund".into(),
                category: "Mid Cap Equity".into(),
                allocation_percentage: 25.0,
                risk_level: "High".into(),
                rationale: "Growth potential".into(),
            }],
            rationale: "first\nsecond".into(),
            risk_mitigation: "• SIP\n• Review".into(),
            expected_returns: "9.5% - 11.5%".into(),
        });
        assert!(out.contains("mid cap funds"));
        assert!(out.contains("Kotak Emerging Equity Fund"));
        assert!(out.contains("  first\n  second\n"));
        assert!(out.contains("  • Review\n"));
        assert!(out.contains("9.5% - 11.5%"));
    }

    #[test]
    fn snapshot_without_assessment() {
        let snap = DashboardSnapshot {
            user_profile: StoredProfile {
                user_id: "u-1".into(),
                name: "Asha".into(),
                age: 34,
                occupation: "Teacher".into(),
                income: 0.0,
                current_savings: 0.0,
                investment_experience: "beginner".into(),
                risk_tolerance: "low".into(),
                financial_goals: vec![],
                investment_timeline: "1-3 years".into(),
                created_at: None,
            },
            risk_assessment: None,
            recommendations: None,
        };
        let text = render_snapshot(&snap);
        assert!(text.starts_with("Server record for Asha (u-1)"));
        assert!(text.contains("no assessment yet"));
    }

    #[test]
    fn loading_view_shows_progress_label_and_disabled_control() {
        use crate::wizard::{StepStatus, WizardStep};

        let view = WizardView {
            step: WizardStep::Assessment(StepStatus::Loading),
            profile_submittable: true,
            has_session: true,
        };
        let out = render_view(&view);
        assert!(out.contains("InvestWise AI · Risk Assessment"));
        assert!(out.contains("[ Analyzing... ]  (disabled)"));

        let ready = WizardView {
            step: WizardStep::Assessment(StepStatus::Ready),
            ..view
        };
        assert!(render_view(&ready).contains("[ Start Assessment ]  ('next')"));
    }

    #[test]
    fn failed_step_shows_banner() {
        use crate::wizard::{StepStatus, WizardStep};

        let view = WizardView {
            step: WizardStep::Profile(StepStatus::Failed("Failed to create profile: HTTP 500".into())),
            profile_submittable: true,
            has_session: false,
        };
        let out = render_view(&view);
        assert!(out.contains("[!] Failed to create profile: HTTP 500"));
        assert!(out.contains("[ Continue to Assessment ]  ('next')"));
    }
}
