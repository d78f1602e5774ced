//! Profile draft and its enumerated fields.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::error::WizardError;

/// Goals offered by the profile screen.
///
/// Toggling is not restricted to this list; renderers use it to lay out choices.
pub const GOAL_OPTIONS: [&str; 8] = [
    "Retirement Planning",
    "Child Education",
    "Emergency Fund",
    "Wealth Creation",
    "Tax Saving",
    "Home Purchase",
    "Travel Fund",
    "Business Investment",
];

/// How much investing the user has done before.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvestmentExperience {
    #[default]
    Beginner,
    Intermediate,
    Experienced,
}

impl InvestmentExperience {
    pub const ALL: [Self; 3] = [Self::Beginner, Self::Intermediate, Self::Experienced];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Beginner => "beginner",
            Self::Intermediate => "intermediate",
            Self::Experienced => "experienced",
        }
    }
}

/// Self-declared appetite for volatility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskTolerance {
    #[default]
    Low,
    Moderate,
    High,
}

impl RiskTolerance {
    pub const ALL: [Self; 3] = [Self::Low, Self::Moderate, Self::High];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Moderate => "moderate",
            Self::High => "high",
        }
    }
}

/// Investment horizon band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum InvestmentTimeline {
    #[default]
    #[serde(rename = "1-3 years")]
    OneToThreeYears,
    #[serde(rename = "3-5 years")]
    ThreeToFiveYears,
    #[serde(rename = "5-10 years")]
    FiveToTenYears,
    #[serde(rename = "10+ years")]
    TenPlusYears,
}

impl InvestmentTimeline {
    pub const ALL: [Self; 4] = [
        Self::OneToThreeYears,
        Self::ThreeToFiveYears,
        Self::FiveToTenYears,
        Self::TenPlusYears,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OneToThreeYears => "1-3 years",
            Self::ThreeToFiveYears => "3-5 years",
            Self::FiveToTenYears => "5-10 years",
            Self::TenPlusYears => "10+ years",
        }
    }
}

macro_rules! display_and_parse {
    ($ty:ty, $field:literal) => {
        impl std::fmt::Display for $ty {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $ty {
            type Err = WizardError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let wanted = s.trim();
                Self::ALL
                    .into_iter()
                    .find(|v| v.as_str().eq_ignore_ascii_case(wanted))
                    .ok_or_else(|| WizardError::InvalidChoice {
                        field: $field.to_string(),
                        value: s.to_string(),
                    })
            }
        }
    };
}

display_and_parse!(InvestmentExperience, "investment_experience");
display_and_parse!(RiskTolerance, "risk_tolerance");
display_and_parse!(InvestmentTimeline, "investment_timeline");

/// A single editable field of the draft.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileField {
    Name,
    Age,
    Occupation,
    Income,
    CurrentSavings,
    InvestmentExperience,
    RiskTolerance,
    InvestmentTimeline,
}

impl ProfileField {
    pub const ALL: [Self; 8] = [
        Self::Name,
        Self::Age,
        Self::Occupation,
        Self::Income,
        Self::CurrentSavings,
        Self::InvestmentExperience,
        Self::RiskTolerance,
        Self::InvestmentTimeline,
    ];

    /// Wire name of the field, also accepted by [`ProfileField::from_str`].
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Age => "age",
            Self::Occupation => "occupation",
            Self::Income => "income",
            Self::CurrentSavings => "current_savings",
            Self::InvestmentExperience => "investment_experience",
            Self::RiskTolerance => "risk_tolerance",
            Self::InvestmentTimeline => "investment_timeline",
        }
    }
}

impl std::fmt::Display for ProfileField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ProfileField {
    type Err = WizardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace('-', "_");
        let wanted = match wanted.as_str() {
            "savings" => "current_savings",
            "experience" => "investment_experience",
            "risk" => "risk_tolerance",
            "timeline" => "investment_timeline",
            other => other,
        };
        Self::ALL
            .into_iter()
            .find(|f| f.as_str() == wanted)
            .ok_or_else(|| WizardError::InvalidChoice {
                field: "field".to_string(),
                value: s.to_string(),
            })
    }
}

/// The in-progress profile the user edits before submission.
///
/// Numeric fields hold raw text; they are coerced once, when the profile is
/// submitted (see [`crate::profile::ProfileSubmission`]).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileDraft {
    pub name: String,
    pub age: String,
    pub occupation: String,
    pub income: String,
    pub current_savings: String,
    pub investment_experience: InvestmentExperience,
    pub risk_tolerance: RiskTolerance,
    pub investment_timeline: InvestmentTimeline,
    pub financial_goals: BTreeSet<String>,
}

impl ProfileDraft {
    /// Replace one field's value.
    ///
    /// Text fields take the value as-is. Enumerated fields must name one of
    /// their choices; otherwise the draft is left unchanged.
    pub fn set(&mut self, field: ProfileField, value: &str) -> Result<(), WizardError> {
        match field {
            ProfileField::Name => self.name = value.to_string(),
            ProfileField::Age => self.age = value.to_string(),
            ProfileField::Occupation => self.occupation = value.to_string(),
            ProfileField::Income => self.income = value.to_string(),
            ProfileField::CurrentSavings => self.current_savings = value.to_string(),
            ProfileField::InvestmentExperience => self.investment_experience = value.parse()?,
            ProfileField::RiskTolerance => self.risk_tolerance = value.parse()?,
            ProfileField::InvestmentTimeline => self.investment_timeline = value.parse()?,
        }
        Ok(())
    }

    /// Current text of a field, as a renderer would show it.
    pub fn get(&self, field: ProfileField) -> &str {
        match field {
            ProfileField::Name => &self.name,
            ProfileField::Age => &self.age,
            ProfileField::Occupation => &self.occupation,
            ProfileField::Income => &self.income,
            ProfileField::CurrentSavings => &self.current_savings,
            ProfileField::InvestmentExperience => self.investment_experience.as_str(),
            ProfileField::RiskTolerance => self.risk_tolerance.as_str(),
            ProfileField::InvestmentTimeline => self.investment_timeline.as_str(),
        }
    }

    /// Flip membership of a goal. Returns whether the goal is now selected.
    pub fn toggle_goal(&mut self, goal: &str) -> bool {
        if self.financial_goals.remove(goal) {
            false
        } else {
            self.financial_goals.insert(goal.to_string());
            true
        }
    }

    pub fn has_goal(&self, goal: &str) -> bool {
        self.financial_goals.contains(goal)
    }

    /// First required field that is still empty, if any. Whitespace counts
    /// as content.
    pub fn missing_required(&self) -> Option<ProfileField> {
        if self.name.is_empty() {
            Some(ProfileField::Name)
        } else if self.age.is_empty() {
            Some(ProfileField::Age)
        } else {
            None
        }
    }

    /// Name and age are both present.
    pub fn is_submittable(&self) -> bool {
        self.missing_required().is_none()
    }
}
