//! The wire payload for profile creation, with numeric fields coerced.

use std::collections::BTreeSet;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::model::{InvestmentExperience, InvestmentTimeline, ProfileDraft, RiskTolerance};

/// Body of `POST /api/user-profile`.
///
/// Built exactly once per submission from a [`ProfileDraft`]. Unparseable or
/// negative numeric text becomes zero rather than rejecting the submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileSubmission {
    pub name: String,
    pub age: u32,
    pub occupation: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub income: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub current_savings: Decimal,
    pub investment_experience: InvestmentExperience,
    pub risk_tolerance: RiskTolerance,
    pub financial_goals: BTreeSet<String>,
    pub investment_timeline: InvestmentTimeline,
}

impl ProfileSubmission {
    pub fn from_draft(draft: &ProfileDraft) -> Self {
        Self {
            name: draft.name.clone(),
            age: coerce_age(&draft.age),
            occupation: draft.occupation.clone(),
            income: coerce_amount(&draft.income),
            current_savings: coerce_amount(&draft.current_savings),
            investment_experience: draft.investment_experience,
            risk_tolerance: draft.risk_tolerance,
            financial_goals: draft.financial_goals.clone(),
            investment_timeline: draft.investment_timeline,
        }
    }
}

impl From<&ProfileDraft> for ProfileSubmission {
    fn from(draft: &ProfileDraft) -> Self {
        Self::from_draft(draft)
    }
}

/// Whole years from the leading integer; trailing text is ignored, so
/// `"34 years"` is 34. No leading digits or a negative value gives 0.
pub fn coerce_age(raw: &str) -> u32 {
    match leading_number(raw, false) {
        Some(Number {
            negative: false,
            text,
        }) => text.parse().unwrap_or(0),
        _ => 0,
    }
}

/// Money from the leading decimal; trailing text is ignored, so `"50,000"`
/// is 50. No leading number or a negative value gives 0.
pub fn coerce_amount(raw: &str) -> Decimal {
    let Some(Number {
        negative: false,
        text,
    }) = leading_number(raw, true)
    else {
        return Decimal::ZERO;
    };
    let text = text.to_ascii_lowercase();
    // ".5" reads as 0.5.
    let text = if text.starts_with('.') {
        format!("0{text}")
    } else {
        text
    };
    let parsed = if text.contains('e') {
        Decimal::from_scientific(&text)
    } else {
        Decimal::from_str(&text)
    };
    parsed.map(|d| d.normalize()).unwrap_or(Decimal::ZERO)
}

/// Unsigned numeric prefix and its sign.
#[derive(Debug, PartialEq, Eq)]
struct Number<'a> {
    negative: bool,
    text: &'a str,
}

/// Longest numeric prefix after leading whitespace: optional sign, digits,
/// and when `decimal` is set an optional fraction and exponent.
fn leading_number(raw: &str, decimal: bool) -> Option<Number<'_>> {
    let s = raw.trim_start();
    let (negative, s) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let bytes = s.as_bytes();
    let digits_from = |start: usize| {
        bytes[start..]
            .iter()
            .take_while(|b| b.is_ascii_digit())
            .count()
    };

    let int_digits = digits_from(0);
    let mut end = int_digits;
    let mut any_digits = int_digits > 0;

    if decimal && bytes.get(end) == Some(&b'.') {
        let frac_digits = digits_from(end + 1);
        if frac_digits > 0 {
            end += 1 + frac_digits;
            any_digits = true;
        }
    }
    if !any_digits {
        return None;
    }
    if decimal && matches!(bytes.get(end), Some(b'e' | b'E')) {
        let sign = usize::from(matches!(bytes.get(end + 1), Some(b'+' | b'-')));
        let exp_digits = digits_from(end + 1 + sign);
        if exp_digits > 0 {
            end += 1 + sign + exp_digits;
        }
    }
    Some(Number {
        negative,
        text: &s[..end],
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::model::ProfileField;
    use rust_decimal_macros::dec;

    fn draft(name: &str, age: &str, income: &str, savings: &str) -> ProfileDraft {
        let mut d = ProfileDraft::default();
        d.set(ProfileField::Name, name).unwrap();
        d.set(ProfileField::Age, age).unwrap();
        d.set(ProfileField::Income, income).unwrap();
        d.set(ProfileField::CurrentSavings, savings).unwrap();
        d
    }

    #[test]
    fn empty_and_garbage_numbers_become_zero() {
        let sub = ProfileSubmission::from_draft(&draft("Asha", "34", "", "abc"));
        assert_eq!(sub.name, "Asha");
        assert_eq!(sub.age, 34);
        assert_eq!(sub.income, Decimal::ZERO);
        assert_eq!(sub.current_savings, Decimal::ZERO);
    }

    #[test]
    fn numbers_serialize_as_json_numbers() {
        let sub = ProfileSubmission::from_draft(&draft("Asha", "34", "", "abc"));
        let json = serde_json::to_value(&sub).unwrap();
        assert_eq!(json["age"], serde_json::json!(34));
        assert_eq!(json["income"], serde_json::json!(0.0));
        assert_eq!(json["current_savings"], serde_json::json!(0.0));
        assert_eq!(json["investment_experience"], "beginner");
        assert_eq!(json["investment_timeline"], "1-3 years");
        assert_eq!(json["financial_goals"], serde_json::json!([]));
    }

    #[test]
    fn decimals_are_kept() {
        let sub = ProfileSubmission::from_draft(&draft("Ravi", "41", " 1250000.50 ", "300000"));
        assert_eq!(sub.income, dec!(1250000.5));
        assert_eq!(sub.current_savings, dec!(300000));
        let json = serde_json::to_value(&sub).unwrap();
        assert_eq!(json["income"], serde_json::json!(1250000.5));
    }

    #[test]
    fn age_truncates_and_floors_at_zero() {
        assert_eq!(coerce_age("34.9"), 34);
        assert_eq!(coerce_age("-3"), 0);
        assert_eq!(coerce_age("thirty"), 0);
        assert_eq!(coerce_age("99999999999"), 0);
        assert_eq!(coerce_age(" 7 "), 7);
    }

    #[test]
    fn age_reads_the_leading_integer() {
        assert_eq!(coerce_age("34 years"), 34);
        assert_eq!(coerce_age("34abc"), 34);
        assert_eq!(coerce_age("34.9kg"), 34);
        assert_eq!(coerce_age("+21"), 21);
        assert_eq!(coerce_age("abc34"), 0);
        assert_eq!(coerce_age(""), 0);
    }

    #[test]
    fn amount_reads_the_leading_decimal() {
        assert_eq!(coerce_amount("50,000"), dec!(50));
        assert_eq!(coerce_amount("1200.75 INR"), dec!(1200.75));
        assert_eq!(coerce_amount(".5"), dec!(0.5));
        assert_eq!(coerce_amount("7."), dec!(7));
        assert_eq!(coerce_amount("1e5"), dec!(100000));
        assert_eq!(coerce_amount("2.5E-1x"), dec!(0.25));
        assert_eq!(coerce_amount("3e"), dec!(3));
        assert_eq!(coerce_amount("₹500"), Decimal::ZERO);
        assert_eq!(coerce_amount("-"), Decimal::ZERO);
    }

    #[test]
    fn partly_numeric_draft_is_submitted_with_prefixes() {
        let sub = ProfileSubmission::from_draft(&draft("Asha", "34 years", "50,000", "abc"));
        assert_eq!(sub.age, 34);
        assert_eq!(sub.income, dec!(50));
        assert_eq!(sub.current_savings, Decimal::ZERO);
    }

    #[test]
    fn negative_amounts_become_zero() {
        assert_eq!(coerce_amount("-10"), Decimal::ZERO);
        assert_eq!(coerce_amount("12.5"), dec!(12.5));
    }

    #[test]
    fn goals_pass_through() {
        let mut d = draft("Asha", "34", "1", "1");
        d.toggle_goal("Emergency Fund");
        d.toggle_goal("Home Purchase");
        let sub = ProfileSubmission::from(&d);
        let json = serde_json::to_value(&sub).unwrap();
        assert_eq!(
            json["financial_goals"],
            serde_json::json!(["Emergency Fund", "Home Purchase"])
        );
    }
}
