//! Risk assessment: classifier outcome plus the presentation view-model.

use std::fmt::Display;

use chrono::{DateTime, TimeZone};

/// Timestamp format used on the result page and in reports, e.g. `19 October 2026, 14:05`.
pub const TIMESTAMP_FORMAT: &str = "%d %B %Y, %H:%M";

const HIGH_RISK_TIPS: [&str; 5] = [
    "Consult a cardiologist immediately.",
    "Reduce cholesterol and salt intake.",
    "Exercise regularly under medical guidance.",
    "Avoid smoking and alcohol.",
    "Monitor blood pressure and sugar levels.",
];

const LOW_RISK_TIPS: [&str; 5] = [
    "Maintain a balanced diet.",
    "Exercise at least 30 minutes daily.",
    "Do regular health checkups.",
    "Manage stress and sleep well.",
    "Avoid smoking and junk food.",
];

/// Binary classifier outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Label {
    /// Not at risk.
    Negative,
    /// At risk of heart disease.
    Positive,
}

impl Label {
    /// Map a raw class id to a label. Class `1` is the positive class.
    pub fn from_class(class: i64) -> Self {
        if class == 1 {
            Self::Positive
        } else {
            Self::Negative
        }
    }

    pub fn is_positive(&self) -> bool {
        matches!(self, Self::Positive)
    }

    /// Plain description without the status marker.
    pub fn description(&self) -> &'static str {
        match self {
            Self::Positive => "High Risk of Heart Disease",
            Self::Negative => "Low Risk (Healthy)",
        }
    }

    pub fn marker(&self) -> &'static str {
        match self {
            Self::Positive => "⚠️",
            Self::Negative => "✅",
        }
    }

    /// Headline shown to the user: marker followed by the description.
    pub fn headline(&self) -> String {
        format!("{} {}", self.marker(), self.description())
    }

    /// The five lifestyle recommendations for this outcome, in display order.
    pub fn recommendations(&self) -> &'static [&'static str; 5] {
        match self {
            Self::Positive => &HIGH_RISK_TIPS,
            Self::Negative => &LOW_RISK_TIPS,
        }
    }
}

/// Classifier output for a single feature vector.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Prediction {
    pub label: Label,
    /// Probability of the positive class, in `[0, 1]`.
    pub probability: f64,
}

impl Prediction {
    /// Positive-class probability as a percentage rounded to two decimals.
    pub fn percentage(&self) -> f64 {
        (self.probability * 100.0 * 100.0).round() / 100.0
    }
}

/// Everything shown to the user about one prediction.
///
/// This is the last-result record: the only data that crosses into the
/// HTML page and the PDF report.
#[derive(Debug, Clone, PartialEq)]
pub struct Assessment {
    pub result: String,
    pub probability: f64,
    pub tips: Vec<String>,
    pub time: String,
}

impl Assessment {
    pub fn from_prediction<Tz>(prediction: &Prediction, at: &DateTime<Tz>) -> Self
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        let label = prediction.label;
        Self {
            result: label.headline(),
            probability: prediction.percentage(),
            tips: label
                .recommendations()
                .iter()
                .map(|t| t.to_string())
                .collect(),
            time: format_timestamp(at),
        }
    }

    /// Probability with exactly two decimals, e.g. `83.25`.
    pub fn probability_text(&self) -> String {
        format!("{:.2}", self.probability)
    }
}

pub fn format_timestamp<Tz>(at: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    at.format(TIMESTAMP_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 19, 14, 5, 59).unwrap()
    }

    #[test]
    fn class_one_is_positive() {
        assert_eq!(Label::from_class(1), Label::Positive);
        assert_eq!(Label::from_class(0), Label::Negative);
        assert_eq!(Label::from_class(2), Label::Negative);
    }

    #[test]
    fn percentage_rounds_to_two_decimals() {
        let p = Prediction {
            label: Label::Positive,
            probability: 0.832_549,
        };
        assert_eq!(p.percentage(), 83.25);

        let p = Prediction {
            label: Label::Positive,
            probability: 0.83,
        };
        assert_eq!(p.percentage(), 83.0);
    }

    #[test]
    fn percentage_stays_within_bounds() {
        for probability in [0.0, 0.000_01, 0.5, 0.999_99, 1.0] {
            let pct = Prediction {
                label: Label::Negative,
                probability,
            }
            .percentage();
            assert!((0.0..=100.0).contains(&pct), "{probability} -> {pct}");
        }
    }

    #[test]
    fn high_risk_assessment() {
        let prediction = Prediction {
            label: Label::Positive,
            probability: 0.83,
        };
        let a = Assessment::from_prediction(&prediction, &at());

        assert!(a.result.contains("High Risk of Heart Disease"));
        assert_eq!(a.probability_text(), "83.00");
        assert_eq!(a.tips.len(), 5);
        assert_eq!(a.tips[0], "Consult a cardiologist immediately.");
        assert_eq!(a.time, "19 October 2026, 14:05");
    }

    #[test]
    fn low_risk_assessment() {
        let prediction = Prediction {
            label: Label::Negative,
            probability: 0.1234,
        };
        let a = Assessment::from_prediction(&prediction, &at());

        assert_eq!(a.result, "✅ Low Risk (Healthy)");
        assert_eq!(a.probability_text(), "12.34");
        assert_eq!(
            a.tips,
            LOW_RISK_TIPS.iter().map(|t| t.to_string()).collect::<Vec<_>>()
        );
    }

    #[test]
    fn same_prediction_same_assessment() {
        let prediction = Prediction {
            label: Label::Positive,
            probability: 0.71,
        };
        assert_eq!(
            Assessment::from_prediction(&prediction, &at()),
            Assessment::from_prediction(&prediction, &at())
        );
    }

    #[test]
    fn timestamp_zero_pads_day_and_uses_full_month() {
        let t = Utc.with_ymd_and_hms(2026, 3, 4, 9, 7, 0).unwrap();
        assert_eq!(format_timestamp(&t), "04 March 2026, 09:07");
    }
}
