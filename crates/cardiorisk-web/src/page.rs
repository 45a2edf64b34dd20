//! HTML rendering for the form and result page.
//!
//! The page is one template with two slots: the input fields and the
//! result panel. Only the assessment view-model reaches the result panel.

use std::fmt::Write;

use cardiorisk_core::{Assessment, FeatureSchema, Label, UCI_HEART_FEATURES};

const TEMPLATE: &str = include_str!("../templates/index.html");

// ── Field captions ──

const CAPTIONS: &[(&str, &str)] = &[
    ("age", "Age (years)"),
    ("sex", "Sex (1 = male, 0 = female)"),
    ("cp", "Chest pain type (0-3)"),
    ("trestbps", "Resting blood pressure (mm Hg)"),
    ("chol", "Serum cholesterol (mg/dl)"),
    ("fbs", "Fasting blood sugar > 120 mg/dl (1 = yes)"),
    ("restecg", "Resting ECG result (0-2)"),
    ("thalach", "Maximum heart rate achieved"),
    ("exang", "Exercise-induced angina (1 = yes)"),
    ("oldpeak", "ST depression induced by exercise"),
    ("slope", "Slope of peak exercise ST segment (0-2)"),
    ("ca", "Major vessels colored by fluoroscopy (0-4)"),
    ("thal", "Thalassemia (0-3)"),
];

fn caption(name: &str) -> &str {
    CAPTIONS
        .iter()
        .find(|(n, _)| *n == name)
        .map(|(_, c)| *c)
        .unwrap_or(name)
}

/// Render the page. `submitted` pre-fills the form for a repeat submission.
pub fn render(
    schema: &FeatureSchema,
    submitted: &[(String, String)],
    assessment: Option<&Assessment>,
) -> String {
    TEMPLATE
        .replace("{{fields}}", &render_fields(schema, submitted))
        .replace("{{result}}", &assessment.map(render_result).unwrap_or_default())
}

fn render_fields(schema: &FeatureSchema, submitted: &[(String, String)]) -> String {
    let names: Vec<&str> = if schema.is_positional() {
        UCI_HEART_FEATURES.to_vec()
    } else {
        schema.names().iter().map(String::as_str).collect()
    };

    let mut out = String::new();
    for name in names {
        let value = submitted
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
            .unwrap_or("");
        let _ = writeln!(
            out,
            r#"    <label>{caption}<input type="number" step="any" name="{name}" value="{value}" required></label>"#,
            caption = escape(caption(name)),
            name = escape(name),
            value = escape(value),
        );
    }
    out
}

fn render_result(a: &Assessment) -> String {
    let class = if a.result == Label::Positive.headline() {
        "high"
    } else {
        "low"
    };

    let mut out = String::new();
    let _ = writeln!(out, r#"  <section class="result {class}">"#);
    let _ = writeln!(out, "    <h2>{}</h2>", escape(&a.result));
    let _ = writeln!(
        out,
        "    <p>Probability of heart disease: <strong>{}%</strong></p>",
        a.probability_text()
    );
    let _ = writeln!(out, "    <h3>Health Recommendations</h3>");
    let _ = writeln!(out, "    <ul>");
    for tip in &a.tips {
        let _ = writeln!(out, "      <li>{}</li>", escape(tip));
    }
    let _ = writeln!(out, "    </ul>");
    let _ = writeln!(
        out,
        r#"    <p><a href="/download">Download PDF report</a></p>"#
    );
    let _ = writeln!(out, "  </section>");
    out
}

fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assessment() -> Assessment {
        Assessment {
            result: Label::Positive.headline(),
            probability: 83.25,
            tips: Label::Positive
                .recommendations()
                .iter()
                .map(|t| t.to_string())
                .collect(),
            time: "19 October 2026, 14:05".into(),
        }
    }

    #[test]
    fn form_has_one_input_per_feature() {
        let html = render(&FeatureSchema::uci_heart(), &[], None);
        assert_eq!(html.matches("<input ").count(), 13);
        assert!(html.contains(r#"name="thalach""#));
        assert!(html.contains("Maximum heart rate achieved"));
        assert!(!html.contains("{{"));
        assert!(!html.contains("<section"));
    }

    #[test]
    fn positional_schema_shows_uci_fields() {
        let html = render(&FeatureSchema::positional(), &[], None);
        assert_eq!(html.matches("<input ").count(), 13);
    }

    #[test]
    fn unknown_feature_uses_its_name_as_caption() {
        let html = render(&FeatureSchema::new(["bmi"]).unwrap(), &[], None);
        assert!(html.contains(r#"<label>bmi<input"#));
    }

    #[test]
    fn result_panel_lists_label_probability_and_tips() {
        let html = render(&FeatureSchema::uci_heart(), &[], Some(&assessment()));
        assert!(html.contains("High Risk of Heart Disease"));
        assert!(html.contains("<strong>83.25%</strong>"));
        assert_eq!(html.matches("<li>").count(), 5);
        assert!(html.contains(r#"href="/download""#));
        assert!(html.contains(r#"class="result high""#));
    }

    #[test]
    fn submitted_values_prefill_the_form() {
        let submitted = vec![("age".to_string(), "63".to_string())];
        let html = render(&FeatureSchema::uci_heart(), &submitted, None);
        assert!(html.contains(r#"name="age" value="63""#));
    }

    #[test]
    fn values_are_escaped() {
        let submitted = vec![("age".to_string(), r#""><script>"#.to_string())];
        let html = render(&FeatureSchema::uci_heart(), &submitted, None);
        assert!(!html.contains("<script>"));
        assert!(html.contains("&quot;&gt;&lt;script&gt;"));
    }
}
