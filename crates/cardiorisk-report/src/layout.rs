//! Report content as a flat list of blocks, independent of the PDF backend.

use cardiorisk_core::Assessment;

pub const TITLE: &str = "Heart Disease Prediction Report";

/// One element of the report flow.
#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    /// A line of body text; long text wraps.
    Paragraph(String),
    /// Vertical gap, in points.
    Spacer(f32),
}

/// String fields of the report. All empty when no prediction has been made.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReportView {
    pub result: String,
    pub probability: String,
    pub time: String,
    pub tips: Vec<String>,
}

impl ReportView {
    pub fn from_assessment(last: Option<&Assessment>) -> Self {
        match last {
            Some(a) => Self {
                result: a.result.clone(),
                probability: a.probability_text(),
                time: a.time.clone(),
                tips: a.tips.clone(),
            },
            None => Self::default(),
        }
    }
}

pub fn layout(view: &ReportView) -> Vec<Block> {
    let mut blocks = vec![
        Block::Paragraph(TITLE.to_string()),
        Block::Spacer(20.0),
        Block::Paragraph(format!("Result: {}", view.result)),
        Block::Paragraph(format!("Probability: {}%", view.probability)),
        Block::Paragraph(format!("Date & Time: {}", view.time)),
        Block::Spacer(20.0),
        Block::Paragraph("Health Recommendations:".to_string()),
        Block::Spacer(10.0),
    ];

    for tip in &view.tips {
        blocks.push(Block::Paragraph(format!("• {tip}")));
        blocks.push(Block::Spacer(8.0));
    }

    blocks
}

#[cfg(test)]
mod tests {
    use super::*;
    use cardiorisk_core::{Label, Prediction};

    const TIME: &str = "19 October 2026, 14:05";

    fn paragraphs(blocks: &[Block]) -> Vec<&str> {
        blocks
            .iter()
            .filter_map(|b| match b {
                Block::Paragraph(t) => Some(t.as_str()),
                Block::Spacer(_) => None,
            })
            .collect()
    }

    fn high_risk() -> Assessment {
        let label = Label::Positive;
        let prediction = Prediction {
            label,
            probability: 0.832_51,
        };
        Assessment {
            result: label.headline(),
            probability: prediction.percentage(),
            tips: label.recommendations().iter().map(|t| t.to_string()).collect(),
            time: TIME.to_string(),
        }
    }

    #[test]
    fn empty_report_before_any_prediction() {
        let blocks = layout(&ReportView::from_assessment(None));
        assert_eq!(
            paragraphs(&blocks),
            vec![
                TITLE,
                "Result: ",
                "Probability: %",
                "Date & Time: ",
                "Health Recommendations:",
            ]
        );
        assert_eq!(blocks.len(), 8);
    }

    #[test]
    fn report_carries_the_last_assessment() {
        let a = high_risk();
        let blocks = layout(&ReportView::from_assessment(Some(&a)));
        let text = paragraphs(&blocks);

        assert_eq!(text[1], "Result: ⚠️ High Risk of Heart Disease");
        assert_eq!(text[2], "Probability: 83.25%");
        assert_eq!(text[3], "Date & Time: 19 October 2026, 14:05");
        for tip in Label::Positive.recommendations() {
            assert!(text.contains(&format!("• {tip}").as_str()), "missing {tip}");
        }
    }

    #[test]
    fn each_tip_is_followed_by_a_small_spacer() {
        let a = high_risk();
        let blocks = layout(&ReportView::from_assessment(Some(&a)));
        let tail = &blocks[8..];
        assert_eq!(tail.len(), 10);
        for pair in tail.chunks(2) {
            assert!(matches!(pair[0], Block::Paragraph(_)));
            assert_eq!(pair[1], Block::Spacer(8.0));
        }
    }
}
