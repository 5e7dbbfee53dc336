//! Password strength feedback.
//!
//! Scoring is delegated to an estimator (zxcvbn by default); this module only
//! decides how a score is presented.

use ratatui::style::Color;

use crate::style::RoleColors;

/// Result of estimating a password: a 0..=4 score plus suggestions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StrengthAssessment {
    pub score: u8,
    pub suggestions: Vec<String>,
}

impl StrengthAssessment {
    /// Suggestions concatenated for display.
    pub fn guidance(&self) -> String {
        self.suggestions.join(" ")
    }
}

/// Black-box password scorer.
pub trait StrengthEstimator: Send + Sync {
    fn estimate(&self, password: &str) -> StrengthAssessment;
}

/// Default estimator backed by `zxcvbn`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ZxcvbnEstimator;

impl StrengthEstimator for ZxcvbnEstimator {
    fn estimate(&self, password: &str) -> StrengthAssessment {
        if password.is_empty() {
            return StrengthAssessment::default();
        }
        let entropy = zxcvbn::zxcvbn(password, &[]);
        let suggestions = entropy
            .feedback()
            .map(|fb| fb.suggestions().iter().map(|s| s.to_string()).collect())
            .unwrap_or_default();
        StrengthAssessment {
            score: (entropy.score() as u8).min(4),
            suggestions,
        }
    }
}

/// Qualitative label shown next to the strength marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrengthLabel {
    Weak,
    Strong,
    VeryStrong,
}

impl StrengthLabel {
    /// `None` for score 0: nothing is rendered.
    pub fn from_score(score: u8) -> Option<Self> {
        match score {
            0 => None,
            1 => Some(StrengthLabel::Weak),
            2 => Some(StrengthLabel::Strong),
            _ => Some(StrengthLabel::VeryStrong),
        }
    }

    pub fn text(&self) -> &'static str {
        match self {
            StrengthLabel::Weak => "Weak",
            StrengthLabel::Strong => "Strong",
            StrengthLabel::VeryStrong => "Very strong",
        }
    }

    /// Marker colour: red / yellow / green.
    pub fn color(&self, roles: &RoleColors) -> Color {
        match self {
            StrengthLabel::Weak => roles.danger,
            StrengthLabel::Strong => roles.warning,
            StrengthLabel::VeryStrong => roles.success,
        }
    }
}

/// What the password field shows beneath itself, if anything.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StrengthIndicator {
    pub label: StrengthLabel,
    pub guidance: String,
}

impl StrengthIndicator {
    pub fn from_assessment(assessment: &StrengthAssessment) -> Option<Self> {
        StrengthLabel::from_score(assessment.score).map(|label| Self {
            label,
            guidance: assessment.guidance(),
        })
    }

    /// e.g. `"Weak password"`.
    pub fn headline(&self) -> String {
        format!("{} password", self.label.text())
    }
}
