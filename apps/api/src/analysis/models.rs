//! Wire and domain types for prompt analyses.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Body of `POST /api/analyze`.
#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    pub prompt: String,
}

/// The five fixed rubric dimensions a prompt is graded on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CriterionId {
    Context,
    Goal,
    Format,
    Constraints,
    Examples,
}

impl CriterionId {
    /// All criteria, in the order the rubric presents them.
    pub const ALL: [CriterionId; 5] = [
        CriterionId::Context,
        CriterionId::Goal,
        CriterionId::Format,
        CriterionId::Constraints,
        CriterionId::Examples,
    ];

    /// The wire name, as the model must emit it.
    pub fn as_str(self) -> &'static str {
        match self {
            CriterionId::Context => "context",
            CriterionId::Goal => "goal",
            CriterionId::Format => "format",
            CriterionId::Constraints => "constraints",
            CriterionId::Examples => "examples",
        }
    }

    /// Display name shown next to the score.
    pub fn label(self) -> &'static str {
        match self {
            CriterionId::Context => "Context",
            CriterionId::Goal => "Goal",
            CriterionId::Format => "Output format",
            CriterionId::Constraints => "Constraints",
            CriterionId::Examples => "Examples",
        }
    }
}

impl fmt::Display for CriterionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Coarse qualitative bucket attached to a criterion's numeric score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Missing,
    Weak,
    Ok,
    Strong,
}

impl Level {
    pub fn as_str(self) -> &'static str {
        match self {
            Level::Missing => "missing",
            Level::Weak => "weak",
            Level::Ok => "ok",
            Level::Strong => "strong",
        }
    }
}

/// A single graded rubric dimension.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CriterionScore {
    pub id: CriterionId,
    pub label: String,
    #[serde(deserialize_with = "clamped_score")]
    pub score: u8,
    pub level: Level,
    pub feedback: String,
}

/// A full critique of one prompt, as returned to the client.
///
/// `suggestions` and `improvedPrompt` default to empty when the model omits
/// them; the client already defines behavior for a blank improved prompt.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Analysis {
    #[serde(deserialize_with = "clamped_score")]
    pub overall_score: u8,
    pub overall_label: String,
    pub criteria: Vec<CriterionScore>,
    #[serde(default)]
    pub suggestions: Vec<String>,
    #[serde(default)]
    pub improved_prompt: String,
}

impl Analysis {
    /// Zero-valued placeholder shown before any analysis has run: all five
    /// criteria at score 0, level missing.
    pub fn placeholder() -> Self {
        Analysis {
            overall_score: 0,
            overall_label: "Not analyzed yet".to_string(),
            criteria: CriterionId::ALL
                .iter()
                .map(|&id| CriterionScore {
                    id,
                    label: id.label().to_string(),
                    score: 0,
                    level: Level::Missing,
                    feedback: String::new(),
                })
                .collect(),
            suggestions: Vec::new(),
            improved_prompt: String::new(),
        }
    }
}

/// Accepts any JSON number for a score and clamps it into 0..=100.
fn clamped_score<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = f64::deserialize(deserializer)?;
    Ok(raw.clamp(0.0, 100.0).round() as u8)
}
