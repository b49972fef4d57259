//! Defensive parsing of the model's text output into a validated `Analysis`.
//!
//! The model is an untrusted black box: its reply may be fenced, may not be
//! JSON at all, may not match the analysis shape, and may miss or duplicate
//! rubric criteria. Every failure keeps the cleaned text so the endpoint can
//! return it as diagnostic evidence instead of substituting a default.

use thiserror::Error;

use crate::analysis::models::{Analysis, CriterionId};

#[derive(Debug, Error)]
pub enum ContractError {
    #[error("Model returned invalid JSON: {source}")]
    InvalidJson {
        #[source]
        source: serde_json::Error,
        raw: String,
    },

    #[error("Model returned JSON that does not match the analysis shape: {source}")]
    WrongShape {
        #[source]
        source: serde_json::Error,
        raw: String,
    },

    #[error("Model analysis is missing criterion '{id}'")]
    MissingCriterion { id: CriterionId, raw: String },

    #[error("Model analysis contains criterion '{id}' more than once")]
    DuplicateCriterion { id: CriterionId, raw: String },
}

impl ContractError {
    /// The cleaned model output, for the 502 diagnostic payload.
    pub fn raw(&self) -> &str {
        match self {
            ContractError::InvalidJson { raw, .. }
            | ContractError::WrongShape { raw, .. }
            | ContractError::MissingCriterion { raw, .. }
            | ContractError::DuplicateCriterion { raw, .. } => raw,
        }
    }
}

/// Parses the model's raw text into a validated, range-clamped `Analysis`.
///
/// Tolerates a markdown code fence around the JSON. Requires each of the
/// five criterion ids exactly once; score clamping happens during
/// deserialization in `models`.
pub fn parse_analysis(output: &str) -> Result<Analysis, ContractError> {
    let cleaned = strip_json_fences(output);

    let value: serde_json::Value =
        serde_json::from_str(cleaned).map_err(|source| ContractError::InvalidJson {
            source,
            raw: cleaned.to_string(),
        })?;

    let analysis: Analysis =
        serde_json::from_value(value).map_err(|source| ContractError::WrongShape {
            source,
            raw: cleaned.to_string(),
        })?;

    for id in CriterionId::ALL {
        match analysis.criteria.iter().filter(|c| c.id == id).count() {
            0 => {
                return Err(ContractError::MissingCriterion {
                    id,
                    raw: cleaned.to_string(),
                })
            }
            1 => {}
            _ => {
                return Err(ContractError::DuplicateCriterion {
                    id,
                    raw: cleaned.to_string(),
                })
            }
        }
    }

    Ok(analysis)
}

/// Strips ```json ... ``` or ``` ... ``` code fences from model output.
fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    if let Some(stripped) = text.strip_prefix("```json") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else if let Some(stripped) = text.strip_prefix("```") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else {
        text
    }
}
