//! Bulk Ranker — scores many candidates against one required-skill list.
//!
//! Each candidate is processed independently: a malformed record becomes an
//! error-tagged entry in the output and never aborts the batch.
//!
//! Ordering policy:
//! - scored records sort by `match_percentage` descending, ties keep input order
//! - error-tagged records are not ranked; they follow every scored record in
//!   `all_results`, in input order, and appear in neither partition

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::{info, warn};

use crate::errors::AppError;
use crate::skills::extractor::SkillExtractor;
use crate::skills::scorer::{score, MatchResult};

pub const UNKNOWN_CANDIDATE: &str = "Unknown";
pub const UNKNOWN_POSITION: &str = "Unknown Position";

/// One candidate as submitted in a bulk request. Every field is optional and
/// may be null.
#[derive(Debug, Clone, Deserialize)]
pub struct CandidateRecord {
    #[serde(default)]
    pub id: Value,
    pub name: Option<String>,
    pub email: Option<String>,
    pub resume_text: Option<String>,
    pub skills: Option<Vec<String>>,
}

impl CandidateRecord {
    /// Explicit skills, unioned with skills extracted from `resume_text` when
    /// that text is non-empty.
    pub fn merged_skills(&self, extractor: &SkillExtractor<'_>) -> Vec<String> {
        let mut skills = self.skills.clone().unwrap_or_default();
        if let Some(text) = self.resume_text.as_deref().filter(|t| !t.is_empty()) {
            skills.extend(extractor.extract(text));
        }
        skills
    }
}

#[derive(Debug, Error)]
pub enum CandidateError {
    #[error("candidate record must be a JSON object")]
    NotAnObject,

    #[error("malformed candidate record: {0}")]
    Malformed(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredCandidate {
    pub candidate_id: Value,
    pub candidate_name: String,
    pub candidate_email: String,
    pub job_title: String,
    #[serde(flatten)]
    pub result: MatchResult,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FailedCandidate {
    pub candidate_id: Value,
    pub candidate_name: String,
    pub error: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CandidateOutcome {
    Scored(ScoredCandidate),
    Failed(FailedCandidate),
}

#[derive(Debug, Clone, Serialize)]
pub struct BulkResult {
    pub job_title: String,
    pub total_candidates: usize,
    pub recommended_count: usize,
    pub not_recommended_count: usize,
    pub error_count: usize,
    pub recommended: Vec<ScoredCandidate>,
    pub not_recommended: Vec<ScoredCandidate>,
    pub all_results: Vec<CandidateOutcome>,
}

/// Validated body of `POST /bulk-match-skills`.
#[derive(Debug, Clone)]
pub struct BulkMatchRequest {
    pub candidates: Vec<Value>,
    pub required_skills: Vec<String>,
    pub job_title: String,
}

impl BulkMatchRequest {
    /// Validates the loosely-typed JSON body. Candidates stay as raw values so
    /// a bad record only fails itself.
    pub fn from_json(body: Value) -> Result<Self, AppError> {
        let Value::Object(mut body) = body else {
            return Err(invalid_request());
        };

        let candidates = match body.remove("candidates") {
            None => return Err(invalid_request()),
            Some(Value::Array(list)) if !list.is_empty() => list,
            Some(_) => return Err(AppError::Validation("No candidates provided".to_string())),
        };

        let required_skills: Vec<String> = match body.remove("required_skills") {
            Some(Value::Array(list)) => list
                .into_iter()
                .map(|v| match v {
                    Value::String(s) => Ok(s),
                    _ => Err(invalid_request()),
                })
                .collect::<Result<_, _>>()?,
            _ => return Err(invalid_request()),
        };
        if required_skills.iter().all(|s| s.trim().is_empty()) {
            return Err(AppError::Validation(
                "No valid required skills provided".to_string(),
            ));
        }

        let job_title = match body.remove("job_title") {
            Some(Value::String(title)) => title,
            _ => UNKNOWN_POSITION.to_string(),
        };

        Ok(Self {
            candidates,
            required_skills,
            job_title,
        })
    }
}

fn invalid_request() -> AppError {
    AppError::Validation("Invalid request data".to_string())
}

/// Scores every candidate and returns them ranked and partitioned.
pub fn rank_all(
    candidates: &[Value],
    required_skills: &[String],
    job_title: &str,
    extractor: &SkillExtractor<'_>,
) -> BulkResult {
    let mut scored = Vec::new();
    let mut failed = Vec::new();

    for raw in candidates {
        match score_candidate(raw, required_skills, job_title, extractor) {
            Ok(candidate) => scored.push(candidate),
            Err(e) => {
                let failure = FailedCandidate {
                    candidate_id: raw.get("id").cloned().unwrap_or(Value::Null),
                    candidate_name: raw
                        .get("name")
                        .and_then(Value::as_str)
                        .unwrap_or(UNKNOWN_CANDIDATE)
                        .to_string(),
                    error: e.to_string(),
                };
                warn!(
                    candidate = %failure.candidate_name,
                    error = %failure.error,
                    "Failed to score candidate"
                );
                failed.push(failure);
            }
        }
    }

    // Vec::sort_by is stable, so equal percentages keep input order.
    scored.sort_by(|a, b| {
        b.result
            .match_percentage
            .total_cmp(&a.result.match_percentage)
    });

    let (recommended, not_recommended): (Vec<_>, Vec<_>) = scored
        .iter()
        .cloned()
        .partition(|c| c.result.recommendation.is_recommended());

    info!(
        total = candidates.len(),
        recommended = recommended.len(),
        errors = failed.len(),
        "Bulk ranking complete"
    );

    BulkResult {
        job_title: job_title.to_string(),
        total_candidates: candidates.len(),
        recommended_count: recommended.len(),
        not_recommended_count: not_recommended.len(),
        error_count: failed.len(),
        recommended,
        not_recommended,
        all_results: scored
            .into_iter()
            .map(CandidateOutcome::Scored)
            .chain(failed.into_iter().map(CandidateOutcome::Failed))
            .collect(),
    }
}

fn score_candidate(
    raw: &Value,
    required_skills: &[String],
    job_title: &str,
    extractor: &SkillExtractor<'_>,
) -> Result<ScoredCandidate, CandidateError> {
    if !raw.is_object() {
        return Err(CandidateError::NotAnObject);
    }
    let record: CandidateRecord = serde_json::from_value(raw.clone())?;
    let skills = record.merged_skills(extractor);

    Ok(ScoredCandidate {
        candidate_id: record.id,
        candidate_name: record
            .name
            .unwrap_or_else(|| UNKNOWN_CANDIDATE.to_string()),
        candidate_email: record.email.unwrap_or_default(),
        job_title: job_title.to_string(),
        result: score(&skills, required_skills),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::skills::scorer::Recommendation;
    use serde_json::json;

    fn required(skills: &[&str]) -> Vec<String> {
        skills.iter().map(|s| s.to_string()).collect()
    }

    fn rank(candidates: Value, req: &[&str]) -> BulkResult {
        let list = candidates.as_array().cloned().unwrap();
        rank_all(&list, &required(req), "Backend Engineer", &SkillExtractor::default())
    }

    fn scored(outcome: &CandidateOutcome) -> &ScoredCandidate {
        match outcome {
            CandidateOutcome::Scored(c) => c,
            CandidateOutcome::Failed(f) => panic!("unexpected failure: {}", f.error),
        }
    }

    #[test]
    fn test_sorted_descending_and_partitioned() {
        let result = rank(
            json!([
                {"id": 1, "name": "Low", "skills": ["python"]},
                {"id": 2, "name": "High", "skills": ["python", "sql", "docker"]},
                {"id": 3, "name": "Mid", "skills": ["python", "sql"]}
            ]),
            &["python", "sql", "docker"],
        );

        let names: Vec<_> = result
            .all_results
            .iter()
            .map(|o| scored(o).candidate_name.as_str())
            .collect();
        assert_eq!(names, vec!["High", "Mid", "Low"]);

        assert_eq!(result.total_candidates, 3);
        assert_eq!(result.recommended_count, 2);
        assert_eq!(result.not_recommended_count, 1);
        assert_eq!(result.error_count, 0);
        assert_eq!(
            result.recommended_count + result.not_recommended_count,
            result.total_candidates
        );
        assert_eq!(result.not_recommended[0].candidate_name, "Low");
    }

    #[test]
    fn test_ties_keep_input_order() {
        let result = rank(
            json!([
                {"id": "a", "name": "First", "skills": ["go"]},
                {"id": "b", "name": "Second", "skills": ["rust"]},
                {"id": "c", "name": "Third", "skills": ["go"]}
            ]),
            &["go", "rust"],
        );
        let names: Vec<_> = result
            .all_results
            .iter()
            .map(|o| scored(o).candidate_name.as_str())
            .collect();
        assert_eq!(names, vec!["First", "Second", "Third"]);
    }

    #[test]
    fn test_resume_text_merged_with_explicit_skills() {
        let result = rank(
            json!([{
                "id": 7,
                "name": "Ada",
                "email": "ada@example.com",
                "resume_text": "Built services with NodeJS and Docker",
                "skills": ["Kafka"]
            }]),
            &["node.js", "docker", "kafka"],
        );
        let ada = scored(&result.all_results[0]);
        assert_eq!(ada.result.match_percentage, 100.0);
        assert_eq!(ada.candidate_email, "ada@example.com");
        assert_eq!(ada.job_title, "Backend Engineer");
    }

    #[test]
    fn test_empty_resume_text_uses_explicit_skills_only() {
        let result = rank(
            json!([{"id": 1, "name": "Bo", "resume_text": "", "skills": ["python"]}]),
            &["python", "sql"],
        );
        let bo = scored(&result.all_results[0]);
        assert_eq!(bo.result.match_percentage, 50.0);
        assert_eq!(bo.result.recommendation, Recommendation::NotRecommended);
    }

    #[test]
    fn test_missing_fields_get_defaults() {
        let result = rank(json!([{}]), &["python"]);
        let anon = scored(&result.all_results[0]);
        assert_eq!(anon.candidate_id, Value::Null);
        assert_eq!(anon.candidate_name, UNKNOWN_CANDIDATE);
        assert_eq!(anon.candidate_email, "");
        assert_eq!(anon.result.match_percentage, 0.0);
    }

    #[test]
    fn test_null_fields_use_defaults() {
        let result = rank(
            json!([{
                "id": 1,
                "name": "Nul",
                "email": null,
                "resume_text": "python",
                "skills": null
            }]),
            &["python"],
        );
        assert_eq!(result.error_count, 0);
        let nul = scored(&result.all_results[0]);
        assert_eq!(nul.candidate_email, "");
        assert_eq!(nul.result.match_percentage, 100.0);
    }

    #[test]
    fn test_malformed_candidate_isolated_and_sorted_last() {
        let result = rank(
            json!([
                {"id": 1, "name": "Broken", "skills": "python"},
                {"id": 2, "name": "Zero", "skills": []},
                "not an object",
                {"id": 3, "name": "Good", "skills": ["python"]}
            ]),
            &["python"],
        );

        assert_eq!(result.total_candidates, 4);
        assert_eq!(result.error_count, 2);
        assert_eq!(result.recommended_count, 1);
        assert_eq!(result.not_recommended_count, 1);
        assert_eq!(
            result.recommended_count + result.not_recommended_count + result.error_count,
            result.total_candidates
        );

        assert_eq!(scored(&result.all_results[0]).candidate_name, "Good");
        assert_eq!(scored(&result.all_results[1]).candidate_name, "Zero");
        match &result.all_results[2] {
            CandidateOutcome::Failed(f) => {
                assert_eq!(f.candidate_name, "Broken");
                assert_eq!(f.candidate_id, json!(1));
                assert!(f.error.contains("malformed"));
            }
            other => panic!("expected failure, got {other:?}"),
        }
        match &result.all_results[3] {
            CandidateOutcome::Failed(f) => {
                assert_eq!(f.candidate_name, UNKNOWN_CANDIDATE);
                assert_eq!(f.candidate_id, Value::Null);
            }
            other => panic!("expected failure, got {other:?}"),
        }
    }

    #[test]
    fn test_outcome_json_shapes() {
        let result = rank(
            json!([
                {"id": 1, "name": "Ok", "skills": ["python"]},
                {"id": 2, "name": "Bad", "skills": 5}
            ]),
            &["python"],
        );
        let value = serde_json::to_value(&result).unwrap();
        let ok = &value["all_results"][0];
        assert_eq!(ok["candidate_id"], 1);
        assert_eq!(ok["match_percentage"], 100.0);
        assert_eq!(ok["recommendation"], "Recommended");
        assert!(ok.get("error").is_none());

        let bad = &value["all_results"][1];
        assert_eq!(bad["candidate_name"], "Bad");
        assert!(bad["error"].is_string());
        assert!(bad.get("match_percentage").is_none());
    }

    #[test]
    fn test_request_validation() {
        let ok = BulkMatchRequest::from_json(json!({
            "candidates": [{"id": 1}],
            "required_skills": ["python"]
        }))
        .unwrap();
        assert_eq!(ok.job_title, UNKNOWN_POSITION);

        let cases = [
            json!([]),
            json!({"required_skills": ["python"]}),
            json!({"candidates": [{"id": 1}]}),
            json!({"candidates": [], "required_skills": ["python"]}),
            json!({"candidates": {"id": 1}, "required_skills": ["python"]}),
            json!({"candidates": [{"id": 1}], "required_skills": []}),
            json!({"candidates": [{"id": 1}], "required_skills": "python"}),
            json!({"candidates": [{"id": 1}], "required_skills": [1, 2]}),
        ];
        for body in cases {
            assert!(
                matches!(BulkMatchRequest::from_json(body.clone()), Err(AppError::Validation(_))),
                "accepted {body}"
            );
        }
    }
}
