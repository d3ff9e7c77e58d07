//! Match Scorer — compares a candidate's skills with a required-skill list.

use std::collections::BTreeSet;

use serde::Serialize;

/// Percentage at or above which a candidate is recommended.
pub const RECOMMENDATION_THRESHOLD: f64 = 60.0;

/// Required skills used by `/match-skills` when the caller supplies none.
pub const DEFAULT_REQUIRED_SKILLS: &str = "data structures, algorithms, problem solving, \
object-oriented programming, system design, version control, git, github, databases, sql, \
mysql, postgresql, mongodb, software engineering, debugging, unit testing, integration testing, \
api development, rest api, graphql, http, web development, html, css, javascript, typescript, \
react, angular, vue, node.js, express.js, java, python, c++, c#, golang, ruby, docker, \
kubernetes, linux, bash, shell scripting, agile, scrum, test-driven development, design patterns, \
code optimization, scalability, performance tuning, microservices, cloud computing, aws, azure, \
gcp, continuous integration, continuous deployment, ci/cd, devops, authentication, \
authorization, json, xml, networking, sockets, message queues, redis, kafka";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Recommendation {
    Recommended,
    #[serde(rename = "Not Recommended")]
    NotRecommended,
}

impl Recommendation {
    pub fn from_percentage(percentage: f64) -> Self {
        if percentage >= RECOMMENDATION_THRESHOLD {
            Recommendation::Recommended
        } else {
            Recommendation::NotRecommended
        }
    }

    pub fn is_recommended(self) -> bool {
        self == Recommendation::Recommended
    }
}

/// Outcome of scoring one candidate. Skill lists serialize in lexical order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchResult {
    pub match_percentage: f64,
    pub matched_skills: BTreeSet<String>,
    pub missing_skills: BTreeSet<String>,
    /// Every (normalized) skill the candidate brought.
    #[serde(rename = "total_resume_skills")]
    pub candidate_skills: BTreeSet<String>,
    pub recommendation: Recommendation,
}

/// Splits a comma-separated skill list, dropping blank entries.
pub fn parse_skill_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

pub fn default_required_skills() -> Vec<String> {
    parse_skill_list(DEFAULT_REQUIRED_SKILLS)
}

/// Scores `candidate_skills` against `required_skills`.
///
/// Both inputs are lowercased and trimmed, then deduplicated; blank entries
/// are dropped. The percentage is `100 * |matched| / |required|`, rounded
/// half away from zero to two decimals, and 0 when nothing is required.
pub fn score<C, R>(candidate_skills: C, required_skills: R) -> MatchResult
where
    C: IntoIterator,
    C::Item: AsRef<str>,
    R: IntoIterator,
    R::Item: AsRef<str>,
{
    let candidate = to_skill_set(candidate_skills);
    let required = to_skill_set(required_skills);

    let matched: BTreeSet<String> = candidate.intersection(&required).cloned().collect();
    let missing: BTreeSet<String> = required.difference(&candidate).cloned().collect();

    let match_percentage = if required.is_empty() {
        0.0
    } else {
        round2(matched.len() as f64 / required.len() as f64 * 100.0)
    };

    MatchResult {
        match_percentage,
        matched_skills: matched,
        missing_skills: missing,
        candidate_skills: candidate,
        recommendation: Recommendation::from_percentage(match_percentage),
    }
}

fn to_skill_set<I>(skills: I) -> BTreeSet<String>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    skills
        .into_iter()
        .map(|s| s.as_ref().trim().to_lowercase())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Rounds half away from zero to two decimal places.
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
