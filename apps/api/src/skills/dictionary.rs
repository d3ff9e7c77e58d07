//! Skill Dictionary — the fixed vocabulary of canonical skills and the alias
//! table that maps common spellings onto them.
//!
//! Built once per process behind a `LazyLock` and never mutated.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::LazyLock;

use serde::Serialize;
use thiserror::Error;

const TECHNICAL_SKILLS: &[&str] = &[
    // Languages
    "javascript", "python", "java", "c++", "c#", "php", "ruby", "go", "rust", "swift",
    "kotlin", "typescript", "scala", "r", "matlab", "perl", "shell", "bash",
    // Web
    "html", "css", "react", "angular", "vue", "node.js", "express", "django", "flask",
    "spring", "laravel", "rails", "asp.net", "jquery", "bootstrap", "tailwind",
    // Data stores
    "mysql", "postgresql", "mongodb", "redis", "sqlite", "oracle", "cassandra",
    "elasticsearch", "dynamodb", "firebase",
    // Cloud and ops
    "aws", "azure", "gcp", "docker", "kubernetes", "jenkins", "git", "github",
    "gitlab", "terraform", "ansible", "chef", "puppet",
    // Data science
    "machine learning", "deep learning", "tensorflow", "pytorch", "pandas", "numpy",
    "scikit-learn", "keras", "opencv", "nlp", "data analysis", "statistics",
    // Mobile
    "android", "ios", "react native", "flutter", "xamarin", "cordova",
    // Testing
    "jest", "mocha", "selenium", "cypress", "junit", "pytest",
    // Architecture
    "graphql", "rest api", "microservices", "blockchain", "ethereum", "solidity",
];

const SOFT_SKILLS: &[&str] = &[
    "leadership", "communication", "teamwork", "problem solving", "analytical thinking",
    "project management", "time management", "adaptability", "creativity", "innovation",
    "critical thinking", "collaboration", "presentation", "negotiation", "mentoring",
];

/// alias → canonical skill
const SKILL_ALIASES: &[(&str, &str)] = &[
    ("node", "node.js"),
    ("nodejs", "node.js"),
    ("reactjs", "react"),
    ("vuejs", "vue"),
    ("angularjs", "angular"),
    ("c plus plus", "c++"),
    ("cplusplus", "c++"),
    ("csharp", "c#"),
    ("dotnet", "asp.net"),
    ("ml", "machine learning"),
    ("dl", "deep learning"),
];

#[derive(Debug, Error, PartialEq)]
pub enum DictionaryError {
    #[error("duplicate canonical skill '{0}'")]
    DuplicateSkill(String),

    #[error("alias '{alias}' targets unknown skill '{target}'")]
    UnknownAliasTarget { alias: String, target: String },
}

/// Which half of the vocabulary a canonical skill belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkillCategory {
    Technical,
    Soft,
}

/// Canonical skills (technical ∪ soft) plus the alias table.
///
/// Invariants, checked by [`SkillDictionary::new`]:
/// - no canonical skill appears twice (case-insensitive)
/// - every alias target is a canonical skill
#[derive(Debug, Clone)]
pub struct SkillDictionary {
    skills: BTreeMap<String, SkillCategory>,
    aliases: BTreeMap<String, String>,
}

impl SkillDictionary {
    pub fn new(
        technical: &[&str],
        soft: &[&str],
        aliases: &[(&str, &str)],
    ) -> Result<Self, DictionaryError> {
        let mut skills = BTreeMap::new();
        let tagged = technical
            .iter()
            .map(|s| (s, SkillCategory::Technical))
            .chain(soft.iter().map(|s| (s, SkillCategory::Soft)));

        for (skill, category) in tagged {
            let key = skill.trim().to_lowercase();
            if skills.insert(key.clone(), category).is_some() {
                return Err(DictionaryError::DuplicateSkill(key));
            }
        }

        let mut alias_map = BTreeMap::new();
        for (alias, target) in aliases {
            let target = target.trim().to_lowercase();
            if !skills.contains_key(&target) {
                return Err(DictionaryError::UnknownAliasTarget {
                    alias: alias.to_string(),
                    target,
                });
            }
            alias_map.insert(alias.trim().to_lowercase(), target);
        }

        Ok(Self {
            skills,
            aliases: alias_map,
        })
    }

    /// The process-wide built-in dictionary.
    pub fn builtin() -> &'static SkillDictionary {
        &BUILTIN
    }

    pub fn contains(&self, skill: &str) -> bool {
        self.skills.contains_key(skill)
    }

    pub fn category(&self, skill: &str) -> Option<SkillCategory> {
        self.skills.get(skill).copied()
    }

    /// Canonical skills in lexical order.
    pub fn skills(&self) -> impl Iterator<Item = &str> {
        self.skills.keys().map(String::as_str)
    }

    /// `(alias, canonical)` pairs in lexical alias order.
    pub fn aliases(&self) -> impl Iterator<Item = (&str, &str)> {
        self.aliases.iter().map(|(a, c)| (a.as_str(), c.as_str()))
    }

    pub fn len(&self) -> usize {
        self.skills.len()
    }

    /// Splits a skill set into technical and soft halves; unknown entries are dropped.
    pub fn partition<'a, I>(&self, skills: I) -> (BTreeSet<String>, BTreeSet<String>)
    where
        I: IntoIterator<Item = &'a String>,
    {
        let mut technical = BTreeSet::new();
        let mut soft = BTreeSet::new();
        for skill in skills {
            match self.category(skill) {
                Some(SkillCategory::Technical) => {
                    technical.insert(skill.clone());
                }
                Some(SkillCategory::Soft) => {
                    soft.insert(skill.clone());
                }
                None => {}
            }
        }
        (technical, soft)
    }
}

static BUILTIN: LazyLock<SkillDictionary> = LazyLock::new(|| {
    SkillDictionary::new(TECHNICAL_SKILLS, SOFT_SKILLS, SKILL_ALIASES)
        .expect("built-in skill dictionary is consistent")
});
