//! Skill Extractor — finds dictionary skills in document text.
//!
//! Matching is plain substring containment over normalized text, in two
//! additive passes:
//! 1. every canonical skill contained in the text
//! 2. every alias contained in the text contributes its canonical skill
//!
//! Short skills such as `r` or `go` therefore also match inside longer words.

use std::collections::BTreeSet;

use crate::skills::dictionary::SkillDictionary;
use crate::skills::normalizer::normalize_text;

/// A deduplicated set of canonical skills found in one document.
pub type ExtractedSkillSet = BTreeSet<String>;

pub struct SkillExtractor<'d> {
    dictionary: &'d SkillDictionary,
}

impl Default for SkillExtractor<'static> {
    fn default() -> Self {
        Self::new(SkillDictionary::builtin())
    }
}

impl<'d> SkillExtractor<'d> {
    pub fn new(dictionary: &'d SkillDictionary) -> Self {
        Self { dictionary }
    }

    /// Normalizes `text` and returns every canonical skill it mentions.
    pub fn extract(&self, text: &str) -> ExtractedSkillSet {
        let normalized = normalize_text(text);
        self.extract_normalized(&normalized)
    }

    fn extract_normalized(&self, normalized: &str) -> ExtractedSkillSet {
        let mut found = ExtractedSkillSet::new();
        if normalized.is_empty() {
            return found;
        }

        for skill in self.dictionary.skills() {
            if normalized.contains(skill) {
                found.insert(skill.to_string());
            }
        }

        for (alias, canonical) in self.dictionary.aliases() {
            if normalized.contains(alias) && self.dictionary.contains(canonical) {
                found.insert(canonical.to_string());
            }
        }

        found
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract_skills(text: &str) -> ExtractedSkillSet {
        SkillExtractor::default().extract(text)
    }

    fn has(skills: &ExtractedSkillSet, skill: &str) -> bool {
        skills.contains(skill)
    }

    #[test]
    fn test_aliases_resolve_to_canonical_skills() {
        let skills =
            extract_skills("Experienced with NodeJS and ReactJS, strong in c plus plus and SQL.");
        assert!(has(&skills, "node.js"));
        assert!(has(&skills, "react"));
        assert!(has(&skills, "c++"));
        // "nodejs" and "reactjs" are never emitted as skills themselves
        assert!(!has(&skills, "nodejs"));
        assert!(!has(&skills, "reactjs"));
    }

    #[test]
    fn test_every_member_is_canonical() {
        let dict = SkillDictionary::builtin();
        let skills = extract_skills(
            "Led a team building microservices in Go and Rust on AWS with Docker, \
             dotnet background, ML and DL research, csharp, vuejs, angularjs.",
        );
        assert!(!skills.is_empty());
        for skill in &skills {
            assert!(dict.contains(skill), "{skill} is not canonical");
        }
    }

    #[test]
    fn test_alias_adds_skill_even_without_literal_match() {
        let skills = extract_skills("Shipped a dotnet service, used csharp daily");
        assert!(has(&skills, "asp.net"));
        assert!(has(&skills, "c#"));
    }

    #[test]
    fn test_multi_word_skills_match() {
        let skills = extract_skills("Strong Problem-Solving? No: problem solving and Machine Learning.");
        assert!(has(&skills, "problem solving"));
        assert!(has(&skills, "machine learning"));
    }

    #[test]
    fn test_short_skills_match_inside_words() {
        // Substring semantics: "r" matches any text containing the letter r,
        // "go" matches inside "good".
        let skills = extract_skills("good writer");
        assert!(has(&skills, "r"));
        assert!(has(&skills, "go"));
    }

    #[test]
    fn test_empty_and_noise_text_yield_nothing() {
        assert!(extract_skills("").is_empty());
        assert!(extract_skills("   ---   ***   ").is_empty());
    }

    #[test]
    fn test_custom_dictionary() {
        let dict =
            SkillDictionary::new(&["haskell"], &["patience"], &[("ghc", "haskell")]).unwrap();
        let extractor = SkillExtractor::new(&dict);
        let skills = extractor.extract("Compiled with GHC; showed PATIENCE");
        assert_eq!(
            skills.into_iter().collect::<Vec<_>>(),
            vec!["haskell", "patience"]
        );
    }
}
