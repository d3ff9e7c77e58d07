// Skill matching core.
// Pipeline: raw text → normalizer → extractor → skill set → scorer → result.
// The bulk ranker repeats extraction + scoring per candidate and aggregates.

pub mod bulk;
pub mod dictionary;
pub mod extractor;
pub mod handlers;
pub mod normalizer;
pub mod scorer;
