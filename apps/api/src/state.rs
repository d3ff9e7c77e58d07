use std::sync::Arc;

use crate::config::Config;
use crate::documents::DocumentParser;
use crate::skills::dictionary::SkillDictionary;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Pluggable text extraction. Default: FileDocumentParser.
    pub parser: Arc<dyn DocumentParser>,
    /// Read-only, process-wide skill vocabulary.
    pub dictionary: &'static SkillDictionary,
}

impl AppState {
    pub fn new(config: Config, parser: Arc<dyn DocumentParser>) -> Self {
        Self {
            config,
            parser,
            dictionary: SkillDictionary::builtin(),
        }
    }
}
