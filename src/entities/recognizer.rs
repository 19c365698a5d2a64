//! Lazy entity recognition front-end

use crate::config::ModelConfig;
use crate::entities::bert::BertNer;
use once_cell::sync::OnceCell;
use std::collections::HashMap;
use std::path::PathBuf;

/// Wraps the BERT backend behind a one-shot lazy initializer. Loading
/// the model is expensive and can fail (offline, bad repo); a failed
/// load is remembered so recognition degrades to empty output instead
/// of retrying on every resume.
pub struct EntityRecognizer {
    repo: String,
    models_dir: PathBuf,
    use_gpu: bool,
    backend: OnceCell<Option<BertNer>>,
}

impl EntityRecognizer {
    pub fn new(models: &ModelConfig, use_gpu: bool) -> Self {
        Self {
            repo: models.ner_repo.clone(),
            models_dir: models.models_dir.clone(),
            use_gpu,
            backend: OnceCell::new(),
        }
    }

    fn backend(&self) -> Option<&BertNer> {
        self.backend
            .get_or_init(|| {
                match BertNer::load(&self.repo, &self.models_dir, self.use_gpu) {
                    Ok(backend) => Some(backend),
                    Err(e) => {
                        log::warn!(
                            "Entity recognition unavailable ({}), continuing without it",
                            e
                        );
                        None
                    }
                }
            })
            .as_ref()
    }

    /// Raw entities grouped by label. Returns an empty map when the
    /// backend is unavailable or prediction fails; parsing never stops
    /// on recognition trouble.
    pub fn extract_entities(&self, text: &str) -> HashMap<String, Vec<String>> {
        let Some(backend) = self.backend() else {
            return HashMap::new();
        };
        match backend.predict(text) {
            Ok(entities) => entities,
            Err(e) => {
                log::warn!("Entity prediction failed: {}", e);
                HashMap::new()
            }
        }
    }
}
