//! Static embedding backend
//!
//! Model2Vec static embeddings: cheap mean-pooled token vectors, no
//! transformer forward pass, fast enough to embed whole resume batches
//! on CPU.

use crate::error::{Result, ResumeMatcherError};
use model2vec_rs::model::StaticModel;

const MAX_TOKENS: usize = 512;
const CHAR_BUDGET: f32 = 4000.0;

pub struct Embedder {
    model: StaticModel,
}

impl Embedder {
    pub fn load(repo: &str) -> Result<Self> {
        let model = StaticModel::from_pretrained(repo, None, None, None).map_err(|e| {
            ResumeMatcherError::ModelLoading(format!(
                "Failed to load embedding model {}: {}",
                repo, e
            ))
        })?;
        log::debug!("Loaded embedding model {}", repo);
        Ok(Self { model })
    }

    /// Batch size scales inversely with average document length so a
    /// batch stays near a fixed character budget.
    fn batch_size(documents: &[String]) -> usize {
        let total: usize = documents.iter().map(|d| d.len()).sum();
        let avg = total as f32 / documents.len().max(1) as f32;
        ((CHAR_BUDGET / avg.max(1.0)) as usize).clamp(1, 64)
    }

    /// Encode documents into L2-normalized embeddings, one per input,
    /// in input order.
    pub fn encode(&self, documents: &[String]) -> Result<Vec<Vec<f32>>> {
        if documents.is_empty() {
            return Ok(Vec::new());
        }

        let batch_size = Self::batch_size(documents);
        let mut embeddings =
            self.model
                .encode_with_args(documents, Some(MAX_TOKENS), batch_size);
        if embeddings.len() != documents.len() {
            return Err(ResumeMatcherError::Embedding(format!(
                "Expected {} embeddings, got {}",
                documents.len(),
                embeddings.len()
            )));
        }

        for embedding in embeddings.iter_mut() {
            normalize(embedding);
        }
        Ok(embeddings)
    }
}

fn normalize(vector: &mut [f32]) {
    let norm: f32 = vector.iter().map(|v| v * v).sum::<f32>().sqrt();
    if norm > 0.0 {
        for v in vector.iter_mut() {
            *v /= norm;
        }
    }
}

/// Cosine similarity of two unit vectors.
pub fn cosine(a: &[f32], b: &[f32]) -> f32 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_batch_size_shrinks_with_long_documents() {
        let short: Vec<String> = (0..10).map(|_| "tiny".to_string()).collect();
        let long: Vec<String> = (0..10).map(|_| "x".repeat(8000)).collect();
        assert_eq!(Embedder::batch_size(&short), 64);
        assert_eq!(Embedder::batch_size(&long), 1);
    }

    #[test]
    fn test_normalize_produces_unit_vector() {
        let mut v = vec![3.0, 4.0];
        normalize(&mut v);
        assert!((cosine(&v, &v) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_normalize_leaves_zero_vector() {
        let mut v = vec![0.0, 0.0];
        normalize(&mut v);
        assert_eq!(v, vec![0.0, 0.0]);
    }
}
