//! BERT token classification backend
//!
//! Loads a pretrained token-classification checkpoint (encoder weights
//! under `bert`, classification head under `classifier`) from the Hub
//! and runs per-token label prediction on CPU or GPU.

use crate::error::{Result, ResumeMatcherError};
use candle_core::{DType, Device, Tensor, D};
use candle_nn::{Linear, Module, VarBuilder};
use candle_transformers::models::bert::{BertModel, Config as BertConfig};
use hf_hub::api::sync::ApiBuilder;
use std::collections::HashMap;
use std::path::Path;
use tokenizers::{Tokenizer, TruncationParams};

const MAX_SEQ_LEN: usize = 512;

pub struct BertNer {
    model: BertModel,
    classifier: Linear,
    tokenizer: Tokenizer,
    id2label: HashMap<u32, String>,
    device: Device,
}

/// Pick an inference device. GPU backends are feature-gated, so a GPU
/// request on a CPU-only build quietly falls back.
fn select_device(use_gpu: bool) -> Device {
    if use_gpu {
        #[cfg(feature = "cuda")]
        if let Ok(device) = Device::new_cuda(0) {
            log::info!("Using CUDA device for entity recognition");
            return device;
        }
        #[cfg(feature = "metal")]
        if let Ok(device) = Device::new_metal(0) {
            log::info!("Using Metal device for entity recognition");
            return device;
        }
        log::warn!("GPU requested but not available, falling back to CPU");
    }
    Device::Cpu
}

impl BertNer {
    pub fn load(repo_id: &str, models_dir: &Path, use_gpu: bool) -> Result<Self> {
        std::fs::create_dir_all(models_dir)?;
        let api = ApiBuilder::new()
            .with_cache_dir(models_dir.to_path_buf())
            .build()
            .map_err(|e| {
                ResumeMatcherError::ModelLoading(format!("Failed to initialize hub API: {}", e))
            })?;
        let repo = api.model(repo_id.to_string());

        let fetch = |file: &str| {
            repo.get(file).map_err(|e| {
                ResumeMatcherError::ModelLoading(format!(
                    "Failed to download {} from {}: {}",
                    file, repo_id, e
                ))
            })
        };
        let config_path = fetch("config.json")?;
        let tokenizer_path = fetch("tokenizer.json")?;
        let weights_path = fetch("model.safetensors")?;

        let config_text = std::fs::read_to_string(&config_path)?;
        let config: BertConfig = serde_json::from_str(&config_text)?;
        let raw: serde_json::Value = serde_json::from_str(&config_text)?;

        let id2label: HashMap<u32, String> = raw
            .get("id2label")
            .and_then(|v| v.as_object())
            .map(|map| {
                map.iter()
                    .filter_map(|(id, label)| {
                        Some((id.parse().ok()?, label.as_str()?.to_string()))
                    })
                    .collect()
            })
            .unwrap_or_default();
        if id2label.is_empty() {
            return Err(ResumeMatcherError::ModelLoading(format!(
                "{} is not a token classification model (no id2label table)",
                repo_id
            )));
        }
        let hidden_size = raw
            .get("hidden_size")
            .and_then(|v| v.as_u64())
            .unwrap_or(768) as usize;

        let mut tokenizer = Tokenizer::from_file(&tokenizer_path).map_err(|e| {
            ResumeMatcherError::ModelLoading(format!("Failed to load tokenizer: {}", e))
        })?;
        tokenizer
            .with_truncation(Some(TruncationParams {
                max_length: MAX_SEQ_LEN,
                ..Default::default()
            }))
            .map_err(|e| {
                ResumeMatcherError::ModelLoading(format!("Failed to configure truncation: {}", e))
            })?;

        let device = select_device(use_gpu);
        let vb = unsafe {
            VarBuilder::from_mmaped_safetensors(&[weights_path], DType::F32, &device)?
        };
        let model = BertModel::load(vb.pp("bert"), &config)?;
        let classifier = candle_nn::linear(hidden_size, id2label.len(), vb.pp("classifier"))?;

        log::debug!("Loaded token classification model {}", repo_id);
        Ok(Self {
            model,
            classifier,
            tokenizer,
            id2label,
            device,
        })
    }

    /// Predict entity labels for every token and group them by entity
    /// type (PER, ORG, LOC, MISC). Tokens are returned in document
    /// order, wordpiece continuations ("##x") included; the cleaner
    /// reassembles them.
    pub fn predict(&self, text: &str) -> Result<HashMap<String, Vec<String>>> {
        let encoding = self
            .tokenizer
            .encode(text, true)
            .map_err(|e| ResumeMatcherError::Recognition(format!("Tokenization failed: {}", e)))?;

        let input_ids = Tensor::new(encoding.get_ids(), &self.device)?.unsqueeze(0)?;
        let token_type_ids = Tensor::new(encoding.get_type_ids(), &self.device)?.unsqueeze(0)?;
        let attention_mask =
            Tensor::new(encoding.get_attention_mask(), &self.device)?.unsqueeze(0)?;

        let hidden = self
            .model
            .forward(&input_ids, &token_type_ids, Some(&attention_mask))?;
        let logits = self.classifier.forward(&hidden)?;
        let predicted = logits.argmax(D::Minus1)?.squeeze(0)?.to_vec1::<u32>()?;

        let mut entities: HashMap<String, Vec<String>> = HashMap::new();
        for (token, label_id) in encoding.get_tokens().iter().zip(predicted) {
            let Some(label) = self.id2label.get(&label_id) else {
                continue;
            };
            if label == "O" || token.starts_with('[') {
                continue;
            }
            let group = label
                .strip_prefix("B-")
                .or_else(|| label.strip_prefix("I-"))
                .unwrap_or(label);
            entities
                .entry(group.to_string())
                .or_default()
                .push(token.clone());
        }

        Ok(entities)
    }
}
