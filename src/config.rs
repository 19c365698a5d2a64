//! Configuration management for the resume matcher

use crate::error::{Result, ResumeMatcherError};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub matching: MatchingConfig,
    pub tfidf: TfidfConfig,
    pub ranking: RankingConfig,
    pub models: ModelConfig,
    pub heuristics: HeuristicsConfig,
}

/// Scoring method for the similarity engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchMethod {
    Hybrid,
    Tfidf,
    Embedding,
}

impl std::str::FromStr for MatchMethod {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "hybrid" => Ok(MatchMethod::Hybrid),
            "tfidf" => Ok(MatchMethod::Tfidf),
            "embedding" => Ok(MatchMethod::Embedding),
            _ => Err(format!(
                "Invalid method: {}. Supported: hybrid, tfidf, embedding",
                s
            )),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchingConfig {
    pub method: MatchMethod,
    /// Per-section multipliers applied by the structured combiner.
    pub section_weights: HashMap<String, f32>,
    pub min_skill_match: f32,
    pub use_gpu: bool,
    /// Embedding model tier: fast, balanced or accurate.
    pub embedding_model: String,
    /// Hybrid blend weights. The 0.6/0.4 split is a default, not a law.
    pub semantic_weight: f32,
    pub lexical_weight: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TfidfConfig {
    /// Inclusive (min, max) word n-gram sizes.
    pub ngram_range: (usize, usize),
    /// Minimum number of documents a term must appear in.
    pub min_df: usize,
    /// Vocabulary cap, highest-frequency terms kept first.
    pub max_features: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankingConfig {
    /// Worker pool width for batch ranking.
    pub workers: usize,
    /// Minimum score (percent) a resume needs to appear in the table.
    pub min_score: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    pub models_dir: PathBuf,
    /// Model2Vec repos keyed by tier alias.
    pub embedding_repos: HashMap<String, String>,
    /// Token-classification model used for entity recognition.
    pub ner_repo: String,
}

/// Corpus-specific heuristic data consumed by the extractors and the
/// entity cleaner. Kept in configuration so the tables can be tuned
/// without code changes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeuristicsConfig {
    /// Canonical section headers recognized by the segmenter.
    pub section_headers: Vec<String>,
    /// Canonical skill label -> whole-word regex synonym patterns.
    pub skill_vocabulary: Vec<SkillEntry>,
    /// Display category -> patterns matched against skill labels.
    pub skill_categories: Vec<SkillCategory>,
    /// Lowercase keywords identifying educational/corporate institutions.
    pub institution_keywords: Vec<String>,
    /// Truncated organization names rewritten to their full form.
    pub org_aliases: HashMap<String, String>,
    /// Known-bad organization fragments dropped outright.
    pub org_drop: Vec<String>,
    /// Organizations accepted without an institution keyword.
    pub org_allowlist: Vec<String>,
    /// Recognizer noise tokens discarded before merging.
    pub noise_tokens: Vec<String>,
    /// Short generic fragments never accepted as entities.
    pub generic_fragments: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillEntry {
    pub label: String,
    pub patterns: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillCategory {
    pub name: String,
    pub patterns: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        let models_dir = dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".resume-matcher")
            .join("models");

        let mut section_weights = HashMap::new();
        section_weights.insert("skills".to_string(), 0.60);
        section_weights.insert("experience".to_string(), 0.25);
        section_weights.insert("projects".to_string(), 0.10);
        section_weights.insert("education".to_string(), 0.05);

        let mut embedding_repos = HashMap::new();
        embedding_repos.insert("fast".to_string(), "minishlab/potion-base-2M".to_string());
        embedding_repos.insert("balanced".to_string(), "minishlab/M2V_base_output".to_string());
        embedding_repos.insert("accurate".to_string(), "minishlab/M2V_large_output".to_string());

        Self {
            matching: MatchingConfig {
                method: MatchMethod::Hybrid,
                section_weights,
                min_skill_match: 0.65,
                use_gpu: false,
                embedding_model: "balanced".to_string(),
                semantic_weight: 0.6,
                lexical_weight: 0.4,
            },
            tfidf: TfidfConfig {
                ngram_range: (1, 3),
                min_df: 2,
                max_features: 5000,
            },
            ranking: RankingConfig {
                workers: 4,
                min_score: 0.0,
            },
            models: ModelConfig {
                models_dir,
                embedding_repos,
                ner_repo: "dslim/bert-base-NER".to_string(),
            },
            heuristics: HeuristicsConfig::default(),
        }
    }
}

impl Default for HeuristicsConfig {
    fn default() -> Self {
        let headers = [
            "Contact",
            "Profile",
            "Career Objective",
            "Professional Summary",
            "Summary",
            "Objective",
            "Education",
            "Academic Background",
            "Qualifications",
            "Skills",
            "Technical Skills",
            "Key Skills",
            "Core Competencies",
            "Certifications",
            "Licenses",
            "Certificates",
            "Internships",
            "Work Experience",
            "Experience",
            "Employment History",
            "Projects",
            "Personal Projects",
            "Academic Projects",
            "Languages",
            "Declaration",
            "References",
        ];

        let vocabulary: &[(&str, &[&str])] = &[
            ("Python", &["python"]),
            ("Java", &["java"]),
            ("JavaScript", &["javascript", "js"]),
            ("C++", &["c\\+\\+"]),
            ("C", &["c"]),
            ("SQL", &["sql"]),
            ("HTML", &["html"]),
            ("CSS", &["css"]),
            ("React", &["react"]),
            ("Node.js", &["node", "node\\.js", "nodejs"]),
            ("Docker", &["docker"]),
            ("AWS", &["aws", "amazon web services"]),
            ("Pygame", &["pygame"]),
            ("Streamlit", &["streamlit"]),
            ("Git", &["git"]),
            ("Machine Learning", &["machine learning", "ml"]),
            ("Data Structures", &["data structures"]),
            ("Web Development", &["web development"]),
            ("DeepFace", &["deepface"]),
        ];

        let categories: &[(&str, &[&str])] = &[
            ("Programming Languages", &["python", "java", "javascript", "c\\+\\+", "c"]),
            ("Web Technologies", &["html", "css", "react", "node"]),
            ("Databases", &["sql"]),
            ("Frameworks", &["pygame", "streamlit"]),
            ("Cloud & DevOps", &["docker", "aws", "amazon web services"]),
            ("Data Science", &["machine learning", "ml", "data structures"]),
            ("Tools", &["git"]),
            ("Concepts", &["web development"]),
            ("Computer Vision", &["deepface"]),
        ];

        let mut org_aliases = HashMap::new();
        org_aliases.insert("IBM SkillsB".to_string(), "IBM SkillsBuild".to_string());
        org_aliases.insert(
            "Vardhaman".to_string(),
            "Vardhaman College of Engineering".to_string(),
        );
        org_aliases.insert("Elsystems".to_string(), "Elsystems Services".to_string());
        org_aliases.insert("Edunet".to_string(), "Edunet Foundation".to_string());

        Self {
            section_headers: headers.iter().map(|s| s.to_string()).collect(),
            skill_vocabulary: vocabulary
                .iter()
                .map(|(label, patterns)| SkillEntry {
                    label: label.to_string(),
                    patterns: patterns.iter().map(|p| p.to_string()).collect(),
                })
                .collect(),
            skill_categories: categories
                .iter()
                .map(|(name, patterns)| SkillCategory {
                    name: name.to_string(),
                    patterns: patterns.iter().map(|p| p.to_string()).collect(),
                })
                .collect(),
            institution_keywords: [
                "college",
                "university",
                "institute",
                "school",
                "academy",
                "foundation",
                "research center",
                "company",
                "corporation",
                "services",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            org_aliases,
            org_drop: vec!["Web Development Inter".to_string(), "Deep".to_string()],
            org_allowlist: [
                "Elsystems",
                "Edunet",
                "Cognifyz",
                "IBM",
                "CodTech",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            noise_tokens: vec!["interns".to_string(), "inter".to_string()],
            generic_fragments: ["web", "app", "ml", "ai"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = toml::from_str(&content).map_err(|e| {
                ResumeMatcherError::Configuration(format!("Failed to parse config: {}", e))
            })?;
            Ok(config)
        } else {
            let config = Self::default();
            config.save()?;
            Ok(config)
        }
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path();

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self).map_err(|e| {
            ResumeMatcherError::Configuration(format!("Failed to serialize config: {}", e))
        })?;

        std::fs::write(&config_path, content)?;
        Ok(())
    }

    fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("resume-matcher")
            .join("config.toml")
    }

    pub fn models_dir(&self) -> &PathBuf {
        &self.models.models_dir
    }

    /// Resolve the embedding repo for the configured tier alias.
    pub fn embedding_repo(&self) -> &str {
        self.models
            .embedding_repos
            .get(&self.matching.embedding_model)
            .map(|s| s.as_str())
            .unwrap_or("minishlab/M2V_base_output")
    }
}
