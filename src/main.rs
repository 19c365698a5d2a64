//! Resume matcher: parse resumes, score them against job descriptions,
//! and rank whole batches.

use clap::Parser;
use colored::Colorize;
use log::{error, info};
use resume_matcher::cli::{self, Cli, Commands, ConfigAction};
use resume_matcher::config::{Config, MatchMethod};
use resume_matcher::error::{Result, ResumeMatcherError};
use resume_matcher::input::manager::InputManager;
use resume_matcher::parsing::ResumeParser;
use resume_matcher::ranking::ResumeRanker;
use resume_matcher::scoring::{ResumeInput, ResumeMatcher, ScoreMode};
use std::process;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = run_command(cli.command, config).await {
        error!("Command failed: {}", e);
        process::exit(1);
    }
}

async fn run_command(command: Commands, config: Config) -> Result<()> {
    match command {
        Commands::Parse { file, json } => {
            cli::validate_file_extension(&file, &["pdf", "txt", "md"])
                .map_err(|e| ResumeMatcherError::InvalidInput(format!("Resume file: {}", e)))?;

            let mut input_manager = InputManager::new();
            let file_type = input_manager.detect_file_type(&file)?;
            let text = input_manager.extract_text(&file).await?;

            info!("Parsing {}", file.display());
            let parser = ResumeParser::new(&config);
            let filename = file
                .file_name()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_else(|| file.display().to_string());
            let parsed = parser.parse(&filename, file_type.tag(), &text)?;

            if json {
                println!("{}", serde_json::to_string_pretty(&*parsed)?);
                return Ok(());
            }

            println!("{}", "📄 Parsed resume".bold());
            if let Some(name) = &parsed.contact.name {
                println!("  Name: {}", name);
            }
            if let Some(email) = &parsed.contact.email {
                println!("  Email: {}", email);
            }
            if let Some(phone) = &parsed.contact.phone {
                println!("  Phone: {}", phone);
            }
            if let Some(linkedin) = &parsed.contact.linkedin {
                println!("  LinkedIn: {}", linkedin);
            }
            if let Some(github) = &parsed.contact.github {
                println!("  GitHub: {}", github);
            }

            if !parsed.skills.is_empty() {
                println!("\n{}", "🛠  Skills".bold());
                for line in parser.skill_extractor().format_skills(&parsed.skills).lines() {
                    println!("  {}", line);
                }
            }

            if !parsed.education.is_empty() {
                println!("\n{}", "🎓 Education".bold());
                for entry in &parsed.education {
                    let mut line = entry.degree.clone();
                    if let Some(institution) = &entry.institution {
                        line.push_str(&format!(" — {}", institution));
                    }
                    if let Some(dates) = &entry.dates {
                        line.push_str(&format!(" ({})", dates));
                    }
                    println!("  • {}", line);
                }
            }

            if !parsed.internships.is_empty() {
                println!("\n{}", "💼 Internships".bold());
                for internship in &parsed.internships {
                    let role = internship.role.as_deref().unwrap_or("Intern");
                    let duration = internship.duration.as_deref().unwrap_or("n/a");
                    println!("  • {} — {} ({})", internship.company, role, duration);
                }
            }

            if !parsed.projects.is_empty() {
                println!("\n{}", "🚀 Projects".bold());
                for project in &parsed.projects {
                    println!("  • {}", project);
                }
            }

            if !parsed.certifications.is_empty() {
                println!("\n{}", "📜 Certifications".bold());
                for cert in &parsed.certifications {
                    println!("  • {}", cert);
                }
            }

            if !parsed.global_entities.is_empty() {
                println!("\n{}", "🔎 Entities".bold());
                for (label, values) in &parsed.global_entities {
                    println!("  {}: {}", label, values.join(", "));
                }
            }
        }

        Commands::Match {
            resume,
            job,
            method,
        } => {
            cli::validate_file_extension(&resume, &["pdf", "txt", "md"])
                .map_err(|e| ResumeMatcherError::InvalidInput(format!("Resume file: {}", e)))?;
            cli::validate_file_extension(&job, &["txt", "md"])
                .map_err(|e| {
                    ResumeMatcherError::InvalidInput(format!("Job description file: {}", e))
                })?;

            let mut config = config;
            if let Some(method) = method {
                config.matching.method = method
                    .parse::<MatchMethod>()
                    .map_err(ResumeMatcherError::InvalidInput)?;
            }

            let mut input_manager = InputManager::new();
            let resume_type = input_manager.detect_file_type(&resume)?;
            let resume_text = input_manager.extract_text(&resume).await?;
            let jd_text = input_manager.extract_text(&job).await?;
            if jd_text.trim().is_empty() {
                return Err(ResumeMatcherError::EmptyJobDescription);
            }

            let parser = ResumeParser::new(&config);
            let filename = resume
                .file_name()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_else(|| resume.display().to_string());
            let parsed = parser.parse(&filename, resume_type.tag(), &resume_text)?;

            info!("Scoring {} against {}", resume.display(), job.display());
            let matcher = ResumeMatcher::new(&config);
            let scores = matcher.score(
                &jd_text,
                &[ResumeInput::Structured(parsed.clone())],
                ScoreMode::Structured,
            )?;
            let score = scores.first().map(|(_, s)| *s).unwrap_or(0.0);

            println!("{}", "📊 Match result".bold());
            println!("  Method: {:?}", matcher.method());
            let pct = score * 100.0;
            let rendered = format!("{:.2}%", pct);
            let colored_score = if pct >= 70.0 {
                rendered.green()
            } else if pct >= 40.0 {
                rendered.yellow()
            } else {
                rendered.red()
            };
            println!("  Score: {}", colored_score);

            let jd_skills = parser.skill_extractor().extract_from_text(&jd_text);
            if !jd_skills.is_empty() {
                let matched: Vec<&String> =
                    jd_skills.iter().filter(|s| parsed.skills.contains(s)).collect();
                let missing: Vec<&String> =
                    jd_skills.iter().filter(|s| !parsed.skills.contains(s)).collect();
                println!(
                    "  Skills matched: {}/{}",
                    matched.len(),
                    jd_skills.len()
                );
                if !matched.is_empty() {
                    println!(
                        "    ✅ {}",
                        matched.iter().map(|s| s.as_str()).collect::<Vec<_>>().join(", ")
                    );
                }
                if !missing.is_empty() {
                    println!(
                        "    ❌ {}",
                        missing.iter().map(|s| s.as_str()).collect::<Vec<_>>().join(", ")
                    );
                }
            }
        }

        Commands::Rank {
            resumes,
            job,
            min_score,
            workers,
            json,
        } => {
            cli::validate_file_extension(&job, &["txt", "md"])
                .map_err(|e| {
                    ResumeMatcherError::InvalidInput(format!("Job description file: {}", e))
                })?;

            let mut input_manager = InputManager::new();
            let jd_text = input_manager.extract_text(&job).await?;

            let mut ranker = ResumeRanker::new(&config);
            if let Some(min_score) = min_score {
                ranker = ranker.with_min_score(min_score);
            }
            if let Some(workers) = workers {
                ranker = ranker.with_workers(workers);
            }

            info!("Ranking {} resumes", resumes.len());
            let table = ranker.rank(&resumes, &jd_text)?;

            if json {
                println!("{}", serde_json::to_string_pretty(&table)?);
            } else if table.is_empty() {
                println!("{}", "No resumes cleared the score threshold.".yellow());
            } else {
                println!("{}", "🏆 Ranking".bold());
                print!("{}", table);
            }
        }

        Commands::Config { action } => match action.unwrap_or(ConfigAction::Show) {
            ConfigAction::Show => {
                let rendered = toml::to_string_pretty(&config).map_err(|e| {
                    ResumeMatcherError::Configuration(format!(
                        "Failed to render config: {}",
                        e
                    ))
                })?;
                println!("{}", rendered);
            }
            ConfigAction::Reset => {
                let fresh = Config::default();
                fresh.save()?;
                println!("{}", "Configuration reset to defaults.".green());
            }
        },
    }

    Ok(())
}
