//! Resume analyzer: ATS-style resume analysis and keyword-gap reporting

mod analysis;
mod cli;
mod config;
mod error;
mod input;
mod output;
mod taxonomy;

use analysis::engine::AnalysisEngine;
use clap::Parser;
use cli::{Cli, Commands, ConfigAction, RoleAction};
use config::Config;
use error::{Result, ResumeAnalyzerError};
use input::manager::InputManager;
use log::{error, info};
use output::formatter::ReportGenerator;
use std::path::PathBuf;
use std::process;
use taxonomy::Taxonomy;

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

    let taxonomy = match load_taxonomy(cli.taxonomy.as_deref()) {
        Ok(taxonomy) => taxonomy,
        Err(e) => {
            error!("Failed to load role taxonomy: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = run_command(cli.command, config, taxonomy).await {
        error!("Command failed: {}", e);
        process::exit(1);
    }
}

fn load_taxonomy(path: Option<&std::path::Path>) -> Result<Taxonomy> {
    match path {
        Some(path) => Taxonomy::from_path(path),
        None => Taxonomy::builtin(),
    }
}

async fn run_command(command: Commands, mut config: Config, taxonomy: Taxonomy) -> Result<()> {
    match command {
        Commands::Analyze {
            resume,
            category,
            role,
            output,
            save,
            detailed,
        } => {
            info!("Starting resume analysis");

            cli::validate_file_extension(&resume, &["pdf", "docx", "txt", "md"])
                .map_err(|e| ResumeAnalyzerError::InvalidInput(format!("Resume file: {}", e)))?;

            let output_format =
                cli::parse_output_format(&output).map_err(ResumeAnalyzerError::InvalidInput)?;

            // Role lookup fails here, before the analysis core ever runs.
            let profile = taxonomy.lookup(&category, &role)?;

            config.output.detailed = detailed;

            println!("🚀 Resume analysis");
            println!("📄 Resume: {}", resume.display());
            println!("🎯 Target role: {} / {}", category, role);
            println!("   {}", profile.description);
            println!(
                "   Required skills: {}",
                profile.required_skills.join(", ")
            );

            let input_manager = InputManager::new();
            let (bytes, file_type) = input_manager.read_document(&resume).await?;
            info!("read {} bytes ({:?})", bytes.len(), file_type);

            let engine = AnalysisEngine::new(&config);
            let report = engine.analyze(&bytes, file_type, profile);

            if let Some(notice) = &report.classification_notice {
                println!("\n⚠️  {}", notice);
            }

            let generator = ReportGenerator::new(config.output.color_output, detailed);
            let rendered = generator.format(&report, &output_format)?;

            match save {
                Some(path) => {
                    save_report(&path, &rendered)?;
                    println!("\n💾 Report saved to {}", path.display());
                }
                None => println!("{}", rendered),
            }

            println!(
                "\n✅ Analysis complete! ATS score: {}%",
                report.ats_score
            );
        }

        Commands::Roles { action } => match action {
            RoleAction::List { category } => {
                println!("📚 Role Taxonomy\n");
                for cat in &taxonomy.categories {
                    if let Some(filter) = &category {
                        if &cat.name != filter {
                            continue;
                        }
                    }
                    println!("📂 {}", cat.name);
                    for role in &cat.roles {
                        println!("  • {}", role.name);
                    }
                    println!();
                }
            }

            RoleAction::Show { category, role } => {
                let profile = taxonomy.lookup(&category, &role)?;
                println!("📋 {} / {}\n", category, role);
                println!("{}\n", profile.description);
                println!("Required skills:");
                for skill in &profile.required_skills {
                    println!("  • {}", skill);
                }
                println!("\nExpected sections:");
                for section in &profile.sections {
                    println!("  • {}", section);
                }
                if !profile.recommended.technical.is_empty() {
                    println!("\nRecommended technical skills:");
                    for skill in &profile.recommended.technical {
                        println!("  • {}", skill);
                    }
                }
                if !profile.recommended.soft.is_empty() {
                    println!("\nRecommended soft skills:");
                    for skill in &profile.recommended.soft {
                        println!("  • {}", skill);
                    }
                }
            }
        },

        Commands::Config { action } => match action {
            Some(ConfigAction::Show) | None => {
                println!("⚙️  Current Configuration\n");
                println!("Scoring weights:");
                println!("  Keywords: {:.1}%", config.scoring.keyword_weight * 100.0);
                println!("  Sections: {:.1}%", config.scoring.section_weight * 100.0);
                println!("  Format:   {:.1}%", config.scoring.format_weight * 100.0);
                println!("\nFormat checklist:");
                println!("  Email: {} pts", config.format_checks.email_points);
                println!("  Phone: {} pts", config.format_checks.phone_points);
                println!("  Bullets: {} pts", config.format_checks.bullet_points);
                println!("  Length: {} pts", config.format_checks.length_points);
                println!(
                    "  No table artifacts: {} pts",
                    config.format_checks.no_table_artifact_points
                );
                println!(
                    "  Length bounds: {}-{} words",
                    config.format_checks.min_words, config.format_checks.max_words
                );
            }

            Some(ConfigAction::Reset) => {
                println!("🔄 Resetting configuration to defaults...");
                let default_config = Config::default();
                default_config.save()?;
                println!("✅ Configuration reset successfully!");
            }
        },
    }

    Ok(())
}

fn save_report(path: &PathBuf, rendered: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(path, rendered)?;
    Ok(())
}
