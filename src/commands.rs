//! Handlers for the CLI subcommands.

use crate::common::CommonParams;
use crate::config::Config;
use crate::export::{ExportFormat, ExportManager, ExportRecord};
use crate::formatter;
use crate::llm::{self, LmStudioClient};
use crate::parser::{self, ParseError};
use crate::prompt;
use crate::providers::Provider;
use crate::ui;
use crate::{log_debug, log_error};
use anyhow::{Context, Result, anyhow};
use std::io::Read;
use std::path::PathBuf;

/// Handle the `analyze` command
pub async fn handle_analyze_command(
    common: CommonParams,
    plan_file: Option<PathBuf>,
    example: bool,
    export: Option<String>,
    output_dir: Option<PathBuf>,
) -> Result<()> {
    let mut config = Config::load()?;
    common.apply_to_config(&mut config)?;

    // Reject an unknown export format before spending an LLM call on it
    let export_format = export
        .as_deref()
        .map(str::parse::<ExportFormat>)
        .transpose()?;

    let provider: Provider = config.default_provider.parse()?;
    let model = config.model_for(provider);

    let plan = read_plan(plan_file, example)?;
    if plan.trim().is_empty() {
        ui::print_warning("Please enter an architecture plan to analyze.");
        return Ok(());
    }

    log_debug!(
        "Analyzing plan ({} bytes) with model {} via {}",
        plan.len(),
        model,
        provider
    );

    let spinner = ui::create_spinner(&format!(
        "🤖 Analyzing your plan with {} via {}...",
        model,
        provider.label()
    ));

    let client = llm::create_client(provider, &config);
    let result = client.generate_analysis(&plan, &model).await;
    spinner.finish_and_clear();

    let raw = result.map_err(|e| {
        log_error!("Analysis request failed: {}", e);
        anyhow!("{e}")
    })?;

    let report = match parser::parse_analysis(&raw) {
        Ok(report) => report,
        Err(e) => {
            log_error!("Failed to parse analysis response: {}", e);
            if let ParseError::MalformedJson { .. } = &e
                && let Some(text) = e.raw_text()
            {
                ui::print_warning("The model returned a response that is not valid JSON:");
                ui::print_bordered_content(text);
            }
            return Err(e.into());
        }
    };

    ui::print_newline();
    ui::print_message(&ui::create_gradient_text("🏛️  Archimedes Architecture Review"));
    let markdown = formatter::render_analysis(&report, &model);
    println!("{}", formatter::style_for_terminal(&markdown));

    if let Some(format) = export_format {
        let manager = ExportManager::new(output_dir.unwrap_or_else(|| config.export_dir.clone()))?;
        let record = ExportRecord {
            report,
            plan,
            model,
        };
        let path = manager.export(&record, format)?;
        ui::print_success(&format!("Report exported to {}", path.display()));
    }

    Ok(())
}

/// Resolve the plan text from the example flag, stdin, or a file
fn read_plan(plan_file: Option<PathBuf>, example: bool) -> Result<String> {
    if example {
        return Ok(prompt::EXAMPLE_PLAN.to_string());
    }

    match plan_file {
        Some(path) if path.as_os_str() == "-" => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read plan from stdin")?;
            Ok(buffer)
        }
        Some(path) => std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read plan file: {}", path.display())),
        None => Err(anyhow!(
            "No plan provided. Pass a file path, '-' for stdin, or use --example."
        )),
    }
}

/// Handle the `models` command
pub async fn handle_models_command(host: Option<String>) -> Result<()> {
    let config = Config::load()?;
    let host = host.unwrap_or_else(|| config.local_host.clone());
    let client = LmStudioClient::new(&host);

    let spinner = ui::create_spinner(&format!("Querying models at {host}..."));
    let models = client.list_models().await;
    spinner.finish_and_clear();

    ui::print_info(&format!("Models available at {}:", client.base_url()));
    for model in &models {
        ui::print_message(&format!("  • {model}"));
    }
    Ok(())
}

/// Handle the `doctor` command
pub async fn handle_doctor_command(host: Option<String>) -> Result<()> {
    let config = Config::load()?;
    let host = host.unwrap_or_else(|| config.local_host.clone());

    ui::print_info("Provider status");
    ui::print_newline();

    // Gemini needs credentials only; no requests are made on its behalf
    let gemini_key = config.api_key_for(Provider::Gemini);
    if gemini_key.is_empty() {
        ui::print_warning(&format!(
            "  {} — no API key. Set {} or run 'archimedes config --provider gemini --api-key <KEY>'.",
            Provider::Gemini.label(),
            Provider::Gemini.api_key_env()
        ));
    } else {
        ui::print_success(&format!("  {} — API key configured.", Provider::Gemini.label()));
    }

    let client = LmStudioClient::new(&host);
    let spinner = ui::create_spinner(&format!("Checking LM Studio at {host}..."));
    let (healthy, message) = client.health_check().await;
    spinner.finish_and_clear();

    if healthy {
        ui::print_success(&format!("  {} — {message}", Provider::LmStudio.label()));
    } else {
        ui::print_warning(&format!("  {} — {message}", Provider::LmStudio.label()));
    }

    Ok(())
}

/// Handle the `config` command
pub fn handle_config_command(
    common: &CommonParams,
    api_key: Option<String>,
    export_dir: Option<PathBuf>,
) -> Result<()> {
    let mut config = Config::load()?;

    let making_changes = common.provider.is_some()
        || common.model.is_some()
        || common.host.is_some()
        || api_key.is_some()
        || export_dir.is_some();

    if making_changes {
        config.update(
            common.provider.clone(),
            api_key,
            common.model.clone(),
            common.host.clone(),
            export_dir,
        )?;
        config.save()?;
        ui::print_success("Configuration updated.");
        ui::print_newline();
    }

    print_config(&config);
    Ok(())
}

/// Display the current configuration with credentials masked
fn print_config(config: &Config) {
    ui::print_info("Current configuration:");
    ui::print_message(&format!("  Default provider: {}", config.default_provider));
    ui::print_message(&format!("  LM Studio host: {}", config.local_host));
    ui::print_message(&format!("  Export directory: {}", config.export_dir.display()));

    for provider in Provider::ALL {
        let model = config.model_for(*provider);
        ui::print_message(&format!("  {}:", provider.label()));
        ui::print_message(&format!("    Model: {model}"));
        if provider.requires_api_key() {
            let key = config.api_key_for(*provider);
            let display = if key.is_empty() {
                "not set".to_string()
            } else {
                mask_api_key(&key)
            };
            ui::print_message(&format!("    API key: {display}"));
        }
    }
}

/// Keep only the last four characters of a credential visible
fn mask_api_key(key: &str) -> String {
    let count = key.chars().count();
    if count <= 4 {
        "****".to_string()
    } else {
        let visible: String = key.chars().skip(count - 4).collect();
        format!("****{visible}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_api_key() {
        assert_eq!(mask_api_key("abc"), "****");
        assert_eq!(mask_api_key("sk-1234567890"), "****7890");
    }

    #[test]
    fn test_read_plan_prefers_example() {
        let plan = read_plan(Some(PathBuf::from("does-not-exist.md")), true)
            .expect("example flag should win");
        assert!(plan.contains("Real-time User Analytics Dashboard"));
    }

    #[test]
    fn test_read_plan_requires_a_source() {
        assert!(read_plan(None, false).is_err());
    }
}
