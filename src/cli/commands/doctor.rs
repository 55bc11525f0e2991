//! Doctor command - verify configuration and API keys.

use crate::chunking::{ChunkingConfig, TiktokenTokenizer};
use crate::cli::Output;
use crate::config::Settings;
use console::style;

/// Check result for a single item.
#[derive(Debug)]
pub struct CheckResult {
    pub name: String,
    pub status: CheckStatus,
    pub message: String,
    pub hint: Option<String>,
}

#[derive(Debug, PartialEq)]
pub enum CheckStatus {
    Ok,
    Warning,
    Error,
}

impl CheckResult {
    fn ok(name: &str, message: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Ok,
            message: message.to_string(),
            hint: None,
        }
    }

    fn warning(name: &str, message: &str, hint: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Warning,
            message: message.to_string(),
            hint: Some(hint.to_string()),
        }
    }

    fn error(name: &str, message: &str, hint: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Error,
            message: message.to_string(),
            hint: Some(hint.to_string()),
        }
    }

    fn print(&self) {
        let icon = match self.status {
            CheckStatus::Ok => style("✓").green(),
            CheckStatus::Warning => style("!").yellow(),
            CheckStatus::Error => style("✗").red(),
        };

        println!("  {} {} - {}", icon, style(&self.name).bold(), self.message);

        if let Some(hint) = &self.hint {
            println!("    {} {}", style("→").dim(), style(hint).dim());
        }
    }
}

fn print_section(title: &str, checks: &[CheckResult]) {
    println!("{}", style(title).bold());
    for check in checks {
        check.print();
    }
    println!();
}

/// Run all diagnostic checks.
pub fn run_doctor(settings: &Settings) -> anyhow::Result<()> {
    Output::header("Brief Doctor");
    println!();
    println!("Checking configuration...\n");

    let mut checks = Vec::new();

    let api = vec![
        check_openai_api_key(std::env::var("OPENAI_API_KEY").ok()),
        check_youtube_api_key(settings.youtube.resolved_api_key()),
        CheckResult::ok(
            "Model endpoint",
            &format!(
                "{} @ {}",
                settings.llm.model,
                settings.llm.api_base.as_deref().unwrap_or("https://api.openai.com/v1")
            ),
        ),
    ];
    print_section("API Configuration", &api);
    checks.extend(api);

    let summarization = vec![check_chunking(settings), check_encoding(&settings.summarization.encoding)];
    print_section("Summarization", &summarization);
    checks.extend(summarization);

    let storage = vec![check_feedback_log(settings), check_config_file()];
    print_section("Storage", &storage);
    checks.extend(storage);

    let errors = checks.iter().filter(|c| c.status == CheckStatus::Error).count();
    let warnings = checks.iter().filter(|c| c.status == CheckStatus::Warning).count();

    if errors > 0 {
        anyhow::bail!("{} error(s) found. Please fix them before using Brief.", errors);
    } else if warnings > 0 {
        Output::warning(&format!("All checks passed with {} warning(s).", warnings));
    } else {
        Output::success("All checks passed! Brief is ready to use.");
    }

    Ok(())
}

/// Check the OpenAI (or compatible provider) API key.
fn check_openai_api_key(key: Option<String>) -> CheckResult {
    match key {
        Some(key) if key.is_empty() => CheckResult::error(
            "OPENAI_API_KEY",
            "empty",
            "Set with: export OPENAI_API_KEY='sk-...'",
        ),
        Some(key) if key.chars().count() > 12 => {
            CheckResult::ok("OPENAI_API_KEY", &format!("configured ({})", mask_key(&key)))
        }
        Some(_) => CheckResult::warning(
            "OPENAI_API_KEY",
            "set but looks too short",
            "Check the key with your provider",
        ),
        None => CheckResult::error(
            "OPENAI_API_KEY",
            "not set",
            "Set with: export OPENAI_API_KEY='sk-...'",
        ),
    }
}

/// First and last four characters of a secret.
fn mask_key(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    let head: String = chars.iter().take(4).collect();
    let tail: String = chars[chars.len().saturating_sub(4)..].iter().collect();
    format!("{}...{}", head, tail)
}

/// The Data API key only gates comment summaries.
fn check_youtube_api_key(key: Option<String>) -> CheckResult {
    match key {
        Some(_) => CheckResult::ok("YOUTUBE_API_KEY", "configured"),
        None => CheckResult::warning(
            "YOUTUBE_API_KEY",
            "not set (comment summaries disabled)",
            "Set youtube.api_key or export YOUTUBE_API_KEY='...'",
        ),
    }
}

fn check_chunking(settings: &Settings) -> CheckResult {
    let s = &settings.summarization;
    match ChunkingConfig::new(s.chunk_size, s.chunk_overlap) {
        Ok(_) => CheckResult::ok(
            "Chunking",
            &format!("{} tokens, {} overlap", s.chunk_size, s.chunk_overlap),
        ),
        Err(e) => CheckResult::error("Chunking", &e.to_string(), "Fix [summarization] in config"),
    }
}

fn check_encoding(encoding: &str) -> CheckResult {
    match TiktokenTokenizer::from_encoding(encoding) {
        Ok(_) => CheckResult::ok("Tokenizer", encoding),
        Err(e) => CheckResult::error(
            "Tokenizer",
            &e.to_string(),
            "Use cl100k_base, o200k_base, p50k_base or r50k_base",
        ),
    }
}

fn check_feedback_log(settings: &Settings) -> CheckResult {
    let path = settings.feedback_log_path();
    if path.exists() {
        let size = std::fs::metadata(&path)
            .map(|m| format_size(m.len()))
            .unwrap_or_else(|_| "unknown size".to_string());
        return CheckResult::ok("Feedback log", &format!("{} ({})", path.display(), size));
    }

    let parent_exists = path
        .parent()
        .map(|p| p.as_os_str().is_empty() || p.exists())
        .unwrap_or(true);
    if parent_exists {
        CheckResult::warning(
            "Feedback log",
            &format!("{} (not created yet)", path.display()),
            "The log is created on first feedback",
        )
    } else {
        CheckResult::error(
            "Feedback log",
            &format!("{} (directory missing)", path.display()),
            "Create the directory or change feedback.log_path",
        )
    }
}

/// Check if config file exists.
fn check_config_file() -> CheckResult {
    let config_path = Settings::default_config_path();
    if config_path.exists() {
        CheckResult::ok("Config file", &format!("{}", config_path.display()))
    } else {
        CheckResult::warning(
            "Config file",
            "using defaults",
            "Create with: brief config init",
        )
    }
}

/// Format file size in human-readable format.
fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;

    if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}
