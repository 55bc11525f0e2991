//! Terminal output helpers for the CLI.

use console::style;
use indicatif::{ProgressBar, ProgressStyle};

pub struct Output;

impl Output {
    pub fn info(msg: &str) {
        println!("{} {}", style(">>").cyan().bold(), msg);
    }

    pub fn success(msg: &str) {
        println!("{} {}", style(">>").green().bold(), msg);
    }

    /// Warnings go to stderr so summaries and transcripts can be piped.
    pub fn warning(msg: &str) {
        eprintln!("{} {}", style(">>").yellow().bold(), msg);
    }

    pub fn header(msg: &str) {
        println!("\n{}", style(msg).bold().underlined());
    }

    /// One route line, e.g. `POST /upload-pdfs  Upload PDFs`.
    pub fn endpoint(method: &str, path: &str, description: &str) {
        println!(
            "  {:<5} {:<28} {}",
            style(method).cyan(),
            path,
            style(description).dim()
        );
    }

    /// A titled block of generated text.
    pub fn summary(title: &str, body: &str) {
        Self::header(title);
        println!();
        println!("{}", body.trim());
        println!();
    }

    /// Spinner shown while waiting on network calls.
    pub fn spinner(msg: &str) -> ProgressBar {
        let pb = ProgressBar::new_spinner();
        if let Ok(spinner_style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
            pb.set_style(spinner_style);
        }
        pb.set_message(msg.to_string());
        pb.enable_steady_tick(std::time::Duration::from_millis(100));
        pb
    }
}
