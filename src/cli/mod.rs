//! CLI module for Brief.

pub mod commands;
mod output;

pub use output::Output;

use clap::{Parser, Subcommand};

/// Brief - Ask questions about PDFs and summarize YouTube videos
///
/// Runs an HTTP API for PDF question answering, video and comment
/// summarization, and text-to-speech, with CLI shortcuts for the same.
#[derive(Parser, Debug)]
#[command(name = "brief")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v for info, -vv for debug, -vvv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the HTTP API server
    Serve {
        /// Host to bind to (defaults to server.host)
        #[arg(long)]
        host: Option<String>,

        /// Port to bind to (defaults to server.port)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Summarize a YouTube video's transcript or comments
    Summarize {
        /// YouTube URL or video ID
        url: String,

        /// Summarize the comment section instead of the transcript
        #[arg(long)]
        comments: bool,

        /// Output language for the summary
        #[arg(short, long)]
        language: Option<String>,

        /// Token cap for the final summary
        #[arg(short, long)]
        max_length: Option<u32>,
    },

    /// Print a YouTube video's transcript
    Transcript {
        /// YouTube URL or video ID
        url: String,
    },

    /// Synthesize speech from text
    Speak {
        /// Text to speak
        text: String,

        /// Output audio file
        #[arg(short, long, default_value = "speech.mp3")]
        output: String,
    },

    /// Check configuration and API keys
    Doctor,

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Write the current configuration to the config file
    Init,

    /// Show configuration file path
    Path,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_summarize() {
        let cli = Cli::parse_from([
            "brief",
            "-v",
            "summarize",
            "https://youtu.be/dQw4w9WgXcQ",
            "--comments",
            "--max-length",
            "300",
        ]);
        assert_eq!(cli.verbose, 1);
        match cli.command {
            Commands::Summarize {
                url,
                comments,
                language,
                max_length,
            } => {
                assert_eq!(url, "https://youtu.be/dQw4w9WgXcQ");
                assert!(comments);
                assert_eq!(language, None);
                assert_eq!(max_length, Some(300));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
