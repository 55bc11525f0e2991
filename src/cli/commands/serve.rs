//! Serve command - run the HTTP API.

use crate::cli::Output;
use crate::config::Settings;

/// Run the HTTP API server.
pub async fn run_serve(host: Option<String>, port: Option<u16>, settings: Settings) -> anyhow::Result<()> {
    let host = host.unwrap_or_else(|| settings.server.host.clone());
    let port = port.unwrap_or(settings.server.port);

    Output::header("Brief API Server");
    println!();
    Output::success(&format!("Listening on http://{}:{}", host, port));
    println!();
    println!("Endpoints:");
    Output::endpoint("GET", "/health", "Health check");
    Output::endpoint("POST", "/upload-pdfs", "Upload up to 5 PDFs");
    Output::endpoint("POST", "/ask-question", "Ask about the uploaded PDFs");
    Output::endpoint("POST", "/ask-question-with-audio", "Ask and receive spoken audio");
    Output::endpoint("POST", "/text-to-speech", "Synthesize speech");
    Output::endpoint("POST", "/store-feedback", "Store feedback (JSON)");
    Output::endpoint("POST", "/store-feedback-form", "Store feedback (form)");
    Output::endpoint("POST", "/summarize_comments", "Summarize a video's comments");
    Output::endpoint("POST", "/summarize_videos", "Summarize a video's transcript");
    Output::endpoint("GET", "/pdf-context-length", "Current context length");
    Output::endpoint("POST", "/clear-context", "Clear the PDF context");
    println!();
    Output::info("Press Ctrl+C to stop the server.");

    crate::server::serve(&host, port, settings).await
}
