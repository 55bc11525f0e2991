//! Test server wrapper that serves the Brief router on a random port

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use brief::config::Settings;
use brief::server::{router, AppState, Providers};
use reqwest::multipart::{Form, Part};
use tempfile::TempDir;
use tokio::task::JoinHandle;

/// A running test server instance
pub struct TestServer {
    addr: SocketAddr,
    handle: JoinHandle<()>,
    client: reqwest::Client,
    dir: TempDir,
}

impl TestServer {
    /// Start a test server backed by the given providers
    ///
    /// The feedback log lives in a fresh temporary directory.
    pub async fn start(providers: Providers) -> anyhow::Result<Self> {
        let dir = TempDir::new()?;
        let mut settings = Settings::default();
        settings.feedback.log_path = dir.path().join("feedback_log.txt").display().to_string();

        let state = Arc::new(AppState::new(providers, &settings)?);
        let app = router(state, settings.server.max_upload_bytes);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        Ok(Self {
            addr,
            handle,
            client: reqwest::Client::new(),
            dir,
        })
    }

    pub fn url(&self, path: &str) -> String {
        format!("http://{}{path}", self.addr)
    }

    pub fn client(&self) -> &reqwest::Client {
        &self.client
    }

    pub fn feedback_path(&self) -> PathBuf {
        self.dir.path().join("feedback_log.txt")
    }

    /// POST a multipart batch of `(file name, contents)` to /upload-pdfs
    pub async fn upload(&self, files: &[(&str, &str)]) -> reqwest::Response {
        let mut form = Form::new();
        for (name, contents) in files {
            form = form.part(
                "files",
                Part::bytes(contents.as_bytes().to_vec()).file_name(name.to_string()),
            );
        }
        self.client
            .post(self.url("/upload-pdfs"))
            .multipart(form)
            .send()
            .await
            .unwrap()
    }

    pub async fn context_length(&self) -> u64 {
        let body: serde_json::Value = self
            .client
            .get(self.url("/pdf-context-length"))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        body["context_length"].as_u64().unwrap()
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
