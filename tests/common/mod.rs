#![allow(dead_code)]

use std::process::{Child, Command, Stdio};
use std::sync::OnceLock;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use reqwest::StatusCode;
use serde_json::{json, Value};

static SERVER: OnceLock<TestServer> = OnceLock::new();

pub struct TestServer {
    pub port: u16,
    pub base_url: String,
    child: Child,
}

impl TestServer {
    fn spawn() -> Result<Self> {
        // Pick an unused port for isolation
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let base_url = format!("http://127.0.0.1:{}", port);

        let mut cmd = Command::new(env!("CARGO_BIN_EXE_workout-api"));
        cmd.env("WORKOUT_API_PORT", port.to_string())
            .env("WORKOUT_API_HOST", "127.0.0.1")
            .env("DATABASE_BOOTSTRAP_SCHEMA", "true")
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());
        if std::env::var("JWT_SECRET").is_err() {
            cmd.env("JWT_SECRET", "integration-test-secret");
        }

        // Inherit environment so the server sees DB_* / DATABASE_URL
        let child = cmd.spawn().context("failed to spawn server binary")?;

        Ok(Self { port, base_url, child })
    }

    async fn wait_ready(&self, timeout: Duration) -> Result<()> {
        let client = reqwest::Client::new();
        let deadline = Instant::now() + timeout;
        while Instant::now() <= deadline {
            let url = format!("{}/health", self.base_url);
            if let Ok(resp) = client.get(&url).send().await {
                if resp.status() == StatusCode::OK {
                    return Ok(());
                }
            }
            tokio::time::sleep(Duration::from_millis(150)).await;
        }
        anyhow::bail!("server did not become ready on {} within {:?}", self.base_url, timeout)
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

pub async fn ensure_server() -> Result<&'static TestServer> {
    let _ = dotenvy::dotenv();
    if std::env::var("DATABASE_URL").is_err() && std::env::var("DB_HOST").is_err() {
        anyhow::bail!("PostgreSQL integration tests need DB_HOST or DATABASE_URL");
    }
    let server = SERVER.get_or_init(|| TestServer::spawn().expect("failed to spawn server binary"));
    server.wait_ready(Duration::from_secs(20)).await?;
    Ok(server)
}

/// Email that no earlier run has registered
pub fn unique_email(prefix: &str) -> String {
    format!("{}-{}@example.com", prefix, uuid::Uuid::new_v4().simple())
}

/// Register a fresh user and return their bearer token
pub async fn register(server: &TestServer, name: &str) -> Result<String> {
    let res = reqwest::Client::new()
        .post(server.url("/auth/register"))
        .json(&json!({
            "name": name,
            "email": unique_email(name),
            "password": "password123",
        }))
        .send()
        .await?;
    anyhow::ensure!(res.status() == StatusCode::CREATED, "register returned {}", res.status());

    let body = res.json::<Value>().await?;
    body["token"]
        .as_str()
        .map(str::to_string)
        .context("register response has no token")
}
