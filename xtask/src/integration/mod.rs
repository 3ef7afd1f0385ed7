//! End-to-end checks against a running `fakesso` binary.
//!
//! # Usage
//!
//! ```bash
//! # Build the server, run every scenario, clean up
//! cargo xtask integration
//!
//! # Use a fixed port and keep the SQLite file for inspection
//! cargo xtask integration --port 8089 --keep-db
//! ```

pub mod error;

pub use error::{IntegrationError, Result};

use std::{
    path::{Path, PathBuf},
    process::Stdio,
    time::Duration,
};

use tokio::process::{Child, Command};
use uuid::Uuid;

use crate::prelude::*;

/// Secret the server under test is started with.
const CLIENT_SECRET: &str = "integration-secret";
const FLOW_USER: &str = "integration-user";

/// Integration test command.
#[derive(Debug, clap::Parser)]
#[command(long_about = "Run the authorization flow against a real server.

This command builds the fakesso binary, starts it on a free local port with a
temporary SQLite file and a client secret, then walks the authorize, token and
userinfo steps over HTTP. The server is stopped and the database removed
afterward.")]
pub struct IntegrationCommand {
    /// Port to start the server on (default: any free port).
    #[arg(long)]
    pub port: Option<u16>,

    /// Keep the temporary SQLite database after the run.
    #[arg(long)]
    pub keep_db: bool,

    /// Timeout in seconds for the server to start answering.
    #[arg(long, default_value = "30")]
    pub health_timeout: u64,
}

/// Main entry point for integration command.
pub async fn run(command: IntegrationCommand, global: crate::Global) -> Result<()> {
    if !global.is_silent() {
        aprintln!("{}", p_b("Integration Tests"));
        aprintln!();
    }

    build_server(&global).await?;
    let binary = server_binary()?;

    let port = match command.port {
        Some(port) => port,
        None => free_port()?,
    };
    let dir_name = format!("fakesso-integration-{}", Uuid::new_v4());
    let data_dir = std::env::temp_dir().join(dir_name);
    let db_file = data_dir.join("users.sqlite");
    let base_url = format!("http://127.0.0.1:{port}");

    if !global.is_silent() {
        aprintln!(
            "{} {} (DB_FILE={})",
            p_b("🚀"),
            p_b(&format!("Starting server on {base_url}")),
            db_file.display()
        );
    }

    let mut server = spawn_server(&binary, port, &db_file, &global)?;

    let outcome = async {
        wait_for_ready(&base_url, &mut server, command.health_timeout).await?;
        run_scenarios(&base_url, &global).await
    }
    .await;

    if let Err(e) = server.kill().await {
        aprintln!("{} Failed to stop server: {}", p_y("⚠️"), e);
    }

    if command.keep_db {
        aprintln!("{} Database kept at {}", p_b("📦"), db_file.display());
    } else if let Err(e) = tokio::fs::remove_dir_all(&data_dir).await {
        if global.is_verbose() {
            aprintln!("{} Could not remove {}: {}", p_y("⚠️"), data_dir.display(), e);
        }
    }

    aprintln!();
    match &outcome {
        Ok(()) => aprintln!("{} {}", p_g("✅"), p_g("All integration scenarios passed!")),
        Err(e) => aprintln!("{} {}", p_r("❌"), p_r(&e.to_string())),
    }

    outcome
}

async fn build_server(global: &crate::Global) -> Result<()> {
    if !global.is_silent() {
        aprintln!("{} {}", p_b("🔧"), p_b("Building fakesso..."));
    }

    let mut cmd = Command::new("cargo");
    cmd.args(["build", "-p", "fakesso"]);
    if !global.is_verbose() {
        cmd.arg("--quiet");
    }

    let status = cmd.status().await?;
    if status.success() {
        Ok(())
    } else {
        let reason = format!("cargo build exited with {status}");
        Err(IntegrationError::BuildFailed(reason))
    }
}

fn server_binary() -> Result<PathBuf> {
    let target_dir = match std::env::var_os("CARGO_TARGET_DIR") {
        Some(dir) => PathBuf::from(dir),
        None => Path::new(env!("CARGO_MANIFEST_DIR"))
            .parent()
            .unwrap_or_else(|| Path::new("."))
            .join("target"),
    };

    let binary = target_dir
        .join("debug")
        .join(format!("fakesso{}", std::env::consts::EXE_SUFFIX));

    if binary.is_file() {
        Ok(binary)
    } else {
        let path = binary.display().to_string();
        Err(IntegrationError::BinaryNotFound(path))
    }
}

fn free_port() -> Result<u16> {
    let listener = std::net::TcpListener::bind("127.0.0.1:0")?;
    Ok(listener.local_addr()?.port())
}

fn spawn_server(binary: &Path, port: u16, db_file: &Path, global: &crate::Global) -> Result<Child> {
    let output = || {
        if global.is_verbose() {
            Stdio::inherit()
        } else {
            Stdio::null()
        }
    };

    let log_filter = if global.is_verbose() {
        "fakesso=debug"
    } else {
        "fakesso=warn"
    };

    let child = Command::new(binary)
        .env("HOST", "127.0.0.1")
        .env("PORT", port.to_string())
        .env("DB_FILE", db_file)
        .env("CLIENT_SECRET", CLIENT_SECRET)
        .env("RUST_LOG", log_filter)
        .stdout(output())
        .stderr(output())
        .kill_on_drop(true)
        .spawn()?;

    Ok(child)
}

async fn wait_for_ready(base_url: &str, server: &mut Child, timeout_secs: u64) -> Result<()> {
    let client = reqwest::Client::new();
    let deadline = tokio::time::Instant::now() + Duration::from_secs(timeout_secs);

    while tokio::time::Instant::now() < deadline {
        if let Some(status) = server.try_wait()? {
            return Err(IntegrationError::ServerExited(status.to_string()));
        }

        if client.get(base_url).send().await.is_ok() {
            return Ok(());
        }

        tokio::time::sleep(Duration::from_millis(200)).await;
    }

    Err(IntegrationError::ServerNotReady {
        url: base_url.to_string(),
        timeout_secs,
    })
}

struct Scenario {
    client: reqwest::Client,
    base_url: String,
}

impl Scenario {
    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn post_form(&self, path: &str, body: &str) -> reqwest::Result<reqwest::Response> {
        self.client
            .post(self.url(path))
            .header(
                reqwest::header::CONTENT_TYPE,
                "application/x-www-form-urlencoded",
            )
            .body(body.to_string())
            .send()
            .await
    }
}

fn ensure(condition: bool, scenario: &'static str, reason: impl Into<String>) -> Result<()> {
    if condition {
        Ok(())
    } else {
        Err(IntegrationError::ScenarioFailed {
            scenario,
            reason: reason.into(),
        })
    }
}

async fn run_scenarios(base_url: &str, global: &crate::Global) -> Result<()> {
    let ctx = Scenario {
        client: reqwest::Client::new(),
        base_url: base_url.to_string(),
    };

    let results = vec![
        ("unknown path returns 404", unknown_path(&ctx).await),
        (
            "authorize requires redirect_uri",
            authorize_requires_redirect(&ctx).await,
        ),
        (
            "token checks client secret first",
            token_requires_secret(&ctx).await,
        ),
        ("authorize -> token -> me", full_flow(&ctx).await),
    ];

    let mut all_passed = true;
    for (name, result) in results {
        match result {
            Ok(()) => {
                if !global.is_silent() {
                    aprintln!("{} {}", p_g("✅"), name);
                }
            }
            Err(e) => {
                all_passed = false;
                aprintln!("{} {}: {}", p_r("❌"), name, e);
            }
        }
    }

    if all_passed {
        Ok(())
    } else {
        Err(IntegrationError::TestsFailed)
    }
}

async fn unknown_path(ctx: &Scenario) -> Result<()> {
    let response = ctx.client.get(ctx.url("/unknown/path")).send().await?;
    ensure(
        response.status() == reqwest::StatusCode::NOT_FOUND,
        "unknown path",
        format!("expected 404, got {}", response.status()),
    )
}

async fn authorize_requires_redirect(ctx: &Scenario) -> Result<()> {
    let response = ctx
        .client
        .get(ctx.url("/authorize?state=xyz"))
        .send()
        .await?;
    ensure(
        response.status() == reqwest::StatusCode::BAD_REQUEST,
        "authorize",
        format!("expected 400, got {}", response.status()),
    )
}

async fn token_requires_secret(ctx: &Scenario) -> Result<()> {
    const SCENARIO: &str = "token secret";

    let response = ctx.post_form("/token", "code=intruder").await?;
    ensure(
        response.status() == reqwest::StatusCode::UNAUTHORIZED,
        SCENARIO,
        format!("expected 401 without secret, got {}", response.status()),
    )?;

    let response = ctx
        .post_form("/token", &format!("client_secret={CLIENT_SECRET}"))
        .await?;
    ensure(
        response.status() == reqwest::StatusCode::BAD_REQUEST,
        SCENARIO,
        format!("expected 400 without code, got {}", response.status()),
    )?;

    let page = ctx
        .client
        .get(ctx.url("/authorize?redirect_uri=/cb"))
        .send()
        .await?
        .text()
        .await?;
    ensure(
        !page.contains("<option>intruder</option>"),
        SCENARIO,
        "rejected request provisioned an identity",
    )
}

async fn full_flow(ctx: &Scenario) -> Result<()> {
    const SCENARIO: &str = "full flow";

    let response = ctx
        .client
        .get(ctx.url(
            "/authorize?redirect_uri=http%3A%2F%2Fclient.test%2Fcallback&state=flow-state",
        ))
        .send()
        .await?;
    ensure(
        response.status() == reqwest::StatusCode::OK,
        SCENARIO,
        format!("authorize returned {}", response.status()),
    )?;
    let page = response.text().await?;
    ensure(
        page.contains(r#"action="http://client.test/callback""#)
            && page.contains(r#"value="flow-state""#),
        SCENARIO,
        "authorize form does not carry redirect_uri and state",
    )?;

    let response = ctx
        .post_form(
            "/token",
            &format!("code={FLOW_USER}&client_secret={CLIENT_SECRET}"),
        )
        .await?;
    ensure(
        response.status() == reqwest::StatusCode::OK,
        SCENARIO,
        format!("token returned {}", response.status()),
    )?;
    let json: serde_json::Value = response.json().await?;
    let token = json["access_token"]
        .as_str()
        .unwrap_or_default()
        .to_string();
    ensure(
        !token.is_empty(),
        SCENARIO,
        "token response has no access_token",
    )?;

    let response = ctx
        .client
        .get(ctx.url("/me"))
        .bearer_auth(&token)
        .send()
        .await?;
    ensure(
        response.status() == reqwest::StatusCode::OK,
        SCENARIO,
        format!("me returned {}", response.status()),
    )?;
    let profile: serde_json::Value = response.json().await?;
    ensure(
        profile["sub"] == FLOW_USER && profile["id"] == FLOW_USER,
        SCENARIO,
        format!("unexpected profile: {profile}"),
    )?;
    ensure(
        profile["email"]
            .as_str()
            .is_some_and(|e| e.ends_with(".localhost")),
        SCENARIO,
        format!("unexpected generated email: {}", profile["email"]),
    )?;

    let page = ctx
        .client
        .get(ctx.url("/authorize?redirect_uri=/cb"))
        .send()
        .await?
        .text()
        .await?;
    ensure(
        page.contains(&format!("<option>{FLOW_USER}</option>")),
        SCENARIO,
        "provisioned identity is not offered on the authorize form",
    )
}
