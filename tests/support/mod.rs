#![allow(dead_code)]

use anyhow::{Context, Result, bail};
use serde_json::{Value, json};
use std::io::Write;
use std::process::{Command, Output};
use tempfile::NamedTempFile;

/// The CLI under test, isolated from the caller's settings.
pub fn service_catalog() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_service-catalog"));
    cmd.env_remove("SERVICECART_CONFIG")
        .env_remove("SERVICECART_CATALOG")
        .env_remove("RUST_LOG");
    cmd
}

pub fn run_command(mut cmd: Command) -> Result<Output> {
    let output = cmd
        .output()
        .with_context(|| format!("failed to run command: {:?}", cmd))?;
    if output.status.success() {
        Ok(output)
    } else {
        bail!(
            "command {:?} failed: status {:?}\nstdout: {}\nstderr: {}",
            cmd,
            output.status.code(),
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        )
    }
}

pub fn stdout_json(output: &Output) -> Result<Value> {
    serde_json::from_slice(&output.stdout).context("stdout is not JSON")
}

/// The two-base, one-add-on catalog used by the walkthrough scenarios.
pub fn minimal_catalog() -> Value {
    json!({
        "schema_version": "agency_services_v1",
        "title": "minimal",
        "services": [
            {"id": "site-vitrine", "name": "Site Vitrine", "description": "Site", "price": 1200,
             "category": "base", "sub_category": "visibilite"},
            {"id": "landing-page", "name": "Landing Page", "description": "Page", "price": 600,
             "category": "base", "sub_category": "visibilite"},
            {"id": "blog", "name": "Blog", "description": "Articles", "price": 400,
             "category": "addon", "sub_category": "growth", "dependencies": ["site-vitrine"]}
        ]
    })
}

pub fn write_json(value: &Value) -> Result<NamedTempFile> {
    let mut file = NamedTempFile::new()?;
    write!(file, "{value}")?;
    Ok(file)
}

pub fn write_text(text: &str) -> Result<NamedTempFile> {
    let mut file = NamedTempFile::new()?;
    file.write_all(text.as_bytes())?;
    Ok(file)
}
