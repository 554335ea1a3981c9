use std::fs::{OpenOptions, create_dir_all};
use std::path::{Path, PathBuf};
use std::process::Command;

use chrono::{DateTime, Utc};
use innkeep_generate::output::report::write_report;
use innkeep_generate::{GenerationReport, GeneratorConfig};
use serde::Serialize;

use super::{RegistryError, RegistryResult};

/// Metadata captured at run start.
#[derive(Debug, Clone)]
pub struct RunContext {
    pub run_id: String,
    pub started_at: DateTime<Utc>,
    pub run_dir: PathBuf,
    /// Resolved config; its seed is always set.
    pub config: GeneratorConfig,
}

/// JSON config written to each run directory.
#[derive(Debug, Serialize)]
pub struct RunConfig<'a> {
    pub run_id: &'a str,
    pub started_at: String,
    pub cli_version: &'static str,
    pub generator: &'a GeneratorConfig,
    pub git: GitInfo,
}

/// Git metadata for reproducibility.
#[derive(Debug, Serialize)]
pub struct GitInfo {
    pub commit: Option<String>,
    pub dirty: Option<bool>,
}

/// Paths for run artifacts.
#[derive(Debug, Clone)]
pub struct RunPaths {
    pub root: PathBuf,
    pub sql_path: PathBuf,
    pub logs_path: PathBuf,
    pub report_path: PathBuf,
}

pub fn start_run(ctx: &RunContext) -> RegistryResult<RunPaths> {
    let timestamp = ctx.started_at.format("%Y-%m-%dT%H-%M-%SZ").to_string();
    let root = ctx.run_dir.join(format!("{timestamp}__run_{}", ctx.run_id));

    create_dir_all(&root)?;

    let sql_name = ctx
        .config
        .output
        .file_name()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("MockData.sql"));
    let sql_path = root.join(sql_name);
    let config_path = root.join("config.json");
    let logs_path = root.join("logs.ndjson");
    let report_path = root.join("generation_report.json");

    let config = RunConfig {
        run_id: &ctx.run_id,
        started_at: ctx.started_at.to_rfc3339(),
        cli_version: env!("CARGO_PKG_VERSION"),
        generator: &ctx.config,
        git: collect_git_info(),
    };

    write_json(&config_path, &config)?;

    OpenOptions::new()
        .create(true)
        .append(true)
        .open(&logs_path)?;

    Ok(RunPaths {
        root,
        sql_path,
        logs_path,
        report_path,
    })
}

pub fn write_generation_report(paths: &RunPaths, report: &GenerationReport) -> RegistryResult<()> {
    write_report(&paths.report_path, report).map_err(RegistryError::from)
}

pub fn collect_git_info() -> GitInfo {
    let commit = Command::new("git")
        .args(["rev-parse", "HEAD"])
        .output()
        .ok()
        .and_then(|output| {
            if output.status.success() {
                Some(String::from_utf8_lossy(&output.stdout).trim().to_string())
            } else {
                None
            }
        })
        .filter(|value| !value.is_empty());

    let dirty = Command::new("git")
        .args(["status", "--porcelain"])
        .output()
        .ok()
        .filter(|output| output.status.success())
        .map(|output| !output.stdout.is_empty());

    GitInfo { commit, dirty }
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> RegistryResult<()> {
    let file = OpenOptions::new()
        .create(true)
        .truncate(true)
        .write(true)
        .open(path)?;
    serde_json::to_writer_pretty(file, value).map_err(RegistryError::from)
}

#[cfg(test)]
mod tests {
    use innkeep_generate::GenerationEngine;

    use super::*;

    #[test]
    fn start_run_lays_out_artifacts() {
        let run_dir = std::env::temp_dir().join(format!("innkeep_runs_{}", uuid::Uuid::new_v4()));
        let ctx = RunContext {
            run_id: "abc".to_string(),
            started_at: Utc::now(),
            run_dir: run_dir.clone(),
            config: GeneratorConfig {
                seed: Some(4),
                ..GeneratorConfig::default()
            },
        };

        let paths = start_run(&ctx).expect("start run");

        assert!(paths.root.starts_with(&run_dir));
        assert!(paths.root.to_string_lossy().ends_with("__run_abc"));
        assert!(paths.logs_path.exists());
        assert_eq!(paths.sql_path, paths.root.join("MockData.sql"));

        let config: serde_json::Value = serde_json::from_str(
            &std::fs::read_to_string(paths.root.join("config.json")).expect("read config.json"),
        )
        .expect("parse config.json");
        assert_eq!(config["run_id"], "abc");
        assert_eq!(config["generator"]["seed"], 4);
        assert_eq!(config["generator"]["chains"], 5);

        let _ = std::fs::remove_dir_all(run_dir);
    }

    #[test]
    fn run_artifacts_share_one_run_id() {
        let run_dir = std::env::temp_dir().join(format!("innkeep_runs_{}", uuid::Uuid::new_v4()));
        let ctx = RunContext {
            run_id: uuid::Uuid::new_v4().to_string(),
            started_at: Utc::now(),
            run_dir: run_dir.clone(),
            config: GeneratorConfig {
                chains: 1,
                hotels_per_chain: 2,
                seed: Some(3),
                ..GeneratorConfig::default()
            },
        };
        let paths = start_run(&ctx).expect("start run");

        let result = GenerationEngine::new(ctx.config.clone())
            .with_run_id(ctx.run_id.clone())
            .run_to(&paths.sql_path)
            .expect("generate");
        write_generation_report(&paths, &result.report).expect("write report");

        let read_json = |path: &Path| -> serde_json::Value {
            serde_json::from_str(&std::fs::read_to_string(path).expect("read artifact"))
                .expect("parse artifact")
        };
        let config = read_json(&paths.root.join("config.json"));
        let report = read_json(&paths.report_path);
        assert_eq!(config["run_id"], ctx.run_id.as_str());
        assert_eq!(report["run_id"], ctx.run_id.as_str());
        assert_eq!(report["seed"], 3);
        assert!(paths.sql_path.exists());

        let _ = std::fs::remove_dir_all(run_dir);
    }
}
