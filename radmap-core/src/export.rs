//! Export-job model: requests are rendered to the external export tool's
//! command line and handed to a detached background task. The tool emails
//! the submitter itself when it finishes; nothing flows back to the
//! request that started it beyond the acceptance receipt.

use async_trait::async_trait;
use metrics::counter;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::process::Stdio;
use tracing::{error, info};
use uuid::Uuid;

use crate::common::error::{Result, ViewerError};

/// Filter keys the export tool understands; anything else is rejected.
pub const FILTER_KEYS: [&str; 8] = ["alle", "snps", "pare", "prog", "vprog", "cata", "mark", "gcnt"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataType {
    Haplo,
    Geno,
}

impl DataType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DataType::Haplo => "haplo",
            DataType::Geno => "geno",
        }
    }

    /// Parse a query parameter, defaulting to haplotype export.
    pub fn from_param(value: &str) -> Self {
        if value.eq_ignore_ascii_case("geno") {
            DataType::Geno
        } else {
            DataType::Haplo
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Tsv,
    Xls,
}

impl OutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Tsv => "tsv",
            OutputFormat::Xls => "xls",
        }
    }

    pub fn from_param(value: &str) -> Self {
        if value.eq_ignore_ascii_case("xls") {
            OutputFormat::Xls
        } else {
            OutputFormat::Tsv
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportOptions {
    pub data_type: DataType,
    /// Map type forwarded to genotype exports (`-m`).
    pub map_type: String,
    /// Minimum read depth forwarded to haplotype exports (`-L`).
    pub depth_limit: u32,
    /// Apply manual corrections (`-c`) on genotype exports.
    pub manual_corrections: bool,
    pub format: OutputFormat,
    /// Submitter contact; the tool mails the result here.
    pub email: String,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            data_type: DataType::Haplo,
            map_type: "gen".to_string(),
            depth_limit: 1,
            manual_corrections: false,
            format: OutputFormat::Tsv,
            email: String::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportRequest {
    pub database: String,
    pub batch_id: i64,
    pub options: ExportOptions,
    /// Whitelisted (key, value) pairs forwarded as `-F key=value,...`.
    pub filters: Vec<(String, String)>,
}

impl ExportRequest {
    pub fn validate(&self) -> Result<()> {
        for (key, _) in &self.filters {
            if !FILTER_KEYS.contains(&key.as_str()) {
                return Err(ViewerError::Export {
                    message: format!("unknown filter key: {key}"),
                });
            }
        }
        Ok(())
    }

    /// Argument vector for the external export tool.
    pub fn command_args(&self) -> Vec<String> {
        let mut args = vec![
            "-D".to_string(),
            self.database.clone(),
            "-b".to_string(),
            self.batch_id.to_string(),
        ];

        match self.options.data_type {
            DataType::Haplo => {
                args.extend([
                    "-a".to_string(),
                    "haplo".to_string(),
                    "-L".to_string(),
                    self.options.depth_limit.to_string(),
                ]);
            }
            DataType::Geno => {
                args.extend([
                    "-a".to_string(),
                    "geno".to_string(),
                    "-m".to_string(),
                    self.options.map_type.clone(),
                ]);
                if self.options.manual_corrections {
                    args.push("-c".to_string());
                }
            }
        }

        args.extend([
            "-e".to_string(),
            self.options.email.clone(),
            "-t".to_string(),
            self.options.format.as_str().to_string(),
        ]);

        let filters = self
            .filters
            .iter()
            .map(|(key, value)| format!("{key}={value}"))
            .collect::<Vec<_>>()
            .join(",");
        args.extend(["-F".to_string(), filters]);

        args
    }
}

/// Receipt returned to the submitter once a job is accepted.
#[derive(Debug, Clone, Serialize)]
pub struct ExportJob {
    pub id: Uuid,
    pub command: String,
}

#[async_trait]
pub trait ExportRunner: Send + Sync {
    /// Hand the request to a detached job; returns as soon as the job is
    /// accepted, never waiting for completion.
    async fn submit(&self, request: &ExportRequest) -> Result<ExportJob>;
}

/// Runs the external export tool as a detached child process.
pub struct CommandExportRunner {
    program: PathBuf,
}

impl CommandExportRunner {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Program path from `RADMAP_EXPORT_CMD`, falling back to
    /// `export_sql.pl` on PATH.
    pub fn from_env() -> Self {
        let program =
            std::env::var("RADMAP_EXPORT_CMD").unwrap_or_else(|_| "export_sql.pl".to_string());
        Self::new(program)
    }
}

#[async_trait]
impl ExportRunner for CommandExportRunner {
    async fn submit(&self, request: &ExportRequest) -> Result<ExportJob> {
        request.validate()?;

        let args = request.command_args();
        let id = Uuid::new_v4();
        let command = format!("{} {}", self.program.display(), args.join(" "));

        let child = tokio::process::Command::new(&self.program)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| ViewerError::Export {
                message: format!("failed to launch {}: {e}", self.program.display()),
            })?;

        counter!("radmap_export_jobs_total").increment(1);
        info!("accepted export job {id} for batch {}", request.batch_id);

        // The request cycle never waits on the child; the spawned task only
        // records how the job ended.
        tokio::spawn(async move {
            match child.wait_with_output().await {
                Ok(output) if output.status.success() => info!("export job {id} finished"),
                Ok(output) => error!("export job {id} exited with {}", output.status),
                Err(e) => error!("export job {id} failed: {e}"),
            }
        });

        Ok(ExportJob { id, command })
    }
}
