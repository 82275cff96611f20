// src/config.rs
// =============================================================================
// Turns parsed command-line arguments into validated run settings.
//
// Everything that can be wrong with the input is caught here, before the
// first request goes out:
// - the target must be an absolute http(s) URL with a host
// - a report needs an API key (unless --no-report is given)
// =============================================================================

use crate::cli::{AuditArgs, LinksArgs};
use crate::site::AuditOptions;
use anyhow::{anyhow, bail, Result};
use std::time::Duration;
use url::Url;

#[derive(Debug, Clone)]
pub struct ReportConfig {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
    pub temperature: f32,
}

#[derive(Debug, Clone)]
pub struct AuditConfig {
    pub target: String,
    pub options: AuditOptions,
    pub timeout: Option<Duration>,
    pub json: bool,
    /// None when the report is skipped
    pub report: Option<ReportConfig>,
}

#[derive(Debug, Clone)]
pub struct LinksConfig {
    pub target: String,
    pub max_depth: usize,
    pub timeout: Option<Duration>,
    pub json: bool,
}

impl AuditConfig {
    pub fn from_args(args: AuditArgs) -> Result<Self> {
        validate_target(&args.target_url)?;

        let report = if args.no_report {
            None
        } else {
            let api_key = args
                .api_key
                .filter(|key| !key.trim().is_empty())
                .ok_or_else(|| {
                    anyhow!("GOOGLE_API_KEY is not set (pass --api-key, or --no-report to skip the report)")
                })?;

            Some(ReportConfig {
                api_key,
                model: args.model,
                base_url: args.api_base,
                temperature: args.temperature,
            })
        };

        Ok(Self {
            target: args.target_url,
            options: AuditOptions {
                max_depth: usize::from(args.max_depth),
                top_keywords: args.top_keywords,
            },
            timeout: args.timeout_secs.map(Duration::from_secs),
            json: args.json,
            report,
        })
    }
}

impl LinksConfig {
    pub fn from_args(args: LinksArgs) -> Result<Self> {
        validate_target(&args.target_url)?;

        Ok(Self {
            target: args.target_url,
            max_depth: usize::from(args.max_depth),
            timeout: args.timeout_secs.map(Duration::from_secs),
            json: args.json,
        })
    }
}

// The target is used as-is afterwards; parsing here only validates it
fn validate_target(target: &str) -> Result<()> {
    let url = Url::parse(target).map_err(|e| anyhow!("Invalid URL '{}': {}", target, e))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        bail!("Target must be an http or https URL: {}", target);
    }
    if url.host_str().is_none() {
        bail!("URL has no host: {}", target);
    }

    Ok(())
}
