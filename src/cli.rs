// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// Subcommands:
// - audit: crawl the site, run the SEO checks, ask Gemini for a report
// - links: only list the internal links of the target
//
// Every setting that used to be an edit in the source can come from an
// environment variable instead (the `env = ...` attributes below).
// =============================================================================

use crate::report::{DEFAULT_BASE_URL, DEFAULT_MODEL, DEFAULT_TEMPERATURE};
use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "seo-crawler",
    version,
    about = "Crawl a website's internal links and audit their on-page SEO",
    long_about = "seo-crawler reads a website's internal links, checks every page for common \
                  on-page SEO problems (titles, descriptions, headers, alt text, broken links) \
                  and asks a Gemini model to turn the findings into a written report."
)]
pub struct Cli {
    /// More log output on stderr (-v = debug, -vv = trace)
    ///
    /// RUST_LOG, when set, takes precedence
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Audit every internal page of a website and write an SEO report
    ///
    /// Example: seo-crawler audit https://example.com
    Audit(AuditArgs),

    /// List the internal links of a website without auditing them
    ///
    /// Example: seo-crawler links https://example.com --max-depth 2
    Links(LinksArgs),
}

#[derive(Args, Debug)]
pub struct AuditArgs {
    /// Website URL to audit (e.g., https://example.com)
    #[arg(env = "SEO_TARGET_URL")]
    pub target_url: String,

    /// Output results as JSON instead of a table
    #[arg(long)]
    pub json: bool,

    /// How many link hops to follow from the target (1 = its direct links)
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u16).range(1..))]
    pub max_depth: u16,

    /// How many site-wide keywords to report
    #[arg(long, default_value_t = 20)]
    pub top_keywords: usize,

    /// Skip the Gemini report and only print the audit
    #[arg(long)]
    pub no_report: bool,

    /// Google API key for the Gemini report
    #[arg(long, env = "GOOGLE_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Gemini model used for the report
    #[arg(long, env = "GEMINI_MODEL", default_value = DEFAULT_MODEL)]
    pub model: String,

    /// Sampling temperature for the report (lower = more focused)
    #[arg(long, default_value_t = DEFAULT_TEMPERATURE)]
    pub temperature: f32,

    /// Base URL of the Gemini REST API
    #[arg(long, env = "GEMINI_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub api_base: String,

    /// Per-request timeout in seconds (default: no timeout)
    #[arg(long)]
    pub timeout_secs: Option<u64>,
}

#[derive(Args, Debug)]
pub struct LinksArgs {
    /// Website URL to read (e.g., https://example.com)
    #[arg(env = "SEO_TARGET_URL")]
    pub target_url: String,

    /// Output the links as a JSON array
    #[arg(long)]
    pub json: bool,

    /// How many link hops to follow from the target (1 = its direct links)
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u16).range(1..))]
    pub max_depth: u16,

    /// Per-request timeout in seconds (default: no timeout)
    #[arg(long)]
    pub timeout_secs: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_is_well_formed() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_audit_defaults() {
        let cli = Cli::try_parse_from([
            "seo-crawler",
            "audit",
            "https://example.com",
            "--no-report",
        ])
        .unwrap();

        match cli.command {
            Commands::Audit(args) => {
                assert_eq!(args.target_url, "https://example.com");
                assert_eq!(args.max_depth, 1);
                assert_eq!(args.top_keywords, 20);
                assert!(args.no_report);
                assert!(!args.json);
            }
            other => panic!("expected audit, got {:?}", other),
        }
    }

    #[test]
    fn test_zero_depth_is_rejected() {
        let result = Cli::try_parse_from(["seo-crawler", "links", "https://example.com", "--max-depth", "0"]);
        assert!(result.is_err());
    }
}
