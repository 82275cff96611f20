// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap and set up logging
// 2. Dispatch to the appropriate subcommand handler
// 3. Print the audit (table or JSON) and the Gemini report
// 4. Exit with proper code (0 = clean, 1 = issues found, 2 = error)
//
// Requests are made one at a time, so a single-threaded tokio runtime
// is all we need.
// =============================================================================

// Module declarations - tells Rust about our other source files
mod checker; // src/checker/ - SEO checks for one page
mod cli; // src/cli.rs - command-line parsing
mod config; // src/config.rs - validated settings
mod crawl; // src/crawl/ - internal link discovery
mod fetch; // src/fetch/ - HTTP access
mod logging; // src/logging.rs - tracing setup
mod report; // src/report/ - prompt + Gemini report
mod site; // src/site.rs - whole-site audit

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands};
use config::{AuditConfig, LinksConfig};
use fetch::HttpSource;
use report::{compose_task_prompt, GeminiClient, ReportRequester, BANNER, SEO_EXPERT};
use serde::Serialize;
use site::{audit_site, SiteAudit};
use tracing::info;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            // {:#} prints the whole context chain on one line
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

// Returns:
//   Ok(0) = every page reachable and clean
//   Ok(1) = SEO issues or unreachable pages found
//   Err   = bad input, unreachable target, or report failure
async fn run() -> Result<i32> {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose)?;

    match cli.command {
        Commands::Audit(args) => handle_audit(AuditConfig::from_args(args)?).await,
        Commands::Links(args) => handle_links(LinksConfig::from_args(args)?).await,
    }
}

// Handles the 'audit' subcommand
async fn handle_audit(config: AuditConfig) -> Result<i32> {
    let source = HttpSource::new(config.timeout).context("could not build HTTP client")?;

    let requester = config.report.as_ref().map(|report| {
        GeminiClient::new(report.api_key.clone(), report.model.clone(), SEO_EXPERT)
            .with_base_url(report.base_url.clone())
            .with_http_client(source.client())
            .with_temperature(report.temperature)
    });

    info!(target_url = %config.target, max_depth = config.options.max_depth, "scanning website");

    let audit = audit_site(&source, &config.target, config.options)
        .await
        .with_context(|| format!("could not read target {}", config.target))?;

    info!(
        pages = audit.links.len(),
        issues = audit.issue_count(),
        unreachable = audit.unreachable.len(),
        "audit finished"
    );

    if !config.json {
        print_table(&audit);
    }

    let report = match &requester {
        Some(requester) => {
            info!("requesting SEO report");
            let prompt = compose_task_prompt(&audit, &SEO_EXPERT);
            let text = requester
                .request_report(&prompt)
                .await
                .context("report request failed")?;
            Some(text)
        }
        None => None,
    };

    if config.json {
        print_json(&audit, report.as_deref())?;
    } else if let Some(text) = &report {
        println!("{}", BANNER);
        println!("{}", text);
    }

    Ok(if audit.is_clean() { 0 } else { 1 })
}

// Handles the 'links' subcommand
async fn handle_links(config: LinksConfig) -> Result<i32> {
    let source = HttpSource::new(config.timeout).context("could not build HTTP client")?;

    let links = crawl::crawl_site(&source, &config.target, config.max_depth)
        .await
        .with_context(|| format!("could not read target {}", config.target))?;

    if config.json {
        println!("{}", serde_json::to_string_pretty(&links)?);
    } else {
        for link in &links {
            println!("{}", link);
        }
        println!("\n📋 Total: {}", links.len());
    }

    Ok(0)
}

// JSON output: the audit with the report (if any) alongside it
#[derive(Serialize)]
struct JsonOutput<'a> {
    #[serde(flatten)]
    audit: &'a SiteAudit,
    #[serde(skip_serializing_if = "Option::is_none")]
    report: Option<&'a str>,
}

fn print_json(audit: &SiteAudit, report: Option<&str>) -> Result<()> {
    let output = JsonOutput { audit, report };
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

// Prints the audit as a human-readable table in the terminal
fn print_table(audit: &SiteAudit) {
    println!("🔍 {}", audit.target);
    println!("{:<60} {:<10}", "URL", "ISSUES");
    println!("{}", "=".repeat(72));

    for link in &audit.links {
        let status = match (audit.issues.get(link), audit.unreachable.get(link)) {
            (_, Some(_)) => "⚠️  ERROR".to_string(),
            (Some(issues), None) => format!("❌ {}", issues.len()),
            (None, None) => "✅ 0".to_string(),
        };
        println!("{:<60} {:<10}", truncate(link, 57), status);
    }

    for (url, issues) in &audit.issues {
        println!("\n{}", url);
        for issue in issues {
            println!("   - {}", issue);
        }
    }

    for (url, reason) in &audit.unreachable {
        println!("\n{}\n   ⚠️  {}", url, reason);
    }

    println!();
    println!("📊 Summary:");
    println!("   📄 Pages: {}", audit.links.len());
    println!("   ❌ Issues: {}", audit.issue_count());
    println!("   ⚠️  Unreachable: {}", audit.unreachable.len());

    if !audit.keywords.is_empty() {
        let words: Vec<String> = audit
            .keywords
            .iter()
            .map(|k| format!("{} ({})", k.word, k.count))
            .collect();
        println!("   🔑 Top keywords: {}", words.join(", "));
    }
}

// Shortens long URLs for the table, on a character boundary
fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() > max {
        format!("{}...", text.chars().take(max).collect::<String>())
    } else {
        text.to_string()
    }
}
