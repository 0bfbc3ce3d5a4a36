use anyhow::Context;
use clap::Parser;
use env_logger::Env;
use log::{error, info};

use clashgen::utils::HttpFetcher;
use clashgen::{generate, Settings};

/// Merge a Clash base config with subconverter-style rulesets and proxy groups
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to a settings file (TOML or YAML)
    #[arg(short, long, value_name = "FILE")]
    config: Option<String>,

    /// Base Clash config holding the proxies (file or URL)
    #[arg(short, long, value_name = "FILE")]
    base: Option<String>,

    /// Directive file with ruleset= and custom_proxy_group= lines (file or URL)
    #[arg(short, long, value_name = "FILE")]
    directives: Option<String>,

    /// Where to write the generated config
    #[arg(short, long, value_name = "OUTPUT_FILE")]
    output: Option<String>,

    /// JSON Schema the generated config must satisfy
    #[arg(short, long, value_name = "FILE")]
    schema: Option<String>,

    /// Timeout in seconds for each ruleset download
    #[arg(short, long, value_name = "SECONDS")]
    timeout: Option<u64>,

    /// Proxy for ruleset downloads (SYSTEM, NONE or a proxy URL)
    #[arg(long, value_name = "PROXY")]
    proxy: Option<String>,
}

impl Args {
    /// Override settings with command line arguments if provided
    fn apply(self, settings: &mut Settings) {
        if let Some(base) = self.base {
            settings.base_config = base;
        }
        if let Some(directives) = self.directives {
            settings.directives = directives;
        }
        if let Some(output) = self.output {
            settings.output = output;
        }
        if let Some(schema) = self.schema {
            settings.schema = schema;
        }
        if let Some(timeout) = self.timeout {
            settings.timeout_secs = timeout;
        }
        if let Some(proxy) = self.proxy {
            settings.proxy_ruleset = proxy;
        }
    }
}

fn run(args: Args) -> anyhow::Result<()> {
    let mut settings = match &args.config {
        Some(path) => Settings::load_from_file(path)
            .with_context(|| format!("Failed to load settings from {}", path))?,
        None => Settings::new(),
    };
    args.apply(&mut settings);

    let fetcher = HttpFetcher::new(&settings).context("Failed to create HTTP client")?;
    let report = generate(&settings, &fetcher)?;

    info!(
        "Wrote {} with {} rules and {} proxy groups for {} proxies",
        report.output, report.rules, report.groups, report.proxies
    );
    Ok(())
}

fn main() {
    // Initialize the logger
    env_logger::init_from_env(Env::default().default_filter_or("info"));

    if let Err(e) = run(Args::parse()) {
        error!("{:#}", e);
        std::process::exit(1);
    }
}
