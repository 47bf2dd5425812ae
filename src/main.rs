mod headless;

use armview_core::config::Config;
use armview_source::{RuleSource, Source};
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "armview", about = "Browse weather → symptom association rules")]
struct Cli {
    /// Rules API endpoint (overrides `[source] url` in the config file).
    #[arg(long)]
    url: Option<String>,

    /// Read the rule set from a local JSON file instead of the API.
    #[arg(long)]
    file: Option<PathBuf>,

    /// Write debug logs to /tmp/armview-debug.log (tail -f to inspect).
    #[arg(long)]
    debug: bool,

    /// Print matching rules to stdout and exit instead of starting the TUI.
    #[arg(long)]
    headless: bool,

    /// Rules whose weather condition is exactly this value.
    #[arg(long, requires = "headless", group = "query")]
    weather: Option<String>,

    /// Rules whose symptom is exactly this value.
    #[arg(long, requires = "headless", group = "query")]
    symptom: Option<String>,

    /// Rules containing this text on either side, case-insensitive.
    #[arg(long, requires = "headless", group = "query")]
    search: Option<String>,

    /// Rules whose weather condition contains any of these terms.
    #[arg(long, requires = "headless", group = "query", num_args = 1..)]
    predict: Vec<String>,

    /// Headless output format.
    #[arg(long, value_enum, default_value_t = headless::OutputFormat::Text)]
    format: headless::OutputFormat,
}

impl Cli {
    fn query(&self) -> headless::Query {
        if let Some(v) = &self.weather {
            headless::Query::Weather(v.clone())
        } else if let Some(v) = &self.symptom {
            headless::Query::Symptom(v.clone())
        } else if let Some(t) = &self.search {
            headless::Query::Search(t.clone())
        } else if !self.predict.is_empty() {
            headless::Query::Predict(self.predict.clone())
        } else {
            headless::Query::All
        }
    }

    /// `--file` wins over `--url`, which wins over the config file.
    fn source(&self, config: &Config) -> Source {
        match (&self.file, &self.url) {
            (Some(path), _) => Source::file(path),
            (None, Some(url)) => Source::http(url),
            (None, None) => Source::http(&config.source.url),
        }
    }
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    if cli.debug {
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open("/tmp/armview-debug.log")?;
        tracing_subscriber::fmt()
            .with_writer(std::sync::Mutex::new(file))
            .with_ansi(false)
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_env("RUST_LOG")
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
            )
            .init();
        tracing::info!("armview debug log started — tail -f /tmp/armview-debug.log");
    }

    let config = Config::load().unwrap_or_else(|e| {
        tracing::warn!(error = %e, "config unreadable; using defaults");
        Config::defaults()
    });
    let source = cli.source(&config);
    tracing::info!(source = %source.describe(), headless = cli.headless, "starting");

    let runtime = tokio::runtime::Runtime::new()?;

    if cli.headless {
        let rules = match runtime.block_on(source.fetch()) {
            Ok(rules) => rules,
            Err(e) => {
                eprintln!("armview: {e}");
                return Ok(ExitCode::FAILURE);
            }
        };
        let mut stdout = std::io::stdout().lock();
        headless::write_rules(&mut stdout, &rules, &cli.query(), cli.format, &config)?;
        return Ok(ExitCode::SUCCESS);
    }

    let origin = source.describe();
    let (tx, rx) = tokio::sync::oneshot::channel();
    runtime.spawn(async move {
        // The UI may already be gone if the user quit while loading.
        let _ = tx.send(source.fetch().await);
    });

    armview_tui::run(rx, origin, config)?;
    Ok(ExitCode::SUCCESS)
}
