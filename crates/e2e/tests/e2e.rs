//! E2E test harness entry point
//!
//! This file is the test binary that runs UI tests from YAML specs.
//! Run with: cargo test --package gestor-e2e --test e2e
//!
//! The gestor-web binary must be built first and Playwright installed
//! (npm install playwright && npx playwright install).

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use gestor_e2e::browser::{Browser, BrowserConfig};
use gestor_e2e::runner::RunnerConfig;
use gestor_e2e::server::ServerConfig;
use gestor_e2e::{report, E2eResult, TestRunner};

#[derive(Parser, Debug)]
#[command(name = "gestor-e2e")]
#[command(about = "Browser-driven UI test runner for Gestor de Cine")]
struct Args {
    /// Path to test specs directory
    #[arg(short, long, default_value = "tests/specs")]
    specs: PathBuf,

    /// Run only tests matching this tag
    #[arg(short, long)]
    tag: Option<String>,

    /// Run only a specific test by name
    #[arg(short, long)]
    name: Option<String>,

    /// Path to the web server binary
    #[arg(long, default_value = "target/debug/gestor-web")]
    server_binary: PathBuf,

    /// Data directory for the server (default: a fresh temp dir)
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Port to run the server on (0 = auto)
    #[arg(long, default_value = "0")]
    port: u16,

    /// Browser to use (chromium, firefox, webkit)
    #[arg(long, default_value = "chromium")]
    browser: Browser,

    /// Run in headless mode
    #[arg(long, default_value = "true")]
    headless: bool,

    /// Suite name used in the reports
    #[arg(long, default_value = "Gestor de Cine")]
    suite_name: String,

    /// Output directory for results and reports
    #[arg(short, long, default_value = "test-results")]
    output: PathBuf,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse().unwrap()))
        .init();

    let args = Args::parse();

    let rt = tokio::runtime::Runtime::new().expect("Failed to create tokio runtime");
    let result = rt.block_on(async_main(args));

    match result {
        Ok(success) => {
            if success {
                std::process::exit(0);
            } else {
                std::process::exit(1);
            }
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(2);
        }
    }
}

async fn async_main(args: Args) -> E2eResult<bool> {
    // Every run gets an empty catalog unless a data dir is given. The
    // temp dir guard must outlive the server process.
    let mut _temp_data = None;
    let data_dir = match args.data_dir {
        Some(dir) => dir,
        None => {
            let dir = tempfile::tempdir()?;
            let path = dir.path().to_path_buf();
            _temp_data = Some(dir);
            path
        }
    };

    let config = RunnerConfig {
        server: ServerConfig {
            binary_path: args.server_binary,
            data_dir,
            port: if args.port == 0 { None } else { Some(args.port) },
            ..Default::default()
        },
        browser: BrowserConfig {
            browser: args.browser,
            headless: args.headless,
            screenshot_dir: args.output.join("screenshots"),
            ..Default::default()
        },
        specs_dir: args.specs,
        output_dir: args.output,
        suite_name: args.suite_name,
    };

    let mut runner = TestRunner::with_config(config);

    runner.start_server().await?;

    let results = if let Some(name) = args.name {
        let result = runner.run_test(&name).await?;
        gestor_e2e::runner::TestSuiteResult::from_results(
            runner.suite_name(),
            vec![result],
            0,
        )
    } else if let Some(tag) = args.tag {
        runner.run_tagged(&tag).await?
    } else {
        runner.run_all().await?
    };

    runner.write_results(&results)?;
    report::write_reports(runner.output_dir(), &results)?;

    Ok(results.failed == 0)
}

#[cfg(test)]
mod tests {
    use gestor_e2e::spec::TestSpec;

    #[test]
    fn parses_a_sample_spec() {
        let yaml = r#"
name: sample-test
description: A sample test
steps:
  - action: navigate
    url: /genre/index
  - action: wait
    selector: 'tbody'
  - action: screenshot
    name: genre-index
"#;
        let specs = TestSpec::from_yaml(yaml).unwrap();
        assert_eq!(specs[0].name, "sample-test");
        assert_eq!(specs[0].steps.len(), 3);
    }
}
