//! Main test runner that orchestrates the server, the browser, and reporting

use std::path::PathBuf;
use std::time::Instant;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};

use crate::browser::{BrowserConfig, BrowserHandle};
use crate::error::{E2eError, E2eResult};
use crate::server::{ServerConfig, ServerHandle};
use crate::spec::{TestSpec, TestStep};

/// Outcome of a single test
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TestStatus {
    Passed,
    Failed,
    /// Environment problem rather than a regression, e.g. Playwright
    /// not installed on this machine
    Warning,
}

/// Result of running a single test
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestResult {
    pub name: String,
    pub status: TestStatus,
    pub duration_ms: u64,
    pub message: Option<String>,
    pub screenshots: Vec<String>,
    pub timestamp: DateTime<Utc>,
}

impl TestResult {
    pub fn passed(&self) -> bool {
        self.status == TestStatus::Passed
    }
}

/// Result of running a whole suite
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestSuiteResult {
    pub suite_name: String,
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub warnings: usize,
    pub duration_ms: u64,
    pub results: Vec<TestResult>,
}

impl TestSuiteResult {
    pub fn from_results(suite_name: &str, results: Vec<TestResult>, duration_ms: u64) -> Self {
        let passed = results.iter().filter(|r| r.status == TestStatus::Passed).count();
        let failed = results.iter().filter(|r| r.status == TestStatus::Failed).count();
        let warnings = results
            .iter()
            .filter(|r| r.status == TestStatus::Warning)
            .count();

        Self {
            suite_name: suite_name.to_string(),
            total: results.len(),
            passed,
            failed,
            warnings,
            duration_ms,
            results,
        }
    }

    /// Pass rate in percent over tests that actually ran
    pub fn pass_rate(&self) -> f64 {
        if self.total == 0 {
            return 100.0;
        }
        self.passed as f64 / self.total as f64 * 100.0
    }
}

/// Main E2E test runner
pub struct TestRunner {
    server_config: ServerConfig,
    browser_config: BrowserConfig,
    server: Option<ServerHandle>,
    specs_dir: PathBuf,
    output_dir: PathBuf,
    suite_name: String,
}

impl TestRunner {
    /// Create a new test runner with default configuration
    pub fn new() -> Self {
        Self::with_config(RunnerConfig::default())
    }

    /// Create a test runner with custom configuration
    pub fn with_config(config: RunnerConfig) -> Self {
        Self {
            server_config: config.server,
            browser_config: config.browser,
            server: None,
            specs_dir: config.specs_dir,
            output_dir: config.output_dir,
            suite_name: config.suite_name,
        }
    }

    pub fn suite_name(&self) -> &str {
        &self.suite_name
    }

    pub fn output_dir(&self) -> &PathBuf {
        &self.output_dir
    }

    /// Start the server under test
    pub async fn start_server(&mut self) -> E2eResult<()> {
        if self.server.is_some() {
            return Ok(());
        }

        let server = ServerHandle::spawn(self.server_config.clone()).await?;
        self.browser_config.base_url = server.base_url().to_string();
        self.server = Some(server);
        Ok(())
    }

    /// Stop the server
    pub fn stop_server(&mut self) -> E2eResult<()> {
        if let Some(mut server) = self.server.take() {
            server.stop()?;
        }
        Ok(())
    }

    /// Run all tests in the specs directory
    pub async fn run_all(&mut self) -> E2eResult<TestSuiteResult> {
        let specs = TestSpec::load_all(&self.specs_dir)?;
        self.run_specs(&specs).await
    }

    /// Run tests matching a tag
    pub async fn run_tagged(&mut self, tag: &str) -> E2eResult<TestSuiteResult> {
        let specs = TestSpec::load_all(&self.specs_dir)?;
        let filtered: Vec<TestSpec> = specs
            .into_iter()
            .filter(|s| s.tags.contains(&tag.to_string()))
            .collect();
        self.run_specs(&filtered).await
    }

    /// Run a specific test by name
    pub async fn run_test(&mut self, name: &str) -> E2eResult<TestResult> {
        let specs = TestSpec::load_all(&self.specs_dir)?;
        let spec = specs
            .into_iter()
            .find(|s| s.name == name)
            .ok_or_else(|| E2eError::SpecParse(format!("Test not found: {}", name)))?;

        self.start_server().await?;
        self.run_spec(&spec).await
    }

    /// Run a list of test specs
    pub async fn run_specs(&mut self, specs: &[TestSpec]) -> E2eResult<TestSuiteResult> {
        let start = Instant::now();
        let mut results = Vec::new();

        self.start_server().await?;

        info!("Running {} test(s)...", specs.len());

        for spec in specs {
            match self.run_spec(spec).await {
                Ok(result) => {
                    match result.status {
                        TestStatus::Passed => {
                            info!("PASS {} ({} ms)", result.name, result.duration_ms)
                        }
                        TestStatus::Failed => error!(
                            "FAIL {} - {}",
                            result.name,
                            result.message.as_deref().unwrap_or("unknown error")
                        ),
                        TestStatus::Warning => warn!(
                            "WARN {} - {}",
                            result.name,
                            result.message.as_deref().unwrap_or("")
                        ),
                    }
                    results.push(result);
                }
                Err(e) => {
                    error!("FAIL {} - {}", spec.name, e);
                    results.push(TestResult {
                        name: spec.name.clone(),
                        status: TestStatus::Failed,
                        duration_ms: 0,
                        message: Some(e.to_string()),
                        screenshots: Vec::new(),
                        timestamp: Utc::now(),
                    });
                }
            }
        }

        let duration_ms = start.elapsed().as_millis() as u64;
        let suite = TestSuiteResult::from_results(&self.suite_name, results, duration_ms);

        info!(
            "Test Results: {} passed, {} failed, {} warning(s) ({} ms)",
            suite.passed, suite.failed, suite.warnings, suite.duration_ms
        );

        Ok(suite)
    }

    /// Run a single test spec in one browser session
    pub async fn run_spec(&mut self, spec: &TestSpec) -> E2eResult<TestResult> {
        let start = Instant::now();
        let timestamp = Utc::now();
        debug!("Running test: {}", spec.name);

        let browser = match BrowserHandle::new(self.browser_config.clone()) {
            Ok(browser) => browser,
            Err(E2eError::BrowserNotFound) => {
                return Ok(TestResult {
                    name: spec.name.clone(),
                    status: TestStatus::Warning,
                    duration_ms: 0,
                    message: Some(E2eError::BrowserNotFound.to_string()),
                    screenshots: Vec::new(),
                    timestamp,
                });
            }
            Err(e) => return Err(e),
        };

        let screenshots = spec
            .steps
            .iter()
            .filter_map(|s| match s {
                TestStep::Screenshot { name, .. } => Some(name.clone()),
                _ => None,
            })
            .collect();

        let outcome = browser.run_steps(spec).await;
        let duration_ms = start.elapsed().as_millis() as u64;

        match outcome {
            Ok(()) => Ok(TestResult {
                name: spec.name.clone(),
                status: TestStatus::Passed,
                duration_ms,
                message: (!spec.description.is_empty()).then(|| spec.description.clone()),
                screenshots,
                timestamp,
            }),
            Err(E2eError::StepFailed { step, reason }) => Ok(TestResult {
                name: spec.name.clone(),
                status: TestStatus::Failed,
                duration_ms,
                message: Some(format!("{}: {}", step, reason)),
                screenshots: Vec::new(),
                timestamp,
            }),
            Err(E2eError::Browser(reason)) => Ok(TestResult {
                name: spec.name.clone(),
                status: TestStatus::Failed,
                duration_ms,
                message: Some(reason),
                screenshots: Vec::new(),
                timestamp,
            }),
            Err(e) => Err(e),
        }
    }

    /// Write the raw suite result to a JSON file
    pub fn write_results(&self, results: &TestSuiteResult) -> E2eResult<PathBuf> {
        std::fs::create_dir_all(&self.output_dir)?;

        let path = self.output_dir.join("test-results.json");
        let json = serde_json::to_string_pretty(results)?;
        std::fs::write(&path, json)?;

        info!("Results written to: {}", path.display());
        Ok(path)
    }
}

impl Default for TestRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for TestRunner {
    fn drop(&mut self) {
        let _ = self.stop_server();
    }
}

/// Configuration for the test runner
#[derive(Debug, Clone)]
pub struct RunnerConfig {
    pub server: ServerConfig,
    pub browser: BrowserConfig,
    pub specs_dir: PathBuf,
    pub output_dir: PathBuf,
    pub suite_name: String,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            browser: BrowserConfig::default(),
            specs_dir: PathBuf::from("tests/specs"),
            output_dir: PathBuf::from("test-results"),
            suite_name: "Gestor de Cine".to_string(),
        }
    }
}
