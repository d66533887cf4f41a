//! Playwright browser automation
//!
//! Each test spec is translated into one Node script that drives a real
//! browser through Playwright's library API, so page state (cookies,
//! current URL, DOM) carries across steps.

use std::path::PathBuf;
use std::process::{Command, Stdio};

use serde::Deserialize;
use tokio::process::Command as TokioCommand;
use tracing::debug;

use crate::error::{E2eError, E2eResult};
use crate::spec::{TestSpec, TestStep, WaitState};

/// Playwright browser handle
pub struct BrowserHandle {
    base_url: String,
    screenshot_dir: PathBuf,
    browser: Browser,
    headless: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Browser {
    #[default]
    Chromium,
    Firefox,
    Webkit,
}

impl Browser {
    fn as_str(&self) -> &'static str {
        match self {
            Browser::Chromium => "chromium",
            Browser::Firefox => "firefox",
            Browser::Webkit => "webkit",
        }
    }
}

impl std::str::FromStr for Browser {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "chromium" => Ok(Browser::Chromium),
            "firefox" => Ok(Browser::Firefox),
            "webkit" => Ok(Browser::Webkit),
            other => Err(format!("unknown browser: {}", other)),
        }
    }
}

/// What the generated script prints on stdout as its last line
#[derive(Debug, Deserialize)]
struct ScriptOutcome {
    success: bool,
    #[serde(default)]
    step: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

impl BrowserHandle {
    /// Create a new browser handle
    pub fn new(config: BrowserConfig) -> E2eResult<Self> {
        Self::check_playwright_installed()?;

        std::fs::create_dir_all(&config.screenshot_dir)?;

        Ok(Self {
            base_url: config.base_url,
            screenshot_dir: config.screenshot_dir,
            browser: config.browser,
            headless: config.headless,
        })
    }

    /// Check if Playwright is installed
    fn check_playwright_installed() -> E2eResult<()> {
        let output = Command::new("npx")
            .args(["playwright", "--version"])
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status();

        match output {
            Ok(status) if status.success() => Ok(()),
            _ => Err(E2eError::BrowserNotFound),
        }
    }

    /// Generate a script name for a step
    pub fn step_name(step: &TestStep) -> String {
        match step {
            TestStep::Navigate { url, .. } => format!("navigate:{}", url),
            TestStep::Click { selector, .. } => format!("click:{}", selector),
            TestStep::Fill { selector, .. } => format!("fill:{}", selector),
            TestStep::Select { selector, .. } => format!("select:{}", selector),
            TestStep::Wait { selector, .. } => format!("wait:{}", selector),
            TestStep::Sleep { ms } => format!("sleep:{}ms", ms),
            TestStep::Assert { selector, .. } => format!("assert:{}", selector),
            TestStep::Screenshot { name, .. } => format!("screenshot:{}", name),
            TestStep::Log { message } => {
                format!("log:{}", &message[..message.len().min(30)])
            }
        }
    }

    /// Build the Playwright script for a whole spec
    pub fn build_script(&self, spec: &TestSpec) -> String {
        let mut script = String::new();

        script.push_str(&format!(
            r#"const {{ chromium, firefox, webkit }} = require('playwright');

(async () => {{
  const browser = await {browser}.launch({{ headless: {headless} }});
  const context = await browser.newContext({{
    viewport: {{ width: {width}, height: {height} }}
  }});
  const page = await context.newPage();
  const baseUrl = {base_url};
  let currentStep = '';

  try {{
"#,
            browser = self.browser.as_str(),
            headless = self.headless,
            width = spec.viewport.width,
            height = spec.viewport.height,
            base_url = js_str(&self.base_url),
        ));

        for (i, step) in spec.steps.iter().enumerate() {
            script.push_str(&format!(
                "\n    // Step {}: {}\n    currentStep = {};\n",
                i + 1,
                Self::step_name(step),
                js_str(&Self::step_name(step)),
            ));
            script.push_str(&self.step_to_js(step));
            script.push('\n');
        }

        script.push_str(
            r#"
    console.log(JSON.stringify({ success: true }));
  } catch (error) {
    console.log(JSON.stringify({ success: false, step: currentStep, error: error.message }));
    process.exitCode = 1;
  } finally {
    await browser.close();
  }
})();
"#,
        );

        script
    }

    /// Convert a step to JavaScript code
    fn step_to_js(&self, step: &TestStep) -> String {
        match step {
            TestStep::Navigate {
                url,
                wait_for_selector,
            } => {
                let wait = wait_for_selector
                    .as_ref()
                    .map(|s| format!("\n    await page.waitForSelector({});", js_str(s)))
                    .unwrap_or_default();
                format!("    await page.goto(baseUrl + {});{}", js_str(url), wait)
            }
            TestStep::Click {
                selector,
                timeout_ms,
            } => {
                let timeout = timeout_ms.unwrap_or(5000);
                format!(
                    "    await page.click({}, {{ timeout: {} }});",
                    js_str(selector),
                    timeout
                )
            }
            TestStep::Fill { selector, value } => {
                format!(
                    "    await page.fill({}, {});",
                    js_str(selector),
                    js_str(value)
                )
            }
            TestStep::Select { selector, value } => {
                format!(
                    "    await page.selectOption({}, {});",
                    js_str(selector),
                    js_str(value)
                )
            }
            TestStep::Wait {
                selector,
                timeout_ms,
                state,
            } => {
                let state_str = match state {
                    WaitState::Visible => "visible",
                    WaitState::Hidden => "hidden",
                };
                format!(
                    "    await page.waitForSelector({}, {{ state: '{}', timeout: {} }});",
                    js_str(selector),
                    state_str,
                    timeout_ms
                )
            }
            TestStep::Sleep { ms } => {
                format!("    await page.waitForTimeout({});", ms)
            }
            TestStep::Assert {
                selector,
                visible,
                text,
                text_contains,
                count,
            } => {
                // Plain `require('playwright')` has no expect, so the
                // checks are spelled out against the locator API.
                let mut assertions = Vec::new();
                let sel = js_str(selector);

                if let Some(vis) = visible {
                    assertions.push(format!(
                        "    if (await page.locator({sel}).first().isVisible() !== {vis}) \
                         throw new Error('expected ' + {sel} + ' visible={vis}');"
                    ));
                }

                if let Some(t) = text {
                    let want = js_str(t);
                    assertions.push(format!(
                        "    {{ const got = (await page.locator({sel}).first().innerText()).trim(); \
                         if (got !== {want}) \
                         throw new Error('expected text ' + {want} + ' but got ' + JSON.stringify(got)); }}"
                    ));
                }

                if let Some(tc) = text_contains {
                    let want = js_str(tc);
                    assertions.push(format!(
                        "    {{ const got = await page.locator({sel}).first().innerText(); \
                         if (!got.includes({want})) \
                         throw new Error('expected text containing ' + {want} + ' but got ' + JSON.stringify(got)); }}"
                    ));
                }

                if let Some(c) = count {
                    assertions.push(format!(
                        "    {{ const got = await page.locator({sel}).count(); \
                         if (got !== {c}) \
                         throw new Error('expected ' + {c} + ' elements for ' + {sel} + ' but found ' + got); }}"
                    ));
                }

                assertions.join("\n")
            }
            TestStep::Screenshot { name, full_page } => {
                let path = self.screenshot_dir.join(format!("{}.png", name));
                format!(
                    "    await page.screenshot({{ path: {}, fullPage: {} }});",
                    js_str(&path.to_string_lossy()),
                    full_page
                )
            }
            TestStep::Log { message } => {
                format!("    console.error('[TEST] ' + {});", js_str(message))
            }
        }
    }

    /// Run a spec's steps in one browser session
    pub async fn run_steps(&self, spec: &TestSpec) -> E2eResult<()> {
        let script = self.build_script(spec);
        self.run_script(&script).await
    }

    /// Execute the generated script via node
    async fn run_script(&self, script: &str) -> E2eResult<()> {
        let temp_dir = tempfile::tempdir()?;
        let script_path = temp_dir.path().join("test.js");
        std::fs::write(&script_path, script)?;

        debug!("Running Playwright script: {}", script_path.display());

        let output = TokioCommand::new("node")
            .arg(&script_path)
            .output()
            .await
            .map_err(|e| E2eError::Browser(format!("failed to run node: {}", e)))?;

        let stdout = String::from_utf8_lossy(&output.stdout);

        // The last stdout line is the outcome JSON; anything before it
        // is noise from the page or Playwright itself.
        if let Some(outcome) = stdout
            .lines()
            .rev()
            .find_map(|line| serde_json::from_str::<ScriptOutcome>(line.trim()).ok())
        {
            if outcome.success {
                return Ok(());
            }
            return Err(E2eError::StepFailed {
                step: outcome.step.unwrap_or_else(|| "setup".to_string()),
                reason: outcome.error.unwrap_or_else(|| "unknown error".to_string()),
            });
        }

        let stderr = String::from_utf8_lossy(&output.stderr);
        Err(E2eError::Browser(format!(
            "script produced no outcome:\nstdout: {}\nstderr: {}",
            stdout, stderr
        )))
    }
}

/// Render a Rust string as a single-quoted JS string literal
fn js_str(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('\'');
    for c in s.chars() {
        match c {
            '\'' => out.push_str("\\'"),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            _ => out.push(c),
        }
    }
    out.push('\'');
    out
}

/// Configuration for the browser driver
#[derive(Debug, Clone)]
pub struct BrowserConfig {
    pub base_url: String,
    pub screenshot_dir: PathBuf,
    pub browser: Browser,
    pub headless: bool,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:3000".to_string(),
            screenshot_dir: PathBuf::from("test-results/screenshots"),
            browser: Browser::Chromium,
            headless: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spec::Viewport;

    fn handle() -> BrowserHandle {
        BrowserHandle {
            base_url: "http://127.0.0.1:3000".to_string(),
            screenshot_dir: PathBuf::from("test-results/screenshots"),
            browser: Browser::Chromium,
            headless: true,
        }
    }

    fn spec_with(steps: Vec<TestStep>) -> TestSpec {
        TestSpec {
            name: "test".to_string(),
            description: String::new(),
            tags: Vec::new(),
            viewport: Viewport {
                width: 1280,
                height: 720,
            },
            steps,
        }
    }

    #[test]
    fn js_str_escapes_quotes_and_backslashes() {
        assert_eq!(js_str("plain"), "'plain'");
        assert_eq!(js_str("it's"), r"'it\'s'");
        assert_eq!(js_str(r"a\b"), r"'a\\b'");
        assert_eq!(
            js_str(r#"button[type="submit"].btn.btn-success"#),
            r#"'button[type="submit"].btn.btn-success'"#
        );
    }

    #[test]
    fn script_carries_state_across_steps() {
        let spec = spec_with(vec![
            TestStep::Navigate {
                url: "/genre/create".to_string(),
                wait_for_selector: Some("#genreName".to_string()),
            },
            TestStep::Fill {
                selector: "#genreName".to_string(),
                value: "Drama".to_string(),
            },
            TestStep::Click {
                selector: r#"button[type="submit"].btn.btn-success"#.to_string(),
                timeout_ms: None,
            },
        ]);

        let script = handle().build_script(&spec);

        // One launch for the whole spec
        assert_eq!(script.matches(".launch(").count(), 1);
        assert!(script.contains("await page.goto(baseUrl + '/genre/create');"));
        assert!(script.contains("await page.waitForSelector('#genreName');"));
        assert!(script.contains("await page.fill('#genreName', 'Drama');"));
        assert!(script.contains("currentStep = 'fill:#genreName';"));
    }

    #[test]
    fn assert_step_generates_manual_checks() {
        let spec = spec_with(vec![TestStep::Assert {
            selector: "tbody tr".to_string(),
            visible: None,
            text: None,
            text_contains: Some("Drama".to_string()),
            count: Some(1),
        }]);

        let script = handle().build_script(&spec);

        assert!(script.contains("page.locator('tbody tr').count()"));
        assert!(script.contains("got.includes('Drama')"));
        assert!(!script.contains("expect("));
    }

    #[test]
    fn wait_hidden_maps_to_playwright_state() {
        let spec = spec_with(vec![TestStep::Wait {
            selector: "#confirmationModal-1".to_string(),
            timeout_ms: 5000,
            state: WaitState::Hidden,
        }]);

        let script = handle().build_script(&spec);
        assert!(script.contains("{ state: 'hidden', timeout: 5000 }"));
    }

    #[test]
    fn browser_parses_from_cli_names() {
        assert_eq!("chromium".parse::<Browser>().unwrap(), Browser::Chromium);
        assert_eq!("webkit".parse::<Browser>().unwrap(), Browser::Webkit);
        assert!("safari".parse::<Browser>().is_err());
    }
}
