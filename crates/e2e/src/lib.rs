//! Gestor de Cine UI Test Framework
//!
//! Rust-controlled end-to-end testing for the catalog web application:
//! - Spawns the gestor-web server as a subprocess
//! - Drives a real browser through Playwright's Node library
//! - Parses declarative YAML test specs
//! - Writes an HTML and JSON suite report
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    E2E Test Runner (Rust)                   │
//! ├─────────────────────────────────────────────────────────────┤
//! │  TestRunner                                                 │
//! │    ├── start_server()  (spawns gestor-web, waits healthy)   │
//! │    ├── run_spec(spec: TestSpec) -> TestResult               │
//! │    └── write_results() / report::write_reports()            │
//! ├─────────────────────────────────────────────────────────────┤
//! │  TestSpec (YAML)                                            │
//! │    ├── name, description, tags                              │
//! │    └── steps: [Step]                                        │
//! │          ├── navigate { url }                               │
//! │          ├── click { selector }                             │
//! │          ├── fill { selector, value }                       │
//! │          ├── select { selector, value }                     │
//! │          ├── wait { selector, state }                       │
//! │          ├── assert { selector, visible?, text?, count? }   │
//! │          └── screenshot { name }                            │
//! └─────────────────────────────────────────────────────────────┘
//! ```

pub mod browser;
pub mod error;
pub mod report;
pub mod runner;
pub mod server;
pub mod spec;

pub use error::{E2eError, E2eResult};
pub use runner::TestRunner;
pub use spec::{TestSpec, TestStep};
