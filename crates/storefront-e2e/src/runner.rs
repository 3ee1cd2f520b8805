// Runner - Executes scenarios with workers, retries and failure artifacts
//
// Scheduling:
// - Without `parallel`, the tests of one suite run in declaration order on
//   one worker; suites are spread over `workers`.
// - With `parallel`, every test is scheduled on its own.
//
// Each attempt gets a fresh fixture and the per-test timeout. A failed
// attempt leaves `<output_dir>/<test-slug>/failure-attempt-<n>.png` and its
// video; videos of passing attempts are deleted. The run ends with
// `<output_dir>/report.json`.

use crate::config::SuiteConfig;
use crate::error::{Error, Result};
use crate::scenarios::Scenario;
use crate::session::FixtureFactory;
use futures_util::stream::{self, StreamExt};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::time::Instant;

pub const REPORT_FILE: &str = "report.json";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TestStatus {
    Passed,
    /// Passed on a retry
    Flaky,
    Failed,
}

#[derive(Debug, Clone, Serialize)]
pub struct AttemptOutcome {
    /// 1-based
    pub attempt: u32,
    pub passed: bool,
    pub duration_ms: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub screenshot: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TestOutcome {
    pub suite: String,
    pub name: String,
    pub status: TestStatus,
    pub attempts: Vec<AttemptOutcome>,
}

/// Result of a whole run, written as `report.json`.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub started_at: String,
    pub test_env: String,
    pub browser: String,
    pub device: String,
    pub base_url: String,
    pub workers: usize,
    pub retries: u32,
    pub duration_ms: u64,
    pub tests: Vec<TestOutcome>,
}

impl RunReport {
    fn count(&self, status: TestStatus) -> usize {
        self.tests.iter().filter(|t| t.status == status).count()
    }

    pub fn passed(&self) -> usize {
        self.count(TestStatus::Passed)
    }

    pub fn flaky(&self) -> usize {
        self.count(TestStatus::Flaky)
    }

    pub fn failed(&self) -> usize {
        self.count(TestStatus::Failed)
    }

    /// No test failed (flaky tests count as successful).
    pub fn is_success(&self) -> bool {
        self.failed() == 0
    }

    /// Writes `<dir>/report.json` and returns its path.
    pub async fn write(&self, dir: &Path) -> Result<PathBuf> {
        tokio::fs::create_dir_all(dir).await?;
        let path = dir.join(REPORT_FILE);
        let json = serde_json::to_string_pretty(self)?;
        tokio::fs::write(&path, json).await?;
        Ok(path)
    }
}

pub struct Runner<'a, F: FixtureFactory> {
    factory: &'a F,
    config: &'a SuiteConfig,
}

impl<'a, F: FixtureFactory> Runner<'a, F> {
    pub fn new(factory: &'a F, config: &'a SuiteConfig) -> Self {
        Self { factory, config }
    }

    /// Runs `scenarios` and returns the report; outcomes keep the input order.
    pub async fn run(&self, scenarios: &[Scenario]) -> RunReport {
        let started_at = chrono::Local::now().to_rfc3339();
        let start = Instant::now();
        tracing::info!(
            "Running {} tests using {} worker(s)",
            scenarios.len(),
            self.config.workers
        );

        let units = self.schedule(scenarios);
        let mut outcomes: Vec<(usize, TestOutcome)> = stream::iter(units)
            .map(|unit| async move {
                let mut done = Vec::with_capacity(unit.len());
                for (index, scenario) in unit {
                    done.push((index, self.run_test(&scenario).await));
                }
                done
            })
            .buffer_unordered(self.config.workers)
            .collect::<Vec<_>>()
            .await
            .into_iter()
            .flatten()
            .collect();
        outcomes.sort_by_key(|(index, _)| *index);

        let report = RunReport {
            started_at,
            test_env: self.config.test_env.clone(),
            browser: self.config.browser.to_string(),
            device: self.config.device().name.to_string(),
            base_url: self.config.base_url.to_string(),
            workers: self.config.workers,
            retries: self.config.retries,
            duration_ms: start.elapsed().as_millis() as u64,
            tests: outcomes.into_iter().map(|(_, outcome)| outcome).collect(),
        };
        tracing::info!(
            "{} passed, {} flaky, {} failed ({:.1}s)",
            report.passed(),
            report.flaky(),
            report.failed(),
            report.duration_ms as f64 / 1000.0
        );
        report
    }

    // Groups scenarios into units of work, each run sequentially by one
    // worker. Indices preserve declaration order for the report.
    fn schedule(&self, scenarios: &[Scenario]) -> Vec<Vec<(usize, Scenario)>> {
        if self.config.parallel {
            return scenarios
                .iter()
                .copied()
                .enumerate()
                .map(|entry| vec![entry])
                .collect();
        }

        let mut units: Vec<Vec<(usize, Scenario)>> = Vec::new();
        for (index, scenario) in scenarios.iter().copied().enumerate() {
            match units
                .iter_mut()
                .find(|unit| unit.first().is_some_and(|(_, s)| s.suite == scenario.suite))
            {
                Some(unit) => unit.push((index, scenario)),
                None => units.push(vec![(index, scenario)]),
            }
        }
        units
    }

    async fn run_test(&self, scenario: &Scenario) -> TestOutcome {
        let title = scenario.title();
        let test_dir = self.config.output_dir.join(scenario.slug());
        let max_attempts = self.config.retries + 1;

        let mut attempts = Vec::new();
        for attempt in 1..=max_attempts {
            if attempt > 1 {
                tracing::info!("Retrying {} (attempt {}/{})", title, attempt, max_attempts);
            }
            let outcome = self.run_attempt(scenario, attempt, &test_dir).await;
            let passed = outcome.passed;
            attempts.push(outcome);
            if passed {
                break;
            }
        }

        let status = match attempts.last() {
            Some(last) if last.passed && attempts.len() == 1 => TestStatus::Passed,
            Some(last) if last.passed => TestStatus::Flaky,
            _ => TestStatus::Failed,
        };
        match status {
            TestStatus::Failed => tracing::error!("✗ {}", title),
            TestStatus::Flaky => tracing::warn!("✓ {} (flaky)", title),
            TestStatus::Passed => tracing::info!("✓ {}", title),
        }

        TestOutcome {
            suite: scenario.suite.to_string(),
            name: scenario.name.to_string(),
            status,
            attempts,
        }
    }

    async fn run_attempt(&self, scenario: &Scenario, attempt: u32, test_dir: &Path) -> AttemptOutcome {
        let start = Instant::now();
        let video_dir = test_dir.join(format!("video-attempt-{}", attempt));
        let failed = |error: &Error, screenshot, video_dir| AttemptOutcome {
            attempt,
            passed: false,
            duration_ms: start.elapsed().as_millis() as u64,
            error: Some(error.to_string()),
            screenshot,
            video_dir,
        };

        let fixture = match self.factory.new_fixture(Some(&video_dir)).await {
            Ok(fixture) => fixture,
            Err(e) => {
                let e = e.context("open browser context");
                tracing::error!("{} (attempt {}): {}", scenario.title(), attempt, e);
                return failed(&e, None, None);
            }
        };

        let body = (scenario.run)(&fixture);
        let result = match self.config.timeout {
            Some(limit) => match tokio::time::timeout(limit, body).await {
                Ok(result) => result,
                Err(_) => Err(Error::TestTimeout(limit)),
            },
            None => body.await,
        };

        let screenshot = match &result {
            Ok(()) => None,
            Err(e) => {
                tracing::error!("{} (attempt {}): {}", scenario.title(), attempt, e);
                let path = test_dir.join(format!("failure-attempt-{}.png", attempt));
                match fixture.base().screenshot_to(&path).await {
                    Ok(()) => Some(path),
                    Err(shot_err) => {
                        tracing::warn!("Failure screenshot not captured: {}", shot_err);
                        None
                    }
                }
            }
        };

        // Videos are only complete once the context is closed.
        if let Err(e) = fixture.close().await {
            tracing::warn!("Closing fixture failed: {}", e);
        }

        match result {
            Ok(()) => {
                discard_dir(&video_dir).await;
                AttemptOutcome {
                    attempt,
                    passed: true,
                    duration_ms: start.elapsed().as_millis() as u64,
                    error: None,
                    screenshot: None,
                    video_dir: None,
                }
            }
            Err(e) => {
                let video = tokio::fs::try_exists(&video_dir)
                    .await
                    .unwrap_or(false)
                    .then_some(video_dir.clone());
                failed(&e, screenshot, video)
            }
        }
    }
}

async fn discard_dir(dir: &Path) {
    match tokio::fs::remove_dir_all(dir).await {
        Ok(()) => {}
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => tracing::warn!("Could not remove {}: {}", dir.display(), e),
    }
}
