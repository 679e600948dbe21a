//! Start-up sequencing
//!
//! Core steps (navigation, scrolling, reveals) run first and in order; the
//! first core failure skips the core steps after it. Enhancements each run
//! in isolation so one broken widget never takes its siblings down.

use serde::Serialize;
use tracing::{debug, error, info, warn};

use crate::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StepKind {
    Core,
    Enhancement,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StepOutcome {
    Ok,
    Failed(String),
    Skipped,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepReport {
    pub name: String,
    pub kind: StepKind,
    pub outcome: StepOutcome,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct InitReport {
    pub steps: Vec<StepReport>,
}

impl InitReport {
    pub fn outcome(&self, name: &str) -> Option<&StepOutcome> {
        self.steps.iter().find(|s| s.name == name).map(|s| &s.outcome)
    }

    pub fn ok_count(&self) -> usize {
        self.count(|o| matches!(o, StepOutcome::Ok))
    }

    pub fn failed_count(&self) -> usize {
        self.count(|o| matches!(o, StepOutcome::Failed(_)))
    }

    pub fn skipped_count(&self) -> usize {
        self.count(|o| matches!(o, StepOutcome::Skipped))
    }

    pub fn core_failed(&self) -> bool {
        self.steps
            .iter()
            .any(|s| s.kind == StepKind::Core && matches!(s.outcome, StepOutcome::Failed(_)))
    }

    fn count(&self, pred: impl Fn(&StepOutcome) -> bool) -> usize {
        self.steps.iter().filter(|s| pred(&s.outcome)).count()
    }
}

#[derive(Debug, Default)]
pub struct Bootstrap {
    report: InitReport,
    core_failed: bool,
}

impl Bootstrap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run a core step unless an earlier core step already failed
    pub fn core<F>(&mut self, name: &str, step: F) -> &mut Self
    where
        F: FnOnce() -> Result<()>,
    {
        let outcome = if self.core_failed {
            debug!(step = name, "Skipping core step after earlier failure");
            StepOutcome::Skipped
        } else {
            match run(name, step) {
                Err(msg) => {
                    error!(step = name, error = %msg, "Core initialisation failed");
                    self.core_failed = true;
                    StepOutcome::Failed(msg)
                }
                Ok(()) => StepOutcome::Ok,
            }
        };
        self.push(name, StepKind::Core, outcome);
        self
    }

    /// Run an optional step; a failure is logged and contained
    pub fn enhancement<F>(&mut self, name: &str, step: F) -> &mut Self
    where
        F: FnOnce() -> Result<()>,
    {
        let outcome = match run(name, step) {
            Err(msg) => {
                warn!(step = name, error = %msg, "Enhancement failed to initialise");
                StepOutcome::Failed(msg)
            }
            Ok(()) => StepOutcome::Ok,
        };
        self.push(name, StepKind::Enhancement, outcome);
        self
    }

    pub fn finish(self) -> InitReport {
        info!(
            ok = self.report.ok_count(),
            failed = self.report.failed_count(),
            skipped = self.report.skipped_count(),
            "Page interactions initialised"
        );
        self.report
    }

    fn push(&mut self, name: &str, kind: StepKind, outcome: StepOutcome) {
        self.report.steps.push(StepReport {
            name: name.to_string(),
            kind,
            outcome,
        });
    }
}

/// Missing anchors and absent capabilities count as success
fn run<F>(name: &str, step: F) -> std::result::Result<(), String>
where
    F: FnOnce() -> Result<()>,
{
    match step() {
        Ok(()) => Ok(()),
        Err(e) if e.is_benign() => {
            debug!(step = name, reason = %e, "Step had nothing to do");
            Ok(())
        }
        Err(e) => Err(e.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    #[test]
    fn test_enhancement_fault_is_contained() {
        let mut boot = Bootstrap::new();
        boot.enhancement("carousel", || Err(Error::Dom("no track".into())))
            .enhancement("counter", || Ok(()));
        let report = boot.finish();
        assert!(matches!(report.outcome("carousel"), Some(StepOutcome::Failed(_))));
        assert_eq!(report.outcome("counter"), Some(&StepOutcome::Ok));
        assert!(!report.core_failed());
    }

    #[test]
    fn test_core_fault_skips_remaining_core() {
        let mut boot = Bootstrap::new();
        boot.core("menu", || Ok(()))
            .core("scroll", || Err(Error::Other("boom".into())))
            .core("reveal", || Ok(()))
            .enhancement("cursor", || Ok(()));
        let report = boot.finish();

        assert_eq!(report.outcome("menu"), Some(&StepOutcome::Ok));
        assert_eq!(
            report.outcome("scroll"),
            Some(&StepOutcome::Failed("boom".to_string()))
        );
        assert_eq!(report.outcome("reveal"), Some(&StepOutcome::Skipped));
        assert_eq!(report.outcome("cursor"), Some(&StepOutcome::Ok));
        assert!(report.core_failed());
        assert_eq!(report.ok_count(), 2);
        assert_eq!(report.skipped_count(), 1);
    }

    #[test]
    fn test_missing_anchor_is_not_a_failure() {
        let mut boot = Bootstrap::new();
        boot.core("menu", || Err(Error::MissingAnchor(".main-nav".into())));
        let report = boot.finish();
        assert_eq!(report.outcome("menu"), Some(&StepOutcome::Ok));
        assert_eq!(report.failed_count(), 0);
    }
}
