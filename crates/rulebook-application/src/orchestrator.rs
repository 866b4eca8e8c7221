//! Rule execution orchestrator
//!
//! Rules run strictly one after another. The first failure aborts the batch;
//! rules after it are never started.

use std::time::Duration;

use rulebook_domain::ports::SharedRuleRuntime;
use rulebook_domain::{ProjectContext, Result, Rule, RuleInvocation};
use serde::Serialize;
use tokio::time::Instant;
use tracing::{debug, info, warn};

use crate::resolution::resolve_arguments;

/// Outcome of one successfully completed rule
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RuleOutcome {
    /// Rule identifier
    pub rule_id: String,
    /// Owning ruleset
    pub ruleset: String,
    /// Wall-clock time spent in the rule process
    pub elapsed: Duration,
}

/// Result of applying a batch of rules
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ApplyReport {
    /// Completed rules in execution order
    pub executed: Vec<RuleOutcome>,
    /// Number of rules skipped because the execution filter excluded them
    pub skipped: usize,
}

impl ApplyReport {
    /// Number of rules that ran
    pub fn executed_count(&self) -> usize {
        self.executed.len()
    }

    /// Total time spent running rules
    pub fn total_elapsed(&self) -> Duration {
        self.executed.iter().map(|outcome| outcome.elapsed).sum()
    }
}

/// Runs discovered rules through a [`RuleRuntime`](rulebook_domain::ports::RuleRuntime)
pub struct RuleOrchestrator {
    runtime: SharedRuleRuntime,
}

impl RuleOrchestrator {
    /// Create an orchestrator over `runtime`
    pub fn new(runtime: SharedRuleRuntime) -> Self {
        Self { runtime }
    }

    /// Provision the runtime, then run every enabled rule in order
    ///
    /// `sources` are the configured source locations whose dependencies the
    /// runtime installs when it creates its environment.
    pub async fn apply(
        &self,
        rules: &[Rule],
        context: &ProjectContext,
        sources: &[String],
    ) -> Result<ApplyReport> {
        self.runtime.provision(sources).await?;

        let mut report = ApplyReport::default();
        for rule in rules {
            if rule.excluded {
                debug!(rule_id = %rule.id, "Rule excluded, skipping");
                report.skipped += 1;
                continue;
            }
            report.executed.push(self.run_rule(rule, context).await?);
        }

        info!(
            executed = report.executed_count(),
            skipped = report.skipped,
            elapsed_ms = report.total_elapsed().as_millis(),
            "Rules applied"
        );
        Ok(report)
    }

    /// Reinstall the dependencies of every source location
    pub async fn update(&self, sources: &[String]) -> Result<()> {
        for source in sources {
            info!(source = %source, "Installing rule dependencies");
            self.runtime.install_dependencies(source).await?;
        }
        Ok(())
    }

    async fn run_rule(&self, rule: &Rule, context: &ProjectContext) -> Result<RuleOutcome> {
        let arguments = resolve_arguments(rule, context)?;
        let invocation = RuleInvocation::for_rule(rule, arguments)?;

        info!(rule_id = %rule.id, ruleset = %rule.ruleset, "Applying rule: {}", rule.summary());
        let started = Instant::now();
        if let Err(e) = self.runtime.invoke(&invocation).await {
            warn!(rule_id = %rule.id, error = %e, "Rule failed, aborting remaining rules");
            return Err(e);
        }
        let elapsed = started.elapsed();
        info!(rule_id = %rule.id, elapsed_ms = elapsed.as_millis(), "Rule passed");

        Ok(RuleOutcome {
            rule_id: rule.id.clone(),
            ruleset: rule.ruleset.clone(),
            elapsed,
        })
    }
}
