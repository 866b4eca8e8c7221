//! Rule Runtime Interface

use crate::error::Result;
use crate::value_objects::RuleInvocation;
use async_trait::async_trait;
use std::sync::Arc;

/// Isolated execution environment for rule functions
///
/// Implementations own an interpreter and package set separate from the host.
/// Calls are made strictly one at a time by the orchestrator.
///
/// # Example
///
/// ```no_run
/// use rulebook_domain::ports::RuleRuntime;
/// use rulebook_domain::RuleInvocation;
/// use std::sync::Arc;
///
/// async fn run_one(runtime: Arc<dyn RuleRuntime>, call: RuleInvocation) -> rulebook_domain::Result<()> {
///     runtime.provision(&["./rules".to_string()]).await?;
///     runtime.invoke(&call).await
/// }
/// ```
#[async_trait]
pub trait RuleRuntime: Send + Sync {
    /// Create the environment if missing and install dependencies of `sources`
    ///
    /// Must be idempotent: an existing environment is reused as-is.
    async fn provision(&self, sources: &[String]) -> Result<()>;

    /// Install the dependencies declared by one source location
    async fn install_dependencies(&self, source: &str) -> Result<()>;

    /// Run one rule to completion, forwarding its standard output
    ///
    /// Returns an error when the rule process fails or exceeds its time budget.
    async fn invoke(&self, invocation: &RuleInvocation) -> Result<()>;
}

/// Shared runtime handle
pub type SharedRuleRuntime = Arc<dyn RuleRuntime>;
