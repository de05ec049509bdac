//! Core analyzer for orchestrating lint execution.

use crate::config::Config;
use crate::error::AnalysisError;
use crate::graph::DependencyGraph;
use crate::model::ModuleDescriptor;
use crate::provider::BuildGraphProvider;
use crate::rule::{DependencyRule, RuleBox};
use crate::types::{LintResult, Violation};
use tracing::{debug, info};

/// Builder for configuring an [`Analyzer`].
#[derive(Default)]
pub struct AnalyzerBuilder {
    rules: Vec<RuleBox>,
    config: Option<Config>,
}

impl AnalyzerBuilder {
    /// Creates a new builder with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a rule to the analyzer.
    #[must_use]
    pub fn rule<R: DependencyRule + 'static>(mut self, rule: R) -> Self {
        self.rules.push(Box::new(rule));
        self
    }

    /// Adds several boxed rules, keeping their order.
    #[must_use]
    pub fn rules(mut self, rules: impl IntoIterator<Item = RuleBox>) -> Self {
        self.rules.extend(rules);
        self
    }

    /// Sets the configuration.
    #[must_use]
    pub fn config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Builds the analyzer.
    #[must_use]
    pub fn build(self) -> Analyzer {
        Analyzer {
            rules: self.rules,
            config: self.config.unwrap_or_default(),
        }
    }
}

/// The main analyzer that orchestrates lint execution.
///
/// Use [`Analyzer::builder()`] to construct an instance.
pub struct Analyzer {
    rules: Vec<RuleBox>,
    config: Config,
}

impl Analyzer {
    /// Creates a new builder for configuring an analyzer.
    #[must_use]
    pub fn builder() -> AnalyzerBuilder {
        AnalyzerBuilder::new()
    }

    /// Returns the configuration in effect.
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns the number of registered rules.
    #[must_use]
    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    /// Analyzes every module of `provider` and returns the findings.
    ///
    /// Violations are ordered by module, then by rule registration order.
    ///
    /// # Errors
    ///
    /// Returns the first fatal error (ambiguous resolution, unreadable
    /// artifact or source); there is no partial result.
    pub fn analyze(&self, provider: &dyn BuildGraphProvider) -> Result<LintResult, AnalysisError> {
        let modules = provider.modules();
        info!(modules = modules.len(), "starting analysis");

        let mut graph = DependencyGraph::new(provider, &self.config);
        graph.initialize()?;

        let mut result = LintResult::new();
        for module in modules {
            if !self.config.module_settings(&module.id).enabled {
                debug!(module = %module.id, "skipping disabled module");
                continue;
            }
            let violations = self.analyze_module(&mut graph, module)?;
            result.violations.extend(violations);
            result.modules_checked += 1;
        }

        info!(
            violations = result.violations.len(),
            modules = result.modules_checked,
            "analysis complete"
        );
        Ok(result)
    }

    fn analyze_module(
        &self,
        graph: &mut DependencyGraph<'_>,
        module: &ModuleDescriptor,
    ) -> Result<Vec<Violation>, AnalysisError> {
        debug!(module = %module.id, "analyzing");
        let mut violations = Vec::new();
        for rule in &self.rules {
            if !self.config.is_rule_enabled(rule.name()) {
                debug!(rule = rule.name(), "skipping disabled rule");
                continue;
            }
            violations.extend(rule.check(graph, module)?);
        }
        Ok(violations)
    }
}
