use crate::config::EvaluationConfig;
use crate::error::EvaluationError;
use crate::filter_evaluation::FilterEvaluationHandler;
use crate::handler::EvaluationHandler;
use crate::models::{Presentation, PresentationDefinition};
use crate::result::HandlerCheckResult;

/// Runs a chain of evaluation handlers and owns the records they produce.
///
/// Handlers run sequentially in registration order and share one append-only results
/// collection, so the final order is handler-major.
pub struct EvaluationClient {
    config: EvaluationConfig,
    handlers: Vec<Box<dyn EvaluationHandler>>,
    results: Vec<HandlerCheckResult>,
}

impl EvaluationClient {
    /// Creates a client with the handlers enabled by `config`.
    pub fn new(config: EvaluationConfig) -> Self {
        let mut handlers: Vec<Box<dyn EvaluationHandler>> = Vec::new();
        if config.filter_evaluation {
            handlers.push(Box::new(FilterEvaluationHandler::new()));
        }
        Self {
            config,
            handlers,
            results: Vec::new(),
        }
    }

    /// Appends a handler to the end of the chain.
    pub fn with_handler(mut self, handler: Box<dyn EvaluationHandler>) -> Self {
        self.handlers.push(handler);
        self
    }

    /// Names of the registered handlers, in execution order.
    pub fn handler_names(&self) -> Vec<&'static str> {
        self.handlers.iter().map(|handler| handler.name()).collect()
    }

    /// Active configuration.
    pub fn config(&self) -> &EvaluationConfig {
        &self.config
    }

    /// Evaluates `presentation` against `definition`.
    ///
    /// Previous results and buffered log lines are discarded first. On error, records appended before the
    /// failing handler aborted are kept and remain readable through [`Self::results`].
    pub fn evaluate(
        &mut self,
        definition: &PresentationDefinition,
        presentation: &Presentation,
    ) -> Result<&[HandlerCheckResult], EvaluationError> {
        pex_eval_tracing::begin();
        pex_eval_tracing::set_level(self.config.log_level.map(|level| level.to_tracing()));
        self.results.clear();
        for handler in &self.handlers {
            let before = self.results.len();
            if let Err(err) = handler.handle(definition, presentation, &mut self.results) {
                tracing::error!(evaluator = handler.name(), error = %err, "evaluation handler failed");
                return Err(err);
            }
            tracing::debug!(
                evaluator = handler.name(),
                records = self.results.len() - before,
                "evaluation handler completed"
            );
        }
        Ok(&self.results)
    }

    /// Records of the last evaluation.
    pub fn results(&self) -> &[HandlerCheckResult] {
        &self.results
    }

    /// Takes ownership of the records of the last evaluation.
    pub fn take_results(&mut self) -> Vec<HandlerCheckResult> {
        std::mem::take(&mut self.results)
    }
}

impl Default for EvaluationClient {
    fn default() -> Self {
        Self::new(EvaluationConfig::default())
    }
}
