use crate::error::EvaluationError;
use crate::models::{Presentation, PresentationDefinition};
use crate::result::ResultSink;

/// One step of an evaluation chain.
///
/// Handlers read the definition and presentation, never mutate them, and report every
/// outcome by appending records to `results`. An `Err` means the definition itself is
/// unusable; per-credential failures are records, not errors.
pub trait EvaluationHandler: Send + Sync {
    /// Name stamped into the `evaluator` member of every record.
    fn name(&self) -> &'static str;

    /// Runs the handler over the whole credential set.
    fn handle(
        &self,
        definition: &PresentationDefinition,
        presentation: &Presentation,
        results: &mut dyn ResultSink,
    ) -> Result<(), EvaluationError>;
}
