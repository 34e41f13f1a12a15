use crate::error::EvaluationError;
use crate::filter::{FilterValidator, JsonSchemaFilter};
use crate::handler::EvaluationHandler;
use crate::models::{Field, Presentation, PresentationDefinition};
use crate::path::extract_input_field;
use crate::result::{HandlerCheckResult, Payload, ResultSink, Status};
use serde_json::Value;

/// Evaluator name of [`FilterEvaluationHandler`].
pub const FILTER_EVALUATION: &str = "FilterEvaluation";

/// Message of records whose requirement is satisfied.
pub const MESSAGE_VALID: &str = "Input candidate valid for presentation submission";
/// Message of records whose field paths matched nothing.
pub const MESSAGE_PATH_NOT_FOUND: &str = "Input candidate failed to find jsonpath property";
/// Message of records whose matched value was rejected by the field filter.
pub const MESSAGE_FILTER_FAILED: &str = "Input candidate failed filter evaluation";

/// Checks every input descriptor's field constraints against every credential.
///
/// For each credential (outer loop) and each descriptor (inner loop), an unconstrained
/// descriptor yields one passing record; otherwise each field yields exactly one record:
///
/// - no path matched: error, `{result: [], valid: false}`
/// - first match rejected by the filter: error, `{result: <node>, valid: false}`
/// - first match accepted, or no filter: info, `{result: <node>, valid: true}`
///
/// Only the first matched node is filtered, even when the path matches several.
pub struct FilterEvaluationHandler {
    validator: Box<dyn FilterValidator>,
}

impl FilterEvaluationHandler {
    /// Creates a handler backed by [`JsonSchemaFilter`].
    pub fn new() -> Self {
        Self::with_validator(Box::new(JsonSchemaFilter::new()))
    }

    /// Creates a handler backed by a custom filter validator.
    pub fn with_validator(validator: Box<dyn FilterValidator>) -> Self {
        Self { validator }
    }

    fn evaluate_field(
        &self,
        descriptor_index: usize,
        credential_index: usize,
        field_index: usize,
        field: &Field,
        credential: &Value,
    ) -> Result<HandlerCheckResult, EvaluationError> {
        let matches = extract_input_field(credential, &field.path).map_err(|source| {
            EvaluationError::Path {
                descriptor_index,
                field_index,
                source,
            }
        })?;

        let Some(node) = matches.into_iter().next() else {
            return Ok(HandlerCheckResult::error(
                descriptor_index,
                credential_index,
                FILTER_EVALUATION,
                MESSAGE_PATH_NOT_FOUND,
                Payload::missing(),
            ));
        };

        let accepted = match &field.filter {
            Some(filter) => self
                .validator
                .validate(filter, &node.value)
                .map_err(|source| EvaluationError::Filter {
                    descriptor_index,
                    field_index,
                    source,
                })?,
            None => true,
        };

        let record = if accepted {
            HandlerCheckResult::info(
                descriptor_index,
                credential_index,
                FILTER_EVALUATION,
                MESSAGE_VALID,
                Payload::matched(node, true),
            )
        } else {
            HandlerCheckResult::error(
                descriptor_index,
                credential_index,
                FILTER_EVALUATION,
                MESSAGE_FILTER_FAILED,
                Payload::matched(node, false),
            )
        };
        Ok(record)
    }
}

impl Default for FilterEvaluationHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for FilterEvaluationHandler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FilterEvaluationHandler").finish_non_exhaustive()
    }
}

impl EvaluationHandler for FilterEvaluationHandler {
    fn name(&self) -> &'static str {
        FILTER_EVALUATION
    }

    fn handle(
        &self,
        definition: &PresentationDefinition,
        presentation: &Presentation,
        results: &mut dyn ResultSink,
    ) -> Result<(), EvaluationError> {
        let mut emitted = 0usize;
        let mut failed = 0usize;

        for (credential_index, credential) in presentation.verifiable_credential.iter().enumerate() {
            for (descriptor_index, descriptor) in definition.input_descriptors.iter().enumerate() {
                let fields = descriptor.fields();
                if fields.is_empty() {
                    tracing::trace!(
                        input_descriptor_id = %descriptor.id,
                        descriptor_index,
                        credential_index,
                        "descriptor has no field constraints"
                    );
                    results.push(HandlerCheckResult::info(
                        descriptor_index,
                        credential_index,
                        FILTER_EVALUATION,
                        MESSAGE_VALID,
                        Payload::unconstrained(),
                    ));
                    emitted += 1;
                    continue;
                }

                for (field_index, field) in fields.iter().enumerate() {
                    let record = self
                        .evaluate_field(
                            descriptor_index,
                            credential_index,
                            field_index,
                            field,
                            credential,
                        )
                        .inspect_err(|err| {
                            tracing::error!(error = %err, "filter evaluation aborted");
                        })?;
                    let matched_path = record
                        .payload
                        .as_ref()
                        .and_then(|payload| payload.result.node())
                        .map(|node| node.path.to_string())
                        .unwrap_or_default();
                    tracing::debug!(
                        input_descriptor_path = %record.input_descriptor_path,
                        verifiable_credential_path = %record.verifiable_credential_path,
                        field_index,
                        matched_path = %matched_path,
                        outcome = %record.message,
                        "field evaluated"
                    );
                    if record.status == Status::Error {
                        failed += 1;
                    }
                    results.push(record);
                    emitted += 1;
                }
            }
        }

        tracing::debug!(
            descriptors = definition.input_descriptors.len(),
            credentials = presentation.verifiable_credential.len(),
            emitted,
            failed,
            "filter evaluation finished"
        );
        Ok(())
    }
}

/// Runs [`FilterEvaluationHandler`] on its own and returns the records it produced.
pub fn evaluate_filters(
    definition: &PresentationDefinition,
    presentation: &Presentation,
) -> Result<Vec<HandlerCheckResult>, EvaluationError> {
    let mut results = Vec::new();
    FilterEvaluationHandler::new().handle(definition, presentation, &mut results)?;
    Ok(results)
}
