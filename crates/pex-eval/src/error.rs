use crate::path::ExtractError;
use thiserror::Error;

/// Filter validation errors.
///
/// These indicate a malformed filter in the presentation definition, never a
/// credential that fails the filter.
#[derive(Debug, Error)]
pub enum FilterError {
    /// Filter is neither a JSON Schema object nor a boolean schema; rejected before
    /// compilation.
    #[error("filter must be a json schema object or boolean, found {found}")]
    SchemaNotObject { found: &'static str },
    /// Schema compilation failed.
    #[error("invalid filter schema: {source}")]
    InvalidSchema {
        #[source]
        source: jsonschema::ValidationError<'static>,
    },
}

/// Fatal errors raised while running an evaluation pass.
///
/// Missing properties and rejected values are reported as result records instead.
#[derive(Debug, Error)]
pub enum EvaluationError {
    /// A field path expression could not be parsed.
    #[error("input_descriptors[{descriptor_index}].constraints.fields[{field_index}]: {source}")]
    Path {
        descriptor_index: usize,
        field_index: usize,
        #[source]
        source: ExtractError,
    },
    /// A field filter could not be applied.
    #[error(
        "input_descriptors[{descriptor_index}].constraints.fields[{field_index}] has invalid filter: {source}"
    )]
    Filter {
        descriptor_index: usize,
        field_index: usize,
        #[source]
        source: FilterError,
    },
}

/// Evaluation configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Configuration JSON is invalid.
    #[error("evaluation config is not valid json")]
    Json {
        #[source]
        source: serde_json::Error,
    },
}
