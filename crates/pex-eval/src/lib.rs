#![doc = include_str!("../README.md")]
mod client;
mod config;
mod error;
mod filter;
mod filter_evaluation;
mod handler;
mod models;
mod path;
mod result;

pub use client::EvaluationClient;
pub use config::{EvaluationConfig, LogLevel};
pub use error::{ConfigError, EvaluationError, FilterError};
pub use filter::{DEFAULT_SCHEMA_CACHE_CAPACITY, FilterValidator, JsonSchemaFilter};
pub use filter_evaluation::{
    FILTER_EVALUATION, FilterEvaluationHandler, MESSAGE_FILTER_FAILED, MESSAGE_PATH_NOT_FOUND,
    MESSAGE_VALID, evaluate_filters,
};
pub use handler::EvaluationHandler;
pub use models::*;
pub use path::{
    ExtractError, JsonPath, NodePath, PathElement, PathError, PathNode, extract_input_field,
};
pub use pex_eval_tracing as tracing_backend;
pub use result::{
    HandlerCheckResult, Payload, PayloadResult, ResultSink, Status, input_descriptor_path,
    verifiable_credential_path,
};
