use crate::error::FilterError;
use rustc_hash::FxHashMap;
use serde_json::Value;
use spin::Mutex;
use std::sync::Arc;

/// Predicate applied to a value matched by a field path.
pub trait FilterValidator: Send + Sync {
    /// Returns whether `value` satisfies `filter`.
    ///
    /// Errors are reserved for filters that cannot be applied at all.
    fn validate(&self, filter: &Value, value: &Value) -> Result<bool, FilterError>;
}

impl<T: FilterValidator + ?Sized> FilterValidator for Arc<T> {
    fn validate(&self, filter: &Value, value: &Value) -> Result<bool, FilterError> {
        (**self).validate(filter, value)
    }
}

/// Number of compiled schemas kept by [`JsonSchemaFilter::new`].
pub const DEFAULT_SCHEMA_CACHE_CAPACITY: usize = 256;

/// JSON Schema backed filter validation.
///
/// Schemas without a `$schema` keyword are compiled as draft-07; schemas that name
/// their dialect are compiled against it.
///
/// Compiled validators are cached by the canonical text of their schema, so a field
/// filter is compiled once no matter how many credentials it is applied to. The cache
/// lives as long as the filter and is emptied whenever it reaches its capacity, or
/// on [`JsonSchemaFilter::clear_cache`].
pub struct JsonSchemaFilter {
    compiled: Mutex<FxHashMap<String, Arc<jsonschema::Validator>>>,
    capacity: usize,
}

impl JsonSchemaFilter {
    /// Creates a validator with an empty schema cache of
    /// [`DEFAULT_SCHEMA_CACHE_CAPACITY`] entries.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_SCHEMA_CACHE_CAPACITY)
    }

    /// Creates a validator that keeps at most `capacity` compiled schemas (minimum one).
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            compiled: Mutex::new(FxHashMap::default()),
            capacity: capacity.max(1),
        }
    }

    /// Number of compiled schemas currently cached.
    pub fn cached_schemas(&self) -> usize {
        self.compiled.lock().len()
    }

    /// Drops every compiled schema.
    pub fn clear_cache(&self) {
        self.compiled.lock().clear();
    }

    fn compile(&self, filter: &Value) -> Result<Arc<jsonschema::Validator>, FilterError> {
        match filter {
            Value::Object(_) | Value::Bool(_) => {}
            other => {
                return Err(FilterError::SchemaNotObject {
                    found: json_type_name(other),
                });
            }
        }

        let key = filter.to_string();
        if let Some(validator) = self.compiled.lock().get(&key) {
            return Ok(Arc::clone(validator));
        }

        let declares_draft = filter
            .as_object()
            .is_some_and(|schema| schema.contains_key("$schema"));
        let compiled = if declares_draft {
            jsonschema::validator_for(filter)
        } else {
            jsonschema::options()
                .with_draft(jsonschema::Draft::Draft7)
                .build(filter)
        };
        let validator = compiled
            .map(Arc::new)
            .map_err(|err| FilterError::InvalidSchema {
                source: err.to_owned(),
            })?;

        let mut cache = self.compiled.lock();
        if cache.len() >= self.capacity {
            tracing::debug!(capacity = self.capacity, "schema cache full, clearing");
            cache.clear();
        }
        cache.insert(key, Arc::clone(&validator));
        Ok(validator)
    }
}

impl Default for JsonSchemaFilter {
    fn default() -> Self {
        Self::new()
    }
}

impl FilterValidator for JsonSchemaFilter {
    fn validate(&self, filter: &Value, value: &Value) -> Result<bool, FilterError> {
        let validator = self.compile(filter)?;
        Ok(validator.is_valid(value))
    }
}

impl std::fmt::Debug for JsonSchemaFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JsonSchemaFilter")
            .field("cached_schemas", &self.cached_schemas())
            .field("capacity", &self.capacity)
            .finish()
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
