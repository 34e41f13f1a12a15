use crate::path::PathNode;
use serde::{Deserialize, Deserializer, Serialize, Serializer, de::Error as DeError};
use serde_json::Value;

/// Severity of one handler outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    /// Requirement satisfied.
    Info,
    /// Advisory outcome that does not fail the requirement.
    Warn,
    /// Requirement not satisfied.
    Error,
}

/// Value a handler matched for one requirement.
#[derive(Debug, Clone, PartialEq)]
pub enum PayloadResult {
    /// Nothing was matched; serialized as `[]`.
    Empty,
    /// First node matched by the field path.
    Node(PathNode),
}

impl PayloadResult {
    /// Matched node, if any.
    pub fn node(&self) -> Option<&PathNode> {
        match self {
            Self::Empty => None,
            Self::Node(node) => Some(node),
        }
    }
}

impl Serialize for PayloadResult {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Self::Empty => serializer.collect_seq(std::iter::empty::<Value>()),
            Self::Node(node) => node.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for PayloadResult {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        match value {
            Value::Array(items) if items.is_empty() => Ok(Self::Empty),
            Value::Object(_) => serde_json::from_value(value)
                .map(Self::Node)
                .map_err(D::Error::custom),
            _ => Err(D::Error::custom(
                "payload result must be an empty array or a path node object",
            )),
        }
    }
}

/// Handler payload: the matched value and whether it satisfied the requirement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payload {
    /// Matched node, or `[]`.
    pub result: PayloadResult,
    /// Outcome of the check.
    pub valid: bool,
}

impl Payload {
    /// Nothing to match and nothing required.
    pub fn unconstrained() -> Self {
        Self {
            result: PayloadResult::Empty,
            valid: true,
        }
    }

    /// Required value was not found.
    pub fn missing() -> Self {
        Self {
            result: PayloadResult::Empty,
            valid: false,
        }
    }

    /// Value was found and checked.
    pub fn matched(node: PathNode, valid: bool) -> Self {
        Self {
            result: PayloadResult::Node(node),
            valid,
        }
    }
}

/// Address of an input descriptor inside the presentation definition.
pub fn input_descriptor_path(index: usize) -> String {
    format!("$.input_descriptors[{index}]")
}

/// Address of a credential inside the presentation.
pub fn verifiable_credential_path(index: usize) -> String {
    format!("$.verifiableCredential[{index}]")
}

/// One auditable outcome of an evaluation handler.
///
/// Records are immutable once produced; a handler only ever appends them to a
/// [`ResultSink`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HandlerCheckResult {
    /// `$.input_descriptors[i]`.
    pub input_descriptor_path: String,
    /// `$.verifiableCredential[j]`.
    pub verifiable_credential_path: String,
    /// Name of the handler that produced the record.
    pub evaluator: String,
    /// Severity.
    pub status: Status,
    /// Human-readable explanation.
    pub message: String,
    /// Optional handler payload.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<Payload>,
}

impl HandlerCheckResult {
    /// Creates a record for descriptor `descriptor_index` and credential `credential_index`.
    pub fn new(
        descriptor_index: usize,
        credential_index: usize,
        evaluator: impl Into<String>,
        status: Status,
        message: impl Into<String>,
        payload: Option<Payload>,
    ) -> Self {
        Self {
            input_descriptor_path: input_descriptor_path(descriptor_index),
            verifiable_credential_path: verifiable_credential_path(credential_index),
            evaluator: evaluator.into(),
            status,
            message: message.into(),
            payload,
        }
    }

    /// Informational record carrying `payload`.
    pub fn info(
        descriptor_index: usize,
        credential_index: usize,
        evaluator: impl Into<String>,
        message: impl Into<String>,
        payload: Payload,
    ) -> Self {
        Self::new(
            descriptor_index,
            credential_index,
            evaluator,
            Status::Info,
            message,
            Some(payload),
        )
    }

    /// Warning record carrying `payload`.
    pub fn warn(
        descriptor_index: usize,
        credential_index: usize,
        evaluator: impl Into<String>,
        message: impl Into<String>,
        payload: Payload,
    ) -> Self {
        Self::new(
            descriptor_index,
            credential_index,
            evaluator,
            Status::Warn,
            message,
            Some(payload),
        )
    }

    /// Error record carrying `payload`.
    pub fn error(
        descriptor_index: usize,
        credential_index: usize,
        evaluator: impl Into<String>,
        message: impl Into<String>,
        payload: Payload,
    ) -> Self {
        Self::new(
            descriptor_index,
            credential_index,
            evaluator,
            Status::Error,
            message,
            Some(payload),
        )
    }

    /// True unless the record is an error or its payload is marked invalid.
    pub fn is_valid(&self) -> bool {
        self.status != Status::Error && self.payload.as_ref().is_none_or(|payload| payload.valid)
    }
}

/// Append-only destination for handler outcomes.
pub trait ResultSink {
    /// Appends one record.
    fn push(&mut self, result: HandlerCheckResult);
}

impl ResultSink for Vec<HandlerCheckResult> {
    fn push(&mut self, result: HandlerCheckResult) {
        Vec::push(self, result);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::NodePath;
    use serde_json::json;

    #[test]
    fn unconstrained_payload_serializes_empty_result() {
        let record = HandlerCheckResult::info(
            2,
            5,
            "FilterEvaluation",
            "Input candidate valid for presentation submission",
            Payload::unconstrained(),
        );
        assert_eq!(
            serde_json::to_value(&record).unwrap(),
            json!({
                "input_descriptor_path": "$.input_descriptors[2]",
                "verifiable_credential_path": "$.verifiableCredential[5]",
                "evaluator": "FilterEvaluation",
                "status": "info",
                "message": "Input candidate valid for presentation submission",
                "payload": {"result": [], "valid": true}
            })
        );
    }

    #[test]
    fn matched_payload_round_trips() {
        let node: PathNode =
            serde_json::from_value(json!({"path": ["$", "credentialSubject", "age"], "value": 16}))
                .unwrap();
        let payload = Payload::matched(node.clone(), false);
        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(value["result"]["value"], json!(16));
        assert_eq!(value["valid"], json!(false));
        let parsed: Payload = serde_json::from_value(value).unwrap();
        assert_eq!(parsed.result.node(), Some(&node));
    }

    #[test]
    fn non_empty_array_result_is_rejected() {
        let parsed: Result<Payload, _> =
            serde_json::from_value(json!({"result": [1], "valid": false}));
        assert!(parsed.is_err());
    }

    #[test]
    fn validity_follows_status_and_payload() {
        let missing = HandlerCheckResult::error(0, 0, "FilterEvaluation", "missing", Payload::missing());
        assert!(!missing.is_valid());
        let node = PathNode {
            path: NodePath::root(),
            value: json!({}),
        };
        let warned = HandlerCheckResult::warn(0, 0, "Other", "advisory", Payload::matched(node, true));
        assert!(warned.is_valid());
    }
}
