use serde::{Deserialize, Serialize};
use serde_json::Value;

/// DIF Presentation Exchange presentation definition.
///
/// Only the members read by the evaluation handlers are typed. Everything else is
/// kept in `extra` so the document round-trips unchanged.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PresentationDefinition {
    /// Definition identifier.
    pub id: String,
    /// Optional human-readable name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Optional verifier purpose.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub purpose: Option<String>,
    /// Requirements evaluated against every credential, addressed by position.
    pub input_descriptors: Vec<InputDescriptor>,
    /// Preserved unknown fields.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

/// One named requirement of a presentation definition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputDescriptor {
    /// Descriptor identifier.
    pub id: String,
    /// Optional human-readable name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Optional verifier purpose.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub purpose: Option<String>,
    /// Submission requirement groups this descriptor belongs to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<Vec<String>>,
    /// Optional field constraints.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub constraints: Option<Constraints>,
    /// Preserved unknown fields.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

impl InputDescriptor {
    /// Declared field constraints, empty when the descriptor is unconstrained.
    pub fn fields(&self) -> &[Field] {
        self.constraints
            .as_ref()
            .and_then(|constraints| constraints.fields.as_deref())
            .unwrap_or_default()
    }

    /// True when at least one field constraint is declared.
    pub fn has_fields(&self) -> bool {
        !self.fields().is_empty()
    }
}

/// Constraint block of an input descriptor.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Constraints {
    /// `required` or `preferred`; carried through, not interpreted here.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit_disclosure: Option<String>,
    /// Field constraints, each evaluated independently.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fields: Option<Vec<Field>>,
    /// Preserved unknown fields.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

/// One constrained data point inside a credential.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Field {
    /// Optional field identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Candidate JSONPath expressions, tried in order until one matches.
    pub path: Vec<String>,
    /// Optional verifier purpose.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub purpose: Option<String>,
    /// Optional JSON Schema applied to the first matched value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<Value>,
    /// Whether the verifier treats the field as optional.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub optional: Option<bool>,
    /// Preserved unknown fields.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

/// Presentation carrying the credential set under evaluation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Presentation {
    /// Credential documents, addressed by position.
    #[serde(rename = "verifiableCredential")]
    pub verifiable_credential: Vec<Value>,
    /// Preserved unknown fields.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

impl Presentation {
    /// Wraps bare credential documents.
    pub fn new(verifiable_credential: Vec<Value>) -> Self {
        Self {
            verifiable_credential,
            extra: serde_json::Map::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn descriptor_without_constraints_has_no_fields() {
        let descriptor: InputDescriptor = serde_json::from_value(json!({
            "id": "any",
            "schema": [{"uri": "https://www.w3.org/2018/credentials/v1"}]
        }))
        .unwrap();
        assert!(!descriptor.has_fields());
        assert!(descriptor.extra.contains_key("schema"));
    }

    #[test]
    fn empty_field_list_counts_as_unconstrained() {
        let descriptor: InputDescriptor = serde_json::from_value(json!({
            "id": "empty",
            "constraints": {"fields": []}
        }))
        .unwrap();
        assert!(!descriptor.has_fields());
    }

    #[test]
    fn presentation_reads_verifiable_credential_member() {
        let presentation: Presentation = serde_json::from_value(json!({
            "type": ["VerifiablePresentation"],
            "verifiableCredential": [{"id": "a"}, {"id": "b"}]
        }))
        .unwrap();
        assert_eq!(presentation.verifiable_credential.len(), 2);
        assert!(presentation.extra.contains_key("type"));
    }
}
