use pex_eval::{
    EvaluationClient, EvaluationConfig, EvaluationError, EvaluationHandler, FILTER_EVALUATION,
    HandlerCheckResult, MESSAGE_FILTER_FAILED, Payload, Presentation, PresentationDefinition,
    ResultSink, Status,
};
use serde_json::{Value, json};

fn definition() -> PresentationDefinition {
    serde_json::from_value(json!({
        "id": "employment",
        "purpose": "Verify employment and age",
        "input_descriptors": [
            {
                "id": "employee",
                "constraints": {"fields": [{
                    "path": ["$.credentialSubject.employer"],
                    "filter": {"type": "string", "enum": ["ACME", "Globex"]}
                }]}
            },
            {"id": "any"}
        ]
    }))
    .unwrap()
}

fn presentation() -> Presentation {
    serde_json::from_value(json!({
        "@context": ["https://www.w3.org/2018/credentials/v1"],
        "type": ["VerifiablePresentation"],
        "verifiableCredential": [
            {"credentialSubject": {"employer": "ACME"}},
            {"credentialSubject": {"employer": "Initech"}}
        ]
    }))
    .unwrap()
}

/// Flags every credential that carries no `proof`.
struct ProofPresenceHandler;

impl EvaluationHandler for ProofPresenceHandler {
    fn name(&self) -> &'static str {
        "ProofPresence"
    }

    fn handle(
        &self,
        definition: &PresentationDefinition,
        presentation: &Presentation,
        results: &mut dyn ResultSink,
    ) -> Result<(), EvaluationError> {
        for (credential_index, credential) in presentation.verifiable_credential.iter().enumerate()
        {
            for descriptor_index in 0..definition.input_descriptors.len() {
                if credential.get("proof").is_none_or(Value::is_null) {
                    results.push(HandlerCheckResult::warn(
                        descriptor_index,
                        credential_index,
                        self.name(),
                        "credential carries no proof",
                        Payload::missing(),
                    ));
                }
            }
        }
        Ok(())
    }
}

#[test]
fn default_client_runs_filter_evaluation() {
    let mut client = EvaluationClient::default();
    assert_eq!(client.handler_names(), vec![FILTER_EVALUATION]);

    let results = client.evaluate(&definition(), &presentation()).unwrap();
    assert_eq!(results.len(), 4);
    assert_eq!(results[0].status, Status::Info);
    assert_eq!(results[1].status, Status::Info);
    assert_eq!(results[2].status, Status::Error);
    assert_eq!(results[2].message, MESSAGE_FILTER_FAILED);
    assert_eq!(results[2].verifiable_credential_path, "$.verifiableCredential[1]");
    assert_eq!(results[3].input_descriptor_path, "$.input_descriptors[1]");
}

#[test]
fn handlers_append_in_registration_order() {
    let mut client =
        EvaluationClient::new(EvaluationConfig::default()).with_handler(Box::new(ProofPresenceHandler));
    assert_eq!(client.handler_names(), vec![FILTER_EVALUATION, "ProofPresence"]);

    let results = client.evaluate(&definition(), &presentation()).unwrap();
    let evaluators: Vec<&str> = results.iter().map(|record| record.evaluator.as_str()).collect();
    assert_eq!(
        evaluators,
        vec![
            FILTER_EVALUATION,
            FILTER_EVALUATION,
            FILTER_EVALUATION,
            FILTER_EVALUATION,
            "ProofPresence",
            "ProofPresence",
            "ProofPresence",
            "ProofPresence",
        ]
    );
    assert!(results[4..].iter().all(|record| record.status == Status::Warn));
}

#[test]
fn disabled_filter_evaluation_registers_no_handler() {
    let config = EvaluationConfig::from_json_str(r#"{"filter_evaluation": false}"#).unwrap();
    let mut client = EvaluationClient::new(config);
    assert!(client.handler_names().is_empty());
    assert!(client.evaluate(&definition(), &presentation()).unwrap().is_empty());
}

#[test]
fn each_evaluation_starts_from_empty_results() {
    let mut client = EvaluationClient::default();
    client.evaluate(&definition(), &presentation()).unwrap();
    let first = client.results().to_vec();
    client.evaluate(&definition(), &presentation()).unwrap();
    assert_eq!(client.results(), first.as_slice());

    let taken = client.take_results();
    assert_eq!(taken, first);
    assert!(client.results().is_empty());
}

#[test]
fn fatal_error_keeps_partial_results() {
    let broken: PresentationDefinition = serde_json::from_value(json!({
        "id": "broken",
        "input_descriptors": [
            {"id": "any"},
            {"id": "bad", "constraints": {"fields": [{"path": ["$.a[(@.length - 1)]"]}]}}
        ]
    }))
    .unwrap();

    let mut client = EvaluationClient::default();
    let err = client.evaluate(&broken, &presentation()).unwrap_err();
    assert!(matches!(
        err,
        EvaluationError::Path {
            descriptor_index: 1,
            field_index: 0,
            ..
        }
    ));
    assert!(err.to_string().contains("script expressions"));
    assert_eq!(client.results().len(), 1);
}

#[test]
fn filter_expression_paths_produce_records() {
    let definition: PresentationDefinition = serde_json::from_value(json!({
        "id": "degree",
        "input_descriptors": [{
            "id": "master",
            "constraints": {"fields": [{
                "path": ["$.credentialSubject.degrees[?(@.type == 'MasterDegree')].name"],
                "filter": {"type": "string", "const": "Logic"}
            }]}
        }]
    }))
    .unwrap();
    let presentation = Presentation::new(vec![
        json!({"credentialSubject": {"degrees": [
            {"type": "BachelorDegree", "name": "Mathematics"},
            {"type": "MasterDegree", "name": "Logic"}
        ]}}),
        json!({"credentialSubject": {"degrees": [
            {"type": "BachelorDegree", "name": "Logic"}
        ]}}),
    ]);

    let mut client = EvaluationClient::default();
    let results = client.evaluate(&definition, &presentation).unwrap();
    assert_eq!(results.len(), 2);
    assert_eq!(results[0].status, Status::Info);
    let node = results[0]
        .payload
        .as_ref()
        .and_then(|payload| payload.result.node())
        .unwrap();
    assert_eq!(node.path.to_string(), "$['credentialSubject']['degrees'][1]['name']");
    assert_eq!(results[1].status, Status::Error);
    assert_eq!(results[1].payload, Some(Payload::missing()));
}
