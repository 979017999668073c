//! Tests for full StructureDefinition snapshot generation

use serde_json::{json, Value};
use snapgen_context::{BaseDefinitionRepository, InMemoryRepository};
use snapgen_snapshot::{
    extract_resource_type, generate_structure_definition_snapshot, ElementDefinition, Error,
    SnapshotMerger,
};

mod test_support;
use test_support::{find_by_id, load_json, patient_repository, snapshot_paths, CountingRepository};

fn patient_profile(elements: Value) -> Value {
    json!({
        "resourceType": "StructureDefinition",
        "id": "my-patient",
        "url": "http://example.org/fhir/StructureDefinition/MyPatient",
        "name": "MyPatient",
        "status": "draft",
        "baseDefinition": "http://hl7.org/fhir/StructureDefinition/Patient",
        "derivation": "constraint",
        "differential": { "element": elements }
    })
}

fn simple_repository() -> InMemoryRepository {
    InMemoryRepository::new().with(
        "Patient",
        vec![
            ElementDefinition::new("Patient"),
            ElementDefinition {
                min: 0.into(),
                max: "*".to_string().into(),
                ..ElementDefinition::new("Patient.name")
            },
        ],
    )
}

#[test]
fn test_generate_structure_definition_snapshot() {
    let repo = patient_repository();
    let profile = load_json("profile-patient-diff.json");

    let result = generate_structure_definition_snapshot(&profile, &repo)
        .expect("Should generate structure definition snapshot");

    assert_eq!(result["resourceType"], "StructureDefinition");
    assert_eq!(
        result["url"],
        "http://example.org/fhir/StructureDefinition/example-patient"
    );
    assert_eq!(result["status"], "draft");
    assert!(result.get("differential").is_none(), "Should not have differential");

    assert_eq!(
        snapshot_paths(&result),
        vec![
            "Patient",
            "Patient.active",
            "Patient.birthDate",
            "Patient.gender",
            "Patient.id",
            "Patient.identifier",
            "Patient.identifier",
            "Patient.name",
            "Patient.identifier.system",
            "Patient.name.family",
        ]
    );

    let identifier = find_by_id(&result, "Patient.identifier").unwrap();
    assert_eq!(identifier["min"], 1);
    assert_eq!(identifier["slicing"]["rules"], "open");
    assert_eq!(identifier["type"][0]["code"], "Identifier");

    let mrn = find_by_id(&result, "Patient.identifier:mrn").unwrap();
    assert_eq!(mrn["sliceName"], "mrn");
    assert_eq!(
        mrn["base"],
        json!({ "path": "Patient.identifier", "min": 1, "max": "1" })
    );

    let system = find_by_id(&result, "Patient.identifier:mrn.system").unwrap();
    assert_eq!(system["fixedUri"], "http://example.org/fhir/mrn");

    // binding replaced wholesale: the base description and bindingName extension are gone
    let gender = find_by_id(&result, "Patient.gender").unwrap();
    assert_eq!(
        gender["binding"],
        json!({ "strength": "extensible", "valueSet": "http://example.org/fhir/ValueSet/gender" })
    );
    assert_eq!(gender["short"], "male | female | other | unknown");
}

#[test]
fn test_first_element_is_resource_type() {
    let repo = patient_repository();
    let profile = load_json("profile-patient-diff.json");

    let result = generate_structure_definition_snapshot(&profile, &repo).unwrap();

    let expected = extract_resource_type(profile["baseDefinition"].as_str().unwrap());
    assert_eq!(snapshot_paths(&result)[0], expected);
}

#[test]
fn test_update_is_applied_to_fresh_copy() {
    let repo = simple_repository();
    let profile = patient_profile(json!([
        { "id": "Patient.name", "path": "Patient.name", "min": 1, "max": "1", "short": "x" }
    ]));

    let result = SnapshotMerger::new(&repo).generate_snapshot(&profile).unwrap();

    let name = find_by_id(&result, "Patient.name").unwrap();
    assert_eq!(name["min"], 1);
    assert_eq!(name["max"], "1");
    assert_eq!(name["short"], "x");
    assert!(name.get("base").is_none());

    let stored = repo.base_elements("Patient").unwrap().unwrap();
    assert_eq!(stored[1].min.as_value(), Some(&0));
    assert_eq!(stored[1].max.as_str(), Some("*"));
    assert!(stored[1].short.is_absent());
}

#[test]
fn test_synthesized_element_base() {
    let repo = simple_repository();
    let profile = patient_profile(json!([
        { "id": "Patient.birthDate", "path": "Patient.birthDate", "max": "1" }
    ]));

    let result = SnapshotMerger::new(&repo).generate_snapshot(&profile).unwrap();

    let birth_date = find_by_id(&result, "Patient.birthDate").unwrap();
    assert_eq!(
        birth_date["base"],
        json!({ "path": "Patient.birthDate", "min": 0, "max": "1" })
    );
}

#[test]
fn test_sort_order_independent_of_input_order() {
    let repo = InMemoryRepository::new().with("Patient", vec![ElementDefinition::new("Patient")]);
    let orders = [
        ["Patient.name.family", "Patient.name", "Patient"],
        ["Patient.name", "Patient", "Patient.name.family"],
        ["Patient", "Patient.name", "Patient.name.family"],
    ];

    for order in orders {
        let elements: Vec<Value> = order.iter().map(|p| json!({ "id": p, "path": p })).collect();
        let result = SnapshotMerger::new(&repo)
            .generate_snapshot(&patient_profile(Value::Array(elements)))
            .unwrap();

        assert_eq!(
            snapshot_paths(&result),
            vec!["Patient", "Patient.name", "Patient.name.family"]
        );
    }
}

#[test]
fn test_slice_is_never_merged_into_base_element() {
    let repo = simple_repository();
    let profile = patient_profile(json!([
        { "path": "Patient.name", "sliceName": "official", "min": 1 }
    ]));

    let result = SnapshotMerger::new(&repo).generate_snapshot(&profile).unwrap();

    let elements = result["snapshot"]["element"].as_array().unwrap();
    assert_eq!(elements.len(), 3);
    assert_eq!(elements[1]["min"], 0);
    assert!(elements[1].get("sliceName").is_none());
    assert_eq!(elements[2]["sliceName"], "official");
    assert_eq!(elements[2]["min"], 1);
}

#[test]
fn test_missing_differential_skips_lookup() {
    let repo = CountingRepository::new(simple_repository());
    let mut profile = patient_profile(json!([]));
    profile.as_object_mut().unwrap().remove("differential");

    let err = SnapshotMerger::new(&repo).generate_snapshot(&profile).unwrap_err();

    assert!(matches!(err, Error::MissingDifferential));
    assert_eq!(repo.calls(), 0);

    let mut profile = patient_profile(json!([]));
    profile["differential"] = json!({});
    let err = SnapshotMerger::new(&repo).generate_snapshot(&profile).unwrap_err();
    assert!(matches!(err, Error::MissingDifferential));
    assert_eq!(repo.calls(), 0);
}

#[test]
fn test_unknown_base_definition() {
    let repo = CountingRepository::new(simple_repository());
    let mut profile = patient_profile(json!([{ "path": "Observation.status" }]));
    profile["baseDefinition"] = json!("http://hl7.org/fhir/StructureDefinition/Observation");

    let err = SnapshotMerger::new(&repo).generate_snapshot(&profile).unwrap_err();

    assert!(matches!(err, Error::BaseDefinitionNotFound(ref t) if t == "Observation"));
    assert_eq!(repo.calls(), 1);
    assert_eq!(
        err.to_string(),
        "Base definition not found for resource type 'Observation'"
    );
}

#[test]
fn test_unrecognized_url_falls_back_to_domain_resource() {
    let repo = simple_repository();
    let mut profile = patient_profile(json!([{ "path": "Patient.name" }]));
    profile["baseDefinition"] = json!("http://example.org/fhir/base/patient-v2");

    let err = SnapshotMerger::new(&repo).generate_snapshot(&profile).unwrap_err();

    assert!(matches!(err, Error::BaseDefinitionNotFound(ref t) if t == "DomainResource"));
}

#[test]
fn test_base_with_mismatched_root_is_not_found() {
    let repo = InMemoryRepository::new().with(
        "Patient",
        vec![
            ElementDefinition::new("DomainResource"),
            ElementDefinition::new("Patient.name"),
        ],
    );
    let profile = patient_profile(json!([{ "path": "Patient.name" }]));

    let err = SnapshotMerger::new(&repo).generate_snapshot(&profile).unwrap_err();

    assert!(matches!(err, Error::BaseDefinitionNotFound(ref t) if t == "Patient"));
}

#[test]
fn test_generation_is_deterministic() {
    let repo = patient_repository();

    let first = generate_structure_definition_snapshot(&load_json("profile-patient-diff.json"), &repo)
        .unwrap();
    let second =
        generate_structure_definition_snapshot(&load_json("profile-patient-diff.json"), &repo)
            .unwrap();

    assert_eq!(
        serde_json::to_string(&first["snapshot"]["element"]).unwrap(),
        serde_json::to_string(&second["snapshot"]["element"]).unwrap()
    );
    assert_eq!(
        serde_json::to_string_pretty(&first).unwrap(),
        serde_json::to_string_pretty(&second).unwrap()
    );
}

#[test]
fn test_output_keeps_document_key_order() {
    let repo = patient_repository();
    let profile = load_json("profile-patient-diff.json");

    let result = generate_structure_definition_snapshot(&profile, &repo).unwrap();

    let mut expected: Vec<&str> = profile
        .as_object()
        .unwrap()
        .keys()
        .map(String::as_str)
        .filter(|k| *k != "differential")
        .collect();
    expected.push("snapshot");
    let actual: Vec<&str> = result.as_object().unwrap().keys().map(String::as_str).collect();
    assert_eq!(actual, expected);
}

#[test]
fn test_sparse_payloads_pass_through_unchanged() {
    let repo = patient_repository();
    let ext = json!([{ "url": "http://example.org/fhir/StructureDefinition/note", "valueString": "kept" }]);
    let slicing = json!({ "discriminator": [{ "type": "value", "path": "system", "extension": ext }] });
    let binding = json!({ "valueSet": "http://example.org/fhir/ValueSet/gender" });
    let mapping = json!([{ "identity": "v2", "map": "PID-8", "extension": ext }]);
    let base = json!({ "path": "Patient.gender", "min": 0, "max": "1", "extension": ext });
    let profile = patient_profile(json!([
        { "id": "Patient.identifier", "path": "Patient.identifier", "slicing": slicing },
        { "id": "Patient.gender", "path": "Patient.gender", "binding": binding, "mapping": mapping, "base": base }
    ]));

    let result = SnapshotMerger::new(&repo).generate_snapshot(&profile).unwrap();

    let identifier = find_by_id(&result, "Patient.identifier").unwrap();
    assert_eq!(identifier["slicing"], slicing);
    let gender = find_by_id(&result, "Patient.gender").unwrap();
    assert_eq!(gender["binding"], binding);
    assert_eq!(gender["mapping"], mapping);
    assert_eq!(gender["base"], base);
}

#[test]
fn test_explicit_null_overwrites_base_value() {
    let repo = patient_repository();
    let profile = patient_profile(json!([
        { "id": "Patient.gender", "path": "Patient.gender", "short": null, "binding": null }
    ]));

    let result = SnapshotMerger::new(&repo).generate_snapshot(&profile).unwrap();

    let gender = find_by_id(&result, "Patient.gender").unwrap();
    assert_eq!(gender.get("short"), Some(&Value::Null));
    assert_eq!(gender.get("binding"), Some(&Value::Null));
    assert_eq!(gender["type"], json!([{ "code": "code" }]));
}
