use std::path::PathBuf;

use contract_guard_core::{ArgumentSpec, TypeDescriptor, TypeSpec, curry};
use contract_guard_registry::{
    ContractFile, ContractRegistry, FunctionContract, RegistryError, RegistrySource,
};
use serde_json::json;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn temp_path(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("cg_registry_{name}_{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

const FUNKY_YAML: &str = r#"version: "1.0"
functions:
  - name: funky
    description: Builds a job result
    arguments:
      - name: type
        types: [String]
      - name: ret
        types: [Object, String]
      - name: obj
        types: [Object]
"#;

fn funky_contract() -> FunctionContract {
    FunctionContract::new(
        "funky",
        vec![
            ArgumentSpec::new("type", TypeSpec::new([TypeDescriptor::STRING]).unwrap()),
            ArgumentSpec::new(
                "ret",
                TypeSpec::new([TypeDescriptor::OBJECT, TypeDescriptor::STRING]).unwrap(),
            ),
            ArgumentSpec::new("obj", TypeSpec::new([TypeDescriptor::OBJECT]).unwrap()),
        ],
    )
}

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

#[test]
fn test_load_yaml_registry_and_validate_calls() {
    let dir = temp_path("yaml");
    let path = dir.join("contracts.yml");
    std::fs::write(&path, FUNKY_YAML).unwrap();

    let registry = ContractRegistry::load(&path).unwrap();
    assert_eq!(registry.len(), 1);
    assert_eq!(registry.source(), &RegistrySource::File(path.clone()));

    let funky = registry
        .wrap("funky", curry(3, |_| json!({"good": "job"})))
        .unwrap();
    let err = funky
        .call([json!(null), json!(1), json!(null)])
        .unwrap_err();
    assert_eq!(
        err.messages(),
        [
            "Function funky, Requires type as one of String, but got null",
            "Function funky, Requires ret as one of Object, String, but got 1",
            "Function funky, Requires obj as one of Object, but got null",
        ]
    );

    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn test_save_and_reload_json() {
    let dir = temp_path("json");
    let path = dir.join("contracts.json");

    let mut file = ContractFile::default();
    file.functions.push(funky_contract());
    file.save(&path).unwrap();

    let raw: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(raw["functions"][0]["arguments"][1]["types"], json!(["Object", "String"]));

    let loaded = ContractFile::load(&path).unwrap();
    assert_eq!(loaded, file);

    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn test_save_and_reload_yaml() {
    let dir = temp_path("yaml_save");
    let path = dir.join("contracts.yaml");

    let mut file = ContractFile::default();
    file.functions.push(funky_contract());
    file.save(&path).unwrap();

    let loaded = ContractFile::load(&path).unwrap();
    assert_eq!(loaded.find("funky"), Some(&funky_contract()));

    std::fs::remove_dir_all(&dir).ok();
}

// ---------------------------------------------------------------------------
// Failures
// ---------------------------------------------------------------------------

#[test]
fn test_load_missing_file() {
    let err = ContractRegistry::load("/nonexistent/contracts.yml").unwrap_err();
    assert!(matches!(err, RegistryError::IoError(_)));
}

#[test]
fn test_load_rejects_duplicate_functions() {
    let dir = temp_path("dup");
    let path = dir.join("contracts.yml");
    let yaml = r#"version: "1.0"
functions:
  - name: f
  - name: f
"#;
    std::fs::write(&path, yaml).unwrap();

    let err = ContractRegistry::load(&path).unwrap_err();
    assert!(matches!(err, RegistryError::DuplicateFunction(name) if name == "f"));

    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn test_load_rejects_unknown_type() {
    let dir = temp_path("unknown_type");
    let path = dir.join("contracts.yml");
    let yaml = r#"version: "1.0"
functions:
  - name: f
    arguments:
      - name: a
        types: [Date]
"#;
    std::fs::write(&path, yaml).unwrap();

    let err = ContractRegistry::load(&path).unwrap_err();
    assert!(matches!(err, RegistryError::YamlError(_)));
    assert!(err.to_string().contains("unknown type name: Date"));

    std::fs::remove_dir_all(&dir).ok();
}
