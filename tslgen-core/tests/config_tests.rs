//! Config loading error-message and path-resolution tests.

use assert_fs::prelude::*;
use predicates::prelude::predicate;
use tslgen_core::{ConfigError, GeneratorConfig};

// ---------------------------------------------------------------------------
// 1. Load error messages
// ---------------------------------------------------------------------------

#[test]
fn load_missing_config_returns_io_error_with_path() {
    let dir = assert_fs::TempDir::new().expect("tempdir");
    let path = dir.path().join("tslgen.yaml");
    let err = GeneratorConfig::load_at(&path).unwrap_err();
    assert!(matches!(err, ConfigError::Io { .. }), "got: {err}");
    assert!(err.to_string().contains("tslgen.yaml"));
}

#[test]
fn load_corrupt_yaml_returns_parse_error_with_path() {
    let dir = assert_fs::TempDir::new().expect("tempdir");
    let file = dir.child("tslgen.yaml");
    file.write_str(": : corrupt : yaml : !!!\n  - broken: [unclosed").expect("write");

    let err = GeneratorConfig::load_at(file.path()).unwrap_err();
    assert!(matches!(err, ConfigError::Parse { .. }), "got: {err}");
    let msg = err.to_string();
    assert!(msg.contains("tslgen.yaml"), "must contain file path, got: {msg}");
}

#[test]
fn load_wrong_type_yaml_returns_parse_error() {
    let dir = assert_fs::TempDir::new().expect("tempdir");
    let file = dir.child("tslgen.yaml");
    file.write_str("- this is a list, not a mapping\n").expect("write");

    let err = GeneratorConfig::load_at(file.path()).unwrap_err();
    assert!(matches!(err, ConfigError::Parse { .. }), "got: {err}");
}

// ---------------------------------------------------------------------------
// 2. Successful loads
// ---------------------------------------------------------------------------

#[test]
fn load_full_config() {
    let dir = assert_fs::TempDir::new().expect("tempdir");
    let file = dir.child("tslgen.yaml");
    file.write_str(
        "namespace: tuddbs\n\
         build_date: 2023-11-02\n\
         git:\n  version: v1.2.0\n  information:\n    - \"branch: main\"\n",
    )
    .expect("write");
    file.assert(predicate::path::exists());

    let cfg = GeneratorConfig::load_at(file.path()).expect("load");
    assert_eq!(cfg.namespace, "tuddbs");
    assert_eq!(cfg.year(), 2023);
    assert_eq!(cfg.git.version, "v1.2.0");
    assert_eq!(cfg.git.information, vec!["branch: main".to_string()]);
}

#[test]
fn relative_template_dir_resolves_against_config_location() {
    let dir = assert_fs::TempDir::new().expect("tempdir");
    let file = dir.child("conf").child("tslgen.yaml");
    file.write_str("template_dir: templates\n").expect("write");

    let cfg = GeneratorConfig::load_at(file.path()).expect("load");
    assert_eq!(
        cfg.template_dir.as_deref(),
        Some(dir.path().join("conf").join("templates").as_path())
    );
}

#[test]
fn load_or_default_without_path_uses_defaults() {
    let cfg = GeneratorConfig::load_or_default(None).expect("defaults");
    assert_eq!(cfg.namespace, "tsl");
    assert_eq!(
        cfg.include_guard(std::path::Path::new("vec/add.hpp")).as_str(),
        "TUD_D2RG_TSL_VEC_ADD_HPP"
    );
}
