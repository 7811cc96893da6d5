//! Integration tests for loading, merging and querying stores

use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;
use typecfg::config::global;
use typecfg::{ConfigError, Sources, Store, ValueKind};

fn write(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("mkdir");
    }
    fs::write(&path, content).expect("write");
    path
}

fn sample_store(tmp: &TempDir) -> Store {
    write(tmp, "net/defaults.cfg", "string HOST = \"localhost\"\nint PORT = 80\n");
    let root = write(
        tmp,
        "app.cfg",
        r#"# application settings
use "net/defaults.cfg"
string HOST = "example.com"     # overrides the include
string URL = "http://$HOST/path"
string PRICE = "cost: $5"
int X = 42
hex Y = 0x1F
octal Z = 017
float RATIO = 0.5
bool DEBUG = 0
char SEP = ','
"#,
    );
    Store::open(root).expect("store")
}

#[test]
fn test_round_trip_numeric_literals() {
    let tmp = TempDir::new().expect("tmp");
    let store = sample_store(&tmp);
    assert_eq!(store.get_int("X").unwrap(), 42);
    assert_eq!(store.get_int("Y").unwrap(), 31);
    assert_eq!(store.get_int("Z").unwrap(), 15);
    assert_eq!(store.get_int("PORT").unwrap(), 80);
    assert_eq!(store.get_float("RATIO").unwrap(), 0.5);
    assert!(!store.get_bool("DEBUG").unwrap());
    assert_eq!(store.get_char("SEP").unwrap(), ',');
}

#[test]
fn test_variable_expansion() {
    let tmp = TempDir::new().expect("tmp");
    let store = sample_store(&tmp);
    assert_eq!(store.get_string("URL").unwrap(), "http://example.com/path");
    assert_eq!(store.get_string("PRICE").unwrap(), "cost: $5");
    assert_eq!(store.expand("$HOST:8080").unwrap(), "example.com:8080");
}

#[test]
fn test_include_redefinition_warns() {
    let tmp = TempDir::new().expect("tmp");
    let store = sample_store(&tmp);
    let names: Vec<&str> = store.warnings().iter().map(|w| w.name()).collect();
    assert_eq!(names, vec!["HOST"]);
}

#[test]
fn test_every_other_getter_mismatches() {
    let tmp = TempDir::new().expect("tmp");
    let store = sample_store(&tmp);

    let stored = [
        ("X", ValueKind::Int),
        ("RATIO", ValueKind::Float),
        ("DEBUG", ValueKind::Bool),
        ("SEP", ValueKind::Char),
        ("HOST", ValueKind::String),
    ];
    for (name, kind) in stored {
        let attempts = [
            (ValueKind::Int, store.get_int(name).err()),
            (ValueKind::Float, store.get_float(name).err()),
            (ValueKind::Bool, store.get_bool(name).err()),
            (ValueKind::Char, store.get_char(name).err()),
            (ValueKind::String, store.get_string(name).err()),
        ];
        for (requested, err) in attempts {
            if requested == kind {
                assert!(err.is_none(), "{name} as {requested}");
                continue;
            }
            match err {
                Some(ConfigError::TypeMismatch { expected, found, .. }) => {
                    assert_eq!(expected, requested);
                    assert_eq!(found, kind);
                }
                other => panic!("{name} as {requested}: {other:?}"),
            }
        }
    }
}

#[test]
fn test_lookup_error_messages() {
    let tmp = TempDir::new().expect("tmp");
    let store = sample_store(&tmp);

    let missing = store.get_int("DOES_NOT_EXIST").unwrap_err();
    assert!(matches!(missing, ConfigError::NotFound { .. }));
    insta::assert_snapshot!(missing.to_string(), @"could not find configuration variable DOES_NOT_EXIST");

    let mismatch = store.get_int("HOST").unwrap_err();
    insta::assert_snapshot!(
        mismatch.to_string(),
        @"incompatible type for configuration variable HOST: looked for int, but found string"
    );
}

#[test]
fn test_define_error_messages() {
    let tmp = TempDir::new().expect("tmp");
    let root = write(&tmp, "empty.cfg", "# nothing\n");

    let err = Store::build(Sources::new(&root).with_define("N", "int", "4x")).unwrap_err();
    insta::assert_snapshot!(
        err.to_string(),
        @r#"syntax error when parsing user-set configuration variable N: invalid value format "4x" for type int"#
    );

    let err = Store::build(Sources::new(&root).with_define("N", "integer", "4")).unwrap_err();
    insta::assert_snapshot!(
        err.to_string(),
        @"syntax error when parsing user-set configuration variable N: invalid type name integer"
    );
}

#[test]
fn test_override_files_then_defines() {
    let tmp = TempDir::new().expect("tmp");
    let root = write(&tmp, "root.cfg", "int A = 1\nint B = 1\nint C = 1\n");
    let first = write(&tmp, "first.cfg", "int B = 2\nint C = 2\n");
    let second = write(&tmp, "second.cfg", "int C = 3\n");

    let sources = Sources::new(&root)
        .with_file(&first)
        .with_define("A", "int", "9")
        .with_file(&second);
    let store = Store::build(sources).expect("store");

    assert_eq!(store.get_int("A").unwrap(), 9);
    assert_eq!(store.get_int("B").unwrap(), 2);
    assert_eq!(store.get_int("C").unwrap(), 3);
    // B and C from first.cfg, C again from second.cfg.
    assert_eq!(store.warnings().len(), 3);
}

#[test]
fn test_reload_twice_is_idempotent() {
    let tmp = TempDir::new().expect("tmp");
    let store = sample_store(&tmp);
    let first = store.reload().expect("reload");
    let second = first.reload().expect("reload");
    similar_asserts::assert_eq!(first.table(), second.table());
    similar_asserts::assert_eq!(store.table(), first.table());
}

#[test]
fn test_load_error_leaves_no_store() {
    let tmp = TempDir::new().expect("tmp");
    let root = write(&tmp, "root.cfg", "int A = 1\nuse \"broken.cfg\"\n");
    write(&tmp, "broken.cfg", "int B = 2\nfloat C = fast\n");

    match Store::open(&root).unwrap_err() {
        ConfigError::InvalidValueFormat { origin, text, .. } => {
            assert!(origin.to_string().contains("broken.cfg at line 2"));
            assert_eq!(text, "fast");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_global_store_requires_init() {
    global::refresh();
    // `init` is never called in this test binary.
    assert!(matches!(global::get(), Err(ConfigError::NotInitialized)));
}
