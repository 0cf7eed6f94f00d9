//! Snapshot construction from files and directories, plus config discovery.

use go_motion::config::{self, ConfigError, CONFIG_FILE_NAME};
use go_motion::{ErrorKind, Format, Input, ParseError, ParserOptions, Query, Snapshot};
use std::fs;
use tempfile::TempDir;

const NESTED: &str = include_str!("../testdata/nested.go");
const EXTRA: &str = "package extra\n\ntype Extra int\n\nfunc Run() {}\n";

fn setup_tree() -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("nested.go"), NESTED).unwrap();
    fs::write(dir.path().join("README.md"), "not go").unwrap();
    fs::create_dir(dir.path().join("sub")).unwrap();
    fs::write(dir.path().join("sub").join("extra.go"), EXTRA).unwrap();
    dir
}

#[test]
fn file_positions_carry_the_path() {
    let dir = setup_tree();
    let path = dir.path().join("nested.go");
    let snapshot = Snapshot::from_file(&path, ParserOptions::default()).unwrap();

    let func = snapshot.next_func(0, 0).unwrap();
    assert_eq!(func.func_pos.filename, path.display().to_string());
    assert_eq!(func.to_string(), format!("{}:17:1 Walk", path.display()));
}

#[test]
fn directory_parse_is_shallow_by_default() {
    let dir = setup_tree();
    let snapshot = Snapshot::from_dir(dir.path(), ParserOptions::default()).unwrap();
    assert_eq!(snapshot.files().len(), 1);
    assert!(snapshot.files()[0].filename().ends_with("nested.go"));
}

#[test]
fn recursive_directory_parse_spans_files() {
    let dir = setup_tree();
    let options = ParserOptions {
        recursive: true,
        ..ParserOptions::default()
    };
    let snapshot = Snapshot::open(&Input::Dir(dir.path().to_path_buf()), options).unwrap();
    assert_eq!(snapshot.files().len(), 2);

    let result = snapshot
        .run(&Query::new("decls", 0).with_includes(["type", "func"]))
        .unwrap();
    let idents: Vec<&str> = result.decls.iter().map(|d| d.ident.as_str()).collect();
    assert_eq!(idents, vec!["Point", "Extra", "Walk", "String", "wait", "Run"]);
    assert!(result.decls[1].filename.ends_with("extra.go"));
}

#[test]
fn offset_queries_need_a_single_file() {
    let dir = setup_tree();
    let options = ParserOptions {
        recursive: true,
        ..ParserOptions::default()
    };
    let snapshot = Snapshot::from_dir(dir.path(), options).unwrap();
    let err = snapshot.run(&Query::new("enclosing", 1)).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidInput);
}

#[test]
fn directory_without_go_files() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("notes.txt"), "").unwrap();
    let err = Snapshot::from_dir(dir.path(), ParserOptions::default()).unwrap_err();
    assert!(matches!(err, ParseError::NoGoFiles { .. }));
}

#[test]
fn missing_file_is_an_io_error() {
    let dir = TempDir::new().unwrap();
    let err = Snapshot::from_file(dir.path().join("gone.go"), ParserOptions::default())
        .unwrap_err();
    assert!(matches!(err, ParseError::Io { .. }));
}

#[test]
fn syntax_error_reports_location() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.go");
    fs::write(&path, "package broken\n\nfunc f( {\n}\n").unwrap();
    let err = Snapshot::from_file(&path, ParserOptions::default()).unwrap_err();

    match err {
        ParseError::SyntaxError { filename, line, .. } => {
            assert_eq!(filename, path.display().to_string());
            assert_eq!(line, 3);
        }
        other => panic!("expected syntax error, got {other:?}"),
    }
}

#[test]
fn src_bytes_use_the_default_filename() {
    let snapshot = Snapshot::open(
        &Input::Src(EXTRA.as_bytes().to_vec()),
        ParserOptions::default(),
    )
    .unwrap();
    assert_eq!(snapshot.files()[0].filename(), "src.go");
}

#[test]
fn config_is_discovered_in_the_working_directory() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join(CONFIG_FILE_NAME),
        "parse_comments = false\nformat = \"plain\"\nincludes = [\"type\", \"func\"]\n",
    )
    .unwrap();

    let config = config::load(None, Some(dir.path())).unwrap();
    assert!(!config.parse_comments);
    assert_eq!(config.format, Format::Plain);
    assert_eq!(config.includes, vec!["type", "func"]);
}

#[test]
fn explicit_config_path_must_exist() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("missing.toml");
    let err = config::load(Some(missing.as_path()), Some(dir.path())).unwrap_err();
    assert!(matches!(err, ConfigError::Io { .. }));
}

#[test]
fn invalid_config_names_the_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("motion.toml");
    fs::write(&path, "includes = [\"const\"]\n").unwrap();

    let err = config::load_from_path(&path).unwrap_err();
    assert!(matches!(err, ConfigError::Validation { path: Some(_), .. }));
    assert!(err.to_string().contains("unknown include 'const'"));
}

#[test]
fn discovered_config_errors_name_the_candidate() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(CONFIG_FILE_NAME);
    fs::write(&path, "format = [\"vim\"\n").unwrap();

    let err = config::load(None, Some(dir.path())).unwrap_err();
    assert!(matches!(&err, ConfigError::Toml { path: Some(found), .. } if *found == path));
    let message = err.to_string();
    assert!(message.starts_with(&format!("{} is not a valid motion config: ", path.display())));
}
