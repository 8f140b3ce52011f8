use megam_join::{join_inputs, Input, JoinConfig, JoinError};
use std::fs;
use std::path::PathBuf;

/// Fresh scratch directory per test
fn setup_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("megam_join_scenarios_{}", name));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).expect("Failed to create test directory");
    dir
}

fn write_inputs(dir: &PathBuf, files: &[(&str, &str)]) -> Vec<Input> {
    files
        .iter()
        .map(|(name, text)| {
            let path = dir.join(name);
            fs::write(&path, text).expect("Failed to write input file");
            Input::Path(path)
        })
        .collect()
}

fn join_files(name: &str, config: JoinConfig, files: &[(&str, &str)]) -> Result<String, JoinError> {
    let dir = setup_dir(name);
    let inputs = write_inputs(&dir, files);
    let mut out = Vec::new();
    let result = join_inputs(&inputs, config, &mut out);
    let _ = fs::remove_dir_all(&dir);
    result?;
    Ok(String::from_utf8(out).expect("output should be UTF-8"))
}

/// Pair up `# key` lines with the label line after them
fn blocks(output: &str) -> Vec<(String, String)> {
    let lines: Vec<&str> = output.lines().collect();
    assert_eq!(lines.len() % 2, 0, "every header needs a label line: {:?}", lines);
    lines
        .chunks(2)
        .map(|pair| {
            let key = pair[0].strip_prefix("# ").expect("header line");
            assert!(!pair[1].starts_with('#'), "label line expected after {}", key);
            (key.to_string(), pair[1].to_string())
        })
        .collect()
}

#[test]
fn test_single_document_passes_through() {
    let output = join_files("single", JoinConfig::default(), &[("a.megam", "# doc1\n1\tfoo bar\n")]).unwrap();
    assert_eq!(output, "# doc1\n1\tfoo bar\n");
}

#[test]
fn test_same_document_in_two_files() {
    let output = join_files(
        "two_files",
        JoinConfig::default(),
        &[("a.megam", "# doc1\n1\ta b\n"), ("b.megam", "# doc1\n2\tc d\n")],
    )
    .unwrap();
    assert_eq!(output, "# doc1\n2\ta b c d\n");
}

#[test]
fn test_directives_dropped() {
    let output = join_files(
        "directives",
        JoinConfig::default(),
        &[("a.megam", "# doc1\nTEST\nDEV\n1\tx y\n")],
    )
    .unwrap();
    assert_eq!(output, "# doc1\n1\tx y\n");
}

#[test]
fn test_document_without_features_is_absent() {
    let output = join_files(
        "no_features",
        JoinConfig::default(),
        &[("a.megam", "# doc1\nnofeatureline\n")],
    )
    .unwrap();
    assert_eq!(output, "");
}

#[test]
fn test_disjoint_documents_both_present() {
    let output = join_files(
        "disjoint",
        JoinConfig::default(),
        &[("a.megam", "# doc1\n1\ta\n"), ("b.megam", "# doc2\n2\tb\n")],
    )
    .unwrap();
    let mut found = blocks(&output);
    found.sort();
    assert_eq!(
        found,
        vec![
            ("doc1".to_string(), "1\ta".to_string()),
            ("doc2".to_string(), "2\tb".to_string()),
        ]
    );
}

#[test]
fn test_headers_and_label_lines_pair_up() {
    let output = join_files(
        "bijection",
        JoinConfig::default(),
        &[
            ("a.megam", "# d1\n1\ta\n# d2\n0\tb\n# d3\nbroken\n# d1\n1\tc\n"),
            ("b.megam", "# d2\n1\te\nTEST\n# d4\n0\tf\n"),
        ],
    )
    .unwrap();

    let found = blocks(&output);
    let mut keys: Vec<&str> = found.iter().map(|(k, _)| k.as_str()).collect();
    keys.sort();
    let before = keys.len();
    keys.dedup();
    assert_eq!(before, keys.len(), "each document appears once");
    assert_eq!(keys, vec!["d1", "d2", "d4"]);
}

#[test]
fn test_single_file_round_trips() {
    let text = "# first\nspam\tw1 1 w2 1\n# second\nham\tw3 2\n# third\nspam\tw1 1\n";
    let output = join_files("identity", JoinConfig::default(), &[("a.megam", text)]).unwrap();
    assert_eq!(output, text);
}

#[test]
fn test_feature_line_before_header_fails() {
    let err = join_files(
        "missing_header",
        JoinConfig::default(),
        &[("a.megam", "1\tfoo\n# doc1\n1\tbar\n")],
    )
    .unwrap_err();
    match err {
        JoinError::MissingHeader(name, line) => {
            assert!(name.ends_with("a.megam"));
            assert_eq!(line, 1);
        }
        other => panic!("unexpected error: {}", other),
    }
}

#[test]
fn test_missing_input_fails_whole_join() {
    let dir = setup_dir("missing_input");
    let mut inputs = write_inputs(&dir, &[("a.megam", "# doc1\n1\ta\n")]);
    inputs.push(Input::Path(dir.join("not_there.megam")));

    let mut out = Vec::new();
    let err = join_inputs(&inputs, JoinConfig::default(), &mut out).unwrap_err();
    assert!(matches!(err, JoinError::Input(_, _)));
    assert!(out.is_empty(), "nothing should be written on failure");

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn test_carried_key_versus_isolated_inputs() {
    let files = [("a.megam", "# doc1\n1\ta\n"), ("b.megam", "2\tb\n")];

    let carried = join_files("carried", JoinConfig::default(), &files).unwrap();
    assert_eq!(carried, "# doc1\n2\ta b\n");

    let isolated = join_files("isolated", JoinConfig::default().isolate_inputs(true), &files);
    assert!(matches!(isolated, Err(JoinError::MissingHeader(_, 1))));
}

#[test]
fn test_common_only_output() {
    let output = join_files(
        "common",
        JoinConfig::default().common_only(true),
        &[
            ("a.megam", "# doc1\n1\ta\n# doc2\n0\tb\n"),
            ("b.megam", "# doc2\n1\tc\n"),
            ("c.megam", "# doc2\n1\td\n# doc1\n1\te\n"),
        ],
    )
    .unwrap();
    assert_eq!(output, "# doc2\n1\tb c d\n");
}
