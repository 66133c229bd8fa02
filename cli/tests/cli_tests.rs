use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use pretty_assertions::assert_eq;
use tempfile::TempDir;

const SAMPLE: &str = "A B C\nB A D\nC A E\nD B\nE C\n";

fn dfs_viz(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_dfs-viz"))
        .current_dir(dir)
        .env_remove("DFS_VIZ_INPUT")
        .env_remove("DFS_VIZ_OUTPUT")
        .env_remove("RUST_LOG")
        .args(args)
        .output()
        .unwrap()
}

fn workspace_with(name: &str, contents: &str) -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join(name), contents).unwrap();
    dir
}

fn stderr(out: &Output) -> String {
    String::from_utf8_lossy(&out.stderr).into_owned()
}

#[test]
fn defaults_read_graph_txt_and_write_output_txt() {
    let dir = workspace_with("graph.txt", SAMPLE);
    let out = dfs_viz(dir.path(), &[]);

    assert!(out.status.success(), "stderr: {}", stderr(&out));
    assert!(String::from_utf8_lossy(&out.stdout).contains("DFS visualization saved to output.txt"));
    assert_eq!(
        fs::read_to_string(dir.path().join("output.txt")).unwrap(),
        "A -> B, C\nB -> D\nC -> E\nD ->\nE ->\n"
    );
}

#[test]
fn dot_output_contains_only_tree_edges() {
    let dir = workspace_with("in.txt", SAMPLE);
    let out = dfs_viz(
        dir.path(),
        &["--input", "in.txt", "--output", "tree.dot", "--format", "dot"],
    );
    assert!(out.status.success(), "stderr: {}", stderr(&out));

    let dot = fs::read_to_string(dir.path().join("tree.dot")).unwrap();
    assert!(dot.starts_with("digraph {\n"));
    assert!(dot.ends_with("}\n"));
    let edges: Vec<&str> = dot.lines().filter(|l| l.contains("->")).map(str::trim).collect();
    assert_eq!(
        edges,
        vec![
            "\"A\" -> \"B\";",
            "\"A\" -> \"C\";",
            "\"B\" -> \"D\";",
            "\"C\" -> \"E\";",
        ]
    );
}

#[test]
fn rerun_is_byte_identical() {
    let dir = workspace_with("graph.txt", "1 2 3\n2 4\n3 4 1\n4 2\n9\n");
    assert!(dfs_viz(dir.path(), &["--output", "first.txt"]).status.success());
    assert!(dfs_viz(dir.path(), &["--output", "second.txt"]).status.success());
    assert_eq!(
        fs::read(dir.path().join("first.txt")).unwrap(),
        fs::read(dir.path().join("second.txt")).unwrap()
    );
}

#[test]
fn disconnected_node_still_listed() {
    let dir = workspace_with("graph.txt", "A B\nB A\nLONELY\n");
    let out = dfs_viz(dir.path(), &[]);
    assert!(out.status.success(), "stderr: {}", stderr(&out));
    assert_eq!(
        fs::read_to_string(dir.path().join("output.txt")).unwrap(),
        "A -> B\nB ->\nLONELY ->\n"
    );
}

#[test]
fn start_and_direction_flags() {
    let dir = workspace_with("graph.txt", "A B\nC A\n");
    let out = dfs_viz(dir.path(), &["--start", "B", "--direction", "both"]);
    assert!(out.status.success(), "stderr: {}", stderr(&out));
    assert_eq!(
        fs::read_to_string(dir.path().join("output.txt")).unwrap(),
        "A -> C\nB -> A\nC ->\n"
    );
}

#[test]
fn print_order_lists_discovery_sequence() {
    let dir = workspace_with("graph.txt", SAMPLE);

    let quiet = dfs_viz(dir.path(), &[]);
    assert!(!String::from_utf8_lossy(&quiet.stdout).contains("traversal order"));

    let out = dfs_viz(dir.path(), &["--print-order"]);
    assert!(out.status.success(), "stderr: {}", stderr(&out));
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.lines().any(|l| l == "DFS traversal order: A, B, D, C, E"));
}

#[test]
fn duplicate_json_record_is_parse_error() {
    let dir = workspace_with("graph.json", "{\"A\": [\"B\"],\n \"A\": [\"C\"]}");
    let out = dfs_viz(dir.path(), &["--input", "graph.json"]);
    assert_eq!(out.status.code(), Some(1));
    assert!(stderr(&out).contains("line 2: duplicate record for node \"A\""));
    assert!(!dir.path().join("output.txt").exists());
}

#[test]
fn json_input_by_extension() {
    let dir = workspace_with("graph.json", r#"{"1": [2, 3], "2": [1], "3": [1]}"#);
    let out = dfs_viz(dir.path(), &["--input", "graph.json"]);
    assert!(out.status.success(), "stderr: {}", stderr(&out));
    assert_eq!(
        fs::read_to_string(dir.path().join("output.txt")).unwrap(),
        "1 -> 2, 3\n2 ->\n3 ->\n"
    );
}

#[test]
fn missing_input_exits_nonzero() {
    let dir = tempfile::tempdir().unwrap();
    let out = dfs_viz(dir.path(), &["--input", "nope.txt"]);
    assert_eq!(out.status.code(), Some(1));
    assert!(stderr(&out).contains("input file not found"));
    assert!(!dir.path().join("output.txt").exists());
}

#[test]
fn unknown_format_is_usage_error() {
    let dir = workspace_with("graph.txt", SAMPLE);
    let out = dfs_viz(dir.path(), &["--format", "svg"]);
    assert_eq!(out.status.code(), Some(2));
    assert!(stderr(&out).contains("svg"));
    assert!(!dir.path().join("output.txt").exists());
}

#[test]
fn duplicate_record_is_parse_error() {
    let dir = workspace_with("graph.txt", "A B\nA C\n");
    let out = dfs_viz(dir.path(), &[]);
    assert_eq!(out.status.code(), Some(1));
    assert!(stderr(&out).contains("line 2"));
}

#[test]
fn unknown_start_node_fails() {
    let dir = workspace_with("graph.txt", SAMPLE);
    let out = dfs_viz(dir.path(), &["--start", "Q"]);
    assert_eq!(out.status.code(), Some(1));
    assert!(stderr(&out).contains("start node \"Q\" not found"));
}

#[test]
fn dangling_neighbor_warns_or_fails_when_strict() {
    let dir = workspace_with("graph.txt", "A B C\nB A\n");

    let lenient = dfs_viz(dir.path(), &[]);
    assert!(lenient.status.success());
    assert!(stderr(&lenient).contains("no adjacency record"));

    let strict = dfs_viz(dir.path(), &["--strict", "--output", "strict.txt"]);
    assert_eq!(strict.status.code(), Some(1));
    assert!(stderr(&strict).contains("\"C\""));
    assert!(!dir.path().join("strict.txt").exists());
}

#[test]
fn empty_graph_fails() {
    let dir = workspace_with("graph.txt", "\n# only a comment\n");
    let out = dfs_viz(dir.path(), &[]);
    assert_eq!(out.status.code(), Some(1));
    assert!(stderr(&out).contains("graph is empty"));
}
