//! End-to-end tests for the nexustools binary.

use assert_cmd::Command;
use predicates::prelude::*;

fn nexustools() -> Command {
    Command::cargo_bin("nexustools").expect("binary should exist")
}

// ─── sql ───

#[test]
fn test_sql_formats_stdin() {
    nexustools()
        .args(["sql", "-"])
        .write_stdin("SELECT a,b FROM t WHERE a=1")
        .assert()
        .success()
        .stdout("SELECT\n  a,\n  b\nFROM\n  t\nWHERE\n  a = 1\n");
}

#[test]
fn test_sql_minify() {
    nexustools()
        .args(["sql", "--minify", "-"])
        .write_stdin("SELECT  a ,\n b\nFROM t")
        .assert()
        .success()
        .stdout("SELECT a,b FROM t\n");
}

#[test]
fn test_sql_empty_input_prints_nothing() {
    nexustools()
        .args(["sql", "-"])
        .write_stdin("   \n ")
        .assert()
        .success()
        .stdout("");
}

#[test]
fn test_sql_check_unformatted_exits_one() {
    nexustools()
        .args(["sql", "--check", "-"])
        .write_stdin("SELECT a FROM t")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("would reformat"));
}

#[test]
fn test_sql_check_formatted_exits_zero() {
    nexustools()
        .args(["sql", "--check", "-"])
        .write_stdin("SELECT\n  a\nFROM\n  t")
        .assert()
        .success();
}

#[test]
fn test_sql_diff_marks_changes() {
    nexustools()
        .args(["sql", "--diff", "-"])
        .write_stdin("select a from t")
        .assert()
        .success()
        .stdout(predicate::str::contains("-select a from t"))
        .stdout(predicate::str::contains("+SELECT"));
}

#[test]
fn test_sql_no_uppercase_keywords() {
    nexustools()
        .args(["sql", "--no-uppercase-keywords", "-"])
        .write_stdin("select a")
        .assert()
        .success()
        .stdout("select\n  a\n");
}

#[test]
fn test_sql_reads_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("query.sql");
    std::fs::write(&path, "SELECT 1").unwrap();
    nexustools()
        .arg("sql")
        .arg(&path)
        .assert()
        .success()
        .stdout("SELECT\n  1\n");
}

#[test]
fn test_sql_missing_file_exits_two() {
    nexustools()
        .args(["sql", "/nonexistent/query.sql"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("failed to read"));
}

// ─── json ───

#[test]
fn test_json_sorted_pretty() {
    nexustools()
        .args(["json", "--sort-keys", "-"])
        .write_stdin("{\"b\":1,\"a\":2}")
        .assert()
        .success()
        .stdout("{\n  \"a\": 2,\n  \"b\": 1\n}\n");
}

#[test]
fn test_json_compact() {
    nexustools()
        .args(["json", "--indent", "0", "-"])
        .write_stdin("{ \"a\": [1, 2] }")
        .assert()
        .success()
        .stdout("{\"a\":[1,2]}\n");
}

#[test]
fn test_json_invalid_exits_two() {
    nexustools()
        .args(["json", "-"])
        .write_stdin("{oops}")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("invalid JSON"));
}

// ─── regex ───

#[test]
fn test_regex_meta_only() {
    nexustools()
        .args(["regex", "--meta", "(?<year>\\d{4})-(\\d{2})"])
        .assert()
        .success()
        .stdout(predicate::str::contains("capturing groups: 2"))
        .stdout(predicate::str::contains("named groups: year"));
}

#[test]
fn test_regex_matches() {
    nexustools()
        .args(["regex", "(?<year>\\d{4})-(?<month>\\d{2})", "-"])
        .write_stdin("2024-05")
        .assert()
        .success()
        .stdout(predicate::str::contains("matches: 1"))
        .stdout(predicate::str::contains("0: 2024-05"))
        .stdout(predicate::str::contains("year: 2024"))
        .stdout(predicate::str::contains("month: 05"));
}

#[test]
fn test_regex_max_matches_cap() {
    nexustools()
        .args(["regex", "--max-matches", "2", "\\d", "-"])
        .write_stdin("123456")
        .assert()
        .success()
        .stdout(predicate::str::contains("matches: 2"));
}

#[test]
fn test_regex_invalid_pattern_exits_two() {
    nexustools()
        .args(["regex", "(", "-"])
        .write_stdin("text")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("invalid regex"));
}

// ─── case / dict / stats ───

#[test]
fn test_case_upper() {
    nexustools()
        .args(["case", "upper_case", "-"])
        .write_stdin("hello")
        .assert()
        .success()
        .stdout("HELLO\n");
}

#[test]
fn test_case_space_to_camel() {
    nexustools()
        .args(["case", "space_to_camel", "-"])
        .write_stdin("hello world")
        .assert()
        .success()
        .stdout("helloWorld\n");
}

#[test]
fn test_case_with_dictionary_file() {
    let dir = tempfile::tempdir().unwrap();
    let dict = dir.path().join("dict.txt");
    std::fs::write(&dict, "OpenAI\nAPI\n").unwrap();
    nexustools()
        .arg("case")
        .arg("word_case")
        .arg("--dictionary")
        .arg(&dict)
        .arg("-")
        .write_stdin("openai api demo")
        .assert()
        .success()
        .stdout("OpenAI API Demo\n");
}

#[test]
fn test_dict_prints_canonical_entries() {
    nexustools()
        .args(["dict", "-"])
        .write_stdin("iPhone\nIPHONE, api;API")
        .assert()
        .success()
        .stdout("iPhone\napi\n");
}

#[test]
fn test_stats() {
    nexustools()
        .args(["stats", "-"])
        .write_stdin("hello world")
        .assert()
        .success()
        .stdout(predicate::str::contains("chars: 11"))
        .stdout(predicate::str::contains("words: 2"))
        .stdout(predicate::str::contains("lines: 1"));
}

// ─── config ───

#[test]
fn test_config_file_sets_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("nexustools.toml");
    std::fs::write(&config, "[sql]\nuppercase_keywords = false\n").unwrap();
    nexustools()
        .arg("--config")
        .arg(&config)
        .args(["sql", "-"])
        .write_stdin("select a")
        .assert()
        .success()
        .stdout("select\n  a\n");
}

#[test]
fn test_missing_config_exits_two() {
    nexustools()
        .args(["--config", "/nonexistent/nexustools.toml", "sql", "-"])
        .write_stdin("select 1")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Config file not found"));
}
