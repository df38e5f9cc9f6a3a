use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const ARTICLE_1: &str = "Двійковий або логарифмічний пошук знаходить елемент у відсортованому масиві.\n\
Кожен крок ділить проміжок навпіл.\n";
const ARTICLE_2: &str = "A linked list stores elements in nodes.\n\
An unrolled linked list keeps several elements per node to improve cache locality.\n";

fn write_fixture(dir: &Path, absent_in_second: &str) -> PathBuf {
    fs::write(dir.join("article1.txt"), ARTICLE_1).unwrap();
    fs::write(dir.join("article2.txt"), ARTICLE_2).unwrap();

    let config = format!(
        r#"
[benchmark]
repeats = 5
trials = 2

[[corpus]]
label = "Article 1"
path = "article1.txt"
present = [{{ label = "exists", pattern = "логарифмічний пошук" }}]
absent = [{{ label = "made up", pattern = "паралельний фотонний компілятор" }}]

[[corpus]]
label = "Article 2"
path = "article2.txt"
present = [{{ label = "exists", pattern = "unrolled linked list" }}]
absent = [{{ label = "made up", pattern = "{absent_in_second}" }}]
"#
    );
    let path = dir.join("bench.toml");
    fs::write(&path, config).unwrap();
    path
}

fn matchbench() -> Command {
    let mut cmd = Command::cargo_bin("matchbench").unwrap();
    cmd.env("NO_COLOR", "1");
    cmd
}

#[test]
fn run_prints_ranked_report() {
    let dir = TempDir::new().unwrap();
    let config = write_fixture(dir.path(), "parallel photonic compiler");

    matchbench()
        .arg("--config")
        .arg(&config)
        .arg("run")
        .arg("--no-progress")
        .assert()
        .success()
        .stdout(predicate::str::contains("Article 1 / pattern: exists"))
        .stdout(predicate::str::contains("Article 2 / pattern: made up"))
        .stdout(predicate::str::contains("Fastest for Article 1"))
        .stdout(predicate::str::contains("Fastest for Article 2"))
        .stdout(predicate::str::contains("Fastest overall (sum of 4 patterns)"));
}

#[test]
fn run_is_the_default_command() {
    let dir = TempDir::new().unwrap();
    let config = write_fixture(dir.path(), "parallel photonic compiler");

    matchbench()
        .arg("--config")
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::str::contains("Fastest overall"));
}

#[test]
fn preflight_failure_aborts_run() {
    let dir = TempDir::new().unwrap();
    // "linked list" does occur in the second article
    let config = write_fixture(dir.path(), "linked list");

    matchbench()
        .arg("--config")
        .arg(&config)
        .arg("run")
        .assert()
        .failure()
        .stdout(predicate::str::contains("Fastest").not())
        .stderr(predicate::str::contains("Pre-flight check failed"));
}

#[test]
fn json_report_written_to_file() {
    let dir = TempDir::new().unwrap();
    let config = write_fixture(dir.path(), "parallel photonic compiler");
    let output = dir.path().join("out/report.json");
    fs::create_dir_all(output.parent().unwrap()).unwrap();

    matchbench()
        .arg("--config")
        .arg(&config)
        .arg("run")
        .arg("--format")
        .arg("json")
        .arg("--algorithms")
        .arg("kmp,horspool")
        .arg("--output")
        .arg(&output)
        .assert()
        .success();

    let value: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
    assert_eq!(value["results"].as_array().unwrap().len(), 8);
    assert_eq!(value["trials"], 2);
}

#[test]
fn search_reports_location() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("article2.txt"), ARTICLE_2).unwrap();

    matchbench()
        .current_dir(dir.path())
        .arg("search")
        .arg("rabin-karp")
        .arg("unrolled")
        .arg("article2.txt")
        .assert()
        .success()
        .stdout(predicate::str::contains("Rabin-Karp"))
        .stdout(predicate::str::contains("article2.txt:2:4 (byte 43): An unrolled"));

    matchbench()
        .current_dir(dir.path())
        .arg("search")
        .arg("kmp")
        .arg("binary heap")
        .arg("article2.txt")
        .assert()
        .code(1)
        .stdout(predicate::str::contains("No match found"));
}

#[test]
fn init_config_writes_loadable_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("matchbench.toml");

    matchbench()
        .arg("init-config")
        .arg(&path)
        .assert()
        .success();
    let content = fs::read_to_string(&path).unwrap();
    assert!(content.contains("[[corpus]]"));
    assert!(content.contains("repeats = 300"));

    matchbench()
        .arg("init-config")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}
