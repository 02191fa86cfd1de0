use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const SAMPLE: &str = "Username,Comment\n\
a,great video!!\n\
b,\"terrible, waste of time\"\n\
c,ok\n\
d,first\n\
e,??\n\
f,I really enjoyed this deep dive\n";

struct Workspace {
    dir: TempDir,
    config: PathBuf,
}

impl Workspace {
    /// Workspace whose lexicon and comment store live in the temp dir
    fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let root = dir.path().display().to_string();
        let config = dir.path().join("config.toml");
        fs::write(
            &config,
            format!(
                "[lexicon]\ndata_dir = '{root}/lexicon'\n\n\
                 [storage]\ncomments_dir = '{root}/comments'\n\n\
                 [youtube]\napi_key_env = 'YCA_TEST_UNSET_KEY'\n"
            ),
        )
        .unwrap();
        Self { dir, config }
    }

    fn path(&self) -> &Path {
        self.dir.path()
    }

    fn write(&self, name: &str, content: &str) -> PathBuf {
        let path = self.path().join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, content).unwrap();
        path
    }

    fn yca(&self) -> Command {
        self.yca_with(&self.config)
    }

    fn yca_with(&self, config: &Path) -> Command {
        let mut cmd = Command::cargo_bin("yca").unwrap();
        cmd.current_dir(self.path())
            .env_remove("YCA_TEST_UNSET_KEY")
            .env_remove("YCA_CONFIG")
            .arg("--no-color")
            .arg("--config")
            .arg(config);
        cmd
    }
}

fn json_stdout(output: &[u8]) -> serde_json::Value {
    serde_json::from_slice(output).expect("stdout is JSON")
}

#[test]
fn test_help() {
    Command::cargo_bin("yca")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("analyze"))
        .stdout(predicate::str::contains("fetch"));
}

#[test]
fn test_analyze_sample_as_json() {
    let ws = Workspace::new();
    let csv = ws.write("comments.csv", SAMPLE);

    let output = ws
        .yca()
        .args(["analyze", "--format", "json"])
        .arg(&csv)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let json = json_stdout(&output);
    assert_eq!(json["summary"]["num_positive"], 1);
    assert_eq!(json["summary"]["num_negative"], 1);
    assert_eq!(json["summary"]["num_irrelevant"], 4);
    assert_eq!(json["summary"]["total_analyzed"], 6);
    assert_eq!(json["shares"]["irrelevant"], 66.7);
    assert!(ws.path().join("lexicon/vader_lexicon.txt").exists());
}

#[test]
fn test_analyze_text_summary() {
    let ws = Workspace::new();
    let csv = ws.write("comments.csv", SAMPLE);

    ws.yca()
        .arg("analyze")
        .arg(&csv)
        .assert()
        .success()
        .stdout(predicate::str::contains("Total Comments"))
        .stdout(predicate::str::contains("66.7%"));
}

#[test]
fn test_analyze_lists_verdicts() {
    let ws = Workspace::new();
    let csv = ws.write("comments.csv", SAMPLE);

    ws.yca()
        .args(["analyze", "--list"])
        .arg(&csv)
        .assert()
        .success()
        .stdout(predicate::str::contains("off-topic (too short)"))
        .stdout(predicate::str::contains("I really enjoyed this deep dive"));
}

#[test]
fn test_analyze_markdown_to_file() {
    let ws = Workspace::new();
    let csv = ws.write("comments.csv", SAMPLE);
    let out = ws.path().join("reports/summary.md");

    ws.yca()
        .args(["analyze", "--format", "markdown", "--output"])
        .arg(&out)
        .arg(&csv)
        .assert()
        .success()
        .stderr(predicate::str::contains("Report written to"));

    let md = fs::read_to_string(out).unwrap();
    assert!(md.contains("# Comment Sentiment Report"));
    assert!(md.contains("| 6 | 1 | 1 | 4 |"));
}

#[test]
fn test_bom_and_padding_match_clean_input() {
    let ws = Workspace::new();
    let clean = ws.write("clean.csv", "Username,Comment\na,this video is great\n");
    let noisy = ws.write(
        "noisy.csv",
        "\u{feff}Username,Comment\n  a  ,   this video is great   \n",
    );

    let run = |path: &Path| {
        let output = ws
            .yca()
            .args(["analyze", "--format", "json"])
            .arg(path)
            .assert()
            .success()
            .get_output()
            .stdout
            .clone();
        json_stdout(&output)["summary"].clone()
    };
    assert_eq!(run(&clean), run(&noisy));
}

#[test]
fn test_empty_input_reports_no_comments() {
    let ws = Workspace::new();
    let csv = ws.write("empty.csv", "Username,Comment\nx,   \n");

    let output = ws
        .yca()
        .args(["analyze", "--format", "json"])
        .arg(&csv)
        .assert()
        .success()
        .stderr(predicate::str::contains("No comments to analyze"))
        .get_output()
        .stdout
        .clone();
    assert_eq!(json_stdout(&output)["summary"]["total_analyzed"], 0);
}

#[test]
fn test_zero_byte_file_is_empty_input() {
    let ws = Workspace::new();
    let empty = ws.write("empty.csv", "");
    let bom_only = ws.write("bom.csv", "\u{feff}");

    for csv in [empty, bom_only] {
        let output = ws
            .yca()
            .args(["analyze", "--format", "json"])
            .arg(&csv)
            .assert()
            .success()
            .stderr(predicate::str::contains("No comments to analyze"))
            .get_output()
            .stdout
            .clone();
        let summary = &json_stdout(&output)["summary"];
        assert_eq!(summary["num_positive"], 0);
        assert_eq!(summary["num_negative"], 0);
        assert_eq!(summary["num_irrelevant"], 0);
        assert_eq!(summary["total_analyzed"], 0);
    }
}

#[test]
fn test_json_output_written_to_file() {
    let ws = Workspace::new();
    let csv = ws.write("comments.csv", SAMPLE);

    ws.yca()
        .args(["analyze", "--format", "json", "--output"])
        .arg(ws.path().join("out/report"))
        .arg(&csv)
        .assert()
        .success()
        .stderr(predicate::str::contains("report.json"));

    let json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(ws.path().join("out/report.json")).unwrap())
            .unwrap();
    assert_eq!(json["summary"]["total_analyzed"], 6);
    assert!(!ws.path().join("out/report.tmp").exists());
}

#[test]
fn test_missing_lexicon_is_fatal() {
    let ws = Workspace::new();
    let missing = ws.path().join("nope.txt");
    let config = ws.write(
        "missing-lexicon.toml",
        &format!("[lexicon]\npath = '{}'\n", missing.display()),
    );
    let csv = ws.write("comments.csv", SAMPLE);

    ws.yca_with(&config)
        .arg("analyze")
        .arg(&csv)
        .assert()
        .failure()
        .stderr(predicate::str::contains("No sentiment lexicon available"))
        .stderr(predicate::str::contains("No comments to analyze").not());
    assert!(!missing.exists());
}

#[test]
fn test_missing_input_file() {
    let ws = Workspace::new();
    ws.yca()
        .args(["analyze", "absent.csv"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read comments"));
}

#[test]
fn test_analyze_stored_video_without_api_key() {
    let ws = Workspace::new();
    ws.write("comments/dQw4w9WgXcQ.csv", SAMPLE);

    let output = ws
        .yca()
        .args([
            "analyze",
            "--format",
            "json",
            "--video",
            "https://youtu.be/dQw4w9WgXcQ",
        ])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let json = json_stdout(&output);
    assert_eq!(json["video_id"], "dQw4w9WgXcQ");
    assert_eq!(json["summary"]["total_analyzed"], 6);
    assert!(json.get("channel").is_none());
}

#[test]
fn test_analyze_unfetched_video_needs_api_key() {
    let ws = Workspace::new();
    ws.yca()
        .args(["analyze", "--video", "dQw4w9WgXcQ"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("YCA_TEST_UNSET_KEY"));
}

#[test]
fn test_fetch_rejects_bad_link() {
    let ws = Workspace::new();
    ws.yca()
        .args(["fetch", "https://example.com/watch?v=nope"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid video link or id"));
}

#[test]
fn test_fetch_without_api_key() {
    let ws = Workspace::new();
    ws.yca()
        .args(["fetch", "dQw4w9WgXcQ"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("YCA_TEST_UNSET_KEY"));
}

#[test]
fn test_lexicon_install_and_status() {
    let ws = Workspace::new();
    let expected = ws.path().join("lexicon").join("vader_lexicon.txt");

    ws.yca()
        .args(["lexicon", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains(expected.display().to_string()));

    ws.yca()
        .args(["lexicon", "install"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Lexicon installed"));
    assert!(expected.exists());

    let output = ws
        .yca()
        .args(["lexicon", "status", "--json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let status = json_stdout(&output);
    assert_eq!(status["installed"], true);
    assert_eq!(status["managed"], true);
    assert!(status["entries"].as_u64().unwrap() > 0);
}

#[test]
fn test_config_show_and_validate() {
    let ws = Workspace::new();
    ws.yca()
        .args(["config", "show", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("max_off_topic_tokens"));

    ws.yca()
        .args(["config", "validate"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration is valid"));
}

#[test]
fn test_config_validate_rejects_bad_page_size() {
    let ws = Workspace::new();
    let bad = ws.write("bad.toml", "[youtube]\npage_size = 500\n");
    ws.yca_with(&bad)
        .args(["config", "validate"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("page_size"));
}
