//! End-to-end CLI integration tests.
//!
//! These tests verify the complete CLI workflow by:
//! 1. Creating a temporary maildir and configuration
//! 2. Running cvsmail commands
//! 3. Verifying the recorded changes and maildir state

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const FRESHCVS_MESSAGE: &str = "\
From: itamar CVS <itamar@twistedmatrix.com>
To: twisted-commits@twistedmatrix.com
Subject: [Twisted-commits] fix the reactor

Modified files:
Twisted/twisted/internet/default.py 1.1 1.2

Log message:
fix the reactor


ViewCVS links:
http://example.com/viewcvs
";

const BONSAI_MESSAGE: &str = "\
From: bonsai-daemon@example.com
Subject: checkin

C|1071099907|stephend|/cvs|dir|file.py|1.2|||18|7
LOGCOMMENT
msg
:ENDLOGCOMMENT
";

fn cvsmail(dir: &Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_cvsmail"));
    cmd.current_dir(dir).env_remove("RUST_LOG").env_remove("CVSMAIL_CONFIG");
    cmd
}

/// Creates a maildir under `dir` holding the given messages in `new/`.
fn create_maildir(dir: &Path, name: &str, messages: &[(&str, &str)]) {
    let root = dir.join(name);
    for sub in ["new", "cur", "tmp"] {
        fs::create_dir_all(root.join(sub)).expect("failed to create maildir");
    }
    for (file, content) in messages {
        fs::write(root.join("new").join(file), content).expect("failed to write message");
    }
}

fn write_config(dir: &Path, sources: &str) {
    let config = format!("[store]\npath = \"changes.jsonl\"\n\n{sources}");
    fs::write(dir.join("cvsmail.toml"), config).expect("failed to write config");
}

#[test]
fn test_init_creates_config() {
    let temp_dir = TempDir::new().unwrap();
    let dir = temp_dir.path();

    cvsmail(dir)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Created cvsmail.toml"));

    let content = fs::read_to_string(dir.join("cvsmail.toml")).expect("failed to read config");
    assert!(content.contains("[[sources]]"));
    assert!(content.contains("kind = \"freshcvs\""));
}

#[test]
fn test_init_force_overwrites() {
    let temp_dir = TempDir::new().unwrap();
    let dir = temp_dir.path();
    fs::write(dir.join("cvsmail.toml"), "# old config\n").unwrap();

    cvsmail(dir)
        .arg("init")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--force"));

    cvsmail(dir).args(["init", "--force"]).assert().success();

    let content = fs::read_to_string(dir.join("cvsmail.toml")).unwrap();
    assert!(!content.contains("# old config"));
}

#[test]
fn test_parse_prints_json() {
    let temp_dir = TempDir::new().unwrap();
    let dir = temp_dir.path();
    fs::write(dir.join("msg"), FRESHCVS_MESSAGE).unwrap();

    cvsmail(dir)
        .args(["parse", "msg", "--kind", "freshcvs", "--prefix", "Twisted/"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"author\": \"itamar\""))
        .stdout(predicate::str::contains("\"twisted/internet/default.py\""))
        .stdout(predicate::str::contains("\"comment\": \"fix the reactor\\n\""));
}

#[test]
fn test_parse_warns_about_prefix_without_slash() {
    let temp_dir = TempDir::new().unwrap();
    let dir = temp_dir.path();
    fs::write(dir.join("msg"), FRESHCVS_MESSAGE).unwrap();

    cvsmail(dir)
        .args(["parse", "msg", "--kind", "freshcvs", "--prefix", "Twisted"])
        .assert()
        .success()
        .stderr(predicate::str::contains("does not end with '/'"))
        .stdout(predicate::str::contains("\"/twisted/internet/default.py\""));
}

#[test]
fn test_parse_bonsai() {
    let temp_dir = TempDir::new().unwrap();
    let dir = temp_dir.path();
    fs::write(dir.join("msg"), BONSAI_MESSAGE).unwrap();

    cvsmail(dir)
        .args(["parse", "msg", "-k", "bonsai"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"when\": 1071099907"))
        .stdout(predicate::str::contains("\"dir/file.py\""));
}

#[test]
fn test_parse_wrong_kind_fails() {
    let temp_dir = TempDir::new().unwrap();
    let dir = temp_dir.path();
    fs::write(dir.join("msg"), FRESHCVS_MESSAGE).unwrap();

    cvsmail(dir)
        .args(["parse", "msg", "--kind", "bonsai"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not a Bonsai notification"));
}

#[test]
fn test_parse_missing_file() {
    let temp_dir = TempDir::new().unwrap();

    cvsmail(temp_dir.path())
        .args(["parse", "nope", "--kind", "syncmail"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read"));
}

#[test]
fn test_sources_lists_descriptions() {
    let temp_dir = TempDir::new().unwrap();
    let dir = temp_dir.path();
    write_config(
        dir,
        "[[sources]]\nname = \"twisted\"\nkind = \"freshcvs\"\nmaildir = \"/var/mail/twisted\"\nprefix = \"Twisted/\"\n",
    );

    cvsmail(dir)
        .arg("sources")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "twisted: FreshCVS mailing list in maildir /var/mail/twisted (prefix Twisted/)",
        ));
}

#[test]
fn test_scan_records_and_moves_messages() {
    let temp_dir = TempDir::new().unwrap();
    let dir = temp_dir.path();
    create_maildir(
        dir,
        "twisted",
        &[
            ("1001.a", FRESHCVS_MESSAGE),
            ("1002.b", "From: spam@example.com\nSubject: hi\n\nbuy now\n"),
        ],
    );
    create_maildir(dir, "mozilla", &[("1003.c", BONSAI_MESSAGE)]);
    write_config(
        dir,
        "[[sources]]\nname = \"twisted\"\nkind = \"freshcvs\"\nmaildir = \"twisted\"\nprefix = \"Twisted/\"\n\n\
         [[sources]]\nname = \"mozilla\"\nkind = \"bonsai\"\nmaildir = \"mozilla\"\n",
    );

    cvsmail(dir)
        .arg("scan")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "3 messages, 2 changes recorded, 1 discarded",
        ));

    let records = fs::read_to_string(dir.join("changes.jsonl")).unwrap();
    let lines: Vec<_> = records.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].contains("\"source\":\"twisted\""));
    assert!(lines[0].contains("\"author\":\"itamar\""));
    assert!(lines[1].contains("\"source\":\"mozilla\""));

    // Every message is moved, matched or not
    assert!(fs::read_dir(dir.join("twisted/new")).unwrap().next().is_none());
    assert!(dir.join("twisted/cur/1002.b").exists());
    assert!(dir.join("mozilla/cur/1003.c").exists());

    // Nothing left for a second pass
    cvsmail(dir)
        .arg("scan")
        .assert()
        .success()
        .stdout(predicate::str::contains("0 messages"));
}

#[test]
fn test_scan_with_explicit_config() {
    let temp_dir = TempDir::new().unwrap();
    let dir = temp_dir.path();
    create_maildir(dir, "mail", &[("1.a", BONSAI_MESSAGE)]);
    fs::write(
        dir.join("custom.toml"),
        "[store]\npath = \"out.jsonl\"\n\n[[sources]]\nname = \"moz\"\nkind = \"bonsai\"\nmaildir = \"mail\"\n",
    )
    .unwrap();

    cvsmail(dir)
        .args(["--config", "custom.toml", "scan"])
        .assert()
        .success();

    assert!(dir.join("out.jsonl").exists());
}

#[test]
fn test_scan_without_sources_fails() {
    let temp_dir = TempDir::new().unwrap();
    let dir = temp_dir.path();
    write_config(dir, "");

    cvsmail(dir)
        .arg("scan")
        .assert()
        .failure()
        .stderr(predicate::str::contains("no [[sources]] configured"));
}

#[test]
fn test_scan_missing_maildir_fails() {
    let temp_dir = TempDir::new().unwrap();
    let dir = temp_dir.path();
    write_config(
        dir,
        "[[sources]]\nname = \"cvs\"\nkind = \"syncmail\"\nmaildir = \"absent\"\n",
    );

    cvsmail(dir)
        .arg("scan")
        .assert()
        .failure()
        .stderr(predicate::str::contains("source cvs"));
}

#[test]
fn test_duplicate_source_names_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let dir = temp_dir.path();
    write_config(
        dir,
        "[[sources]]\nname = \"cvs\"\nkind = \"syncmail\"\nmaildir = \"a\"\n\n\
         [[sources]]\nname = \"cvs\"\nkind = \"bonsai\"\nmaildir = \"b\"\n",
    );

    cvsmail(dir)
        .arg("sources")
        .assert()
        .failure()
        .stderr(predicate::str::contains("duplicate source name"));
}
