//! End-to-end runs of the `teto` binary against a saved page.

use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;

fn saved_page() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../teto-extract/tests/fixtures/ntnb_14ago2026.html")
}

fn teto(dir: &tempfile::TempDir) -> Command {
    let mut cmd = Command::cargo_bin("teto").unwrap();
    cmd.current_dir(dir.path()).env_remove("RUST_LOG").env_remove("TETO_CONFIG");
    cmd
}

#[test]
fn test_url_for_pinned_date() {
    let dir = tempfile::tempdir().unwrap();
    teto(&dir)
        .args(["--date", "14/08/2026", "--format", "json", "url"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "https://www.anbima.com.br/informacoes/merc-sec/resultados/msec_14ago2026_ntn-b.asp",
        ))
        .stdout(predicate::str::contains("\"date_token\": \"14ago2026\""));
}

#[test]
fn test_weekend_date_rejected() {
    let dir = tempfile::tempdir().unwrap();
    teto(&dir)
        .args(["--date", "15/08/2026", "url"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not a business day"));
}

#[test]
fn test_rates_from_saved_page() {
    let dir = tempfile::tempdir().unwrap();
    teto(&dir)
        .arg("--html-file")
        .arg(saved_page())
        .args(["--date", "14/08/2026", "--format", "csv", "rates"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("maturity,indicative_rate\n15/08/2026,9.4768\n"))
        .stdout(predicate::str::contains("15/05/2035,7.3250"));
}

#[test]
fn test_ceiling_csv() {
    let dir = tempfile::tempdir().unwrap();
    let output = teto(&dir)
        .arg("--html-file")
        .arg(saved_page())
        .args(["--date", "14/08/2026", "--format", "csv", "ceiling"])
        .args(["--maturity", "15/05/2035", "--spread", "1.25", "--nominal", "11.50"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 22);
    assert_eq!(lines[1], "0.00%,8.67%,11.50%");
    assert_eq!(lines[21], "-1.00%,7.67%,10.50%");
}

#[test]
fn test_ceiling_table_format() {
    let dir = tempfile::tempdir().unwrap();
    teto(&dir)
        .arg("--html-file")
        .arg(saved_page())
        .args(["--date", "14/08/2026", "ceiling", "-m", "15/05/2035"])
        .assert()
        .success()
        .stdout(predicate::str::contains("NTN-B REF for 15/05/2035: 7.33%"))
        .stdout(predicate::str::contains("Ceiling Nominal Rate"))
        .stdout(predicate::str::contains("-0.50%"));
}

#[test]
fn test_unknown_maturity() {
    let dir = tempfile::tempdir().unwrap();
    teto(&dir)
        .arg("--html-file")
        .arg(saved_page())
        .args(["--date", "14/08/2026", "ceiling", "--maturity", "01/01/2031"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid selection"));
}

#[test]
fn test_spread_validated_before_fetch() {
    let dir = tempfile::tempdir().unwrap();
    teto(&dir)
        .args(["--html-file", "/nonexistent/page.html", "ceiling", "--spread", "1.255"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("more than 2 decimal places"));
}

#[test]
fn test_config_defaults_applied() {
    let dir = tempfile::tempdir().unwrap();
    let config = "[defaults]\nspread = \"0\"\nnominal_rate = \"9.00\"\n";
    std::fs::write(dir.path().join("teto.toml"), config).unwrap();
    teto(&dir)
        .arg("--html-file")
        .arg(saved_page())
        .args(["--date", "14/08/2026", "--format", "csv", "ceiling", "-m", "15/05/2035"])
        .assert()
        .success()
        .stdout(predicate::str::contains("0.00%,7.33%,9.00%"));
}

#[test]
fn test_interactive_session() {
    let dir = tempfile::tempdir().unwrap();
    teto(&dir)
        .arg("--html-file")
        .arg(saved_page())
        .args(["--date", "14/08/2026", "--format", "csv", "interactive"])
        .write_stdin("select 15/05/2035\nnominal 8\nquit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("0.00%,8.67%,8.00%"))
        .stderr(predicate::str::contains("Loaded 11 maturities"));
}
