//! Integration tests against the compiled `domgraph` binary, covering the
//! harness-level properties that the core's own test suite (`dominators.rs`)
//! can't reach: `check`'s cross-validation and the sentinel pre-fill
//! contract. DIMACS round-trip and `-reverse` duality are covered as
//! library-level tests in `src/dimacs.rs`, since they need no process
//! spawning.

use std::io::Write;
use std::path::PathBuf;
use std::process::Command;

fn bin() -> Command {
    Command::new(env!("CARGO_BIN_EXE_domgraph"))
}

/// Writes `contents` to a fresh temp file and returns its path.
fn temp_file(name: &str, contents: &str) -> PathBuf {
    use std::sync::atomic::{AtomicU32, Ordering};
    static COUNTER: AtomicU32 = AtomicU32::new(0);
    let unique = COUNTER.fetch_add(1, Ordering::Relaxed);
    let path = std::env::temp_dir().join(format!("domgraph-test-{}-{}-{name}", std::process::id(), unique));
    let mut f = std::fs::File::create(&path).unwrap();
    f.write_all(contents.as_bytes()).unwrap();
    path
}

const DIAMOND: &str = "p edge 4 4\nn 1 s\na 1 2\na 1 3\na 2 4\na 3 4\n";

/// `check` on an agreeing graph reports no discrepancy.
#[test]
fn check_reports_ok_when_all_methods_agree() {
    let file = temp_file("diamond.dimacs", DIAMOND);
    let output = bin().arg("check").arg(&file).output().unwrap();
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success());
    assert!(stdout.contains("ok"), "stdout was: {stdout}");
    let _ = std::fs::remove_file(file);
}

/// An intentionally corrupted algorithm is caught by `check`.
#[test]
fn check_catches_a_corrupted_method() {
    let file = temp_file("diamond-corrupt.dimacs", DIAMOND);
    let output = bin().arg("check").arg(&file).arg("--corrupt").arg("slt").output().unwrap();
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("slt: disagrees with idfs"), "stdout was: {stdout}");
    assert!(!stdout.contains("ok\n"), "stdout was: {stdout}");
    let _ = std::fs::remove_file(file);
}

/// The sentinel pre-fill (`n + method_code + i`) is always
/// larger than `n`, so it can never survive into a successfully written
/// `idom` file; every entry must be a real label (`<= n`) or `0`.
#[test]
fn idom_file_never_contains_the_sentinel() {
    let file = temp_file("diamond-idomfile.dimacs", DIAMOND);
    let idom_path = std::env::temp_dir().join(format!("domgraph-test-{}-idom.txt", std::process::id()));
    let status = bin()
        .arg("run")
        .arg(&file)
        .arg("--method")
        .arg("idfs")
        .arg("--min-time")
        .arg("0")
        .arg("--idom-file")
        .arg(&idom_path)
        .status()
        .unwrap();
    assert!(status.success());

    let contents = std::fs::read_to_string(&idom_path).unwrap();
    let n = 4;
    for line in contents.lines() {
        let mut fields = line.split_whitespace();
        let _label: u32 = fields.next().unwrap().parse().unwrap();
        let d: u32 = fields.next().unwrap().parse().unwrap();
        assert!(d == 0 || d <= n, "idom entry {d} looks like an unwritten sentinel");
    }

    let _ = std::fs::remove_file(file);
    let _ = std::fs::remove_file(idom_path);
}
