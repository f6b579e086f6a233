//! End-to-end tests of the `purity` binary

use std::io::Write;
use std::process::{Command, Output, Stdio};
use tempfile::NamedTempFile;

const BIN: &str = env!("CARGO_BIN_EXE_purity");

const VCF: &str = "##fileformat=VCFv4.2\n\
##FORMAT=<ID=AF,Number=A,Type=Float,Description=\"Allele fractions\">\n\
##FORMAT=<ID=DP,Number=1,Type=Integer,Description=\"Read depth\">\n\
#CHROM\tPOS\tID\tREF\tALT\tQUAL\tFILTER\tINFO\tFORMAT\tNORMAL\tTUMOR\n\
chr1\t1000\t.\tC\tT\t.\tPASS\tAF=0.2\tAF:DP\t0.0:40\t0.20:40\n\
chr1\t2000\t.\tG\tA\t.\tPASS\tAF=0.4\tAF:DP\t0.01:30\t0.40:12\n\
chr2\t3000\t.\tA\tG\t.\tweak_evidence\tAF=0.6\tAF:DP\t0.5:50\t0.60:50\n";

/// Run the binary with `args`, feeding `stdin`
fn run_stdin(args: &[&str], stdin: &[u8]) -> Output {
    let mut child = Command::new(BIN)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to start purity");
    // the child may exit on bad arguments before reading its input
    let _ = child.stdin.take().unwrap().write_all(stdin);
    child.wait_with_output().expect("Failed to wait for purity")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

#[test]
fn test_full_table_from_stdin() {
    let output = run_stdin(&["--tumour", "TUMOR"], VCF.as_bytes());
    assert!(output.status.success());
    assert_eq!(stdout(&output), "Lower\tBest\tUpper\n0.56\t0.60\t0.60\n");
}

#[test]
fn test_just_best() {
    let output = run_stdin(&["--tumour", "TUMOR", "--just-best"], VCF.as_bytes());
    assert!(output.status.success());
    assert_eq!(stdout(&output), "0.60");
}

#[test]
fn test_underscore_flag_spellings() {
    let output = run_stdin(
        &["--tumour", "TUMOR", "--pass_only", "--just_best", "--min_af", "0.3"],
        VCF.as_bytes(),
    );
    assert!(output.status.success());
    // only chr1:2000 survives
    assert_eq!(stdout(&output), "0.40");
}

#[test]
fn test_fallback_when_all_filtered() {
    let output = run_stdin(&["--tumour", "TUMOR", "--min-af", "0.9"], VCF.as_bytes());
    assert!(output.status.success());
    assert_eq!(stdout(&output), "Lower\tBest\tUpper\n0.00\t0.50\t1.00\n");
    assert!(String::from_utf8_lossy(&output.stderr).contains("No afs"));
}

#[test]
fn test_germline_het_and_depth_filters() {
    let output = run_stdin(
        &["--tumour", "TUMOR", "--filter-germline-het", "--min-dp", "20", "--just-best"],
        VCF.as_bytes(),
    );
    assert!(output.status.success());
    // chr2 is germline het, chr1:2000 is too shallow
    assert_eq!(stdout(&output), "0.20");
}

#[test]
fn test_info_af() {
    let output = run_stdin(
        &["--tumour", "TUMOR", "--info-af", "--filter-germline-het", "--just-best"],
        VCF.as_bytes(),
    );
    assert!(output.status.success());
    assert_eq!(stdout(&output), "0.60");
}

#[test]
fn test_verbose_logs_skips() {
    let output = run_stdin(&["--tumour", "TUMOR", "--pass-only", "--verbose"], VCF.as_bytes());
    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("skipping non-pass at chr2:3000"));
    assert!(stderr.contains("skipped 1 included 2"));
}

#[test]
fn test_gzip_file_input() {
    use flate2::write::GzEncoder;
    use flate2::Compression;

    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(VCF.as_bytes()).unwrap();
    let mut temp = NamedTempFile::new().unwrap();
    temp.write_all(&encoder.finish().unwrap()).unwrap();
    temp.flush().unwrap();

    let output = Command::new(BIN)
        .args(["--tumour", "TUMOR", "--just-best"])
        .arg(temp.path())
        .output()
        .unwrap();
    assert!(output.status.success());
    assert_eq!(stdout(&output), "0.60");
}

#[test]
fn test_unknown_tumour_fails() {
    let output = run_stdin(&["--tumour", "MISSING"], VCF.as_bytes());
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("MISSING"));
}

#[test]
fn test_missing_field_fails_without_output() {
    let output = run_stdin(&["--tumour", "TUMOR", "--af-name", "VAF"], VCF.as_bytes());
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
}

#[test]
fn test_invalid_min_af_rejected() {
    let output = run_stdin(&["--tumour", "TUMOR", "--min-af", "2"], VCF.as_bytes());
    assert!(!output.status.success());
}

#[test]
fn test_tumour_is_required() {
    let output = run_stdin(&[], VCF.as_bytes());
    assert!(!output.status.success());
}
