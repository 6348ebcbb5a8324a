use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

#[test]
fn command_locus_no_enhancers() -> anyhow::Result<()> {
    let temp = TempDir::new()?;

    // a partially overlapping anchor does not count
    let mut cmd = cargo_bin_cmd!("crelink");
    cmd.arg("locus")
        .arg("1")
        .arg("1000000")
        .arg("1500000")
        .arg("--data")
        .arg("tests/data")
        .arg("-o")
        .arg(temp.path())
        .arg("--no-render")
        .arg("--loops");
    cmd.assert()
        .success()
        .stdout("No predicted enhancers were found for this location\n");

    assert_eq!(fs::read_dir(temp.path())?.count(), 0);

    Ok(())
}

#[test]
fn command_locus_summary() -> anyhow::Result<()> {
    let temp = TempDir::new()?;

    let mut cmd = cargo_bin_cmd!("crelink");
    cmd.arg("locus")
        .arg("chr12")
        .arg("25,200,000")
        .arg("25,500,000")
        .arg("--data")
        .arg("tests/data")
        .arg("-o")
        .arg(temp.path())
        .arg("--no-render");
    cmd.assert()
        .success()
        .stdout("There are 2 enhancers found in this region\n");

    let ini = fs::read_to_string(temp.path().join("locus_12_25200000_25500000_tracks.ini"))?;
    assert!(!ini.contains("[genes2]"));
    assert!(ini.contains("[enhancer_links]"));

    let links = fs::read_to_string(temp.path().join("locus_12_25200000_25500000_links.tab"))?;
    assert_eq!(
        links,
        "12\t25300000\t25310000\t12\t25240000\t25250000\t1.0\n12\t25380000\t25390000\t12\t25240000\t25250000\t1.0\n"
    );

    // KRAS and CASC1 are the regulated genes
    let genes = fs::read_to_string(temp.path().join("locus_12_25200000_25500000_genes.bed"))?;
    assert_eq!(genes.matches("255,0,0").count(), 2);

    assert!(!temp
        .path()
        .join("12_25200000_25500000_merged_10k_allTX_enhancer_results.csv")
        .exists());

    Ok(())
}

#[test]
fn command_locus_details_and_loops() -> anyhow::Result<()> {
    let temp = TempDir::new()?;

    let mut cmd = cargo_bin_cmd!("crelink");
    let output = cmd
        .arg("locus")
        .arg("chr12:25,200,000-25,500,000")
        .arg("--details")
        .arg("--loops")
        .arg("--data")
        .arg("tests/data")
        .arg("-o")
        .arg(temp.path())
        .arg("--no-render")
        .output()?;
    let stdout = String::from_utf8(output.stdout)?;

    assert!(output.status.success());
    assert_eq!(
        stdout,
        "There are 2 enhancers found in this region
Enhancer details:
CRE on 12:25300000-25310000 regulates: KRAS
CRE on 12:25380000-25390000 regulates: CASC1, KRAS
The following additional loop interactions were also found:
12:25320000-25330000    12:25700000-25710000
"
    );

    let csv = fs::read_to_string(
        temp.path()
            .join("12_25200000_25500000_merged_10k_allTX_enhancer_results.csv"),
    )?;
    assert_eq!(
        csv,
        "chr,start,end,target\n12,25300000,25310000,KRAS\n12,25380000,25390000,\"CASC1, KRAS\"\n"
    );

    Ok(())
}

#[test]
fn command_locus_canonical() -> anyhow::Result<()> {
    let temp = TempDir::new()?;

    let mut cmd = cargo_bin_cmd!("crelink");
    cmd.arg("locus")
        .arg("12")
        .arg("25200000")
        .arg("25500000")
        .arg("--promoters")
        .arg("canonical")
        .arg("--loops")
        .arg("--data")
        .arg("tests/data")
        .arg("-o")
        .arg(temp.path())
        .arg("--no-render");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("There are 1 enhancers found in this region"))
        .stdout(predicate::str::contains("12:25240000-25250000    12:25380000-25390000"));

    Ok(())
}

#[test]
fn command_locus_validation() -> anyhow::Result<()> {
    let cases = [
        (vec!["1", "0", "1000001"], "Maximum range allowed is 1 Mb."),
        (vec!["1", "500", "500"], "Start position cannot be larger than or equal to the end position."),
        (vec!["1", "900", "100"], "Start position cannot be larger than or equal to the end position."),
        (vec!["1", "abc", "100"], "Only numeric values are allowed for start and end positions."),
        (vec!["chr1:1k-2k"], "Only numeric values are allowed for start and end positions."),
        (vec!["23", "100", "200"], "Unknown chromosome: 23"),
        (vec!["1", "100"], "Expected <CHR> <START> <END> or <CHR:START-END>"),
    ];

    for (region, message) in cases {
        let mut cmd = cargo_bin_cmd!("crelink");
        cmd.arg("locus")
            .args(&region)
            .arg("--data")
            .arg("tests/data")
            .arg("--no-render");
        cmd.assert()
            .failure()
            .stdout(predicate::str::is_empty())
            .stderr(predicate::str::contains(message));
    }

    Ok(())
}

#[test]
fn command_locus_exactly_one_mb() -> anyhow::Result<()> {
    let temp = TempDir::new()?;

    let mut cmd = cargo_bin_cmd!("crelink");
    cmd.arg("locus")
        .arg("12")
        .arg("25000000")
        .arg("26000000")
        .arg("--data")
        .arg("tests/data")
        .arg("-o")
        .arg(temp.path())
        .arg("--no-render");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("enhancers found in this region"));

    Ok(())
}

#[test]
fn command_locus_rerun_is_identical() -> anyhow::Result<()> {
    let temp = TempDir::new()?;
    let files = [
        "12_25200000_25500000_merged_10k_allTX_enhancer_results.csv",
        "locus_12_25200000_25500000_links.tab",
        "locus_12_25200000_25500000_genes.bed",
        "locus_12_25200000_25500000_h3k27ac.bedGraph",
        "locus_12_25200000_25500000_tracks.ini",
    ];

    let run = || -> anyhow::Result<(String, Vec<Vec<u8>>)> {
        let mut cmd = cargo_bin_cmd!("crelink");
        let output = cmd
            .arg("locus")
            .arg("chr12:25,200,000-25,500,000")
            .arg("--details")
            .arg("--loops")
            .arg("--data")
            .arg("tests/data")
            .arg("-o")
            .arg(temp.path())
            .arg("--no-render")
            .output()?;
        assert!(output.status.success());

        let mut contents = vec![];
        for name in files {
            contents.push(fs::read(temp.path().join(name))?);
        }
        Ok((String::from_utf8(output.stdout)?, contents))
    };

    let (first_stdout, first) = run()?;
    let (second_stdout, second) = run()?;
    assert_eq!(first_stdout, second_stdout);
    for (name, (a, b)) in files.iter().zip(first.iter().zip(second.iter())) {
        assert!(!a.is_empty(), "{} is empty", name);
        assert_eq!(a, b, "{} differs between runs", name);
    }

    Ok(())
}
