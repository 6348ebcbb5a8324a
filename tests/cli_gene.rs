use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

#[test]
fn command_invalid() -> anyhow::Result<()> {
    let mut cmd = cargo_bin_cmd!("crelink");
    cmd.arg("foobar");
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("recognized"));

    Ok(())
}

#[test]
fn command_gene_kras() -> anyhow::Result<()> {
    let temp = TempDir::new()?;

    let mut cmd = cargo_bin_cmd!("crelink");
    let output = cmd
        .arg("gene")
        .arg("kras")
        .arg("--data")
        .arg("tests/data")
        .arg("-o")
        .arg(temp.path())
        .arg("--no-render")
        .output()?;
    let stdout = String::from_utf8(output.stdout)?;

    assert!(output.status.success());
    assert_eq!(stdout.lines().count(), 3);
    assert_eq!(
        stdout.lines().next().unwrap(),
        "Putative enhancers for this gene were found in the following regions:"
    );
    assert!(stdout.contains("chr12:25300000-25310000\nchr12:25380000-25390000\n"));

    let csv = fs::read_to_string(temp.path().join("KRAS_allTX_10k_merged_10k_enhancer_results.csv"))?;
    let mut lines = csv.lines();
    assert_eq!(lines.next(), Some("chr,start,end,interChr,interStart,interEnd,target"));
    let rows: Vec<&str> = lines.collect();
    assert_eq!(rows.len(), 2);
    assert!(rows.iter().all(|r| r.ends_with(",KRAS")));
    assert_eq!(rows[0], "12,25240000,25250000,12,25300000,25310000,KRAS");

    let ini = fs::read_to_string(temp.path().join("gene_KRAS_tracks.ini"))?;
    let sections: Vec<&str> = ini.lines().filter(|l| l.starts_with('[')).collect();
    assert_eq!(
        sections,
        vec!["[x-axis]", "[enhancer_links]", "[genes2]", "[genes]", "[promoters]", "[h3k27ac]"]
    );

    let target = fs::read_to_string(temp.path().join("gene_KRAS_target_gene.bed"))?;
    assert_eq!(target, "chr12\t25205246\t25250929\tKRAS\t0\t-\n");

    let genes = fs::read_to_string(temp.path().join("gene_KRAS_genes.bed"))?;
    assert_eq!(genes.lines().count(), 6);
    assert_eq!(genes.matches("255,0,0").count(), 1);

    let signal = fs::read_to_string(temp.path().join("gene_KRAS_h3k27ac.bedGraph"))?;
    assert!(signal.starts_with("chr12\t25100000\t25200000\t0.8\n"));
    assert!(!signal.contains("chr7"));

    assert!(!temp.path().join("gene_KRAS_genome_track.png").exists());

    Ok(())
}

#[test]
fn command_gene_canonical() -> anyhow::Result<()> {
    let temp = TempDir::new()?;

    let mut cmd = cargo_bin_cmd!("crelink");
    cmd.arg("gene")
        .arg("KRAS")
        .arg("--promoters")
        .arg("canonical")
        .arg("--data")
        .arg("tests/data")
        .arg("-o")
        .arg(temp.path())
        .arg("--no-render");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("chr12:25300000-25310000"))
        .stdout(predicate::str::contains("chr12:25380000").not());

    assert!(temp
        .path()
        .join("KRAS_canonTX_10k_merged_10k_enhancer_results.csv")
        .is_file());

    Ok(())
}

#[test]
fn command_gene_outcomes() -> anyhow::Result<()> {
    let temp = TempDir::new()?;

    let mut cmd = cargo_bin_cmd!("crelink");
    cmd.arg("gene")
        .arg("NOTAGENE")
        .arg("--data")
        .arg("tests/data")
        .arg("-o")
        .arg(temp.path())
        .arg("--no-render");
    cmd.assert()
        .success()
        .stdout("No protein coding genes with the given name were found.\n");

    let mut cmd = cargo_bin_cmd!("crelink");
    cmd.arg("gene")
        .arg("SDF4")
        .arg("--data")
        .arg("tests/data")
        .arg("-o")
        .arg(temp.path())
        .arg("--no-render");
    cmd.assert()
        .success()
        .stdout("No regulatory elements were identified for this gene\n");

    // KRAS loops exist only in merged cohorts
    let mut cmd = cargo_bin_cmd!("crelink");
    cmd.arg("gene")
        .arg("KRAS")
        .arg("--cohort")
        .arg("er")
        .arg("--data")
        .arg("tests/data")
        .arg("-o")
        .arg(temp.path())
        .arg("--no-render");
    cmd.assert()
        .success()
        .stdout("No regulatory elements were identified for this gene\n");

    assert_eq!(fs::read_dir(temp.path())?.count(), 0);

    Ok(())
}

#[test]
fn command_gene_subtype_cohort() -> anyhow::Result<()> {
    let temp = TempDir::new()?;

    let mut cmd = cargo_bin_cmd!("crelink");
    cmd.arg("gene")
        .arg("IKZF1")
        .arg("--cohort")
        .arg("er")
        .arg("--data")
        .arg("tests/data")
        .arg("-o")
        .arg(temp.path())
        .arg("--no-render");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("chr7:50200000-50210000"));

    assert!(temp
        .path()
        .join("IKZF1_allTX_10k_ER_10k_enhancer_results.csv")
        .is_file());

    // subtype cohorts have no 1kb loops
    let mut cmd = cargo_bin_cmd!("crelink");
    cmd.arg("gene")
        .arg("IKZF1")
        .arg("--cohort")
        .arg("er")
        .arg("--res")
        .arg("1k")
        .arg("--data")
        .arg("tests/data")
        .arg("--no-render");
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Resolution 1k is not available for cohort ER"));

    Ok(())
}

#[test]
fn command_gene_one_kb() -> anyhow::Result<()> {
    let temp = TempDir::new()?;

    let mut cmd = cargo_bin_cmd!("crelink");
    cmd.arg("gene")
        .arg("KRAS")
        .arg("--res")
        .arg("1k")
        .arg("--data")
        .arg("tests/data")
        .arg("-o")
        .arg(temp.path())
        .arg("--no-render");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("chr12:25301000-25302000"))
        .stdout(predicate::str::contains("chr12:25300000-25310000").not());

    Ok(())
}

#[test]
fn command_gene_missing_tables() -> anyhow::Result<()> {
    let temp = TempDir::new()?;

    let mut cmd = cargo_bin_cmd!("crelink");
    cmd.arg("gene")
        .arg("KRAS")
        .arg("--data")
        .arg(temp.path())
        .arg("--no-render");
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Required input file not found"));

    Ok(())
}

#[test]
fn command_gene_renderer_failure() -> anyhow::Result<()> {
    let temp = TempDir::new()?;

    let mut cmd = cargo_bin_cmd!("crelink");
    cmd.arg("gene")
        .arg("KRAS")
        .arg("--data")
        .arg("tests/data")
        .arg("-o")
        .arg(temp.path())
        .arg("--renderer")
        .arg("crelink-no-such-renderer");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains(
            "Error generating genome track: renderer `crelink-no-such-renderer` not found in PATH",
        ));

    assert!(temp.path().join("gene_KRAS_tracks.ini").is_file());

    Ok(())
}

#[test]
fn command_gene_rerun_is_identical() -> anyhow::Result<()> {
    let temp = TempDir::new()?;
    let files = [
        "KRAS_allTX_10k_merged_10k_enhancer_results.csv",
        "gene_KRAS_links.tab",
        "gene_KRAS_target_gene.bed",
        "gene_KRAS_genes.bed",
        "gene_KRAS_h3k27ac.bedGraph",
        "gene_KRAS_tracks.ini",
    ];

    let run = || -> anyhow::Result<(String, Vec<Vec<u8>>)> {
        let mut cmd = cargo_bin_cmd!("crelink");
        let output = cmd
            .arg("gene")
            .arg("KRAS")
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
