use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use std::io::Write;
use tempfile::{NamedTempFile, TempDir};

#[test]
fn command_batch_session() -> anyhow::Result<()> {
    let temp = TempDir::new()?;
    let mut list = NamedTempFile::new()?;
    writeln!(list, "# queries")?;
    writeln!(list, "gene KRAS")?;
    writeln!(list, "locus 1 0 1000001")?;
    writeln!(list, "locus chr12:25,200,000-25,500,000")?;
    writeln!(list, "toggle enhancers")?;
    writeln!(list, "locus 12 25200000 25500000")?;
    writeln!(list)?;
    writeln!(list, "gene NOPE")?;

    let mut cmd = cargo_bin_cmd!("crelink");
    let output = cmd
        .arg("batch")
        .arg(list.path())
        .arg("--data")
        .arg("tests/data")
        .arg("-o")
        .arg(temp.path())
        .arg("--no-render")
        .output()?;
    let stdout = String::from_utf8(output.stdout)?;

    assert!(output.status.success());
    assert_eq!(stdout.matches("==> ").count(), 5);
    // an invalid range does not stop the batch
    assert!(stdout.contains("==> locus 1 0 1000001\nMaximum range allowed is 1 Mb.\n"));
    assert!(stdout.contains(
        "==> locus chr12:25,200,000-25,500,000\nThere are 2 enhancers found in this region\n==> "
    ));
    assert!(stdout.contains(
        "==> locus 12 25200000 25500000\nThere are 2 enhancers found in this region\nEnhancer details:\n"
    ));
    assert!(stdout.ends_with("==> gene NOPE\nNo protein coding genes with the given name were found.\n"));

    assert!(temp.path().join("gene_KRAS_tracks.ini").is_file());
    assert!(temp.path().join("locus_12_25200000_25500000_tracks.ini").is_file());

    Ok(())
}

#[test]
fn command_batch_renderer_failure_continues() -> anyhow::Result<()> {
    let temp = TempDir::new()?;

    let mut cmd = cargo_bin_cmd!("crelink");
    cmd.arg("batch")
        .arg("--data")
        .arg("tests/data")
        .arg("-o")
        .arg(temp.path())
        .arg("--renderer")
        .arg("crelink-no-such-renderer")
        .write_stdin("gene KRAS\ngene SDF4\nlocus 12 25200000 25500000\n");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Error generating genome track").count(2))
        .stdout(predicate::str::contains("==> gene SDF4\nNo regulatory elements were identified for this gene\n"));

    Ok(())
}

#[test]
fn command_batch_unknown_line() -> anyhow::Result<()> {
    let temp = TempDir::new()?;

    let mut cmd = cargo_bin_cmd!("crelink");
    cmd.arg("batch")
        .arg("stdin")
        .arg("--data")
        .arg("tests/data")
        .arg("-o")
        .arg(temp.path())
        .arg("--no-render")
        .write_stdin("frobnicate\ngene SDF4\n");
    cmd.assert()
        .success()
        .stdout("==> gene SDF4\nNo regulatory elements were identified for this gene\n")
        .stderr(predicate::str::contains("unrecognized interaction"));

    assert_eq!(fs::read_dir(temp.path())?.count(), 0);

    Ok(())
}

#[test]
fn command_batch_non_ascii_chromosome() -> anyhow::Result<()> {
    let temp = TempDir::new()?;

    let mut cmd = cargo_bin_cmd!("crelink");
    cmd.arg("batch")
        .arg("--data")
        .arg("tests/data")
        .arg("-o")
        .arg(temp.path())
        .arg("--no-render")
        .write_stdin("locus éé 1 2\nlocus chré:1-2\ngene SDF4\n");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("==> locus éé 1 2\nUnknown chromosome: éé\n"))
        .stdout(predicate::str::contains("==> locus chré:1-2\nMalformed region: chré:1-2\n"))
        .stdout(predicate::str::ends_with(
            "==> gene SDF4\nNo regulatory elements were identified for this gene\n",
        ));

    Ok(())
}
