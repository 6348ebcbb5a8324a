use clap::*;
use crelink::libs::query::LocusRequest;
use crelink::libs::schema::{PromoterMode, Selection};
use std::io::Write;

// Create clap subcommand arguments
pub fn make_subcommand() -> Command {
    Command::new("locus")
        .about("Enhancers located in a region")
        .after_help(
            r###"
The region is given either as three values or as one region string. The
chromosome is 1-22, X or Y, with an optional `chr` prefix. Positions may
contain thousands separators. The region may span at most 1 Mb.

A loop is reported when either of its anchors lies entirely inside the region.
Loops annotated as CRE with an assigned target gene are enhancers; every other
matched loop is an additional loop interaction.

Outputs, in --outdir:
* with --details:
  <chr>_<start>_<end>_<cohort>_<res>_<allTX|canonTX>_enhancer_results.csv
    chr,start,end,target
* locus_<chr>_<start>_<end>_links.tab, _genes.bed, _<signal>.bedGraph
* locus_<chr>_<start>_<end>_tracks.ini and _genome_track.png

Examples:
    crelink locus 1 1000000 1500000
    crelink locus chr12:25,200,000-25,500,000 --details --loops

"###,
        )
        .arg(
            Arg::new("region")
                .required(true)
                .num_args(1..=3)
                .value_names(["CHR", "START", "END"])
                .help("<CHR> <START> <END>, or a single <CHR:START-END>"),
        )
        .args(super::query_args())
}

/// One region string or three separate values.
pub fn parse_request(
    selection: Selection,
    values: &[&str],
    mode: PromoterMode,
) -> anyhow::Result<LocusRequest> {
    let req = match values {
        [region] => LocusRequest::from_region(selection, region, mode)?,
        [chrom, start, end] => LocusRequest::new(selection, chrom, start, end, mode)?,
        _ => anyhow::bail!("Expected <CHR> <START> <END> or <CHR:START-END>"),
    };
    Ok(req)
}

// command implementation
pub fn execute(args: &ArgMatches) -> anyhow::Result<()> {
    let setup = super::Setup::from_matches(args)?;
    let values: Vec<&str> = args
        .get_many::<String>("region")
        .unwrap()
        .map(|s| s.as_str())
        .collect();
    let req = parse_request(setup.selection, &values, setup.mode)?;

    let explorer = setup.explorer()?;
    let mut session = super::session(args);
    let mut writer = crelink::writer("stdout")?;

    explorer.run_locus(&mut session, &req, &mut writer)?;
    writer.flush()?;

    Ok(())
}
