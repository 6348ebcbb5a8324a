use clap::*;
use crelink::libs::query::GeneRequest;
use std::io::Write;

// Create clap subcommand arguments
pub fn make_subcommand() -> Command {
    Command::new("gene")
        .about("Putative enhancers looping to a gene's promoter")
        .after_help(
            r###"
Finds the loops whose promoter-side target list names the gene, under the
chosen promoter definition, and reports the distinct regulatory anchors.

Outputs, in --outdir:
* <GENE>_<allTX|canonTX>_<res>_<tag>_enhancer_results.csv
    chr,start,end,interChr,interStart,interEnd,target
* gene_<GENE>_links.tab, _target_gene.bed, _genes.bed, _<signal>.bedGraph
* gene_<GENE>_tracks.ini and the rendered gene_<GENE>_genome_track.png

The image spans all matched anchors padded by 100 kb on each side.

Examples:
    # All transcripts, merged cohort, 10kb loops
    crelink gene KRAS --data data/ -o out/

    # Canonical promoters in the ETV6::RUNX1 cohort
    crelink gene ikzf1 --cohort er --promoters canonical

    # Track files only
    crelink gene MYC --no-render

"###,
        )
        .arg(
            Arg::new("symbol")
                .required(true)
                .index(1)
                .help("Gene symbol; case-insensitive"),
        )
        .args(super::query_args())
}

// command implementation
pub fn execute(args: &ArgMatches) -> anyhow::Result<()> {
    let setup = super::Setup::from_matches(args)?;
    let req = GeneRequest::new(
        setup.selection,
        args.get_one::<String>("symbol").unwrap(),
        setup.mode,
    )?;

    let explorer = setup.explorer()?;
    let mut session = super::session(args);
    let mut writer = crelink::writer("stdout")?;

    explorer.run_gene(&mut session, &req, &mut writer)?;
    writer.flush()?;

    Ok(())
}
