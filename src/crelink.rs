extern crate clap;
use clap::*;

mod cmd_crelink;

fn main() -> anyhow::Result<()> {
    crelink::libs::logger::init_logger();

    let app = Command::new("crelink")
        .version(crate_version!())
        .author(crate_authors!())
        .about("`crelink` - Enhancer-promoter loops of B-cell precursor ALL")
        .propagate_version(true)
        .arg_required_else_help(true)
        .color(ColorChoice::Auto)
        .subcommand(cmd_crelink::gene::make_subcommand())
        .subcommand(cmd_crelink::locus::make_subcommand())
        .subcommand(cmd_crelink::batch::make_subcommand())
        .subcommand(cmd_crelink::cohorts::make_subcommand())
        .after_help(
            r###"Subcommands:

* Queries:
    * gene    - Putative enhancers looping to a gene's promoter
    * locus   - Enhancers located in a region of at most 1 Mb
    * batch   - Replay a list of queries in one session

* Reference:
    * cohorts - Cohorts, subtype tags and resolutions

Reference tables are read from `data_dir` (default `data/`): the gene table
`coding_genes2` and the loop table `concat_loops.tab`. Settings layer as
built-in defaults < ./crelink.toml (or --config) < CRELINK_* variables < flags.

Set RUST_LOG=info to see load sizes, windows and renderer calls on stderr.

"###,
        );

    // Check which subcomamnd the user ran...
    match app.get_matches().subcommand() {
        Some(("gene", sub_matches)) => cmd_crelink::gene::execute(sub_matches),
        Some(("locus", sub_matches)) => cmd_crelink::locus::execute(sub_matches),
        Some(("batch", sub_matches)) => cmd_crelink::batch::execute(sub_matches),
        Some(("cohorts", sub_matches)) => cmd_crelink::cohorts::execute(sub_matches),
        _ => unreachable!(),
    }?;

    Ok(())
}
