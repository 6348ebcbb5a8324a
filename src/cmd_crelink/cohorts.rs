use clap::*;
use crelink::libs::schema::Cohort;
use itertools::Itertools;
use std::io::Write;

// Create clap subcommand arguments
pub fn make_subcommand() -> Command {
    Command::new("cohorts")
        .about("Cohorts, subtype tags and resolutions")
        .after_help(
            r###"
Prints one tab-separated line per cohort:

    key  label  description  resolutions  subtype tags

`key` is the value accepted by --cohort; `label` appears in export file names.
The merged cohort at 10k pools the loops of every 10k subtype.

"###,
        )
        .arg(
            Arg::new("outfile")
                .long("outfile")
                .short('o')
                .num_args(1)
                .default_value("stdout")
                .help("Output filename. [stdout] for screen"),
        )
}

// command implementation
pub fn execute(args: &ArgMatches) -> anyhow::Result<()> {
    let mut writer = crelink::writer(args.get_one::<String>("outfile").unwrap())?;

    writeln!(writer, "#key\tlabel\tdescription\tresolutions\ttags")?;
    for cohort in Cohort::ALL {
        let resolutions = cohort.resolutions();
        let tags: Vec<String> = resolutions
            .iter()
            .map(|res| cohort.subtype_tag(*res).map(|t| t.to_string()))
            .collect::<Result<_, _>>()?;
        writeln!(
            writer,
            "{}\t{}\t{}\t{}\t{}",
            cohort.key(),
            cohort.label(),
            cohort.description(),
            resolutions.iter().join(","),
            tags.join(",")
        )?;
    }
    writer.flush()?;

    Ok(())
}
