use clap::*;
use crelink::libs::query::GeneRequest;
use std::io::{BufRead, Write};

// Create clap subcommand arguments
pub fn make_subcommand() -> Command {
    Command::new("batch")
        .about("Replay a list of queries in one session")
        .after_help(
            r###"
Each non-empty line of the input is one interaction:

    gene <SYMBOL>
    locus <CHR> <START> <END>
    locus <CHR:START-END>
    toggle enhancers
    toggle loops

Lines starting with `#` are skipped. All queries share the loaded tables and
one session: the toggles start from --details and --loops and flip the
display of enhancer details and additional loops for the following queries.
A query whose region and tracks match the previous render reuses its image.

An invalid line or a failed render is reported and the batch goes on.

Examples:
    printf 'gene KRAS\nlocus chr12:25,200,000-25,500,000\n' |
        crelink batch stdin --no-render

"###,
        )
        .arg(
            Arg::new("infile")
                .num_args(1)
                .default_value("stdin")
                .index(1)
                .help("Interaction list. [stdin] for standard input"),
        )
        .args(super::query_args())
}

// command implementation
pub fn execute(args: &ArgMatches) -> anyhow::Result<()> {
    let setup = super::Setup::from_matches(args)?;
    let explorer = setup.explorer()?;
    let mut session = super::session(args);

    let reader = crelink::reader(args.get_one::<String>("infile").unwrap())?;
    let mut writer = crelink::writer("stdout")?;

    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let fields: Vec<&str> = line.split_whitespace().collect();
        match fields.as_slice() {
            ["gene", symbol] => {
                writeln!(writer, "==> {}", line)?;
                match GeneRequest::new(setup.selection, symbol, setup.mode) {
                    Ok(req) => {
                        explorer.run_gene(&mut session, &req, &mut writer)?;
                    }
                    Err(e) => writeln!(writer, "{}", e)?,
                }
            }
            ["locus", rest @ ..] => {
                writeln!(writer, "==> {}", line)?;
                match super::locus::parse_request(setup.selection, rest, setup.mode) {
                    Ok(req) => {
                        explorer.run_locus(&mut session, &req, &mut writer)?;
                    }
                    Err(e) => writeln!(writer, "{}", e)?,
                }
            }
            ["toggle", "enhancers"] => {
                let on = session.toggle_enhancers();
                tracing::info!(on, "enhancer details toggled");
            }
            ["toggle", "loops"] => {
                let on = session.toggle_loops();
                tracing::info!(on, "additional loops toggled");
            }
            _ => {
                tracing::warn!(line = i + 1, content = line, "unrecognized interaction, skipped");
            }
        }
    }
    writer.flush()?;

    Ok(())
}
