use clap::{
    crate_authors, crate_description, crate_name, crate_version, Arg, ArgAction, ArgMatches,
    Command,
};
use colored::Colorize;
use sprout::{
    api::{self, GenerateOptions, Generated, Mode},
    materialize::{MaterializationReport, Outcome},
};
use std::path::PathBuf;

// The CLI layer should only parse inputs and forward them to library code.
fn main() -> miette::Result<()> {
    let matches = Command::new(crate_name!())
        .about(crate_description!())
        .author(crate_authors!())
        .version(crate_version!())
        .arg(
            Arg::new("base")
                .help("Directory the layout is written into")
                .value_parser(clap::value_parser!(PathBuf))
                .default_value("."),
        )
        .arg(
            Arg::new("manifest")
                .short('m')
                .long("manifest")
                .help("TOML file mapping relative paths to contents, used instead of the built-in layout")
                .value_name("FILE")
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("preview")
                .short('p')
                .long("preview")
                .help("Print the tree that would be written and exit")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("interactive")
                .short('i')
                .long("interactive")
                .help("Print the tree and ask for confirmation before writing")
                .action(ArgAction::SetTrue)
                .conflicts_with("preview"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable verbose output")
                .action(ArgAction::SetTrue),
        )
        .get_matches();

    init_logging(matches.get_flag("verbose"));

    handle_generate(&matches)
}

fn init_logging(is_verbose: bool) {
    let level = if is_verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Warn
    };

    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn handle_generate(args: &ArgMatches) -> miette::Result<()> {
    let base = args
        .get_one::<PathBuf>("base")
        .cloned()
        .unwrap_or_else(|| PathBuf::from("."));

    let mode = if args.get_flag("preview") {
        Mode::Preview
    } else if args.get_flag("interactive") {
        Mode::Confirm
    } else {
        Mode::Write
    };

    let options = GenerateOptions {
        base,
        manifest_file: args.get_one::<PathBuf>("manifest").cloned(),
        mode,
    };

    match api::generate(&options)? {
        Generated::Written(report) => print_report(&report),
        Generated::Previewed => {}
        Generated::Declined => println!("{}", "Nothing written.".yellow()),
    }

    Ok(())
}

fn print_report(report: &MaterializationReport) {
    for entry in report.entries() {
        let label = match entry.outcome {
            Outcome::Created => entry.outcome.as_str().green(),
            Outcome::Overwritten => entry.outcome.as_str().yellow(),
        };

        println!("{} {}", label, entry.target.display());
    }

    println!(
        "✅ Project structure generated successfully. ({} created, {} overwritten)",
        report.created(),
        report.overwritten()
    );
}
