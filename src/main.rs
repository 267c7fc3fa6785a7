//! autoeda: Exploratory Data Analysis CLI Tool
//!
//! Runs the EDA pipeline once against the configured dataset, or
//! repeatedly on demand with `--interactive`.

use anyhow::Result;
use clap::Parser;

use autoeda::cli::{confirm_rerun, prompt_source, Cli};
use autoeda::pipeline::{run_eda, DataSource, EdaConfig, EdaReport};
use autoeda::report::{display_summary, plain_summary, select_sink, ArtifactSink};
use autoeda::utils::{
    init_logging, print_banner, print_completion, print_config, print_error, print_info,
    print_step_header,
};

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose)?;

    // Sink strategy is chosen once for the whole process
    let mut sink = select_sink(cli.sink, &cli.out_dir, cli.bundle);
    let config = cli.eda_config();

    if !cli.quiet {
        print_banner(env!("CARGO_PKG_VERSION"));
    }

    if !cli.interactive {
        run_once(&cli, 1, &cli.data_source(), &config, sink.as_mut())?;
        return Ok(());
    }

    let mut run_num: u8 = 1;
    let mut location = cli.source.clone();
    loop {
        location = prompt_source(&location)?;
        let source = DataSource::parse(&location);

        let failed = match run_once(&cli, run_num, &source, &config, sink.as_mut()) {
            Ok(_) => false,
            Err(err) => {
                print_error(&format!("{:#}", err));
                true
            }
        };

        if !confirm_rerun(failed)? {
            break;
        }
        run_num = run_num.saturating_add(1);
    }

    Ok(())
}

/// One pipeline run with terminal output around it
fn run_once(
    cli: &Cli,
    run_num: u8,
    source: &DataSource,
    config: &EdaConfig,
    sink: &mut dyn ArtifactSink,
) -> Result<EdaReport> {
    if cli.quiet {
        let report = run_eda(source, config, sink)?;
        for line in plain_summary(&report) {
            println!("{}", line);
        }
        return Ok(report);
    }

    print_config(&source.to_string(), &config.target, sink.name(), &cli.out_dir);
    print_step_header(run_num, "Exploratory Analysis");

    let report = run_eda(source, config, sink)?;
    if sink.name() == "directory" {
        print_info(&format!("Artifacts written to {}", cli.out_dir.display()));
    }

    display_summary(&report);
    print_completion();

    Ok(report)
}
