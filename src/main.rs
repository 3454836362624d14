mod app;
mod config;
mod data;
mod error;
mod pipeline;
mod render;
mod ui;

use std::io::{self, Write};
use std::process::ExitCode;

use clap::Parser;

use config::Cli;
use error::PipelineError;
use render::Sink;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logger(cli.verbose);

    match pipeline::run(&cli.into_config()) {
        Ok(figure) => {
            match &figure.sink {
                Sink::Display => {
                    log::info!("Closed '{}' ({} points)", figure.title, figure.point_count)
                }
                Sink::Export(path) => log::info!(
                    "Saved '{}' ({} points) to {}",
                    figure.title,
                    figure.point_count,
                    path.display()
                ),
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("{e}");
            report(&e, &mut io::stderr().lock());
            ExitCode::FAILURE
        }
    }
}

/// `RUST_LOG` wins; otherwise info, or debug with `--verbose`.
fn init_logger(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

/// The operator always sees the failure, whatever the log filter says.
fn report(err: &PipelineError, out: &mut impl Write) {
    // Nothing sensible is left to do if stderr itself is gone.
    let _ = writeln!(out, "Error: {err}");
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::error::{FilterError, LoadError};
    use crate::data::model::BoundingBox;

    #[test]
    fn report_writes_the_message_without_a_logger() {
        let mut out = Vec::new();
        let err = PipelineError::from(LoadError::FileNotFound(PathBuf::from("GrowLocations.csv")));
        report(&err, &mut out);
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Error: File not found - GrowLocations.csv\n"
        );
    }

    #[test]
    fn report_covers_bounds_errors() {
        let mut out = Vec::new();
        let bbox = BoundingBox::new(0.0, 0.0, 50.0, 55.0);
        report(&PipelineError::from(FilterError::InvalidBounds(bbox)), &mut out);
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("Error: Invalid latitude or longitude bounds"), "{text}");
    }
}
