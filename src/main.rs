use std::{io, process};

use clap::Parser;
use colored::Colorize;
use fsutil::cli::commands::fsutil_main;
use fsutil::cli::{Cli, Session};
use fsutil::config::Settings;
use fsutil::exitcode;
use fsutil::infrastructure::di::ServiceContainer;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, Layer};

fn main() {
    let cli = Cli::parse();

    setup_logging(cli.debug);

    let settings = match Settings::load(cli.config.as_deref()) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("{}", format!("Error: {}", e).red());
            process::exit(exitcode::CONFIG);
        }
    };
    tracing::debug!("settings: {:?}", settings);

    let container = ServiceContainer::new(settings);
    let stdout = io::stdout();
    let stderr = io::stderr();
    let mut out = stdout.lock();
    let mut err = stderr.lock();

    let code = {
        let mut session = Session::new(&container, &mut out, &mut err);
        fsutil_main(&mut session, &cli.args)
    };
    // process::exit skips destructors; release the stream locks first
    drop((out, err));
    process::exit(code);
}

fn setup_logging(verbosity: u8) {
    let filter = match verbosity {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        3 => LevelFilter::TRACE,
        _ => {
            eprintln!("Don't be crazy, max is -d -d -d");
            LevelFilter::TRACE
        }
    };

    // Create a subscriber with formatted output directed to stderr
    let fmt_layer = fmt::layer()
        .with_writer(io::stderr)
        .with_target(true)
        .with_thread_names(false)
        .with_span_events(FmtSpan::CLOSE);

    tracing_subscriber::registry()
        .with(fmt_layer.with_filter(filter))
        .init();

    match filter {
        LevelFilter::INFO => tracing::info!("Debug mode: info"),
        LevelFilter::DEBUG => tracing::debug!("Debug mode: debug"),
        LevelFilter::TRACE => tracing::debug!("Debug mode: trace"),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fsutil::util::testing;
    use tracing::info;

    // https://docs.rs/clap/latest/clap/_derive/_tutorial/index.html#testing
    #[test]
    fn verify_cli() {
        testing::init_test_setup();
        use clap::CommandFactory;
        Cli::command().debug_assert();
        info!("Debug mode: info");
    }

    #[test]
    fn given_flags_before_group_when_parsing_then_rest_is_forwarded() {
        let cli = Cli::try_parse_from(["fsutil", "-dd", "dirty", "QUERY", "c:"]).unwrap();
        assert_eq!(cli.debug, 2);
        assert_eq!(cli.args, vec!["dirty", "QUERY", "c:"]);
    }

    #[test]
    fn given_hyphenated_volume_when_parsing_then_forwarded_verbatim() {
        let cli = Cli::try_parse_from(["fsutil", "dirty", "query", "-x"]).unwrap();
        assert_eq!(cli.args, vec!["dirty", "query", "-x"]);
    }
}
