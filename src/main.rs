use std::process::ExitCode;
use studentdb::{
    app::{self, DemoPlan},
    cli::{self, ConnectionArgs, EXIT_FAILURE, EXIT_USAGE},
    config,
    core::{ErrorKind, StudentDbError},
    output::{Console, Palette},
};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    // Logs go to stderr so they never interleave with the console output.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    // Initialize the logging system using tracing subscriber
    init_tracing();

    info!("Starting studentdb...");

    let Some(args) = ConnectionArgs::from_args(std::env::args().skip(1)) else {
        let mut console = Console::stdout(Palette::from_settings(true));
        if let Err(e) = cli::report_missing_args(&mut console) {
            eprintln!("failed to report missing arguments: {}", e.report());
        }
        return ExitCode::from(EXIT_USAGE);
    };

    let config = match config::load() {
        Ok(config) => config,
        Err(e) => return fail(&mut Console::stdout(Palette::from_settings(true)), e),
    };
    let mut console = Console::stdout(config.palette());
    let target = args.into_target(config.scheme());
    let plan = DemoPlan::from_config(&config.demo, chrono::Local::now().date_naive());

    match app::connect_and_run(&target, &config, &plan, &mut console) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => fail(&mut console, e),
    }
}

fn fail(console: &mut Console<std::io::Stdout>, err: StudentDbError) -> ExitCode {
    match err.kind() {
        ErrorKind::DriverUnavailable => error!("database driver unavailable: {}", err.report()),
        ErrorKind::DataAccess => error!("data access failed: {}", err.report()),
        ErrorKind::Config => error!("configuration failed: {}", err.report()),
        ErrorKind::Output => error!("console output failed: {}", err.report()),
    }
    if let Err(report_err) = app::report_error(console, &err) {
        eprintln!("failed to report error: {}", report_err.report());
    }
    ExitCode::from(EXIT_FAILURE)
}
