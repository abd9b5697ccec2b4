use std::process::ExitCode;
use structopt::StructOpt;

use freshrss_to_karakeep::app;
use freshrss_to_karakeep::cli::Args;
use freshrss_to_karakeep::infrastructure::config::Config;
use freshrss_to_karakeep::infrastructure::logging::{init_logging, LoggingConfig};

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::from_args();

    // Load configuration
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::from(e.exit_code());
        }
    };

    // Initialize logging; the guard must outlive the run
    let logging = LoggingConfig::for_cli(args.verbose, &config.log_file, config.log_format);
    let _guard = match init_logging(&logging) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::from(e.exit_code());
        }
    };

    match app::run(&args, &config).await {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "Transfer aborted");
            ExitCode::from(e.exit_code())
        }
    }
}
