use projectstack::commands::Cli;
use projectstack::libs::messages::macros::is_debug_mode;
use projectstack::msg_error;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    dotenv::dotenv().ok();

    if is_debug_mode() {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("projectstack=debug"));
        tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();
    }

    match Cli::menu().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            msg_error!(format!("{:#}", error));
            ExitCode::FAILURE
        }
    }
}
