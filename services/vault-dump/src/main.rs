//! vault-dump - Main Entry Point

use std::io;
use std::process::ExitCode;

use tracing::info;
use vault_dump::{Args, DumpError, Settings, cli::Invocation, output};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    match try_main().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            if err.reports_to_stdout() {
                println!("{err}");
            } else {
                eprintln!("Error: {err}");
            }
            ExitCode::from(err.exit_code())
        }
    }
}

async fn try_main() -> Result<(), DumpError> {
    let args = match Args::parse_invocation(std::env::args_os())? {
        Invocation::Run(args) => args,
        Invocation::Info(text) => {
            print!("{text}");
            return Ok(());
        }
    };

    let settings = Settings::from_env()?;
    rust_common::init_tracing(&settings.tracing_config())?;

    info!(path = %args.path_to_read, "Starting secret dump");

    let secrets = vault_dump::run(&args).await?;
    output::write_secrets(&mut io::stdout().lock(), &secrets)
}
