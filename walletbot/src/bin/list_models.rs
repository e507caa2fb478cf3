use std::process::ExitCode;

use walletbot::catalog::print_generation_models;
use walletbot::{logging, Config};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    logging::init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> walletbot::Result<()> {
    let config = Config::from_env()?;
    let models = config.client()?.models();
    let mut stdout = std::io::stdout().lock();
    print_generation_models(&models, &mut stdout).await?;
    Ok(())
}
