use std::process::ExitCode;

use tokio::io::BufReader;

use walletbot::persona::assistant_config;
use walletbot::repl::Repl;
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
    let client = config.client()?;
    let session = client
        .chats()
        .create_with_config(config.model.clone(), assistant_config());
    tracing::info!(model = %config.model, "chat session opened");

    let stdin = BufReader::new(tokio::io::stdin());
    let stdout = std::io::stdout();
    let mut repl = Repl::new(session, stdin, stdout.lock());
    let summary = repl.run().await?;
    tracing::info!(
        remote_calls = summary.remote_calls,
        errors = summary.errors,
        "chat session closed"
    );
    Ok(())
}
