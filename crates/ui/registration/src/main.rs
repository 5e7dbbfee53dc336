use clap::Parser;
use color_eyre::Result;

use registration::cli::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let code = registration::run(cli).await?;
    if code != 0 {
        std::process::exit(code);
    }
    Ok(())
}
