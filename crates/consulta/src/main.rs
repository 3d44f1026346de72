use clap::Parser;
use consulta::{cli::Cli, logging};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let output = consulta::run(&cli).await?;
    print!("{output}");
    Ok(())
}
