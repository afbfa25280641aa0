mod commands;
mod terminal;

use commands::{CommandLine, Commands, amass, paths, preengagement, recon, whois};
use terminal::{logging, print};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let commands = CommandLine::parse_args();
    let quiet = commands.quiet;

    logging::init_logging(quiet);
    print::banner(quiet);

    let (target, cfg) = commands.command.resolve();

    match commands.command {
        Commands::Recon { .. } => recon::recon(target, &cfg, quiet).await,
        Commands::Amass { .. } => amass::amass(target, &cfg, quiet).await,
        Commands::Whois { .. } => whois::whois(target, &cfg, quiet).await,
        Commands::Preengagement { .. } => preengagement::preengagement(target, &cfg, quiet).await,
        Commands::Paths { .. } => paths::paths(target, &cfg, quiet).await,
    }
}
