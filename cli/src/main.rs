mod commands;
mod terminal;

use commands::{CommandLine, Commands, discover, info};
use terminal::{logging, print};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let commands = CommandLine::parse_args();

    logging::init_logging(commands.log_level())?;
    print::banner(commands.quiet);

    match commands.command {
        Commands::Info(args) => {
            print::header("network context");
            info::info(&args.config()).await
        }
        Commands::Discover(args) => {
            print::header("getting ready for discovery");
            discover::discover(&args).await
        }
    }
}
