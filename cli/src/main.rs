mod commands;
mod terminal;

use commands::{CommandLine, discover};
use terminal::{logging, print, spinner};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let commands = CommandLine::parse_args();
    let cfg = commands.to_config();

    spinner::init(cfg.quiet);
    logging::init();
    print::banner(cfg.no_banner, cfg.quiet);

    discover::discover(commands.subnet.as_deref(), &cfg).await?;

    print::end_of_program(cfg.quiet);
    Ok(())
}
