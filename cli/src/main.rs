mod commands;
mod terminal;

use commands::{CommandLine, check};
use terminal::{logging, print};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let commands = CommandLine::parse_args();

    logging::init(commands.verbose);

    let cfg = commands.to_config();
    print::banner(cfg.quiet);

    check::check(commands.input_source(), &cfg).await
}
