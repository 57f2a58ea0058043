use std::process::ExitCode;

use clap::Parser;

use apiprobe::cli::CliConfig;
use apiprobe::logging::init_logging;
use apiprobe::runner;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = CliConfig::parse();
    init_logging(&cli.log_level, cli.log_format);

    runner::run(&cli).await.into()
}
