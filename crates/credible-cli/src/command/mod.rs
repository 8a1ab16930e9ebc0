use clap::{Parser, Subcommand};

use self::{generate::GenerateArg, interval::IntervalArg};

mod generate;
mod interval;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// What to do
    #[command(subcommand)]
    mode: Mode,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Generate bimodal mock samples, one value per line
    Generate(#[clap(flatten)] GenerateArg),
    /// Compute the greedy credible region of a sample file
    Interval(#[clap(flatten)] IntervalArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    match args.mode {
        Mode::Generate(arg) => generate::run(&arg)?,
        Mode::Interval(arg) => interval::run(&arg)?,
    }
    Ok(())
}
