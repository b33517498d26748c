use anyhow::Result;
use is_terminal::IsTerminal;
use std::io;
use txrace::{io::read_logs, logging, race, style, Provider};

fn main() -> Result<()> {
    let args = txrace::args::parsed();
    logging::init_logging(args.verbosity);
    style::init();

    let logs = read_logs(&args.logs)?;
    let providers: Vec<Provider> = args
        .logs
        .iter()
        .zip(&logs)
        .map(|(source, log)| Provider { name: &source.name, log })
        .collect();
    let report = race(&providers, args.comparison)?;

    let sheet = style::colored(args.color);
    if io::stdout().is_terminal() {
        report.write_to(io::stdout().lock(), sheet)?;
    } else {
        report.write_to(io::BufWriter::new(io::stdout().lock()), sheet)?;
    };
    Ok(())
}
