//! Code to parse the command line using `clap`, and definitions of the parsed
//! result

use clap::{ArgAction, Parser, ValueEnum};

use crate::io::LogSource;
use crate::style::ColorChoice;
use crate::Comparison;

/// Returns the parsed command line.
#[must_use]
pub fn parsed() -> Args {
    from_cli(CliArgs::parse())
}

/// Like `parsed`, but from an explicit argument list (the first item is the
/// program name).
pub fn try_parse_from<I, T>(args: I) -> Result<Args, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    CliArgs::try_parse_from(args).map(from_cli)
}

fn from_cli(parsed: CliArgs) -> Args {
    let comparison = match parsed.compare {
        CliComparison::HeadToHead => Comparison::HeadToHead,
        CliComparison::Field => Comparison::Field,
    };
    let logs = parsed.logs.into_iter().map(|arg| LogSource::from_arg(&arg)).collect();
    Args { logs, comparison, color: parsed.color, verbosity: parsed.verbose }
}

/// `Args` contains the parsed command line.
#[derive(Debug, Clone)]
pub struct Args {
    /// `logs` is the list of provider logs, in report order
    pub logs: Vec<LogSource>,
    /// `comparison` says who competes on each pairwise common set
    pub comparison: Comparison,
    /// `color` says whether to color the report
    pub color: ColorChoice,
    /// `verbosity` is the number of `-v` flags
    pub verbosity: u8,
}

#[derive(Debug, Parser)]
#[command(name = "txrace", version, about)]
/// Compare transaction logs from several RPC providers and report which
/// provider saw each transaction first.
struct CliArgs {
    #[arg(name = "LOG", required = true)]
    /// Provider logs, as PATH (named after the file stem) or NAME=PATH
    logs: Vec<String>,
    #[arg(long, value_enum, default_value_t = CliComparison::HeadToHead)]
    /// Who competes on the hashes two providers have in common
    compare: CliComparison,
    #[arg(long, value_enum, default_value_t = ColorChoice::Auto)]
    /// When to color the report
    color: ColorChoice,
    #[arg(short, long, action = ArgAction::Count)]
    /// Log more to stderr (repeat for more detail)
    verbose: u8,
}

#[derive(PartialEq, Eq, Debug, Clone, Copy, ValueEnum)]
/// Name of the requested comparison
enum CliComparison {
    /// Only the two providers of each pair
    HeadToHead,
    /// Every provider, on the hashes the pair has in common
    Field,
}
