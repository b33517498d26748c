//! ANSI styling for the report: provider titles in yellow, counts in green.
use clap::ValueEnum;
use once_cell::sync::Lazy;

/// When to color the report
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorChoice {
    /// Color if stdout is a terminal that supports it
    Auto,
    /// Always color
    Always,
    /// Never color
    Never,
}

/// The escape sequences wrapped around each kind of report text. `NEVER`'s
/// are all empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StyleSheet {
    title_start: &'static str,
    count_start: &'static str,
    end: &'static str,
}

impl StyleSheet {
    /// A provider's section title
    #[must_use]
    pub fn title(&self, s: &str) -> String {
        format!("{}{}{}", self.title_start, s, self.end)
    }
    /// A number in the report
    #[must_use]
    pub fn count(&self, n: usize) -> String {
        format!("{}{}{}", self.count_start, n, self.end)
    }
}

const GREEN: &str = "\x1B[32m";
const YELLOW: &str = "\x1B[33m";
const RESET: &str = "\x1B[m";
const ALWAYS: StyleSheet = StyleSheet { title_start: YELLOW, count_start: GREEN, end: RESET };
const NEVER: StyleSheet = StyleSheet { title_start: "", count_start: "", end: "" };
static AUTO: Lazy<StyleSheet> = Lazy::new(|| {
    use enable_ansi_support::enable_ansi_support;
    use supports_color::Stream;
    let use_color = enable_ansi_support().is_ok() && supports_color::on(Stream::Stdout).is_some();
    if use_color {
        ALWAYS
    } else {
        NEVER
    }
});

/// Settles the `Auto` choice now, before anything is written to stdout
pub fn init() {
    Lazy::force(&AUTO);
}

/// The style sheet for `cc`. `Auto` falls back to no color if `init` was
/// never called.
#[must_use]
pub fn colored(cc: ColorChoice) -> &'static StyleSheet {
    match cc {
        ColorChoice::Always => &ALWAYS,
        ColorChoice::Never => &NEVER,
        ColorChoice::Auto => Lazy::<StyleSheet>::get(&AUTO).unwrap_or(&NEVER),
    }
}
