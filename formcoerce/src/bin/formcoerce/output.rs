use anyhow::Result;
use clap::ValueEnum;
use colored::{ColoredString, Colorize};
use comfy_table::{Attribute, Cell, Color, Table, presets};
use serde::Serialize;

/// How command results are rendered on stdout
#[derive(Clone, Debug, ValueEnum, Default, PartialEq)]
pub enum OutputFormat {
    /// Formatted table output (default)
    #[default]
    Table,
    /// JSON output for scripting
    Json,
    /// Compact single-line output
    Compact,
}

#[derive(Clone, Debug, Default)]
pub struct GlobalOptions {
    pub output_format: OutputFormat,
    pub quiet: bool,
    pub verbose: bool,
    pub no_color: bool,
}

/// A command result that can be printed in every [`OutputFormat`]
pub trait TableDisplay {
    fn to_table(&self, options: &GlobalOptions) -> Table;
    fn to_compact(&self) -> String;
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum Tone {
    Pass,
    Fail,
    Warn,
    Note,
    Detail,
}

impl Tone {
    fn render(self, message: &str) -> String {
        let (marker, text): (&str, ColoredString) = match self {
            Tone::Pass => ("ok:", message.green()),
            Tone::Fail => ("error:", message.red().bold()),
            Tone::Warn => ("warning:", message.yellow()),
            Tone::Note => ("note:", message.cyan()),
            Tone::Detail => ("..", message.dimmed()),
        };
        format!("{} {text}", marker.bold())
    }
}

/// Prints command results on stdout and status lines on stderr.
///
/// Keeping status lines off stdout leaves `--output json` and `--output
/// compact` safe to pipe.
pub struct OutputManager {
    options: GlobalOptions,
}

impl OutputManager {
    pub fn new(options: GlobalOptions) -> Self {
        Self { options }
    }

    pub fn display<T>(&self, data: &T) -> Result<()>
    where
        T: Serialize + TableDisplay,
    {
        if self.options.quiet {
            return Ok(());
        }
        let rendered = match self.options.output_format {
            OutputFormat::Json => serde_json::to_string_pretty(data)?,
            OutputFormat::Table => data.to_table(&self.options).to_string(),
            OutputFormat::Compact => data.to_compact(),
        };
        println!("{rendered}");
        Ok(())
    }

    pub fn success(&self, message: &str) {
        self.status(Tone::Pass, message);
    }

    pub fn failure(&self, message: &str) {
        self.status(Tone::Fail, message);
    }

    pub fn warning(&self, message: &str) {
        self.status(Tone::Warn, message);
    }

    pub fn note(&self, message: &str) {
        self.status(Tone::Note, message);
    }

    /// Only shown with `--verbose`
    pub fn detail(&self, message: &str) {
        self.status(Tone::Detail, message);
    }

    fn shows(&self, tone: Tone) -> bool {
        match tone {
            Tone::Fail => true,
            Tone::Detail => self.options.verbose && !self.options.quiet,
            _ => !self.options.quiet,
        }
    }

    fn status(&self, tone: Tone, message: &str) {
        if self.shows(tone) {
            eprintln!("{}", tone.render(message));
        }
    }
}

/// Table with a bold header row; plain ASCII borders under `--no-color`.
pub fn new_table(options: &GlobalOptions, headers: &[&str]) -> Table {
    let mut table = Table::new();
    table.load_preset(if options.no_color {
        presets::ASCII_FULL
    } else {
        presets::UTF8_FULL_CONDENSED
    });
    let header: Vec<Cell> = headers
        .iter()
        .map(|header| {
            let cell = Cell::new(header).add_attribute(Attribute::Bold);
            if options.no_color { cell } else { cell.fg(Color::Cyan) }
        })
        .collect();
    table.set_header(header);
    table
}
