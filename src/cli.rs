use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::epub::{Compression, EpubOptions};
use crate::xml::LineEnding;

#[derive(Debug, Parser)]
#[command(author, version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Package a book file into an EPUB.
    Build(BuildArgs),
    /// Scaffold a minimal book directory.
    Init(InitArgs),
}

#[derive(Debug, Args)]
pub struct BuildArgs {
    /// Input path to `book.yaml` (or `book.json`).
    #[arg(long)]
    pub book: String,

    /// Output file path for the `.epub`.
    #[arg(long)]
    pub out: String,

    /// Overwrite an existing output file.
    #[arg(long, default_value_t = false)]
    pub force: bool,

    /// Line terminator for generated XML (default: platform native).
    #[arg(long, value_enum)]
    pub line_ending: Option<LineEndingArg>,

    /// Store entries uncompressed instead of deflating them.
    #[arg(long, default_value_t = false)]
    pub stored: bool,
}

impl BuildArgs {
    pub fn epub_options(&self) -> EpubOptions {
        EpubOptions {
            line_ending: self
                .line_ending
                .map(LineEnding::from)
                .unwrap_or_default(),
            compression: if self.stored {
                Compression::Stored
            } else {
                Compression::Deflated
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LineEndingArg {
    Lf,
    Crlf,
}

impl From<LineEndingArg> for LineEnding {
    fn from(arg: LineEndingArg) -> Self {
        match arg {
            LineEndingArg::Lf => Self::Lf,
            LineEndingArg::Crlf => Self::CrLf,
        }
    }
}

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Output directory for the book skeleton.
    #[arg(long)]
    pub out: String,

    /// Book title (written to `book.yaml`).
    #[arg(long)]
    pub title: String,
}
