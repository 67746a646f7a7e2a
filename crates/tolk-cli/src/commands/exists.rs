//! Implementation of the `tolk exists` command.

use miette::Result;
use owo_colors::{OwoColorize, Stream, Style};
use tolk::Engine;

use super::{LocaleArgs, SourceArgs};

/// Arguments for the exists command.
#[derive(Debug, clap::Args)]
pub struct ExistsArgs {
    #[command(flatten)]
    pub sources: SourceArgs,

    #[command(flatten)]
    pub locales: LocaleArgs,

    /// Translation key (e.g., menu.open)
    #[arg(long, required = true)]
    pub key: String,
}

/// Run the exists command.
///
/// Prints `true` or `false` and exits non-zero when the key is missing.
pub fn run_exists(args: ExistsArgs) -> Result<i32> {
    let store = args.locales.store();
    args.sources.load_into(&store)?;

    let exists = Engine::new(&store).key_exists(&args.key);
    let (answer, style, code) = if exists {
        ("true", Style::new().green(), exitcode::OK)
    } else {
        ("false", Style::new().red(), exitcode::DATAERR)
    };
    println!(
        "{}",
        answer.if_supports_color(Stream::Stdout, |text| text.style(style))
    );
    Ok(code)
}
