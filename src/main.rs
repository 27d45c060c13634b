// Copyright (c) 2026 glyphrain contributors

mod column;
mod glyph;
mod registry;
mod scheduler;
mod terminal;

use std::time::Duration;

#[cfg(unix)]
use std::thread;

use clap::Parser;

#[cfg(unix)]
use signal_hook::consts::{SIGHUP, SIGINT, SIGTERM};
#[cfg(unix)]
use signal_hook::iterator::Signals;

use crate::glyph::GlyphSet;
use crate::scheduler::{Scheduler, DEFAULT_FRAME_WAIT_MS, DEFAULT_MAX_COLUMNS};
use crate::terminal::{restore_terminal_best_effort, Terminal};

const USAGE: &str = "Usage: glyphrain [ascii|bin|hex|japanese]";

/// Falling glyph rain for the terminal. Press Escape (or q) to exit.
#[derive(Parser, Debug)]
#[command(name = "glyphrain", version)]
struct Args {
    /// Glyph set: ascii | bin | hex | japanese (unknown names fall back to bin)
    glyphs: Option<String>,

    /// Maximum number of simultaneously falling columns
    #[arg(long = "max-columns", default_value_t = DEFAULT_MAX_COLUMNS)]
    max_columns: usize,

    /// Delay between frames in milliseconds
    #[arg(long = "delay", value_name = "MS", default_value_t = DEFAULT_FRAME_WAIT_MS)]
    delay_ms: u64,

    /// List the available glyph sets and exit
    #[arg(long = "list-glyphs")]
    list_glyphs: bool,

    /// Print build info and exit
    #[arg(short = 'i', long = "info")]
    info: bool,
}

/// What a given invocation should do, decided before the terminal is
/// touched.
#[derive(Debug, PartialEq, Eq)]
enum Action {
    Usage,
    ListGlyphs,
    Info,
    Run(GlyphSet),
}

fn startup_action(args: &Args) -> Action {
    if args.list_glyphs {
        return Action::ListGlyphs;
    }
    if args.info {
        return Action::Info;
    }
    match &args.glyphs {
        // A bare invocation shows usage instead of starting the animation.
        None => Action::Usage,
        Some(name) => Action::Run(GlyphSet::parse(name)),
    }
}

fn print_list_glyphs() {
    println!("AVAILABLE GLYPH SETS:");
    println!();
    println!("VALUE      DESCRIPTION");
    println!("ascii      Letters, digits and punctuation");
    println!("bin        0 and 1 (the default)");
    println!("hex        0-9 and A-F");
    println!("japanese   Hiragana, katakana and kanji, mixed at random");
}

fn main() -> std::io::Result<()> {
    std::panic::set_hook(Box::new(|info| {
        restore_terminal_best_effort();
        eprintln!("{}", info);
    }));

    #[cfg(unix)]
    {
        if let Ok(mut signals) = Signals::new([SIGINT, SIGTERM, SIGHUP]) {
            thread::spawn(move || {
                if let Some(sig) = signals.forever().next() {
                    restore_terminal_best_effort();
                    std::process::exit(128 + sig);
                }
            });
        }
    }

    #[cfg(windows)]
    {
        if let Err(e) = ctrlc::set_handler(|| {
            restore_terminal_best_effort();
            std::process::exit(130);
        }) {
            eprintln!("failed to install Ctrl-C handler: {}", e);
        }
    }

    let args = Args::parse();

    match startup_action(&args) {
        Action::ListGlyphs => {
            print_list_glyphs();
            Ok(())
        }
        Action::Info => {
            println!("Version: v{}", env!("CARGO_PKG_VERSION"));
            println!("Build: {}", env!("GLYPHRAIN_BUILD"));
            println!("License: {}", env!("CARGO_PKG_LICENSE"));
            println!("Source: {}", env!("CARGO_PKG_REPOSITORY"));
            Ok(())
        }
        Action::Usage => {
            println!("{}", USAGE);
            Ok(())
        }
        Action::Run(glyphs) => {
            let mut term = Terminal::new()?;
            let mut scheduler = Scheduler::new(
                glyphs,
                args.max_columns,
                Duration::from_millis(args.delay_ms),
            );
            scheduler.run(&mut term)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_invocation_shows_usage_and_does_not_run() {
        let args = Args::try_parse_from(["glyphrain"]).unwrap();
        assert_eq!(startup_action(&args), Action::Usage);
    }

    #[test]
    fn flags_without_a_glyph_set_still_show_usage() {
        let args = Args::try_parse_from(["glyphrain", "--delay", "50"]).unwrap();
        assert_eq!(startup_action(&args), Action::Usage);
    }

    #[test]
    fn mixed_case_argument_selects_the_hex_set() {
        let args = Args::try_parse_from(["glyphrain", "HEX"]).unwrap();
        assert_eq!(startup_action(&args), Action::Run(GlyphSet::Hex));
    }

    #[test]
    fn list_glyphs_wins_over_the_positional() {
        let args = Args::try_parse_from(["glyphrain", "hex", "--list-glyphs"]).unwrap();
        assert_eq!(startup_action(&args), Action::ListGlyphs);
    }

    #[test]
    fn info_flag_does_not_start_the_animation() {
        let args = Args::try_parse_from(["glyphrain", "-i"]).unwrap();
        assert_eq!(startup_action(&args), Action::Info);
    }
}
