// crates/cli/src/presentation.rs
use crate::error::{AppError, Result};
use std::io::{self, Write};
use tracing_subscriber::EnvFilter;
use wordfreq_engine::report::RunReport;
use wordfreq_engine::seed_search::SeedCandidate;

/// `RUST_LOG` が無ければ `-v` の回数で決める
#[must_use]
pub fn default_directive(verbose: u8) -> &'static str {
    match verbose {
        0 => "wordfreq=warn",
        1 => "wordfreq=info",
        _ => "wordfreq=debug",
    }
}

/// Installs the stderr subscriber; `log` records are forwarded to it.
///
/// # Errors
///
/// [`AppError::Logger`] if a global subscriber is already set.
pub fn init_logger(verbose: u8) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|e| AppError::Logger(e.to_string()))
}

pub fn print_summary(report: &RunReport) {
    eprintln!("{report}");
}

/// One line per seed, ready to paste into a config file.
///
/// # Errors
///
/// I/O errors of `out`.
pub fn write_candidates<W: Write>(mut out: W, found: &[SeedCandidate]) -> Result<()> {
    for c in found {
        writeln!(
            out,
            "seed {} order {} slots {} max_load {}",
            c.seed, c.order, c.slots, c.max_load
        )?;
    }
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_raises_the_level() {
        assert_eq!(default_directive(0), "wordfreq=warn");
        assert_eq!(default_directive(1), "wordfreq=info");
        assert_eq!(default_directive(5), "wordfreq=debug");
    }

    #[test]
    fn candidates_one_per_line() {
        let found = [
            SeedCandidate {
                seed: 8,
                order: 17,
                slots: 8,
                max_load: 3,
            },
            SeedCandidate {
                seed: 23,
                order: 17,
                slots: 8,
                max_load: 4,
            },
        ];
        let mut out = Vec::new();
        write_candidates(&mut out, &found).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "seed 8 order 17 slots 8 max_load 3\nseed 23 order 17 slots 8 max_load 4\n"
        );
    }
}
