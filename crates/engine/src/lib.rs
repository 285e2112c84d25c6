// crates/engine/src/lib.rs
//! Runs the wordfreq core over real inputs: reading, counting, ranking,
//! writing, optional verification, and the offline seed search.

pub mod config;
pub mod error;
pub mod options;
pub mod reference;
pub mod report;
pub mod seed_search;
pub mod sink;
pub mod source;
pub mod timer;

use crate::config::{Config, SeedSearchConfig};
use crate::error::Result;
use crate::reference::ReferenceCounter;
use crate::report::RunReport;
use crate::seed_search::{SeedCandidate, SeedSearch};
use crate::timer::Timer;
use wordfreq_core::WordCounter;

/// Counts the words of `config.input` and writes the ranked list to `config.output`.
///
/// # Errors
///
/// - Invalid counting configuration.
/// - Input that cannot be read or exceeds `max_input_size`.
/// - Any capacity violation of the table or the arena; nothing is written then.
/// - Output that cannot be written.
/// - [`error::EngineError::Verification`] when `verify` is set and the counts differ.
pub fn run(config: &Config) -> Result<RunReport> {
    config.count.validate()?;
    let mut timer = Timer::new("total");

    let mut input = source::load(&config.input, config.count.max_input_size)?;
    timer.report("read input");

    let reference = config.verify.then(|| {
        let mut reference = ReferenceCounter::new();
        reference.count(&input);
        reference
    });
    if reference.is_some() {
        timer.report("reference count");
    }

    let mut counter = WordCounter::new(config.count.clone())?;
    counter.count_in_place(&mut input)?;
    timer.report("count words");

    let summary = counter.summary();
    log::info!(
        "{} words, {} distinct, load factor {:.4}",
        summary.words,
        summary.distinct,
        summary.load_factor
    );
    if summary.saturated > 0 {
        log::warn!("{} counter(s) saturated at {}", summary.saturated, u32::MAX);
    }

    let mut entries = counter.ranked()?;
    timer.report("sort words");

    if let Some(reference) = &reference {
        reference::verify(&entries, reference)?;
        timer.report("verify");
    }

    if let Some(n) = config.top_n {
        entries.truncate(n);
    }
    sink::write_ranked(&entries, config.format, &config.output)?;
    timer.report("write output");

    Ok(RunReport {
        summary,
        written: entries.len(),
        verified: reference.is_some(),
        stages: timer.take_stages(),
        total: timer.total(),
    })
}

/// Searches `config.first_seed..=config.last_seed` for seeds that fit the input.
///
/// # Errors
///
/// - Invalid search parameters.
/// - Input that cannot be read or exceeds `max_input_size`.
/// - Thread pool creation failure.
pub fn seed_search(config: &SeedSearchConfig) -> Result<Vec<SeedCandidate>> {
    let search = SeedSearch::new(
        config.order,
        config.slots,
        config.first_seed..=config.last_seed,
        config.limit,
    )?;
    let mut timer = Timer::new("total");

    let input = source::load(&config.input, config.max_input_size)?;
    timer.report("read input");

    let words = seed_search::distinct_words(&input);
    log::info!("{} distinct words", words.len());
    timer.report("collect words");

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(config.threads)
        .build()?;
    let found = pool.install(|| search.run(&words));
    timer.report("search seeds");
    Ok(found)
}
