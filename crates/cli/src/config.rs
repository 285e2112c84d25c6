// crates/cli/src/config.rs
use crate::args::{Args, SeedSearchArgs, TableOptions};
use crate::error::{AppError, Result};
use crate::options;
pub use wordfreq_engine::config::{Config, ConfigBuilder, SeedSearchConfig, SeedSearchConfigBuilder};
use wordfreq_engine::options::{self as engine_options, InputSource, OutputTarget};
use wordfreq_core::CountConfig;

impl TryFrom<&Args> for Config {
    type Error = AppError;

    fn try_from(args: &Args) -> Result<Self> {
        let count = count_config_from_args(&args.table)?;
        let format: engine_options::OutputFormat = args.output.format.into();

        ConfigBuilder::default()
            .input(InputSource::from_arg(&args.input))
            .output(OutputTarget::from_arg(&args.output_file))
            .format(format)
            .top_n(args.output.top)
            .verify(args.output.verify)
            .count(count)
            .build()
            .map_err(|e| wordfreq_engine::error::EngineError::Config(e.to_string()).into())
    }
}

impl From<SeedSearchArgs> for SeedSearchConfig {
    fn from(args: SeedSearchArgs) -> Self {
        let defaults = Self::default();
        Self {
            input: InputSource::from_arg(&args.input),
            order: args.order,
            slots: args.slots,
            first_seed: args.first_seed,
            last_seed: args.last_seed,
            limit: args.limit,
            threads: args.threads.unwrap_or(defaults.threads),
            max_input_size: args.max_input_size.map_or(defaults.max_input_size, |s| s.0),
        }
    }
}

/// `--config` first, then individual flags on top.
fn count_config_from_args(table: &TableOptions) -> Result<CountConfig> {
    let mut count = match &table.config {
        Some(path) => wordfreq_engine::config::load_count_config(path)?,
        None => CountConfig::default(),
    };
    if let Some(order) = table.order {
        count.order = order;
    }
    if let Some(slots) = table.slots {
        count.slots = slots;
    }
    if let Some(seed) = table.seed {
        count.seed = seed;
    }
    if let Some(size) = table.arena_capacity {
        count.arena_capacity = size.0;
    }
    if let Some(size) = table.max_input_size {
        count.max_input_size = size.0;
    }
    if let Some(policy) = table.policy {
        count.policy = policy.into();
    }
    count
        .validate()
        .map_err(wordfreq_engine::error::EngineError::from)?;
    Ok(count)
}

// From trait implementations for CLI -> Engine enum conversion

macro_rules! map_enum {
    ($from:ty, $to:ty, $($variant:ident),+ $(,)?) => {
        impl From<$from> for $to {
            fn from(f: $from) -> Self {
                match f {
                    $( <$from>::$variant => <$to>::$variant, )+
                }
            }
        }
    };
}

map_enum!(options::OutputFormat, engine_options::OutputFormat, Text, Tsv, Json);
map_enum!(
    options::CollisionPolicy,
    wordfreq_core::CollisionPolicy,
    Fatal,
    LinearProbing
);
