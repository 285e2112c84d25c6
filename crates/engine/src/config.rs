use crate::error::{EngineError, Result};
use crate::options::{InputSource, OutputFormat, OutputTarget};
use derive_builder::Builder;
use std::path::Path;
use wordfreq_core::CountConfig;

/// Everything one counting run needs.
#[derive(Debug, Clone, Default, Builder)]
#[builder(setter(into))]
pub struct Config {
    #[builder(default)]
    pub input: InputSource,
    #[builder(default)]
    pub output: OutputTarget,
    #[builder(default)]
    pub format: OutputFormat,
    /// Keep only the first N ranked words.
    #[builder(default)]
    pub top_n: Option<usize>,
    /// Re-count with a plain hash map and compare.
    #[builder(default)]
    pub verify: bool,
    #[builder(default)]
    pub count: CountConfig,
}

/// Options of the offline seed search.
#[derive(Debug, Clone, Builder)]
#[builder(setter(into))]
pub struct SeedSearchConfig {
    #[builder(default)]
    pub input: InputSource,
    #[builder(default = "wordfreq_core::config::DEFAULT_ORDER")]
    pub order: u32,
    #[builder(default = "wordfreq_core::config::DEFAULT_SLOTS")]
    pub slots: usize,
    #[builder(default = "0")]
    pub first_seed: u32,
    #[builder(default = "u32::MAX")]
    pub last_seed: u32,
    /// Stop after this many valid seeds.
    #[builder(default = "1")]
    pub limit: usize,
    #[builder(default = "num_cpus::get()")]
    pub threads: usize,
    #[builder(default = "wordfreq_core::config::DEFAULT_MAX_INPUT_SIZE")]
    pub max_input_size: usize,
}

impl Default for SeedSearchConfig {
    fn default() -> Self {
        Self {
            input: InputSource::Stdin,
            order: wordfreq_core::config::DEFAULT_ORDER,
            slots: wordfreq_core::config::DEFAULT_SLOTS,
            first_seed: 0,
            last_seed: u32::MAX,
            limit: 1,
            threads: num_cpus::get(),
            max_input_size: wordfreq_core::config::DEFAULT_MAX_INPUT_SIZE,
        }
    }
}

/// Reads a [`CountConfig`] from a JSON file. Missing fields take their defaults.
///
/// # Errors
///
/// I/O and JSON errors, or a configuration that does not validate.
pub fn load_count_config(path: &Path) -> Result<CountConfig> {
    let text = std::fs::read_to_string(path).map_err(|source| EngineError::ConfigRead {
        path: path.to_path_buf(),
        source,
    })?;
    let config: CountConfig = serde_json::from_str(&text)?;
    config.validate()?;
    log::debug!("loaded counting configuration from {}: {config:?}", path.display());
    Ok(config)
}
