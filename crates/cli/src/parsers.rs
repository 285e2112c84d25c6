use std::{fmt::Display, str::FromStr};
use wordfreq_core::config::{MAX_ORDER, MAX_SLOTS};

/// Byte size with an optional binary suffix (e.g. 4M, 512MiB).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SizeArg(pub usize);

impl FromStr for SizeArg {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().replace('_', "");
        let lower = s.to_ascii_lowercase();
        let (num_str, multiplier) = parse_with_suffix(&lower);
        let num: usize = num_str
            .parse()
            .map_err(|_| format!("Invalid size number: {num_str}"))?;
        num.checked_mul(multiplier)
            .map(Self)
            .ok_or_else(|| format!("Size too large: {s}"))
    }
}

fn parse_with_suffix(s: &str) -> (&str, usize) {
    const KB: usize = 1024;
    const MB: usize = KB * 1024;
    const GB: usize = MB * 1024;
    const SUFFIXES: &[(&[&str], usize)] = &[
        (&["gib", "gb", "g"], GB),
        (&["mib", "mb", "m"], MB),
        (&["kib", "kb", "k"], KB),
    ];
    for (suffixes, multiplier) in SUFFIXES {
        for suffix in *suffixes {
            if let Some(stripped) = s.strip_suffix(suffix) {
                return (stripped.trim(), *multiplier);
            }
        }
    }
    (s, 1)
}

fn parse_bounded_number<T>(s: &str, min: T, max: Option<T>) -> Result<T, String>
where
    T: Copy + PartialOrd + Display + FromStr,
    <T as FromStr>::Err: Display,
{
    let value = s
        .parse::<T>()
        .map_err(|err| format!("invalid number '{s}': {err}"))?;
    if value < min {
        return Err(format!("value must be at least {min}"));
    }
    if let Some(max_bound) = max
        && value > max_bound
    {
        return Err(format!("value must be at most {max_bound}"));
    }
    Ok(value)
}

/// Parse a positive `usize` (>= 1) from CLI input.
///
/// # Errors
/// Returns an error if the input string is not a valid number or is less than 1.
pub fn parse_positive_usize(s: &str) -> Result<usize, String> {
    parse_bounded_number(s, 1, None)
}

/// Parse a bucket order in [1, 24].
///
/// # Errors
/// Returns an error if the input is not a number in range.
pub fn parse_order(s: &str) -> Result<u32, String> {
    parse_bounded_number(s, 1, Some(MAX_ORDER))
}

/// Parse a slot count in [1, 16].
///
/// # Errors
/// Returns an error if the input is not a number in range.
pub fn parse_slots(s: &str) -> Result<usize, String> {
    parse_bounded_number(s, 1, Some(MAX_SLOTS))
}

/// Parse a seed, decimal or `0x` hexadecimal.
///
/// # Errors
/// Returns an error if the input is not a `u32`.
pub fn parse_seed(s: &str) -> Result<u32, String> {
    let s = s.trim();
    match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => u32::from_str_radix(hex, 16).map_err(|err| format!("invalid seed '{s}': {err}")),
        None => parse_bounded_number(s, 0, None),
    }
}
