use crate::error::{CoreError, DataSource, Result};
use std::str::FromStr;

/// Parse a pseudo-file that holds a single integer
pub fn parse_value<T: FromStr>(origin: DataSource, contents: &str) -> Result<T> {
    let value = contents.trim();
    value
        .parse()
        .map_err(|_| CoreError::parse(origin, format!("expected an integer, got {:?}", value)))
}

/// `scaling_cur_freq` reports kHz
pub fn khz_to_mhz(khz: u64) -> f64 {
    khz as f64 / 1000.0
}
