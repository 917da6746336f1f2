//! Parsers for the cpu list descriptors under `/sys/devices/system/cpu`.

use crate::error::{CoreError, DataSource, Result};
use std::collections::BTreeSet;

/// Highest thread index accepted from any descriptor. Anything above is
/// treated as malformed.
pub const MAX_THREAD_INDEX: usize = u16::MAX as usize;

/// Parse the `present` descriptor into a thread count.
///
/// Accepts `"N-M"`, which yields `M - N + 1`, or the bare scalar `"1"`.
pub fn parse_present_threads(contents: &str) -> Result<usize> {
    let line = contents.lines().next().unwrap_or("").trim();
    let invalid = || {
        CoreError::parse(
            DataSource::PresentThreads,
            format!("expected format N-M or 1, got {:?}", line),
        )
    };

    if let Some((begin, end)) = line.split_once('-') {
        let begin: usize = begin.trim().parse().map_err(|_| invalid())?;
        let end: usize = end.trim().parse().map_err(|_| invalid())?;
        if end < begin {
            return Err(invalid());
        }
        return Ok(end - begin + 1);
    }

    match line.parse::<usize>() {
        Ok(1) => Ok(1),
        _ => Err(invalid()),
    }
}

/// Parse the `online` descriptor, a comma separated list of `N-M` ranges and
/// `N` scalars. Entries that do not parse, or that reach past
/// [`MAX_THREAD_INDEX`], are ignored.
pub fn parse_online_set(contents: &str) -> BTreeSet<usize> {
    let mut online = BTreeSet::new();

    for entry in contents.trim().split(',').map(str::trim) {
        match entry.split_once('-') {
            Some((begin, end)) => {
                if let (Ok(begin), Ok(end)) = (begin.parse::<usize>(), end.parse::<usize>()) {
                    if end <= MAX_THREAD_INDEX {
                        online.extend(begin..=end);
                    }
                }
            }
            None => {
                if let Ok(index) = entry.parse::<usize>() {
                    if index <= MAX_THREAD_INDEX {
                        online.insert(index);
                    }
                }
            }
        }
    }

    online
}
