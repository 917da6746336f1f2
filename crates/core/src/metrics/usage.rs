//! Per-thread accounting lines of `/proc/stat`.
//!
//! see `proc_stat(5)` for the field layout.

use super::topology::MAX_THREAD_INDEX;
use crate::model::UsageCounters;
use std::{collections::BTreeMap, io::BufRead};

/// Counters a `cpuN` line must carry: user, nice, system, idle, iowait, irq,
/// softirq, steal, guest and guest_nice.
const FIELDS: usize = 10;

const IDLE: usize = 3;
const IOWAIT: usize = 4;

/// Collect the counters of every `cpuN` line. Lines that are not per-thread
/// accounting lines, or that are malformed, are skipped. Only a failing read
/// is an error.
pub fn parse_accounting<R: BufRead>(reader: R) -> std::io::Result<BTreeMap<usize, UsageCounters>> {
    let mut counters = BTreeMap::new();

    for line in reader.split(b'\n') {
        let line = line?;
        let Ok(line) = std::str::from_utf8(&line) else {
            continue;
        };
        if let Some((index, entry)) = parse_line(line) {
            counters.insert(index, entry);
        }
    }

    Ok(counters)
}

/// Parse a single `cpuN ...` line
pub fn parse_line(line: &str) -> Option<(usize, UsageCounters)> {
    // The aggregate "cpu " line has no index and fails here.
    let (id, rest) = line.strip_prefix("cpu")?.split_once(char::is_whitespace)?;
    let index = id.parse::<usize>().ok().filter(|&index| index <= MAX_THREAD_INDEX)?;

    let mut fields = [0u64; FIELDS];
    let mut values = rest.split_whitespace();
    for field in fields.iter_mut() {
        *field = values.next()?.parse().ok()?;
    }

    // Counters that do not add up are as malformed as missing ones.
    let idle = fields[IDLE].checked_add(fields[IOWAIT])?;
    let total = fields.iter().try_fold(0u64, |acc, &value| acc.checked_add(value))?;
    let active = total.checked_sub(idle)?;

    Some((index, UsageCounters::new(total, active)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const STAT: &str = "\
cpu  4705 356 584 3699 23 23 0 0 0 0
cpu0 1393 280 276 907 10 10 0 0 0 0
cpu1 1000 20 100 800 5 5 0 0 0 0
cpu3 10 0 10 70 10 0 0 0 0 0
intr 114930548 113199788 3 0 5 263 0 4 [... lots more numbers ...]
ctxt 1990473
btime 1062191376
processes 2915
procs_running 1
procs_blocked 0
";

    #[test]
    fn test_parse_line() {
        let (index, counters) = parse_line("cpu3 10 0 10 70 10 0 0 0 0 0").unwrap();
        assert_eq!(index, 3);
        assert_eq!(counters.total_ticks, 100);
        assert_eq!(counters.active_ticks, 20);
    }

    #[test]
    fn test_aggregate_line_is_skipped() {
        assert!(parse_line("cpu  4705 356 584 3699 23 23 0 0 0 0").is_none());
    }

    #[test]
    fn test_malformed_lines_are_skipped() {
        assert!(parse_line("cpu2 1 2 3").is_none());
        assert!(parse_line("cpu2 1 2 3 4 5 6 7 8 nine 10").is_none());
        assert!(parse_line("cpuX 1 2 3 4 5 6 7 8 9 10").is_none());
        assert!(parse_line("ctxt 1990473").is_none());
    }

    #[test]
    fn test_overflowing_counters_are_skipped() {
        let max = u64::MAX;
        assert!(parse_line(&format!("cpu0 {max} {max} 0 0 0 0 0 0 0 0")).is_none());
        assert!(parse_line(&format!("cpu0 0 0 0 {max} {max} 0 0 0 0 0")).is_none());
        assert_eq!(
            parse_line(&format!("cpu0 0 0 0 {max} 0 0 0 0 0 0")),
            Some((0, UsageCounters::new(max, 0)))
        );
    }

    #[test]
    fn test_out_of_range_index_is_skipped() {
        assert!(parse_line(&format!("cpu{} 1 2 3 4 5 6 7 8 9 10", usize::MAX)).is_none());
        assert!(parse_line(&format!("cpu{} 1 2 3 4 5 6 7 8 9 10", MAX_THREAD_INDEX + 1)).is_none());
    }

    #[test]
    fn test_invalid_utf8_line_is_skipped() {
        let mut stat = b"cpu0 1393 280 276 907 10 10 0 0 0 0\n".to_vec();
        stat.extend_from_slice(b"garbage \xff\xfe line\n");
        stat.extend_from_slice(b"cpu1 1000 20 100 800 5 5 0 0 0 0\n");

        let counters = parse_accounting(Cursor::new(stat)).unwrap();
        assert_eq!(counters.keys().copied().collect::<Vec<_>>(), vec![0, 1]);
        assert_eq!(counters[&1], UsageCounters::new(1930, 1125));
    }

    #[test]
    fn test_parse_accounting() {
        let counters = parse_accounting(Cursor::new(STAT)).unwrap();
        assert_eq!(counters.keys().copied().collect::<Vec<_>>(), vec![0, 1, 3]);
        assert_eq!(counters[&0], UsageCounters::new(2876, 1959));
        assert_eq!(counters[&1], UsageCounters::new(1930, 1125));
    }
}
