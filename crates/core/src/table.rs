use crate::model::{TemperatureReading, ThreadRecord, UsageCounters};
use std::collections::{BTreeMap, BTreeSet};

/// Index-addressed collection of per-thread records
///
/// Slot `i` always holds the record of thread `i`. The table only grows:
/// threads that disappear are marked offline, never removed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ThreadTable {
    records: Vec<ThreadRecord>,
}

impl ThreadTable {
    /// Create a table with `capacity` zeroed records
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            records: (0..capacity).map(ThreadRecord::new).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&ThreadRecord> {
        self.records.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ThreadRecord> {
        self.records.iter()
    }

    /// Make sure slot `index` exists, growing by doubling (or straight to
    /// `index + 1` when doubling is not enough). Returns whether the table grew.
    pub fn ensure_capacity(&mut self, index: usize) -> bool {
        let size = self.records.len();
        if index < size {
            return false;
        }

        let new_size = grown_size(size, index);
        self.records.extend((size..new_size).map(ThreadRecord::new));
        log::debug!("thread table grew from {} to {} entries", size, new_size);
        true
    }

    /// Mark exactly the threads in `online` as online
    pub fn apply_online_set(&mut self, online: &BTreeSet<usize>) {
        if let Some(&highest) = online.last() {
            self.ensure_capacity(highest);
        }

        for record in &mut self.records {
            record.online = online.contains(&record.index);
        }
    }

    /// Store the frequency and core id read for one thread
    pub fn apply_thread_info(&mut self, index: usize, frequency_mhz: f64, core_id: u32) {
        self.ensure_capacity(index);
        let record = &mut self.records[index];
        record.frequency_mhz = frequency_mhz;
        record.core_id = core_id;
    }

    /// Fold a new set of cumulative counters into the usage percentages
    pub fn apply_usage_deltas(&mut self, counters: &BTreeMap<usize, UsageCounters>) {
        for (&index, &current) in counters {
            self.ensure_capacity(index);
            let record = &mut self.records[index];

            if let Some(percent) = usage_percent(record.usage_counters, current) {
                record.usage_percent = percent;
            }
            record.usage_counters = current;
        }
    }

    /// Broadcast a temperature to the threads it covers
    pub fn apply_temperature(&mut self, reading: &TemperatureReading) {
        match *reading {
            TemperatureReading::Core { core_id, celsius } => {
                self.records
                    .iter_mut()
                    .filter(|record| record.core_id == core_id)
                    .for_each(|record| record.temperature_c = celsius);
            }
            TemperatureReading::Package { celsius } => {
                self.records
                    .iter_mut()
                    .for_each(|record| record.temperature_c = celsius);
            }
        }
    }
}

impl<'a> IntoIterator for &'a ThreadTable {
    type Item = &'a ThreadRecord;
    type IntoIter = std::slice::Iter<'a, ThreadRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

/// Size after growing a table of `size` to hold `index`
fn grown_size(size: usize, index: usize) -> usize {
    size.saturating_mul(2).max(index.saturating_add(1))
}

/// Percentage of active ticks between two counter samples, or `None` when
/// no ticks elapsed.
fn usage_percent(previous: UsageCounters, current: UsageCounters) -> Option<u8> {
    let total = i128::from(current.total_ticks) - i128::from(previous.total_ticks);
    if total == 0 {
        return None;
    }

    let active = i128::from(current.active_ticks) - i128::from(previous.active_ticks);
    let percent = (100.0 * active as f64 / total as f64).round();
    Some(percent.clamp(0.0, 100.0) as u8)
}
