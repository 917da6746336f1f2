use crate::{
    error::Result,
    metrics::{CpuSource, SysfsSource, TemperatureCollector},
    table::ThreadTable,
};

/// Runs refresh cycles of the thread table against a [`CpuSource`]
pub struct Sampler<S = SysfsSource> {
    source: S,
    temperature: Option<TemperatureCollector>,
    table: ThreadTable,
}

impl<S: CpuSource> Sampler<S> {
    /// Size the table from the present-thread descriptor. Failing to read it
    /// is fatal: there is nothing to monitor without it.
    pub fn new(source: S, temperature: Option<TemperatureCollector>) -> Result<Self> {
        let present = source.present_threads()?;
        log::debug!("{} present cpu threads", present);

        Ok(Self {
            source,
            temperature,
            table: ThreadTable::with_capacity(present),
        })
    }

    pub fn table(&self) -> &ThreadTable {
        &self.table
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn has_temperature(&self) -> bool {
        self.temperature.is_some()
    }

    /// One refresh cycle. Stops at the first failing required source.
    pub fn refresh(&mut self) -> Result<()> {
        let online = self.source.online_set()?;
        self.table.apply_online_set(&online);

        for &index in &online {
            let frequency_mhz = self.source.frequency_mhz(index)?;
            let core_id = self.source.core_id(index)?;
            self.table.apply_thread_info(index, frequency_mhz, core_id);
        }

        let counters = self.source.usage_counters()?;
        self.table.apply_usage_deltas(&counters);

        if let Some(temperature) = &mut self.temperature {
            for reading in temperature.collect() {
                self.table.apply_temperature(&reading);
            }
        }

        Ok(())
    }
}
