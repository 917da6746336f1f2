/// Last-seen cumulative tick counters of one thread
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UsageCounters {
    pub total_ticks: u64,
    pub active_ticks: u64,
}

impl UsageCounters {
    pub fn new(total_ticks: u64, active_ticks: u64) -> Self {
        Self {
            total_ticks,
            active_ticks,
        }
    }
}

/// Per-thread state shown as one row of the table
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ThreadRecord {
    pub index: usize,
    /// Physical core grouping, 0 until first read
    pub core_id: u32,
    pub online: bool,
    /// Only meaningful while `online`
    pub frequency_mhz: f64,
    pub temperature_c: f64,
    pub usage_percent: u8,
    pub(crate) usage_counters: UsageCounters,
}

impl ThreadRecord {
    /// A zeroed record for the given thread index
    pub fn new(index: usize) -> Self {
        Self {
            index,
            ..Self::default()
        }
    }
}

/// One temperature observation from the sensor subsystem
#[derive(Debug, Clone, PartialEq)]
pub enum TemperatureReading {
    /// Value for every thread sharing the given core id
    Core { core_id: u32, celsius: f64 },
    /// Value for every thread of the machine
    Package { celsius: f64 },
}
