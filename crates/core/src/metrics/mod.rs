pub mod cpu;
pub mod system;
pub mod temperature;
pub mod topology;
pub mod usage;

pub use temperature::{SensorReading, SensorSource, SysinfoSensors, TemperatureCollector};

use crate::{
    error::{CoreError, DataSource, Result},
    model::UsageCounters,
};
use std::{
    collections::{BTreeMap, BTreeSet},
    fs::{self, File},
    io::BufReader,
    path::{Path, PathBuf},
};

/// The external facts the sampler needs about the machine's cpu threads
pub trait CpuSource {
    /// Number of threads the machine could ever expose
    fn present_threads(&self) -> Result<usize>;

    /// Indices of the threads currently online
    fn online_set(&self) -> Result<BTreeSet<usize>>;

    /// Current clock speed of an online thread, in MHz
    fn frequency_mhz(&self, index: usize) -> Result<f64>;

    /// Physical core an online thread belongs to
    fn core_id(&self, index: usize) -> Result<u32>;

    /// Cumulative tick counters of every thread listed by the kernel
    fn usage_counters(&self) -> Result<BTreeMap<usize, UsageCounters>>;

    /// Processor model string, if the machine reports one
    fn model_name(&self) -> Option<String>;
}

/// Reads cpu facts from the sysfs and procfs pseudo-files
#[derive(Debug, Clone)]
pub struct SysfsSource {
    sys_root: PathBuf,
    proc_root: PathBuf,
}

impl Default for SysfsSource {
    fn default() -> Self {
        Self::with_roots("/sys", "/proc")
    }
}

impl SysfsSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve every path against the given roots instead of `/sys` and `/proc`
    pub fn with_roots<S: Into<PathBuf>, P: Into<PathBuf>>(sys_root: S, proc_root: P) -> Self {
        Self {
            sys_root: sys_root.into(),
            proc_root: proc_root.into(),
        }
    }

    fn cpu_dir(&self) -> PathBuf {
        self.sys_root.join("devices").join("system").join("cpu")
    }

    fn thread_file(&self, index: usize, group: &str, name: &str) -> PathBuf {
        self.cpu_dir().join(format!("cpu{}", index)).join(group).join(name)
    }

    fn read_file(origin: DataSource, path: &Path) -> Result<String> {
        fs::read_to_string(path).map_err(|e| CoreError::read(origin, path, e))
    }
}

impl CpuSource for SysfsSource {
    fn present_threads(&self) -> Result<usize> {
        let contents = Self::read_file(DataSource::PresentThreads, &self.cpu_dir().join("present"))?;
        topology::parse_present_threads(&contents)
    }

    fn online_set(&self) -> Result<BTreeSet<usize>> {
        let contents = Self::read_file(DataSource::OnlineThreads, &self.cpu_dir().join("online"))?;
        Ok(topology::parse_online_set(&contents))
    }

    fn frequency_mhz(&self, index: usize) -> Result<f64> {
        let origin = DataSource::Frequency(index);
        let path = self.thread_file(index, "cpufreq", "scaling_cur_freq");
        let khz = cpu::parse_value::<u64>(origin, &Self::read_file(origin, &path)?)?;
        Ok(cpu::khz_to_mhz(khz))
    }

    fn core_id(&self, index: usize) -> Result<u32> {
        let origin = DataSource::CoreId(index);
        let path = self.thread_file(index, "topology", "core_id");
        cpu::parse_value::<u32>(origin, &Self::read_file(origin, &path)?)
    }

    fn usage_counters(&self) -> Result<BTreeMap<usize, UsageCounters>> {
        let path = self.proc_root.join("stat");
        let file = File::open(&path).map_err(|e| CoreError::read(DataSource::Accounting, &path, e))?;
        usage::parse_accounting(BufReader::new(file))
            .map_err(|e| CoreError::read(DataSource::Accounting, &path, e))
    }

    fn model_name(&self) -> Option<String> {
        system::read_model_name(&self.proc_root.join("cpuinfo"))
    }
}
