pub mod cancel;
pub mod config;
pub mod error;
pub mod metrics;
pub mod model;
pub mod sampler;
pub mod scheduler;
pub mod table;

pub use cancel::{CancellationContext, WaitOutcome};
pub use config::{CliConfig, Config};
pub use error::{CoreError, DataSource, Result};
pub use metrics::{CpuSource, SysfsSource, SysinfoSensors, TemperatureCollector};
pub use model::*;
pub use sampler::Sampler;
pub use scheduler::{Scheduler, SchedulerState, StopReason};
pub use table::ThreadTable;
