use std::{fmt, path::PathBuf};
use thiserror::Error;

/// Identity of the external source an adapter reads from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataSource {
    PresentThreads,
    OnlineThreads,
    Frequency(usize),
    CoreId(usize),
    Accounting,
    CpuInfo,
    Sensors,
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PresentThreads => f.write_str("present cpus"),
            Self::OnlineThreads => f.write_str("online cpus"),
            Self::Frequency(index) => write!(f, "cpu{} frequency", index),
            Self::CoreId(index) => write!(f, "cpu{} core id", index),
            Self::Accounting => f.write_str("cpu accounting"),
            Self::CpuInfo => f.write_str("cpu info"),
            Self::Sensors => f.write_str("temperature sensors"),
        }
    }
}

/// Core errors for the cpu monitor
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Failed to read {origin} from {}: {error}", .path.display())]
    Read {
        origin: DataSource,
        path: PathBuf,
        #[source]
        error: std::io::Error,
    },

    #[error("Failed to parse {origin}: {detail}")]
    Parse { origin: DataSource, detail: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, CoreError>;

impl CoreError {
    pub fn read<P: Into<PathBuf>>(origin: DataSource, path: P, error: std::io::Error) -> Self {
        Self::Read {
            origin,
            path: path.into(),
            error,
        }
    }

    pub fn parse<S: Into<String>>(origin: DataSource, detail: S) -> Self {
        Self::Parse {
            origin,
            detail: detail.into(),
        }
    }

    pub fn config<S: Into<String>>(msg: S) -> Self {
        Self::Config(msg.into())
    }

    /// The source this error is tagged with, if any
    pub fn origin(&self) -> Option<DataSource> {
        match self {
            Self::Read { origin, .. } | Self::Parse { origin, .. } => Some(*origin),
            _ => None,
        }
    }
}
