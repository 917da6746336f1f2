use crate::model::TemperatureReading;
use sysinfo::Components;

/// One temperature feature as reported by the sensor subsystem
#[derive(Debug, Clone, PartialEq)]
pub struct SensorReading {
    /// Chip name followed by the feature label, e.g. `coretemp Core 0`
    pub label: String,
    pub celsius: f64,
}

impl SensorReading {
    pub fn new<S: Into<String>>(label: S, celsius: f64) -> Self {
        Self {
            label: label.into(),
            celsius,
        }
    }
}

/// Provider of raw sensor readings
pub trait SensorSource {
    /// Refresh and return every temperature feature currently visible
    fn read(&mut self) -> Vec<SensorReading>;
}

/// Sensor readings backed by the `sysinfo` component list
pub struct SysinfoSensors {
    components: Components,
}

impl SysinfoSensors {
    pub fn new() -> Self {
        Self {
            components: Components::new_with_refreshed_list(),
        }
    }
}

impl Default for SysinfoSensors {
    fn default() -> Self {
        Self::new()
    }
}

impl SensorSource for SysinfoSensors {
    fn read(&mut self) -> Vec<SensorReading> {
        self.components.refresh();

        let mut readings = Vec::new();
        for component in &self.components {
            let celsius = f64::from(component.temperature());
            if celsius.is_finite() {
                readings.push(SensorReading::new(component.label(), celsius));
            }
        }
        readings
    }
}

/// Cpu temperature chips we know how to map onto threads
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Chip {
    /// Intel, one `Core N` feature per physical core
    CoreTemp,
    /// AMD, a single `Tctl` control temperature
    K10Temp,
    /// ARM SoCs, a single zone for the whole package
    CpuThermal,
}

impl Chip {
    const ALL: [Chip; 3] = [Chip::CoreTemp, Chip::K10Temp, Chip::CpuThermal];

    fn prefix(self) -> &'static str {
        match self {
            Self::CoreTemp => "coretemp",
            Self::K10Temp => "k10temp",
            Self::CpuThermal => "cpu_thermal",
        }
    }

    /// The chip a label belongs to, with the remaining feature label
    fn split(label: &str) -> Option<(Chip, &str)> {
        Self::ALL.into_iter().find_map(|chip| {
            label
                .strip_prefix(chip.prefix())
                .map(|feature| (chip, feature.trim()))
        })
    }
}

/// Maps sensor readings of the detected chip onto threads
pub struct TemperatureCollector {
    sensors: Box<dyn SensorSource>,
    chip: Chip,
}

impl TemperatureCollector {
    /// Look for a supported chip. Returns `None` when there is none, in which
    /// case temperatures stay unavailable for the whole run.
    pub fn detect(mut sensors: Box<dyn SensorSource>) -> Option<Self> {
        let chip = sensors
            .read()
            .iter()
            .find_map(|reading| Chip::split(&reading.label).map(|(chip, _)| chip));

        match chip {
            Some(chip) => {
                log::debug!("using {:?} temperature sensors", chip);
                Some(Self { sensors, chip })
            }
            None => {
                log::warn!("no supported cpu temperature sensor found");
                None
            }
        }
    }

    pub fn chip(&self) -> Chip {
        self.chip
    }

    /// Current temperatures of the detected chip
    pub fn collect(&mut self) -> Vec<TemperatureReading> {
        let chip = self.chip;
        let readings = self.sensors.read();
        let features = readings.iter().filter_map(|reading| match Chip::split(&reading.label) {
            Some((found, feature)) if found == chip => Some((feature, reading.celsius)),
            _ => None,
        });

        match chip {
            Chip::CoreTemp => features
                .filter_map(|(feature, celsius)| {
                    let core_id = feature.strip_prefix("Core ")?.trim().parse().ok()?;
                    Some(TemperatureReading::Core { core_id, celsius })
                })
                .collect(),
            Chip::K10Temp => features
                .filter(|(feature, _)| *feature == "Tctl")
                .take(1)
                .map(|(_, celsius)| TemperatureReading::Package { celsius })
                .collect(),
            Chip::CpuThermal => features
                .take(1)
                .map(|(_, celsius)| TemperatureReading::Package { celsius })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedSensors(Vec<SensorReading>);

    impl SensorSource for FixedSensors {
        fn read(&mut self) -> Vec<SensorReading> {
            self.0.clone()
        }
    }

    fn collector(readings: Vec<SensorReading>) -> Option<TemperatureCollector> {
        TemperatureCollector::detect(Box::new(FixedSensors(readings)))
    }

    #[test]
    fn test_no_supported_chip() {
        assert!(collector(vec![]).is_none());
        assert!(collector(vec![SensorReading::new("nvme Composite", 40.0)]).is_none());
    }

    #[test]
    fn test_coretemp_per_core() {
        let mut temps = collector(vec![
            SensorReading::new("acpitz temp1", 27.8),
            SensorReading::new("coretemp Package id 0", 55.0),
            SensorReading::new("coretemp Core 0", 51.0),
            SensorReading::new("coretemp Core 1", 53.0),
        ])
        .unwrap();

        assert_eq!(temps.chip(), Chip::CoreTemp);
        assert_eq!(
            temps.collect(),
            vec![
                TemperatureReading::Core { core_id: 0, celsius: 51.0 },
                TemperatureReading::Core { core_id: 1, celsius: 53.0 },
            ]
        );
    }

    #[test]
    fn test_k10temp_uses_tctl() {
        let mut temps = collector(vec![
            SensorReading::new("k10temp Tccd1", 60.0),
            SensorReading::new("k10temp Tctl", 62.5),
        ])
        .unwrap();

        assert_eq!(temps.collect(), vec![TemperatureReading::Package { celsius: 62.5 }]);
    }

    #[test]
    fn test_cpu_thermal_machine_wide() {
        let mut temps = collector(vec![SensorReading::new("cpu_thermal temp1", 48.3)]).unwrap();
        assert_eq!(temps.chip(), Chip::CpuThermal);
        assert_eq!(temps.collect(), vec![TemperatureReading::Package { celsius: 48.3 }]);
    }
}
