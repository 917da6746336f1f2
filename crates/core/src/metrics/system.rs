use std::path::Path;

/// Read the processor model from a `cpuinfo` file. Any failure just means
/// there is no model to show.
#[cfg(feature = "linux_procfs")]
pub fn read_model_name(path: &Path) -> Option<String> {
    use procfs::FromRead;

    match procfs::CpuInfo::from_file(path) {
        Ok(info) => info.model_name(0).map(|name| name.trim().to_string()),
        Err(e) => {
            log::debug!("no processor model from {}: {}", path.display(), e);
            None
        }
    }
}

/// Read the processor model from a `cpuinfo` file. Any failure just means
/// there is no model to show.
#[cfg(not(feature = "linux_procfs"))]
pub fn read_model_name(path: &Path) -> Option<String> {
    match std::fs::read_to_string(path) {
        Ok(contents) => parse_model_name(&contents),
        Err(e) => {
            log::debug!("no processor model from {}: {}", path.display(), e);
            None
        }
    }
}

/// Value of the first `model name` field
pub fn parse_model_name(cpuinfo: &str) -> Option<String> {
    cpuinfo
        .lines()
        .filter(|line| line.starts_with("model name"))
        .find_map(|line| line.split_once(':'))
        .map(|(_, name)| name.trim().to_string())
        .filter(|name| !name.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_model_name() {
        let cpuinfo = "processor\t: 0\nvendor_id\t: GenuineIntel\nmodel\t\t: 142\n\
                       model name\t: Intel(R) Core(TM) i7-8550U CPU @ 1.80GHz\nstepping\t: 10\n\n\
                       processor\t: 1\nmodel name\t: something else\n";
        assert_eq!(
            parse_model_name(cpuinfo).as_deref(),
            Some("Intel(R) Core(TM) i7-8550U CPU @ 1.80GHz")
        );
    }

    #[test]
    fn test_missing_model_name() {
        assert_eq!(parse_model_name("processor\t: 0\nFeatures\t: fp asimd\n"), None);
        assert_eq!(parse_model_name("model name\t: \n"), None);
    }
}
