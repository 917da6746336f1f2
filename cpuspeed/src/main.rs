use clap::{Arg, ArgAction, Command};
use cpuspeed_core::{config::CliConfig, Config, StopReason};
use std::{io::stdout, process};

#[cfg(all(feature = "logging", debug_assertions))]
mod logging;

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}

fn cli() -> Command {
    Command::new("cpuspeed")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Per-thread CPU clock speed, temperature and usage, refreshed every 2 seconds. Press q to quit.")
        .arg(
            Arg::new("fullscreen")
                .long("fullscreen")
                .short('f')
                .help("Draw on the alternate screen instead of in place")
                .action(ArgAction::SetTrue),
        )
}

fn run() -> anyhow::Result<()> {
    let matches = cli().get_matches();

    #[cfg(all(feature = "logging", debug_assertions))]
    {
        logging::init_logger(log::LevelFilter::Debug, std::ffi::OsStr::new("cpuspeed.log"))?;
    }

    let cli_config = CliConfig {
        fullscreen: matches.get_flag("fullscreen"),
    };
    let config = Config::load(Some(&cli_config))?;
    log::debug!("starting with {:?}", config);

    let mut app = cpuspeed_tui::App::new(config)?;
    let mut stdout = stdout();

    // A failed read ends the loop but is not a failure of the program.
    if let StopReason::Failed(e) = app.run(&mut stdout)? {
        eprintln!("cpuspeed: {}", e);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition() {
        cli().debug_assert();
    }

    #[test]
    fn test_fullscreen_flag() {
        let matches = cli().try_get_matches_from(["cpuspeed", "--fullscreen"]).unwrap();
        assert!(matches.get_flag("fullscreen"));

        let matches = cli().try_get_matches_from(["cpuspeed"]).unwrap();
        assert!(!matches.get_flag("fullscreen"));
    }

    #[test]
    fn test_unknown_flags_rejected() {
        assert!(cli().try_get_matches_from(["cpuspeed", "--refresh", "100"]).is_err());
    }
}
