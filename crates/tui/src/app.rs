use crate::{
    input,
    render::{self, DisplayMode, Renderer},
    terminal::{self, Detected, TerminalCapabilities},
};
use anyhow::Context;
use cpuspeed_core::{
    CancellationContext, Config, CoreError, CpuSource, Sampler, Scheduler, StopReason,
    SysfsSource, SysinfoSensors, TemperatureCollector,
};
use std::io::Write;

/// Application state
pub struct App<S = SysfsSource> {
    config: Config,
    sampler: Sampler<S>,
    cancel: CancellationContext,
    model_name: Option<String>,
}

impl App {
    /// Set up the machine's data sources. Fails when its threads cannot be
    /// enumerated.
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let temperature = TemperatureCollector::detect(Box::new(SysinfoSensors::new()));
        let sampler = Sampler::new(SysfsSource::new(), temperature)
            .context("Error during initialization")?;
        Ok(Self::with_sampler(config, sampler))
    }
}

impl<S: CpuSource> App<S> {
    pub fn with_sampler(config: Config, sampler: Sampler<S>) -> Self {
        let model_name = sampler.source().model_name();

        Self {
            config,
            sampler,
            cancel: CancellationContext::new(),
            model_name,
        }
    }

    pub fn cancellation(&self) -> &CancellationContext {
        &self.cancel
    }

    /// Main application loop. Returns once the user quits, a termination
    /// signal arrives or sampling fails; the terminal is restored in all
    /// three cases.
    pub fn run<W: Write>(&mut self, writer: &mut W) -> anyhow::Result<StopReason> {
        match terminal::detect() {
            Detected::Ansi(term) => self.run_with(writer, &term),
            Detected::Null(term) => self.run_with(writer, &term),
        }
    }

    fn run_with<W: Write, T: TerminalCapabilities>(
        &mut self,
        writer: &mut W,
        term: &T,
    ) -> anyhow::Result<StopReason> {
        let handler_cancel = self.cancel.clone();
        ctrlc::set_handler(move || handler_cancel.cancel())
            .context("Failed to install the termination handler")?;

        let listener = input::spawn_stdin_listener(
            self.cancel.clone(),
            self.config.input_poll_interval(),
        )
        .context("Failed to start the input thread")?;

        let result = self.present(writer, term);
        if listener.join().is_err() {
            log::error!("input thread panicked");
        }
        result
    }

    /// Draw until stopped, then cancel the other roles and put the terminal
    /// back the way it was, whether or not drawing failed.
    fn present<W: Write, T: TerminalCapabilities>(
        &mut self,
        writer: &mut W,
        term: &T,
    ) -> anyhow::Result<StopReason> {
        let fullscreen = self.config.fullscreen && term.supports_fullscreen();
        let result = self.draw_loop(writer, term, fullscreen);

        self.cancel.cancel();
        let restored = Self::restore_terminal(writer, term, fullscreen);

        let reason = result?;
        restored?;
        Ok(reason)
    }

    fn draw_loop<W: Write, T: TerminalCapabilities>(
        &mut self,
        writer: &mut W,
        term: &T,
        fullscreen: bool,
    ) -> anyhow::Result<StopReason> {
        if fullscreen {
            term.enter_fullscreen(writer)?;
            term.move_cursor(writer, 0, 0)?;
        }

        if let Some(model_name) = &self.model_name {
            writer.write_all(render::banner(model_name, term.supports_style()).as_bytes())?;
        }
        writer.write_all(render::header().as_bytes())?;
        term.hide_cursor(writer)?;
        writer.flush()?;

        let mode = if fullscreen {
            DisplayMode::Fullscreen
        } else {
            DisplayMode::Inline
        };
        let mut renderer = Renderer::new(mode, self.model_name.is_some());
        let mut scheduler = Scheduler::new(self.cancel.clone(), self.config.refresh_interval());

        let reason = scheduler.run(&mut self.sampler, |table| {
            renderer.draw(writer, term, table).map_err(CoreError::from)
        });
        log::debug!("stopped after {} cycles: {:?}", scheduler.cycles(), reason);

        renderer.finish(writer)?;
        Ok(reason)
    }

    fn restore_terminal<W: Write, T: TerminalCapabilities>(
        writer: &mut W,
        term: &T,
        fullscreen: bool,
    ) -> anyhow::Result<()> {
        term.show_cursor(writer)?;
        if fullscreen {
            term.exit_fullscreen(writer)?;
        }
        writer.flush()?;
        Ok(())
    }
}
