//! Cook engine state machine
//!
//! The engine owns its run state and advances it only from [`CookEngine::poll`],
//! which the main loop calls at least once per refresh interval. Each
//! refresh resamples the temperature, handles the preheat hold, completes
//! steps whose time is up and re-evaluates the heater.

use heapless::Vec;

use fryer_hal::HostIo;

use super::events::{CookEvent, EventSink};
use crate::config::{ConfigError, EngineConfig};
use crate::program::{CookProgram, CookStep, MAX_STEPS};
use crate::thermal::{Hysteresis, TemperatureSampler};

/// Engine states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EngineState {
    /// Never started since power-on
    Idle,
    /// Executing a program
    Running {
        /// Index of the step being timed
        step: u8,
        /// Step timing is held until the user releases preheat
        preheat: bool,
    },
    /// A run ended; `start` begins a new one
    Stopped,
}

/// Per-run bookkeeping, dropped on stop
#[derive(Debug, Clone)]
struct RunState {
    /// Current step index
    step_index: u8,
    /// Reference point for step timing (ms)
    started_at_ms: u64,
    /// When the preheat target was first reached (ms)
    preheat_reached_at_ms: Option<u64>,
    /// Heater dead band state
    hysteresis: Hysteresis,
}

/// Cooperative cook cycle controller
///
/// Generic over the host capabilities `H` and the notification sink `S`,
/// both owned for the engine's lifetime.
pub struct CookEngine<H, S> {
    host: H,
    sink: S,
    config: EngineConfig,
    sampler: TemperatureSampler,
    /// Installed program steps (copied, immutable during a run)
    steps: Vec<CookStep, MAX_STEPS>,
    /// Preheat hold requested
    preheat: bool,
    run: Option<RunState>,
    /// At least one run has ended
    has_stopped: bool,
    last_refresh_ms: u64,
    heater_on: bool,
    fan_on: bool,
}

impl<H: HostIo, S: EventSink> CookEngine<H, S> {
    /// Create an idle engine
    ///
    /// Forces both outputs off and primes the temperature filter so the
    /// first reading is accurate.
    pub fn new(mut host: H, sink: S, config: EngineConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut sampler = TemperatureSampler::new(config.pins.sensor);
        sampler.prime(&mut host);
        let last_refresh_ms = host.now_millis();

        let mut engine = Self {
            host,
            sink,
            config,
            sampler,
            steps: Vec::new(),
            preheat: false,
            run: None,
            has_stopped: false,
            last_refresh_ms,
            heater_on: false,
            fan_on: false,
        };
        engine.set_heater(false);
        engine.set_fan(false);

        Ok(engine)
    }

    /// Install a program without starting it
    ///
    /// A run in progress keeps going on the new steps from its current
    /// index; [`CookEngine::start_loaded`] restarts it from the first step.
    /// Emits nothing.
    pub fn load(&mut self, program: &CookProgram) {
        self.steps.clone_from(&program.steps);
        self.preheat = program.preheat;
    }

    /// Install a program and start it
    pub fn start(&mut self, program: &CookProgram) {
        self.load(program);
        self.start_loaded();
    }

    /// Start (or restart) the installed program from its first step
    pub fn start_loaded(&mut self) {
        let now = self.host.now_millis();

        self.run = Some(RunState {
            step_index: 0,
            started_at_ms: now,
            preheat_reached_at_ms: None,
            hysteresis: Hysteresis::new(self.config.hysteresis_offset_c),
        });

        let fan = self.steps.first().is_some_and(CookStep::is_heating);
        self.set_fan(fan);

        info!(
            "cook started: {} steps, preheat={}",
            self.steps.len(),
            self.preheat
        );
    }

    /// End the run and switch both outputs off
    ///
    /// Emits [`CookEvent::EngineStopped`] once per run; stopping an engine
    /// that is not running only forces the outputs off.
    pub fn stop(&mut self) {
        let was_running = self.run.take().is_some();

        self.set_fan(false);
        self.set_heater(false);

        if was_running {
            self.has_stopped = true;
            info!("cook stopped");
            self.sink.notify(CookEvent::EngineStopped);
        }
    }

    /// Advance the control loop
    ///
    /// Does nothing until a full refresh interval has passed since the last
    /// refresh. Returns `true` when a refresh happened.
    pub fn poll(&mut self) -> bool {
        let now = self.host.now_millis();
        if now.saturating_sub(self.last_refresh_ms) < self.config.refresh_interval_ms as u64 {
            return false;
        }
        self.last_refresh_ms = now;

        self.sampler.sample(&mut self.host);

        if self.run.is_none() {
            return true;
        }

        if self.current_step().is_none() {
            // Empty program
            self.stop();
            return true;
        }

        if self.preheat && self.tick_preheat(now) {
            return true;
        }

        self.tick_steps();
        self.adjust_heat();

        true
    }

    /// Hold step timing while preheating
    ///
    /// Returns `true` if the preheat timeout stopped the engine.
    fn tick_preheat(&mut self, now: u64) -> bool {
        let temperature = self.sampler.average();
        let target = self.current_target();
        let timeout_ms = self.config.preheat_timeout_s as u64 * 1000;

        let Some(run) = self.run.as_mut() else {
            return false;
        };
        run.started_at_ms = now;
        let reached_at_ms = run.preheat_reached_at_ms;

        match reached_at_ms {
            Some(reached_at) => {
                if now.saturating_sub(reached_at) >= timeout_ms {
                    warn!("preheat timeout after {} s", self.config.preheat_timeout_s);
                    self.stop();
                    return true;
                }
            }
            None => {
                if temperature >= target {
                    run.preheat_reached_at_ms = Some(now);
                    info!("preheat reached {} C", temperature);
                    self.sink.notify(CookEvent::PreheatComplete);
                }
            }
        }

        false
    }

    /// Complete the current step once its time is up
    fn tick_steps(&mut self) {
        if self.remaining_seconds() > 0 {
            return;
        }

        let completed = self.current_step_index();

        // Skip steps without any time
        let mut next = completed as usize + 1;
        while next < self.steps.len() && self.steps[next].duration_s == 0 {
            next += 1;
        }

        debug!("step {} complete, next {}", completed, next);
        self.sink.notify(CookEvent::StepComplete(completed));

        let Some(step) = self.steps.get(next).copied() else {
            self.stop();
            return;
        };

        let temperature = self.sampler.average();
        if let Some(run) = self.run.as_mut() {
            run.step_index = next as u8;
            run.hysteresis.retarget(temperature, step.target_c);
        }
        self.set_fan(step.is_heating());
    }

    /// Run the heater hysteresis for the current step
    fn adjust_heat(&mut self) {
        let temperature = self.sampler.average();
        let target = self.current_target();

        let Some(run) = self.run.as_mut() else {
            return;
        };
        let heater = run.hysteresis.update(temperature, target);
        self.set_heater(heater);
    }

    fn current_target(&self) -> u8 {
        self.current_step().map_or(0, |s| s.target_c)
    }

    fn set_heater(&mut self, on: bool) {
        if on != self.heater_on {
            trace!("heater {}", on);
        }
        self.heater_on = on;
        self.host.set_output(self.config.pins.heater, on);
    }

    fn set_fan(&mut self, on: bool) {
        if on != self.fan_on {
            trace!("fan {}", on);
        }
        self.fan_on = on;
        self.host.set_output(self.config.pins.fan, on);
    }

    /// Current engine state
    pub fn state(&self) -> EngineState {
        match &self.run {
            Some(run) => EngineState::Running {
                step: run.step_index,
                preheat: self.preheat,
            },
            None if self.has_stopped => EngineState::Stopped,
            None => EngineState::Idle,
        }
    }

    /// Check if a program is running
    pub fn is_running(&self) -> bool {
        self.run.is_some()
    }

    /// Whole seconds since the step timing reference
    ///
    /// The reference is the run start, moved forward on every refresh while
    /// preheat holds the timer. Zero when not running.
    pub fn elapsed_seconds(&self) -> u32 {
        match &self.run {
            Some(run) => (self.host.now_millis().saturating_sub(run.started_at_ms) / 1000) as u32,
            None => 0,
        }
    }

    /// Seconds left in the current step, never negative
    pub fn remaining_seconds(&self) -> u32 {
        let Some(run) = &self.run else {
            return 0;
        };
        let index = run.step_index as usize;
        let Some(step) = self.steps.get(index) else {
            return 0;
        };

        let prior: i64 = self.steps[..index]
            .iter()
            .map(|s| s.duration_s as i64)
            .sum();
        let into_step = self.elapsed_seconds() as i64 - prior;

        (step.duration_s as i64 - into_step).max(0) as u32
    }

    /// Installed step by index
    pub fn step(&self, index: usize) -> Option<&CookStep> {
        self.steps.get(index)
    }

    /// Step being timed, if running
    pub fn current_step(&self) -> Option<&CookStep> {
        self.run
            .as_ref()
            .and_then(|run| self.steps.get(run.step_index as usize))
    }

    /// Index of the step being timed (0 when not running)
    pub fn current_step_index(&self) -> u8 {
        self.run.as_ref().map_or(0, |run| run.step_index)
    }

    /// Number of installed steps
    pub fn steps_count(&self) -> usize {
        self.steps.len()
    }

    /// Check if the preheat hold is active
    pub fn preheat_enabled(&self) -> bool {
        self.preheat
    }

    /// Enable or release the preheat hold
    ///
    /// Releasing it mid-run starts step timing from the last refresh.
    pub fn set_preheat(&mut self, enabled: bool) {
        debug!("preheat hold {}", enabled);
        self.preheat = enabled;
    }

    /// Check if the preheat target was reached in this run
    pub fn preheat_reached(&self) -> bool {
        self.run
            .as_ref()
            .is_some_and(|run| run.preheat_reached_at_ms.is_some())
    }

    /// Filtered temperature in °C
    pub fn temperature(&self) -> u8 {
        self.sampler.average()
    }

    /// Refill the temperature filter with fresh readings
    pub fn reset_temperature(&mut self) -> u8 {
        self.sampler.prime(&mut self.host)
    }

    /// Check if the current step's target has been reached
    pub fn is_on_temperature(&self) -> bool {
        self.run
            .as_ref()
            .is_some_and(|run| run.hysteresis.is_on_temperature())
    }

    /// Last heater output written
    pub fn heater_on(&self) -> bool {
        self.heater_on
    }

    /// Last fan output written
    pub fn fan_on(&self) -> bool {
        self.fan_on
    }

    /// Active configuration
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Get access to the host capabilities
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Get mutable access to the host capabilities
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Get access to the event sink
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Get mutable access to the event sink
    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// Release the host and sink
    pub fn into_parts(self) -> (H, S) {
        (self.host, self.sink)
    }
}
