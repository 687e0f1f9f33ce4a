//! Full cook cycles: programs saved to an EEPROM image, read back and run
//! on the simulated fryer

use fryer_core::{
    CookEngine, CookEvent, CookProgram, CookStep, Cookbook, EngineConfig, EngineState, FryerPins,
};
use fryer_drivers::eeprom::RamEeprom;
use fryer_drivers::sim::{OvenModel, SimulatedFryer};
use fryer_hal::{Clock, Level};
use heapless::Vec;

type Events = Vec<CookEvent, 8>;
type Engine = CookEngine<SimulatedFryer, Events>;

fn fries() -> CookProgram {
    CookProgram::with_steps(
        "Fries",
        false,
        &[CookStep::new(4, 180, false), CookStep::new(2, 0, true)],
    )
    .unwrap()
}

/// Step the simulation in refresh-sized ticks until `done` or `limit_ms`
fn run(engine: &mut Engine, limit_ms: u64, done: impl Fn(&Engine) -> bool) {
    while engine.host().now_millis() < limit_ms && !done(engine) {
        engine.host_mut().advance(500);
        engine.poll();
    }
}

#[test]
fn stored_program_runs_to_completion() {
    let mut cookbook = Cookbook::new(RamEeprom::<1024>::new());
    assert_eq!(cookbook.capacity(), 27);
    assert_eq!(cookbook.initialize_if_needed(false), Ok(true));

    cookbook.write(4, &fries()).unwrap();
    let program = cookbook.read(4).unwrap();
    assert_eq!(program, fries());

    let pins = FryerPins::default();
    let mut engine =
        CookEngine::new(SimulatedFryer::new(pins, 180), Events::new(), EngineConfig::default())
            .unwrap();

    engine.start(&program);
    assert!(engine.host().fan());
    assert_eq!(engine.remaining_seconds(), 4);

    run(&mut engine, 20_000, |e| !e.is_running());

    assert_eq!(
        engine.sink().as_slice(),
        &[
            CookEvent::StepComplete(0),
            CookEvent::StepComplete(1),
            CookEvent::EngineStopped,
        ]
    );
    assert_eq!(engine.state(), EngineState::Stopped);
    assert_eq!(engine.host().now_millis(), 6_000);

    // Already at temperature: the heater never switched on
    let sim = engine.host();
    assert!(!sim.heater());
    assert!(!sim.fan());
    assert!(sim
        .log()
        .iter()
        .all(|change| change.pin != pins.heater || change.level == Level::Low));
}

#[test]
fn preheat_holds_until_released() {
    let pins = FryerPins::default();
    let sim = SimulatedFryer::with_model(pins, OvenModel::default());
    let mut engine = CookEngine::new(sim, Events::new(), EngineConfig::default()).unwrap();

    let program = CookProgram::with_steps("Warm", true, &[CookStep::new(3, 60, true)]).unwrap();
    engine.start(&program);

    run(&mut engine, 120_000, |e| e.preheat_reached());
    assert!(engine.preheat_reached());
    assert!(engine.temperature() >= 60);
    assert_eq!(engine.sink().as_slice(), &[CookEvent::PreheatComplete]);

    // The heater did the work
    assert!(engine
        .host()
        .log()
        .iter()
        .any(|change| change.pin == pins.heater && change.level == Level::High));

    // Timer is held while preheat is enabled
    let reached_at = engine.host().now_millis();
    run(&mut engine, reached_at + 10_000, |_| false);
    assert!(engine.is_running());
    assert_eq!(engine.remaining_seconds(), 3);

    engine.set_preheat(false);
    let released_at = engine.host().now_millis();
    run(&mut engine, released_at + 10_000, |e| !e.is_running());

    assert_eq!(
        engine.sink().as_slice(),
        &[
            CookEvent::PreheatComplete,
            CookEvent::StepComplete(0),
            CookEvent::EngineStopped,
        ]
    );
    assert_eq!(engine.host().now_millis(), released_at + 3_000);
    assert!(!engine.host().heater());
    assert!(!engine.host().fan());
}

#[test]
fn programs_survive_reboot() {
    let mut cookbook = Cookbook::new(RamEeprom::<1024>::new());
    cookbook.initialize_if_needed(false).unwrap();
    cookbook.write(0, &fries()).unwrap();
    let eeprom = cookbook.into_inner();

    let mut cookbook = Cookbook::new(eeprom);
    assert_eq!(cookbook.is_valid(), Ok(true));
    let writes = cookbook.store().write_count();
    assert_eq!(cookbook.initialize_if_needed(false), Ok(false));
    assert_eq!(cookbook.store().write_count(), writes);

    assert_eq!(cookbook.read(0).unwrap(), fries());
    assert_eq!(cookbook.read(26).unwrap().name.as_str(), "Custom 27");
}
