//! Headless scene runner: drives every station through a short script with
//! recording backends and prints what was rendered.
//!
//! Usage: `feedback-native [--seed N] [--realtime]`

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use anyhow::Context;
use feedback_core::recording::*;
use feedback_core::{
    AudioClip, ControllerNode, CooldownParams, FeedbackConfig, FeedbackContext, FeedbackDispatcher,
    Hand, HandTarget, HapticClip, HapticMode, SessionVoices,
};
use glam::Vec3;
use haptic_stations::events::impact::{BodyMotion, ImpactRelay};
use haptic_stations::events::{Collider, Interactor, InteractorKind};
use haptic_stations::*;
use instant::Instant;

const FRAME_DT: f32 = 1.0 / 90.0;
const TABLE: Collider = Collider {
    id: 1,
    category: 0,
    is_trigger: false,
};

struct Options {
    seed: u64,
    realtime: bool,
}

fn parse_args() -> anyhow::Result<Options> {
    let mut opts = Options {
        seed: 42,
        realtime: false,
    };
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--seed" => {
                let v = args.next().context("--seed needs a value")?;
                opts.seed = v.parse().with_context(|| format!("invalid seed '{v}'"))?;
            }
            "--realtime" => opts.realtime = true,
            other => anyhow::bail!("unknown argument '{other}'"),
        }
    }
    Ok(opts)
}

fn voice(name: &str, len: f32, volume: f32) -> FeedbackConfig {
    FeedbackConfig::default()
        .with_sfx(AudioClip::new(name, len), volume)
        .with_advanced(HapticClip::new(format!("{name}.haptic")), 0.8)
}

#[derive(Default)]
struct Launcher {
    fired: Rc<RefCell<usize>>,
}

impl ProjectileSpawner for Launcher {
    fn spawn(&mut self, position: Vec3, velocity: Vec3, lifetime_sec: f32) {
        *self.fired.borrow_mut() += 1;
        log::info!(
            "[gun] projectile at ({:.2},{:.2},{:.2}) v={:.1} m/s life={lifetime_sec}s",
            position.x,
            position.y,
            position.z,
            velocity.length()
        );
    }
}

/// Frame clock plus every recorder the scene renders into.
struct Scene {
    ctx: FeedbackContext,
    left: PulseLog,
    right: PulseLog,
    clips: ClipLog,
    emitters: Vec<EmitterHandle>,
    realtime: bool,
    frames: u64,
}

impl Scene {
    fn new(realtime: bool) -> Self {
        let (l, left) = RecordingPulse::new();
        let (r, right) = RecordingPulse::new();
        let (c, clips) = RecordingClips::new();
        let dispatcher = FeedbackDispatcher::new()
            .with_pulse(Hand::Left, Box::new(l))
            .with_pulse(Hand::Right, Box::new(r))
            .with_clips(Box::new(c));
        Self {
            ctx: FeedbackContext::new(dispatcher),
            left,
            right,
            clips,
            emitters: Vec::new(),
            realtime,
            frames: 0,
        }
    }

    fn emitter(&mut self) -> Box<RecordingEmitter> {
        let (e, handle) = RecordingEmitter::new();
        self.emitters.push(handle);
        Box::new(e)
    }

    /// Advance mixer time and the shared clock by one frame.
    fn frame(&mut self, dt: f32) {
        let start = Instant::now();
        for e in &self.emitters {
            e.borrow_mut().advance(dt);
        }
        self.ctx.advance(dt);
        self.frames += 1;
        if self.realtime {
            let budget = Duration::from_secs_f32(dt);
            let spent = start.elapsed();
            if spent < budget {
                std::thread::sleep(budget - spent);
            }
        }
    }

    fn one_shots(&self) -> usize {
        self.emitters.iter().map(|e| e.borrow().one_shots.len()).sum()
    }
}

fn run_friction(scene: &mut Scene, seed: u64) -> (usize, usize) {
    let voices = SessionVoices {
        bed_a: scene.emitter(),
        bed_b: scene.emitter(),
        grain: scene.emitter(),
    };
    let mut stone = FrictionStation::new(
        FrictionParams::default(),
        voice("stone_scrape", 2.4, 0.9),
        voices,
        seed,
    );
    let hand = Interactor::new(InteractorKind::Direct).on(ControllerNode::RightHand);
    let mut pos = Vec3::new(0.0, 0.8, 0.0);
    stone.grab(&hand, pos);
    stone.contact_enter(&mut scene.ctx, &TABLE);

    let (mut grains, mut peak) = (0, 0.0f32);
    let frames = (2.0 / FRAME_DT) as usize;
    for i in 0..frames {
        // Back-and-forth strokes that speed up then slow down.
        let t = i as f32 * FRAME_DT;
        let speed = 0.9 * (std::f32::consts::PI * t / 2.0).sin();
        pos.x += speed * (2.0 * t).cos().signum() * FRAME_DT;
        scene.frame(FRAME_DT);
        let tick = stone.tick(&mut scene.ctx, FRAME_DT, pos);
        grains += tick.grains;
        peak = peak.max(tick.intensity);
    }
    stone.contact_exit(&mut scene.ctx, &TABLE);
    stone.release(&mut scene.ctx);
    log::info!("[scene] friction: {grains} grains, peak intensity {peak:.2}");
    (grains, frames)
}

fn run_hammer(scene: &mut Scene) -> usize {
    let emitter = scene.emitter();
    let mut hammer = HammerStation::new(voice("hammer_hit", 0.35, 1.0), emitter, HammerParams::default());
    let mut relay = ImpactRelay::default();
    hammer.grab(HandTarget::Left);

    let mut played = 0;
    let mut pos = Vec3::ZERO;
    for step in [0.0005f32, 0.004, 0.012, 0.02, 0.03] {
        relay.fixed_update(pos);
        pos.y -= step;
        let speed = relay.impact_speed(BodyMotion::Kinematic { position: pos });
        if hammer.handle_impact(&mut scene.ctx, speed, 0).is_some() {
            played += 1;
        }
        for _ in 0..20 {
            scene.frame(FRAME_DT);
        }
    }
    hammer.release();
    played
}

fn run_drums(scene: &mut Scene) -> (usize, usize) {
    let station_emitter = scene.emitter();
    let pads = vec![
        DrumPad::new(voice("kick", 0.4, 1.0)),
        DrumPad::new(voice("snare", 0.3, 0.9)),
    ];
    let mut drums = DrumPadStation::new(pads, station_emitter, CooldownParams::default());
    let stick = Interactor::new(InteractorKind::Poke)
        .named(["Poke", "Left Hand"])
        .moving(1.5);

    let (mut played, mut gated) = (0, 0);
    for i in 0..24 {
        match drums.hit(&mut scene.ctx, i % 2, &stick) {
            PadHit::Played { .. } => played += 1,
            _ => gated += 1,
        }
        for _ in 0..4 {
            scene.frame(FRAME_DT);
        }
    }
    (played, gated)
}

fn run_drill(scene: &mut Scene) {
    let motor = scene.emitter();
    let mut drill = DrillStation::new(voice("drill_motor", 1.2, 0.8), motor);
    drill.activate(&mut scene.ctx, HandTarget::Right);
    for _ in 0..(1.5 / FRAME_DT) as usize {
        scene.frame(FRAME_DT);
        drill.tick(&mut scene.ctx, FRAME_DT);
    }
    drill.deactivate(&mut scene.ctx, HandTarget::Right);
    drill.ungrab(&mut scene.ctx);
}

fn run_gun(scene: &mut Scene) -> usize {
    let emitter = scene.emitter();
    let launcher = Launcher::default();
    let fired = launcher.fired.clone();
    let mut gun = SpaceGunStation::new(voice("blaster", 0.25, 0.7), emitter).with_launcher(Box::new(launcher));
    gun.grab(HandTarget::Right);
    let muzzle = Muzzle {
        position: Vec3::new(0.1, 1.2, -0.3),
        forward: Vec3::NEG_Z,
    };
    for _ in 0..3 {
        gun.fire(&mut scene.ctx, Some(muzzle));
        for _ in 0..30 {
            scene.frame(FRAME_DT);
        }
    }
    let n = *fired.borrow();
    n
}

fn run_ui(scene: &mut Scene) -> usize {
    let emitter = scene.emitter();
    let hover = FeedbackConfig {
        basic_amplitude: 0.25,
        ..voice("ui_hover", 0.05, 0.4)
    };
    let mut ui = UiHapticsStation::new(hover, voice("ui_click", 0.08, 0.6), emitter);
    let ray = Interactor::new(InteractorKind::Ray).named(["UI Ray", "RightHand Controller"]);
    let mut routed = 0;
    for (event, source) in [
        (UiEvent::Hover, Some(&ray)),
        (UiEvent::Click, Some(&ray)),
        (UiEvent::Click, None),
    ] {
        if UiForwarder::forward(&mut ui, &mut scene.ctx, event, source).is_some() {
            routed += 1;
        }
        scene.frame(FRAME_DT);
    }
    routed
}

fn main() -> anyhow::Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let opts = parse_args()?;
    log::info!("[scene] seed={} realtime={}", opts.seed, opts.realtime);
    let wall = Instant::now();
    let mut scene = Scene::new(opts.realtime);

    let (grains, scrape_frames) = run_friction(&mut scene, opts.seed);
    let strikes = run_hammer(&mut scene);
    let (hits, gated) = run_drums(&mut scene);

    scene.ctx.set_mode(HapticMode::from_toggle(true));
    let (adv_hits, _) = run_drums(&mut scene);
    let adv_strikes = run_hammer(&mut scene);
    scene.ctx.set_mode(HapticMode::from_toggle(false));

    run_drill(&mut scene);
    let projectiles = run_gun(&mut scene);
    let ui_events = run_ui(&mut scene);

    let clip_plays = scene
        .clips
        .borrow()
        .iter()
        .filter(|c| matches!(c, ClipRecord::Play { .. }))
        .count();
    let stops = scene.left.borrow().iter().filter(|p| p.is_stop()).count()
        + scene.right.borrow().iter().filter(|p| p.is_stop()).count();

    println!("scene time       {:.2}s ({} frames)", scene.ctx.now(), scene.frames);
    println!("scrape           {grains} grains over {scrape_frames} frames");
    println!("hammer strikes   {strikes} basic, {adv_strikes} advanced");
    println!("drum hits        {hits} played, {gated} gated, {adv_hits} advanced");
    println!("projectiles      {projectiles}");
    println!("ui events        {ui_events}");
    println!(
        "pulses           left={} right={} (stops={stops})",
        scene.left.borrow().len(),
        scene.right.borrow().len()
    );
    println!("clip plays       {clip_plays}");
    println!("audio one-shots  {}", scene.one_shots());
    log::info!("[scene] done in {:.1} ms", wall.elapsed().as_secs_f64() * 1000.0);
    Ok(())
}
