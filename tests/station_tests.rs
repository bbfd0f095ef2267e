use std::cell::RefCell;
use std::rc::Rc;

use feedback_core::recording::*;
use feedback_core::*;
use glam::Vec3;
use haptic_stations::events::contact::ContactFilter;
use haptic_stations::events::{Collider, Interactor, InteractorKind};
use haptic_stations::*;

struct Rig {
    ctx: FeedbackContext,
    left: PulseLog,
    right: PulseLog,
    clips: ClipLog,
}

fn rig() -> Rig {
    let (l, left) = RecordingPulse::new();
    let (r, right) = RecordingPulse::new();
    let (c, clips) = RecordingClips::new();
    let dispatcher = FeedbackDispatcher::new()
        .with_pulse(Hand::Left, Box::new(l))
        .with_pulse(Hand::Right, Box::new(r))
        .with_clips(Box::new(c));
    Rig {
        ctx: FeedbackContext::new(dispatcher),
        left,
        right,
        clips,
    }
}

fn voice(name: &str, len: f32) -> FeedbackConfig {
    FeedbackConfig::default()
        .with_sfx(AudioClip::new(name, len), 0.8)
        .with_advanced(HapticClip::new(format!("{name}_hap")), 0.6)
}

// ---------------------------------------------------------------- hammer

fn hammer() -> (HammerStation, EmitterHandle) {
    let (e, audio) = RecordingEmitter::new();
    let hammer = HammerStation::new(voice("impact", 0.3), Box::new(e), HammerParams::default());
    (hammer, audio)
}

#[test]
fn hammer_ignores_impacts_while_not_grabbed() {
    let mut rig = rig();
    let (mut hammer, audio) = hammer();
    assert_eq!(hammer.handle_impact(&mut rig.ctx, 1.0, 0), None);
    assert!(audio.borrow().one_shots.is_empty());
    assert!(rig.right.borrow().is_empty());
}

#[test]
fn hammer_strike_scales_sound_and_pulse_by_speed() {
    let mut rig = rig();
    let (mut hammer, audio) = hammer();
    hammer.grab(HandTarget::Left);
    let speed = 0.05 + 0.5 * (1.2 - 0.05);
    let amp = hammer.handle_impact(&mut rig.ctx, speed, 0).expect("strike plays");
    assert!((amp - 0.5).abs() < 1e-4);

    let shots = &audio.borrow().one_shots;
    assert_eq!(shots.len(), 1);
    assert!((shots[0].1 - 0.4).abs() < 1e-4, "volume is sfx_volume * amplitude");

    let left = rig.left.borrow();
    assert_eq!(left.len(), 1);
    assert!((left[0].amplitude - 0.5).abs() < 1e-4);
    assert!((left[0].duration_sec - 0.3).abs() < 1e-6);
    assert!(rig.right.borrow().is_empty());
}

#[test]
fn hammer_soft_touch_produces_no_output_at_all() {
    let mut rig = rig();
    let (mut hammer, audio) = hammer();
    hammer.grab(HandTarget::Right);
    assert_eq!(hammer.handle_impact(&mut rig.ctx, 0.05, 0), None);
    assert!(audio.borrow().one_shots.is_empty());
    assert!(rig.right.borrow().is_empty());
    assert!(rig.clips.borrow().is_empty());
}

#[test]
fn hammer_clip_amplitude_follows_impact_when_overriding() {
    let mut rig = rig();
    rig.ctx.set_mode(HapticMode::Advanced);
    let (mut hammer, _audio) = hammer();
    hammer.grab(HandTarget::Right);
    hammer.handle_impact(&mut rig.ctx, 1.2, 0);
    assert!(matches!(
        rig.clips.borrow()[0],
        ClipRecord::Play { amplitude, hand: HandTarget::Right, .. } if (amplitude - 1.0).abs() < 1e-4
    ));

    let (e, _) = RecordingEmitter::new();
    let mut plain = HammerStation::new(
        voice("impact", 0.3),
        Box::new(e),
        HammerParams {
            overrides_amplitude: false,
            ..HammerParams::default()
        },
    );
    plain.grab(HandTarget::Right);
    plain.handle_impact(&mut rig.ctx, 1.2, 0);
    assert!(matches!(
        rig.clips.borrow()[1],
        ClipRecord::Play { amplitude, .. } if (amplitude - 0.6).abs() < 1e-6
    ));
}

#[test]
fn hammer_surface_mask_filters_strikes() {
    let mut rig = rig();
    let (e, _) = RecordingEmitter::new();
    let mut hammer = HammerStation::new(
        voice("impact", 0.3),
        Box::new(e),
        HammerParams {
            impact: ImpactParams {
                surfaces: SurfaceMask::from_categories(&[6]),
                ..ImpactParams::default()
            },
            ..HammerParams::default()
        },
    );
    hammer.grab(HandTarget::Right);
    assert_eq!(hammer.handle_impact(&mut rig.ctx, 1.0, 0), None);
    assert!(hammer.handle_impact(&mut rig.ctx, 1.0, 6).is_some());
    hammer.release();
    assert!(!hammer.is_grabbed());
}

// ---------------------------------------------------------------- drum pads

fn drums() -> (DrumPadStation, EmitterHandle, EmitterHandle) {
    let (station_e, station_audio) = RecordingEmitter::new();
    let (pad_e, pad_audio) = RecordingEmitter::new();
    let pads = vec![
        DrumPad::new(voice("kick", 0.5)),
        DrumPad::new(voice("snare", 0.5)).with_emitter(Box::new(pad_e)),
    ];
    (
        DrumPadStation::new(pads, Box::new(station_e), CooldownParams::default()),
        station_audio,
        pad_audio,
    )
}

fn stick(speed: f32) -> Interactor {
    Interactor::new(InteractorKind::Direct)
        .on(ControllerNode::LeftHand)
        .moving(speed)
}

#[test]
fn drum_hit_plays_on_pad_or_station_emitter() {
    let mut rig = rig();
    let (mut drums, station_audio, pad_audio) = drums();
    assert_eq!(
        drums.hit(&mut rig.ctx, 0, &stick(1.0)),
        PadHit::Played {
            pad: 0,
            hand: HandTarget::Left
        }
    );
    assert_eq!(station_audio.borrow().one_shots.len(), 1);
    drums.hit(&mut rig.ctx, 1, &stick(1.0));
    assert_eq!(pad_audio.borrow().one_shots.len(), 1);
    assert_eq!(station_audio.borrow().one_shots.len(), 1);

    let left = rig.left.borrow();
    assert_eq!(left.len(), 2);
    assert!(left.iter().all(|p| (p.duration_sec - 0.04).abs() < 1e-6));
}

#[test]
fn drum_rejects_far_field_and_unknown_pads() {
    let mut rig = rig();
    let (mut drums, _, _) = drums();
    let ray = Interactor::new(InteractorKind::Ray).moving(2.0);
    assert_eq!(drums.hit(&mut rig.ctx, 0, &ray), PadHit::WrongInteractor);
    assert_eq!(drums.hit(&mut rig.ctx, 9, &stick(2.0)), PadHit::UnknownPad(9));
    assert!(rig.left.borrow().is_empty());
}

#[test]
fn drum_fast_double_hit_is_debounced() {
    let mut rig = rig();
    let (mut drums, station_audio, _) = drums();
    let poke = Interactor::new(InteractorKind::Poke).moving(2.0);
    assert!(matches!(
        drums.hit(&mut rig.ctx, 0, &poke),
        PadHit::Played { .. }
    ));
    rig.ctx.advance(0.05);
    assert!(matches!(
        drums.hit(&mut rig.ctx, 0, &poke),
        PadHit::Gated(GateDecision::Debounced { .. })
    ));
    assert_eq!(station_audio.borrow().one_shots.len(), 1);

    // A different pad is unaffected.
    assert!(matches!(
        drums.hit(&mut rig.ctx, 1, &poke),
        PadHit::Played { .. }
    ));
    rig.ctx.advance(0.05);
    assert!(matches!(
        drums.hit(&mut rig.ctx, 0, &poke),
        PadHit::Played { .. }
    ));
}

#[test]
fn drum_micromovement_is_ignored() {
    let mut rig = rig();
    let (mut drums, station_audio, _) = drums();
    assert!(matches!(
        drums.hit(&mut rig.ctx, 0, &stick(0.01)),
        PadHit::Gated(GateDecision::Micromovement { .. })
    ));
    assert!(station_audio.borrow().one_shots.is_empty());
}

#[test]
fn drum_advanced_mode_plays_pad_clip() {
    let mut rig = rig();
    rig.ctx.set_mode(HapticMode::Advanced);
    let (mut drums, _, _) = drums();
    drums.hit(&mut rig.ctx, 1, &stick(1.0));
    assert_eq!(
        rig.clips.borrow()[0],
        ClipRecord::Play {
            clip: "snare_hap".into(),
            hand: HandTarget::Left,
            amplitude: 0.6
        }
    );
    assert!(rig.left.borrow().is_empty());
}

// ---------------------------------------------------------------- friction

struct Stone {
    station: FrictionStation,
    bed_a: EmitterHandle,
    bed_b: EmitterHandle,
}

fn stone(filter: ContactFilter) -> Stone {
    let (a, bed_a) = RecordingEmitter::new();
    let (b, bed_b) = RecordingEmitter::new();
    let (g, _grain) = RecordingEmitter::new();
    let station = FrictionStation::new(
        FrictionParams {
            contact: filter,
            ..FrictionParams::default()
        },
        voice("scrape", 2.0),
        SessionVoices {
            bed_a: Box::new(a),
            bed_b: Box::new(b),
            grain: Box::new(g),
        },
        99,
    );
    Stone {
        station,
        bed_a,
        bed_b,
    }
}

fn scrape_for(rig: &mut Rig, stone: &mut Stone, secs: f32) -> usize {
    let dt = 1.0 / 90.0;
    let mut x = 0.0;
    let mut grains = 0;
    for _ in 0..(secs / dt) as usize {
        stone.bed_a.borrow_mut().advance(dt);
        stone.bed_b.borrow_mut().advance(dt);
        rig.ctx.advance(dt);
        x += 0.5 * dt;
        grains += stone.station.tick(&mut rig.ctx, dt, Vec3::new(x, 0.0, 0.0)).grains;
    }
    grains
}

#[test]
fn friction_contacts_only_count_while_held() {
    let mut rig = rig();
    let mut stone = stone(ContactFilter::default());
    let table = Collider::solid(1, 0);
    stone.station.contact_enter(&mut rig.ctx, &table);
    assert_eq!(stone.station.contact_count(), 0);
    assert_eq!(scrape_for(&mut rig, &mut stone, 0.3), 0);

    let hand = stone.station.grab(
        &Interactor::new(InteractorKind::Direct).named(["Direct", "Left Controller"]),
        Vec3::ZERO,
    );
    assert_eq!(hand, HandTarget::Left);
    stone.station.contact_enter(&mut rig.ctx, &table);
    assert!(stone.station.session().in_contact());
    assert!(scrape_for(&mut rig, &mut stone, 0.5) > 0);
    assert!(!rig.left.borrow().is_empty());
}

#[test]
fn friction_filters_triggers_and_foreign_surfaces() {
    let mut rig = rig();
    let mut stone = stone(ContactFilter {
        surfaces: SurfaceMask::from_categories(&[4]),
        ignore_triggers: true,
    });
    stone.station.grab(&Interactor::default(), Vec3::ZERO);
    stone.station.contact_enter(&mut rig.ctx, &Collider::trigger(1, 4));
    stone.station.contact_enter(&mut rig.ctx, &Collider::solid(2, 0));
    assert!(!stone.station.session().in_contact());
    stone.station.contact_enter(&mut rig.ctx, &Collider::solid(3, 4));
    assert!(stone.station.session().in_contact());
}

#[test]
fn friction_ends_when_last_contact_leaves() {
    let mut rig = rig();
    let mut stone = stone(ContactFilter::default());
    stone.station.grab(&Interactor::default(), Vec3::ZERO);
    let a = Collider::solid(1, 0);
    let b = Collider::solid(2, 0);
    stone.station.contact_enter(&mut rig.ctx, &a);
    stone.station.contact_enter(&mut rig.ctx, &b);
    scrape_for(&mut rig, &mut stone, 0.4);
    assert!(stone.station.session().active_bed_voices() > 0);

    stone.station.contact_exit(&mut rig.ctx, &a);
    assert!(stone.station.session().in_contact());
    stone.station.contact_exit(&mut rig.ctx, &b);
    assert!(!stone.station.session().in_contact());
    assert_eq!(stone.station.session().active_bed_voices(), 0);
    assert!(!stone.bed_a.borrow().playing && !stone.bed_b.borrow().playing);
    assert!(rig.right.borrow().last().map(|p| p.is_stop()).unwrap_or(false));
}

#[test]
fn friction_release_clears_contacts_and_silences() {
    let mut rig = rig();
    let mut stone = stone(ContactFilter::default());
    stone.station.grab(&Interactor::default(), Vec3::ZERO);
    stone.station.contact_enter(&mut rig.ctx, &Collider::solid(1, 0));
    scrape_for(&mut rig, &mut stone, 0.3);
    stone.station.release(&mut rig.ctx);
    assert_eq!(stone.station.contact_count(), 0);
    assert!(!stone.station.session().is_held());
    assert_eq!(stone.station.session().active_bed_voices(), 0);
    assert_eq!(scrape_for(&mut rig, &mut stone, 0.3), 0);
}

// ---------------------------------------------------------------- drill

fn drill(len: f32) -> (DrillStation, EmitterHandle) {
    let (e, motor) = RecordingEmitter::new();
    (DrillStation::new(voice("motor", len), Box::new(e)), motor)
}

#[test]
fn drill_repulses_activating_hand_in_basic_mode() {
    let mut rig = rig();
    let (mut drill, motor) = drill(2.0);
    drill.activate(&mut rig.ctx, HandTarget::Left);
    assert!(drill.is_drilling());
    assert_eq!(motor.borrow().plays.len(), 1);
    assert_eq!(rig.left.borrow().len(), 1);

    let dt = 0.01;
    for _ in 0..100 {
        motor.borrow_mut().advance(dt);
        drill.tick(&mut rig.ctx, dt);
    }
    // Activation pulse, then one at once and every 0.3 s after.
    assert_eq!(rig.left.borrow().len(), 5);
    assert!(rig.right.borrow().is_empty());
}

#[test]
fn drill_stops_when_motor_audio_runs_out() {
    let mut rig = rig();
    let (mut drill, motor) = drill(0.5);
    drill.activate(&mut rig.ctx, HandTarget::Right);
    for _ in 0..60 {
        motor.borrow_mut().advance(0.01);
        drill.tick(&mut rig.ctx, 0.01);
    }
    assert!(!drill.is_drilling());
    let pulses = rig.right.borrow().len();
    drill.tick(&mut rig.ctx, 0.5);
    assert_eq!(rig.right.borrow().len(), pulses);
}

#[test]
fn drill_deactivate_stops_the_mode_relevant_output() {
    let mut rig = rig();
    let (mut drill, motor) = drill(2.0);
    drill.activate(&mut rig.ctx, HandTarget::Right);
    drill.deactivate(&mut rig.ctx, HandTarget::Right);
    assert!(!motor.borrow().playing);
    assert!(rig.right.borrow().last().map(|p| p.is_stop()).unwrap_or(false));
    assert!(rig.clips.borrow().is_empty());

    rig.ctx.set_mode(HapticMode::Advanced);
    drill.activate(&mut rig.ctx, HandTarget::Right);
    assert!(matches!(rig.clips.borrow()[0], ClipRecord::Play { .. }));
    let pulses = rig.right.borrow().len();
    drill.tick(&mut rig.ctx, 1.0);
    assert_eq!(rig.right.borrow().len(), pulses, "no periodic pulses in advanced mode");
    drill.deactivate(&mut rig.ctx, HandTarget::Right);
    assert!(matches!(rig.clips.borrow()[1], ClipRecord::Stop { .. }));
}

#[test]
fn drill_ungrab_silences_both_hands_in_any_mode() {
    let mut rig = rig();
    rig.ctx.set_mode(HapticMode::Advanced);
    let (mut drill, motor) = drill(2.0);
    drill.activate(&mut rig.ctx, HandTarget::Left);
    drill.ungrab(&mut rig.ctx);
    assert!(!drill.is_drilling());
    assert!(!motor.borrow().playing);
    assert!(rig.left.borrow()[0].is_stop());
    assert!(rig.right.borrow()[0].is_stop());
    assert!(matches!(rig.clips.borrow().last(), Some(ClipRecord::Stop { .. })));
}

// ---------------------------------------------------------------- space gun

type Spawned = Rc<RefCell<Vec<(Vec3, Vec3, f32)>>>;

struct Launcher(Spawned);

impl ProjectileSpawner for Launcher {
    fn spawn(&mut self, position: Vec3, velocity: Vec3, lifetime_sec: f32) {
        self.0.borrow_mut().push((position, velocity, lifetime_sec));
    }
}

#[test]
fn gun_fires_sound_cue_and_projectile() {
    let mut rig = rig();
    let spawned = Spawned::default();
    let (e, audio) = RecordingEmitter::new();
    let mut gun = SpaceGunStation::new(voice("blaster", 0.2), Box::new(e))
        .with_launcher(Box::new(Launcher(spawned.clone())));
    gun.grab(HandTarget::Left);

    let muzzle = Muzzle {
        position: Vec3::new(0.0, 1.0, 0.0),
        forward: Vec3::new(0.0, 0.0, -2.0),
    };
    assert!(gun.fire(&mut rig.ctx, Some(muzzle)));
    assert_eq!(audio.borrow().one_shots.len(), 1);
    assert_eq!(rig.left.borrow().len(), 1);

    let (pos, vel, life) = spawned.borrow()[0];
    assert_eq!(pos, muzzle.position);
    assert!((vel - Vec3::new(0.0, 0.0, -20.0)).length() < 1e-4);
    assert_eq!(life, 3.0);

    assert!(!gun.fire(&mut rig.ctx, None));
    assert_eq!(spawned.borrow().len(), 1);
}

#[test]
fn gun_without_launcher_still_gives_feedback() {
    let mut rig = rig();
    let (e, audio) = RecordingEmitter::new();
    let mut gun = SpaceGunStation::new(voice("blaster", 0.2), Box::new(e));
    assert_eq!(gun.hand(), HandTarget::Right);
    assert!(!gun.fire(
        &mut rig.ctx,
        Some(Muzzle {
            position: Vec3::ZERO,
            forward: Vec3::Z
        })
    ));
    assert_eq!(audio.borrow().one_shots.len(), 1);
    assert_eq!(rig.right.borrow().len(), 1);
}

// ---------------------------------------------------------------- UI

fn ui() -> (UiHapticsStation, EmitterHandle) {
    let (e, audio) = RecordingEmitter::new();
    let hover = FeedbackConfig {
        basic_amplitude: 0.2,
        ..FeedbackConfig::default()
    };
    let click = voice("click", 0.05);
    (UiHapticsStation::new(hover, click, Box::new(e)), audio)
}

#[test]
fn ui_forwarder_routes_to_the_resolved_hand() {
    let mut rig = rig();
    let (mut ui, audio) = ui();
    let pointer = Interactor::new(InteractorKind::Ray).named(["UI Ray", "LeftHand"]);
    assert_eq!(
        UiForwarder::forward(&mut ui, &mut rig.ctx, UiEvent::Click, Some(&pointer)),
        Some(HandTarget::Left)
    );
    assert_eq!(audio.borrow().one_shots.len(), 1);
    assert_eq!(rig.left.borrow().len(), 1);

    UiForwarder::forward(&mut ui, &mut rig.ctx, UiEvent::Hover, Some(&pointer));
    assert_eq!(audio.borrow().one_shots.len(), 1, "hover has no sound");
    assert!((rig.left.borrow()[1].amplitude - 0.2).abs() < 1e-6);
}

#[test]
fn ui_forwarder_drops_events_with_unknown_hand() {
    let mut rig = rig();
    let (mut ui, audio) = ui();
    assert_eq!(
        UiForwarder::forward(&mut ui, &mut rig.ctx, UiEvent::Click, None),
        None
    );
    assert!(audio.borrow().one_shots.is_empty());
    assert!(rig.left.borrow().is_empty() && rig.right.borrow().is_empty());
}

#[test]
fn ui_click_in_advanced_mode_plays_clip() {
    let mut rig = rig();
    rig.ctx.set_mode(HapticMode::Advanced);
    let (mut ui, _) = ui();
    ui.play_click(&mut rig.ctx, HandTarget::Right);
    assert_eq!(
        rig.clips.borrow()[0],
        ClipRecord::Play {
            clip: "click_hap".into(),
            hand: HandTarget::Right,
            amplitude: 0.6
        }
    );
}

#[test]
fn missing_audio_clip_does_not_block_drill_or_gun_feedback() {
    let mut rig = rig();
    let silent = FeedbackConfig::default().with_advanced(HapticClip::new("buzz_hap"), 0.6);

    let (e, motor) = RecordingEmitter::new();
    let mut drill = DrillStation::new(silent.clone(), Box::new(e));
    drill.activate(&mut rig.ctx, HandTarget::Right);
    assert!(motor.borrow().plays.is_empty());
    assert_eq!(rig.right.borrow().len(), 1);
    drill.tick(&mut rig.ctx, 0.01);
    assert!(!drill.is_drilling(), "no motor voice means nothing to sustain");

    let spawned = Spawned::default();
    let (e, audio) = RecordingEmitter::new();
    let mut gun = SpaceGunStation::new(silent, Box::new(e))
        .with_launcher(Box::new(Launcher(spawned.clone())));
    gun.grab(HandTarget::Left);
    let muzzle = Muzzle {
        position: Vec3::ZERO,
        forward: Vec3::NEG_Z,
    };
    assert!(gun.fire(&mut rig.ctx, Some(muzzle)));
    assert!(audio.borrow().one_shots.is_empty());
    assert_eq!(rig.left.borrow().len(), 1);
    assert_eq!(spawned.borrow().len(), 1);
}
