//! In-memory backends that record every call.
//!
//! Each recorder hands out a cloneable log handle before being boxed into a
//! dispatcher or session, so the host can inspect what was rendered.
//! [`RecordingEmitter`] also simulates playback time so bed crossfades and
//! grain stops behave as they would against a real mixer.

use std::cell::RefCell;
use std::rc::Rc;

use crate::backend::{AudioEmitter, ClipActuator, PulseActuator};
use crate::config::{AudioClip, HapticClip};
use crate::hand::HandTarget;

/// A pulse as seen by one hand's actuator.
#[derive(Clone, Debug, PartialEq)]
pub struct PulseRecord {
    pub amplitude: f32,
    pub duration_sec: f32,
}

impl PulseRecord {
    /// True for the zero/zero pulse used to silence an actuator.
    pub fn is_stop(&self) -> bool {
        self.amplitude == 0.0 && self.duration_sec == 0.0
    }
}

pub type PulseLog = Rc<RefCell<Vec<PulseRecord>>>;

#[derive(Default)]
pub struct RecordingPulse {
    log: PulseLog,
}

impl RecordingPulse {
    pub fn new() -> (Self, PulseLog) {
        let log = PulseLog::default();
        (Self { log: log.clone() }, log)
    }
}

impl PulseActuator for RecordingPulse {
    fn send_pulse(&mut self, amplitude: f32, duration_sec: f32) {
        self.log.borrow_mut().push(PulseRecord {
            amplitude,
            duration_sec,
        });
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ClipRecord {
    Play {
        clip: String,
        hand: HandTarget,
        amplitude: f32,
    },
    Stop {
        clip: String,
    },
}

pub type ClipLog = Rc<RefCell<Vec<ClipRecord>>>;

#[derive(Default)]
pub struct RecordingClips {
    log: ClipLog,
}

impl RecordingClips {
    pub fn new() -> (Self, ClipLog) {
        let log = ClipLog::default();
        (Self { log: log.clone() }, log)
    }
}

impl ClipActuator for RecordingClips {
    fn play_clip(&mut self, clip: &HapticClip, hand: HandTarget, amplitude: f32) {
        self.log.borrow_mut().push(ClipRecord::Play {
            clip: clip.name.clone(),
            hand,
            amplitude,
        });
    }

    fn stop_clip(&mut self, clip: &HapticClip) {
        self.log.borrow_mut().push(ClipRecord::Stop {
            clip: clip.name.clone(),
        });
    }
}

/// Observable state of a [`RecordingEmitter`].
#[derive(Clone, Debug, Default)]
pub struct EmitterState {
    /// `(clip name, volume)` for every one-shot.
    pub one_shots: Vec<(String, f32)>,
    /// `(clip name, start offset)` for every `play`.
    pub plays: Vec<(String, f32)>,
    pub stops: usize,
    pub playing: bool,
    pub clip_len_sec: f32,
    pub position_sec: f32,
    pub volume: f32,
    pub pitch: f32,
}

impl EmitterState {
    /// Move the playhead; a voice that reaches the clip end stops on its own.
    pub fn advance(&mut self, dt_sec: f32) {
        if !self.playing {
            return;
        }
        self.position_sec += dt_sec.max(0.0) * self.pitch.max(0.0);
        if self.position_sec >= self.clip_len_sec {
            self.position_sec = self.clip_len_sec;
            self.playing = false;
        }
    }
}

pub type EmitterHandle = Rc<RefCell<EmitterState>>;

#[derive(Default)]
pub struct RecordingEmitter {
    state: EmitterHandle,
}

impl RecordingEmitter {
    pub fn new() -> (Self, EmitterHandle) {
        let state = EmitterHandle::new(RefCell::new(EmitterState {
            pitch: 1.0,
            volume: 1.0,
            ..EmitterState::default()
        }));
        (
            Self {
                state: state.clone(),
            },
            state,
        )
    }
}

impl AudioEmitter for RecordingEmitter {
    fn play_one_shot(&mut self, clip: &AudioClip, volume: f32) {
        self.state
            .borrow_mut()
            .one_shots
            .push((clip.name.clone(), volume));
    }

    fn play(&mut self, clip: &AudioClip, start_offset_sec: f32) {
        let mut s = self.state.borrow_mut();
        s.plays.push((clip.name.clone(), start_offset_sec));
        s.clip_len_sec = clip.length_sec;
        s.position_sec = start_offset_sec.clamp(0.0, clip.length_sec);
        s.playing = s.position_sec < clip.length_sec;
    }

    fn set_volume(&mut self, volume: f32) {
        self.state.borrow_mut().volume = volume;
    }

    fn set_pitch(&mut self, pitch: f32) {
        self.state.borrow_mut().pitch = pitch;
    }

    fn stop(&mut self) {
        let mut s = self.state.borrow_mut();
        s.playing = false;
        s.stops += 1;
    }

    fn is_playing(&self) -> bool {
        self.state.borrow().playing
    }

    fn remaining_time(&self) -> f32 {
        let s = self.state.borrow();
        (s.clip_len_sec - s.position_sec).max(0.0)
    }
}
