// Engine tuning defaults. Units are seconds, meters and m/s unless noted.

// Intensity estimation
pub const MIN_SPEED: f32 = 0.03; // below this the surface is considered still
pub const MAX_SPEED: f32 = 0.8; // maps to full intensity
pub const SPEED_SMOOTHING_TAU_SEC: f32 = 0.10;
pub const MIN_SPEED_SPAN: f32 = 0.0001; // maxSpeed is pushed at least this far above minSpeed

// Guards
pub const MIN_DT_SEC: f32 = 0.0001; // floor for frame deltas and time constants

// Grain scheduling (distance based)
pub const GRAINS_PER_METER_AT_MIN: f32 = 80.0;
pub const GRAINS_PER_METER_AT_MAX: f32 = 260.0;
pub const GRAINS_PER_METER_FLOOR: f32 = 1.0;
pub const GRAIN_UNIFORM_FLOOR: f32 = 1e-4; // keeps -ln(U) finite
pub const MAX_GRAINS_PER_TICK: usize = 16; // distance past this in one tick is dropped
pub const GRAIN_LEN_MS: [f32; 2] = [35.0, 90.0];
pub const GRAIN_LEN_MS_FLOOR: f32 = 5.0;
pub const GRAIN_PITCH: [f32; 2] = [0.92, 1.08];
pub const GRAIN_PITCH_FLOOR: f32 = 0.5;
pub const GRAIN_VOLUME_MIN: f32 = 0.25;
pub const GRAIN_VOLUME_JITTER: [f32; 2] = [0.95, 1.05];
pub const GRAIN_TAIL_GUARD_SEC: f32 = 0.01; // keep grain starts this far from the clip end
pub const GRAIN_MIN_PLAY_SEC: f32 = 0.008;
pub const GRAIN_MIN_PITCH_DIVISOR: f32 = 0.01;

// Grain haptics
pub const GRAIN_HAPTIC_REFRACTORY_SEC: f64 = 0.010;
pub const GRAIN_HAPTIC_AMP: [f32; 2] = [0.25, 0.8];
pub const GRAIN_HAPTIC_AMP_JITTER: [f32; 2] = [0.90, 1.10];
pub const GRAIN_HAPTIC_DUR_SEC: [f32; 2] = [0.012, 0.028];

// Bed (continuous loop)
pub const BED_CROSSFADE_MS: f32 = 18.0;
pub const BED_CROSSFADE_FLOOR_SEC: f32 = 0.005;
pub const BED_RANDOM_OFFSET_SEC: f32 = 0.20;
pub const BED_MIN_VOLUME: f32 = 0.08;
pub const BED_PITCH: [f32; 2] = [0.90, 1.15];
pub const BED_MIN_CLIP_SEC: f32 = 0.05;
pub const BED_OFFSET_TAIL_GUARD_SEC: f32 = 0.01;

// Bed haptics (periodic pulses under the loop)
pub const BED_PULSE_PERIOD_SEC: [f32; 2] = [0.08, 0.03];
pub const BED_PULSE_AMP: [f32; 2] = [0.22, 0.60];
pub const BED_PULSE_DUR_SEC: [f32; 2] = [0.020, 0.035];

// Impacts
pub const MIN_IMPACT_SPEED: f32 = 0.05;
pub const MAX_IMPACT_SPEED: f32 = 1.2;
pub const IMPACT_EPSILON: f32 = 0.01;

// Cooldown gate
pub const MIN_COOLDOWN_SEC: f32 = 0.08; // after a fast hit
pub const MAX_COOLDOWN_SEC: f32 = 0.20; // after a slow hit
pub const SLOW_SPEED: f32 = 0.20;
pub const FAST_SPEED: f32 = 2.0;
pub const MIN_ACTIVATION_SPEED: f32 = 0.05;
pub const COOLDOWN_SPEED_FLOOR: f32 = 0.001;
