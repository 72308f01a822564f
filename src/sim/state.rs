//! Session state and core simulation types
//!
//! Everything the frame loop mutates lives in [`Session`]; entity pools are
//! plain `Vec`s of records carrying an `active` flag.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::adversary::Adversary;
use super::backdrop::Backdrop;
use super::player::Player;
use super::spawn::SpawnDirector;
use crate::highscores::HighScores;
use crate::settings::Settings;
use crate::tuning::Tuning;

/// RGBA color handed through to the renderer
pub type Tint = [u8; 4];

pub const TINT_BULLET: Tint = [255, 255, 0, 255];
pub const TINT_ENEMY_BULLET: Tint = [255, 50, 50, 255];
pub const TINT_BOSS_SPREAD: Tint = [255, 100, 0, 255];
pub const TINT_FIRE: Tint = [255, 140, 0, 255];
pub const TINT_PLAYER_HIT: Tint = [100, 100, 255, 255];
pub const TINT_PICKUP: Tint = [0, 255, 80, 255];
pub const TINT_BOMB: Tint = [160, 32, 240, 255];

/// Top-level mode of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionPhase {
    /// Title screen, waiting for the first tap
    Menu,
    /// Active gameplay
    Playing,
    /// Simulation frozen
    Paused,
    /// Lives exhausted; next tap restarts
    GameOver,
}

/// Which side fired a shot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    Player,
    Adversary,
}

/// A straight-flying bullet
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Projectile {
    pub pos: Vec2,
    pub vel: Vec2,
    pub active: bool,
    pub side: Side,
    pub damage: i32,
    pub tint: Tint,
}

impl Projectile {
    pub fn new(pos: Vec2, vel: Vec2, side: Side, damage: i32, tint: Tint) -> Self {
        Self {
            pos,
            vel,
            active: true,
            side,
            damage,
            tint,
        }
    }
}

/// A homing missile
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GuidedMunition {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Point the munition was last aimed at
    pub target: Vec2,
    pub active: bool,
    pub side: Side,
    pub damage: i32,
    /// Seconds until self-destruct
    pub life: f32,
}

impl GuidedMunition {
    /// Launch from `pos` heading straight at `target`
    pub fn launch(pos: Vec2, target: Vec2, side: Side, damage: i32, speed: f32, life: f32) -> Self {
        let dir = (target - pos).normalize_or_zero();
        Self {
            pos,
            vel: dir * speed,
            target,
            active: true,
            side,
            damage,
            life,
        }
    }
}

/// Pickup types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PickupKind {
    Heal,
    Shield,
    RapidFire,
    Ammo,
    Bomb,
}

impl PickupKind {
    pub const ALL: [PickupKind; 5] = [
        PickupKind::Heal,
        PickupKind::Shield,
        PickupKind::RapidFire,
        PickupKind::Ammo,
        PickupKind::Bomb,
    ];

    /// Two-letter HUD label
    pub fn label(&self) -> &'static str {
        match self {
            PickupKind::Heal => "HP",
            PickupKind::Shield => "SH",
            PickupKind::RapidFire => "RF",
            PickupKind::Ammo => "MS",
            PickupKind::Bomb => "BM",
        }
    }
}

/// A falling pickup
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Pickup {
    pub pos: Vec2,
    /// Fall speed (units/s, downward)
    pub fall_speed: f32,
    pub active: bool,
    pub kind: PickupKind,
    /// Bob animation phase (seconds)
    pub bob: f32,
}

impl Pickup {
    pub fn new(pos: Vec2, kind: PickupKind, fall_speed: f32) -> Self {
        Self {
            pos,
            fall_speed,
            active: true,
            kind,
            bob: 0.0,
        }
    }
}

/// A cosmetic explosion ring
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Explosion {
    pub pos: Vec2,
    pub radius: f32,
    pub max_radius: f32,
    pub life: f32,
    pub max_life: f32,
    pub tint: Tint,
}

/// Explosion lifetime in seconds
pub const EXPLOSION_LIFE: f32 = 0.5;

impl Explosion {
    pub fn new(pos: Vec2, size: f32, tint: Tint) -> Self {
        Self {
            pos,
            radius: size * 0.1,
            max_radius: size,
            life: EXPLOSION_LIFE,
            max_life: EXPLOSION_LIFE,
            tint,
        }
    }

    /// Grow the ring and burn down its life
    pub fn advance(&mut self, dt: f32) {
        self.life -= dt;
        let t = (1.0 - self.life / self.max_life).clamp(0.0, 1.0);
        self.radius = (self.max_radius * t).max(self.max_radius * 0.1);
    }

    pub fn is_alive(&self) -> bool {
        self.life > 0.0
    }
}

/// Screen shake pulse, sampled once per frame for the renderer
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct ScreenShake {
    pub timer: f32,
    pub duration: f32,
    pub amplitude: f32,
    /// Jitter for the current frame
    pub offset: Vec2,
}

impl ScreenShake {
    /// Current strength, fading linearly over the pulse duration
    pub fn intensity(&self) -> f32 {
        if self.timer <= 0.0 || self.duration <= 0.0 {
            0.0
        } else {
            self.amplitude * (self.timer / self.duration).min(1.0)
        }
    }

    /// Start a pulse unless a stronger one is still running
    pub fn pulse(&mut self, amplitude: f32, duration: f32) {
        if amplitude >= self.intensity() {
            self.amplitude = amplitude;
            self.duration = duration;
            self.timer = duration;
        }
    }

    pub fn step<R: rand::Rng>(&mut self, dt: f32, rng: &mut R) {
        self.timer = (self.timer - dt).max(0.0);
        let amt = self.intensity();
        self.offset = if amt > 0.0 {
            Vec2::new(
                rng.random_range(-1.0..=1.0f32),
                rng.random_range(-1.0..=1.0f32),
            ) * amt
        } else {
            Vec2::ZERO
        };
    }
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct Session {
    /// Current mode
    pub phase: SessionPhase,
    /// The player craft
    pub player: Player,
    pub projectiles: Vec<Projectile>,
    pub munitions: Vec<GuidedMunition>,
    pub pickups: Vec<Pickup>,
    pub adversaries: Vec<Adversary>,
    /// Visual effects (not gameplay-affecting)
    pub explosions: Vec<Explosion>,
    /// Spawn cadence and boss latches
    pub spawner: SpawnDirector,
    /// Scrolling background layers
    pub backdrop: Backdrop,
    /// Seconds of play this session
    pub elapsed: f32,
    /// Consecutive kills inside the combo window
    pub combo: u32,
    pub combo_timer: f32,
    pub shake: ScreenShake,
    /// Seconds spent in the current phase (menu/game-over animation)
    pub phase_timer: f32,
    /// Best score this process has seen
    pub high_score: u64,
    pub high_scores: HighScores,
    pub tuning: Tuning,
    pub settings: Settings,
    pub(crate) rng: Pcg32,
    pub(crate) pointer_was_down: bool,
}

impl Session {
    /// Create a session in the Menu phase with default tuning
    pub fn new(seed: u64) -> Self {
        Self::with_config(seed, Tuning::default(), Settings::default())
    }

    /// Create a session seeded from OS entropy
    pub fn from_entropy(tuning: Tuning, settings: Settings) -> Self {
        Self::with_config(rand::random(), tuning, settings)
    }

    pub fn with_config(seed: u64, tuning: Tuning, settings: Settings) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let backdrop = Backdrop::new(&settings, &mut rng);
        log::info!("Session created with seed {}", seed);
        Self {
            phase: SessionPhase::Menu,
            player: Player::new(&tuning),
            projectiles: Vec::new(),
            munitions: Vec::new(),
            pickups: Vec::new(),
            adversaries: Vec::new(),
            explosions: Vec::new(),
            spawner: SpawnDirector::default(),
            backdrop,
            elapsed: 0.0,
            combo: 0,
            combo_timer: 0.0,
            shake: ScreenShake::default(),
            phase_timer: 0.0,
            high_score: 0,
            high_scores: HighScores::new(),
            tuning,
            settings,
            rng,
            pointer_was_down: false,
        }
    }

    /// Change phase, resetting the phase animation timer
    pub fn set_phase(&mut self, phase: SessionPhase) {
        if self.phase != phase {
            log::info!("Phase {:?} -> {:?}", self.phase, phase);
            self.phase = phase;
            self.phase_timer = 0.0;
        }
    }

    /// Wipe the run and reinitialize the player; high scores survive
    pub fn reset(&mut self) {
        self.high_score = self.high_score.max(self.player.score);
        self.projectiles.clear();
        self.munitions.clear();
        self.pickups.clear();
        self.adversaries.clear();
        self.explosions.clear();
        self.spawner = SpawnDirector::default();
        self.elapsed = 0.0;
        self.combo = 0;
        self.combo_timer = 0.0;
        self.shake = ScreenShake::default();
        self.player = Player::new(&self.tuning);
        log::info!("Session reset (high score {})", self.high_score);
    }

    /// Lives exhausted: record the score and stop the simulation
    pub fn end_session(&mut self) {
        let score = self.player.score;
        if score > self.high_score {
            log::info!("New high score: {}", score);
            self.high_score = score;
        }
        self.high_scores
            .add_score(score, self.player.level, self.elapsed);
        self.player.dragging = false;
        log::info!(
            "Game over: score {} level {} kills {}",
            score,
            self.player.level,
            self.player.kills
        );
        self.set_phase(SessionPhase::GameOver);
    }

    /// Push a cosmetic explosion, evicting the oldest when at the cap
    pub fn spawn_explosion(&mut self, pos: Vec2, size: f32, tint: Tint) {
        let cap = self.settings.max_effects();
        if cap == 0 {
            return;
        }
        while self.explosions.len() >= cap {
            self.explosions.remove(0);
        }
        self.explosions.push(Explosion::new(pos, size, tint));
    }

    /// Start a screen shake pulse (ignored when shake is disabled)
    pub fn pulse_shake(&mut self, amplitude: f32, duration: f32) {
        if self.settings.effective_screen_shake() {
            self.shake.pulse(amplitude, duration);
        }
    }

    /// Drop a pickup of random kind at `pos`
    pub fn spawn_pickup(&mut self, pos: Vec2) {
        use rand::Rng;
        let kind = PickupKind::ALL[self.rng.random_range(0..PickupKind::ALL.len())];
        log::debug!("Pickup {:?} at ({:.0}, {:.0})", kind, pos.x, pos.y);
        self.pickups
            .push(Pickup::new(pos, kind, self.tuning.pickup_fall_speed));
    }

    /// Whether any adversary is still alive
    pub fn any_adversary_alive(&self) -> bool {
        self.adversaries.iter().any(|a| a.active)
    }
}
