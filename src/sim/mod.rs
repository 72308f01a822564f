//! Frame-stepped simulation module
//!
//! All gameplay logic lives here. This module must stay free of rendering
//! and platform dependencies:
//! - Variable frame step, clamped to `MAX_FRAME_DT`
//! - Seeded RNG only, owned by the session
//! - Stable iteration order (pool insertion order)

pub mod adversary;
pub mod backdrop;
pub mod collision;
pub mod guidance;
pub mod player;
pub mod snapshot;
pub mod spawn;
pub mod state;
pub mod tick;

pub use adversary::{Adversary, Archetype, ArchetypeStats};
pub use backdrop::{Backdrop, Cloud, Star};
pub use collision::KillSource;
pub use guidance::{nearest_adversary, steer};
pub use player::{HitOutcome, Player};
pub use snapshot::{Hud, Snapshot};
pub use spawn::{SpawnDirector, SpawnPlan};
pub use state::{
    EXPLOSION_LIFE, Explosion, GuidedMunition, Pickup, PickupKind, Projectile, ScreenShake,
    Session, SessionPhase, Side, Tint,
};
pub use tick::{FrameInput, PointerState, tick};
