//! Per-frame simulation step
//!
//! Order within a Playing frame: timers, movement, fire, spawning,
//! integration, collisions, guidance, compaction.

use glam::Vec2;

use super::adversary::Archetype;
use super::guidance::nearest_adversary;
use super::state::{Session, SessionPhase, Side};
use crate::consts::*;

/// Pointer/touch state sampled this frame
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PointerState {
    pub primary_down: bool,
    /// Logical screen coordinates
    pub position: Vec2,
}

/// Input commands for a single frame
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameInput {
    pub pointer: PointerState,
    pub fire_gun: bool,
    pub fire_munition: bool,
    pub fire_bomb: bool,
    /// Pause toggle
    pub pause: bool,
    /// Demo mode - the session drives its own input
    pub autopilot: bool,
}

/// Live adversaries that make the autopilot reach for a bomb
const AUTOPILOT_BOMB_CROWD: usize = 6;
const AUTOPILOT_BOMB_HEALTH: u32 = 30;

/// Advance the session by one frame of `dt` seconds
pub fn tick(session: &mut Session, input: &FrameInput, dt: f32) {
    let dt = dt.clamp(0.0, MAX_FRAME_DT);

    let input = if input.autopilot {
        autopilot_input(session)
    } else {
        *input
    };

    // Pointer edges
    let down = input.pointer.primary_down;
    if down && !session.pointer_was_down {
        session.on_primary_down(input.pointer.position);
    } else if down && session.player.dragging {
        session.player.target = input.pointer.position;
    } else if !down && session.pointer_was_down {
        session.on_primary_up();
    }
    session.pointer_was_down = down;

    if input.pause {
        session.toggle_pause();
    }
    if input.fire_gun {
        session.fire_gun();
    }
    if input.fire_munition {
        session.fire_munition();
    }
    if input.fire_bomb {
        session.fire_bomb();
    }

    session.phase_timer += dt;

    if session.phase == SessionPhase::Playing {
        session.step_playing(dt);
    }
}

/// Synthesize input for demo mode: hold under the nearest threat and shoot
fn autopilot_input(session: &Session) -> FrameInput {
    let playing = session.phase == SessionPhase::Playing;
    // Release for one frame whenever a fresh press is needed
    let primary_down = (playing && session.player.dragging) || !session.pointer_was_down;

    let p = session.player.pos;
    let nearest = nearest_adversary(&session.adversaries, p).map(|i| &session.adversaries[i]);
    let aim_x = nearest.map(|a| a.pos.x).unwrap_or(SCREEN_W / 2.0);
    let position = Vec2::new(aim_x, PLAY_H - PLAYER_START_OFFSET_Y);

    let munition_in_flight = session
        .munitions
        .iter()
        .any(|m| m.active && m.side == Side::Player);
    let fire_munition = !munition_in_flight
        && nearest.is_some_and(|a| matches!(a.archetype, Archetype::Heavy | Archetype::Boss));

    let crowd = session.adversaries.iter().filter(|a| a.active).count();
    let fire_bomb = crowd > 0
        && (crowd >= AUTOPILOT_BOMB_CROWD || session.player.health < AUTOPILOT_BOMB_HEALTH);

    FrameInput {
        pointer: PointerState {
            primary_down,
            position,
        },
        fire_gun: playing,
        fire_munition: playing && fire_munition,
        fire_bomb: playing && fire_bomb,
        pause: false,
        autopilot: true,
    }
}

impl Session {
    /// Drive the session for one frame
    pub fn update(&mut self, dt: f32, input: &FrameInput) {
        tick(self, input, dt);
    }

    /// Playing <-> Paused
    pub fn toggle_pause(&mut self) {
        match self.phase {
            SessionPhase::Playing => {
                self.player.dragging = false;
                self.set_phase(SessionPhase::Paused);
            }
            SessionPhase::Paused => self.set_phase(SessionPhase::Playing),
            SessionPhase::Menu | SessionPhase::GameOver => {}
        }
    }

    /// Primary press: starts, resumes or restarts; in play it begins a drag
    pub fn on_primary_down(&mut self, pos: Vec2) {
        match self.phase {
            SessionPhase::Menu | SessionPhase::Paused => self.set_phase(SessionPhase::Playing),
            SessionPhase::GameOver => {
                self.reset();
                self.set_phase(SessionPhase::Playing);
            }
            SessionPhase::Playing => {
                if pos.y < PLAY_H {
                    self.player.dragging = true;
                    self.player.target = pos;
                }
            }
        }
    }

    pub fn on_primary_up(&mut self) {
        self.player.dragging = false;
    }

    fn step_playing(&mut self, dt: f32) {
        self.elapsed += dt;

        self.player.tick_timers(dt);
        self.decay_combo(dt);
        self.shake.step(dt, &mut self.rng);

        self.player.steer(dt, &self.tuning);
        if self.player.dragging && self.settings.auto_fire {
            self.fire_gun();
        }

        self.run_spawner(dt);

        for p in self.projectiles.iter_mut().filter(|p| p.active) {
            p.pos += p.vel * dt;
        }
        for m in self.munitions.iter_mut().filter(|m| m.active) {
            m.pos += m.vel * dt;
        }

        let target = self.player.pos;
        let munition_speed = self.tuning.munition_launch_speed;
        let munition_life = self.tuning.munition_lifetime;
        for a in self.adversaries.iter_mut().filter(|a| a.active) {
            a.advance(dt);
            a.fire(
                dt,
                target,
                &mut self.rng,
                &mut self.projectiles,
                &mut self.munitions,
                munition_speed,
                munition_life,
            );
        }

        for p in self.pickups.iter_mut().filter(|p| p.active) {
            p.pos.y += p.fall_speed * dt;
            p.bob += dt;
        }
        for e in &mut self.explosions {
            e.advance(dt);
        }
        self.backdrop.step(dt, &mut self.rng);

        self.resolve_collisions();
        if self.phase != SessionPhase::Playing {
            return;
        }
        self.guide_munitions(dt);

        self.projectiles.retain(|p| p.active);
        self.munitions.retain(|m| m.active);
        self.adversaries.retain(|a| a.active);
        self.pickups.retain(|p| p.active);
        self.explosions.retain(|e| e.is_alive());

        self.player.update_level(self.elapsed, self.tuning.level_period);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{Adversary, GuidedMunition, Projectile, state::TINT_ENEMY_BULLET};
    use crate::{Rect, Settings, Tuning, out_of_bounds};
    use proptest::prelude::*;

    const DT: f32 = 1.0 / 60.0;

    fn press(at: Vec2) -> FrameInput {
        FrameInput {
            pointer: PointerState {
                primary_down: true,
                position: at,
            },
            ..Default::default()
        }
    }

    fn start(seed: u64) -> Session {
        let mut session = Session::new(seed);
        tick(&mut session, &press(Vec2::new(360.0, 600.0)), DT);
        tick(&mut session, &FrameInput::default(), DT);
        assert_eq!(session.phase, SessionPhase::Playing);
        session
    }

    #[test]
    fn test_menu_to_playing_on_press() {
        let mut session = Session::new(1);
        tick(&mut session, &FrameInput::default(), DT);
        assert_eq!(session.phase, SessionPhase::Menu);
        assert_eq!(session.elapsed, 0.0);

        tick(&mut session, &press(Vec2::new(360.0, 600.0)), DT);
        assert_eq!(session.phase, SessionPhase::Playing);
        assert!(!session.player.dragging);
    }

    #[test]
    fn test_pause_freezes_simulation() {
        let mut session = start(2);
        for _ in 0..200 {
            tick(&mut session, &FrameInput::default(), DT);
        }
        let pause = FrameInput {
            pause: true,
            ..Default::default()
        };
        tick(&mut session, &pause, DT);
        assert_eq!(session.phase, SessionPhase::Paused);

        let elapsed = session.elapsed;
        let positions: Vec<Vec2> = session.adversaries.iter().map(|a| a.pos).collect();
        for _ in 0..120 {
            tick(&mut session, &FrameInput::default(), DT);
        }
        assert_eq!(session.elapsed, elapsed);
        let after: Vec<Vec2> = session.adversaries.iter().map(|a| a.pos).collect();
        assert_eq!(positions, after);

        tick(&mut session, &press(Vec2::new(100.0, 100.0)), DT);
        assert_eq!(session.phase, SessionPhase::Playing);
    }

    #[test]
    fn test_pause_toggles_back() {
        let mut session = start(3);
        let pause = FrameInput {
            pause: true,
            ..Default::default()
        };
        tick(&mut session, &pause, DT);
        assert_eq!(session.phase, SessionPhase::Paused);
        tick(&mut session, &pause, DT);
        assert_eq!(session.phase, SessionPhase::Playing);
    }

    #[test]
    fn test_phase_transitions_closed() {
        use SessionPhase::*;
        let inputs = [
            FrameInput::default(),
            press(Vec2::new(360.0, 600.0)),
            FrameInput {
                pause: true,
                ..Default::default()
            },
        ];
        let expected = [
            (Menu, [Menu, Playing, Menu]),
            (Playing, [Playing, Playing, Paused]),
            (Paused, [Paused, Playing, Playing]),
            (GameOver, [GameOver, Playing, GameOver]),
        ];
        for (from, outcomes) in expected {
            for (input, want) in inputs.iter().zip(outcomes) {
                let mut session = Session::new(4);
                session.set_phase(from);
                tick(&mut session, input, DT);
                assert_eq!(session.phase, want, "{:?} with {:?}", from, input);
            }
        }
    }

    #[test]
    fn test_gun_kill_scenario() {
        let mut session = start(5);
        let p = session.player.pos;
        let mut target = Adversary::spawn(Archetype::Basic, p - Vec2::new(0.0, 200.0), 1.0);
        target.vel = Vec2::ZERO;
        session.adversaries.push(target);

        for _ in 0..36 {
            tick(&mut session, &press(p), DT);
        }

        assert_eq!(session.player.kills, 1);
        assert_eq!(session.combo, 1);
        assert_eq!(session.player.score, 100);
        assert!(!session.any_adversary_alive());
    }

    #[test]
    fn test_life_loss_scenario() {
        let mut session = start(6);
        session.player.health = 10;
        let p = session.player.pos;
        session.projectiles.push(Projectile::new(
            p - Vec2::new(0.0, 4.0),
            Vec2::new(0.0, 250.0),
            Side::Adversary,
            10,
            TINT_ENEMY_BULLET,
        ));
        tick(&mut session, &FrameInput::default(), DT);

        assert_eq!(session.player.lives, 2);
        assert_eq!(session.player.health, 100);
        assert_eq!(session.player.invuln_timer, 3.0);
        assert_eq!(session.phase, SessionPhase::Playing);
    }

    #[test]
    fn test_reset_scenario() {
        let mut session = start(7);
        for _ in 0..300 {
            tick(&mut session, &FrameInput::default(), DT);
        }
        session.player.score = 5000;
        session.end_session();
        tick(&mut session, &FrameInput::default(), DT);
        assert_eq!(session.phase, SessionPhase::GameOver);

        session.on_primary_down(Vec2::new(360.0, 600.0));
        assert_eq!(session.phase, SessionPhase::Playing);
        assert_eq!(session.player.score, 0);
        assert_eq!(session.high_score, 5000);
        assert_eq!(session.player.lives, 3);
        assert_eq!(session.elapsed, 0.0);
        assert!(session.adversaries.is_empty());
        assert!(session.projectiles.is_empty());
        assert!(session.pickups.is_empty());
        assert!(!session.spawner.boss_spawned);
    }

    #[test]
    fn test_defeat_freezes_rest_of_frame() {
        let mut session = start(10);
        session.player.lives = 1;
        session.player.health = 10;
        session.player.score = 300;
        let p = session.player.pos;
        session.projectiles.push(Projectile::new(
            p - Vec2::new(0.0, 4.0),
            Vec2::new(0.0, 250.0),
            Side::Adversary,
            10,
            TINT_ENEMY_BULLET,
        ));
        let heavy_at = Vec2::new(200.0, 300.0);
        let mut heavy = Adversary::spawn(Archetype::Heavy, heavy_at, 1.0);
        heavy.vel = Vec2::ZERO;
        session.adversaries.push(heavy);
        session.munitions.push(GuidedMunition::launch(
            heavy_at,
            heavy_at,
            Side::Player,
            100,
            400.0,
            3.0,
        ));
        let level = session.player.level;
        tick(&mut session, &FrameInput::default(), DT);

        assert_eq!(session.phase, SessionPhase::GameOver);
        assert_eq!(session.player.score, 300);
        assert_eq!(session.high_scores.top_score(), 300);
        assert_eq!(session.munitions[0].life, 3.0);
        assert_eq!(session.player.level, level);
    }

    #[test]
    fn test_dt_is_clamped() {
        let mut session = start(8);
        let before = session.elapsed;
        tick(&mut session, &FrameInput::default(), 1.0);
        assert!((session.elapsed - before - MAX_FRAME_DT).abs() < 1e-6);
        tick(&mut session, &FrameInput::default(), -1.0);
        assert!((session.elapsed - before - MAX_FRAME_DT).abs() < 1e-6);
    }

    #[test]
    fn test_level_tracks_elapsed() {
        let mut session = start(9);
        session.player.invuln_timer = 1000.0;
        for _ in 0..(31 * 20) {
            tick(&mut session, &FrameInput::default(), MAX_FRAME_DT);
        }
        assert_eq!(session.player.level, 2);
    }

    #[test]
    fn test_same_seed_same_run() {
        let auto = FrameInput {
            autopilot: true,
            ..Default::default()
        };
        let mut a = Session::new(99);
        let mut b = Session::new(99);
        for _ in 0..600 {
            tick(&mut a, &auto, DT);
            tick(&mut b, &auto, DT);
        }
        assert_eq!(a.player.score, b.player.score);
        assert_eq!(a.player.pos, b.player.pos);
        assert_eq!(a.adversaries.len(), b.adversaries.len());
    }

    #[test]
    fn test_autopilot_scores() {
        let auto = FrameInput {
            autopilot: true,
            ..Default::default()
        };
        let tuning = Tuning {
            lives: 9,
            ..Tuning::default()
        };
        let mut session = Session::with_config(2024, tuning, Settings::default());
        for _ in 0..(60 * 60) {
            tick(&mut session, &auto, DT);
        }
        assert_eq!(session.phase, SessionPhase::Playing);
        assert!(session.player.kills > 0);
        assert!(session.player.score > 0);
    }

    fn arb_input() -> impl Strategy<Value = (FrameInput, f32)> {
        (
            any::<bool>(),
            -200.0f32..1000.0,
            -200.0f32..1800.0,
            any::<bool>(),
            prop::bool::weighted(0.1),
            prop::bool::weighted(0.02),
            prop::bool::weighted(0.02),
            0.0f32..0.1,
        )
            .prop_map(|(down, x, y, gun, munition, bomb, pause, dt)| {
                (
                    FrameInput {
                        pointer: PointerState {
                            primary_down: down,
                            position: Vec2::new(x, y),
                        },
                        fire_gun: gun,
                        fire_munition: munition,
                        fire_bomb: bomb,
                        pause,
                        autopilot: false,
                    },
                    dt,
                )
            })
    }

    proptest! {
        #[test]
        fn prop_entities_stay_bounded(
            seed in any::<u64>(),
            frames in prop::collection::vec(arb_input(), 1..300),
        ) {
            let mut session = Session::new(seed);
            let bounds = Rect::player_bounds();
            for (input, dt) in &frames {
                tick(&mut session, input, *dt);

                let p = &session.player;
                prop_assert!(bounds.contains(p.pos));
                prop_assert!(p.health <= p.max_health);
                prop_assert!(p.shield <= p.max_shield);
                prop_assert!(p.ammo <= p.max_ammo);
                prop_assert!(p.bombs <= p.max_bombs);

                if session.phase == SessionPhase::Playing {
                    prop_assert!(session.projectiles.iter().all(|s| !out_of_bounds(s.pos, PROJECTILE_MARGIN)));
                    prop_assert!(session.munitions.iter().all(|m| !out_of_bounds(m.pos, MUNITION_MARGIN)));
                    prop_assert!(session.pickups.iter().all(|k| k.pos.y <= PLAY_H + PICKUP_MARGIN));
                    prop_assert!(session.adversaries.iter().all(|a| a.pos.y <= PLAY_H + ADVERSARY_MARGIN));
                }
            }
        }

        #[test]
        fn prop_munition_without_ammo_is_noop(seed in any::<u64>(), frames in 0usize..120) {
            let mut session = start(seed);
            for _ in 0..frames {
                tick(&mut session, &FrameInput::default(), DT);
            }
            session.player.ammo = 0;
            let score = session.player.score;
            let munitions = session.munitions.len();
            session.fire_munition();
            session.fire_munition();
            prop_assert_eq!(session.player.ammo, 0);
            prop_assert_eq!(session.munitions.len(), munitions);
            prop_assert_eq!(session.player.score, score);
        }
    }
}
