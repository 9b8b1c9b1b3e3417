//! The tick-driven simulation.
//!
//! One [`Simulation::tick`] call runs the whole per-frame pipeline in a
//! fixed order: normalize input, advance the character controller, apply
//! void recovery, then ease the camera after the character has moved. The
//! render pass reads the resulting position and animation afterwards;
//! nothing inside the tick is callback-driven.

use festival_physics::{CharacterController, ContentFlags, ControllerConfig};
use glam::Quat;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::camera::CameraRig;
use crate::input::{InputNormalizer, RawInput};
use crate::level::Level;
use crate::player::Player;

/// Faults that make a level unplayable. All of these are configuration
/// errors surfaced at startup; the tick itself cannot fail.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SetupError {
    /// The level defines no spawn point.
    #[error("level `{0}` has no spawn point")]
    NoSpawnPoint(String),

    /// The level has no solid collision geometry to stand on.
    #[error("level `{0}` has no solid collision geometry")]
    NoSolidGeometry(String),
}

/// Simulation configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Fixed simulation rate in ticks per second.
    pub tick_rate: u32,

    /// Character controller tuning.
    pub controller: ControllerConfig,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            tick_rate: 60,
            controller: ControllerConfig::default(),
        }
    }
}

impl SimulationConfig {
    /// Seconds per tick.
    pub fn delta_time(&self) -> f32 {
        1.0 / self.tick_rate as f32
    }
}

/// The running game simulation.
#[derive(Debug)]
pub struct Simulation {
    /// Ticks advanced so far.
    pub frame: u64,

    /// Simulation configuration.
    pub config: SimulationConfig,

    /// The loaded level.
    pub level: Level,

    /// The playable character.
    pub player: Player,

    /// Follow camera the controller steers against.
    pub camera: CameraRig,

    controller: CharacterController,
    normalizer: InputNormalizer,
}

impl Simulation {
    /// Build a simulation for a level.
    ///
    /// Fails fast when the level is missing what the tick depends on, so a
    /// broken level never silently no-ops frame after frame.
    pub fn new(config: SimulationConfig, level: Level) -> Result<Self, SetupError> {
        let spawn = level
            .spawn
            .clone()
            .ok_or_else(|| SetupError::NoSpawnPoint(level.id.clone()))?;
        if !level.world.has_contents(ContentFlags::SOLID) {
            return Err(SetupError::NoSolidGeometry(level.id.clone()));
        }

        let controller = CharacterController::new(config.controller.clone());

        let mut player = Player::new();
        controller.spawn_at(&mut player.state, spawn.position, &level.world);
        player.state.orientation = Quat::from_rotation_y(spawn.facing);

        let mut camera = CameraRig::new();
        camera.snap_to(player.position());

        log::info!(
            "simulation ready: level `{}`, spawn at {:?}",
            level.name,
            player.position()
        );

        Ok(Self {
            frame: 0,
            config,
            level,
            player,
            camera,
            controller,
            normalizer: InputNormalizer::new(),
        })
    }

    /// Build a simulation with default configuration.
    pub fn with_level(level: Level) -> Result<Self, SetupError> {
        Self::new(SimulationConfig::default(), level)
    }

    /// Advance the simulation by one tick.
    pub fn tick(&mut self, raw: &RawInput) {
        let delta_time = self.config.delta_time();

        let input = self.normalizer.sample(raw);
        let frame = self.camera.frame();

        self.controller.update(
            &mut self.player.state,
            &input,
            &frame,
            &self.level.world,
            delta_time,
        );

        // Safety net against geometry gaps: anything that ends the tick
        // inside the void goes back to the last ground it stood on.
        if self.level.world.overlaps(
            self.player.position(),
            self.config.controller.body(),
            ContentFlags::VOID,
        ) {
            log::debug!(
                "void recovery at frame {}: {:?} -> {:?}",
                self.frame,
                self.player.position(),
                self.player.state.last_ground_pos
            );
            self.player.recover_to_last_ground();
        }

        if let Some(yaw) = self.level.camera_yaw_at(self.player.position()) {
            self.camera.set_target_yaw(yaw);
        }
        self.camera.follow(self.player.position());

        self.frame += 1;
    }

    /// Gate or ungate all player input.
    pub fn set_paused(&mut self, paused: bool) {
        self.normalizer.set_paused(paused);
    }

    /// Whether player input is currently gated.
    pub fn paused(&self) -> bool {
        self.normalizer.paused()
    }

    /// Seconds per tick.
    pub fn delta_time(&self) -> f32 {
        self.config.delta_time()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use festival_physics::AnimationState;
    use glam::Vec3;

    fn festival_sim() -> Simulation {
        Simulation::with_level(Level::festival_grounds()).expect("fixture level is valid")
    }

    #[test]
    fn empty_level_is_rejected() {
        let err = Simulation::with_level(Level::new("empty", "Empty")).unwrap_err();
        assert_eq!(err, SetupError::NoSpawnPoint("empty".to_string()));
    }

    #[test]
    fn level_without_solids_is_rejected() {
        let mut level = Level::new("hollow", "Hollow");
        level.spawn = Some(crate::level::SpawnPoint {
            position: Vec3::ZERO,
            facing: 0.0,
        });

        let err = Simulation::with_level(level).unwrap_err();
        assert_eq!(err, SetupError::NoSolidGeometry("hollow".to_string()));
    }

    #[test]
    fn spawn_lands_on_the_plaza() {
        let sim = festival_sim();
        assert!(sim.player.grounded());
        assert!(sim.player.position().y.abs() < 0.01);
        assert_eq!(sim.player.animation(), AnimationState::Idle);
    }

    #[test]
    fn idle_simulation_holds_still() {
        let mut sim = festival_sim();
        let start = sim.player.position();

        for _ in 0..50 {
            sim.tick(&RawInput::default());
        }

        assert_eq!(sim.frame, 50);
        assert_eq!(sim.player.position(), start);
        assert_eq!(sim.player.animation(), AnimationState::Idle);
    }

    #[test]
    fn forward_input_moves_away_from_the_camera() {
        let mut sim = festival_sim();
        let start = sim.player.position();

        let forward = RawInput {
            up: true,
            ..Default::default()
        };
        for _ in 0..60 {
            sim.tick(&forward);
        }

        // The camera starts behind the character looking along -Z.
        assert!(sim.player.position().z < start.z - 1.0);
        assert_eq!(sim.player.animation(), AnimationState::Run);
        // The camera root trails the character instead of teleporting.
        let focus_gap = (sim.camera.root_position() - sim.player.position()).length();
        assert!(focus_gap < 6.0);
    }

    #[test]
    fn paused_input_does_nothing() {
        let mut sim = festival_sim();
        sim.set_paused(true);
        let start = sim.player.position();

        let forward = RawInput {
            up: true,
            jump: true,
            dash: true,
            ..Default::default()
        };
        for _ in 0..30 {
            sim.tick(&forward);
        }

        assert_eq!(sim.player.position(), start);
        assert!(sim.paused());
    }

    #[test]
    fn void_recovery_restores_last_ground() {
        let mut sim = festival_sim();
        let home = sim.player.state.last_ground_pos;

        // Drop the character straight into the void volume.
        sim.player.state.position = Vec3::new(0.0, -9.0, 0.0);
        sim.player.state.grounded = false;
        sim.tick(&RawInput::default());

        assert_eq!(sim.player.position(), home);
        assert_eq!(sim.player.state.gravity, Vec3::ZERO);
    }

    #[test]
    fn camera_zone_retargets_the_rig() {
        let mut sim = festival_sim();

        // Teleport next to the stage, inside the camera zone, and settle.
        sim.player.state.position = Vec3::new(0.0, 1.0, -19.0);
        sim.player.state.last_ground_pos = sim.player.state.position;
        let initial_yaw = sim.camera.yaw();

        for _ in 0..300 {
            sim.tick(&RawInput::default());
        }

        assert!((sim.camera.yaw() - 0.0).abs() < 0.1);
        assert!((initial_yaw - std::f32::consts::PI).abs() < 1.0e-4);
    }

    #[test]
    fn simulation_is_deterministic() {
        let script: Vec<RawInput> = (0..240)
            .map(|i| RawInput {
                up: i % 2 == 0,
                right: i % 3 == 0,
                jump: i % 40 < 4,
                dash: i % 60 < 8,
                ..Default::default()
            })
            .collect();

        let mut first = festival_sim();
        let mut second = festival_sim();
        for raw in &script {
            first.tick(raw);
            second.tick(raw);
        }

        assert_eq!(first.player.position(), second.player.position());
        assert_eq!(first.player.animation(), second.player.animation());
        assert_eq!(
            first.player.state.vertical_velocity(),
            second.player.state.vertical_velocity()
        );
    }
}
