//! The character controller.
//!
//! One call to [`CharacterController::update`] advances the character by a
//! single simulation tick, in a fixed order:
//!
//! 1. dash edge detection and scaling
//! 2. camera-relative planar movement and facing
//! 3. ground and slope sensing
//! 4. gravity accumulation and clamping
//! 5. collide-and-slide position integration
//! 6. landing resolution, then jump triggering
//! 7. animation selection
//!
//! The order matters for game feel and is relied on by the tests; changing
//! it changes observable behavior like the exact tick a jump registers.

use glam::{Quat, Vec3};

use crate::collision::{ContentFlags, RayHit, SceneWorld};

use super::config::ControllerConfig;
use super::state::{AnimationState, CameraFrame, CharacterState, InputState};

/// Stateless driver for a [`CharacterState`].
///
/// The controller holds only configuration; all mutable data lives in the
/// state it is handed each tick, which keeps replays and tests trivial.
#[derive(Debug, Clone)]
pub struct CharacterController {
    /// Movement configuration.
    pub config: ControllerConfig,
}

impl CharacterController {
    /// Create a controller with the given configuration.
    pub fn new(config: ControllerConfig) -> Self {
        Self { config }
    }

    /// Create a controller with the default configuration.
    pub fn with_default_config() -> Self {
        Self::new(ControllerConfig::default())
    }

    /// Place a character on the ground at a spawn position.
    ///
    /// Traces down from just above `spawn_pos` and settles the feet on the
    /// first walkable surface. With nothing below, the spawn position is
    /// used as-is and the character starts airborne.
    pub fn spawn_at(&self, state: &mut CharacterState, spawn_pos: Vec3, world: &SceneWorld) {
        let probe = spawn_pos + Vec3::Y;
        if let Some(hit) = world.raycast(probe, -Vec3::Y, 3.0, ContentFlags::MASK_WALKABLE) {
            state.position = hit.point;
            state.grounded = true;
            state.jump_charges = 1;
            state.last_ground_pos = hit.point;
        } else {
            state.position = spawn_pos;
            state.grounded = false;
        }
    }

    /// Advance the character by one tick.
    pub fn update(
        &self,
        state: &mut CharacterState,
        input: &InputState,
        camera: &CameraFrame,
        world: &SceneWorld,
        delta_time: f32,
    ) {
        let planar = self.steer(state, input, camera, delta_time);
        self.integrate(state, input, world, planar, delta_time);
        state.animation = self.select_animation(state, input);
    }

    // ========================================================================
    // Steering
    // ========================================================================

    /// Dash handling, camera-relative movement, and facing. Returns the
    /// planar displacement for this tick.
    fn steer(
        &self,
        state: &mut CharacterState,
        input: &InputState,
        camera: &CameraFrame,
        delta_time: f32,
    ) -> Vec3 {
        if state.dash.try_start(input.dash_held, state.grounded) {
            log::debug!("dash started at {:?}", state.position);
        }
        let dash_factor = state
            .dash
            .advance(self.config.dash_ticks, self.config.dash_factor);

        // Movement is steered in the camera's planar frame.
        let move_dir = camera.forward * input.vertical + camera.right * input.horizontal;
        let planar = Vec3::new(move_dir.x, 0.0, move_dir.z).normalize_or_zero()
            * (input.magnitude() * self.config.player_speed * dash_factor);

        // No directional input: keep the current facing rather than snapping
        // to a default.
        if !input.has_direction() {
            return planar;
        }

        // Face where the raw axes point, relative to the camera. The slerp
        // amount is capped so a long frame cannot overshoot the target.
        let angle = input.horizontal_axis.atan2(input.vertical_axis) + camera.yaw;
        let target = Quat::from_rotation_y(angle);
        let turn = (self.config.rotation_rate * delta_time).min(1.0);
        state.orientation = state.orientation.slerp(target, turn);

        planar
    }

    // ========================================================================
    // Ground detection and integration
    // ========================================================================

    /// Ray straight down from just above the feet.
    fn ground_ray(&self, position: Vec3, world: &SceneWorld) -> Option<RayHit> {
        let origin = position + Vec3::new(0.0, self.config.ground_ray_lift, 0.0);
        world.raycast(
            origin,
            -Vec3::Y,
            self.config.ground_ray_length,
            ContentFlags::MASK_WALKABLE,
        )
    }

    fn is_grounded(&self, position: Vec3, world: &SceneWorld) -> bool {
        self.ground_ray(position, world).is_some()
    }

    /// Four offset rays looking for a stair surface falling away under the
    /// character. A tilted stair hit counts as standing ground even when
    /// the direct ray misses.
    fn on_stair_slope(&self, position: Vec3, world: &SceneWorld) -> bool {
        let off = self.config.slope_ray_offset;
        let offsets = [
            Vec3::new(0.0, 0.0, off),
            Vec3::new(0.0, 0.0, -off),
            Vec3::new(off, 0.0, 0.0),
            Vec3::new(-off, 0.0, 0.0),
        ];

        offsets.iter().any(|offset| {
            let origin = position + *offset + Vec3::new(0.0, self.config.ground_ray_lift, 0.0);
            world
                .raycast(
                    origin,
                    -Vec3::Y,
                    self.config.slope_ray_length,
                    ContentFlags::MASK_WALKABLE,
                )
                .is_some_and(|hit| hit.is_stair() && !hit.normal_is_up())
        })
    }

    /// Gravity, collision movement, landing, and jumping.
    fn integrate(
        &self,
        state: &mut CharacterState,
        input: &InputState,
        world: &SceneWorld,
        planar: Vec3,
        delta_time: f32,
    ) {
        if !self.is_grounded(state.position, world) {
            if self.on_stair_slope(state.position, world) && state.gravity.y <= 0.0 {
                // Standing on a stair slope: no gravity, jump stays armed.
                state.gravity.y = 0.0;
                state.jump_charges = 1;
                state.grounded = true;
            } else {
                state.gravity += Vec3::Y * (delta_time * self.config.gravity);
                state.grounded = false;
            }
        }

        // Terminal fall speed is bounded by the jump impulse.
        if state.gravity.y < -self.config.jump_force {
            state.gravity.y = -self.config.jump_force;
        }

        if state.gravity.y < 0.0 && state.jumped {
            state.falling = true;
        }

        state.position = world.move_with_collisions(
            state.position,
            self.config.body(),
            planar + state.gravity,
            ContentFlags::MASK_WALKABLE,
        );

        if self.is_grounded(state.position, world) {
            if state.jumped {
                log::debug!("landed at {:?}", state.position);
            }
            state.gravity.y = 0.0;
            state.grounded = true;
            state.last_ground_pos = state.position;
            state.jump_charges = 1;
            state.dash.land();
            state.jumped = false;
            state.falling = false;
        }

        if input.jump_held && state.jump_charges > 0 {
            state.gravity.y = self.config.jump_force;
            state.jump_charges -= 1;
            state.jumped = true;
            state.falling = false;
            log::debug!("jump from {:?}", state.position);
        }
    }

    // ========================================================================
    // Animation
    // ========================================================================

    /// Pick the animation for this tick. First match wins; an airborne
    /// state that fits nothing keeps the previous animation.
    fn select_animation(&self, state: &CharacterState, input: &InputState) -> AnimationState {
        if state.dash.is_active() {
            AnimationState::Dash
        } else if !state.falling && !state.jumped && input.has_direction() {
            AnimationState::Run
        } else if state.jumped && !state.falling {
            AnimationState::Jump
        } else if !state.falling && state.grounded {
            AnimationState::Idle
        } else if state.falling {
            AnimationState::Land
        } else {
            state.animation
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
