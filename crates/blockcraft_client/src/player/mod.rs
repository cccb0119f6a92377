pub mod view_model;

use bevy::input::mouse::AccumulatedMouseMotion;
use bevy::prelude::*;

use blockcraft_core::config::CharacterConfig;
use blockcraft_core::interaction::TargetTracker;
use blockcraft_core::physics::{MoveInput, is_on_ground, move_with_collision, walk_delta};
use blockcraft_core::wieldable::{Material, Tool};

use crate::hud::HudCursor;
use crate::settings::{Level, Settings};
use crate::world::BlockGrid;

use view_model::{HitAnimation, ViewModel, animate_swing, spawn_view_model};

pub use blockcraft_core::physics::EYE_HEIGHT;

/// Feet below this height send the player back to the level start.
const FALL_LIMIT: f32 = -32.0;
const MAX_PITCH: f32 = 1.54;

#[derive(Component)]
pub struct FirstPersonCamera;

#[derive(Component)]
pub struct Player {
    pub position: Vec3,
    pub velocity_y: f32,
    pub grounded: bool,
}

/// Gameplay state carried by the first-person character.
#[derive(Component)]
pub struct Character {
    pub reach: f32,
    pub hit_anim_interval: f32,
    pub targeting: TargetTracker<Entity>,
    pub block_breaking_timer: Option<Timer>,
    pub hit_anim_timer: Option<Timer>,
    tool: Tool,
    material: Material,
}

impl Character {
    pub fn new(config: &CharacterConfig) -> Self {
        Self {
            reach: config.reach,
            hit_anim_interval: config.hit_anim_interval,
            targeting: TargetTracker::default(),
            block_breaking_timer: None,
            hit_anim_timer: None,
            tool: Tool::default(),
            material: Material::default(),
        }
    }

    pub fn tool(&self) -> Tool {
        self.tool
    }

    pub fn material(&self) -> Material {
        self.material
    }

    pub fn set_tool(&mut self, tool: Tool) {
        self.tool = tool;
    }

    pub fn set_material(&mut self, material: Material) {
        self.material = material;
    }

    pub fn is_breaking(&self) -> bool {
        self.targeting.breaking
    }

    /// Interact released: stop both timers.
    pub fn end_hit(&mut self) {
        self.block_breaking_timer = None;
        self.hit_anim_timer = None;
        self.targeting.end_hit();
    }
}

impl Default for Character {
    fn default() -> Self {
        Self::new(&CharacterConfig::default())
    }
}

pub struct PlayerPlugin;

impl Plugin for PlayerPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_character).add_systems(
            Update,
            (
                camera_look,
                player_movement.after(camera_look),
                animate_swing,
                exit_game,
            ),
        );
    }
}

pub fn spawn_character(
    mut commands: Commands,
    settings: Res<Settings>,
    level: Res<Level>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let feet_pos = level.player_start;
    let eye_pos = feet_pos + Vec3::new(0.0, EYE_HEIGHT, 0.0);

    commands
        .spawn((
            Camera3d::default(),
            Transform::from_translation(eye_pos),
            FirstPersonCamera,
            Player {
                position: feet_pos,
                velocity_y: 0.0,
                grounded: false,
            },
            Character::new(&settings.character),
        ))
        .with_children(|parent| spawn_view_model(parent, &mut meshes, &mut materials));

    info!("character spawned at {feet_pos}");
}

/// Turn and LookUp from the mouse, TurnRate and LookUpRate from the right stick.
pub fn camera_look(
    time: Res<Time>,
    settings: Res<Settings>,
    hud_cursor: Option<Res<HudCursor>>,
    mouse_motion: Res<AccumulatedMouseMotion>,
    gamepads: Query<&Gamepad>,
    mut query: Query<&mut Transform, With<FirstPersonCamera>>,
) {
    let character = &settings.character;
    let dt = time.delta_secs();

    let mut yaw_delta = 0.0;
    let mut pitch_delta = 0.0;

    if !hud_cursor.is_some_and(|cursor| cursor.show_mouse_cursor) {
        yaw_delta -= mouse_motion.delta.x * character.mouse_sensitivity;
        pitch_delta -= mouse_motion.delta.y * character.mouse_sensitivity;
    }
    for gamepad in &gamepads {
        let stick = gamepad.right_stick();
        yaw_delta -= stick.x * character.base_turn_rate.to_radians() * dt;
        pitch_delta += stick.y * character.base_look_up_rate.to_radians() * dt;
    }

    if yaw_delta == 0.0 && pitch_delta == 0.0 {
        return;
    }

    for mut transform in &mut query {
        let (mut yaw, mut pitch, _) = transform.rotation.to_euler(EulerRot::YXZ);
        yaw += yaw_delta;
        pitch = (pitch + pitch_delta).clamp(-MAX_PITCH, MAX_PITCH);
        transform.rotation = Quat::from_euler(EulerRot::YXZ, yaw, pitch, 0.0);
    }
}

fn key_axis(keys: &ButtonInput<KeyCode>, positive: KeyCode, negative: KeyCode) -> f32 {
    let mut value = 0.0;
    if keys.pressed(positive) {
        value += 1.0;
    }
    if keys.pressed(negative) {
        value -= 1.0;
    }
    value
}

/// MoveForward, MoveRight and Jump for this frame.
pub fn read_move_input<'a>(
    keys: &ButtonInput<KeyCode>,
    gamepads: impl IntoIterator<Item = &'a Gamepad>,
) -> MoveInput {
    let mut input = MoveInput {
        forward: key_axis(keys, KeyCode::KeyW, KeyCode::KeyS),
        right: key_axis(keys, KeyCode::KeyD, KeyCode::KeyA),
        jump: keys.just_pressed(KeyCode::Space),
    };
    for gamepad in gamepads {
        let stick = gamepad.left_stick();
        input.forward += stick.y;
        input.right += stick.x;
        input.jump |= gamepad.just_pressed(GamepadButton::South);
    }
    input.forward = input.forward.clamp(-1.0, 1.0);
    input.right = input.right.clamp(-1.0, 1.0);
    input
}

pub fn player_movement(
    time: Res<Time>,
    keys: Res<ButtonInput<KeyCode>>,
    settings: Res<Settings>,
    level: Res<Level>,
    grid: Res<BlockGrid>,
    gamepads: Query<&Gamepad>,
    mut query: Query<(&mut Transform, &mut Player), With<FirstPersonCamera>>,
) {
    let dt = time.delta_secs();
    let input = read_move_input(&keys, &gamepads);

    for (mut transform, mut player) in &mut query {
        let (yaw, _, _) = transform.rotation.to_euler(EulerRot::YXZ);

        player.grounded = is_on_ground(player.position, &grid);
        let (delta, velocity_y) = walk_delta(
            input,
            yaw,
            settings.character.walk_speed,
            dt,
            player.velocity_y,
            player.grounded,
        );
        player.velocity_y = velocity_y;

        let result = move_with_collision(player.position, delta, &grid);
        player.position = result.position;
        if result.hit_floor {
            player.velocity_y = 0.0;
            player.grounded = true;
        }
        if result.hit_ceiling {
            player.velocity_y = 0.0;
        }

        if player.position.y < FALL_LIMIT {
            warn!("player fell out of the level, respawning");
            player.position = level.player_start;
            player.velocity_y = 0.0;
        }

        transform.translation = player.position + Vec3::new(0.0, EYE_HEIGHT, 0.0);
    }
}

/// ExitGame action.
pub fn exit_game(keys: Res<ButtonInput<KeyCode>>, mut exit: EventWriter<AppExit>) {
    if keys.just_pressed(KeyCode::Escape) {
        info!("exit requested");
        exit.send(AppExit::Success);
    }
}

/// Restart the view-model swing, if there is a view model to swing.
pub fn play_hit_anim(views: &mut Query<&mut HitAnimation, With<ViewModel>>) {
    if let Ok(mut animation) = views.get_single_mut() {
        animation.restart();
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use blockcraft_core::level::LevelDescription;

    use super::*;

    fn movement_app(start: Vec3) -> (App, Entity) {
        let mut app = App::new();
        let mut grid = BlockGrid::default();
        for x in -3..=3 {
            for z in -6..=3 {
                grid.insert(IVec3::new(x, 0, z), Entity::PLACEHOLDER);
            }
        }
        app.init_resource::<Time>()
            .init_resource::<ButtonInput<KeyCode>>()
            .insert_resource(Settings::default())
            .insert_resource(Level(LevelDescription {
                player_start: start,
                ..LevelDescription::default()
            }))
            .insert_resource(grid)
            .add_systems(Update, player_movement);
        let player = app
            .world_mut()
            .spawn((
                FirstPersonCamera,
                Transform::from_translation(start + Vec3::Y * EYE_HEIGHT),
                Player {
                    position: start,
                    velocity_y: 0.0,
                    grounded: false,
                },
            ))
            .id();
        (app, player)
    }

    fn step(app: &mut App, frames: usize) {
        for _ in 0..frames {
            app.world_mut()
                .resource_mut::<Time>()
                .advance_by(Duration::from_millis(16));
            app.update();
        }
    }

    #[test]
    fn falling_player_lands_on_floor() {
        let (mut app, player) = movement_app(Vec3::new(0.5, 2.5, 0.5));
        step(&mut app, 60);

        let player = app.world().get::<Player>(player).unwrap();
        assert!(player.grounded);
        assert_eq!(player.position.y, 1.0);
        assert_eq!(player.velocity_y, 0.0);
    }

    #[test]
    fn move_forward_walks_along_negative_z() {
        let (mut app, player) = movement_app(Vec3::new(0.5, 1.0, 0.5));
        app.world_mut()
            .resource_mut::<ButtonInput<KeyCode>>()
            .press(KeyCode::KeyW);
        step(&mut app, 10);

        let player_state = app.world().get::<Player>(player).unwrap();
        assert!(player_state.position.z < 0.0);
        assert!((player_state.position.x - 0.5).abs() < 1e-4);

        let transform = app.world().get::<Transform>(player).unwrap();
        assert_eq!(
            transform.translation,
            player_state.position + Vec3::Y * EYE_HEIGHT
        );
    }

    #[test]
    fn opposing_keys_cancel() {
        let mut keys = ButtonInput::<KeyCode>::default();
        keys.press(KeyCode::KeyW);
        keys.press(KeyCode::KeyS);
        keys.press(KeyCode::KeyD);
        let input = read_move_input(&keys, std::iter::empty());
        assert_eq!(input.forward, 0.0);
        assert_eq!(input.right, 1.0);
        assert!(!input.jump);
    }

    #[test]
    fn escape_requests_exit() {
        let mut app = App::new();
        app.init_resource::<ButtonInput<KeyCode>>()
            .add_event::<AppExit>()
            .add_systems(Update, exit_game);
        app.world_mut()
            .resource_mut::<ButtonInput<KeyCode>>()
            .press(KeyCode::Escape);
        app.update();

        assert_eq!(app.world().resource::<Events<AppExit>>().len(), 1);
    }

    #[test]
    fn wielded_state_round_trips() {
        let mut character = Character::default();
        assert_eq!(character.tool(), Tool::Unarmed);
        character.set_tool(Tool::Pickaxe);
        character.set_material(Material::Diamond);
        assert_eq!(character.tool(), Tool::Pickaxe);
        assert_eq!(character.material(), Material::Diamond);
        assert_eq!(character.reach, 2.5);
    }
}
