use std::f32::consts::PI;
use std::time::Duration;

use bevy::prelude::*;

const REST_OFFSET: Vec3 = Vec3::new(0.35, -0.35, -0.55);
const SWING_SECONDS: f32 = 0.25;
const SWING_ANGLE: f32 = 1.1;

/// First-person arm attached to the camera.
#[derive(Component)]
pub struct ViewModel;

/// The wielded item's mesh, hidden while the hand is empty.
#[derive(Component)]
pub struct HeldItem;

/// One downward swing of the arm.
#[derive(Component)]
pub struct HitAnimation {
    timer: Timer,
    playing: bool,
}

impl Default for HitAnimation {
    fn default() -> Self {
        Self {
            timer: Timer::from_seconds(SWING_SECONDS, TimerMode::Once),
            playing: false,
        }
    }
}

impl HitAnimation {
    /// Start the swing over, even if one is already running.
    pub fn restart(&mut self) {
        self.timer.reset();
        self.playing = true;
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Advance the swing and return the arm's pitch offset.
    pub fn advance(&mut self, delta: Duration) -> f32 {
        if !self.playing {
            return 0.0;
        }
        self.timer.tick(delta);
        if self.timer.finished() {
            self.playing = false;
            return 0.0;
        }
        (self.timer.fraction() * PI).sin() * SWING_ANGLE
    }
}

pub fn spawn_view_model(
    parent: &mut ChildBuilder,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
) {
    let arm_mesh = meshes.add(Cuboid::new(0.12, 0.12, 0.5));
    let arm_material = materials.add(StandardMaterial {
        base_color: Color::srgb(0.86, 0.67, 0.52),
        ..default()
    });
    let held_mesh = meshes.add(Cuboid::new(0.1, 0.1, 0.1));
    let held_material = materials.add(StandardMaterial::default());

    parent
        .spawn((
            ViewModel,
            HitAnimation::default(),
            Transform::from_translation(REST_OFFSET),
            Visibility::Inherited,
        ))
        .with_children(|arm| {
            arm.spawn((Mesh3d(arm_mesh), MeshMaterial3d(arm_material)));
            arm.spawn((
                HeldItem,
                Mesh3d(held_mesh),
                MeshMaterial3d(held_material),
                Transform::from_xyz(0.0, 0.1, -0.3),
                Visibility::Hidden,
            ));
        });
}

pub fn animate_swing(
    time: Res<Time>,
    mut query: Query<(&mut HitAnimation, &mut Transform), With<ViewModel>>,
) {
    for (mut animation, mut transform) in &mut query {
        if !animation.is_playing() {
            continue;
        }
        let angle = animation.advance(time.delta());
        transform.rotation = Quat::from_rotation_x(-angle);
    }
}
