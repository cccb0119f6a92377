use bevy::prelude::*;

use blockcraft_core::interaction::break_interval;
use blockcraft_core::raycast::dda_raycast;

use crate::block::{self, Block, BlockCell};
use crate::events::{BlockBrokenEvent, BlockCrackedEvent};
use crate::hud::HudCursor;
use crate::player::view_model::{HitAnimation, ViewModel};
use crate::player::{Character, FirstPersonCamera, play_hit_anim, player_movement};
use crate::world::BlockGrid;

pub struct InteractionPlugin;

impl Plugin for InteractionPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (check_for_blocks, handle_interact, tick_character_timers)
                .chain()
                .after(player_movement),
        );
    }
}

/// Track the block under the crosshair, resetting cracks on blocks left behind.
pub fn check_for_blocks(
    grid: Res<BlockGrid>,
    mut characters: Query<(&Transform, &mut Character), With<FirstPersonCamera>>,
    mut blocks: Query<&mut Block>,
) {
    for (transform, mut character) in &mut characters {
        let hit = dda_raycast(
            transform.translation,
            transform.forward().as_vec3(),
            character.reach,
            &grid,
        )
        .map(|hit| hit.block);

        let Some(stale) = character.targeting.update(hit) else {
            continue;
        };
        // The block may have been destroyed since it was targeted.
        if let Ok(mut block) = blocks.get_mut(stale) {
            if block.breaking_stage != 0 {
                block.reset();
            }
        }
    }
}

/// Interact pressed: swing once, then start breaking the targeted block.
pub fn on_hit(
    character: &mut Character,
    blocks: &Query<&Block>,
    views: &mut Query<&mut HitAnimation, With<ViewModel>>,
) {
    play_hit_anim(views);

    let Some(target) = character.targeting.begin_hit() else {
        return;
    };
    let Ok(block) = blocks.get(target) else {
        character.end_hit();
        return;
    };

    character.block_breaking_timer =
        break_interval(block.resistance).map(|interval| Timer::new(interval, TimerMode::Repeating));
    character.hit_anim_timer = (character.hit_anim_interval > 0.0)
        .then(|| Timer::from_seconds(character.hit_anim_interval, TimerMode::Repeating));
}

pub fn handle_interact(
    mouse: Res<ButtonInput<MouseButton>>,
    hud_cursor: Option<Res<HudCursor>>,
    gamepads: Query<&Gamepad>,
    blocks: Query<&Block>,
    mut characters: Query<&mut Character, With<FirstPersonCamera>>,
    mut views: Query<&mut HitAnimation, With<ViewModel>>,
) {
    // Clicks belong to the HUD while it accepts them.
    let hud_takes_clicks = hud_cursor.is_some_and(|cursor| cursor.enable_click_events);
    let pressed = !hud_takes_clicks
        && (mouse.just_pressed(MouseButton::Left)
            || gamepads
                .iter()
                .any(|gamepad| gamepad.just_pressed(GamepadButton::RightTrigger2)));
    let released = mouse.just_released(MouseButton::Left)
        || gamepads
            .iter()
            .any(|gamepad| gamepad.just_released(GamepadButton::RightTrigger2));

    for mut character in &mut characters {
        if pressed {
            on_hit(&mut character, &blocks, &mut views);
        }
        if released {
            character.end_hit();
        }
    }
}

/// Fire the break and hit-animation timers.
pub fn tick_character_timers(
    mut commands: Commands,
    time: Res<Time>,
    mut grid: ResMut<BlockGrid>,
    mut characters: Query<&mut Character>,
    mut blocks: Query<(&mut Block, &BlockCell)>,
    mut views: Query<&mut HitAnimation, With<ViewModel>>,
    mut ev_cracked: EventWriter<BlockCrackedEvent>,
    mut ev_broken: EventWriter<BlockBrokenEvent>,
) {
    for mut character in &mut characters {
        let breaks = character
            .block_breaking_timer
            .as_mut()
            .map_or(0, |timer| timer.tick(time.delta()).times_finished_this_tick());

        for _ in 0..breaks {
            let Some(target) = character.targeting.break_target() else {
                break;
            };
            let Ok((mut block, cell)) = blocks.get_mut(target) else {
                break;
            };
            // Despawn is deferred; a broken block must not be hit again this frame.
            if block.is_broken() {
                break;
            }
            block::break_block(
                &mut commands,
                &mut grid,
                target,
                &mut block,
                cell.0,
                &mut ev_cracked,
                &mut ev_broken,
            );
        }

        let swings = character
            .hit_anim_timer
            .as_mut()
            .map_or(0, |timer| timer.tick(time.delta()).times_finished_this_tick());
        if swings > 0 {
            play_hit_anim(&mut views);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use blockcraft_core::block::Block as BlockRules;
    use blockcraft_core::interaction::TargetTracker;

    use super::*;

    const BLOCK_CELL: IVec3 = IVec3::new(0, 1, -2);

    fn interaction_app(resistance: f32) -> (App, Entity, Entity) {
        let mut app = App::new();
        app.init_resource::<Time>()
            .init_resource::<ButtonInput<MouseButton>>()
            .init_resource::<BlockGrid>()
            .add_event::<BlockCrackedEvent>()
            .add_event::<BlockBrokenEvent>()
            .add_systems(
                Update,
                (check_for_blocks, handle_interact, tick_character_timers).chain(),
            );

        let block = app
            .world_mut()
            .spawn((Block(BlockRules::with_resistance(resistance)), BlockCell(BLOCK_CELL)))
            .id();
        app.world_mut()
            .resource_mut::<BlockGrid>()
            .insert(BLOCK_CELL, block);

        // Default transform looks down -Z, straight at the block.
        let character = app
            .world_mut()
            .spawn((
                FirstPersonCamera,
                Transform::from_xyz(0.5, 1.5, 0.5),
                Character::default(),
            ))
            .id();
        (app, block, character)
    }

    fn step(app: &mut App, millis: u64) {
        app.world_mut()
            .resource_mut::<Time>()
            .advance_by(Duration::from_millis(millis));
        app.update();
    }

    fn press(app: &mut App) {
        app.world_mut()
            .resource_mut::<ButtonInput<MouseButton>>()
            .press(MouseButton::Left);
        step(app, 0);
        // Keep the button held without re-triggering the press.
        app.world_mut()
            .resource_mut::<ButtonInput<MouseButton>>()
            .clear();
    }

    #[test]
    fn block_in_reach_is_targeted() {
        let (mut app, block, character) = interaction_app(20.0);
        step(&mut app, 16);

        let character = app.world().get::<Character>(character).unwrap();
        assert_eq!(character.targeting.current, Some(block));
        assert!(!character.is_breaking());
    }

    #[test]
    fn block_out_of_reach_is_ignored() {
        let (mut app, _, character) = interaction_app(20.0);
        app.world_mut()
            .get_mut::<Character>(character)
            .unwrap()
            .reach = 1.0;
        step(&mut app, 16);

        let character = app.world().get::<Character>(character).unwrap();
        assert_eq!(character.targeting.current, None);
    }

    #[test]
    fn holding_interact_breaks_block_in_five_ticks() {
        let (mut app, block, character) = interaction_app(20.0);
        press(&mut app);

        {
            let character = app.world().get::<Character>(character).unwrap();
            assert!(character.is_breaking());
            assert!(character.block_breaking_timer.is_some());
            assert!(character.hit_anim_timer.is_some());
        }

        // 0.1 s per break at resistance 20.
        for _ in 0..4 {
            step(&mut app, 110);
        }
        assert_eq!(app.world().get::<Block>(block).unwrap().breaking_stage, 4);
        assert_eq!(app.world().resource::<Events<BlockCrackedEvent>>().len(), 2);

        step(&mut app, 110);
        assert!(!app.world().entities().contains(block));
        assert!(app.world().resource::<BlockGrid>().is_empty());
        assert_eq!(app.world().resource::<Events<BlockBrokenEvent>>().len(), 1);
    }

    #[test]
    fn releasing_interact_stops_breaking() {
        let (mut app, block, character) = interaction_app(20.0);
        press(&mut app);
        step(&mut app, 110);

        app.world_mut()
            .resource_mut::<ButtonInput<MouseButton>>()
            .release(MouseButton::Left);
        step(&mut app, 110);

        let state = app.world().get::<Character>(character).unwrap();
        assert!(!state.is_breaking());
        assert!(state.block_breaking_timer.is_none());
        assert!(state.hit_anim_timer.is_none());
        assert_eq!(app.world().get::<Block>(block).unwrap().breaking_stage, 1);

        // Once released, the cracks heal on the next look.
        step(&mut app, 110);
        assert_eq!(app.world().get::<Block>(block).unwrap().breaking_stage, 0);
    }

    #[test]
    fn looking_away_resets_cracks() {
        let (mut app, block, character) = interaction_app(20.0);
        press(&mut app);
        step(&mut app, 110);
        step(&mut app, 110);
        assert_eq!(app.world().get::<Block>(block).unwrap().breaking_stage, 2);

        app.world_mut()
            .get_mut::<Transform>(character)
            .unwrap()
            .rotate_y(std::f32::consts::PI);
        step(&mut app, 16);

        assert_eq!(app.world().get::<Block>(block).unwrap().breaking_stage, 0);
        let state = app.world().get::<Character>(character).unwrap();
        assert_eq!(state.targeting.current, None);
    }

    #[test]
    fn fresh_character_tracks_nothing() {
        let tracker = TargetTracker::<Entity>::default();
        assert_eq!(tracker.current, None);
        assert!(!tracker.breaking);
        assert_eq!(Character::default().targeting.current, None);
    }

    #[test]
    fn clicks_on_the_hud_do_not_break_blocks() {
        let (mut app, block, character) = interaction_app(20.0);
        app.insert_resource(HudCursor {
            show_mouse_cursor: true,
            enable_click_events: true,
        });
        press(&mut app);
        step(&mut app, 110);

        let state = app.world().get::<Character>(character).unwrap();
        assert_eq!(state.targeting.current, Some(block));
        assert!(!state.is_breaking());
        assert!(state.block_breaking_timer.is_none());
        assert_eq!(app.world().get::<Block>(block).unwrap().breaking_stage, 0);
    }

    #[test]
    fn pressing_without_target_only_swings() {
        let (mut app, _, character) = interaction_app(20.0);
        app.world_mut()
            .get_mut::<Transform>(character)
            .unwrap()
            .rotate_y(std::f32::consts::PI);
        press(&mut app);

        let state = app.world().get::<Character>(character).unwrap();
        assert!(!state.is_breaking());
        assert!(state.block_breaking_timer.is_none());
    }
}
