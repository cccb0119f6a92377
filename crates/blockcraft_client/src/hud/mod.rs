//! Game mode: which HUD widget is on screen and how the cursor behaves.

pub mod hotbar;
pub mod menus;
pub mod slots;

use bevy::prelude::*;
use bevy::window::CursorGrabMode;

use blockcraft_core::config::HudConfig;
use blockcraft_core::hud::{HudClasses, HudError, HudLayout, HudWidget};

use crate::events::HudStateChangedEvent;
use crate::settings::Settings;

pub use blockcraft_core::hud::HudState;

/// HUD state plus the widget currently shown for it.
#[derive(Resource, Debug, Default)]
pub struct GameMode {
    hud_state: HudState,
    current_widget: Option<Entity>,
}

impl GameMode {
    pub fn hud_state(&self) -> HudState {
        self.hud_state
    }

    pub fn current_widget(&self) -> Option<Entity> {
        self.current_widget
    }
}

/// Cursor flags requested by the current HUD.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HudCursor {
    pub show_mouse_cursor: bool,
    pub enable_click_events: bool,
}

/// Request to switch the HUD state.
#[derive(Event, Debug, Clone, Copy)]
pub struct ChangeHudState(pub HudState);

pub struct HudPlugin;

impl Plugin for HudPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<GameMode>()
            .init_resource::<HudCursor>()
            .add_event::<ChangeHudState>()
            .add_systems(Startup, begin_play)
            .add_systems(
                Update,
                (
                    toggle_hud_state,
                    change_hud_state,
                    menus::click_inventory_slot,
                    slots::update_slots,
                )
                    .chain(),
            )
            .add_systems(Last, enforce_cursor_state);
    }
}

fn spawn_widget(commands: &mut Commands, widget: HudWidget) -> Entity {
    match widget {
        HudWidget::Ingame => hotbar::spawn_ingame_widget(commands),
        HudWidget::Inventory => menus::spawn_inventory_widget(commands),
        HudWidget::CraftMenu => menus::spawn_craft_menu_widget(commands),
    }
}

/// Put the widget configured for `layout` on screen and apply its cursor flags.
pub fn try_apply_hud(
    commands: &mut Commands,
    game_mode: &mut GameMode,
    cursor: &mut HudCursor,
    classes: &HudClasses,
    layout: HudLayout,
) -> Result<Entity, HudError> {
    let class = classes.class_for(layout.widget)?;

    cursor.show_mouse_cursor = layout.show_mouse_cursor;
    cursor.enable_click_events = layout.enable_click_events;

    let widget = spawn_widget(commands, class);
    game_mode.current_widget = Some(widget);
    Ok(widget)
}

pub fn apply_hud(
    commands: &mut Commands,
    game_mode: &mut GameMode,
    cursor: &mut HudCursor,
    classes: &HudClasses,
    layout: HudLayout,
) -> bool {
    match try_apply_hud(commands, game_mode, cursor, classes, layout) {
        Ok(_) => true,
        Err(err) => {
            warn!("could not apply HUD: {err}");
            false
        }
    }
}

/// Remove the current widget and show the one matching the HUD state.
pub fn apply_hud_changes(
    commands: &mut Commands,
    game_mode: &mut GameMode,
    cursor: &mut HudCursor,
    config: &HudConfig,
) {
    if let Some(widget) = game_mode.current_widget.take() {
        if let Some(entity) = commands.get_entity(widget) {
            entity.despawn_recursive();
        }
    }

    let state = game_mode.hud_state;
    let layout = state.layout(config.strict_state_switch);
    if layout != state.strict_layout() {
        debug!("HUD state {state:?} falls through to {:?}", layout.widget);
    }
    apply_hud(commands, game_mode, cursor, &config.classes, layout);
}

pub fn begin_play(
    mut commands: Commands,
    settings: Res<Settings>,
    mut game_mode: ResMut<GameMode>,
    mut cursor: ResMut<HudCursor>,
) {
    apply_hud_changes(&mut commands, &mut game_mode, &mut cursor, &settings.hud);
}

pub fn change_hud_state(
    mut commands: Commands,
    settings: Res<Settings>,
    mut requests: EventReader<ChangeHudState>,
    mut game_mode: ResMut<GameMode>,
    mut cursor: ResMut<HudCursor>,
    mut ev_changed: EventWriter<HudStateChangedEvent>,
) {
    for ChangeHudState(new_state) in requests.read().copied() {
        let old_state = game_mode.hud_state;
        game_mode.hud_state = new_state;
        apply_hud_changes(&mut commands, &mut game_mode, &mut cursor, &settings.hud);
        ev_changed.send(HudStateChangedEvent {
            old_state,
            new_state,
        });
    }
}

/// Tab opens the inventory, C the craft menu; pressing again returns in-game.
pub fn toggle_hud_state(
    keys: Res<ButtonInput<KeyCode>>,
    game_mode: Res<GameMode>,
    mut requests: EventWriter<ChangeHudState>,
) {
    let toggles = [
        (KeyCode::Tab, HudState::Inventory),
        (KeyCode::KeyC, HudState::CraftMenu),
    ];
    for (key, target) in toggles {
        if !keys.just_pressed(key) {
            continue;
        }
        let next = if game_mode.hud_state == target {
            HudState::Ingame
        } else {
            target
        };
        requests.send(ChangeHudState(next));
        return;
    }
}

/// Keep the window cursor in line with the HUD flags.
pub fn enforce_cursor_state(cursor: Res<HudCursor>, mut windows: Query<&mut Window>) {
    let Ok(mut window) = windows.get_single_mut() else {
        return;
    };

    let (grab_mode, visible) = if cursor.show_mouse_cursor {
        (CursorGrabMode::None, true)
    } else {
        (CursorGrabMode::Locked, false)
    };
    if window.cursor_options.grab_mode != grab_mode {
        window.cursor_options.grab_mode = grab_mode;
        window.cursor_options.visible = visible;
    }
}

#[cfg(test)]
mod tests {
    use blockcraft_core::config::GameplayConfig;

    use super::hotbar::IngameHud;
    use super::menus::InventoryHud;
    use super::*;

    fn hud_app(hud: HudConfig) -> App {
        let mut app = App::new();
        app.insert_resource(Settings(GameplayConfig {
            hud,
            ..Default::default()
        }))
        .init_resource::<GameMode>()
        .init_resource::<HudCursor>()
        .init_resource::<ButtonInput<KeyCode>>()
        .add_event::<ChangeHudState>()
        .add_event::<HudStateChangedEvent>()
        .add_systems(Startup, begin_play)
        .add_systems(Update, (toggle_hud_state, change_hud_state).chain());
        app
    }

    fn strict() -> HudConfig {
        HudConfig {
            strict_state_switch: true,
            ..Default::default()
        }
    }

    fn request(app: &mut App, state: HudState) {
        app.world_mut().send_event(ChangeHudState(state));
        app.update();
    }

    fn widget_roots<C: Component>(app: &mut App) -> usize {
        let mut query = app.world_mut().query_filtered::<(), With<C>>();
        query.iter(app.world()).count()
    }

    #[test]
    fn begin_play_shows_ingame_hud() {
        let mut app = hud_app(HudConfig::default());
        app.update();

        let game_mode = app.world().resource::<GameMode>();
        assert_eq!(game_mode.hud_state(), HudState::Ingame);
        let widget = game_mode.current_widget().expect("widget shown");
        assert!(app.world().get::<IngameHud>(widget).is_some());
        assert_eq!(*app.world().resource::<HudCursor>(), HudCursor::default());
    }

    #[test]
    fn inventory_state_falls_through_to_ingame_hud() {
        let mut app = hud_app(HudConfig::default());
        app.update();
        let first = app.world().resource::<GameMode>().current_widget();

        request(&mut app, HudState::Inventory);

        let game_mode = app.world().resource::<GameMode>();
        assert_eq!(game_mode.hud_state(), HudState::Inventory);
        let widget = game_mode.current_widget().expect("widget shown");
        assert_ne!(Some(widget), first);
        assert!(app.world().get::<IngameHud>(widget).is_some());
        assert!(!app.world().resource::<HudCursor>().show_mouse_cursor);
        assert_eq!(widget_roots::<IngameHud>(&mut app), 1);
        assert_eq!(
            app.world().resource::<Events<HudStateChangedEvent>>().len(),
            1
        );
    }

    #[test]
    fn strict_switch_shows_inventory_with_cursor() {
        let mut app = hud_app(strict());
        app.update();
        request(&mut app, HudState::Inventory);

        let widget = app
            .world()
            .resource::<GameMode>()
            .current_widget()
            .expect("widget shown");
        assert!(app.world().get::<InventoryHud>(widget).is_some());
        assert_eq!(
            *app.world().resource::<HudCursor>(),
            HudCursor {
                show_mouse_cursor: true,
                enable_click_events: true,
            }
        );
        assert_eq!(widget_roots::<IngameHud>(&mut app), 0);
    }

    #[test]
    fn missing_widget_class_leaves_nothing_on_screen() {
        let mut config = strict();
        config.classes.inventory = None;
        let mut app = hud_app(config);
        app.update();
        request(&mut app, HudState::Inventory);

        assert_eq!(app.world().resource::<GameMode>().current_widget(), None);
        assert_eq!(widget_roots::<IngameHud>(&mut app), 0);
        assert_eq!(widget_roots::<InventoryHud>(&mut app), 0);
        // Flags are only touched when a widget is applied.
        assert!(!app.world().resource::<HudCursor>().show_mouse_cursor);
    }

    #[test]
    fn tab_toggles_inventory_state() {
        let mut app = hud_app(strict());
        app.update();

        app.world_mut()
            .resource_mut::<ButtonInput<KeyCode>>()
            .press(KeyCode::Tab);
        app.update();
        assert_eq!(
            app.world().resource::<GameMode>().hud_state(),
            HudState::Inventory
        );

        {
            let mut keys = app.world_mut().resource_mut::<ButtonInput<KeyCode>>();
            keys.clear();
            keys.release(KeyCode::Tab);
            keys.press(KeyCode::Tab);
        }
        app.update();
        assert_eq!(
            app.world().resource::<GameMode>().hud_state(),
            HudState::Ingame
        );
    }
}
