use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum HudState {
    #[default]
    Ingame,
    Inventory,
    CraftMenu,
}

/// Which widget is put on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HudWidget {
    Ingame,
    Inventory,
    CraftMenu,
}

/// The widget plus the cursor flags applied alongside it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HudLayout {
    pub widget: HudWidget,
    pub show_mouse_cursor: bool,
    pub enable_click_events: bool,
}

impl HudLayout {
    const INGAME: Self = Self {
        widget: HudWidget::Ingame,
        show_mouse_cursor: false,
        enable_click_events: false,
    };
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum HudError {
    #[error("no widget class configured for {0:?}")]
    MissingWidgetClass(HudWidget),
}

/// Widget class bound to each HUD. `None` means the HUD cannot be shown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HudClasses {
    pub ingame: Option<HudWidget>,
    pub inventory: Option<HudWidget>,
    pub craft_menu: Option<HudWidget>,
}

impl Default for HudClasses {
    fn default() -> Self {
        Self {
            ingame: Some(HudWidget::Ingame),
            inventory: Some(HudWidget::Inventory),
            craft_menu: Some(HudWidget::CraftMenu),
        }
    }
}

impl HudState {
    /// Layout for this state when every case stops at its own branch.
    pub fn strict_layout(self) -> HudLayout {
        match self {
            HudState::Ingame => HudLayout::INGAME,
            HudState::Inventory => HudLayout {
                widget: HudWidget::Inventory,
                show_mouse_cursor: true,
                enable_click_events: true,
            },
            HudState::CraftMenu => HudLayout {
                widget: HudWidget::CraftMenu,
                show_mouse_cursor: true,
                enable_click_events: true,
            },
        }
    }

    /// Layouts applied in order when the switch falls through from this state.
    ///
    /// The last entry is what ends up on screen: always the in-game HUD.
    pub fn fallthrough_layouts(self) -> Vec<HudLayout> {
        let chain: &[HudState] = match self {
            HudState::Ingame => &[HudState::Ingame, HudState::Inventory, HudState::CraftMenu],
            HudState::Inventory => &[HudState::Inventory, HudState::CraftMenu],
            HudState::CraftMenu => &[HudState::CraftMenu],
        };
        chain
            .iter()
            .map(|state| state.strict_layout())
            .chain(std::iter::once(HudLayout::INGAME))
            .collect()
    }

    pub fn layout(self, strict: bool) -> HudLayout {
        if strict {
            return self.strict_layout();
        }
        self.fallthrough_layouts()
            .last()
            .copied()
            .unwrap_or(HudLayout::INGAME)
    }
}

impl HudClasses {
    /// Resolve the class to instantiate for `widget`.
    pub fn class_for(&self, widget: HudWidget) -> Result<HudWidget, HudError> {
        let class = match widget {
            HudWidget::Ingame => self.ingame,
            HudWidget::Inventory => self.inventory,
            HudWidget::CraftMenu => self.craft_menu,
        };
        class.ok_or(HudError::MissingWidgetClass(widget))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [HudState; 3] = [HudState::Ingame, HudState::Inventory, HudState::CraftMenu];

    #[test]
    fn every_state_lands_on_ingame_hud() {
        for state in ALL {
            let layout = state.layout(false);
            assert_eq!(layout.widget, HudWidget::Ingame);
            assert!(!layout.show_mouse_cursor);
            assert!(!layout.enable_click_events);
        }
    }

    #[test]
    fn fallthrough_visits_following_cases() {
        let widgets: Vec<_> = HudState::Inventory
            .fallthrough_layouts()
            .into_iter()
            .map(|layout| layout.widget)
            .collect();
        assert_eq!(
            widgets,
            vec![HudWidget::Inventory, HudWidget::CraftMenu, HudWidget::Ingame]
        );
        assert_eq!(HudState::Ingame.fallthrough_layouts().len(), 4);
    }

    #[test]
    fn strict_layout_shows_cursor_in_menus() {
        assert_eq!(HudState::Ingame.layout(true).widget, HudWidget::Ingame);
        let inventory = HudState::Inventory.layout(true);
        assert_eq!(inventory.widget, HudWidget::Inventory);
        assert!(inventory.show_mouse_cursor && inventory.enable_click_events);
        assert_eq!(HudState::CraftMenu.layout(true).widget, HudWidget::CraftMenu);
    }

    #[test]
    fn missing_class_is_an_error() {
        let classes = HudClasses {
            craft_menu: None,
            ..HudClasses::default()
        };
        assert_eq!(classes.class_for(HudWidget::Ingame), Ok(HudWidget::Ingame));
        assert_eq!(
            classes.class_for(HudWidget::CraftMenu),
            Err(HudError::MissingWidgetClass(HudWidget::CraftMenu))
        );
    }
}
