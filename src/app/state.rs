//! Central application state.
//!
//! All mutable state lives here so that the rest of the app can be pure
//! functions over `&AppState` (rendering) or `&mut AppState` (event handling).

use std::time::Instant;

use ratatui::layout::Rect;

use crate::config::AppConfig;
use crate::core::engine::Revolver;
use crate::core::gesture::GestureTranslator;
use crate::core::spring::PhysicsSpring;
use crate::core::window::RenderSlots;
use crate::ui::carousel::Card;
use crate::ui::layout::AppLayout;

/// Top-level application state.
pub struct AppState {
    /// The carousel engine.
    pub revolver: Revolver<String, PhysicsSpring>,
    /// Turns absolute mouse columns into drag deltas.
    pub pointer: GestureTranslator,
    /// Rendered cards, reused across frames while their slot stays in view.
    pub slots: RenderSlots<Card>,
    /// Effective configuration (file + CLI overrides).
    pub config: AppConfig,
    /// Full terminal area as of the last resize.
    pub terminal_area: Rect,
    /// When the spring was last advanced.
    pub last_frame: Instant,
    /// Controls the main event loop.
    pub should_quit: bool,
    /// Show the engine debug line.
    pub show_debug: bool,
    /// An optional status message shown in the bottom bar.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(revolver: Revolver<String, PhysicsSpring>, config: AppConfig) -> Self {
        Self {
            revolver,
            pointer: GestureTranslator::new(),
            slots: RenderSlots::new(),
            config,
            terminal_area: Rect::default(),
            last_frame: Instant::now(),
            should_quit: false,
            show_debug: true,
            status_message: None,
        }
    }

    pub fn layout(&self) -> AppLayout {
        AppLayout::from_area(self.terminal_area, self.item_height_rows())
    }

    pub fn item_width_cols(&self) -> u16 {
        self.revolver.geometry().item_width.round().clamp(1.0, u16::MAX as f64) as u16
    }

    pub fn item_height_rows(&self) -> u16 {
        self.revolver.geometry().item_height.round().clamp(1.0, u16::MAX as f64) as u16
    }

    /// Bring the card cache in line with the engine's current window.
    pub fn sync_slots(&mut self) {
        let plan = self.revolver.window();
        let revolver = &self.revolver;
        let len = revolver.items().len();
        self.slots
            .sync(&plan, |i| Card::project(revolver.item_at(i), i, len));
        if self.slots.rebuilt() > 0 {
            tracing::trace!(rebuilt = self.slots.rebuilt(), first = plan.first, "cards rebuilt");
        }
    }
}
