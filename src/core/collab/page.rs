//=========================================================================
// Page Surface & Model
//=========================================================================
//
// The document around the two scenes, reduced to the state the transition
// sequence touches and the scroll metrics the world scene consumes.
//
// Components:
// - `PageSurface`: overlay / container visibility and the staggered
//   section reveals, driven by `PageEffect`s
// - `PageModel`:   virtual scrolling document producing `ScrollMetrics`
//
//=========================================================================

//=== External Dependencies ===============================================

use log::{debug, info, trace};

//=== Internal Dependencies ===============================================

use crate::config::PageConfig;
use crate::core::clock::millis;

//=== ScrollMetrics =======================================================

/// Scroll position and extents of the page, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollMetrics {
    pub scroll_top: f32,
    pub scroll_height: f32,
    pub client_height: f32,
}

//=== PageEffect ==========================================================

/// One-shot notification for the page collaborator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PageEffect {
    /// Start fading out the portal's UI overlay.
    FadePortalUi,

    /// Show the full-screen flash.
    Flash,

    /// Make the world container visible.
    ShowWorld,

    /// Hide the portal container and stop it receiving pointer events.
    HidePortal,

    /// Remove the flash overlay.
    ClearFlash,

    /// Schedule `sections` reveals, `stagger_ms` apart.
    RevealSections { sections: usize, stagger_ms: u64 },
}

//=== PageSurface =========================================================

/// Visibility state of the page around the scenes.
#[derive(Debug, Clone, PartialEq)]
pub struct PageSurface {
    portal_ui_visible: bool,
    portal_visible: bool,
    portal_pointer_events: bool,
    flash_visible: bool,
    world_visible: bool,

    /// Due times of reveals not yet shown, ascending.
    pending_reveals: Vec<f64>,
    revealed: usize,
}

impl PageSurface {
    /// Initial page: portal shown, world hidden.
    pub fn new() -> Self {
        Self {
            portal_ui_visible: true,
            portal_visible: true,
            portal_pointer_events: true,
            flash_visible: false,
            world_visible: false,
            pending_reveals: Vec::new(),
            revealed: 0,
        }
    }

    /// Applies an effect received at `now`.
    pub fn apply(&mut self, effect: PageEffect, now: f64) {
        debug!(target: "page", "{:?} at {:.3}s", effect, now);

        match effect {
            PageEffect::FadePortalUi => self.portal_ui_visible = false,
            PageEffect::Flash => self.flash_visible = true,
            PageEffect::ShowWorld => self.world_visible = true,
            PageEffect::HidePortal => {
                self.portal_visible = false;
                self.portal_pointer_events = false;
            }
            PageEffect::ClearFlash => self.flash_visible = false,
            PageEffect::RevealSections {
                sections,
                stagger_ms,
            } => {
                self.pending_reveals
                    .extend((0..sections).map(|i| now + millis(stagger_ms * i as u64)));
            }
        }
    }

    /// Shows every reveal due at `now`. Returns how many were shown.
    pub fn tick(&mut self, now: f64) -> usize {
        let due = self.pending_reveals.iter().take_while(|at| **at <= now).count();
        if due == 0 {
            return 0;
        }

        self.pending_reveals.drain(..due);
        self.revealed += due;
        trace!(target: "page", "Revealed {} sections ({} total)", due, self.revealed);

        if self.pending_reveals.is_empty() {
            info!(target: "page", "All {} sections revealed", self.revealed);
        }
        due
    }

    pub fn is_portal_ui_visible(&self) -> bool {
        self.portal_ui_visible
    }

    pub fn is_portal_visible(&self) -> bool {
        self.portal_visible
    }

    pub fn portal_accepts_pointer(&self) -> bool {
        self.portal_pointer_events
    }

    pub fn is_flash_visible(&self) -> bool {
        self.flash_visible
    }

    pub fn is_world_visible(&self) -> bool {
        self.world_visible
    }

    pub fn revealed_sections(&self) -> usize {
        self.revealed
    }

    pub fn pending_reveals(&self) -> usize {
        self.pending_reveals.len()
    }
}

impl Default for PageSurface {
    fn default() -> Self {
        Self::new()
    }
}

//=== PageModel ===========================================================

/// Virtual document scrolled by the mouse wheel.
#[derive(Debug, Clone, PartialEq)]
pub struct PageModel {
    config: PageConfig,
    client_height: f32,
    scroll_top: f32,
}

impl PageModel {
    pub fn new(config: &PageConfig, viewport_height: u32) -> Self {
        Self {
            config: config.clone(),
            client_height: viewport_height as f32,
            scroll_top: 0.0,
        }
    }

    fn scroll_height(&self) -> f32 {
        self.client_height * self.config.content_viewports
    }

    fn max_scroll(&self) -> f32 {
        (self.scroll_height() - self.client_height).max(0.0)
    }

    /// Scrolls by wheel lines; positive scrolls down.
    pub fn scroll_lines(&mut self, lines: f32) {
        self.scroll_pixels(lines * self.config.wheel_line_px);
    }

    /// Scrolls by pixels; positive scrolls down.
    pub fn scroll_pixels(&mut self, pixels: f32) {
        if !pixels.is_finite() {
            return;
        }
        self.scroll_top = (self.scroll_top + pixels).clamp(0.0, self.max_scroll());
    }

    /// Adopts a new viewport height, keeping the scroll position in range.
    pub fn resize(&mut self, viewport_height: u32) {
        self.client_height = viewport_height as f32;
        self.scroll_top = self.scroll_top.min(self.max_scroll());
    }

    pub fn metrics(&self) -> ScrollMetrics {
        ScrollMetrics {
            scroll_top: self.scroll_top,
            scroll_height: self.scroll_height(),
            client_height: self.client_height,
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
