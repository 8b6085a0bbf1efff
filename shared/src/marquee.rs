//! Auto-scrolling product rows.
//!
//! A row is an endless strip of cards over a finite product list: logical
//! cell `i` shows product `i mod n` and is keyed by `(product id, i / n)`, so
//! no backing list is ever duplicated. Each mounted row owns a
//! [`ScrollSession`] that advances its offset one step per tick while nobody
//! is touching it and drops to a slower poll while a drag or press is active.

use serde::{Deserialize, Serialize};

use crate::capabilities::TimerId;
use crate::config::ScrollConfig;
use crate::model::{DisplayProduct, ProductId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScrollPhase {
    Scrolling,
    Paused,
    /// Fewer than two products; nothing to animate.
    Stopped,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScrollSession {
    item_count: usize,
    offset_px: f64,
    is_user_dragging: bool,
    is_item_pressed: bool,
    pending_tick: Option<TimerId>,
}

impl ScrollSession {
    #[must_use]
    pub const fn new(item_count: usize) -> Self {
        Self {
            item_count,
            offset_px: 0.0,
            is_user_dragging: false,
            is_item_pressed: false,
            pending_tick: None,
        }
    }

    #[must_use]
    pub const fn offset_px(&self) -> f64 {
        self.offset_px
    }

    #[must_use]
    pub const fn pending_tick(&self) -> Option<TimerId> {
        self.pending_tick
    }

    #[must_use]
    pub const fn phase(&self) -> ScrollPhase {
        if self.item_count < 2 {
            ScrollPhase::Stopped
        } else if self.is_user_dragging || self.is_item_pressed {
            ScrollPhase::Paused
        } else {
            ScrollPhase::Scrolling
        }
    }

    pub fn set_dragging(&mut self, dragging: bool) {
        self.is_user_dragging = dragging;
    }

    pub fn set_pressed(&mut self, pressed: bool) {
        self.is_item_pressed = pressed;
    }

    /// Applies a user drag. The strip has a fixed start, so the offset never
    /// goes below zero.
    pub fn scroll_by(&mut self, delta_px: f64) {
        if delta_px.is_finite() {
            self.offset_px = (self.offset_px + delta_px).max(0.0);
        }
    }

    /// Delay before the next tick, or `None` when the loop should not run.
    #[must_use]
    pub fn next_delay_ms(&self, config: &ScrollConfig) -> Option<u64> {
        match self.phase() {
            ScrollPhase::Scrolling => Some(config.tick_ms),
            ScrollPhase::Paused => Some(config.paused_poll_ms),
            ScrollPhase::Stopped => None,
        }
    }

    /// Records `id` as the outstanding tick. Returns the tick it replaces.
    pub fn arm(&mut self, id: TimerId) -> Option<TimerId> {
        self.pending_tick.replace(id)
    }

    /// Consumes the tick `id`. Stale ids are rejected; an accepted tick
    /// advances the offset only while scrolling.
    pub fn tick(&mut self, id: TimerId, config: &ScrollConfig) -> bool {
        if self.pending_tick != Some(id) {
            return false;
        }
        self.pending_tick = None;

        if self.phase() == ScrollPhase::Scrolling {
            self.offset_px += f64::from(config.pixels_per_tick());
        }
        true
    }

    pub fn stop(&mut self) -> Option<TimerId> {
        self.pending_tick.take()
    }

    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn first_visible_index(&self, card_width_px: f32) -> usize {
        let width = f64::from(card_width_px);
        if width <= 0.0 || !width.is_finite() {
            return 0;
        }
        (self.offset_px / width).floor().max(0.0) as usize
    }
}

/// Product shown at logical cell `index` of a row of `len` products.
#[must_use]
pub const fn product_index(index: usize, len: usize) -> Option<usize> {
    if len == 0 {
        None
    } else {
        Some(index % len)
    }
}

/// Stable identity for logical cell `index`.
#[must_use]
pub fn cell_key(product_id: &ProductId, index: usize, len: usize) -> String {
    let repetition = if len == 0 { 0 } else { index / len };
    format!("{product_id}_instance_{repetition}")
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    pub index: usize,
    pub product_index: usize,
    pub key: String,
}

/// Cells currently on screen for `session`, leftmost first.
#[must_use]
pub fn visible_cells(
    session: &ScrollSession,
    products: &[DisplayProduct],
    config: &ScrollConfig,
) -> Vec<Cell> {
    let len = products.len();
    let first = session.first_visible_index(config.card_width_px);

    (first..first.saturating_add(config.visible_cells))
        .filter_map(|index| {
            let product_index = product_index(index, len)?;
            Some(Cell {
                index,
                product_index,
                key: cell_key(&products[product_index].id, index, len),
            })
        })
        .collect()
}
