use serde::{Deserialize, Serialize};

use crate::capabilities::{TimerId, TimerOutput};
use crate::config::KioskConfig;
use crate::inventory::FetchResult;
use crate::model::ProductId;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub enum Event {
    // --- Shell lifecycle ---
    AppStarted(KioskConfig),

    // --- User input ---
    /// Tap or press anywhere on the kiosk screen.
    UserInteraction,
    IdleOverlayTapped,
    RowMounted { row: usize },
    RowUnmounted { row: usize },
    DragChanged { row: usize, dragging: bool },
    RowScrolled { row: usize, delta_px: f64 },
    CardPressChanged { row: usize, pressed: bool },
    BuyTapped { product_id: ProductId },
    AgeGateConfirmed,
    AgeGateCancelled,

    // --- Capability responses ---
    MachineFetched(FetchResult),
    TimerElapsed { id: TimerId, output: TimerOutput },
}

impl Event {
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::AppStarted(_) => "app_started",
            Self::UserInteraction => "user_interaction",
            Self::IdleOverlayTapped => "idle_overlay_tapped",
            Self::RowMounted { .. } => "row_mounted",
            Self::RowUnmounted { .. } => "row_unmounted",
            Self::DragChanged { .. } => "drag_changed",
            Self::RowScrolled { .. } => "row_scrolled",
            Self::CardPressChanged { .. } => "card_press_changed",
            Self::BuyTapped { .. } => "buy_tapped",
            Self::AgeGateConfirmed => "age_gate_confirmed",
            Self::AgeGateCancelled => "age_gate_cancelled",
            Self::MachineFetched(_) => "machine_fetched",
            Self::TimerElapsed { .. } => "timer_elapsed",
        }
    }

    /// Whether the event comes from someone touching the screen. These keep
    /// the screensaver away.
    #[must_use]
    pub const fn is_user_initiated(&self) -> bool {
        matches!(
            self,
            Self::UserInteraction
                | Self::IdleOverlayTapped
                | Self::DragChanged { dragging: true, .. }
                | Self::RowScrolled { .. }
                | Self::CardPressChanged { pressed: true, .. }
                | Self::BuyTapped { .. }
                | Self::AgeGateConfirmed
                | Self::AgeGateCancelled
        )
    }
}
