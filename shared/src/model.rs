use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::ops::Range;
use std::sync::Arc;

use crate::age_gate::{AgeGate, PurchaseIntent};
use crate::capabilities::TimerIds;
use crate::catalog::AssetKey;
use crate::config::KioskConfig;
use crate::idle::InactivityTimer;
use crate::marquee::ScrollSession;

// --- Typed IDs ---

macro_rules! typed_id {
    ($name:ident) => {
        #[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            pub fn new(s: impl Into<String>) -> Self {
                Self(s.into())
            }
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

typed_id!(MachineId);
typed_id!(ProductId);

// --- Wire shape of `GET /api/machines/{id}` ---
//
// Unknown fields are ignored; every listed field is required.

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MachineSnapshot {
    pub id: MachineId,
    pub name: String,
    pub location: String,
    #[serde(rename = "slots")]
    pub slot_count: i64,
    pub inventory: Vec<InventoryRecord>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct InventoryRecord {
    pub id: ProductId,
    pub name: String,
    pub category: String,
    pub price: f64,
    #[serde(rename = "imageId")]
    pub image_identifier: String,
    /// Zero means unrestricted; any other value restricts the item.
    #[serde(rename = "ageRestriction")]
    pub age_restriction_code: i64,
    pub enabled: bool,
    pub stock: i64,
}

impl InventoryRecord {
    #[must_use]
    pub const fn is_age_restricted(&self) -> bool {
        self.age_restriction_code != 0
    }

    #[must_use]
    pub const fn is_displayable(&self) -> bool {
        self.enabled && self.stock > 0
    }
}

/// A record as it is shown on a product card.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DisplayProduct {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub image_key: AssetKey,
    pub is_age_restricted: bool,
    pub stock: i64,
}

impl DisplayProduct {
    /// Slot number printed on the card: `"p3"` becomes `"03"`.
    #[must_use]
    pub fn slot_label(&self) -> String {
        let raw = self.id.as_str();
        let slot = raw.strip_prefix('p').unwrap_or(raw);
        format!("{slot:0>2}")
    }

    /// Two decimals, halves rounded away from zero (`0.125` shows as `$0.13`).
    #[must_use]
    pub fn price_label(&self) -> String {
        format!("${:.2}", (self.price * 100.0).round() / 100.0)
    }
}

/// A fetched snapshot together with everything derived from it.
///
/// Built once when the fetch resolves and shared read-only afterwards; a new
/// fetch replaces the whole value.
#[derive(Clone, Debug, PartialEq)]
pub struct Inventory {
    pub snapshot: MachineSnapshot,
    pub products: Vec<DisplayProduct>,
    pub rows: Vec<Range<usize>>,
}

impl Inventory {
    #[must_use]
    pub fn new(snapshot: MachineSnapshot) -> Self {
        let products = crate::catalog::to_display_products(&snapshot.inventory);
        let rows = crate::layout::split_rows(products.len());
        Self { snapshot, products, rows }
    }

    #[must_use]
    pub fn row_products(&self, row: usize) -> &[DisplayProduct] {
        self.rows
            .get(row)
            .and_then(|range| self.products.get(range.clone()))
            .unwrap_or(&[])
    }

    #[must_use]
    pub fn product(&self, id: &ProductId) -> Option<&DisplayProduct> {
        self.products.iter().find(|p| &p.id == id)
    }
}

#[derive(Clone, Debug, PartialEq, Default)]
pub enum KioskState {
    #[default]
    Loading,
    Error {
        message: String,
    },
    Loaded(Arc<Inventory>),
    Idle(Arc<Inventory>),
}

impl KioskState {
    #[must_use]
    pub fn inventory(&self) -> Option<&Arc<Inventory>> {
        match self {
            Self::Loaded(inventory) | Self::Idle(inventory) => Some(inventory),
            Self::Loading | Self::Error { .. } => None,
        }
    }

    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Loading => "loading",
            Self::Error { .. } => "error",
            Self::Loaded(_) => "loaded",
            Self::Idle(_) => "idle",
        }
    }
}

#[derive(Debug, Default)]
pub struct Model {
    pub config: KioskConfig,
    pub started: bool,
    pub state: KioskState,
    pub idle: InactivityTimer,
    pub rows: BTreeMap<usize, ScrollSession>,
    pub age_gate: AgeGate,
    pub last_purchase: Option<PurchaseIntent>,
    pub timer_ids: TimerIds,
}

impl Model {
    #[must_use]
    pub fn inventory(&self) -> Option<&Arc<Inventory>> {
        self.state.inventory()
    }

    #[must_use]
    pub const fn is_idle(&self) -> bool {
        matches!(self.state, KioskState::Idle(_))
    }
}
