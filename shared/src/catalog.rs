//! Product catalogue: image asset lookup and the record → card mapping.

use serde::{Deserialize, Serialize};

use crate::model::{DisplayProduct, InventoryRecord};

/// Local artwork bundled with the shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetKey {
    Cola,
    Chips,
    Water,
    Placeholder,
}

impl AssetKey {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Cola => "cola",
            Self::Chips => "chips",
            Self::Water => "water",
            Self::Placeholder => "placeholder_product",
        }
    }
}

const ASSET_TABLE: &[(&str, AssetKey)] = &[
    ("cola", AssetKey::Cola),
    ("chips", AssetKey::Chips),
    ("water", AssetKey::Water),
];

/// Case-insensitive; anything unmapped falls back to the placeholder.
#[must_use]
pub fn resolve_asset(image_identifier: &str) -> AssetKey {
    ASSET_TABLE
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(image_identifier))
        .map_or(AssetKey::Placeholder, |(_, key)| *key)
}

/// Keeps enabled, in-stock records in their original order.
#[must_use]
pub fn to_display_products(records: &[InventoryRecord]) -> Vec<DisplayProduct> {
    records
        .iter()
        .filter(|record| record.is_displayable())
        .map(|record| DisplayProduct {
            id: record.id.clone(),
            name: record.name.clone(),
            description: record.category.clone(),
            price: record.price,
            image_key: resolve_asset(&record.image_identifier),
            is_age_restricted: record.is_age_restricted(),
            stock: record.stock,
        })
        .collect()
}
