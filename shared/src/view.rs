use serde::{Deserialize, Serialize};

use crate::age_gate::{AgeGatePrompt, PurchaseIntent, AGE_GATE_CANCEL_LABEL, AGE_GATE_CONFIRM_LABEL, AGE_GATE_TITLE};
use crate::catalog::AssetKey;
use crate::config::ScrollConfig;
use crate::marquee::{visible_cells, ScrollPhase, ScrollSession};
use crate::model::{DisplayProduct, Inventory, KioskState, Model};

pub const LOADING_MESSAGE: &str = "Loading machine data...";
pub const EMPTY_INVENTORY_MESSAGE: &str = "No products available.";
pub const FETCH_ERROR_PREFIX: &str = "Error fetching data: ";

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ProductCard {
    pub id: String,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub price_label: String,
    pub slot_label: String,
    pub image_key: AssetKey,
    pub is_age_restricted: bool,
    pub stock: i64,
}

impl From<&DisplayProduct> for ProductCard {
    fn from(p: &DisplayProduct) -> Self {
        Self {
            id: p.id.0.clone(),
            name: p.name.clone(),
            description: p.description.clone(),
            price: p.price,
            price_label: p.price_label(),
            slot_label: p.slot_label(),
            image_key: p.image_key,
            is_age_restricted: p.is_age_restricted,
            stock: p.stock,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct CellView {
    pub key: String,
    pub index: usize,
    pub product: ProductCard,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct RowView {
    pub row: usize,
    pub phase: ScrollPhase,
    pub offset_px: f64,
    pub cells: Vec<CellView>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct MachineHeader {
    pub id: String,
    pub name: String,
    pub location: String,
    pub slot_count: i64,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct AgeGateView {
    pub product_id: String,
    pub title: String,
    pub message: String,
    pub confirm_label: String,
    pub cancel_label: String,
}

impl From<&AgeGatePrompt> for AgeGateView {
    fn from(prompt: &AgeGatePrompt) -> Self {
        Self {
            product_id: prompt.product_id.0.clone(),
            title: AGE_GATE_TITLE.into(),
            message: prompt.message(),
            confirm_label: AGE_GATE_CONFIRM_LABEL.into(),
            cancel_label: AGE_GATE_CANCEL_LABEL.into(),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ViewState {
    Loading {
        message: String,
    },
    Error {
        message: String,
    },
    Loaded {
        machine: MachineHeader,
        rows: Vec<RowView>,
        empty_message: Option<String>,
    },
    /// Screensaver; any tap dismisses it.
    Idle,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ViewModel {
    pub state: ViewState,
    pub age_gate: Option<AgeGateView>,
    /// Most recent purchase cleared to go to payment.
    pub purchase: Option<PurchaseIntent>,
}

#[must_use]
pub fn build_view(model: &Model) -> ViewModel {
    let state = match &model.state {
        KioskState::Loading => ViewState::Loading { message: LOADING_MESSAGE.into() },
        KioskState::Error { message } => ViewState::Error { message: message.clone() },
        KioskState::Loaded(inventory) => build_loaded(model, inventory),
        KioskState::Idle(_) => ViewState::Idle,
    };

    let age_gate = match model.state {
        KioskState::Loaded(_) => model.age_gate.prompt().map(AgeGateView::from),
        _ => None,
    };

    ViewModel { state, age_gate, purchase: model.last_purchase.clone() }
}

fn build_loaded(model: &Model, inventory: &Inventory) -> ViewState {
    let snapshot = &inventory.snapshot;
    let machine = MachineHeader {
        id: snapshot.id.0.clone(),
        name: snapshot.name.clone(),
        location: snapshot.location.clone(),
        slot_count: snapshot.slot_count,
    };

    let rows = (0..inventory.rows.len())
        .map(|row| {
            let products = inventory.row_products(row);
            match model.rows.get(&row) {
                Some(session) => build_row(row, session, products, &model.config.scroll),
                None => build_row(row, &ScrollSession::new(products.len()), products, &model.config.scroll),
            }
        })
        .collect();

    let empty_message = inventory
        .products
        .is_empty()
        .then(|| EMPTY_INVENTORY_MESSAGE.to_string());

    ViewState::Loaded { machine, rows, empty_message }
}

fn build_row(
    row: usize,
    session: &ScrollSession,
    products: &[DisplayProduct],
    config: &ScrollConfig,
) -> RowView {
    let cells = visible_cells(session, products, config)
        .into_iter()
        .map(|cell| CellView {
            key: cell.key,
            index: cell.index,
            product: ProductCard::from(&products[cell.product_index]),
        })
        .collect();

    RowView { row, phase: session.phase(), offset_px: session.offset_px(), cells }
}
