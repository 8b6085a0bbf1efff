//! Headless core of the vending kiosk.
//!
//! The platform shell renders [`ViewModel`], performs the effects the core
//! asks for (one HTTP GET, one-shot timers, render) and reports taps back as
//! [`Event`]s. Everything observable on the kiosk screen is decided here:
//! the inventory fetch, the auto-scrolling product rows, the inactivity
//! screensaver and the age gate in front of restricted purchases.

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod age_gate;
pub mod app;
pub mod capabilities;
pub mod catalog;
pub mod config;
pub mod event;
pub mod idle;
pub mod inventory;
pub mod layout;
pub mod marquee;
pub mod model;
pub mod view;

pub use age_gate::{AgeGate, PurchaseIntent};
pub use app::App;
pub use capabilities::{Capabilities, Effect, TimerId, TimerOperation, TimerOutput};
pub use catalog::AssetKey;
pub use config::{ConfigError, KioskConfig, ScrollConfig};
pub use crux_core::{render::Render, App as CruxApp};
pub use event::Event;
pub use inventory::{FetchError, FetchResult};
pub use model::{
    DisplayProduct, Inventory, InventoryRecord, KioskState, MachineId, MachineSnapshot, Model,
    ProductId,
};
pub use view::{ViewModel, ViewState};
