use std::sync::Arc;

use tracing::{debug, error, info, trace, warn};

use crate::age_gate::PurchaseIntent;
use crate::capabilities::{Capabilities, TimerId, TimerOutput};
use crate::event::Event;
use crate::idle::InactivityTimer;
use crate::inventory::{self, FetchResult};
use crate::marquee::ScrollSession;
use crate::model::{Inventory, KioskState, Model, ProductId};
use crate::view::{build_view, ViewModel, FETCH_ERROR_PREFIX};
use crate::KioskConfig;

#[derive(Default)]
pub struct App;

impl App {
    fn start(config: KioskConfig, model: &mut Model, caps: &Capabilities) {
        if model.started {
            warn!("start requested twice, ignoring");
            return;
        }
        model.started = true;

        let endpoint = match config.validate().and_then(|()| config.machine_endpoint()) {
            Ok(endpoint) => endpoint,
            Err(e) => {
                error!(error = %e, "kiosk configuration rejected");
                model.state = KioskState::Error {
                    message: format!("Invalid kiosk configuration: {e}"),
                };
                caps.render.render();
                return;
            }
        };

        model.idle = InactivityTimer::new(config.idle_timeout_ms);
        model.config = config;
        model.state = KioskState::Loading;

        inventory::fetch_machine(&endpoint, &caps.http);
        caps.render.render();
    }

    fn machine_fetched(result: FetchResult, model: &mut Model, caps: &Capabilities) {
        if !matches!(model.state, KioskState::Loading) {
            warn!(state = model.state.name(), "fetch result arrived outside loading, ignoring");
            return;
        }

        match result {
            Ok(snapshot) => {
                let inventory = Inventory::new(snapshot);
                info!(
                    machine_id = %inventory.snapshot.id,
                    records = inventory.snapshot.inventory.len(),
                    products = inventory.products.len(),
                    rows = inventory.rows.len(),
                    "machine inventory loaded"
                );
                Self::stop_all_rows(model, caps);
                model.state = KioskState::Loaded(Arc::new(inventory));
                Self::restart_idle_timer(model, caps);
            }
            Err(e) => {
                error!(error = %e, "error fetching machine details");
                model.state = KioskState::Error { message: format!("{FETCH_ERROR_PREFIX}{e}") };
            }
        }
        caps.render.render();
    }

    /// Pushes the screensaver deadline out by a full timeout.
    fn restart_idle_timer(model: &mut Model, caps: &Capabilities) {
        let id = model.timer_ids.next();
        if let Some(previous) = model.idle.reset(id) {
            caps.timer.cancel(previous);
        }
        caps.timer.start(id, model.idle.timeout_ms(), move |output| Event::TimerElapsed { id, output });
    }

    fn enter_idle(model: &mut Model, caps: &Capabilities) {
        if let Some(pending) = model.idle.cancel() {
            caps.timer.cancel(pending);
        }
        let state = std::mem::take(&mut model.state);
        model.state = match state {
            KioskState::Loaded(inventory) => KioskState::Idle(inventory),
            other => other,
        };
        model.age_gate.dismiss();
        info!("no interaction, showing screensaver");
    }

    /// Leaves the screensaver and arms a fresh countdown in the same update,
    /// so there is never a moment with neither running.
    fn wake(model: &mut Model, caps: &Capabilities) {
        let state = std::mem::take(&mut model.state);
        model.state = match state {
            KioskState::Idle(inventory) => KioskState::Loaded(inventory),
            other => other,
        };
        Self::restart_idle_timer(model, caps);
        info!("screensaver dismissed");
    }

    fn schedule_tick(row: usize, model: &mut Model, caps: &Capabilities) {
        let Some(session) = model.rows.get_mut(&row) else {
            return;
        };
        let Some(delay) = session.next_delay_ms(&model.config.scroll) else {
            return;
        };

        let id = model.timer_ids.next();
        if let Some(previous) = session.arm(id) {
            caps.timer.cancel(previous);
        }
        caps.timer.start(id, delay, move |output| Event::TimerElapsed { id, output });
    }

    fn mount_row(row: usize, model: &mut Model, caps: &Capabilities) {
        let Some(inventory) = model.inventory() else {
            warn!(row, "row mounted without inventory");
            return;
        };
        if row >= inventory.rows.len() {
            warn!(row, rows = inventory.rows.len(), "unknown row mounted");
            return;
        }

        let count = inventory.row_products(row).len();
        if let Some(mut old) = model.rows.insert(row, ScrollSession::new(count)) {
            if let Some(tick) = old.stop() {
                caps.timer.cancel(tick);
            }
        }
        debug!(row, products = count, "row mounted");
        Self::schedule_tick(row, model, caps);
    }

    fn unmount_row(row: usize, model: &mut Model, caps: &Capabilities) {
        if let Some(mut session) = model.rows.remove(&row) {
            if let Some(tick) = session.stop() {
                caps.timer.cancel(tick);
            }
            debug!(row, "row unmounted");
        }
    }

    fn stop_all_rows(model: &mut Model, caps: &Capabilities) {
        for (_, mut session) in std::mem::take(&mut model.rows) {
            if let Some(tick) = session.stop() {
                caps.timer.cancel(tick);
            }
        }
    }

    fn timer_elapsed(id: TimerId, output: TimerOutput, model: &mut Model, caps: &Capabilities) {
        if output == TimerOutput::Cancelled {
            trace!(%id, "timer cancelled by shell");
            return;
        }

        if model.idle.fire(id) {
            Self::enter_idle(model, caps);
            caps.render.render();
            return;
        }

        let row = model
            .rows
            .iter()
            .find(|(_, session)| session.pending_tick() == Some(id))
            .map(|(row, _)| *row);

        let Some(row) = row else {
            trace!(%id, "stale timer fire ignored");
            return;
        };

        if let Some(session) = model.rows.get_mut(&row) {
            session.tick(id, &model.config.scroll);
        }
        Self::schedule_tick(row, model, caps);
        caps.render.render();
    }

    fn buy(product_id: &ProductId, model: &mut Model, caps: &Capabilities) {
        let Some(inventory) = model.state.inventory() else {
            warn!(%product_id, "buy tapped without inventory");
            return;
        };
        let Some(product) = inventory.product(product_id) else {
            warn!(%product_id, "buy tapped for unknown product");
            return;
        };

        let intent = model.age_gate.request_purchase(product);
        Self::record_intent(intent, model);
        caps.render.render();
    }

    fn record_intent(intent: PurchaseIntent, model: &mut Model) {
        match &intent {
            PurchaseIntent::Proceed { product_id, age_verified } => {
                info!(%product_id, age_verified, "proceeding to payment");
            }
            PurchaseIntent::AwaitingAgeVerification { product_id } => {
                info!(%product_id, "age verification required");
            }
            PurchaseIntent::Cancelled { product_id } => {
                info!(%product_id, "age verification cancelled");
            }
            PurchaseIntent::Blocked { product_id } => {
                debug!(%product_id, "age gate already open, purchase ignored");
            }
        }

        // Payment hand-off is not wired to a terminal yet; the intent is kept
        // for the shell to act on.
        if matches!(intent, PurchaseIntent::Proceed { .. }) {
            model.last_purchase = Some(intent);
        }
    }
}

impl crux_core::App for App {
    type Event = Event;
    type Model = Model;
    type ViewModel = ViewModel;
    type Capabilities = Capabilities;

    fn update(&self, event: Event, model: &mut Model, caps: &Capabilities) {
        trace!(event = event.name(), state = model.state.name(), "update");

        if event.is_user_initiated() {
            match model.state {
                KioskState::Idle(_) => {
                    // The screensaver swallows the tap that dismisses it.
                    Self::wake(model, caps);
                    caps.render.render();
                    return;
                }
                KioskState::Loaded(_) => Self::restart_idle_timer(model, caps),
                KioskState::Loading | KioskState::Error { .. } => {}
            }
        }

        match event {
            Event::AppStarted(config) => Self::start(config, model, caps),

            Event::MachineFetched(result) => Self::machine_fetched(result, model, caps),

            Event::UserInteraction | Event::IdleOverlayTapped => {}

            Event::RowMounted { row } => {
                Self::mount_row(row, model, caps);
                caps.render.render();
            }

            Event::RowUnmounted { row } => Self::unmount_row(row, model, caps),

            Event::DragChanged { row, dragging } => {
                if let Some(session) = model.rows.get_mut(&row) {
                    session.set_dragging(dragging);
                    caps.render.render();
                }
            }

            Event::RowScrolled { row, delta_px } => {
                if let Some(session) = model.rows.get_mut(&row) {
                    session.scroll_by(delta_px);
                    caps.render.render();
                }
            }

            Event::CardPressChanged { row, pressed } => {
                if let Some(session) = model.rows.get_mut(&row) {
                    session.set_pressed(pressed);
                    caps.render.render();
                }
            }

            Event::BuyTapped { product_id } => Self::buy(&product_id, model, caps),

            Event::AgeGateConfirmed => {
                if let Some(intent) = model.age_gate.confirm() {
                    Self::record_intent(intent, model);
                    caps.render.render();
                }
            }

            Event::AgeGateCancelled => {
                if let Some(intent) = model.age_gate.cancel() {
                    Self::record_intent(intent, model);
                    caps.render.render();
                }
            }

            Event::TimerElapsed { id, output } => Self::timer_elapsed(id, output, model, caps),
        }
    }

    fn view(&self, model: &Model) -> ViewModel {
        build_view(model)
    }
}
