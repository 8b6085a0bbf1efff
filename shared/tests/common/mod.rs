//! A stand-in shell with a virtual clock.
//!
//! It keeps every timer the core arms, drops the ones it cancels and fires the
//! rest in due order as time is advanced, the way a device shell would.

#![allow(dead_code)]

use std::collections::BTreeMap;

use crux_core::testing::{AppTester, Update};
use crux_core::Request;
use crux_http::protocol::{HttpRequest, HttpResult};
use shared::{
    App, Effect, Event, InventoryRecord, KioskConfig, MachineId, MachineSnapshot, Model, ProductId,
    TimerId, TimerOperation, TimerOutput, ViewModel, ViewState,
};
use shared::view::RowView;

pub struct VirtualShell {
    pub app: AppTester<App, Effect>,
    pub model: Model,
    pub now_ms: u64,
    pub http_urls: Vec<String>,
    pending_http: Vec<Request<HttpRequest>>,
    pub renders: usize,
    timers: BTreeMap<TimerId, u64>,
}

impl VirtualShell {
    pub fn new() -> Self {
        Self {
            app: AppTester::default(),
            model: Model::default(),
            now_ms: 0,
            http_urls: Vec::new(),
            pending_http: Vec::new(),
            renders: 0,
            timers: BTreeMap::new(),
        }
    }

    /// Starts the core with `config` and answers the fetch with `snapshot`.
    pub fn loaded_with(config: KioskConfig, snapshot: MachineSnapshot) -> Self {
        let mut shell = Self::new();
        shell.send(Event::AppStarted(config));
        shell.send(Event::MachineFetched(Ok(snapshot)));
        shell
    }

    pub fn send(&mut self, event: Event) {
        let update = self.app.update(event, &mut self.model);
        self.apply(update);
    }

    /// Answers the oldest outstanding HTTP request.
    pub fn respond_http(&mut self, result: HttpResult) {
        assert!(!self.pending_http.is_empty(), "no HTTP request outstanding");
        let mut request = self.pending_http.remove(0);
        let update = self
            .app
            .resolve(&mut request, result)
            .expect("HTTP request should resolve");
        self.apply(update);
    }

    fn apply(&mut self, update: Update<Effect, Event>) {
        for effect in update.effects {
            match effect {
                Effect::Timer(request) => match &request.operation {
                    TimerOperation::Start { id, millis } => {
                        self.timers.insert(*id, self.now_ms + millis);
                    }
                    TimerOperation::Cancel { id } => {
                        self.timers.remove(id);
                    }
                },
                Effect::Http(request) => {
                    self.http_urls.push(request.operation.url.clone());
                    self.pending_http.push(request);
                }
                Effect::Render(_) => self.renders += 1,
            }
        }
        for event in update.events {
            self.send(event);
        }
    }

    /// Moves the clock forward, firing due timers in order.
    pub fn advance(&mut self, ms: u64) {
        let target = self.now_ms + ms;
        loop {
            let next = self
                .timers
                .iter()
                .filter(|(_, due)| **due <= target)
                .min_by_key(|(id, due)| (**due, **id))
                .map(|(id, due)| (*id, *due));

            let Some((id, due)) = next else { break };
            self.timers.remove(&id);
            self.now_ms = due;
            self.send(Event::TimerElapsed { id, output: TimerOutput::Fired });
        }
        self.now_ms = target;
    }

    pub fn view(&self) -> ViewModel {
        self.app.view(&self.model)
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self.view().state, ViewState::Loaded { .. })
    }

    pub fn is_idle(&self) -> bool {
        self.model.is_idle()
    }

    pub fn rows(&self) -> Vec<RowView> {
        match self.view().state {
            ViewState::Loaded { rows, .. } => rows,
            other => panic!("expected the catalog, got {other:?}"),
        }
    }

    pub fn error_message(&self) -> String {
        match self.view().state {
            ViewState::Error { message } => message,
            other => panic!("expected an error screen, got {other:?}"),
        }
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    pub fn idle_due_at(&self) -> Option<u64> {
        self.model.idle.armed().and_then(|id| self.timers.get(&id).copied())
    }

    pub fn row_offset(&self, row: usize) -> f64 {
        self.model.rows.get(&row).map_or(0.0, |s| s.offset_px())
    }
}

pub fn record(id: &str, name: &str, enabled: bool, stock: i64, age: i64) -> InventoryRecord {
    InventoryRecord {
        id: ProductId::new(id),
        name: name.into(),
        category: "Drinks".into(),
        price: 2.5,
        image_identifier: "cola".into(),
        age_restriction_code: age,
        enabled,
        stock,
    }
}

pub fn snapshot(inventory: Vec<InventoryRecord>) -> MachineSnapshot {
    MachineSnapshot {
        id: MachineId::new("vm-001"),
        name: "Lobby".into(),
        location: "Building A".into(),
        slot_count: 10,
        inventory,
    }
}

/// `count` enabled, unrestricted, in-stock products `p1..=pcount`.
pub fn stocked(count: usize) -> MachineSnapshot {
    snapshot(
        (1..=count)
            .map(|i| record(&format!("p{i}"), &format!("Product {i}"), true, 3, 0))
            .collect(),
    )
}
