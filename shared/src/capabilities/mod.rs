mod http;
mod timer;

pub use self::http::{HttpError, ValidatedUrl, MAX_URL_LENGTH};
pub use self::timer::{Timer, TimerId, TimerIds, TimerOperation, TimerOutput};

// Crux's built-in Render capability is used as-is for view updates.
pub use crux_core::render::Render;
pub use crux_http::Http;

use crate::app::App;
use crate::event::Event;

pub type AppHttp = Http<Event>;

#[derive(crux_core::macros::Effect)]
#[effect(app = "App")]
// The Effect derive reads the event type from each field's generic argument.
pub struct Capabilities {
    pub http: Http<Event>,
    pub render: Render<Event>,
    pub timer: Timer<Event>,
}
