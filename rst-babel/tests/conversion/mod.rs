//! End to end conversion tests: HTML scenarios and event-level checks.

mod events;
mod html;
