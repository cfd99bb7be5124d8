//! Display formatting for terminal output
//!
//! Turns engine results into render payloads and routes notifications to
//! a sink.

pub mod notification;
pub mod presenter;

pub use notification::{NotificationSink, TerminalSink, ToastBoard, ToastPhase};
pub use presenter::{
    notification_for, present, present_error, render_payload, Field, PresentContext,
    Presentable, RenderPayload,
};
