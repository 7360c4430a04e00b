//! Simulation layer: every value the dashboard displays is produced here.
//!
//! ## Submodules
//!
//! - [`duration`]: Parsing and formatting of interval strings (e.g., "3s", "5m")
//! - [`vitals`]: Simulated time-series generator (chart window, card walks)
//! - [`ward`]: One-shot ward occupancy generation, filtering and stats
//! - [`assistant`]: Transcript state and canned assistant content
//! - [`responder`]: Delayed reply delivery over a polled channel
//!
//! ## Data Flow
//!
//! ```text
//! StdRng + clock (injected)
//!        │
//!        ├──▶ VitalsBoard::new() / tick_cards() / tick_chart()
//!        │
//!        ├──▶ Ward::generate()  (once per session or reset)
//!        │
//!        └──▶ canned reply pick ──▶ Responder::dispatch() ─┐
//!                                                          ▼
//!                         UI loop ◀── Responder::poll() ◀──┘
//! ```

pub mod assistant;
pub mod duration;
pub mod responder;
pub mod vitals;
pub mod ward;

pub use assistant::{Attachment, Message, Role, Transcript};
pub use responder::Responder;
pub use vitals::{Band, VitalReading, VitalSample, VitalSeriesWindow, VitalsBoard};
pub use ward::{BedSortColumn, BedStatus, Patient, StatusFilter, Ward, WardStats};
