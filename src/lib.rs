// Library crate: public API items may not be used by the binary
#![allow(unused)]

//! # wardwatch
//!
//! A terminal dashboard that simulates a clinical ward for the MediCare
//! decision-support product: live-looking vital signs, bed occupancy and
//! a mock assistant console.
//!
//! Everything on screen is synthetic. Patients, vitals and assistant
//! replies come from seeded random generators and fixed pools; there is
//! no backend, no persistence and no model behind the assistant.
//!
//! ## Architecture
//!
//! The crate is organized into four main modules:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        Application                          │
//! │  ┌─────────┐    ┌──────────┐    ┌─────────┐    ┌─────────┐ │
//! │  │  app    │───▶│   sim    │───▶│   ui    │───▶│ Terminal│ │
//! │  │ (state) │    │(generate)│    │(render) │    │         │ │
//! │  └────┬────┘    └──────────┘    └─────────┘    └─────────┘ │
//! │       │                                                     │
//! │       ▼                                                     │
//! │  ┌──────────┐                                               │
//! │  │responder │◀── background tokio runtime (delayed replies) │
//! │  │ (poll)   │                                               │
//! │  └──────────┘                                               │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! - **[`app`]**: Application state, view navigation, and user interaction logic
//! - **[`sim`]**: All data generation - the vitals time-series generator,
//!   ward occupancy, assistant transcript, and the delayed-reply responder
//! - **[`ui`]**: Terminal rendering using ratatui - reading cards, charts,
//!   bed tables, the assistant console, and theme support
//! - **[`events`]**: Keyboard and mouse handling, including the assistant's
//!   text-entry mode
//!
//! ## Features
//!
//! - **Vitals view**: Per-metric cards walking inside their normal bands,
//!   plus two rolling multi-series charts
//! - **Beds view**: Generated ward with filtering, search, sorting and a
//!   per-bed detail overlay
//! - **Assistant view**: Canned replies after a fixed delay; attachments
//!   captured as metadata only
//! - **Deterministic mode**: `--seed` reproduces a whole session
//!
//! ## Usage
//!
//! ### As a CLI tool
//!
//! ```bash
//! # Run the dashboard
//! wardwatch
//!
//! # Deterministic session with faster card updates
//! wardwatch --seed 42 --card-refresh 1s
//!
//! # Dump a generated ward snapshot without entering the TUI
//! wardwatch --export snapshot.json
//! ```
//!
//! ### As a library
//!
//! ```
//! use std::time::Duration;
//! use wardwatch::{App, Responder, Theme};
//!
//! let rt = tokio::runtime::Runtime::new().unwrap();
//! let responder = Responder::new(rt.handle().clone(), Duration::from_secs(2));
//! let app = App::new(Some(42), responder, Theme::dark());
//! assert_eq!(app.ward.stats().occupied, app.ward.beds.len());
//! ```

pub mod app;
pub mod config;
pub mod events;
pub mod sim;
pub mod ui;

// Re-export main types for convenience
pub use app::{App, View};
pub use config::Settings;
pub use sim::{
    BedSortColumn, BedStatus, Patient, Responder, StatusFilter, Transcript, VitalReading,
    VitalSample, VitalSeriesWindow, VitalsBoard, Ward, WardStats,
};
pub use ui::Theme;
