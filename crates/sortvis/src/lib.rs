//! Sorting Algorithm Visualizer
//!
//! Playback controls, exports and a JSON/WebSocket API over the step
//! sequences recorded by `sortvis-engine`.
//!
//! # Architecture
//!
//! - **Playback**: Step through a recorded run at any speed
//! - **Session**: Shared playback driven by one-shot timers
//! - **Export**: Array and session data as JSON, CSV or a text report
//! - **Server**: REST endpoints plus a WebSocket update stream
//!
//! # Usage
//!
//! ```ignore
//! let config = VisConfig::from_env()?;
//! let session = Session::new(&config)?;
//!
//! VisServer::new(session).serve(config.addr).await?;
//! ```

mod config;
mod error;
mod export;
mod playback;
mod server;
mod session;
mod timer;

pub use config::VisConfig;
pub use error::{Error, Result};
pub use export::{array_to_csv, ExportData, ExportFormat};
pub use playback::{
    Playback, PlaybackState, PlaybackStats, PlaybackStatus, Speed, DEFAULT_ARRAY_SIZE,
    HISTORY_LEN, READY_ACTION,
};
pub use server::VisServer;
pub use session::{Session, SessionUpdate, TICK_INTERVAL};
pub use timer::{OneShotTimer, TimerToken};
