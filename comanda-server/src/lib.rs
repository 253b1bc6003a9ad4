//! Comanda Server - restaurant management backend
//!
//! # Architecture overview
//!
//! - **Orders** (`orders`): order lifecycle state machine, totals, payment
//! - **Booking** (`booking`): tables, reservations, slot conflict checks
//! - **Inventory** (`inventory`): ingredient stock ledger
//! - **Events** (`message`): broadcast bus for entity-change notifications
//! - **HTTP API** (`api`): RESTful API routers and handlers
//!
//! # Module structure
//!
//! ```text
//! comanda-server/src/
//! ├── core/          # Config, state, server
//! ├── api/           # HTTP routers and handlers
//! ├── orders/        # Order lifecycle and money
//! ├── booking/       # Tables and reservations
//! ├── inventory/     # Stock ledger
//! ├── message/       # Event bus
//! ├── db/            # Entity store
//! └── utils/         # Time, logging, validation helpers
//! ```

pub mod api;
pub mod booking;
pub mod core;
pub mod db;
pub mod inventory;
pub mod message;
pub mod orders;
pub mod utils;

// Re-export public types
pub use crate::booking::{BookingError, ReservationService, TableService};
pub use crate::core::{AppState, Config, Server};
pub use crate::db::Store;
pub use crate::inventory::{LedgerError, LedgerService};
pub use crate::message::EventBus;
pub use crate::orders::{OrderError, OrderService};

// Re-export unified error types from shared
pub use shared::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

pub fn print_banner() {
    println!(
        r#"
   ______
  / ____/___  ____ ___  ____ _____  ____/ /___ _
 / /   / __ \/ __ `__ \/ __ `/ __ \/ __  / __ `/
/ /___/ /_/ / / / / / / /_/ / / / / /_/ / /_/ /
\____/\____/_/ /_/ /_/\__,_/_/ /_/\__,_/\__,_/
    "#
    );
}
