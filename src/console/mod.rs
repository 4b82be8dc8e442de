pub(crate) mod commands;
pub mod controller;
pub mod events;
pub mod field;
pub mod inbound;
pub mod ledger;
pub mod lock_state;
pub mod species;
pub mod state;

pub use controller::ConsoleController;
pub use events::ConsoleObserver;
pub use field::{FieldValue, TrackedField};
pub use inbound::{ButtonCode, InboundEvent};
pub use ledger::{LedgerRow, ReadingLedger};
pub use lock_state::{FieldView, LockState, SensorReading};
pub use species::{classify, SpeciesMatcher, SpeciesRule, UNKNOWN_SPECIES};
pub use state::{ConsoleChange, ConsoleSnapshot, ConsoleState, LedgerSnapshot};
