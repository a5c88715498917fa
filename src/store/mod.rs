pub mod error;
pub mod reminder;
pub mod store;

pub use error::StoreError;
pub use reminder::{Category, Priority, Reminder, ReminderDraft};
pub use store::{ReminderStore, STORE_FILE};
