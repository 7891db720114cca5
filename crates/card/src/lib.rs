//! Card metadata: flag queries, lookup by id and `strings.conf` names.
//!
//! There is no process-wide catalog. Open a [`CdbCatalog`] or build a
//! [`MemoryCatalog`] once and pass it to whatever needs lookups.

mod card;
mod catalog;
mod cdb;
mod constants;
mod strings;

pub mod error;

pub use card::Card;
pub use catalog::{separate_extra, CardCatalog, MemoryCatalog};
pub use cdb::CdbCatalog;
pub use constants::{Attribute, CardType, Race, EXTRA_DECK_TYPES};
pub use strings::{SetName, StringsConf};
