//! # Models
//!
//! Data held by a session: the country records, the cached bulk dataset, the
//! normalized detail projection and the session state itself.

pub mod country;
pub mod dataset_cache;
pub mod detail_record;
pub mod session_state;

pub use country::{CountryName, CountryRecord, Currency, Flags, NOT_APPLICABLE};
pub use dataset_cache::DatasetCache;
pub use detail_record::{DetailField, DetailRecord};
pub use session_state::{LookupTicket, SessionSnapshot, SessionState};
