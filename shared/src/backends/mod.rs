mod native;

pub use native::timestamp::{TimeError, Timestamp};
