pub mod listing;
pub mod ops;

pub use listing::{DirectoryListing, ScanOutcome};
pub use ops::EntryKind;
