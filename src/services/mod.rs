pub mod entries;
pub mod stats;

pub use entries::EntryService;
