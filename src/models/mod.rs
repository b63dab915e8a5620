pub mod entry;
pub mod history;
pub mod preferences;
pub mod stats;
