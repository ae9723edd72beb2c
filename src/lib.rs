pub mod config;
pub mod error;
pub mod hashing;
pub mod lister;
pub mod picker;
pub mod report;
pub mod stream;

pub use config::PickerConfig;
pub use error::PickError;
pub use lister::{dirs_in, files_in, pick_in, ListStats};
pub use picker::{make_picker, PickStats, Picker};
pub use report::Report;
pub use stream::PathStream;
