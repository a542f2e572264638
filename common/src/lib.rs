mod entry;
pub use entry::*;

mod tree;
pub use tree::*;

mod state;
pub use state::*;

pub mod markers;
pub mod url;

mod config;
pub use config::*;

pub mod test_case;
