//! Terminal progress feedback

mod spinner;

pub use spinner::{clear_spinner, create_spinner, set_spinner_message};
