pub mod billboard;
pub mod state;

pub use billboard::*;
pub use state::*;
