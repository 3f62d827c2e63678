//! Command implementations for the contactdir CLI

pub mod connect;
pub mod search;
pub mod seed;
pub mod serve;
pub mod sync;

pub use search::run_search;
pub use seed::run_seed;
pub use serve::run_serve;
pub use sync::run_sync;
