//! Command implementations.

pub mod ask;
pub mod history;
pub mod providers;

pub use self::ask::execute_ask;
pub use self::history::execute_history;
pub use self::providers::execute_providers;
