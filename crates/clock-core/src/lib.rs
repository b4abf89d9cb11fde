// BCD clock engine modules
pub mod clock;
pub mod prelude;

// Re-exports
pub use clock::Clock;

pub use clock::config::{ClockConfig, ConfigError};
pub use clock::output::OutputWords;
