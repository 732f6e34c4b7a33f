//! Configuration loaded from `<root>/config.toml`.

pub mod settings;

pub use settings::{Settings, VaultFormat};
