//! Pay settings and server configuration.
//!
//! Two kinds of configuration live here:
//!
//! - [`Settings`]: the childminder's contract and pay parameters, persisted
//!   alongside the data and normalized on every load ([`normalize`]), from
//!   which the "année complète" figures are derived ([`derive_annual_values`]).
//! - [`ServerConfig`]: where the server listens and where the data files live,
//!   loaded from an optional YAML file.
//!
//! # Example
//!
//! ```
//! use assmat_engine::config::{derive_annual_values, normalize, SettingsInput};
//!
//! let settings = normalize(SettingsInput::default());
//! let derived = derive_annual_values(&settings);
//! assert!(derived.is_computed());
//! ```

mod loader;
mod settings;
mod types;

pub use loader::ServerConfig;
pub use settings::{
    LEGACY_NET_HOURLY_WAGE_FIELD, MAX_SETTING_VALUE, MIN_SETTING_MAGNITUDE, derive_annual_values,
    normalize,
};
pub use types::{AnnualDerivation, AnnualValues, Settings, SettingsInput};
