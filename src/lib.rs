pub mod app;
pub mod character;
pub mod consts;
pub mod context;
pub mod error;
pub mod gateway;
pub mod logging;
pub mod normalize;
pub mod ruleset;
pub mod settings;
pub mod store;
pub mod tui;
pub mod ui;

// Re-export commonly used items for easier access
pub use character::{Character, CheckField, Delta, SkillCheck, SkillCheckResult, modifier};
pub use error::{AppError, GatewayError, SettingsError, StoreError};
pub use gateway::{HttpGateway, RosterGateway};
pub use normalize::normalize;
pub use ruleset::{Ruleset, SkillDefinition};
pub use settings::Settings;
pub use store::{CharacterId, RosterEntry, Store, SyncStatus};
