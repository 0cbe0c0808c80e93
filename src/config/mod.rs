pub mod load;
pub mod save;
pub mod types;

pub use types::{
    AnonymizerSettings, Config, DEFAULT_CODE_LENGTH, Language, MAX_RECENT_PATHS, UserSettings,
};
