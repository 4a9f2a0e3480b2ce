pub mod settings;

pub use settings::{Settings, load_settings, settings_from_json};
