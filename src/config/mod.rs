pub mod settings;

pub use settings::{
    CONFIG_PATH_ENV, ConfigError, EmbeddedConfig, PolicyFile, Settings, decode_config_string,
};
