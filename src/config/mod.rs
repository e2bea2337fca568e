//! Configuration Management
//!
//! Settings structures and layered loading (defaults, files, environment).

mod settings;

pub use settings::{
    CorsSettings, DatabaseSettings, JwtSettings, RedisSettings, ServerSettings, Settings,
    StorageSettings, UploadSettings, MIN_JWT_SECRET_LENGTH,
};
