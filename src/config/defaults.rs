use super::{ApiConfig, ArchiveConfig, Config, HttpConfig};

pub const BASE_URL: &str = "http://api.leoslyrics.com";
pub const AUTH_KEY: &str = "lyricfetch";
pub const USER_AGENT: &str = concat!("lyricfetch/", env!("CARGO_PKG_VERSION"));

pub fn defaults() -> Config {
    Config {
        api: ApiConfig::default(),
        http: HttpConfig::default(),
        archive: ArchiveConfig::default(),
    }
}
