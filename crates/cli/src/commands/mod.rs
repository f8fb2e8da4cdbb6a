//! CLI command implementations.

use gastroboard_server::config::DEFAULT_DATA_PATH;
use gastroboard_server::store::ConfigStore;

pub mod export;
pub mod init;
pub mod user;

/// Open the store at the same path the server would use.
fn store_from_env() -> ConfigStore {
    let path =
        std::env::var("GASTROBOARD_DATA_PATH").unwrap_or_else(|_| DEFAULT_DATA_PATH.to_owned());
    ConfigStore::new(path)
}
