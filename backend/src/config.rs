//! Configuration loading from `.env` files and the process environment.

use candy_mint_core::error::{ConfigError, ConfigResult};
use candy_mint_core::MintConfig;
use std::collections::HashMap;
use std::env;
use std::path::Path;

/// Load the mint configuration.
///
/// Variables from `env_file` (when given) win over the process environment.
/// Without a file the usual `.env` lookup of `dotenvy` applies.
pub fn load_config(env_file: Option<&Path>) -> ConfigResult<MintConfig> {
    let file_vars = match env_file {
        Some(path) => read_env_file(path)?,
        None => {
            let _ = dotenvy::dotenv();
            HashMap::new()
        }
    };

    MintConfig::from_lookup(|name| file_vars.get(name).cloned().or_else(|| env::var(name).ok()))
}

fn read_env_file(path: &Path) -> ConfigResult<HashMap<String, String>> {
    let invalid = |e: dotenvy::Error| ConfigError::Invalid {
        var: "env file",
        message: format!("{}: {}", path.display(), e),
    };

    let mut vars = HashMap::new();
    for item in dotenvy::from_path_iter(path).map_err(invalid)? {
        let (key, value) = item.map_err(invalid)?;
        vars.insert(key, value);
    }
    Ok(vars)
}
