/// Configuration system: `config_struct!` schemas loaded from TOML
pub mod macros;
pub mod schemas;
pub mod utils;

pub use schemas::{CacheConfig, Config, JupiterConfig};
pub use utils::{
    get_config_clone, load_config, load_config_from_path, parse_config, read_config_from_path,
    with_config, CONFIG_FILE_PATH,
};
