use std::path::{Path, PathBuf};

pub const REVIEWBOT_DIR: &str = ".reviewbot";
pub const CONFIG_FILE: &str = ".reviewbot/config.yaml";

pub fn config_path(root: &Path) -> PathBuf {
    root.join(CONFIG_FILE)
}
