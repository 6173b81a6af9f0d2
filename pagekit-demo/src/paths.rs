//! Platform-specific directory paths.

use std::path::PathBuf;

use directories::ProjectDirs;

const QUALIFIER: &str = "dev";
const ORGANIZATION: &str = "pagekit";
const APPLICATION: &str = "pagekit-demo";

/// Name of the widget options file inside the config directory.
pub const SETTINGS_FILE: &str = "widgets.json";

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from(QUALIFIER, ORGANIZATION, APPLICATION)
}

/// Get the config directory, or None if the home directory cannot be determined.
///
/// - Linux: `$XDG_CONFIG_HOME/pagekit-demo` or `~/.config/pagekit-demo`
/// - macOS: `~/Library/Application Support/dev.pagekit.pagekit-demo`
/// - Windows: `C:\Users\<User>\AppData\Roaming\pagekit\pagekit-demo\config`
pub fn config_dir() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.config_dir().to_path_buf())
}

/// Default location of the widget options file.
pub fn settings_file() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join(SETTINGS_FILE))
}
