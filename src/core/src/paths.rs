use std::path::PathBuf;

use directories::BaseDirs;

fn env_home_dir() -> Option<PathBuf> {
    if let Some(home) = std::env::var_os("HOME") {
        if !home.is_empty() {
            return Some(PathBuf::from(home));
        }
    }
    if let Some(profile) = std::env::var_os("USERPROFILE") {
        if !profile.is_empty() {
            return Some(PathBuf::from(profile));
        }
    }
    None
}

pub fn user_home_dir() -> Option<PathBuf> {
    if let Some(base) = BaseDirs::new() {
        return Some(base.home_dir().to_path_buf());
    }
    env_home_dir()
}

pub fn mangatroc_home_dir() -> Result<PathBuf, String> {
    if let Some(override_dir) = std::env::var_os("MANGATROC_HOME") {
        let path = PathBuf::from(override_dir);
        if path.is_relative() {
            return Err("MANGATROC_HOME must be an absolute path".to_string());
        }
        std::fs::create_dir_all(&path)
            .map_err(|e| format!("failed to create MANGATROC_HOME directory: {e}"))?;
        return Ok(path);
    }

    let home = user_home_dir().ok_or_else(|| {
        "failed to resolve user home; set MANGATROC_HOME or HOME/USERPROFILE".to_string()
    })?;
    let dir = home.join(".mangatroc");
    std::fs::create_dir_all(&dir)
        .map_err(|e| format!("failed to create ~/.mangatroc: {e}"))?;
    Ok(dir)
}

/// Default location of the notification database.
pub fn notifications_db_path() -> Result<PathBuf, String> {
    Ok(mangatroc_home_dir()?.join("notifications.db"))
}
