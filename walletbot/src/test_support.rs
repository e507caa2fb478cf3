use std::collections::HashMap;
use std::path::Path;
use std::sync::Mutex;

use crate::config::{Config, DEFAULT_MODEL};

static ENV_LOCK: Mutex<()> = Mutex::new(());

pub fn with_env(vars: &[(&str, Option<&str>)], f: impl FnOnce()) {
    let _guard = ENV_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    apply_env(vars, f);
}

/// 在指定工作目录下运行（`.env` 查找从该目录开始）。
pub fn with_env_in_dir(dir: &Path, vars: &[(&str, Option<&str>)], f: impl FnOnce()) {
    let _guard = ENV_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    let previous = std::env::current_dir().unwrap();
    std::env::set_current_dir(dir).unwrap();
    apply_env(vars, f);
    std::env::set_current_dir(previous).unwrap();
}

fn apply_env(vars: &[(&str, Option<&str>)], f: impl FnOnce()) {
    let backup: Vec<(String, Option<String>)> = vars
        .iter()
        .map(|(key, _)| ((*key).to_string(), std::env::var(key).ok()))
        .collect();
    for (key, value) in vars {
        match value {
            Some(value) => std::env::set_var(key, value),
            None => std::env::remove_var(key),
        }
    }
    f();
    for (key, value) in backup {
        match value {
            Some(value) => std::env::set_var(key, value),
            None => std::env::remove_var(key),
        }
    }
}

pub fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = vars
        .iter()
        .map(|(key, value)| ((*key).to_string(), (*value).to_string()))
        .collect();
    move |key: &str| map.get(key).cloned()
}

pub fn test_config() -> Config {
    Config {
        api_key: "test-key".into(),
        model: DEFAULT_MODEL.into(),
        base_url: None,
        api_version: None,
        timeout_secs: None,
    }
}
