//! Environment variable management for testing
//!
//! Overrides process environment variables and the working directory for
//! the lifetime of a guard and restores the previous values on drop. Guards
//! serialize on a process-wide lock because both are shared by every test
//! thread.

use std::env;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

static ENV_LOCK: Mutex<()> = Mutex::new(());

/// A test guard that sets or removes environment variables and restores them
/// when dropped.
pub struct EnvVarGuard {
  saved: Vec<(String, Option<String>)>,
  saved_dir: Option<PathBuf>,
  _lock: MutexGuard<'static, ()>,
}

impl EnvVarGuard {
  /// Acquire the environment lock without changing anything yet.
  pub fn new() -> Self {
    let lock = ENV_LOCK.lock().unwrap_or_else(PoisonError::into_inner);
    Self {
      saved: Vec::new(),
      saved_dir: None,
      _lock: lock,
    }
  }

  /// Set `key` to `value` until the guard is dropped.
  pub fn set(mut self, key: &str, value: &str) -> Self {
    self.save(key);
    unsafe {
      env::set_var(key, value);
    }
    self
  }

  /// Remove `key` until the guard is dropped.
  pub fn remove(mut self, key: &str) -> Self {
    self.save(key);
    unsafe {
      env::remove_var(key);
    }
    self
  }

  /// Change the working directory to `path` until the guard is dropped.
  pub fn current_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
    if self.saved_dir.is_none() {
      self.saved_dir = Some(env::current_dir().expect("Failed to read current directory"));
    }
    env::set_current_dir(path).expect("Failed to change current directory");
    self
  }

  fn save(&mut self, key: &str) {
    if !self.saved.iter().any(|(saved_key, _)| saved_key == key) {
      self.saved.push((key.to_string(), env::var(key).ok()));
    }
  }
}

impl Default for EnvVarGuard {
  fn default() -> Self {
    Self::new()
  }
}

impl Drop for EnvVarGuard {
  fn drop(&mut self) {
    if let Some(dir) = self.saved_dir.take() {
      let _ = env::set_current_dir(dir);
    }
    for (key, value) in self.saved.drain(..).rev() {
      unsafe {
        match value {
          Some(value) => env::set_var(&key, value),
          None => env::remove_var(&key),
        }
      }
    }
  }
}
