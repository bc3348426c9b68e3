/// Trait for accessing environment variables in a testable way
///
/// The CLI resolves the acting user and the data directory from the
/// environment; going through this trait lets tests inject values without
/// touching process-wide state.

#[cfg(test)]
use std::collections::HashMap;
pub trait EnvProvider {
    /// Get the value of an environment variable
    fn get_var(&self, key: &str) -> Option<String>;
}

pub const USER_ID_VAR: &str = "EDUMART_USER_ID";
pub const USER_NAME_VAR: &str = "EDUMART_USER_NAME";
pub const AVATAR_URL_VAR: &str = "EDUMART_AVATAR_URL";
pub const DATA_DIR_VAR: &str = "EDUMART_DATA_DIR";

/// Production implementation that uses the system environment
pub struct SystemEnvProvider;

impl EnvProvider for SystemEnvProvider {
    fn get_var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok().filter(|v| !v.is_empty())
    }
}

/// Test-only mock implementation for environment variables
#[cfg(test)]
pub struct MockEnvProvider {
    vars: HashMap<String, String>,
}

#[cfg(test)]
impl MockEnvProvider {
    pub fn new() -> Self {
        Self {
            vars: HashMap::new(),
        }
    }

    pub fn set_var(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.vars.insert(key.into(), value.into());
        self
    }

    pub fn remove_var(&mut self, key: &str) -> &mut Self {
        self.vars.remove(key);
        self
    }

    /// Create a mock with the acting EduMart user set
    pub fn with_user(id: impl Into<String>, name: impl Into<String>) -> Self {
        let mut mock = Self::new();
        mock.set_var(USER_ID_VAR, id);
        mock.set_var(USER_NAME_VAR, name);
        mock
    }
}

#[cfg(test)]
impl EnvProvider for MockEnvProvider {
    fn get_var(&self, key: &str) -> Option<String> {
        self.vars.get(key).cloned()
    }
}
