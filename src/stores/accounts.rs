use crate::stores::RideLog;

/// What a directory needs from a record to file and find it.
pub trait Credentials {
    fn username(&self) -> &str;
    fn password(&self) -> &str;

    /// Exact, case-sensitive match on both fields.
    fn matches(&self, username: &str, password: &str) -> bool {
        self.username() == username && self.password() == password
    }
}

#[derive(Debug)]
pub struct Rider {
    pub username: String,
    pub password: String,
    pub has_active_ride: bool,
    pub rides: RideLog,
}

impl Rider {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            has_active_ride: false,
            rides: RideLog::new(),
        }
    }
}

impl Credentials for Rider {
    fn username(&self) -> &str {
        &self.username
    }

    fn password(&self) -> &str {
        &self.password
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Driver {
    pub username: String,
    pub password: String,
    pub is_available: bool,
}

impl Driver {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            is_available: true,
        }
    }
}

impl Credentials for Driver {
    fn username(&self) -> &str {
        &self.username
    }

    fn password(&self) -> &str {
        &self.password
    }
}
