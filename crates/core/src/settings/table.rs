use std::{borrow::Cow, collections::HashMap};

use super::{SettingKey, SettingValue};

/// Resolved settings for one server process.
///
/// The flow only reads these. Bootstrap and tests may override single values with
/// [`Settings::set`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    values: HashMap<SettingKey, SettingValue>,
}

impl Settings {
    /// Settings that hold nothing; every read returns the key's fallback.
    pub fn empty() -> Self {
        Self {
            values: HashMap::new(),
        }
    }

    /// Settings populated with the built-in defaults.
    pub fn with_defaults() -> Self {
        Self::resolve(|_| None)
    }

    /// Resolve every key through `lookup`, falling back to the built-in default.
    ///
    /// Toggles are coerced with [`super::parse_flag`], the others are kept as text.
    pub fn resolve<F>(lookup: F) -> Self
    where
        F: Fn(SettingKey) -> Option<String>,
    {
        let values = SettingKey::ALL
            .into_iter()
            .map(|key| {
                let value = match lookup(key) {
                    Some(raw) => key.coerce(&raw),
                    None => key.default_value(),
                };
                (key, value)
            })
            .collect();

        Self { values }
    }

    pub fn get(&self, key: SettingKey) -> SettingValue {
        self.values
            .get(&key)
            .cloned()
            .unwrap_or_else(|| key.fallback())
    }

    pub fn set(&mut self, key: SettingKey, value: impl Into<SettingValue>) {
        self.values.insert(key, value.into());
    }

    pub fn show_known_users(&self) -> bool {
        self.flag(SettingKey::ShowKnownUsers)
    }

    pub fn additional_fields(&self) -> bool {
        self.flag(SettingKey::AdditionalFields)
    }

    pub fn client_secret(&self) -> Cow<'_, str> {
        self.text(SettingKey::ClientSecret)
    }

    pub fn store_location(&self) -> Cow<'_, str> {
        self.text(SettingKey::StoreLocation)
    }

    fn flag(&self, key: SettingKey) -> bool {
        self.values
            .get(&key)
            .map_or_else(|| key.fallback().as_flag(), SettingValue::as_flag)
    }

    fn text(&self, key: SettingKey) -> Cow<'_, str> {
        match self.values.get(&key) {
            Some(value) => value.as_text(),
            None => Cow::Owned(key.fallback().as_text().into_owned()),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self::with_defaults()
    }
}
