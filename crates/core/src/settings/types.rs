use std::borrow::Cow;

use super::parse_flag;

/// Where the identity table lives when nothing else is configured.
pub const DEFAULT_STORE_LOCATION: &str = "/data/users.sqlite";

/// The recognized settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SettingKey {
    /// List existing identities on the authorize form.
    ShowKnownUsers,
    /// Repeat `sub` as `id` in the userinfo response.
    AdditionalFields,
    /// When non-empty, `/token` requires a matching `client_secret`.
    ClientSecret,
    /// Filesystem path of the SQLite identity table.
    StoreLocation,
}

impl SettingKey {
    pub const ALL: [SettingKey; 4] = [
        SettingKey::ShowKnownUsers,
        SettingKey::AdditionalFields,
        SettingKey::ClientSecret,
        SettingKey::StoreLocation,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ShowKnownUsers => "show-known-users",
            Self::AdditionalFields => "additional-fields",
            Self::ClientSecret => "client-secret",
            Self::StoreLocation => "store-location",
        }
    }

    /// Whether this setting is a boolean toggle.
    pub fn is_flag(&self) -> bool {
        matches!(self, Self::ShowKnownUsers | Self::AdditionalFields)
    }

    /// Value reported for a setting that holds nothing at all.
    pub fn fallback(&self) -> SettingValue {
        if self.is_flag() {
            SettingValue::Flag(true)
        } else {
            SettingValue::Text(String::new())
        }
    }

    /// Built-in default used when the external source has no value.
    pub fn default_value(&self) -> SettingValue {
        match self {
            Self::ShowKnownUsers | Self::AdditionalFields => SettingValue::Flag(true),
            Self::ClientSecret => SettingValue::Text(String::new()),
            Self::StoreLocation => SettingValue::Text(DEFAULT_STORE_LOCATION.to_string()),
        }
    }

    /// Interpret a raw source value according to this setting's type.
    pub fn coerce(&self, raw: &str) -> SettingValue {
        if self.is_flag() {
            SettingValue::Flag(parse_flag(raw))
        } else {
            SettingValue::Text(raw.to_string())
        }
    }
}

impl std::fmt::Display for SettingKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A resolved setting value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingValue {
    Flag(bool),
    Text(String),
}

impl SettingValue {
    /// Read the value as a toggle; text goes through [`parse_flag`].
    pub fn as_flag(&self) -> bool {
        match self {
            Self::Flag(flag) => *flag,
            Self::Text(text) => parse_flag(text),
        }
    }

    /// Read the value as text; `true` renders as `"1"` and `false` as `""`.
    pub fn as_text(&self) -> Cow<'_, str> {
        match self {
            Self::Flag(true) => Cow::Borrowed("1"),
            Self::Flag(false) => Cow::Borrowed(""),
            Self::Text(text) => Cow::Borrowed(text.as_str()),
        }
    }
}

impl From<bool> for SettingValue {
    fn from(flag: bool) -> Self {
        Self::Flag(flag)
    }
}

impl From<&str> for SettingValue {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for SettingValue {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}
