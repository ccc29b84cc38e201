//! The entry-point fields of a package's `package.json`.
//!
//! Only `module`, `main`, and `exports` matter for choosing an entry file.
//! Values that are missing, empty, or of an unexpected shape are treated as
//! absent rather than guessed at.

use serde_json::{Map, Value};

/// A manifest field that can name an entry file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryField {
    Module,
    Main,
    Exports,
}

impl EntryField {
    /// Fields in the order they are consulted.
    pub const PRECEDENCE: [EntryField; 3] = [Self::Module, Self::Main, Self::Exports];

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Module => "module",
            Self::Main => "main",
            Self::Exports => "exports",
        }
    }
}

impl std::fmt::Display for EntryField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Shape of the `exports` field, as far as entry selection is concerned.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Exports {
    /// No `exports` field.
    #[default]
    Absent,
    /// `"exports": "./index.js"`.
    Path(String),
    /// `"exports": { "import": "./index.mjs", ... }`.
    Import(String),
    /// `"exports": { ".": { "import": "./index.mjs", ... }, ... }`.
    RootImport(String),
    /// Present, but none of the shapes above.
    Unsupported,
}

impl Exports {
    /// Classify a raw `exports` value.
    #[must_use]
    pub fn from_value(value: Option<&Value>) -> Self {
        match value {
            None | Some(Value::Null) => Self::Absent,
            Some(Value::String(s)) if !s.is_empty() => Self::Path(s.clone()),
            Some(Value::Object(map)) => {
                if let Some(target) = import_target(map) {
                    Self::Import(target)
                } else if let Some(target) = map
                    .get(".")
                    .and_then(Value::as_object)
                    .and_then(import_target)
                {
                    Self::RootImport(target)
                } else {
                    Self::Unsupported
                }
            }
            Some(_) => Self::Unsupported,
        }
    }

    /// The entry value this shape selects, if any.
    #[must_use]
    pub fn entry(&self) -> Option<&str> {
        match self {
            Self::Path(s) | Self::Import(s) | Self::RootImport(s) => Some(s),
            Self::Absent | Self::Unsupported => None,
        }
    }
}

fn import_target(map: &Map<String, Value>) -> Option<String> {
    non_empty_str(map.get("import")).map(str::to_string)
}

fn non_empty_str(value: Option<&Value>) -> Option<&str> {
    value.and_then(Value::as_str).filter(|s| !s.is_empty())
}

/// Entry-point fields of a `package.json`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PackageManifest {
    pub module: Option<String>,
    pub main: Option<String>,
    pub exports: Exports,
}

impl PackageManifest {
    /// Parse manifest text.
    ///
    /// Only invalid JSON is an error. Valid JSON that is not an object
    /// yields a manifest with no entry fields.
    pub fn parse(content: &str) -> Result<Self, serde_json::Error> {
        let value: Value = serde_json::from_str(content)?;
        Ok(Self::from_value(&value))
    }

    #[must_use]
    pub fn from_value(value: &Value) -> Self {
        let Some(obj) = value.as_object() else {
            return Self::default();
        };

        Self {
            module: non_empty_str(obj.get("module")).map(str::to_string),
            main: non_empty_str(obj.get("main")).map(str::to_string),
            exports: Exports::from_value(obj.get("exports")),
        }
    }

    /// Value of a single entry field, if usable.
    #[must_use]
    pub fn field(&self, field: EntryField) -> Option<&str> {
        match field {
            EntryField::Module => self.module.as_deref(),
            EntryField::Main => self.main.as_deref(),
            EntryField::Exports => self.exports.entry(),
        }
    }

    /// Usable entry values in precedence order (`module`, `main`, `exports`).
    pub fn entry_candidates(&self) -> impl Iterator<Item = (EntryField, &str)> + '_ {
        EntryField::PRECEDENCE
            .into_iter()
            .filter_map(|field| self.field(field).map(|value| (field, value)))
    }
}
