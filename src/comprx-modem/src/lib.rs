// SPDX-FileCopyrightText: 2025 Stanislaw Grams <stanislawgrams@gmail.com>
//
// SPDX-License-Identifier: BSD-2-Clause

use std::collections::HashMap;

use comprx_core::{DynResult, Modem};

mod dummy;

pub use dummy::DummyModem;

pub type ModemFactory = fn() -> DynResult<Box<dyn Modem>>;

/// Context for registering and opening modem backends.
#[derive(Clone)]
pub struct ModemRegistry {
    factories: HashMap<String, ModemFactory>,
}

impl ModemRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            factories: HashMap::new(),
        }
    }

    /// Register a modem factory under a stable name (e.g. "dummy").
    pub fn register_modem(&mut self, name: &str, factory: ModemFactory) {
        let key = normalize_name(name);
        self.factories.insert(key, factory);
    }

    /// Check whether a modem name is registered.
    pub fn is_modem_registered(&self, name: &str) -> bool {
        let key = normalize_name(name);
        self.factories.contains_key(&key)
    }

    /// List registered modem names.
    pub fn registered_modems(&self) -> Vec<String> {
        let mut names: Vec<String> = self.factories.keys().cloned().collect();
        names.sort();
        names
    }

    /// Open a modem instance by name. Closing it is dropping the box.
    pub fn open(&self, name: &str) -> DynResult<Box<dyn Modem>> {
        let key = normalize_name(name);
        let factory = self.factories.get(&key).ok_or_else(|| {
            format!(
                "Unknown modem: {} (available: {})",
                name,
                self.registered_modems().join(", ")
            )
        })?;
        let modem = factory()?;
        tracing::debug!("opened modem {}", modem.name());
        Ok(modem)
    }
}

impl Default for ModemRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Canonical registry key: lowercase ASCII alphanumerics only.
pub fn normalize_name(name: &str) -> String {
    name.to_ascii_lowercase()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect()
}

/// Register all built-in modems on a registry.
pub fn register_builtin_modems_on(registry: &mut ModemRegistry) {
    registry.register_modem("dummy", dummy_factory);
}

fn dummy_factory() -> DynResult<Box<dyn Modem>> {
    Ok(Box::new(DummyModem::new()))
}
