//! Device registry keyed by short name.
//!
//! The [`DeviceRegistry`] is the lookup the host framework performs when a
//! user asks for a device by short name (e.g. `"aqt.sim"`).

use rustc_hash::FxHashMap;
use tracing::debug;

use crate::device::{Device, DeviceConfig, DeviceFactory};
use crate::error::{DeviceError, DeviceResult};

/// Factory function type for registered devices.
type Factory = Box<dyn Fn(DeviceConfig) -> DeviceResult<Box<dyn Device>> + Send + Sync>;

/// Central registry for device plugins.
pub struct DeviceRegistry {
    factories: FxHashMap<String, Factory>,
}

impl DeviceRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            factories: FxHashMap::default(),
        }
    }

    /// Register a device type under a short name.
    pub fn register<D>(&mut self, short_name: impl Into<String>)
    where
        D: DeviceFactory + 'static,
    {
        let short_name = short_name.into();
        debug!("Registering device: {}", short_name);
        self.factories.insert(
            short_name,
            Box::new(|config| {
                let device = D::from_config(config)?;
                Ok(Box::new(device) as Box<dyn Device>)
            }),
        );
    }

    /// Register a device with a custom constructor.
    pub fn register_factory(
        &mut self,
        short_name: impl Into<String>,
        factory: impl Fn(DeviceConfig) -> DeviceResult<Box<dyn Device>> + Send + Sync + 'static,
    ) {
        let short_name = short_name.into();
        debug!("Registering device factory: {}", short_name);
        self.factories.insert(short_name, Box::new(factory));
    }

    /// Create a device by short name.
    pub fn create(&self, short_name: &str, config: DeviceConfig) -> DeviceResult<Box<dyn Device>> {
        match self.factories.get(short_name) {
            Some(factory) => factory(config),
            None => Err(DeviceError::UnknownDevice(format!(
                "No device registered with name '{short_name}'"
            ))),
        }
    }

    /// List all registered short names, sorted.
    pub fn available_devices(&self) -> Vec<String> {
        let mut names: Vec<_> = self.factories.keys().cloned().collect();
        names.sort();
        names
    }

    /// Check if a device is registered.
    pub fn has_device(&self, short_name: &str) -> bool {
        self.factories.contains_key(short_name)
    }
}

impl Default for DeviceRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_registry() {
        let registry = DeviceRegistry::new();
        assert!(registry.available_devices().is_empty());
        assert!(!registry.has_device("aqt.sim"));
    }

    #[test]
    fn test_register_factory() {
        let mut registry = DeviceRegistry::new();
        registry.register_factory("test", |_config| {
            Err(DeviceError::Configuration("test only".into()))
        });

        assert!(registry.has_device("test"));
        assert_eq!(registry.available_devices(), vec!["test"]);
        assert!(matches!(
            registry.create("test", DeviceConfig::new("test")),
            Err(DeviceError::Configuration(_))
        ));
    }

    #[test]
    fn test_create_unknown_device() {
        let registry = DeviceRegistry::new();
        let result = registry.create("nonexistent", DeviceConfig::new("nonexistent"));
        assert!(matches!(result, Err(DeviceError::UnknownDevice(_))));
    }

    #[test]
    fn test_available_devices_sorted() {
        let mut registry = DeviceRegistry::new();
        registry.register_factory("zebra", |_| Err(DeviceError::Configuration("test".into())));
        registry.register_factory("alpha", |_| Err(DeviceError::Configuration("test".into())));

        assert_eq!(registry.available_devices(), vec!["alpha", "zebra"]);
    }
}
