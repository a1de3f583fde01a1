use crate::db::{Driver, DriverError, DriverErrorKind, PostgresDriver};

use std::collections::BTreeMap;


pub type DriverFactory = fn() -> Box<dyn Driver>;

/// Maps connection-URL schemes to driver constructors.
///
/// Nothing is registered implicitly; use [`Registry::with_defaults`] for the
/// drivers this crate ships.
#[derive(Default)]
pub struct Registry {
    factories: BTreeMap<String, DriverFactory>,
}

fn postgres() -> Box<dyn Driver> {
    Box::new(PostgresDriver::new())
}

impl Registry {
    pub fn new() -> Self {
        Registry { factories: BTreeMap::new() }
    }

    pub fn with_defaults() -> Self {
        let mut registry = Registry::new();
        registry.register("postgres", postgres);
        registry
    }

    /// Register `factory` under `scheme`, returning the one it replaces.
    pub fn register(&mut self, scheme: &str, factory: DriverFactory) -> Option<DriverFactory> {
        self.factories.insert(scheme.to_string(), factory)
    }

    pub fn schemes(&self) -> impl Iterator<Item = &str> {
        self.factories.keys().map(String::as_str)
    }

    pub fn driver(&self, scheme: &str) -> Result<Box<dyn Driver>, DriverError> {
        self.factories
            .get(scheme)
            .map(|factory| factory())
            .ok_or_else(|| DriverError::new(DriverErrorKind::UnsupportedScheme(scheme.to_string())))
    }

    /// Build a fresh driver for the scheme of `url`.
    pub fn driver_for_url(&self, url: &str) -> Result<Box<dyn Driver>, DriverError> {
        let scheme = scheme_of(url)
            .ok_or_else(|| DriverError::new(DriverErrorKind::UnsupportedScheme(String::new())))?;
        self.driver(scheme)
    }
}

/// Text before `://`, e.g. `postgres` in `postgres://localhost/db`.
pub fn scheme_of(url: &str) -> Option<&str> {
    url.split_once("://")
        .map(|(scheme, _)| scheme)
        .filter(|scheme| !scheme.is_empty())
}
