//! src/registry.rs
use crate::property::PropertyDyn;
use anyhow::anyhow;

// Registration struct
pub struct PropertyRegistration {
    pub name: &'static str,
    pub factory: fn() -> Box<dyn PropertyDyn>,
}

inventory::collect!(PropertyRegistration);

// Get property by name
pub fn get_property(name: &str) -> Result<Box<dyn PropertyDyn>, anyhow::Error> {
    inventory::iter::<PropertyRegistration>()
        .find(|reg| reg.name == name)
        .map(|reg| (reg.factory)())
        .ok_or_else(|| anyhow!("Property '{}' not found", name))
}

// List all registered properties, sorted by name
pub fn list_properties() -> Vec<&'static str> {
    let mut names: Vec<&'static str> = inventory::iter::<PropertyRegistration>()
        .map(|reg| reg.name)
        .collect();
    names.sort_unstable();
    names
}

pub fn all_properties() -> Vec<Box<dyn PropertyDyn>> {
    list_properties()
        .into_iter()
        .filter_map(|name| get_property(name).ok())
        .collect()
}

/// Registers a property built against the reference word-count job.
///
/// `$property` is a `fn(WordCountJob) -> Property<_>`.
#[macro_export]
macro_rules! register_property {
    ($name:expr, $property:path) => {
        inventory::submit! {
            $crate::registry::PropertyRegistration {
                name: $name,
                factory: || Box::new($property($crate::job::WordCountJob::reference())),
            }
        }
    };
}
