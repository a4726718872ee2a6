use std::path::Path;

use schedres::resources::ResourceLimits;

use crate::client::output::Output;

pub struct GlobalSettings {
    limits: ResourceLimits,
    printer: Box<dyn Output>,
}

impl GlobalSettings {
    pub fn new(limits: ResourceLimits, printer: Box<dyn Output>) -> Self {
        GlobalSettings { limits, printer }
    }

    pub fn limits(&self) -> &ResourceLimits {
        &self.limits
    }

    pub fn printer(&self) -> &dyn Output {
        self.printer.as_ref()
    }
}

/// Loads resource limits from `path`, or returns the default limits.
pub fn load_limits(path: Option<&Path>) -> anyhow::Result<ResourceLimits> {
    match path {
        Some(path) => ResourceLimits::load(path).map_err(|error| {
            anyhow::anyhow!("Cannot load configuration {}: {error}", path.display())
        }),
        None => Ok(ResourceLimits::default()),
    }
}
