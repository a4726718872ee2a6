use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::internal::common::resources::list::ResourceListError;
use crate::internal::common::resources::{
    ResourceLimits, ResourceList, ResourceName, SubtractGuard,
};

#[derive(Debug, Error, Clone, PartialEq)]
#[error("Resource is not sufficient to do operation: sub() (available: {available}; requested: {requested})")]
pub struct InsufficientResources {
    pub available: ResourceQuantity,
    pub requested: ResourceQuantity,
}

/// Amount of CPU, memory and accelerators held or demanded by a workload.
///
/// Fields are floating point numbers, sums of many quantities drift, so the
/// comparisons use thresholds and tolerances from [`ResourceLimits`].
/// There is no internal synchronization; the owner serializes mutation.
#[derive(Serialize, Deserialize, Debug, Default, Clone, Copy, PartialEq)]
pub struct ResourceQuantity {
    pub milli_cpu: f64,
    pub memory: f64,
    pub accelerator: f64,
}

impl ResourceQuantity {
    pub fn new(milli_cpu: f64, memory: f64, accelerator: f64) -> Self {
        ResourceQuantity {
            milli_cpu,
            memory,
            accelerator,
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// Sums every cpu, memory and accelerator entry of the list.
    /// Other resource names are ignored.
    pub fn from_resource_list(list: &ResourceList) -> Self {
        let mut resource = Self::empty();
        for entry in list {
            match &entry.name {
                ResourceName::Cpu => resource.milli_cpu += entry.quantity.milli_value() as f64,
                ResourceName::Memory => resource.memory += entry.quantity.value() as f64,
                ResourceName::Accelerator => {
                    resource.accelerator += entry.quantity.value() as f64
                }
                ResourceName::Other(name) => {
                    log::trace!("Ignoring resource '{name}' ({})", entry.quantity)
                }
            }
        }
        resource
    }

    pub fn is_empty(&self) -> bool {
        self.is_empty_within(&ResourceLimits::DEFAULT)
    }

    /// True when every axis is below its minimum.
    pub fn is_empty_within(&self, limits: &ResourceLimits) -> bool {
        self.milli_cpu < limits.min_milli_cpu
            && self.memory < limits.min_memory
            && self.accelerator < limits.min_accelerator
    }

    pub fn add(&mut self, other: &ResourceQuantity) -> &mut Self {
        self.milli_cpu += other.milli_cpu;
        self.memory += other.memory;
        self.accelerator += other.accelerator;
        self
    }

    /// Subtracts `other` in place.
    ///
    /// # Panics
    /// When [`ResourceQuantity::can_subtract`] does not hold. Callers are
    /// expected to check feasibility first; use [`ResourceQuantity::try_sub`]
    /// where failing is an expected outcome.
    pub fn sub(&mut self, other: &ResourceQuantity) -> &mut Self {
        self.sub_within(other, &ResourceLimits::DEFAULT)
    }

    /// Like [`ResourceQuantity::sub`], guarded by the policy of `limits`.
    pub fn sub_within(&mut self, other: &ResourceQuantity, limits: &ResourceLimits) -> &mut Self {
        if !self.can_subtract_within(other, limits) {
            panic!(
                "Resource is not sufficient to do operation: sub() ({} < {})",
                self, other
            );
        }
        self.sub_unchecked(other)
    }

    pub fn try_sub(
        &mut self,
        other: &ResourceQuantity,
        limits: &ResourceLimits,
    ) -> Result<&mut Self, InsufficientResources> {
        if self.can_subtract_within(other, limits) {
            Ok(self.sub_unchecked(other))
        } else {
            Err(InsufficientResources {
                available: *self,
                requested: *other,
            })
        }
    }

    fn sub_unchecked(&mut self, other: &ResourceQuantity) -> &mut Self {
        self.milli_cpu -= other.milli_cpu;
        self.memory -= other.memory;
        self.accelerator -= other.accelerator;
        self
    }

    /// The guard of [`ResourceQuantity::sub`].
    pub fn can_subtract(&self, other: &ResourceQuantity) -> bool {
        self.can_subtract_within(other, &ResourceLimits::DEFAULT)
    }

    pub fn can_subtract_within(&self, other: &ResourceQuantity, limits: &ResourceLimits) -> bool {
        match limits.subtract_guard {
            SubtractGuard::NotLess => !self.less(other),
            SubtractGuard::Sufficient => other.less_equal_within(self, limits),
        }
    }

    /// Strictly smaller on every axis.
    pub fn less(&self, other: &ResourceQuantity) -> bool {
        self.milli_cpu < other.milli_cpu
            && self.memory < other.memory
            && self.accelerator < other.accelerator
    }

    pub fn less_equal(&self, other: &ResourceQuantity) -> bool {
        self.less_equal_within(other, &ResourceLimits::DEFAULT)
    }

    /// On every axis smaller, or equal up to the axis tolerance.
    pub fn less_equal_within(&self, other: &ResourceQuantity, limits: &ResourceLimits) -> bool {
        fn axis(value: f64, other: f64, tolerance: f64) -> bool {
            value < other || (other - value).abs() < tolerance
        }

        axis(self.milli_cpu, other.milli_cpu, limits.cpu_tolerance)
            && axis(self.memory, other.memory, limits.memory_tolerance)
            && axis(self.accelerator, other.accelerator, limits.accelerator_tolerance)
    }
}

impl From<&ResourceList> for ResourceQuantity {
    fn from(list: &ResourceList) -> Self {
        Self::from_resource_list(list)
    }
}

impl FromStr for ResourceQuantity {
    type Err = ResourceListError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_resource_list(&input.parse::<ResourceList>()?))
    }
}

impl fmt::Display for ResourceQuantity {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "cpu {:.6}, memory {:.6}, accelerator {:.6}",
            self.milli_cpu, self.memory, self.accelerator
        )
    }
}
