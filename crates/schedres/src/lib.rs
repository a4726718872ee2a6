pub mod internal;

pub type Error = internal::common::error::SchedError;
pub type Result<T> = std::result::Result<T, Error>;

pub mod resources {
    pub use crate::internal::common::resources::{
        ACCELERATOR_RESOURCE_NAME, CPU_RESOURCE_NAME, InsufficientResources, MEM_RESOURCE_NAME,
        MILLIS_PER_UNIT, MilliUnits, Quantity, QuantityError, ResourceLimits, ResourceList,
        ResourceListEntries, ResourceListEntry, ResourceListError, ResourceName, ResourceQuantity,
        SubtractGuard, observed,
    };

    pub use crate::internal::common::resources::limits::{
        ACCELERATOR_TOLERANCE, CPU_TOLERANCE, MEMORY_TOLERANCE, MIN_ACCELERATOR, MIN_MEMORY,
        MIN_MILLI_CPU,
    };
}
