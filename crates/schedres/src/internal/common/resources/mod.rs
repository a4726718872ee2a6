pub mod capacity;
pub mod hook;
pub mod limits;
pub mod list;
pub mod quantity;

pub use capacity::{InsufficientResources, ResourceQuantity};
pub use hook::observed;
pub use limits::{ResourceLimits, SubtractGuard};
pub use list::{
    ACCELERATOR_RESOURCE_NAME, CPU_RESOURCE_NAME, MEM_RESOURCE_NAME, ResourceList,
    ResourceListEntries, ResourceListEntry, ResourceListError, ResourceName,
};
pub use quantity::{MILLIS_PER_UNIT, MilliUnits, Quantity, QuantityError};
