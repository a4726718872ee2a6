use std::fmt;
use std::str::FromStr;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use smallvec::SmallVec;
use thiserror::Error;

use crate::internal::common::resources::{Quantity, QuantityError};

pub const CPU_RESOURCE_NAME: &str = "cpu";
pub const MEM_RESOURCE_NAME: &str = "memory";
pub const ACCELERATOR_RESOURCE_NAME: &str = "accelerator-count";

/// Name of a resource in a resource list.
///
/// Names that are not recognized are kept as [`ResourceName::Other`], the
/// vocabulary of the producer of resource lists may be larger than ours.
#[derive(Debug, Clone, Hash, Eq, PartialEq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ResourceName {
    Cpu,
    Memory,
    Accelerator,
    Other(String),
}

impl ResourceName {
    pub fn as_str(&self) -> &str {
        match self {
            ResourceName::Cpu => CPU_RESOURCE_NAME,
            ResourceName::Memory => MEM_RESOURCE_NAME,
            ResourceName::Accelerator => ACCELERATOR_RESOURCE_NAME,
            ResourceName::Other(name) => name,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, ResourceName::Other(_))
    }
}

impl From<&str> for ResourceName {
    fn from(name: &str) -> Self {
        match name {
            CPU_RESOURCE_NAME => ResourceName::Cpu,
            MEM_RESOURCE_NAME => ResourceName::Memory,
            ACCELERATOR_RESOURCE_NAME => ResourceName::Accelerator,
            _ => ResourceName::Other(name.to_string()),
        }
    }
}

impl From<String> for ResourceName {
    fn from(name: String) -> Self {
        match ResourceName::from(name.as_str()) {
            ResourceName::Other(_) => ResourceName::Other(name),
            known => known,
        }
    }
}

impl From<ResourceName> for String {
    fn from(name: ResourceName) -> Self {
        match name {
            ResourceName::Other(name) => name,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for ResourceName {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ResourceListError {
    #[error("invalid resource entry '{0}', expected <name>=<quantity>")]
    InvalidEntry(String),
    #[error("invalid amount of resource '{name}': {error}")]
    InvalidQuantity { name: String, error: QuantityError },
}

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct ResourceListEntry {
    pub name: ResourceName,
    pub quantity: Quantity,
}

pub type ResourceListEntries = SmallVec<[ResourceListEntry; 3]>;

/// Resource names mapped to quantities, in insertion order.
/// A name may occur more than once.
#[derive(Default, Debug, Clone, Eq, PartialEq)]
pub struct ResourceList {
    entries: ResourceListEntries,
}

impl ResourceList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push<N: Into<ResourceName>>(&mut self, name: N, quantity: Quantity) {
        self.entries.push(ResourceListEntry {
            name: name.into(),
            quantity,
        });
    }

    #[inline]
    pub fn entries(&self) -> &[ResourceListEntry] {
        &self.entries
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all entries with the given name.
    pub fn total(&self, name: &ResourceName) -> Quantity {
        self.entries
            .iter()
            .filter(|entry| &entry.name == name)
            .map(|entry| entry.quantity)
            .sum()
    }
}

/// Parses `name=quantity` items separated by commas, e.g. `cpu=500m,memory=1Gi`.
impl FromStr for ResourceList {
    type Err = ResourceListError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let mut list = ResourceList::new();
        if input.trim().is_empty() {
            return Ok(list);
        }
        for item in input.split(',') {
            let item = item.trim();
            let (name, quantity) = item
                .split_once('=')
                .map(|(name, quantity)| (name.trim(), quantity.trim()))
                .filter(|(name, _)| !name.is_empty())
                .ok_or_else(|| ResourceListError::InvalidEntry(item.to_string()))?;
            let quantity = quantity.parse::<Quantity>().map_err(|error| {
                ResourceListError::InvalidQuantity {
                    name: name.to_string(),
                    error,
                }
            })?;
            list.push(name, quantity);
        }
        Ok(list)
    }
}

impl fmt::Display for ResourceList {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for (i, entry) in self.entries.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{}={}", entry.name, entry.quantity)?;
        }
        Ok(())
    }
}

impl<N: Into<ResourceName>> FromIterator<(N, Quantity)> for ResourceList {
    fn from_iter<I: IntoIterator<Item = (N, Quantity)>>(iter: I) -> Self {
        let mut list = ResourceList::new();
        list.extend(iter);
        list
    }
}

impl<N: Into<ResourceName>> Extend<(N, Quantity)> for ResourceList {
    fn extend<I: IntoIterator<Item = (N, Quantity)>>(&mut self, iter: I) {
        for (name, quantity) in iter {
            self.push(name, quantity);
        }
    }
}

impl<'a> IntoIterator for &'a ResourceList {
    type Item = &'a ResourceListEntry;
    type IntoIter = std::slice::Iter<'a, ResourceListEntry>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Serialized as a map `{ "cpu": "500m", ... }`.
impl Serialize for ResourceList {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for entry in &self.entries {
            map.serialize_entry(entry.name.as_str(), &entry.quantity)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for ResourceList {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct ResourceListVisitor;

        impl<'de> Visitor<'de> for ResourceListVisitor {
            type Value = ResourceList;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of resource names to quantities")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut list = ResourceList::new();
                while let Some((name, quantity)) = access.next_entry::<String, Quantity>()? {
                    list.push(name, quantity);
                }
                Ok(list)
            }
        }

        deserializer.deserialize_map(ResourceListVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn q(input: &str) -> Quantity {
        input.parse().unwrap()
    }

    #[test]
    fn test_resource_names() {
        assert_eq!(ResourceName::from("cpu"), ResourceName::Cpu);
        assert_eq!(ResourceName::from("memory"), ResourceName::Memory);
        assert_eq!(
            ResourceName::from("accelerator-count"),
            ResourceName::Accelerator
        );
        let other = ResourceName::from("ephemeral-storage".to_string());
        assert_eq!(other, ResourceName::Other("ephemeral-storage".to_string()));
        assert!(!other.is_known());
        assert_eq!(other.to_string(), "ephemeral-storage");
        assert_eq!(ResourceName::Accelerator.to_string(), "accelerator-count");
    }

    #[test]
    fn test_parse_list() {
        let list: ResourceList = "cpu=500m, memory = 256Mi,accelerator-count=2,cpu=1"
            .parse()
            .unwrap();
        assert_eq!(list.len(), 4);
        assert_eq!(list.total(&ResourceName::Cpu), q("1500m"));
        assert_eq!(list.total(&ResourceName::Memory), q("256Mi"));
        assert_eq!(list.total(&ResourceName::Accelerator), q("2"));
        assert_eq!(list.to_string(), "cpu=500m,memory=268435456,accelerator-count=2,cpu=1");
    }

    #[test]
    fn test_parse_empty_list() {
        assert!("".parse::<ResourceList>().unwrap().is_empty());
        assert!("  ".parse::<ResourceList>().unwrap().is_empty());
    }

    #[test]
    fn test_parse_list_invalid() {
        assert_eq!(
            "cpu".parse::<ResourceList>(),
            Err(ResourceListError::InvalidEntry("cpu".to_string()))
        );
        assert_eq!(
            "cpu=1,".parse::<ResourceList>(),
            Err(ResourceListError::InvalidEntry("".to_string()))
        );
        assert_eq!(
            "=1".parse::<ResourceList>(),
            Err(ResourceListError::InvalidEntry("=1".to_string()))
        );
        assert_eq!(
            "memory=lots".parse::<ResourceList>(),
            Err(ResourceListError::InvalidQuantity {
                name: "memory".to_string(),
                error: QuantityError::Malformed("lots".to_string())
            })
        );
    }

    #[test]
    fn test_list_error_messages() {
        let error = "cpu=1,gpu".parse::<ResourceList>().unwrap_err();
        insta::assert_snapshot!(error.to_string(), @"invalid resource entry 'gpu', expected <name>=<quantity>");
        let error = "memory=12Qi".parse::<ResourceList>().unwrap_err();
        insta::assert_snapshot!(error.to_string(), @"invalid amount of resource 'memory': cannot parse '12Qi' as a quantity");
    }

    #[test]
    fn test_list_json() {
        let list: ResourceList =
            serde_json::from_str(r#"{"cpu": "250m", "gpu-model": "7", "memory": 1024}"#).unwrap();
        assert_eq!(
            list.entries()
                .iter()
                .map(|e| e.name.as_str())
                .collect::<Vec<_>>(),
            vec!["cpu", "gpu-model", "memory"]
        );
        assert_eq!(list.total(&ResourceName::Memory), q("1Ki"));
        assert_eq!(
            serde_json::to_string(&list).unwrap(),
            r#"{"cpu":"250m","gpu-model":"7","memory":"1024"}"#
        );
    }

    #[test]
    fn test_list_json_duplicate_keys_are_kept() {
        let list: ResourceList = serde_json::from_str(r#"{"cpu": "1", "cpu": "2"}"#).unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(list.total(&ResourceName::Cpu), q("3"));
    }

    #[test]
    fn test_list_from_iter() {
        let list: ResourceList = [("cpu", q("1")), ("unknown", q("5"))].into_iter().collect();
        assert_eq!(list.total(&ResourceName::Cpu), q("1"));
        assert_eq!(
            list.total(&ResourceName::Other("unknown".to_string())),
            q("5")
        );
        assert_eq!(list.total(&ResourceName::Memory), Quantity::ZERO);
    }
}
