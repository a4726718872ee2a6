use std::path::Path;

use anyhow::Context;
use serde::Serialize;

use schedres::resources::{ResourceLimits, ResourceList, ResourceQuantity, observed};

use crate::client::globalsettings::GlobalSettings;
use crate::common::cli::{CompareOpts, FitOpts, SumOpts};

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct SumReport {
    pub total: ResourceQuantity,
    pub empty: bool,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Comparison {
    pub left: ResourceQuantity,
    pub right: ResourceQuantity,
    pub less: bool,
    pub less_equal: bool,
    pub can_subtract: bool,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct FitDecision {
    pub request: ResourceQuantity,
    pub admitted: bool,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct FitReport {
    pub capacity: ResourceQuantity,
    pub decisions: Vec<FitDecision>,
    pub remaining: ResourceQuantity,
    pub exhausted: bool,
}

pub fn sum_lists(lists: &[ResourceList], limits: &ResourceLimits) -> SumReport {
    let mut total = ResourceQuantity::empty();
    for list in lists {
        total.add(&ResourceQuantity::from_resource_list(list));
    }
    SumReport {
        total,
        empty: total.is_empty_within(limits),
    }
}

/// Compares `left` against `right`; `can_subtract` tells whether `left` can be
/// taken out of `right`.
pub fn compare_lists(
    left: &ResourceList,
    right: &ResourceList,
    limits: &ResourceLimits,
) -> Comparison {
    let left = ResourceQuantity::from_resource_list(left);
    let right = ResourceQuantity::from_resource_list(right);
    Comparison {
        left,
        right,
        less: left.less(&right),
        less_equal: left.less_equal_within(&right, limits),
        can_subtract: right.can_subtract_within(&left, limits),
    }
}

/// Admits requests in order. A request is admitted when it fits into the
/// remaining capacity and passes the subtract guard; admitted requests are
/// reserved from the capacity.
pub fn simulate_fit(
    capacity: ResourceQuantity,
    requests: &[ResourceQuantity],
    limits: &ResourceLimits,
) -> FitReport {
    let mut free = capacity;
    let decisions = requests
        .iter()
        .enumerate()
        .map(|(index, request)| {
            let admitted = request.less_equal_within(&free, limits)
                && free.can_subtract_within(request, limits);
            if admitted {
                observed("reserve", |r| {
                    r.sub_within(request, limits);
                })(&mut free);
            } else {
                log::debug!("Request #{index} ({request}) does not fit into {free}");
            }
            FitDecision {
                request: *request,
                admitted,
            }
        })
        .collect();
    FitReport {
        capacity,
        decisions,
        remaining: free,
        exhausted: free.is_empty_within(limits),
    }
}

pub fn load_requests_file(path: &Path) -> anyhow::Result<Vec<ResourceList>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Cannot read requests file {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Cannot parse requests file {}", path.display()))
}

pub fn command_sum(gsettings: &GlobalSettings, opts: SumOpts) -> anyhow::Result<()> {
    let report = sum_lists(&opts.lists, gsettings.limits());
    gsettings.printer().print_sum(&report);
    Ok(())
}

pub fn command_compare(gsettings: &GlobalSettings, opts: CompareOpts) -> anyhow::Result<()> {
    let comparison = compare_lists(&opts.left, &opts.right, gsettings.limits());
    gsettings.printer().print_comparison(&comparison);
    Ok(())
}

pub fn command_fit(gsettings: &GlobalSettings, opts: FitOpts) -> anyhow::Result<()> {
    let mut lists = opts.requests;
    if let Some(path) = &opts.requests_file {
        lists.extend(load_requests_file(path)?);
    }
    if lists.is_empty() {
        log::warn!("No requests were given, only the capacity will be shown");
    }
    let requests: Vec<_> = lists.iter().map(ResourceQuantity::from_resource_list).collect();
    let report = simulate_fit(
        ResourceQuantity::from_resource_list(&opts.capacity),
        &requests,
        gsettings.limits(),
    );
    gsettings.printer().print_fit_report(&report);
    Ok(())
}
