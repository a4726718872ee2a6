use crate::internal::common::resources::ResourceQuantity;

/// Wraps an operation on a resource quantity so that its start and end are logged.
///
/// Meant for the call sites of the owner of the quantity, e.g.
/// `observed("reserve", |r| { r.sub(&request); })(&mut node_free)`.
pub fn observed<'a, F>(name: &'a str, operation: F) -> impl Fn(&mut ResourceQuantity) + 'a
where
    F: Fn(&mut ResourceQuantity) + 'a,
{
    move |resource: &mut ResourceQuantity| {
        log::debug!("starting {name} ({resource})");
        operation(resource);
        log::debug!("completed {name} ({resource})");
    }
}
