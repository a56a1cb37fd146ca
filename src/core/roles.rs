//! Purpose: Apply the `role` field to the registered dimension descriptors.
//! Exports: `assign_roles`.
//! Role: Linking step between collection and validation.
//! Invariants: Pairs are applied in role-map arrival order, then id-list order.
//! Invariants: A later role for the same dimension overwrites the earlier one; no conflict is raised.
use crate::core::dimension::Role;
use crate::core::error::{Error, ErrorKind};
use crate::core::registry::DimensionRegistry;
use tracing::trace;

pub fn assign_roles(
    registry: &mut DimensionRegistry,
    roles: &[(String, Vec<String>)],
) -> Result<(), Error> {
    for (name, ids) in roles {
        for id in ids {
            let role: Role = name.parse()?;
            let descriptor = registry.get_mut(id).ok_or_else(|| {
                Error::new(ErrorKind::UnknownDimension)
                    .with_message(format!(
                        "could not assign role `{role}` to dimension `{id}`: the dimension does not exist"
                    ))
                    .with_field("role")
                    .with_role(name.as_str())
                    .with_dimension(id.as_str())
                    .with_hint("Every id listed under `role` must be a key of `dimension`.")
            })?;
            if let Some(previous) = descriptor.role {
                trace!(dimension = %id, %previous, %role, "role overwritten");
            }
            descriptor.with_role(role);
        }
    }
    Ok(())
}
