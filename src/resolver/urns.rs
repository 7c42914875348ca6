//! Flattens a pipeline configuration into the URNs it references.

use crate::spirit::{ActorConfig, SpiritConfig};

/// Collect every referenced URN. Order follows the configuration layout and
/// duplicates are kept; only URN identity matters downstream.
pub fn extract_urns(config: &SpiritConfig) -> Vec<String> {
    let mut urns: Vec<String> = config
        .actor_groups()
        .iter()
        .flat_map(|group| group.iter())
        .map(|actor| actor.urn.clone())
        .collect();

    for pool in &config.reader_pools {
        urns.extend(pool_urns(&pool.actor, pool.reader.as_ref()));
    }

    for pool in &config.writer_pools {
        urns.extend(pool_urns(&pool.actor, pool.writer.as_ref()));
    }

    urns
}

fn pool_urns<'a>(
    pool: &'a ActorConfig,
    member: Option<&'a ActorConfig>,
) -> impl Iterator<Item = String> + 'a {
    std::iter::once(pool)
        .chain(member)
        .map(|actor| actor.urn.clone())
}
