use crate::internal::cluster::manager::ClusterResourceManagerRef;
use std::time::Instant;

/// Periodically replays stale node snapshots over the local resource view.
///
/// Has to be spawned (via `spawn_local`) on the same `LocalSet` as every other task that
/// mutates the manager, so a refresh never interleaves with a mutation.
/// The refresh interval of the manager has to be nonzero.
pub async fn resource_view_refresh_process(manager_ref: ClusterResourceManagerRef) {
    let refresh_interval = manager_ref.get().refresh_interval();
    log::debug!("Resource view refresh interval: {refresh_interval:?}");
    let mut interval = tokio::time::interval(refresh_interval);
    loop {
        interval.tick().await;
        let replayed = manager_ref.get_mut().refresh_stale_views(Instant::now());
        if replayed > 0 {
            log::debug!("Replayed {replayed} stale node view(s)");
        }
    }
}
