//! Helpers for tests running on a paused Tokio clock.

/// Yields enough times for every task woken by a timer to run to its next
/// await point. Does not move the clock; pair with `tokio::time::advance`.
pub async fn settle() {
    for _ in 0..16 {
        tokio::task::yield_now().await;
    }
}
