/// Read-through caching against a [`Cache`](crate::db::Cache).
///
/// Returns the cached value when present. Otherwise awaits `$block`, queues
/// the result for a background write with the given TTL, and returns it.
/// A failed cache read is logged and treated as a miss, so an unreachable
/// Redis only costs the cache. Errors from `$block` are propagated with `?`.
///
/// # Arguments
/// * `$cache`: The cache instance to use for retrieval and storage.
/// * `$key`: The [`CacheKey`](crate::db::CacheKey) to read and write.
/// * `$ttl`: Time-to-live for the stored value, in seconds.
/// * `$block`: Future computing the value on a cache miss.
///
/// # Example
/// ```rust,ignore
/// let weather: WeatherCondition = cached!(cache, key, 600, async move {
///     fetch_from_api().await
/// })?;
/// ```
#[macro_export]
macro_rules! cached {
    ($cache:expr, $key:expr, $ttl:expr, $block:expr) => {{
        match $cache.get_from_cache(&$key).await {
            Ok(Some(cached)) => {
                tracing::debug!(key = %$key, "Cache hit");
                Ok(cached)
            }
            lookup => {
                if let Err(e) = lookup {
                    tracing::warn!(key = %$key, error = %e, "Cache read failed, bypassing cache");
                }
                let value = $block.await?;
                $cache.set_in_background(&$key, &value, $ttl);
                Ok(value)
            }
        }
    }};
}
