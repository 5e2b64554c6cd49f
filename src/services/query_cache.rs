// src/services/query_cache.rs

use std::{fmt::Debug, future::Future, hash::Hash, sync::Arc, time::Duration};

use dashmap::{DashMap, mapref::entry::Entry};
use futures::future::{BoxFuture, FutureExt, Shared};
use tokio::time::Instant;

// A busca compartilhada devolve o valor junto com o instante em que terminou
type SharedFetch<V> = Shared<BoxFuture<'static, (Instant, V)>>;

/// Cache de consultas por chave, no estilo do cliente do painel:
/// - chamadas simultâneas com a mesma chave compartilham uma única busca;
/// - um resultado pronto é servido até ficar mais velho que `stale_time`;
/// - quem desiste de esperar não cancela a busca dos outros.
#[derive(Clone)]
pub struct QueryCache<K, V> {
    name: &'static str,
    entries: Arc<DashMap<K, SharedFetch<V>>>,
    stale_time: Duration,
}

impl<K, V> QueryCache<K, V>
where
    K: Eq + Hash + Clone + Debug + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    pub fn new(name: &'static str, stale_time: Duration) -> Self {
        Self {
            name,
            entries: Arc::new(DashMap::new()),
            stale_time,
        }
    }

    pub async fn get_or_fetch<F, Fut>(&self, key: K, fetch: F) -> V
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = V> + Send + 'static,
    {
        let shared = match self.entries.entry(key.clone()) {
            Entry::Occupied(mut occupied) => {
                if self.is_fresh(occupied.get()) {
                    tracing::debug!(cache = self.name, ?key, "cache hit");
                    occupied.get().clone()
                } else {
                    tracing::debug!(cache = self.name, ?key, "entrada vencida, buscando de novo");
                    let shared = Self::start(fetch());
                    occupied.insert(shared.clone());
                    shared
                }
            }
            Entry::Vacant(vacant) => {
                tracing::debug!(cache = self.name, ?key, "cache miss");
                let shared = Self::start(fetch());
                vacant.insert(shared.clone());
                shared
            }
        };

        let (_, value) = shared.await;
        value
    }

    /// Descarta todas as entradas; devolve quantas havia.
    pub fn invalidate_all(&self) -> usize {
        let count = self.entries.len();
        self.entries.clear();
        count
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    fn start<Fut>(fut: Fut) -> SharedFetch<V>
    where
        Fut: Future<Output = V> + Send + 'static,
    {
        async move {
            let value = fut.await;
            (Instant::now(), value)
        }
        .boxed()
        .shared()
    }

    // Busca em andamento conta como fresca: é o que garante o dedup.
    fn is_fresh(&self, shared: &SharedFetch<V>) -> bool {
        match shared.peek() {
            None => true,
            Some((finished_at, _)) => finished_at.elapsed() < self.stale_time,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn counting_fetch(
        counter: Arc<AtomicUsize>,
        value: u32,
    ) -> impl FnOnce() -> BoxFuture<'static, u32> {
        move || {
            async move {
                tokio::time::sleep(Duration::from_millis(50)).await;
                counter.fetch_add(1, Ordering::SeqCst);
                value
            }
            .boxed()
        }
    }

    #[tokio::test(start_paused = true)]
    async fn concurrent_requests_share_one_fetch() {
        let cache: QueryCache<&'static str, u32> = QueryCache::new("test", Duration::from_secs(60));
        let calls = Arc::new(AtomicUsize::new(0));

        let (a, b, c) = tokio::join!(
            cache.get_or_fetch("metrics", counting_fetch(calls.clone(), 1)),
            cache.get_or_fetch("metrics", counting_fetch(calls.clone(), 2)),
            cache.get_or_fetch("metrics", counting_fetch(calls.clone(), 3)),
        );

        assert_eq!((a, b, c), (1, 1, 1));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn distinct_keys_fetch_separately() {
        let cache: QueryCache<u8, u32> = QueryCache::new("test", Duration::from_secs(60));
        let calls = Arc::new(AtomicUsize::new(0));

        let (a, b) = tokio::join!(
            cache.get_or_fetch(1, counting_fetch(calls.clone(), 10)),
            cache.get_or_fetch(2, counting_fetch(calls.clone(), 20)),
        );

        assert_eq!((a, b), (10, 20));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(cache.len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn fresh_values_are_reused_and_stale_ones_refetched() {
        let cache: QueryCache<(), u32> = QueryCache::new("test", Duration::from_secs(60));
        let calls = Arc::new(AtomicUsize::new(0));

        assert_eq!(cache.get_or_fetch((), counting_fetch(calls.clone(), 1)).await, 1);

        tokio::time::advance(Duration::from_secs(30)).await;
        assert_eq!(cache.get_or_fetch((), counting_fetch(calls.clone(), 2)).await, 1);
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        tokio::time::advance(Duration::from_secs(31)).await;
        assert_eq!(cache.get_or_fetch((), counting_fetch(calls.clone(), 3)).await, 3);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn dropped_caller_does_not_cancel_the_shared_fetch() {
        let cache: QueryCache<(), u32> = QueryCache::new("test", Duration::from_secs(60));
        let calls = Arc::new(AtomicUsize::new(0));

        // O primeiro desiste antes da busca terminar
        let gave_up = tokio::time::timeout(
            Duration::from_millis(10),
            cache.get_or_fetch((), counting_fetch(calls.clone(), 7)),
        )
        .await;
        assert!(gave_up.is_err());

        // O segundo reaproveita a mesma busca, que continua de onde parou
        assert_eq!(cache.get_or_fetch((), counting_fetch(calls.clone(), 8)).await, 7);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn invalidate_all_forces_a_new_fetch() {
        let cache: QueryCache<(), u32> = QueryCache::new("test", Duration::from_secs(60));
        let calls = Arc::new(AtomicUsize::new(0));

        cache.get_or_fetch((), counting_fetch(calls.clone(), 1)).await;
        cache.invalidate_all();
        assert_eq!(cache.len(), 0);

        assert_eq!(cache.get_or_fetch((), counting_fetch(calls.clone(), 2)).await, 2);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }
}
