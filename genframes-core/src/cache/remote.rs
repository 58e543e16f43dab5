//! Redis-backed cache with per-operation fallback to the local map

use super::{CacheStore, MemoryCache};
use async_trait::async_trait;
use log::warn;
use redis::aio::MultiplexedConnection;
use redis::{AsyncCommands, RedisResult};
use std::future::Future;
use std::time::Duration;

/// Upper bound on a single command round trip once connected
pub const OP_TIMEOUT: Duration = Duration::from_secs(2);

/// Networked cache. Any Redis error or stalled reply is logged and the
/// operation is served by the embedded `MemoryCache` instead.
pub struct RedisCache {
    conn: MultiplexedConnection,
    fallback: MemoryCache,
    op_timeout: Duration,
}

impl RedisCache {
    /// Open a multiplexed connection and verify it with `PING`
    pub async fn connect(url: &str) -> RedisResult<Self> {
        let client = redis::Client::open(url)?;
        let mut conn = client.get_multiplexed_async_connection().await?;
        let _: String = redis::cmd("PING").query_async(&mut conn).await?;
        Ok(Self {
            conn,
            fallback: MemoryCache::new(),
            op_timeout: OP_TIMEOUT,
        })
    }

    pub fn with_op_timeout(mut self, op_timeout: Duration) -> Self {
        self.op_timeout = op_timeout;
        self
    }

    /// Await one command; `None` when it failed or did not answer in time
    async fn bounded<T>(&self, op: &str, call: impl Future<Output = RedisResult<T>>) -> Option<T> {
        match tokio::time::timeout(self.op_timeout, call).await {
            Ok(Ok(value)) => Some(value),
            Ok(Err(e)) => {
                warn!("Redis {} error: {}", op, e);
                None
            }
            Err(_) => {
                warn!("Redis {} timed out after {:?}", op, self.op_timeout);
                None
            }
        }
    }
}

#[async_trait]
impl CacheStore for RedisCache {
    async fn get(&self, key: &str) -> Option<String> {
        let mut conn = self.conn.clone();
        match self.bounded("get", conn.get::<_, Option<String>>(key)).await {
            Some(Some(value)) => Some(value),
            _ => self.fallback.get_local(key),
        }
    }

    async fn set(&self, key: &str, value: &str, ttl: Duration) {
        let mut conn = self.conn.clone();
        // EX 0 is rejected by Redis
        let seconds = ttl.as_secs().max(1);
        if self
            .bounded("set", conn.set_ex::<_, _, ()>(key, value, seconds))
            .await
            .is_none()
        {
            self.fallback.set_local(key, value);
        }
    }

    async fn exists(&self, key: &str) -> bool {
        let mut conn = self.conn.clone();
        match self.bounded("exists", conn.exists::<_, bool>(key)).await {
            Some(true) => true,
            _ => self.fallback.exists_local(key),
        }
    }

    async fn delete(&self, key: &str) {
        let mut conn = self.conn.clone();
        self.bounded("delete", conn.del::<_, ()>(key)).await;
        self.fallback.delete_local(key);
    }

    async fn ping(&self) -> bool {
        let mut conn = self.conn.clone();
        let pong = async {
            let reply: RedisResult<String> = redis::cmd("PING").query_async(&mut conn).await;
            reply
        };
        self.bounded("ping", pong).await.is_some()
    }

    fn backend_name(&self) -> &'static str {
        "redis"
    }
}
