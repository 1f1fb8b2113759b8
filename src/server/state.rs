use axum::extract::FromRef;

use crate::part_store::PartImageStore;
use std::sync::Arc;
use std::time::Instant;

use super::ServerConfig;

pub type GuardedPartStore = Arc<dyn PartImageStore>;

#[derive(Clone)]
pub struct ServerState {
    pub config: ServerConfig,
    pub start_time: Instant,
    pub part_store: GuardedPartStore,
    pub hash: String,
}

impl ServerState {
    pub fn new(config: ServerConfig, part_store: GuardedPartStore) -> ServerState {
        ServerState {
            config,
            start_time: Instant::now(),
            part_store,
            hash: env!("GIT_HASH").to_owned(),
        }
    }
}

impl FromRef<ServerState> for GuardedPartStore {
    fn from_ref(input: &ServerState) -> Self {
        input.part_store.clone()
    }
}

impl FromRef<ServerState> for ServerConfig {
    fn from_ref(input: &ServerState) -> Self {
        input.config.clone()
    }
}
