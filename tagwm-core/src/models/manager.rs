use std::sync::{atomic::AtomicBool, Arc};

use crate::config::Config;
use crate::display_servers::DisplayServer;
use crate::state::State;
use crate::utils::child_process::Children;

/// Owns the whole program: the state the handlers mutate, the loaded
/// configuration, the processes we spawned, and the connection to the
/// display.
pub struct Manager<C, SERVER> {
    pub state: State,
    pub config: C,

    pub(crate) children: Children,
    pub(crate) reap_requested: Arc<AtomicBool>,
    pub display_server: SERVER,
}

impl<C, SERVER> Manager<C, SERVER>
where
    C: Config,
    SERVER: DisplayServer,
{
    pub fn new(config: C) -> Self {
        let display_server = SERVER::new(&config);
        Self {
            state: State::new(&config),
            config,
            children: Children::default(),
            reap_requested: Arc::default(),
            display_server,
        }
    }

    pub fn register_child_hook(&self) {
        crate::utils::child_process::register_child_hook(self.reap_requested.clone());
    }
}

#[cfg(test)]
impl Manager<crate::config::TestConfig, crate::display_servers::MockDisplayServer> {
    pub fn new_test(tags: Vec<String>) -> Self {
        Self::new(crate::config::TestConfig {
            tags,
            ..Default::default()
        })
    }

    pub fn new_test_with_config(config: crate::config::TestConfig) -> Self {
        Self::new(config)
    }
}
