pub mod channel;
pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod parsing;
pub mod render;
pub mod server;
pub mod store;
pub mod utils;

use channel::ChatChannel;
use config::Config;
use store::ChatLog;

pub struct AppState {
    pub channel: ChatChannel,
    pub log: ChatLog,
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        Self {
            channel: ChatChannel::new(config.channel.clone(), config.channel_capacity),
            log: ChatLog::new(config.history_limit),
        }
    }
}
