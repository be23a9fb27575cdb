use std::path::PathBuf;

use serde::Deserialize;

use crate::infra::config::{
    AppConfig, AvailabilityConfig, CacheConfig, ChatConfig, LlmConfig, LogConfig,
};

#[derive(Debug, Deserialize, Default)]
pub struct FileConfig {
    pub logging: Option<FileLogConfig>,
    pub availability: Option<FileAvailabilityConfig>,
    pub cache: Option<FileCacheConfig>,
    pub llm: Option<FileLlmConfig>,
    pub chat: Option<FileChatConfig>,
}

impl FileConfig {
    pub fn merge_into(self, config: &mut AppConfig) {
        if let Some(logging) = self.logging {
            logging.merge_into(&mut config.logging);
        }

        if let Some(availability) = self.availability {
            availability.merge_into(&mut config.availability);
        }

        if let Some(cache) = self.cache {
            cache.merge_into(&mut config.cache);
        }

        if let Some(llm) = self.llm {
            llm.merge_into(&mut config.llm);
        }

        if let Some(chat) = self.chat {
            chat.merge_into(&mut config.chat);
        }
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct FileLogConfig {
    pub level: Option<String>,
    pub file: Option<PathBuf>,
}

impl FileLogConfig {
    fn merge_into(self, config: &mut LogConfig) {
        if let Some(level) = self.level {
            config.level = level;
        }

        if let Some(file) = self.file {
            config.file = Some(file);
        }
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct FileAvailabilityConfig {
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub credits: Option<String>,
    pub request_timeout_ms: Option<u64>,
}

impl FileAvailabilityConfig {
    fn merge_into(self, config: &mut AvailabilityConfig) {
        if let Some(api_key) = self.api_key {
            config.api_key = Some(api_key);
        }

        if let Some(base_url) = self.base_url {
            config.base_url = base_url;
        }

        if let Some(credits) = self.credits {
            config.credits = credits;
        }

        if let Some(timeout_ms) = self.request_timeout_ms {
            config.request_timeout_ms = Some(timeout_ms);
        }
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct FileCacheConfig {
    pub path: Option<PathBuf>,
    pub expiry_ms: Option<u64>,
}

impl FileCacheConfig {
    fn merge_into(self, config: &mut CacheConfig) {
        if let Some(path) = self.path {
            config.path = Some(path);
        }

        if let Some(expiry_ms) = self.expiry_ms {
            config.expiry_ms = expiry_ms;
        }
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct FileLlmConfig {
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub model: Option<String>,
    pub temperature: Option<f32>,
    pub history_window: Option<usize>,
}

impl FileLlmConfig {
    fn merge_into(self, config: &mut LlmConfig) {
        if let Some(api_key) = self.api_key {
            config.api_key = Some(api_key);
        }

        if let Some(base_url) = self.base_url {
            config.base_url = base_url;
        }

        if let Some(model) = self.model {
            config.model = model;
        }

        if let Some(temperature) = self.temperature {
            config.temperature = temperature;
        }

        if let Some(history_window) = self.history_window {
            config.history_window = history_window;
        }
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct FileChatConfig {
    pub default_limit: Option<usize>,
}

impl FileChatConfig {
    fn merge_into(self, config: &mut ChatConfig) {
        if let Some(default_limit) = self.default_limit {
            config.default_limit = default_limit;
        }
    }
}
