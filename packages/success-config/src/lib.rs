mod error;
mod types;

pub use error::{Error, Result};
pub use types::{
	Assistant, Config, LlmProviderConfig, Postgres, Providers, Search, Security, Service, Storage,
};

use std::{fs, net::SocketAddr, path::Path};

pub fn load(path: &Path) -> Result<Config> {
	let raw = fs::read_to_string(path)
		.map_err(|err| Error::ReadConfig { path: path.to_path_buf(), source: err })?;

	parse(&raw).map_err(|err| match err {
		Error::ParseConfig { source, .. } => Error::ParseConfig { path: path.to_path_buf(), source },
		other => other,
	})
}

pub fn parse(raw: &str) -> Result<Config> {
	let mut cfg: Config = toml::from_str(raw)
		.map_err(|err| Error::ParseConfig { path: Default::default(), source: err })?;

	normalize(&mut cfg);

	validate(&cfg)?;

	Ok(cfg)
}

pub fn validate(cfg: &Config) -> Result<()> {
	let bind = cfg.service.http_bind.trim();

	if bind.is_empty() {
		return Err(Error::Validation {
			message: "service.http_bind must be non-empty.".to_string(),
		});
	}

	let addr: SocketAddr = bind.parse().map_err(|_| Error::Validation {
		message: "service.http_bind must be a socket address such as 127.0.0.1:8000.".to_string(),
	})?;

	if cfg.security.bind_localhost_only && !addr.ip().is_loopback() {
		return Err(Error::Validation {
			message: "service.http_bind must be a loopback address when security.bind_localhost_only is true."
				.to_string(),
		});
	}
	if cfg.storage.postgres.dsn.trim().is_empty() {
		return Err(Error::Validation {
			message: "storage.postgres.dsn must be non-empty.".to_string(),
		});
	}
	if cfg.storage.postgres.pool_max_conns == 0 {
		return Err(Error::Validation {
			message: "storage.postgres.pool_max_conns must be greater than zero.".to_string(),
		});
	}
	if !cfg.search.click_boost_weight.is_finite() {
		return Err(Error::Validation {
			message: "search.click_boost_weight must be a finite number.".to_string(),
		});
	}
	if cfg.search.click_boost_weight < 0.0 {
		return Err(Error::Validation {
			message: "search.click_boost_weight must be zero or greater.".to_string(),
		});
	}

	let llm = &cfg.providers.llm;

	for (label, value) in [
		("providers.llm.api_base", &llm.api_base),
		("providers.llm.api_key", &llm.api_key),
		("providers.llm.model", &llm.model),
	] {
		if value.trim().is_empty() {
			return Err(Error::Validation { message: format!("{label} must be non-empty.") });
		}
	}

	if !llm.temperature.is_finite() || !(0.0..=2.0).contains(&llm.temperature) {
		return Err(Error::Validation {
			message: "providers.llm.temperature must be in the range 0.0-2.0.".to_string(),
		});
	}
	if llm.timeout_ms == 0 {
		return Err(Error::Validation {
			message: "providers.llm.timeout_ms must be greater than zero.".to_string(),
		});
	}
	if cfg.assistant.copy_editors.is_empty() {
		return Err(Error::Validation {
			message: "assistant.copy_editors must define at least one editor.".to_string(),
		});
	}
	if !cfg.assistant.copy_editors.contains_key(&cfg.assistant.default_copy_editor) {
		return Err(Error::Validation {
			message: "assistant.default_copy_editor must name an entry in assistant.copy_editors."
				.to_string(),
		});
	}

	for (name, prompt) in &cfg.assistant.copy_editors {
		if prompt.trim().is_empty() {
			return Err(Error::Validation {
				message: format!("assistant.copy_editors.{name} must be non-empty."),
			});
		}
	}

	Ok(())
}

fn normalize(cfg: &mut Config) {
	cfg.service.http_bind = cfg.service.http_bind.trim().to_string();
	cfg.assistant.default_copy_editor = cfg.assistant.default_copy_editor.trim().to_lowercase();
	cfg.assistant.copy_editors = std::mem::take(&mut cfg.assistant.copy_editors)
		.into_iter()
		.map(|(name, prompt)| (name.trim().to_lowercase(), prompt))
		.collect();

	if cfg.providers.llm.path.trim().is_empty() {
		cfg.providers.llm.path = "/v1/chat/completions".to_string();
	}
}
