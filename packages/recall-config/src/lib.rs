mod error;
mod types;

pub use error::{Error, Result};
pub use types::{Config, EmbeddingConfig, ProvisionPolicy, StoreConfig};

use std::{fs, path::Path};

pub fn load(path: &Path) -> Result<Config> {
	let raw = fs::read_to_string(path)
		.map_err(|err| Error::ReadConfig { path: path.to_path_buf(), source: err })?;

	let mut cfg: Config = toml::from_str(&raw)
		.map_err(|err| Error::ParseConfig { path: path.to_path_buf(), source: err })?;

	normalize(&mut cfg);

	validate(&cfg)?;

	Ok(cfg)
}

pub fn validate(cfg: &Config) -> Result<()> {
	for (label, value) in [
		("store.url", &cfg.store.url),
		("store.ideas_collection", &cfg.store.ideas_collection),
		("store.memories_collection", &cfg.store.memories_collection),
		("embedding.api_base", &cfg.embedding.api_base),
		("embedding.api_key", &cfg.embedding.api_key),
		("embedding.path", &cfg.embedding.path),
		("embedding.model", &cfg.embedding.model),
	] {
		if value.trim().is_empty() {
			return Err(Error::Validation { message: format!("{label} must be non-empty.") });
		}
	}

	if cfg.store.ideas_collection == cfg.store.memories_collection {
		return Err(Error::Validation {
			message: "store.ideas_collection and store.memories_collection must differ."
				.to_string(),
		});
	}
	if cfg.store.vector_dim == 0 {
		return Err(Error::Validation {
			message: "store.vector_dim must be greater than zero.".to_string(),
		});
	}
	if cfg.embedding.dimensions != cfg.store.vector_dim {
		return Err(Error::Validation {
			message: "embedding.dimensions must match store.vector_dim.".to_string(),
		});
	}
	if cfg.embedding.timeout_ms == 0 {
		return Err(Error::Validation {
			message: "embedding.timeout_ms must be greater than zero.".to_string(),
		});
	}

	Ok(())
}

fn normalize(cfg: &mut Config) {
	while cfg.embedding.api_base.ends_with('/') {
		cfg.embedding.api_base.pop();
	}

	if !cfg.embedding.path.is_empty() && !cfg.embedding.path.starts_with('/') {
		cfg.embedding.path.insert(0, '/');
	}
}
