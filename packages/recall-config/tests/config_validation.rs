use std::{
	env, fs,
	path::PathBuf,
	sync::atomic::{AtomicU64, Ordering},
	time::{SystemTime, UNIX_EPOCH},
};

use toml::Value;

use recall_config::{Config, ProvisionPolicy};

const SAMPLE_CONFIG_TOML: &str = include_str!("fixtures/sample_config.toml");

fn sample_with<F>(edit: F) -> String
where
	F: FnOnce(&mut toml::Table),
{
	let mut value: Value =
		toml::from_str(SAMPLE_CONFIG_TOML).expect("Failed to parse sample config.");
	let root = value.as_table_mut().expect("Sample config must be a table.");

	edit(root);

	toml::to_string(&value).expect("Failed to render sample config.")
}

fn write_temp_config(payload: String) -> PathBuf {
	static COUNTER: AtomicU64 = AtomicU64::new(0);

	let nanos = SystemTime::now()
		.duration_since(UNIX_EPOCH)
		.expect("System time must be valid.")
		.as_nanos();
	let ordinal = COUNTER.fetch_add(1, Ordering::SeqCst);
	let pid = std::process::id();
	let mut path = env::temp_dir();

	path.push(format!("recall_config_test_{nanos}_{pid}_{ordinal}.toml"));

	fs::write(&path, payload).expect("Failed to write test config.");

	path
}

fn load(payload: String) -> recall_config::Result<Config> {
	let path = write_temp_config(payload);
	let result = recall_config::load(&path);

	fs::remove_file(&path).expect("Failed to remove test config.");

	result
}

#[test]
fn sample_config_is_valid() {
	let cfg = load(SAMPLE_CONFIG_TOML.to_string()).expect("Expected sample config to load.");

	assert_eq!(cfg.store.vector_dim, 8);
	assert_eq!(cfg.store.on_start, ProvisionPolicy::Ensure);
	assert_eq!(cfg.embedding.path, "/v1/embeddings");
	assert_eq!(cfg.embedding.timeout_ms, 10_000);
}

#[test]
fn vector_dim_must_be_positive() {
	let payload = sample_with(|root| {
		let store = root.get_mut("store").and_then(Value::as_table_mut).expect("[store]");

		store.insert("vector_dim".to_string(), Value::Integer(0));

		let embedding =
			root.get_mut("embedding").and_then(Value::as_table_mut).expect("[embedding]");

		embedding.insert("dimensions".to_string(), Value::Integer(0));
	});
	let err = load(payload).expect_err("Expected vector_dim validation error.");

	assert!(
		err.to_string().contains("store.vector_dim must be greater than zero."),
		"Unexpected error: {err}"
	);
}

#[test]
fn embedding_dimensions_must_match_vector_dim() {
	let payload = sample_with(|root| {
		let embedding =
			root.get_mut("embedding").and_then(Value::as_table_mut).expect("[embedding]");

		embedding.insert("dimensions".to_string(), Value::Integer(16));
	});
	let err = load(payload).expect_err("Expected dimension mismatch error.");

	assert!(
		err.to_string().contains("embedding.dimensions must match store.vector_dim."),
		"Unexpected error: {err}"
	);
}

#[test]
fn api_key_must_be_non_empty() {
	let payload = sample_with(|root| {
		let embedding =
			root.get_mut("embedding").and_then(Value::as_table_mut).expect("[embedding]");

		embedding.insert("api_key".to_string(), Value::String("  ".to_string()));
	});
	let err = load(payload).expect_err("Expected api_key validation error.");

	assert!(
		err.to_string().contains("embedding.api_key must be non-empty."),
		"Unexpected error: {err}"
	);
}

#[test]
fn collections_must_differ() {
	let payload = sample_with(|root| {
		let store = root.get_mut("store").and_then(Value::as_table_mut).expect("[store]");

		store.insert("memories_collection".to_string(), Value::String("recall_ideas".to_string()));
	});
	let err = load(payload).expect_err("Expected collection name validation error.");

	assert!(
		err.to_string()
			.contains("store.ideas_collection and store.memories_collection must differ."),
		"Unexpected error: {err}"
	);
}

#[test]
fn provision_policy_parses_and_rejects_unknown_values() {
	let payload = sample_with(|root| {
		let store = root.get_mut("store").and_then(Value::as_table_mut).expect("[store]");

		store.insert("on_start".to_string(), Value::String("recreate".to_string()));
	});
	let cfg = load(payload).expect("Expected recreate policy to load.");

	assert_eq!(cfg.store.on_start, ProvisionPolicy::Recreate);

	let payload = sample_with(|root| {
		let store = root.get_mut("store").and_then(Value::as_table_mut).expect("[store]");

		store.insert("on_start".to_string(), Value::String("wipe".to_string()));
	});

	assert!(load(payload).is_err(), "Expected unknown provision policy to fail parsing.");
}

#[test]
fn api_base_and_path_are_normalized() {
	let payload = sample_with(|root| {
		let embedding =
			root.get_mut("embedding").and_then(Value::as_table_mut).expect("[embedding]");

		embedding.insert("api_base".to_string(), Value::String("https://example.test/".to_string()));
		embedding.insert("path".to_string(), Value::String("v2/embeddings".to_string()));
	});
	let cfg = load(payload).expect("Expected normalized config to load.");

	assert_eq!(cfg.embedding.api_base, "https://example.test");
	assert_eq!(cfg.embedding.path, "/v2/embeddings");
}
