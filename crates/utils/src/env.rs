// Copyright 2025 zkfloat developers

/// Read boolean flag from the environment variable.
pub fn boolean_env_flag_set(flag: &str) -> bool {
	match std::env::var(flag) {
		Ok(val) => ["1", "on", "ON", "true", "TRUE", "yes", "YES"].contains(&val.as_str()),
		Err(_) => false,
	}
}

/// Read an unsigned integer from the environment variable.
///
/// Returns `None` when the variable is unset or does not parse.
pub fn usize_env_var(name: &str) -> Option<usize> {
	std::env::var(name).ok()?.trim().parse().ok()
}
