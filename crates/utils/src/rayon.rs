// Copyright 2025 zkfloat developers

use std::sync::OnceLock;

use crate::env::usize_env_var;

/// Environment variable that sets the size of the global thread pool.
pub const THREADS_ENV_VAR: &str = "ZKFLOAT_THREADS";

/// Configures the global rayon pool from `ZKFLOAT_THREADS`, once.
///
/// With a single thread the pool runs on the calling thread, which keeps tracing output in order.
/// rayon refuses to initialize the global pool twice, so the outcome of the first call is cached
/// and returned by reference; `ThreadPoolBuildError` is not `Clone`. Call this at the start of
/// `main`, before anything touches the pool.
pub fn adjust_thread_pool() -> &'static Result<(), rayon::ThreadPoolBuildError> {
	static ONCE_GUARD: OnceLock<Result<(), rayon::ThreadPoolBuildError>> = OnceLock::new();

	ONCE_GUARD.get_or_init(|| match usize_env_var(THREADS_ENV_VAR) {
		Some(1) => rayon::ThreadPoolBuilder::new()
			.num_threads(1)
			.use_current_thread()
			.build_global(),
		Some(n) if n > 1 => rayon::ThreadPoolBuilder::new()
			.num_threads(n)
			.build_global(),
		_ => Ok(()),
	})
}
