/// Intercept messages using the `log` crate and print them to STDERR. The default filter is
/// `info`; override with `RUST_LOG` as usual.
///
/// Safe to call more than once, like from several tests in the same process. Only the first call
/// installs the logger.
pub fn setup() {
    use env_logger::{Builder, Env};
    let _ = Builder::from_env(Env::default().default_filter_or("info")).try_init();
}

/// Like `setup`, but captured by the test harness.
pub fn setup_for_tests() {
    use env_logger::{Builder, Env};
    let _ = Builder::from_env(Env::default().default_filter_or("debug"))
        .is_test(true)
        .try_init();
}
