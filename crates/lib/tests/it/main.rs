/*! Integration tests for Snipboard.
 *
 * This test suite is organized as a single integration test binary
 * following the pattern described by matklad in
 * https://matklad.github.io/2021/02/27/delete-cargo-integration-tests.html
 *
 * The module structure mirrors the main library structure:
 * - store: Tests for the RecordStore trait and its backends
 * - credential: Tests for registration and authentication
 * - session: Tests for the session lifecycle and flash messages
 * - guard: Tests for the auth and ownership guards
 * - handlers: End-to-end handler scenarios
 */

use tracing_subscriber::EnvFilter;

#[ctor::ctor]
fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("snipboard=info".parse().unwrap()),
        )
        .with_test_writer()
        .try_init();
}

mod credential;
mod guard;
mod session;
mod store;
