use std::path::Path;
use std::time::Duration;

use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;

pub type DbPool = Pool<SqliteConnectionManager>;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Build a pool that opens connections on first use and gives up acquiring one
/// after `timeout`. Broken connections are replaced on checkout.
pub fn create_pool(path: &str, timeout: Duration) -> Result<DbPool, r2d2::Error> {
    if path == ":memory:" {
        return memory_pool(timeout);
    }

    let manager = SqliteConnectionManager::file(Path::new(path))
        .with_init(move |conn| conn.busy_timeout(timeout));

    Pool::builder()
        .max_size(5)
        .min_idle(Some(0))
        .connection_timeout(timeout)
        .test_on_check_out(true)
        .build(manager)
}

pub fn create_memory_pool() -> Result<DbPool, r2d2::Error> {
    memory_pool(DEFAULT_TIMEOUT)
}

/// Every in-memory SQLite connection is its own database, so the pool holds exactly one.
fn memory_pool(timeout: Duration) -> Result<DbPool, r2d2::Error> {
    let manager =
        SqliteConnectionManager::memory().with_init(move |conn| conn.busy_timeout(timeout));
    Pool::builder()
        .max_size(1)
        .connection_timeout(timeout)
        .build(manager)
}
