// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::path::Path;

use kitloan_persistence::{
    FallbackRepository, JsonFileCache, PersistenceError, Repository, SqliteRepository,
};
use tracing::{info, warn};

/// The register as opened for one command.
pub enum RegisterStore {
    /// Database first, local JSON copy on failure.
    Primary(FallbackRepository<SqliteRepository, JsonFileCache>),
    /// The database could not be opened at all.
    LocalOnly(JsonFileCache),
}

impl RegisterStore {
    /// Opens the local copy, then the database in front of it.
    ///
    /// A database that cannot be opened is not fatal: the register runs
    /// from the local copy alone.
    ///
    /// # Errors
    ///
    /// Returns an error if the local copy directory cannot be created.
    pub fn open(
        database: &Path,
        cache_dir: &Path,
        trip_after: u32,
    ) -> Result<Self, PersistenceError> {
        let cache: JsonFileCache = JsonFileCache::open(cache_dir)?;

        match SqliteRepository::new_with_file(database) {
            Ok(primary) => {
                info!(database = %database.display(), "Opened register database");
                Ok(Self::Primary(
                    FallbackRepository::new(primary, cache).with_trip_after(trip_after),
                ))
            }
            Err(e) => {
                warn!(
                    database = %database.display(),
                    cache_dir = %cache_dir.display(),
                    error = %e,
                    "Register database unavailable, using local copy"
                );
                Ok(Self::LocalOnly(cache))
            }
        }
    }

    pub fn repository(&mut self) -> &mut dyn Repository {
        match self {
            Self::Primary(repo) => repo,
            Self::LocalOnly(cache) => cache,
        }
    }
}
