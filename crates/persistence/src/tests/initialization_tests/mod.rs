// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Backend initialization tests.
//!
//! Migration application is exercised implicitly by every `SQLite` test;
//! these cover construction and isolation explicitly.

use crate::tests::create_test_kit;
use crate::{PersistenceError, Repository, SqliteRepository, StoreSource};

#[test]
fn test_in_memory_initialization() {
    let result: Result<SqliteRepository, PersistenceError> = SqliteRepository::new_in_memory();
    assert!(result.is_ok());
}

#[test]
fn test_multiple_in_memory_instances_are_isolated() {
    let mut db1 = SqliteRepository::new_in_memory().unwrap();
    let mut db2 = SqliteRepository::new_in_memory().unwrap();

    db1.create_kit(&create_test_kit("k1", "001")).unwrap();

    assert_eq!(db1.list_kits().unwrap().value.len(), 1);
    assert!(db2.list_kits().unwrap().value.is_empty());
}

#[test]
fn test_file_database_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("register.db");

    {
        let mut db = SqliteRepository::new_with_file(&path).unwrap();
        db.create_kit(&create_test_kit("k1", "001")).unwrap();
    }

    let mut reopened = SqliteRepository::new_with_file(&path).unwrap();
    let kits = reopened.list_kits().unwrap();
    assert_eq!(kits.source, StoreSource::Database);
    assert_eq!(kits.value, vec![create_test_kit("k1", "001")]);
}
