// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Backend-specific connection setup.
//!
//! Only `SQLite` is supported. Everything here deals with connection
//! initialization and PRAGMA configuration; record-level queries live in
//! `queries/` and `mutations/`.

pub mod sqlite;
