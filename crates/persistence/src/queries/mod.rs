// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Read-side queries.
//!
//! Every query uses Diesel DSL and returns domain types. Row structs stay
//! private to the module that reads them.

pub mod audit;
pub mod bookings;
pub mod kits;
