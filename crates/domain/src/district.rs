// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A jurisdictional district, e.g. `"Ilocos Norte - 1st District"`.
///
/// Districts are opaque strings derived from an establishment's
/// (province, city) pair via the built-in lookup table. They scope
/// Section/Unit/Monitoring assignee resolution.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct District {
    value: String,
}

impl District {
    /// Creates a district from its display string.
    #[must_use]
    pub fn new(value: &str) -> Self {
        Self {
            value: value.to_string(),
        }
    }

    /// Returns the district display string.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }
}

impl std::fmt::Display for District {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value)
    }
}

/// Immutable (province, city) → district reference table.
///
/// Loaded once at startup. An unknown pair yields `None`; inspection
/// creation proceeds with an absent district, and Monitoring resolution
/// may later fail with `NoAssigneeFound` until configuration is fixed.
#[derive(Debug, Clone)]
pub struct DistrictTable {
    entries: HashMap<(String, String), District>,
}

impl DistrictTable {
    /// Builds the built-in Region I table.
    #[must_use]
    pub fn builtin() -> Self {
        let mut table: Self = Self {
            entries: HashMap::new(),
        };

        let rows: &[(&str, &str, &str)] = &[
            // Ilocos Norte
            ("Ilocos Norte", "Laoag City", "Ilocos Norte - 1st District"),
            ("Ilocos Norte", "Bacarra", "Ilocos Norte - 1st District"),
            ("Ilocos Norte", "Pagudpud", "Ilocos Norte - 1st District"),
            ("Ilocos Norte", "Sarrat", "Ilocos Norte - 1st District"),
            ("Ilocos Norte", "Batac City", "Ilocos Norte - 2nd District"),
            ("Ilocos Norte", "Paoay", "Ilocos Norte - 2nd District"),
            ("Ilocos Norte", "Currimao", "Ilocos Norte - 2nd District"),
            ("Ilocos Norte", "Badoc", "Ilocos Norte - 2nd District"),
            // Ilocos Sur
            ("Ilocos Sur", "Vigan City", "Ilocos Sur - 1st District"),
            ("Ilocos Sur", "Bantay", "Ilocos Sur - 1st District"),
            ("Ilocos Sur", "Cabugao", "Ilocos Sur - 1st District"),
            ("Ilocos Sur", "Candon City", "Ilocos Sur - 2nd District"),
            ("Ilocos Sur", "Narvacan", "Ilocos Sur - 2nd District"),
            ("Ilocos Sur", "Tagudin", "Ilocos Sur - 2nd District"),
            // La Union
            ("La Union", "San Fernando City", "La Union - 1st District"),
            ("La Union", "Bacnotan", "La Union - 1st District"),
            ("La Union", "San Juan", "La Union - 1st District"),
            ("La Union", "Agoo", "La Union - 2nd District"),
            ("La Union", "Bauang", "La Union - 2nd District"),
            ("La Union", "Rosario", "La Union - 2nd District"),
            // Pangasinan
            ("Pangasinan", "Alaminos City", "Pangasinan - 1st District"),
            ("Pangasinan", "Bolinao", "Pangasinan - 1st District"),
            ("Pangasinan", "Lingayen", "Pangasinan - 2nd District"),
            ("Pangasinan", "Binmaley", "Pangasinan - 2nd District"),
            ("Pangasinan", "San Carlos City", "Pangasinan - 3rd District"),
            ("Pangasinan", "Malasiqui", "Pangasinan - 3rd District"),
            ("Pangasinan", "Dagupan City", "Pangasinan - 4th District"),
            ("Pangasinan", "Manaoag", "Pangasinan - 4th District"),
            ("Pangasinan", "Binalonan", "Pangasinan - 5th District"),
            ("Pangasinan", "Tayug", "Pangasinan - 5th District"),
            ("Pangasinan", "Urdaneta City", "Pangasinan - 6th District"),
            ("Pangasinan", "Rosales", "Pangasinan - 6th District"),
        ];

        for (province, city, district) in rows {
            table.entries.insert(
                (normalize(province), normalize(city)),
                District::new(district),
            );
        }

        table
    }

    /// Looks up the district for a (province, city) pair.
    ///
    /// Matching is case-insensitive and whitespace-trimmed.
    #[must_use]
    pub fn lookup(&self, province: &str, city: &str) -> Option<District> {
        self.entries
            .get(&(normalize(province), normalize(city)))
            .cloned()
    }
}

fn normalize(s: &str) -> String {
    s.trim().to_lowercase()
}
