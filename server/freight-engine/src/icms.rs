//! ICMS rate table keyed by destination UF.

use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::TableError;
use crate::money::Rate;
use crate::uf::{Region, Uf};

/// Read-only UF → ICMS rate mapping. Built once and passed to the calculator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct IcmsTable {
  rates: BTreeMap<Uf, Rate>,
}

impl IcmsTable {
  /// Each UF may appear once.
  pub fn new(rates: impl IntoIterator<Item = (Uf, Rate)>) -> Result<Self, TableError> {
    let mut table = BTreeMap::new();
    for (uf, rate) in rates {
      insert_rate(&mut table, uf, rate, || uf.to_string())?;
    }
    Ok(Self { rates: table })
  }

  /// Interstate rates: 12% into Sul/Sudeste (except ES), 7% everywhere else.
  pub fn standard() -> Self {
    let rates = Uf::ALL
      .iter()
      .map(|&uf| {
        let rate = match uf.region() {
          Region::Sul | Region::Sudeste if uf != Uf::ES => Rate::from_percent(12),
          _ => Rate::from_percent(7),
        };
        (uf, rate)
      })
      .collect();
    Self { rates }
  }

  /// Parse `{ "RJ": 12, "SP": "18.5" }`. Rates are percentages.
  ///
  /// Keys are matched like quote inputs, so `"RJ"` and `"rj"` (or a key
  /// written twice) name the same UF and are rejected as a duplicate.
  pub fn from_json_str(json: &str) -> Result<Self, TableError> {
    let RawTable(entries) = serde_json::from_str(json)?;
    let mut rates = BTreeMap::new();
    for (code, rate) in entries {
      let uf = match Uf::parse(&code) {
        Some(uf) => uf,
        None => return Err(TableError::UnknownState(code)),
      };
      insert_rate(&mut rates, uf, rate, || code.clone())?;
    }
    Ok(Self { rates })
  }

  pub fn from_path(path: impl AsRef<Path>) -> Result<Self, TableError> {
    let path = path.as_ref();
    let json = std::fs::read_to_string(path).map_err(|source| TableError::Io {
      path: path.display().to_string(),
      source,
    })?;
    Self::from_json_str(&json)
  }

  pub fn rate_for(&self, uf: Uf) -> Option<Rate> {
    self.rates.get(&uf).copied()
  }

  pub fn contains(&self, uf: Uf) -> bool {
    self.rates.contains_key(&uf)
  }

  pub fn len(&self) -> usize {
    self.rates.len()
  }

  pub fn is_empty(&self) -> bool {
    self.rates.is_empty()
  }

  pub fn iter(&self) -> impl Iterator<Item = (Uf, Rate)> + '_ {
    self.rates.iter().map(|(uf, rate)| (*uf, *rate))
  }
}

fn insert_rate(
  rates: &mut BTreeMap<Uf, Rate>,
  uf: Uf,
  rate: Rate,
  code: impl FnOnce() -> String,
) -> Result<(), TableError> {
  if !rate.is_valid() {
    return Err(TableError::RateOutOfRange {
      code: code(),
      rate: rate.to_string(),
    });
  }
  match rates.entry(uf) {
    Entry::Occupied(_) => Err(TableError::DuplicateState(code())),
    Entry::Vacant(slot) => {
      slot.insert(rate);
      Ok(())
    }
  }
}

/// Table entries in file order, repeated keys included.
struct RawTable(Vec<(String, Rate)>);

impl<'de> Deserialize<'de> for RawTable {
  fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
    struct RawTableVisitor;

    impl<'de> Visitor<'de> for RawTableVisitor {
      type Value = RawTable;

      fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("an object of UF codes to ICMS percentages")
      }

      fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<RawTable, A::Error> {
        let mut entries = Vec::with_capacity(access.size_hint().unwrap_or(27));
        while let Some(entry) = access.next_entry::<String, Rate>()? {
          entries.push(entry);
        }
        Ok(RawTable(entries))
      }
    }

    deserializer.deserialize_map(RawTableVisitor)
  }
}

impl Default for IcmsTable {
  fn default() -> Self {
    Self::standard()
  }
}
