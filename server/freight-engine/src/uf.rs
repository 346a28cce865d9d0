//! Brazilian federative units (UF) and their regions.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Region {
  Norte,
  Nordeste,
  CentroOeste,
  Sudeste,
  Sul,
}

/// One of the 27 UF codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Uf {
  AC,
  AL,
  AP,
  AM,
  BA,
  CE,
  DF,
  ES,
  GO,
  MA,
  MT,
  MS,
  MG,
  PA,
  PB,
  PR,
  PE,
  PI,
  RJ,
  RN,
  RS,
  RO,
  RR,
  SC,
  SP,
  SE,
  TO,
}

impl Uf {
  pub const ALL: [Uf; 27] = [
    Uf::AC,
    Uf::AL,
    Uf::AP,
    Uf::AM,
    Uf::BA,
    Uf::CE,
    Uf::DF,
    Uf::ES,
    Uf::GO,
    Uf::MA,
    Uf::MT,
    Uf::MS,
    Uf::MG,
    Uf::PA,
    Uf::PB,
    Uf::PR,
    Uf::PE,
    Uf::PI,
    Uf::RJ,
    Uf::RN,
    Uf::RS,
    Uf::RO,
    Uf::RR,
    Uf::SC,
    Uf::SP,
    Uf::SE,
    Uf::TO,
  ];

  /// Case-insensitive, surrounding whitespace ignored.
  pub fn parse(raw: &str) -> Option<Uf> {
    let code = raw.trim();
    Self::ALL
      .iter()
      .copied()
      .find(|uf| uf.as_str().eq_ignore_ascii_case(code))
  }

  pub fn as_str(self) -> &'static str {
    match self {
      Uf::AC => "AC",
      Uf::AL => "AL",
      Uf::AP => "AP",
      Uf::AM => "AM",
      Uf::BA => "BA",
      Uf::CE => "CE",
      Uf::DF => "DF",
      Uf::ES => "ES",
      Uf::GO => "GO",
      Uf::MA => "MA",
      Uf::MT => "MT",
      Uf::MS => "MS",
      Uf::MG => "MG",
      Uf::PA => "PA",
      Uf::PB => "PB",
      Uf::PR => "PR",
      Uf::PE => "PE",
      Uf::PI => "PI",
      Uf::RJ => "RJ",
      Uf::RN => "RN",
      Uf::RS => "RS",
      Uf::RO => "RO",
      Uf::RR => "RR",
      Uf::SC => "SC",
      Uf::SP => "SP",
      Uf::SE => "SE",
      Uf::TO => "TO",
    }
  }

  pub fn region(self) -> Region {
    match self {
      Uf::AC | Uf::AP | Uf::AM | Uf::PA | Uf::RO | Uf::RR | Uf::TO => Region::Norte,
      Uf::AL | Uf::BA | Uf::CE | Uf::MA | Uf::PB | Uf::PE | Uf::PI | Uf::RN | Uf::SE => {
        Region::Nordeste
      }
      Uf::DF | Uf::GO | Uf::MT | Uf::MS => Region::CentroOeste,
      Uf::ES | Uf::MG | Uf::RJ | Uf::SP => Region::Sudeste,
      Uf::PR | Uf::RS | Uf::SC => Region::Sul,
    }
  }
}

impl fmt::Display for Uf {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

impl Serialize for Uf {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(self.as_str())
  }
}

impl<'de> Deserialize<'de> for Uf {
  fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
    let raw = String::deserialize(deserializer)?;
    Uf::parse(&raw)
      .ok_or_else(|| serde::de::Error::custom(format!("unknown UF code '{}'", raw)))
  }
}
