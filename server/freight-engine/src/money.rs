//! Fixed-point amounts: money in centavos, rates in parts-per-million, weight in grams.
//!
//! Inputs arrive as decimal strings or JSON numbers and are converted to
//! integers once. Everything after that is integer arithmetic.

use std::fmt;

use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize, Serializer};

/// Micro-centavos per centavo. Products of money and rates land on this scale.
const PRECISE_PER_CENT: i128 = 1_000_000;

/// Parse a decimal string into an integer scaled by `10^scale`.
///
/// Accepts an optional sign and a single `.` or `,` separator. Rejects more
/// fractional digits than `scale` instead of silently rounding them away.
pub fn parse_fixed(raw: &str, scale: u32) -> Result<i64, String> {
  let s = raw.trim();
  let (negative, digits) = match s.as_bytes().first() {
    Some(b'-') => (true, &s[1..]),
    Some(b'+') => (false, &s[1..]),
    _ => (false, s),
  };

  let mut parts = digits.splitn(2, |c: char| c == '.' || c == ',');
  let int_part = parts.next().unwrap_or("");
  let frac_part = parts.next().unwrap_or("");

  if int_part.is_empty() && frac_part.is_empty() {
    return Err(format!("'{}' is not a number", raw));
  }
  if !int_part.bytes().all(|b| b.is_ascii_digit())
    || !frac_part.bytes().all(|b| b.is_ascii_digit())
  {
    return Err(format!("'{}' is not a number", raw));
  }
  if frac_part.len() > scale as usize {
    return Err(format!(
      "'{}' has more than {} decimal places",
      raw, scale
    ));
  }

  let factor = 10i64.pow(scale);
  let overflow = || format!("'{}' is out of range", raw);

  let int_value = if int_part.is_empty() {
    0
  } else {
    int_part.parse::<i64>().map_err(|_| overflow())?
  };
  let frac_value = if frac_part.is_empty() {
    0
  } else {
    let padded = format!("{:0<width$}", frac_part, width = scale as usize);
    padded.parse::<i64>().map_err(|_| overflow())?
  };

  let value = int_value
    .checked_mul(factor)
    .and_then(|v| v.checked_add(frac_value))
    .ok_or_else(overflow)?;
  Ok(if negative { -value } else { value })
}

/// Convert a JSON float into the fixed-point scale, rounding half away from zero.
fn scale_float(value: f64, scale: u32) -> Option<i64> {
  if !value.is_finite() {
    return None;
  }
  let scaled = (value * 10f64.powi(scale as i32)).round();
  if scaled.abs() >= i64::MAX as f64 {
    return None;
  }
  Some(scaled as i64)
}

/// Serde visitor shared by the fixed-point types: strings, integers, and floats.
struct FixedVisitor {
  scale: u32,
  expecting: &'static str,
}

impl<'de> Visitor<'de> for FixedVisitor {
  type Value = i64;

  fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
    f.write_str(self.expecting)
  }

  fn visit_str<E: de::Error>(self, v: &str) -> Result<i64, E> {
    parse_fixed(v, self.scale).map_err(E::custom)
  }

  fn visit_i64<E: de::Error>(self, v: i64) -> Result<i64, E> {
    v.checked_mul(10i64.pow(self.scale))
      .ok_or_else(|| E::custom(format!("{} is out of range", v)))
  }

  fn visit_u64<E: de::Error>(self, v: u64) -> Result<i64, E> {
    let v = i64::try_from(v).map_err(|_| E::custom(format!("{} is out of range", v)))?;
    self.visit_i64(v)
  }

  fn visit_f64<E: de::Error>(self, v: f64) -> Result<i64, E> {
    scale_float(v, self.scale).ok_or_else(|| E::custom(format!("{} is out of range", v)))
  }
}

/// Render `value / 10^scale` with exactly `scale` fractional digits.
fn format_fixed(f: &mut fmt::Formatter<'_>, value: i64, scale: u32) -> fmt::Result {
  let factor = 10u64.pow(scale);
  let abs = value.unsigned_abs();
  let sign = if value < 0 { "-" } else { "" };
  write!(
    f,
    "{}{}.{:0width$}",
    sign,
    abs / factor,
    abs % factor,
    width = scale as usize
  )
}

// ---------------------------------------------------------------------------
// Money
// ---------------------------------------------------------------------------

/// A BRL amount in centavos.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Money(i64);

impl Money {
  pub const ZERO: Money = Money(0);

  pub const fn from_cents(cents: i64) -> Self {
    Self(cents)
  }

  pub const fn cents(self) -> i64 {
    self.0
  }

  pub fn parse(raw: &str) -> Result<Self, String> {
    parse_fixed(raw, 2).map(Self)
  }

  pub fn is_positive(self) -> bool {
    self.0 > 0
  }

  pub fn is_negative(self) -> bool {
    self.0 < 0
  }

  /// Exact product with a rate, on the micro-centavo scale.
  pub fn times_rate(self, rate: Rate) -> Precise {
    Precise(self.0 as i128 * rate.ppm() as i128)
  }

  /// Exact product with a count (axles, units).
  pub fn times_count(self, count: u32) -> Precise {
    Precise(self.0 as i128 * count as i128 * PRECISE_PER_CENT)
  }
}

impl fmt::Display for Money {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    format_fixed(f, self.0, 2)
  }
}

impl Serialize for Money {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(self)
  }
}

impl<'de> Deserialize<'de> for Money {
  fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
    deserializer
      .deserialize_any(FixedVisitor {
        scale: 2,
        expecting: "a BRL amount as a decimal string or number",
      })
      .map(Self)
  }
}

// ---------------------------------------------------------------------------
// Precise
// ---------------------------------------------------------------------------

/// An intermediate amount in micro-centavos (10^-6 centavo). Never rounded
/// until it is turned back into [`Money`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Precise(i128);

impl Precise {
  pub const ZERO: Precise = Precise(0);

  pub fn checked_add(self, other: Precise) -> Option<Precise> {
    self.0.checked_add(other.0).map(Precise)
  }

  /// Drop everything below one centavo (floor).
  pub fn truncate(self) -> Option<Money> {
    i64::try_from(self.0.div_euclid(PRECISE_PER_CENT))
      .ok()
      .map(Money)
  }

  /// Round to centavos, halves going up.
  pub fn round_half_up(self) -> Option<Money> {
    let shifted = self.0.checked_add(PRECISE_PER_CENT / 2)?;
    i64::try_from(shifted.div_euclid(PRECISE_PER_CENT))
      .ok()
      .map(Money)
  }
}

// ---------------------------------------------------------------------------
// Rate
// ---------------------------------------------------------------------------

/// A percentage held as parts-per-million of the base (12% = 120_000).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Rate(i64);

impl Rate {
  /// 100%.
  pub const MAX_PPM: i64 = 1_000_000;

  pub const fn from_ppm(ppm: i64) -> Self {
    Self(ppm)
  }

  pub const fn from_percent(percent: i64) -> Self {
    Self(percent * 10_000)
  }

  pub fn parse_percent(raw: &str) -> Result<Self, String> {
    parse_fixed(raw, 4).map(Self)
  }

  pub const fn ppm(self) -> i64 {
    self.0
  }

  pub fn is_valid(self) -> bool {
    (0..=Self::MAX_PPM).contains(&self.0)
  }

  pub fn as_percent(self) -> f64 {
    self.0 as f64 / 10_000.0
  }
}

impl fmt::Display for Rate {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let abs = self.0.unsigned_abs();
    let sign = if self.0 < 0 { "-" } else { "" };
    let whole = abs / 10_000;
    let frac = abs % 10_000;
    if frac == 0 {
      write!(f, "{}{}%", sign, whole)
    } else {
      let digits = format!("{:04}", frac);
      write!(f, "{}{}.{}%", sign, whole, digits.trim_end_matches('0'))
    }
  }
}

impl Serialize for Rate {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_f64(self.as_percent())
  }
}

impl<'de> Deserialize<'de> for Rate {
  fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
    deserializer
      .deserialize_any(FixedVisitor {
        scale: 4,
        expecting: "a percentage as a decimal string or number",
      })
      .map(Self)
  }
}

// ---------------------------------------------------------------------------
// Weight
// ---------------------------------------------------------------------------

/// Cargo weight in grams, read and written as kilograms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Weight(i64);

impl Weight {
  pub const fn from_grams(grams: i64) -> Self {
    Self(grams)
  }

  pub const fn grams(self) -> i64 {
    self.0
  }

  pub fn is_positive(self) -> bool {
    self.0 > 0
  }

  /// Charge for this weight at a per-tonne price. One tonne is 10^6 grams, so
  /// grams × centavos lands directly on the micro-centavo scale.
  pub fn priced_per_ton(self, price: Money) -> Precise {
    Precise(self.0 as i128 * price.cents() as i128)
  }
}

impl fmt::Display for Weight {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    format_fixed(f, self.0, 3)?;
    f.write_str(" kg")
  }
}

impl Serialize for Weight {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    struct Kg(i64);
    impl fmt::Display for Kg {
      fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        format_fixed(f, self.0, 3)
      }
    }
    serializer.collect_str(&Kg(self.0))
  }
}

impl<'de> Deserialize<'de> for Weight {
  fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
    deserializer
      .deserialize_any(FixedVisitor {
        scale: 3,
        expecting: "a weight in kilograms as a decimal string or number",
      })
      .map(Self)
  }
}
