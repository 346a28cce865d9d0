//! Freight quote: validation, component pricing, and the rounded total.

use tracing::debug;

use crate::config::PricingConfig;
use crate::error::PricingError;
use crate::icms::IcmsTable;
use crate::money::{Precise, Rate};
use crate::types::{FreightQuoteInput, FreightQuoteResult};
use crate::uf::Uf;

fn overflow(field: &str) -> PricingError {
  PricingError::amount(field, "result is out of range")
}

/// Parse a UF code and make sure the table knows it.
fn resolve_state(field: &str, raw: &str, table: &IcmsTable) -> Result<(Uf, Rate), PricingError> {
  Uf::parse(raw)
    .and_then(|uf| table.rate_for(uf).map(|rate| (uf, rate)))
    .ok_or_else(|| PricingError::state_code(field, raw.trim()))
}

fn check_rate(field: &str, rate: Rate) -> Result<(), PricingError> {
  if rate.is_valid() {
    Ok(())
  } else {
    Err(PricingError::amount(field, "must be between 0% and 100%"))
  }
}

/// Check the numeric inputs before any arithmetic runs. Returns the axle count.
fn validate_amounts(input: &FreightQuoteInput) -> Result<u32, PricingError> {
  if !input.declared_value.is_positive() {
    return Err(PricingError::amount("declared_value", "must be greater than zero"));
  }
  if !input.weight_kg.is_positive() {
    return Err(PricingError::amount("weight_kg", "must be greater than zero"));
  }
  if input.axles <= 0 {
    return Err(PricingError::amount("axles", "must be greater than zero"));
  }
  let axles = u32::try_from(input.axles).map_err(|_| overflow("axles"))?;
  if input.toll_per_axle.is_negative() {
    return Err(PricingError::amount("toll_per_axle", "must not be negative"));
  }
  if let Some(rate) = input.freight_rate_per_ton {
    if rate.is_negative() {
      return Err(PricingError::amount(
        "freight_rate_per_ton",
        "must not be negative",
      ));
    }
  }
  Ok(axles)
}

/// Compute a freight quote. Pure and deterministic.
///
/// Every component is computed exactly; the grand total is rounded half-up
/// to centavos once, and the reported components are truncated so that the
/// total never falls below their sum.
pub fn compute_freight_quote(
  input: &FreightQuoteInput,
  table: &IcmsTable,
  config: &PricingConfig,
) -> Result<FreightQuoteResult, PricingError> {
  let (origin, _) = resolve_state("origin", &input.origin, table)?;
  let (destination, icms_rate) = resolve_state("destination", &input.destination, table)?;
  let axles = validate_amounts(input)?;
  check_rate("gris_rate", config.gris_rate)?;
  check_rate("adv_rate", config.adv_rate)?;

  let value = input.declared_value;
  let freight_weight = match input.freight_rate_per_ton {
    Some(price) => input.weight_kg.priced_per_ton(price),
    None => Precise::ZERO,
  };
  let icms = value.times_rate(icms_rate);
  let gris = value.times_rate(config.gris_rate);
  let adv = value.times_rate(config.adv_rate);
  let toll = input.toll_per_axle.times_count(axles);

  let exact_total = [freight_weight, icms, gris, adv, toll]
    .into_iter()
    .try_fold(Precise::ZERO, Precise::checked_add)
    .ok_or_else(|| overflow("total"))?;
  let total = exact_total.round_half_up().ok_or_else(|| overflow("total"))?;

  let truncate = |field: &str, amount: Precise| amount.truncate().ok_or_else(|| overflow(field));

  let mut explanations = Vec::new();
  if let Some(price) = input.freight_rate_per_ton {
    explanations.push(format!(
      "Frete-peso: {} at {} per tonne",
      input.weight_kg, price
    ));
  }
  explanations.push(format!(
    "ICMS {} for destination {} on declared value {}",
    icms_rate, destination, value
  ));
  if origin == destination {
    explanations.push(format!(
      "Intrastate operation: {} table rate applied",
      destination
    ));
  }
  explanations.push(format!(
    "GRIS {} and ADV {} on declared value {}",
    config.gris_rate, config.adv_rate, value
  ));
  explanations.push(format!(
    "Toll: {} axle(s) at {} each",
    axles, input.toll_per_axle
  ));

  let result = FreightQuoteResult {
    origin,
    destination,
    icms_rate,
    gris_rate: config.gris_rate,
    adv_rate: config.adv_rate,
    freight_weight: truncate("freight_weight", freight_weight)?,
    icms: truncate("icms", icms)?,
    gris: truncate("gris", gris)?,
    adv: truncate("adv", adv)?,
    toll: truncate("toll", toll)?,
    total,
    explanations,
  };

  debug!(
    %origin,
    %destination,
    total = %result.total,
    "freight quote computed"
  );
  Ok(result)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::money::{Money, Weight};

  fn sp_to_rj() -> FreightQuoteInput {
    FreightQuoteInput {
      origin: "SP".into(),
      destination: "RJ".into(),
      weight_kg: Weight::from_grams(1_000_000),
      declared_value: Money::from_cents(100_000),
      axles: 2,
      toll_per_axle: Money::from_cents(1_500),
      freight_rate_per_ton: None,
    }
  }

  fn quote(input: &FreightQuoteInput) -> Result<FreightQuoteResult, PricingError> {
    compute_freight_quote(input, &IcmsTable::standard(), &PricingConfig::default())
  }

  #[test]
  fn sp_to_rj_reference_quote() {
    let q = quote(&sp_to_rj()).unwrap();
    assert_eq!(q.icms, Money::from_cents(12_000));
    assert_eq!(q.gris, Money::from_cents(100));
    assert_eq!(q.adv, Money::from_cents(50));
    assert_eq!(q.toll, Money::from_cents(3_000));
    assert_eq!(q.freight_weight, Money::ZERO);
    assert_eq!(q.total, Money::from_cents(15_150));
    assert_eq!(q.total.to_string(), "151.50");
  }

  #[test]
  fn unknown_destination_is_invalid_state_code() {
    let mut input = sp_to_rj();
    input.destination = "ZZ".into();
    let err = quote(&input).unwrap_err();
    assert_eq!(err, PricingError::state_code("destination", "ZZ"));
  }

  #[test]
  fn origin_missing_from_custom_table_is_rejected() {
    let table = IcmsTable::new([(Uf::RJ, Rate::from_percent(12))]).unwrap();
    let err = compute_freight_quote(&sp_to_rj(), &table, &PricingConfig::default()).unwrap_err();
    assert_eq!(err.code(), "invalid_state_code");
    assert_eq!(err.field(), "origin");
  }

  #[test]
  fn lowercase_codes_are_accepted() {
    let mut input = sp_to_rj();
    input.origin = "sp".into();
    input.destination = " rj".into();
    let q = quote(&input).unwrap();
    assert_eq!(q.origin, Uf::SP);
    assert_eq!(q.destination, Uf::RJ);
  }

  #[test]
  fn non_positive_amounts_are_rejected() {
    for cents in [0, -1, -100_000] {
      let mut input = sp_to_rj();
      input.declared_value = Money::from_cents(cents);
      let err = quote(&input).unwrap_err();
      assert_eq!(err.field(), "declared_value");
      assert_eq!(err.code(), "invalid_amount");
    }
    for grams in [0, -500] {
      let mut input = sp_to_rj();
      input.weight_kg = Weight::from_grams(grams);
      assert_eq!(quote(&input).unwrap_err().field(), "weight_kg");
    }
    for axles in [0, -2] {
      let mut input = sp_to_rj();
      input.axles = axles;
      assert_eq!(quote(&input).unwrap_err().field(), "axles");
    }
  }

  #[test]
  fn negative_toll_is_rejected_but_zero_is_fine() {
    let mut input = sp_to_rj();
    input.toll_per_axle = Money::from_cents(-1);
    assert_eq!(quote(&input).unwrap_err().field(), "toll_per_axle");

    input.toll_per_axle = Money::ZERO;
    let q = quote(&input).unwrap();
    assert_eq!(q.toll, Money::ZERO);
    assert_eq!(q.total, Money::from_cents(12_150));
  }

  #[test]
  fn totals_beyond_money_range_are_rejected() {
    // Components of the largest declared value still fit.
    let mut input = sp_to_rj();
    input.declared_value = Money::from_cents(i64::MAX);
    let q = quote(&input).unwrap();
    assert!(q.total >= q.components_sum());

    // Two axles at the largest toll cannot be represented in centavos.
    input.toll_per_axle = Money::from_cents(i64::MAX);
    let err = quote(&input).unwrap_err();
    assert_eq!(err.code(), "invalid_amount");
    assert_eq!(err.field(), "total");

    let mut input = sp_to_rj();
    input.toll_per_axle = Money::from_cents(i64::MAX);
    assert_eq!(quote(&input).unwrap_err().field(), "total");
  }

  #[test]
  fn total_is_rounded_once_from_exact_components() {
    // 10.01 declared: GRIS 0.01001, ADV 0.005005 -> components truncate,
    // exact total 1.2012 + 0.01001 + 0.005005 = 1.216215 -> 1.22
    let mut input = sp_to_rj();
    input.declared_value = Money::from_cents(1_001);
    input.toll_per_axle = Money::ZERO;
    let q = quote(&input).unwrap();
    assert_eq!(q.icms, Money::from_cents(120));
    assert_eq!(q.gris, Money::from_cents(1));
    assert_eq!(q.adv, Money::ZERO);
    assert_eq!(q.total, Money::from_cents(122));
    assert!(q.total >= q.components_sum());
  }

  #[test]
  fn total_covers_components_for_every_state() {
    let table = IcmsTable::standard();
    for uf in Uf::ALL {
      for cents in [1, 333, 1_001, 99_999, 123_456_789] {
        let mut input = sp_to_rj();
        input.destination = uf.as_str().into();
        input.declared_value = Money::from_cents(cents);
        let q = compute_freight_quote(&input, &table, &PricingConfig::default()).unwrap();
        let sum = q.components_sum();
        assert!(q.total >= sum, "{}: {} < {}", uf, q.total, sum);
        assert!(q.total.cents() - sum.cents() < 5);
      }
    }
  }

  #[test]
  fn freight_weight_is_added_when_priced() {
    let mut input = sp_to_rj();
    input.weight_kg = Weight::from_grams(2_500_000);
    input.freight_rate_per_ton = Some(Money::from_cents(8_000));
    let q = quote(&input).unwrap();
    assert_eq!(q.freight_weight, Money::from_cents(20_000));
    assert_eq!(q.total, Money::from_cents(35_150));
    assert!(q.explanations[0].starts_with("Frete-peso"));
  }

  #[test]
  fn invalid_config_rate_is_rejected() {
    let config = PricingConfig {
      gris_rate: Rate::from_ppm(-1),
      ..PricingConfig::default()
    };
    let err = compute_freight_quote(&sp_to_rj(), &IcmsTable::standard(), &config).unwrap_err();
    assert_eq!(err.field(), "gris_rate");
  }

  #[test]
  fn identical_input_gives_identical_output() {
    let input = sp_to_rj();
    assert_eq!(quote(&input).unwrap(), quote(&input).unwrap());
  }
}
