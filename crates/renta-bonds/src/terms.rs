//! Bond terms and trade context.
//!
//! Both are plain value objects built fresh per pricing request. All
//! field problems are collected and reported together through
//! `RentaError::Validation`, one message per field, before any
//! calculation runs.

use serde::{Deserialize, Serialize};

use renta_core::error::{FieldError, RentaError, RentaResult};
use renta_core::types::{Date, DayCountBasis, Periodicity, RateMode};

/// Facial terms of a bullet bond.
///
/// For floating and inflation-indexed instruments `coupon_rate` is the
/// negotiation spread over the index, in percent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BondTerms {
    /// Issue date of the bond.
    pub issue_date: Date,
    /// Maturity date; the principal is repaid in full here.
    pub maturity_date: Date,
    /// Coupon payment periodicity.
    pub periodicity: Periodicity,
    /// Day-count basis for coupon accrual.
    pub basis: DayCountBasis,
    /// Annual coupon rate (or index spread) in percent.
    pub coupon_rate: f64,
    /// Quotation mode of the coupon rate.
    pub rate_mode: RateMode,
    /// Face value the rate math runs on, conventionally 100.
    pub base_notional: f64,
    /// Actual traded amount in pesos.
    pub negotiated_notional: f64,
}

/// The negotiation side of a pricing request.
///
/// For fixed-rate bonds `market_rate` is the effective annual discount
/// rate; for floating and indexed bonds it is the market spread
/// composed with the index print at the trade date.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TradeContext {
    /// Trade (negotiation) date.
    pub trade_date: Date,
    /// Market rate or market spread, in percent.
    pub market_rate: f64,
    /// Quotation mode of the market rate.
    pub market_rate_mode: RateMode,
}

impl BondTerms {
    /// Validates the terms on their own, collecting every field problem.
    fn field_errors(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();

        if self.base_notional <= 0.0 {
            errors.push(FieldError::new(
                "valor_nominal_base",
                "el valor nominal base debe ser mayor que cero",
            ));
        }
        if self.negotiated_notional <= 0.0 {
            errors.push(FieldError::new(
                "valor_nominal",
                "el valor nominal no puede estar vacío",
            ));
        }
        if !self.coupon_rate.is_finite() {
            errors.push(FieldError::new(
                "tasa_cupon",
                "la tasa del cupón no es un número válido",
            ));
        }
        if self.issue_date >= self.maturity_date {
            errors.push(FieldError::new(
                "fecha_emision",
                "la fecha de emisión debe ser menor a la fecha de vencimiento",
            ));
        }

        errors
    }
}

/// Validates a full pricing request before any calculation.
///
/// When `online` is true the request is bound for the live rate source
/// and no date may lie in the future.
///
/// # Errors
///
/// Returns `RentaError::Validation` carrying one message per invalid
/// field.
pub fn validate_request(terms: &BondTerms, trade: &TradeContext, online: bool) -> RentaResult<()> {
    let mut errors = terms.field_errors();

    if !trade.market_rate.is_finite() {
        errors.push(FieldError::new(
            "tasa_mercado",
            "la tasa de mercado no es un número válido",
        ));
    }

    if trade.trade_date < terms.issue_date || trade.trade_date > terms.maturity_date {
        errors.push(FieldError::new(
            "fecha_negociacion",
            "la fecha de negociación debe estar entre la fecha de emisión y la de vencimiento",
        ));
    }

    if online {
        let today = Date::today();
        if terms.issue_date > today {
            errors.push(FieldError::new(
                "fecha_emision",
                "la fecha de emisión no puede estar en el futuro para consultas online",
            ));
        }
        if trade.trade_date > today {
            errors.push(FieldError::new(
                "fecha_negociacion",
                "la fecha de negociación no puede estar en el futuro para consultas online",
            ));
        }
        if terms.maturity_date > today {
            errors.push(FieldError::new(
                "fecha_vencimiento",
                "la fecha de vencimiento no puede estar en el futuro para consultas online",
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(RentaError::validation(errors))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_terms() -> BondTerms {
        BondTerms {
            issue_date: Date::from_ymd(2023, 1, 1).unwrap(),
            maturity_date: Date::from_ymd(2028, 1, 1).unwrap(),
            periodicity: Periodicity::Semiannual,
            basis: DayCountBasis::Actual365,
            coupon_rate: 9.5,
            rate_mode: RateMode::EffectiveAnnual,
            base_notional: 100.0,
            negotiated_notional: 500_000_000.0,
        }
    }

    fn sample_trade() -> TradeContext {
        TradeContext {
            trade_date: Date::from_ymd(2024, 3, 15).unwrap(),
            market_rate: 10.2,
            market_rate_mode: RateMode::EffectiveAnnual,
        }
    }

    #[test]
    fn test_valid_request_passes() {
        assert!(validate_request(&sample_terms(), &sample_trade(), false).is_ok());
    }

    #[test]
    fn test_errors_are_collected_not_fail_fast() {
        let mut terms = sample_terms();
        terms.maturity_date = Date::from_ymd(2022, 1, 1).unwrap();
        terms.negotiated_notional = 0.0;

        let err = validate_request(&terms, &sample_trade(), false).unwrap_err();
        let RentaError::Validation { errors } = err else {
            panic!("expected a validation error");
        };
        let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
        assert!(fields.contains(&"fecha_emision"));
        assert!(fields.contains(&"valor_nominal"));
        assert!(fields.contains(&"fecha_negociacion"));
    }

    #[test]
    fn test_trade_date_outside_window() {
        let mut trade = sample_trade();
        trade.trade_date = Date::from_ymd(2022, 12, 31).unwrap();

        let err = validate_request(&sample_terms(), &trade, false).unwrap_err();
        assert!(err.to_string().contains("fecha_negociacion"));
    }

    #[test]
    fn test_online_rejects_future_dates() {
        // A bond maturing decades out cannot be priced against the live
        // source.
        let err = validate_request(&sample_terms(), &sample_trade(), true).unwrap_err();
        assert!(err.to_string().contains("fecha_vencimiento"));
    }
}
