//! Shipment rate engine
//!
//! Prices one package against every tier of a catalog and ranks the
//! resulting quotes by total cost. The engine holds only immutable
//! settings, so one instance can be shared across threads.

use chrono::{Days, Local, NaiveDate};
use rust_decimal::prelude::*;
use serde::{Deserialize, Serialize};
use shipquote_types::QuoteError;

use super::money::{checked, round_currency, to_decimal, to_f64};
use super::volumetric::{
    validate_weight, volumetric_weight, DOMESTIC_VOLUMETRIC_DIVISOR,
    INTERNATIONAL_VOLUMETRIC_DIVISOR,
};
use crate::model::{
    PackageSpec, QuoteResult, Route, ServiceTier, SurchargeRequest, SurchargeSchedule, ZoneTable,
};

/// Which dimensional divisor applies when a tier does not set its own
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DivisorPolicy {
    /// Domestic divisor for every quote
    #[default]
    Uniform,
    /// International divisor for international quotes
    ByRoute,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RateSettings {
    pub domestic_divisor: f64,
    pub international_divisor: f64,
    pub divisor_policy: DivisorPolicy,
    pub surcharges: SurchargeSchedule,
}

impl Default for RateSettings {
    fn default() -> Self {
        Self {
            domestic_divisor: DOMESTIC_VOLUMETRIC_DIVISOR,
            international_divisor: INTERNATIONAL_VOLUMETRIC_DIVISOR,
            divisor_policy: DivisorPolicy::Uniform,
            surcharges: SurchargeSchedule::default(),
        }
    }
}

/// Per-request pricing context
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuoteContext {
    pub international: bool,
    pub distance_multiplier: f64,
    pub today: NaiveDate,
}

impl QuoteContext {
    pub fn new(international: bool, today: NaiveDate) -> Self {
        Self {
            international,
            distance_multiplier: 1.0,
            today,
        }
    }

    pub fn for_route(route: &Route, zones: &ZoneTable, today: NaiveDate) -> Self {
        Self {
            international: route.is_international(),
            distance_multiplier: zones.multiplier_for_route(route),
            today,
        }
    }
}

/// Request-level amounts shared by every tier
struct Addons {
    fuel_rate: Decimal,
    insurance: Decimal,
    signature: Decimal,
    special_handling: Decimal,
    multiplier: Decimal,
}

#[derive(Debug, Clone, Default)]
pub struct RateEngine {
    settings: RateSettings,
}

impl RateEngine {
    pub fn new(settings: RateSettings) -> Result<Self, QuoteError> {
        validate_divisor(settings.domestic_divisor, "domestic divisor")?;
        validate_divisor(settings.international_divisor, "international divisor")?;
        validate_non_negative(settings.surcharges.insurance_rate, "insurance rate")?;
        validate_non_negative(settings.surcharges.signature_fee, "signature fee")?;
        validate_non_negative(settings.surcharges.special_handling_fee, "special handling fee")?;
        Ok(Self { settings })
    }

    /// Divisor for one tier: tier override, then policy
    pub fn divisor_for(&self, tier: &ServiceTier, international: bool) -> f64 {
        if let Some(divisor) = tier.volumetric_divisor {
            return divisor;
        }
        match self.settings.divisor_policy {
            DivisorPolicy::ByRoute if international => self.settings.international_divisor,
            _ => self.settings.domestic_divisor,
        }
    }

    /// Quote every tier with today's local date as the ship date
    pub fn quote(
        &self,
        package: &PackageSpec,
        surcharges: &SurchargeRequest,
        tiers: &[ServiceTier],
        is_international: bool,
    ) -> Result<Vec<QuoteResult>, QuoteError> {
        self.quote_on(package, surcharges, tiers, is_international, Local::now().date_naive())
    }

    pub fn quote_on(
        &self,
        package: &PackageSpec,
        surcharges: &SurchargeRequest,
        tiers: &[ServiceTier],
        is_international: bool,
        today: NaiveDate,
    ) -> Result<Vec<QuoteResult>, QuoteError> {
        let context = QuoteContext::new(is_international, today);
        self.quote_with_context(package, surcharges, tiers, &context)
    }

    /// Quote using the route for international detection and the zone multiplier
    pub fn quote_for_route(
        &self,
        package: &PackageSpec,
        surcharges: &SurchargeRequest,
        tiers: &[ServiceTier],
        route: &Route,
        zones: &ZoneTable,
        today: NaiveDate,
    ) -> Result<Vec<QuoteResult>, QuoteError> {
        let context = QuoteContext::for_route(route, zones, today);
        self.quote_with_context(package, surcharges, tiers, &context)
    }

    /// Either every tier is priced or an error is returned; results are
    /// sorted by total cost, ties kept in catalog order.
    pub fn quote_with_context(
        &self,
        package: &PackageSpec,
        surcharges: &SurchargeRequest,
        tiers: &[ServiceTier],
        context: &QuoteContext,
    ) -> Result<Vec<QuoteResult>, QuoteError> {
        validate_weight(package)?;
        let addons = self.addons(package, surcharges, context)?;
        if tiers.is_empty() {
            return Err(QuoteError::EmptyCatalog);
        }
        for tier in tiers {
            validate_tier(tier)?;
        }

        let mut quotes = tiers
            .iter()
            .map(|tier| self.price_tier(package, tier, &addons, context))
            .collect::<Result<Vec<_>, _>>()?;

        // stable: equal totals keep catalog order
        quotes.sort_by(|a, b| a.total_cost.total_cmp(&b.total_cost));
        Ok(quotes)
    }

    fn addons(
        &self,
        package: &PackageSpec,
        surcharges: &SurchargeRequest,
        context: &QuoteContext,
    ) -> Result<Addons, QuoteError> {
        let schedule = &self.settings.surcharges;

        validate_non_negative(package.declared_value, "declared value")?;
        let rate = surcharges.fuel_surcharge_rate;
        if !rate.is_finite() || !(0.0..1.0).contains(&rate) {
            return Err(QuoteError::InvalidInput(format!(
                "fuel surcharge rate must be in [0, 1), got {}",
                rate
            )));
        }
        validate_non_negative(context.distance_multiplier, "distance multiplier")?;

        let insurance = if surcharges.insurance_required {
            let declared = to_decimal(package.declared_value, "declared value")?;
            let rate = to_decimal(schedule.insurance_rate, "insurance rate")?;
            round_currency(checked(declared.checked_mul(rate), "insurance cost")?)
        } else {
            Decimal::ZERO
        };

        let signature = if surcharges.signature_required {
            round_currency(to_decimal(schedule.signature_fee, "signature fee")?)
        } else {
            Decimal::ZERO
        };

        let fee = to_decimal(schedule.special_handling_fee, "special handling fee")?;
        let special_handling = round_currency(checked(
            fee.checked_mul(Decimal::from(surcharges.special_handling_count)),
            "special handling cost",
        )?);

        Ok(Addons {
            fuel_rate: to_decimal(rate, "fuel surcharge rate")?,
            insurance,
            signature,
            special_handling,
            multiplier: to_decimal(context.distance_multiplier, "distance multiplier")?,
        })
    }

    /// Fuel is charged on the unrounded base cost; every component is then
    /// rounded to cents and the total is the rounded sum of those components.
    fn price_tier(
        &self,
        package: &PackageSpec,
        tier: &ServiceTier,
        addons: &Addons,
        context: &QuoteContext,
    ) -> Result<QuoteResult, QuoteError> {
        let divisor = self.divisor_for(tier, context.international);
        let volumetric = volumetric_weight(package, divisor)?;
        let billable_weight = package.weight.max(volumetric);

        let rate = to_decimal(tier.base_rate_per_unit_weight, "base rate")?;
        let weight = to_decimal(billable_weight, "billable weight")?;
        let base = checked(
            rate.checked_mul(weight)
                .and_then(|v| v.checked_mul(addons.multiplier)),
            "base cost",
        )?;
        let fuel = round_currency(checked(base.checked_mul(addons.fuel_rate), "fuel surcharge")?);
        let base = round_currency(base);

        let total = [addons.insurance, addons.signature, addons.special_handling]
            .into_iter()
            .try_fold(checked(base.checked_add(fuel), "total cost")?, |acc, part| {
                checked(acc.checked_add(part), "total cost")
            })?;
        let total = round_currency(total);

        let transit = tier.estimated_transit_days;
        let estimated_delivery_date = add_days(context.today, transit.earliest())?;
        let latest_delivery_date = if transit.is_range() {
            Some(add_days(context.today, transit.latest())?)
        } else {
            None
        };

        Ok(QuoteResult {
            service_id: tier.id.clone(),
            service_name: tier.name.clone(),
            billable_weight,
            base_cost: to_f64(base)?,
            fuel_surcharge: to_f64(fuel)?,
            insurance_cost: to_f64(addons.insurance)?,
            signature_cost: to_f64(addons.signature)?,
            special_handling_cost: to_f64(addons.special_handling)?,
            total_cost: to_f64(total)?,
            estimated_delivery_date,
            latest_delivery_date,
            features: tier.features.clone(),
        })
    }
}

fn add_days(today: NaiveDate, days: u32) -> Result<NaiveDate, QuoteError> {
    today
        .checked_add_days(Days::new(u64::from(days)))
        .ok_or_else(|| QuoteError::InvalidInput(format!("delivery date out of range: {} + {} days", today, days)))
}

fn validate_non_negative(value: f64, field: &str) -> Result<(), QuoteError> {
    if !value.is_finite() || value < 0.0 {
        return Err(QuoteError::InvalidInput(format!(
            "{} must be a non-negative number, got {}",
            field, value
        )));
    }
    Ok(())
}

fn validate_divisor(value: f64, field: &str) -> Result<(), QuoteError> {
    if !value.is_finite() || value <= 0.0 {
        return Err(QuoteError::InvalidInput(format!(
            "{} must be positive, got {}",
            field, value
        )));
    }
    Ok(())
}

fn validate_tier(tier: &ServiceTier) -> Result<(), QuoteError> {
    validate_non_negative(
        tier.base_rate_per_unit_weight,
        &format!("base rate of service '{}'", tier.id),
    )?;
    if let Some(divisor) = tier.volumetric_divisor {
        validate_divisor(divisor, &format!("volumetric divisor of service '{}'", tier.id))?;
    }
    Ok(())
}
