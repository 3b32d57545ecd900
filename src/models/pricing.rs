use serde::{Deserialize, Serialize};

/// Price after a given contract month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubsequentCost {
    pub monthly_cost_in_cent: i32,
    /// First month billed at the subsequent price.
    pub start_month: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AbsoluteDiscount {
    pub value_in_cent: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_order_value_in_cent: Option<i32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PercentageDiscount {
    pub percentage: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_discount_in_cent: Option<i32>,
}

/// Either discount kind, tagged by `type` on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Discount {
    Absolute(AbsoluteDiscount),
    Percentage(PercentageDiscount),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pricing {
    pub monthly_cost_in_cent: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contract_duration_in_months: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_contract_duration_in_months: Option<i32>,
    /// The server spells this field `maxAgeInJears`.
    #[serde(
        default,
        rename = "maxAgeInJears",
        alias = "maxAgeInYears",
        skip_serializing_if = "Option::is_none"
    )]
    pub max_age_in_years: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_age_in_years: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_order_value_in_cent: Option<i32>,
    #[serde(default)]
    pub installation_service_included: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subsequent_costs: Option<SubsequentCost>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub absolute_discount: Option<AbsoluteDiscount>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub percentage_discount: Option<PercentageDiscount>,
}

/// Effective monthly price over a contract horizon.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AverageMonthlyCost {
    pub monthly_cost_in_cent: i64,
    pub duration_in_months: i64,
}

/// Horizon used when the offer has no longer minimum term.
const MIN_HORIZON_MONTHS: i64 = 24;

impl Pricing {
    /// Discounts in application order: percentage first, then absolute.
    pub fn discounts(&self) -> Vec<Discount> {
        self.percentage_discount
            .map(Discount::Percentage)
            .into_iter()
            .chain(self.absolute_discount.map(Discount::Absolute))
            .collect()
    }

    /// Average monthly cost after discounts.
    ///
    /// The horizon is the minimum contract duration but at least 24 months,
    /// capped by the contract duration when one is set. The initial price runs
    /// until the subsequent price starts. Percentage discounts (capped by
    /// `max_discount_in_cent`) apply to the total before absolute discounts.
    pub fn average_monthly_cost(&self) -> AverageMonthlyCost {
        let monthly = i64::from(self.monthly_cost_in_cent);
        if monthly <= 0 {
            return AverageMonthlyCost::default();
        }

        let mut duration = i64::from(self.min_contract_duration_in_months.unwrap_or(0))
            .max(MIN_HORIZON_MONTHS);
        if let Some(contract) = self.contract_duration_in_months.filter(|m| *m > 0) {
            duration = duration.min(i64::from(contract));
        }

        let mut total = match self.subsequent_costs {
            Some(sub) => {
                let initial_months = i64::from(sub.start_month);
                monthly * initial_months
                    + i64::from(sub.monthly_cost_in_cent) * (duration - initial_months)
            }
            None => monthly * duration,
        } as f64;

        for discount in self.discounts() {
            match discount {
                Discount::Percentage(p) if p.percentage != 0 => {
                    let mut amount = total * f64::from(p.percentage) / 100.0;
                    if let Some(cap) = p.max_discount_in_cent {
                        amount = amount.min(f64::from(cap));
                    }
                    total -= amount;
                }
                Discount::Absolute(a) => total -= f64::from(a.value_in_cent),
                Discount::Percentage(_) => {}
            }
        }

        AverageMonthlyCost {
            monthly_cost_in_cent: (total / duration as f64).round() as i64,
            duration_in_months: duration,
        }
    }
}
