use super::mortgage::monthly_payment;
use super::types::{CostSnapshot, InputSnapshot};

/// Point-in-time purchase costs for a snapshot.
///
/// Total over its numeric domain: a zero price gives an LVR of 0, negative
/// inputs flow through to well-defined but meaningless figures.
pub fn compute_costs(input: &InputSnapshot) -> CostSnapshot {
    let total_deposit = input.your_deposit + input.partner_deposit;
    let other_upfront = input.legal_fees
        + input.inspection
        + input.loan_application
        + input.valuation
        + input.mortgage_registration
        + input.title_fees
        + input.moving
        + input.repairs;

    let (grant, concession) = if input.is_first_home {
        (input.first_home_grant, input.stamp_duty_concession)
    } else {
        (0.0, 0.0)
    };

    let base_loan = (input.purchase_price - total_deposit).max(0.0);
    let total_loan = base_loan + input.lender_insurance;
    let lvr = loan_to_value(total_loan, input.purchase_price);

    let stamp_duty_after = (input.stamp_duty - concession).max(0.0);
    let upfront_cash_needed = total_deposit + stamp_duty_after + other_upfront - grant;

    let monthly_mortgage = monthly_payment(total_loan, input.interest_rate, input.loan_term_years);
    let monthly_rates = (input.council_rates + input.water_rates) / 12.0;
    let monthly_strata = input.strata_fees / 12.0;
    let monthly_insurance = input.building_insurance / 12.0;
    let monthly_maintenance = monthly_maintenance(input.purchase_price, input.maintenance_percent);

    let total_monthly = monthly_total(
        monthly_mortgage,
        monthly_rates,
        monthly_strata,
        monthly_insurance,
        monthly_maintenance,
    );

    tracing::debug!(
        purchase_price = input.purchase_price,
        total_loan,
        lvr,
        upfront_cash_needed,
        total_monthly,
        "computed property costs"
    );

    CostSnapshot {
        property_name: input.property_name.clone(),
        jurisdiction: input.jurisdiction,
        purchase_price: input.purchase_price,
        total_deposit,
        base_loan,
        lender_insurance: input.lender_insurance,
        total_loan,
        lvr,
        first_home_grant: grant,
        stamp_duty_concession: concession,
        total_benefits: grant + concession,
        stamp_duty_before: input.stamp_duty,
        stamp_duty_after,
        other_upfront,
        upfront_cash_needed,
        monthly_mortgage,
        monthly_rates,
        monthly_strata,
        monthly_insurance,
        monthly_maintenance,
        total_monthly,
        annual_costs: total_monthly * 12.0,
        interest_rate: input.interest_rate,
        loan_term_years: input.loan_term_years,
        maintenance_percent: input.maintenance_percent,
        council_rates: input.council_rates,
        water_rates: input.water_rates,
    }
}

pub(crate) fn loan_to_value(total_loan: f64, purchase_price: f64) -> f64 {
    if purchase_price == 0.0 {
        0.0
    } else {
        total_loan / purchase_price * 100.0
    }
}

pub(crate) fn monthly_maintenance(purchase_price: f64, maintenance_percent: f64) -> f64 {
    (purchase_price * maintenance_percent / 100.0) / 12.0
}

// Summation order is shared with the scenario engine so zero-shock scenarios
// reproduce the base total bit for bit.
pub(crate) fn monthly_total(
    mortgage: f64,
    rates: f64,
    strata: f64,
    insurance: f64,
    maintenance: f64,
) -> f64 {
    mortgage + rates + strata + insurance + maintenance
}
