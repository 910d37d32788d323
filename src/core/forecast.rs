use super::defaults::MILESTONE_YEARS;
use super::mortgage::amortized_payment;
use super::types::{CostSnapshot, ForecastRow, ForecastSummary};

/// Projects a cost snapshot forward one row per year, `0..=horizon_years`.
///
/// Each year re-amortizes the current balance over the months left in the
/// horizon at that year's rate: the base rate in year 1, base plus
/// `rate_bump_from_year2` afterwards. Interest is charged annually on the
/// opening balance. Whatever that approximation leaves outstanding in the
/// final year is settled with it, so the loan closes at the horizon and the
/// last row's `principal_paid` carries that settlement.
///
/// Non-mortgage ongoing costs are held flat for the whole horizon.
pub fn project(
    costs: &CostSnapshot,
    horizon_years: u32,
    growth_rate: f64,
    rate_bump_from_year2: f64,
) -> Vec<ForecastRow> {
    let mut rows = Vec::with_capacity(horizon_years as usize + 1);
    rows.push(ForecastRow {
        year: 0,
        interest_rate: costs.interest_rate,
        property_value: costs.purchase_price,
        loan_balance: costs.total_loan,
        equity: costs.purchase_price - costs.total_loan,
        principal_paid: 0.0,
        interest_paid: 0.0,
        cumulative_cost: costs.upfront_cash_needed,
        net_position: costs.purchase_price - costs.upfront_cash_needed,
    });

    let non_mortgage_annual = costs.annual_costs - costs.monthly_mortgage * 12.0;

    for year in 1..=horizon_years {
        let prev = &rows[rows.len() - 1];
        let rate = if year == 1 {
            costs.interest_rate
        } else {
            costs.interest_rate + rate_bump_from_year2
        };

        let property_value = prev.property_value * (1.0 + growth_rate / 100.0);

        let (principal_paid, interest_paid, loan_balance) = if prev.loan_balance > 0.0 {
            let remaining_months = f64::from(horizon_years - year + 1) * 12.0;
            let monthly_pmt = amortized_payment(prev.loan_balance, rate / 100.0 / 12.0, remaining_months);
            let annual_interest = prev.loan_balance * rate / 100.0;
            let annual_principal = if year == horizon_years {
                prev.loan_balance
            } else {
                prev.loan_balance.min(monthly_pmt * 12.0 - annual_interest)
            };
            (
                annual_principal,
                annual_interest,
                (prev.loan_balance - annual_principal).max(0.0),
            )
        } else {
            (0.0, 0.0, 0.0)
        };

        let annual_cost = principal_paid + interest_paid + non_mortgage_annual;
        let cumulative_cost = prev.cumulative_cost + annual_cost;

        rows.push(ForecastRow {
            year,
            interest_rate: rate,
            property_value,
            loan_balance,
            equity: property_value - loan_balance,
            principal_paid,
            interest_paid,
            cumulative_cost,
            net_position: property_value - cumulative_cost,
        });
    }

    tracing::debug!(
        horizon_years,
        growth_rate,
        rate_bump_from_year2,
        "projected forecast"
    );
    rows
}

/// Net position at `year`, or 0 when the forecast is shorter than that.
pub fn net_position_at(rows: &[ForecastRow], year: usize) -> f64 {
    rows.get(year).map_or(0.0, |row| row.net_position)
}

pub fn paid_off_year(rows: &[ForecastRow]) -> Option<u32> {
    rows.iter()
        .skip(1)
        .find(|row| row.loan_balance <= 0.0)
        .map(|row| row.year)
}

pub fn milestones(rows: &[ForecastRow]) -> Vec<ForecastRow> {
    rows.iter()
        .filter(|row| MILESTONE_YEARS.contains(&row.year))
        .cloned()
        .collect()
}

pub fn summarize(rows: &[ForecastRow]) -> ForecastSummary {
    let year_10 = rows.get(10);
    ForecastSummary {
        paid_off_year: paid_off_year(rows),
        value_year_10: year_10.map_or(0.0, |row| row.property_value),
        equity_year_10: year_10.map_or(0.0, |row| row.equity),
        total_interest: rows.iter().map(|row| row.interest_paid).sum(),
        milestones: milestones(rows),
    }
}
