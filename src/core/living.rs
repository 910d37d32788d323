use super::costs::{monthly_maintenance, monthly_total};
use super::mortgage::monthly_payment;
use super::types::{
    AffordabilityResult, CheaperOption, CommuteHours, CommuteParams, ComparisonLocation,
    CostOfLivingResult, CostSnapshot, HousingBand, InputSnapshot, LocationComparisonResult,
    LocationSummary, TransportMode,
};

const WEEKS_PER_MONTH: f64 = 52.0 / 12.0;
const MIX_DRIVE_DAYS: u32 = 3;
const SAME_COST_TOLERANCE: f64 = 1.0;

/// Per-commuter running costs that do not depend on the route.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransportRates {
    pub car_cost_per_km: f64,
    pub parking_daily: f64,
    pub monthly_transit_pass: f64,
}

impl From<&CommuteParams> for TransportRates {
    fn from(commute: &CommuteParams) -> Self {
        Self {
            car_cost_per_km: commute.car_cost_per_km,
            parking_daily: commute.parking_daily,
            monthly_transit_pass: commute.monthly_transit_pass,
        }
    }
}

/// Monthly transport spend for one commuter.
///
/// `Mix` always charges three driving days (fewer if the week is shorter)
/// on top of the full transit pass.
pub fn transport_cost(
    distance_km: f64,
    days_per_week: u32,
    mode: TransportMode,
    rates: TransportRates,
) -> f64 {
    match mode {
        TransportMode::Drive => driving_cost(distance_km, days_per_week, rates),
        TransportMode::Transit => rates.monthly_transit_pass,
        TransportMode::Mix => {
            rates.monthly_transit_pass
                + driving_cost(distance_km, days_per_week.min(MIX_DRIVE_DAYS), rates)
        }
    }
}

fn driving_cost(distance_km: f64, days: u32, rates: TransportRates) -> f64 {
    let days = f64::from(days);
    let fuel = distance_km * 2.0 * rates.car_cost_per_km * days * WEEKS_PER_MONTH;
    let parking = rates.parking_daily * days * WEEKS_PER_MONTH;
    fuel + parking
}

pub fn commute_hours(duration_minutes_one_way: f64, days_per_week: u32) -> CommuteHours {
    let weekly = duration_minutes_one_way * 2.0 * f64::from(days_per_week) / 60.0;
    let annual = weekly * 52.0;
    CommuteHours {
        weekly,
        annual,
        ten_year: annual * 10.0,
    }
}

/// Commute and living expenses layered over the property's monthly cost.
pub fn cost_of_living(input: &InputSnapshot, total_monthly_property_cost: f64) -> CostOfLivingResult {
    let commute = &input.commute;
    let rates = TransportRates::from(commute);
    let monthly_transport_cost = transport_cost(
        commute.distance_km,
        commute.days_per_week,
        commute.mode,
        rates,
    );

    let (partner_monthly_transport_cost, partner_annual_commute_hours) =
        if input.has_partner && input.partner_commute.distance_km > 0.0 {
            let partner = &input.partner_commute;
            (
                transport_cost(partner.distance_km, commute.days_per_week, partner.mode, rates),
                commute_hours(partner.duration_minutes, commute.days_per_week).annual,
            )
        } else {
            (0.0, 0.0)
        };

    let monthly_living_expenses = input.living.monthly_total();
    let total_transport = monthly_transport_cost + partner_monthly_transport_cost;
    let total_monthly_cost_of_living = total_transport + monthly_living_expenses;
    let total_monthly_all_in = total_monthly_property_cost + total_monthly_cost_of_living;

    let hours = commute_hours(commute.duration_minutes, commute.days_per_week);

    CostOfLivingResult {
        daily_commute_km: commute.distance_km * 2.0,
        daily_commute_minutes: commute.duration_minutes * 2.0,
        weekly_commute_hours: hours.weekly,
        monthly_transport_cost: total_transport,
        annual_transport_cost: total_transport * 12.0,
        monthly_living_expenses,
        total_monthly_cost_of_living,
        total_monthly_all_in,
        annual_all_in: total_monthly_all_in * 12.0,
        ten_year_all_in: total_monthly_all_in * 12.0 * 10.0,
        annual_commute_hours: hours.annual,
        ten_year_commute_hours: hours.ten_year,
        partner_monthly_transport_cost,
        partner_annual_commute_hours,
    }
}

/// Compares the current property against an alternate location.
///
/// Location B reuses the current deposit, lender insurance, rate, term and
/// ongoing cost rates; only its price drives a fresh mortgage and maintenance
/// estimate. B's duty is carried for reporting but not costed.
pub fn location_comparison(
    input: &InputSnapshot,
    costs: &CostSnapshot,
    other: &ComparisonLocation,
) -> LocationComparisonResult {
    let commute = &input.commute;
    let rates = TransportRates::from(commute);
    let living = input.living.monthly_total();

    let transport_a = transport_cost(commute.distance_km, commute.days_per_week, commute.mode, rates);
    let hours_a = commute_hours(commute.duration_minutes, commute.days_per_week);
    let label_a = if input.property_name.trim().is_empty() {
        "Property A".to_string()
    } else {
        input.property_name.clone()
    };
    let property_a = location_summary(label_a, costs.total_monthly, transport_a, living, hours_a);

    let total_deposit = input.your_deposit + input.partner_deposit;
    let loan_b = (other.purchase_price - total_deposit).max(0.0) + input.lender_insurance;
    let mortgage_b = monthly_payment(loan_b, input.interest_rate, input.loan_term_years);
    let monthly_property_b = monthly_total(
        mortgage_b,
        costs.monthly_rates,
        costs.monthly_strata,
        costs.monthly_insurance,
        monthly_maintenance(other.purchase_price, input.maintenance_percent),
    );
    let transport_b = transport_cost(
        other.commute_distance_km,
        commute.days_per_week,
        commute.mode,
        rates,
    );
    let hours_b = commute_hours(other.commute_duration_minutes, commute.days_per_week);
    let label_b = if other.label.trim().is_empty() {
        "Property B".to_string()
    } else {
        other.label.clone()
    };
    let property_b = location_summary(label_b, monthly_property_b, transport_b, living, hours_b);

    let monthly_delta = property_a.monthly_total - property_b.monthly_total;
    let cheaper_option = if monthly_delta.abs() < SAME_COST_TOLERANCE {
        CheaperOption::Same
    } else if monthly_delta > 0.0 {
        CheaperOption::B
    } else {
        CheaperOption::A
    };
    let monthly_savings = monthly_delta.abs();

    LocationComparisonResult {
        commute_time_diff_hours_per_year: property_b.commute_hours_per_year
            - property_a.commute_hours_per_year,
        property_a,
        property_b,
        monthly_savings,
        annual_savings: monthly_savings * 12.0,
        ten_year_savings: monthly_savings * 12.0 * 10.0,
        cheaper_option,
    }
}

fn location_summary(
    label: String,
    monthly_property: f64,
    monthly_transport: f64,
    monthly_living: f64,
    hours: CommuteHours,
) -> LocationSummary {
    let monthly_total = monthly_property + monthly_transport + monthly_living;
    LocationSummary {
        label,
        monthly_property,
        monthly_transport,
        monthly_living,
        monthly_total,
        annual_total: monthly_total * 12.0,
        commute_hours_per_year: hours.annual,
    }
}

/// Share of take-home pay consumed by housing, transport and living costs.
pub fn income_affordability(
    input: &InputSnapshot,
    costs: &CostSnapshot,
    living: &CostOfLivingResult,
) -> AffordabilityResult {
    let partner_monthly = if input.has_partner {
        input.partner_annual_income / 12.0
    } else {
        0.0
    };
    let monthly_income = input.your_annual_income / 12.0 + partner_monthly;
    let percent_of = |amount: f64| {
        if monthly_income > 0.0 {
            amount / monthly_income * 100.0
        } else {
            0.0
        }
    };

    let housing_percent = percent_of(costs.total_monthly);
    let housing_band = if housing_percent <= 30.0 {
        HousingBand::Comfortable
    } else if housing_percent <= 40.0 {
        HousingBand::Stretched
    } else {
        HousingBand::Severe
    };

    AffordabilityResult {
        monthly_income,
        housing_percent,
        transport_percent: percent_of(living.monthly_transport_cost),
        living_percent: percent_of(living.monthly_living_expenses),
        total_percent: percent_of(living.total_monthly_all_in),
        monthly_leftover: monthly_income - living.total_monthly_all_in,
        housing_band,
    }
}
