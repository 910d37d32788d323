use serde::Deserialize;
use thiserror::Error;

use crate::core::{
    BenefitsTable, ComparisonLocation, InputSnapshot, Jurisdiction, TransportMode, benefits_for,
    default_snapshot,
};

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum InputError {
    #[error("{field} must be >= 0")]
    Negative { field: &'static str },
    #[error("{field} must be a finite number")]
    NotFinite { field: &'static str },
    #[error("loanTerm must be > 0")]
    ZeroLoanTerm,
    #[error("commuteDaysPerWeek must be between 0 and 7")]
    DaysPerWeek,
}

/// Request body for `/api/calculate`. Every key is optional and falls back
/// to the default snapshot.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CalculatePayload {
    state: Option<Jurisdiction>,
    is_first_home: Option<bool>,
    property_name: Option<String>,
    purchase_price: Option<f64>,
    stamp_duty: Option<f64>,
    lmi: Option<f64>,
    first_home_grant: Option<f64>,
    stamp_duty_concession: Option<f64>,

    has_partner: Option<bool>,
    your_deposit: Option<f64>,
    partner_deposit: Option<f64>,

    interest_rate: Option<f64>,
    loan_term: Option<u32>,

    council_rates: Option<f64>,
    water_rates: Option<f64>,
    strata_fees: Option<f64>,
    insurance: Option<f64>,
    maintenance_percent: Option<f64>,

    legal_fees: Option<f64>,
    inspection: Option<f64>,
    loan_application: Option<f64>,
    valuation: Option<f64>,
    mortgage_reg: Option<f64>,
    title_fees: Option<f64>,
    moving: Option<f64>,
    repairs: Option<f64>,

    property_growth_rate: Option<f64>,
    rate_increase_year2: Option<f64>,

    scenario_price_change: Option<f64>,
    scenario_rate_change: Option<f64>,
    scenario_growth_change: Option<f64>,

    your_annual_income: Option<f64>,
    partner_annual_income: Option<f64>,

    commute_distance_km: Option<f64>,
    commute_duration_minutes: Option<f64>,
    commute_days_per_week: Option<u32>,
    transport_mode: Option<TransportMode>,
    car_cost_per_km: Option<f64>,
    car_parking_daily: Option<f64>,
    monthly_transit_pass: Option<f64>,

    partner_commute_distance_km: Option<f64>,
    partner_commute_duration_minutes: Option<f64>,
    partner_transport_mode: Option<TransportMode>,

    monthly_groceries: Option<f64>,
    monthly_dining_out: Option<f64>,
    monthly_utilities: Option<f64>,
    monthly_internet: Option<f64>,
    monthly_subscriptions: Option<f64>,
    monthly_health_insurance: Option<f64>,
    monthly_other_expenses: Option<f64>,

    comparison_enabled: Option<bool>,
    comparison_property_address: Option<String>,
    comparison_commute_distance_km: Option<f64>,
    comparison_commute_duration_minutes: Option<f64>,
    comparison_purchase_price: Option<f64>,
    comparison_stamp_duty: Option<f64>,
}

fn set<T>(slot: &mut T, value: Option<T>) {
    if let Some(v) = value {
        *slot = v;
    }
}

/// Overlays the payload on the default snapshot. A grant or concession the
/// caller leaves out is resolved from `benefits` for the chosen jurisdiction.
pub fn build_snapshot(
    payload: CalculatePayload,
    benefits: &BenefitsTable,
) -> Result<InputSnapshot, InputError> {
    let mut input = default_snapshot();

    set(&mut input.jurisdiction, payload.state);
    set(&mut input.is_first_home, payload.is_first_home);
    set(&mut input.property_name, payload.property_name);
    set(&mut input.purchase_price, payload.purchase_price);
    set(&mut input.stamp_duty, payload.stamp_duty);
    set(&mut input.lender_insurance, payload.lmi);

    let resolved = benefits_for(input.jurisdiction, true, Some(benefits));
    input.first_home_grant = payload.first_home_grant.unwrap_or(resolved.grant);
    input.stamp_duty_concession = payload
        .stamp_duty_concession
        .unwrap_or(resolved.stamp_duty_concession);

    set(&mut input.has_partner, payload.has_partner);
    set(&mut input.your_deposit, payload.your_deposit);
    set(&mut input.partner_deposit, payload.partner_deposit);

    set(&mut input.interest_rate, payload.interest_rate);
    set(&mut input.loan_term_years, payload.loan_term);

    set(&mut input.council_rates, payload.council_rates);
    set(&mut input.water_rates, payload.water_rates);
    set(&mut input.strata_fees, payload.strata_fees);
    set(&mut input.building_insurance, payload.insurance);
    set(&mut input.maintenance_percent, payload.maintenance_percent);

    set(&mut input.legal_fees, payload.legal_fees);
    set(&mut input.inspection, payload.inspection);
    set(&mut input.loan_application, payload.loan_application);
    set(&mut input.valuation, payload.valuation);
    set(&mut input.mortgage_registration, payload.mortgage_reg);
    set(&mut input.title_fees, payload.title_fees);
    set(&mut input.moving, payload.moving);
    set(&mut input.repairs, payload.repairs);

    set(&mut input.property_growth_rate, payload.property_growth_rate);
    set(&mut input.rate_increase_year2, payload.rate_increase_year2);

    set(&mut input.scenario_price_change, payload.scenario_price_change);
    set(&mut input.scenario_rate_change, payload.scenario_rate_change);
    set(&mut input.scenario_growth_change, payload.scenario_growth_change);

    set(&mut input.your_annual_income, payload.your_annual_income);
    set(&mut input.partner_annual_income, payload.partner_annual_income);

    let commute = &mut input.commute;
    set(&mut commute.distance_km, payload.commute_distance_km);
    set(&mut commute.duration_minutes, payload.commute_duration_minutes);
    set(&mut commute.days_per_week, payload.commute_days_per_week);
    set(&mut commute.mode, payload.transport_mode);
    set(&mut commute.car_cost_per_km, payload.car_cost_per_km);
    set(&mut commute.parking_daily, payload.car_parking_daily);
    set(&mut commute.monthly_transit_pass, payload.monthly_transit_pass);

    let partner = &mut input.partner_commute;
    set(&mut partner.distance_km, payload.partner_commute_distance_km);
    set(&mut partner.duration_minutes, payload.partner_commute_duration_minutes);
    set(&mut partner.mode, payload.partner_transport_mode);

    let living = &mut input.living;
    set(&mut living.groceries, payload.monthly_groceries);
    set(&mut living.dining_out, payload.monthly_dining_out);
    set(&mut living.utilities, payload.monthly_utilities);
    set(&mut living.internet, payload.monthly_internet);
    set(&mut living.subscriptions, payload.monthly_subscriptions);
    set(&mut living.health_insurance, payload.monthly_health_insurance);
    set(&mut living.other, payload.monthly_other_expenses);

    if payload.comparison_enabled.unwrap_or(false) {
        input.comparison = Some(ComparisonLocation {
            label: payload.comparison_property_address.unwrap_or_default(),
            purchase_price: payload.comparison_purchase_price.unwrap_or(550_000.0),
            stamp_duty: payload.comparison_stamp_duty.unwrap_or(12_000.0),
            commute_distance_km: payload.comparison_commute_distance_km.unwrap_or(20.0),
            commute_duration_minutes: payload.comparison_commute_duration_minutes.unwrap_or(45.0),
        });
    }

    validate(&input)?;
    Ok(input)
}

/// Business sanity checks. The engine itself accepts anything numeric; this
/// is the layer that refuses nonsense before it gets there.
pub fn validate(input: &InputSnapshot) -> Result<(), InputError> {
    let mut non_negative = vec![
        ("purchasePrice", input.purchase_price),
        ("stampDuty", input.stamp_duty),
        ("lmi", input.lender_insurance),
        ("firstHomeGrant", input.first_home_grant),
        ("stampDutyConcession", input.stamp_duty_concession),
        ("yourDeposit", input.your_deposit),
        ("partnerDeposit", input.partner_deposit),
        ("interestRate", input.interest_rate),
        ("councilRates", input.council_rates),
        ("waterRates", input.water_rates),
        ("strataFees", input.strata_fees),
        ("insurance", input.building_insurance),
        ("maintenancePercent", input.maintenance_percent),
        ("legalFees", input.legal_fees),
        ("inspection", input.inspection),
        ("loanApplication", input.loan_application),
        ("valuation", input.valuation),
        ("mortgageReg", input.mortgage_registration),
        ("titleFees", input.title_fees),
        ("moving", input.moving),
        ("repairs", input.repairs),
        ("rateIncreaseYear2", input.rate_increase_year2),
        ("yourAnnualIncome", input.your_annual_income),
        ("partnerAnnualIncome", input.partner_annual_income),
        ("commuteDistanceKm", input.commute.distance_km),
        ("commuteDurationMinutes", input.commute.duration_minutes),
        ("carCostPerKm", input.commute.car_cost_per_km),
        ("carParkingDaily", input.commute.parking_daily),
        ("monthlyTransitPass", input.commute.monthly_transit_pass),
        ("partnerCommuteDistanceKm", input.partner_commute.distance_km),
        (
            "partnerCommuteDurationMinutes",
            input.partner_commute.duration_minutes,
        ),
        ("monthlyGroceries", input.living.groceries),
        ("monthlyDiningOut", input.living.dining_out),
        ("monthlyUtilities", input.living.utilities),
        ("monthlyInternet", input.living.internet),
        ("monthlySubscriptions", input.living.subscriptions),
        ("monthlyHealthInsurance", input.living.health_insurance),
        ("monthlyOtherExpenses", input.living.other),
    ];
    if let Some(other) = &input.comparison {
        non_negative.extend([
            ("comparisonPurchasePrice", other.purchase_price),
            ("comparisonStampDuty", other.stamp_duty),
            ("comparisonCommuteDistanceKm", other.commute_distance_km),
            (
                "comparisonCommuteDurationMinutes",
                other.commute_duration_minutes,
            ),
        ]);
    }

    let signed = [
        ("propertyGrowthRate", input.property_growth_rate),
        ("scenarioPriceChange", input.scenario_price_change),
        ("scenarioRateChange", input.scenario_rate_change),
        ("scenarioGrowthChange", input.scenario_growth_change),
    ];

    for &(field, value) in non_negative.iter().chain(signed.iter()) {
        if !value.is_finite() {
            return Err(InputError::NotFinite { field });
        }
    }
    for &(field, value) in &non_negative {
        if value < 0.0 {
            return Err(InputError::Negative { field });
        }
    }

    if input.loan_term_years == 0 {
        return Err(InputError::ZeroLoanTerm);
    }
    if input.commute.days_per_week > 7 {
        return Err(InputError::DaysPerWeek);
    }
    Ok(())
}
