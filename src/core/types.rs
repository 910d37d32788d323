use serde::{Deserialize, Serialize};

use super::jurisdiction::Jurisdiction;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransportMode {
    Drive,
    Transit,
    Mix,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommuteParams {
    pub distance_km: f64,
    pub duration_minutes: f64,
    pub days_per_week: u32,
    pub mode: TransportMode,
    pub car_cost_per_km: f64,
    pub parking_daily: f64,
    pub monthly_transit_pass: f64,
}

/// Partner commute shares days, car cost, parking and transit pass with the
/// primary commute.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PartnerCommute {
    pub distance_km: f64,
    pub duration_minutes: f64,
    pub mode: TransportMode,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LivingExpenses {
    pub groceries: f64,
    pub dining_out: f64,
    pub utilities: f64,
    pub internet: f64,
    pub subscriptions: f64,
    pub health_insurance: f64,
    pub other: f64,
}

impl LivingExpenses {
    pub fn monthly_total(&self) -> f64 {
        self.groceries
            + self.dining_out
            + self.utilities
            + self.internet
            + self.subscriptions
            + self.health_insurance
            + self.other
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonLocation {
    pub label: String,
    pub purchase_price: f64,
    pub stamp_duty: f64,
    pub commute_distance_km: f64,
    pub commute_duration_minutes: f64,
}

/// Every user-adjustable parameter for one evaluation.
///
/// Rates and percentages are stored as percent values (6.15 means 6.15%).
/// Grant and concession are already resolved for the jurisdiction; the engine
/// only applies them when `is_first_home` is set.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InputSnapshot {
    pub jurisdiction: Jurisdiction,
    pub is_first_home: bool,
    pub property_name: String,
    pub purchase_price: f64,
    pub stamp_duty: f64,
    pub lender_insurance: f64,
    pub first_home_grant: f64,
    pub stamp_duty_concession: f64,

    pub has_partner: bool,
    pub your_deposit: f64,
    pub partner_deposit: f64,

    pub interest_rate: f64,
    pub loan_term_years: u32,

    pub council_rates: f64,
    pub water_rates: f64,
    pub strata_fees: f64,
    pub building_insurance: f64,
    pub maintenance_percent: f64,

    pub legal_fees: f64,
    pub inspection: f64,
    pub loan_application: f64,
    pub valuation: f64,
    pub mortgage_registration: f64,
    pub title_fees: f64,
    pub moving: f64,
    pub repairs: f64,

    pub property_growth_rate: f64,
    pub rate_increase_year2: f64,

    pub scenario_price_change: f64,
    pub scenario_rate_change: f64,
    pub scenario_growth_change: f64,

    pub your_annual_income: f64,
    pub partner_annual_income: f64,

    pub commute: CommuteParams,
    pub partner_commute: PartnerCommute,
    pub living: LivingExpenses,
    pub comparison: Option<ComparisonLocation>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CostSnapshot {
    pub property_name: String,
    pub jurisdiction: Jurisdiction,
    pub purchase_price: f64,

    pub total_deposit: f64,
    pub base_loan: f64,
    pub lender_insurance: f64,
    pub total_loan: f64,
    pub lvr: f64,

    pub first_home_grant: f64,
    pub stamp_duty_concession: f64,
    pub total_benefits: f64,

    pub stamp_duty_before: f64,
    pub stamp_duty_after: f64,
    pub other_upfront: f64,
    pub upfront_cash_needed: f64,

    pub monthly_mortgage: f64,
    pub monthly_rates: f64,
    pub monthly_strata: f64,
    pub monthly_insurance: f64,
    pub monthly_maintenance: f64,
    pub total_monthly: f64,
    pub annual_costs: f64,

    pub interest_rate: f64,
    pub loan_term_years: u32,
    pub maintenance_percent: f64,
    pub council_rates: f64,
    pub water_rates: f64,
}

/// One projected year. Row 0 is the purchase itself.
///
/// In the final year of the horizon `principal_paid` also settles whatever
/// balance the yearly approximation left outstanding, so it jumps above the
/// preceding years.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastRow {
    pub year: u32,
    pub interest_rate: f64,
    pub property_value: f64,
    pub loan_balance: f64,
    pub equity: f64,
    pub principal_paid: f64,
    pub interest_paid: f64,
    pub cumulative_cost: f64,
    pub net_position: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastSummary {
    pub paid_off_year: Option<u32>,
    pub value_year_10: f64,
    pub equity_year_10: f64,
    pub total_interest: f64,
    pub milestones: Vec<ForecastRow>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioResult {
    pub name: String,
    pub price_add: f64,
    pub rate_add: f64,
    pub total_monthly: f64,
    pub upfront_cash: f64,
    pub net_position_10yr: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScenarioShock {
    pub price_change: f64,
    pub rate_change: f64,
    pub growth_change: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomScenarioResult {
    pub base: CostSnapshot,
    pub scenario: CostSnapshot,
    pub base_forecast: Vec<ForecastRow>,
    pub scenario_forecast: Vec<ForecastRow>,
    pub monthly_diff: f64,
    pub upfront_diff: f64,
    pub net_position_10yr_diff: f64,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskSeverity {
    Info,
    Warning,
    Danger,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommuteHours {
    pub weekly: f64,
    pub annual: f64,
    pub ten_year: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CostOfLivingResult {
    pub daily_commute_km: f64,
    pub daily_commute_minutes: f64,
    pub weekly_commute_hours: f64,
    pub monthly_transport_cost: f64,
    pub annual_transport_cost: f64,
    pub monthly_living_expenses: f64,
    pub total_monthly_cost_of_living: f64,
    pub total_monthly_all_in: f64,
    pub annual_all_in: f64,
    pub ten_year_all_in: f64,
    pub annual_commute_hours: f64,
    pub ten_year_commute_hours: f64,
    pub partner_monthly_transport_cost: f64,
    pub partner_annual_commute_hours: f64,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
pub enum CheaperOption {
    A,
    B,
    #[serde(rename = "same")]
    Same,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationSummary {
    pub label: String,
    pub monthly_property: f64,
    pub monthly_transport: f64,
    pub monthly_living: f64,
    pub monthly_total: f64,
    pub annual_total: f64,
    pub commute_hours_per_year: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationComparisonResult {
    pub property_a: LocationSummary,
    pub property_b: LocationSummary,
    pub monthly_savings: f64,
    pub annual_savings: f64,
    pub ten_year_savings: f64,
    pub commute_time_diff_hours_per_year: f64,
    pub cheaper_option: CheaperOption,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HousingBand {
    Comfortable,
    Stretched,
    Severe,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AffordabilityResult {
    pub monthly_income: f64,
    pub housing_percent: f64,
    pub transport_percent: f64,
    pub living_percent: f64,
    pub total_percent: f64,
    pub monthly_leftover: f64,
    pub housing_band: HousingBand,
}
