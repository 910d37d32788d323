use super::jurisdiction::Jurisdiction;
use super::types::{CommuteParams, InputSnapshot, LivingExpenses, PartnerCommute, TransportMode};

pub const DEFAULT_HORIZON_YEARS: u32 = 30;
pub const MILESTONE_YEARS: [u32; 7] = [1, 5, 10, 15, 20, 25, 30];

/// Starting snapshot for a first-home buyer in WA; API payloads override
/// individual fields on top of it.
pub fn default_snapshot() -> InputSnapshot {
    let jurisdiction = Jurisdiction::Wa;
    let benefits = jurisdiction.default_benefits();
    InputSnapshot {
        jurisdiction,
        is_first_home: true,
        property_name: "My Property".to_string(),
        purchase_price: 500_000.0,
        stamp_duty: 10_500.0,
        lender_insurance: 0.0,
        first_home_grant: benefits.grant,
        stamp_duty_concession: benefits.stamp_duty_concession,

        has_partner: false,
        your_deposit: 50_000.0,
        partner_deposit: 0.0,

        interest_rate: 6.15,
        loan_term_years: 30,

        council_rates: 1_300.0,
        water_rates: 850.0,
        strata_fees: 0.0,
        building_insurance: 950.0,
        maintenance_percent: 1.0,

        legal_fees: 2_000.0,
        inspection: 600.0,
        loan_application: 600.0,
        valuation: 300.0,
        mortgage_registration: 165.0,
        title_fees: 250.0,
        moving: 1_500.0,
        repairs: 5_000.0,

        property_growth_rate: 5.0,
        rate_increase_year2: 0.5,

        scenario_price_change: 0.0,
        scenario_rate_change: 0.0,
        scenario_growth_change: 0.0,

        your_annual_income: 57_000.0,
        partner_annual_income: 0.0,

        commute: CommuteParams {
            distance_km: 15.0,
            duration_minutes: 30.0,
            days_per_week: 5,
            mode: TransportMode::Drive,
            car_cost_per_km: 0.85,
            parking_daily: 0.0,
            monthly_transit_pass: 170.0,
        },
        partner_commute: PartnerCommute {
            distance_km: 0.0,
            duration_minutes: 0.0,
            mode: TransportMode::Drive,
        },
        living: LivingExpenses {
            groceries: 600.0,
            dining_out: 200.0,
            utilities: 300.0,
            internet: 80.0,
            subscriptions: 50.0,
            health_insurance: 200.0,
            other: 100.0,
        },
        comparison: None,
    }
}
