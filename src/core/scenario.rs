use super::costs::{loan_to_value, monthly_maintenance, monthly_total};
use super::defaults::DEFAULT_HORIZON_YEARS;
use super::forecast::{net_position_at, project};
use super::mortgage::monthly_payment;
use super::types::{CostSnapshot, CustomScenarioResult, RiskSeverity, ScenarioResult, ScenarioShock};

const NET_POSITION_YEAR: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScenarioPreset {
    pub name: &'static str,
    pub price_add: f64,
    pub rate_add: f64,
    pub growth_override: Option<f64>,
}

pub const SCENARIO_PRESETS: [ScenarioPreset; 9] = [
    ScenarioPreset {
        name: "Current",
        price_add: 0.0,
        rate_add: 0.0,
        growth_override: None,
    },
    ScenarioPreset {
        name: "+$50K house",
        price_add: 50_000.0,
        rate_add: 0.0,
        growth_override: None,
    },
    ScenarioPreset {
        name: "+$100K house",
        price_add: 100_000.0,
        rate_add: 0.0,
        growth_override: None,
    },
    ScenarioPreset {
        name: "+1% rate",
        price_add: 0.0,
        rate_add: 1.0,
        growth_override: None,
    },
    ScenarioPreset {
        name: "+2% rate",
        price_add: 0.0,
        rate_add: 2.0,
        growth_override: None,
    },
    ScenarioPreset {
        name: "No growth (flat market)",
        price_add: 0.0,
        rate_add: 0.0,
        growth_override: Some(0.0),
    },
    ScenarioPreset {
        name: "Value drops 2%/yr",
        price_add: 0.0,
        rate_add: 0.0,
        growth_override: Some(-2.0),
    },
    ScenarioPreset {
        name: "Value drops 5%/yr",
        price_add: 0.0,
        rate_add: 0.0,
        growth_override: Some(-5.0),
    },
    ScenarioPreset {
        name: "Worst case (+$100K +2%)",
        price_add: 100_000.0,
        rate_add: 2.0,
        growth_override: None,
    },
];

/// Quick price/rate shock against a base snapshot.
///
/// Upfront cash moves by `price_add` only. Duty and first-home benefits are
/// left exactly as they were in `base`; [`custom_scenario`] is the path that
/// rescales duty and forfeits benefits.
pub fn scenario(
    base: &CostSnapshot,
    price_add: f64,
    rate_add: f64,
    growth: f64,
    rate_bump: f64,
) -> ScenarioResult {
    let new_price = base.purchase_price + price_add;
    let new_rate = base.interest_rate + rate_add;
    let total_loan = (new_price - base.total_deposit).max(0.0) + base.lender_insurance;

    let monthly_mortgage = monthly_payment(total_loan, new_rate, base.loan_term_years);
    let maintenance = monthly_maintenance(new_price, base.maintenance_percent);
    let total_monthly = monthly_total(
        monthly_mortgage,
        base.monthly_rates,
        base.monthly_strata,
        base.monthly_insurance,
        maintenance,
    );

    let shocked = CostSnapshot {
        purchase_price: new_price,
        total_loan,
        monthly_mortgage,
        monthly_maintenance: maintenance,
        total_monthly,
        annual_costs: total_monthly * 12.0,
        interest_rate: new_rate,
        upfront_cash_needed: base.upfront_cash_needed + price_add,
        ..base.clone()
    };

    let rows = project(&shocked, DEFAULT_HORIZON_YEARS, growth, rate_bump);

    ScenarioResult {
        name: String::new(),
        price_add,
        rate_add,
        total_monthly,
        upfront_cash: shocked.upfront_cash_needed,
        net_position_10yr: net_position_at(&rows, NET_POSITION_YEAR),
    }
}

/// Runs every fixed preset, substituting the preset's growth override when it
/// has one.
pub fn preset_scenarios(base: &CostSnapshot, growth: f64, rate_bump: f64) -> Vec<ScenarioResult> {
    SCENARIO_PRESETS
        .iter()
        .map(|preset| ScenarioResult {
            name: preset.name.to_string(),
            ..scenario(
                base,
                preset.price_add,
                preset.rate_add,
                preset.growth_override.unwrap_or(growth),
                rate_bump,
            )
        })
        .collect()
}

/// User-driven shock with eligibility modelling.
///
/// Stamp duty scales with the new price. Any price increase forfeits both the
/// first-home grant and the duty concession outright, regardless of size.
/// The scenario forecast grows at `growth + shock.growth_change`; the
/// baseline forecast at `growth`.
pub fn custom_scenario(
    base: &CostSnapshot,
    shock: ScenarioShock,
    growth: f64,
    rate_bump: f64,
) -> CustomScenarioResult {
    let new_price = base.purchase_price + shock.price_change;

    let scaled_duty = if shock.price_change == 0.0 || base.purchase_price == 0.0 {
        base.stamp_duty_before
    } else {
        new_price / base.purchase_price * base.stamp_duty_before
    };

    let forfeits_benefits = shock.price_change > 0.0;
    let concession = if forfeits_benefits {
        0.0
    } else {
        base.stamp_duty_concession
    };
    let grant = if forfeits_benefits {
        0.0
    } else {
        base.first_home_grant
    };

    let stamp_duty_after = (scaled_duty - concession).max(0.0);
    let upfront_cash_needed = base.total_deposit + stamp_duty_after + base.other_upfront - grant;

    let base_loan = (new_price - base.total_deposit).max(0.0);
    let total_loan = base_loan + base.lender_insurance;
    let new_rate = base.interest_rate + shock.rate_change;

    let monthly_mortgage = monthly_payment(total_loan, new_rate, base.loan_term_years);
    let maintenance = monthly_maintenance(new_price, base.maintenance_percent);
    let total_monthly = monthly_total(
        monthly_mortgage,
        base.monthly_rates,
        base.monthly_strata,
        base.monthly_insurance,
        maintenance,
    );

    let shocked = CostSnapshot {
        purchase_price: new_price,
        base_loan,
        total_loan,
        lvr: loan_to_value(total_loan, new_price),
        stamp_duty_before: scaled_duty,
        stamp_duty_after,
        stamp_duty_concession: concession,
        first_home_grant: grant,
        total_benefits: grant + concession,
        upfront_cash_needed,
        monthly_mortgage,
        monthly_maintenance: maintenance,
        total_monthly,
        annual_costs: total_monthly * 12.0,
        interest_rate: new_rate,
        ..base.clone()
    };

    let base_forecast = project(base, DEFAULT_HORIZON_YEARS, growth, rate_bump);
    let scenario_forecast = project(
        &shocked,
        DEFAULT_HORIZON_YEARS,
        growth + shock.growth_change,
        rate_bump,
    );

    let monthly_diff = shocked.total_monthly - base.total_monthly;
    let upfront_diff = shocked.upfront_cash_needed - base.upfront_cash_needed;
    let net_position_10yr_diff = net_position_at(&scenario_forecast, NET_POSITION_YEAR)
        - net_position_at(&base_forecast, NET_POSITION_YEAR);

    tracing::debug!(
        price_change = shock.price_change,
        rate_change = shock.rate_change,
        growth_change = shock.growth_change,
        monthly_diff,
        upfront_diff,
        "evaluated custom scenario"
    );

    CustomScenarioResult {
        base: base.clone(),
        scenario: shocked,
        base_forecast,
        scenario_forecast,
        monthly_diff,
        upfront_diff,
        net_position_10yr_diff,
    }
}

pub fn risk_severity(result: &CustomScenarioResult) -> RiskSeverity {
    if result.monthly_diff > 500.0 || result.upfront_diff > 20_000.0 {
        RiskSeverity::Danger
    } else if result.monthly_diff > 200.0 {
        RiskSeverity::Warning
    } else {
        RiskSeverity::Info
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::costs::compute_costs;
    use crate::core::defaults::default_snapshot;
    use proptest::prelude::{prop_assert, prop_assert_eq, proptest};

    const EPS: f64 = 1e-6;

    fn assert_approx(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() <= EPS,
            "expected {expected}, got {actual}"
        );
    }

    fn base_costs() -> CostSnapshot {
        compute_costs(&default_snapshot())
    }

    fn shock(price_change: f64, rate_change: f64) -> ScenarioShock {
        ScenarioShock {
            price_change,
            rate_change,
            growth_change: 0.0,
        }
    }

    #[test]
    fn zero_perturbation_scenario_reproduces_base_exactly() {
        let base = base_costs();
        let result = scenario(&base, 0.0, 0.0, 5.0, 0.5);

        assert_eq!(result.total_monthly, base.total_monthly);
        assert_eq!(result.upfront_cash, base.upfront_cash_needed);

        let rows = project(&base, DEFAULT_HORIZON_YEARS, 5.0, 0.5);
        assert_eq!(result.net_position_10yr, rows[10].net_position);
    }

    #[test]
    fn zero_perturbation_reproduces_base_when_deposit_exceeds_price() {
        let mut input = default_snapshot();
        input.your_deposit = 700_000.0;
        input.lender_insurance = 3_000.0;
        let base = compute_costs(&input);
        let result = scenario(&base, 0.0, 0.0, 5.0, 0.5);

        assert_eq!(result.total_monthly, base.total_monthly);
        assert_eq!(result.upfront_cash, base.upfront_cash_needed);
    }

    #[test]
    fn quick_scenario_keeps_duty_and_benefits_untouched() {
        let base = base_costs();
        let result = scenario(&base, 50_000.0, 0.0, 5.0, 0.5);

        // Only the price delta is added; concession and grant still apply.
        assert_approx(result.upfront_cash, base.upfront_cash_needed + 50_000.0);
    }

    #[test]
    fn custom_scenario_price_increase_forfeits_benefits() {
        let base = base_costs();
        assert!(base.first_home_grant > 0.0);

        let result = custom_scenario(&base, shock(1.0, 0.0), 5.0, 0.5);
        assert_eq!(result.scenario.first_home_grant, 0.0);
        assert_eq!(result.scenario.stamp_duty_concession, 0.0);
        assert_eq!(result.scenario.total_benefits, 0.0);
    }

    #[test]
    fn custom_scenario_scales_duty_with_price() {
        let base = base_costs();
        let result = custom_scenario(&base, shock(100_000.0, 0.0), 5.0, 0.5);

        let scaled = 600_000.0 / 500_000.0 * 10_500.0;
        assert_approx(result.scenario.stamp_duty_before, scaled);
        assert_approx(result.scenario.stamp_duty_after, scaled);
        assert_approx(
            result.scenario.upfront_cash_needed,
            base.total_deposit + scaled + base.other_upfront,
        );
        assert_approx(result.scenario.total_loan, 550_000.0);
        assert_approx(result.scenario.lvr, 550_000.0 / 600_000.0 * 100.0);
    }

    #[test]
    fn custom_scenario_price_decrease_keeps_benefits() {
        let base = base_costs();
        let result = custom_scenario(&base, shock(-50_000.0, 0.0), 5.0, 0.5);

        assert_eq!(result.scenario.first_home_grant, base.first_home_grant);
        assert_eq!(
            result.scenario.stamp_duty_concession,
            base.stamp_duty_concession
        );
        assert_approx(
            result.scenario.stamp_duty_before,
            450_000.0 / 500_000.0 * 10_500.0,
        );
    }

    #[test]
    fn quick_and_custom_paths_diverge_on_upfront_cash() {
        let base = base_costs();
        let quick = scenario(&base, 50_000.0, 0.0, 5.0, 0.5);
        let custom = custom_scenario(&base, shock(50_000.0, 0.0), 5.0, 0.5);

        assert_eq!(quick.total_monthly, custom.scenario.total_monthly);
        // Quick path: base upfront plus the raw price delta.
        assert_approx(quick.upfront_cash, 50_415.0 + 50_000.0);
        // Custom path: deposit + rescaled duty (no concession) + fees, no grant.
        assert_approx(
            custom.scenario.upfront_cash_needed,
            50_000.0 + 11_550.0 + 10_415.0,
        );
    }

    #[test]
    fn custom_scenario_rate_shock_reports_deltas() {
        let base = base_costs();
        let result = custom_scenario(&base, shock(0.0, 1.0), 5.0, 0.5);

        assert_eq!(result.upfront_diff, 0.0);
        assert!(result.monthly_diff > 0.0);
        assert!(result.net_position_10yr_diff < 0.0);
        assert_eq!(result.base_forecast.len(), 31);
        assert_eq!(result.scenario_forecast.len(), 31);
        assert_approx(
            result.net_position_10yr_diff,
            result.scenario_forecast[10].net_position - result.base_forecast[10].net_position,
        );
    }

    #[test]
    fn custom_scenario_growth_change_only_moves_scenario_forecast() {
        let base = base_costs();
        let result = custom_scenario(
            &base,
            ScenarioShock {
                growth_change: -3.0,
                ..ScenarioShock::default()
            },
            5.0,
            0.5,
        );

        assert_eq!(result.monthly_diff, 0.0);
        assert_approx(result.base_forecast[1].property_value, 525_000.0);
        assert_approx(result.scenario_forecast[1].property_value, 510_000.0);
        assert!(result.net_position_10yr_diff < 0.0);
    }

    #[test]
    fn presets_are_named_and_apply_growth_overrides() {
        let base = base_costs();
        let results = preset_scenarios(&base, 5.0, 0.5);

        assert_eq!(results.len(), SCENARIO_PRESETS.len());
        assert_eq!(results[0].name, "Current");
        assert_eq!(results[0].total_monthly, base.total_monthly);

        let flat = &results[5];
        assert_eq!(flat.name, "No growth (flat market)");
        let direct = scenario(&base, 0.0, 0.0, 0.0, 0.5);
        assert_eq!(flat.net_position_10yr, direct.net_position_10yr);
        assert!(flat.net_position_10yr < results[0].net_position_10yr);
    }

    #[test]
    fn risk_severity_thresholds() {
        let base = base_costs();
        let mut result = custom_scenario(&base, ScenarioShock::default(), 5.0, 0.5);
        assert_eq!(risk_severity(&result), RiskSeverity::Info);

        result.monthly_diff = 250.0;
        assert_eq!(risk_severity(&result), RiskSeverity::Warning);

        result.monthly_diff = 100.0;
        result.upfront_diff = 25_000.0;
        assert_eq!(risk_severity(&result), RiskSeverity::Danger);
    }

    proptest! {
        #![proptest_config(proptest::test_runner::Config::with_cases(48))]

        #[test]
        fn prop_price_increase_never_lowers_monthly_or_upfront(
            price_add in 0u32..400_000,
            rate_bp in 100u32..1_200
        ) {
            let mut input = default_snapshot();
            input.interest_rate = f64::from(rate_bp) / 100.0;
            let base = compute_costs(&input);

            let baseline = scenario(&base, 0.0, 0.0, 5.0, 0.5);
            let shocked = scenario(&base, f64::from(price_add), 0.0, 5.0, 0.5);
            prop_assert!(shocked.upfront_cash >= baseline.upfront_cash);
            prop_assert!(shocked.total_monthly >= baseline.total_monthly);
        }

        #[test]
        fn prop_any_price_increase_hits_concession_cliff(
            price_increase in 1u32..1_000_000,
            rate_change_bp in -200i32..300
        ) {
            let base = base_costs();
            let result = custom_scenario(
                &base,
                shock(f64::from(price_increase), f64::from(rate_change_bp) / 100.0),
                5.0,
                0.5,
            );
            prop_assert_eq!(result.scenario.first_home_grant, 0.0);
            prop_assert_eq!(result.scenario.stamp_duty_concession, 0.0);
        }
    }
}
