mod costs;
mod defaults;
mod forecast;
mod jurisdiction;
mod living;
mod mortgage;
mod report;
mod scenario;
mod types;

pub use costs::compute_costs;
pub use defaults::{DEFAULT_HORIZON_YEARS, MILESTONE_YEARS, default_snapshot};
pub use forecast::{milestones, net_position_at, paid_off_year, project, summarize};
pub use jurisdiction::{
    Benefits, BenefitsTable, Jurisdiction, ParseJurisdictionError, benefits_for,
    default_benefits_table,
};
pub use living::{
    TransportRates, commute_hours, cost_of_living, income_affordability, location_comparison,
    transport_cost,
};
pub use mortgage::monthly_payment;
pub use report::{Evaluator, ReportBundle, evaluate};
pub use scenario::{
    SCENARIO_PRESETS, ScenarioPreset, custom_scenario, preset_scenarios, risk_severity, scenario,
};
pub use types::{
    AffordabilityResult, CheaperOption, CommuteHours, CommuteParams, ComparisonLocation,
    CostOfLivingResult, CostSnapshot, CustomScenarioResult, ForecastRow, ForecastSummary,
    HousingBand, InputSnapshot, LivingExpenses, LocationComparisonResult, LocationSummary,
    PartnerCommute, RiskSeverity, ScenarioResult, ScenarioShock, TransportMode,
};
