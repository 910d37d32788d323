/// Monthly principal-and-interest payment for an amortized loan.
///
/// `annual_rate_percent` is a percentage (6.0 means 6%). A zero rate falls
/// back to straight-line repayment. A zero term is not rejected and yields a
/// non-finite payment.
pub fn monthly_payment(principal: f64, annual_rate_percent: f64, years: u32) -> f64 {
    if principal <= 0.0 {
        return 0.0;
    }
    let months = f64::from(years) * 12.0;
    amortized_payment(principal, annual_rate_percent / 100.0 / 12.0, months)
}

pub(crate) fn amortized_payment(principal: f64, monthly_rate: f64, months: f64) -> f64 {
    if monthly_rate == 0.0 {
        return principal / months;
    }
    let growth = (1.0 + monthly_rate).powf(months);
    principal * (monthly_rate * growth) / (growth - 1.0)
}
