//! KPI figures shown on the dashboard.

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct MemberStats {
    pub total: u64,
    pub contracted: u64,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct InvestmentStats {
    pub total_amount: u64,
    pub deposited_amount: u64,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct AccountStats {
    pub total: u64,
    pub suspended: u64,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct DashboardStats {
    pub members: MemberStats,
    pub investment: InvestmentStats,
    pub accounts: AccountStats,
}

/// `part` as a percentage of `total`, rounded to one decimal. Zero totals
/// yield zero.
pub fn share_percent(part: u64, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let percent = part as f64 / total as f64 * 100.0;
    (percent * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn share_percent_rounds_to_one_decimal() {
        assert_eq!(share_percent(892, 1250), 71.4);
        assert_eq!(share_percent(156, 3420), 4.6);
        assert_eq!(share_percent(1, 0), 0.0);
    }

    #[test]
    fn investment_uses_camel_case() {
        let json = serde_json::to_value(InvestmentStats {
            total_amount: 10,
            deposited_amount: 5,
        })
        .unwrap();
        assert_eq!(json["totalAmount"], 10);
        assert_eq!(json["depositedAmount"], 5);
    }
}
