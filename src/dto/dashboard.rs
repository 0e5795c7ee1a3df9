use serde::Serialize;

use crate::domain::dashboard::DashboardStats;

/// One KPI card: a total, the part of it being highlighted and its share.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct KpiCard {
    pub title: String,
    pub total_label: String,
    pub total: u64,
    pub part_label: String,
    pub part: u64,
    pub percent: f64,
}

/// Data required to render the dashboard template.
#[derive(Debug, Serialize)]
pub struct DashboardPageData {
    pub stats: DashboardStats,
    pub cards: Vec<KpiCard>,
}
