use crate::domain::dashboard::share_percent;
use crate::dto::dashboard::{DashboardPageData, KpiCard};
use crate::repository::DashboardReader;
use crate::services::ServiceResult;

/// Loads the KPI figures and derives the cards shown on the dashboard.
pub fn load_dashboard_page<R>(repo: &R) -> ServiceResult<DashboardPageData>
where
    R: DashboardReader + ?Sized,
{
    let stats = repo.dashboard_stats().map_err(|err| {
        log::error!("Failed to load dashboard stats: {err}");
        err
    })?;

    let cards = vec![
        KpiCard {
            title: "Members".to_string(),
            total_label: "Total members".to_string(),
            total: stats.members.total,
            part_label: "Contracted".to_string(),
            part: stats.members.contracted,
            percent: share_percent(stats.members.contracted, stats.members.total),
        },
        KpiCard {
            title: "Investment".to_string(),
            total_label: "Total amount".to_string(),
            total: stats.investment.total_amount,
            part_label: "Deposited".to_string(),
            part: stats.investment.deposited_amount,
            percent: share_percent(
                stats.investment.deposited_amount,
                stats.investment.total_amount,
            ),
        },
        KpiCard {
            title: "Accounts".to_string(),
            total_label: "Total accounts".to_string(),
            total: stats.accounts.total,
            part_label: "Suspended".to_string(),
            part: stats.accounts.suspended,
            percent: share_percent(stats.accounts.suspended, stats.accounts.total),
        },
    ];

    Ok(DashboardPageData { stats, cards })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::errors::RepositoryError;
    use crate::repository::fixture::FixtureRepository;
    use crate::repository::mock::MockRepository;
    use crate::services::ServiceError;

    #[test]
    fn builds_three_cards() {
        let data = load_dashboard_page(&FixtureRepository::default()).unwrap();
        assert_eq!(data.cards.len(), 3);
        assert_eq!(data.cards[0].percent, 71.4);
        assert_eq!(data.cards[1].part, 12_340_000_000);
        assert_eq!(data.cards[2].percent, 4.6);
    }

    #[test]
    fn propagates_repository_errors() {
        let mut repo = MockRepository::new();
        repo.expect_dashboard_stats()
            .returning(|| Err(RepositoryError::NotFound));
        assert!(matches!(
            load_dashboard_page(&repo),
            Err(ServiceError::Repository(RepositoryError::NotFound))
        ));
    }
}
