//! Tests for the analytics reducers and the dashboard composition
//!
//! This file contains tests for:
//! - Daily metric trends (gap vs zero, conservation)
//! - Qualitative scoring
//! - Category ordering and rollups
//! - Entity distribution
//! - The composed dashboard snapshot

use chrono::{NaiveDate, TimeZone, Utc};
use hrdash::analytics::{series_total, UNCATEGORIZED};
use hrdash::{
    aggregate, classify, distribute, score, Actor, Answer, Branch, DashboardConfig,
    DashboardContext, DashboardEngine, Dataset, Metric, OrgTree, Question, Role, ScoreOrder,
    ScopeSelection, TimeframeToken, Viewer, VisitRecord,
};

// =============================================================================
// Test Helpers
// =============================================================================

fn org() -> Vec<Actor> {
    vec![
        Actor::new("chr", Role::Chr, None).with_name("Chief"),
        Actor::new("v1", Role::Vhr, Some("chr")).with_name("North"),
        Actor::new("v2", Role::Vhr, Some("chr")).with_name("South"),
        Actor::new("z1", Role::Zhr, Some("v1")).with_name("Zone 1"),
        Actor::new("z2", Role::Zhr, Some("v2")).with_name("Zone 2"),
        Actor::new("b1", Role::Bhr, Some("z1")).with_name("Asha"),
        Actor::new("b2", Role::Bhr, Some("z1")).with_name("Ravi"),
        Actor::new("b3", Role::Bhr, Some("z2")).with_name("Meena"),
    ]
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

// =============================================================================
// Trends
// =============================================================================

mod trend_tests {
    use super::*;

    #[test]
    fn test_gap_day_and_absent_metric_scenario() {
        let visits = vec![
            VisitRecord::new("v1", "b1", "br1", "2024-03-01")
                .with_metric("manning_percentage", Some(80.0)),
            VisitRecord::new("v2", "b2", "br1", "2024-03-01")
                .with_metric("manning_percentage", Some(100.0)),
            VisitRecord::new("v3", "b1", "br2", "2024-03-03"),
        ];

        let series = aggregate(&visits, &[Metric::ManningPercentage]);

        assert_eq!(series.len(), 3);
        assert_eq!(series[0].date, date(2024, 3, 1));
        assert_eq!(series[0].value(Metric::ManningPercentage), Some(90.0));
        assert_eq!(series[1].date, date(2024, 3, 2));
        assert_eq!(series[1].values[&Metric::ManningPercentage], None);
        assert_eq!(series[2].date, date(2024, 3, 3));
        assert_eq!(series[2].values[&Metric::ManningPercentage], None);
    }

    #[test]
    fn test_every_metric_gaps_on_empty_days() {
        let visits = vec![
            VisitRecord::new("v1", "b1", "br1", "2024-03-01").with_metric("cwt_cases", Some(0.0)),
            VisitRecord::new("v2", "b1", "br1", "2024-03-04").with_metric("cwt_cases", Some(1.0)),
        ];
        let series = aggregate(&visits, &Metric::ALL);
        for point in &series[1..3] {
            assert!(point.values.values().all(Option::is_none));
            assert_eq!(point.values.len(), Metric::ALL.len());
        }
        assert_eq!(series[0].value(Metric::CwtCases), Some(0.0));
    }

    #[test]
    fn test_sum_is_conserved() {
        let visits: Vec<VisitRecord> = (1..=9)
            .map(|i| {
                VisitRecord::new(format!("v{}", i), "b1", "br1", format!("2024-04-{:02}", i * 3))
                    .with_metric("new_employees_covered", Some(i as f64))
            })
            .collect();
        let series = aggregate(&visits, &[Metric::NewEmployeesCovered]);
        assert_eq!(series.len(), 25);
        assert_eq!(series_total(&series, Metric::NewEmployeesCovered), 45.0);
    }

    #[test]
    fn test_bad_metric_value_only_drops_that_visit() {
        let visits = vec![
            VisitRecord::new("v1", "b1", "br1", "2024-03-01")
                .with_metric("er_percentage", Some(f64::NAN)),
            VisitRecord::new("v2", "b1", "br1", "2024-03-01")
                .with_metric("er_percentage", Some(40.0)),
        ];
        let series = aggregate(&visits, &[Metric::ErPercentage]);
        assert_eq!(series[0].value(Metric::ErPercentage), Some(40.0));
    }
}

// =============================================================================
// Qualitative Scores
// =============================================================================

mod score_tests {
    use super::*;

    #[test]
    fn test_negative_polarity_scenario() {
        let question = Question::new("leaders_abusive_language", "No Abusive Language", false);
        let visits: Vec<VisitRecord> = [Answer::Yes, Answer::No, Answer::No]
            .iter()
            .enumerate()
            .map(|(i, a)| {
                VisitRecord::new(format!("v{}", i), "b1", "br1", "2024-01-01")
                    .with_answer("leaders_abusive_language", Some(*a))
            })
            .collect();
        let scores = score(&visits, &[question], ScoreOrder::AsGiven);
        assert_eq!(scores[0].score, 3.33);
        assert_eq!(scores[0].subject, "No Abusive Language");
    }

    #[test]
    fn test_default_questions_keep_order() {
        let visits = vec![VisitRecord::new("v1", "b1", "br1", "2024-01-01")
            .with_answer("employees_safe", Some(Answer::Yes))
            .with_answer("leaders_abusive_language", Some(Answer::No))];
        let scores = score(&visits, &Question::defaults(), ScoreOrder::AsGiven);
        let keys: Vec<_> = scores.iter().map(|s| s.key.as_str()).collect();
        assert_eq!(
            keys,
            vec![
                "leaders_aligned_with_code",
                "employees_safe",
                "employees_motivated",
                "leaders_abusive_language",
                "employees_comfort_escalation",
                "inclusive_culture",
            ]
        );
        assert_eq!(scores[1].score, 5.0);
        assert_eq!(scores[3].score, 5.0);
        assert_eq!(scores[0].score, 0.0);
    }
}

// =============================================================================
// Categories
// =============================================================================

mod category_tests {
    use super::*;

    #[test]
    fn test_category_ordering_scenario() {
        let branches = vec![
            Branch::new("br-bronze", Some("Bronze")),
            Branch::new("br-zeta", Some("Zeta")),
            Branch::new("br-gold", Some("Gold")),
            Branch::new("br-none", None),
        ];
        let visits: Vec<VisitRecord> = branches
            .iter()
            .enumerate()
            .map(|(i, b)| VisitRecord::new(format!("v{}", i), "b1", b.id.clone(), "2024-01-01"))
            .collect();

        let breakdown = classify(&visits, &branches, &[Metric::CwtCases]);
        assert_eq!(
            breakdown.categories,
            vec!["Gold", "Bronze", "Zeta", UNCATEGORIZED]
        );
    }

    #[test]
    fn test_uncategorized_is_last_even_alphabetically() {
        let branches = vec![
            Branch::new("br1", Some("Zinc")),
            Branch::new("br2", None),
            Branch::new("br3", Some("Diamond")),
        ];
        let visits = vec![
            VisitRecord::new("v1", "b1", "br2", "2024-01-01"),
            VisitRecord::new("v2", "b1", "br1", "2024-01-01"),
            VisitRecord::new("v3", "b1", "br3", "2024-01-01"),
        ];
        let breakdown = classify(&visits, &branches, &[]);
        assert_eq!(breakdown.categories, vec!["Diamond", "Zinc", UNCATEGORIZED]);
    }

    #[test]
    fn test_counts_and_rollups() {
        let branches = vec![Branch::new("br1", Some("Gold")), Branch::new("br2", Some("Gold"))];
        let visits = vec![
            VisitRecord::new("v1", "b1", "br1", "2024-01-01")
                .with_metric("attrition_percentage", Some(10.0))
                .with_metric("star_employees_total", Some(3.0)),
            VisitRecord::new("v2", "b2", "br2", "2024-01-05")
                .with_metric("attrition_percentage", Some(15.0)),
            VisitRecord::new("v3", "b2", "br2", "2024-01-06")
                .with_metric("attrition_percentage", Some(20.0))
                .with_metric("star_employees_total", Some(2.0)),
        ];
        let breakdown = classify(
            &visits,
            &branches,
            &[Metric::AttritionPercentage, Metric::StarEmployeesTotal],
        );
        assert_eq!(breakdown.visits("Gold"), 3);
        assert_eq!(breakdown.value("Gold", Metric::AttritionPercentage), Some(15.0));
        assert_eq!(breakdown.value("Gold", Metric::StarEmployeesTotal), Some(5.0));
    }
}

// =============================================================================
// Distribution
// =============================================================================

mod distribution_tests {
    use super::*;

    fn visits() -> Vec<VisitRecord> {
        vec![
            VisitRecord::new("v1", "b1", "br1", "2024-01-01"),
            VisitRecord::new("v2", "b2", "br1", "2024-01-02"),
            VisitRecord::new("v3", "b3", "br1", "2024-01-03"),
            VisitRecord::new("v4", "b2", "br1", "2024-01-04"),
            VisitRecord::new("v5", "ghost", "br1", "2024-01-05"),
        ]
    }

    #[test]
    fn test_chr_distribution_by_vhr() {
        let tree = OrgTree::new(&org());
        let entries = distribute(&visits(), &tree, Role::Vhr).unwrap();
        let labels: Vec<_> = entries.iter().map(|e| (e.label.as_str(), e.count)).collect();
        assert_eq!(labels, vec![("North", 3), ("South", 1)]);
    }

    #[test]
    fn test_zhr_distribution_by_bhr() {
        let tree = OrgTree::new(&org());
        let entries = distribute(&visits(), &tree, Role::Bhr).unwrap();
        assert_eq!(entries[0].label, "Ravi");
        assert_eq!(entries[0].count, 2);
        assert_eq!(entries.iter().map(|e| e.count).sum::<u64>(), 4);
    }

    #[test]
    fn test_counts_never_exceed_visits() {
        let tree = OrgTree::new(&org());
        let total: u64 = distribute(&visits(), &tree, Role::Chr)
            .unwrap()
            .iter()
            .map(|e| e.count)
            .sum();
        assert_eq!(total, 4);
    }
}

// =============================================================================
// Dashboard
// =============================================================================

mod dashboard_tests {
    use super::*;

    fn dataset() -> Dataset {
        Dataset::new(
            org(),
            vec![Branch::new("br1", Some("Silver")), Branch::new("br2", Some("Gold"))],
            vec![
                VisitRecord::new("v1", "b1", "br1", "2024-05-28")
                    .with_metric("manning_percentage", Some(88.0))
                    .with_answer("employees_safe", Some(Answer::Yes)),
                VisitRecord::new("v2", "b2", "br2", "2024-05-30")
                    .with_metric("manning_percentage", Some(92.0))
                    .with_answer("employees_safe", Some(Answer::No)),
                VisitRecord::new("v3", "b3", "br2", "2024-05-30")
                    .with_metric("cwt_cases", Some(4.0)),
            ],
        )
    }

    fn now() -> chrono::DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 31, 18, 0, 0).unwrap()
    }

    #[test]
    fn test_vhr_dashboard() {
        let ctx = DashboardContext::new(Viewer::Vhr("v1".into()), now())
            .with_timeframe(Some(TimeframeToken::PastMonth));
        let snapshot = DashboardEngine::default().build(&ctx, &dataset()).unwrap();

        assert_eq!(snapshot.overview.scope_size, 2);
        assert_eq!(snapshot.overview.total_visits, 2);
        assert_eq!(snapshot.overview.first_visit, Some(date(2024, 5, 28)));
        assert_eq!(snapshot.overview.last_visit, Some(date(2024, 5, 30)));
        assert_eq!(snapshot.trends.len(), 3);
        assert_eq!(snapshot.categories.categories, vec!["Gold", "Silver"]);
        assert_eq!(snapshot.distribution_role, Role::Zhr);
        assert_eq!(snapshot.distribution[0].label, "Zone 1");

        let safe = snapshot
            .scores
            .iter()
            .find(|s| s.key == "employees_safe")
            .unwrap();
        assert_eq!(safe.score, 2.5);
    }

    #[test]
    fn test_branch_filter_applies() {
        let ctx = DashboardContext::new(Viewer::Chr, now()).with_branches(["br2"]);
        let snapshot = DashboardEngine::default().build(&ctx, &dataset()).unwrap();
        assert_eq!(snapshot.overview.total_visits, 2);
        assert_eq!(snapshot.overview.branches_visited, 1);
        assert_eq!(snapshot.categories.categories, vec!["Gold"]);
    }

    #[test]
    fn test_empty_selection_yields_empty_snapshot() {
        let ctx = DashboardContext::new(Viewer::Chr, now()).with_selection(ScopeSelection {
            bhr_ids: vec!["nobody".into()],
            ..Default::default()
        });
        let snapshot = DashboardEngine::default().build(&ctx, &dataset()).unwrap();
        assert_eq!(snapshot.overview.total_visits, 0);
        assert!(snapshot.trends.is_empty());
        assert!(snapshot.distribution.is_empty());
        assert!(snapshot.categories.categories.is_empty());
        assert!(snapshot.scores.iter().all(|s| s.score == 0.0));
    }

    #[test]
    fn test_configured_metrics_and_order() {
        let config = DashboardConfig {
            metrics: vec![Metric::CwtCases],
            score_order: ScoreOrder::Descending,
            ..Default::default()
        };
        let ctx = DashboardContext::new(Viewer::Chr, now());
        let snapshot = DashboardEngine::new(config).build(&ctx, &dataset()).unwrap();
        assert!(snapshot
            .trends
            .iter()
            .all(|p| p.values.keys().copied().collect::<Vec<_>>() == vec![Metric::CwtCases]));
        assert_eq!(snapshot.scores[0].key, "employees_safe");
    }

    #[test]
    fn test_snapshot_serializes_gaps_as_null() {
        let ctx = DashboardContext::new(Viewer::Chr, now());
        let snapshot = DashboardEngine::default().build(&ctx, &dataset()).unwrap();
        let json = serde_json::to_value(&snapshot).unwrap();

        let day_two = &json["trends"][1];
        assert_eq!(day_two["date"], "2024-05-29");
        assert!(day_two["values"]["manning_percentage"].is_null());
        assert_eq!(json["viewer"]["role"], "CHR");
        assert!(json["categories"]["categoriesInDisplayOrder"].is_array());
    }
}
