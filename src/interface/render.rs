use std::time::Duration;

use serde::Serialize;

use crate::models::{Catalog, Goals};
use crate::planner::{SearchStats, Solution, Strategy, Totals};

const RULE: &str = "==========================================";

/// One food line in a report.
#[derive(Debug, Clone, Serialize)]
pub struct ReportItem {
    pub name: String,
    pub count: u32,
    pub serving_size: String,
}

/// Serializable view of a solved plan.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub strategy: Strategy,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub elapsed_secs: Option<f64>,
    pub totals: Totals,
    pub items: Vec<ReportItem>,
    pub stats: SearchStats,
}

impl Report {
    pub fn new(
        catalog: &Catalog,
        solution: &Solution,
        strategy: Strategy,
        elapsed: Option<Duration>,
    ) -> Self {
        let items = solution
            .selection
            .iter()
            .filter_map(|(i, count)| {
                catalog.get(i).map(|food| ReportItem {
                    name: food.name.clone(),
                    count,
                    serving_size: food.serving_size.clone(),
                })
            })
            .collect();

        Self {
            strategy,
            elapsed_secs: elapsed.map(|d| d.as_secs_f64()),
            totals: solution.totals,
            items,
            stats: solution.stats,
        }
    }
}

/// Goals block, set axes only, whole numbers.
pub fn format_goals(goals: &Goals) -> String {
    let mut out = String::from("GOALS:\n");
    for (name, value) in goals.named() {
        out.push_str(&format!(" -> {}: {}\n", name, value.trunc() as i64));
    }
    out
}

/// Text rendering of a report.
pub fn format_report(report: &Report) -> String {
    let t = &report.totals;
    let mut lines = vec![
        RULE.to_string(),
        format!("{} SEARCH, ALL MACROS", report.strategy.label().to_uppercase()),
    ];
    if let Some(secs) = report.elapsed_secs {
        lines.push(format!("Performance: {:.4} s", secs));
    }
    lines.extend([
        "---------".to_string(),
        format!("Cost:     ${:.2}", t.cost),
        format!("Calories: {} cal", t.calories.trunc() as i64),
        format!("Protein:  {} g", t.protein.trunc() as i64),
        format!("Carbs:    {} g", t.carbs.trunc() as i64),
        format!("Fat:      {} g", t.fat.trunc() as i64),
        "Using:".to_string(),
    ]);
    if report.items.is_empty() {
        lines.push(" (nothing, goals already met)".to_string());
    }
    for item in &report.items {
        lines.push(format!(" -> {}: {} x {}", item.name, item.count, item.serving_size));
    }

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

/// Print the goals block.
pub fn display_goals(goals: &Goals) {
    print!("{}", format_goals(goals));
}

/// Print a report as text.
pub fn display_report(report: &Report) {
    print!("{}", format_report(report));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Food, Selection};
    use crate::planner::totals;

    fn sample() -> (Catalog, Solution) {
        let catalog = Catalog::new(vec![
            Food::new("Rice", 0.20, 200.0, 4.0, 0.5, 45.0).with_serving_size("50 g"),
            Food::new("Eggs", 0.25, 70.0, 6.0, 5.0, 0.5).with_serving_size("1 egg"),
        ])
        .unwrap();
        let selection: Selection = [(0, 2), (1, 3)].into_iter().collect();
        let solution = Solution {
            totals: totals(&catalog, &selection).unwrap(),
            selection,
            stats: SearchStats::default(),
        };
        (catalog, solution)
    }

    #[test]
    fn test_format_goals_sorted() {
        let goals = Goals {
            calories: Some(2000.7),
            protein: Some(150.0),
            fat: None,
            carbs: Some(250.0),
        };
        assert_eq!(
            format_goals(&goals),
            "GOALS:\n -> calories: 2000\n -> carbs: 250\n -> protein: 150\n"
        );
    }

    #[test]
    fn test_format_report_lines() {
        let (catalog, solution) = sample();
        let report = Report::new(
            &catalog,
            &solution,
            Strategy::Memoized,
            Some(Duration::from_millis(1500)),
        );
        let text = format_report(&report);

        assert!(text.contains("MEMOIZED SEARCH"));
        assert!(text.contains("Performance: 1.5000 s"));
        assert!(text.contains("Cost:     $1.15"));
        assert!(text.contains("Calories: 610 cal"));
        assert!(text.contains("Protein:  26 g"));
        assert!(text.contains("Fat:      16 g"));
        assert!(text.contains(" -> Rice: 2 x 50 g"));
        assert!(text.contains(" -> Eggs: 3 x 1 egg"));
    }

    #[test]
    fn test_format_report_exact_layout() {
        let catalog = Catalog::new(vec![Food::new("Rice", 0.20, 200.0, 4.0, 0.5, 45.0)]).unwrap();
        let solution = Solution {
            selection: Selection::default(),
            totals: Totals::default(),
            stats: SearchStats::default(),
        };
        let report = Report::new(&catalog, &solution, Strategy::Exhaustive, None);
        let expected = format!(
            "{}\nEXHAUSTIVE SEARCH, ALL MACROS\n---------\nCost:     $0.00\n\
             Calories: 0 cal\nProtein:  0 g\nCarbs:    0 g\nFat:      0 g\n\
             Using:\n (nothing, goals already met)\n",
            RULE
        );
        assert_eq!(format_report(&report), expected);
    }

    #[test]
    fn test_report_json() {
        let (catalog, solution) = sample();
        let report = Report::new(&catalog, &solution, Strategy::Exhaustive, None);
        let json = serde_json::to_value(&report).unwrap();

        assert_eq!(json["strategy"], "exhaustive");
        assert!(json.get("elapsed_secs").is_none());
        assert_eq!(json["items"][1]["name"], "Eggs");
        assert_eq!(json["items"][1]["count"], 3);
    }
}
