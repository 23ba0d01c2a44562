use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::StringRecord;
use tracing::debug;

use crate::error::{DietError, Result};
use crate::loader::foods::{line_of, record_reader};
use crate::models::Goals;

/// Goal fields appear in this order on every line.
const GOAL_FIELDS: [&str; 4] = ["calories", "carbs", "fat", "protein"];

/// Marks an axis as having no goal.
const UNSET: &str = "-1";

/// Load goals from a comma-separated goal file.
pub fn load_goals<P: AsRef<Path>>(path: P) -> Result<Goals> {
    let path = path.as_ref();
    let goals = parse_goals(File::open(path)?)?;
    debug!(path = %path.display(), ?goals, "loaded goals");
    Ok(goals)
}

/// Parse goal lines of `calories,carbs,fat,protein`.
///
/// Each field is `-1` (no goal) or a one-character comparator such as `>`
/// followed by the amount. Later lines override earlier ones per axis.
pub fn parse_goals<R: Read>(reader: R) -> Result<Goals> {
    let mut rdr = record_reader(reader);
    let mut goals = Goals::default();

    for (i, record) in rdr.records().enumerate() {
        let record = record?;
        apply_record(&mut goals, &record, line_of(&record, i + 1))?;
    }

    Ok(goals)
}

fn apply_record(goals: &mut Goals, record: &StringRecord, line: usize) -> Result<()> {
    if record.len() != GOAL_FIELDS.len() {
        return Err(DietError::malformed(
            line,
            format!("expected {} fields, found {}", GOAL_FIELDS.len(), record.len()),
        ));
    }

    for (field, raw) in GOAL_FIELDS.iter().zip(record.iter()) {
        if raw == UNSET {
            continue;
        }
        let value = parse_target(raw)
            .ok_or_else(|| DietError::malformed(line, format!("bad {} goal: {:?}", field, raw)))?;
        let slot = match *field {
            "calories" => &mut goals.calories,
            "carbs" => &mut goals.carbs,
            "fat" => &mut goals.fat,
            _ => &mut goals.protein,
        };
        *slot = Some(value);
    }
    Ok(())
}

/// Strip the comparator character and parse the rest.
///
/// Negative targets are kept; the search treats them as already met.
fn parse_target(raw: &str) -> Option<f64> {
    let mut chars = raw.chars();
    chars.next()?;
    let value: f64 = chars.as_str().trim().parse().ok()?;
    value.is_finite().then_some(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_all_axes() {
        let goals = parse_goals(">2000,>250,<70,>150\n".as_bytes()).unwrap();
        assert_eq!(goals, Goals::new(2000.0, 150.0, 70.0, 250.0));
    }

    #[test]
    fn test_unset_axes() {
        let goals = parse_goals(">2000,-1,-1,>150\n".as_bytes()).unwrap();
        assert_eq!(goals.calories, Some(2000.0));
        assert_eq!(goals.carbs, None);
        assert_eq!(goals.fat, None);
        assert_eq!(goals.protein, Some(150.0));
    }

    #[test]
    fn test_later_lines_override() {
        let data = ">2000,-1,-1,>150\n-1,>300,-1,>120\n";
        let goals = parse_goals(data.as_bytes()).unwrap();
        assert_eq!(goals.calories, Some(2000.0));
        assert_eq!(goals.carbs, Some(300.0));
        assert_eq!(goals.protein, Some(120.0));
    }

    #[test]
    fn test_malformed_goal() {
        match parse_goals(">2000,>abc,-1,-1\n".as_bytes()) {
            Err(DietError::MalformedRecord { line, reason }) => {
                assert_eq!(line, 1);
                assert!(reason.contains("carbs"));
            }
            other => panic!("expected MalformedRecord, got {:?}", other),
        }
    }

    #[test]
    fn test_wrong_field_count() {
        assert!(matches!(
            parse_goals(">2000,>250\n".as_bytes()),
            Err(DietError::MalformedRecord { .. })
        ));
    }

    #[test]
    fn test_parse_target() {
        assert_eq!(parse_target("~45.5"), Some(45.5));
        assert_eq!(parse_target(">"), None);
        assert_eq!(parse_target(""), None);
        assert_eq!(parse_target(">-5"), Some(-5.0));
        assert_eq!(parse_target(">inf"), None);
    }

    #[test]
    fn test_negative_goal_accepted() {
        let goals = parse_goals(">2000,-1,>-10,-1\n".as_bytes()).unwrap();
        assert_eq!(goals.calories, Some(2000.0));
        assert_eq!(goals.fat, Some(-10.0));
        assert_eq!(goals.carbs, None);
    }
}
