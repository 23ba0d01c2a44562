use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim};
use tracing::{debug, trace};

use crate::error::{DietError, Result};
use crate::models::{Catalog, Food};

/// Fields per food record:
/// `name,package_cost,package_amount,serving,unit,calories,carbs,fat,protein`.
const FOOD_FIELDS: usize = 9;

/// Load a catalog from a comma-separated food file.
pub fn load_catalog<P: AsRef<Path>>(path: P) -> Result<Catalog> {
    let path = path.as_ref();
    let catalog = parse_catalog(File::open(path)?)?;
    debug!(path = %path.display(), foods = catalog.len(), "loaded food catalog");
    for food in &catalog {
        trace!("{}", food.debug_string());
    }
    Ok(catalog)
}

/// Parse food records. Blank lines and `#` comments are skipped.
pub fn parse_catalog<R: Read>(reader: R) -> Result<Catalog> {
    let mut rdr = record_reader(reader);
    let mut foods = Vec::new();

    for record in rdr.records() {
        let record = record?;
        let line = line_of(&record, foods.len() + 1);
        foods.push(parse_food(&record, line)?);
    }

    Catalog::new(foods)
}

pub(crate) fn record_reader<R: Read>(reader: R) -> csv::Reader<R> {
    ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .comment(Some(b'#'))
        .from_reader(reader)
}

pub(crate) fn line_of(record: &StringRecord, fallback: usize) -> usize {
    record
        .position()
        .map(|p| p.line() as usize)
        .unwrap_or(fallback)
}

fn number(record: &StringRecord, index: usize, field: &str, line: usize) -> Result<f64> {
    let raw = record.get(index).unwrap_or_default();
    raw.parse()
        .map_err(|_| DietError::malformed(line, format!("{} is not a number: {:?}", field, raw)))
}

fn parse_food(record: &StringRecord, line: usize) -> Result<Food> {
    if record.len() != FOOD_FIELDS {
        return Err(DietError::malformed(
            line,
            format!("expected {} fields, found {}", FOOD_FIELDS, record.len()),
        ));
    }

    let name = record.get(0).unwrap_or_default();
    let package_cost = number(record, 1, "package cost", line)?;
    let package_amount = number(record, 2, "package amount", line)?;
    let serving = number(record, 3, "serving", line)?;
    let unit = record.get(4).unwrap_or_default();
    let calories = number(record, 5, "calories", line)?;
    let carbs = number(record, 6, "carbs", line)?;
    let fat = number(record, 7, "fat", line)?;
    let protein = number(record, 8, "protein", line)?;

    if package_amount == 0.0 {
        return Err(DietError::malformed(line, "package amount is zero"));
    }

    let serving_size = format!("{} {}", record.get(3).unwrap_or_default(), unit);
    let food = Food::new(
        name,
        package_cost * serving / package_amount,
        calories,
        protein,
        fat,
        carbs,
    )
    .with_serving_size(serving_size);

    if !food.is_valid() {
        return Err(DietError::malformed(
            line,
            format!("{} has a negative or non-finite value", name),
        ));
    }
    Ok(food)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_serving_cost() {
        let data = "Rice, 2.00, 1000, 100, g, 360, 80, 1, 7\n";
        let catalog = parse_catalog(data.as_bytes()).unwrap();

        let rice = &catalog[0];
        assert_eq!(rice.name, "Rice");
        assert!((rice.serving_cost - 0.20).abs() < 1e-9);
        assert_eq!(rice.serving_size, "100 g");
        assert_eq!(rice.calories, 360.0);
        assert_eq!(rice.carbs, 80.0);
        assert_eq!(rice.fat, 1.0);
        assert_eq!(rice.protein, 7.0);
    }

    #[test]
    fn test_skips_blank_and_comment_lines() {
        let data = "# name,cost,amount,serving,unit,cal,carbs,fat,protein\n\
                    Rice,2,1000,100,g,360,80,1,7\n\
                    \n\
                    Eggs,3,12,1,egg,70,0.5,5,6\n";
        let catalog = parse_catalog(data.as_bytes()).unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog[1].name, "Eggs");
        assert!((catalog[1].serving_cost - 0.25).abs() < 1e-9);
    }

    #[test]
    fn test_wrong_field_count() {
        let data = "Rice,2,1000,100,g,360,80,1,7\nEggs,3,12,1,egg,70,0.5,5\n";
        match parse_catalog(data.as_bytes()) {
            Err(DietError::MalformedRecord { line, reason }) => {
                assert_eq!(line, 2);
                assert!(reason.contains("expected 9 fields"));
            }
            other => panic!("expected MalformedRecord, got {:?}", other),
        }
    }

    #[test]
    fn test_non_numeric_field() {
        let data = "Rice,two,1000,100,g,360,80,1,7\n";
        match parse_catalog(data.as_bytes()) {
            Err(DietError::MalformedRecord { line, reason }) => {
                assert_eq!(line, 1);
                assert!(reason.contains("package cost"));
            }
            other => panic!("expected MalformedRecord, got {:?}", other),
        }
    }

    #[test]
    fn test_zero_package_amount() {
        let data = "Rice,2,0,100,g,360,80,1,7\n";
        assert!(matches!(
            parse_catalog(data.as_bytes()),
            Err(DietError::MalformedRecord { .. })
        ));
    }

    #[test]
    fn test_negative_value() {
        let data = "Rice,2,1000,100,g,-360,80,1,7\n";
        assert!(matches!(
            parse_catalog(data.as_bytes()),
            Err(DietError::MalformedRecord { .. })
        ));
    }
}
