use crate::error::FilterError;

use super::model::{BoundingBox, LocationTable, Record};

/// Keep the rows whose coordinates fall inside `bbox`, bounds inclusive.
///
/// A row passes when:
/// * `Latitude` and `Longitude` are both numeric → passes if inside the box
/// * either is missing, null or text → fails (never an error)
///
/// An invalid box is rejected up front so callers cannot mistake it for an
/// empty or complete selection. Input order is kept.
pub fn filter_locations(
    table: &LocationTable,
    bbox: BoundingBox,
) -> Result<LocationTable, FilterError> {
    if !bbox.is_valid() {
        return Err(FilterError::InvalidBounds(bbox));
    }

    let records: Vec<Record> = table
        .records
        .iter()
        .filter(|r| in_bounds(r, &bbox))
        .cloned()
        .collect();

    log::debug!("{} of {} rows inside {bbox}", records.len(), table.len());
    Ok(table.with_records(records))
}

fn in_bounds(record: &Record, bbox: &BoundingBox) -> bool {
    match (record.latitude(), record.longitude()) {
        (Some(lat), Some(lon)) => bbox.contains(lat, lon),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{CellValue, LATITUDE, LONGITUDE};

    fn point(lat: f64, lon: f64) -> Record {
        [
            (LATITUDE, CellValue::Float(lat)),
            (LONGITUDE, CellValue::Float(lon)),
        ]
        .into_iter()
        .collect()
    }

    fn table(records: Vec<Record>) -> LocationTable {
        LocationTable::new(vec![LATITUDE.into(), LONGITUDE.into()], records)
    }

    fn sample_box() -> BoundingBox {
        BoundingBox::new(-10.0, 1.68, 50.68, 57.98)
    }

    #[test]
    fn keeps_only_the_row_inside_the_window() {
        let input = table(vec![point(-5.0, 52.0), point(10.0, 52.0), point(-5.0, 60.0)]);
        let filtered = filter_locations(&input, sample_box()).unwrap();
        assert_eq!(filtered.records, vec![point(-5.0, 52.0)]);
        assert_eq!(filtered.columns, input.columns);
    }

    #[test]
    fn degenerate_boxes_are_rejected() {
        let input = table(vec![point(0.0, 52.0)]);
        for bbox in [
            BoundingBox::new(0.0, 0.0, 50.0, 55.0),
            BoundingBox::new(-1.0, 1.0, 52.0, 52.0),
            BoundingBox::new(1.0, -1.0, 50.0, 55.0),
            BoundingBox::new(-1.0, 1.0, f64::NAN, 55.0),
        ] {
            let err = filter_locations(&input, bbox).unwrap_err();
            assert!(matches!(err, FilterError::InvalidBounds(_)), "{bbox} accepted");
        }
    }

    #[test]
    fn edges_are_inclusive() {
        let bbox = sample_box();
        let input = table(vec![
            point(bbox.lat_min, bbox.lon_min),
            point(bbox.lat_max, bbox.lon_max),
            point(bbox.lat_min, bbox.lon_max),
        ]);
        assert_eq!(filter_locations(&input, bbox).unwrap().len(), 3);
    }

    #[test]
    fn rows_without_numeric_coordinates_are_dropped() {
        let mut text_lat = point(0.0, 52.0);
        text_lat
            .values
            .insert(LATITUDE.into(), CellValue::String("n/a".into()));
        let mut null_lon = point(0.0, 52.0);
        null_lon.values.insert(LONGITUDE.into(), CellValue::Null);
        let mut missing = point(0.0, 52.0);
        missing.values.remove(LONGITUDE);

        let input = table(vec![
            text_lat,
            null_lon,
            missing,
            point(f64::NAN, 52.0),
            point(0.0, 52.0),
        ]);
        let filtered = filter_locations(&input, sample_box()).unwrap();
        assert_eq!(filtered.records, vec![point(0.0, 52.0)]);
    }

    #[test]
    fn integer_coordinates_are_compared_numerically() {
        let row: Record = [
            (LATITUDE, CellValue::Integer(-5)),
            (LONGITUDE, CellValue::Integer(52)),
        ]
        .into_iter()
        .collect();
        let filtered = filter_locations(&table(vec![row.clone()]), sample_box()).unwrap();
        assert_eq!(filtered.records, vec![row]);
    }

    #[test]
    fn empty_result_is_not_an_error() {
        let input = table(vec![point(50.0, 0.0)]);
        let filtered = filter_locations(&input, sample_box()).unwrap();
        assert!(filtered.is_empty());
    }

    /// Walks a grid that straddles every edge and checks the output is exactly
    /// the rows the predicate accepts, in order, and that a second pass is a no-op.
    #[test]
    fn output_is_exact_and_idempotent() {
        let bbox = sample_box();
        let rows: Vec<Record> = (0..=40)
            .flat_map(|i| (0..=40).map(move |j| point(-15.0 + i as f64 * 0.5, 48.0 + j as f64 * 0.25)))
            .collect();
        let input = table(rows.clone());

        let filtered = filter_locations(&input, bbox).unwrap();
        let expected: Vec<Record> = rows
            .into_iter()
            .filter(|r| bbox.contains(r.latitude().unwrap(), r.longitude().unwrap()))
            .collect();
        assert!(!expected.is_empty());
        assert_eq!(filtered.records, expected);

        let again = filter_locations(&filtered, bbox).unwrap();
        assert_eq!(again, filtered);
    }

    #[test]
    fn input_table_is_untouched() {
        let input = table(vec![point(-5.0, 52.0), point(10.0, 52.0)]);
        let before = input.clone();
        let _ = filter_locations(&input, sample_box()).unwrap();
        assert_eq!(input, before);
    }
}
