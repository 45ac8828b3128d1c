use std::io::Read;

use csv::StringRecord;
use model::stop::Stop;

use crate::ApiError;

pub const LATITUDE: &str = "Latitude";
pub const LONGITUDE: &str = "Longitude";
pub const LABEL: &str = "Logradouro";

/// Positions of the used columns in the header. Other columns (`Obs`) are
/// ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Columns {
    latitude: usize,
    longitude: usize,
    label: usize,
}

impl Columns {
    /// Header names are matched ignoring ASCII case.
    fn find(headers: &StringRecord) -> Result<Self, ApiError> {
        let position = |column: &'static str| {
            headers
                .iter()
                .position(|header| header.eq_ignore_ascii_case(column))
                .ok_or(ApiError::MissingColumn(column))
        };

        Ok(Self {
            latitude: position(LATITUDE)?,
            longitude: position(LONGITUDE)?,
            label: position(LABEL)?,
        })
    }

    /// `None` if a field is missing or blank, or a coordinate is not a
    /// number.
    fn stop(&self, record: &StringRecord) -> Option<Stop> {
        let latitude = parse_coordinate(record.get(self.latitude)?)?;
        let longitude = parse_coordinate(record.get(self.longitude)?)?;
        let label = record.get(self.label).filter(|label| !label.is_empty())?;
        Some(Stop::new(latitude, longitude, label))
    }
}

/// Accepts both `-21.99` and the spreadsheet locale's `-21,99`.
fn parse_coordinate(value: &str) -> Option<f64> {
    if value.is_empty() {
        return None;
    }
    value.replace(',', ".").parse::<f64>().ok()
}

/// Reads the stops of a sheet in row order, skipping incomplete rows.
pub fn parse_stops<R: Read>(input: R) -> Result<Vec<Stop>, ApiError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(input);

    let columns = Columns::find(reader.headers()?)?;

    let mut stops = Vec::new();
    for (index, record) in reader.records().enumerate() {
        match columns.stop(&record?) {
            Some(stop) => stops.push(stop),
            // header is line 1
            None => log::debug!("Skipping incomplete sheet line {}.", index + 2),
        }
    }
    Ok(stops)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_stops() {
        let csv = "\
Latitude,Longitude,Logradouro,Obs
-21.994048,-42.915773,Garagem,
-21.99374,-42.90851,Rua B,coleta seletiva
";

        let stops = parse_stops(csv.as_bytes()).unwrap();

        assert_eq!(
            stops,
            vec![
                Stop::new(-21.994048, -42.915773, "Garagem"),
                Stop::new(-21.99374, -42.90851, "Rua B"),
            ]
        );
    }

    #[test]
    fn test_incomplete_rows_are_dropped_in_order() {
        let csv = "\
Latitude,Longitude,Logradouro,Obs
-21.1,-42.1,Rua A,
,-42.2,Rua B,sem latitude
-21.3,-42.3,,sem logradouro
-21.4,abc,Rua D,
-21.5,-42.5,Rua E,
-21.6
";

        let labels = parse_stops(csv.as_bytes())
            .unwrap()
            .into_iter()
            .map(|stop| stop.label)
            .collect::<Vec<_>>();

        assert_eq!(labels, vec!["Rua A", "Rua E"]);
    }

    #[test]
    fn test_decimal_comma_and_whitespace() {
        let csv = "Latitude,Longitude,Logradouro\n\" -21,5 \",\"-42,25\", Rua A \n";

        let stops = parse_stops(csv.as_bytes()).unwrap();

        assert_eq!(stops, vec![Stop::new(-21.5, -42.25, "Rua A")]);
    }

    #[test]
    fn test_lowercase_headers() {
        let csv = "latitude,longitude,logradouro\n-21.1,-42.1,Rua A\n";

        assert_eq!(parse_stops(csv.as_bytes()).unwrap().len(), 1);
    }

    #[test]
    fn test_uppercase_headers_and_reordered_columns() {
        let csv = "OBS,LOGRADOURO,LONGITUDE,LATITUDE\n,Rua A,-42.1,-21.1\nlixo,Rua B,-42.2,-21.2\n";

        assert_eq!(
            parse_stops(csv.as_bytes()).unwrap(),
            vec![
                Stop::new(-21.1, -42.1, "Rua A"),
                Stop::new(-21.2, -42.2, "Rua B"),
            ]
        );
    }

    #[test]
    fn test_short_row_does_not_fail_the_sheet() {
        let csv = "Latitude,Longitude,Logradouro\n-21.1,-42.1\n-21.2,-42.2,Rua B\n";

        assert_eq!(
            parse_stops(csv.as_bytes()).unwrap(),
            vec![Stop::new(-21.2, -42.2, "Rua B")]
        );
    }

    #[test]
    fn test_missing_column() {
        let csv = "Latitude,Logradouro\n-21.1,Rua A\n";

        assert!(matches!(
            parse_stops(csv.as_bytes()),
            Err(ApiError::MissingColumn(LONGITUDE))
        ));
    }
}
