//! Line-oriented TSPLIB reader.

use std::io::BufRead;

use crate::error::TsplibError;
use crate::models::{City, Tour, TspInstance};

/// Header fields recognized before a data section.
#[derive(Debug, Default)]
struct Header {
    name: Option<String>,
    dimension: Option<usize>,
}

enum Line<'a> {
    Blank,
    Eof,
    Section(&'a str),
    Field(&'a str, &'a str),
    Data(&'a str),
}

fn classify(raw: &str) -> Line<'_> {
    let line = raw.trim();
    if line.is_empty() {
        return Line::Blank;
    }
    if line == "EOF" {
        return Line::Eof;
    }
    if line.ends_with("_SECTION") {
        return Line::Section(line);
    }
    match line.split_once(':') {
        Some((key, value)) if key.trim().chars().all(|c| c.is_ascii_uppercase() || c == '_') => {
            Line::Field(key.trim(), value.trim())
        }
        _ => Line::Data(line),
    }
}

fn malformed(line: usize, message: impl Into<String>) -> TsplibError {
    TsplibError::Malformed {
        line,
        message: message.into(),
    }
}

fn apply_field(header: &mut Header, key: &str, value: &str, line: usize) -> Result<(), TsplibError> {
    match key {
        "NAME" => header.name = Some(value.to_string()),
        "DIMENSION" => {
            let dimension = value
                .parse()
                .map_err(|_| malformed(line, format!("invalid DIMENSION {value:?}")))?;
            header.dimension = Some(dimension);
        }
        "EDGE_WEIGHT_TYPE" => {
            if value != "EUC_2D" && value != "CEIL_2D" {
                return Err(TsplibError::UnsupportedEdgeWeight(value.to_string()));
            }
        }
        _ => {}
    }
    Ok(())
}

/// Reads a TSPLIB instance with a `NODE_COORD_SECTION`.
///
/// Cities are numbered in the order their coordinate lines appear.
///
/// # Errors
///
/// Returns a [`TsplibError`] on unreadable input, unsupported edge weight
/// types, malformed coordinate lines, a missing coordinate section, or a
/// `DIMENSION` that disagrees with the number of coordinates.
pub fn read_instance<R: BufRead>(reader: R) -> Result<TspInstance, TsplibError> {
    let mut header = Header::default();
    let mut cities: Option<Vec<City>> = None;

    for (idx, raw) in reader.lines().enumerate() {
        let raw = raw?;
        let line_no = idx + 1;
        match classify(&raw) {
            Line::Blank => {}
            Line::Eof => break,
            Line::Section("NODE_COORD_SECTION") => cities = Some(Vec::new()),
            Line::Section(other) => {
                if cities.is_some() {
                    break;
                }
                return Err(malformed(line_no, format!("unexpected {other}")));
            }
            Line::Field(key, value) if cities.is_none() => {
                apply_field(&mut header, key, value, line_no)?;
            }
            Line::Field(..) => return Err(malformed(line_no, "header field inside data section")),
            Line::Data(data) => {
                let Some(list) = cities.as_mut() else {
                    return Err(malformed(line_no, "coordinates before NODE_COORD_SECTION"));
                };
                list.push(parse_coordinate(data, line_no)?);
            }
        }
    }

    let cities = cities.ok_or(TsplibError::MissingSection("NODE_COORD_SECTION"))?;
    if let Some(declared) = header.dimension {
        if declared != cities.len() {
            return Err(TsplibError::DimensionMismatch {
                declared,
                found: cities.len(),
            });
        }
    }

    let instance = TspInstance::new(cities);
    Ok(match header.name {
        Some(name) => instance.with_name(name),
        None => instance,
    })
}

fn parse_coordinate(data: &str, line: usize) -> Result<City, TsplibError> {
    let fields: Vec<&str> = data.split_whitespace().collect();
    if fields.len() != 3 {
        return Err(malformed(
            line,
            format!("expected `id x y`, found {} fields", fields.len()),
        ));
    }
    let coord = |s: &str| {
        s.parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| malformed(line, format!("invalid coordinate {s:?}")))
    };
    Ok(City::new(coord(fields[1])?, coord(fields[2])?))
}

/// Reads a TSPLIB tour file with a `TOUR_SECTION`.
///
/// The section ends at `-1`, `EOF`, or end of input. Ids may be spread over
/// any number of lines.
///
/// # Errors
///
/// Returns a [`TsplibError`] on unreadable input, non-integer ids, a missing
/// tour section, a `DIMENSION` mismatch, or ids that are not a permutation
/// of `1..=n`.
pub fn read_tour<R: BufRead>(reader: R) -> Result<Tour, TsplibError> {
    let mut header = Header::default();
    let mut ids: Option<Vec<usize>> = None;

    'lines: for (idx, raw) in reader.lines().enumerate() {
        let raw = raw?;
        let line_no = idx + 1;
        match classify(&raw) {
            Line::Blank => {}
            Line::Eof => break,
            Line::Section("TOUR_SECTION") => ids = Some(Vec::new()),
            Line::Section(other) => return Err(malformed(line_no, format!("unexpected {other}"))),
            Line::Field(key, value) if ids.is_none() => {
                if key == "NAME" || key == "DIMENSION" {
                    apply_field(&mut header, key, value, line_no)?;
                }
            }
            Line::Field(..) => return Err(malformed(line_no, "header field inside tour section")),
            Line::Data(data) => {
                let Some(list) = ids.as_mut() else {
                    return Err(malformed(line_no, "tour ids before TOUR_SECTION"));
                };
                for token in data.split_whitespace() {
                    let id: i64 = token
                        .parse()
                        .map_err(|_| malformed(line_no, format!("invalid node id {token:?}")))?;
                    if id == -1 {
                        break 'lines;
                    }
                    if id < 1 {
                        return Err(malformed(line_no, format!("node id {id} is not positive")));
                    }
                    list.push((id - 1) as usize);
                }
            }
        }
    }

    let ids = ids.ok_or(TsplibError::MissingSection("TOUR_SECTION"))?;
    if let Some(declared) = header.dimension {
        if declared != ids.len() {
            return Err(TsplibError::DimensionMismatch {
                declared,
                found: ids.len(),
            });
        }
    }
    let n = ids.len();
    Tour::new(ids).ok_or(TsplibError::InvalidTour(n))
}

/// Parses a TSPLIB instance from text. See [`read_instance`].
///
/// # Examples
///
/// ```
/// use tsp_anneal::tsplib::parse_instance;
/// use tsp_anneal::models::TspProblem;
///
/// let text = "NAME : square4\n\
///             TYPE : TSP\n\
///             DIMENSION : 4\n\
///             EDGE_WEIGHT_TYPE : EUC_2D\n\
///             NODE_COORD_SECTION\n\
///             1 0 0\n2 1 0\n3 1 1\n4 0 1\n\
///             EOF\n";
/// let instance = parse_instance(text).unwrap();
/// assert_eq!(instance.name(), Some("square4"));
/// assert!((instance.tour_length(&[0, 1, 2, 3]) - 4.0).abs() < 1e-10);
/// ```
pub fn parse_instance(text: &str) -> Result<TspInstance, TsplibError> {
    read_instance(text.as_bytes())
}

/// Parses a TSPLIB tour from text. See [`read_tour`].
pub fn parse_tour(text: &str) -> Result<Tour, TsplibError> {
    read_tour(text.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TspProblem;

    const EIL_HEAD: &str = "NAME : eil5\n\
COMMENT : 5-city excerpt (Christofides/Eilon)\n\
TYPE : TSP\n\
DIMENSION : 5\n\
EDGE_WEIGHT_TYPE : EUC_2D\n\
NODE_COORD_SECTION\n\
1 37 52\n\
2 49 49\n\
3 52 64\n\
4 20 26\n\
5 40 30\n\
EOF\n";

    #[test]
    fn test_parse_instance() {
        let instance = parse_instance(EIL_HEAD).expect("valid");
        assert_eq!(instance.name(), Some("eil5"));
        assert_eq!(instance.num_cities(), 5);
        assert_eq!(instance.cities()[3], City::new(20.0, 26.0));
    }

    #[test]
    fn test_parse_instance_colon_without_spaces() {
        let text = "NAME: tiny\nDIMENSION: 2\nNODE_COORD_SECTION\n1 0.5 1e2\n2 -3 4\n";
        let instance = parse_instance(text).expect("valid");
        assert_eq!(instance.cities()[0], City::new(0.5, 100.0));
        assert_eq!(instance.num_cities(), 2);
    }

    #[test]
    fn test_dimension_mismatch() {
        let text = EIL_HEAD.replace("DIMENSION : 5", "DIMENSION : 6");
        assert_eq!(
            parse_instance(&text).unwrap_err(),
            TsplibError::DimensionMismatch {
                declared: 6,
                found: 5
            }
        );
    }

    #[test]
    fn test_unsupported_edge_weight() {
        let text = EIL_HEAD.replace("EUC_2D", "GEO");
        assert_eq!(
            parse_instance(&text).unwrap_err(),
            TsplibError::UnsupportedEdgeWeight("GEO".into())
        );
    }

    #[test]
    fn test_malformed_coordinate_reports_line() {
        let text = EIL_HEAD.replace("3 52 64", "3 52");
        match parse_instance(&text).unwrap_err() {
            TsplibError::Malformed { line, .. } => assert_eq!(line, 9),
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_missing_section() {
        assert_eq!(
            parse_instance("NAME : x\nDIMENSION : 1\nEOF\n").unwrap_err(),
            TsplibError::MissingSection("NODE_COORD_SECTION")
        );
    }

    #[test]
    fn test_parse_tour() {
        let text = "NAME : eil5.opt.tour\nTYPE : TOUR\nDIMENSION : 5\nTOUR_SECTION\n1\n3 2\n5\n4\n-1\nEOF\n";
        let tour = parse_tour(text).expect("valid");
        assert_eq!(tour.cities(), &[0, 2, 1, 4, 3]);
    }

    #[test]
    fn test_parse_tour_without_terminator() {
        let tour = parse_tour("TOUR_SECTION\n2\n1\n").expect("valid");
        assert_eq!(tour.cities(), &[1, 0]);
    }

    #[test]
    fn test_parse_tour_rejects_duplicates() {
        let text = "TOUR_SECTION\n1\n2\n2\n-1\n";
        assert_eq!(parse_tour(text).unwrap_err(), TsplibError::InvalidTour(3));
    }

    #[test]
    fn test_parse_tour_rejects_zero_id() {
        assert!(matches!(
            parse_tour("TOUR_SECTION\n0\n1\n-1\n").unwrap_err(),
            TsplibError::Malformed { line: 2, .. }
        ));
    }

    #[test]
    fn test_tour_on_instance() {
        let instance = parse_instance(EIL_HEAD).expect("valid");
        let tour = parse_tour("TOUR_SECTION\n1 2 3 5 4\n-1\n").expect("valid");
        assert!(instance.validate_tour(tour.cities()).is_ok());
        assert!(instance.tour_length(tour.cities()) > 0.0);
    }
}
