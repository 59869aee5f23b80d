use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::error::{ReportError, Result};

/// One individual from the census extract. Columns not named here are
/// skipped during decoding.
#[derive(Debug, serde::Deserialize, Clone, PartialEq)]
pub struct Record {
    pub race: String,
    pub sex: String,
    pub age: u8,
    pub education: String,
    #[serde(rename = "hours-per-week")]
    pub hours_per_week: u8,
    #[serde(rename = "native-country")]
    pub native_country: String,
    pub occupation: String,
    pub salary: String,
}

pub fn read_data(path: &Path) -> Result<Vec<Record>> {
    let file = File::open(path).map_err(|source| ReportError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    read_records(file).map_err(|source| ReportError::Csv {
        path: path.to_path_buf(),
        source,
    })
}

pub fn read_records<R: Read>(reader: R) -> std::result::Result<Vec<Record>, csv::Error> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut records = Vec::<Record>::new();
    for result in rdr.deserialize() {
        let record: Record = result?;
        records.push(record);
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "age,workclass,fnlwgt,education,education-num,marital-status,occupation,relationship,race,sex,capital-gain,capital-loss,hours-per-week,native-country,salary";

    #[test]
    fn decodes_full_adult_header_and_ignores_extra_columns() {
        let data = format!(
            "{HEADER}\n39,State-gov,77516,Bachelors,13,Never-married,Adm-clerical,Not-in-family,White,Male,2174,0,40,United-States,<=50K\n"
        );
        let records = read_records(data.as_bytes()).unwrap();
        assert_eq!(records.len(), 1);
        let r = &records[0];
        assert_eq!(r.age, 39);
        assert_eq!(r.education, "Bachelors");
        assert_eq!(r.occupation, "Adm-clerical");
        assert_eq!(r.hours_per_week, 40);
        assert_eq!(r.native_country, "United-States");
        assert_eq!(r.salary, "<=50K");
    }

    /// The UCI distribution puts a space after every comma.
    #[test]
    fn trims_padded_fields() {
        let data = "race, sex, age, education, hours-per-week, native-country, occupation, salary\n\
                    White, Female, 28, Masters, 45, Cuba, Prof-specialty, >50K\n";
        let records = read_records(data.as_bytes()).unwrap();
        assert_eq!(records[0].sex, "Female");
        assert_eq!(records[0].native_country, "Cuba");
        assert_eq!(records[0].salary, ">50K");
    }

    #[test]
    fn missing_column_is_an_error() {
        let data = "race,sex,age,education,native-country,occupation,salary\n\
                    White,Male,30,Bachelors,United-States,Sales,>50K\n";
        assert!(read_records(data.as_bytes()).is_err());
    }

    #[test]
    fn non_numeric_age_is_an_error() {
        let data = "race,sex,age,education,hours-per-week,native-country,occupation,salary\n\
                    White,Male,thirty,Bachelors,40,United-States,Sales,>50K\n";
        assert!(read_records(data.as_bytes()).is_err());
    }

    #[test]
    fn missing_file_maps_to_io_error() {
        let err = read_data(Path::new("/nonexistent/adult.data.csv")).unwrap_err();
        assert!(matches!(err, ReportError::Io { .. }));
    }
}
