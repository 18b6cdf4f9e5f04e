use arff_instances::{
    from_reader, from_str, ArffReader, AttributeKind, ClassSelector, DenseRecordBuilder, Error,
    ReaderOptions, Record, SparseRecordBuilder,
};
use std::collections::VecDeque;
use std::io::{self, BufReader, Read};

const MIXED: &str = "@ATTRIBUTE a numeric\n\
    @ATTRIBUTE b {x,y}\n\
    @DATA\n\
    1.5,y\n";

const WEATHER: &str = "% Weather data, nominal and numeric\n\
    @relation weather\n\
    \n\
    @attribute outlook {sunny, overcast, rainy}\n\
    @attribute temperature numeric\n\
    @attribute humidity numeric\n\
    @attribute windy {TRUE, FALSE}\n\
    @attribute play {yes, no}\n\
    \n\
    @data\n\
    sunny,85,85,FALSE,no\n\
    sunny,80,90,TRUE,no\n\
    overcast,83,86,FALSE,yes\n\
    rainy,70,96,FALSE,yes\n\
    % a sparse row in the middle\n\
    {0 rainy, 1 68, 4 yes}\n\
    rainy,65,?,TRUE,no\n";

#[test]
fn test_end_to_end_without_class() {
    let mut reader = ArffReader::open(MIXED.as_bytes(), 1, 0).unwrap();
    let record = reader.read_record().unwrap().unwrap();
    assert!(!record.is_sparse());
    assert_eq!(record.num_attributes(), 2);
    assert_eq!(record.attribute(0), Some(1.5));
    assert_eq!(record.attribute(1), Some(1.0));
    assert!(reader.read_record().unwrap().is_none());
}

#[test]
fn test_end_to_end_with_last_class() {
    let mut reader = ArffReader::open(MIXED.as_bytes(), 1, -1).unwrap();
    let record = reader.read_record().unwrap().unwrap();
    assert_eq!(record.label(), 1.0);
    assert_eq!(record.num_attributes(), 1);
    assert_eq!(record.attribute(0), Some(1.5));
    assert!(reader.read_record().unwrap().is_none());
}

#[test]
fn test_weather_dataset() {
    let reader = ArffReader::open(WEATHER.as_bytes(), 6, -1).unwrap();
    assert_eq!(reader.catalog().relation(), "weather");
    assert_eq!(reader.catalog().num_attributes(), 5);
    assert_eq!(reader.catalog().class_attribute().unwrap().name(), "play");

    let records: Vec<Record> = reader.collect::<Result<_, _>>().unwrap();
    assert_eq!(records.len(), 6);

    let labels: Vec<f64> = records.iter().map(Record::label).collect();
    assert_eq!(labels, vec![1.0, 1.0, 0.0, 0.0, 0.0, 1.0]);

    assert_eq!(records[0].to_dense(), vec![0.0, 85.0, 85.0, 1.0]);
    assert_eq!(records[4].to_dense(), vec![2.0, 68.0, 0.0, 0.0]);
    assert!(records[4].is_sparse());
    assert!(records[5].is_missing(2));

    for record in &records {
        assert_eq!(record.kind(0), AttributeKind::Nominal);
        assert_eq!(record.kind(1), AttributeKind::Numeric);
        assert_eq!(record.kind(3), AttributeKind::Nominal);
        assert_eq!(record.weight(), 1.0);
    }
}

#[test]
fn test_class_selector_by_position() {
    let mut reader = ArffReader::open(WEATHER.as_bytes(), 0, 1).unwrap();
    let first = reader.next().unwrap().unwrap();
    assert_eq!(first.label(), 0.0);
    assert_eq!(first.to_dense(), vec![85.0, 85.0, 1.0, 1.0]);
}

#[test]
fn test_sparse_and_dense_agree() {
    let header = "@attribute a numeric\n@attribute b numeric\n@attribute c numeric\n@data\n";
    let input = format!("{}0,5,0\n{{1 5}}\n", header);
    let records = arff_instances::from_str_with_options(
        &input,
        ReaderOptions::new().with_class(ClassSelector::None),
    )
    .unwrap();

    let (dense, sparse) = (&records[0], &records[1]);
    assert!(sparse.is_sparse());
    for i in 0..3 {
        assert_eq!(dense.attribute(i), sparse.attribute(i));
    }
    assert_eq!(sparse.to_dense(), vec![0.0, 5.0, 0.0]);
    assert_eq!(dense.to_dense(), sparse.to_dense());
}

#[test]
fn test_missing_is_nan_but_absent_is_zero() {
    let input = "@attribute a numeric\n@attribute b numeric\n@data\n?,2\n{1 2}\n";
    let records = arff_instances::from_str_with_options(
        input,
        ReaderOptions::new().with_class(ClassSelector::None),
    )
    .unwrap();
    let dense_value = records[0].attribute(0).unwrap();
    let sparse_value = records[1].attribute(0).unwrap();
    assert!(dense_value.is_nan());
    assert_eq!(sparse_value, 0.0);
    assert_ne!(dense_value.is_nan(), sparse_value.is_nan());
}

#[test]
fn test_unknown_label_never_silently_zero() {
    let input = "@attribute c {a,b,c}\n@data\nz\n";
    let mut reader = ArffReader::open(input.as_bytes(), 0, 0).unwrap();
    match reader.read_record() {
        Err(Error::UnknownLabel {
            attribute, label, ..
        }) => {
            assert_eq!(attribute, "c");
            assert_eq!(label, "z");
        }
        other => panic!("expected an unknown label error, got {:?}", other),
    }
}

#[test]
fn test_builder_clone_round_trip() {
    let original = DenseRecordBuilder::new()
        .set_attributes(vec![1.0, 2.0, 3.0])
        .build();
    let mut builder = DenseRecordBuilder::from_record(&original);
    builder.set_attribute(0, 9.0).unwrap();
    let modified = builder.build();

    assert_eq!(original.attribute(0), Some(1.0));
    assert_eq!(modified.attribute(0), Some(9.0));
    assert_eq!(modified.values()[1..], original.values()[1..]);
}

#[test]
fn test_sparse_builder_projection() {
    let record = SparseRecordBuilder::new()
        .num_attributes(3)
        .set_attribute(1, 5.0)
        .unwrap()
        .build();
    assert_eq!(record.attribute(0), Some(0.0));
    assert_eq!(record.attribute(1), Some(5.0));
    assert_eq!(record.attribute(2), Some(0.0));
    assert_eq!(record.to_dense(), vec![0.0, 5.0, 0.0]);
}

#[test]
fn test_records_export_to_json() {
    let records = from_str(
        "@attribute a numeric\n@attribute b {x,y}\n@attribute c {p,q}\n@data\n2,x,q\n{1 y}\n",
    )
    .unwrap();
    let json = serde_json::to_value(&records).unwrap();

    assert_eq!(json[0]["Dense"]["values"], serde_json::json!([2.0, 0.0]));
    assert_eq!(json[0]["Dense"]["label"], serde_json::json!(1.0));
    assert_eq!(json[1]["Sparse"]["num_attributes"], serde_json::json!(2));

    let back: Vec<Record> = serde_json::from_value(json).unwrap();
    assert_eq!(back, records);
}

/// Hands out queued chunks, one per `read` call.
struct ScriptedSource {
    chunks: VecDeque<io::Result<Vec<u8>>>,
}

impl ScriptedSource {
    fn new(chunks: Vec<io::Result<&str>>) -> Self {
        ScriptedSource {
            chunks: chunks
                .into_iter()
                .map(|c| c.map(|s| s.as_bytes().to_vec()))
                .collect(),
        }
    }
}

impl Read for ScriptedSource {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self.chunks.pop_front() {
            None => Ok(0),
            Some(Err(e)) => Err(e),
            Some(Ok(bytes)) => {
                buf[..bytes.len()].copy_from_slice(&bytes);
                Ok(bytes.len())
            }
        }
    }
}

fn flaky() -> io::Result<&'static str> {
    Err(io::Error::new(io::ErrorKind::Other, "connection reset"))
}

#[test]
fn test_read_failure_halts_until_resumed() {
    let source = ScriptedSource::new(vec![
        Ok("@attribute a numeric\n@data\n1\n"),
        flaky(),
        Ok("2\n"),
    ]);
    let mut reader = ArffReader::open(BufReader::new(source), 0, 0).unwrap();

    assert_eq!(reader.read_record().unwrap().unwrap().attribute(0), Some(1.0));

    let err = reader.read_record().unwrap_err();
    assert!(err.is_io());
    assert!(reader.is_halted());
    assert!(matches!(reader.read_record(), Err(Error::Halted)));

    reader.resume();
    assert!(!reader.is_halted());
    assert_eq!(reader.read_record().unwrap().unwrap().attribute(0), Some(2.0));
    assert!(reader.read_record().unwrap().is_none());
    assert_eq!(reader.records_read(), 2);
}

#[test]
fn test_iterator_stops_after_read_failure() {
    let source = ScriptedSource::new(vec![
        Ok("@attribute a numeric\n@data\n1\n"),
        flaky(),
        Ok("2\n"),
    ]);
    let reader = from_reader(source, ReaderOptions::new().with_class(ClassSelector::None)).unwrap();
    let results: Vec<_> = reader.collect();
    assert_eq!(results.len(), 2);
    assert!(results[0].is_ok());
    assert!(matches!(results[1], Err(Error::Io { .. })));
}

#[test]
fn test_iterator_continues_past_bad_lines() {
    let input = "@attribute a numeric\n@data\n1\nx\n3\n";
    let reader = ArffReader::open(input.as_bytes(), 0, 0).unwrap();
    let results: Vec<_> = reader.collect();
    assert_eq!(results.len(), 3);
    assert!(results[0].is_ok());
    assert!(matches!(results[1], Err(Error::InvalidNumber { line: 4, .. })));
    assert_eq!(results[2].as_ref().unwrap().attribute(0), Some(3.0));
}

#[test]
fn test_header_errors_surface_at_open() {
    let err = ArffReader::open("@attribute a {x, y\n@data\n".as_bytes(), 0, 0)
        .err()
        .unwrap();
    assert!(matches!(err, Error::Header { .. }));

    let err = ArffReader::open("@attribute a numeric\n".as_bytes(), 0, 0)
        .err()
        .unwrap();
    assert!(matches!(err, Error::MissingDataSection));
}
