//! Conformance tests for the accepted ARFF dialect.

use arff_instances::{
    from_str_with_options, ArffReader, AttributeKind, ClassSelector, Error, ReaderOptions, Record,
    ShortRowPolicy,
};

fn read_all(input: &str) -> Vec<Record> {
    from_str_with_options(input, ReaderOptions::new().with_class(ClassSelector::None)).unwrap()
}

fn first_error(input: &str, options: ReaderOptions) -> Error {
    from_str_with_options(input, options).unwrap_err()
}

#[test]
fn test_directives_are_case_insensitive() {
    let input = "@ReLaTiOn Mixed\n@ATTRIBUTE a NUMERIC\n@attribute b Real\n@Data\n1 2\n";
    let reader = ArffReader::open(input.as_bytes(), 0, 0).unwrap();
    assert_eq!(reader.catalog().relation(), "Mixed");
    assert_eq!(reader.catalog().num_attributes(), 2);
}

#[test]
fn test_relation_defaults_when_absent() {
    let reader = ArffReader::from_str("@attribute a numeric\n@data\n").unwrap();
    assert_eq!(reader.catalog().relation(), "file stream");

    let options = ReaderOptions::new().with_default_relation("unnamed");
    let reader = ArffReader::with_options("@data\n".as_bytes(), options).unwrap();
    assert_eq!(reader.catalog().relation(), "unnamed");
}

#[test]
fn test_comments_and_blank_lines() {
    let input = "% leading comment\n\
        @relation r % trailing comment\n\
        \n\
        @attribute a numeric\n\
        % between declarations\n\
        @attribute b numeric\n\
        @data\n\
        \n\
        % comment line in the data\n\
        1, 2 % trailing comment\n\
        \n\
        3, 4\n";
    let records = read_all(input);
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].to_dense(), vec![1.0, 2.0]);
    assert_eq!(records[1].to_dense(), vec![3.0, 4.0]);
}

#[test]
fn test_commas_and_spaces_are_interchangeable() {
    let header = "@attribute a numeric\n@attribute b {x, y}\n@attribute c numeric\n@data\n";
    let with_commas = read_all(&format!("{}1,y,3\n", header));
    let with_spaces = read_all(&format!("{}1 y 3\n", header));
    let mixed = read_all(&format!("{}1 ,, y\t,3\n", header));
    assert_eq!(with_commas, with_spaces);
    assert_eq!(with_commas, mixed);
}

#[test]
fn test_crlf_line_endings() {
    let input = "@relation r\r\n@attribute a numeric\r\n@attribute b numeric\r\n@data\r\n1,2\r\n3,4\r\n";
    let records = read_all(input);
    assert_eq!(records.len(), 2);
    assert_eq!(records[1].to_dense(), vec![3.0, 4.0]);
}

#[test]
fn test_last_line_without_newline() {
    let records = read_all("@attribute a numeric\n@data\n1\n2");
    assert_eq!(records.len(), 2);
    assert_eq!(records[1].attribute(0), Some(2.0));
}

#[test]
fn test_byte_order_mark_is_whitespace() {
    let records = read_all("\u{feff}@relation r\n@attribute a numeric\n@data\n5\n");
    assert_eq!(records[0].attribute(0), Some(5.0));
}

#[test]
fn test_unknown_directives_are_skipped() {
    let input = "@relation r\n\
        @comment this whole line { is ignored\n\
        @attribute a numeric\n\
        @data\n\
        7\n";
    let reader = ArffReader::open(input.as_bytes(), 0, 0).unwrap();
    assert_eq!(reader.catalog().num_attributes(), 1);
    let records: Vec<Record> = reader.collect::<Result<_, _>>().unwrap();
    assert_eq!(records[0].attribute(0), Some(7.0));
}

#[test]
fn test_quoted_names_and_labels() {
    let input = "@relation 'my relation'\n\
        @attribute \"wind speed\" numeric\n\
        @attribute colour {'light blue', \"dark, red\", 'it\\'s'}\n\
        @data\n\
        3, 'dark, red'\n\
        4, 'it\\'s'\n\
        5, \"light blue\"\n";
    let reader = ArffReader::open(input.as_bytes(), 0, 0).unwrap();
    let catalog = reader.catalog().clone();
    assert_eq!(catalog.relation(), "my relation");
    assert_eq!(catalog.attribute(0).unwrap().name(), "wind speed");
    assert_eq!(
        catalog.attribute(1).unwrap().labels().collect::<Vec<_>>(),
        vec!["light blue", "dark, red", "it's"]
    );

    let records: Vec<Record> = reader.collect::<Result<_, _>>().unwrap();
    let ordinals: Vec<f64> = records.iter().map(|r| r.attribute(1).unwrap()).collect();
    assert_eq!(ordinals, vec![1.0, 2.0, 0.0]);
}

#[test]
fn test_unicode_labels() {
    let input = "@attribute city {Zürich, Kraków, 東京}\n@data\n東京\nKraków\n";
    let records = read_all(input);
    assert_eq!(records[0].attribute(0), Some(2.0));
    assert_eq!(records[1].attribute(0), Some(1.0));
}

#[test]
fn test_type_keywords() {
    let input = "@attribute a INTEGER\n\
        @attribute b real\n\
        @attribute c string\n\
        @attribute d date\n\
        @attribute e {p, q}\n\
        @data\n";
    let reader = ArffReader::open(input.as_bytes(), 0, 0).unwrap();
    let kinds: Vec<AttributeKind> = reader
        .catalog()
        .attributes()
        .iter()
        .map(|a| a.kind())
        .collect();
    assert_eq!(
        kinds,
        vec![
            AttributeKind::Numeric,
            AttributeKind::Numeric,
            AttributeKind::Numeric,
            AttributeKind::Date,
            AttributeKind::Nominal,
        ]
    );
}

#[test]
fn test_date_values() {
    let input = "@attribute stamp date\n\
        @attribute day date \"yyyy-MM-dd\"\n\
        @data\n\
        2024-01-01T00:00:00, 1970-01-02\n\
        ?, 1970-01-01\n";
    let records = read_all(input);
    assert_eq!(records[0].attribute(0), Some(1_704_067_200_000.0));
    assert_eq!(records[0].attribute(1), Some(86_400_000.0));
    assert!(records[1].is_missing(0));
    assert_eq!(records[1].attribute(1), Some(0.0));
    assert!(records[0].is_date(0));

    let err = first_error(
        "@attribute day date 'yyyy-MM-dd'\n@data\nyesterday\n",
        ReaderOptions::new().with_class(ClassSelector::None),
    );
    match err {
        Error::InvalidDate { text, pattern, .. } => {
            assert_eq!(text, "yesterday");
            assert_eq!(pattern, "yyyy-MM-dd");
        }
        other => panic!("expected an invalid date error, got {:?}", other),
    }
}

#[test]
fn test_numeric_literals_match_nominal_labels() {
    let input = "@attribute grade {1.0, 2.0, 10}\n@data\n1\n2.0\n10.0\n";
    let records = read_all(input);
    let ordinals: Vec<f64> = records.iter().map(|r| r.attribute(0).unwrap()).collect();
    assert_eq!(ordinals, vec![0.0, 1.0, 2.0]);
}

#[test]
fn test_weights() {
    let input = "@attribute a numeric\n@attribute b numeric\n@data\n\
        1, 2, {0.5}\n\
        {1 3}, {2}\n\
        4, 5\n";
    let records = read_all(input);
    assert_eq!(records[0].weight(), 0.5);
    assert_eq!(records[0].to_dense(), vec![1.0, 2.0]);
    assert_eq!(records[1].weight(), 2.0);
    assert!(records[1].is_sparse());
    assert_eq!(records[2].weight(), 1.0);
}

#[test]
fn test_sparse_indices_skip_the_class() {
    let input = "@attribute a numeric\n\
        @attribute b {no, yes}\n\
        @attribute c numeric\n\
        @attribute d numeric\n\
        @data\n\
        {0 5, 1 yes, 3 9}\n";
    let options = ReaderOptions::new().with_class(ClassSelector::Index(1));
    let records = from_str_with_options(input, options).unwrap();
    let record = &records[0];
    assert_eq!(record.label(), 1.0);
    assert_eq!(record.num_attributes(), 3);
    assert_eq!(record.to_dense(), vec![5.0, 0.0, 9.0]);
    assert_eq!(record.kind(1), AttributeKind::Numeric);
}

#[test]
fn test_short_rows() {
    let input = "@attribute a numeric\n@attribute b numeric\n@attribute c numeric\n@data\n1, 2\n";

    let err = first_error(input, ReaderOptions::new().with_class(ClassSelector::None));
    assert!(matches!(err, Error::SchemaMismatch { line: 5, .. }));

    let options = ReaderOptions::new()
        .with_class(ClassSelector::None)
        .with_short_rows(ShortRowPolicy::ZeroFill);
    let records = from_str_with_options(input, options).unwrap();
    assert_eq!(records[0].to_dense(), vec![1.0, 2.0, 0.0]);
}

#[test]
fn test_long_rows_are_rejected() {
    let input = "@attribute a numeric\n@data\n1, 2\n3\n";
    let mut reader = ArffReader::open(input.as_bytes(), 0, 0).unwrap();
    assert!(matches!(
        reader.read_record(),
        Err(Error::SchemaMismatch { line: 3, .. })
    ));
    assert_eq!(reader.read_record().unwrap().unwrap().attribute(0), Some(3.0));
}

#[test]
fn test_malformed_sparse_lines() {
    let input = "@attribute a numeric\n@attribute b numeric\n@data\n\
        {0 1, 5 2}\n\
        {0 1, 1\n\
        {x 1}\n\
        {1 4}\n";
    let mut reader = ArffReader::open(input.as_bytes(), 0, 0).unwrap();
    for _ in 0..3 {
        assert!(matches!(
            reader.read_record(),
            Err(Error::SchemaMismatch { .. })
        ));
    }
    assert_eq!(reader.read_record().unwrap().unwrap().to_dense(), vec![0.0, 4.0]);
    assert!(reader.read_record().unwrap().is_none());
}

#[test]
fn test_unterminated_quote_spoils_only_its_line() {
    let input = "@attribute s {'a b', c}\n@data\n'a b\nc\n";
    let mut reader = ArffReader::open(input.as_bytes(), 0, 0).unwrap();
    assert!(matches!(
        reader.read_record(),
        Err(Error::UnterminatedQuote { line: 3, .. })
    ));
    assert_eq!(reader.read_record().unwrap().unwrap().attribute(0), Some(1.0));
}

#[test]
fn test_header_error_cases() {
    let duplicate = ArffReader::from_str("@attribute a {x, y, x}\n@data\n").err().unwrap();
    assert!(matches!(duplicate, Error::DuplicateLabel { .. }));

    let options = ReaderOptions::new().with_class(ClassSelector::Index(4));
    let out_of_range =
        ArffReader::with_options("@attribute a numeric\n@data\n".as_bytes(), options)
            .err()
            .unwrap();
    assert!(matches!(
        out_of_range,
        Error::InvalidClassIndex {
            requested: 5,
            available: 1
        }
    ));

    let nameless = ArffReader::from_str("@attribute\n@data\n").err().unwrap();
    assert!(matches!(nameless, Error::Header { line: 1, .. }));
}
