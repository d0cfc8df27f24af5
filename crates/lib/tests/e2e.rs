use eyre::WrapErr;
use fifo_pnl_lib::{
    execute, run, ClassifyError, ConversionError, Error, ParserError, TransactionExecutionError,
    DEFAULT_PRECISION,
};
use glob::glob;
use std::{fs::File, io::BufReader};

#[test]
fn run_test_files() {
    let mut inputs = glob("tests/test-cases/*.input.csv")
        .unwrap()
        .collect::<Result<Vec<_>, _>>()
        .unwrap();
    let mut outputs = glob("tests/test-cases/*.output.csv")
        .unwrap()
        .collect::<Result<Vec<_>, _>>()
        .unwrap();

    inputs.sort();
    outputs.sort();
    assert!(!inputs.is_empty());
    assert_eq!(inputs.len(), outputs.len());

    for (input, output) in inputs.iter().zip(outputs.iter()) {
        let expected = std::fs::read_to_string(output).unwrap();
        let mut actual = Vec::new();
        let mut reader = BufReader::new(File::open(input).unwrap());

        execute(&mut reader, &mut actual, DEFAULT_PRECISION)
            .wrap_err_with(|| format!("Failed to execute {input:?}"))
            .unwrap();

        assert_eq!(
            String::from_utf8(actual).unwrap(),
            expected,
            "The input file {input:?} didn't match the output file {output:?}"
        );
    }
}

#[test]
fn insufficient_inventory_writes_nothing() {
    let input = "2021-01-01,2,20\n2021-01-02,3,30\n2021-01-03,-6,66\n";
    let mut actual = Vec::new();

    let err = execute(input.as_bytes(), &mut actual, DEFAULT_PRECISION).unwrap_err();

    assert!(matches!(
        err,
        Error::TransactionExecutionError(TransactionExecutionError::InsufficientInventory {
            sell: 1,
            ..
        })
    ));
    assert!(err.to_string().starts_with("Insufficient inventory"));
    assert!(actual.is_empty());
}

#[test]
fn malformed_row_stops_the_run() {
    let input = "2021-01-01,2,20\n2021-01-02,two,30\n2021-01-03,-1,11\n";
    let mut actual = Vec::new();

    let err = execute(input.as_bytes(), &mut actual, DEFAULT_PRECISION).unwrap_err();

    assert!(matches!(
        err,
        Error::ParserError(ParserError::MalformedRow { row: 2, .. })
    ));
    assert!(actual.is_empty());
}

#[test]
fn unrepresentable_quantity_is_a_malformed_row() {
    let err = run("2021-01-01,1e300,1\n".as_bytes(), DEFAULT_PRECISION).unwrap_err();
    assert!(matches!(
        err,
        Error::ClassifyError(ClassifyError::MalformedRow { row: 1, .. })
    ));
}

#[test]
fn negative_precision_is_rejected() {
    let err = run("2021-01-01,1,1\n".as_bytes(), -1).unwrap_err();
    assert!(matches!(
        err,
        Error::ConversionError(ConversionError::InvalidPrecision(-1))
    ));
    assert!(err.to_string().starts_with("Invalid precision"));
}

#[test]
fn precision_controls_tick_size() {
    let input = "2021-01-01,1.23456,10\n2021-01-02,-1.2,12\n";
    let mut actual = Vec::new();

    execute(input.as_bytes(), &mut actual, 2).unwrap();

    let actual = String::from_utf8(actual).unwrap();
    let open_line = actual.lines().last().unwrap();
    assert_eq!(open_line.split(',').nth(2), Some("0.03"));
}

#[test]
fn reruns_are_byte_identical() {
    let input = std::fs::read("tests/test-cases/04-unsorted-ties.input.csv").unwrap();

    let mut first = Vec::new();
    let mut second = Vec::new();
    execute(input.as_slice(), &mut first, DEFAULT_PRECISION).unwrap();
    execute(input.as_slice(), &mut second, DEFAULT_PRECISION).unwrap();

    assert_eq!(first, second);
}
