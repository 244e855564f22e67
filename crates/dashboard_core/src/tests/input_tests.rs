use super::parse_digits;

#[test]
fn parses_comma_separated_integers() {
    assert_eq!(parse_digits("12, 45, 7"), vec![12, 45, 7]);
}

#[test]
fn drops_non_numeric_and_empty_tokens_in_order() {
    assert_eq!(parse_digits("a,1,,3"), vec![1, 3]);
}

#[test]
fn empty_input_yields_empty_sequence() {
    assert!(parse_digits("").is_empty());
    assert!(parse_digits("   ").is_empty());
    assert!(parse_digits(",,,").is_empty());
}

#[test]
fn trims_whitespace_around_tokens() {
    assert_eq!(parse_digits("  7 ,8"), vec![7, 8]);
    assert_eq!(parse_digits("\t1,\n2 "), vec![1, 2]);
}

#[test]
fn keeps_duplicates_and_signs() {
    assert_eq!(parse_digits("3,3,-4,+5,3"), vec![3, 3, -4, 5, 3]);
}

#[test]
fn keeps_the_leading_integer_of_each_token() {
    assert_eq!(parse_digits("12abc,3.9,1e3"), vec![12, 3, 1]);
    assert_eq!(parse_digits("7 8, -2.5, +4x"), vec![7, -2, 4]);
}

#[test]
fn drops_tokens_without_leading_digits_or_out_of_range() {
    assert_eq!(parse_digits("abc12, .5, -, +,2"), vec![2]);
    assert_eq!(parse_digits("99999999999999999999,4"), vec![4]);
    assert_eq!(parse_digits("--3, -9223372036854775808"), vec![i64::MIN]);
}
