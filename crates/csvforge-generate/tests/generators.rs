use chrono::{Datelike, NaiveDate, NaiveTime};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use csvforge_core::{CellValue, DataType, RangeSpec, parse_range};
use csvforge_generate::assets::{Lexicon, LexiconHandle};
use csvforge_generate::errors::GenerationError;
use csvforge_generate::generators::{GenerationContext, GeneratorContext, GeneratorRegistry};

fn generate(
    data_type: DataType,
    range: &str,
    rows: usize,
    lexicon: &LexiconHandle,
    seed: u64,
) -> Result<Vec<CellValue>, GenerationError> {
    let registry = GeneratorRegistry::new();
    let generator = registry.generator(data_type).expect("generator exists");
    let spec = parse_range(data_type, range).expect("valid range");
    let ctx = GenerationContext::new(lexicon);
    let column_ctx = GeneratorContext::for_column("column", &ctx);
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    generator.generate(&column_ctx, &spec, rows, &mut rng)
}

fn values(data_type: DataType, range: &str, rows: usize) -> Vec<CellValue> {
    generate(data_type, range, rows, &LexiconHandle::pending(), 17).expect("generate")
}

#[test]
fn every_data_type_has_a_generator() {
    let registry = GeneratorRegistry::new();
    for data_type in DataType::ALL {
        assert!(registry.generator(data_type).is_some(), "{data_type}");
    }
}

#[test]
fn integer_values_stay_within_bounds() {
    let generated = values(DataType::IntegerRange, "-3-4", 500);
    assert_eq!(generated.len(), 500);
    for value in &generated {
        let value = value.as_i64().expect("integer");
        assert!((-3..=4).contains(&value));
    }
    assert!(generated.contains(&CellValue::Int(-3)));
    assert!(generated.contains(&CellValue::Int(4)));
}

#[test]
fn negative_ranges_use_comma_syntax() {
    for value in values(DataType::RangeNegative, "-10, -2", 200) {
        let value = value.as_i64().expect("integer");
        assert!((-10..=-2).contains(&value));
    }
}

#[test]
fn float_values_are_half_open() {
    for value in values(DataType::FloatRange, "1.5-2.5", 500) {
        let value = value.as_f64().expect("float");
        assert!((1.5..2.5).contains(&value), "{value}");
    }
}

#[test]
fn random_values_are_unit_interval() {
    for value in values(DataType::Random, "", 200) {
        let value = value.as_f64().expect("float");
        assert!((0.0..1.0).contains(&value));
    }
}

#[test]
fn choice_values_come_from_the_list() {
    let allowed = ["red", "green", "blue"];
    for value in values(DataType::Choice, "red, green,, blue ", 200) {
        let text = value.as_str().expect("text");
        assert!(allowed.contains(&text), "{text}");
    }
}

#[test]
fn dates_in_2024_range_stay_in_2024() {
    let generated = values(DataType::Date, "01.01.2024-31.12.2024", 100);
    assert_eq!(generated.len(), 100);
    let end = NaiveDate::from_ymd_opt(2024, 12, 31).expect("date");
    for value in generated {
        let date = value.as_date().expect("date");
        assert_eq!(date.year(), 2024);
        assert!(date < end);
        let text = value.to_csv();
        assert_eq!(text.len(), 10);
        assert!(text.ends_with(".2024"), "{text}");
    }
}

#[test]
fn times_include_both_ends() {
    let start = NaiveTime::from_hms_opt(9, 0, 0).expect("time");
    let end = NaiveTime::from_hms_opt(9, 0, 3).expect("time");
    let generated = values(DataType::Time, "09:00:00-09:00:03", 300);
    for value in &generated {
        let time = value.as_time().expect("time");
        assert!(time >= start && time <= end);
    }
    assert!(generated.contains(&CellValue::Time(start)));
    assert!(generated.contains(&CellValue::Time(end)));
}

#[test]
fn phones_have_prefix_and_ten_digits() {
    for value in values(DataType::Phone, "", 100) {
        let text = value.as_str().expect("text");
        let digits = text.strip_prefix("+7").expect("prefix");
        assert_eq!(digits.len(), 10);
        assert!(digits.chars().all(|ch| ch.is_ascii_digit()));
    }
}

#[test]
fn emails_use_known_domains() {
    let domains = ["gmail.com", "yahoo.com", "hotmail.com", "outlook.com"];
    for value in values(DataType::Email, "", 100) {
        let text = value.as_str().expect("text");
        let (local, domain) = text.split_once('@').expect("at sign");
        assert_eq!(local.len(), 8);
        assert!(
            local
                .chars()
                .all(|ch| ch.is_ascii_lowercase() || ch.is_ascii_digit())
        );
        assert!(domains.contains(&domain));
    }
}

#[test]
fn names_pair_first_and_last_of_one_gender() {
    let lexicon = Lexicon {
        male_first_names: vec!["Ivan".to_string()],
        female_first_names: vec!["Anna".to_string()],
        male_last_names: vec!["Petrov".to_string()],
        female_last_names: vec!["Petrova".to_string()],
    };
    let handle = LexiconHandle::ready(lexicon);
    let generated = generate(DataType::Name, "", 100, &handle, 3).expect("generate");
    for value in &generated {
        let text = value.as_str().expect("text");
        assert!(text == "Ivan Petrov" || text == "Anna Petrova", "{text}");
    }
}

#[test]
fn names_fail_while_lexicon_is_loading() {
    let err = generate(DataType::Name, "", 1, &LexiconHandle::pending(), 3)
        .expect_err("lexicon pending");
    assert!(err.to_string().contains("still loading"));
}

#[test]
fn generator_rejects_foreign_spec() {
    let registry = GeneratorRegistry::new();
    let generator = registry
        .generator(DataType::IntegerRange)
        .expect("generator exists");
    let lexicon = LexiconHandle::pending();
    let ctx = GenerationContext::new(&lexicon);
    let column_ctx = GeneratorContext::for_column("qty", &ctx);
    let mut rng = ChaCha8Rng::seed_from_u64(1);

    let err = generator
        .generate(&column_ctx, &RangeSpec::Boolean, 1, &mut rng)
        .expect_err("spec mismatch");
    assert!(matches!(err, GenerationError::SpecMismatch { .. }));
}

#[test]
fn zero_rows_yield_an_empty_column() {
    assert!(values(DataType::Email, "", 0).is_empty());
}
