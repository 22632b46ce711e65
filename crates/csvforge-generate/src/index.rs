use rand::Rng;

use csvforge_core::{CellValue, IndexMode};

/// Probability that a custom index row is left as a placeholder.
pub const CUSTOM_GAP_PROBABILITY: f64 = 0.1;

/// Values of the leading `index` column, or `None` when the mode disables it.
pub fn generate_index(
    mode: IndexMode,
    rows: usize,
    rng: &mut dyn rand::RngCore,
) -> Option<Vec<CellValue>> {
    match mode {
        IndexMode::Auto => Some((1..=rows as i64).map(CellValue::Int).collect()),
        IndexMode::Custom { min, max } => Some(custom_indexes(min, max, rows, rng)),
        IndexMode::None => None,
    }
}

/// Walk `[min, max]` in order, skipping rows at random.
///
/// Each row independently becomes a placeholder with
/// [`CUSTOM_GAP_PROBABILITY`]; otherwise it takes the next unused integer.
/// Once `max` has been emitted every remaining row is a placeholder.
pub fn custom_indexes(
    min: i64,
    max: i64,
    rows: usize,
    rng: &mut dyn rand::RngCore,
) -> Vec<CellValue> {
    let mut next = (min <= max).then_some(min);
    let mut values = Vec::with_capacity(rows);
    for _ in 0..rows {
        if rng.random_bool(CUSTOM_GAP_PROBABILITY) {
            values.push(CellValue::Missing);
            continue;
        }
        match next {
            Some(current) => {
                values.push(CellValue::Int(current));
                next = current.checked_add(1).filter(|value| *value <= max);
            }
            None => values.push(CellValue::Missing),
        }
    }
    values
}
