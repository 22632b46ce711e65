use chrono::{Duration, NaiveTime, Timelike};
use rand::Rng;

use csvforge_core::{CellValue, DataType, RangeSpec};

use crate::errors::GenerationError;
use crate::generators::{Generator, GeneratorContext, GeneratorRegistry, pick, spec_mismatch};

pub fn register(registry: &mut GeneratorRegistry) {
    registry.register_generator(Box::new(DateRangeGenerator));
    registry.register_generator(Box::new(TimeRangeGenerator));
    registry.register_generator(Box::new(FloatRangeGenerator));
    registry.register_generator(Box::new(IntRangeGenerator {
        data_type: DataType::IntegerRange,
    }));
    registry.register_generator(Box::new(IntRangeGenerator {
        data_type: DataType::RangeNegative,
    }));
    registry.register_generator(Box::new(ChoiceGenerator));
    registry.register_generator(Box::new(BoolGenerator));
    registry.register_generator(Box::new(UnitRandomGenerator));
}

/// Uniform instant in `[start, end)` at millisecond resolution, kept as a date.
struct DateRangeGenerator;

impl Generator for DateRangeGenerator {
    fn data_type(&self) -> DataType {
        DataType::Date
    }

    fn generate_value(
        &self,
        _ctx: &GeneratorContext<'_>,
        spec: &RangeSpec,
        rng: &mut dyn rand::RngCore,
    ) -> Result<CellValue, GenerationError> {
        let RangeSpec::Date { start, end } = spec else {
            return Err(spec_mismatch(self, spec));
        };
        let start = start.and_time(NaiveTime::MIN);
        let end = end.and_time(NaiveTime::MIN);
        let span_ms = (end - start).num_milliseconds();
        if span_ms <= 0 {
            return Err(spec_mismatch(self, spec));
        }
        let offset = rng.random_range(0..span_ms);
        let instant = start + Duration::milliseconds(offset);
        Ok(CellValue::Date(instant.date()))
    }
}

/// Uniform whole second in `[start, end]`.
struct TimeRangeGenerator;

impl Generator for TimeRangeGenerator {
    fn data_type(&self) -> DataType {
        DataType::Time
    }

    fn generate_value(
        &self,
        _ctx: &GeneratorContext<'_>,
        spec: &RangeSpec,
        rng: &mut dyn rand::RngCore,
    ) -> Result<CellValue, GenerationError> {
        let RangeSpec::Time { start, end } = spec else {
            return Err(spec_mismatch(self, spec));
        };
        let min_seconds = start.num_seconds_from_midnight();
        let max_seconds = end.num_seconds_from_midnight();
        if min_seconds > max_seconds {
            return Err(spec_mismatch(self, spec));
        }
        let seconds = rng.random_range(min_seconds..=max_seconds);
        let time = NaiveTime::from_num_seconds_from_midnight_opt(seconds, 0)
            .ok_or_else(|| spec_mismatch(self, spec))?;
        Ok(CellValue::Time(time))
    }
}

/// Uniform real in `[low, high)`.
struct FloatRangeGenerator;

impl Generator for FloatRangeGenerator {
    fn data_type(&self) -> DataType {
        DataType::FloatRange
    }

    fn generate_value(
        &self,
        _ctx: &GeneratorContext<'_>,
        spec: &RangeSpec,
        rng: &mut dyn rand::RngCore,
    ) -> Result<CellValue, GenerationError> {
        let RangeSpec::Float { low, high } = *spec else {
            return Err(spec_mismatch(self, spec));
        };
        if low >= high || !(high - low).is_finite() {
            return Err(spec_mismatch(self, spec));
        }
        let value = low + rng.random::<f64>() * (high - low);
        // Rounding can land exactly on `high` for tiny spans.
        let value = if value < high { value } else { low };
        Ok(CellValue::Float(value))
    }
}

/// Uniform integer in `[low, high]`; serves both `integer_range` and
/// `range_negative`.
struct IntRangeGenerator {
    data_type: DataType,
}

impl Generator for IntRangeGenerator {
    fn data_type(&self) -> DataType {
        self.data_type
    }

    fn generate_value(
        &self,
        _ctx: &GeneratorContext<'_>,
        spec: &RangeSpec,
        rng: &mut dyn rand::RngCore,
    ) -> Result<CellValue, GenerationError> {
        let RangeSpec::Integer { low, high } = *spec else {
            return Err(spec_mismatch(self, spec));
        };
        if low > high {
            return Err(spec_mismatch(self, spec));
        }
        Ok(CellValue::Int(rng.random_range(low..=high)))
    }
}

struct ChoiceGenerator;

impl Generator for ChoiceGenerator {
    fn data_type(&self) -> DataType {
        DataType::Choice
    }

    fn generate_value(
        &self,
        _ctx: &GeneratorContext<'_>,
        spec: &RangeSpec,
        rng: &mut dyn rand::RngCore,
    ) -> Result<CellValue, GenerationError> {
        let RangeSpec::Choice { values } = spec else {
            return Err(spec_mismatch(self, spec));
        };
        let value = pick(values, rng).ok_or_else(|| spec_mismatch(self, spec))?;
        Ok(CellValue::Text(value.clone()))
    }
}

struct BoolGenerator;

impl Generator for BoolGenerator {
    fn data_type(&self) -> DataType {
        DataType::Boolean
    }

    fn generate_value(
        &self,
        _ctx: &GeneratorContext<'_>,
        _spec: &RangeSpec,
        rng: &mut dyn rand::RngCore,
    ) -> Result<CellValue, GenerationError> {
        Ok(CellValue::Bool(rng.random_bool(0.5)))
    }
}

/// Uniform real in `[0, 1)`.
struct UnitRandomGenerator;

impl Generator for UnitRandomGenerator {
    fn data_type(&self) -> DataType {
        DataType::Random
    }

    fn generate_value(
        &self,
        _ctx: &GeneratorContext<'_>,
        _spec: &RangeSpec,
        rng: &mut dyn rand::RngCore,
    ) -> Result<CellValue, GenerationError> {
        Ok(CellValue::Float(rng.random::<f64>()))
    }
}
