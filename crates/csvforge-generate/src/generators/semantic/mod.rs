use rand::Rng;

use csvforge_core::{CellValue, DataType, RangeSpec};

use crate::assets::{Gender, Lexicon};
use crate::errors::GenerationError;
use crate::generators::{Generator, GeneratorContext, GeneratorRegistry, pick};

const PHONE_PREFIX: &str = "+7";
const PHONE_SPACE: u64 = 10_000_000_000;
const EMAIL_LOCAL_LEN: usize = 8;
const EMAIL_CHARSET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";
const EMAIL_DOMAINS: &[&str] = &["gmail.com", "yahoo.com", "hotmail.com", "outlook.com"];

pub fn register(registry: &mut GeneratorRegistry) {
    registry.register_generator(Box::new(NameGenerator));
    registry.register_generator(Box::new(PhoneGenerator));
    registry.register_generator(Box::new(EmailGenerator));
}

/// Gender coin flip, then a first and last name of that gender.
struct NameGenerator;

impl NameGenerator {
    fn full_name(
        ctx: &GeneratorContext<'_>,
        lexicon: &Lexicon,
        rng: &mut dyn rand::RngCore,
    ) -> Result<CellValue, GenerationError> {
        let gender = if rng.random_bool(0.5) {
            Gender::Male
        } else {
            Gender::Female
        };
        let (first_names, last_names) = lexicon.names_for(gender);
        let first = pick(first_names, rng);
        let last = pick(last_names, rng);
        match (first, last) {
            (Some(first), Some(last)) => Ok(CellValue::Text(format!("{first} {last}"))),
            _ => Err(GenerationError::context_unavailable(
                ctx.column,
                format!("name lexicon has no {} names", gender.as_str()),
            )),
        }
    }
}

impl Generator for NameGenerator {
    fn data_type(&self) -> DataType {
        DataType::Name
    }

    fn generate_value(
        &self,
        ctx: &GeneratorContext<'_>,
        _spec: &RangeSpec,
        rng: &mut dyn rand::RngCore,
    ) -> Result<CellValue, GenerationError> {
        let lexicon = ctx
            .lexicon
            .get()
            .map_err(|reason| GenerationError::context_unavailable(ctx.column, reason))?;
        Self::full_name(ctx, &lexicon, rng)
    }

    fn generate(
        &self,
        ctx: &GeneratorContext<'_>,
        _spec: &RangeSpec,
        rows: usize,
        rng: &mut dyn rand::RngCore,
    ) -> Result<Vec<CellValue>, GenerationError> {
        let lexicon = ctx
            .lexicon
            .get()
            .map_err(|reason| GenerationError::context_unavailable(ctx.column, reason))?;
        (0..rows)
            .map(|_| Self::full_name(ctx, &lexicon, rng))
            .collect()
    }
}

/// `+7` followed by ten zero-padded digits.
struct PhoneGenerator;

impl Generator for PhoneGenerator {
    fn data_type(&self) -> DataType {
        DataType::Phone
    }

    fn generate_value(
        &self,
        _ctx: &GeneratorContext<'_>,
        _spec: &RangeSpec,
        rng: &mut dyn rand::RngCore,
    ) -> Result<CellValue, GenerationError> {
        let number = rng.random_range(0..PHONE_SPACE);
        Ok(CellValue::Text(format!("{PHONE_PREFIX}{number:010}")))
    }
}

struct EmailGenerator;

impl Generator for EmailGenerator {
    fn data_type(&self) -> DataType {
        DataType::Email
    }

    fn generate_value(
        &self,
        _ctx: &GeneratorContext<'_>,
        _spec: &RangeSpec,
        rng: &mut dyn rand::RngCore,
    ) -> Result<CellValue, GenerationError> {
        let local: String = (0..EMAIL_LOCAL_LEN)
            .map(|_| char::from(EMAIL_CHARSET[rng.random_range(0..EMAIL_CHARSET.len())]))
            .collect();
        let domain = pick(EMAIL_DOMAINS, rng).copied().unwrap_or("gmail.com");
        Ok(CellValue::Text(format!("{local}@{domain}")))
    }
}
