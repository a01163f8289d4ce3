//! Verification code generators

use rand::rngs::{OsRng, StdRng};
use rand::{Rng, SeedableRng};
use std::sync::{Mutex, PoisonError};

use crate::domain::entities::verification_code::CODE_LENGTH;

/// Produces fixed-length numeric codes
pub trait CodeGenerator: Send + Sync {
    fn generate(&self) -> String;
}

fn code_space() -> u32 {
    10u32.pow(CODE_LENGTH as u32)
}

fn format_code(value: u32) -> String {
    format!("{:0width$}", value, width = CODE_LENGTH)
}

/// Uniform codes drawn from the operating system CSPRNG
#[derive(Debug, Default, Clone, Copy)]
pub struct SecureCodeGenerator;

impl CodeGenerator for SecureCodeGenerator {
    fn generate(&self) -> String {
        format_code(OsRng.gen_range(0..code_space()))
    }
}

/// Deterministic generator for reproducible tests
#[derive(Debug)]
pub struct SeededCodeGenerator {
    rng: Mutex<StdRng>,
}

impl SeededCodeGenerator {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl CodeGenerator for SeededCodeGenerator {
    fn generate(&self) -> String {
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        format_code(rng.gen_range(0..code_space()))
    }
}
