//! CPF and CNPJ check-digit validation.
//!
//! Both validators are total: any input, including non-numeric or
//! wrongly sized strings, simply yields `false`. Punctuation is ignored,
//! so `"123.456.789-09"` and `"12345678909"` are the same CPF.

/// Number of digits in a CPF.
pub const CPF_LEN: usize = 11;

/// Number of digits in a full CNPJ.
pub const CNPJ_LEN: usize = 14;

/// Number of digits in a CNPJ root (the company, without branch suffix).
pub const CNPJ_ROOT_LEN: usize = 8;

/// Kind of inscription named by the `codigoInscricao` parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InscriptionKind {
    /// Code `1`: company, identified by CNPJ (full or root).
    Cnpj,
    /// Code `2`: individual, identified by CPF.
    Cpf,
}

impl InscriptionKind {
    /// Resolve the `codigoInscricao` parameter. Only `"1"` and `"2"` are known.
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "1" => Some(Self::Cnpj),
            "2" => Some(Self::Cpf),
            _ => None,
        }
    }

    /// Numeric code as sent on the wire.
    pub fn code(self) -> u8 {
        match self {
            Self::Cnpj => 1,
            Self::Cpf => 2,
        }
    }

    /// Description used in the `inscricaoEmpregador.descricao` field.
    /// Individual employers are registered under a CAEPF.
    pub fn description(self) -> &'static str {
        match self {
            Self::Cnpj => "CNPJ",
            Self::Cpf => "CAEPF",
        }
    }
}

/// Strip every non-digit character.
pub fn clean_digits(value: &str) -> String {
    value.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// True when `value` has at least two characters and all of them are equal.
pub fn all_digits_equal(value: &str) -> bool {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => value.len() > 1 && chars.all(|c| c == first),
        None => false,
    }
}

fn to_digits(cleaned: &str) -> Vec<u32> {
    cleaned.chars().filter_map(|c| c.to_digit(10)).collect()
}

/// CPF check digit over `digits` (9 or 10 of them).
/// Weights run from `len + 1` down to 2.
fn cpf_digit(digits: &[u32]) -> u32 {
    let top = digits.len() as u32 + 1;
    let sum: u32 = digits
        .iter()
        .enumerate()
        .map(|(i, d)| d * (top - i as u32))
        .sum();
    let remainder = (sum * 10) % 11;
    if remainder >= 10 { 0 } else { remainder }
}

/// CNPJ check digit over `digits` (12 or 13 of them).
/// Weights start at `len - 7` and cycle 9..=2.
fn cnpj_digit(digits: &[u32]) -> u32 {
    let mut weight = digits.len() as u32 - 7;
    let mut sum = 0;
    for d in digits {
        sum += d * weight;
        weight = if weight == 2 { 9 } else { weight - 1 };
    }
    let remainder = sum % 11;
    if remainder < 2 { 0 } else { 11 - remainder }
}

/// Compute both CPF check digits for a 9-digit base.
///
/// Returns `None` unless the cleaned base has exactly 9 digits.
pub fn cpf_check_digits(base: &str) -> Option<(u32, u32)> {
    let mut digits = to_digits(&clean_digits(base));
    if digits.len() != CPF_LEN - 2 {
        return None;
    }
    let first = cpf_digit(&digits);
    digits.push(first);
    Some((first, cpf_digit(&digits)))
}

/// Compute both CNPJ check digits for a 12-digit base.
///
/// Returns `None` unless the cleaned base has exactly 12 digits.
pub fn cnpj_check_digits(base: &str) -> Option<(u32, u32)> {
    let mut digits = to_digits(&clean_digits(base));
    if digits.len() != CNPJ_LEN - 2 {
        return None;
    }
    let first = cnpj_digit(&digits);
    digits.push(first);
    Some((first, cnpj_digit(&digits)))
}

/// Validate a CPF (11 digits, two modulo-11 check digits).
///
/// Repeated-digit CPFs such as `"111.111.111-11"` satisfy the checksum
/// arithmetic but are rejected explicitly.
pub fn is_valid_cpf(input: &str) -> bool {
    let cleaned = clean_digits(input);
    if cleaned.len() != CPF_LEN || all_digits_equal(&cleaned) {
        return false;
    }
    let digits = to_digits(&cleaned);
    cpf_digit(&digits[..9]) == digits[9] && cpf_digit(&digits[..10]) == digits[10]
}

/// Validate a CNPJ.
///
/// An 8-digit root is accepted without any checksum, including repeated
/// digits. A 14-digit CNPJ must not be all-equal and must carry both
/// modulo-11 check digits. Any other length is invalid.
pub fn is_valid_cnpj(input: &str) -> bool {
    let cleaned = clean_digits(input);
    match cleaned.len() {
        CNPJ_ROOT_LEN => true,
        CNPJ_LEN => {
            if all_digits_equal(&cleaned) {
                return false;
            }
            let digits = to_digits(&cleaned);
            cnpj_digit(&digits[..12]) == digits[12] && cnpj_digit(&digits[..13]) == digits[13]
        }
        _ => false,
    }
}
