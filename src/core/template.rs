//! Template records: contract lines whose identifiers and dates are derived
//! from the request instead of being stored verbatim.
//!
//! A record is a template when it carries at least one of the
//! [`TEMPLATE_KEYS`]. Each derived field is produced only when its driving
//! key is present and well-formed; template keys never reach the client.

use serde_json::Value;

use super::competency::Competency;
use super::identifier::{CNPJ_ROOT_LEN, InscriptionKind};
use super::record::{FIELD_COMPETENCY, FIELD_EMPLOYER, MockRecord};

pub const KEY_CONTRACT_SUFFIX: &str = "contratoSuffix";
pub const KEY_REGISTRATION_SUFFIX: &str = "matriculaSuffix";
pub const KEY_START_DAY: &str = "dataInicioContratoDay";
pub const KEY_END_DAY: &str = "dataFimContratoDay";
pub const KEY_END_OFFSET: &str = "dataFimContratoOffsetMonths";
pub const KEY_DEDUCTION_END_OFFSET: &str = "competenciaFimDescontoOffsetMonths";

pub const TEMPLATE_KEYS: [&str; 6] = [
    KEY_CONTRACT_SUFFIX,
    KEY_REGISTRATION_SUFFIX,
    KEY_START_DAY,
    KEY_END_DAY,
    KEY_END_OFFSET,
    KEY_DEDUCTION_END_OFFSET,
];

/// Request data a template is materialized against.
#[derive(Debug, Clone, Copy)]
pub struct TemplateContext<'a> {
    pub kind: InscriptionKind,
    /// The cleaned `numeroInscricao` as requested.
    pub number: &'a str,
    pub competency: Competency,
}

pub fn is_template(record: &MockRecord) -> bool {
    TEMPLATE_KEYS.iter().any(|k| record.get(k).is_some())
}

/// Produce the client view of `record` for the given request.
/// Records without template keys are returned unchanged.
pub fn materialize(record: &MockRecord, ctx: &TemplateContext<'_>) -> MockRecord {
    if !is_template(record) {
        return record.clone();
    }

    let mut out = record.clone();
    for key in TEMPLATE_KEYS {
        out.remove(key);
    }

    let comp = ctx.competency;
    let period = format!("{:02}{:04}", comp.month(), comp.year());

    if let Some(suffix) = text(record.get(KEY_CONTRACT_SUFFIX)) {
        out.insert("contrato", format!("CTR{}{period}{suffix}", ctx.number).into());
    }
    if let Some(suffix) = text(record.get(KEY_REGISTRATION_SUFFIX)) {
        out.insert("matricula", format!("MAT{}{suffix}", last_chars(ctx.number, 5)).into());
    }
    if let Some(day) = integer(record.get(KEY_START_DAY)) {
        out.insert("dataInicioContrato", date_in(day, comp).into());
    }
    if let (Some(day), Some(offset)) = (
        integer(record.get(KEY_END_DAY)),
        integer(record.get(KEY_END_OFFSET)),
    ) {
        if let Some(end) = comp.plus_months(offset) {
            out.insert("dataFimContrato", date_in(day, end).into());
        }
    }
    out.insert("competenciaInicioDesconto", comp.to_string().into());
    if let Some(end) = integer(record.get(KEY_DEDUCTION_END_OFFSET)).and_then(|o| comp.plus_months(o)) {
        out.insert("competenciaFimDesconto", end.to_string().into());
    }

    out.insert("inscricaoEmpregador.codigo", ctx.kind.code().into());
    out.insert("inscricaoEmpregador.descricao", ctx.kind.description().into());
    out.insert(FIELD_EMPLOYER, ctx.number.into());
    if ctx.kind == InscriptionKind::Cnpj {
        let root: String = ctx.number.chars().take(CNPJ_ROOT_LEN).collect();
        let branch = format!("{root}0001{}", last_chars(ctx.number, 2));
        out.insert("numeroInscricaoEstabelecimento", branch.into());
    }
    if out.get("nomeEmpregador").is_none() {
        out.insert("nomeEmpregador", format!("Empregador Exemplo {}", ctx.number).into());
    }
    out.insert(FIELD_COMPETENCY, comp.to_string().into());
    out
}

/// `DD/MM/YYYY`. The day is not checked against the month length.
fn date_in(day: i64, comp: Competency) -> String {
    format!("{day:02}/{comp}")
}

fn last_chars(value: &str, n: usize) -> &str {
    let start = value.len().saturating_sub(n);
    &value[start..]
}

fn text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn integer(value: Option<&Value>) -> Option<i64> {
    match value? {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
