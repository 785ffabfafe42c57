//! The employer inquiry: parameter checks, identifier validation,
//! competency rules and dataset lookup, stopping at the first failure.

use chrono::NaiveDate;
use serde::Deserialize;
use tracing::debug;

use super::clock::Clock;
use super::competency::Competency;
use super::error::ApiError;
use super::identifier::{CNPJ_LEN, CNPJ_ROOT_LEN, InscriptionKind, is_valid_cnpj, is_valid_cpf};
use super::record::MockRecord;
use super::store::MockStore;
use super::template::{TemplateContext, materialize};

/// Employer roots starting with this value simulate an employer that
/// granted no proxy or authorization to the caller.
pub const NO_PROXY_SENTINEL_ROOT: &str = "99999999";

/// Raw query parameters of `GET /dados-consignacoes-empregador`.
/// Unknown query keys are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InquiryParams {
    pub codigo_inscricao: Option<String>,
    pub numero_inscricao: Option<String>,
    pub competencia: Option<String>,
}

impl InquiryParams {
    pub fn new(
        codigo_inscricao: impl Into<String>,
        numero_inscricao: impl Into<String>,
        competencia: impl Into<String>,
    ) -> Self {
        Self {
            codigo_inscricao: Some(codigo_inscricao.into()),
            numero_inscricao: Some(numero_inscricao.into()),
            competencia: Some(competencia.into()),
        }
    }
}

/// An inquiry that passed every parameter check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedInquiry {
    pub kind: InscriptionKind,
    /// `numeroInscricao`, digits only.
    pub number: String,
    /// First 8 digits of `number`; the dataset key.
    pub root: String,
    pub competency: Competency,
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

/// Run the parameter checks in order and stop at the first failure.
///
/// `today` decides which competencies are still open.
pub fn validate_inquiry(
    params: &InquiryParams,
    today: NaiveDate,
) -> Result<ValidatedInquiry, ApiError> {
    let code = present(&params.codigo_inscricao).ok_or(ApiError::MissingCodigoInscricao)?;
    let number = present(&params.numero_inscricao).ok_or(ApiError::MissingNumeroInscricao)?;
    let raw_competency = present(&params.competencia).ok_or(ApiError::MissingCompetencia)?;

    if !number.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ApiError::NonNumericInscription(number.into()));
    }

    let competency = Competency::parse(raw_competency)
        .map_err(|_| ApiError::InvalidCompetency(raw_competency.into()))?;
    if competency.is_future(today) {
        return Err(ApiError::FutureCompetency(raw_competency.into()));
    }

    let kind = InscriptionKind::from_code(code)
        .ok_or_else(|| ApiError::UnknownInscriptionCode(code.into()))?;
    match kind {
        InscriptionKind::Cnpj => {
            if number.len() != CNPJ_ROOT_LEN && number.len() != CNPJ_LEN {
                return Err(ApiError::CnpjLength(number.into()));
            }
            if !is_valid_cnpj(number) {
                return Err(ApiError::InvalidCnpj(number.into()));
            }
        }
        InscriptionKind::Cpf => {
            if !is_valid_cpf(number) {
                return Err(ApiError::InvalidCpf(number.into()));
            }
        }
    }

    // Every accepted identifier has at least 8 digits here.
    let root = number[..CNPJ_ROOT_LEN].to_string();
    if root == NO_PROXY_SENTINEL_ROOT {
        return Err(ApiError::NoProxyGranted(root));
    }

    Ok(ValidatedInquiry {
        kind,
        number: number.into(),
        root,
        competency,
    })
}

/// Validate, look up and shape the response of one inquiry.
///
/// An empty lookup is an error (`LF`), never an empty success.
pub fn run_inquiry(
    store: &MockStore,
    params: &InquiryParams,
    clock: &dyn Clock,
) -> Result<Vec<MockRecord>, ApiError> {
    let inquiry = validate_inquiry(params, clock.today())?;
    let found = store.query(&inquiry.root, &inquiry.competency);
    if found.is_empty() {
        return Err(ApiError::NotFound {
            root: inquiry.root,
            competency: inquiry.competency.to_string(),
        });
    }
    debug!(root = %inquiry.root, found = found.len(), "inquiry matched");

    let ctx = TemplateContext {
        kind: inquiry.kind,
        number: &inquiry.number,
        competency: inquiry.competency,
    };
    Ok(found.iter().map(|r| materialize(r, &ctx)).collect())
}
