use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while loading or persisting the mock dataset.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StoreError {
    /// The backing document could not be read.
    #[error("failed to read mock data from {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The backing document could not be written.
    #[error("failed to write mock data to {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The document is not valid JSON, or could not be serialized.
    #[error("mock data JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Valid JSON, but not an array of flat objects.
    #[error("mock data has the wrong shape: {0}")]
    Shape(String),

    /// An in-memory backing refused the write.
    #[error("mock data backing rejected the write: {0}")]
    Rejected(String),
}

/// One entry of the `erros` array returned to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorItem {
    pub codigo: String,
    pub mensagem: String,
}

/// The error body shared by every failing response: `{"erros":[...]}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    pub erros: Vec<ErrorItem>,
}

/// Every client-facing failure the mock can produce.
///
/// Each variant maps to exactly one domain code and HTTP status.
/// The 412 codes (CT, LF, PR, SJ, SP, SQ, SU) follow the upstream API.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ApiError {
    #[error("missing parameter codigoInscricao")]
    MissingCodigoInscricao,

    #[error("missing parameter numeroInscricao")]
    MissingNumeroInscricao,

    #[error("missing parameter competencia")]
    MissingCompetencia,

    /// `codigoInscricao` is neither `1` nor `2`.
    #[error("unknown codigoInscricao '{0}'")]
    UnknownInscriptionCode(String),

    /// `numeroInscricao` contains something other than digits.
    #[error("numeroInscricao '{0}' is not numeric")]
    NonNumericInscription(String),

    /// `competencia` is not `YYYYMM` or has a month outside 1..=12.
    #[error("invalid competencia '{0}'")]
    InvalidCompetency(String),

    /// `competencia` is later than the current year-month.
    #[error("competencia '{0}' is not closed yet")]
    FutureCompetency(String),

    /// CNPJ that is neither 8 nor 14 digits long.
    #[error("CNPJ '{0}' must have 8 or 14 digits")]
    CnpjLength(String),

    /// 14-digit CNPJ with wrong check digits.
    #[error("CNPJ '{0}' failed check-digit validation")]
    InvalidCnpj(String),

    #[error("CPF '{0}' failed validation")]
    InvalidCpf(String),

    /// The employer root is in the reserved "no proxy granted" range.
    #[error("no authorization granted for employer root '{0}'")]
    NoProxyGranted(String),

    #[error("no records for employer root '{root}' and competencia {competency}")]
    NotFound { root: String, competency: String },

    #[error("api key missing")]
    ApiKeyMissing,

    #[error("api key invalid")]
    ApiKeyInvalid,

    #[error("route not found: {0}")]
    RouteNotFound(String),

    /// Update body is not a JSON array of objects.
    #[error("invalid update body: {0}")]
    InvalidBody(String),

    #[error("unknown update mode '{0}'")]
    UnknownMode(String),

    /// Writing the dataset back to its document failed.
    #[error("failed to persist mock data: {0}")]
    Persist(String),
}

impl ApiError {
    /// Domain error code sent in `codigo`.
    pub fn code(&self) -> &'static str {
        match self {
            Self::MissingCodigoInscricao => "PARAM_001",
            Self::MissingNumeroInscricao => "PARAM_002",
            Self::MissingCompetencia => "PARAM_003",
            Self::UnknownInscriptionCode(_) => "PARAM_004",
            Self::NonNumericInscription(_) => "SU",
            Self::InvalidCompetency(_) | Self::FutureCompetency(_) => "CT",
            Self::CnpjLength(_) => "SP",
            Self::InvalidCnpj(_) => "SJ",
            Self::InvalidCpf(_) => "SQ",
            Self::NoProxyGranted(_) => "PR",
            Self::NotFound { .. } => "LF",
            Self::ApiKeyMissing => "AUTH_001",
            Self::ApiKeyInvalid => "AUTH_002",
            Self::RouteNotFound(_) => "ROUTE_001",
            Self::InvalidBody(_) => "BODY_001",
            Self::UnknownMode(_) => "MODE_001",
            Self::Persist(_) => "PERSIST_001",
        }
    }

    /// Human-readable message sent in `mensagem` (Portuguese, like upstream).
    pub fn message(&self) -> String {
        match self {
            Self::MissingCodigoInscricao => {
                "Parâmetro obrigatório \"codigoInscricao\" não fornecido.".into()
            }
            Self::MissingNumeroInscricao => {
                "Parâmetro obrigatório \"numeroInscricao\" não fornecido.".into()
            }
            Self::MissingCompetencia => {
                "Parâmetro obrigatório \"competencia\" não fornecido.".into()
            }
            Self::UnknownInscriptionCode(code) => format!(
                "Parâmetro \"codigoInscricao\" inválido: '{code}'. Utilize 1 (CNPJ) ou 2 (CPF)."
            ),
            Self::NonNumericInscription(_) => {
                "Parâmetro \"numeroInscricao\" deve conter apenas dígitos.".into()
            }
            Self::InvalidCompetency(_) => {
                "Competência inválida. Utilize o formato AAAAMM (ex: 202501 para Jan/2025).".into()
            }
            Self::FutureCompetency(_) => {
                "Competência informada é posterior à competência atual e ainda não foi fechada."
                    .into()
            }
            Self::CnpjLength(_) => {
                "CNPJ deve conter 8 dígitos (raiz) ou 14 dígitos (completo).".into()
            }
            Self::InvalidCnpj(_) => "CNPJ informado é inválido.".into(),
            Self::InvalidCpf(_) => "CPF informado é inválido.".into(),
            Self::NoProxyGranted(_) => {
                "Não há procuração ou autorização concedida para o empregador informado.".into()
            }
            Self::NotFound { .. } => {
                "Nenhum registro de consignação encontrado para os parâmetros informados.".into()
            }
            Self::ApiKeyMissing => "API Key não fornecida.".into(),
            Self::ApiKeyInvalid => "API Key inválida.".into(),
            Self::RouteNotFound(_) => "Endpoint não encontrado.".into(),
            Self::InvalidBody(_) => {
                "Corpo da requisição deve ser um array JSON de objetos.".into()
            }
            Self::UnknownMode(mode) => format!(
                "Modo de atualização '{mode}' inválido. Utilize 'replace' ou 'append'."
            ),
            Self::Persist(_) => "Erro ao persistir os dados mockados.".into(),
        }
    }

    /// HTTP status code for this error.
    pub fn status(&self) -> u16 {
        match self {
            Self::MissingCodigoInscricao
            | Self::MissingNumeroInscricao
            | Self::MissingCompetencia
            | Self::InvalidBody(_)
            | Self::UnknownMode(_) => 400,
            Self::ApiKeyMissing => 401,
            Self::ApiKeyInvalid => 403,
            Self::RouteNotFound(_) => 404,
            Self::UnknownInscriptionCode(_)
            | Self::NonNumericInscription(_)
            | Self::InvalidCompetency(_)
            | Self::FutureCompetency(_)
            | Self::CnpjLength(_)
            | Self::InvalidCnpj(_)
            | Self::InvalidCpf(_)
            | Self::NoProxyGranted(_)
            | Self::NotFound { .. } => 412,
            Self::Persist(_) => 500,
        }
    }

    /// Wrap this error in the single-entry client envelope.
    pub fn envelope(&self) -> ErrorEnvelope {
        ErrorEnvelope {
            erros: vec![ErrorItem {
                codigo: self.code().into(),
                mensagem: self.message(),
            }],
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        Self::Persist(err.to_string())
    }
}
