//! # consignacoes-mock
//!
//! Mock of the employer inquiry endpoint of the payroll-deduction
//! ("consignações") API. It validates the request the way the real service
//! does (CPF/CNPJ check digits, `YYYYMM` competency codes) and serves canned
//! contract lines from a small JSON dataset.
//!
//! ## Quick Start
//!
//! ```rust
//! use chrono::NaiveDate;
//! use consignacoes_mock::core::*;
//! use serde_json::json;
//!
//! assert!(is_valid_cnpj("14.772.711/0001-99"));
//! assert!(is_valid_cpf("123.456.789-09"));
//!
//! let record = MockRecord::from_value(json!({
//!     "numeroInscricaoEmpregador": "14772711",
//!     "competencia": "01/2025",
//!     "valorParcela": 350.0
//! }))
//! .unwrap();
//! let store = MockStore::in_memory(vec![record]);
//! let clock = FixedClock(NaiveDate::from_ymd_opt(2025, 6, 1).unwrap());
//!
//! let params = InquiryParams::new("1", "14772711000199", "202501");
//! let found = run_inquiry(&store, &params, &clock).unwrap();
//! assert_eq!(found.len(), 1);
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `core` (default) | Identifier validation, competencies, record store, inquiry pipeline |
//! | `server` (default) | axum HTTP surface and the `consignacoes-mock` binary |
//! | `all` | Everything |

#[cfg(feature = "core")]
pub mod core;

#[cfg(feature = "server")]
pub mod server;

// Re-export core types at crate root for convenience
#[cfg(feature = "core")]
pub use crate::core::*;
