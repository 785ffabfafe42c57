use chrono::NaiveDate;
use consignacoes_mock::core::*;
use serde_json::json;

fn main() {
    let template = MockRecord::from_value(json!({
        "numeroInscricaoEmpregador": "14772711",
        "competencia": "11/2024",
        "valorParcela": 198.4,
        "contratoSuffix": "01",
        "matriculaSuffix": "7",
        "dataInicioContratoDay": "5",
        "dataFimContratoDay": "5",
        "dataFimContratoOffsetMonths": 24,
        "competenciaFimDescontoOffsetMonths": 24
    }))
    .expect("object literal");
    let store = MockStore::in_memory(vec![template]);
    let clock = FixedClock(NaiveDate::from_ymd_opt(2025, 6, 15).expect("valid date"));

    let requests = [
        InquiryParams::new("1", "14772711000199", "202411"),
        InquiryParams::new("1", "14772711000199", "202412"),
        InquiryParams::new("1", "14772711000198", "202411"),
        InquiryParams::new("1", "99999999000191", "202411"),
        InquiryParams::new("2", "12345678909", "202507"),
    ];

    for params in &requests {
        println!(
            "--- codigoInscricao={} numeroInscricao={} competencia={}",
            params.codigo_inscricao.as_deref().unwrap_or_default(),
            params.numero_inscricao.as_deref().unwrap_or_default(),
            params.competencia.as_deref().unwrap_or_default(),
        );
        match run_inquiry(&store, params, &clock) {
            Ok(records) => println!(
                "200 {}",
                serde_json::to_string_pretty(&records).unwrap_or_default()
            ),
            Err(e) => println!(
                "{} {}",
                e.status(),
                serde_json::to_string(&e.envelope()).unwrap_or_default()
            ),
        }
    }
}
