//! End-to-end tests against a server bound to an ephemeral port.

#![cfg(feature = "server")]

use chrono::NaiveDate;
use consignacoes_mock::core::*;
use consignacoes_mock::server::{AppState, UpdateSummary, build_router};
use serde_json::{Value, json};
use tempfile::tempdir;

const KEY: &str = "test-key";

fn seed() -> Vec<MockRecord> {
    vec![
        MockRecord::from_value(json!({
            "numeroInscricaoEmpregador": "14772711",
            "competencia": "01/2025",
            "cpf": "12345678909",
            "valorParcela": 412.35
        }))
        .unwrap(),
        MockRecord::from_value(json!({
            "numeroInscricaoEmpregador": "12345678",
            "competencia": "11/2024",
            "contratoSuffix": "01",
            "dataFimContratoDay": "5",
            "dataFimContratoOffsetMonths": 3
        }))
        .unwrap(),
    ]
}

async fn spawn(store: MockStore) -> String {
    let clock = FixedClock(NaiveDate::from_ymd_opt(2025, 6, 15).unwrap());
    let app = build_router(AppState::new(store, clock, KEY));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind listener");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move { axum::serve(listener, app).await.expect("serve app") });
    format!("http://{addr}")
}

async fn inquiry(base: &str, query: &str) -> (u16, Value) {
    let resp = reqwest::Client::new()
        .get(format!("{base}/dados-consignacoes-empregador?{query}"))
        .header("apikey", KEY)
        .send()
        .await
        .expect("send inquiry");
    let status = resp.status().as_u16();
    (status, resp.json().await.expect("json body"))
}

async fn update(base: &str, mode: Option<&str>, body: &str) -> (u16, Value) {
    let url = match mode {
        Some(m) => format!("{base}/update-mock?mode={m}"),
        None => format!("{base}/update-mock"),
    };
    let resp = reqwest::Client::new()
        .post(url)
        .header("apikey", KEY)
        .header("content-type", "application/json")
        .body(body.to_string())
        .send()
        .await
        .expect("send update");
    let status = resp.status().as_u16();
    (status, resp.json().await.expect("json body"))
}

fn error_code(body: &Value) -> &str {
    body["erros"][0]["codigo"].as_str().unwrap_or_default()
}

#[tokio::test]
async fn health_is_up_without_key() {
    let base = spawn(MockStore::in_memory(seed())).await;
    let resp = reqwest::get(format!("{base}/health")).await.unwrap();
    assert_eq!(resp.status().as_u16(), 200);
    assert_eq!(resp.json::<Value>().await.unwrap(), json!({"status": "UP"}));
}

#[tokio::test]
async fn inquiry_returns_matching_records() {
    let base = spawn(MockStore::in_memory(seed())).await;
    let (status, body) = inquiry(
        &base,
        "codigoInscricao=1&numeroInscricao=14772711000199&competencia=202501",
    )
    .await;
    assert_eq!(status, 200);
    let rows = body.as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["valorParcela"], json!(412.35));
}

#[tokio::test]
async fn inquiry_materializes_templates() {
    let base = spawn(MockStore::in_memory(seed())).await;
    let (status, body) = inquiry(
        &base,
        "codigoInscricao=1&numeroInscricao=12345678&competencia=202411",
    )
    .await;
    assert_eq!(status, 200);
    assert_eq!(body[0]["dataFimContrato"], json!("05/02/2025"));
    assert_eq!(body[0]["contrato"], json!("CTR1234567811202401"));
    assert!(body[0].get("contratoSuffix").is_none());
}

#[tokio::test]
async fn inquiry_error_stages() {
    let base = spawn(MockStore::in_memory(seed())).await;
    let cases = [
        ("numeroInscricao=14772711&competencia=202501", 400, "PARAM_001"),
        ("codigoInscricao=1&competencia=202501", 400, "PARAM_002"),
        ("codigoInscricao=1&numeroInscricao=14772711", 400, "PARAM_003"),
        ("codigoInscricao=1&numeroInscricao=14.772.711&competencia=202501", 412, "SU"),
        ("codigoInscricao=1&numeroInscricao=14772711000199&competencia=202513", 412, "CT"),
        ("codigoInscricao=1&numeroInscricao=14772711000199&competencia=202507", 412, "CT"),
        ("codigoInscricao=1&numeroInscricao=1477271100&competencia=202501", 412, "SP"),
        ("codigoInscricao=1&numeroInscricao=14772711000198&competencia=202501", 412, "SJ"),
        ("codigoInscricao=2&numeroInscricao=12345678900&competencia=202501", 412, "SQ"),
        ("codigoInscricao=5&numeroInscricao=14772711&competencia=202501", 412, "PARAM_004"),
        ("codigoInscricao=1&numeroInscricao=99999999000191&competencia=202501", 412, "PR"),
        ("codigoInscricao=1&numeroInscricao=14772711000199&competencia=202412", 412, "LF"),
    ];
    for (query, status, code) in cases {
        let (got_status, body) = inquiry(&base, query).await;
        assert_eq!(got_status, status, "{query}");
        assert_eq!(error_code(&body), code, "{query}");
        assert_eq!(body["erros"].as_array().unwrap().len(), 1, "{query}");
    }
}

#[tokio::test]
async fn api_key_is_required() {
    let base = spawn(MockStore::in_memory(seed())).await;
    let url = format!(
        "{base}/dados-consignacoes-empregador?codigoInscricao=1&numeroInscricao=14772711&competencia=202501"
    );

    let resp = reqwest::get(&url).await.unwrap();
    assert_eq!(resp.status().as_u16(), 401);
    assert_eq!(error_code(&resp.json().await.unwrap()), "AUTH_001");

    let resp = reqwest::Client::new()
        .get(&url)
        .header("apikey", "wrong")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 403);
    assert_eq!(error_code(&resp.json().await.unwrap()), "AUTH_002");
}

#[tokio::test]
async fn unknown_route_is_404_envelope() {
    let base = spawn(MockStore::in_memory(seed())).await;
    let resp = reqwest::get(format!("{base}/nope")).await.unwrap();
    assert_eq!(resp.status().as_u16(), 404);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(
        body,
        json!({"erros": [{"codigo": "ROUTE_001", "mensagem": "Endpoint não encontrado."}]})
    );
}

#[tokio::test]
async fn append_increases_count_by_n() {
    let base = spawn(MockStore::in_memory(seed())).await;
    let (status, body) = update(
        &base,
        Some("append"),
        r#"[{"numeroInscricaoEmpregador":"11222333","competencia":"03/2025"},{"numeroInscricaoEmpregador":"11222333","competencia":"03/2025"},{}]"#,
    )
    .await;
    assert_eq!(status, 200);
    let summary: UpdateSummary = serde_json::from_value(body).unwrap();
    assert_eq!(summary.total, 5);
    assert_eq!(summary.modo, UpdateMode::Append);

    let (status, body) = inquiry(
        &base,
        "codigoInscricao=1&numeroInscricao=11222333000181&competencia=202503",
    )
    .await;
    assert_eq!(status, 200);
    assert_eq!(body.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn replace_sets_count_to_n() {
    let base = spawn(MockStore::in_memory(seed())).await;
    let (status, body) = update(&base, Some("replace"), r#"[{"a":1}]"#).await;
    assert_eq!(status, 200);
    assert_eq!(body["total"], json!(1));

    // The old records are gone.
    let (status, body) = inquiry(
        &base,
        "codigoInscricao=1&numeroInscricao=14772711000199&competencia=202501",
    )
    .await;
    assert_eq!(status, 412);
    assert_eq!(error_code(&body), "LF");
}

#[tokio::test]
async fn omitted_mode_replaces() {
    let base = spawn(MockStore::in_memory(seed())).await;
    let (status, body) = update(&base, None, "[{},{},{}]").await;
    assert_eq!(status, 200);
    assert_eq!(body["total"], json!(3));
    assert_eq!(body["modo"], json!("replace"));
}

#[tokio::test]
async fn non_array_body_is_400_and_dataset_unchanged() {
    let base = spawn(MockStore::in_memory(seed())).await;
    for body in [r#"{"a":1}"#, "42", "not json", r#"[{"a":1}, 7]"#] {
        let (status, resp) = update(&base, Some("append"), body).await;
        assert_eq!(status, 400, "{body}");
        assert_eq!(error_code(&resp), "BODY_001", "{body}");
    }
    let (status, _) = inquiry(
        &base,
        "codigoInscricao=1&numeroInscricao=14772711000199&competencia=202501",
    )
    .await;
    assert_eq!(status, 200);
    let (_, body) = update(&base, Some("append"), "[]").await;
    assert_eq!(body["total"], json!(2));
}

#[tokio::test]
async fn unknown_mode_is_400() {
    let base = spawn(MockStore::in_memory(seed())).await;
    let (status, body) = update(&base, Some("merge"), "[]").await;
    assert_eq!(status, 400);
    assert_eq!(error_code(&body), "MODE_001");
}

#[tokio::test]
async fn persistence_failure_is_500() {
    let store = MockStore::open(InMemory::read_only(seed())).unwrap();
    let base = spawn(store).await;
    let (status, body) = update(&base, Some("append"), "[{}]").await;
    assert_eq!(status, 500);
    assert_eq!(error_code(&body), "PERSIST_001");

    // Memory was not touched either.
    let (_, body) = inquiry(
        &base,
        "codigoInscricao=1&numeroInscricao=14772711&competencia=202501",
    )
    .await;
    assert_eq!(body.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn update_persists_to_json_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("mock.json");
    std::fs::write(&path, "[]").unwrap();
    let base = spawn(MockStore::open(JsonFile::new(&path)).unwrap()).await;

    let (status, _) = update(
        &base,
        Some("append"),
        r#"[{"numeroInscricaoEmpregador":"14772711","competencia":"01/2025"}]"#,
    )
    .await;
    assert_eq!(status, 200);

    let reopened = MockStore::open(JsonFile::new(&path)).unwrap();
    assert_eq!(reopened.len(), 1);
}

#[tokio::test]
async fn wrong_method_on_known_path_is_404_envelope() {
    let base = spawn(MockStore::in_memory(seed())).await;
    let client = reqwest::Client::new();
    let cases = [
        client.get(format!("{base}/update-mock")).header("apikey", KEY),
        client.post(format!("{base}/health")),
        client
            .post(format!("{base}/dados-consignacoes-empregador"))
            .header("apikey", KEY),
    ];
    for request in cases {
        let resp = request.send().await.unwrap();
        let target = resp.url().path().to_string();
        assert_eq!(resp.status().as_u16(), 404, "{target}");
        let body: Value = resp.json().await.unwrap();
        assert_eq!(error_code(&body), "ROUTE_001", "{target}");
        assert_eq!(body["erros"].as_array().unwrap().len(), 1, "{target}");
    }
}

#[tokio::test]
async fn concurrent_appends_all_reach_the_document() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("mock.json");
    std::fs::write(&path, "[]").unwrap();
    let base = spawn(MockStore::open(JsonFile::new(&path)).unwrap()).await;

    let tasks: Vec<_> = (0..5)
        .map(|_| {
            let base = base.clone();
            tokio::spawn(async move { update(&base, Some("append"), "[{}]").await })
        })
        .collect();
    let mut totals = Vec::new();
    for task in tasks {
        let (status, body) = task.await.unwrap();
        assert_eq!(status, 200);
        totals.push(body["total"].as_u64().unwrap());
    }
    totals.sort_unstable();
    assert_eq!(totals, vec![1, 2, 3, 4, 5]);

    assert_eq!(MockStore::open(JsonFile::new(&path)).unwrap().len(), 5);
}
