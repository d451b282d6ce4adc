//! Pessoa lookups and per-pessoa media listings.

use axum::http::StatusCode;
use integration_tests::fixtures::*;
use serde_json::Value;

#[tokio::test]
async fn medias_without_pessoa_id_is_a_400() {
    // No expectations: the missing parameter never reaches the repo.
    let (status, body) = get_json(app(Mocks::default()), "/medias").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("pessoaId"));
}

#[tokio::test]
async fn medias_list_newest_first_passes_through() {
    let mut mocks = Mocks::default();
    mocks
        .media
        .expect_list_by_pessoa()
        .withf(|pessoa_id| *pessoa_id == 5)
        .returning(|pessoa_id| {
            Ok(vec![
                media(30, pessoa_id, 1),
                media(20, pessoa_id, 60),
                media(10, pessoa_id, 600),
            ])
        });

    let (status, body) = get_json(app(mocks), "/medias?pessoaId=5").await;

    assert_eq!(status, StatusCode::OK);
    let ids: Vec<i64> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, [30, 20, 10]);
}

#[tokio::test]
async fn empty_media_list_is_a_success_not_a_404() {
    let mut mocks = Mocks::default();
    mocks
        .media
        .expect_list_by_pessoa()
        .returning(|_| Ok(vec![]));

    let (status, body) = get_json(app(mocks), "/medias?pessoaId=5").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"], Value::Array(vec![]));
}

#[tokio::test]
async fn pessoa_detail_nests_user_and_city() {
    let mut mocks = Mocks::default();
    mocks.pessoas.expect_get().returning(|id| {
        Ok(Some(pessoa(id, "João Batista Ferreira", "Diamantina", "MG")))
    });

    let (status, body) = get_json(app(mocks), "/pessoas/8").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["id"], 8);
    assert_eq!(body["data"]["user"]["fullName"], "João Batista Ferreira");
    assert_eq!(body["data"]["city"]["name"], "Diamantina");
    assert_eq!(body["data"]["city"]["sigla"], "MG");
}

#[tokio::test]
async fn missing_pessoa_is_a_404() {
    let mut mocks = Mocks::default();
    mocks.pessoas.expect_get().returning(|_| Ok(None));

    let (status, body) = get_json(app(mocks), "/pessoas/8").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], Value::Bool(false));
}

#[tokio::test]
async fn non_numeric_pessoa_id_is_a_400() {
    let (status, _) = get_json(app(Mocks::default()), "/pessoas/joao").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
