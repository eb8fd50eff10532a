//! Account registration

mod common;

use common::{create_test_server, location, login, FLASH_COOKIE, SESSION_COOKIE};

#[tokio::test]
async fn test_register_page_renders() {
    let server = create_test_server();

    let response = server.get("/cadastro").await;

    assert_eq!(response.status_code(), 200);
    assert!(response.text().contains("<h1>Cadastro</h1>"));
}

#[tokio::test]
async fn test_register_then_login() {
    let server = create_test_server();

    let response = server
        .post("/cadastro")
        .form(&[("username", "professora"), ("password", "giz2024")])
        .await;

    assert_eq!(response.status_code(), 303);
    assert_eq!(location(&response), "/login");
    assert_eq!(
        response.maybe_cookie(FLASH_COOKIE).map(|c| c.value().to_string()),
        Some("registered".to_string())
    );

    let cookie = login(&server, "professora", "giz2024").await;
    assert!(!cookie.is_empty());
}

#[tokio::test]
async fn test_register_success_flash_on_login_page() {
    let server = create_test_server();

    let response = server
        .get("/login")
        .add_cookie(cookie::Cookie::new(FLASH_COOKIE, "registered"))
        .await;

    assert!(response
        .text()
        .contains("Cadastro realizado com sucesso! Faça login."));
}

#[tokio::test]
async fn test_duplicate_username_keeps_original_password() {
    let server = create_test_server();

    let response = server
        .post("/cadastro")
        .form(&[("username", "admin"), ("password", "hijack")])
        .await;

    assert_eq!(response.status_code(), 200);
    assert!(response.text().contains("Usuário já existe."));

    // Original password still works, the new one does not
    login(&server, "admin", "senha123").await;
    let response = server
        .post("/login")
        .form(&[("username", "admin"), ("password", "hijack")])
        .await;
    assert_eq!(response.status_code(), 200);
    assert!(response.maybe_cookie(SESSION_COOKIE).is_none());
}

#[tokio::test]
async fn test_blank_fields_are_rejected() {
    let server = create_test_server();

    for (username, password) in [("", "pw"), ("ana", ""), ("   ", "   ")] {
        let response = server
            .post("/cadastro")
            .form(&[("username", username), ("password", password)])
            .await;

        assert_eq!(response.status_code(), 200);
        assert!(response.text().contains("Preencha todos os campos."));
    }
}

#[tokio::test]
async fn test_missing_fields_are_rejected() {
    let server = create_test_server();

    let response = server.post("/cadastro").form(&[("username", "ana")]).await;

    assert_eq!(response.status_code(), 200);
    assert!(response.text().contains("Preencha todos os campos."));
}
