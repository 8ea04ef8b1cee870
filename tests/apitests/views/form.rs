use contacts::{
    ContactFormView,
    ContactListView,
    Field,
    FormMode,
    Route,
};

use crate::backend::Backend;

fn fill(form: &mut ContactFormView, name: &str, email: &str, phone: &str) {
    form.set(Field::Name, name);
    form.set(Field::Email, email);
    form.set(Field::Phone, phone);
}

#[tokio::test]
async fn test_create_then_list() {
    let backend = Backend::start(&[]).await;
    let api = backend.api();
    let queries = backend.queries();

    let mut form = ContactFormView::new(api.clone(), queries.clone(), FormMode::Create);
    fill(&mut form, "Ilham Suryana", "ilham@email.com", "081234567890");
    assert_eq!(form.submit().await, Some(Route::Contacts));
    assert_eq!(backend.count("POST"), 1);

    let list = ContactListView::new(api, queries);
    list.mount().await;
    assert!(list.render().contains("Ilham Suryana"));
}

#[tokio::test]
async fn test_invalid_input_sends_nothing() {
    let backend = Backend::start(&[]).await;
    let mut form = ContactFormView::new(backend.api(), backend.queries(), FormMode::Create);

    fill(&mut form, "Ilham", "", "081234567890");
    assert_eq!(form.submit().await, None);
    assert_eq!(form.error(Field::Email), Some("Email is required"));
    assert_eq!(backend.count("POST"), 0);
}

#[tokio::test]
async fn test_server_message_banner() {
    let backend = Backend::start(&[]).await;
    backend.respond("/api/new-contact", 409, r#"{"message":"Email already registered"}"#);

    let mut form = ContactFormView::new(backend.api(), backend.queries(), FormMode::Create);
    fill(&mut form, "Ilham", "ilham@email.com", "081234567890");

    assert_eq!(form.submit().await, None);
    assert_eq!(form.banner(), Some("Email already registered"));
    assert!(form.render().contains("! Email already registered"));
}

#[tokio::test]
async fn test_fallback_banner_on_empty_error() {
    let backend = Backend::start(&[]).await;
    backend.respond("/api/new-contact", 400, "");

    let mut form = ContactFormView::new(backend.api(), backend.queries(), FormMode::Create);
    fill(&mut form, "Ilham", "ilham@email.com", "081234567890");

    assert_eq!(form.submit().await, None);
    assert_eq!(form.banner(), Some("Failed to save contact"));
}

#[tokio::test]
async fn test_edit_existing_contact() {
    let backend = Backend::start(&[("Budi", "budi@email.com", "081298765432")]).await;
    let mut form = ContactFormView::new(backend.api(), backend.queries(), FormMode::Edit("1".into()));

    form.load().await.unwrap();
    assert_eq!(form.value(Field::Email), "budi@email.com");

    form.set(Field::Phone, "081200000000");
    assert_eq!(form.submit().await, Some(Route::Contacts));
    assert_eq!(backend.count("PUT"), 1);
    assert_eq!(backend.count("POST"), 0);
    assert_eq!(backend.names(), vec!["Budi"]);
}
