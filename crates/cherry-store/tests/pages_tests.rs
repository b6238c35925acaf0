use cherry_api::{Category, UserPatch};
use cherry_store::{
    Field, Route, UserForm,
    form::ErrorKind,
    pages::{App, Page, SubmitOutcome, UserCreator, UserEditor, UsersPage},
    route::parse_id,
};

use crate::common::{Call, ScriptedApi, store_for, three_users, transport_failure, user};

#[tokio::test]
async fn test_editor_invalid_form_sends_nothing() {
    let api = ScriptedApi::with_users(three_users());
    let store = store_for(&api);
    let mut editor = UserEditor::new();
    editor.set_id(1, &store).await;
    let calls_before = api.calls().len();

    *editor.form_mut() = UserForm::new("", "bad", "user");
    let outcome = editor.submit(&store).await;

    let SubmitOutcome::Invalid(errors) = outcome else {
        panic!("expected invalid form, got {outcome:?}");
    };
    assert!(errors.has(Field::Name, ErrorKind::Required));
    assert!(errors.has(Field::Email, ErrorKind::Email));
    assert_eq!(api.calls().len(), calls_before);
}

#[tokio::test]
async fn test_editor_valid_form_updates_once_and_navigates() {
    let api = ScriptedApi::with_users(three_users());
    let store = store_for(&api);
    let mut editor = UserEditor::new();
    editor.set_id(3, &store).await;

    *editor.form_mut() = UserForm::new("Bob", "bob@x.com", "admin");
    let outcome = editor.submit(&store).await;

    assert_eq!(outcome, SubmitOutcome::Navigate(Route::Users));
    let expected = user(3, "Bob", Category::Admin);
    assert_eq!(
        api.count(|c| matches!(c, Call::Update(..))),
        1,
        "exactly one update call"
    );
    assert_eq!(
        api.calls().last(),
        Some(&Call::Update(3, UserPatch::from(&expected)))
    );
}

#[tokio::test]
async fn test_editor_stays_when_update_fails() {
    let api = ScriptedApi::with_users(three_users());
    let store = store_for(&api);
    let mut editor = UserEditor::new();
    editor.set_id(2, &store).await;

    api.fail_with(Some(transport_failure()));
    let outcome = editor.submit(&store).await;

    assert_eq!(
        outcome,
        SubmitOutcome::Failed("transport error: connection refused".to_string())
    );
}

#[tokio::test]
async fn test_editor_ignores_stale_error_from_earlier_failure() {
    let api = ScriptedApi::with_users(three_users());
    let store = store_for(&api);
    store.load_one_user(42).await;
    assert!(store.error().is_some());

    let mut editor = UserEditor::new();
    editor.set_id(1, &store).await;
    let outcome = editor.submit(&store).await;

    assert_eq!(outcome, SubmitOutcome::Navigate(Route::Users));
}

#[tokio::test]
async fn test_editor_never_sends_another_users_form() {
    let api = ScriptedApi::with_users(three_users());
    let store = store_for(&api);
    let mut editor = UserEditor::new();
    editor.set_id(1, &store).await;

    editor.set_id(99, &store).await;
    assert_eq!(editor.id(), 99);
    assert_eq!(editor.working_id(), 1);

    let outcome = editor.submit(&store).await;
    assert_eq!(
        outcome,
        SubmitOutcome::Failed("user 99 is not loaded".to_string())
    );
    assert_eq!(api.count(|c| matches!(c, Call::Update(..))), 0);
}

#[tokio::test]
async fn test_editor_loads_only_for_new_non_zero_id() {
    let api = ScriptedApi::with_users(three_users());
    let store = store_for(&api);
    let mut editor = UserEditor::new();

    editor.set_id(parse_id(Some("not-a-number")), &store).await;
    assert_eq!(editor.id(), 0);
    assert!(api.calls().is_empty());
    assert_eq!(editor.form(), &UserForm::default());

    editor.set_id(2, &store).await;
    editor.set_id(2, &store).await;
    assert_eq!(api.count(|c| *c == Call::Get(2)), 1);
    assert_eq!(editor.form().name, "Bob");
    assert_eq!(editor.working_id(), 2);
}

#[tokio::test]
async fn test_editor_keeps_edits_when_same_user_reloads() {
    let api = ScriptedApi::with_users(three_users());
    let store = store_for(&api);
    let mut editor = UserEditor::new();
    editor.set_id(1, &store).await;
    editor.form_mut().name = "Annabel".to_string();

    store.load_one_user(1).await;
    editor.sync(store.selected_user().as_ref());

    assert_eq!(editor.form().name, "Annabel");
}

#[tokio::test]
async fn test_creator_submit_creates_and_navigates() {
    let api = ScriptedApi::with_users(three_users());
    let store = store_for(&api);
    UsersPage::enter(&store).await;

    let mut creator = UserCreator::new();
    *creator.form_mut() = UserForm::new("Dee", "dee@x.com", "guest");
    let outcome = creator.submit(&store).await;

    assert_eq!(outcome, SubmitOutcome::Navigate(Route::Users));
    let rows = UsersPage::rows(&store.snapshot()).to_vec();
    assert_eq!(rows.last().map(|u| u.name.as_str()), Some("Dee"));
}

#[tokio::test]
async fn test_creator_rejects_invalid_category() {
    let api = ScriptedApi::with_users(Vec::new());
    let store = store_for(&api);

    let mut creator = UserCreator::new();
    *creator.form_mut() = UserForm::new("Dee", "dee@x.com", "owner");
    let outcome = creator.submit(&store).await;

    assert!(matches!(
        outcome,
        SubmitOutcome::Invalid(errors) if errors.has(Field::Category, ErrorKind::Category)
    ));
    assert!(api.calls().is_empty());
}

#[tokio::test]
async fn test_app_lifecycle() {
    let api = ScriptedApi::with_users(three_users());
    let store = store_for(&api);

    let mut app = App::start(store.clone()).await;
    assert_eq!(app.route(), Route::Home);
    assert_eq!(store.user_count(), 3);

    app.navigate(Route::Users).await;
    assert!(matches!(app.page(), Page::Users(_)));
    assert_eq!(api.count(|c| *c == Call::List), 1);

    app.navigate("/users/edit/2".parse().unwrap()).await;
    let Page::Edit(editor) = app.page_mut() else {
        panic!("expected the editor page");
    };
    editor.form_mut().category = "guest".to_string();

    let outcome = app.submit().await;
    assert_eq!(outcome, Some(SubmitOutcome::Navigate(Route::Users)));
    assert_eq!(app.route(), Route::Users);
    assert_eq!(store.users()[1].category, Category::Guest);
}

#[tokio::test]
async fn test_app_cancel_discards_edits() {
    let api = ScriptedApi::with_users(three_users());
    let store = store_for(&api);
    let mut app = App::start(store.clone()).await;

    app.navigate(Route::UserEdit(1)).await;
    if let Page::Edit(editor) = app.page_mut() {
        editor.form_mut().name = "Changed".to_string();
    }
    app.cancel().await;

    assert_eq!(app.route(), Route::Users);
    assert_eq!(api.count(|c| matches!(c, Call::Update(..))), 0);
    assert_eq!(store.users()[0].name, "Ann");
}

#[tokio::test]
async fn test_app_submit_without_form() {
    let api = ScriptedApi::with_users(three_users());
    let store = store_for(&api);
    let mut app = App::start(store).await;

    assert_eq!(app.submit().await, None);
}
