use shopmission::catalog::parse_catalog;
use shopmission::errors::ShopError;
use shopmission::models::{default_missions, find_mission, Product};
use shopmission::session::{FlowNotice, Session, SessionStore, Step, SubmitStatus};
use tempfile::TempDir;

fn product(name: &str, price: u64) -> Product {
    Product {
        name: name.to_string(),
        price,
        image: format!("{}.png", name),
    }
}

fn curry_session() -> Session {
    let missions = default_missions();
    let mut session = Session::new();
    session.pick_mission(find_mission(&missions, "카레 만들기").unwrap()).unwrap();
    session
}

#[test]
fn test_curry_mission_within_budget() {
    let mut session = curry_session();
    assert_eq!(session.step(), Step::Shopping);
    assert_eq!(session.budget(), 15000);

    session.add_item(&product("감자", 1500), 2).unwrap();
    session.add_item(&product("카레 가루", 3000), 1).unwrap();
    session.add_item(&product("돼지고기", 8000), 1).unwrap();

    assert_eq!(session.spent(), 14000);
    assert_eq!(session.remaining(), 1000);
    assert_eq!(session.submit_status(), SubmitStatus::Ready);

    session.submit().unwrap();
    assert_eq!(session.step(), Step::Result);
    assert!(session.submitted());
    assert!(!session.can_export());

    session.append_reason("감자는 카레에 꼭 필요해요").unwrap();
    session.append_reason("돼지고기가 제일 저렴했어요").unwrap();
    assert_eq!(session.reasons(), "감자는 카레에 꼭 필요해요\n돼지고기가 제일 저렴했어요");
    assert!(session.can_export());
}

#[test]
fn test_over_budget_blocks_submit_until_cart_cleared() {
    let mut session = curry_session();
    session.add_item(&product("소고기", 9000), 2).unwrap();

    assert_eq!(session.remaining(), -3000);
    assert_eq!(session.submit_status(), SubmitStatus::OverBudget { over_by: 3000 });
    let err = session.submit().unwrap_err();
    assert!(matches!(err, ShopError::SubmitBlocked(_)));
    assert_eq!(session.step(), Step::Shopping);

    session.clear_cart().unwrap();
    assert_eq!(session.submit_status(), SubmitStatus::EmptyCart);
    session.add_item(&product("소고기", 9000), 1).unwrap();
    session.submit().unwrap();
}

#[test]
fn test_oversized_catalog_price_stays_over_budget() {
    let csv = "품명,가격,이미지url\n금괴,\"10,000,000,000,000,000,000원\",gold.png\n";
    let products = parse_catalog(csv.as_bytes()).unwrap();
    assert_eq!(products[0].price, u64::MAX);

    let mut session = curry_session();
    session.add_item(&products[0], 2).unwrap();
    assert_eq!(session.spent(), u64::MAX);
    assert_eq!(session.remaining(), i64::MIN);
    assert_eq!(
        session.submit_status(),
        SubmitStatus::OverBudget { over_by: u64::MAX - 15000 }
    );
    assert!(matches!(session.submit().unwrap_err(), ShopError::SubmitBlocked(_)));
}

#[test]
fn test_exact_budget_is_accepted() {
    let mut session = curry_session();
    session.add_item(&product("세트", 5000), 3).unwrap();
    assert_eq!(session.remaining(), 0);
    assert!(session.submit_status().is_enabled());
}

#[test]
fn test_repeated_adds_accumulate_and_keep_first_price() {
    let mut session = curry_session();
    session.add_item(&product("감자", 1500), 1).unwrap();
    session.add_item(&product("감자", 1500), 3).unwrap();

    let entry = session.cart().get("감자").unwrap();
    assert_eq!(entry.quantity, 4);
    assert_eq!(entry.line_total(), 6000);
    assert_eq!(session.cart().len(), 1);
}

#[test]
fn test_non_positive_quantity_is_ignored() {
    let mut session = curry_session();
    assert!(!session.add_item(&product("감자", 1500), 0).unwrap());
    assert!(!session.add_item(&product("감자", 1500), -2).unwrap());
    assert!(session.cart().is_empty());
}

#[test]
fn test_actions_outside_their_step_are_rejected() {
    let mut session = Session::new();
    assert!(matches!(
        session.add_item(&product("감자", 1500), 1),
        Err(ShopError::InvalidTransition(_))
    ));
    assert!(session.submit().is_err());
    assert!(session.restart().is_err());
    assert!(session.append_reason("hi").is_err());

    let mut shopping = curry_session();
    let missions = default_missions();
    assert!(shopping.pick_mission(&missions[1]).is_err());
}

#[test]
fn test_restart_clears_everything() {
    let mut session = curry_session();
    let id = session.id();
    session.add_item(&product("감자", 1500), 2).unwrap();
    session.submit().unwrap();
    session.set_reasons("재료").unwrap();

    session.restart().unwrap();
    assert_eq!(session.step(), Step::Selection);
    assert!(session.mission().is_none());
    assert_eq!(session.budget(), 0);
    assert!(session.cart().is_empty());
    assert!(!session.submitted());
    assert!(session.reasons().is_empty());
    assert_eq!(session.id(), id);
}

#[test]
fn test_back_after_submit_is_refused() {
    let mut session = curry_session();
    session.add_item(&product("감자", 1500), 1).unwrap();
    session.submit().unwrap();
    assert!(session.back().is_err());
    assert_eq!(session.step(), Step::Result);
}

#[test]
fn test_resumed_result_without_submission_goes_back_to_shopping() {
    let json = serde_json::json!({
        "id": "6f1c8a8e-1c1e-4b7a-9d55-3b2d4e1f0a11",
        "step": "result",
        "mission": { "title": "카레 만들기", "budget": 15000 },
        "budget": 15000,
        "cart": { "감자": { "unit_price": 1500, "quantity": 2, "image": "potato.png" } },
        "submitted": false,
        "reasons": ""
    });
    let mut session: Session = serde_json::from_value(json).unwrap();

    assert_eq!(session.resolve(), Some(FlowNotice::NotSubmitted));
    assert_eq!(session.step(), Step::Shopping);
    assert_eq!(session.spent(), 3000);
    assert_eq!(session.resolve(), None);
}

#[test]
fn test_resumed_result_with_empty_cart_resets() {
    let json = serde_json::json!({
        "id": "6f1c8a8e-1c1e-4b7a-9d55-3b2d4e1f0a11",
        "step": "result",
        "mission": { "title": "카레 만들기", "budget": 15000 },
        "budget": 15000,
        "submitted": true
    });
    let mut session: Session = serde_json::from_value(json).unwrap();

    assert_eq!(session.resolve(), Some(FlowNotice::EmptyCart));
    assert_eq!(session.step(), Step::Selection);
    assert!(session.mission().is_none());
}

#[test]
fn test_resumed_shopping_without_mission_resets() {
    let json = serde_json::json!({
        "id": "6f1c8a8e-1c1e-4b7a-9d55-3b2d4e1f0a11",
        "step": "shopping"
    });
    let mut session: Session = serde_json::from_value(json).unwrap();

    assert_eq!(session.resolve(), Some(FlowNotice::NoMission));
    assert_eq!(session.step(), Step::Selection);
}

#[test]
fn test_store_round_trips_a_finished_session() {
    let dir = TempDir::new().unwrap();
    let store = SessionStore::new(dir.path().join("nested").join("session.json"));
    assert!(store.load().is_none());

    let mut session = curry_session();
    session.add_item(&product("감자", 1500), 2).unwrap();
    session.submit().unwrap();
    session.set_reasons("감자 두 개면 충분").unwrap();
    store.save(&session).unwrap();

    let mut restored = store.load().unwrap();
    assert_eq!(restored.resolve(), None);
    assert_eq!(restored.id(), session.id());
    assert_eq!(restored.step(), Step::Result);
    assert!(restored.can_export());
}

#[test]
fn test_resume_redirects_before_first_view() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("session.json");
    let json = serde_json::json!({
        "id": "6f1c8a8e-1c1e-4b7a-9d55-3b2d4e1f0a11",
        "step": "result",
        "mission": { "title": "카레 만들기", "budget": 15000 },
        "budget": 15000,
        "cart": { "감자": { "unit_price": 1500, "quantity": 2, "image": "potato.png" } },
        "submitted": false
    });
    std::fs::write(&path, json.to_string()).unwrap();

    let (session, notice) = SessionStore::new(&path).resume().unwrap();
    assert_eq!(notice, Some(FlowNotice::NotSubmitted));
    assert_eq!(session.step(), Step::Shopping);
    assert!(SessionStore::new(dir.path().join("absent.json")).resume().is_none());
}

#[test]
fn test_store_ignores_corrupt_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("session.json");
    std::fs::write(&path, "{ not json").unwrap();
    assert!(SessionStore::new(path).load().is_none());
}
