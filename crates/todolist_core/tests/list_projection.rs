use serde_json::json;
use todolist_core::db::open_db_in_memory;
use todolist_core::{
    sqlite_list_service, ItemWrite, ItemWriteError, ListServiceError, DUPLICATE_ITEM_ERROR,
    EMPTY_ITEM_ERROR,
};
use uuid::Uuid;

#[test]
fn view_list_serializes_items_in_insertion_order() {
    let conn = open_db_in_memory().unwrap();
    let service = sqlite_list_service(&conn).unwrap();
    let list = service.create_list_with_item("first", None).unwrap();
    let second = service.add_item_to_list(list.id, "second").unwrap();

    let view = service.view_list(list.id).unwrap();
    let first_id = view.items[0].id;
    let value = serde_json::to_value(&view).unwrap();

    assert_eq!(
        value,
        json!({
            "id": list.id.to_string(),
            "items": [
                { "id": first_id.to_string(), "list_id": list.id.to_string(), "text": "first" },
                { "id": second.id.to_string(), "list_id": list.id.to_string(), "text": "second" },
            ]
        })
    );
}

#[test]
fn view_missing_list_fails_with_list_not_found() {
    let conn = open_db_in_memory().unwrap();
    let service = sqlite_list_service(&conn).unwrap();

    let err = service.view_list(Uuid::new_v4()).unwrap_err();
    assert!(matches!(err, ListServiceError::ListNotFound(_)));
}

#[test]
fn item_write_is_accepted_through_service_validation() {
    let conn = open_db_in_memory().unwrap();
    let service = sqlite_list_service(&conn).unwrap();
    let list = service.create_list_with_item("first", None).unwrap();

    let write: ItemWrite =
        serde_json::from_value(json!({ "list": list.id.to_string(), "text": "second" })).unwrap();
    let created = service.accept_item_write(&write).unwrap();

    assert_eq!(created.list_id, list.id);
    assert_eq!(created.text, "second");
    assert_eq!(service.view_list(list.id).unwrap().items.len(), 2);
}

#[test]
fn duplicate_item_write_reports_field_error() {
    let conn = open_db_in_memory().unwrap();
    let service = sqlite_list_service(&conn).unwrap();
    let list = service.create_list_with_item("textey", None).unwrap();

    let err = service
        .accept_item_write(&ItemWrite {
            list: list.id,
            text: "textey".to_string(),
        })
        .unwrap_err();

    match err {
        ItemWriteError::Invalid(errors) => {
            assert_eq!(
                serde_json::to_value(&errors).unwrap(),
                json!({ "text": [DUPLICATE_ITEM_ERROR] })
            );
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(service.view_list(list.id).unwrap().items.len(), 1);
}

#[test]
fn blank_item_write_reports_field_error() {
    let conn = open_db_in_memory().unwrap();
    let service = sqlite_list_service(&conn).unwrap();
    let list = service.create_list_with_item("first", None).unwrap();

    let err = service
        .accept_item_write(&ItemWrite {
            list: list.id,
            text: "  ".to_string(),
        })
        .unwrap_err();

    match err {
        ItemWriteError::Invalid(errors) => {
            assert_eq!(errors.text, vec![EMPTY_ITEM_ERROR.to_string()]);
            assert!(errors.list.is_empty());
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn item_write_to_missing_list_reports_list_field_error() {
    let conn = open_db_in_memory().unwrap();
    let service = sqlite_list_service(&conn).unwrap();

    let err = service
        .accept_item_write(&ItemWrite {
            list: Uuid::new_v4(),
            text: "x".to_string(),
        })
        .unwrap_err();

    match err {
        ItemWriteError::Invalid(errors) => {
            assert_eq!(errors.list.len(), 1);
            assert!(errors.text.is_empty());
        }
        other => panic!("unexpected error: {other}"),
    }
}
