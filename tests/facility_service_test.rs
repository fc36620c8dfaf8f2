mod common;

use common::{tag_names, TestApp};
use facilities_api::db::FacilityFilters;
use facilities_api::entities::{facility_tag, tag};
use facilities_api::errors::ServiceError;
use facilities_api::services::tags::sync_facility_tags;
use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter};

#[tokio::test]
async fn create_then_fetch_round_trip() {
    let app = TestApp::new().await;
    let svc = &app.state.facilities;

    let id = svc
        .create_facility(
            "Harbor Kitchen".to_string(),
            app.location_ams,
            tag_names(&["Food", "Catering"]),
        )
        .await
        .unwrap();

    let record = svc.get_facility(id).await.unwrap().expect("facility exists");
    assert_eq!(record.name, "Harbor Kitchen");
    assert_eq!(record.location_id, app.location_ams);
    assert_eq!(record.city, "Amsterdam");
    assert_eq!(record.zip_code, "1012LG");
    // Tag lists come back sorted alphabetically.
    assert_eq!(record.tags, vec!["Catering", "Food"]);
}

#[tokio::test]
async fn create_without_tags_yields_empty_tag_list() {
    let app = TestApp::new().await;
    let svc = &app.state.facilities;

    let id = svc
        .create_facility("Depot".to_string(), app.location_ams, vec![])
        .await
        .unwrap();

    let record = svc.get_facility(id).await.unwrap().unwrap();
    assert!(record.tags.is_empty());
}

#[tokio::test]
async fn create_with_unknown_location_is_rejected_before_any_write() {
    let app = TestApp::new().await;
    let svc = &app.state.facilities;

    let err = svc
        .create_facility("Ghost".to_string(), 9999, vec![])
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::ValidationError(_)));
    assert!(svc.list_facilities().await.unwrap().is_empty());
}

#[tokio::test]
async fn replace_tags_has_replace_semantics_not_merge() {
    let app = TestApp::new().await;
    let svc = &app.state.facilities;

    let id = svc
        .create_facility(
            "Dockside".to_string(),
            app.location_ams,
            tag_names(&["Food"]),
        )
        .await
        .unwrap();

    svc.replace_tags(id, tag_names(&["Events", "Drinks"]))
        .await
        .unwrap();

    let record = svc.get_facility(id).await.unwrap().unwrap();
    assert_eq!(record.tags, vec!["Drinks", "Events"]);
}

#[tokio::test]
async fn replace_tags_with_empty_set_clears_and_is_idempotent() {
    let app = TestApp::new().await;
    let svc = &app.state.facilities;

    let id = svc
        .create_facility(
            "Dockside".to_string(),
            app.location_ams,
            tag_names(&["Food", "Catering"]),
        )
        .await
        .unwrap();

    svc.replace_tags(id, vec![]).await.unwrap();
    assert!(svc.get_facility(id).await.unwrap().unwrap().tags.is_empty());

    // A second clear is a valid no-op.
    svc.replace_tags(id, vec![]).await.unwrap();
    assert!(svc.get_facility(id).await.unwrap().unwrap().tags.is_empty());
}

#[tokio::test]
async fn sync_skips_blank_and_duplicate_names() {
    let app = TestApp::new().await;
    let svc = &app.state.facilities;

    let id = svc
        .create_facility("Dockside".to_string(), app.location_ams, vec![])
        .await
        .unwrap();

    sync_facility_tags(
        &*app.state.db,
        id,
        &tag_names(&["Food", "   ", "Food", ""]),
    )
    .await
    .unwrap();

    let record = svc.get_facility(id).await.unwrap().unwrap();
    assert_eq!(record.tags, vec!["Food"]);
}

#[tokio::test]
async fn syncing_same_name_twice_creates_a_single_tag_row() {
    let app = TestApp::new().await;
    let svc = &app.state.facilities;

    let a = svc
        .create_facility("North".to_string(), app.location_ams, tag_names(&["Food"]))
        .await
        .unwrap();
    let b = svc
        .create_facility("South".to_string(), app.location_rtm, tag_names(&["Food"]))
        .await
        .unwrap();

    let food_rows = tag::Entity::find()
        .filter(tag::Column::Name.eq("Food"))
        .count(&*app.state.db)
        .await
        .unwrap();
    assert_eq!(food_rows, 1);

    assert_eq!(svc.get_facility(a).await.unwrap().unwrap().tags, vec!["Food"]);
    assert_eq!(svc.get_facility(b).await.unwrap().unwrap().tags, vec!["Food"]);
}

#[tokio::test]
async fn update_missing_facility_returns_false_and_writes_nothing() {
    let app = TestApp::new().await;
    let svc = &app.state.facilities;

    let updated = svc
        .update_facility(4242, "Renamed".to_string(), app.location_ams, vec![])
        .await
        .unwrap();
    assert!(!updated);
    assert!(svc.list_facilities().await.unwrap().is_empty());
}

#[tokio::test]
async fn update_replaces_name_location_and_tags_but_not_creation_date() {
    let app = TestApp::new().await;
    let svc = &app.state.facilities;

    let id = svc
        .create_facility(
            "Old Name".to_string(),
            app.location_ams,
            tag_names(&["Food"]),
        )
        .await
        .unwrap();
    let created = svc.get_facility(id).await.unwrap().unwrap();

    let updated = svc
        .update_facility(
            id,
            "New Name".to_string(),
            app.location_rtm,
            tag_names(&["Events"]),
        )
        .await
        .unwrap();
    assert!(updated);

    let record = svc.get_facility(id).await.unwrap().unwrap();
    assert_eq!(record.name, "New Name");
    assert_eq!(record.location_id, app.location_rtm);
    assert_eq!(record.city, "Rotterdam");
    assert_eq!(record.tags, vec!["Events"]);
    assert_eq!(record.creation_date, created.creation_date);
}

#[tokio::test]
async fn delete_missing_facility_returns_false() {
    let app = TestApp::new().await;
    assert!(!app.state.facilities.delete_facility(4242).await.unwrap());
}

#[tokio::test]
async fn delete_removes_facility_and_all_its_associations() {
    let app = TestApp::new().await;
    let svc = &app.state.facilities;

    let id = svc
        .create_facility(
            "Dockside".to_string(),
            app.location_ams,
            tag_names(&["Food", "Catering"]),
        )
        .await
        .unwrap();

    assert!(svc.delete_facility(id).await.unwrap());
    assert!(svc.get_facility(id).await.unwrap().is_none());

    let leftover = facility_tag::Entity::find()
        .filter(facility_tag::Column::FacilityId.eq(id))
        .count(&*app.state.db)
        .await
        .unwrap();
    assert_eq!(leftover, 0);

    // Tag rows outlive the associations; only the junction is owned.
    let tag_rows = tag::Entity::find().count(&*app.state.db).await.unwrap();
    assert_eq!(tag_rows, 2);
}

fn filters(build: impl FnOnce(&mut FacilityFilters)) -> FacilityFilters {
    let mut f = FacilityFilters::default();
    build(&mut f);
    f
}

async fn seed_search_fixtures(app: &TestApp) {
    let svc = &app.state.facilities;
    svc.create_facility(
        "Harbor Kitchen".to_string(),
        app.location_ams,
        tag_names(&["Food", "Catering"]),
    )
    .await
    .unwrap();
    svc.create_facility(
        "Harbor Events".to_string(),
        app.location_rtm,
        tag_names(&["Events"]),
    )
    .await
    .unwrap();
    svc.create_facility("Canal Bar".to_string(), app.location_ams, tag_names(&["Drinks"]))
        .await
        .unwrap();
}

#[tokio::test]
async fn search_by_name_matches_substrings() {
    let app = TestApp::new().await;
    seed_search_fixtures(&app).await;

    let found = app
        .state
        .facilities
        .search_facilities(&filters(|f| f.name = Some("Harbor".to_string())))
        .await
        .unwrap();
    let names: Vec<_> = found.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["Harbor Kitchen", "Harbor Events"]);
}

#[tokio::test]
async fn search_by_tag_matches_any_of_the_facilitys_tags() {
    let app = TestApp::new().await;
    seed_search_fixtures(&app).await;

    let found = app
        .state
        .facilities
        .search_facilities(&filters(|f| f.tag = Some("Cater".to_string())))
        .await
        .unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].name, "Harbor Kitchen");
}

#[tokio::test]
async fn combined_filters_intersect() {
    let app = TestApp::new().await;
    seed_search_fixtures(&app).await;

    // "Harbor" matches two facilities, the city narrows it to one.
    let found = app
        .state
        .facilities
        .search_facilities(&filters(|f| {
            f.name = Some("Harbor".to_string());
            f.city = Some("Rotterdam".to_string());
        }))
        .await
        .unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].name, "Harbor Events");
}

#[tokio::test]
async fn search_by_exact_location_id() {
    let app = TestApp::new().await;
    seed_search_fixtures(&app).await;

    let found = app
        .state
        .facilities
        .search_facilities(&filters(|f| f.location = Some(app.location_rtm.to_string())))
        .await
        .unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].name, "Harbor Events");
}

#[tokio::test]
async fn empty_filter_values_are_ignored() {
    let app = TestApp::new().await;
    seed_search_fixtures(&app).await;

    let found = app
        .state
        .facilities
        .search_facilities(&filters(|f| {
            f.city = Some(String::new());
            f.tag = Some("   ".to_string());
        }))
        .await
        .unwrap();
    assert_eq!(found.len(), 3);
}

#[tokio::test]
async fn search_with_no_filters_returns_everything() {
    let app = TestApp::new().await;
    seed_search_fixtures(&app).await;

    let found = app
        .state
        .facilities
        .search_facilities(&FacilityFilters::default())
        .await
        .unwrap();
    assert_eq!(found.len(), 3);
}
