//! Behaviour of list queries over an in-memory collection
//!
//! Covers filtering, projection, sorting, paging and population as seen by a
//! client of a list endpoint.

use devcamper_api::domain::query::{advanced_results, PageLink, PopulateSpec, ResourceQuery};
use devcamper_api::infrastructure::collections::InMemoryCollection;
use serde_json::{json, Value};

fn query(raw: &[(&str, &str)]) -> ResourceQuery {
    let pairs: Vec<(String, String)> = raw
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    ResourceQuery::from_pairs(&pairs).expect("valid query")
}

fn created_at(day: u32) -> String {
    format!("2024-01-{:02}T00:00:00Z", day)
}

/// Twelve web development bootcamps and three business ones
fn bootcamps() -> Vec<Value> {
    let mut records = Vec::new();
    for n in 1..=12u32 {
        records.push(json!({
            "id": format!("web-{:02}", n),
            "name": format!("Web Bootcamp {:02}", n),
            "careers": ["Web Development", "UI/UX"],
            "averageCost": 1000 * n,
            "housing": n % 2 == 0,
            "createdAt": created_at(n),
        }));
    }
    for n in 13..=15u32 {
        records.push(json!({
            "id": format!("biz-{:02}", n),
            "name": format!("Business Bootcamp {:02}", n),
            "careers": ["Business"],
            "averageCost": 500,
            "housing": false,
            "createdAt": created_at(n),
        }));
    }
    records
}

fn ids(data: &[Value]) -> Vec<String> {
    data.iter()
        .map(|record| record["id"].as_str().unwrap_or_default().to_string())
        .collect()
}

#[tokio::test]
async fn no_params_returns_first_page_newest_first() {
    let collection = InMemoryCollection::new(bootcamps());

    let results = advanced_results(&collection, &query(&[]), None).await.unwrap();

    assert_eq!(results.count, 10);
    assert_eq!(results.data[0]["id"], "biz-15");
    assert_eq!(results.data[9]["id"], "web-06");
    assert_eq!(results.pagination.prev, None);
    assert_eq!(results.pagination.next, Some(PageLink { page: 2, limit: 10 }));
}

#[tokio::test]
async fn twelve_matching_records_span_two_pages() {
    let collection = InMemoryCollection::new(bootcamps());

    let first = advanced_results(&collection, &query(&[("careers", "Web Development")]), None)
        .await
        .unwrap();

    assert_eq!(first.count, 10);
    assert_eq!(first.pagination.next, Some(PageLink { page: 2, limit: 10 }));
    assert_eq!(first.pagination.prev, None);

    let second = advanced_results(
        &collection,
        &query(&[("careers", "Web Development"), ("page", "2")]),
        None,
    )
    .await
    .unwrap();

    assert_eq!(second.count, 2);
    assert_eq!(second.pagination.next, None);
    assert_eq!(second.pagination.prev, Some(PageLink { page: 1, limit: 10 }));
}

#[tokio::test]
async fn filtered_out_records_do_not_add_a_page() {
    // 15 records overall, 10 of them cost 3000 or more; an unfiltered count
    // would advertise a second page that could never hold a match
    let collection = InMemoryCollection::new(bootcamps());

    let results = advanced_results(&collection, &query(&[("averageCost[gte]", "3000")]), None)
        .await
        .unwrap();

    assert_eq!(results.count, 10);
    assert_eq!(results.pagination.next, None);
}

#[tokio::test]
async fn comparison_filters_are_numeric() {
    let collection = InMemoryCollection::new(bootcamps());

    let results = advanced_results(
        &collection,
        &query(&[("averageCost[gte]", "1000"), ("averageCost[lt]", "3000")]),
        None,
    )
    .await
    .unwrap();

    let mut found = ids(&results.data);
    found.sort();
    assert_eq!(found, vec!["web-01", "web-02"]);
}

#[tokio::test]
async fn membership_filter_matches_any_value() {
    let collection = InMemoryCollection::new(bootcamps());

    let results = advanced_results(
        &collection,
        &query(&[("careers[in]", "Business,Mobile Development"), ("limit", "50")]),
        None,
    )
    .await
    .unwrap();

    assert_eq!(results.count, 3);
    assert!(results.data.iter().all(|b| b["careers"] == json!(["Business"])));
}

#[tokio::test]
async fn keyword_like_values_are_plain_values() {
    let collection = InMemoryCollection::new(vec![
        json!({"id": "a", "weeks": "in", "createdAt": created_at(1)}),
        json!({"id": "b", "weeks": "8", "createdAt": created_at(2)}),
    ]);

    let results = advanced_results(&collection, &query(&[("weeks", "in")]), None)
        .await
        .unwrap();

    assert_eq!(ids(&results.data), vec!["a"]);
}

#[tokio::test]
async fn select_keeps_only_listed_fields_and_id() {
    let collection = InMemoryCollection::new(bootcamps());

    let results = advanced_results(&collection, &query(&[("select", "name,housing")]), None)
        .await
        .unwrap();

    for record in &results.data {
        let mut keys: Vec<&String> = record.as_object().unwrap().keys().collect();
        keys.sort();
        assert_eq!(keys, vec!["housing", "id", "name"]);
    }
}

#[tokio::test]
async fn multi_key_sort_breaks_ties_in_order() {
    let collection = InMemoryCollection::new(vec![
        json!({"id": "1", "name": "Beta", "createdAt": created_at(1)}),
        json!({"id": "2", "name": "Alpha", "createdAt": created_at(2)}),
        json!({"id": "3", "name": "Gamma", "createdAt": created_at(2)}),
        json!({"id": "4", "name": "Delta", "createdAt": created_at(1)}),
    ]);

    let results = advanced_results(&collection, &query(&[("sort", "-createdAt,name")]), None)
        .await
        .unwrap();

    assert_eq!(ids(&results.data), vec!["2", "3", "1", "4"]);
}

#[tokio::test]
async fn non_numeric_page_is_the_first_page() {
    let collection = InMemoryCollection::new(bootcamps());

    let garbage = advanced_results(&collection, &query(&[("page", "abc")]), None)
        .await
        .unwrap();
    let omitted = advanced_results(&collection, &query(&[]), None).await.unwrap();

    assert_eq!(ids(&garbage.data), ids(&omitted.data));
    assert_eq!(garbage.pagination, omitted.pagination);
}

#[tokio::test]
async fn page_past_the_end_is_empty() {
    let collection = InMemoryCollection::new(bootcamps());

    let results = advanced_results(&collection, &query(&[("page", "9")]), None)
        .await
        .unwrap();

    assert_eq!(results.count, 0);
    assert_eq!(results.pagination.next, None);
    assert_eq!(results.pagination.prev, Some(PageLink { page: 8, limit: 10 }));
}

#[tokio::test]
async fn courses_inline_their_bootcamp_summary() {
    let collection = InMemoryCollection::new(vec![json!({
        "id": "course-1",
        "title": "Front End Web Development",
        "tuition": 8000,
        "bootcamp": "bc-1",
        "createdAt": created_at(1),
    })])
    .with_belongs_to(
        "bootcamp",
        vec![json!({
            "id": "bc-1",
            "name": "Devworks Bootcamp",
            "description": "Devworks is a full stack JavaScript bootcamp",
            "housing": true,
        })],
    );
    let populate = PopulateSpec::path("bootcamp").select(&["name", "description"]);

    let results = advanced_results(&collection, &query(&[]), Some(&populate))
        .await
        .unwrap();

    assert_eq!(
        results.data[0]["bootcamp"],
        json!({
            "id": "bc-1",
            "name": "Devworks Bootcamp",
            "description": "Devworks is a full stack JavaScript bootcamp",
        })
    );
}

#[tokio::test]
async fn bootcamps_attach_their_courses() {
    let collection = InMemoryCollection::new(vec![
        json!({"id": "bc-1", "name": "Devworks", "createdAt": created_at(2)}),
        json!({"id": "bc-2", "name": "ModernTech", "createdAt": created_at(1)}),
    ])
    .with_has_many(
        "courses",
        "bootcamp",
        vec![
            json!({"id": "c-1", "title": "Front End", "bootcamp": "bc-1"}),
            json!({"id": "c-2", "title": "Full Stack", "bootcamp": "bc-1"}),
        ],
    );
    let populate = PopulateSpec::path("courses");

    let results = advanced_results(&collection, &query(&[]), Some(&populate))
        .await
        .unwrap();

    assert_eq!(results.data[0]["courses"].as_array().unwrap().len(), 2);
    assert_eq!(results.data[1]["courses"], json!([]));
}
