//! Estate API integration tests.
//!
//! Run with: cargo test --test survey_test -- --ignored
//!
//! Note: Requires a running grove server at http://localhost:8080
//! or set GROVE_TEST_URL environment variable.

use reqwest::Client;

fn base_url() -> String {
    std::env::var("GROVE_TEST_URL").unwrap_or_else(|_| "http://localhost:8080".to_string())
}

async fn create_estate(client: &Client, base: &str, width: u32, length: u32) -> String {
    let resp = client
        .post(format!("{}/v1/estates", base))
        .json(&serde_json::json!({ "width": width, "length": length }))
        .send()
        .await
        .expect("Failed to create estate");
    assert_eq!(resp.status(), 201);
    let body: serde_json::Value = resp.json().await.unwrap();
    body["id"].as_str().unwrap().to_string()
}

#[tokio::test]
#[ignore] // Run only when server is running
async fn test_plant_and_read_stats() {
    let client = Client::new();
    let base = base_url();

    let estate_id = create_estate(&client, &base, 10, 10).await;

    for (x, y, height) in [(1u32, 1u32, 5u8), (2, 1, 1), (3, 1, 9)] {
        let resp = client
            .post(format!("{}/v1/estates/{}/trees", base, estate_id))
            .json(&serde_json::json!({ "x": x, "y": y, "height": height }))
            .send()
            .await
            .expect("Failed to plant tree");
        assert_eq!(resp.status(), 201);
    }

    let resp = client
        .get(format!("{}/v1/estates/{}/stats", base, estate_id))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let stats: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(stats["count"], 3);
    assert_eq!(stats["min"], 1);
    assert_eq!(stats["max"], 9);
    assert_eq!(stats["median"], 5);
}

#[tokio::test]
#[ignore]
async fn test_drone_plan_with_and_without_budget() {
    let client = Client::new();
    let base = base_url();

    let estate_id = create_estate(&client, &base, 1, 5).await;

    let resp = client
        .get(format!("{}/v1/estates/{}/drone-plan", base, estate_id))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let plan: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(plan["distance"], 6);
    assert!(plan.get("rest").is_none());

    let resp = client
        .get(format!(
            "{}/v1/estates/{}/drone-plan?max_distance=2",
            base, estate_id
        ))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let plan: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(plan["distance"], 2);
    assert_eq!(plan["rest"]["x"], 2);
    assert_eq!(plan["rest"]["y"], 1);
}

#[tokio::test]
#[ignore]
async fn test_duplicate_plot_conflicts() {
    let client = Client::new();
    let base = base_url();

    let estate_id = create_estate(&client, &base, 10, 10).await;

    let resp = client
        .post(format!("{}/v1/estates/{}/trees", base, estate_id))
        .json(&serde_json::json!({ "x": 4, "y": 4, "height": 7 }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 201);

    let resp = client
        .post(format!("{}/v1/estates/{}/trees", base, estate_id))
        .json(&serde_json::json!({ "x": 4, "y": 4, "height": 3 }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 409);
}
