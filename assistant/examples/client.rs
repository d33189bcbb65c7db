use reqwest::Client;
use serde_json::json;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let client = Client::new();
    let base_url = std::env::var("API_BASE_URL").unwrap_or_else(|_| "http://127.0.0.1:8000".to_string());

    println!("Testing document chat backend at {}", base_url);

    println!("\nHealth Check:");
    let health_response = client
        .get(format!("{}/health", base_url))
        .send()
        .await?;

    println!("Status: {}", health_response.status());
    let health_json: serde_json::Value = health_response.json().await?;
    println!("Response: {}", serde_json::to_string_pretty(&health_json)?);

    println!("\nSimple Chat:");
    let simple_response = client
        .post(format!("{}/api/chat/simple", base_url))
        .json(&json!({ "user_question": "Hello, can you help me?" }))
        .send()
        .await?;

    println!("Status: {}", simple_response.status());
    let simple_json: serde_json::Value = simple_response.json().await?;
    println!("Response: {}", serde_json::to_string_pretty(&simple_json)?);

    println!("\nDocument Chat:");
    let chat_payload = json!({
        "pdf_text": "This is a sample document about artificial intelligence and machine learning.",
        "user_question": "What is this document about?"
    });

    let chat_response = client
        .post(format!("{}/api/chat", base_url))
        .json(&chat_payload)
        .send()
        .await?;

    println!("Status: {}", chat_response.status());
    let chat_json: serde_json::Value = chat_response.json().await?;
    println!("Response: {}", serde_json::to_string_pretty(&chat_json)?);

    println!("\nClient test completed!");
    Ok(())
}
