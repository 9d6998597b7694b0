use postman_client::{PostmanClient, PostmanError};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct MeResponse {
    user: User,
}

#[derive(Debug, Deserialize)]
struct User {
    id: u64,
    username: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let api_key = std::env::var("POSTMAN_API_KEY")
        .expect("POSTMAN_API_KEY environment variable must be set");
    let client = PostmanClient::new(api_key)?;

    let me = client
        .get()
        .resource(["me"])
        .output::<MeResponse>()
        .send_and_parse()
        .await?;
    println!("Authenticated as {} (id {})", me.user.username, me.user.id);

    // Non-2xx responses come back as structured errors
    match client
        .get()
        .resource(["collections", "does-not-exist"])
        .output::<serde_json::Value>()
        .send_and_parse()
        .await
    {
        Ok(collection) => println!("Unexpectedly found: {collection}"),
        Err(PostmanError::Api(e)) => println!("{} -> {}: {}", e.status_code, e.name, e.message),
        Err(e) => return Err(e.into()),
    }

    Ok(())
}
