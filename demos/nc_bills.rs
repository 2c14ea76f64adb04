use anyhow::Result;
use openstates::{BillSearch, Client};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Example program that calls the library API.
    // Configure the key via OPENSTATES_API_KEY or a `.openstatesrc` file.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut client = Client::from_env()?;
    client.set_user_agent("nc-bills-demo");

    let nc = client.get_metadata("NC", &[], Some(&["id", "name", "url"]))?;
    println!("{} ({})", nc["name"].as_str().unwrap_or("?"), nc["url"].as_str().unwrap_or("?"));

    for district in client.search_districts("NC", "upper")?.iter().take(3) {
        println!("senate district {}", district["label"].as_str().unwrap_or("?"));
    }

    let bills = client.search_bills(
        &BillSearch::new()
            .jurisdiction("nc")
            .session("2021")
            .subject("Education")
            .page(1, 5),
    )?;
    for bill in &bills {
        let updated = bill["updated_at"]
            .as_timestamp()
            .map(|t| t.to_string())
            .unwrap_or_default();
        println!(
            "{:>8}  {}  {}",
            bill["identifier"].as_str().unwrap_or("?"),
            updated,
            bill["title"].as_str().unwrap_or("")
        );
    }

    Ok(())
}
