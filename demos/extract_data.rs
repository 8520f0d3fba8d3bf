//! Walks through the three extraction outcomes on the bundled sample data:
//! an unsupported suffix, a JSON movie listing and an XML person directory.
//!
//! Run with `cargo run --example extract_data`.

use anyhow::{Context, Result};
use data_extract::{extract, Extractor};
use serde_json::Value;

const DATA_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/demos/data");

fn main() -> Result<()> {
    data_extract::init_default();

    // Logged and skipped
    let sqlite = extract(&format!("{}/person.sqlite", DATA_DIR))?;
    assert!(sqlite.is_none());
    println!();

    if let Some(Extractor::Json(movies)) = extract(&format!("{}/movies.json", DATA_DIR))? {
        let movies = movies
            .parsed_data()
            .as_array()
            .context("movies.json should hold an array")?;
        println!("Found: {} movies.", movies.len());
        for movie in movies {
            println!("Title: {}", display(&movie["title"]));
            println!("Year: {}", display(&movie["year"]));
            println!("Director: {}", display(&movie["director"]));
            println!("Genre: {}", display(&movie["genre"]));
            println!();
        }
    }

    if let Some(Extractor::Xml(people)) = extract(&format!("{}/person.xml", DATA_DIR))? {
        let liars = people
            .parsed_data()
            .find_all(r#".//person[lastName="Liar"]"#)?;
        println!("Found: {} persons", liars.len());
        for liar in liars {
            let first_name = liar.find_text("firstName")?.unwrap_or_default();
            let last_name = liar.find_text("lastName")?.unwrap_or_default();
            println!("first name: {}, last name: {}", first_name, last_name);

            if let Some(numbers) = liar.find("phoneNumbers")? {
                for phone in numbers {
                    println!(
                        "phone number ({}): {}",
                        phone.get("type").unwrap_or("unknown"),
                        phone.text().unwrap_or_default()
                    );
                }
            }
            println!();
        }
    }

    Ok(())
}

/// Strings print bare and null prints `None`; other values keep their JSON form
fn display(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => "None".to_string(),
        other => other.to_string(),
    }
}
