//! Simple smoke test for GeminiBrain generation.
//!
//! Run with: cargo run -p gemini-brain --example test_generate
//! Or with a custom prompt: cargo run -p gemini-brain --example test_generate -- "Your prompt here"
//!
//! Make sure to set environment variables in .env:
//!   GOOGLE_API_KEY - Gemini API key for authentication

use gemini_brain::{GeminiBrain, GenerationOptions, TextGenerator};
use std::env;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt::init();

    let args: Vec<String> = env::args().collect();
    let prompt = if args.len() > 1 {
        args[1..].join(" ")
    } else {
        "Hello! Please respond with a short greeting.".to_string()
    };

    println!("Initializing GeminiBrain...");
    let brain = GeminiBrain::from_env()?;

    println!("Brain initialized: {}", brain.name());
    println!("API URL: {}", brain.config().api_url);
    println!("Model: {}", brain.config().model);
    println!();

    println!("Sending: \"{}\"", prompt);
    println!("Waiting for response...\n");

    let text = brain
        .generate(&prompt, &GenerationOptions::conversational())
        .await?;

    println!("=== Response ===");
    println!("{}", text);
    println!("================");

    Ok(())
}
