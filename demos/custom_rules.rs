//! Registering custom rules: a synchronous object rule, an asynchronous rule
//! that reports data for its message, and a French locale.
//!
//! Run with: cargo run --example custom_rules

use rulebook::prelude::*;
use rulebook::value::is_truthy;
use serde_json::{json, Value};
use std::time::Duration;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    register_rules();

    let mut validator = Validator::new();
    let specs = [
        FieldSpec::new("terms", "truthy"),
        FieldSpec::new("username", "required|alpha_num|min:3|available"),
        FieldSpec::new("age", "numeric|between:18,120"),
    ];
    for spec in specs {
        if let Err(e) = validator.attach(spec) {
            tracing::error!("Could not attach field: {}", e);
            return;
        }
    }

    let form = json!({ "terms": 0, "username": "admin", "age": "17" });
    let Some(values) = form.as_object() else {
        return;
    };

    match validator.validate_all(values).await {
        Ok(true) => tracing::info!("Form is valid"),
        Ok(false) => {
            for error in validator.errors() {
                println!("{:>10}: {}", error.field, error.message);
            }
        }
        Err(e) => tracing::error!("Validation could not run: {}", e),
    }

    // Same form, French messages.
    rulebook::localize(
        "fr",
        Locale::new()
            .message("min", "Le champ {field} doit contenir au moins {0} caractères.")
            .message("between", "Le champ {field} doit être entre {0} et {1}.")
            .attribute("age", "âge")
            .default_message("Le champ {field} n'est pas valide."),
    );
    validator.set_locale("fr");

    if let Ok(false) = validator.validate_all(values).await {
        for error in validator.errors() {
            println!("{:>10}: {}", error.field, error.message);
        }
    }

    match validator.verify(&json!("x"), "required|min:2").await {
        Ok(report) => tracing::info!("verify: valid={} errors={:?}", report.valid, report.errors),
        Err(e) => tracing::error!("verify failed: {}", e),
    }
}

fn register_rules() {
    let truthy = ObjectRule::new()
        .get_message(|field, _, _| format!("The {} value is not truthy.", field))
        .validate(|value: &Value, _: &[String]| is_truthy(value));

    let available = ObjectRule::new()
        .get_message(|_, _, data| {
            data.and_then(|d| d.get("message"))
                .and_then(Value::as_str)
                .unwrap_or("Something went wrong")
                .to_string()
        })
        .validate_async(|value: Value, _| async move {
            // Pretend to ask a user service.
            tokio::time::sleep(Duration::from_millis(20)).await;
            match value.as_str() {
                Some("admin") | Some("root") => {
                    Outcome::fail().with_data(json!({ "message": "That name is reserved." }))
                }
                _ => Outcome::pass(),
            }
        });

    for (name, rule) in [("truthy", truthy), ("available", available)] {
        if let Err(e) = rulebook::extend(name, rule) {
            tracing::warn!("{}", e);
        }
    }

    // An object without `validate` is rejected.
    let broken = ObjectRule::new().get_message(|field, _, _| field.to_string());
    if let Err(e) = rulebook::extend("broken", broken) {
        tracing::info!("expected rejection: {}", e);
    }
}
