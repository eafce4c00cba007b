use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use jouken::prelude::*;
use std::fs;

/// A workflow condition-evaluation and node-configuration engine CLI
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Evaluate a condition group JSON file against a payload JSON file
    Eval {
        /// Path to the condition group JSON file
        group_path: String,
        /// Path to the payload JSON file
        payload_path: String,
    },
    /// Render a message template against a payload JSON file
    Render {
        /// Path to the template text file
        template_path: String,
        /// Path to the payload JSON file
        payload_path: String,
    },
    /// Print the next occurrence of a SCHEDULE node config
    Next {
        /// Path to the node config JSON file (must be a SCHEDULE config)
        config_path: String,
        /// Compute the first occurrence after this RFC 3339 instant
        /// (defaults to now)
        #[arg(short, long)]
        after: Option<String>,
    },
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Command::Eval {
            group_path,
            payload_path,
        } => run_eval(&group_path, &payload_path),
        Command::Render {
            template_path,
            payload_path,
        } => run_render(&template_path, &payload_path),
        Command::Next { config_path, after } => run_next(&config_path, after.as_deref()),
    }
}

fn run_eval(group_path: &str, payload_path: &str) {
    let group: ConditionGroup = read_json(group_path);
    let payload = read_json(payload_path);

    let outcome = group.evaluate(&payload);
    println!("{outcome}");

    for condition in &group.conditions {
        let matched = evaluate_condition(condition, &payload);
        let value = condition.value.as_deref().unwrap_or("");
        println!(
            "  {} {:?} {:?} -> {}",
            condition.field, condition.operator, value, matched
        );
    }
}

fn run_render(template_path: &str, payload_path: &str) {
    let template = fs::read_to_string(template_path).unwrap_or_else(|e| {
        exit_with_error(&format!(
            "Failed to read template file '{template_path}': {e}"
        ))
    });
    let payload = read_json(payload_path);
    println!("{}", render(&template, &payload));
}

fn run_next(config_path: &str, after: Option<&str>) {
    let json = fs::read_to_string(config_path).unwrap_or_else(|e| {
        exit_with_error(&format!("Failed to read config file '{config_path}': {e}"))
    });
    let config = NodeConfig::from_json(&json)
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to parse node config: {e}")));
    let NodeConfig::Schedule(schedule) = config else {
        exit_with_error("Config is not a SCHEDULE node");
    };

    let after = match after {
        Some(raw) => DateTime::parse_from_rfc3339(raw)
            .map(|t| t.with_timezone(&Utc))
            .unwrap_or_else(|e| {
                exit_with_error(&format!("Invalid --after timestamp '{raw}': {e}"))
            }),
        None => Utc::now(),
    };

    match schedule.next_occurrence(after) {
        Ok(Some(next)) => println!("{}", next.to_rfc3339()),
        Ok(None) => println!("never"),
        Err(e) => exit_with_error(&format!("Schedule is invalid: {e}")),
    }
}

fn read_json<T: serde::de::DeserializeOwned>(path: &str) -> T {
    let content = fs::read_to_string(path)
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to read file '{path}': {e}")));
    serde_json::from_str(&content)
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to parse JSON in '{path}': {e}")))
}

fn exit_with_error(message: &str) -> ! {
    eprintln!("\nError: {message}");
    std::process::exit(1);
}
