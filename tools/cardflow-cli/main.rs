use cardflow::prelude::*;
use clap::Parser;
use std::fs;
use std::io::{self, Write};
use std::time::Instant;
use tracing_subscriber::EnvFilter;

/// Loads a saved card board and prints every card's value
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to the exported flow JSON file
    flow_path: Option<String>,

    /// Optional path to a store config JSON file
    #[arg(short, long)]
    config: Option<String>,

    /// Also print the formula behind every Result card
    #[arg(short, long)]
    formulas: bool,

    /// Print the value table as JSON instead of a text table
    #[arg(long)]
    json: bool,

    /// Run in interactive mode to be prompted for inputs
    #[arg(short = 'i', long, help = "Run in interactive 'human' mode")]
    human: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    if cli.human {
        run_interactive();
    } else {
        let flow_path = cli.flow_path.unwrap_or_else(|| {
            exit_with_error("Flow path is required in non-interactive mode.");
        });
        run_evaluation(&flow_path, cli.config.as_deref(), cli.formulas, cli.json);
    }
}

fn run_evaluation(flow_path: &str, config_path: Option<&str>, formulas: bool, json: bool) {
    let total_start = Instant::now();

    // --- 1. Configuration ---
    let config = match config_path {
        Some(path) => {
            let text = fs::read_to_string(path).unwrap_or_else(|e| {
                exit_with_error(&format!("Failed to read config file '{}': {}", path, e))
            });
            StoreConfig::from_json(&text)
                .unwrap_or_else(|e| exit_with_error(&format!("{}", e)))
        }
        None => StoreConfig::default(),
    };

    // --- 2. Loading ---
    let load_start = Instant::now();
    let flow_json = fs::read_to_string(flow_path).unwrap_or_else(|e| {
        exit_with_error(&format!("Failed to read flow file '{}': {}", flow_path, e))
    });
    let mut store = GraphStore::builder().with_config(config).build();
    let snapshot = store
        .load_json(&flow_json)
        .unwrap_or_else(|e| exit_with_error(&format!("{}", e)));
    let load_duration = load_start.elapsed();

    let mut ids: Vec<&NodeId> = store.nodes().keys().collect();
    ids.sort_by_key(|id| natural_key(id));

    // --- 3. Output ---
    if json {
        let table: serde_json::Map<String, serde_json::Value> = ids
            .iter()
            .map(|id| {
                let value = store
                    .value(id)
                    .and_then(serde_json::Number::from_f64)
                    .map_or(serde_json::Value::Null, serde_json::Value::Number);
                (id.to_string(), value)
            })
            .collect();
        let output = serde_json::to_string_pretty(&table)
            .unwrap_or_else(|e| exit_with_error(&format!("Failed to encode values: {}", e)));
        println!("{}", output);
        return;
    }

    if let Some(name) = &snapshot.project_name {
        println!("\nProject: {}", name);
    }
    println!("\n--- Values ---");
    for id in &ids {
        let Some(node) = store.node(id) else {
            continue;
        };
        let label = node.title.as_deref().unwrap_or("");
        println!(
            "  {:<6} {:<7} {:>14}  {}",
            id.as_str(),
            type_label(node.node_type()),
            format_value(store.value(id)),
            label
        );
    }

    if formulas {
        println!("\n--- Formulas ---");
        for id in ids.iter().filter(|id| store.node(id).is_some_and(Node::is_result)) {
            match store.formula(id) {
                Some(formula) => println!(
                    "  {} = {}  ->  {}",
                    id,
                    formula,
                    format_value(store.value(id))
                ),
                None => println!("  {} = (no linear chain)", id),
            }
        }
    }

    println!("\n--- Summary ---");
    println!("Cards:           {}", store.nodes().len());
    println!("Connections:     {}", store.edges().len());
    println!("Load + Evaluate: {:?}", load_duration);
    println!("Total Execution: {:?}", total_start.elapsed());
    println!();
}

/// Runs the CLI in an interactive, human-friendly mode with prompts.
fn run_interactive() {
    println!("--- Cardflow Interactive Mode ---");

    let flow_path = prompt_for_input("Enter flow path", Some("data/flow.json"));
    let config_path = prompt_for_input("Enter config path (optional)", None);
    let formulas = prompt_for_input("Show formulas? (y/n)", Some("y"));

    let config_path = (!config_path.is_empty()).then_some(config_path);
    run_evaluation(
        &flow_path,
        config_path.as_deref(),
        formulas.eq_ignore_ascii_case("y"),
        false,
    );
}

fn type_label(node_type: NodeType) -> &'static str {
    match node_type {
        NodeType::Source => "source",
        NodeType::Step => "step",
        NodeType::Result => "result",
    }
}

fn natural_key(id: &NodeId) -> (Option<u64>, String) {
    let digits = id.as_str().trim_start_matches(|c: char| !c.is_ascii_digit());
    (digits.parse().ok(), id.to_string())
}

/// A helper function to prompt the user and read a line of input.
fn prompt_for_input(prompt_text: &str, default: Option<&str>) -> String {
    let mut line = String::new();
    let default_prompt = default.map_or("".to_string(), |d| format!(" [default: {}]", d));

    print!("> {}{}: ", prompt_text, default_prompt);
    if let Err(e) = io::stdout().flush() {
        exit_with_error(&format!("Failed to flush stdout: {}", e));
    }
    if let Err(e) = io::stdin().read_line(&mut line) {
        exit_with_error(&format!("Failed to read line: {}", e));
    }
    let trimmed = line.trim().to_string();

    if trimmed.is_empty() {
        default.unwrap_or("").to_string()
    } else {
        trimmed
    }
}

fn exit_with_error(message: &str) -> ! {
    eprintln!("\nError: {}", message);
    std::process::exit(1);
}
