use bunki::prelude::*;
use clap::Parser;
use std::fs;
use std::time::Instant;

/// Inspects and validates branching dialogue graph assets
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to the graph asset file
    asset_path: Option<String>,

    /// Read the asset as bincode bytes instead of JSON
    #[arg(short, long)]
    binary: bool,

    /// Only validate the asset, without printing the document summary
    #[arg(short, long)]
    check: bool,
}

fn main() {
    let cli = Cli::parse();
    let asset_path = cli
        .asset_path
        .unwrap_or_else(|| exit_with_error("An asset path is required."));

    let total_start = Instant::now();

    // --- 1. Asset Loading ---
    let load_start = Instant::now();
    let asset = if cli.binary {
        let bytes = fs::read(&asset_path).unwrap_or_else(|e| {
            exit_with_error(&format!(
                "Failed to read asset file '{}': {}",
                &asset_path, e
            ))
        });
        GraphAsset::from_bytes(&bytes)
            .unwrap_or_else(|e| exit_with_error(&format!("Failed to decode asset: {}", e)))
    } else {
        GraphAsset::from_file(&asset_path)
            .unwrap_or_else(|e| exit_with_error(&format!("Failed to load asset: {}", e)))
    };
    let load_duration = load_start.elapsed();

    // --- 2. Reconstruction ---
    // Rebuilding the document runs the full corruption checks; a rejected
    // asset exits here with the detail string.
    let rebuild_start = Instant::now();
    let document =
        deserialize(asset).unwrap_or_else(|e| exit_with_error(&format!("Asset rejected: {}", e)));
    let rebuild_duration = rebuild_start.elapsed();

    println!("Asset '{}' is structurally sound.", asset_path);
    if cli.check {
        println!("Checked in {:?}.", load_duration + rebuild_duration);
        return;
    }

    // --- 3. Document Summary ---
    print_summary(&document);

    println!("\n--- Performance Summary ---");
    println!("Asset Loading:   {:?}", load_duration);
    println!("Reconstruction:  {:?}", rebuild_duration);
    println!("---------------------------");
    println!("Total Execution: {:?}", total_start.elapsed());
    println!();
}

fn print_summary(document: &GraphDocument) {
    println!("\n--- Document Summary ---");
    println!("Nodes:       {}", document.node_count());
    println!("Groups:      {}", document.group_count());
    println!("Connections: {}", document.connections().len());

    let mut groups: Vec<_> = document.groups().collect();
    groups.sort_by(|a, b| a.name.cmp(&b.name));
    for group in groups {
        let members = document
            .group_members(&group.id)
            .map(|members| members.len())
            .unwrap_or(0);
        println!("\n[{}] ({} nodes)", group.name, members);
        for node in document.group_members(&group.id).unwrap_or_default() {
            print_node(node);
        }
    }

    let ungrouped = document.ungrouped_nodes();
    if !ungrouped.is_empty() {
        println!("\n[ungrouped] ({} nodes)", ungrouped.len());
        for node in ungrouped {
            print_node(node);
        }
    }
}

fn print_node(node: &NodeModel) {
    let chain_links = node.conditional_ports().count();
    let fields = node.all_ports().filter(|port| port.is_field()).count();
    print!(
        "  {} <{}> - {} in / {} out",
        node.name,
        node.kind,
        node.inputs.len(),
        node.outputs.len()
    );
    if chain_links > 0 {
        print!(", {} chain links", chain_links);
    }
    if fields > 0 {
        print!(", {} fields", fields);
    }
    println!();
}

fn exit_with_error(message: &str) -> ! {
    eprintln!("\nError: {}", message);
    std::process::exit(1);
}
