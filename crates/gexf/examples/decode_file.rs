//! Simple decoder to inspect GEXF files.

use std::fs;

use gexf::{decode_document, Node};

fn format_node(node: &Node) -> String {
    let mut out = format!("node {}", node.id);
    if let Some(label) = &node.label {
        out.push_str(&format!(" \"{}\"", label));
    }
    if let Some(values) = &node.attvalues {
        out.push_str(&format!(" ({} attvalues)", values.len()));
    }
    if let Some(parents) = &node.parents {
        if !parents.is_empty() {
            let ids: Vec<&str> = parents.iter().map(|p| p.for_.as_str()).collect();
            out.push_str(&format!(" parents=[{}]", ids.join(", ")));
        }
    }
    if let Some(pos) = &node.position {
        out.push_str(&format!(" @({}, {}, {})", pos.x, pos.y, pos.z));
    }
    out
}

fn main() {
    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "hello.gexf".to_string());

    println!("Reading: {}", path);

    let data = fs::read(&path).expect("Failed to read file");
    println!("File size: {} bytes", data.len());

    let doc = decode_document(&data).expect("Failed to decode");

    println!("\n=== Meta ===");
    println!(
        "Last modified: {}",
        doc.meta
            .last_modified
            .format()
            .expect("decoded date is always in domain")
    );
    if let Some(creator) = &doc.meta.creator {
        println!("Creator: {}", creator);
    }
    if let Some(keywords) = &doc.meta.keywords {
        println!("Keywords: {}", keywords);
    }
    if let Some(description) = &doc.meta.description {
        println!("Description: {}", description);
    }

    println!("\n=== Graph ===");
    if let Some(mode) = doc.graph.mode {
        println!("Mode: {}", mode);
    }
    if let Some(id_type) = doc.graph.id_type {
        println!("Id type: {}", id_type);
    }
    if let Some(edge_type) = doc.graph.default_edge_type {
        println!("Default edge type: {}", edge_type);
    }
    if let Some(block) = &doc.graph.attributes {
        println!("Declared {} attributes (class {})", block.attributes.len(), block.class);
        for def in &block.attributes {
            match &def.default {
                Some(default) => println!(
                    "  [{}] {} ({}, default {})",
                    def.id, def.title, def.value_type, default
                ),
                None => println!("  [{}] {} ({})", def.id, def.title, def.value_type),
            }
        }
    }

    match &doc.graph.nodes {
        Some(nodes) => {
            println!("\n=== Nodes ({}) ===", nodes.len());
            for node in nodes.iter().take(20) {
                println!("  {}", format_node(node));
            }
            if nodes.len() > 20 {
                println!("  ... and {} more", nodes.len() - 20);
            }
        }
        None => println!("\nNo <nodes> section"),
    }

    match &doc.graph.edges {
        Some(edges) => {
            println!("\n=== Edges ({}) ===", edges.len());
            for edge in edges.iter().take(20) {
                match edge.weight {
                    Some(weight) => println!(
                        "  edge {} {} -> {} (weight {})",
                        edge.id, edge.source, edge.target, weight
                    ),
                    None => println!("  edge {} {} -> {}", edge.id, edge.source, edge.target),
                }
            }
            if edges.len() > 20 {
                println!("  ... and {} more", edges.len() - 20);
            }
        }
        None => println!("\nNo <edges> section"),
    }
}
