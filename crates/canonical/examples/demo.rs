use canonical::{canonicalize, ensure_narrative, RewriteConfig};
use serde_json::json;

fn main() {
    let generated = json!({
        "Title": "IKEA Kallax Shelf Unit",
        "Subtitle": "Ikea storage for small rooms",
        "highlight_1": "ikea's modular cubes",
        "description_paragraph_1": "A flat-pack shelf from ikea.",
        "description_paragraph_2": "  ",
        "description_paragraph_3": "Assembly takes about thirty minutes."
    });

    let mut out = canonicalize(generated, "IKEA", &RewriteConfig::default());
    ensure_narrative(&mut out.document);

    println!("canonical brand: {}", out.canonical_brand);
    println!("replacements: {:?}", out.report);
    println!();
    match serde_json::to_string_pretty(&out.document) {
        Ok(pretty) => println!("{pretty}"),
        Err(err) => eprintln!("failed to render document: {err}"),
    }
}
