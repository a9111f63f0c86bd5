//! # Recipe Parser Example
//!
//! Parses a Polish diet-plan ingredient list, prints each structured product,
//! converts cataloged units to their base unit and lists the lines that need
//! a human to review them.

use nutrilog_parser::{IngredientParser, Vocabulary};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("🍳 Ingredient Parser Example");
    println!("============================\n");

    let parser = IngredientParser::new(Vocabulary::polish());

    let recipe = r#"
    2 szklanki mąki pszennej
    1 1/2 łyżki cukru
    pół szklanki mleka
    2-3 ząbki czosnku
    200g masła
    ½ łyżeczki soli
    3 jajka
    szczypta pieprzu
    "#;

    let document = parser.parse_document_with_workers(recipe, 2);
    println!("{}", document);

    println!("📏 Base units:");
    for product in document.products() {
        match parser.vocabulary().units.to_base_unit(product.quantity, &product.unit) {
            Some(base) => println!("  • {} → {}", product.original.trim(), base),
            None => println!("  • {} → (no base unit)", product.original.trim()),
        }
    }

    println!("\n🔎 To review:");
    for product in document.products().filter(|p| p.has_custom_unit) {
        println!("  ? {}", product.original.trim());
    }

    println!("\n📦 JSON:");
    println!("{}", serde_json::to_string_pretty(&document)?);

    Ok(())
}
