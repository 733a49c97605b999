//! # Menu Seeder
//!
//! Populates the `menu_items` collection with the house menu.
//!
//! ## Usage
//! ```bash
//! # Seed ./platter_dev.db
//! cargo run -p platter-db --bin seed
//!
//! # Specify database path
//! cargo run -p platter-db --bin seed -- --db ./data/platter.db
//!
//! # Or through the environment
//! PLATTER_DATABASE_PATH=./data/platter.db cargo run -p platter-db --bin seed
//! ```
//!
//! Items are upserted by ID, so running the seeder twice refreshes prices
//! and descriptions without creating duplicates.

use std::env;

use platter_core::validation::validate_catalog_item;
use platter_core::CatalogItem;
use platter_db::{Database, DbConfig};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// (id, name, description, price in paise, category, spicy, vegetarian)
type SeedRow = (&'static str, &'static str, &'static str, i64, &'static str, bool, bool);

const MENU: &[SeedRow] = &[
    ("paneer-tikka", "Paneer Tikka", "Cottage cheese cubes marinated in spices and grilled in the tandoor", 24900, "Starters", true, true),
    ("veg-samosa", "Vegetable Samosa", "Crisp pastry filled with spiced potatoes and peas", 8900, "Starters", false, true),
    ("chicken-65", "Chicken 65", "Deep fried chicken tossed with curry leaves and red chilli", 27900, "Starters", true, false),
    ("butter-chicken", "Butter Chicken", "Tandoori chicken simmered in a creamy tomato gravy", 34900, "Popular", false, false),
    ("chicken-biryani", "Chicken Biryani", "Basmati rice layered with chicken and whole spices", 32900, "Popular", true, false),
    ("dal-makhani", "Dal Makhani", "Black lentils slow cooked overnight with butter and cream", 22900, "Main Course", false, true),
    ("palak-paneer", "Palak Paneer", "Cottage cheese in a smooth spinach gravy", 25900, "Main Course", false, true),
    ("rogan-josh", "Rogan Josh", "Kashmiri lamb curry with aromatic spices", 39900, "Main Course", true, false),
    ("butter-naan", "Butter Naan", "Leavened flatbread brushed with butter", 5900, "Main Course", false, true),
    ("gulab-jamun", "Gulab Jamun", "Milk dumplings soaked in rose scented syrup", 9900, "Desserts", false, true),
    ("rasmalai", "Rasmalai", "Soft cheese patties in saffron milk", 12900, "Desserts", false, true),
    ("mango-lassi", "Mango Lassi", "Chilled yoghurt drink blended with Alphonso mango", 9900, "Beverages", false, true),
    ("masala-chai", "Masala Chai", "Spiced milk tea", 4900, "Beverages", false, true),
];

fn menu_item(row: &SeedRow) -> CatalogItem {
    let (id, name, description, price_cents, category, is_spicy, is_vegetarian) = *row;
    CatalogItem {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        price_cents,
        image_url: format!("https://images.platter.example/menu/{}.jpg", id),
        category: category.to_string(),
        is_spicy,
        is_vegetarian,
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,sqlx=warn")),
        )
        .init();

    let args: Vec<String> = env::args().collect();

    let mut db_path =
        env::var("PLATTER_DATABASE_PATH").unwrap_or_else(|_| String::from("./platter_dev.db"));

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Platter Menu Seeder");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>    Database file path (default: ./platter_dev.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    info!(path = %db_path, "Seeding menu");

    let db = Database::new(DbConfig::new(&db_path)).await?;
    let menu = db.menu();

    let mut written = 0;
    for row in MENU {
        let item = menu_item(row);
        if let Err(e) = validate_catalog_item(&item) {
            warn!(id = %item.id, error = %e, "Skipping invalid menu item");
            continue;
        }
        menu.upsert(&item).await?;
        written += 1;
    }

    let total = menu.count().await?;
    info!(written, total, "Menu seeded");

    db.close().await;
    Ok(())
}
