//! Seed the database with demo shops and products.
//!
//! Creates a handful of shopkeeper accounts around the Supela market area,
//! each with a shop and a small product catalog, so the locator and the
//! price comparison pages have data to show during local development.
//!
//! All seeded accounts use the email domain `@demo.pricelens.dev` and the
//! password `pricelens-demo`, and `--reset` removes them (shops and products
//! cascade) before re-inserting.

use rust_decimal::Decimal;
use secrecy::SecretString;
use sqlx::PgPool;

use pricelens_core::{Coordinate, Price, Role};
use pricelens_web::db::{ProductInput, ProductRepository, ShopInput, ShopRepository};
use pricelens_web::services::{AuthError, AuthService};

const DEMO_EMAIL_DOMAIN: &str = "demo.pricelens.dev";
const DEMO_PASSWORD: &str = "pricelens-demo";

struct DemoShop {
    keeper: &'static str,
    shop: &'static str,
    address: &'static str,
    contact: &'static str,
    category: &'static str,
    location: Option<Coordinate>,
    products: &'static [(&'static str, &'static str, i64)],
}

/// Demo shops around the Supela market, Bhilai.
fn demo_shops() -> Vec<DemoShop> {
    vec![
        DemoShop {
            keeper: "Ramesh Sahu",
            shop: "Sahu Electronics",
            address: "Shop 12, Supela Market, Bhilai",
            contact: "+91 98261 00001",
            category: "Electronics",
            location: Some(Coordinate::new(21.2095, 81.3062)),
            products: &[
                ("iPhone 14", "Mobiles", 75_000),
                ("Samsung Galaxy S23", "Mobiles", 68_500),
                ("boAt Airdopes 141", "Audio", 1_299),
            ],
        },
        DemoShop {
            keeper: "Kavita Verma",
            shop: "Verma Mobile Point",
            address: "Nehru Nagar East, Bhilai",
            contact: "+91 98261 00002",
            category: "Electronics",
            location: Some(Coordinate::new(21.2138, 81.3205)),
            products: &[
                ("iPhone 14", "Mobiles", 80_000),
                ("Redmi Note 13", "Mobiles", 17_999),
                ("boAt Airdopes 141", "Audio", 1_199),
            ],
        },
        DemoShop {
            keeper: "Arun Dewangan",
            shop: "Dewangan Kirana Store",
            address: "Power House Road, Supela",
            contact: "+91 98261 00003",
            category: "Grocery",
            location: Some(Coordinate::new(21.2051, 81.3011)),
            products: &[
                ("Fortune Sunflower Oil 1L", "Grocery", 145),
                ("Tata Salt 1kg", "Grocery", 28),
            ],
        },
        DemoShop {
            keeper: "Meena Yadav",
            shop: "Yadav General Store",
            address: "Farid Nagar, Supela",
            contact: "",
            category: "Grocery",
            location: None,
            products: &[
                ("Fortune Sunflower Oil 1L", "Grocery", 139),
                ("Aashirvaad Atta 5kg", "Grocery", 260),
            ],
        },
    ]
}

/// Seed the database with demo data.
///
/// Idempotent: a keeper account that already exists is skipped rather than
/// duplicated. With `reset`, previously seeded accounts are deleted first.
///
/// # Errors
///
/// Returns an error if `PRICELENS_DATABASE_URL` is unset or a database
/// operation fails.
pub async fn run(reset: bool) -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let database_url = std::env::var("PRICELENS_DATABASE_URL")
        .map(SecretString::from)
        .map_err(|_| "PRICELENS_DATABASE_URL not set")?;

    let pool = pricelens_web::db::create_pool(&database_url).await?;
    tracing::info!("Connected to database");

    if reset {
        let deleted = sqlx::query("DELETE FROM pricelens.users WHERE email LIKE $1")
            .bind(format!("%@{DEMO_EMAIL_DOMAIN}"))
            .execute(&pool)
            .await?
            .rows_affected();
        tracing::info!(deleted, "Removed previously seeded accounts");
    }

    let mut shops_created = 0_u32;
    let mut products_created = 0_u32;

    for demo in demo_shops() {
        match seed_shop(&pool, &demo).await? {
            Some(count) => {
                shops_created += 1;
                products_created += count;
            }
            None => {
                tracing::info!(shop = demo.shop, "Already seeded, skipping");
            }
        }
    }

    tracing::info!(shops_created, products_created, "Seeding complete!");
    Ok(())
}

/// Create one demo keeper with their shop and products.
///
/// Returns `None` if the keeper account already exists.
async fn seed_shop(
    pool: &PgPool,
    demo: &DemoShop,
) -> Result<Option<u32>, Box<dyn std::error::Error>> {
    let email = demo_email(demo.keeper);

    let keeper = match AuthService::new(pool)
        .register(
            &email,
            DEMO_PASSWORD,
            demo.keeper,
            None,
            Role::Shopkeeper,
        )
        .await
    {
        Ok(user) => user,
        Err(AuthError::UserAlreadyExists) => return Ok(None),
        Err(e) => return Err(e.into()),
    };

    let shop = ShopRepository::new(pool)
        .create(
            keeper.id,
            &ShopInput {
                name: demo.shop.to_owned(),
                address: demo.address.to_owned(),
                contact: demo.contact.to_owned(),
                category: demo.category.to_owned(),
                location: demo.location,
            },
        )
        .await?;

    let products = ProductRepository::new(pool);
    let mut count = 0_u32;
    for &(name, category, rupees) in demo.products {
        let price = Price::new(Decimal::from(rupees))?;
        products
            .create(
                shop.id,
                &ProductInput {
                    name: name.to_owned(),
                    category: category.to_owned(),
                    price,
                    description: None,
                    image_url: None,
                },
            )
            .await?;
        count += 1;
    }

    tracing::info!(shop = demo.shop, products = count, "Seeded shop");
    Ok(Some(count))
}

/// Derive a stable demo email from a keeper name.
fn demo_email(keeper: &str) -> String {
    let local: String = keeper
        .to_lowercase()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '.' })
        .collect();
    format!("{local}@{DEMO_EMAIL_DOMAIN}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_email_is_lowercased_and_dotted() {
        assert_eq!(demo_email("Ramesh Sahu"), "ramesh.sahu@demo.pricelens.dev");
    }

    #[test]
    fn demo_shops_have_products() {
        for shop in demo_shops() {
            assert!(!shop.products.is_empty(), "{} has no products", shop.shop);
        }
    }
}
