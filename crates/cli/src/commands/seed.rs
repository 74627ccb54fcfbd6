//! Seed the hosted data store with a small sample catalog.

use rust_decimal::Decimal;

use makan_core::{HawkerId, ItemCode, StallId};
use makan_storefront::foodstore::{DishRecord, HawkerRecord, StallRecord, StoreClient};

struct SeedDish {
    code: &'static str,
    name: &'static str,
    price_cents: i64,
    description: &'static str,
}

struct SeedStall {
    id: i32,
    hawker_id: i32,
    name: &'static str,
    cuisine: &'static str,
    dishes: &'static [SeedDish],
}

const HAWKERS: &[(i32, &str, &str)] = &[
    (1, "Maxwell Food Centre", "1 Kadayanallur St, Singapore 069184"),
    (2, "Old Airport Road Food Centre", "51 Old Airport Rd, Singapore 390051"),
];

const STALLS: &[SeedStall] = &[
    SeedStall {
        id: 10,
        hawker_id: 1,
        name: "Tian Tian Chicken Rice",
        cuisine: "chicken rice",
        dishes: &[
            SeedDish {
                code: "A",
                name: "Steamed Chicken Rice",
                price_cents: 500,
                description: "The classic plate.",
            },
            SeedDish {
                code: "B",
                name: "Roasted Chicken Rice",
                price_cents: 550,
                description: "Crispy skin, same fragrant rice.",
            },
        ],
    },
    SeedStall {
        id: 11,
        hawker_id: 1,
        name: "Maxwell Fuzhou Oyster Cake",
        cuisine: "snacks",
        dishes: &[SeedDish {
            code: "OC1",
            name: "Oyster Cake",
            price_cents: 300,
            description: "Deep-fried, prawn and oyster filling.",
        }],
    },
    SeedStall {
        id: 20,
        hawker_id: 2,
        name: "Nam Sing Hokkien Fried Mee",
        cuisine: "noodles",
        dishes: &[SeedDish {
            code: "HM-L",
            name: "Hokkien Mee (Large)",
            price_cents: 600,
            description: "Wok hei, no shortcuts.",
        }],
    },
];

/// Push the sample catalog.
///
/// # Errors
///
/// Returns an error if configuration is missing or any write fails.
pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = super::foodstore_config()?;
    let store = StoreClient::new(&config);

    for (id, name, address) in HAWKERS {
        let record = HawkerRecord {
            name: (*name).to_owned(),
            address: (*address).to_owned(),
            description: String::new(),
        };
        store.put_hawker(HawkerId::new(*id), &record).await?;
        tracing::info!(hawker = name, "seeded hawker centre");
    }

    for stall in STALLS {
        let record = StallRecord {
            name: stall.name.to_owned(),
            hawker_id: HawkerId::new(stall.hawker_id),
            cuisine: stall.cuisine.to_owned(),
            description: String::new(),
            open: true,
        };
        store.put_stall(StallId::new(stall.id), &record).await?;

        for dish in stall.dishes {
            let code = ItemCode::parse(dish.code)?;
            let record = DishRecord {
                name: dish.name.to_owned(),
                unit_price: Decimal::new(dish.price_cents, 2),
                description: dish.description.to_owned(),
                available: true,
            };
            store.put_dish(StallId::new(stall.id), &code, &record).await?;
        }
        tracing::info!(stall = stall.name, dishes = stall.dishes.len(), "seeded stall");
    }

    tracing::info!("sample catalog seeded");
    Ok(())
}
