//! Demo records loaded into the store at startup

use chrono::{DateTime, Duration, TimeZone, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::models::{
    Account, Category, Destination, Pricing, Post, Role, Transaction, TransactionKind,
};
use crate::pricing::derivations::reward_tier;

/// Demo tourist account
pub const DEMO_TOURIST_EMAIL: &str = "alex@wandr.com";
/// Demo manager account
pub const DEMO_MANAGER_EMAIL: &str = "sarah@resorts.com";

pub struct SeedData {
    pub destinations: Vec<Destination>,
    pub accounts: Vec<Account>,
    pub posts: Vec<Post>,
}

pub fn load() -> SeedData {
    let accounts = accounts();
    let posts = posts(&accounts);
    SeedData {
        destinations: destinations(),
        accounts,
        posts,
    }
}

#[allow(clippy::too_many_arguments)]
fn destination(
    id: &str,
    name: &str,
    location: &str,
    description: &str,
    category: Category,
    rating: Decimal,
    reviews_count: u32,
    image_url: &str,
    pricing: [Decimal; 4],
    max_duration_hours: u32,
    current_visitors: u32,
    avg_visit_duration: Decimal,
    capacity: u32,
) -> Destination {
    let [entry_fee, tour_guide_fee, feeding_fee_per_day, accommodation_fee_per_night] = pricing;
    Destination {
        id: id.to_string(),
        name: name.to_string(),
        location: location.to_string(),
        description: description.to_string(),
        category,
        rating,
        reviews_count,
        image_url: format!("{}?q=80&w=1000&auto=format&fit=crop", image_url),
        images: vec![format!("{}?q=80&w=800", image_url)],
        pricing: Pricing {
            entry_fee,
            tour_guide_fee,
            feeding_fee_per_day,
            accommodation_fee_per_night,
        },
        reviews: Vec::new(),
        max_duration_hours: Decimal::from(max_duration_hours),
        current_visitors,
        avg_visit_duration,
        capacity,
    }
}

fn destinations() -> Vec<Destination> {
    vec![
        destination(
            "a1",
            "Kyoto Bamboo Forest",
            "Kyoto, Japan",
            "Walk through the soaring stalks of bamboo in this serene grove. The sound of the wind rustling the bamboo leaves is one of the \"100 Soundscapes of Japan\". Ideal for meditation and photography.",
            Category::Nature,
            dec!(4.8),
            1240,
            "https://images.unsplash.com/photo-1576082592408-f3534a6b3e2d",
            [dec!(15), dec!(40), dec!(25), dec!(120)],
            4,
            142,
            dec!(2.5),
            500,
        ),
        destination(
            "a2",
            "Santorini Caldera",
            "Santorini, Greece",
            "Famous for its dramatic views, stunning sunsets, and white-washed houses clinging to the cliffs. Experience the ultimate romantic getaway with crystal clear waters.",
            Category::Beach,
            dec!(4.9),
            3500,
            "https://images.unsplash.com/photo-1613395877344-13d4c79e4284",
            [dec!(0), dec!(60), dec!(50), dec!(250)],
            12,
            850,
            dec!(5),
            2000,
        ),
        destination(
            "a3",
            "Machu Picchu",
            "Cusco Region, Peru",
            "A 15th-century Inca citadel, located in the Eastern Cordillera of southern Peru on a 2,430-meter mountain ridge. A mystical journey into history.",
            Category::Historical,
            dec!(4.9),
            5000,
            "https://images.unsplash.com/photo-1526392060635-9d6019884377",
            [dec!(70), dec!(50), dec!(30), dec!(90)],
            6,
            320,
            dec!(4.2),
            2500,
        ),
        destination(
            "a4",
            "Banff National Park",
            "Alberta, Canada",
            "Rocky Mountain peaks, turquoise glacial lakes, a picture-perfect mountain town and village, abundant wildlife and scenic drives come together in Banff National Park.",
            Category::Mountain,
            dec!(4.7),
            2100,
            "https://images.unsplash.com/photo-1532274402911-5a369e4c4bb5",
            [dec!(20), dec!(80), dec!(40), dec!(180)],
            48,
            1200,
            dec!(24),
            10000,
        ),
        destination(
            "a5",
            "Great Barrier Reef",
            "Queensland, Australia",
            "The world's largest coral reef system, composed of over 2,900 individual reefs. A paradise for divers, snorkelers, and marine life enthusiasts looking for vibrant underwater colors.",
            Category::Beach,
            dec!(4.8),
            4200,
            "https://images.unsplash.com/photo-1583212234802-397505436694",
            [dec!(35), dec!(120), dec!(45), dec!(200)],
            8,
            450,
            dec!(6),
            1500,
        ),
        destination(
            "a6",
            "Serengeti National Park",
            "Tanzania",
            "Experience the greatest wildlife spectacle on earth - the Great Migration. Vast plains, ancient predators, and golden sunsets define this ultimate safari destination.",
            Category::Safari,
            dec!(4.9),
            1850,
            "https://images.unsplash.com/photo-1516426122078-c23e76319801",
            [dec!(80), dec!(150), dec!(60), dec!(400)],
            72,
            150,
            dec!(36),
            800,
        ),
        destination(
            "a7",
            "Eiffel Tower",
            "Paris, France",
            "The Iron Lady of Paris. Ascend to the top for breathtaking views of the City of Lights, or enjoy a picnic on the Champ de Mars below.",
            Category::City,
            dec!(4.6),
            12500,
            "https://images.unsplash.com/photo-1543349689-9a4d426bee8e",
            [dec!(25), dec!(40), dec!(80), dec!(220)],
            3,
            2500,
            dec!(2),
            3000,
        ),
        destination(
            "a8",
            "Petra",
            "Ma'an, Jordan",
            "The Rose City, half as old as time. Famous for its rock-cut architecture and water conduit system. Walking through the Siq to reveal the Treasury is an unforgettable moment.",
            Category::Historical,
            dec!(4.9),
            3100,
            "https://images.unsplash.com/photo-1579606038836-e8d1c7d248b8",
            [dec!(70), dec!(60), dec!(20), dec!(80)],
            8,
            600,
            dec!(5.5),
            1000,
        ),
        destination(
            "a9",
            "Times Square",
            "New York City, USA",
            "The Crossroads of the World. Bright lights, Broadway shows, and an energy that never sleeps. A sensory overload of commercial culture and urban life.",
            Category::City,
            dec!(4.4),
            8900,
            "https://images.unsplash.com/photo-1534430480872-3498386e7856",
            [dec!(0), dec!(30), dec!(100), dec!(350)],
            2,
            5000,
            dec!(1.5),
            6000,
        ),
    ]
}

fn seed_date(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 12, 0, 0)
        .single()
        .unwrap_or_default()
}

fn account(id: &str, name: &str, email: &str, avatar_seed: &str, likes: u32, role: Role) -> Account {
    Account {
        id: id.to_string(),
        name: name.to_string(),
        email: email.to_string(),
        avatar: format!("https://picsum.photos/seed/{}/100/100", avatar_seed),
        role,
        total_likes_received: likes,
        wallet_balance: Decimal::ZERO,
        transactions: Vec::new(),
    }
}

fn accounts() -> Vec<Account> {
    let mut alex = account("u1", "Alex Wanderer", DEMO_TOURIST_EMAIL, "user1", 850, Role::Tourist);
    alex.wallet_balance = dec!(450);
    alex.transactions = vec![
        Transaction {
            id: "t2".to_string(),
            kind: TransactionKind::Payment,
            amount: dec!(50),
            description: "Booking: Kyoto Bamboo Forest".to_string(),
            created_at: seed_date(2023, 10, 15),
        },
        Transaction {
            id: "t1".to_string(),
            kind: TransactionKind::Deposit,
            amount: dec!(500),
            description: "Initial Deposit".to_string(),
            created_at: seed_date(2023, 10, 12),
        },
    ];

    let mut sarah = account("m1", "Sarah Manager", DEMO_MANAGER_EMAIL, "manager1", 0, Role::Manager);
    sarah.wallet_balance = dec!(1000);

    vec![
        alex,
        sarah,
        account("u2", "Sarah Jenkins", "sarah@test.com", "u2", 1200, Role::Tourist),
        account("u3", "Kenji M.", "kenji@test.com", "u3", 320, Role::Tourist),
        account("u4", "Elena G.", "elena@test.com", "u4", 45, Role::Tourist),
    ]
}

fn posts(accounts: &[Account]) -> Vec<Post> {
    let now = Utc::now();
    let entries = [
        ("p1", "a1", "u2", "photo-1528360983277-13d9b152c6d1", "The morning light through the bamboo is absolutely magical. #ZenMode", 124, Duration::hours(2)),
        ("p2", "a1", "u3", "photo-1493976040374-85c8e12f0c0e", "Found a quiet spot away from the crowd. So peaceful.", 89, Duration::hours(5)),
        ("p3", "a2", "u4", "photo-1533105079780-92b9be482077", "Sunset in Oia. Nothing compares.", 432, Duration::days(1)),
        ("p4", "a6", "u2", "photo-1516426122078-c23e76319801", "Witnessed the migration today. Nature is powerful.", 560, Duration::days(3)),
        ("p5", "a7", "u3", "photo-1492136344046-866c85e0bf04", "Picnic by the tower. Cheese, wine, and views.", 210, Duration::days(4)),
    ];

    entries
        .into_iter()
        .filter_map(|(id, destination_id, author_id, photo, caption, likes, age)| {
            let author = accounts.iter().find(|a| a.id == author_id)?;
            Some(Post {
                id: id.to_string(),
                destination_id: destination_id.to_string(),
                account_id: author.id.clone(),
                author_name: author.name.clone(),
                author_avatar: author.avatar.clone(),
                author_tier: reward_tier(author.total_likes_received),
                image_url: format!("https://images.unsplash.com/{}?q=80&w=600", photo),
                caption: caption.to_string(),
                likes,
                created_at: now - age,
            })
        })
        .collect()
}
