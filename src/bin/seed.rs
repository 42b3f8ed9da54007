use campus_hub::{
    domain::{Category, Collection},
    source::SqliteRecordSource,
};
use chrono::{Duration, SecondsFormat, Utc};
use clap::Parser;
use fake::{
    faker::{
        internet::en::SafeEmail,
        lorem::en::{Paragraph, Sentence},
        name::en::Name,
        phone_number::en::PhoneNumber,
    },
    Fake,
};
use rand::{seq::SliceRandom, Rng};
use serde_json::{json, Value};
use sqlx::sqlite::SqlitePoolOptions;
use uuid::Uuid;

const CLUB_NAMES: [&str; 12] = [
    "Chess Club",
    "Robotics Society",
    "Debate Union",
    "Film Circle",
    "Football Club",
    "Photography Club",
    "Literary Society",
    "Dance Collective",
    "Coding Club",
    "Quiz Society",
    "Music Ensemble",
    "Entrepreneurship Cell",
];

const VENUES: [&str; 6] = [
    "Main Auditorium",
    "Lecture Hall 2",
    "Innovation Lab",
    "Sports Complex",
    "Library Atrium",
    "Open Air Theatre",
];

const ROLES: [&str; 5] = ["President", "Vice President", "Secretary", "Treasurer", "Coordinator"];
const SECTIONS: [&str; 3] = ["Core Team", "Technical Team", "Outreach Team"];

#[derive(Parser, Debug)]
#[command(about = "Fill the local record store with sample campus data")]
struct Args {
    /// SQLite URL of the record store
    #[arg(long, default_value = "sqlite://campus_hub.db?mode=rwc")]
    database_url: String,

    /// Number of clubs to create (at most 12)
    #[arg(long, default_value_t = 8)]
    clubs: usize,

    /// Events created per club
    #[arg(long, default_value_t = 6)]
    events_per_club: usize,

    /// Team members to create
    #[arg(long, default_value_t = 10)]
    team_members: usize,

    /// Announcements to create
    #[arg(long, default_value_t = 30)]
    announcements: usize,

    /// Delete existing records first
    #[arg(long)]
    reset: bool,
}

fn new_id() -> String {
    Uuid::new_v4().to_string()
}

fn timestamp(offset: Duration) -> String {
    (Utc::now() + offset).to_rfc3339_opts(SecondsFormat::Secs, true)
}

fn club_record(name: &str, category: Category) -> Value {
    let slug = name.to_lowercase().replace(' ', "");
    let short_description: String = Sentence(6..12).fake();
    let about: String = Paragraph(3..5).fake();
    let email: String = SafeEmail().fake();
    let phone: String = PhoneNumber().fake();
    json!({
        "_id": new_id(),
        "clubName": name,
        "category": category.as_str(),
        "shortDescription": short_description,
        "aboutSection": about,
        "contactEmail": email,
        "contactPhone": phone,
        "instagramLink": format!("https://instagram.com/{}", slug),
        "linkedInLink": format!("https://linkedin.com/company/{}", slug),
    })
}

fn event_record(rng: &mut impl Rng, club: &str, category: Category) -> Value {
    let title: String = Sentence(2..5).fake();
    let description: String = Paragraph(2..4).fake();
    let mut event = json!({
        "_id": new_id(),
        "eventName": title.trim_end_matches('.'),
        "venue": VENUES.choose(rng).copied().unwrap_or("Main Auditorium"),
        "category": category.as_str(),
        "organizingClubName": club,
        "description": description,
    });
    // A few events are announced before a date is fixed.
    if rng.gen_ratio(9, 10) {
        event["eventDateTime"] = json!(timestamp(Duration::days(rng.gen_range(-120..120))));
    }
    if rng.gen_bool(0.5) {
        event["registrationLink"] = json!(format!("https://forms.example.edu/{}", Uuid::new_v4()));
    }
    event
}

fn team_member_record(rng: &mut impl Rng) -> Value {
    let full_name: String = Name().fake();
    json!({
        "_id": new_id(),
        "fullName": full_name,
        "role": ROLES.choose(rng).copied().unwrap_or("Coordinator"),
        "teamSection": SECTIONS.choose(rng).copied().unwrap_or("Core Team"),
        "linkedInProfile": format!("https://linkedin.com/in/{}", full_name.to_lowercase().replace(' ', "-")),
    })
}

fn announcement_record(rng: &mut impl Rng) -> Value {
    let title: String = Sentence(3..7).fake();
    let content: String = Paragraph(2..5).fake();
    let author: String = Name().fake();
    let mut announcement = json!({
        "_id": new_id(),
        "title": title.trim_end_matches('.'),
        "content": content,
        "author": author,
        "isUrgent": rng.gen_ratio(1, 5),
    });
    if rng.gen_ratio(19, 20) {
        announcement["publishDate"] = json!(timestamp(-Duration::hours(rng.gen_range(1..24 * 90))));
    }
    announcement
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    println!("🌱 Starting record store seeding...");

    let db_pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect(&args.database_url)
        .await?;

    let store = SqliteRecordSource::new(db_pool);

    // Run migrations first
    println!("📋 Running migrations...");
    store.migrate().await?;

    if args.reset {
        for collection in Collection::ALL {
            store.clear(collection).await?;
        }
        println!("  🧹 Cleared existing records");
    }

    let mut rng = rand::thread_rng();

    // Seed clubs and their events
    println!("🏛️  Creating clubs and events...");
    let clubs = args.clubs.min(CLUB_NAMES.len());
    for name in CLUB_NAMES.iter().take(clubs) {
        let category = Category::ALL.choose(&mut rng).copied().unwrap_or(Category::Social);
        store.insert(Collection::Clubs, &club_record(name, category)).await?;

        for _ in 0..args.events_per_club {
            let record = event_record(&mut rng, name, category);
            store.insert(Collection::Events, &record).await?;
        }
    }
    println!("  ✅ Created {} clubs with {} events each", clubs, args.events_per_club);

    // Seed team members
    println!("👥 Creating team members...");
    for _ in 0..args.team_members {
        store.insert(Collection::TeamMembers, &team_member_record(&mut rng)).await?;
    }
    println!("  ✅ Created {} team members", args.team_members);

    // Seed announcements
    println!("📣 Creating announcements...");
    for _ in 0..args.announcements {
        store.insert(Collection::Announcements, &announcement_record(&mut rng)).await?;
    }
    println!("  ✅ Created {} announcements", args.announcements);

    println!("\n✨ Seeding complete!");
    for collection in Collection::ALL {
        println!("  {}: {}", collection.as_str(), store.count(collection).await?);
    }

    Ok(())
}
