//! Seed script for development. Populates an empty store with sample
//! contacts and applications.
//!
//! Usage: `cargo run --bin seed`
//!
//! Reads the same environment as the server (`STORE_BACKEND`,
//! `DATABASE_URL`, ... via .env). Does nothing when data already exists.

use jobtrack::config::AppConfig;
use jobtrack::db;
use jobtrack::models::application::CreateApplication;
use jobtrack::models::contact::{Contact, CreateContact};
use jobtrack::services::{application, contact};
use jobtrack::store::Store;

struct SampleContact {
    name: &'static str,
    company: &'static str,
    position: &'static str,
    email: &'static str,
    relationship: &'static str,
}

const CONTACTS: &[SampleContact] = &[
    SampleContact {
        name: "Priya Natarajan",
        company: "Northwind Labs",
        position: "Technical Recruiter",
        email: "priya.natarajan@northwind.example",
        relationship: "Recruiter",
    },
    SampleContact {
        name: "Marcus Feld",
        company: "Globex",
        position: "Engineering Manager",
        email: "marcus.feld@globex.example",
        relationship: "Hiring Manager",
    },
    SampleContact {
        name: "Lena Ortiz",
        company: "Initech",
        position: "Senior Engineer",
        email: "lena.ortiz@initech.example",
        relationship: "Referral",
    },
];

struct SampleApplication {
    company: &'static str,
    position: &'static str,
    location: &'static str,
    status: &'static str,
    date: &'static str,
    /// Index into `CONTACTS`.
    contact: Option<usize>,
}

const APPLICATIONS: &[SampleApplication] = &[
    SampleApplication {
        company: "Northwind Labs",
        position: "Backend Engineer",
        location: "Remote",
        status: "Phone Screen",
        date: "2024-05-02",
        contact: Some(0),
    },
    SampleApplication {
        company: "Globex",
        position: "Platform Engineer",
        location: "Berlin",
        status: "Interview",
        date: "2024-05-06",
        contact: Some(1),
    },
    SampleApplication {
        company: "Initech",
        position: "Site Reliability Engineer",
        location: "Austin, TX",
        status: "Applied",
        date: "2024-05-09",
        contact: Some(2),
    },
    SampleApplication {
        company: "Umbrella Analytics",
        position: "Data Engineer",
        location: "London",
        status: "Rejected",
        date: "2024-04-18",
        contact: None,
    },
    SampleApplication {
        company: "Hooli",
        position: "Rust Developer",
        location: "Remote",
        status: "Bookmarked",
        date: "2024-05-12",
        contact: None,
    },
];

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "jobtrack=info".into()),
        )
        .init();

    let config = AppConfig::from_env()?;
    let store = db::connect(&config.store).await?;

    println!("=== jobtrack seed ===");

    let contacts = seed_contacts(store.as_ref()).await?;
    seed_applications(store.as_ref(), &contacts).await?;

    println!("\n=== Seed complete! ===");
    Ok(())
}

async fn seed_contacts(store: &dyn Store) -> anyhow::Result<Vec<Contact>> {
    let existing = contact::list(store).await?;
    if !existing.is_empty() {
        println!("[skip] {} contacts already exist", existing.len());
        return Ok(Vec::new());
    }

    let mut created = Vec::with_capacity(CONTACTS.len());
    for sample in CONTACTS {
        let input = CreateContact {
            name: Some(sample.name.to_string()),
            company: Some(sample.company.to_string()),
            position: Some(sample.position.to_string()),
            email: Some(sample.email.to_string()),
            relationship: Some(sample.relationship.to_string()),
            ..Default::default()
        };
        created.push(contact::create(store, input).await?);
    }

    println!("[done] Created {} contacts", created.len());
    Ok(created)
}

async fn seed_applications(store: &dyn Store, contacts: &[Contact]) -> anyhow::Result<()> {
    let existing = application::list(store).await?;
    if !existing.is_empty() {
        println!("[skip] {} applications already exist", existing.len());
        return Ok(());
    }

    for sample in APPLICATIONS {
        let contact_id = sample
            .contact
            .and_then(|index| contacts.get(index))
            .map(|c| c.id.to_string());
        let input = CreateApplication {
            company: Some(sample.company.to_string()),
            position: Some(sample.position.to_string()),
            location: Some(sample.location.to_string()),
            status: Some(sample.status.to_string()),
            application_date: Some(sample.date.to_string()),
            contact_id,
            ..Default::default()
        };
        application::create(store, input).await?;
    }

    println!("[done] Created {} applications", APPLICATIONS.len());
    Ok(())
}
