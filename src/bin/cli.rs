//! Terminal client for a running jobtrack server.
//!
//! Usage: `jobtrack-cli [--api-url URL] <command>`

use anyhow::{bail, Result};
use clap::{Args, Parser, Subcommand};
use jobtrack::client::ApiClient;
use jobtrack::models::application::{Application, ApplicationStatus};
use jobtrack::models::contact::{Contact, Relationship};
use jobtrack::views::badge::{relationship_variant, status_variant, Variant};
use jobtrack::views::detail::{self, ApplicationDetail, ContactDetail, ViewError};
use jobtrack::views::forms::{ApplicationForm, ContactForm};
use jobtrack::views::listing::{ApplicationsList, ContactsList};
use jobtrack::views::{ApplicationQuery, ApplicationSort, ContactQuery, ContactSort, Filter};

#[derive(Parser)]
#[command(name = "jobtrack-cli")]
#[command(about = "Track job applications and professional contacts")]
struct Cli {
    /// Base URL of the jobtrack server
    #[arg(long, env = "API_BASE_URL", default_value = "http://localhost:3000")]
    api_url: String,

    /// Disable colored badges
    #[arg(long)]
    no_color: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show application counts and the most recent applications
    Dashboard,

    /// Manage applications
    #[command(subcommand)]
    Applications(ApplicationCommands),

    /// Manage contacts
    #[command(subcommand)]
    Contacts(ContactCommands),
}

#[derive(Subcommand)]
enum ApplicationCommands {
    /// List applications
    List {
        /// Match company, position or location
        #[arg(short, long, default_value = "")]
        search: String,

        /// Status to keep, or "All"
        #[arg(long, default_value = "All")]
        status: Filter<ApplicationStatus>,

        /// dateDesc, dateAsc, companyAsc, companyDesc or statusAsc
        #[arg(long, default_value = "dateDesc")]
        sort: ApplicationSort,
    },

    /// Show one application with its contact
    Show { id: String },

    /// Add an application
    Add(ApplicationFields),

    /// Change fields of an application; an empty value clears an optional field
    Update {
        id: String,
        #[command(flatten)]
        fields: ApplicationFields,
    },

    /// Delete an application
    Delete { id: String },
}

#[derive(Args)]
struct ApplicationFields {
    #[arg(long)]
    company: Option<String>,
    #[arg(long)]
    position: Option<String>,
    #[arg(long)]
    job_description: Option<String>,
    #[arg(long)]
    job_link: Option<String>,
    #[arg(long)]
    location: Option<String>,
    #[arg(long)]
    salary: Option<String>,
    /// YYYY-MM-DD
    #[arg(long)]
    date: Option<String>,
    #[arg(long)]
    status: Option<String>,
    #[arg(long)]
    next_steps: Option<String>,
    #[arg(long)]
    notes: Option<String>,
    #[arg(long)]
    contact_id: Option<String>,
}

impl ApplicationFields {
    fn apply(self, form: &mut ApplicationForm) {
        let targets = [
            (self.company, &mut form.company),
            (self.position, &mut form.position),
            (self.job_description, &mut form.job_description),
            (self.job_link, &mut form.job_link),
            (self.location, &mut form.location),
            (self.salary, &mut form.salary),
            (self.date, &mut form.application_date),
            (self.status, &mut form.status),
            (self.next_steps, &mut form.next_steps),
            (self.notes, &mut form.notes),
            (self.contact_id, &mut form.contact_id),
        ];
        for (value, slot) in targets {
            if let Some(value) = value {
                *slot = value;
            }
        }
    }
}

#[derive(Subcommand)]
enum ContactCommands {
    /// List contacts
    List {
        /// Match name, company, position or email
        #[arg(short, long, default_value = "")]
        search: String,

        /// Relationship to keep, or "All"
        #[arg(long, default_value = "All")]
        relationship: Filter<Relationship>,

        /// nameAsc, nameDesc, companyAsc, companyDesc or recentAsc
        #[arg(long, default_value = "nameAsc")]
        sort: ContactSort,
    },

    /// Show one contact with related applications
    Show { id: String },

    /// Add a contact
    Add(ContactFields),

    /// Change fields of a contact; an empty value clears an optional field
    Update {
        id: String,
        #[command(flatten)]
        fields: ContactFields,
    },

    /// Delete a contact
    Delete { id: String },
}

#[derive(Args)]
struct ContactFields {
    #[arg(long)]
    name: Option<String>,
    #[arg(long)]
    company: Option<String>,
    #[arg(long)]
    position: Option<String>,
    #[arg(long)]
    email: Option<String>,
    #[arg(long)]
    phone: Option<String>,
    #[arg(long)]
    linked_in: Option<String>,
    #[arg(long)]
    relationship: Option<String>,
    #[arg(long)]
    notes: Option<String>,
    /// YYYY-MM-DD
    #[arg(long)]
    last_contact_date: Option<String>,
}

impl ContactFields {
    fn apply(self, form: &mut ContactForm) {
        let targets = [
            (self.name, &mut form.name),
            (self.company, &mut form.company),
            (self.position, &mut form.position),
            (self.email, &mut form.email),
            (self.phone, &mut form.phone),
            (self.linked_in, &mut form.linked_in),
            (self.relationship, &mut form.relationship),
            (self.notes, &mut form.notes),
            (self.last_contact_date, &mut form.last_contact_date),
        ];
        for (value, slot) in targets {
            if let Some(value) = value {
                *slot = value;
            }
        }
    }
}

struct Output {
    color: bool,
}

impl Output {
    fn badge(&self, text: &str, variant: Variant) -> String {
        if self.color {
            format!("\x1b[{}m{text}\x1b[0m", variant.ansi_code())
        } else {
            text.to_string()
        }
    }

    fn status(&self, status: ApplicationStatus) -> String {
        self.badge(status.as_str(), status_variant(status))
    }

    fn relationship(&self, relationship: Relationship) -> String {
        self.badge(relationship.as_str(), relationship_variant(relationship))
    }

    fn application_row(&self, app: &Application) {
        // Pad before coloring so escape codes do not skew the columns.
        let status = format!("{:<22}", app.status.as_str());
        println!(
            "{:<36}  {:<10}  {}  {:<24}  {}",
            app.id,
            app.application_date.format("%Y-%m-%d"),
            self.badge(&status, status_variant(app.status)),
            truncate(&app.company, 22),
            truncate(&app.position, 30),
        );
    }

    fn contact_row(&self, contact: &Contact) {
        let relationship = format!("{:<15}", contact.relationship.as_str());
        println!(
            "{:<36}  {:<24}  {}  {:<22}  {}",
            contact.id,
            truncate(&contact.name, 22),
            self.badge(&relationship, relationship_variant(contact.relationship)),
            truncate(contact.company.as_deref().unwrap_or("-"), 20),
            contact.email.as_deref().unwrap_or("-"),
        );
    }

    fn application(&self, app: &Application) {
        println!("{} at {}", app.position, app.company);
        println!("ID: {}", app.id);
        println!("Status: {}", self.status(app.status));
        println!("Applied: {}", app.application_date.format("%Y-%m-%d"));
        let optional = [
            ("Location", &app.location),
            ("Salary", &app.salary),
            ("Job link", &app.job_link),
            ("Next steps", &app.next_steps),
            ("Notes", &app.notes),
            ("Description", &app.job_description),
        ];
        for (label, value) in optional {
            if let Some(value) = value {
                println!("{label}: {value}");
            }
        }
    }

    fn contact(&self, contact: &Contact) {
        println!("{}", contact.name);
        println!("ID: {}", contact.id);
        println!("Relationship: {}", self.relationship(contact.relationship));
        let optional = [
            ("Company", &contact.company),
            ("Position", &contact.position),
            ("Email", &contact.email),
            ("Phone", &contact.phone),
            ("LinkedIn", &contact.linked_in),
            ("Notes", &contact.notes),
        ];
        for (label, value) in optional {
            if let Some(value) = value {
                println!("{label}: {value}");
            }
        }
        if let Some(date) = contact.last_contact_date {
            println!("Last contact: {}", date.format("%Y-%m-%d"));
        }
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{kept}...")
    }
}

/// Print a view error with any field messages and turn it into a failure.
fn report(err: ViewError) -> anyhow::Error {
    for field in err.field_errors() {
        eprintln!("  {}: {}", field.field, field.message);
    }
    anyhow::anyhow!("{err}")
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let client = ApiClient::new(cli.api_url);
    let out = Output {
        color: !cli.no_color,
    };

    match cli.command {
        Commands::Dashboard => {
            let dashboard = client.dashboard().await?;
            let stats = &dashboard.stats;
            println!("Total applications: {}", stats.total_applications);
            println!("Applied:            {}", stats.applied);
            println!("Interviews:         {}", stats.interviews);
            println!("Offers:             {}", stats.offers);
            println!("Bookmarked:         {}", stats.bookmarked);
            println!("\nRecent applications");
            if dashboard.recent_applications.is_empty() {
                println!("No applications yet.");
            }
            for app in &dashboard.recent_applications {
                out.application_row(app);
            }
        }

        Commands::Applications(command) => match command {
            ApplicationCommands::List {
                search,
                status,
                sort,
            } => {
                let list = ApplicationsList::load(&client).await;
                if let Some(error) = list.error {
                    bail!(error);
                }
                let query = ApplicationQuery {
                    search,
                    status,
                    sort,
                };
                let outcome = list.view(&query);
                println!("{}  (sorted by {})", outcome.summary_line(), sort.label());
                for app in &outcome.items {
                    out.application_row(app);
                }
            }

            ApplicationCommands::Show { id } => {
                let view = ApplicationDetail::load(&client, &id).await.map_err(report)?;
                out.application(&view.application);
                match &view.contact {
                    Some(contact) => println!(
                        "Contact: {} ({})",
                        contact.name,
                        out.relationship(contact.relationship)
                    ),
                    None if view.application.contact_id.is_some() => {
                        println!("Contact: (no longer available)")
                    }
                    None => {}
                }
            }

            ApplicationCommands::Add(fields) => {
                let mut form = ApplicationForm::default();
                fields.apply(&mut form);
                let app = detail::create_application(&client, &form)
                    .await
                    .map_err(report)?;
                println!("Added application {}", app.id);
            }

            ApplicationCommands::Update { id, fields } => {
                let mut view = ApplicationDetail::load(&client, &id).await.map_err(report)?;
                let mut form = view.edit_form();
                fields.apply(&mut form);
                view.save(&client, &form).await.map_err(report)?;
                out.application(&view.application);
            }

            ApplicationCommands::Delete { id } => {
                let view = ApplicationDetail::load(&client, &id).await.map_err(report)?;
                view.remove(&client).await.map_err(report)?;
                println!("Application removed");
            }
        },

        Commands::Contacts(command) => match command {
            ContactCommands::List {
                search,
                relationship,
                sort,
            } => {
                let list = ContactsList::load(&client).await;
                if let Some(error) = list.error {
                    bail!(error);
                }
                let query = ContactQuery {
                    search,
                    relationship,
                    sort,
                };
                let outcome = list.view(&query);
                println!("{}  (sorted by {})", outcome.summary_line(), sort.label());
                for contact in &outcome.items {
                    out.contact_row(contact);
                }
            }

            ContactCommands::Show { id } => {
                let view = ContactDetail::load(&client, &id).await.map_err(report)?;
                out.contact(&view.contact);
                println!("\nRelated applications: {}", view.applications.len());
                for app in &view.applications {
                    out.application_row(app);
                }
            }

            ContactCommands::Add(fields) => {
                let mut form = ContactForm::default();
                fields.apply(&mut form);
                let contact = detail::create_contact(&client, &form)
                    .await
                    .map_err(report)?;
                println!("Added contact {}", contact.id);
            }

            ContactCommands::Update { id, fields } => {
                let mut view = ContactDetail::load(&client, &id).await.map_err(report)?;
                let mut form = view.edit_form();
                fields.apply(&mut form);
                view.save(&client, &form).await.map_err(report)?;
                out.contact(&view.contact);
            }

            ContactCommands::Delete { id } => {
                let view = ContactDetail::load(&client, &id).await.map_err(report)?;
                view.remove(&client).await.map_err(report)?;
                println!("Contact removed");
            }
        },
    }

    Ok(())
}
