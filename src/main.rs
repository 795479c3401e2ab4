mod tracing_setup;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use tracing::{error, info, warn};

use project_staffing::models::{AssignmentOutcome, NewProject, parse_iso_date};
use project_staffing::{Database, ErrorKind, Fixtures, SeedOutcome, StaffingError, config, db};

#[derive(Parser)]
#[command(
    name = "staffing",
    version,
    about = "Seed and validate the client / employee / project staffing database"
)]
struct Cli {
    /// Enable debug logging, including SQL statements
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Check that the database is reachable
    Ping,
    /// Create the schema and the four tables if they do not exist
    InitSchema,
    /// Insert fixture clients and employees into empty tables
    Seed {
        /// TOML fixture file (defaults to the built-in demo data)
        #[arg(long)]
        fixtures: Option<PathBuf>,
    },
    /// Create a project led by a manager with no overlapping projects
    CreateProject(CreateProjectArgs),
    /// Assign an employee to a project
    Assign {
        /// Employee id
        #[arg(long)]
        employee: String,
        /// Project id
        #[arg(long)]
        project: i32,
    },
    /// Create the tables, seed them and replay the fixture's projects and assignments
    Demo {
        /// TOML fixture file (defaults to the built-in demo data)
        #[arg(long)]
        fixtures: Option<PathBuf>,
    },
}

#[derive(Args)]
struct CreateProjectArgs {
    #[arg(long)]
    title: String,
    #[arg(long)]
    description: Option<String>,
    /// First day of the project (YYYY-MM-DD)
    #[arg(long, value_parser = parse_iso_date)]
    start: NaiveDate,
    /// Last day of the project (YYYY-MM-DD)
    #[arg(long, value_parser = parse_iso_date)]
    end: NaiveDate,
    #[arg(long)]
    budget: f64,
    /// Id of the client that owns the project
    #[arg(long)]
    client: String,
    /// Id of the leading employee, who must be a manager
    #[arg(long)]
    lead: String,
}

impl From<CreateProjectArgs> for NewProject {
    fn from(args: CreateProjectArgs) -> Self {
        NewProject {
            title: args.title,
            description: args.description,
            start_date: args.start,
            end_date: args.end,
            budget: args.budget,
            client_id: args.client,
            lead_id: args.lead,
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(err) = tracing_setup::init_tracing(cli.debug) {
        eprintln!("Failed to initialize logging: {err}");
    }

    match run(cli.command).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            error!("{err:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(command: Command) -> Result<bool> {
    let config = config::init().context("failed to load configuration")?;
    let db = db::init(&config)
        .await
        .context("failed to connect to the database")?;

    let result = dispatch(&db, command).await;

    db.close().await;
    result
}

async fn dispatch(db: &Database, command: Command) -> Result<bool> {
    match command {
        Command::Ping => {
            println!("Database is reachable.");
            Ok(true)
        }
        Command::InitSchema => {
            db.create_schema()
                .await
                .context("failed to create tables")?;
            Ok(true)
        }
        Command::Seed { fixtures } => {
            let fixtures = load_fixtures(fixtures)?;
            Ok(seed(db, &fixtures).await)
        }
        Command::CreateProject(args) => Ok(create_project(db, &args.into()).await.is_some()),
        Command::Assign { employee, project } => Ok(assign(db, &employee, project).await),
        Command::Demo { fixtures } => {
            let fixtures = load_fixtures(fixtures)?;
            run_demo(db, &fixtures).await
        }
    }
}

fn load_fixtures(path: Option<PathBuf>) -> Result<Fixtures> {
    let fixtures = match path {
        Some(path) => Fixtures::load(&path)?,
        None => Fixtures::demo()?,
    };
    Ok(fixtures)
}

/// Create the tables, then replay the fixture. Only a schema failure aborts the run.
async fn run_demo(db: &Database, fixtures: &Fixtures) -> Result<bool> {
    db.create_schema()
        .await
        .context("failed to create tables, aborting")?;

    seed(db, fixtures).await;

    let mut created = 0;
    for project in &fixtures.projects {
        if create_project(db, project).await.is_some() {
            created += 1;
        }
    }

    let mut assigned = 0;
    for assignment in &fixtures.assignments {
        if assign(db, &assignment.employee_id, assignment.project_id).await {
            assigned += 1;
        }
    }

    info!(
        created,
        proposed = fixtures.projects.len(),
        assigned,
        requested = fixtures.assignments.len(),
        "demo finished"
    );
    Ok(true)
}

async fn seed(db: &Database, fixtures: &Fixtures) -> bool {
    let clients = report("seed clients", db.seed_clients(&fixtures.clients).await);
    let employees = report("seed employees", db.seed_employees(&fixtures.employees).await);

    let mut ok = true;
    for (table, outcome) in [("clients", clients), ("employees", employees)] {
        match outcome {
            Some(SeedOutcome::Inserted(count)) => println!("Inserted {count} {table}."),
            Some(SeedOutcome::Skipped { existing }) => {
                println!("{table} already holds {existing} rows, nothing inserted.")
            }
            None => ok = false,
        }
    }
    ok
}

async fn create_project(db: &Database, project: &NewProject) -> Option<i32> {
    info!(title = %project.title, "creating project");
    let created = report("create project", db.create_project(project).await)?;
    println!(
        "Project '{}' (ID: {}) created, lead {} assigned.",
        created.title,
        created.id,
        created.lead_id.as_deref().unwrap_or("-")
    );
    Some(created.id)
}

async fn assign(db: &Database, employee_id: &str, project_id: i32) -> bool {
    match report(
        "assign employee",
        db.assign_employee(employee_id, project_id).await,
    ) {
        Some(AssignmentOutcome::Assigned) => {
            println!("Employee {employee_id} assigned to project {project_id}.");
            true
        }
        Some(AssignmentOutcome::AlreadyAssigned) => {
            println!("Employee {employee_id} was already assigned to project {project_id}.");
            true
        }
        None => false,
    }
}

/// Operation boundary: log a failure and turn the result into an option
fn report<T>(operation: &str, result: Result<T, StaffingError>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(err) => {
            match err.kind() {
                ErrorKind::Unexpected => error!("{operation} failed: {err}"),
                _ => warn!("{operation} rejected: {err}"),
            }
            None
        }
    }
}
