//! # MedConsult CLI
//!
//! Command-line client for the medical consultation service.
//!
//! ## Usage
//!
//! ```bash
//! # Authenticate
//! medconsult login --phone 13800000000 --password secret1
//!
//! # Consult
//! medconsult ask "I have had a headache for three days"
//!
//! # Book an appointment
//! medconsult doctors --department 3
//! medconsult appoint --doctor 12 --date 2025-03-14 --time morning
//! ```

use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use medconsult::api::{
    AppointmentRequest, DoctorRegistration, PasswordChange, ProfileUpdate, UserType,
};
use medconsult::commands::{self, OutputOptions};

/// Account role for login
#[derive(Clone, Debug, ValueEnum)]
pub enum Role {
    Patient,
    Doctor,
}

impl From<Role> for UserType {
    fn from(role: Role) -> Self {
        match role {
            Role::Patient => UserType::Patient,
            Role::Doctor => UserType::Doctor,
        }
    }
}

/// Main CLI structure
#[derive(Parser)]
#[command(name = "medconsult")]
#[command(about = "Client for the medical consultation service", long_about = None)]
#[command(version)]
struct Cli {
    /// Print raw JSON responses
    #[arg(long, global = true)]
    json: bool,
    /// Enable debug logging of requests and responses
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

/// Available CLI commands
#[derive(Subcommand)]
enum Commands {
    /// Log in and store the access token
    Login {
        #[arg(long, short = 'p', value_name = "PHONE")]
        phone: String,
        #[arg(long, value_name = "PASSWORD")]
        password: String,
        #[arg(long, value_enum, default_value = "patient")]
        role: Role,
    },
    /// Create a new account
    Register {
        #[command(subcommand)]
        command: RegisterCommands,
    },
    /// Log out and clear the stored session
    Logout,
    /// Show the currently authenticated user
    Whoami,
    /// View or edit your profile
    Profile {
        #[command(subcommand)]
        command: ProfileCommands,
    },
    /// Ask the medical assistant a question
    Ask {
        /// Your question
        #[arg(value_name = "QUESTION")]
        question: String,
        /// Attach a file (can be specified multiple times)
        #[arg(long = "file", short = 'f', value_name = "PATH")]
        files: Vec<PathBuf>,
        /// Save the question and answer to the consultation history
        #[arg(long)]
        save: bool,
    },
    /// Show the current conversation
    History,
    /// Start a new conversation
    NewChat,
    /// Turn the current conversation into a medical record
    GenerateRecord,
    /// Consultation history and medical records
    Records {
        #[command(subcommand)]
        command: RecordCommands,
    },
    /// List hospital departments
    Departments,
    /// List doctors
    Doctors {
        /// Only doctors from this department
        #[arg(long, short = 'd', value_name = "DEPARTMENT_ID")]
        department: Option<String>,
    },
    /// Book an appointment
    Appoint {
        #[arg(long, value_name = "DOCTOR_ID")]
        doctor: i64,
        /// Date as YYYY-MM-DD
        #[arg(long, value_name = "DATE")]
        date: NaiveDate,
        /// Time slot (e.g. morning, afternoon)
        #[arg(long, value_name = "SLOT")]
        time: String,
        /// Medical record to share with the doctor
        #[arg(long, value_name = "RECORD_ID")]
        record: Option<i64>,
    },
    /// List appointments awaiting confirmation
    Pending,
    /// Show configuration and local session state
    Status,
}

/// Register subcommands
#[derive(Subcommand)]
enum RegisterCommands {
    /// Register as a patient
    Patient {
        #[arg(long, short = 'p')]
        phone: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        full_name: String,
        /// Birth date as YYYY-MM-DD
        #[arg(long)]
        birth_date: NaiveDate,
    },
    /// Register as a doctor (requires a practising certificate image)
    Doctor {
        #[arg(long, short = 'p')]
        phone: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        full_name: String,
        #[arg(long)]
        license_id: String,
        #[arg(long)]
        hospital: String,
        #[arg(long)]
        department: String,
        #[arg(long)]
        title: String,
        #[arg(long, value_name = "PATH")]
        certificate: PathBuf,
    },
}

/// Profile subcommands
#[derive(Subcommand)]
enum ProfileCommands {
    /// Show profile details
    Show,
    /// Update profile fields
    Update {
        #[arg(long)]
        nickname: Option<String>,
        #[arg(long)]
        gender: Option<String>,
        #[arg(long)]
        age: Option<u32>,
    },
    /// Upload a new avatar image
    Avatar {
        #[arg(value_name = "PATH")]
        path: PathBuf,
    },
    /// Change your password
    Password {
        #[arg(long)]
        old: String,
        #[arg(long)]
        new: String,
    },
}

/// Records subcommands
#[derive(Subcommand)]
enum RecordCommands {
    /// Most recent consultation
    Recent,
    /// All consultations
    All,
    /// Structured medical records
    List,
    /// One medical record
    Show {
        #[arg(value_name = "RECORD_ID")]
        id: String,
    },
    /// Save a question/answer pair
    Create {
        #[arg(long)]
        question: String,
        #[arg(long)]
        answer: String,
    },
}

fn init_logging(verbose: bool) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.format_timestamp(None).init();
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let output = OutputOptions { json: cli.json };
    let exit_code = run_command(cli.command, output).await;
    std::process::exit(exit_code);
}

async fn run_command(command: Commands, output: OutputOptions) -> i32 {
    use medconsult::exit_codes::*;

    let result = match command {
        Commands::Login {
            phone,
            password,
            role,
        } => {
            commands::auth::execute_login(commands::auth::LoginArgs {
                phone,
                password,
                user_type: role.into(),
                output,
            })
            .await
        }
        Commands::Register { command } => run_register_command(command, output).await,
        Commands::Logout => commands::auth::execute_logout(output).await,
        Commands::Whoami => commands::profile::execute_whoami(output).await,
        Commands::Profile { command } => run_profile_command(command, output).await,
        Commands::Ask {
            question,
            files,
            save,
        } => {
            commands::ask::execute(commands::ask::AskArgs {
                question,
                files,
                save,
                output,
            })
            .await
        }
        Commands::History => commands::ask::execute_history(output).await,
        Commands::NewChat => commands::ask::execute_new_chat(output).await,
        Commands::GenerateRecord => commands::ask::execute_generate_record(output).await,
        Commands::Records { command } => run_records_command(command, output).await,
        Commands::Departments => commands::appointments::execute_departments(output).await,
        Commands::Doctors { department } => {
            commands::appointments::execute_doctors(department, output).await
        }
        Commands::Appoint {
            doctor,
            date,
            time,
            record,
        } => {
            let request = AppointmentRequest {
                doctor_id: doctor,
                appointment_date: date,
                appointment_time: time,
                medical_record_id: record,
            };
            commands::appointments::execute_appoint(request, output).await
        }
        Commands::Pending => commands::appointments::execute_pending(output).await,
        Commands::Status => commands::auth::execute_status(output),
    };

    match result {
        Ok(exit_code) => exit_code,
        Err(e) => {
            eprintln!("Error: {}", e);
            EXIT_ERROR
        }
    }
}

async fn run_register_command(
    command: RegisterCommands,
    output: OutputOptions,
) -> anyhow::Result<i32> {
    match command {
        RegisterCommands::Patient {
            phone,
            password,
            full_name,
            birth_date,
        } => {
            commands::auth::execute_register_patient(commands::auth::RegisterPatientArgs {
                phone,
                password,
                full_name,
                birth_date,
                output,
            })
            .await
        }
        RegisterCommands::Doctor {
            phone,
            password,
            full_name,
            license_id,
            hospital,
            department,
            title,
            certificate,
        } => {
            let registration = DoctorRegistration {
                phone,
                password,
                full_name,
                license_id,
                hospital,
                department,
                title,
            };
            commands::auth::execute_register_doctor(commands::auth::RegisterDoctorArgs {
                registration,
                certificate,
                output,
            })
            .await
        }
    }
}

async fn run_profile_command(
    command: ProfileCommands,
    output: OutputOptions,
) -> anyhow::Result<i32> {
    match command {
        ProfileCommands::Show => commands::profile::execute_show(output).await,
        ProfileCommands::Update {
            nickname,
            gender,
            age,
        } => {
            let update = ProfileUpdate {
                nickname,
                gender,
                age,
            };
            commands::profile::execute_update(update, output).await
        }
        ProfileCommands::Avatar { path } => commands::profile::execute_avatar(path, output).await,
        ProfileCommands::Password { old, new } => {
            let change = PasswordChange {
                old_password: old,
                new_password: new,
            };
            commands::profile::execute_password(change, output).await
        }
    }
}

async fn run_records_command(
    command: RecordCommands,
    output: OutputOptions,
) -> anyhow::Result<i32> {
    match command {
        RecordCommands::Recent => commands::records::execute_recent(output).await,
        RecordCommands::All => commands::records::execute_all(output).await,
        RecordCommands::List => commands::records::execute_list(output).await,
        RecordCommands::Show { id } => commands::records::execute_show(&id, output).await,
        RecordCommands::Create { question, answer } => {
            commands::records::execute_create(&question, &answer, output).await
        }
    }
}
