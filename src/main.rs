//! SANAD - Patient/caregiver emergency-call client
//!
//! Terminal client for the SANAD backend: authentication, device pairing,
//! helper management, emergency triggering, and call-history review.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use sanad_api::ApiClient;
use sanad_core::{
    AddHelperRequest, ApiConfig, Customer, CustomerCall, Device, DeviceUuid, Helper, HelperCall,
    LoginRequest, RegisterRequest, ResetPasswordRequest, UpdateHelperRequest,
    UpdateProfileRequest,
};
use sanad_pairing::{
    CameraAccess, FixedProbe, FlowState, LineScanner, PairingFlow, ScanOutcome, ScanSource,
    SubmitOutcome,
};
use sanad_session::{Session, SessionState, SessionStorage};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{info, Level};
use tracing_subscriber::EnvFilter;

/// SANAD - Emergency call client
#[derive(Parser, Debug)]
#[command(name = "sanad")]
#[command(version, about, long_about = None)]
struct Args {
    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Log in with email or phone number
    Login {
        /// Email or phone number
        identifier: String,
        password: String,
    },
    /// Create an account
    Register {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        phone: String,
        #[arg(long)]
        age: Option<u32>,
        #[arg(long)]
        location: Option<String>,
        #[arg(long)]
        disability: Option<String>,
    },
    /// Log out and clear the stored session
    Logout,
    /// Change the account password
    ResetPassword {
        #[arg(long)]
        current: String,
        #[arg(long)]
        new: String,
    },
    /// Permanently delete the account
    DeleteAccount {
        /// Confirm the deletion
        #[arg(long)]
        yes: bool,
    },
    /// Show the account profile
    Profile,
    /// Edit the account profile
    ProfileUpdate {
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        age: Option<u32>,
        #[arg(long)]
        location: Option<String>,
        #[arg(long)]
        disability: Option<String>,
    },
    /// Show the dashboard summary
    Home,
    /// Trigger an emergency call cascade to your helpers
    Trigger,
    /// Manage paired devices
    Devices {
        #[command(subcommand)]
        command: DeviceCommand,
    },
    /// Manage emergency contacts
    Helpers {
        #[command(subcommand)]
        command: HelperCommand,
    },
    /// Review emergency calls triggered from your devices
    Calls {
        #[command(subcommand)]
        command: CallCommand,
    },
    /// Review the outbound legs placed to your helpers
    HelperCalls {
        #[command(subcommand)]
        command: CallCommand,
    },
}

#[derive(Subcommand, Debug)]
enum DeviceCommand {
    /// List paired devices
    List,
    /// Show one device
    Show { id: i64 },
    /// Pair a device by scanning its code (reads payloads from stdin)
    Pair {
        /// Skip scanning and type the identifier instead
        #[arg(long)]
        manual: bool,
    },
    /// Add a device directly by identifier
    Add { uuid: String },
    /// Remove a device from your account
    Delete { id: i64 },
    /// Render a device identifier as a QR code
    Qr { uuid: String },
}

#[derive(Subcommand, Debug)]
enum HelperCommand {
    /// List helpers
    List,
    /// Add a helper
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        phone: String,
        #[arg(long)]
        location: Option<String>,
        #[arg(long)]
        age: Option<u32>,
        /// Call priority (1 is called first)
        #[arg(long)]
        priority: Option<i32>,
    },
    /// Update a helper
    Update {
        id: i64,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        location: Option<String>,
        #[arg(long)]
        age: Option<u32>,
        #[arg(long)]
        priority: Option<i32>,
    },
    /// Remove a helper
    Delete { id: i64 },
}

#[derive(Subcommand, Debug)]
enum CallCommand {
    /// List calls
    List,
    /// Show one call
    Show { id: i64 },
    /// Delete a call record
    Delete { id: i64 },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let log_level = if args.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_target(false)
        .compact()
        .with_env_filter(EnvFilter::from_default_env().add_directive(log_level.into()))
        .finish();
    tracing::subscriber::set_global_default(subscriber).ok();

    let config = ApiConfig::from_env();
    info!("Backend: {}", config.base_url);

    let storage = SessionStorage::new().context("Failed to locate the config directory")?;
    let session = Arc::new(Session::new(storage));
    session.initialize().await;

    let client = ApiClient::new(config)?;
    if let Some(token) = session.token().await {
        client.set_auth_token(Some(token));
    }

    match args.command {
        Command::Login {
            identifier,
            password,
        } => {
            let auth = client
                .login(&LoginRequest {
                    identifier,
                    password,
                })
                .await?;
            let name = auth.customer.name.clone();
            // Login succeeded on the server; a session we cannot persist must
            // be reported, not papered over
            session
                .establish(auth.token, auth.customer)
                .await
                .context("Logged in, but the session could not be saved locally")?;
            println!("Welcome back, {name}.");
        }
        Command::Register {
            name,
            email,
            password,
            phone,
            age,
            location,
            disability,
        } => {
            let auth = client
                .register(&RegisterRequest {
                    name,
                    email,
                    password,
                    phone_number: phone,
                    age,
                    location,
                    disability,
                })
                .await?;
            let name = auth.customer.name.clone();
            session
                .establish(auth.token, auth.customer)
                .await
                .context("Registered, but the session could not be saved locally")?;
            println!("Account created. Welcome, {name}.");
        }
        Command::Logout => {
            // Best effort server-side; the local session goes regardless
            if let Err(e) = client.logout().await {
                info!("Server-side logout failed: {}", e.user_message());
            }
            session.clear().await?;
            println!("Logged out.");
        }
        Command::ResetPassword { current, new } => {
            require_session(&session).await?;
            client
                .reset_password(&ResetPasswordRequest {
                    current_password: current,
                    new_password: new.clone(),
                    new_password_confirmation: new,
                })
                .await?;
            println!("Password changed.");
        }
        Command::DeleteAccount { yes } => {
            require_session(&session).await?;
            if !yes {
                bail!("Deleting the account is permanent. Re-run with --yes to confirm.");
            }
            client.delete_account().await?;
            session.clear().await?;
            println!("Account deleted.");
        }
        Command::Profile => {
            require_session(&session).await?;
            let profile = client.profile().await?;
            print_customer(&profile.customer);
        }
        Command::ProfileUpdate {
            name,
            email,
            phone,
            age,
            location,
            disability,
        } => {
            require_session(&session).await?;
            let profile = client
                .update_profile(&UpdateProfileRequest {
                    name,
                    email,
                    phone_number: phone,
                    age,
                    location,
                    disability,
                })
                .await?;
            print_customer(&profile.customer);
            // Keep the cached display data consistent without re-authenticating
            session.refresh_user(profile.customer).await?;
            println!("Profile updated.");
        }
        Command::Home => {
            require_session(&session).await?;
            let home = client.home().await?;
            println!("{}", home.customer.name);
            println!(
                "  helpers: {}  devices: {}  calls: {}  helper calls: {}",
                home.helpers_count,
                home.devices_count,
                home.customer_calls_count,
                home.helper_calls_count
            );
        }
        Command::Trigger => {
            let user = require_session(&session).await?;
            let data = client.trigger_call(user.id).await?;
            println!("{}", data.response.message);
            println!(
                "  call {} is {}",
                data.response.customer_call_uuid, data.response.status
            );
        }
        Command::Devices { command } => {
            require_session(&session).await?;
            run_device_command(&client, command).await?;
        }
        Command::Helpers { command } => {
            require_session(&session).await?;
            run_helper_command(&client, command).await?;
        }
        Command::Calls { command } => {
            require_session(&session).await?;
            match command {
                CallCommand::List => {
                    let data = client.customer_calls().await?;
                    if data.customer_calls.is_empty() {
                        println!("No calls yet.");
                    }
                    for call in &data.customer_calls {
                        print_customer_call(call);
                    }
                }
                CallCommand::Show { id } => {
                    let call = client.customer_call(id).await?;
                    print_customer_call(&call);
                    for leg in call.helper_calls.as_deref().unwrap_or_default() {
                        print_helper_call(leg);
                    }
                }
                CallCommand::Delete { id } => {
                    client.delete_customer_call(id).await?;
                    println!("Call record removed.");
                }
            }
        }
        Command::HelperCalls { command } => {
            require_session(&session).await?;
            match command {
                CallCommand::List => {
                    let data = client.helper_calls().await?;
                    if data.helper_calls.is_empty() {
                        println!("No helper calls yet.");
                    }
                    for call in &data.helper_calls {
                        print_helper_call(call);
                    }
                }
                CallCommand::Show { id } => {
                    let call = client.helper_call(id).await?;
                    print_helper_call(&call);
                }
                CallCommand::Delete { id } => {
                    client.delete_helper_call(id).await?;
                    println!("Call record removed.");
                }
            }
        }
    }

    Ok(())
}

/// Bail out of authenticated commands when no session is established.
async fn require_session(session: &Session) -> Result<Customer> {
    match session.state().await {
        SessionState::Authenticated => session
            .user()
            .await
            .context("Session lost its user profile"),
        SessionState::Unauthenticated | SessionState::Pending => {
            bail!("Not logged in. Run `sanad login <identifier> <password>` first.")
        }
    }
}

async fn run_device_command(client: &ApiClient, command: DeviceCommand) -> Result<()> {
    match command {
        DeviceCommand::List => {
            let data = client.devices().await?;
            if data.devices.is_empty() {
                println!("No devices paired yet. Run `sanad devices pair` to add one.");
            }
            for device in &data.devices {
                print_device(device);
            }
        }
        DeviceCommand::Show { id } => {
            let device = client.device(id).await?;
            print_device(&device);
        }
        DeviceCommand::Pair { manual } => {
            run_pairing(client, manual).await?;
        }
        DeviceCommand::Add { uuid } => {
            let uuid: DeviceUuid = uuid.parse()?;
            let device = client.add_device(&uuid).await?;
            println!("Device added:");
            print_device(&device);
        }
        DeviceCommand::Delete { id } => {
            client.delete_device(id).await?;
            println!("Device removed.");
        }
        DeviceCommand::Qr { uuid } => {
            let uuid: DeviceUuid = uuid.parse()?;
            display_qr_code(uuid.as_str());
            println!("  {uuid}");
        }
    }
    Ok(())
}

async fn run_helper_command(client: &ApiClient, command: HelperCommand) -> Result<()> {
    match command {
        HelperCommand::List => {
            let data = client.helpers().await?;
            if data.helpers.is_empty() {
                println!("No helpers yet. Add one with `sanad helpers add`.");
            }
            for helper in &data.helpers {
                print_helper(helper);
            }
        }
        HelperCommand::Add {
            name,
            email,
            phone,
            location,
            age,
            priority,
        } => {
            let helper = client
                .add_helper(&AddHelperRequest {
                    name,
                    email,
                    phone_number: phone,
                    location,
                    age,
                    priority,
                })
                .await?;
            println!("Helper added:");
            print_helper(&helper);
        }
        HelperCommand::Update {
            id,
            name,
            email,
            phone,
            location,
            age,
            priority,
        } => {
            let helper = client
                .update_helper(
                    id,
                    &UpdateHelperRequest {
                        name,
                        email,
                        phone_number: phone,
                        location,
                        age,
                        priority,
                    },
                )
                .await?;
            println!("Helper updated:");
            print_helper(&helper);
        }
        HelperCommand::Delete { id } => {
            client.delete_helper(id).await?;
            println!("Helper removed.");
        }
    }
    Ok(())
}

/// Drive the pairing flow over the terminal.
///
/// Each stdin line stands in for a decoded camera frame; `--manual` maps to
/// the camera-unavailable branch, where the identifier is typed instead.
async fn run_pairing(client: &ApiClient, manual: bool) -> Result<()> {
    let access = if manual {
        CameraAccess::Unavailable
    } else {
        CameraAccess::Available
    };

    let paired = Arc::new(AtomicBool::new(false));
    let paired_flag = paired.clone();
    let mut flow = PairingFlow::new().with_on_success(move |raw| {
        println!("Device {raw} paired.");
        paired_flag.store(true, Ordering::SeqCst);
    });

    let state = flow.open(&FixedProbe(access)).await;
    let mut scanner = LineScanner::new(tokio::io::stdin());

    match state {
        FlowState::Scanning => {
            println!("Scan the device QR code (paste its payload, Ctrl+D to cancel):");
            while let Some(payload) = scanner.next_decode().await {
                match flow.on_scan(&payload) {
                    ScanOutcome::Accepted(uuid) => match flow.submit(client, uuid).await {
                        SubmitOutcome::Paired(_) => break,
                        SubmitOutcome::Failed(message) => {
                            println!("{message}");
                            println!("Scan again, or Ctrl+D to cancel.");
                        }
                        SubmitOutcome::Stale => break,
                    },
                    ScanOutcome::Rejected => {
                        if let Some(message) = flow.last_message() {
                            println!("{message}");
                        }
                    }
                    ScanOutcome::Ignored => {}
                }
            }
        }
        FlowState::ManualEntry => {
            println!("Type the 36-character device identifier (Ctrl+D to cancel):");
            while let Some(line) = scanner.next_decode().await {
                flow.set_manual_input(line);
                let Some(uuid) = flow.validate_manual() else {
                    if let Some(message) = flow.last_message() {
                        println!("{message}");
                    }
                    continue;
                };
                match flow.submit(client, uuid).await {
                    SubmitOutcome::Paired(_) => break,
                    SubmitOutcome::Failed(message) => {
                        println!("{message}");
                        println!("Try again, or Ctrl+D to cancel.");
                    }
                    SubmitOutcome::Stale => break,
                }
            }
        }
        _ => {}
    }
    flow.close();

    // Successful pairing refreshes the device list for the caller
    if paired.load(Ordering::SeqCst) {
        let data = client.devices().await?;
        println!("{} device(s) on this account:", data.devices.len());
        for device in &data.devices {
            print_device(device);
        }
    } else {
        println!("Pairing cancelled.");
    }
    Ok(())
}

fn print_customer(customer: &Customer) {
    println!("#{} {} <{}>", customer.id, customer.name, customer.email);
    if let Some(phone) = &customer.phone_number {
        println!("  phone: {phone}");
    }
    if let Some(age) = customer.age {
        println!("  age: {age}");
    }
    if let Some(location) = &customer.location {
        println!("  location: {location}");
    }
    if let Some(disability) = &customer.disability {
        println!("  disability: {disability}");
    }
}

fn print_device(device: &Device) {
    let version = device.version.as_deref().unwrap_or("unknown");
    println!("#{} {} (v{version})", device.id, device.uuid);
}

fn print_helper(helper: &Helper) {
    let phone = helper.phone_number.as_deref().unwrap_or("-");
    match helper.pivot.as_ref() {
        Some(pivot) => println!(
            "#{} {} ({phone}) priority {}",
            helper.id, helper.name, pivot.priority
        ),
        None => println!("#{} {} ({phone})", helper.id, helper.name),
    }
}

fn print_customer_call(call: &CustomerCall) {
    let when = call
        .initiated_at
        .map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| "-".to_string());
    let duration = call
        .duration_seconds
        .map(|s| format!("{s}s"))
        .unwrap_or_else(|| "-".to_string());
    println!(
        "#{} {} {} {} ({duration})",
        call.id, when, call.status, call.uuid
    );
    if let Some(error) = &call.error_message {
        println!("  error: {error}");
    }
}

fn print_helper_call(call: &HelperCall) {
    let who = call
        .helper
        .as_ref()
        .map(|h| h.name.clone())
        .unwrap_or_else(|| format!("helper #{}", call.helper_id));
    println!(
        "#{} {} -> {who} [priority {}] {}",
        call.id, call.uuid, call.priority, call.status
    );
}

/// Display a QR code in the terminal
fn display_qr_code(data: &str) {
    use qrcode::QrCode;

    let code = match QrCode::new(data.as_bytes()) {
        Ok(c) => c,
        Err(e) => {
            tracing::warn!("Failed to generate QR code: {}", e);
            return;
        }
    };

    // Render as Unicode block characters for terminal display
    let string = code
        .render::<char>()
        .quiet_zone(true)
        .module_dimensions(2, 1)
        .build();

    for line in string.lines() {
        println!("  {line}");
    }
}
