//! Dakiya CLI - Call logs, settings and call simulation
//!
//! Talks to a running Dakiya server over its dashboard API and webhooks.

mod api;
mod config;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use dialoguer::Input;
use uuid::Uuid;

use api::{CallLog, DakiyaClient, SpokenReply, UpdateDeliverySettings};
use config::Config;

#[derive(Parser)]
#[command(name = "dakiya")]
#[command(about = "Dakiya CLI - Delivery voice assistant operations", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Save the server URL after checking it is reachable
    Connect {
        /// Base URL, e.g. https://dakiya.shuttle.app
        #[arg(short, long)]
        url: String,
    },

    /// Call logs
    Calls {
        #[command(subcommand)]
        action: CallsAction,
    },

    /// Show aggregate call statistics
    Stats,

    /// Delivery settings
    Settings {
        #[command(subcommand)]
        action: SettingsAction,
    },

    /// Ring a phone number through the telephony provider
    TestCall {
        /// Phone number to call
        phone: String,
    },

    /// Play the caller in a conversation against the webhooks
    Simulate {
        /// Caller number reported to the server
        #[arg(short, long, default_value = "+91 90000 00000")]
        from: String,
    },

    /// Show current configuration
    Config,
}

#[derive(Subcommand)]
enum CallsAction {
    /// List recent calls
    List,
    /// Show one call with its transcript
    Show {
        /// Call log id
        id: String,
    },
}

#[derive(Subcommand)]
enum SettingsAction {
    /// Show delivery settings
    Show,
    /// Update delivery settings; omitted flags keep their value
    Set {
        #[arg(long)]
        instructions: Option<String>,
        #[arg(long)]
        allow_cod: Option<bool>,
        #[arg(long)]
        require_otp: Option<bool>,
        /// Minutes before a call is handed to a human (0 disables)
        #[arg(long)]
        threshold: Option<i32>,
        /// Emergency contact; repeat for several
        #[arg(long = "contact")]
        contacts: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Connect { url } => cmd_connect(url).await,
        Commands::Calls { action } => cmd_calls(action).await,
        Commands::Stats => cmd_stats().await,
        Commands::Settings { action } => cmd_settings(action).await,
        Commands::TestCall { phone } => cmd_test_call(phone).await,
        Commands::Simulate { from } => cmd_simulate(from).await,
        Commands::Config => cmd_config(),
    }
}

fn client() -> Result<DakiyaClient> {
    let config = Config::load()?;
    Ok(DakiyaClient::new(&config.base_url))
}

// ============================================
// Command Implementations
// ============================================

async fn cmd_connect(url: String) -> Result<()> {
    let mut config = Config::load()?;
    config.set_base_url(&url);

    let client = DakiyaClient::new(&config.base_url);
    print!("Testing connection... ");

    match client.health().await {
        Ok(true) => println!("{}", "OK".green()),
        _ => {
            println!("{}", "Failed".red());
            bail!("Could not reach Dakiya at {}", config.base_url);
        }
    }

    config.save()?;
    println!("{} Server URL saved to {:?}", "✓".green(), Config::config_path()?);
    Ok(())
}

async fn cmd_calls(action: CallsAction) -> Result<()> {
    let client = client()?;

    match action {
        CallsAction::List => {
            let calls = client.list_calls().await?;
            if calls.is_empty() {
                println!("No calls yet.");
                return Ok(());
            }

            println!("{}", "Calls:".bold());
            for call in calls {
                println!(
                    "  {} {} {} {}",
                    call.created_at.format("%Y-%m-%d %H:%M"),
                    colored_status(&call.status),
                    call.phone_number.cyan(),
                    call.id.to_string().dimmed()
                );
            }
        }
        CallsAction::Show { id } => {
            let call = client.get_call(&id).await?;
            print_call(&call);
        }
    }

    Ok(())
}

fn print_call(call: &CallLog) {
    println!("{} {}", "Call".bold(), call.id);
    println!("  Status:   {}", colored_status(&call.status));
    println!("  Phone:    {}", call.phone_number);
    if let Some(name) = &call.caller_name {
        println!("  Caller:   {}", name);
    }
    if let Some(sid) = &call.call_sid {
        println!("  CallSid:  {}", sid);
    }
    if let Some(package) = &call.package_id {
        println!("  Package:  {}", package);
    }
    if let Some(amount) = call.cod_amount {
        println!("  COD:      ₹{}", amount);
    }
    if call.otp_provided.is_some() {
        println!("  OTP:      received");
    }
    if let Some(secs) = call.duration {
        println!("  Duration: {}s", secs);
    }

    if !call.transcript.is_empty() {
        println!("\n{}", "Transcript:".bold());
        for entry in &call.transcript {
            let speaker = match entry.speaker.as_str() {
                "caller" => "caller   ".yellow(),
                _ => "assistant".cyan(),
            };
            println!("  {} {}", speaker, entry.text);
        }
    }
}

fn colored_status(status: &str) -> colored::ColoredString {
    match status {
        "completed" => status.green(),
        "escalated" => status.yellow(),
        "failed" => status.red(),
        _ => status.blue(),
    }
}

async fn cmd_stats() -> Result<()> {
    let stats = client()?.stats().await?;

    println!("{}", "Call statistics:".bold());
    println!("  Total calls:       {}", stats.total_calls);
    println!(
        "  Delivered:         {}",
        stats.successful_deliveries.to_string().green()
    );
    println!(
        "  Escalated:         {}",
        stats.escalated_calls.to_string().yellow()
    );
    println!("  Average duration:  {:.0}s", stats.average_duration);
    println!("  Success rate:      {:.1}%", stats.success_rate);
    Ok(())
}

async fn cmd_settings(action: SettingsAction) -> Result<()> {
    let client = client()?;

    let settings = match action {
        SettingsAction::Show => client.delivery_settings().await?,
        SettingsAction::Set {
            instructions,
            allow_cod,
            require_otp,
            threshold,
            contacts,
        } => {
            let update = UpdateDeliverySettings {
                default_instructions: instructions,
                emergency_contacts: (!contacts.is_empty()).then_some(contacts),
                allow_cod,
                require_otp,
                escalation_threshold: threshold,
            };
            let saved = client.update_delivery_settings(&update).await?;
            println!("{} Delivery settings saved", "✓".green());
            saved
        }
    };

    println!("{}", "Delivery settings:".bold());
    println!("  Instructions:  {}", settings.default_instructions);
    println!("  Contacts:      {}", settings.emergency_contacts.join(", "));
    println!("  Allow COD:     {}", settings.allow_cod);
    println!("  Require OTP:   {}", settings.require_otp);
    println!("  Threshold:     {} min", settings.escalation_threshold);
    Ok(())
}

async fn cmd_test_call(phone: String) -> Result<()> {
    let call = client()?.test_call(&phone).await?;
    println!(
        "{} Calling {} ({}, {})",
        "✓".green(),
        phone.cyan(),
        call.call_sid,
        call.status
    );
    Ok(())
}

async fn cmd_simulate(from: String) -> Result<()> {
    let client = client()?;
    let call_sid = format!("SIM{}", Uuid::new_v4().simple());

    println!("{}", "Simulated call - type what the caller says, empty line for silence".dimmed());

    let mut reply = client.start_call(&from, &call_sid).await?;
    loop {
        print_spoken(&reply);

        let Some(gather_path) = reply.next.take() else {
            println!("{}", "Call ended.".dimmed());
            return Ok(());
        };

        let line: String = Input::new()
            .with_prompt("caller")
            .allow_empty(true)
            .interact_text()
            .context("Failed to read input")?;

        reply = client.say(&gather_path, &line, &call_sid).await?;
    }
}

fn print_spoken(reply: &SpokenReply) {
    println!("{} {}", "assistant:".cyan().bold(), reply.text);
}

fn cmd_config() -> Result<()> {
    let config = Config::load()?;
    let path = Config::config_path()?;

    println!("{}", "Configuration:".bold());
    println!("  Config file: {:?}", path);
    println!("  Server URL:  {}", config.base_url);
    Ok(())
}
