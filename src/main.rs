//! Extensa - named extensions resolved from configuration
//!
//! Demo CLI exercising the sample `UserService` capability.

mod cli;
mod register;
mod user_service;

use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use extensa_core::Kernel;

use cli::{Cli, Commands};
use user_service::UserServiceCapability;

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_target(true)
                .with_writer(std::io::stderr),
        )
        .init();
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let cli = Cli::parse();
    let kernel = register::build_kernel(cli.config.as_deref())?;

    match cli.command {
        Some(Commands::Default { message }) => greet(&kernel, None, &message)?,
        Some(Commands::Get { name, message }) => greet(&kernel, Some(&name), &message)?,
        Some(Commands::List) => list(&kernel)?,
        None => {
            greet(&kernel, None, "1")?;
            greet(&kernel, Some("teacher"), "2")?;
        }
    }

    Ok(())
}

fn greet(kernel: &Kernel, name: Option<&str>, message: &str) -> Result<(), Box<dyn std::error::Error>> {
    let registry = kernel.registry::<UserServiceCapability>()?;
    let service = match name {
        Some(name) => registry.instance(name)?,
        None => registry.default_instance()?,
    };

    match service {
        Some(service) => println!("{}", service.hello(message)),
        None => warn!("No user service configured for {}", name.unwrap_or("the default")),
    }
    Ok(())
}

fn list(kernel: &Kernel) -> Result<(), Box<dyn std::error::Error>> {
    let registry = kernel.registry::<UserServiceCapability>()?;
    let default = registry.default_name()?;

    for name in registry.names()? {
        let marker = if default.as_deref() == Some(name.as_str()) { "*" } else { " " };
        let state = if registry.contains(&name)? { "" } else { " (rejected)" };
        println!("{} {}{}", marker, name, state);
    }
    for identifier in registry.unnamed_implementations()? {
        println!("  <unnamed> {}", identifier);
    }

    info!("{} user services configured", registry.names()?.len());
    Ok(())
}
